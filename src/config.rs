use crate::memory::LS8_STACK_TOP;
use std::time::Duration;

/// Machine settings fixed before the first instruction runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ls8Config {
    /// value loaded into SP (R7) at power on
    pub stack_top: u8,
    /// instructions per second; `None` runs flat out
    pub clock_hz: Option<u32>,
}

impl Ls8Config {
    /// how long to sleep after each instruction
    pub fn cycle_time(&self) -> Option<Duration> {
        match self.clock_hz {
            Some(0) | None => None,
            Some(hz) => Some(Duration::from_secs(1) / hz),
        }
    }
}

impl Default for Ls8Config {
    fn default() -> Self {
        Ls8Config {
            stack_top: LS8_STACK_TOP,
            clock_hz: None,
        }
    }
}

/// parse an address given as decimal or `0x` hex
pub fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("{:?} is not an address in 0..=255: {}", s, e))
}
