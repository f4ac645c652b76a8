use crate::error::Fault;
use crate::flags::FlagRegister;
use crate::memory::Ls8Memory;
use crate::registers::{RegisterFile, REGISTER_COUNT};
use std::fmt;

/// Where the run loop is. `Halted` and `Faulted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpuState {
    Running,
    Halted,
    Faulted(Fault),
}

impl CpuState {
    pub fn is_running(&self) -> bool {
        matches!(self, CpuState::Running)
    }

    /// process exit status for a finished run
    pub fn exit_code(&self) -> u8 {
        match self {
            CpuState::Running | CpuState::Halted => 0,
            CpuState::Faulted(_) => 1,
        }
    }
}

impl fmt::Display for CpuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuState::Running => write!(f, "running"),
            CpuState::Halted => write!(f, "halted"),
            CpuState::Faulted(fault) => write!(f, "faulted: {}", fault),
        }
    }
}

/// Look at the machine between instructions. Registers are copied; memory
/// is borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuSnapshot<'a> {
    pub program_counter: usize,
    pub registers: [u8; REGISTER_COUNT],
    pub flags: u8,
    pub memory: &'a [u8],
}

impl<'a> CpuSnapshot<'a> {
    pub fn capture(
        program_counter: usize,
        registers: &RegisterFile,
        flags: &FlagRegister,
        memory: &'a Ls8Memory,
    ) -> Self {
        CpuSnapshot {
            program_counter,
            registers: registers.as_array(),
            flags: flags.bits(),
            memory: memory.as_slice(),
        }
    }

    /// `len` bytes from the PC on; `None` where they'd fall off the end
    pub fn next_bytes(&self, len: usize) -> Vec<Option<u8>> {
        (0..len)
            .map(|i| self.memory.get(self.program_counter + i).copied())
            .collect()
    }
}

/// the trace line: `TRACE: PC | B0 B1 B2 | R0 .. R7`
impl fmt::Display for CpuSnapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRACE: {:02X} |", self.program_counter)?;
        for b in self.next_bytes(3) {
            match b {
                Some(b) => write!(f, " {:02X}", b)?,
                None => write!(f, " --")?,
            }
        }
        write!(f, " |")?;
        for r in self.registers.iter() {
            write!(f, " {:02X}", r)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> [u8; 256] {
        let mut memory = [0u8; 256];
        memory[0] = 0x82;
        memory[2] = 0x08;
        memory[255] = 0x01;
        memory
    }

    fn snapshot(pc: usize, memory: &[u8]) -> CpuSnapshot<'_> {
        CpuSnapshot {
            program_counter: pc,
            registers: [0, 0, 0, 0, 0, 0, 0, 0xf4],
            flags: 0,
            memory,
        }
    }

    #[test]
    fn test_trace_format() {
        assert_eq!(
            snapshot(0, &memory()).to_string(),
            "TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4"
        );
    }

    #[test]
    fn test_trace_past_end_of_memory() {
        assert_eq!(
            snapshot(0xfe, &memory()).to_string(),
            "TRACE: FE | 00 01 -- | 00 00 00 00 00 00 00 F4"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CpuState::Halted.exit_code(), 0);
        assert_eq!(
            CpuState::Faulted(Fault::AddressOutOfRange(256)).exit_code(),
            1
        );
    }
}
