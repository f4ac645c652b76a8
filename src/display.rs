use crate::state::{CpuSnapshot, CpuState};
use std::io::{self, Write};

/// Output is where the interpreter sends everything the outside world sees:
/// PRN values, and a look at the machine before each instruction. It should
/// abstract the implementation details, so plain stdout, a test buffer or a
/// full-screen monitor all work.
pub trait Output {
    /// PRN: one decimal value per line
    fn print_value(&mut self, value: u8) -> Result<(), io::Error>;

    /// called before every instruction is fetched
    fn observe(&mut self, _snapshot: &CpuSnapshot) -> Result<(), io::Error> {
        Ok(())
    }

    /// called once when the run loop stops
    fn finish(&mut self, _snapshot: &CpuSnapshot, _state: &CpuState) -> Result<(), io::Error> {
        Ok(())
    }
}

/// PRN to stdout, and optionally trace lines to stderr
pub struct StdoutOutput {
    trace: bool,
}

impl StdoutOutput {
    pub fn new(trace: bool) -> Self {
        StdoutOutput { trace }
    }
}

impl Output for StdoutOutput {
    fn print_value(&mut self, value: u8) -> Result<(), io::Error> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", value)?;
        out.flush()
    }

    fn observe(&mut self, snapshot: &CpuSnapshot) -> Result<(), io::Error> {
        if self.trace {
            writeln!(io::stderr(), "{}", snapshot)?;
        }
        Ok(())
    }
}

/// collects everything in memory; useful for testing
#[derive(Debug, Default)]
pub struct BufferOutput {
    pub lines: Vec<String>,
    pub traces: Vec<String>,
    pub finished: Option<CpuState>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Output for BufferOutput {
    fn print_value(&mut self, value: u8) -> Result<(), io::Error> {
        self.lines.push(value.to_string());
        Ok(())
    }

    fn observe(&mut self, snapshot: &CpuSnapshot) -> Result<(), io::Error> {
        self.traces.push(snapshot.to_string());
        Ok(())
    }

    fn finish(&mut self, _snapshot: &CpuSnapshot, state: &CpuState) -> Result<(), io::Error> {
        self.finished = Some(state.clone());
        Ok(())
    }
}
