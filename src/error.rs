use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops the CPU. Every fault is terminal for the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// the byte at `address` is not an LS-8 opcode
    #[error("unknown opcode 0x{opcode:02X} at address 0x{address:02X}")]
    UnknownOpcode { opcode: u8, address: usize },

    /// the ALU was handed an opcode it cannot compute
    #[error("unsupported ALU operation 0x{0:02X}")]
    UnsupportedOperation(u8),

    #[error("address 0x{0:X} is outside memory")]
    AddressOutOfRange(usize),

    #[error("invalid register R{0}")]
    InvalidRegister(u8),

    /// push with SP already at address 0
    #[error("stack overflow: cannot push below SP=0x{sp:02X}")]
    StackOverflow { sp: u8 },

    /// pop with SP already at the last address
    #[error("stack underflow: cannot pop past SP=0x{sp:02X}")]
    StackUnderflow { sp: u8 },

    /// the output sink could not be written to
    #[error("output sink failed: {0}")]
    Output(String),
}

impl Fault {
    /// true for every fault caused by touching memory outside [0, 255],
    /// including the stack pointer walking off either end
    pub fn is_address_fault(&self) -> bool {
        matches!(
            self,
            Fault::AddressOutOfRange(_) | Fault::StackOverflow { .. } | Fault::StackUnderflow { .. }
        )
    }
}

impl From<io::Error> for Fault {
    fn from(e: io::Error) -> Self {
        Fault::Output(e.to_string())
    }
}

/// Problems reading a program before the CPU ever starts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {text:?} is not an 8-bit binary literal")]
    Parse { line: usize, text: String },

    #[error("program is {len} bytes; memory only holds 256")]
    ProgramTooLarge { len: usize },
}

/// exit status when the program can't be loaded
pub const EXIT_LOAD_ERROR: u8 = 2;

impl LoadError {
    /// process exit status; the CPU never ran
    pub fn exit_code(&self) -> u8 {
        EXIT_LOAD_ERROR
    }
}
