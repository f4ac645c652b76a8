use crate::error::Fault;
use crate::instruction::Opcode;

/// Arithmetic on two register values. Results are truncated to 8 bits after
/// every operation; nothing here can overflow.
pub struct Alu;

impl Alu {
    pub fn apply(op: Opcode, a: u8, b: u8) -> Result<u8, Fault> {
        match op {
            Opcode::Add => Ok(a.wrapping_add(b)),
            Opcode::Mul => Ok(a.wrapping_mul(b)),
            _ => Err(Fault::UnsupportedOperation(op.byte())),
        }
    }
}
