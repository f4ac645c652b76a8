/// # instruction
///
/// LS-8 opcodes are a single byte laid out as `AABCDDDD`:
///  AA   number of operand bytes that follow (0-2)
///  B    1 if the instruction is computed by the ALU
///  C    1 if the instruction sets the PC itself
///  DDDD instruction identifier
///
/// The interpreter matches on `Opcode` directly and only uses AA, to know
/// how far to advance the PC.
use crate::error::Fault;
use std::convert::TryFrom;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Hlt = 0b0000_0001,
    Ret = 0b0001_0001,
    Push = 0b0100_0101,
    Pop = 0b0100_0110,
    Prn = 0b0100_0111,
    Call = 0b0101_0000,
    Jmp = 0b0101_0100,
    Jeq = 0b0101_0101,
    Jne = 0b0101_0110,
    Ldi = 0b1000_0010,
    Add = 0b1010_0000,
    Mul = 0b1010_0010,
    Cmp = 0b1010_0111,
}

pub const ALL_OPCODES: [Opcode; 13] = [
    Opcode::Hlt,
    Opcode::Ret,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Prn,
    Opcode::Call,
    Opcode::Jmp,
    Opcode::Jeq,
    Opcode::Jne,
    Opcode::Ldi,
    Opcode::Add,
    Opcode::Mul,
    Opcode::Cmp,
];

impl Opcode {
    /// decode a byte fetched from `address`
    pub fn decode(byte: u8, address: usize) -> Result<Opcode, Fault> {
        Opcode::try_from(byte).map_err(|opcode| Fault::UnknownOpcode { opcode, address })
    }

    pub fn byte(self) -> u8 {
        self as u8
    }

    pub fn operand_count(self) -> usize {
        (self.byte() >> 6) as usize
    }

    /// bytes taken by the whole instruction, opcode included
    pub fn size(self) -> usize {
        1 + self.operand_count()
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ret => "RET",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Prn => "PRN",
            Opcode::Call => "CALL",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Ldi => "LDI",
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Cmp => "CMP",
        }
    }

    /// e.g. `LDI R0,8` or `RET`
    pub fn disassemble(self, operand_a: u8, operand_b: u8) -> String {
        match self {
            Opcode::Ldi => format!("LDI R{},{}", operand_a, operand_b),
            Opcode::Add | Opcode::Mul | Opcode::Cmp => {
                format!("{} R{},R{}", self.mnemonic(), operand_a, operand_b)
            }
            _ if self.operand_count() == 1 => format!("{} R{}", self.mnemonic(), operand_a),
            _ => self.mnemonic().to_string(),
        }
    }
}

impl TryFrom<u8> for Opcode {
    /// the offending byte
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        ALL_OPCODES
            .iter()
            .copied()
            .find(|op| op.byte() == byte)
            .ok_or(byte)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_round_trip() {
        for op in ALL_OPCODES {
            assert_eq!(Opcode::try_from(op.byte()), Ok(op));
        }
    }

    #[test]
    fn test_decode_unknown() {
        assert_eq!(
            Opcode::decode(0xff, 12),
            Err(Fault::UnknownOpcode {
                opcode: 0xff,
                address: 12
            })
        );
        assert_eq!(Opcode::try_from(0x00), Err(0x00));
    }

    #[test]
    fn test_operand_counts() {
        assert_eq!(Opcode::Hlt.size(), 1);
        assert_eq!(Opcode::Ret.size(), 1);
        assert_eq!(Opcode::Prn.size(), 2);
        assert_eq!(Opcode::Push.size(), 2);
        assert_eq!(Opcode::Call.size(), 2);
        assert_eq!(Opcode::Ldi.size(), 3);
        assert_eq!(Opcode::Cmp.size(), 3);
    }

    #[test]
    fn test_disassemble() {
        assert_eq!(Opcode::Ldi.disassemble(0, 8), "LDI R0,8");
        assert_eq!(Opcode::Mul.disassemble(0, 1), "MUL R0,R1");
        assert_eq!(Opcode::Prn.disassemble(3, 0xaa), "PRN R3");
        assert_eq!(Opcode::Hlt.disassemble(0, 0), "HLT");
    }
}
