use crate::error::Fault;

/// number of general purpose registers
pub const REGISTER_COUNT: usize = 8;

/// R7 doubles as the stack pointer
pub const SP: u8 = 7;

/// Eight byte-wide registers, R0..R7. R7 is the stack pointer; there is no
/// other copy of SP anywhere in the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u8; REGISTER_COUNT],
}

impl RegisterFile {
    /// all zero, except SP which points at `stack_top`
    pub fn new(stack_top: u8) -> Self {
        let mut regs = [0u8; REGISTER_COUNT];
        regs[SP as usize] = stack_top;
        RegisterFile { regs }
    }

    pub fn get(&self, index: u8) -> Result<u8, Fault> {
        self.regs
            .get(index as usize)
            .copied()
            .ok_or(Fault::InvalidRegister(index))
    }

    pub fn set(&mut self, index: u8, value: u8) -> Result<(), Fault> {
        let r = self
            .regs
            .get_mut(index as usize)
            .ok_or(Fault::InvalidRegister(index))?;
        *r = value;
        Ok(())
    }

    pub fn stack_pointer(&self) -> u8 {
        self.regs[SP as usize]
    }

    pub fn set_stack_pointer(&mut self, sp: u8) {
        self.regs[SP as usize] = sp;
    }

    /// copy of all eight, R0 first
    pub fn as_array(&self) -> [u8; REGISTER_COUNT] {
        self.regs
    }
}
