/// # interpreter
///
/// The LS-8 has:
///  - 256 bytes of RAM, programs loaded at 0x00
///  - 8 byte registers R0-R7; R7 is the stack pointer  -- 0xF4 at power on
///  - a program counter                                  -- 0x00 at power on
///  - a flags register (L, G, E) written only by CMP
///
/// The stack grows down: PUSH and CALL decrement SP and then write; POP and
/// RET read, store the value in its register (or the PC), and then increment. All four go through R7, so subroutines can
/// push and pop freely as long as they leave SP where they found it.
///
/// Each instruction is one opcode byte plus up to two operand bytes. Both
/// operand bytes are always fetched, so an instruction that starts in the
/// last two bytes of RAM faults even if it takes no operands.
use crate::alu::Alu;
use crate::config::Ls8Config;
use crate::display::Output;
use crate::error::Fault;
use crate::flags::FlagRegister;
use crate::instruction::Opcode;
use crate::memory::{Ls8Memory, MemoryMap, LS8_PROGRAM_ADDR};
use crate::registers::RegisterFile;
use crate::state::{CpuSnapshot, CpuState};
use std::time::Duration;

pub struct Ls8Interpreter<'a> {
    memory: Ls8Memory,
    registers: RegisterFile,
    flags: FlagRegister,
    program_counter: usize,
    state: CpuState,
    output: &'a mut dyn Output,
    cycle_time: Option<Duration>,
}

/// what to do with the PC once an instruction has run
enum Flow {
    Advance(usize),
    Jump(usize),
    Halt,
}

impl<'a> Ls8Interpreter<'a> {
    pub fn new(output: &'a mut dyn Output, config: &Ls8Config) -> Ls8Interpreter<'a> {
        Ls8Interpreter {
            memory: Ls8Memory::new(),
            registers: RegisterFile::new(config.stack_top),
            flags: FlagRegister::new(),
            program_counter: LS8_PROGRAM_ADDR,
            state: CpuState::Running,
            output,
            cycle_time: config.cycle_time(),
        }
    }

    /// load an LS-8 program at 0x00
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Fault> {
        self.memory.load_program(program)
    }

    /// poke a single byte, for loaders that want to place bytes themselves
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), Fault> {
        self.memory.write(address, value)
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn flags(&self) -> &FlagRegister {
        &self.flags
    }

    pub fn memory(&self) -> &Ls8Memory {
        &self.memory
    }

    pub fn snapshot(&self) -> CpuSnapshot<'_> {
        CpuSnapshot::capture(
            self.program_counter,
            &self.registers,
            &self.flags,
            &self.memory,
        )
    }

    /// run until HLT or a fault
    pub fn main_loop(&mut self) -> &CpuState {
        while self.state.is_running() {
            self.step();
            if let Some(cycle_time) = self.cycle_time {
                if self.state.is_running() {
                    spin_sleep::sleep(cycle_time);
                }
            }
        }
        let snapshot = CpuSnapshot::capture(
            self.program_counter,
            &self.registers,
            &self.flags,
            &self.memory,
        );
        if let Err(e) = self.output.finish(&snapshot, &self.state) {
            log::warn!("output sink failed after the run ended: {}", e);
        }
        &self.state
    }

    /// execute one instruction. does nothing once halted or faulted
    pub fn step(&mut self) -> &CpuState {
        if !self.state.is_running() {
            return &self.state;
        }
        match self.cycle() {
            Ok(Flow::Advance(n)) => self.program_counter += n,
            Ok(Flow::Jump(addr)) => self.program_counter = addr,
            Ok(Flow::Halt) => {
                log::info!("halted at 0x{:02X}", self.program_counter);
                self.state = CpuState::Halted;
            }
            Err(fault) => {
                log::error!("faulted at 0x{:02X}: {}", self.program_counter, fault);
                self.state = CpuState::Faulted(fault);
            }
        }
        &self.state
    }

    /// fetch, decode, execute. effects made before a fault are kept
    fn cycle(&mut self) -> Result<Flow, Fault> {
        // fields borrowed one by one so the output can be borrowed mutably
        let snapshot = CpuSnapshot::capture(
            self.program_counter,
            &self.registers,
            &self.flags,
            &self.memory,
        );
        self.output.observe(&snapshot)?;

        let pc = self.program_counter;
        let byte = self.memory.read(pc)?;
        let operand_a = self.memory.read(pc + 1)?;
        let operand_b = self.memory.read(pc + 2)?;
        let opcode = Opcode::decode(byte, pc)?;
        log::debug!("{:02X}: {}", pc, opcode.disassemble(operand_a, operand_b));

        match opcode {
            Opcode::Ldi => {
                self.registers.set(operand_a, operand_b)?;
            }
            Opcode::Prn => {
                let value = self.registers.get(operand_a)?;
                self.output.print_value(value)?;
            }
            Opcode::Add | Opcode::Mul => {
                let a = self.registers.get(operand_a)?;
                let b = self.registers.get(operand_b)?;
                self.registers.set(operand_a, Alu::apply(opcode, a, b)?)?;
            }
            Opcode::Cmp => {
                let a = self.registers.get(operand_a)?;
                let b = self.registers.get(operand_b)?;
                self.flags.compare(a, b);
            }
            Opcode::Push => {
                let value = self.registers.get(operand_a)?;
                self.push(value)?;
            }
            Opcode::Pop => {
                let sp = self.registers.stack_pointer();
                let value = self.memory.read(sp as usize)?;
                self.registers.set(operand_a, value)?;
                self.release(sp)?;
            }
            Opcode::Call => {
                let target = self.registers.get(operand_a)?;
                let return_addr = pc + opcode.size();
                let return_addr =
                    u8::try_from(return_addr).map_err(|_| Fault::AddressOutOfRange(return_addr))?;
                self.push(return_addr)?;
                return Ok(Flow::Jump(target as usize));
            }
            Opcode::Ret => {
                let sp = self.registers.stack_pointer();
                self.program_counter = self.memory.read(sp as usize)? as usize;
                self.release(sp)?;
                return Ok(Flow::Jump(self.program_counter));
            }
            Opcode::Jmp => {
                return Ok(Flow::Jump(self.registers.get(operand_a)? as usize));
            }
            Opcode::Jeq => {
                if self.flags.is_equal() {
                    return Ok(Flow::Jump(self.registers.get(operand_a)? as usize));
                }
            }
            Opcode::Jne => {
                if !self.flags.is_equal() {
                    return Ok(Flow::Jump(self.registers.get(operand_a)? as usize));
                }
            }
            Opcode::Hlt => return Ok(Flow::Halt),
        }
        Ok(Flow::Advance(opcode.size()))
    }

    /// SP <- SP-1; [SP] <- value
    fn push(&mut self, value: u8) -> Result<(), Fault> {
        let sp = self.registers.stack_pointer();
        let sp = sp.checked_sub(1).ok_or(Fault::StackOverflow { sp })?;
        self.registers.set_stack_pointer(sp);
        self.memory.write(sp as usize, value)
    }

    /// second half of POP and RET: SP <- sp+1, where `sp` is where the
    /// value was read from. the value has already landed by now
    fn release(&mut self, sp: u8) -> Result<(), Fault> {
        let next = sp.checked_add(1).ok_or(Fault::StackUnderflow { sp })?;
        self.registers.set_stack_pointer(next);
        Ok(())
    }
}
