///
/// ## Design
///
/// * LS-8: 8-bit CPU, 256 bytes of RAM, 8 registers with R7 as stack pointer
/// * fetch/decode/execute one instruction per step; no interrupts, no devices
/// * the run loop ends in an explicit state, `Halted` or `Faulted(reason)`;
///   every fault is terminal
/// * all arithmetic is 8-bit and wraps after every ALU operation
/// * abstract output so the interpreter doesn't know whether PRN goes to
///   stdout, a test buffer or the full-screen monitor
/// * optional clock so programs can be watched running at human speed
///
/// Model
///
/// main
///  |-- config(cli), output or monitor(input)
///  |-- loader: text file -> bytes
///  |-- interpreter(output, config)
///  |    |-- memory, registers, flags
///  |    |-- instruction set -> alu
///  |    `-- state machine: Running -> Halted | Faulted
///  `-- main loop
///       |-- output.observe(snapshot)   // trace / monitor
///       |-- fetch opcode + 2 operands; decode; execute
///       `-- sleep(cycle time)
pub mod alu;
pub mod config;
pub mod display;
pub mod error;
pub mod flags;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod loader;
pub mod memory;
pub mod monitor;
pub mod registers;
pub mod state;
