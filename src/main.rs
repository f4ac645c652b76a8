use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use ls8::config::{parse_address, Ls8Config};
use ls8::display::StdoutOutput;
use ls8::interpreter::Ls8Interpreter;
use ls8::loader;
use ls8::memory::LS8_STACK_TOP;
use ls8::monitor::Monitor;
use ls8::state::CpuState;

/// LS-8 emulator
#[derive(Parser)]
#[command(version)]
struct Args {
    /// program to run: one binary byte per line, `#` starts a comment
    program: PathBuf,

    /// print a TRACE line to stderr before each instruction
    #[arg(long)]
    trace: bool,

    /// full-screen view of registers and memory while running
    #[arg(long)]
    monitor: bool,

    /// start the monitor paused, one instruction per keypress
    #[arg(long)]
    step: bool,

    /// instructions per second (default: as fast as possible)
    #[arg(long, value_name = "HZ")]
    clock_hz: Option<u32>,

    /// initial stack pointer, decimal or 0x hex
    #[arg(long, value_name = "ADDR", value_parser = parse_address, default_value_t = LS8_STACK_TOP)]
    stack_top: u8,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let program = match loader::load_file(&args.program) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("ls8: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };
    let config = Ls8Config {
        stack_top: args.stack_top,
        clock_hz: args.clock_hz,
    };

    let state = if args.monitor || args.step {
        run_monitor(&program, &config, args.step)
    } else {
        let mut output = StdoutOutput::new(args.trace);
        run(&program, &config, &mut output)
    };

    if let CpuState::Faulted(fault) = &state {
        eprintln!("ls8: {}", fault);
    }
    ExitCode::from(state.exit_code())
}

fn run(program: &[u8], config: &Ls8Config, output: &mut dyn ls8::display::Output) -> CpuState {
    let mut interpreter = Ls8Interpreter::new(output, config);
    if let Err(fault) = interpreter.load_program(program) {
        return CpuState::Faulted(fault);
    }
    interpreter.main_loop().clone()
}

fn run_monitor(program: &[u8], config: &Ls8Config, paused: bool) -> CpuState {
    let (state, printed) = match Monitor::new(paused) {
        Ok(mut monitor) => {
            let state = run(program, config, &mut monitor);
            (state, monitor.printed().to_vec())
        }
        Err(e) => (CpuState::Faulted(e.into()), Vec::new()),
    };
    // the monitor has let go of the terminal by now; replay what PRN said
    for line in printed {
        println!("{}", line);
    }
    state
}
