use crate::display::Output;
use crate::input::{Command, Control, KeyboardControl};
use crate::instruction::Opcode;
use crate::registers::SP;
use crate::state::{CpuSnapshot, CpuState};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use std::io::{self, Write};
use tui::backend::{Backend, CrosstermBackend};
use tui::layout::{Constraint, Direction, Layout};
use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, Borders, Paragraph};
use tui::Terminal;

/// bytes per row of the memory dump
const DUMP_WIDTH: usize = 16;

/// Full-screen view of the machine, redrawn before every instruction.
/// PRN values go to an on-screen log rather than stdout; `printed` hands
/// them back once the monitor is gone.
pub struct Monitor<B: Backend, C: Control> {
    terminal: Terminal<B>,
    control: C,
    paused: bool,
    quit: bool,
    printed: Vec<String>,
    alternate_screen: bool,
}

impl Monitor<CrosstermBackend<io::Stdout>, KeyboardControl> {
    /// take over the terminal. `paused` starts in single-step mode
    pub fn new(paused: bool) -> Result<Self, io::Error> {
        let control = KeyboardControl::new()?;
        let mut monitor = in_alternate_screen(&mut io::stdout(), || {
            Monitor::with_backend(CrosstermBackend::new(io::stdout()), control, paused)
        })?;
        // from here on Drop leaves the alternate screen
        monitor.alternate_screen = true;
        monitor.terminal.hide_cursor()?;
        Ok(monitor)
    }
}

impl<B: Backend, C: Control> Monitor<B, C> {
    pub fn with_backend(backend: B, control: C, paused: bool) -> Result<Self, io::Error> {
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(Monitor {
            terminal,
            control,
            paused,
            quit: false,
            printed: Vec::new(),
            alternate_screen: false,
        })
    }

    /// everything PRN has produced so far
    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    fn draw(&mut self, snapshot: &CpuSnapshot, status: &str) -> Result<(), io::Error> {
        let registers = register_lines(snapshot);
        let memory = memory_lines(snapshot);
        let printed: Vec<Spans> = self
            .printed
            .iter()
            .rev()
            .map(|s| Spans::from(s.clone()))
            .collect();
        let status = Spans::from(status.to_string());

        self.terminal.draw(|f| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
                .split(f.size());
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    [
                        Constraint::Length(22),
                        Constraint::Length(2 + 4 + 3 * DUMP_WIDTH as u16),
                        Constraint::Min(8),
                    ]
                    .as_ref(),
                )
                .split(rows[0]);

            let block = |title: &'static str| {
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .style(Style::default().bg(Color::Black))
            };
            f.render_widget(Paragraph::new(registers).block(block("LS-8")), columns[0]);
            f.render_widget(Paragraph::new(memory).block(block("Memory")), columns[1]);
            f.render_widget(Paragraph::new(printed).block(block("Output")), columns[2]);
            f.render_widget(Paragraph::new(status), rows[1]);
        })?;
        Ok(())
    }

    /// act on whatever has been typed; blocks while paused
    fn handle_commands(&mut self) -> Result<(), io::Error> {
        while let Some(cmd) = self.control.poll_command()? {
            if cmd == Command::Step && self.paused {
                return Ok(());
            }
            self.apply(cmd)?;
        }
        while self.paused {
            match self.control.wait_command()? {
                Command::Step => break,
                cmd => self.apply(cmd)?,
            }
        }
        Ok(())
    }

    fn apply(&mut self, cmd: Command) -> Result<(), io::Error> {
        match cmd {
            Command::Pause => self.paused = true,
            Command::Continue => self.paused = false,
            Command::Step => {}
            Command::Quit => {
                self.quit = true;
                return Err(io::Error::new(
                    io::ErrorKind::Interrupted,
                    "quit from the monitor",
                ));
            }
        }
        Ok(())
    }
}

impl<B: Backend, C: Control> Output for Monitor<B, C> {
    fn print_value(&mut self, value: u8) -> Result<(), io::Error> {
        self.printed.push(value.to_string());
        Ok(())
    }

    fn observe(&mut self, snapshot: &CpuSnapshot) -> Result<(), io::Error> {
        let status = if self.paused {
            "paused | space/enter: step  c: continue  q: quit"
        } else {
            "running | p: pause  q: quit"
        };
        self.draw(snapshot, status)?;
        self.handle_commands()
    }

    fn finish(&mut self, snapshot: &CpuSnapshot, state: &CpuState) -> Result<(), io::Error> {
        if self.quit {
            return Ok(());
        }
        let status = format!("{} | press any key to exit", state);
        self.draw(snapshot, &status)?;
        self.control.wait_any()
    }
}

impl<B: Backend, C: Control> Drop for Monitor<B, C> {
    fn drop(&mut self) {
        if !self.alternate_screen {
            return;
        }
        if let Err(e) = self
            .terminal
            .show_cursor()
            .and_then(|_| execute!(io::stdout(), LeaveAlternateScreen))
        {
            log::warn!("could not restore the terminal: {}", e);
        }
    }
}

/// switch `out` to the alternate screen and run `build`; if that fails,
/// switch back before handing on the error
fn in_alternate_screen<W: Write, T>(
    out: &mut W,
    build: impl FnOnce() -> Result<T, io::Error>,
) -> Result<T, io::Error> {
    execute!(out, EnterAlternateScreen)?;
    build().map_err(|e| {
        if let Err(leave) = execute!(out, LeaveAlternateScreen) {
            log::warn!("could not leave the alternate screen: {}", leave);
        }
        e
    })
}

fn register_lines(snapshot: &CpuSnapshot) -> Vec<Spans<'static>> {
    let mut lines: Vec<Spans> = snapshot
        .registers
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let label = if i == SP as usize { "  SP" } else { "" };
            Spans::from(format!("R{}  {:02X}  {:>3}{}", i, r, r, label))
        })
        .collect();

    lines.push(Spans::from(""));
    lines.push(Spans::from(format!("PC  {:02X}", snapshot.program_counter)));
    lines.push(Spans::from(format!(
        "FL  {:08b}  {}{}{}",
        snapshot.flags,
        if snapshot.flags & crate::flags::FLAG_L != 0 { 'L' } else { '-' },
        if snapshot.flags & crate::flags::FLAG_G != 0 { 'G' } else { '-' },
        if snapshot.flags & crate::flags::FLAG_E != 0 { 'E' } else { '-' },
    )));
    lines.push(Spans::from(""));
    lines.push(Spans::from(next_instruction(snapshot)));
    lines
}

/// disassembly of the instruction at the PC
fn next_instruction(snapshot: &CpuSnapshot) -> String {
    let next = snapshot.next_bytes(3);
    match next[0].map(Opcode::try_from) {
        Some(Ok(op)) => op.disassemble(next[1].unwrap_or(0), next[2].unwrap_or(0)),
        Some(Err(byte)) => format!("??? {:02X}", byte),
        None => "--".to_string(),
    }
}

fn memory_lines(snapshot: &CpuSnapshot) -> Vec<Spans<'static>> {
    let sp = snapshot.registers[SP as usize] as usize;
    let pc_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let sp_style = Style::default().fg(Color::Cyan);

    snapshot
        .memory
        .chunks(DUMP_WIDTH)
        .enumerate()
        .map(|(row, bytes)| {
            let mut spans = vec![Span::raw(format!("{:02X}: ", row * DUMP_WIDTH))];
            for (col, b) in bytes.iter().enumerate() {
                let addr = row * DUMP_WIDTH + col;
                let text = format!("{:02X} ", b);
                spans.push(if addr == snapshot.program_counter {
                    Span::styled(text, pc_style)
                } else if addr == sp {
                    Span::styled(text, sp_style)
                } else {
                    Span::raw(text)
                });
            }
            Spans::from(spans)
        })
        .collect()
}
