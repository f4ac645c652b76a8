use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::Duration;

/// what the person at the monitor wants the CPU to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// run one instruction, then stay paused
    Step,
    Pause,
    /// run freely
    Continue,
    Quit,
}

const MONITOR_KEYMAP: [(char, Command); 6] = [
    (' ', Command::Step),
    ('s', Command::Step),
    ('p', Command::Pause),
    ('c', Command::Continue),
    ('q', Command::Quit),
    ('Q', Command::Quit),
];

/// reads monitor commands
pub trait Control {
    /// next command typed since the last call, without waiting
    fn poll_command(&mut self) -> Result<Option<Command>, io::Error>;

    /// block until a command arrives
    fn wait_command(&mut self) -> Result<Command, io::Error>;

    /// block until anything at all is pressed
    fn wait_any(&mut self) -> Result<(), io::Error> {
        self.wait_command().map(|_| ())
    }
}

/// keyboard commands via crossterm; holds the terminal in raw mode while alive
pub struct KeyboardControl {
    keymap: HashMap<char, Command>,
}

impl KeyboardControl {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(KeyboardControl {
            keymap: HashMap::from(MONITOR_KEYMAP),
        })
    }

    fn translate(&self, evt: KeyEvent) -> Option<Command> {
        if evt.modifiers.contains(KeyModifiers::CONTROL) && evt.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }
        match evt.code {
            KeyCode::Char(key) => {
                let cmd = self.keymap.get(&key).copied();
                if cmd.is_none() {
                    log::debug!("no monitor command for {:?}", key);
                }
                cmd
            }
            KeyCode::Enter => Some(Command::Step),
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }
}

impl Drop for KeyboardControl {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("could not leave raw mode: {}", e);
        }
    }
}

impl Control for KeyboardControl {
    fn poll_command(&mut self) -> Result<Option<Command>, io::Error> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(evt) = read()? {
                if let Some(cmd) = self.translate(evt) {
                    return Ok(Some(cmd));
                }
            }
        }
        Ok(None)
    }

    fn wait_command(&mut self) -> Result<Command, io::Error> {
        loop {
            if let Event::Key(evt) = read()? {
                if let Some(cmd) = self.translate(evt) {
                    return Ok(cmd);
                }
            }
        }
    }

    fn wait_any(&mut self) -> Result<(), io::Error> {
        loop {
            if let Event::Key(_) = read()? {
                return Ok(());
            }
        }
    }
}

/// plays back a fixed list of commands, then behaves as if `c` was held down;
/// for testing
pub struct ScriptedControl {
    commands: VecDeque<Command>,
}

impl ScriptedControl {
    pub fn new(commands: &[Command]) -> Self {
        ScriptedControl {
            commands: commands.iter().copied().collect(),
        }
    }
}

impl Control for ScriptedControl {
    fn poll_command(&mut self) -> Result<Option<Command>, io::Error> {
        Ok(self.commands.pop_front())
    }

    fn wait_command(&mut self) -> Result<Command, io::Error> {
        Ok(self.commands.pop_front().unwrap_or(Command::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_plays_in_order() -> Result<(), io::Error> {
        let mut c = ScriptedControl::new(&[Command::Step, Command::Quit]);
        assert_eq!(c.poll_command()?, Some(Command::Step));
        assert_eq!(c.wait_command()?, Command::Quit);
        assert_eq!(c.poll_command()?, None);
        assert_eq!(c.wait_command()?, Command::Continue);
        Ok(())
    }

    #[test]
    fn test_keymap_has_no_duplicates() {
        let map: HashMap<char, Command> = HashMap::from(MONITOR_KEYMAP);
        assert_eq!(map.len(), MONITOR_KEYMAP.len());
    }
}
