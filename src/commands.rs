use crate::cycle::{format_duration, BorderCycle, Task};
use crate::host::Host;
use crate::prelude::*;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/wbstatus`, open to everyone.
    Status,
    /// `/wbdebug`, operators only.
    Debug,
}
impl Command {
    pub fn parse(name: &str) -> Result<Self, CommandError> {
        match name.trim().trim_start_matches('/').to_ascii_lowercase().as_str() {
            "wbstatus" => Ok(Command::Status),
            "wbdebug" => Ok(Command::Debug),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
    pub const fn name(self) -> &'static str {
        match self {
            Command::Status => "wbstatus",
            Command::Debug => "wbdebug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sender {
    pub is_op: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub current_size: f64,
    pub target_size: f64,
    pub duration: Ticks,
    pub remaining: Ticks,
    pub debug: bool,
}
impl Status {
    pub fn lines(&self) -> Vec<Text> {
        let field = |name: &str, value: String| {
            Text::colored(Color::Yellow, format!("{name}: ")).then(Text::colored(Color::White, value))
        };
        vec![
            Text::colored(Color::Gold, "WorldBorder Status"),
            field("Current Size", format!("{:.2}", self.current_size)),
            field("Target Size", format!("{:.2}", self.target_size)),
            field(
                "Cycle Duration",
                format!("{} ticks ({})", self.duration.0, format_duration(self.duration.as_secs())),
            ),
            field(
                "Time Remaining",
                format!("{} ticks ({})", self.remaining.0, format_duration(self.remaining.as_secs())),
            ),
            field("Debug Mode", if self.debug { "ON" } else { "OFF" }.to_owned()),
        ]
    }
}

impl BorderCycle {
    /// `None` while no world is loaded.
    pub fn status(&self, host: &impl Host) -> Option<Status> {
        let world = self.world(host)?;
        let snapshot = self.snapshot();
        Some(Status {
            current_size: host.border(world).size,
            target_size: snapshot.target_size,
            duration: snapshot.duration,
            remaining: Ticks::from_millis(snapshot.millis_left(host.now_millis())),
            debug: snapshot.debug,
        })
    }

    /// Runs a command and returns what to tell the sender.
    pub fn execute(
        &mut self,
        command: Command,
        sender: Sender,
        host: &mut impl Host,
        sched: &mut impl Scheduler<Task>,
    ) -> Result<Vec<Text>, CommandError> {
        match command {
            Command::Status => Ok(match self.status(&*host) {
                Some(status) => status.lines(),
                None => vec![Text::colored(Color::Red, "World not found.")],
            }),
            Command::Debug => {
                if !sender.is_op {
                    return Err(CommandError::PermissionDenied(command.name()));
                }
                if !self.config().debug.enabled {
                    return Err(CommandError::DebugUnavailable);
                }
                Ok(vec![if self.toggle_debug(sched) {
                    Text::colored(
                        Color::Green,
                        "World border debug mode enabled. Immediate start with 20-60s random cycles.",
                    )
                } else {
                    Text::colored(
                        Color::Yellow,
                        "World border debug mode disabled. Returning to configured cycles.",
                    )
                }])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_names() {
        assert_eq!(Command::parse("wbstatus"), Ok(Command::Status));
        assert_eq!(Command::parse("/WBDebug "), Ok(Command::Debug));
        assert_eq!(Command::parse("stop"), Err(CommandError::Unknown("stop".into())));
    }

    #[test]
    fn status_lines() {
        let status = Status {
            current_size: 1234.5678,
            target_size: 16.0,
            duration: Ticks(1800),
            remaining: Ticks(610),
            debug: false,
        };
        let lines: Vec<String> = status.lines().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "WorldBorder Status",
                "Current Size: 1234.57",
                "Target Size: 16.00",
                "Cycle Duration: 1800 ticks (1m 30s)",
                "Time Remaining: 610 ticks (30s)",
                "Debug Mode: OFF",
            ]
        );
    }
}
