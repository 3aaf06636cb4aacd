/// A line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Leave,
    Rejoin,
    Refresh,
    Quit,
    Help,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let word = line.trim().to_ascii_lowercase();
        match word.as_str() {
            "" => Command::Empty,
            "leave" | "l" => Command::Leave,
            "rejoin" | "r" => Command::Rejoin,
            "refresh" => Command::Refresh,
            "quit" | "q" | "exit" => Command::Quit,
            "help" | "h" | "?" => Command::Help,
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}

/// Answer to the leave confirmation. Anything but yes cancels.
pub fn is_confirmation(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub const HELP: &str = "\
Commands:
  leave     Leave the queue
  rejoin    Rejoin the queue after missing your turn
  refresh   Check your ticket now
  quit      Stop watching (your place in the queue is kept)";
