//! Whole-line command words accepted by the shell.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    List,
    Toggle,
    Delete,
    Help,
    Exit,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Add,
        Command::List,
        Command::Toggle,
        Command::Delete,
        Command::Help,
        Command::Exit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::List => "list",
            Self::Toggle => "toggle",
            Self::Delete => "delete",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Add => "add a new task",
            Self::List => "show all tasks",
            Self::Toggle => "mark a task done or open",
            Self::Delete => "remove a task",
            Self::Help => "show this help",
            Self::Exit => "quit",
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let word = line.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == word)
            .ok_or_else(|| UnknownCommand(word.to_string()))
    }
}

/// Parses a 1-based task position into a 0-based index.
pub fn parse_position(line: &str) -> Option<usize> {
    match line.trim().parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(position) => Some(position - 1),
    }
}
