use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::InvalidCommandError;

/// A single-step transform of the falling piece.
///
/// `Unrotate` is the inverse of `Rotate`. It is never parsed from text; the search
/// uses it only to undo a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MoveCommand {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("up")]
    Up,
    #[display("down")]
    Down,
    #[display("rotate")]
    Rotate,
    #[display("unrotate")]
    Unrotate,
}

impl MoveCommand {
    /// Returns the command that undoes `self`.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Rotate => Self::Unrotate,
            Self::Unrotate => Self::Rotate,
        }
    }
}

impl FromStr for MoveCommand {
    type Err = InvalidCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "rotate" => Ok(Self::Rotate),
            _ => Err(InvalidCommandError {
                token: s.to_owned(),
            }),
        }
    }
}

/// A token of a scripted move list: a piece transform or the terminating drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Command {
    #[display("{_0}")]
    Move(MoveCommand),
    #[display("drop")]
    Drop,
}

impl Command {
    pub const LEFT: Self = Self::Move(MoveCommand::Left);
    pub const RIGHT: Self = Self::Move(MoveCommand::Right);
    pub const UP: Self = Self::Move(MoveCommand::Up);
    pub const DOWN: Self = Self::Move(MoveCommand::Down);
    pub const ROTATE: Self = Self::Move(MoveCommand::Rotate);

    /// Parses a whitespace- or comma-separated list of tokens.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, InvalidCommandError> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl From<MoveCommand> for Command {
    fn from(command: MoveCommand) -> Self {
        Self::Move(command)
    }
}

impl FromStr for Command {
    type Err = InvalidCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "drop" {
            return Ok(Self::Drop);
        }
        s.parse().map(Self::Move)
    }
}

impl Serialize for Command {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vocabulary() {
        assert_eq!("left".parse(), Ok(Command::LEFT));
        assert_eq!("right".parse(), Ok(Command::RIGHT));
        assert_eq!("up".parse(), Ok(Command::UP));
        assert_eq!("down".parse(), Ok(Command::DOWN));
        assert_eq!("rotate".parse(), Ok(Command::ROTATE));
        assert_eq!("drop".parse(), Ok(Command::Drop));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        let err = "jump".parse::<Command>().unwrap_err();
        assert_eq!(err.token, "jump");
        assert_eq!(err.to_string(), "invalid command \"jump\"");

        // Unrotate is internal only, and drop is not a piece transform.
        assert!("unrotate".parse::<Command>().is_err());
        assert!("drop".parse::<MoveCommand>().is_err());
        assert!("Left".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_list() {
        let commands = Command::parse_list("left, left\nrotate drop").unwrap();
        assert_eq!(
            commands,
            [Command::LEFT, Command::LEFT, Command::ROTATE, Command::Drop]
        );
        assert!(Command::parse_list("").unwrap().is_empty());
        assert!(Command::parse_list("left,spin").is_err());
    }

    #[test]
    fn test_display_matches_tokens() {
        for token in ["left", "right", "up", "down", "rotate", "drop"] {
            let command: Command = token.parse().unwrap();
            assert_eq!(command.to_string(), token);
        }
    }

    #[test]
    fn test_serde_as_strings() {
        let json = serde_json::to_string(&[Command::RIGHT, Command::Drop]).unwrap();
        assert_eq!(json, r#"["right","drop"]"#);
        let commands: Vec<Command> = serde_json::from_str(&json).unwrap();
        assert_eq!(commands, [Command::RIGHT, Command::Drop]);
        assert!(serde_json::from_str::<Command>(r#""hover""#).is_err());
    }

    #[test]
    fn test_inverse() {
        for command in [
            MoveCommand::Left,
            MoveCommand::Right,
            MoveCommand::Up,
            MoveCommand::Down,
            MoveCommand::Rotate,
            MoveCommand::Unrotate,
        ] {
            assert_eq!(command.inverse().inverse(), command);
            assert_ne!(command.inverse(), command);
        }
    }
}
