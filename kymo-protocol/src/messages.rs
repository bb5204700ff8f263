//! Command and reply vocabulary for the control link
//!
//! Commands flow host to controller, replies controller to host. Both
//! sides encode to single terminated lines; parsing borrows from the
//! received line and never allocates.
//!
//! `PUT` names are single whitespace-free tokens. `RUN` takes the rest of
//! the line verbatim, so stored schedule names may contain spaces.

use core::fmt::Write;

use crate::line::{Line, LineError};

/// Errors from parsing a received line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Verb is not part of the command vocabulary
    UnknownCommand,
    /// Known verb with missing or malformed arguments
    MalformedCommand,
    /// Line is not a recognizable reply
    UnknownReply,
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProtocolError::UnknownCommand => write!(f, "unknown command"),
            ProtocolError::MalformedCommand => write!(f, "malformed command arguments"),
            ProtocolError::UnknownReply => write!(f, "unrecognized reply"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}

/// Commands from the host to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Liveness probe; the controller answers `PONG`
    Ping,
    /// Announce an upload: `size` raw payload bytes follow the line
    Put { name: &'a str, size: usize },
    /// Start playback of a stored schedule
    Run { name: &'a str },
    /// Abort playback and drive every output low
    Stop,
    /// Freeze playback, outputs held at their current levels
    Pause,
    /// Continue a paused playback
    Resume,
    /// End the session
    Quit,
}

impl<'a> Command<'a> {
    /// Encode this command as one terminated line
    pub fn encode(&self) -> Result<Line, LineError> {
        let mut line = Line::new();
        let wrote = match self {
            Command::Ping => write!(line, "PING"),
            Command::Put { name, size } => write!(line, "PUT {name} {size}"),
            Command::Run { name } => write!(line, "RUN {name}"),
            Command::Stop => write!(line, "STOP"),
            Command::Pause => write!(line, "PAUSE"),
            Command::Resume => write!(line, "RESUME"),
            Command::Quit => write!(line, "QUIT"),
        };
        wrote.map_err(|_| LineError::Overflow)?;
        line.push('\n').map_err(|_| LineError::Overflow)?;
        Ok(line)
    }

    /// Parse a command from a received line (terminator already stripped)
    pub fn parse(line: &'a str) -> Result<Self, ProtocolError> {
        match line {
            "PING" => return Ok(Command::Ping),
            "STOP" => return Ok(Command::Stop),
            "PAUSE" => return Ok(Command::Pause),
            "RESUME" => return Ok(Command::Resume),
            "QUIT" => return Ok(Command::Quit),
            // Bare verbs that require arguments
            "PUT" | "RUN" => return Err(ProtocolError::MalformedCommand),
            _ => {}
        }
        if let Some(rest) = line.strip_prefix("RUN ") {
            if rest.is_empty() {
                return Err(ProtocolError::MalformedCommand);
            }
            return Ok(Command::Run { name: rest });
        }
        if let Some(rest) = line.strip_prefix("PUT ") {
            let mut parts = rest.split_whitespace();
            let name = parts.next().ok_or(ProtocolError::MalformedCommand)?;
            let size = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or(ProtocolError::MalformedCommand)?;
            if parts.next().is_some() {
                return Err(ProtocolError::MalformedCommand);
            }
            return Ok(Command::Put { name, size });
        }
        Err(ProtocolError::UnknownCommand)
    }
}

/// Replies from the controller to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<'a> {
    /// Answer to `PING`
    Pong,
    /// Command accepted; echoes the command verb
    Ok { command: &'a str },
    /// Playback ran to completion; `info` summarizes the run
    Done { info: &'a str },
    /// Command rejected or playback aborted
    Err { message: &'a str },
}

impl<'a> Reply<'a> {
    /// Encode this reply as one terminated line
    pub fn encode(&self) -> Result<Line, LineError> {
        let mut line = Line::new();
        let wrote = match self {
            Reply::Pong => write!(line, "PONG"),
            Reply::Ok { command } => write!(line, "OK {command}"),
            Reply::Done { info } if info.is_empty() => write!(line, "DONE"),
            Reply::Done { info } => write!(line, "DONE {info}"),
            Reply::Err { message } => write!(line, "ERR {message}"),
        };
        wrote.map_err(|_| LineError::Overflow)?;
        line.push('\n').map_err(|_| LineError::Overflow)?;
        Ok(line)
    }

    /// Parse a reply from a received line (terminator already stripped)
    pub fn parse(line: &'a str) -> Result<Self, ProtocolError> {
        if line == "PONG" {
            return Ok(Reply::Pong);
        }
        if line == "DONE" {
            return Ok(Reply::Done { info: "" });
        }
        if let Some(rest) = line.strip_prefix("OK ") {
            return Ok(Reply::Ok { command: rest });
        }
        if let Some(rest) = line.strip_prefix("DONE ") {
            return Ok(Reply::Done { info: rest });
        }
        if let Some(rest) = line.strip_prefix("ERR ") {
            return Ok(Reply::Err { message: rest });
        }
        Err(ProtocolError::UnknownReply)
    }
}
