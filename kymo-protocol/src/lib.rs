//! Control-link protocol for the Kymo playback controller
//!
//! This crate defines the serial protocol between the host application and
//! the bench controller that plays schedules back on its GPIO pins. The
//! protocol is line-oriented: every message is one UTF-8 line terminated
//! by `\n` (a `\r` before the terminator is tolerated and stripped).
//!
//! # Protocol overview
//!
//! ```text
//! host -> controller   PING
//!                      PUT <name> <size>     (<size> raw bytes follow)
//!                      RUN <name>
//!                      STOP | PAUSE | RESUME | QUIT
//!
//! controller -> host   PONG
//!                      OK <CMD>
//!                      DONE <info>
//!                      ERR <message>
//! ```
//!
//! The controller acts as a dumb playback unit. It stores uploaded
//! schedules, plays them on request and reports completion; all schedule
//! compilation stays on the host.

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

pub mod line;
pub mod link;
pub mod messages;

pub use line::{Line, LineError, LineReader, MAX_LINE};
pub use link::{LinkEvent, LinkState};
pub use messages::{Command, ProtocolError, Reply};
