//! Settings console
//!
//! Text commands for reading and changing settings over a serial CLI.
//! Output goes to any `core::fmt::Write`; no heap allocation.
//!
//! ```text
//! # get lpf
//! dterm_lpf_hz = 0.000
//! Allowed range: 0 - 500
//! # set debug_mode = gyro
//! debug_mode set to GYRO
//! ```

pub mod commands;
pub mod completion;
pub mod error;

pub use commands::{command_names, execute, process_line, CommandDescriptor, COMMANDS};
pub use completion::Completer;
pub use error::ConsoleError;
