//! Console error types

use crate::settings::SettingsError;

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConsoleError {
    /// E01: Unknown command
    #[error("E01: unknown command")]
    UnknownCommand,
    /// E02: Value does not parse for the setting
    #[error("E02: invalid value")]
    InvalidValue,
    /// E03: Missing required argument
    #[error("E03: missing argument")]
    MissingArg,
    /// E04: Value outside the allowed range
    #[error("E04: out of range")]
    OutOfRange,
    /// E05: No setting matches the name
    #[error("E05: invalid name")]
    InvalidName,
    /// E06: Settings access failed
    #[error("E06: {0}")]
    Settings(#[from] SettingsError),
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::InvalidValue => "E02",
            Self::MissingArg => "E03",
            Self::OutOfRange => "E04",
            Self::InvalidName => "E05",
            Self::Settings(_) => "E06",
        }
    }
}
