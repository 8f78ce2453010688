use pico_settings_core::settings::{AccessError, NameError, TableError};

/// Errors from settings access in the firmware.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings tables not installed")]
    NotInstalled,

    #[error("Invalid settings tables: {0}")]
    Table(#[from] TableError),

    #[error("Parameter group access failed: {0}")]
    Access(#[from] AccessError),

    #[error("Setting name: {0}")]
    Name(#[from] NameError),

    #[error("Setting not in the installed tables")]
    UnknownSetting,

    #[error("Value type does not match setting")]
    TypeMismatch,

    #[error("Value out of range")]
    OutOfRange,

    #[error("Profile {0} out of range")]
    ProfileOutOfRange(u8),
}
