//! MSP settings commands
//!
//! Payload handling for the MultiWii Serial Protocol v2 commands that let a
//! configurator enumerate, inspect and change settings.
//!
//! # Architecture
//!
//! - **sbuf**: Little-endian payload reader/writer over caller buffers
//! - **settings**: Settings command handlers
//! - **dispatcher**: Routes a command code to its handler
//!
//! Framing, checksums and the serial transport are outside this module; the
//! dispatcher sees a request payload and fills a reply payload.

pub mod dispatcher;
pub mod sbuf;
pub mod settings;

pub use dispatcher::MspDispatcher;
pub use sbuf::{ReadBuf, StreamBuf};
pub use settings::{serialize_setting_names, SettingsMspHandler, SETTING_NAME_SUFFIX};

use crate::settings::SettingsError;

/// Read one setting value
pub const MSP2_COMMON_SETTING: u16 = 0x1003;
/// Write one setting value
pub const MSP2_COMMON_SET_SETTING: u16 = 0x1004;
/// Setting metadata and value
pub const MSP2_COMMON_SETTING_INFO: u16 = 0x1007;
/// Parameter groups and their setting index ranges
pub const MSP2_COMMON_PG_LIST: u16 = 0x1008;

/// Settings commands understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum MspCommand {
    Setting = MSP2_COMMON_SETTING,
    SetSetting = MSP2_COMMON_SET_SETTING,
    SettingInfo = MSP2_COMMON_SETTING_INFO,
    PgList = MSP2_COMMON_PG_LIST,
}

impl MspCommand {
    /// Decode a command code
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            MSP2_COMMON_SETTING => Some(MspCommand::Setting),
            MSP2_COMMON_SET_SETTING => Some(MspCommand::SetSetting),
            MSP2_COMMON_SETTING_INFO => Some(MspCommand::SettingInfo),
            MSP2_COMMON_PG_LIST => Some(MspCommand::PgList),
            _ => None,
        }
    }

    /// Command code
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// MSP command errors
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MspError {
    #[error("Reply buffer too small")]
    BufferTooSmall,

    #[error("Request payload truncated")]
    Truncated,

    #[error("Malformed request")]
    InvalidRequest,

    #[error("Unknown command {0:#06x}")]
    UnknownCommand(u16),

    #[error("Unknown setting")]
    UnknownSetting,

    #[error("Unknown parameter group {0}")]
    UnknownGroup(u16),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}
