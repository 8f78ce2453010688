//! MSP Command Dispatcher
//!
//! Routes an incoming settings command to its handler and returns the
//! length of the reply payload.
//!
//! # Design Principles
//!
//! - **Zero-cost abstraction**: Uses match expressions, no trait objects
//! - **Handler ownership**: Dispatcher owns the handlers
//! - **Caller buffers**: Request and reply payloads are borrowed slices

use pico_settings_core::traits::ProfileSource;

use super::sbuf::{ReadBuf, StreamBuf};
use super::settings::SettingsMspHandler;
use super::{MspCommand, MspError};

/// MSP command dispatcher
pub struct MspDispatcher<'r, 'm, P: ProfileSource> {
    /// Settings command handler
    settings: SettingsMspHandler<'r, 'm, P>,
}

impl<'r, 'm, P: ProfileSource> MspDispatcher<'r, 'm, P> {
    /// Create a dispatcher
    pub fn new(settings: SettingsMspHandler<'r, 'm, P>) -> Self {
        Self { settings }
    }

    /// Settings command handler
    pub fn settings(&self) -> &SettingsMspHandler<'r, 'm, P> {
        &self.settings
    }

    /// Dispatch one command
    ///
    /// # Arguments
    ///
    /// * `code` - MSP v2 command code
    /// * `request` - Request payload
    /// * `reply` - Buffer for the reply payload
    ///
    /// # Returns
    ///
    /// Length of the reply payload written to `reply`.
    pub fn dispatch(&mut self, code: u16, request: &[u8], reply: &mut [u8]) -> Result<usize, MspError> {
        let Some(command) = MspCommand::from_code(code) else {
            crate::log_debug!("Unhandled MSP command {}", code);
            return Err(MspError::UnknownCommand(code));
        };

        crate::log_trace!("MSP command {} ({} bytes)", code, request.len());
        let mut src = ReadBuf::new(request);
        let mut dst = StreamBuf::new(reply);
        let result = match command {
            MspCommand::Setting => self.settings.handle_setting(&mut src, &mut dst),
            MspCommand::SetSetting => self.settings.handle_set_setting(&mut src),
            MspCommand::SettingInfo => self.settings.handle_setting_info(&mut src, &mut dst),
            MspCommand::PgList => self.settings.handle_pg_list(&mut src, &mut dst),
        };

        match result {
            Ok(()) => Ok(dst.len()),
            Err(e) => {
                crate::log_warn!("MSP command {} rejected", code);
                Err(e)
            }
        }
    }
}
