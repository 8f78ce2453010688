//! Active configuration profile
//!
//! PID and control rate settings resolve to the copy of the active profile.
//! The index lives in a critical-section protected cell so that the console,
//! MSP handlers and the flight loop agree on it.

use core::cell::Cell;

use critical_section::Mutex;
use pico_settings_core::traits::ProfileSource;

use super::SettingsError;

static CONFIG_PROFILE: Mutex<Cell<u8>> = Mutex::new(Cell::new(0));

/// Index of the active profile
pub fn config_profile() -> u8 {
    critical_section::with(|cs| CONFIG_PROFILE.borrow(cs).get())
}

/// Select the active profile
///
/// Rejected when the installed tables have fewer PID or control rate
/// profiles. Before the tables are installed any index is accepted.
pub fn set_config_profile(index: u8) -> Result<(), SettingsError> {
    if let Some(tables) = super::installed() {
        let profiles = &tables.profiles;
        let count = profiles
            .pid_profile_count
            .min(profiles.control_rate_profile_count);
        if index >= count {
            crate::log_warn!("Profile {} rejected", index);
            return Err(SettingsError::ProfileOutOfRange(index));
        }
    }

    let previous = critical_section::with(|cs| CONFIG_PROFILE.borrow(cs).replace(index));
    if previous != index {
        crate::log_info!("Profile changed: {} -> {}", previous, index);
    }
    Ok(())
}

/// Profile source backed by the global profile index
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProfile;

impl ProfileSource for SystemProfile {
    fn config_profile(&self) -> u8 {
        config_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{self, mock::MOCK_TABLES};

    // Only test touching the global profile index
    #[test]
    fn test_set_config_profile() {
        settings::install(&MOCK_TABLES).unwrap();

        set_config_profile(2).unwrap();
        assert_eq!(config_profile(), 2);
        assert_eq!(SystemProfile.config_profile(), 2);

        assert_eq!(
            set_config_profile(3),
            Err(SettingsError::ProfileOutOfRange(3))
        );
        assert_eq!(config_profile(), 2);

        set_config_profile(0).unwrap();
        assert_eq!(SystemProfile.config_profile(), 0);
    }
}
