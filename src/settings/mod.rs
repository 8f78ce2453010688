//! Settings registry
//!
//! Firmware side of the registry: installs the generated tables once at
//! boot, tracks the active profile, and provides typed value access and
//! persistence on top of the pure logic in `pico_settings_core`.
//!
//! # Boot sequence
//!
//! ```
//! use pico_settings::settings::{self, mock::MOCK_TABLES};
//!
//! settings::install(&MOCK_TABLES).unwrap();
//! let tables = settings::tables().unwrap();
//! assert!(tables.find("looptime").is_some());
//! ```

pub mod access;
pub mod error;
pub mod persistence;
pub mod profile;

use core::cell::Cell;

use critical_section::Mutex;

pub use access::{SettingValue, SettingsContext};
pub use error::SettingsError;
pub use persistence::{load_all, save_all, PersistenceError, PgPersistence};
pub use pico_settings_core::settings::*;
pub use profile::{config_profile, set_config_profile, SystemProfile};

/// Name encoding selected at build time (`SETTINGS_NAME_ENCODING`)
pub const BUILD_NAME_ENCODING: NameEncoding =
    NameEncoding::from_build_flag(env!("SETTINGS_NAME_ENCODING"));

/// Installed tables (None until `install`)
static TABLES: Mutex<Cell<Option<&'static SettingsTables>>> = Mutex::new(Cell::new(None));

/// Install the generated tables
///
/// The tables are validated first; tables that fail validation are never
/// installed. Only the first successful call installs anything, later calls
/// leave the installed tables in place and return `Ok(())`.
pub fn install(tables: &'static SettingsTables) -> Result<(), SettingsError> {
    if let Err(e) = tables.validate() {
        crate::log_error!("Settings tables rejected, {} settings", tables.len());
        return Err(e.into());
    }

    if tables.encoding != BUILD_NAME_ENCODING {
        crate::log_warn!("Settings tables use a different name encoding than the build");
    }

    let first = critical_section::with(|cs| {
        let cell = TABLES.borrow(cs);
        if cell.get().is_some() {
            false
        } else {
            cell.set(Some(tables));
            true
        }
    });

    if first {
        crate::log_info!(
            "Settings installed: {} settings in {} groups",
            tables.len(),
            tables.pg_counts.len()
        );
    } else {
        crate::log_debug!("Settings already installed, keeping existing tables");
    }
    Ok(())
}

/// Installed tables, if any
pub fn installed() -> Option<&'static SettingsTables> {
    critical_section::with(|cs| TABLES.borrow(cs).get())
}

/// Installed tables
pub fn tables() -> Result<&'static SettingsTables, SettingsError> {
    installed().ok_or(SettingsError::NotInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pico_settings_core::settings::mock::MOCK_TABLES;

    static BAD_COUNTS: [PgCount; 1] = [PgCount::new(1, 99)];
    static BAD_TABLES: SettingsTables = SettingsTables {
        pg_counts: &BAD_COUNTS,
        ..MOCK_TABLES
    };

    #[test]
    fn test_install_is_idempotent() {
        install(&MOCK_TABLES).unwrap();
        install(&MOCK_TABLES).unwrap();
        let tables = tables().unwrap();
        assert!(core::ptr::eq(tables, &MOCK_TABLES));
    }

    #[test]
    fn test_install_rejects_invalid_tables() {
        let result = install(&BAD_TABLES);
        assert_eq!(
            result,
            Err(SettingsError::Table(TableError::PgCountMismatch {
                counted: 99,
                settings: 14
            }))
        );
        if let Some(tables) = installed() {
            assert!(!core::ptr::eq(tables, &BAD_TABLES));
        }
    }

    #[test]
    fn test_build_encoding_default() {
        if option_env!("SETTINGS_NAME_ENCODING") == Some("varint") {
            assert_eq!(BUILD_NAME_ENCODING, NameEncoding::Varint);
        }
    }
}
