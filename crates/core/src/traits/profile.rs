//! Profile selection abstraction for profile-duplicated settings.
//!
//! PID and rate settings are stored once per flight profile. Which copy a
//! descriptor resolves to depends on the profile that is active right now,
//! and that decision belongs to the firmware, not to the registry.

use core::cell::Cell;

/// Source of the currently active configuration profile.
///
/// This trait abstracts over different profile selectors:
/// - `SystemProfile` (in firmware crate) backed by global state
/// - `MockProfile` for host testing with a controllable index
///
/// # Example
///
/// ```
/// use pico_settings_core::traits::{MockProfile, ProfileSource};
///
/// fn stride_for<P: ProfileSource>(profile: &P, size: usize) -> usize {
///     size * profile.config_profile() as usize
/// }
///
/// let profile = MockProfile::with_profile(2);
/// assert_eq!(stride_for(&profile, 64), 128);
/// ```
pub trait ProfileSource {
    /// Returns the zero-based index of the active profile.
    fn config_profile(&self) -> u8;
}

impl<P: ProfileSource + ?Sized> ProfileSource for &P {
    fn config_profile(&self) -> u8 {
        (**self).config_profile()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock profile selector for tests.
///
/// # Example
///
/// ```
/// use pico_settings_core::traits::{MockProfile, ProfileSource};
///
/// let profile = MockProfile::new();
/// assert_eq!(profile.config_profile(), 0);
///
/// profile.set(1);
/// assert_eq!(profile.config_profile(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockProfile {
    current: Cell<u8>,
}

impl MockProfile {
    /// Creates a new `MockProfile` selecting profile 0.
    pub fn new() -> Self {
        Self {
            current: Cell::new(0),
        }
    }

    /// Creates a new `MockProfile` selecting the given profile.
    pub fn with_profile(index: u8) -> Self {
        Self {
            current: Cell::new(index),
        }
    }

    /// Selects another profile.
    pub fn set(&self, index: u8) {
        self.current.set(index);
    }
}

impl ProfileSource for MockProfile {
    fn config_profile(&self) -> u8 {
        self.current.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_profile_default() {
        let profile = MockProfile::default();
        assert_eq!(profile.config_profile(), 0);
    }

    #[test]
    fn test_mock_profile_set() {
        let profile = MockProfile::with_profile(1);
        assert_eq!(profile.config_profile(), 1);
        profile.set(2);
        assert_eq!(profile.config_profile(), 2);
    }
}
