//! Value locator
//!
//! Turns a descriptor into the place its value lives: which parameter group,
//! which region (live or copy), at what byte offset and how many bytes.
//! Nothing is read or written here.

use super::descriptor::{Setting, SettingSection};
use super::group::PgId;
use super::table::{ProfileLayout, SettingsTables};
use crate::traits::ProfileSource;

/// Which region of a parameter group to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Values in use
    Live,
    /// Last saved values, used to detect unsaved changes
    Copy,
}

/// Position of one setting value inside parameter group memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueLocation {
    /// Owning group
    pub pgn: PgId,
    /// Region inside the group
    pub view: View,
    /// Byte offset from the start of the region
    pub offset: usize,
    /// Value size in bytes
    pub size: usize,
}

impl ValueLocation {
    /// Create a location
    pub const fn new(pgn: PgId, view: View, offset: usize, size: usize) -> Self {
        Self {
            pgn,
            view,
            offset,
            size,
        }
    }

    /// One past the last byte
    pub const fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Same position in another region
    pub const fn with_view(&self, view: View) -> Self {
        Self::new(self.pgn, view, self.offset, self.size)
    }
}

/// Byte offset of a setting inside its group for the given profile
///
/// Master settings sit at their descriptor offset. Profile and control rate
/// settings are repeated once per profile, so the offset moves by one
/// profile structure per profile index.
pub fn value_offset(setting: &Setting, layout: &ProfileLayout, profile: u8) -> usize {
    let offset = usize::from(setting.offset);
    match setting.section() {
        SettingSection::Master => offset,
        SettingSection::Profile => {
            offset + usize::from(layout.pid_profile_size) * usize::from(profile)
        }
        SettingSection::ControlRate => {
            offset + usize::from(layout.control_rate_profile_size) * usize::from(profile)
        }
    }
}

impl SettingsTables {
    /// Locate a setting's value for the active profile
    ///
    /// Returns `None` when the setting is not part of this table or its
    /// group cannot be resolved.
    pub fn locate<P: ProfileSource>(
        &self,
        setting: &Setting,
        view: View,
        profile: &P,
    ) -> Option<ValueLocation> {
        let pgn = self.pgn(setting)?;
        let offset = value_offset(setting, &self.profiles, profile.config_profile());
        Some(ValueLocation::new(pgn, view, offset, setting.value_size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::codec::NameEncoding;
    use crate::settings::descriptor::SettingType;
    use crate::settings::mock::{self, MOCK_TABLES};
    use crate::traits::MockProfile;

    const LAYOUT: ProfileLayout = ProfileLayout {
        pid_profile_size: 64,
        pid_profile_count: 3,
        control_rate_profile_size: 12,
        control_rate_profile_count: 3,
    };

    fn profile_setting(offset: u16) -> Setting {
        Setting::value(
            NameEncoding::Varint.encode(&[1]),
            SettingType::Uint8,
            SettingSection::Profile,
            offset,
            0,
            0,
        )
    }

    #[test]
    fn test_profile_offset_moves_by_structure_size() {
        let setting = profile_setting(4);
        assert_eq!(value_offset(&setting, &LAYOUT, 0), 4);
        assert_eq!(value_offset(&setting, &LAYOUT, 2), 132);
    }

    #[test]
    fn test_profile_offset_monotonic() {
        let setting = profile_setting(4);
        for k in 0..LAYOUT.pid_profile_count - 1 {
            let a = value_offset(&setting, &LAYOUT, k);
            let b = value_offset(&setting, &LAYOUT, k + 1);
            assert_eq!(b - a, usize::from(LAYOUT.pid_profile_size));
        }
    }

    #[test]
    fn test_control_rate_uses_its_own_stride() {
        let setting = Setting::value(
            NameEncoding::Varint.encode(&[1]),
            SettingType::Uint8,
            SettingSection::ControlRate,
            2,
            0,
            0,
        );
        assert_eq!(value_offset(&setting, &LAYOUT, 2), 26);
    }

    #[test]
    fn test_master_ignores_profile() {
        let setting = Setting::value(
            NameEncoding::Varint.encode(&[1]),
            SettingType::Uint16,
            SettingSection::Master,
            6,
            0,
            0,
        );
        assert_eq!(value_offset(&setting, &LAYOUT, 0), 6);
        assert_eq!(value_offset(&setting, &LAYOUT, 2), 6);
    }

    #[test]
    fn test_locate_live_and_copy() {
        let profile = MockProfile::with_profile(1);
        let setting = MOCK_TABLES.find("dterm_lpf_hz").unwrap();

        let live = MOCK_TABLES.locate(setting, View::Live, &profile).unwrap();
        assert_eq!(live.pgn, mock::PG_PID_PROFILE);
        assert_eq!(live.offset, 4 + mock::PID_PROFILE_SIZE);
        assert_eq!(live.size, 4);

        let copy = MOCK_TABLES.locate(setting, View::Copy, &profile).unwrap();
        assert_eq!(copy, live.with_view(View::Copy));
    }

    #[test]
    fn test_locate_foreign_setting() {
        let profile = MockProfile::new();
        let foreign = profile_setting(0);
        assert_eq!(MOCK_TABLES.locate(&foreign, View::Live, &profile), None);
    }
}
