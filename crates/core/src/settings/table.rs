//! Generated settings tables
//!
//! [`SettingsTables`] bundles everything the build-time generator emits for
//! one firmware image: word dictionary, descriptors, per-group counts, bound
//! pools and profile structure sizes. The tables are never modified, so all
//! queries take `&self`.

use core::ops::Range;

use super::bounds::{BoundPools, Bounds, LookupTable, MAX_LOOKUP_VALUES};
use super::codec::{NameEncoding, SettingName};
use super::descriptor::{
    Setting, SettingConfig, SettingSection, SettingType,
};
use super::dictionary::WordDictionary;
use super::error::{NameError, TableError};
use super::group::{resolve_pgn, PgCount, PgId, MAX_PARAMETER_GROUPS};

/// Sizes and counts of profile-duplicated structures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileLayout {
    /// Size of one PID profile structure
    pub pid_profile_size: u16,
    /// Number of PID profiles
    pub pid_profile_count: u8,
    /// Size of one control rate profile structure
    pub control_rate_profile_size: u16,
    /// Number of control rate profiles
    pub control_rate_profile_count: u8,
}

impl ProfileLayout {
    /// Number of instances stored for a section (1 for master)
    pub fn instances(&self, section: SettingSection) -> u8 {
        match section {
            SettingSection::Master => 1,
            SettingSection::Profile => self.pid_profile_count,
            SettingSection::ControlRate => self.control_rate_profile_count,
        }
    }
}

/// Complete set of generated tables
#[derive(Debug, Clone, Copy)]
pub struct SettingsTables {
    /// Encoding of `Setting::encoded_name`
    pub encoding: NameEncoding,
    /// Words used by encoded names
    pub dictionary: WordDictionary,
    /// Descriptors, grouped by parameter group
    pub settings: &'static [Setting],
    /// Descriptors per group, in table order
    pub pg_counts: &'static [PgCount],
    /// Shared bounds
    pub pools: BoundPools,
    /// Profile structure layout
    pub profiles: ProfileLayout,
}

impl SettingsTables {
    /// Check the tables for inconsistencies
    ///
    /// Run once before the tables are used. After it passes, every type and
    /// section tag is known, every bound index is in range, every name
    /// decodes, each group is listed once, the group counts cover the
    /// descriptor table exactly and both profile kinds have the same count.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.pg_counts.len() > MAX_PARAMETER_GROUPS {
            return Err(TableError::TooManyGroups);
        }

        for (i, entry) in self.pg_counts.iter().enumerate() {
            if self.pg_counts[..i].iter().any(|e| e.pgn == entry.pgn) {
                return Err(TableError::DuplicateGroup { pgn: entry.pgn });
            }
        }

        let counted: usize = self.pg_counts.iter().map(|c| usize::from(c.count)).sum();
        if counted != self.settings.len() {
            return Err(TableError::PgCountMismatch {
                counted,
                settings: self.settings.len(),
            });
        }

        let profiles = &self.profiles;
        if profiles.pid_profile_count != profiles.control_rate_profile_count {
            return Err(TableError::ProfileCountMismatch {
                pid: profiles.pid_profile_count,
                control_rate: profiles.control_rate_profile_count,
            });
        }

        if let Some(table) = self.pools.lookups.iter().position(|t| t.is_empty()) {
            return Err(TableError::EmptyLookupTable { table });
        }

        for (index, setting) in self.settings.iter().enumerate() {
            self.validate_setting(index, setting)?;
        }
        Ok(())
    }

    fn validate_setting(&self, index: usize, setting: &Setting) -> Result<(), TableError> {
        let tag = setting.kind.type_tag();
        let setting_type =
            SettingType::from_tag(tag).ok_or(TableError::InvalidType { index, tag })?;

        let tag = setting.kind.section_tag();
        if SettingSection::from_tag(tag).is_none() {
            return Err(TableError::InvalidSection { index, tag });
        }

        match setting.config {
            SettingConfig::Lookup { table } => {
                let table = self
                    .pools
                    .lookups
                    .get(usize::from(table))
                    .ok_or(TableError::BoundIndexOutOfRange { index })?;
                let last = table.len() as i64 - 1;
                let fits = match setting_type.range() {
                    Some((_, hi)) => last <= hi,
                    None => false,
                };
                if table.len() > MAX_LOOKUP_VALUES || !fits {
                    return Err(TableError::BoundsExceedType { index });
                }
            }
            SettingConfig::MinMax { min, max } => {
                let min = *self
                    .pools
                    .min
                    .get(usize::from(min))
                    .ok_or(TableError::BoundIndexOutOfRange { index })?;
                let max = *self
                    .pools
                    .max
                    .get(usize::from(max))
                    .ok_or(TableError::BoundIndexOutOfRange { index })?;
                let (min, max) = (i64::from(min), i64::from(max));
                let fits = match setting_type.range() {
                    Some((lo, hi)) => min >= lo && max <= hi,
                    None => true,
                };
                if min > max || !fits {
                    return Err(TableError::BoundsExceedType { index });
                }
            }
        }

        match self.encoding.decode(&setting.encoded_name, &self.dictionary) {
            Ok(name) if name.is_empty() => Err(TableError::EmptyName { index }),
            Ok(_) => Ok(()),
            Err(NameError::TooLong) => Err(TableError::NameTooLong { index }),
        }
    }

    /// Number of settings
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Check if there are no settings
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Setting at a table position
    pub fn get(&self, index: usize) -> Option<&Setting> {
        self.settings.get(index)
    }

    /// Iterate over settings in table order
    pub fn iter(&self) -> core::slice::Iter<'_, Setting> {
        self.settings.iter()
    }

    /// Table position of a setting
    ///
    /// `setting` must be a reference into this table; copies of a descriptor
    /// have no position and yield `None`.
    pub fn index_of(&self, setting: &Setting) -> Option<usize> {
        let size = core::mem::size_of::<Setting>();
        let base = self.settings.as_ptr() as usize;
        let addr = setting as *const Setting as usize;
        let delta = addr.checked_sub(base)?;
        if delta % size != 0 {
            return None;
        }
        let index = delta / size;
        (index < self.settings.len()).then_some(index)
    }

    /// Decoded name of a setting
    pub fn name(&self, setting: &Setting) -> Result<SettingName, NameError> {
        self.encoding.decode(&setting.encoded_name, &self.dictionary)
    }

    /// Parameter group owning a setting
    pub fn pgn(&self, setting: &Setting) -> Option<PgId> {
        self.index_of(setting)
            .and_then(|index| resolve_pgn(self.pg_counts, index))
    }

    /// Table positions owned by a group
    pub fn pg_range(&self, pgn: PgId) -> Option<Range<usize>> {
        let mut start = 0usize;
        for entry in self.pg_counts {
            let end = start + usize::from(entry.count);
            if entry.pgn == pgn {
                return Some(start..end);
            }
            start = end;
        }
        None
    }

    /// Allowed range of a setting
    ///
    /// Lookup settings range over the ordinals of their lookup table.
    pub fn bounds(&self, setting: &Setting) -> Bounds {
        match setting.config {
            SettingConfig::Lookup { table } => {
                let count = self.pools.lookups[usize::from(table)].len();
                Bounds {
                    min: 0,
                    max: (count as u32).saturating_sub(1),
                }
            }
            SettingConfig::MinMax { min, max } => Bounds {
                min: self.pools.min[usize::from(min)],
                max: self.pools.max[usize::from(max)],
            },
        }
    }

    /// Lowest allowed value
    pub fn min(&self, setting: &Setting) -> i32 {
        self.bounds(setting).min
    }

    /// Highest allowed value
    pub fn max(&self, setting: &Setting) -> u32 {
        self.bounds(setting).max
    }

    /// Lookup table of a lookup-mode setting
    pub fn lookup_table(&self, setting: &Setting) -> Option<&LookupTable> {
        match setting.config {
            SettingConfig::Lookup { table } => self.pools.lookups.get(usize::from(table)),
            SettingConfig::MinMax { .. } => None,
        }
    }

    /// First pair of settings sharing a decoded name
    ///
    /// Quadratic in the table size; meant for generator checks and tests
    /// rather than for boot.
    pub fn duplicate_name(&self) -> Option<(usize, usize)> {
        for (i, a) in self.settings.iter().enumerate() {
            let Ok(name_a) = self.name(a) else {
                continue;
            };
            for (j, b) in self.settings.iter().enumerate().skip(i + 1) {
                if self.name(b).is_ok_and(|name_b| name_b == name_a) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::descriptor::SettingMode;
    use crate::settings::mock::{self, MOCK_TABLES};

    static WORDS: [&str; 2] = ["alpha", "beta"];
    static LABELS: [&str; 2] = ["OFF", "ON"];
    static LOOKUPS: [LookupTable; 1] = [LookupTable::new(&LABELS)];
    static EMPTY_LOOKUPS: [LookupTable; 1] = [LookupTable::new(&[])];
    static MIN: [i32; 2] = [0, -1000];
    static MAX: [u32; 2] = [100, 70000];

    const LAYOUT: ProfileLayout = ProfileLayout {
        pid_profile_size: 8,
        pid_profile_count: 2,
        control_rate_profile_size: 4,
        control_rate_profile_count: 2,
    };

    const fn tables(settings: &'static [Setting], pg_counts: &'static [PgCount]) -> SettingsTables {
        SettingsTables {
            encoding: NameEncoding::ByteIndexed,
            dictionary: WordDictionary::new(&WORDS),
            settings,
            pg_counts,
            pools: BoundPools::new(&MIN, &MAX, &LOOKUPS),
            profiles: LAYOUT,
        }
    }

    const fn name(words: &[u16]) -> [u8; 8] {
        NameEncoding::ByteIndexed.encode(words)
    }

    static GOOD: [Setting; 2] = [
        Setting::value(name(&[1]), SettingType::Uint8, SettingSection::Master, 0, 0, 0),
        Setting::lookup(name(&[2]), SettingType::Uint8, SettingSection::Master, 1, 0),
    ];

    #[test]
    fn test_mock_tables_validate() {
        assert_eq!(MOCK_TABLES.validate(), Ok(()));
    }

    #[test]
    fn test_pg_counts_cover_table() {
        let counted: usize = MOCK_TABLES
            .pg_counts
            .iter()
            .map(|c| usize::from(c.count))
            .sum();
        assert_eq!(counted, MOCK_TABLES.len());
        for setting in MOCK_TABLES.iter() {
            assert!(MOCK_TABLES.pgn(setting).is_some());
        }
    }

    #[test]
    fn test_count_mismatch_rejected() {
        static COUNTS: [PgCount; 1] = [PgCount::new(1, 3)];
        let t = tables(&GOOD, &COUNTS);
        assert_eq!(
            t.validate(),
            Err(TableError::PgCountMismatch {
                counted: 3,
                settings: 2
            })
        );
    }

    #[test]
    fn test_duplicate_group_rejected() {
        static COUNTS: [PgCount; 2] = [PgCount::new(4, 1), PgCount::new(4, 1)];
        assert_eq!(
            tables(&GOOD, &COUNTS).validate(),
            Err(TableError::DuplicateGroup { pgn: PgId(4) })
        );
    }

    #[test]
    fn test_profile_counts_must_agree() {
        static COUNTS: [PgCount; 1] = [PgCount::new(1, 2)];
        let mut t = tables(&GOOD, &COUNTS);
        t.profiles.control_rate_profile_count = 1;
        assert_eq!(
            t.validate(),
            Err(TableError::ProfileCountMismatch {
                pid: 2,
                control_rate: 1
            })
        );
    }

    #[test]
    fn test_invalid_type_rejected() {
        static BAD: [Setting; 1] = [Setting {
            encoded_name: name(&[1]),
            kind: crate::settings::descriptor::SettingKind::from_bits_retain(0b0000_0110),
            config: SettingConfig::MinMax { min: 0, max: 0 },
            offset: 0,
        }];
        static COUNTS: [PgCount; 1] = [PgCount::new(1, 1)];
        assert_eq!(
            tables(&BAD, &COUNTS).validate(),
            Err(TableError::InvalidType { index: 0, tag: 6 })
        );
    }

    #[test]
    fn test_invalid_section_rejected() {
        static BAD: [Setting; 1] = [Setting {
            encoded_name: name(&[1]),
            kind: crate::settings::descriptor::SettingKind::from_bits_retain(0b0001_1000),
            config: SettingConfig::MinMax { min: 0, max: 0 },
            offset: 0,
        }];
        static COUNTS: [PgCount; 1] = [PgCount::new(1, 1)];
        assert_eq!(
            tables(&BAD, &COUNTS).validate(),
            Err(TableError::InvalidSection { index: 0, tag: 3 })
        );
    }

    #[test]
    fn test_bound_index_rejected() {
        static BAD: [Setting; 1] = [Setting::value(
            name(&[1]),
            SettingType::Uint8,
            SettingSection::Master,
            0,
            5,
            0,
        )];
        static COUNTS: [PgCount; 1] = [PgCount::new(1, 1)];
        assert_eq!(
            tables(&BAD, &COUNTS).validate(),
            Err(TableError::BoundIndexOutOfRange { index: 0 })
        );
    }

    #[test]
    fn test_bounds_must_fit_type() {
        // 70000 does not fit a u16
        static BAD: [Setting; 1] = [Setting::value(
            name(&[1]),
            SettingType::Uint16,
            SettingSection::Master,
            0,
            0,
            1,
        )];
        // -1000 does not fit a u8
        static NEGATIVE: [Setting; 1] = [Setting::value(
            name(&[1]),
            SettingType::Uint8,
            SettingSection::Master,
            0,
            1,
            0,
        )];
        static COUNTS: [PgCount; 1] = [PgCount::new(1, 1)];
        assert_eq!(
            tables(&BAD, &COUNTS).validate(),
            Err(TableError::BoundsExceedType { index: 0 })
        );
        assert_eq!(
            tables(&NEGATIVE, &COUNTS).validate(),
            Err(TableError::BoundsExceedType { index: 0 })
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        static BAD: [Setting; 1] = [Setting::value(
            [0; 8],
            SettingType::Uint8,
            SettingSection::Master,
            0,
            0,
            0,
        )];
        static COUNTS: [PgCount; 1] = [PgCount::new(1, 1)];
        assert_eq!(
            tables(&BAD, &COUNTS).validate(),
            Err(TableError::EmptyName { index: 0 })
        );
    }

    #[test]
    fn test_empty_lookup_rejected() {
        static COUNTS: [PgCount; 1] = [PgCount::new(1, 2)];
        let mut t = tables(&GOOD, &COUNTS);
        t.pools = BoundPools::new(&MIN, &MAX, &EMPTY_LOOKUPS);
        assert_eq!(
            t.validate(),
            Err(TableError::EmptyLookupTable { table: 0 })
        );
    }

    #[test]
    fn test_index_of() {
        for (index, setting) in MOCK_TABLES.iter().enumerate() {
            assert_eq!(MOCK_TABLES.index_of(setting), Some(index));
        }
        let copy = *MOCK_TABLES.get(0).unwrap();
        assert_eq!(MOCK_TABLES.index_of(&copy), None);
        assert!(MOCK_TABLES.get(MOCK_TABLES.len()).is_none());
    }

    #[test]
    fn test_lookup_bounds() {
        for setting in MOCK_TABLES.iter() {
            let bounds = MOCK_TABLES.bounds(setting);
            match setting.mode() {
                SettingMode::Lookup => {
                    let table = MOCK_TABLES.lookup_table(setting).unwrap();
                    assert_eq!(bounds.min, 0);
                    assert_eq!(bounds.max as usize, table.len() - 1);
                }
                SettingMode::Value => {
                    assert!(MOCK_TABLES.lookup_table(setting).is_none());
                    if let Some((lo, hi)) = setting.setting_type().range() {
                        assert!(i64::from(bounds.min) >= lo);
                        assert!(i64::from(bounds.max) <= hi);
                    }
                }
            }
        }
    }

    #[test]
    fn test_value_bounds_from_pools() {
        let acc_trim = MOCK_TABLES.find("acc_trim").unwrap();
        assert_eq!(MOCK_TABLES.min(acc_trim), -300);
        assert_eq!(MOCK_TABLES.max(acc_trim), 300);

        let debug_mode = MOCK_TABLES.find("debug_mode").unwrap();
        assert_eq!(MOCK_TABLES.min(debug_mode), 0);
        assert_eq!(MOCK_TABLES.max(debug_mode), 2);
    }

    #[test]
    fn test_pg_range() {
        assert_eq!(MOCK_TABLES.pg_range(mock::PG_SYSTEM), Some(0..5));
        assert_eq!(MOCK_TABLES.pg_range(mock::PG_PID_PROFILE), Some(5..10));
        assert_eq!(MOCK_TABLES.pg_range(mock::PG_CONTROL_RATE), Some(10..14));
        assert_eq!(MOCK_TABLES.pg_range(PgId(99)), None);
    }

    #[test]
    fn test_names_are_unique() {
        assert_eq!(MOCK_TABLES.duplicate_name(), None);

        static TWINS: [Setting; 2] = [
            Setting::value(name(&[1, 2]), SettingType::Uint8, SettingSection::Master, 0, 0, 0),
            Setting::value(name(&[1, 2]), SettingType::Uint8, SettingSection::Master, 1, 0, 0),
        ];
        static COUNTS: [PgCount; 1] = [PgCount::new(1, 2)];
        assert_eq!(tables(&TWINS, &COUNTS).duplicate_name(), Some((0, 1)));
    }

    #[test]
    fn test_profile_instances() {
        assert_eq!(LAYOUT.instances(SettingSection::Master), 1);
        assert_eq!(LAYOUT.instances(SettingSection::Profile), 2);
        assert_eq!(LAYOUT.instances(SettingSection::ControlRate), 2);
    }
}
