//! Mock settings tables
//!
//! A small, hand-written table set shaped like generator output: three
//! parameter groups (one per section), a lookup setting, signed and unsigned
//! ranges and a float. Always compiled so that host tests of this crate and
//! of the firmware crate share one fixture.
//!
//! | # | Name              | Type   | Section      | Offset | Bounds       |
//! |---|-------------------|--------|--------------|--------|--------------|
//! | 0 | `looptime`        | u16    | master       | 0      | 0..=9000     |
//! | 1 | `debug_mode`      | u8     | master       | 2      | NONE/GYRO/NOTCH |
//! | 2 | `acc_trim`        | i16    | master       | 4      | -300..=300   |
//! | 3 | `rc_baud`         | u32    | master       | 8      | 0..=921600   |
//! | 4 | `level_trim`      | i8     | master       | 12     | -10..=10     |
//! | 5 | `pid_roll_p_gain` | u8     | profile      | 0      | 0..=200      |
//! | 6 | `pid_roll_i_gain` | u8     | profile      | 1      | 0..=200      |
//! | 7 | `pid_yaw_p_gain`  | u8     | profile      | 2      | 0..=200      |
//! | 8 | `dterm_lpf_hz`    | float  | profile      | 4      | 0..=500      |
//! | 9 | `yaw_lpf_hz`      | u16    | profile      | 8      | 0..=500      |
//! |10 | `rc_rate`         | u8     | control rate | 0      | 0..=250      |
//! |11 | `rc_expo`         | u8     | control rate | 1      | 0..=100      |
//! |12 | `roll_rate`       | u8     | control rate | 2      | 6..=250      |
//! |13 | `tpa_breakpoint`  | u16    | control rate | 4      | 1000..=2000  |

use super::bounds::{BoundPools, LookupTable};
use super::codec::NameEncoding;
use super::descriptor::{Setting, SettingSection, SettingType};
use super::dictionary::WordDictionary;
use super::group::{PgCount, PgId, PgRegistry};
use super::table::{ProfileLayout, SettingsTables};
use SettingSection::{ControlRate, Master, Profile};
use SettingType::{Float, Int16, Int8, Uint16, Uint32, Uint8};

/// System configuration group
pub const PG_SYSTEM: PgId = PgId(10);
/// PID profile group
pub const PG_PID_PROFILE: PgId = PgId(20);
/// Control rate profile group
pub const PG_CONTROL_RATE: PgId = PgId(30);

/// Size of the system configuration structure
pub const SYSTEM_CONFIG_SIZE: usize = 16;
/// Size of one PID profile
pub const PID_PROFILE_SIZE: usize = 16;
/// Size of one control rate profile
pub const CONTROL_RATE_PROFILE_SIZE: usize = 8;
/// Profiles of each kind
pub const PROFILE_COUNT: u8 = 3;

/// Bytes in the PID profile group
pub const PID_PROFILE_GROUP_SIZE: usize = PID_PROFILE_SIZE * PROFILE_COUNT as usize;
/// Bytes in the control rate group
pub const CONTROL_RATE_GROUP_SIZE: usize = CONTROL_RATE_PROFILE_SIZE * PROFILE_COUNT as usize;

static WORDS: [&str; 21] = [
    "pid",        // 1
    "roll",       // 2
    "p",          // 3
    "gain",       // 4
    "rc",         // 5
    "rate",       // 6
    "looptime",   // 7
    "debug",      // 8
    "mode",       // 9
    "i",          // 10
    "yaw",        // 11
    "dterm",      // 12
    "lpf",        // 13
    "hz",         // 14
    "expo",       // 15
    "tpa",        // 16
    "breakpoint", // 17
    "acc",        // 18
    "trim",       // 19
    "baud",       // 20
    "level",      // 21
];

static DEBUG_MODES: [&str; 3] = ["NONE", "GYRO", "NOTCH"];

static LOOKUPS: [LookupTable; 1] = [LookupTable::new(&DEBUG_MODES)];

static MIN: [i32; 5] = [0, -300, -10, 6, 1000];

static MAX: [u32; 9] = [9000, 300, 921_600, 10, 200, 500, 250, 100, 2000];

const fn name(words: &[u16]) -> [u8; 8] {
    NameEncoding::Varint.encode(words)
}

static SETTINGS: [Setting; 14] = [
    // PG_SYSTEM
    Setting::value(name(&[7]), Uint16, Master, 0, 0, 0),
    Setting::lookup(name(&[8, 9]), Uint8, Master, 2, 0),
    Setting::value(name(&[18, 19]), Int16, Master, 4, 1, 1),
    Setting::value(name(&[5, 20]), Uint32, Master, 8, 0, 2),
    Setting::value(name(&[21, 19]), Int8, Master, 12, 2, 3),
    // PG_PID_PROFILE
    Setting::value(name(&[1, 2, 3, 4]), Uint8, Profile, 0, 0, 4),
    Setting::value(name(&[1, 2, 10, 4]), Uint8, Profile, 1, 0, 4),
    Setting::value(name(&[1, 11, 3, 4]), Uint8, Profile, 2, 0, 4),
    Setting::value(name(&[12, 13, 14]), Float, Profile, 4, 0, 5),
    Setting::value(name(&[11, 13, 14]), Uint16, Profile, 8, 0, 5),
    // PG_CONTROL_RATE
    Setting::value(name(&[5, 6]), Uint8, ControlRate, 0, 0, 6),
    Setting::value(name(&[5, 15]), Uint8, ControlRate, 1, 0, 7),
    Setting::value(name(&[2, 6]), Uint8, ControlRate, 2, 3, 6),
    Setting::value(name(&[16, 17]), Uint16, ControlRate, 4, 4, 8),
];

static PG_COUNTS: [PgCount; 3] = [
    PgCount::new(PG_SYSTEM.0, 5),
    PgCount::new(PG_PID_PROFILE.0, 5),
    PgCount::new(PG_CONTROL_RATE.0, 4),
];

/// Mock tables
pub static MOCK_TABLES: SettingsTables = SettingsTables {
    encoding: NameEncoding::Varint,
    dictionary: WordDictionary::new(&WORDS),
    settings: &SETTINGS,
    pg_counts: &PG_COUNTS,
    pools: BoundPools::new(&MIN, &MAX, &LOOKUPS),
    profiles: ProfileLayout {
        pid_profile_size: PID_PROFILE_SIZE as u16,
        pid_profile_count: PROFILE_COUNT,
        control_rate_profile_size: CONTROL_RATE_PROFILE_SIZE as u16,
        control_rate_profile_count: PROFILE_COUNT,
    },
};

/// Live and copy memory for the mock groups, zero initialized
#[derive(Debug)]
pub struct MockGroupMemory {
    system: [u8; SYSTEM_CONFIG_SIZE],
    system_copy: [u8; SYSTEM_CONFIG_SIZE],
    pid: [u8; PID_PROFILE_GROUP_SIZE],
    pid_copy: [u8; PID_PROFILE_GROUP_SIZE],
    rate: [u8; CONTROL_RATE_GROUP_SIZE],
    rate_copy: [u8; CONTROL_RATE_GROUP_SIZE],
}

impl MockGroupMemory {
    /// Create zeroed memory
    pub fn new() -> Self {
        Self {
            system: [0; SYSTEM_CONFIG_SIZE],
            system_copy: [0; SYSTEM_CONFIG_SIZE],
            pid: [0; PID_PROFILE_GROUP_SIZE],
            pid_copy: [0; PID_PROFILE_GROUP_SIZE],
            rate: [0; CONTROL_RATE_GROUP_SIZE],
            rate_copy: [0; CONTROL_RATE_GROUP_SIZE],
        }
    }

    /// Registry with all three mock groups registered
    pub fn registry(&mut self) -> PgRegistry<'_> {
        let mut registry = PgRegistry::new();
        // Distinct ids and equal region sizes, registration cannot fail
        let _ = registry.register(PG_SYSTEM, &mut self.system, &mut self.system_copy);
        let _ = registry.register(PG_PID_PROFILE, &mut self.pid, &mut self.pid_copy);
        let _ = registry.register(PG_CONTROL_RATE, &mut self.rate, &mut self.rate_copy);
        registry
    }
}

impl Default for MockGroupMemory {
    fn default() -> Self {
        Self::new()
    }
}
