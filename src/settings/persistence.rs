//! Parameter group persistence
//!
//! Non-volatile storage is an external collaborator working on whole
//! parameter groups as raw bytes. After a successful save or load the copy
//! regions are synced, so `is_modified` reports changes since then.

use pico_settings_core::settings::{PgId, PgRegistry, View};

/// Errors reported by a persistence backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("No stored data for parameter group {0}")]
    NotFound(PgId),

    #[error("Stored size differs for parameter group {0}")]
    SizeMismatch(PgId),

    #[error("Storage full")]
    StorageFull,

    #[error("Storage I/O failed")]
    Io,
}

/// Commit/load backend for raw parameter group memory
pub trait PgPersistence {
    /// Store the live bytes of a group
    fn commit(&mut self, pgn: PgId, data: &[u8]) -> Result<(), PersistenceError>;

    /// Fill `data` with the stored bytes of a group
    ///
    /// Returns `NotFound` when nothing is stored for the group, leaving
    /// `data` untouched.
    fn load(&mut self, pgn: PgId, data: &mut [u8]) -> Result<(), PersistenceError>;
}

/// Commit every registered group, then sync all copies
///
/// Stops at the first failing group; copies are only synced when every
/// commit succeeded.
pub fn save_all<S: PgPersistence>(
    registry: &mut PgRegistry<'_>,
    store: &mut S,
) -> Result<usize, PersistenceError> {
    let mut committed = 0;
    for group in registry.iter() {
        if let Err(e) = store.commit(group.pgn(), group.region(View::Live)) {
            crate::log_error!("Commit failed for parameter group {}", group.pgn().0);
            return Err(e);
        }
        committed += 1;
    }
    registry.sync_all_copies();
    crate::log_info!("Saved {} parameter groups", committed);
    Ok(committed)
}

/// Load every registered group that has stored data, then sync all copies
///
/// Groups without stored data keep their current (default) values. Each
/// group's copy is synced as soon as it is loaded, so when a later group
/// fails the groups loaded before it are not reported as modified.
pub fn load_all<S: PgPersistence>(
    registry: &mut PgRegistry<'_>,
    store: &mut S,
) -> Result<usize, PersistenceError> {
    let mut loaded = 0;
    for group in registry.iter_mut() {
        let pgn = group.pgn();
        match store.load(pgn, group.region_mut(View::Live)) {
            Ok(()) => {
                group.sync_copy();
                loaded += 1;
            }
            Err(PersistenceError::NotFound(_)) => {
                crate::log_debug!("No stored data for parameter group {}", pgn.0);
            }
            Err(e) => {
                crate::log_error!("Load failed for parameter group {}", pgn.0);
                return Err(e);
            }
        }
    }
    registry.sync_all_copies();
    crate::log_info!("Loaded {} parameter groups", loaded);
    Ok(loaded)
}

#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockPersistence;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use super::{PersistenceError, PgPersistence};
    use pico_settings_core::settings::{PgId, MAX_PARAMETER_GROUPS};

    /// Largest group the mock can hold
    const MAX_GROUP_SIZE: usize = 256;

    /// In-memory persistence backend for tests
    #[derive(Debug, Default)]
    pub struct MockPersistence {
        groups: heapless::Vec<(PgId, heapless::Vec<u8, MAX_GROUP_SIZE>), MAX_PARAMETER_GROUPS>,
        commits: usize,
        fail_commits: bool,
    }

    impl MockPersistence {
        /// Create an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every following commit fail with `Io`
        pub fn fail_commits(&mut self, fail: bool) {
            self.fail_commits = fail;
        }

        /// Number of successful commits
        pub fn commit_count(&self) -> usize {
            self.commits
        }

        /// Stored bytes of a group
        pub fn stored(&self, pgn: PgId) -> Option<&[u8]> {
            self.groups
                .iter()
                .find(|(id, _)| *id == pgn)
                .map(|(_, data)| data.as_slice())
        }
    }

    impl PgPersistence for MockPersistence {
        fn commit(&mut self, pgn: PgId, data: &[u8]) -> Result<(), PersistenceError> {
            if self.fail_commits {
                return Err(PersistenceError::Io);
            }
            let bytes =
                heapless::Vec::from_slice(data).map_err(|_| PersistenceError::StorageFull)?;
            match self.groups.iter_mut().find(|(id, _)| *id == pgn) {
                Some((_, stored)) => *stored = bytes,
                None => self
                    .groups
                    .push((pgn, bytes))
                    .map_err(|_| PersistenceError::StorageFull)?,
            }
            self.commits += 1;
            Ok(())
        }

        fn load(&mut self, pgn: PgId, data: &mut [u8]) -> Result<(), PersistenceError> {
            let stored = self.stored(pgn).ok_or(PersistenceError::NotFound(pgn))?;
            if stored.len() != data.len() {
                return Err(PersistenceError::SizeMismatch(pgn));
            }
            data.copy_from_slice(stored);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SettingValue, SettingsContext};
    use pico_settings_core::settings::mock::{self, MockGroupMemory, MOCK_TABLES};
    use pico_settings_core::traits::MockProfile;

    #[test]
    fn test_save_syncs_copies() {
        let mut memory = MockGroupMemory::new();
        let mut registry = memory.registry();
        let mut store = MockPersistence::new();

        let looptime = MOCK_TABLES.find("looptime").unwrap();
        {
            let mut ctx = SettingsContext::new(&MOCK_TABLES, &mut registry, MockProfile::new());
            ctx.write(looptime, SettingValue::U16(500)).unwrap();
            assert!(ctx.is_modified(looptime).unwrap());
        }

        assert_eq!(save_all(&mut registry, &mut store), Ok(3));
        assert_eq!(store.commit_count(), 3);
        assert_eq!(&store.stored(mock::PG_SYSTEM).unwrap()[..2], &500u16.to_le_bytes());

        let ctx = SettingsContext::new(&MOCK_TABLES, &mut registry, MockProfile::new());
        assert!(!ctx.is_modified(looptime).unwrap());
    }

    #[test]
    fn test_failed_save_keeps_changes_pending() {
        let mut memory = MockGroupMemory::new();
        let mut registry = memory.registry();
        let mut store = MockPersistence::new();
        store.fail_commits(true);

        let rc_rate = MOCK_TABLES.find("rc_rate").unwrap();
        {
            let mut ctx = SettingsContext::new(&MOCK_TABLES, &mut registry, MockProfile::new());
            ctx.write(rc_rate, SettingValue::U8(70)).unwrap();
        }

        assert_eq!(save_all(&mut registry, &mut store), Err(PersistenceError::Io));
        let ctx = SettingsContext::new(&MOCK_TABLES, &mut registry, MockProfile::new());
        assert!(ctx.is_modified(rc_rate).unwrap());
    }

    #[test]
    fn test_load_restores_values() {
        let mut store = MockPersistence::new();
        let rc_expo = MOCK_TABLES.find("rc_expo").unwrap();

        {
            let mut memory = MockGroupMemory::new();
            let mut registry = memory.registry();
            {
                let mut ctx =
                    SettingsContext::new(&MOCK_TABLES, &mut registry, MockProfile::with_profile(2));
                ctx.write(rc_expo, SettingValue::U8(65)).unwrap();
            }
            save_all(&mut registry, &mut store).unwrap();
        }

        let mut memory = MockGroupMemory::new();
        let mut registry = memory.registry();
        assert_eq!(load_all(&mut registry, &mut store), Ok(3));

        let ctx = SettingsContext::new(&MOCK_TABLES, &mut registry, MockProfile::with_profile(2));
        assert_eq!(ctx.read(rc_expo, View::Live).unwrap(), SettingValue::U8(65));
        assert!(!ctx.is_modified(rc_expo).unwrap());
    }

    #[test]
    fn test_load_skips_missing_groups() {
        let mut store = MockPersistence::new();
        store.commit(mock::PG_SYSTEM, &[7; mock::SYSTEM_CONFIG_SIZE]).unwrap();

        let mut memory = MockGroupMemory::new();
        let mut registry = memory.registry();
        assert_eq!(load_all(&mut registry, &mut store), Ok(1));
        assert_eq!(
            registry.find(mock::PG_SYSTEM).unwrap().region(View::Copy)[0],
            7
        );
    }

    #[test]
    fn test_failed_load_leaves_loaded_groups_clean() {
        let mut store = MockPersistence::new();
        store.commit(mock::PG_SYSTEM, &[7; mock::SYSTEM_CONFIG_SIZE]).unwrap();
        store.commit(mock::PG_CONTROL_RATE, &[1, 2, 3]).unwrap();

        let mut memory = MockGroupMemory::new();
        let mut registry = memory.registry();
        assert_eq!(
            load_all(&mut registry, &mut store),
            Err(PersistenceError::SizeMismatch(mock::PG_CONTROL_RATE))
        );

        let ctx = SettingsContext::new(&MOCK_TABLES, &mut registry, MockProfile::new());
        let looptime = MOCK_TABLES.find("looptime").unwrap();
        assert_eq!(ctx.read(looptime, View::Live).unwrap(), SettingValue::U16(0x0707));
        assert!(!ctx.is_modified(looptime).unwrap());

        let rc_rate = MOCK_TABLES.find("rc_rate").unwrap();
        assert_eq!(ctx.read(rc_rate, View::Live).unwrap(), SettingValue::U8(0));
        assert!(!ctx.is_modified(rc_rate).unwrap());
    }

    #[test]
    fn test_load_size_mismatch() {
        let mut store = MockPersistence::new();
        store.commit(mock::PG_CONTROL_RATE, &[1, 2, 3]).unwrap();

        let mut memory = MockGroupMemory::new();
        let mut registry = memory.registry();
        assert_eq!(
            load_all(&mut registry, &mut store),
            Err(PersistenceError::SizeMismatch(mock::PG_CONTROL_RATE))
        );
    }
}
