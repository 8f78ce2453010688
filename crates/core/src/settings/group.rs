//! Parameter groups
//!
//! A parameter group (PG) is the configuration structure of one subsystem.
//! Its memory is owned by the firmware; the registry only needs to know
//! where the live values and the copy used for change detection are.
//!
//! The descriptor table lists settings group by group. `PgCount` records how
//! many consecutive descriptors each group contributes, which is all that is
//! needed to find the owner of a descriptor from its position.

use super::error::AccessError;
use super::locator::{ValueLocation, View};

/// Maximum number of parameter groups in one registry
pub const MAX_PARAMETER_GROUPS: usize = 32;

/// Parameter group identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PgId(pub u16);

impl core::fmt::Display for PgId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of descriptors a group contributes, in descriptor-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgCount {
    /// Group identifier
    pub pgn: PgId,
    /// Consecutive descriptors owned by the group
    pub count: u16,
}

impl PgCount {
    /// Create a count entry
    pub const fn new(pgn: u16, count: u16) -> Self {
        Self {
            pgn: PgId(pgn),
            count,
        }
    }
}

/// Find the group owning the descriptor at `position`
///
/// Walks the counts accumulating a running total and returns the first group
/// whose total exceeds `position`. The counts are trusted as given: if they
/// do not add up to the table length, a descriptor may be attributed to the
/// wrong group, and positions past the last total resolve to `None`.
pub fn resolve_pgn(counts: &[PgCount], position: usize) -> Option<PgId> {
    let mut total = 0usize;
    for entry in counts {
        total += usize::from(entry.count);
        if total > position {
            return Some(entry.pgn);
        }
    }
    None
}

/// Live and copy memory of one parameter group
#[derive(Debug)]
pub struct PgRegistration<'m> {
    pgn: PgId,
    live: &'m mut [u8],
    copy: &'m mut [u8],
}

impl<'m> PgRegistration<'m> {
    /// Group identifier
    pub fn pgn(&self) -> PgId {
        self.pgn
    }

    /// Size of the group's region in bytes
    pub fn size(&self) -> usize {
        self.live.len()
    }

    /// Region for a view
    pub fn region(&self, view: View) -> &[u8] {
        match view {
            View::Live => &*self.live,
            View::Copy => &*self.copy,
        }
    }

    /// Mutable region for a view
    pub fn region_mut(&mut self, view: View) -> &mut [u8] {
        match view {
            View::Live => &mut *self.live,
            View::Copy => &mut *self.copy,
        }
    }

    /// Copy live values into the copy region
    pub fn sync_copy(&mut self) {
        self.copy.copy_from_slice(&*self.live);
    }

    /// Check if live values differ from the copy
    pub fn is_dirty(&self) -> bool {
        *self.live != *self.copy
    }
}

/// Parameter group id to memory mapping
///
/// Every access goes through [`PgRegistry::read`] or [`PgRegistry::write`],
/// which refuse to touch bytes outside the group's region.
#[derive(Debug, Default)]
pub struct PgRegistry<'m> {
    groups: heapless::Vec<PgRegistration<'m>, MAX_PARAMETER_GROUPS>,
}

impl<'m> PgRegistry<'m> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            groups: heapless::Vec::new(),
        }
    }

    /// Register the live and copy regions of a group
    pub fn register(
        &mut self,
        pgn: PgId,
        live: &'m mut [u8],
        copy: &'m mut [u8],
    ) -> Result<(), AccessError> {
        if self.find(pgn).is_some() {
            return Err(AccessError::DuplicateGroup(pgn));
        }
        if live.len() != copy.len() {
            return Err(AccessError::RegionSizeMismatch(pgn));
        }
        self.groups
            .push(PgRegistration { pgn, live, copy })
            .map_err(|_| AccessError::RegistryFull)
    }

    /// Find a group's registration
    pub fn find(&self, pgn: PgId) -> Option<&PgRegistration<'m>> {
        self.groups.iter().find(|g| g.pgn == pgn)
    }

    /// Find a group's registration for modification
    pub fn find_mut(&mut self, pgn: PgId) -> Option<&mut PgRegistration<'m>> {
        self.groups.iter_mut().find(|g| g.pgn == pgn)
    }

    /// Number of registered groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no group is registered
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over registrations
    pub fn iter(&self) -> impl Iterator<Item = &PgRegistration<'m>> {
        self.groups.iter()
    }

    /// Iterate over registrations for modification
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PgRegistration<'m>> {
        self.groups.iter_mut()
    }

    /// Read the bytes at a location
    pub fn read(&self, location: &ValueLocation) -> Result<&[u8], AccessError> {
        let group = self
            .find(location.pgn)
            .ok_or(AccessError::UnknownGroup(location.pgn))?;
        let region = group.region(location.view);
        region
            .get(location.offset..location.end())
            .ok_or(AccessError::OutOfBounds {
                pgn: location.pgn,
                offset: location.offset,
                size: location.size,
            })
    }

    /// Write bytes at a location
    ///
    /// `data` must be exactly `location.size` bytes long.
    pub fn write(&mut self, location: &ValueLocation, data: &[u8]) -> Result<(), AccessError> {
        if data.len() != location.size {
            return Err(AccessError::SizeMismatch {
                expected: location.size,
                actual: data.len(),
            });
        }
        let group = self
            .find_mut(location.pgn)
            .ok_or(AccessError::UnknownGroup(location.pgn))?;
        let target = group
            .region_mut(location.view)
            .get_mut(location.offset..location.end())
            .ok_or(AccessError::OutOfBounds {
                pgn: location.pgn,
                offset: location.offset,
                size: location.size,
            })?;
        target.copy_from_slice(data);
        Ok(())
    }

    /// Check if the live value at a location differs from its copy
    pub fn differs_from_copy(&self, location: &ValueLocation) -> Result<bool, AccessError> {
        let live = self.read(&location.with_view(View::Live))?;
        let copy = self.read(&location.with_view(View::Copy))?;
        Ok(live != copy)
    }

    /// Copy live values into the copy region of one group
    pub fn sync_copy(&mut self, pgn: PgId) -> Result<(), AccessError> {
        self.find_mut(pgn)
            .ok_or(AccessError::UnknownGroup(pgn))?
            .sync_copy();
        Ok(())
    }

    /// Copy live values into the copy region of every group
    pub fn sync_all_copies(&mut self) {
        for group in self.groups.iter_mut() {
            group.sync_copy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS: [PgCount; 2] = [PgCount::new(0, 2), PgCount::new(1, 3)];

    #[test]
    fn test_resolve_pgn_buckets() {
        assert_eq!(resolve_pgn(&COUNTS, 0), Some(PgId(0)));
        assert_eq!(resolve_pgn(&COUNTS, 1), Some(PgId(0)));
        assert_eq!(resolve_pgn(&COUNTS, 2), Some(PgId(1)));
        assert_eq!(resolve_pgn(&COUNTS, 3), Some(PgId(1)));
        assert_eq!(resolve_pgn(&COUNTS, 4), Some(PgId(1)));
        assert_eq!(resolve_pgn(&COUNTS, 5), None);
    }

    #[test]
    fn test_resolve_pgn_inconsistent_counts() {
        // Counts cover 4 positions for a 5-entry table: position 4 is lost
        // and nothing is shifted to make up for it.
        let short = [PgCount::new(7, 1), PgCount::new(8, 3)];
        assert_eq!(resolve_pgn(&short, 0), Some(PgId(7)));
        assert_eq!(resolve_pgn(&short, 3), Some(PgId(8)));
        assert_eq!(resolve_pgn(&short, 4), None);

        // An empty group in between is skipped, never matched
        let with_empty = [PgCount::new(1, 2), PgCount::new(2, 0), PgCount::new(3, 1)];
        assert_eq!(resolve_pgn(&with_empty, 2), Some(PgId(3)));
    }

    #[test]
    fn test_resolve_pgn_empty_counts() {
        assert_eq!(resolve_pgn(&[], 0), None);
    }

    #[test]
    fn test_register_and_read() {
        let mut live = [1u8, 2, 3, 4];
        let mut copy = [0u8; 4];
        let mut registry = PgRegistry::new();
        registry.register(PgId(5), &mut live, &mut copy).unwrap();
        assert_eq!(registry.len(), 1);

        let loc = ValueLocation::new(PgId(5), View::Live, 1, 2);
        assert_eq!(registry.read(&loc).unwrap(), &[2, 3]);
        assert_eq!(registry.read(&loc.with_view(View::Copy)).unwrap(), &[0, 0]);
    }

    #[test]
    fn test_register_rejects_duplicates_and_mismatch() {
        let mut live_a = [0u8; 4];
        let mut copy_a = [0u8; 4];
        let mut live_b = [0u8; 4];
        let mut copy_b = [0u8; 2];
        let mut live_c = [0u8; 1];
        let mut copy_c = [0u8; 1];
        let mut registry = PgRegistry::new();
        registry.register(PgId(1), &mut live_a, &mut copy_a).unwrap();
        assert_eq!(
            registry.register(PgId(2), &mut live_b, &mut copy_b),
            Err(AccessError::RegionSizeMismatch(PgId(2)))
        );

        assert_eq!(
            registry.register(PgId(1), &mut live_c, &mut copy_c),
            Err(AccessError::DuplicateGroup(PgId(1)))
        );
    }

    #[test]
    fn test_access_is_bounds_checked() {
        let mut live = [0u8; 4];
        let mut copy = [0u8; 4];
        let mut registry = PgRegistry::new();
        registry.register(PgId(1), &mut live, &mut copy).unwrap();

        let loc = ValueLocation::new(PgId(1), View::Live, 2, 4);
        assert_eq!(
            registry.read(&loc),
            Err(AccessError::OutOfBounds {
                pgn: PgId(1),
                offset: 2,
                size: 4
            })
        );
        assert!(registry.write(&loc, &[0; 4]).is_err());

        let unknown = ValueLocation::new(PgId(9), View::Live, 0, 1);
        assert_eq!(
            registry.read(&unknown),
            Err(AccessError::UnknownGroup(PgId(9)))
        );
    }

    #[test]
    fn test_write_and_dirty_tracking() {
        let mut live = [0u8; 4];
        let mut copy = [0u8; 4];
        let mut registry = PgRegistry::new();
        registry.register(PgId(1), &mut live, &mut copy).unwrap();

        let loc = ValueLocation::new(PgId(1), View::Live, 0, 2);
        assert_eq!(
            registry.write(&loc, &[1]),
            Err(AccessError::SizeMismatch {
                expected: 2,
                actual: 1
            })
        );

        registry.write(&loc, &[0x34, 0x12]).unwrap();
        assert!(registry.differs_from_copy(&loc).unwrap());
        assert!(registry.find(PgId(1)).unwrap().is_dirty());

        registry.sync_copy(PgId(1)).unwrap();
        assert!(!registry.differs_from_copy(&loc).unwrap());
        assert_eq!(
            registry.read(&loc.with_view(View::Copy)).unwrap(),
            &[0x34, 0x12]
        );
    }
}
