//! Settings error types
//!
//! Provides error types for table validation, name decoding and
//! parameter group memory access.

use super::group::PgId;

/// Errors found while validating generated setting tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// Per-group counts do not add up to the number of settings
    PgCountMismatch {
        /// Sum of all group counts
        counted: usize,
        /// Number of descriptors in the table
        settings: usize,
    },
    /// More groups than `MAX_PARAMETER_GROUPS`
    TooManyGroups,
    /// Same group listed twice in the group counts
    DuplicateGroup {
        /// Repeated group
        pgn: PgId,
    },
    /// PID and control rate profiles differ in number
    ProfileCountMismatch {
        /// Number of PID profiles
        pid: u8,
        /// Number of control rate profiles
        control_rate: u8,
    },
    /// Setting carries an unknown type tag
    InvalidType {
        /// Table position of the setting
        index: usize,
        /// Raw tag found in the descriptor
        tag: u8,
    },
    /// Setting carries an unknown section tag
    InvalidSection {
        /// Table position of the setting
        index: usize,
        /// Raw tag found in the descriptor
        tag: u8,
    },
    /// Min/max pool slot or lookup table does not exist
    BoundIndexOutOfRange {
        /// Table position of the setting
        index: usize,
    },
    /// Value-mode bounds are inverted or not representable by the setting type
    BoundsExceedType {
        /// Table position of the setting
        index: usize,
    },
    /// Lookup table without any value
    EmptyLookupTable {
        /// Lookup table index
        table: usize,
    },
    /// Setting name decodes to nothing
    EmptyName {
        /// Table position of the setting
        index: usize,
    },
    /// Setting name does not fit `SETTING_MAX_NAME_LENGTH`
    NameTooLong {
        /// Table position of the setting
        index: usize,
    },
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::PgCountMismatch { counted, settings } => write!(
                f,
                "group counts cover {} settings, table has {}",
                counted, settings
            ),
            TableError::TooManyGroups => write!(f, "too many parameter groups"),
            TableError::DuplicateGroup { pgn } => {
                write!(f, "parameter group {} listed twice", pgn)
            }
            TableError::ProfileCountMismatch { pid, control_rate } => write!(
                f,
                "{} PID profiles but {} control rate profiles",
                pid, control_rate
            ),
            TableError::InvalidType { index, tag } => {
                write!(f, "setting {}: invalid type tag {}", index, tag)
            }
            TableError::InvalidSection { index, tag } => {
                write!(f, "setting {}: invalid section tag {}", index, tag)
            }
            TableError::BoundIndexOutOfRange { index } => {
                write!(f, "setting {}: bound index out of range", index)
            }
            TableError::BoundsExceedType { index } => {
                write!(f, "setting {}: bounds exceed value type", index)
            }
            TableError::EmptyLookupTable { table } => {
                write!(f, "lookup table {} is empty", table)
            }
            TableError::EmptyName { index } => write!(f, "setting {}: empty name", index),
            TableError::NameTooLong { index } => write!(f, "setting {}: name too long", index),
        }
    }
}

/// Errors from decoding a setting name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// Decoded name exceeds the name buffer
    TooLong,
}

impl core::fmt::Display for NameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NameError::TooLong => write!(f, "setting name too long"),
        }
    }
}

/// Errors from parameter group memory access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// No region registered for the group
    UnknownGroup(PgId),
    /// Group registered twice
    DuplicateGroup(PgId),
    /// Live and copy regions differ in size
    RegionSizeMismatch(PgId),
    /// Registry has no room for another group
    RegistryFull,
    /// Access strays outside the group's region
    OutOfBounds {
        /// Group being accessed
        pgn: PgId,
        /// Byte offset of the access
        offset: usize,
        /// Length of the access
        size: usize,
    },
    /// Supplied data length differs from the value size
    SizeMismatch {
        /// Size the location expects
        expected: usize,
        /// Size supplied by the caller
        actual: usize,
    },
}

impl core::fmt::Display for AccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccessError::UnknownGroup(pgn) => write!(f, "unknown parameter group {}", pgn),
            AccessError::DuplicateGroup(pgn) => {
                write!(f, "parameter group {} already registered", pgn)
            }
            AccessError::RegionSizeMismatch(pgn) => {
                write!(f, "parameter group {} live/copy size mismatch", pgn)
            }
            AccessError::RegistryFull => write!(f, "parameter group registry full"),
            AccessError::OutOfBounds { pgn, offset, size } => write!(
                f,
                "access {}+{} outside parameter group {}",
                offset, size, pgn
            ),
            AccessError::SizeMismatch { expected, actual } => {
                write!(f, "expected {} bytes, got {}", expected, actual)
            }
        }
    }
}

impl core::error::Error for TableError {}

impl core::error::Error for NameError {}

impl core::error::Error for AccessError {}
