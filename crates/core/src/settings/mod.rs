//! Settings registry types and tables
//!
//! This module provides the table-driven description of every tunable
//! setting: compressed names, packed type/section tags, shared bounds and
//! the parameter groups that own the values. Access to the values
//! themselves (typed reads/writes, persistence, protocols) is in the
//! firmware crate.

pub mod bounds;
pub mod codec;
pub mod descriptor;
pub mod dictionary;
pub mod error;
pub mod group;
pub mod locator;
pub mod lookup;
pub mod mock;
pub mod table;

pub use bounds::{BoundPools, Bounds, LookupTable, SettingMax, SettingMin, MAX_LOOKUP_VALUES};
pub use codec::{
    EncodedName, NameEncoding, SettingName, SETTING_ENCODED_NAME_MAX_BYTES,
    SETTING_MAX_NAME_LENGTH, SETTING_NAME_SEPARATOR,
};
pub use descriptor::{Setting, SettingConfig, SettingKind, SettingMode, SettingSection, SettingType};
pub use dictionary::WordDictionary;
pub use error::{AccessError, NameError, TableError};
pub use group::{resolve_pgn, PgCount, PgId, PgRegistration, PgRegistry, MAX_PARAMETER_GROUPS};
pub use locator::{value_offset, ValueLocation, View};
pub use table::{ProfileLayout, SettingsTables};
