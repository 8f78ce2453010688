//! Typed setting access
//!
//! [`SettingsContext`] ties the installed tables, the parameter group
//! registry and a profile source together, so callers can go from a
//! descriptor straight to a typed, bound-checked value.

use core::fmt;

use pico_settings_core::settings::{
    PgRegistry, Setting, SettingType, SettingsTables, ValueLocation, View,
};
use pico_settings_core::traits::ProfileSource;

use super::SettingsError;

/// Setting value tagged with its type
///
/// Values are stored little-endian in parameter group memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    Float(f32),
}

impl SettingValue {
    /// Type of the value
    pub fn setting_type(&self) -> SettingType {
        match self {
            SettingValue::U8(_) => SettingType::Uint8,
            SettingValue::I8(_) => SettingType::Int8,
            SettingValue::U16(_) => SettingType::Uint16,
            SettingValue::I16(_) => SettingType::Int16,
            SettingValue::U32(_) => SettingType::Uint32,
            SettingValue::Float(_) => SettingType::Float,
        }
    }

    /// Decode stored bytes
    ///
    /// Returns `None` unless `bytes` is exactly the size of `setting_type`.
    pub fn from_le_bytes(setting_type: SettingType, bytes: &[u8]) -> Option<Self> {
        let value = match setting_type {
            SettingType::Uint8 => SettingValue::U8(u8::from_le_bytes(bytes.try_into().ok()?)),
            SettingType::Int8 => SettingValue::I8(i8::from_le_bytes(bytes.try_into().ok()?)),
            SettingType::Uint16 => SettingValue::U16(u16::from_le_bytes(bytes.try_into().ok()?)),
            SettingType::Int16 => SettingValue::I16(i16::from_le_bytes(bytes.try_into().ok()?)),
            SettingType::Uint32 => SettingValue::U32(u32::from_le_bytes(bytes.try_into().ok()?)),
            SettingType::Float => SettingValue::Float(f32::from_le_bytes(bytes.try_into().ok()?)),
        };
        Some(value)
    }

    /// Encode to stored bytes
    pub fn to_le_bytes(&self) -> heapless::Vec<u8, 4> {
        let mut out = heapless::Vec::new();
        // At most 4 bytes, always fits
        let _ = match self {
            SettingValue::U8(v) => out.extend_from_slice(&v.to_le_bytes()),
            SettingValue::I8(v) => out.extend_from_slice(&v.to_le_bytes()),
            SettingValue::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
            SettingValue::I16(v) => out.extend_from_slice(&v.to_le_bytes()),
            SettingValue::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
            SettingValue::Float(v) => out.extend_from_slice(&v.to_le_bytes()),
        };
        out
    }

    /// Build an integer value of the given type
    ///
    /// Returns `None` for floats or when `value` does not fit the type.
    pub fn from_i64(setting_type: SettingType, value: i64) -> Option<Self> {
        let value = match setting_type {
            SettingType::Uint8 => SettingValue::U8(value.try_into().ok()?),
            SettingType::Int8 => SettingValue::I8(value.try_into().ok()?),
            SettingType::Uint16 => SettingValue::U16(value.try_into().ok()?),
            SettingType::Int16 => SettingValue::I16(value.try_into().ok()?),
            SettingType::Uint32 => SettingValue::U32(value.try_into().ok()?),
            SettingType::Float => return None,
        };
        Some(value)
    }

    /// Integer value, `None` for floats
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            SettingValue::U8(v) => Some(i64::from(v)),
            SettingValue::I8(v) => Some(i64::from(v)),
            SettingValue::U16(v) => Some(i64::from(v)),
            SettingValue::I16(v) => Some(i64::from(v)),
            SettingValue::U32(v) => Some(i64::from(v)),
            SettingValue::Float(_) => None,
        }
    }

    /// Value as float
    pub fn as_f32(&self) -> f32 {
        match *self {
            SettingValue::Float(v) => v,
            other => other.as_i64().unwrap_or_default() as f32,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SettingValue::Float(v) => write!(f, "{:.3}", v),
            other => write!(f, "{}", other.as_i64().unwrap_or_default()),
        }
    }
}

/// Typed access to setting values
///
/// # Example
///
/// ```
/// use pico_settings::settings::mock::{MockGroupMemory, MOCK_TABLES};
/// use pico_settings::settings::{SettingValue, SettingsContext, View};
/// use pico_settings_core::traits::MockProfile;
///
/// let mut memory = MockGroupMemory::new();
/// let mut registry = memory.registry();
/// let mut ctx = SettingsContext::new(&MOCK_TABLES, &mut registry, MockProfile::new());
///
/// let looptime = MOCK_TABLES.find("looptime").unwrap();
/// ctx.write(looptime, SettingValue::U16(1000)).unwrap();
/// assert_eq!(ctx.read(looptime, View::Live).unwrap(), SettingValue::U16(1000));
/// assert!(ctx.is_modified(looptime).unwrap());
/// ```
pub struct SettingsContext<'r, 'm, P: ProfileSource> {
    tables: &'static SettingsTables,
    registry: &'r mut PgRegistry<'m>,
    profile: P,
}

impl<'r, 'm, P: ProfileSource> SettingsContext<'r, 'm, P> {
    /// Create a context
    pub fn new(tables: &'static SettingsTables, registry: &'r mut PgRegistry<'m>, profile: P) -> Self {
        Self {
            tables,
            registry,
            profile,
        }
    }

    /// Tables this context resolves against
    pub fn tables(&self) -> &'static SettingsTables {
        self.tables
    }

    /// Parameter group registry
    pub fn registry(&self) -> &PgRegistry<'m> {
        &*self.registry
    }

    /// Parameter group registry for modification
    pub fn registry_mut(&mut self) -> &mut PgRegistry<'m> {
        &mut *self.registry
    }

    /// Profile index settings currently resolve to
    pub fn profile(&self) -> u8 {
        self.profile.config_profile()
    }

    /// Location of a setting's value in the active profile
    pub fn locate(&self, setting: &Setting, view: View) -> Result<ValueLocation, SettingsError> {
        self.tables
            .locate(setting, view, &self.profile)
            .ok_or(SettingsError::UnknownSetting)
    }

    /// Raw stored bytes of a setting
    pub fn read_bytes(&self, setting: &Setting, view: View) -> Result<&[u8], SettingsError> {
        let location = self.locate(setting, view)?;
        Ok(self.registry.read(&location)?)
    }

    /// Typed value of a setting
    pub fn read(&self, setting: &Setting, view: View) -> Result<SettingValue, SettingsError> {
        let bytes = self.read_bytes(setting, view)?;
        // read_bytes returns exactly value_size() bytes
        SettingValue::from_le_bytes(setting.setting_type(), bytes)
            .ok_or(SettingsError::TypeMismatch)
    }

    /// Check a value against a setting's type and bounds
    pub fn check_bounds(&self, setting: &Setting, value: SettingValue) -> Result<(), SettingsError> {
        if value.setting_type() != setting.setting_type() {
            return Err(SettingsError::TypeMismatch);
        }
        let bounds = self.tables.bounds(setting);
        let in_range = match value {
            SettingValue::Float(v) => bounds.contains_f32(v),
            other => other.as_i64().is_some_and(|v| bounds.contains(v)),
        };
        if in_range {
            Ok(())
        } else {
            Err(SettingsError::OutOfRange)
        }
    }

    /// Write a value to the live view after type and bound checks
    pub fn write(&mut self, setting: &Setting, value: SettingValue) -> Result<(), SettingsError> {
        self.check_bounds(setting, value)?;
        let location = self.locate(setting, View::Live)?;
        self.registry.write(&location, &value.to_le_bytes())?;
        Ok(())
    }

    /// Write raw little-endian bytes to the live view
    ///
    /// The bytes are decoded by the setting's type and bound-checked like
    /// [`Self::write`].
    pub fn write_bytes(&mut self, setting: &Setting, bytes: &[u8]) -> Result<SettingValue, SettingsError> {
        let value = SettingValue::from_le_bytes(setting.setting_type(), bytes)
            .ok_or(SettingsError::TypeMismatch)?;
        self.write(setting, value)?;
        Ok(value)
    }

    /// Check if the live value differs from the saved copy
    pub fn is_modified(&self, setting: &Setting) -> Result<bool, SettingsError> {
        let location = self.locate(setting, View::Live)?;
        Ok(self.registry.differs_from_copy(&location)?)
    }

    /// Mark all live values as saved
    pub fn sync_copies(&mut self) {
        self.registry.sync_all_copies();
    }
}
