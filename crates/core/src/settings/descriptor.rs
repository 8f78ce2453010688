//! Setting descriptors
//!
//! One descriptor per tunable value. Descriptors carry no name string and no
//! bounds of their own: the name is a run of dictionary indices and the
//! bounds are indices into the shared pools.

use super::codec::EncodedName;
use bitflags::bitflags;

/// Value type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SettingType {
    /// Unsigned 8-bit integer
    Uint8 = 0,
    /// Signed 8-bit integer
    Int8 = 1,
    /// Unsigned 16-bit integer
    Uint16 = 2,
    /// Signed 16-bit integer
    Int16 = 3,
    /// Unsigned 32-bit integer
    Uint32 = 4,
    /// 32-bit float
    Float = 5,
}

impl SettingType {
    /// Decode a type tag
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(SettingType::Uint8),
            1 => Some(SettingType::Int8),
            2 => Some(SettingType::Uint16),
            3 => Some(SettingType::Int16),
            4 => Some(SettingType::Uint32),
            5 => Some(SettingType::Float),
            _ => None,
        }
    }

    /// Size of a stored value in bytes
    pub const fn size(self) -> usize {
        match self {
            SettingType::Uint8 | SettingType::Int8 => 1,
            SettingType::Uint16 | SettingType::Int16 => 2,
            SettingType::Uint32 | SettingType::Float => 4,
        }
    }

    /// Representable integer range, `None` for floats
    pub const fn range(self) -> Option<(i64, i64)> {
        match self {
            SettingType::Uint8 => Some((0, u8::MAX as i64)),
            SettingType::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            SettingType::Uint16 => Some((0, u16::MAX as i64)),
            SettingType::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            SettingType::Uint32 => Some((0, u32::MAX as i64)),
            SettingType::Float => None,
        }
    }
}

/// Storage duplication policy of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SettingSection {
    /// Single global instance
    Master = 0,
    /// One instance per PID profile
    Profile = 1,
    /// One instance per control rate profile
    ControlRate = 2,
}

impl SettingSection {
    /// Decode a section tag
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(SettingSection::Master),
            1 => Some(SettingSection::Profile),
            2 => Some(SettingSection::ControlRate),
            _ => None,
        }
    }
}

/// How a setting's allowed values are described
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SettingMode {
    /// Numeric range from the min/max pools
    Value = 0,
    /// Enumeration from a lookup table
    Lookup = 1,
}

bitflags! {
    /// Packed type and section tags of a descriptor
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SettingKind: u8 {
        /// Value type tag (`SettingType`)
        const TYPE_MASK = 0b0000_0111;
        /// Storage section tag (`SettingSection`)
        const SECTION_MASK = 0b0001_1000;
    }
}

impl SettingKind {
    const SECTION_SHIFT: u32 = 3;

    /// Pack a type and a section
    pub const fn new(setting_type: SettingType, section: SettingSection) -> Self {
        Self::from_bits_retain(setting_type as u8 | ((section as u8) << Self::SECTION_SHIFT))
    }

    /// Raw type tag
    pub const fn type_tag(self) -> u8 {
        self.bits() & Self::TYPE_MASK.bits()
    }

    /// Raw section tag
    pub const fn section_tag(self) -> u8 {
        (self.bits() & Self::SECTION_MASK.bits()) >> Self::SECTION_SHIFT
    }

    /// Value type
    ///
    /// # Panics
    ///
    /// Panics on a tag outside `SettingType`. Tables are checked for this
    /// when they are installed, so reaching it means corrupted table data.
    pub fn setting_type(self) -> SettingType {
        match SettingType::from_tag(self.type_tag()) {
            Some(setting_type) => setting_type,
            None => unreachable!("malformed setting type tag {}", self.type_tag()),
        }
    }

    /// Storage section
    ///
    /// # Panics
    ///
    /// Panics on a tag outside `SettingSection`, see [`Self::setting_type`].
    pub fn section(self) -> SettingSection {
        match SettingSection::from_tag(self.section_tag()) {
            Some(section) => section,
            None => unreachable!("malformed setting section tag {}", self.section_tag()),
        }
    }
}

/// Bound references of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingConfig {
    /// Values come from `BoundPools::lookups[table]`
    Lookup {
        /// Lookup table index
        table: u8,
    },
    /// Range from `BoundPools::min[min]..=BoundPools::max[max]`
    MinMax {
        /// Min pool index
        min: u8,
        /// Max pool index
        max: u8,
    },
}

/// Static descriptor of one setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    /// Dictionary-encoded name
    pub encoded_name: EncodedName,
    /// Packed type and section
    pub kind: SettingKind,
    /// Bound references
    pub config: SettingConfig,
    /// Byte offset inside the parameter group structure
    pub offset: u16,
}

impl Setting {
    /// Create a value-mode descriptor
    pub const fn value(
        encoded_name: EncodedName,
        setting_type: SettingType,
        section: SettingSection,
        offset: u16,
        min: u8,
        max: u8,
    ) -> Self {
        Self {
            encoded_name,
            kind: SettingKind::new(setting_type, section),
            config: SettingConfig::MinMax { min, max },
            offset,
        }
    }

    /// Create a lookup-mode descriptor
    pub const fn lookup(
        encoded_name: EncodedName,
        setting_type: SettingType,
        section: SettingSection,
        offset: u16,
        table: u8,
    ) -> Self {
        Self {
            encoded_name,
            kind: SettingKind::new(setting_type, section),
            config: SettingConfig::Lookup { table },
            offset,
        }
    }

    /// Value type
    pub fn setting_type(&self) -> SettingType {
        self.kind.setting_type()
    }

    /// Storage section
    pub fn section(&self) -> SettingSection {
        self.kind.section()
    }

    /// Bound mode
    pub fn mode(&self) -> SettingMode {
        match self.config {
            SettingConfig::Lookup { .. } => SettingMode::Lookup,
            SettingConfig::MinMax { .. } => SettingMode::Value,
        }
    }

    /// Size of the stored value in bytes (1, 2 or 4)
    pub fn value_size(&self) -> usize {
        self.setting_type().size()
    }
}
