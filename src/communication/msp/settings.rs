//! MSP Settings Command Handler
//!
//! Implements the settings commands used by configurators.
//!
//! # Supported Commands
//!
//! - **MSP2_COMMON_SETTING**: Raw value bytes of one setting
//! - **MSP2_COMMON_SET_SETTING**: Type-decode, bound-check and store a value
//! - **MSP2_COMMON_SETTING_INFO**: Metadata, lookup labels and value
//! - **MSP2_COMMON_PG_LIST**: Setting index range of each parameter group
//!
//! # Setting references
//!
//! Requests address a setting either by name (NUL-terminated) or by table
//! index: a single `0` byte followed by a u16 index.

use pico_settings_core::settings::{Setting, SettingSection, SettingsTables, View};
use pico_settings_core::traits::ProfileSource;

use super::sbuf::{ReadBuf, StreamBuf};
use super::MspError;
use crate::settings::{SettingsContext, SettingsError};

/// Byte written after each name in a bulk name listing
pub const SETTING_NAME_SUFFIX: u8 = b';';

/// Fixed part of a SETTING_INFO reply after the name
/// (pgn, type, section, mode, min, max, index, profile, profile count)
const SETTING_INFO_FIXED_SIZE: usize = 2 + 1 + 1 + 1 + 4 + 4 + 2 + 1 + 1;

/// Size of one PG_LIST entry (pgn, first index, last index)
const PG_LIST_ENTRY_SIZE: usize = 6;

/// Write every setting name followed by [`SETTING_NAME_SUFFIX`]
///
/// The total length is computed first; if it does not fit, nothing is
/// written and `BufferTooSmall` is returned. Returns the bytes written.
pub fn serialize_setting_names(
    tables: &SettingsTables,
    dst: &mut StreamBuf<'_>,
) -> Result<usize, MspError> {
    let mut total = 0;
    for setting in tables.iter() {
        let name = tables.name(setting).map_err(SettingsError::from)?;
        total += name.len() + 1;
    }

    if dst.bytes_remaining() < total {
        return Err(MspError::BufferTooSmall);
    }

    for setting in tables.iter() {
        let name = tables.name(setting).map_err(SettingsError::from)?;
        dst.write_data(name.as_bytes())?;
        dst.write_u8(SETTING_NAME_SUFFIX)?;
    }
    Ok(total)
}

/// Settings command handler
///
/// Owns a [`SettingsContext`], so every command resolves profile-duplicated
/// settings against the context's profile source.
pub struct SettingsMspHandler<'r, 'm, P: ProfileSource> {
    ctx: SettingsContext<'r, 'm, P>,
}

impl<'r, 'm, P: ProfileSource> SettingsMspHandler<'r, 'm, P> {
    /// Create a handler
    pub fn new(ctx: SettingsContext<'r, 'm, P>) -> Self {
        Self { ctx }
    }

    /// Settings context
    pub fn context(&self) -> &SettingsContext<'r, 'm, P> {
        &self.ctx
    }

    /// Settings context for modification
    pub fn context_mut(&mut self) -> &mut SettingsContext<'r, 'm, P> {
        &mut self.ctx
    }

    /// Parse a setting reference (name or `0` + u16 index)
    fn read_setting_ref(&self, src: &mut ReadBuf<'_>) -> Result<&'static Setting, MspError> {
        let tables = self.ctx.tables();
        if src.peek_u8() == Some(0) {
            src.read_u8()?;
            let index = src.read_u16()?;
            tables
                .get(usize::from(index))
                .ok_or(MspError::UnknownSetting)
        } else {
            let name = src.read_string_nul()?;
            tables.find(name).ok_or(MspError::UnknownSetting)
        }
    }

    /// Handle MSP2_COMMON_SETTING
    ///
    /// Replies with the raw little-endian value of the live view.
    pub fn handle_setting(
        &self,
        src: &mut ReadBuf<'_>,
        dst: &mut StreamBuf<'_>,
    ) -> Result<(), MspError> {
        let setting = self.read_setting_ref(src)?;
        let bytes = self.ctx.read_bytes(setting, View::Live)?;
        dst.write_data(bytes)
    }

    /// Handle MSP2_COMMON_SET_SETTING
    ///
    /// The value follows the setting reference and must be exactly the
    /// setting's value size.
    pub fn handle_set_setting(&mut self, src: &mut ReadBuf<'_>) -> Result<(), MspError> {
        let setting = self.read_setting_ref(src)?;
        let bytes = src.read_data(setting.value_size())?;
        if src.bytes_remaining() != 0 {
            return Err(MspError::InvalidRequest);
        }
        self.ctx.write_bytes(setting, bytes)?;
        Ok(())
    }

    /// Handle MSP2_COMMON_SETTING_INFO
    pub fn handle_setting_info(
        &self,
        src: &mut ReadBuf<'_>,
        dst: &mut StreamBuf<'_>,
    ) -> Result<(), MspError> {
        let tables = self.ctx.tables();
        let setting = self.read_setting_ref(src)?;
        let name = tables.name(setting).map_err(SettingsError::from)?;
        let pgn = tables.pgn(setting).ok_or(MspError::UnknownSetting)?;
        let index = tables.index_of(setting).ok_or(MspError::UnknownSetting)?;
        let bounds = tables.bounds(setting);
        let lookup = tables.lookup_table(setting);
        let value = self.ctx.read_bytes(setting, View::Live)?;

        let (profile, profile_count) = match setting.section() {
            SettingSection::Master => (0, 0),
            SettingSection::Profile => (
                self.ctx.profile(),
                tables.profiles.pid_profile_count,
            ),
            SettingSection::ControlRate => (
                self.ctx.profile(),
                tables.profiles.control_rate_profile_count,
            ),
        };

        let labels_size: usize = lookup
            .map(|table| table.iter().map(|(_, label)| label.len() + 1).sum())
            .unwrap_or(0);
        let total = name.len() + 1 + SETTING_INFO_FIXED_SIZE + labels_size + value.len();
        if dst.bytes_remaining() < total {
            return Err(MspError::BufferTooSmall);
        }

        dst.write_string_nul(&name)?;
        dst.write_u16(pgn.0)?;
        dst.write_u8(setting.kind.type_tag())?;
        dst.write_u8(setting.kind.section_tag())?;
        dst.write_u8(setting.mode() as u8)?;
        dst.write_i32(bounds.min)?;
        dst.write_u32(bounds.max)?;
        dst.write_u16(index as u16)?;
        dst.write_u8(profile)?;
        dst.write_u8(profile_count)?;
        if let Some(table) = lookup {
            for (_, label) in table.iter() {
                dst.write_string_nul(label)?;
            }
        }
        dst.write_data(value)
    }

    /// Handle MSP2_COMMON_PG_LIST
    ///
    /// With a u16 group id in the request only that group is listed,
    /// otherwise every group owning at least one setting. Each entry is
    /// the group id and the first and last (inclusive) table index.
    pub fn handle_pg_list(
        &self,
        src: &mut ReadBuf<'_>,
        dst: &mut StreamBuf<'_>,
    ) -> Result<(), MspError> {
        let tables = self.ctx.tables();
        let filter = if src.bytes_remaining() >= 2 {
            Some(src.read_u16()?)
        } else {
            None
        };

        let wanted = |pgn: u16| filter.is_none_or(|f| f == pgn);
        let entries = tables
            .pg_counts
            .iter()
            .filter(|entry| entry.count > 0 && wanted(entry.pgn.0))
            .count();

        if let Some(pgn) = filter {
            if entries == 0 {
                return Err(MspError::UnknownGroup(pgn));
            }
        }
        if dst.bytes_remaining() < entries * PG_LIST_ENTRY_SIZE {
            return Err(MspError::BufferTooSmall);
        }

        for entry in tables.pg_counts.iter().filter(|e| e.count > 0) {
            if !wanted(entry.pgn.0) {
                continue;
            }
            let Some(range) = tables.pg_range(entry.pgn) else {
                continue;
            };
            dst.write_u16(entry.pgn.0)?;
            dst.write_u16(range.start as u16)?;
            dst.write_u16((range.end - 1) as u16)?;
        }
        Ok(())
    }
}
