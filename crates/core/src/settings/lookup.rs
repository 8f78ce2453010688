//! Name lookup
//!
//! Names are decoded on demand into a stack buffer; nothing here allocates
//! or caches.

use super::descriptor::Setting;
use super::table::SettingsTables;

/// Case-insensitive ASCII substring search
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

impl SettingsTables {
    /// Find the setting whose decoded name equals `name` exactly
    ///
    /// The comparison is case-sensitive. Descriptors whose name fails to
    /// decode never match.
    pub fn find(&self, name: &str) -> Option<&Setting> {
        self.settings
            .iter()
            .find(|setting| self.name(setting).is_ok_and(|n| n.as_str() == name))
    }

    /// Table position of the setting named `name`
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.settings
            .iter()
            .position(|setting| self.name(setting).is_ok_and(|n| n.as_str() == name))
    }

    /// Check if `query` occurs anywhere in the setting's name, ignoring case
    ///
    /// An empty query matches every setting.
    pub fn name_contains(&self, setting: &Setting, query: &str) -> bool {
        self.name(setting)
            .is_ok_and(|name| contains_ignore_ascii_case(&name, query))
    }

    /// Check a command line against a setting's name
    ///
    /// Matches when the first `name.len()` bytes of `cmdline` equal the name
    /// ignoring case and `declared_len` (the length the caller parsed out of
    /// the command line) equals the name length, so `rc_rate` does not match
    /// a setting called `rc_rate_expo` or `rc`.
    pub fn name_exact_match(&self, setting: &Setting, cmdline: &str, declared_len: usize) -> bool {
        let Ok(name) = self.name(setting) else {
            return false;
        };
        declared_len == name.len()
            && cmdline
                .as_bytes()
                .get(..name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name.as_bytes()))
    }
}
