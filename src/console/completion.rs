//! Tab completion with cycling

use pico_settings_core::settings::{SettingName, SettingsTables, SETTING_MAX_NAME_LENGTH};

use super::commands::command_names;

/// Tab completion state
///
/// Repeated calls with the same fragment step through the candidates and
/// wrap around after the last one.
#[derive(Debug, Default)]
pub struct Completer {
    /// Fragment being completed (stored for cycle detection)
    fragment: heapless::String<SETTING_MAX_NAME_LENGTH>,
    /// Current match index for cycling
    match_idx: usize,
    /// Whether we're actively cycling
    cycling: bool,
}

impl Completer {
    /// Create new completer
    pub const fn new() -> Self {
        Self {
            fragment: heapless::String::new(),
            match_idx: 0,
            cycling: false,
        }
    }

    /// Complete a command name by prefix
    pub fn complete_command(&mut self, prefix: &str) -> Option<&'static str> {
        let idx = self.next_index(prefix, command_names().filter(|c| c.starts_with(prefix)).count())?;
        command_names().filter(|c| c.starts_with(prefix)).nth(idx)
    }

    /// Complete a setting name
    ///
    /// Any setting whose name contains `fragment` (ignoring case) is a
    /// candidate, in table order.
    pub fn complete_setting(&mut self, tables: &SettingsTables, fragment: &str) -> Option<SettingName> {
        let candidates = || tables.iter().filter(|s| tables.name_contains(s, fragment));
        let idx = self.next_index(fragment, candidates().count())?;
        let setting = candidates().nth(idx)?;
        tables.name(setting).ok()
    }

    /// Reset completion state (call when user types non-tab)
    pub fn reset(&mut self) {
        self.cycling = false;
        self.match_idx = 0;
    }

    fn next_index(&mut self, fragment: &str, match_count: usize) -> Option<usize> {
        if self.fragment.as_str() != fragment {
            // New fragment, start fresh
            self.fragment.clear();
            let _ = self.fragment.push_str(fragment);
            self.match_idx = 0;
            self.cycling = false;
        } else if self.cycling {
            self.match_idx += 1;
        }

        if match_count == 0 {
            self.cycling = false;
            return None;
        }

        // Wrap around
        if self.match_idx >= match_count {
            self.match_idx = 0;
        }

        self.cycling = true;
        Some(self.match_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pico_settings_core::settings::mock::MOCK_TABLES;

    #[test]
    fn test_command_completion() {
        let mut c = Completer::new();
        assert_eq!(c.complete_command("he"), Some("help"));
        assert_eq!(c.complete_command("x"), None);
    }

    #[test]
    fn test_command_cycling() {
        let mut c = Completer::new();
        // "" matches all commands
        assert_eq!(c.complete_command(""), Some("help"));
        assert_eq!(c.complete_command(""), Some("get"));
        assert_eq!(c.complete_command(""), Some("set"));
        assert_eq!(c.complete_command(""), Some("help"));
    }

    #[test]
    fn test_setting_completion_cycles_substring_matches() {
        let mut c = Completer::new();
        assert_eq!(c.complete_setting(&MOCK_TABLES, "ROLL").as_deref(), Some("pid_roll_p_gain"));
        assert_eq!(c.complete_setting(&MOCK_TABLES, "ROLL").as_deref(), Some("pid_roll_i_gain"));
        assert_eq!(c.complete_setting(&MOCK_TABLES, "ROLL").as_deref(), Some("roll_rate"));
        assert_eq!(c.complete_setting(&MOCK_TABLES, "ROLL").as_deref(), Some("pid_roll_p_gain"));
    }

    #[test]
    fn test_reset_restarts_cycle() {
        let mut c = Completer::new();
        assert_eq!(c.complete_setting(&MOCK_TABLES, "lpf").as_deref(), Some("dterm_lpf_hz"));
        c.reset();
        assert_eq!(c.complete_setting(&MOCK_TABLES, "lpf").as_deref(), Some("dterm_lpf_hz"));
        assert_eq!(c.complete_setting(&MOCK_TABLES, "lpf").as_deref(), Some("yaw_lpf_hz"));
        assert_eq!(c.complete_setting(&MOCK_TABLES, "gyro"), None);
    }
}
