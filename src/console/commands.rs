//! Command handlers

use core::fmt::Write;

use pico_settings_core::settings::{Setting, SettingConfig, SettingType, View};
use pico_settings_core::traits::ProfileSource;

use super::ConsoleError;
use crate::settings::{SettingValue, SettingsContext, SettingsError};

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", brief: "List commands" },
    CommandDescriptor { name: "get", brief: "Show settings matching a name" },
    CommandDescriptor { name: "set", brief: "Change a setting: set name = value" },
];

/// Get all command names for completion
pub fn command_names() -> impl Iterator<Item = &'static str> + Clone {
    COMMANDS.iter().map(|c| c.name)
}

/// Split a line into command and argument string
pub fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(' ') {
        Some((command, args)) => (command, args.trim_start()),
        None => (line, ""),
    }
}

/// Execute one command line
pub fn execute<P: ProfileSource>(
    ctx: &mut SettingsContext<'_, '_, P>,
    line: &str,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let (command, args) = split_command(line);
    match command {
        "" => Ok(()), // Empty line, do nothing
        "help" => cmd_help(args, out),
        "get" => cmd_get(ctx, args, out),
        "set" => cmd_set(ctx, args, out),
        _ => Err(ConsoleError::UnknownCommand),
    }
}

/// Execute a line and print any error
pub fn process_line<P: ProfileSource>(
    ctx: &mut SettingsContext<'_, '_, P>,
    line: &str,
    out: &mut dyn Write,
) {
    if let Err(e) = execute(ctx, line, out) {
        crate::log_debug!("Console command failed: {}", e.code());
        let _ = writeln!(out, "{}", e);
    }
}

// --- Command Implementations ---

fn cmd_help(args: &str, out: &mut dyn Write) -> Result<(), ConsoleError> {
    if !args.is_empty() {
        // Help for specific command
        let c = COMMANDS
            .iter()
            .find(|c| c.name == args)
            .ok_or(ConsoleError::UnknownCommand)?;
        let _ = writeln!(out, "{}: {}", c.name, c.brief);
    } else {
        for c in COMMANDS {
            let _ = writeln!(out, "  {:<6} {}", c.name, c.brief);
        }
    }
    Ok(())
}

/// `get [query]`: every setting whose name contains `query`, any case
fn cmd_get<P: ProfileSource>(
    ctx: &SettingsContext<'_, '_, P>,
    query: &str,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let tables = ctx.tables();
    let mut matched = 0;
    for setting in tables.iter() {
        if !tables.name_contains(setting, query) {
            continue;
        }
        print_setting(ctx, setting, out)?;
        print_range(ctx, setting, out);
        matched += 1;
    }

    if matched == 0 {
        return Err(ConsoleError::InvalidName);
    }
    Ok(())
}

/// `set name = value`
///
/// Without arguments (or with `*`) every setting is listed; without `=` it
/// behaves like `get`.
fn cmd_set<P: ProfileSource>(
    ctx: &mut SettingsContext<'_, '_, P>,
    args: &str,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if args.is_empty() || args == "*" {
        let _ = writeln!(out, "Current settings:");
        let tables = ctx.tables();
        for setting in tables.iter() {
            print_setting(ctx, setting, out)?;
        }
        return Ok(());
    }

    let Some((name, value)) = args.split_once('=') else {
        return cmd_get(ctx, args, out);
    };
    let name_len = name.trim_end().len();
    let value = value.trim();
    if value.is_empty() {
        return Err(ConsoleError::MissingArg);
    }

    let tables = ctx.tables();
    let setting = tables
        .iter()
        .find(|s| tables.name_exact_match(s, args, name_len))
        .ok_or(ConsoleError::InvalidName)?;

    let parsed = parse_value(ctx, setting, value)?;
    match ctx.write(setting, parsed) {
        Ok(()) => {
            let name = tables.name(setting).map_err(SettingsError::from)?;
            let _ = write!(out, "{} set to ", name);
            write_value(ctx, setting, parsed, out);
            let _ = writeln!(out);
            Ok(())
        }
        Err(SettingsError::OutOfRange) => {
            print_range(ctx, setting, out);
            Err(ConsoleError::OutOfRange)
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse console text for a setting
///
/// Lookup settings take a label (any case); numeric settings parse by type.
fn parse_value<P: ProfileSource>(
    ctx: &SettingsContext<'_, '_, P>,
    setting: &Setting,
    text: &str,
) -> Result<SettingValue, ConsoleError> {
    let setting_type = setting.setting_type();
    if let Some(table) = ctx.tables().lookup_table(setting) {
        let ordinal = table.value_of(text).ok_or(ConsoleError::InvalidValue)?;
        return SettingValue::from_i64(setting_type, ordinal as i64).ok_or(ConsoleError::OutOfRange);
    }

    match setting_type {
        SettingType::Float => text
            .parse::<f32>()
            .map(SettingValue::Float)
            .map_err(|_| ConsoleError::InvalidValue),
        _ => {
            let number = text.parse::<i64>().map_err(|_| ConsoleError::InvalidValue)?;
            SettingValue::from_i64(setting_type, number).ok_or(ConsoleError::OutOfRange)
        }
    }
}

/// Print `name = value`
fn print_setting<P: ProfileSource>(
    ctx: &SettingsContext<'_, '_, P>,
    setting: &Setting,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let tables = ctx.tables();
    let name = tables.name(setting).map_err(SettingsError::from)?;
    let value = ctx.read(setting, View::Live)?;
    let _ = write!(out, "{} = ", name);
    write_value(ctx, setting, value, out);
    let _ = writeln!(out);
    Ok(())
}

/// Print a value, lookup settings by label
fn write_value<P: ProfileSource>(
    ctx: &SettingsContext<'_, '_, P>,
    setting: &Setting,
    value: SettingValue,
    out: &mut dyn Write,
) {
    let label = ctx.tables().lookup_table(setting).and_then(|table| {
        value
            .as_i64()
            .and_then(|v| usize::try_from(v).ok())
            .and_then(|v| table.label(v))
    });
    let _ = match label {
        Some(label) => write!(out, "{}", label),
        None => write!(out, "{}", value),
    };
}

/// Print the allowed range or values of a setting
fn print_range<P: ProfileSource>(
    ctx: &SettingsContext<'_, '_, P>,
    setting: &Setting,
    out: &mut dyn Write,
) {
    let tables = ctx.tables();
    match setting.config {
        SettingConfig::Lookup { .. } => {
            let _ = write!(out, "Allowed values:");
            if let Some(table) = tables.lookup_table(setting) {
                for (ordinal, label) in table.iter() {
                    let sep = if ordinal == 0 { " " } else { ", " };
                    let _ = write!(out, "{}{}", sep, label);
                }
            }
            let _ = writeln!(out);
        }
        SettingConfig::MinMax { .. } => {
            let bounds = tables.bounds(setting);
            let _ = writeln!(out, "Allowed range: {} - {}", bounds.min, bounds.max);
        }
    }
}
