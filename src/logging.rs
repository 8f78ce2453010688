//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`defmt` feature): Uses defmt
//! - Host tests: Uses println!
//! - Host non-test: No-op, arguments are still type-checked
//!
//! Arguments must be formattable by both backends: stick to integers,
//! `&str` and `bool` (use `.as_str()` on heapless strings).

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[TRACE] {}", format!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
