//! Logging utilities for the SolverAI CLI
//!
//! Messages go through the `log` crate so that `RUST_LOG` controls what is shown.

use env_logger::Builder;
use log::LevelFilter;

/// Show `info` and above unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .format_target(false)
        .format_timestamp(None);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // Ignored when a logger is already installed.
    let _ = builder.try_init();
}

/// Print an informational message
#[macro_export]
macro_rules! print_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

/// Print a warning message
#[macro_export]
macro_rules! print_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*);
    };
}

/// Print an error message
#[macro_export]
macro_rules! print_err {
    ($($arg:tt)*) => {
        log::error!($($arg)*);
    };
}

/// Print a debug message
#[macro_export]
macro_rules! print_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}
