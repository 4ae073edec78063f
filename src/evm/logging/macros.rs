//! Structured logging macros.
//!
//! - `log_info!("Message")`
//! - `log_debug!("Disassembled bytecode", bytes = 42, lines = 7)`

/// Log a debug message with optional structured fields
#[macro_export]
macro_rules! log_debug {
    ($msg:expr) => {
        tracing::debug!($msg)
    };
    ($msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!($($key = $value),+, $msg)
    };
}

/// Log an info message with optional structured fields
#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        tracing::info!($msg)
    };
    ($msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!($($key = $value),+, $msg)
    };
}

/// Log a warning with optional structured fields
#[macro_export]
macro_rules! log_warn {
    ($msg:expr) => {
        tracing::warn!($msg)
    };
    ($msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::warn!($($key = $value),+, $msg)
    };
}

/// Log an error with optional structured fields
#[macro_export]
macro_rules! log_error {
    ($msg:expr) => {
        tracing::error!($msg)
    };
    ($msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::error!($($key = $value),+, $msg)
    };
}
