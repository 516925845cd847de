//! # asynclog
//!
//! Асинхронный логгер: вызывающие потоки только форматируют строку и кладут
//! её в очередь, один фоновый поток пишет в файл с ротацией по размеру и,
//! при желании, дублирует каждую запись UDP-датаграммой.
//!
//! ```no_run
//! use asynclog::{error, info, Logger, LoggerConfig};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(Logger::new(
//!     LoggerConfig::new("logs/app.log").with_max_file_size(4096),
//! )?);
//! logger.enable_udp_mirror("127.0.0.1", 9990)?;
//!
//! info!(logger, "user {} logged in from {}", "alice", "10.0.0.7");
//! error!(logger, "{} {} {}", "only one");      // -> "only one {} {}"
//! info!(logger, "no placeholders", 1, 2);       // -> "no placeholders 1 2"
//!
//! logger.stop();
//! # Ok::<(), asynclog::LogError>(())
//! ```

mod diagnostics;
mod error;
mod format;
mod global;
mod level;
mod logger;
mod prefix;
mod queue;
mod rotator;
mod stats;
mod udp;
mod worker;

pub use error::{LogError, Result};
pub use format::{format_message, LogRecord};
pub use global::{global, init_global, shutdown_global};
pub use level::Level;
pub use logger::{Logger, LoggerConfig, DEFAULT_APP_NAME, DEFAULT_LOG_FILE};
pub use prefix::location_prefix;
pub use queue::{Popped, RecordQueue};
pub use rotator::{FileRotator, DEFAULT_MAX_FILE_SIZE};
pub use stats::{LogStats, LogStatsSnapshot};
pub use udp::{UdpSink, UdpTarget, DEFAULT_UDP_HOST, DEFAULT_UDP_PORT};
pub use worker::{ShutdownPolicy, WorkerState};

// ===== Макросы =====

/// Аргументы приводятся к строке через `Display` и подставляются в `{}`.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        $logger.log($level, $template, &[$(&$arg as &dyn ::std::fmt::Display),*]);
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)*)
    };
}
