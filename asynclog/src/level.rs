use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::LogError;

// ===== Уровни логгирования =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warning, Level::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    fn from_index(index: usize) -> Level {
        Self::ALL.get(index).copied().unwrap_or(Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            other => Err(LogError::Config(format!("unknown log level: {other:?}"))),
        }
    }
}

// ===== Порог фильтрации =====

/// Минимальный уровень, меняется на лету из любого потока.
#[derive(Debug)]
pub(crate) struct LevelFilter(AtomicUsize);

impl LevelFilter {
    pub(crate) fn new(level: Level) -> Self {
        LevelFilter(AtomicUsize::new(level as usize))
    }

    pub(crate) fn set(&self, level: Level) {
        self.0.store(level as usize, Ordering::SeqCst);
    }

    pub(crate) fn get(&self) -> Level {
        Level::from_index(self.0.load(Ordering::SeqCst))
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        (level as usize) >= self.0.load(Ordering::SeqCst)
    }
}
