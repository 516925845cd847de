//! Канал для собственных ошибок логгера.
//!
//! Пишет в системный лог (syslog на Linux, Event Log на Windows), а если
//! он недоступен или выключен, то в stderr.

#[cfg(target_os = "linux")]
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

// ===== Системные логгеры (платформозависимо) =====

#[cfg(target_os = "linux")]
type SystemLogger = Mutex<syslog::Logger<syslog::LoggerBackend, syslog::Formatter3164>>;

#[cfg(target_os = "windows")]
type SystemLogger = winlog_rs::EventSource;

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
type SystemLogger = ();

pub(crate) struct Diagnostics {
    app_name: String,
    system_logger: Option<SystemLogger>,
}

impl Diagnostics {
    pub(crate) fn new(app_name: &str, use_system_log: bool) -> Self {
        let system_logger = if use_system_log {
            Self::init_system_logger(app_name)
        } else {
            None
        };
        Diagnostics {
            app_name: app_name.to_owned(),
            system_logger,
        }
    }

    /// Только stderr.
    #[cfg(test)]
    pub(crate) fn stderr(app_name: &str) -> Self {
        Self::new(app_name, false)
    }

    pub(crate) fn has_system_logger(&self) -> bool {
        self.system_logger.is_some()
    }

    #[cfg(target_os = "linux")]
    fn init_system_logger(app_name: &str) -> Option<SystemLogger> {
        let formatter = syslog::Formatter3164 {
            facility: syslog::Facility::LOG_USER,
            hostname: None,
            process: app_name.to_owned(),
            pid: std::process::id(),
        };
        syslog::unix(formatter).ok().map(Mutex::new)
    }

    #[cfg(target_os = "windows")]
    fn init_system_logger(app_name: &str) -> Option<SystemLogger> {
        winlog_rs::EventSource::open(app_name)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    fn init_system_logger(_app_name: &str) -> Option<SystemLogger> {
        None
    }

    pub(crate) fn report(&self, severity: Severity, msg: &str) {
        let delivered = match self.system_logger {
            Some(ref logger) => Self::report_to_system(logger, severity, msg),
            None => false,
        };
        if !delivered {
            eprintln!("[{}] {}: {}", self.app_name, severity.as_str(), msg);
        }
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.report(Severity::Warning, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.report(Severity::Error, msg);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.report(Severity::Info, msg);
    }

    #[cfg(target_os = "linux")]
    fn report_to_system(logger: &SystemLogger, severity: Severity, msg: &str) -> bool {
        let mut logger = logger.lock().unwrap_or_else(PoisonError::into_inner);
        let result = match severity {
            Severity::Info => logger.info(msg),
            Severity::Warning => logger.warning(msg),
            Severity::Error => logger.err(msg),
        };
        result.is_ok()
    }

    #[cfg(target_os = "windows")]
    fn report_to_system(logger: &SystemLogger, severity: Severity, msg: &str) -> bool {
        let kind = match severity {
            Severity::Info => winlog_rs::EventKind::Information,
            Severity::Warning => winlog_rs::EventKind::Warning,
            Severity::Error => winlog_rs::EventKind::Error,
        };
        logger.report(kind, msg)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    fn report_to_system(_logger: &SystemLogger, _severity: Severity, _msg: &str) -> bool {
        false
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("app_name", &self.app_name)
            .field("system_logger", &self.has_system_logger())
            .finish()
    }
}
