use once_cell::sync::OnceCell;

use crate::error::{LogError, Result};
use crate::logger::{Logger, LoggerConfig};

// ===== Глобальный логгер =====

// Необязательное удобство для g*-макросов. Основной путь: свой экземпляр
// и `Arc<Logger>`.
static GLOBAL_LOGGER: OnceCell<Logger> = OnceCell::new();

/// Создаёт глобальный логгер. Второй вызов вернёт `AlreadyInitialized`,
/// файл при этом не открывается.
pub fn init_global(config: LoggerConfig) -> Result<&'static Logger> {
    let mut created = false;
    let logger = GLOBAL_LOGGER.get_or_try_init(|| {
        created = true;
        Logger::new(config)
    })?;
    if created {
        Ok(logger)
    } else {
        Err(LogError::AlreadyInitialized)
    }
}

pub fn global() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

/// Статики не разрушаются, поэтому перед выходом из процесса это нужно
/// вызвать явно, иначе хвост очереди не попадёт в файл.
pub fn shutdown_global() {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger.stop();
    }
}

// ===== Глобальные макросы =====

#[macro_export]
macro_rules! gdebug {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::global() {
            $crate::debug!(logger, $($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! ginfo {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::global() {
            $crate::info!(logger, $($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! gwarning {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::global() {
            $crate::warning!(logger, $($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! gerror {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::global() {
            $crate::error!(logger, $($arg)*);
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Один тест на весь процесс: OnceCell не сбрасывается.
    #[test]
    fn test_global_lifecycle() {
        // до инициализации макросы молчат
        crate::ginfo!("nobody hears this {}", 1);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("global.log");
        let config = LoggerConfig::new(&path).with_system_log(false);

        let logger = init_global(config.clone()).unwrap();
        assert!(std::ptr::eq(logger, global().unwrap()));
        assert!(matches!(
            init_global(config),
            Err(LogError::AlreadyInitialized)
        ));

        crate::gdebug!("debug {}", 1);
        crate::ginfo!("info {}", 2);
        crate::gwarning!("warning {}", 3);
        crate::gerror!("error {}", 4);
        shutdown_global();
        shutdown_global();

        let content = fs::read_to_string(&path).unwrap();
        let messages: Vec<&str> = content
            .lines()
            .map(|l| l.rsplit('\t').next().unwrap())
            .collect();
        assert_eq!(messages, ["debug 1", "info 2", "warning 3", "error 4"]);
    }
}
