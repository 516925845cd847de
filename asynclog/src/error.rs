use std::io;
use std::path::PathBuf;

/// Ошибки настройки логгера.
///
/// Сам вызов `log()` ошибок не возвращает: сбои записи уходят в
/// диагностический канал и статистику.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid UDP mirror address {addr}: {reason}")]
    Address { addr: String, reason: String },

    #[error("failed to create UDP socket: {0}")]
    Socket(#[source] io::Error),

    #[error("failed to spawn log worker: {0}")]
    Spawn(#[source] io::Error),

    #[error("logger is stopped")]
    Stopped,

    #[error("global logger is already initialized")]
    AlreadyInitialized,
}

pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_mentions_path() {
        let err = LogError::Open {
            path: PathBuf::from("/nope/app.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("/nope/app.log"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error as _;

        let err = LogError::Socket(io::Error::new(io::ErrorKind::AddrInUse, "busy"));
        assert!(err.source().is_some());
        assert!(LogError::Stopped.source().is_none());
    }
}
