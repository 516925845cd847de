use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use crate::diagnostics::Diagnostics;
use crate::error::{LogError, Result};
use crate::format::{format_message, LogRecord};
use crate::level::{Level, LevelFilter};
use crate::queue::RecordQueue;
use crate::rotator::{FileRotator, DEFAULT_MAX_FILE_SIZE};
use crate::stats::{LogStats, LogStatsSnapshot};
use crate::udp::UdpTarget;
use crate::worker::{Entry, LogWorker, ShutdownPolicy, StateCell, WorkerState};

pub const DEFAULT_LOG_FILE: &str = "log.txt";
pub const DEFAULT_APP_NAME: &str = "asynclog";

// ===== Настройки =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Базовый файл, открывается на дозапись.
    pub path: PathBuf,
    /// Дублировать записи в stdout.
    pub to_console: bool,
    /// Порог ротации в байтах.
    pub max_file_size: u64,
    pub min_level: Level,
    pub shutdown_policy: ShutdownPolicy,
    /// Имя источника для диагностических сообщений.
    pub app_name: String,
    /// Диагностика в syslog / Event Log, иначе только stderr.
    pub system_log: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            path: PathBuf::from(DEFAULT_LOG_FILE),
            to_console: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            min_level: Level::Debug,
            shutdown_policy: ShutdownPolicy::Flush,
            app_name: DEFAULT_APP_NAME.to_owned(),
            system_log: true,
        }
    }
}

impl LoggerConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        LoggerConfig {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_console(mut self, to_console: bool) -> Self {
        self.to_console = to_console;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_shutdown_policy(mut self, policy: ShutdownPolicy) -> Self {
        self.shutdown_policy = policy;
        self
    }

    pub fn with_app_name(mut self, app_name: &str) -> Self {
        self.app_name = app_name.to_owned();
        self
    }

    pub fn with_system_log(mut self, enabled: bool) -> Self {
        self.system_log = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(LogError::Config("log file path is empty".into()));
        }
        if self.max_file_size == 0 {
            return Err(LogError::Config(
                "max_file_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

// ===== Основной логгер =====

/// Точка входа: форматирует в потоке вызывающего и отдаёт строку в
/// очередь, пишет фоновый поток.
///
/// Создаётся один раз и раздаётся через `Arc<Logger>`:
///
/// ```no_run
/// use asynclog::{info, Logger, LoggerConfig};
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::new(LoggerConfig::new("logs/app.log"))?);
/// info!(logger, "started with {} workers", 4);
/// logger.stop();
/// # Ok::<(), asynclog::LogError>(())
/// ```
pub struct Logger {
    path: PathBuf,
    queue: Arc<RecordQueue<Entry>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_state: Arc<StateCell>,
    exit_flag: AtomicBool,
    min_level: LevelFilter,
    stats: Arc<LogStats>,
    diagnostics: Arc<Diagnostics>,
}

impl Logger {
    /// Открывает файл и запускает фоновый поток. Если файл не открылся,
    /// логгера нет: никакого «деградированного» режима.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        config.validate()?;

        let diagnostics = Arc::new(Diagnostics::new(&config.app_name, config.system_log));
        let rotator = FileRotator::open(&config.path, config.max_file_size).map_err(|source| {
            LogError::Open {
                path: config.path.clone(),
                source,
            }
        })?;

        let queue = Arc::new(RecordQueue::new());
        let stats = Arc::new(LogStats::new());
        let worker = LogWorker::new(
            Arc::clone(&queue),
            rotator,
            Arc::clone(&stats),
            Arc::clone(&diagnostics),
        )
        .with_console(config.to_console)
        .with_policy(config.shutdown_policy);
        let worker_state = worker.state();
        let handle = worker.spawn().map_err(LogError::Spawn)?;

        Ok(Logger {
            path: config.path,
            queue,
            worker: Mutex::new(Some(handle)),
            worker_state,
            exit_flag: AtomicBool::new(false),
            min_level: LevelFilter::new(config.min_level),
            stats,
            diagnostics,
        })
    }

    /// Настройки по умолчанию, только свой путь.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(LoggerConfig::new(path))
    }

    pub fn log(&self, level: Level, template: &str, args: &[&dyn Display]) {
        if !self.min_level.enabled(level) {
            return;
        }
        if self.exit_flag.load(Ordering::Acquire) {
            self.stats.record_dropped(1);
            return;
        }
        let message = format_message(template, args);
        // очередь могли закрыть между проверкой флага и вставкой
        if !self.queue.push_if_open(Entry::Record(LogRecord::now(level, &message))) {
            self.stats.record_dropped(1);
        }
    }

    pub fn debug(&self, template: &str, args: &[&dyn Display]) {
        self.log(Level::Debug, template, args);
    }

    pub fn info(&self, template: &str, args: &[&dyn Display]) {
        self.log(Level::Info, template, args);
    }

    pub fn warning(&self, template: &str, args: &[&dyn Display]) {
        self.log(Level::Warning, template, args);
    }

    pub fn error(&self, template: &str, args: &[&dyn Display]) {
        self.log(Level::Error, template, args);
    }

    /// Включает UDP-зеркало. Сокет создаётся здесь, в потоке вызывающего;
    /// при ошибке зеркало выключается, ошибка уходит и в диагностику.
    pub fn enable_udp_mirror(&self, ip: &str, port: u16) -> Result<()> {
        if self.is_stopped() {
            return Err(LogError::Stopped);
        }
        match UdpTarget::connect(ip, port) {
            Ok(target) => {
                if self.queue.push_if_open(Entry::Mirror(target)) {
                    Ok(())
                } else {
                    Err(LogError::Stopped)
                }
            }
            Err(e) => {
                self.queue.push_if_open(Entry::CloseMirror);
                self.diagnostics
                    .warning(&format!("UDP mirror disabled: {}", e));
                Err(e)
            }
        }
    }

    pub fn close_udp_mirror(&self) {
        self.queue.push_if_open(Entry::CloseMirror);
    }

    /// Останавливает фоновый поток и ждёт его.
    ///
    /// Порядок: флаг выхода, закрытие очереди, дописывание (или сброс)
    /// остатка, join. Файл и сокет закрывает сам поток перед выходом.
    /// Повторные и параллельные вызовы возвращаются только после того,
    /// как поток завершился.
    pub fn stop(&self) {
        self.exit_flag.store(true, Ordering::Release);
        self.queue.shutdown();

        // блокировка держится на время join: остальные ждут здесь
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = worker.take() {
            if handle.join().is_err() {
                self.diagnostics.error("log worker panicked");
            }
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.exit_flag.load(Ordering::Acquire)
    }

    pub fn set_min_level(&self, level: Level) {
        self.min_level.set(level);
    }

    pub fn min_level(&self) -> Level {
        self.min_level.get()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Сколько элементов ещё ждёт фоновый поток.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn worker_state(&self) -> WorkerState {
        self.worker_state.get()
    }

    pub fn stats(&self) -> LogStatsSnapshot {
        self.stats.snapshot()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("min_level", &self.min_level())
            .field("worker_state", &self.worker_state())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
