//! example_rotation — демонстрация ротации логов по размеру

use asynclog::{debug, error, info, warning, Logger, LoggerConfig};
use std::thread;
use std::time::Duration;

const APP_NAME: &str = "example_rotation";

// Маленький максимальный размер — чтобы ротация сработала быстро
const MAX_LOG_SIZE: u64 = 4096; // 4 КБ

fn main() {
    // 1. Инициализация
    let config = LoggerConfig::new("logs/rotation.log")
        .with_app_name(APP_NAME)
        .with_max_file_size(MAX_LOG_SIZE);
    let logger = match Logger::new(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] Failed to create log file: {}", e);
            std::process::exit(1);
        }
    };

    info!(logger, "Logger initialized with max_size={} bytes", MAX_LOG_SIZE);

    // 2. Основной код: генерируем много логов
    for i in 0..300 {
        debug!(logger, "This is a debug message number {}", i);
        if i % 30 == 0 {
            warning!(logger, "Warning message at iteration {}", i);
        }
        if i % 35 == 0 {
            error!(logger, "Error message at iteration {}", i);
        }

        thread::sleep(Duration::from_millis(2));
    }

    // 3. Финальная часть
    logger.stop();
    let stats = logger.stats();
    println!(
        "{} rotations, files: logs/rotation.log, logs/rotation.log_0.log .. logs/rotation.log_{}.log",
        stats.rotations,
        stats.rotations.saturating_sub(1)
    );
}
