// example_simple — простой пример: инициализация, логи в файл, завершение

use asynclog::{debug, error, info, warning, Logger, LoggerConfig};

const APP_NAME: &str = "example_simple";
const APP_VERSION: &str = "1.0.0";

fn main() {
    // 1. Инициализация: без файла логгера нет
    let config = LoggerConfig::new("logs/simple.log")
        .with_app_name(APP_NAME)
        .with_console(true);
    let logger = match Logger::new(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] Cannot open log file: {}", e);
            std::process::exit(1);
        }
    };

    info!(logger, "Starting {} v{}", APP_NAME, APP_VERSION);

    // 2. Основной код
    debug!(logger, "Processing data block #{}", 1);
    warning!(logger, "Non-critical issue detected");
    error!(logger, "An error occurred, but we continue: code={}", 42);
    debug!(logger, "Processing data block #{} of {}", 2);

    // 3. Финальная часть: явная остановка дописывает очередь
    info!(logger, "Application finished successfully");
    logger.stop();
}
