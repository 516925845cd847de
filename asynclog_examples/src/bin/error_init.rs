// example_error_init — пример с ошибкой инициализации

use asynclog::{info, LogError, Logger, LoggerConfig};

const APP_NAME: &str = "example_error_init";

fn main() {
    // Недоступный путь: каталог вместо файла
    let config = LoggerConfig::new("/").with_app_name(APP_NAME);

    let logger = match Logger::new(config) {
        Ok(l) => l,
        Err(LogError::Open { path, source }) => {
            eprintln!("[FATAL] Failed to open log file {}: {}", path.display(), source);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("[FATAL] Logger initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    // Не достигается
    info!(logger, "This will not be logged");
    logger.stop();
}
