// example_workers — многопоточный пример с "классом" Worker
// Каждый поток — экземпляр структуры Worker, которой передаётся клон логгера

use asynclog::{debug, error, info, warning, Logger, LoggerConfig};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const APP_NAME: &str = "example_workers";
const WORKERS: u32 = 4;

// Структура, моделирующая "класс" потока
pub struct Worker {
    id: u32,
    log: Arc<Logger>, // один логгер на всех
}

impl Worker {
    pub fn new(id: u32, log: Arc<Logger>) -> Self {
        Self { id, log }
    }

    pub fn run(&self) {
        debug!(self.log, "Worker {} started execution", self.id);

        // Имитация работы
        thread::sleep(Duration::from_millis(50 + (self.id as u64) * 100));

        if self.id % 2 == 1 {
            warning!(self.log, "Worker {} detected odd workload", self.id);
        }

        // Имитация ошибки у одного из воркеров
        if self.id == 2 {
            error!(self.log, "Worker {} encountered a transient error", self.id);
        }

        debug!(self.log, "Worker {} finished", self.id);
    }
}

fn main() {
    // 1. Инициализация
    let config = LoggerConfig::new("logs/workers.log").with_app_name(APP_NAME);
    let logger = match Logger::new(config) {
        Ok(l) => Arc::new(l),
        Err(e) => {
            eprintln!("[FATAL] Failed to create log file: {}", e);
            std::process::exit(1);
        }
    };

    info!(logger, "Main thread initialized, spawning {} workers...", WORKERS);

    // 2. Основной код: создание потоков с объектами Worker
    let handles: Vec<_> = (0..WORKERS)
        .map(|i| {
            let log = Arc::clone(&logger);
            thread::spawn(move || Worker::new(i, log).run())
        })
        .collect();

    for h in handles {
        let _ = h.join();
    }

    info!(logger, "All workers have finished");

    // 3. Финальная часть
    logger.stop();
    let stats = logger.stats();
    println!(
        "written: {} records, {} bytes",
        stats.records_written, stats.bytes_written
    );
}
