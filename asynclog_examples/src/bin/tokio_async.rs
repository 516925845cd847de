// example_tokio — асинхронный пример с tokio и shared Logger
// log() не блокируется на I/O, поэтому его можно звать прямо из задач

use asynclog::{debug, error, info, warning, Logger, LoggerConfig};
use std::sync::Arc;
use tokio::task;
use tokio::time::{sleep, Duration};

const APP_NAME: &str = "example_tokio";

// Асинхронный "воркер"
pub struct Worker {
    id: u32,
    log: Arc<Logger>,
}

impl Worker {
    pub fn new(id: u32, log: Arc<Logger>) -> Self {
        Self { id, log }
    }

    pub async fn run(&self) {
        debug!(self.log, "Worker {} started (async)", self.id);

        // Имитация асинхронной работы
        sleep(Duration::from_millis(50 + (self.id as u64) * 100)).await;

        if self.id % 3 == 0 {
            warning!(self.log, "Worker {} has high priority task", self.id);
        }

        if self.id == 2 {
            error!(self.log, "Worker {} failed to process data", self.id);
        }

        debug!(self.log, "Worker {} completed", self.id);
    }
}

#[tokio::main]
async fn main() {
    // 1. Инициализация
    let config = LoggerConfig::new("logs/tokio.log").with_app_name(APP_NAME);
    let logger = match Logger::new(config) {
        Ok(l) => Arc::new(l),
        Err(e) => {
            eprintln!("[FATAL] Failed to open log file: {}", e);
            std::process::exit(1);
        }
    };

    info!(logger, "Tokio runtime initialized, spawning async tasks...");

    // 2. Основной код: запуск нескольких асинхронных задач
    let mut handles = vec![];
    for i in 0..5 {
        let log = Arc::clone(&logger);
        handles.push(task::spawn(async move {
            Worker::new(i, log).run().await;
        }));
    }

    for h in handles {
        let _ = h.await;
    }

    info!(logger, "All async tasks completed");

    // 3. Финальная часть: join фонового потока блокирует, уводим с рантайма
    let log = Arc::clone(&logger);
    let _ = task::spawn_blocking(move || log.stop()).await;
}
