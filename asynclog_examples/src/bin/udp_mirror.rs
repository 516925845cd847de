// example_udp — зеркалирование записей по UDP
// Слушатель в отдельном потоке печатает всё, что пришло

use asynclog::{info, warning, Logger, LoggerConfig, DEFAULT_UDP_HOST};
use std::net::UdpSocket;
use std::thread;
use std::time::Duration;

const APP_NAME: &str = "example_udp";

fn main() {
    // 1. Слушатель на свободном порту
    let listener = match UdpSocket::bind((DEFAULT_UDP_HOST, 0)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[FATAL] Cannot bind UDP listener: {}", e);
            std::process::exit(1);
        }
    };
    let port = listener.local_addr().map(|a| a.port()).unwrap_or(0);
    let _ = listener.set_read_timeout(Some(Duration::from_millis(500)));

    let printer = thread::spawn(move || {
        let mut buf = [0u8; 2048];
        while let Ok((n, from)) = listener.recv_from(&mut buf) {
            print!("udp from {}: {}", from, String::from_utf8_lossy(&buf[..n]));
        }
    });

    // 2. Логгер с зеркалом
    let config = LoggerConfig::new("logs/udp.log").with_app_name(APP_NAME);
    let logger = match Logger::new(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] Failed to create log file: {}", e);
            std::process::exit(1);
        }
    };

    // Ошибка зеркала не мешает писать в файл
    if let Err(e) = logger.enable_udp_mirror(DEFAULT_UDP_HOST, port) {
        warning!(logger, "UDP mirror unavailable: {}", e);
    }

    for i in 0..5 {
        info!(logger, "mirrored message {}", i);
    }

    logger.close_udp_mirror();
    info!(logger, "this one stays in the file only");

    // 3. Финальная часть
    logger.stop();
    let _ = printer.join();
}
