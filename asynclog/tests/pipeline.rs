use asynclog::{info, LogRecord, Level, Logger, LoggerConfig, ShutdownPolicy, WorkerState};
use std::collections::HashMap;
use std::fs;
use std::net::UdpSocket;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn config(dir: &TempDir, name: &str) -> LoggerConfig {
    LoggerConfig::new(dir.path().join(name)).with_system_log(false)
}

fn message(line: &str) -> &str {
    line.rsplit('\t').next().unwrap()
}

fn rotated(base: &Path, index: u64) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!("_{}.log", index));
    PathBuf::from(name)
}

// ========================================================================
// Concurrency
// ========================================================================

#[test]
fn test_many_producers_every_record_persisted_in_fifo_order() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 500;

    let dir = TempDir::new().unwrap();
    let logger = Arc::new(Logger::new(config(&dir, "stress.log")).unwrap());

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    info!(logger, "producer={} seq={}", p, seq);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    logger.stop();

    let content = fs::read_to_string(logger.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), PRODUCERS * PER_PRODUCER);

    let mut next: HashMap<usize, usize> = HashMap::new();
    for line in lines {
        assert!(line.starts_with("[INFO]\t["), "bad line: {}", line);
        let (p, seq) = parse(message(line));
        let expected = next.entry(p).or_insert(0);
        assert_eq!(seq, *expected, "producer {} out of order", p);
        *expected += 1;
    }
    assert!(next.values().all(|&n| n == PER_PRODUCER));

    let stats = logger.stats();
    assert_eq!(stats.records_written as usize, PRODUCERS * PER_PRODUCER);
    assert_eq!(stats.write_errors, 0);
}

fn parse(msg: &str) -> (usize, usize) {
    let mut fields = msg
        .split(' ')
        .map(|kv| kv.split('=').nth(1).unwrap().parse::<usize>().unwrap());
    (fields.next().unwrap(), fields.next().unwrap())
}

#[test]
fn test_single_producer_order_is_exact() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::new(config(&dir, "order.log")).unwrap();
    for i in 0..1000 {
        logger.info("{}", &[&i]);
    }
    logger.stop();

    let content = fs::read_to_string(logger.path()).unwrap();
    let seen: Vec<usize> = content
        .lines()
        .map(|l| message(l).parse().unwrap())
        .collect();
    assert_eq!(seen, (0..1000).collect::<Vec<_>>());
}

// ========================================================================
// Rotation
// ========================================================================

#[test]
fn test_rotation_through_logger() {
    let dir = TempDir::new().unwrap();
    let sample = LogRecord::new(Level::Info, "2024-01-01 00:00:00", "rotation 00");
    // три записи на файл
    let cfg = config(&dir, "rot.log").with_max_file_size(sample.len() as u64 * 3);
    let logger = Logger::new(cfg).unwrap();

    for i in 0..10 {
        logger.info("rotation {}", &[&format!("{:02}", i)]);
    }
    logger.stop();

    let base = logger.path().to_path_buf();
    let count = |p: &Path| fs::read_to_string(p).unwrap().lines().count();
    assert_eq!(count(&base), 3);
    assert_eq!(count(&rotated(&base, 0)), 3);
    assert_eq!(count(&rotated(&base, 1)), 3);
    assert_eq!(count(&rotated(&base, 2)), 1);
    assert!(!rotated(&base, 3).exists());
    assert_eq!(logger.stats().rotations, 3);

    // по файлам в порядке создания: сплошная последовательность
    let all: Vec<String> = [base.clone(), rotated(&base, 0), rotated(&base, 1), rotated(&base, 2)]
        .iter()
        .flat_map(|p| {
            fs::read_to_string(p)
                .unwrap()
                .lines()
                .map(|l| message(l).to_owned())
                .collect::<Vec<_>>()
        })
        .collect();
    let expected: Vec<String> = (0..10).map(|i| format!("rotation {:02}", i)).collect();
    assert_eq!(all, expected);
}

#[test]
fn test_base_file_is_appended_across_runs() {
    let dir = TempDir::new().unwrap();
    for run in 0..2 {
        let logger = Logger::new(config(&dir, "append.log")).unwrap();
        logger.info("run {}", &[&run]);
        logger.stop();
    }
    let content = fs::read_to_string(dir.path().join("append.log")).unwrap();
    let messages: Vec<&str> = content.lines().map(message).collect();
    assert_eq!(messages, ["run 0", "run 1"]);
}

// ========================================================================
// Shutdown
// ========================================================================

#[test]
fn test_flush_policy_loses_nothing() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::new(config(&dir, "flush.log")).unwrap();
    for i in 0..5000 {
        logger.debug("burst {}", &[&i]);
    }
    // сразу, не дожидаясь фонового потока
    logger.stop();

    assert_eq!(logger.worker_state(), WorkerState::Stopped);
    assert_eq!(logger.pending(), 0);
    let stats = logger.stats();
    assert_eq!(stats.records_written, 5000);
    assert_eq!(stats.records_discarded, 0);
    assert_eq!(
        fs::read_to_string(logger.path()).unwrap().lines().count(),
        5000
    );
}

#[test]
fn test_discard_policy_accounts_for_every_record() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir, "discard.log").with_shutdown_policy(ShutdownPolicy::Discard);
    let logger = Logger::new(cfg).unwrap();
    for i in 0..5000 {
        logger.debug("burst {}", &[&i]);
    }
    logger.stop();

    let stats = logger.stats();
    let lines = fs::read_to_string(logger.path()).unwrap().lines().count() as u64;
    assert_eq!(lines, stats.records_written);
    assert_eq!(
        stats.records_written + stats.records_discarded + stats.records_dropped,
        5000
    );
    assert_eq!(logger.pending(), 0);
}

#[test]
fn test_stop_twice_from_different_threads() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(Logger::new(config(&dir, "twice.log")).unwrap());
    for i in 0..2000 {
        logger.info("hello {}", &[&i]);
    }

    // кто бы ни вызвал stop() первым, оба возвращаются после join
    let others: Vec<_> = (0..3)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                logger.stop();
                assert_eq!(logger.worker_state(), WorkerState::Stopped);
                assert_eq!(
                    fs::read_to_string(logger.path()).unwrap().lines().count(),
                    2000
                );
            })
        })
        .collect();
    logger.stop();
    assert_eq!(logger.worker_state(), WorkerState::Stopped);
    for h in others {
        h.join().unwrap();
    }
    logger.stop();

    assert!(logger.is_stopped());
    assert_eq!(logger.stats().records_written, 2000);
}

// ========================================================================
// UDP mirror
// ========================================================================

#[test]
fn test_udp_mirror_matches_file() {
    let rx = UdpSocket::bind("127.0.0.1:0").unwrap();
    rx.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    let port = rx.local_addr().unwrap().port();

    let dir = TempDir::new().unwrap();
    let logger = Logger::new(config(&dir, "udp.log")).unwrap();
    logger.enable_udp_mirror("127.0.0.1", port).unwrap();
    for i in 0..3 {
        logger.warning("mirrored {}", &[&i]);
    }
    logger.close_udp_mirror();
    logger.close_udp_mirror();
    logger.info("file only", &[]);
    logger.stop();

    let content = fs::read_to_string(logger.path()).unwrap();
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    assert_eq!(lines.len(), 4);

    let mut buf = [0u8; 2048];
    for expected in &lines[..3] {
        let (n, _) = rx.recv_from(&mut buf).unwrap();
        assert_eq!(std::str::from_utf8(&buf[..n]).unwrap(), *expected);
    }
    assert_eq!(logger.stats().udp_sent, 3);
}

#[test]
fn test_udp_mirror_to_unreachable_port_does_not_stop_logging() {
    // порт без слушателя: ошибки отправки глотаются
    let port = {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket.local_addr().unwrap().port()
    };

    let dir = TempDir::new().unwrap();
    let logger = Logger::new(config(&dir, "unreachable.log")).unwrap();
    logger.enable_udp_mirror("127.0.0.1", port).unwrap();
    for i in 0..20 {
        logger.info("still here {}", &[&i]);
    }
    logger.stop();

    let stats = logger.stats();
    assert_eq!(stats.records_written, 20);
    assert_eq!(stats.udp_sent + stats.udp_errors, 20);
}
