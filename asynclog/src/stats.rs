use std::sync::atomic::{AtomicU64, Ordering};

// ===== Счётчики =====

/// Счётчики фонового потока и фасада. Пишутся без блокировок.
#[derive(Debug, Default)]
pub struct LogStats {
    records_written: AtomicU64,
    bytes_written: AtomicU64,
    write_errors: AtomicU64,
    rotations: AtomicU64,
    rotation_errors: AtomicU64,
    udp_sent: AtomicU64,
    udp_errors: AtomicU64,
    records_discarded: AtomicU64,
    records_dropped: AtomicU64,
}

impl LogStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_write(&self, bytes: usize) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rotation(&self) {
        self.rotations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rotation_error(&self) {
        self.rotation_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_udp_sent(&self) {
        self.udp_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_udp_error(&self) {
        self.udp_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_discarded(&self, count: usize) {
        self.records_discarded.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self, count: usize) {
        self.records_dropped.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> LogStatsSnapshot {
        LogStatsSnapshot {
            records_written: self.records_written.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
            rotation_errors: self.rotation_errors.load(Ordering::Relaxed),
            udp_sent: self.udp_sent.load(Ordering::Relaxed),
            udp_errors: self.udp_errors.load(Ordering::Relaxed),
            records_discarded: self.records_discarded.load(Ordering::Relaxed),
            records_dropped: self.records_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Снимок счётчиков на момент вызова.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogStatsSnapshot {
    pub records_written: u64,
    pub bytes_written: u64,
    pub write_errors: u64,
    pub rotations: u64,
    pub rotation_errors: u64,
    pub udp_sent: u64,
    pub udp_errors: u64,
    /// Записи, выброшенные при остановке (политика `Discard`).
    pub records_discarded: u64,
    /// Вызовы `log()` после `stop()`.
    pub records_dropped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        assert_eq!(LogStats::new().snapshot(), LogStatsSnapshot::default());
    }

    #[test]
    fn test_stats_counters() {
        let stats = LogStats::new();
        stats.record_write(10);
        stats.record_write(5);
        stats.record_write_error();
        stats.record_rotation();
        stats.record_udp_sent();
        stats.record_udp_error();
        stats.record_discarded(3);
        stats.record_dropped(1);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.records_written, 2);
        assert_eq!(snapshot.bytes_written, 15);
        assert_eq!(snapshot.write_errors, 1);
        assert_eq!(snapshot.rotations, 1);
        assert_eq!(snapshot.rotation_errors, 0);
        assert_eq!(snapshot.udp_sent, 1);
        assert_eq!(snapshot.udp_errors, 1);
        assert_eq!(snapshot.records_discarded, 3);
        assert_eq!(snapshot.records_dropped, 1);
    }
}
