use std::io::{self, Write};
use std::iter;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::diagnostics::Diagnostics;
use crate::format::LogRecord;
use crate::queue::{Popped, RecordQueue};
use crate::rotator::FileRotator;
use crate::stats::LogStats;
use crate::udp::{UdpSink, UdpTarget};

pub(crate) const WORKER_THREAD_NAME: &str = "asynclog-worker";

// ===== Элементы очереди =====

/// Записи и команды зеркалу идут через одну очередь, поэтому сокетом
/// владеет только фоновый поток, а команды применяются в порядке FIFO.
#[derive(Debug)]
pub(crate) enum Entry {
    Record(LogRecord),
    Mirror(UdpTarget),
    CloseMirror,
}

/// Что делать с записями, которые ещё лежат в очереди в момент остановки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownPolicy {
    /// Дописать всё в файл обычным путём.
    #[default]
    Flush,
    /// Выбросить, посчитать и сообщить в диагностический канал.
    Discard,
}

// ===== Состояние потока =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    Draining,
    Stopped,
}

#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    fn new() -> Self {
        StateCell(AtomicU8::new(WorkerState::Running as u8))
    }

    fn set(&self, state: WorkerState) {
        self.0.store(state as u8, Ordering::Release);
    }

    pub(crate) fn get(&self) -> WorkerState {
        match self.0.load(Ordering::Acquire) {
            0 => WorkerState::Running,
            1 => WorkerState::Draining,
            _ => WorkerState::Stopped,
        }
    }
}

// ===== Серии ошибок =====

/// Ошибка сообщается один раз на серию, восстановление тоже один раз.
#[derive(Debug, Default)]
struct FailureStreak {
    failing: bool,
}

impl FailureStreak {
    /// `true`, если это первая ошибка серии.
    fn fail(&mut self) -> bool {
        !std::mem::replace(&mut self.failing, true)
    }

    /// `true`, если до этого шла серия ошибок.
    fn succeed(&mut self) -> bool {
        std::mem::replace(&mut self.failing, false)
    }
}

// ===== Фоновый поток =====

pub(crate) struct LogWorker {
    queue: Arc<RecordQueue<Entry>>,
    rotator: FileRotator,
    udp: UdpSink,
    to_console: bool,
    policy: ShutdownPolicy,
    stats: Arc<LogStats>,
    diagnostics: Arc<Diagnostics>,
    state: Arc<StateCell>,
    write_streak: FailureStreak,
    rotation_streak: FailureStreak,
}

impl LogWorker {
    pub(crate) fn new(
        queue: Arc<RecordQueue<Entry>>,
        rotator: FileRotator,
        stats: Arc<LogStats>,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        LogWorker {
            queue,
            rotator,
            udp: UdpSink::disabled(),
            to_console: false,
            policy: ShutdownPolicy::default(),
            stats,
            diagnostics,
            state: Arc::new(StateCell::new()),
            write_streak: FailureStreak::default(),
            rotation_streak: FailureStreak::default(),
        }
    }

    pub(crate) fn with_console(mut self, to_console: bool) -> Self {
        self.to_console = to_console;
        self
    }

    pub(crate) fn with_policy(mut self, policy: ShutdownPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub(crate) fn state(&self) -> Arc<StateCell> {
        Arc::clone(&self.state)
    }

    pub(crate) fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || self.run())
    }

    fn run(mut self) {
        loop {
            match self.queue.pop() {
                Popped::Ready(entry) => self.handle(entry),
                Popped::Draining(entry) => {
                    self.state.set(WorkerState::Draining);
                    match self.policy {
                        ShutdownPolicy::Flush => self.handle(entry),
                        ShutdownPolicy::Discard => {
                            self.discard(entry);
                            break;
                        }
                    }
                }
                Popped::Closed => break,
            }
        }
        self.finish();
    }

    fn handle(&mut self, entry: Entry) {
        match entry {
            Entry::Record(record) => self.write(&record),
            Entry::Mirror(target) => self.udp.install(target),
            Entry::CloseMirror => self.udp.close(),
        }
    }

    fn write(&mut self, record: &LogRecord) {
        match self.rotator.write(record) {
            Ok(()) => {
                self.stats.record_write(record.len());
                if self.write_streak.succeed() {
                    self.diagnostics.info(&format!(
                        "writes to {} recovered",
                        self.rotator.current_path().display()
                    ));
                }
            }
            Err(e) => {
                self.stats.record_write_error();
                if self.write_streak.fail() {
                    self.diagnostics.error(&format!(
                        "failed to write to {}: {}",
                        self.rotator.current_path().display(),
                        e
                    ));
                }
            }
        }

        if self.to_console {
            let mut out = io::stdout().lock();
            let _ = out.write_all(record.as_bytes());
            let _ = out.flush();
        }

        match self.udp.send(record) {
            Some(Ok(_)) => self.stats.record_udp_sent(),
            Some(Err(_)) => self.stats.record_udp_error(),
            None => {}
        }

        match self.rotator.maybe_rotate() {
            Ok(true) => {
                self.stats.record_rotation();
                if self.rotation_streak.succeed() {
                    self.diagnostics.info(&format!(
                        "rotation resumed at {}",
                        self.rotator.current_path().display()
                    ));
                }
            }
            Ok(false) => {}
            Err(e) => {
                self.stats.record_rotation_error();
                if self.rotation_streak.fail() {
                    self.diagnostics.error(&format!(
                        "failed to rotate {}: {}",
                        self.rotator.current_path().display(),
                        e
                    ));
                }
            }
        }
    }

    fn discard(&mut self, first: Entry) {
        let mut count = 0;
        let mut last = None;
        for entry in iter::once(first).chain(self.queue.drain()) {
            if let Entry::Record(record) = entry {
                count += 1;
                last = Some(record);
            }
        }

        if let Some(last) = last {
            self.stats.record_discarded(count);
            self.diagnostics.warning(&format!(
                "discarded {} pending record(s) at shutdown, last: {}",
                count,
                last.as_str().trim_end()
            ));
        }
    }

    // Порядок: сокет, затем файл. После этого поток больше ничего не пишет.
    fn finish(mut self) {
        self.udp.close();
        if let Err(e) = self.rotator.close() {
            self.diagnostics
                .error(&format!("failed to close log file: {}", e));
        }
        self.state.set(WorkerState::Stopped);
    }
}
