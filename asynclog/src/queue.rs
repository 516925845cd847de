use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

// ===== Результат извлечения =====

/// Что вернул `pop()`.
#[derive(Debug, PartialEq, Eq)]
pub enum Popped<T> {
    /// Очередь открыта, элемент из головы.
    Ready(T),
    /// Закрытие уже запрошено, но элементы ещё остались.
    Draining(T),
    /// Закрыта и пуста. Дальше будет только `Closed`.
    Closed,
}

impl<T> Popped<T> {
    pub fn into_item(self) -> Option<T> {
        match self {
            Popped::Ready(item) | Popped::Draining(item) => Some(item),
            Popped::Closed => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Popped::Closed)
    }
}

// ===== Очередь =====

struct State<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// Неограниченная FIFO-очередь: много производителей, один потребитель.
///
/// Один мьютекс на хранилище и одна условная переменная на
/// «появились данные» / «закрыто».
pub struct RecordQueue<T> {
    state: Mutex<State<T>>,
    ready: Condvar,
}

impl<T> RecordQueue<T> {
    pub fn new() -> Self {
        RecordQueue {
            state: Mutex::new(State {
                items: VecDeque::new(),
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    // Паника в чужом потоке не должна ломать логгирование
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Кладёт элемент в хвост и будит одного ожидающего. Не блокирует
    /// дольше, чем держится мьютекс.
    pub fn push(&self, item: T) {
        let mut state = self.lock();
        state.items.push_back(item);
        drop(state);
        self.ready.notify_one();
    }

    /// Кладёт элемент, только если очередь ещё открыта.
    ///
    /// Проверка и вставка идут под одной блокировкой, поэтому после
    /// `shutdown()` в очередь не попадает ничего.
    pub fn push_if_open(&self, item: T) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        state.items.push_back(item);
        drop(state);
        self.ready.notify_one();
        true
    }

    /// Ждёт, пока появятся данные или придёт сигнал закрытия.
    pub fn pop(&self) -> Popped<T> {
        let mut state = self
            .ready
            .wait_while(self.lock(), |s| s.items.is_empty() && !s.closed)
            .unwrap_or_else(PoisonError::into_inner);

        match state.items.pop_front() {
            Some(item) if state.closed => Popped::Draining(item),
            Some(item) => Popped::Ready(item),
            None => Popped::Closed,
        }
    }

    /// Неблокирующий вариант: `None`, если очередь открыта и пуста.
    pub fn try_pop(&self) -> Option<Popped<T>> {
        let mut state = self.lock();
        match state.items.pop_front() {
            Some(item) if state.closed => Some(Popped::Draining(item)),
            Some(item) => Some(Popped::Ready(item)),
            None if state.closed => Some(Popped::Closed),
            None => None,
        }
    }

    /// Забирает всё содержимое разом, порядок сохраняется.
    pub fn drain(&self) -> Vec<T> {
        self.lock().items.drain(..).collect()
    }

    /// Повторный вызов ничего не меняет.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        state.closed = true;
        drop(state);
        self.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }
}

impl<T> Default for RecordQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
