use chrono::Local;
use std::fmt::{self, Display, Write as _};

use crate::level::Level;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const PLACEHOLDER: &str = "{}";

// ===== Подстановка аргументов =====

/// Подставляет аргументы в шаблон с позиционными `{}`.
///
/// Лишние аргументы дописываются в конец через пробел, лишние `{}`
/// остаются как есть:
///
/// ```
/// use asynclog::format_message;
///
/// assert_eq!(format_message("a={} b={}", &[&1, &"2"]), "a=1 b=2");
/// assert_eq!(format_message("{} {} {}", &[&"x"]), "x {} {}");
/// assert_eq!(format_message("no placeholders", &[&"extra"]), "no placeholders extra");
/// ```
pub fn format_message(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find(PLACEHOLDER) {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => {
                let _ = write!(out, "{}", arg);
            }
            None => out.push_str(PLACEHOLDER),
        }
        rest = &rest[pos + PLACEHOLDER.len()..];
    }
    out.push_str(rest);

    for arg in args {
        let _ = write!(out, " {}", arg);
    }
    out
}

pub(crate) fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

// ===== Готовая строка лога =====

/// Одна отформатированная строка: `[LEVEL]\t[YYYY-MM-DD HH:MM:SS]\t<message>\n`.
///
/// Создаётся в потоке вызывающего, дальше только перемещается: очередь,
/// фоновый поток, файл.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord(String);

impl LogRecord {
    pub fn new(level: Level, timestamp: &str, message: &str) -> Self {
        let mut line =
            String::with_capacity(level.as_str().len() + timestamp.len() + message.len() + 8);
        line.push('[');
        line.push_str(level.as_str());
        line.push_str("]\t[");
        line.push_str(timestamp);
        line.push_str("]\t");
        line.push_str(message);
        line.push('\n');
        LogRecord(line)
    }

    /// Запись с текущим локальным временем.
    pub fn now(level: Level, message: &str) -> Self {
        Self::new(level, &current_timestamp(), message)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Длина в байтах, именно её считает ротация.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
