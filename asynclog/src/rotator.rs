use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::format::LogRecord;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

// ===== Ротирующий писатель =====

/// Текущий файл, счётчик байт и номер следующего архива.
///
/// Пишет только фоновый поток, поэтому блокировок здесь нет.
#[derive(Debug)]
pub struct FileRotator {
    base: PathBuf,
    current: PathBuf,
    file: Option<File>,
    max_size: u64,
    written: u64,
    next_index: u64,
}

impl FileRotator {
    /// Открывает базовый файл на дозапись, создавая каталоги.
    pub fn open<P: AsRef<Path>>(base: P, max_size: u64) -> io::Result<Self> {
        let base = base.as_ref().to_path_buf();
        if let Some(dir) = base.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = Self::open_append(&base)?;

        Ok(FileRotator {
            current: base.clone(),
            base,
            file: Some(file),
            max_size,
            written: 0,
            next_index: 0,
        })
    }

    fn open_append(path: &Path) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// Пишет и сразу сбрасывает на диск.
    ///
    /// Если запись оборвалась на середине, уже записанные байты всё равно
    /// попадают в счётчик: он должен совпадать с тем, что лежит в файле.
    pub fn write(&mut self, record: &LogRecord) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file is closed"))?;
        let (done, result) = write_counted(file, record.as_bytes());
        self.written += done as u64;
        result?;
        file.flush()
    }

    pub fn should_rotate(&self) -> bool {
        self.written >= self.max_size
    }

    /// `<base>_<index>.log`, имя базового файла берётся целиком.
    pub fn rotated_path(&self, index: u64) -> PathBuf {
        let mut name = OsString::from(self.base.as_os_str());
        name.push(format!("_{}.log", index));
        PathBuf::from(name)
    }

    /// Переключается на новый файл, если порог достигнут.
    ///
    /// Номер расходуется даже при ошибке открытия: старый файл остаётся
    /// активным, счётчик не сбрасывается, следующая запись попробует снова.
    pub fn maybe_rotate(&mut self) -> io::Result<bool> {
        if !self.should_rotate() {
            return Ok(false);
        }

        let path = self.rotated_path(self.next_index);
        self.next_index += 1;

        let file = Self::open_append(&path)?;
        // старый дескриптор закрывается здесь
        self.file = Some(file);
        self.current = path;
        self.written = 0;
        Ok(true)
    }

    pub fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(mut file) => file.flush(),
            None => Ok(()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    pub fn current_path(&self) -> &Path {
        &self.current
    }
}

// Как write_all, но сообщает, сколько байт ушло до ошибки.
fn write_counted<W: Write>(out: &mut W, mut buf: &[u8]) -> (usize, io::Result<()>) {
    let mut done = 0;
    while !buf.is_empty() {
        match out.write(buf) {
            Ok(0) => {
                return (
                    done,
                    Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write whole record",
                    )),
                )
            }
            Ok(n) => {
                done += n;
                buf = &buf[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return (done, Err(e)),
        }
    }
    (done, Ok(()))
}
