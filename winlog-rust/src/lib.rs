//! # winlog-rs
//!
//! Источник событий Windows Event Log для диагностики asynclog.
//! Если собственный источник не регистрируется, пишет в "Application"
//! с префиксом имени.

#![cfg(target_os = "windows")]

use std::ffi::CString;
use windows_sys::core::PCSTR;
use windows_sys::Win32::Foundation::{HANDLE, PSID};
use windows_sys::Win32::System::EventLog::{
    DeregisterEventSource, RegisterEventSourceA, ReportEventA, EVENTLOG_ERROR_TYPE,
    EVENTLOG_INFORMATION_TYPE, EVENTLOG_WARNING_TYPE,
};

const FALLBACK_SOURCE: &str = "Application";
const EVENT_ID: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Information,
    Warning,
    Error,
}

impl EventKind {
    fn to_event_type(self) -> u16 {
        match self {
            EventKind::Information => EVENTLOG_INFORMATION_TYPE,
            EventKind::Warning => EVENTLOG_WARNING_TYPE,
            EventKind::Error => EVENTLOG_ERROR_TYPE,
        }
    }
}

/// Зарегистрированный источник. Регистрируется один раз, снимается в `Drop`.
#[derive(Debug)]
pub struct EventSource {
    handle: HANDLE,
    // Some(..), если пришлось писать от имени "Application"
    prefix: Option<String>,
}

impl EventSource {
    pub fn open(preferred_source: &str) -> Option<Self> {
        if let Some(handle) = register(preferred_source) {
            return Some(EventSource {
                handle,
                prefix: None,
            });
        }

        register(FALLBACK_SOURCE).map(|handle| EventSource {
            handle,
            prefix: Some(preferred_source.to_owned()),
        })
    }

    /// `false`, если Event Log отказал: вызывающий решает, куда ещё писать.
    pub fn report(&self, kind: EventKind, message: &str) -> bool {
        let text = match self.prefix {
            Some(ref prefix) => format!("[{}] {}", prefix, message),
            None => message.to_owned(),
        };
        let c_message = match CString::new(text) {
            Ok(s) => s,
            Err(_) => return false,
        };
        let msg_ptr: PCSTR = c_message.as_ptr() as _;

        let success: i32 = unsafe {
            ReportEventA(
                self.handle,
                kind.to_event_type(),
                0,
                EVENT_ID,
                0 as PSID,
                1,
                0,
                &msg_ptr,
                std::ptr::null_mut(),
            )
        };
        success != 0
    }
}

impl Drop for EventSource {
    fn drop(&mut self) {
        let _ = unsafe { DeregisterEventSource(self.handle) };
    }
}

fn register(source: &str) -> Option<HANDLE> {
    let c_source = CString::new(source).ok()?;
    let source_ptr: PCSTR = c_source.as_ptr() as _;
    let handle = unsafe { RegisterEventSourceA(std::ptr::null(), source_ptr) };
    if handle == 0 {
        None
    } else {
        Some(handle)
    }
}
