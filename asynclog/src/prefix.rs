use crate::format::current_timestamp;

/// `[module::path:line]`, с временем: `[YYYY-MM-DD HH:MM:SS] [module::path:line]`.
///
/// Обычно вызывается через [`log_prefix!`](crate::log_prefix).
pub fn location_prefix(location: &str, line: u32, with_time: bool) -> String {
    if with_time {
        format!("[{}] [{}:{}]", current_timestamp(), location, line)
    } else {
        format!("[{}:{}]", location, line)
    }
}

#[macro_export]
macro_rules! log_prefix {
    () => {
        $crate::location_prefix(::std::module_path!(), ::std::line!(), false)
    };
    (time) => {
        $crate::location_prefix(::std::module_path!(), ::std::line!(), true)
    };
}
