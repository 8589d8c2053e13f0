mod file_error_log;
mod memory_error_log;

pub use file_error_log::FileErrorLog;
pub use memory_error_log::InMemoryErrorLog;
