pub mod log_repository;

pub use log_repository::LOG_FILE_PREFIX;
