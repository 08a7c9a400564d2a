//! File-backed storage (event streams, rolling logs)

pub mod events;
pub mod logs;
pub mod storage_path;
