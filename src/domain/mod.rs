pub mod common;
pub mod statistics;
pub mod system;
