pub mod statistics;
pub mod system;
