//! Time-bucketed billing and connection statistics

pub mod dto;
pub mod error;
pub mod model;
pub mod service;
