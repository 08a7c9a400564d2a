//! Billing and connection event storage

pub mod connection;
pub mod event_entity_trait;
pub mod event_fs_adapter;
pub mod event_repository;
pub mod transaction;
