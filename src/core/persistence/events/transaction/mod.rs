pub mod transaction_event_entity;

pub use transaction_event_entity::TransactionEventEntity;

use crate::core::persistence::events::event_repository::EventRepository;

pub type TransactionEventRepository = EventRepository<TransactionEventEntity>;
