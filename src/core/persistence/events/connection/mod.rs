pub mod connection_event_entity;

pub use connection_event_entity::ConnectionEventEntity;

use crate::core::persistence::events::event_repository::EventRepository;

pub type ConnectionEventRepository = EventRepository<ConnectionEventEntity>;
