use std::path::PathBuf;

use anyhow::Result;
use serde_json::{json, Value};

use crate::core::persistence::events::connection::ConnectionEventEntity;
use crate::core::persistence::events::event_entity_trait::StatisticsEventEntity;
use crate::core::persistence::events::transaction::TransactionEventEntity;
use crate::core::persistence::storage_path::events_dir;

/// Storage is healthy when the data dir exists; event dirs appear with the first event.
pub async fn health(data_dir: PathBuf) -> Result<Value> {
    let data_dir_ok = data_dir.is_dir();
    let transactions = events_dir(&data_dir, TransactionEventEntity::KIND).is_dir();
    let connections = events_dir(&data_dir, ConnectionEventEntity::KIND).is_dir();

    Ok(json!({
        "status": if data_dir_ok { "ok" } else { "degraded" },
        "storage": {
            "data_dir": data_dir_ok,
            "transactions": transactions,
            "connections": connections,
        }
    }))
}
