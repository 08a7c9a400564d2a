use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

pub async fn status(instance_id: Uuid, started_at: DateTime<Utc>, data_dir: PathBuf) -> Result<Value> {
    let uptime = Utc::now() - started_at;

    Ok(json!({
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": instance_id,
        "started_at": started_at.to_rfc3339(),
        "uptime_seconds": uptime.num_seconds(),
        "data_dir": data_dir.display().to_string(),
    }))
}
