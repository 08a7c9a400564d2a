use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::persistence::events::event_entity_trait::StatisticsEventEntity;

/// VPN session opened by a user on a server, with the traffic it carried.
///
/// Stored at `data/events/connections/{YYYY}.rce`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEventEntity {
    pub time: DateTime<Utc>,
    pub server_id: String,
    pub user_id: String,
    pub traffic_bytes: u64,
}

impl StatisticsEventEntity for ConnectionEventEntity {
    const KIND: &'static str = "connections";

    fn time(&self) -> DateTime<Utc> {
        self.time
    }

    fn server_id(&self) -> &str {
        &self.server_id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn metric_value(&self) -> f64 {
        self.traffic_bytes as f64
    }

    fn value_field(&self) -> String {
        self.traffic_bytes.to_string()
    }

    fn from_fields(time: DateTime<Utc>, server_id: &str, user_id: &str, value: &str) -> Option<Self> {
        Some(Self {
            time,
            server_id: server_id.to_string(),
            user_id: user_id.to_string(),
            traffic_bytes: value.trim().parse().ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_stored_line() {
        let parsed = ConnectionEventEntity::parse_line("2024-01-05T10:00:00+02:00|srv-4|u-1|2048").unwrap();
        assert_eq!(parsed.time, Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap());
        assert_eq!(parsed.server_id, "srv-4");
        assert_eq!(parsed.traffic_bytes, 2048);
        assert!(ConnectionEventEntity::parse_line("2024-01-05T10:00:00Z|srv-4|u-1|-3").is_none());
    }
}
