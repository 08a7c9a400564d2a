use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::persistence::events::event_entity_trait::StatisticsEventEntity;

/// Billing event: a user paid `amount` for renting a server.
///
/// Stored at `data/events/transactions/{YYYY}.rce`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEventEntity {
    pub time: DateTime<Utc>,
    pub server_id: String,
    pub user_id: String,
    pub amount: f64,
}

impl StatisticsEventEntity for TransactionEventEntity {
    const KIND: &'static str = "transactions";

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
        self.amount
    }

    fn value_field(&self) -> String {
        self.amount.to_string()
    }

    fn from_fields(time: DateTime<Utc>, server_id: &str, user_id: &str, value: &str) -> Option<Self> {
        let amount = value.trim().parse::<f64>().ok().filter(|a| a.is_finite())?;
        Some(Self {
            time,
            server_id: server_id.to_string(),
            user_id: user_id.to_string(),
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn line_format_is_pipe_delimited() {
        let entity = TransactionEventEntity {
            time: Utc.with_ymd_and_hms(2024, 2, 22, 5, 30, 0).unwrap(),
            server_id: "srv-1".into(),
            user_id: "u-9".into(),
            amount: 12.5,
        };

        assert_eq!(entity.to_line(), "2024-02-22T05:30:00Z|srv-1|u-9|12.5\n");
        assert_eq!(TransactionEventEntity::parse_line(&entity.to_line()), Some(entity));
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        assert_eq!(
            TransactionEventEntity::parse_line("2024-02-22T05:30:00Z|srv-1|u-9|abc"),
            None
        );
        assert_eq!(
            TransactionEventEntity::parse_line("2024-02-22T05:30:00Z|srv-1|u-9|NaN"),
            None
        );
    }
}
