use anyhow::Result;
use chrono::{DateTime, Duration, DurationRound, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::core::persistence::events::connection::{ConnectionEventEntity, ConnectionEventRepository};
use crate::core::persistence::events::transaction::{TransactionEventEntity, TransactionEventRepository};

const DEMO_DAYS: i64 = 30;
const DEMO_STEP_HOURS: i64 = 3;
const DEMO_SERVERS: [&str; 3] = ["srv-ams-1", "srv-fra-1", "srv-nyc-1"];
const DEMO_USERS: u128 = 5;

/// Runs only when in VPNSTATS_DEBUG_MODE: seeds demo events and exits.
pub async fn run_debug(config: &AppConfig) -> Result<()> {
    info!("🔧 Debug mode: seeding demo events into {}", config.data_dir.display());

    let now = Utc::now().duration_trunc(Duration::hours(1))?;
    let (transactions, connections) = seed_demo_events(config, now)?;

    info!(transactions, connections, "Debug tasks completed. Exiting...");
    Ok(())
}

/// Same output for the same `until`.
fn seed_demo_events(config: &AppConfig, until: DateTime<Utc>) -> Result<(usize, usize)> {
    let transactions = TransactionEventRepository::new(&config.data_dir);
    let connections = ConnectionEventRepository::new(&config.data_dir);

    let steps = DEMO_DAYS * 24 / DEMO_STEP_HOURS;
    let (mut tx_count, mut conn_count) = (0, 0);

    for i in 0..steps {
        let time = until - Duration::hours((steps - i) * DEMO_STEP_HOURS);
        let server_id = DEMO_SERVERS[(i as usize) % DEMO_SERVERS.len()].to_string();
        let user_id = Uuid::from_u128(1 + (i as u128) % DEMO_USERS).to_string();

        connections.append(&ConnectionEventEntity {
            time,
            server_id: server_id.clone(),
            user_id: user_id.clone(),
            traffic_bytes: 1_048_576 * (1 + (i as u64 * 7) % 50),
        })?;
        conn_count += 1;

        // a paid rental roughly once a day
        if i % 8 == 0 {
            transactions.append(&TransactionEventEntity {
                time,
                server_id,
                user_id,
                amount: 4.99 + (i % 3) as f64 * 5.0,
            })?;
            tx_count += 1;
        }
    }

    Ok((tx_count, conn_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::model::EventFilter;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn seeds_a_month_of_events() {
        let tmp = tempdir().unwrap();
        let config = AppConfig {
            data_dir: tmp.path().to_path_buf(),
            ..Default::default()
        };
        let until = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let (tx, conn) = seed_demo_events(&config, until).unwrap();
        assert_eq!(conn, 240);
        assert_eq!(tx, 30);

        let rows = ConnectionEventRepository::new(tmp.path())
            .get_row_between(&EventFilter::default(), until - Duration::days(31), until)
            .unwrap();
        assert_eq!(rows.len(), 240);
        assert!(rows.iter().all(|r| r.time < until));
    }
}
