use chrono::{DateTime, Utc};

/// A time-stamped marketplace event stored one per line as
/// `TIME|SERVER_ID|USER_ID|VALUE`.
pub trait StatisticsEventEntity: Sized {
    /// Directory name under `{data_dir}/events`.
    const KIND: &'static str;

    fn time(&self) -> DateTime<Utc>;
    fn server_id(&self) -> &str;
    fn user_id(&self) -> &str;

    /// Quantity summed by aggregation.
    fn metric_value(&self) -> f64;

    fn value_field(&self) -> String;

    fn from_fields(time: DateTime<Utc>, server_id: &str, user_id: &str, value: &str) -> Option<Self>;

    fn to_line(&self) -> String {
        format!(
            "{}|{}|{}|{}\n",
            self.time().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.server_id(),
            self.user_id(),
            self.value_field(),
        )
    }

    fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.trim_end().split('|').collect();
        if parts.len() != 4 {
            return None;
        }

        let time = DateTime::parse_from_rfc3339(parts[0])
            .map(|dt| dt.with_timezone(&Utc))
            .ok()?;

        Self::from_fields(time, parts[1], parts[2], parts[3])
    }
}
