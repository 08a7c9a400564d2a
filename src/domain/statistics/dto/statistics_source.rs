use std::fmt;

use serde::Serialize;

/// Event stream a statistics endpoint charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsSource {
    /// Transactions; value is the amount sum.
    Billing,
    /// VPN sessions; value is the traffic sum in bytes.
    Connections,
}

impl StatisticsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatisticsSource::Billing => "billing",
            StatisticsSource::Connections => "connections",
        }
    }
}

impl fmt::Display for StatisticsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
