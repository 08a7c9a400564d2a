use thiserror::Error;

/// Deterministic failures of period resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatisticsError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("No data for the selected period")]
    NoData,
}
