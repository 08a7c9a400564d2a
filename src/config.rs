use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Offset, Utc};

const ENV_HOST: &str = "VPNSTATS_HOST";
const ENV_PORT: &str = "VPNSTATS_PORT";
const ENV_DATA_DIR: &str = "VPNSTATS_DATA_DIR";
const ENV_LOG_DIR: &str = "VPNSTATS_LOG_DIR";
const ENV_LOG_LEVEL: &str = "VPNSTATS_LOG_LEVEL";
const ENV_UTC_OFFSET: &str = "VPNSTATS_UTC_OFFSET";
const ENV_MAX_BUCKETS: &str = "VPNSTATS_MAX_BUCKETS";
const ENV_DEBUG_MODE: &str = "VPNSTATS_DEBUG_MODE";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    /// `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub log_level: String,
    pub utc_offset: FixedOffset,
    pub max_buckets: i64,
    pub debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            data_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            log_level: "info".into(),
            utc_offset: Utc.fix(),
            max_buckets: 5_000,
            debug_mode: false,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get(ENV_PORT) {
            Some(v) => v.parse().with_context(|| format!("{ENV_PORT} must be a port, got '{v}'"))?,
            None => defaults.port,
        };

        let max_buckets = match get(ENV_MAX_BUCKETS) {
            Some(v) => {
                let n: i64 = v
                    .parse()
                    .with_context(|| format!("{ENV_MAX_BUCKETS} must be an integer, got '{v}'"))?;
                if n <= 0 {
                    return Err(anyhow!("{ENV_MAX_BUCKETS} must be positive, got {n}"));
                }
                n
            }
            None => defaults.max_buckets,
        };

        let utc_offset = match get(ENV_UTC_OFFSET) {
            Some(v) => parse_utc_offset(&v)?,
            None => defaults.utc_offset,
        };

        let debug_mode = match get(ENV_DEBUG_MODE) {
            Some(v) => parse_bool(&v).ok_or_else(|| anyhow!("{ENV_DEBUG_MODE} must be true or false, got '{v}'"))?,
            None => defaults.debug_mode,
        };

        Ok(Self {
            host: get(ENV_HOST).unwrap_or(defaults.host),
            port,
            data_dir: get(ENV_DATA_DIR).map(PathBuf::from).unwrap_or(defaults.data_dir),
            log_dir: get(ENV_LOG_DIR).map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: get(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            utc_offset,
            max_buckets,
            debug_mode,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }
    raw.parse::<FixedOffset>()
        .map_err(|err| anyhow!("{ENV_UTC_OFFSET} must look like +02:00, got '{raw}': {err}"))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
