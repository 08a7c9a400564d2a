use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::api::dto::statistics_dto::StatisticsQuery;
use crate::config::AppConfig;
use crate::core::persistence::events::connection::ConnectionEventRepository;
use crate::core::persistence::events::transaction::TransactionEventRepository;
use crate::core::persistence::logs::log_repository::LogRepositoryImpl;
use crate::domain::common::service::StatisticsRowRepository;
use crate::domain::statistics::dto::StatisticsSource;
use crate::domain::statistics::service::statistics_service::{
    get_statistics_sequence, get_statistics_summary, StatisticsSettings,
};
use crate::domain::system::service::log_service::LogService;

macro_rules! delegate_async_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self) -> anyhow::Result<$ret> {
                $path($(self.$arg.clone()),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub log_service: Arc<LogService<LogRepositoryImpl>>,
    pub system_service: Arc<SystemService>,
    pub statistics_service: Arc<StatisticsService>,
}

pub fn build_app_state(config: &AppConfig) -> AppState {
    let settings = StatisticsSettings {
        utc_offset: config.utc_offset,
        max_buckets: config.max_buckets,
    };

    AppState {
        log_service: Arc::new(LogService::new(LogRepositoryImpl::new(&config.log_dir))),
        system_service: Arc::new(SystemService::new(config.data_dir.clone())),
        statistics_service: Arc::new(StatisticsService {
            transactions: Arc::new(TransactionEventRepository::new(&config.data_dir)),
            connections: Arc::new(ConnectionEventRepository::new(&config.data_dir)),
            settings,
        }),
    }
}

#[derive(Clone)]
pub struct SystemService {
    data_dir: PathBuf,
    instance_id: Uuid,
    started_at: DateTime<Utc>,
}

impl SystemService {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            instance_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    delegate_async_service! {
        fn status(instance_id: Uuid, started_at: DateTime<Utc>, data_dir: PathBuf) -> serde_json::Value => crate::domain::system::service::status_service::status;
        fn health(data_dir: PathBuf) -> serde_json::Value => crate::domain::system::service::health_service::health;
    }
}

/// Both statistics sources behind the storage seam, plus request-independent settings.
#[derive(Clone)]
pub struct StatisticsService {
    pub transactions: Arc<dyn StatisticsRowRepository>,
    pub connections: Arc<dyn StatisticsRowRepository>,
    pub settings: StatisticsSettings,
}

impl StatisticsService {
    fn repo(&self, source: StatisticsSource) -> &dyn StatisticsRowRepository {
        match source {
            StatisticsSource::Billing => self.transactions.as_ref(),
            StatisticsSource::Connections => self.connections.as_ref(),
        }
    }

    pub async fn get_sequence(
        &self,
        source: StatisticsSource,
        q: StatisticsQuery,
    ) -> anyhow::Result<serde_json::Value> {
        get_statistics_sequence(self.repo(source), source, q, &self.settings, Utc::now()).await
    }

    pub async fn get_summary(
        &self,
        source: StatisticsSource,
        q: StatisticsQuery,
    ) -> anyhow::Result<serde_json::Value> {
        get_statistics_summary(self.repo(source), source, q, &self.settings, Utc::now()).await
    }
}
