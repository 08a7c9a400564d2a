use crate::api::dto::system_dto::PaginatedLogResponse;
use crate::core::persistence::logs::log_repository::LogRepository;

const DEFAULT_LOG_PAGE: usize = 200;
const MAX_LOG_PAGE: usize = 2_000;

pub struct LogService<R: LogRepository> {
    repo: R,
}

impl<R: LogRepository> LogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_system_log_file_list(&self) -> anyhow::Result<Vec<String>> {
        self.repo.get_logs()
    }

    pub async fn get_system_log_lines(
        &self,
        date: &str,
        cursor: Option<usize>,
        limit: Option<usize>,
    ) -> anyhow::Result<PaginatedLogResponse> {
        let lines = self.repo.get_log(date)?;
        let start = cursor.unwrap_or(0).min(lines.len());
        let limit = limit.unwrap_or(DEFAULT_LOG_PAGE).clamp(1, MAX_LOG_PAGE);
        let end = (start + limit).min(lines.len());

        Ok(PaginatedLogResponse {
            date: date.to_string(),
            lines: lines[start..end].to_vec(),
            next_cursor: (end < lines.len()).then_some(end),
        })
    }
}
