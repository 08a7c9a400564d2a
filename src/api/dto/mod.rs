//! Request and response shapes of the HTTP API

pub mod statistics_dto;
pub mod system_dto;

use serde::Serialize;

/// Envelope of every `/api/v1` response.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub is_successful: bool,
    pub data: Option<T>,
    pub error_msg: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            is_successful: true,
            data: Some(data),
            error_msg: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            is_successful: false,
            data: None,
            error_msg: Some(msg.into()),
        }
    }
}
