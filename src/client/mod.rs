// Client module - Rynus API access
pub mod api;

pub use api::RynusClient;

use crate::models::{Account, LabelTaskPayload, Mission, TaskResult, UserProfile};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// The server refused the credential itself
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }
}

/// Every endpoint the bot talks to; each call carries the account's raw token
#[async_trait]
pub trait RynusApi: Send + Sync {
    /// `None` when the server answers without a profile
    async fn get_user_info(&self, account: &Account) -> Result<Option<UserProfile>, ApiError>;
    async fn get_missions(&self, account: &Account, user_id: i64) -> Result<Vec<Mission>, ApiError>;
    async fn execute_mission(&self, account: &Account, mission_id: i64, user_code: &str) -> Result<(), ApiError>;
    async fn update_mission_status(&self, account: &Account, mission_id: i64, user_code: &str) -> Result<(), ApiError>;
    /// `None` when the server returns no task result
    async fn submit_label_task(&self, account: &Account, payload: &LabelTaskPayload) -> Result<Option<TaskResult>, ApiError>;
    async fn heartbeat(&self, account: &Account, user_id: i64) -> Result<(), ApiError>;
}
