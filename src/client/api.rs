use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use crate::client::{ApiError, RynusApi};
use crate::config::ApiConfig;
use crate::models::*;
use crate::o_debug;
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::Write;

pub const USER_INFO_PATH: &str = "/api/user/get-info-by-telegram-id";
pub const MISSIONS_LIST_PATH: &str = "/api/user-mission/get-user-missions";
pub const EXECUTE_MISSION_PATH: &str = "/api/user-mission/execute-missions";
pub const UPDATE_MISSION_PATH: &str = "/api/user-mission/update-missions-status";
pub const LABELING_TASK_PATH: &str = "/api/user-label-task/create-user-label-task";
pub const HEARTBEAT_PATH: &str = "/api/user/update-user-last-heart-beat";

const AUTH_HEADER: &str = "x-telegram-miniapp-auth";
const API_DEBUG_LOG: &str = "api_debug.log";

#[derive(Clone)]
pub struct RynusClient {
    client: reqwest::Client,
    base_url: String,
    referral_code: Option<String>,
    api_logging: bool,
}

/// Entry written to api_debug.log for a single call
pub fn api_log_entry(
    account: &Account,
    method: &str,
    path: &str,
    request_bytes: usize,
    status: u16,
    response_body: &str,
) -> serde_json::Value {
    serde_json::json!({
        "timestamp": chrono::Local::now().to_rfc3339(),
        "account": account.display_name(),
        "method": method,
        "endpoint": path,
        "request_bytes": request_bytes,
        "status": status,
        "response": response_body,
    })
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader(e.to_string()))
}

impl RynusClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let origin = config.webapp_origin.trim_end_matches('/');

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ORIGIN, header_value(origin)?);
        headers.insert(REFERER, header_value(&format!("{}/", origin))?);
        headers.insert(HeaderName::from_static("sec-ch-ua"), header_value(&config.sec_ch_ua)?);
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(RynusClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            referral_code: config.referral_code.clone(),
            api_logging: config.api_logging,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder, account: &Account) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(request.header(AUTH_HEADER, header_value(&account.raw_token)?))
    }

    /// One JSON line per call; request bodies are logged by size only (labeling bodies hold auth data)
    fn log_api_call(&self, account: &Account, method: &str, path: &str, request_bytes: usize, status: u16, response_body: &str) {
        if !self.api_logging {
            return;
        }

        let entry = api_log_entry(account, method, path, request_bytes, status, response_body);

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(API_DEBUG_LOG) {
            let _ = writeln!(file, "{}", entry);
        }
    }

    /// Sends the request and returns the body of a 2xx response
    async fn send(
        &self,
        account: &Account,
        method: &str,
        path: &str,
        request: reqwest::RequestBuilder,
        body: Option<&str>,
    ) -> Result<String, ApiError> {
        o_debug!("🌐 API [{}]: {} {}", account.display_name(), method, path);

        let request_bytes = body.map_or(0, str::len);
        let response = request.send().await?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Could not read response".to_string());
            self.log_api_call(account, method, path, request_bytes, status, &error_body);
            return Err(ApiError::Status { status, body: error_body });
        }

        let response_text = response.text().await?;
        self.log_api_call(account, method, path, request_bytes, status, &response_text);
        Ok(response_text)
    }

    async fn post_mission(&self, path: &str, account: &Account, mission_id: i64, user_code: &str) -> Result<(), ApiError> {
        let url = format!("{}/{}/{}", self.url(path), mission_id, user_code);
        let body = serde_json::json!({ "umId": mission_id, "userId": user_code }).to_string();

        let request = self.authorized(self.client.post(&url), account)?.body(body.clone());
        self.send(account, "POST", path, request, Some(&body)).await?;
        Ok(())
    }
}

#[async_trait]
impl RynusApi for RynusClient {
    async fn get_user_info(&self, account: &Account) -> Result<Option<UserProfile>, ApiError> {
        let url = self.url(USER_INFO_PATH);

        let mut query = vec![("telegramId", account.telegram_id.as_str())];
        if let Some(code) = self.referral_code.as_deref() {
            query.push(("referralCode", code));
        }

        let request = self.authorized(self.client.get(&url).query(&query), account)?;
        let response_text = self.send(account, "GET", USER_INFO_PATH, request, None).await?;

        let user_info: UserInfoResponse = serde_json::from_str(&response_text)?;
        Ok(user_info.data.and_then(|d| d.user_data))
    }

    async fn get_missions(&self, account: &Account, user_id: i64) -> Result<Vec<Mission>, ApiError> {
        let url = self.url(MISSIONS_LIST_PATH);

        let request = self.authorized(self.client.get(&url).query(&[("userId", user_id)]), account)?;
        let response_text = self.send(account, "GET", MISSIONS_LIST_PATH, request, None).await?;

        let missions: MissionsResponse = serde_json::from_str(&response_text)?;
        Ok(missions.data.unwrap_or_default())
    }

    async fn execute_mission(&self, account: &Account, mission_id: i64, user_code: &str) -> Result<(), ApiError> {
        self.post_mission(EXECUTE_MISSION_PATH, account, mission_id, user_code).await
    }

    async fn update_mission_status(&self, account: &Account, mission_id: i64, user_code: &str) -> Result<(), ApiError> {
        self.post_mission(UPDATE_MISSION_PATH, account, mission_id, user_code).await
    }

    async fn submit_label_task(&self, account: &Account, payload: &LabelTaskPayload) -> Result<Option<TaskResult>, ApiError> {
        let url = self.url(LABELING_TASK_PATH);
        let body = serde_json::to_string(payload)?;

        let request = self.authorized(self.client.post(&url), account)?.body(body.clone());
        let response_text = self.send(account, "POST", LABELING_TASK_PATH, request, Some(&body)).await?;

        let task_response: LabelTaskResponse = serde_json::from_str(&response_text)?;
        Ok(task_response.data.and_then(|d| d.task_result))
    }

    async fn heartbeat(&self, account: &Account, user_id: i64) -> Result<(), ApiError> {
        let url = self.url(HEARTBEAT_PATH);

        let request = self.authorized(self.client.put(&url).query(&[("userId", user_id)]), account)?.body("{}");
        self.send(account, "PUT", HEARTBEAT_PATH, request, Some("{}")).await?;
        Ok(())
    }
}
