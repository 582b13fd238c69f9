#![allow(dead_code)]

use async_trait::async_trait;
use rynus_bot::models::{Account, LabelTaskPayload, Mission, TaskResult, UserProfile};
use rynus_bot::{ApiError, Pacer, RynusApi};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    UserInfo(String),
    Missions(i64),
    Execute(i64, String),
    UpdateStatus(i64, String),
    LabelTask(Option<String>),
    Heartbeat(i64),
}

pub type Scripted<T> = Result<T, ApiError>;

#[derive(Default)]
struct MockState {
    calls: Vec<ApiCall>,
    profiles: VecDeque<Scripted<Option<UserProfile>>>,
    default_profile: Option<UserProfile>,
    reject_user_info: bool,
    mission_lists: VecDeque<Vec<Mission>>,
    default_missions: Vec<Mission>,
    fail_execute: bool,
    fail_missions: bool,
    fail_heartbeat: bool,
    label_results: VecDeque<Scripted<Option<TaskResult>>>,
    next_balance: f64,
    submitted: u32,
}

/// Scripted in-memory API that records every call
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

pub fn status_error(status: u16) -> ApiError {
    ApiError::Status { status, body: "scripted failure".to_string() }
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: UserProfile) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_balance = profile.extra_balance_rental;
            state.default_profile = Some(profile);
        }
        self
    }

    pub fn rejecting_credentials(self) -> Self {
        self.state.lock().unwrap().reject_user_info = true;
        self
    }

    pub fn push_profile(&self, profile: Scripted<Option<UserProfile>>) {
        self.state.lock().unwrap().profiles.push_back(profile);
    }

    pub fn with_missions(self, missions: Vec<Mission>) -> Self {
        self.state.lock().unwrap().default_missions = missions;
        self
    }

    /// Mission list returned by the next `get_missions` call only
    pub fn push_missions(&self, missions: Vec<Mission>) {
        self.state.lock().unwrap().mission_lists.push_back(missions);
    }

    pub fn failing_execute(self) -> Self {
        self.state.lock().unwrap().fail_execute = true;
        self
    }

    pub fn failing_missions(self) -> Self {
        self.state.lock().unwrap().fail_missions = true;
        self
    }

    pub fn failing_heartbeat(self) -> Self {
        self.state.lock().unwrap().fail_heartbeat = true;
        self
    }

    /// Label task responses consumed in order; afterwards every task succeeds with a key
    pub fn push_label_result(&self, result: Scripted<Option<TaskResult>>) {
        self.state.lock().unwrap().label_results.push_back(result);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, matches: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }

    pub fn label_submissions(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::LabelTask(_)))
    }
}

#[async_trait]
impl RynusApi for MockApi {
    async fn get_user_info(&self, account: &Account) -> Result<Option<UserProfile>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::UserInfo(account.telegram_id.clone()));
        if let Some(scripted) = state.profiles.pop_front() {
            return scripted;
        }
        if state.reject_user_info {
            return Err(status_error(401));
        }
        Ok(state.default_profile.clone())
    }

    async fn get_missions(&self, _account: &Account, user_id: i64) -> Result<Vec<Mission>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::Missions(user_id));
        if state.fail_missions {
            return Err(status_error(500));
        }
        Ok(state.mission_lists.pop_front().unwrap_or_else(|| state.default_missions.clone()))
    }

    async fn execute_mission(&self, _account: &Account, mission_id: i64, user_code: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::Execute(mission_id, user_code.to_string()));
        if state.fail_execute {
            return Err(status_error(500));
        }
        Ok(())
    }

    async fn update_mission_status(&self, _account: &Account, mission_id: i64, user_code: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::UpdateStatus(mission_id, user_code.to_string()));
        Ok(())
    }

    async fn submit_label_task(&self, _account: &Account, payload: &LabelTaskPayload) -> Result<Option<TaskResult>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::LabelTask(payload.next_key.clone()));
        if let Some(scripted) = state.label_results.pop_front() {
            return scripted;
        }
        state.submitted += 1;
        state.next_balance += payload.reward as f64;
        Ok(Some(TaskResult {
            next_key: Some(format!("key-{}", state.submitted)),
            bonus_balance: Some(state.next_balance),
        }))
    }

    async fn heartbeat(&self, _account: &Account, user_id: i64) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::Heartbeat(user_id));
        if state.fail_heartbeat {
            return Err(status_error(500));
        }
        Ok(())
    }
}

/// Records pauses instead of sleeping
#[derive(Clone, Default)]
pub struct RecordingPacer {
    pauses: Arc<Mutex<Vec<(Duration, String)>>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<(Duration, String)> {
        self.pauses.lock().unwrap().clone()
    }

    pub fn durations_labeled(&self, label: &str) -> Vec<Duration> {
        self.pauses().into_iter().filter(|(_, l)| l == label).map(|(d, _)| d).collect()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration, label: &str) {
        self.pauses.lock().unwrap().push((duration, label.to_string()));
    }
}

pub fn profile(level_id: i64, user_power: i64) -> UserProfile {
    UserProfile {
        id: 4242,
        user_code: "UC4242".to_string(),
        balance: 1000.0,
        extra_balance_rental: 500.0,
        user_power,
        level_id,
        completed_tasks: 12,
        region: Some("EU".to_string()),
        user_role: Some("USER".to_string()),
    }
}

pub fn mission(id: i64, status: &str) -> Mission {
    Mission {
        id,
        name: format!("Mission {}", id),
        mission_status: status.to_string(),
    }
}

pub fn credential_line(id: u64, username: &str) -> String {
    format!(
        "query_id=AAF1&user=%7B%22id%22%3A{}%2C%22first_name%22%3A%22Test%22%2C%22username%22%3A%22{}%22%2C%22language_code%22%3A%22en%22%7D&auth_date=1733000000&hash=abc123",
        id, username
    )
}

pub fn account(id: u64, username: &str) -> Account {
    Account {
        raw_token: credential_line(id, username),
        telegram_id: id.to_string(),
        username: Some(username.to_string()),
    }
}
