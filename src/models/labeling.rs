use serde::{Deserialize, Serialize};

pub const LABEL_TASK_STATUS: i64 = 2;
pub const LABEL_TASK_TYPE: i64 = 2;

/// Canned classification answer submitted for every labeling task
pub fn label_result_template() -> serde_json::Value {
    serde_json::json!({
        "taskId": 770,
        "data": [
            {
                "words": [{ "id": 28, "word": "GPU/CPU" }],
                "topic": "hw",
                "groupId": 173312214557u64
            },
            {
                "words": [{ "id": 26, "word": "Rynus" }],
                "topic": "ORG",
                "groupId": 173312214284u64
            }
        ]
    })
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabelTaskPayload {
    #[serde(rename = "authData")]
    pub auth_data: String,
    /// The template, serialized to a JSON string
    #[serde(rename = "labelResult")]
    pub label_result: String,
    #[serde(rename = "nextKey")]
    pub next_key: Option<String>,
    pub reward: i64,
    #[serde(rename = "taskId")]
    pub task_id: i64,
    #[serde(rename = "taskStatus")]
    pub task_status: i64,
    #[serde(rename = "taskType")]
    pub task_type: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

impl LabelTaskPayload {
    pub fn new(auth_data: &str, user_id: i64, next_key: Option<String>, reward: i64) -> Self {
        Self {
            auth_data: auth_data.to_string(),
            label_result: label_result_template().to_string(),
            next_key,
            reward,
            task_id: 0,
            task_status: LABEL_TASK_STATUS,
            task_type: LABEL_TASK_TYPE,
            user_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaskResult {
    #[serde(rename = "nextKey", default)]
    pub next_key: Option<String>,
    #[serde(rename = "bonusBalance", default)]
    pub bonus_balance: Option<f64>,
}

/// In-memory progress of one labeling run, never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct LabelingSession {
    pub next_key: Option<String>,
    pub task_count: u32,
    pub initial_balance: f64,
    pub current_balance: f64,
}

impl LabelingSession {
    pub fn new(initial_balance: f64) -> Self {
        Self {
            next_key: None,
            task_count: 0,
            initial_balance,
            current_balance: initial_balance,
        }
    }

    pub fn record(&mut self, result: &TaskResult) {
        self.next_key = result.next_key.clone().filter(|k| !k.is_empty());
        if let Some(balance) = result.bonus_balance {
            self.current_balance = balance;
        }
        self.task_count += 1;
    }

    pub fn earned(&self) -> f64 {
        self.current_balance - self.initial_balance
    }
}
