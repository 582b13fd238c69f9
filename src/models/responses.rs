use serde::Deserialize;

// API response wrappers, every endpoint nests its payload under `data`
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct UserInfoData {
    #[serde(rename = "userData", default)]
    pub user_data: Option<crate::models::UserProfile>,
}

#[derive(Debug, Deserialize)]
pub struct LabelTaskData {
    #[serde(rename = "taskResult", default)]
    pub task_result: Option<crate::models::TaskResult>,
}

pub type UserInfoResponse = ApiEnvelope<UserInfoData>;
pub type MissionsResponse = ApiEnvelope<Vec<crate::models::Mission>>;
pub type LabelTaskResponse = ApiEnvelope<LabelTaskData>;
