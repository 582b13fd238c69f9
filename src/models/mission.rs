use serde::Deserialize;
use super::profile::string_or_number;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Mission {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "missionStatus", deserialize_with = "string_or_number", default)]
    pub mission_status: String,
}

impl Mission {
    pub fn status(&self) -> MissionStatus {
        MissionStatus::from_code(&self.mission_status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionStatus {
    Pending,
    Completed,
    CompletedToday,
    Other(String),
}

impl MissionStatus {
    pub const PENDING: &'static str = "0";
    pub const COMPLETED: &'static str = "3";
    pub const COMPLETED_TODAY: &'static str = "4";

    pub fn from_code(code: &str) -> Self {
        match code {
            Self::PENDING => MissionStatus::Pending,
            Self::COMPLETED => MissionStatus::Completed,
            Self::COMPLETED_TODAY => MissionStatus::CompletedToday,
            other => MissionStatus::Other(other.to_string()),
        }
    }
}
