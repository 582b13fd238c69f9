use serde::{Deserialize, Deserializer};

/// Server snapshot of a user, re-fetched rather than mutated locally
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    #[serde(rename = "userCode", deserialize_with = "string_or_number", default)]
    pub user_code: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(rename = "extraBalanceRental", default)]
    pub extra_balance_rental: f64,
    #[serde(rename = "userPower", default)]
    pub user_power: i64,
    #[serde(rename = "levelId", default)]
    pub level_id: i64,
    #[serde(rename = "completedTasks", default)]
    pub completed_tasks: i64,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(rename = "userRole", default)]
    pub user_role: Option<String>,
}

/// Accepts `"123"`, `123` or `null` for identifier-like fields
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelInfo {
    pub id: i64,
    pub name: String,
    pub level_code: String,
    pub maximum_energy: i64,
    pub text_task_point: i64,
    pub groups: String,
}

// (id, name, task reward, maximum energy)
const LEVELS: &[(i64, &str, i64, i64)] = &[
    (1, "Bronze I", 2500, 20),
    (2, "Bronze II", 2550, 22),
    (11, "Bronze III", 2600, 24),
    (3, "Silver I", 2625, 30),
    (4, "Silver II", 2750, 32),
    (12, "Silver III", 2875, 34),
    (5, "Gold I", 3000, 40),
    (6, "Gold II", 3125, 45),
    (13, "Gold III", 3250, 50),
    (7, "Platinum I", 3500, 60),
    (8, "Platinum II", 3500, 70),
    (14, "Platinum III", 3500, 80),
    (9, "Diamond", 3750, 100),
    (10, "Trusted", 3750, 200),
];

pub const UNKNOWN_LEVEL_ENERGY: i64 = 200;
pub const UNKNOWN_LEVEL_TASK_POINT: i64 = 3750;

impl LevelInfo {
    /// Static level lookup; unknown ids get the top-tier energy and reward
    pub fn for_level(level_id: i64) -> Self {
        match LEVELS.iter().find(|(id, ..)| *id == level_id) {
            Some(&(id, name, reward, energy)) => Self {
                id,
                name: name.to_string(),
                level_code: name.replacen(' ', "_", 1),
                maximum_energy: energy,
                text_task_point: reward,
                groups: name.split(' ').next().unwrap_or(name).to_string(),
            },
            None => Self {
                id: level_id,
                name: "Unknown Level".to_string(),
                level_code: "Unknown_Level".to_string(),
                maximum_energy: UNKNOWN_LEVEL_ENERGY,
                text_task_point: UNKNOWN_LEVEL_TASK_POINT,
                groups: "Unknown".to_string(),
            },
        }
    }

    pub fn all() -> Vec<LevelInfo> {
        LEVELS.iter().map(|(id, ..)| Self::for_level(*id)).collect()
    }
}
