// Rynus labeling bot library
// Account cycle: profile, daily check-in, heartbeat, labeling farm

pub mod models;
pub mod client;
pub mod operations;
pub mod automation;
pub mod power;
pub mod pacing;
pub mod config;
pub mod output_broker;

// Re-export commonly used types
pub use models::{
    account::{Account, AccountSet},
    profile::{UserProfile, LevelInfo},
    mission::{Mission, MissionStatus},
    labeling::{LabelTaskPayload, LabelingSession, TaskResult},
};

pub use client::{ApiError, RynusApi, RynusClient};
pub use automation::{Automation, BackoffPolicy, CycleOutcome};
pub use config::BotConfig;
pub use pacing::{Pacer, TokioPacer};
pub use power::{PowerPolicyKind, PowerTracker};

// Constants
pub const API_BASE_URL: &str = "https://cloud.rynus.io";
pub const WEBAPP_ORIGIN: &str = "https://tele-app.rynus.io";
pub const DATA_FILE: &str = "data.txt";
pub const LOG_FILE: &str = "application.log";
pub const CONFIG_FILE: &str = "rynus.toml";
