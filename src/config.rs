use serde::{Deserialize, Serialize};
use crate::o_info;
use crate::power::PowerPolicyKind;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub api: ApiConfig,
    pub timing: TimingConfig,
    pub missions: MissionConfig,
    pub labeling: LabelingConfig,
    pub files: FileConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Mini-app origin sent as Origin/Referer
    pub webapp_origin: String,
    pub user_agent: String,
    pub sec_ch_ua: String,
    /// Passed to the user-info endpoint when set
    pub referral_code: Option<String>,
    /// Append one JSON line per API call to api_debug.log
    pub api_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pause between consecutive API steps in milliseconds
    pub request_delay_ms: u64,
    /// Sleep after a cycle that failed but can be retried
    pub cooldown_seconds: u64,
    /// Sleep after a cycle in which every account was rejected
    pub fatal_cooldown_seconds: u64,
    /// Fixed inter-cycle sleep; when unset it is derived from energy recovery
    pub fixed_cycle_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionFlow {
    /// POST execute, wait, then POST update-status
    ExecuteThenUpdate,
    /// Single POST update-status
    UpdateOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub daily_check_in_id: i64,
    pub flow: MissionFlow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    pub max_tasks: u32,
    pub power_required: i64,
    /// Minutes for one unit of power to regenerate
    pub power_recovery_minutes: f64,
    /// Consecutive empty or failed submissions before giving up
    pub max_retries: u32,
    pub empty_result_retry_seconds: u64,
    pub error_retry_seconds: u64,
    pub power_policy: PowerPolicyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::API_BASE_URL.to_string(),
            webapp_origin: crate::WEBAPP_ORIGIN.to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
            sec_ch_ua: "\"Microsoft Edge\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A_Brand\";v=\"24\"".to_string(),
            referral_code: None,
            api_logging: false,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 2000,
            cooldown_seconds: 300,
            fatal_cooldown_seconds: 900,
            fixed_cycle_seconds: None,
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            daily_check_in_id: 1,
            flow: MissionFlow::ExecuteThenUpdate,
        }
    }
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            max_tasks: 100,
            power_required: 1,
            power_recovery_minutes: 1.2,
            max_retries: 3,
            empty_result_retry_seconds: 10,
            error_retry_seconds: 5,
            power_policy: PowerPolicyKind::ServerReported,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(crate::DATA_FILE),
            log_file: PathBuf::from(crate::LOG_FILE),
        }
    }
}

impl TimingConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl BotConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if config_path.exists() {
            o_info!("📋 Loading configuration from {}", config_path.display());
            let config_str = fs::read_to_string(config_path)?;
            let config: BotConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            o_info!("📋 Creating default configuration at {}", config_path.display());
            let config = BotConfig::default();
            config.save(config_path)?;
            o_info!("💡 Edit {} to customize bot behavior", config_path.display());
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("api.base_url must not be empty".to_string());
        }
        if self.labeling.max_tasks == 0 {
            return Err("labeling.max_tasks must be greater than 0".to_string());
        }
        if self.labeling.power_required <= 0 {
            return Err("labeling.power_required must be greater than 0".to_string());
        }
        if self.labeling.power_recovery_minutes.is_nan() || self.labeling.power_recovery_minutes <= 0.0 {
            return Err("labeling.power_recovery_minutes must be greater than 0".to_string());
        }
        if self.labeling.max_retries == 0 {
            return Err("labeling.max_retries must be greater than 0".to_string());
        }
        if self.timing.cooldown_seconds == 0 || self.timing.fatal_cooldown_seconds == 0 {
            return Err("timing cooldowns must be greater than 0".to_string());
        }
        if self.timing.fixed_cycle_seconds == Some(0) {
            return Err("timing.fixed_cycle_seconds must be greater than 0 when set".to_string());
        }

        o_info!("✅ Configuration validation passed");
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        o_info!("📋 Configuration Summary:");
        o_info!("   🌐 API: {}", self.api.base_url);
        o_info!("   📄 Accounts file: {}", self.files.data_file.display());
        o_info!("   ⏱️ Request delay: {}ms", self.timing.request_delay_ms);
        match self.timing.fixed_cycle_seconds {
            Some(seconds) => o_info!("   🔄 Cycle interval: {}s (fixed)", seconds),
            None => o_info!("   🔄 Cycle interval: energy recovery ({} min/unit)", self.labeling.power_recovery_minutes),
        }
        o_info!("   🏷️ Labeling: up to {} tasks, {:?} power", self.labeling.max_tasks, self.labeling.power_policy);
    }
}
