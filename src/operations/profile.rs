// Profile, mission list and heartbeat calls with safe fallbacks
use crate::client::{ApiError, RynusApi};
use crate::models::{Account, LevelInfo, Mission, UserProfile};
use crate::{o_error, o_info, o_warn};

/// Current profile, `None` on any failure
pub async fn fetch_profile<A: RynusApi + ?Sized>(api: &A, account: &Account) -> Option<UserProfile> {
    match try_fetch_profile(api, account).await {
        Ok(profile) => profile,
        Err(e) => {
            o_error!("Error getting user info for {}: {}", account.display_name(), e);
            None
        }
    }
}

/// Like `fetch_profile` but keeps the error so callers can tell a rejected credential apart
pub async fn try_fetch_profile<A: RynusApi + ?Sized>(api: &A, account: &Account) -> Result<Option<UserProfile>, ApiError> {
    let profile = api.get_user_info(account).await?;
    if profile.is_none() {
        o_warn!("No user data returned for {}", account.display_name());
    }
    Ok(profile)
}

/// Mission list, empty on any failure
pub async fn fetch_missions<A: RynusApi + ?Sized>(api: &A, account: &Account, profile: &UserProfile) -> Vec<Mission> {
    match api.get_missions(account, profile.id).await {
        Ok(missions) => missions,
        Err(e) => {
            o_error!("Error getting missions list: {}", e);
            Vec::new()
        }
    }
}

/// Fire-and-forget; a failure is only logged
pub async fn send_heartbeat<A: RynusApi + ?Sized>(api: &A, account: &Account, profile: &UserProfile) -> bool {
    match api.heartbeat(account, profile.id).await {
        Ok(()) => true,
        Err(e) => {
            o_error!("Error updating heartbeat: {}", e);
            false
        }
    }
}

pub fn display_profile(profile: &UserProfile, account: &Account) {
    let level = LevelInfo::for_level(profile.level_id);

    o_info!("=== Account Information ===");
    o_info!("User ID: {}", profile.id);
    o_info!("Username: {}", account.username.as_deref().unwrap_or("-"));
    o_info!("User Code: {}", profile.user_code);
    o_info!("Region: {}", profile.region.as_deref().unwrap_or("-"));
    o_info!("Current Balance: {}", profile.balance);
    o_info!("Extra Balance Rental: {}", profile.extra_balance_rental);
    o_info!("Total Completed Tasks: {}", profile.completed_tasks);
    o_info!("User Power: {}/{}", profile.user_power, level.maximum_energy);
    o_info!("User Role: {}", profile.user_role.as_deref().unwrap_or("-"));
    o_info!("Level: {} ({})", level.name, level.groups);
    o_info!("Task Reward: {}", level.text_task_point);
    o_info!("===========================");
}
