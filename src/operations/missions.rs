// Daily check-in mission executor
use crate::client::{ApiError, RynusApi};
use crate::config::{MissionConfig, MissionFlow};
use crate::models::{Account, Mission, MissionStatus, UserProfile};
use crate::operations::profile::fetch_missions;
use crate::pacing::Pacer;
use crate::{o_error, o_info, o_success};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionOutcome {
    SkippedNotDaily,
    AlreadyCompleted,
    AlreadyCompletedToday,
    UnknownStatus(String),
    /// Calls went through; `confirmed` when the refreshed list shows completed-today
    Executed { confirmed: bool },
    Failed(String),
}

pub struct MissionOperations<'a, A: ?Sized, P: ?Sized> {
    api: &'a A,
    pacer: &'a P,
    settings: &'a MissionConfig,
    request_delay: Duration,
}

impl<'a, A, P> MissionOperations<'a, A, P>
where
    A: RynusApi + ?Sized,
    P: Pacer + ?Sized,
{
    pub fn new(api: &'a A, pacer: &'a P, settings: &'a MissionConfig, request_delay: Duration) -> Self {
        Self { api, pacer, settings, request_delay }
    }

    /// Completes the daily check-in when pending; every other case makes no API call
    pub async fn execute_mission(&self, account: &Account, profile: &UserProfile, mission: &Mission) -> MissionOutcome {
        if mission.id != self.settings.daily_check_in_id {
            o_info!("Skipping non-daily mission: {}", mission.name);
            return MissionOutcome::SkippedNotDaily;
        }

        match mission.status() {
            MissionStatus::Completed => {
                o_info!("Mission \"{}\" already completed", mission.name);
                return MissionOutcome::AlreadyCompleted;
            }
            MissionStatus::CompletedToday => {
                o_info!("Daily mission \"{}\" already completed today", mission.name);
                return MissionOutcome::AlreadyCompletedToday;
            }
            MissionStatus::Other(code) => {
                o_info!("Mission \"{}\" status: {}", mission.name, code);
                return MissionOutcome::UnknownStatus(code);
            }
            MissionStatus::Pending => {}
        }

        if let Err(e) = self.submit(account, profile, mission).await {
            o_error!("Error executing mission {}: {}", mission.id, e);
            return MissionOutcome::Failed(e.to_string());
        }

        let refreshed = fetch_missions(self.api, account, profile).await;
        let confirmed = match refreshed.iter().find(|m| m.id == mission.id) {
            Some(updated) if updated.status() == MissionStatus::CompletedToday => {
                o_success!("Daily check-in completed for today");
                true
            }
            Some(updated) => {
                o_info!("Mission status updated to: {}", updated.mission_status);
                false
            }
            None => false,
        };

        MissionOutcome::Executed { confirmed }
    }

    async fn submit(&self, account: &Account, profile: &UserProfile, mission: &Mission) -> Result<(), ApiError> {
        if self.settings.flow == MissionFlow::ExecuteThenUpdate {
            self.api.execute_mission(account, mission.id, &profile.user_code).await?;
            self.pacer.pause(self.request_delay, "Waiting").await;
        }
        self.api.update_mission_status(account, mission.id, &profile.user_code).await
    }

    /// Walks the whole mission list, pausing between missions
    pub async fn execute_all_missions(&self, account: &Account, profile: &UserProfile) -> Vec<(i64, MissionOutcome)> {
        let missions = fetch_missions(self.api, account, profile).await;

        o_info!("=== Executing Missions ===");
        let mut outcomes = Vec::with_capacity(missions.len());
        for mission in &missions {
            o_info!("Processing mission: {}", mission.name);
            let outcome = self.execute_mission(account, profile, mission).await;
            outcomes.push((mission.id, outcome));
            self.pacer.pause(self.request_delay, "Waiting").await;
        }
        o_success!("=== All Missions Processed ===");

        outcomes
    }
}
