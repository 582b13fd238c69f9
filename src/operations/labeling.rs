// Labeling-task farm loop
use crate::client::RynusApi;
use crate::config::LabelingConfig;
use crate::models::{Account, LabelTaskPayload, LabelingSession, LevelInfo, UserProfile};
use crate::operations::profile::fetch_profile;
use crate::pacing::Pacer;
use crate::power::{PowerCheck, PowerTracker};
use crate::{o_error, o_info, o_success, o_warn};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TaskCap,
    PowerExhausted,
    /// The server answered a task without a continuation key
    NoMoreTasks,
    RetriesExhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelingReport {
    pub tasks_completed: u32,
    pub submissions: u32,
    pub initial_balance: f64,
    pub final_balance: f64,
    pub remaining_power: i64,
    pub maximum_power: i64,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone)]
pub struct LabelingOutcome {
    pub report: LabelingReport,
    /// Re-fetched after the loop; `None` when that call failed
    pub profile: Option<UserProfile>,
}

pub struct LabelingOperations<'a, A: ?Sized, P: ?Sized> {
    api: &'a A,
    pacer: &'a P,
    settings: &'a LabelingConfig,
    request_delay: Duration,
}

impl<'a, A, P> LabelingOperations<'a, A, P>
where
    A: RynusApi + ?Sized,
    P: Pacer + ?Sized,
{
    pub fn new(api: &'a A, pacer: &'a P, settings: &'a LabelingConfig, request_delay: Duration) -> Self {
        Self { api, pacer, settings, request_delay }
    }

    /// Tracker for this profile under the configured power policy
    pub fn tracker_for(&self, profile: &UserProfile) -> Box<dyn PowerTracker> {
        let level = LevelInfo::for_level(profile.level_id);
        self.settings.power_policy.tracker(
            profile.user_power,
            level.maximum_energy,
            self.settings.power_recovery_minutes,
        )
    }

    pub async fn perform_labeling(&self, account: &Account, profile: &UserProfile) -> LabelingOutcome {
        let mut power = self.tracker_for(profile);
        let report = self.farm(account, profile, power.as_mut()).await;
        let profile = fetch_profile(self.api, account).await;
        LabelingOutcome { report, profile }
    }

    /// Submits tasks until the request cap, the power budget or the retry budget runs out
    pub async fn farm(&self, account: &Account, profile: &UserProfile, power: &mut dyn PowerTracker) -> LabelingReport {
        let level = LevelInfo::for_level(profile.level_id);
        let cost = self.settings.power_required;
        let mut session = LabelingSession::new(profile.extra_balance_rental);
        let mut retries: u32 = 0;
        let mut submissions: u32 = 0;

        o_info!("=== Starting Labeling Tasks ===");
        o_info!("Initial Balance: {}", session.initial_balance);
        o_info!("Initial Power: {}/{}", power.available(), power.maximum());

        let stop_reason = loop {
            // Every request counts toward the cap, including empty and failed ones
            if submissions >= self.settings.max_tasks {
                break StopReason::TaskCap;
            }

            match power.check(cost) {
                PowerCheck::Ready => {}
                PowerCheck::Exhausted => break StopReason::PowerExhausted,
                PowerCheck::Recover { deficit, wait } => {
                    o_warn!(
                        "Power {}/{} too low, waiting {} minutes for {} units to recover",
                        power.available(),
                        power.maximum(),
                        (wait.as_secs_f64() / 60.0).round(),
                        deficit
                    );
                    self.pacer.pause(wait, "Power recovery").await;
                    power.recovered(deficit);
                    continue;
                }
            }

            let payload = LabelTaskPayload::new(
                &account.raw_token,
                profile.id,
                session.next_key.clone(),
                level.text_task_point,
            );

            submissions += 1;
            match self.api.submit_label_task(account, &payload).await {
                Ok(Some(result)) => {
                    session.record(&result);
                    power.consume(cost);
                    retries = 0;

                    o_success!("Completed labeling task {}", session.task_count);
                    o_info!("Current Balance: {} (+{})", session.current_balance, session.earned());
                    o_info!("Remaining Power: {}/{}", power.available(), power.maximum());

                    if session.next_key.is_none() {
                        o_warn!("Server returned no continuation key, no more tasks this cycle");
                        break StopReason::NoMoreTasks;
                    }
                    self.pacer.pause(self.request_delay, "Waiting").await;
                }
                Ok(None) => {
                    retries += 1;
                    if retries >= self.settings.max_retries {
                        o_warn!("No tasks available after multiple retries");
                        break StopReason::RetriesExhausted;
                    }
                    o_warn!(
                        "No tasks available, retrying in {} seconds... (Attempt {}/{})",
                        self.settings.empty_result_retry_seconds,
                        retries,
                        self.settings.max_retries
                    );
                    self.pacer
                        .pause(Duration::from_secs(self.settings.empty_result_retry_seconds), "Retrying")
                        .await;
                    self.pacer.pause(self.request_delay, "Waiting").await;
                }
                Err(e) => {
                    o_error!("Error in labeling task: {}", e);
                    retries += 1;
                    if retries >= self.settings.max_retries {
                        o_error!("Max retry attempts reached, stopping labeling");
                        break StopReason::RetriesExhausted;
                    }
                    self.pacer
                        .pause(Duration::from_secs(self.settings.error_retry_seconds), "Retrying")
                        .await;
                }
            }
        };

        if stop_reason != StopReason::TaskCap && power.available() >= cost {
            o_warn!(
                "Stopped with {}/{} power remaining due to no available tasks",
                power.available(),
                power.maximum()
            );
        } else {
            o_info!("Finished labeling with {}/{} power remaining", power.available(), power.maximum());
        }

        LabelingReport {
            tasks_completed: session.task_count,
            submissions,
            initial_balance: session.initial_balance,
            final_balance: session.current_balance,
            remaining_power: power.available(),
            maximum_power: power.maximum(),
            stop_reason,
        }
    }
}
