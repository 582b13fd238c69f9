// Automation module - account cycle driver and supervision loop
use crate::client::RynusApi;
use crate::config::BotConfig;
use crate::models::{Account, LevelInfo};
use crate::operations::*;
use crate::pacing::Pacer;
use crate::power::recovery_wait;
use crate::{o_error, o_info, o_success, o_warn};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum AccountOutcome {
    Processed { tasks_completed: u32, earned: f64 },
    ProfileUnavailable,
    /// The server refused the credential (401/403)
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Completed { accounts: usize, next_cycle: Duration },
    /// Retry after the regular cooldown
    Recoverable(String),
    /// Nothing this cycle can fix on its own; retry after the long cooldown
    Fatal(String),
}

/// Single place that decides how long to rest after a cycle
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    pub cooldown: Duration,
    pub fatal_cooldown: Duration,
}

impl BackoffPolicy {
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            cooldown: Duration::from_secs(config.timing.cooldown_seconds),
            fatal_cooldown: Duration::from_secs(config.timing.fatal_cooldown_seconds),
        }
    }

    pub fn delay_for(&self, outcome: &CycleOutcome) -> (Duration, &'static str) {
        match outcome {
            CycleOutcome::Completed { next_cycle, .. } => (*next_cycle, "Next cycle in"),
            CycleOutcome::Recoverable(_) => (self.cooldown, "Retrying in"),
            CycleOutcome::Fatal(_) => (self.fatal_cooldown, "Retrying in"),
        }
    }
}

pub struct Automation<A, P> {
    api: A,
    pacer: P,
    config: BotConfig,
    backoff: BackoffPolicy,
}

impl<A: RynusApi, P: Pacer> Automation<A, P> {
    pub fn new(api: A, pacer: P, config: BotConfig) -> Self {
        let backoff = BackoffPolicy::from_config(&config);
        Self { api, pacer, config, backoff }
    }

    /// Runs until the process is killed
    pub async fn run_forever(&self) {
        o_info!("🤖 Starting continuous automation - press Ctrl+C to stop");

        let mut cycle_count: u64 = 0;
        loop {
            cycle_count += 1;
            o_info!("🔄 ═══════ AUTOMATION CYCLE #{} ═══════", cycle_count);
            self.supervise_once().await;
        }
    }

    /// One cycle followed by the rest the backoff policy picks for its outcome
    pub async fn supervise_once(&self) -> CycleOutcome {
        let outcome = self.run_cycle().await;
        let (delay, label) = self.backoff.delay_for(&outcome);

        match &outcome {
            CycleOutcome::Completed { accounts, .. } => {
                o_info!(
                    "All {} accounts processed. Waiting {} minutes for energy recovery...",
                    accounts,
                    (delay.as_secs_f64() / 60.0).round()
                );
            }
            CycleOutcome::Recoverable(reason) => {
                o_error!("Error in automation cycle: {}", reason);
                o_warn!("⏳ Retrying in {} seconds", delay.as_secs());
            }
            CycleOutcome::Fatal(reason) => {
                o_error!("Automation cycle cannot make progress: {}", reason);
                o_warn!("⏳ Retrying in {} seconds", delay.as_secs());
            }
        }

        self.pacer.pause(delay, label).await;
        outcome
    }

    pub async fn run_cycle(&self) -> CycleOutcome {
        let accounts = load_account_snapshot(&self.config.files.data_file);
        o_info!("Starting new automation cycle");

        let mut outcomes = Vec::with_capacity(accounts.len());
        for account in accounts.iter() {
            outcomes.push(self.process_account(account).await);
        }

        let Some(last) = accounts.last() else {
            o_warn!("No accounts loaded from {}", self.config.files.data_file.display());
            let next_cycle = self
                .config
                .timing
                .fixed_cycle_seconds
                .map(Duration::from_secs)
                .unwrap_or(self.backoff.cooldown);
            return CycleOutcome::Completed { accounts: 0, next_cycle };
        };

        if outcomes.iter().all(|o| *o == AccountOutcome::Rejected) {
            return CycleOutcome::Fatal(format!(
                "all {} accounts were rejected, refresh the tokens in {}",
                accounts.len(),
                self.config.files.data_file.display()
            ));
        }

        if let Some(seconds) = self.config.timing.fixed_cycle_seconds {
            return CycleOutcome::Completed {
                accounts: accounts.len(),
                next_cycle: Duration::from_secs(seconds),
            };
        }

        // Pace the next cycle on the energy cap of the last account
        match fetch_profile(&self.api, last).await {
            Some(profile) => {
                let level = LevelInfo::for_level(profile.level_id);
                CycleOutcome::Completed {
                    accounts: accounts.len(),
                    next_cycle: next_cycle_wait(level.maximum_energy, self.config.labeling.power_recovery_minutes),
                }
            }
            None => CycleOutcome::Recoverable(format!(
                "could not refresh profile of {} to schedule the next cycle",
                last.display_name()
            )),
        }
    }

    /// Profile → missions → heartbeat → labeling → final profile
    pub async fn process_account(&self, account: &Account) -> AccountOutcome {
        o_info!("Starting automation for user {}", account.display_name());
        let request_delay = self.config.timing.request_delay();

        let profile = match try_fetch_profile(&self.api, account).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return AccountOutcome::ProfileUnavailable,
            Err(e) if e.is_auth_failure() => {
                o_error!("Credential for {} was rejected: {}", account.display_name(), e);
                return AccountOutcome::Rejected;
            }
            Err(e) => {
                o_error!("Error getting user info for {}: {}", account.display_name(), e);
                return AccountOutcome::ProfileUnavailable;
            }
        };

        display_profile(&profile, account);

        MissionOperations::new(&self.api, &self.pacer, &self.config.missions, request_delay)
            .execute_all_missions(account, &profile)
            .await;
        self.pacer.pause(request_delay, "Waiting").await;

        send_heartbeat(&self.api, account, &profile).await;
        self.pacer.pause(request_delay, "Waiting").await;

        let labeling = LabelingOperations::new(&self.api, &self.pacer, &self.config.labeling, request_delay)
            .perform_labeling(account, &profile)
            .await;

        if let Some(updated) = &labeling.profile {
            o_info!("=== Final Account Status ===");
            display_profile(updated, account);
        }

        o_success!(
            "Finished {}: {} tasks, +{}",
            account.display_name(),
            labeling.report.tasks_completed,
            labeling.report.final_balance - labeling.report.initial_balance
        );

        AccountOutcome::Processed {
            tasks_completed: labeling.report.tasks_completed,
            earned: labeling.report.final_balance - labeling.report.initial_balance,
        }
    }
}

/// Time for a full energy bar to regenerate
pub fn next_cycle_wait(maximum_energy: i64, minutes_per_unit: f64) -> Duration {
    recovery_wait(maximum_energy, minutes_per_unit)
}
