// Power budget tracking for the labeling loop
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which power semantics the labeling loop runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PowerPolicyKind {
    /// Power read once from the profile and only spent; stop when it runs out
    ServerReported,
    /// Power capped at the level maximum; wait out the deficit and assume it regenerated
    ClientSimulated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PowerCheck {
    Ready,
    /// Sleep `wait`, then credit `deficit` units back
    Recover { deficit: i64, wait: Duration },
    Exhausted,
}

pub trait PowerTracker: Send {
    fn available(&self) -> i64;
    fn maximum(&self) -> i64;
    fn check(&self, cost: i64) -> PowerCheck;
    fn consume(&mut self, cost: i64);
    fn recovered(&mut self, deficit: i64);
}

impl PowerPolicyKind {
    pub fn tracker(&self, user_power: i64, maximum: i64, recovery_minutes: f64) -> Box<dyn PowerTracker> {
        match self {
            PowerPolicyKind::ServerReported => Box::new(ServerReportedPower::new(user_power, maximum)),
            PowerPolicyKind::ClientSimulated => {
                Box::new(SimulatedRecoveryPower::new(user_power, maximum, recovery_minutes))
            }
        }
    }
}

/// `units × minutes-per-unit`, as a sleep duration
pub fn recovery_wait(units: i64, minutes_per_unit: f64) -> Duration {
    let millis = units.max(0) as f64 * minutes_per_unit * 60_000.0;
    Duration::from_millis(millis.max(0.0).round() as u64)
}

#[derive(Debug, Clone)]
pub struct ServerReportedPower {
    available: i64,
    maximum: i64,
}

impl ServerReportedPower {
    pub fn new(available: i64, maximum: i64) -> Self {
        Self { available, maximum }
    }
}

impl PowerTracker for ServerReportedPower {
    fn available(&self) -> i64 {
        self.available
    }

    fn maximum(&self) -> i64 {
        self.maximum
    }

    fn check(&self, cost: i64) -> PowerCheck {
        if self.available >= cost {
            PowerCheck::Ready
        } else {
            PowerCheck::Exhausted
        }
    }

    fn consume(&mut self, cost: i64) {
        self.available -= cost;
    }

    fn recovered(&mut self, _deficit: i64) {}
}

#[derive(Debug, Clone)]
pub struct SimulatedRecoveryPower {
    available: i64,
    maximum: i64,
    minutes_per_unit: f64,
}

impl SimulatedRecoveryPower {
    pub fn new(available: i64, maximum: i64, minutes_per_unit: f64) -> Self {
        let maximum = maximum.max(0);
        Self {
            available: available.clamp(0, maximum),
            maximum,
            minutes_per_unit,
        }
    }
}

impl PowerTracker for SimulatedRecoveryPower {
    fn available(&self) -> i64 {
        self.available
    }

    fn maximum(&self) -> i64 {
        self.maximum
    }

    fn check(&self, cost: i64) -> PowerCheck {
        if self.available >= cost {
            return PowerCheck::Ready;
        }
        // A full bar still can't pay for one task
        if self.maximum < cost {
            return PowerCheck::Exhausted;
        }
        let deficit = self.maximum - self.available;
        PowerCheck::Recover {
            deficit,
            wait: recovery_wait(deficit, self.minutes_per_unit),
        }
    }

    fn consume(&mut self, cost: i64) {
        self.available = (self.available - cost).max(0);
    }

    fn recovered(&mut self, deficit: i64) {
        self.available = (self.available + deficit).min(self.maximum);
    }
}
