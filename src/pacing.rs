// Sleep primitive used for every pause in the bot
use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// Called about once a second with the time left and the pause label
pub type ProgressFn = Arc<dyn Fn(Duration, &str) + Send + Sync>;

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration, label: &str);
}

/// Real sleeps on the tokio timer, optionally reporting progress
#[derive(Clone, Default)]
pub struct TokioPacer {
    progress: Option<ProgressFn>,
}

impl TokioPacer {
    pub fn new() -> Self {
        Self { progress: None }
    }

    pub fn with_progress(progress: ProgressFn) -> Self {
        Self { progress: Some(progress) }
    }
}

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration, label: &str) {
        let Some(progress) = &self.progress else {
            tokio::time::sleep(duration).await;
            return;
        };

        let deadline = tokio::time::Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            progress(remaining, label);
            if remaining.is_zero() {
                break;
            }
            tokio::time::sleep(remaining.min(Duration::from_secs(1))).await;
        }
    }
}

/// `HH:MM:SS`, rounded up to the next second
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Single-line countdown on stdout
pub fn console_countdown() -> ProgressFn {
    Arc::new(|remaining: Duration, label: &str| {
        let mut stdout = std::io::stdout();
        if remaining.is_zero() {
            let _ = write!(stdout, "\r\x1b[2K");
        } else {
            let _ = write!(stdout, "\r\x1b[2K⏳ {}: {}", label, format_hms(remaining));
        }
        let _ = stdout.flush();
    })
}
