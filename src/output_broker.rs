use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use chrono::{DateTime, Local};
use tokio::sync::{mpsc, oneshot};

/// Central output broker that manages ALL log lines
/// Console output is filtered by verbosity, the log file keeps info and above
#[derive(Clone)]
pub struct OutputBroker {
    sender: mpsc::UnboundedSender<BrokerCommand>,
}

/// Output request that gets queued through the broker
pub struct OutputRequest {
    pub level: OutputLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

enum BrokerCommand {
    Line(OutputRequest),
    Flush(oneshot::Sender<()>),
}

/// Output levels, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputLevel {
    Error,
    Warn,
    Info,
    Success,
    Debug,
}

impl OutputLevel {
    pub fn label(&self) -> &'static str {
        match self {
            OutputLevel::Error => "error",
            OutputLevel::Warn => "warn",
            OutputLevel::Info => "info",
            OutputLevel::Success => "success",
            OutputLevel::Debug => "debug",
        }
    }

    /// File sink threshold: success ranks below info, so it stays on the console
    pub fn is_persisted(&self) -> bool {
        *self <= OutputLevel::Info
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrokerSettings {
    /// Show debug lines on the console
    pub verbose: bool,
    /// JSON-lines log file; `None` keeps output console-only
    pub log_file: Option<PathBuf>,
}

struct BrokerState {
    verbose: bool,
    log_file: Option<File>,
}

impl OutputBroker {
    /// Create a new output broker and start the background worker
    pub fn new(settings: BrokerSettings) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let log_file = settings.log_file.as_ref().and_then(|path| {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    eprintln!("⚠️ Could not open log file {}: {}", path.display(), e);
                    None
                }
            }
        });

        let state = BrokerState {
            verbose: settings.verbose,
            log_file,
        };

        // Plain thread so logging works from sync code and outside a runtime
        std::thread::spawn(move || Self::broker_worker(receiver, state));

        Self { sender }
    }

    /// Submit a line through the broker - ignored if the worker is gone
    pub fn output(&self, level: OutputLevel, message: String) {
        let request = OutputRequest {
            level,
            message,
            timestamp: Local::now(),
        };
        let _ = self.sender.send(BrokerCommand::Line(request));
    }

    /// Wait until every line submitted so far has been written
    pub async fn flush(&self) {
        let (ack_sender, ack_receiver) = oneshot::channel();
        if self.sender.send(BrokerCommand::Flush(ack_sender)).is_ok() {
            let _ = ack_receiver.await;
        }
    }

    fn broker_worker(mut receiver: mpsc::UnboundedReceiver<BrokerCommand>, mut state: BrokerState) {
        while let Some(command) = receiver.blocking_recv() {
            match command {
                BrokerCommand::Line(request) => Self::handle_output(&mut state, request),
                BrokerCommand::Flush(ack) => {
                    if let Some(file) = state.log_file.as_mut() {
                        let _ = file.flush();
                    }
                    let _ = ack.send(());
                }
            }
        }
    }

    fn handle_output(state: &mut BrokerState, request: OutputRequest) {
        if request.level != OutputLevel::Debug || state.verbose {
            println!("{}", format_console_line(&request));
        }

        if !request.level.is_persisted() {
            return;
        }

        if let Some(file) = state.log_file.as_mut() {
            let entry = serde_json::json!({
                "timestamp": request.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                "level": request.level.label(),
                "message": request.message,
            });
            let _ = writeln!(file, "{}", entry);
        }
    }
}

/// `2024-01-01 12:00:00 | INFO    | message`
pub fn format_console_line(request: &OutputRequest) -> String {
    format!(
        "{} | {:<7} | {}",
        request.timestamp.format("%Y-%m-%d %H:%M:%S"),
        request.level.label().to_uppercase(),
        request.message
    )
}

/// Global output broker instance
static GLOBAL_BROKER: OnceLock<OutputBroker> = OnceLock::new();

/// Initialize the global output broker; later calls keep the first settings
pub fn init_output_broker(settings: BrokerSettings) -> &'static OutputBroker {
    GLOBAL_BROKER.get_or_init(|| OutputBroker::new(settings))
}

/// Get the global output broker, console-only if it was never initialized
pub fn get_output_broker() -> &'static OutputBroker {
    GLOBAL_BROKER.get_or_init(|| OutputBroker::new(BrokerSettings::default()))
}

#[macro_export]
macro_rules! o_error {
    ($($arg:tt)*) => {{
        $crate::output_broker::get_output_broker()
            .output($crate::output_broker::OutputLevel::Error, format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! o_warn {
    ($($arg:tt)*) => {{
        $crate::output_broker::get_output_broker()
            .output($crate::output_broker::OutputLevel::Warn, format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! o_info {
    ($($arg:tt)*) => {{
        $crate::output_broker::get_output_broker()
            .output($crate::output_broker::OutputLevel::Info, format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! o_success {
    ($($arg:tt)*) => {{
        $crate::output_broker::get_output_broker()
            .output($crate::output_broker::OutputLevel::Success, format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! o_debug {
    ($($arg:tt)*) => {{
        $crate::output_broker::get_output_broker()
            .output($crate::output_broker::OutputLevel::Debug, format!($($arg)*));
    }};
}
