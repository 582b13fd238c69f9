// Rynus labeling bot - main entry point

use clap::Parser;
use rynus_bot::output_broker::{init_output_broker, BrokerSettings};
use rynus_bot::pacing::console_countdown;
use rynus_bot::{o_error, o_info};
use rynus_bot::{Automation, BotConfig, PowerPolicyKind, RynusClient, TokioPacer, CONFIG_FILE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rynus-bot",
    version,
    about = "Daily check-in, heartbeat and labeling-task loop for every account in data.txt"
)]
struct Cli {
    /// Configuration file, created with defaults when missing
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Credentials file (one token per line), overrides files.data_file
    #[arg(long)]
    data: Option<PathBuf>,

    /// Power tracking strategy, overrides labeling.power_policy
    #[arg(long, value_enum)]
    power_policy: Option<PowerPolicyKind>,

    /// Show debug lines on the console
    #[arg(short, long)]
    verbose: bool,

    /// Sleep without drawing the countdown line
    #[arg(long)]
    no_countdown: bool,

    /// Append one JSON line per API call to api_debug.log
    #[arg(long)]
    api_logging: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    println!("🚀 Rynus Labeling Bot Starting...");

    // The log file location lives in the config, so peek at it before the broker starts
    let log_file = std::fs::read_to_string(&cli.config)
        .ok()
        .and_then(|s| toml::from_str::<BotConfig>(&s).ok())
        .map(|c| c.files.log_file)
        .unwrap_or_else(|| PathBuf::from(rynus_bot::LOG_FILE));

    init_output_broker(BrokerSettings {
        verbose: cli.verbose,
        log_file: Some(log_file),
    });

    let mut config = BotConfig::load_or_create(&cli.config)?;
    if let Some(data) = cli.data {
        config.files.data_file = data;
    }
    if let Some(policy) = cli.power_policy {
        config.labeling.power_policy = policy;
    }
    if cli.api_logging {
        config.api.api_logging = true;
    }
    config.validate()?;
    config.print_summary();

    let client = match RynusClient::new(&config.api) {
        Ok(client) => client,
        Err(e) => {
            o_error!("❌ Could not build HTTP client: {}", e);
            rynus_bot::output_broker::get_output_broker().flush().await;
            return Err(e.into());
        }
    };

    let pacer = if cli.no_countdown {
        TokioPacer::new()
    } else {
        TokioPacer::with_progress(console_countdown())
    };

    o_info!("📄 Accounts are re-read from {} every cycle", config.files.data_file.display());

    let automation = Automation::new(client, pacer, config);
    automation.run_forever().await;

    Ok(())
}
