/// Version injected at compile time via VPCSHARE_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("VPCSHARE_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use vpcshare::api::auth::{self, Credentials};
use vpcshare::api::client::VpcClient;
use vpcshare::api::tagging::TaggingClient;
use vpcshare::attributes::{ResourceData, Schema};
use vpcshare::config::{validate_endpoint, Config};
use vpcshare::share::reader::SHARE_REPLICA_ATTRIBUTE;
use vpcshare::share::{ReadOutcome, SourceShareReader};

/// Show the source share of a replica VPC file share
#[derive(Parser, Debug)]
#[command(name = "vpcshare", version, about, long_about = None)]
struct Args {
    /// Replica file share identifier
    share_replica: String,

    /// VPC region to use
    #[arg(short, long)]
    region: Option<String>,

    /// VPC API endpoint (defaults to the regional endpoint)
    #[arg(long)]
    endpoint: Option<String>,

    /// Global Tagging API endpoint
    #[arg(long)]
    tagging_endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// Remember --region in the config file
    #[arg(long)]
    save_region: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("vpcshare {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("vpcshare").join("vpcshare.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".vpcshare").join("vpcshare.log");
    }
    PathBuf::from("vpcshare.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();
    let region = args
        .region
        .clone()
        .unwrap_or_else(|| config.effective_region());
    if args.save_region {
        config.set_region(&region)?;
    }

    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.effective_vpc_endpoint(&region));
    let tagging_endpoint = args
        .tagging_endpoint
        .clone()
        .unwrap_or_else(|| config.effective_tagging_endpoint());
    validate_endpoint(&endpoint)?;
    validate_endpoint(&tagging_endpoint)?;

    let timeout = match args.timeout {
        Some(secs) => std::time::Duration::from_secs(secs),
        None => config.effective_timeout(),
    };

    if !auth::validate_region(&region) {
        tracing::warn!("Region {:?} does not look like a VPC region name", region);
    }
    tracing::info!("Using region: {}, endpoint: {}", region, endpoint);

    let credentials = Credentials::from_env()?;
    let vpc = VpcClient::new(
        credentials.clone(),
        &endpoint,
        &config.effective_api_version(),
        Some(timeout),
    )?;
    let tagging = TaggingClient::new(credentials, &tagging_endpoint, Some(timeout))?;
    let reader = SourceShareReader::new(vpc, tagging).with_timeout(timeout);

    let mut state = ResourceData::new(Schema::source_share());
    state.set(SHARE_REPLICA_ATTRIBUTE, args.share_replica.as_str())?;

    match reader.read(&mut state).await? {
        ReadOutcome::NotFound => {
            eprintln!("No source share found for replica {}", args.share_replica);
        }
        ReadOutcome::Found => {
            let value = state.to_json();
            let rendered = match args.output {
                OutputFormat::Json => serde_json::to_string_pretty(&value)?,
                OutputFormat::Yaml => serde_yaml::to_string(&value)?,
            };
            println!("{}", rendered);
        }
    }

    Ok(())
}
