//! CLI entry point for the Dublin RTPI next-bus sensor.
//!
//! Provides subcommands for polling a stop the way a host automation
//! platform would (a refresh per tick) and for one-off timetable lookups.

use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dublin_rtpi::config::{self, SensorConfig};
use dublin_rtpi::fetch::BasicClient;
use dublin_rtpi::infra::smartdublin::SmartDublinClient;
use dublin_rtpi::scheduler::{self, IntervalTicker};
use dublin_rtpi::sensor::NextBusSensor;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "dublin_rtpi")]
#[command(about = "Next-bus sensor for Dublin RTPI stops", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll a stop at a fixed interval, publishing a sensor update per tick
    Watch {
        /// Transit stop identifier to query
        #[arg(value_name = "STOP_ID")]
        stopid: String,

        /// Display label for the sensor
        #[arg(short, long, default_value = config::DEFAULT_NAME)]
        name: String,

        /// Restrict results to one route
        #[arg(short, long, default_value = "")]
        route: String,

        /// Seconds between refreshes
        #[arg(short, long, default_value_t = config::DEFAULT_SCAN_INTERVAL.as_secs())]
        interval: u64,

        /// HTTP request timeout in seconds
        #[arg(long, default_value_t = config::DEFAULT_REQUEST_TIMEOUT.as_secs())]
        timeout: u64,

        /// Number of refreshes to run (0 = infinite)
        #[arg(short = 'c', long, default_value_t = 0)]
        count: usize,
    },
    /// Fetch a stop's timetable once and print it as JSON
    Once {
        /// Transit stop identifier to query
        #[arg(value_name = "STOP_ID")]
        stopid: String,

        /// Restrict results to one route
        #[arg(short, long, default_value = "")]
        route: String,

        /// HTTP request timeout in seconds
        #[arg(long, default_value_t = config::DEFAULT_REQUEST_TIMEOUT.as_secs())]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/dublin_rtpi.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("dublin_rtpi.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            stopid,
            name,
            route,
            interval,
            timeout,
            count,
        } => {
            let provider = smartdublin_provider(timeout)?;
            let config = SensorConfig::new(stopid)
                .with_name(name)
                .with_route(route)
                .with_scan_interval(Duration::from_secs(interval));

            info!(
                stop_id = %config.stop_id,
                route = %config.route,
                interval_secs = interval,
                "Starting sensor"
            );

            let mut sensor = NextBusSensor::new(config.clone());
            let mut ticker = if count == 0 {
                IntervalTicker::new(config.scan_interval)
            } else {
                IntervalTicker::bounded(config.scan_interval, count)
            };

            scheduler::run(&mut sensor, &provider, &mut ticker).await;
        }
        Commands::Once {
            stopid,
            route,
            timeout,
        } => {
            let provider = smartdublin_provider(timeout)?;
            let config = SensorConfig::new(stopid).with_route(route);
            let mut sensor = NextBusSensor::new(config);

            sensor.refresh(&provider).await?;

            // attributes are always set after a successful refresh
            if let Some(attributes) = sensor.attributes() {
                println!("{}", serde_json::to_string_pretty(attributes)?);
            }
        }
    }

    Ok(())
}

fn smartdublin_provider(timeout_secs: u64) -> Result<SmartDublinClient<BasicClient>> {
    let http = BasicClient::new(
        Duration::from_secs(timeout_secs),
        config::DEFAULT_CONNECT_TIMEOUT,
    )?;
    Ok(SmartDublinClient::new(http))
}
