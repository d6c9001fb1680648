//! MRMS radar viewer.
//!
//! Polls the radar API (or an in-process radar service with `--local`),
//! renders each record and writes the frame to disk.
//!
//! While running, type a command and press enter:
//! `r` refresh now, `p` pause/resume auto-refresh, `s` status, `q` quit.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use acquisition::{AcquisitionConfig, HttpProbe, RadarService, RecordSource};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use radar_viewer::{ApiClient, FrameWriter, LogObserver, RefreshController, RefreshState};

#[derive(Parser, Debug)]
#[command(name = "radar-viewer")]
#[command(about = "Auto-refreshing MRMS radar frame viewer")]
struct Args {
    /// Base URL of the radar API
    #[arg(long, default_value = "http://localhost:5000", env = "RADAR_API_URL")]
    api_url: String,

    /// Resolve sources in-process instead of calling the API
    #[arg(long)]
    local: bool,

    /// Directory holding sources.yaml (with --local)
    #[arg(long, default_value = "config", env = "RADAR_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Directory to write frames into
    #[arg(short, long, env = "RADAR_OUTPUT_DIR")]
    output: Option<PathBuf>,

    /// Also write an SVG next to each PNG
    #[arg(long)]
    svg: bool,

    /// Frame width in pixels
    #[arg(long, default_value = "1000")]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value = "700")]
    height: u32,

    /// Seconds between refreshes
    #[arg(long, default_value = "120", env = "RADAR_REFRESH_SECS")]
    interval_secs: u64,

    /// API request timeout in seconds
    #[arg(long, default_value = "30")]
    request_timeout_secs: u64,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Start with auto-refresh paused
    #[arg(long)]
    no_auto_refresh: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    anyhow::ensure!(
        args.width > 0 && args.height > 0,
        "Frame dimensions must be positive"
    );
    anyhow::ensure!(args.interval_secs > 0, "Refresh interval must be positive");

    let source = build_source(&args)?;

    let mut controller = RefreshController::new(
        source,
        args.width,
        args.height,
        Duration::from_secs(args.interval_secs),
    )
    .with_observer(Arc::new(LogObserver));
    if let Some(dir) = &args.output {
        info!(dir = %dir.display(), svg = args.svg, "Writing frames");
        controller = controller.with_observer(Arc::new(FrameWriter::new(dir, args.svg)));
    }

    if args.once {
        let report = controller.trigger_now().await;
        println!("{}", report.status_line());
        return Ok(());
    }

    if args.no_auto_refresh {
        // Still show something on launch.
        controller.trigger_now().await;
    } else {
        controller.start();
    }

    run_console(&controller).await;
    controller.shutdown().await;
    info!("Viewer stopped");
    Ok(())
}

fn build_source(args: &Args) -> Result<Arc<dyn RecordSource>> {
    if args.local {
        let config = AcquisitionConfig::load_from_dir(&args.config_dir)
            .with_context(|| format!("Failed to load config from {}", args.config_dir.display()))?;
        let probe = Arc::new(HttpProbe::new()?);
        let service = RadarService::from_config(&config, probe)?;
        info!(candidates = config.candidates.len(), "Resolving sources in-process");
        Ok(Arc::new(service))
    } else {
        let client = ApiClient::new(
            &args.api_url,
            Duration::from_secs(args.request_timeout_secs),
        )?;
        info!(url = %client.latest_url(), "Fetching from radar API");
        Ok(Arc::new(client))
    }
}

/// Read commands from stdin until `q` or Ctrl+C. Closing stdin leaves
/// the viewer running until Ctrl+C.
async fn run_console(controller: &RefreshController) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        let read = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
            read = lines.next_line(), if stdin_open => read,
        };

        match read {
            Ok(Some(cmd)) => {
                if !handle_command(controller, cmd.trim()).await {
                    break;
                }
            }
            Ok(None) => stdin_open = false,
            Err(e) => {
                warn!(error = %e, "Failed to read stdin");
                stdin_open = false;
            }
        }
    }
}

/// Returns false when the viewer should exit.
async fn handle_command(controller: &RefreshController, cmd: &str) -> bool {
    match cmd {
        "r" => {
            let report = controller.trigger_now().await;
            println!("{}", report.status_line());
        }
        "p" => match controller.state() {
            RefreshState::Polling => {
                controller.stop();
                println!("Auto-refresh paused");
            }
            RefreshState::Idle => {
                controller.start();
                println!("Auto-refresh resumed");
            }
        },
        "s" => {
            let status = controller
                .current()
                .map(|r| format!("{} (cycle {}, {})", r.status_line(), r.cycle, r.completed_at))
                .unwrap_or_else(|| "no frame yet".to_string());
            println!(
                "{} every {}s: {}",
                controller.state(),
                controller.interval().as_secs(),
                status
            );
        }
        "q" => return false,
        "" => {}
        other => println!("Unknown command '{}'. Use r, p, s or q.", other),
    }
    true
}
