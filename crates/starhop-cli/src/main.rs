mod replay;
mod server;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rmcp::service::ServerInitializeError;
use rmcp::{ServiceExt, transport::stdio};
use starhop_core::{NavigationMachine, default_catalog};

#[derive(Parser)]
#[command(name = "starhop", about = "Starhop spacecraft navigation engine")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    /// Seed for the loading-progress RNG (random if unset)
    #[arg(long, global = true, env = "STARHOP_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server on stdio transport, ticking the machine in real time
    Serve {
        /// Frame interval in milliseconds
        #[arg(long, default_value_t = 16.0, env = "STARHOP_FRAME_MS")]
        frame_ms: f64,
    },

    /// Replay a TOML input script in simulated time, printing JSON snapshots
    Replay {
        /// Script file path
        script: PathBuf,
    },

    /// List the destination catalog
    Destinations,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Serve { frame_ms } => cmd_serve(&cli, *frame_ms).await,
        Commands::Replay { script } => cmd_replay(&cli, script),
        Commands::Destinations => cmd_destinations(),
    }
}

async fn cmd_serve(cli: &Cli, frame_ms: f64) -> Result<()> {
    if !frame_ms.is_finite() || frame_ms <= 0.0 {
        anyhow::bail!("--frame-ms must be a positive number, got {frame_ms}");
    }

    let machine = NavigationMachine::new(default_catalog(), make_rng(cli.seed));
    let server = server::StarhopServer::new(machine, server::headless_ambience());
    let ticker = server.spawn_ticker(Duration::from_secs_f64(frame_ms / 1000.0));
    tracing::info!("starting MCP server (frame {frame_ms}ms)");

    let result = match server.clone().serve(stdio()).await {
        Ok(service) => service
            .waiting()
            .await
            .map(|reason| tracing::info!("MCP service ended: {reason:?}"))
            .context("MCP service task failed"),
        // A client that hangs up before initializing is just an early EOF
        Err(e @ ServerInitializeError::ConnectionClosed(_)) => {
            tracing::warn!("MCP client left before initialization: {e}");
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("failed to start MCP server")),
    };

    server.shutdown(ticker).await;
    result
}

fn cmd_replay(cli: &Cli, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let script = replay::Script::parse(&text)
        .with_context(|| format!("invalid replay script {}", path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    replay::run(&script, cli.seed, &mut out)?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

fn cmd_destinations() -> Result<()> {
    let catalog = default_catalog();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (index, dest) in catalog.iter().enumerate() {
        writeln!(
            out,
            "{index}  {:<12} {:<12} {:>5.1} {:>5.1}",
            dest.id, dest.name, dest.anchor.x, dest.anchor.y
        )?;
    }
    Ok(())
}
