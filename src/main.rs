//! Redis Viewer - Entry Point

use clap::Parser;
use redis_viewer::config::{CliOverrides, StoreMode};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Redis Viewer - TUI for browsing keys and values of a Redis deployment
#[derive(Parser, Debug)]
#[command(name = "redis-viewer")]
#[command(version)]
#[command(about = "Interactive terminal viewer for Redis keys and values")]
pub struct Args {
    /// Deployment topology (overrides config file)
    #[arg(short, long, value_enum)]
    pub mode: Option<StoreMode>,

    /// Store address as host:port; repeat for sentinel or cluster nodes
    #[arg(short, long = "addr")]
    pub addrs: Vec<String>,

    /// Logical database index (standalone and sentinel only)
    #[arg(long)]
    pub db: Option<i64>,

    /// Maximum number of keys loaded per search (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: Option<u32>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            mode: self.mode,
            addrs: self.addrs.clone(),
            db: self.db,
            count: self.count.and_then(|c| usize::try_from(c).ok()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = redis_viewer::config::load_config_with_precedence(args.config.clone())?;
        let merged = redis_viewer::config::merge_config(config_file);
        let with_env = redis_viewer::config::apply_env_overrides(merged);
        let with_cli = redis_viewer::config::apply_cli_overrides(with_env, args.overrides());
        redis_viewer::config::validate(with_cli)?
    };

    redis_viewer::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    // An unreachable store at startup is fatal; later failures only surface per task.
    let store = match redis_viewer::store::connect(&config) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Startup connection failed");
            return Err(Box::new(redis_viewer::model::AppError::from(e)));
        }
    };

    let colors = redis_viewer::view::ColorConfig::from_env_and_args(args.no_color);
    redis_viewer::view::run(&config, Arc::new(store), colors)?;

    info!("Exited cleanly");
    Ok(())
}
