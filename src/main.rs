use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use proctop::app::{self, App};
use proctop::config::{Config, load_config, load_config_from_path};
use proctop::event::TerminalEvents;
use proctop::logging;
use proctop::ui::TerminalSession;

#[derive(Parser)]
#[command(
    name = "proctop",
    about = "Terminal process monitor reading /proc"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Initial sort: pid, cpu, memory
    #[arg(long)]
    sort: Option<String>,

    /// Write debug logs as JSON lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path)?;
    }
    let config = load_config_for_cli(&cli);
    tracing::debug!(?config, "starting");

    let mut app = App::new(&config);
    let mut session = TerminalSession::start()?;
    let result = app::run(session.terminal(), &mut app, &mut TerminalEvents);
    drop(session);

    result
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref sort) = cli.sort {
        config.general.default_sort = sort.clone();
    }

    config
}
