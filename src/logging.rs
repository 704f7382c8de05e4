use std::fs::{self, File};
use std::path::Path;

use color_eyre::eyre::{Result, eyre};

/// Routes `tracing` output to a JSON-lines file. The terminal belongs to the UI,
/// so nothing is ever logged to stdout or stderr.
pub fn init_file_logging(output_path: &Path) -> Result<()> {
    use tracing_subscriber::fmt::format::FmtSpan;

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(output_path)?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::sync::Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}
