use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use crate::card::RenderedCard;

/// JSON payload of a rendered card: stats, mode and rows
pub fn format_json(card: &RenderedCard) -> Result<String> {
    serde_json::to_string_pretty(card).context("Failed to serialize card data")
}

/// Write to `path` atomically, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = AtomicWriteFile::open(path)
                .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            file.commit()
                .with_context(|| format!("Failed to save {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
