//! Feed writer: pretty JSON, 2-space indent, non-ASCII kept literal.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::feed::FeedDocument;

/// Serializes `feed` to `path`, replacing any existing file.
pub fn write_feed(feed: &FeedDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, feed.root())
        .with_context(|| format!("failed to serialize feed to {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
