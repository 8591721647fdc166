//! Local icons directory: one file per mirrored image, never overwritten.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::HttpClient;

/// Result of making sure one image exists locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Already on disk; no request was made.
    Present,
    Downloaded { bytes: u64 },
    Failed { reason: String },
}

/// Per-pass tally of [`DownloadOutcome`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    pub present: usize,
    pub failed: usize,
}

impl DownloadReport {
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Present => self.present += 1,
            DownloadOutcome::Downloaded { .. } => self.downloaded += 1,
            DownloadOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Opens `dir`, creating it (and parents) if absent.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create icons directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.path_for(file_name).exists()
    }

    /// Downloads `url` to `file_name` unless that file already exists.
    ///
    /// Only HTTP 200 is stored. Every failure is logged and reported as
    /// [`DownloadOutcome::Failed`]; none of them abort the caller.
    pub fn ensure(
        &self,
        client: &dyn HttpClient,
        url: &str,
        file_name: &str,
        timeout: Duration,
    ) -> DownloadOutcome {
        if self.contains(file_name) {
            tracing::debug!(file = file_name, "already mirrored, skipping download");
            return DownloadOutcome::Present;
        }

        let resp = match client.get(url, timeout) {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(file = file_name, "download failed: {}", e);
                return DownloadOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };
        if resp.status != 200 {
            tracing::error!(file = file_name, "image download returned HTTP {}", resp.status);
            return DownloadOutcome::Failed {
                reason: format!("HTTP {}", resp.status),
            };
        }

        match self.save(file_name, &resp.body) {
            Ok(()) => {
                tracing::debug!(file = file_name, bytes = resp.body.len(), "downloaded");
                DownloadOutcome::Downloaded {
                    bytes: resp.body.len() as u64,
                }
            }
            Err(e) => {
                tracing::error!(file = file_name, "failed to store image: {:#}", e);
                DownloadOutcome::Failed {
                    reason: format!("{:#}", e),
                }
            }
        }
    }

    /// Writes `<name>.part` then renames it into place, so a rerun never
    /// mistakes a truncated write for a mirrored image.
    fn save(&self, file_name: &str, data: &[u8]) -> Result<()> {
        let final_path = self.path_for(file_name);
        let temp_path = self.path_for(&format!("{file_name}.part"));
        fs::write(&temp_path, data)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                temp_path.display(),
                final_path.display()
            )
        })?;
        Ok(())
    }
}
