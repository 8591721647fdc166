use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::mirror::MirrorKind;

/// One output feed: which CDN front it targets and where it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorSpec {
    pub kind: MirrorKind,
    /// Output JSON file, relative to the work directory.
    pub output: String,
    /// Whether this pass fetches missing images. Later passes normally reuse them.
    #[serde(default)]
    pub download: bool,
}

/// Global configuration loaded from `~/.config/icon-mirror/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Upstream feed URL.
    pub source_url: String,
    /// Icons directory, relative to the work directory. Also the path segment
    /// under the branch in mirror URLs.
    pub icons_dir: String,
    /// Branch that hosts the mirrored images and feeds.
    pub target_branch: String,
    pub feed_timeout_secs: u64,
    pub image_timeout_secs: u64,
    /// Overrides the default `icon-mirror/<version>` User-Agent.
    #[serde(default)]
    pub user_agent: Option<String>,
    pub mirrors: Vec<MirrorSpec>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            source_url: "https://emby-icon.vercel.app/TFEL-Emby.json".to_string(),
            icons_dir: "icons".to_string(),
            target_branch: "cdn".to_string(),
            feed_timeout_secs: 30,
            image_timeout_secs: 15,
            user_agent: None,
            mirrors: vec![
                MirrorSpec {
                    kind: MirrorKind::GhProxy,
                    output: "TFEL-Emby-Mirror.json".to_string(),
                    download: true,
                },
                MirrorSpec {
                    kind: MirrorKind::JsDelivr,
                    output: "TFEL-Emby-Jsdelivr.json".to_string(),
                    download: false,
                },
            ],
        }
    }
}

impl MirrorConfig {
    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mirrors.is_empty() {
            anyhow::bail!("config must list at least one [[mirrors]] entry");
        }
        if self.target_branch.trim().is_empty() {
            anyhow::bail!("target_branch must not be empty");
        }
        let icons_dir = self
            .icons_dir
            .trim_matches(|c: char| c == '/' || c.is_whitespace());
        if icons_dir.is_empty() {
            anyhow::bail!("icons_dir must name a directory");
        }
        if self.feed_timeout_secs == 0 || self.image_timeout_secs == 0 {
            anyhow::bail!("timeouts must be greater than zero");
        }
        let mut seen = HashSet::new();
        for m in &self.mirrors {
            if m.output.trim().is_empty() {
                anyhow::bail!("mirror {} has an empty output file name", m.kind.name());
            }
            if !seen.insert(m.output.as_str()) {
                anyhow::bail!("output file {} is used by more than one mirror", m.output);
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("icon-mirror")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MirrorConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MirrorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<MirrorConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: MirrorConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
