//! Mirror targets and the per-target feed transform.

mod process;

pub use process::{plan_icons, process, rewrite, Downloader, MirrorPass, PlannedIcon};

use serde::{Deserialize, Serialize};

use crate::config::MirrorSpec;
use crate::identity::RepoIdentity;

/// CDN front a feed copy is rewritten against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorKind {
    /// `ghproxy.net` relay in front of `raw.githubusercontent.com`.
    GhProxy,
    /// jsDelivr GitHub CDN.
    JsDelivr,
}

impl MirrorKind {
    pub fn name(self) -> &'static str {
        match self {
            MirrorKind::GhProxy => "ghproxy",
            MirrorKind::JsDelivr => "jsdelivr",
        }
    }

    /// Base URL (with trailing `/`) that file names are appended to.
    pub fn base_url(self, repo: &RepoIdentity, branch: &str, icons_dir: &str) -> String {
        let icons_dir = icons_dir.trim_matches('/');
        match self {
            MirrorKind::GhProxy => format!(
                "https://ghproxy.net/https://raw.githubusercontent.com/{repo}/{branch}/{icons_dir}/"
            ),
            MirrorKind::JsDelivr => {
                format!("https://cdn.jsdelivr.net/gh/{repo}@{branch}/{icons_dir}/")
            }
        }
    }
}

/// A base URL plus whether processing against it fetches missing images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorTarget {
    pub name: String,
    pub base_url: String,
    pub download: bool,
    /// Output feed file name, relative to the work directory.
    pub output: String,
}

impl MirrorTarget {
    pub fn from_spec(
        spec: &MirrorSpec,
        repo: &RepoIdentity,
        branch: &str,
        icons_dir: &str,
    ) -> Self {
        Self {
            name: spec.kind.name().to_string(),
            base_url: spec.kind.base_url(repo, branch, icons_dir),
            download: spec.download,
            output: spec.output.clone(),
        }
    }

    pub fn link_for(&self, file_name: &str) -> String {
        format!("{}{}", self.base_url, file_name)
    }
}
