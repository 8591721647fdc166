//! One sync run: fetch the feed, mirror images, write one feed per target.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::MirrorConfig;
use crate::feed::fetch_feed;
use crate::http::HttpClient;
use crate::identity::RepoIdentity;
use crate::mirror::{self, Downloader, MirrorTarget};
use crate::store::{DownloadReport, ImageStore};
use crate::writer::write_feed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSummary {
    pub name: String,
    pub base_url: String,
    pub output: PathBuf,
    pub processed: usize,
    pub downloads: DownloadReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    /// Records in the upstream feed, usable or not.
    pub total_icons: usize,
    pub targets: Vec<TargetSummary>,
}

/// Configured mirror targets, in config order.
pub fn mirror_targets(cfg: &MirrorConfig, repo: &RepoIdentity) -> Vec<MirrorTarget> {
    cfg.mirrors
        .iter()
        .map(|spec| MirrorTarget::from_spec(spec, repo, &cfg.target_branch, &cfg.icons_dir))
        .collect()
}

/// Runs the whole job rooted at `work_dir`.
///
/// A feed fetch failure aborts before any output is written. Image failures
/// are logged and counted, never fatal. Images already downloaded stay on
/// disk whatever happens later.
pub fn run_sync(
    cfg: &MirrorConfig,
    repo: &RepoIdentity,
    client: &dyn HttpClient,
    work_dir: &Path,
) -> Result<SyncSummary> {
    let targets = mirror_targets(cfg, repo);
    tracing::info!(repository = %repo, branch = %cfg.target_branch, "starting icon sync");
    for target in &targets {
        tracing::info!(
            mirror = %target.name,
            output = %target.output,
            "base url {}",
            target.base_url
        );
    }

    let store = ImageStore::open(&work_dir.join(&cfg.icons_dir))?;

    tracing::info!(url = %cfg.source_url, "fetching feed");
    let feed = fetch_feed(client, &cfg.source_url, cfg.feed_timeout())
        .with_context(|| format!("failed to fetch feed {}", cfg.source_url))?;
    let total_icons = feed.items().len();
    tracing::info!("found {} icon(s), syncing", total_icons);

    let downloader = Downloader {
        store: &store,
        client,
        timeout: cfg.image_timeout(),
    };

    let mut summaries = Vec::with_capacity(targets.len());
    for target in targets {
        let pass = mirror::process(&feed, &target, Some(&downloader));
        let output = work_dir.join(&target.output);
        write_feed(&pass.feed, &output)?;
        tracing::info!(
            mirror = %target.name,
            processed = pass.processed,
            downloaded = pass.downloads.downloaded,
            failed = pass.downloads.failed,
            "wrote {}",
            output.display()
        );
        summaries.push(TargetSummary {
            name: target.name,
            base_url: target.base_url,
            output,
            processed: pass.processed,
            downloads: pass.downloads,
        });
    }

    Ok(SyncSummary {
        total_icons,
        targets: summaries,
    })
}
