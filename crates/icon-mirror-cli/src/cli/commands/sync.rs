//! `icon-mirror sync` – mirror the feed and print a per-target summary.

use anyhow::Result;
use icon_mirror_core::config::MirrorConfig;
use icon_mirror_core::http::CurlClient;
use icon_mirror_core::identity::RepoIdentity;
use icon_mirror_core::job;
use std::path::Path;

pub fn run_sync(cfg: &MirrorConfig, repo: &RepoIdentity, work_dir: &Path) -> Result<()> {
    let client = match &cfg.user_agent {
        Some(ua) => CurlClient::new(ua.clone()),
        None => CurlClient::default(),
    };
    println!("Repository: {}", repo);
    println!("Branch:     {}", cfg.target_branch);

    let summary = job::run_sync(cfg, repo, &client, work_dir)?;

    println!("Feed lists {} icon(s).", summary.total_icons);
    for t in &summary.targets {
        println!(
            "{:<10} {} icon(s) -> {}  (downloaded {}, present {}, failed {})",
            t.name,
            t.processed,
            t.output.display(),
            t.downloads.downloaded,
            t.downloads.present,
            t.downloads.failed
        );
    }
    Ok(())
}
