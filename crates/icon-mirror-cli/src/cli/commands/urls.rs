//! `icon-mirror urls` – show derived mirror base URLs.

use icon_mirror_core::config::MirrorConfig;
use icon_mirror_core::identity::RepoIdentity;
use icon_mirror_core::job::mirror_targets;

pub fn run_urls(cfg: &MirrorConfig, repo: &RepoIdentity) {
    println!("{:<10} {:<10} {:<28} {}", "MIRROR", "DOWNLOAD", "OUTPUT", "BASE URL");
    for target in mirror_targets(cfg, repo) {
        println!(
            "{:<10} {:<10} {:<28} {}",
            target.name,
            if target.download { "yes" } else { "no" },
            target.output,
            target.base_url
        );
    }
}
