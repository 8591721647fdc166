//! CLI for the icon feed mirror.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use icon_mirror_core::config::{self, MirrorConfig};
use icon_mirror_core::identity::{IdentityError, RepoIdentity, DEFAULT_REPOSITORY_VAR};
use std::path::PathBuf;

use commands::{run_sync, run_urls};

/// Top-level CLI for the icon feed mirror.
#[derive(Debug, Parser)]
#[command(name = "icon-mirror")]
#[command(about = "Mirror an icon metadata feed onto CDN-fronted URLs", long_about = None)]
pub struct Cli {
    /// Log to ~/.local/state/icon-mirror/icon-mirror.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options shared by every command that derives mirror URLs.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Repository as <owner>/<name>. Defaults to $GITHUB_REPOSITORY.
    #[arg(long, value_name = "OWNER/NAME")]
    pub repository: Option<String>,

    /// Config file (defaults to ~/.config/icon-mirror/config.toml, created on first use).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Branch hosting the mirrored files (overrides config).
    #[arg(long)]
    pub branch: Option<String>,

    /// Icons directory name (overrides config).
    #[arg(long)]
    pub icons_dir: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the feed, download missing images, write one feed per mirror.
    Sync {
        #[command(flatten)]
        target: TargetArgs,

        /// Upstream feed URL (overrides config).
        #[arg(long, value_name = "URL")]
        source_url: Option<String>,

        /// Directory the icons directory and output feeds are written to (default: current dir).
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,
    },

    /// Print the base URL of every configured mirror. No network access.
    Urls {
        #[command(flatten)]
        target: TargetArgs,
    },
}

impl TargetArgs {
    /// Loads config and applies command-line overrides.
    pub fn load_config(&self) -> Result<MirrorConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        if let Some(branch) = &self.branch {
            cfg.target_branch = branch.clone();
        }
        if let Some(icons_dir) = &self.icons_dir {
            cfg.icons_dir = icons_dir.clone();
        }
        cfg.validate()?;
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    /// `--repository` if given, else the CI environment. Read once per run.
    pub fn repository(&self) -> Result<RepoIdentity, IdentityError> {
        match self.repository.as_deref() {
            Some(raw) => RepoIdentity::parse(raw),
            None => RepoIdentity::from_env(DEFAULT_REPOSITORY_VAR),
        }
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Sync {
                target,
                source_url,
                work_dir,
            } => {
                let repo = target.repository().map_err(|e| {
                    tracing::error!("{}", e);
                    e
                })?;
                let mut cfg = target.load_config()?;
                if let Some(url) = source_url {
                    cfg.source_url = url;
                }
                let work_dir = match work_dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_sync(&cfg, &repo, &work_dir)?;
            }
            CliCommand::Urls { target } => {
                let repo = target.repository()?;
                let cfg = target.load_config()?;
                run_urls(&cfg, &repo);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
