//! Tests for the urls subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_urls() {
    let cli = parse(&["icon-mirror", "urls", "--repository", "acme/repo"]);
    match cli.command {
        CliCommand::Urls { target } => {
            assert_eq!(target.repository().unwrap().name, "repo");
            assert!(target.branch.is_none());
        }
        _ => panic!("expected Urls"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["icon-mirror", "bench"]).is_err());
}
