//! Repository identity (`<owner>/<name>`) used to build mirror URLs.

use std::fmt;
use thiserror::Error;

/// Environment variable the CI runner sets to the current repository.
pub const DEFAULT_REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("environment variable {var} is not set; cannot determine the current repository")]
    Missing { var: String },
    #[error("invalid repository identifier {0:?}: expected <owner>/<name>")]
    Malformed(String),
}

/// Canonical repository identifier, e.g. `acme/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub owner: String,
    pub name: String,
}

impl RepoIdentity {
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        let trimmed = raw.trim();
        let malformed = || IdentityError::Malformed(raw.to_string());
        let (owner, name) = trimmed.split_once('/').ok_or_else(malformed)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(malformed());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Reads and parses `var` from the process environment.
    /// An unset or blank variable is reported as `Missing`.
    pub fn from_env(var: &str) -> Result<Self, IdentityError> {
        match std::env::var(var) {
            Ok(v) if !v.trim().is_empty() => Self::parse(&v),
            _ => Err(IdentityError::Missing {
                var: var.to_string(),
            }),
        }
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
