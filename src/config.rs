//! Configuration resolution
//!
//! Builds the single immutable record the rest of the run reads from: token,
//! repository owner and name, milestone id, and the pagination safety cap.
//! Sources merge in fixed precedence: TOML config file, then the token
//! environment fallback, then explicit flag overrides on top. The resolver
//! touches no ambient state itself; the entry point reads the environment
//! and passes it in.

use std::path::Path;

use serde::Deserialize;

use crate::services::changelog::DEFAULT_PAGE_LIMIT;
use crate::types::{MilestoneNumber, Owner, RepositoryId, RepositoryName};

/// Environment variable consulted when no token arrives via flag or file
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Fully resolved, validated configuration. Immutable once built.
#[derive(Debug, Clone)]
pub struct ChangelogConfig {
    pub token: String,
    pub repository_id: RepositoryId,
    pub milestone: MilestoneNumber,
    pub max_pages: usize,
}

/// One partially-specified configuration source: the config file shape, and
/// equally the shape of the flag overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialConfig {
    pub token: Option<String>,
    pub user: Option<String>,
    pub repo: Option<String>,
    pub milestone: Option<u64>,
    pub max_pages: Option<usize>,
}

impl PartialConfig {
    /// Merge `overrides` on top of `self`, field by field.
    fn merged_with(self, overrides: PartialConfig) -> PartialConfig {
        PartialConfig {
            token: overrides.token.or(self.token),
            user: overrides.user.or(self.user),
            repo: overrides.repo.or(self.repo),
            milestone: overrides.milestone.or(self.milestone),
            max_pages: overrides.max_pages.or(self.max_pages),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read or did not parse as a TOML record
    Load { path: String, reason: String },
    /// A field was present but unusable
    Invalid {
        field: &'static str,
        reason: String,
    },
    /// Required fields absent after merging every source; carries the merged
    /// record so the diagnostic can show exactly what was resolved
    MissingFields {
        missing: Vec<&'static str>,
        resolved: PartialConfig,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load { path, reason } => {
                write!(f, "Invalid configuration file specified ('{}'): {}", path, reason)
            }
            Self::Invalid { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::MissingFields { missing, resolved } => {
                write!(
                    f,
                    "Some configuration is missing ({}); please make sure each of the token, \
                     user/organization, repo, and milestone are provided.\nReceived:\n{:#?}",
                    missing.join(", "),
                    resolved
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Resolve the run configuration.
///
/// `env_token` is the value of [`TOKEN_ENV_VAR`], if set; it applies only
/// when neither the file nor the overrides supplied a token.
pub fn resolve(
    config_path: Option<&Path>,
    overrides: PartialConfig,
    env_token: Option<String>,
) -> Result<ChangelogConfig, ConfigError> {
    let from_file = match config_path {
        Some(path) => load_config_file(path)?,
        None => PartialConfig::default(),
    };

    let mut resolved = from_file.merged_with(overrides);
    if !filled(&resolved.token) {
        resolved.token = env_token.filter(|token| !token.trim().is_empty());
    }

    let mut missing = Vec::new();
    if !filled(&resolved.token) {
        missing.push("token");
    }
    if !filled(&resolved.user) {
        missing.push("user");
    }
    if !filled(&resolved.repo) {
        missing.push("repo");
    }
    // a zero milestone id never exists, treat it the same as absent
    if resolved.milestone.unwrap_or(0) == 0 {
        missing.push("milestone");
    }
    if !missing.is_empty() {
        return Err(ConfigError::MissingFields { missing, resolved });
    }

    let max_pages = resolved.max_pages.unwrap_or(DEFAULT_PAGE_LIMIT);
    if max_pages == 0 {
        return Err(ConfigError::Invalid {
            field: "max_pages",
            reason: "must be at least 1".to_string(),
        });
    }

    // the missing-fields check above guarantees these are present
    let token = resolved.token.unwrap_or_default();
    let owner = Owner::new(resolved.user.unwrap_or_default());
    let repo_name = RepositoryName::new(resolved.repo.unwrap_or_default());
    let milestone = MilestoneNumber::new(resolved.milestone.unwrap_or_default());

    Ok(ChangelogConfig {
        token,
        repository_id: RepositoryId::new(owner, repo_name),
        milestone,
        max_pages,
    })
}

fn load_config_file(path: &Path) -> Result<PartialConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Load {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(token: &str, user: &str, repo: &str, milestone: u64) -> PartialConfig {
        PartialConfig {
            token: Some(token.to_string()),
            user: Some(user.to_string()),
            repo: Some(repo.to_string()),
            milestone: Some(milestone),
            max_pages: None,
        }
    }

    #[test]
    fn resolves_from_overrides_alone() {
        let config = resolve(None, overrides("t0ken", "acme", "widget", 12), None).unwrap();
        assert_eq!(config.token, "t0ken");
        assert_eq!(config.repository_id.to_string(), "acme/widget");
        assert_eq!(config.milestone.value(), 12);
        assert_eq!(config.max_pages, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn missing_fields_are_reported_with_the_resolved_record() {
        let partial = PartialConfig {
            user: Some("acme".to_string()),
            ..PartialConfig::default()
        };
        let err = resolve(None, partial, None).unwrap_err();
        match err {
            ConfigError::MissingFields { missing, resolved } => {
                assert_eq!(missing, vec!["token", "repo", "milestone"]);
                assert_eq!(resolved.user.as_deref(), Some("acme"));
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn zero_milestone_counts_as_missing() {
        let err = resolve(None, overrides("t", "acme", "widget", 0), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFields { ref missing, .. }
            if *missing == vec!["milestone"]));
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let err = resolve(None, overrides("  ", "acme", "", 3), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFields { ref missing, .. }
            if *missing == vec!["token", "repo"]));
    }

    #[test]
    fn env_token_fills_the_gap_but_does_not_override() {
        let mut partial = overrides("", "acme", "widget", 3);
        partial.token = None;
        let config = resolve(None, partial, Some("from-env".to_string())).unwrap();
        assert_eq!(config.token, "from-env");

        let config = resolve(
            None,
            overrides("explicit", "acme", "widget", 3),
            Some("from-env".to_string()),
        )
        .unwrap();
        assert_eq!(config.token, "explicit");
    }

    #[test]
    fn zero_max_pages_is_invalid() {
        let mut partial = overrides("t", "acme", "widget", 3);
        partial.max_pages = Some(0);
        let err = resolve(None, partial, None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_pages", .. }));
    }

    #[test]
    fn missing_fields_display_includes_the_dump() {
        let err = resolve(None, PartialConfig::default(), None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Some configuration is missing"));
        assert!(message.contains("Received:"));
        assert!(message.contains("milestone: None"));
    }
}
