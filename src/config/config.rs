use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{MetricsError, MetricsResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub owner: Option<String>,
    pub repo_name: Option<String>,
    #[serde(skip_serializing)]
    pub github_token: Option<String>,
    pub api_url: String,
    pub date_range_days: i64,
    pub pagination_limit: u32,
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub outputs: OutputFiles,
}

/// File names, relative to `output_dir`, for each resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub root_md_files: String,
    pub license: String,
    pub releases: String,
    pub contributors: String,
    pub commits: String,
    pub issues: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        OutputFiles {
            root_md_files: ROOT_MD_FILES_OUTPUT.to_string(),
            license: LICENSE_OUTPUT.to_string(),
            releases: RELEASES_OUTPUT.to_string(),
            contributors: CONTRIBUTORS_OUTPUT.to_string(),
            commits: COMMITS_OUTPUT.to_string(),
            issues: ISSUES_OUTPUT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            owner: None,
            repo_name: None,
            github_token: None,
            api_url: GITHUB_API_URL.to_string(),
            date_range_days: DEFAULT_DATE_RANGE_DAYS,
            pagination_limit: DEFAULT_PAGINATION_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            output_dir: PathBuf::from("."),
            outputs: OutputFiles::default(),
        }
    }
}

/// Values given on the command line. They win over the file and the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub owner: Option<String>,
    pub repo_name: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub date_range_days: Option<i64>,
    pub pagination_limit: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Parse a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> MetricsResult<Self> {
        let config_str = fs::read_to_string(path).map_err(|e| {
            MetricsError::ConfigError(format!("{} could not be read: {}", path.display(), e))
        })?;
        serde_json::from_str(&config_str).map_err(|e| {
            MetricsError::ConfigError(format!("Error parsing {}: {}", path.display(), e))
        })
    }

    /// Apply environment overrides using `lookup` as the variable source.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty("GITHUB_TOKEN") {
            self.github_token = Some(token);
        }
        if let Some(owner) = non_empty("REPO_OWNER") {
            self.owner = Some(owner);
        }
        if let Some(repo) = non_empty("REPO_NAME") {
            self.repo_name = Some(repo);
        }
        if let Some(url) = non_empty("GITHUB_API_URL") {
            self.api_url = url;
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(owner) = overrides.owner {
            self.owner = Some(owner);
        }
        if let Some(repo) = overrides.repo_name {
            self.repo_name = Some(repo);
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(days) = overrides.date_range_days {
            self.date_range_days = days;
        }
        if let Some(limit) = overrides.pagination_limit {
            self.pagination_limit = limit;
        }
        if let Some(timeout) = overrides.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
    }

    /// Check the values every fetch depends on, reporting the first one missing.
    pub fn validate(&self) -> MetricsResult<()> {
        let present = |v: &Option<String>| v.as_deref().map_or(false, |s| !s.trim().is_empty());

        if !present(&self.github_token) {
            return Err(MetricsError::MissingConfig("GITHUB_TOKEN"));
        }
        if !present(&self.owner) {
            return Err(MetricsError::MissingConfig("owner"));
        }
        if !present(&self.repo_name) {
            return Err(MetricsError::MissingConfig("repo_name"));
        }
        if self.date_range_days < 0 {
            return Err(MetricsError::ConfigError(format!(
                "date_range_days must not be negative, got {}",
                self.date_range_days
            )));
        }
        self.cutoff()?;
        Ok(())
    }

    pub fn owner(&self) -> &str {
        self.owner.as_deref().unwrap_or_default()
    }

    pub fn repo_name(&self) -> &str {
        self.repo_name.as_deref().unwrap_or_default()
    }

    pub fn page_size(&self) -> u32 {
        self.pagination_limit.clamp(1, MAX_PAGINATION_LIMIT)
    }

    /// Start of the lookback window, relative to now.
    pub fn cutoff(&self) -> MetricsResult<String> {
        self.cutoff_at(Utc::now())
    }

    pub fn cutoff_at(&self, now: DateTime<Utc>) -> MetricsResult<String> {
        Duration::try_days(self.date_range_days)
            .and_then(|window| now.checked_sub_signed(window))
            .map(|start| start.format(TIMESTAMP_FORMAT).to_string())
            .ok_or_else(|| {
                MetricsError::ConfigError(format!(
                    "date_range_days is out of range, got {}",
                    self.date_range_days
                ))
            })
    }

    pub fn masked_token(&self) -> String {
        match self.github_token.as_deref() {
            Some(token) if token.chars().count() > 8 => {
                let head: String = token.chars().take(4).collect();
                let tail: String = token.chars().skip(token.chars().count() - 4).collect();
                format!("{}...{}", head, tail)
            }
            Some(_) => "****".to_string(),
            None => "(not set)".to_string(),
        }
    }
}

/// Pick the config file: explicit path, then `CONFIG_FILE`, then the working
/// directory, then the home directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = env::var("CONFIG_FILE") {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::home_dir()
        .map(|home| home.join(HOME_CONFIG_FILE))
        .filter(|path| path.exists())
}

pub fn load_config(explicit: Option<&Path>) -> MetricsResult<Config> {
    let mut config = match resolve_config_path(explicit) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            Config::from_file(&path)?
        }
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    config.apply_env(|key| env::var(key).ok());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn complete() -> Config {
        Config {
            owner: Some("acme".to_string()),
            repo_name: Some("widget".to_string()),
            github_token: Some("ghp_abcdefghijkl".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, GITHUB_API_URL);
        assert_eq!(config.date_range_days, 365);
        assert_eq!(config.page_size(), 100);
        assert_eq!(config.outputs.releases, "releases.jsonl");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"owner": "acme", "pagination_limit": 25}"#).unwrap();
        assert_eq!(config.owner.as_deref(), Some("acme"));
        assert_eq!(config.page_size(), 25);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.outputs.issues, "issues.jsonl");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = complete();
        let vars: HashMap<&str, &str> = [("REPO_OWNER", "other"), ("REPO_NAME", "")]
            .into_iter()
            .collect();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.owner(), "other");
        // Empty values do not clobber the file.
        assert_eq!(config.repo_name(), "widget");
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = complete();
        config.apply_overrides(ConfigOverrides {
            repo_name: Some("gadget".to_string()),
            date_range_days: Some(30),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.repo_name(), "gadget");
        assert_eq!(config.date_range_days, 30);
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        assert!(complete().validate().is_ok());

        let mut config = complete();
        config.github_token = None;
        assert!(matches!(
            config.validate(),
            Err(MetricsError::MissingConfig("GITHUB_TOKEN"))
        ));

        let mut config = complete();
        config.owner = Some("  ".to_string());
        assert!(matches!(config.validate(), Err(MetricsError::MissingConfig("owner"))));

        let mut config = complete();
        config.repo_name = None;
        assert!(matches!(
            config.validate(),
            Err(MetricsError::MissingConfig("repo_name"))
        ));
    }

    #[test]
    fn test_page_size_is_clamped() {
        let mut config = complete();
        config.pagination_limit = 500;
        assert_eq!(config.page_size(), 100);
        config.pagination_limit = 0;
        assert_eq!(config.page_size(), 1);
    }

    #[test]
    fn test_cutoff_format() {
        let mut config = complete();
        config.date_range_days = 10;
        let now = Utc.with_ymd_and_hms(2024, 4, 25, 12, 30, 0).unwrap();
        assert_eq!(config.cutoff_at(now).unwrap(), "2024-04-15T12:30:00Z");
    }

    #[test]
    fn test_huge_date_range_is_a_config_error() {
        let mut config = complete();
        config.date_range_days = 100_000_000;
        assert!(matches!(config.cutoff(), Err(MetricsError::ConfigError(_))));
        assert!(matches!(config.validate(), Err(MetricsError::ConfigError(_))));

        config.date_range_days = i64::MAX;
        assert!(matches!(config.cutoff(), Err(MetricsError::ConfigError(_))));
    }

    #[test]
    fn test_negative_date_range_rejected() {
        let mut config = complete();
        config.date_range_days = -1;
        assert!(matches!(config.validate(), Err(MetricsError::ConfigError(_))));
    }

    #[test]
    fn test_masked_token() {
        assert_eq!(complete().masked_token(), "ghp_...ijkl");
        assert_eq!(Config::default().masked_token(), "(not set)");
    }

    #[test]
    fn test_masked_token_with_multibyte_chars() {
        let config = Config {
            github_token: Some("tøkén_abcdéfgh".to_string()),
            ..Config::default()
        };
        assert_eq!(config.masked_token(), "tøké...éfgh");
    }

    #[test]
    fn test_token_is_not_serialized() {
        let json = serde_json::to_string(&complete()).unwrap();
        assert!(!json.contains("ghp_"));
    }

    #[test]
    fn test_from_file_errors_name_the_path() {
        let err = Config::from_file(Path::new("/nonexistent/repo-metrics.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/repo-metrics.json"));
    }
}
