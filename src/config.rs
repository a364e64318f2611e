//! Run configuration: config file loading, source lists and resolution of
//! CLI and file settings into a [`RunConfig`].
//!
//! Precedence is CLI flags, then the config file, then built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use url::Url;

use crate::detect::DEFAULT_DROP_THRESHOLD;
use crate::fetch::{
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MAX, DEFAULT_RETRY_DELAY_MIN, DEFAULT_TIMEOUT_SECS,
};
use crate::pacing::DelayRange;
use crate::pipeline::{DEFAULT_PACING_MAX, DEFAULT_PACING_MIN};

/// Database location used when neither CLI nor config file names one.
pub const DEFAULT_DB_PATH: &str = "data/prices.db";

/// Sources polled when none are configured.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://example.com/iphone14-pro-japan",
    "https://example.com/iphone14-pro-global",
    "https://example.com/api/price-feed?model=iphone13",
    "https://example.com/deals/iphone15",
];

/// Accepted range for retry attempts.
pub const MAX_RETRIES_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

const MAX_DELAY_MS: u64 = 60_000;

/// Key/value file configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    /// `SQLite` database file.
    pub db_path: Option<PathBuf>,
    /// File listing one source URL per line.
    pub sources_file: Option<PathBuf>,
    /// Attempts per source, including the first.
    pub max_retries: Option<u32>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Lower bound of the pause between fetch attempts.
    pub retry_delay_min_ms: Option<u64>,
    /// Upper bound of the pause between fetch attempts.
    pub retry_delay_max_ms: Option<u64>,
    /// Lower bound of the pause between sources.
    pub pacing_min_ms: Option<u64>,
    /// Upper bound of the pause between sources.
    pub pacing_max_ms: Option<u64>,
    /// Seed for reproducible User-Agent and delay choices.
    pub seed: Option<u64>,
    /// Drop alert threshold as a whole percentage.
    pub drop_threshold_percent: Option<u64>,
}

impl FileConfig {
    /// Validates values against the ranges the CLI accepts.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range key.
    pub fn validate(&self) -> Result<()> {
        if let Some(max_retries) = self.max_retries
            && !MAX_RETRIES_RANGE.contains(&max_retries)
        {
            bail!("Invalid config value for `max_retries`: {max_retries}. Expected range: 1..=10");
        }

        if let Some(timeout) = self.request_timeout_secs
            && !(1..=3600).contains(&timeout)
        {
            bail!(
                "Invalid config value for `request_timeout_secs`: {timeout}. Expected range: 1..=3600"
            );
        }

        validate_delay_pair(
            "retry_delay_min_ms",
            self.retry_delay_min_ms,
            "retry_delay_max_ms",
            self.retry_delay_max_ms,
        )?;
        validate_delay_pair(
            "pacing_min_ms",
            self.pacing_min_ms,
            "pacing_max_ms",
            self.pacing_max_ms,
        )?;

        if let Some(percent) = self.drop_threshold_percent
            && !(1..=99).contains(&percent)
        {
            bail!(
                "Invalid config value for `drop_threshold_percent`: {percent}. Expected range: 1..=99"
            );
        }

        Ok(())
    }
}

fn validate_delay_pair(
    min_key: &str,
    min: Option<u64>,
    max_key: &str,
    max: Option<u64>,
) -> Result<()> {
    for (key, value) in [(min_key, min), (max_key, max)] {
        if let Some(value) = value
            && value > MAX_DELAY_MS
        {
            bail!("Invalid config value for `{key}`: {value}. Expected range: 0..={MAX_DELAY_MS}");
        }
    }
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        bail!("Invalid config: `{min_key}` ({min}) is greater than `{max_key}` ({max})");
    }
    Ok(())
}

/// Config file location and contents, if one was found.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Path that was consulted.
    pub path: Option<PathBuf>,
    /// Parsed contents when the file exists.
    pub config: Option<FileConfig>,
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/pricewatch/config.toml`
/// 2. `$HOME/.config/pricewatch/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("pricewatch")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("pricewatch")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file.
///
/// An explicit path must exist. The default path is optional: when it is
/// missing the run proceeds on CLI flags and defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains invalid settings.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
        });
    }

    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path) if path.exists() => Some(load_file_config(path)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

/// Reads and parses a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

/// Parses `key = value` lines. `#` starts a comment outside quoted strings.
///
/// # Errors
///
/// Returns an error on malformed lines, unknown keys or invalid values.
pub fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_no}");

        match key {
            "db_path" => {
                cfg.db_path = Some(PathBuf::from(
                    parse_string_literal(value).with_context(invalid)?,
                ));
            }
            "sources_file" => {
                cfg.sources_file = Some(PathBuf::from(
                    parse_string_literal(value).with_context(invalid)?,
                ));
            }
            "max_retries" => {
                let parsed = parse_integer_u64(value).with_context(invalid)?;
                cfg.max_retries = Some(
                    u32::try_from(parsed)
                        .map_err(|_| anyhow::anyhow!("max_retries out of range for u32"))?,
                );
            }
            "request_timeout_secs" => {
                cfg.request_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "retry_delay_min_ms" => {
                cfg.retry_delay_min_ms = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "retry_delay_max_ms" => {
                cfg.retry_delay_max_ms = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "pacing_min_ms" => {
                cfg.pacing_min_ms = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "pacing_max_ms" => {
                cfg.pacing_max_ms = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "seed" => {
                cfg.seed = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "drop_threshold_percent" => {
                cfg.drop_threshold_percent = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

/// Splits a sources listing into locators: one per line, blank lines and
/// `#` comment lines skipped.
#[must_use]
pub fn parse_sources(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

/// Reads a sources file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_sources_file(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sources file '{}'", path.display()))?;
    Ok(parse_sources(&raw))
}

/// Checks that `locator` is an absolute http(s) URL with a host.
///
/// # Errors
///
/// Returns an error describing why the locator is unusable.
pub fn validate_source(locator: &str) -> Result<()> {
    let url = Url::parse(locator).with_context(|| format!("Invalid source URL '{locator}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "Invalid source URL '{locator}': unsupported scheme '{}'",
            url.scheme()
        );
    }
    if url.host_str().is_none_or(str::is_empty) {
        bail!("Invalid source URL '{locator}': missing host");
    }
    Ok(())
}

/// Settings supplied on the command line. `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Positional source URLs.
    pub sources: Vec<String>,
    /// `--sources-file`.
    pub sources_file: Option<PathBuf>,
    /// `--db`.
    pub db_path: Option<PathBuf>,
    /// `--max-retries`.
    pub max_retries: Option<u32>,
    /// `--timeout` in seconds.
    pub timeout_secs: Option<u64>,
    /// `--seed`.
    pub seed: Option<u64>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Source URLs in processing order.
    pub sources: Vec<String>,
    /// `SQLite` database file.
    pub db_path: PathBuf,
    /// Attempts per source, including the first.
    pub max_retries: u32,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Pause range between fetch attempts.
    pub retry_delay: DelayRange,
    /// Pause range between sources.
    pub pacing: DelayRange,
    /// Seed for the random source; entropy when absent.
    pub seed: Option<u64>,
    /// Relative drop that raises an alert.
    pub drop_threshold: f64,
}

impl RunConfig {
    /// Merges CLI flags over file settings over defaults, then validates
    /// every source URL.
    ///
    /// # Errors
    ///
    /// Returns an error if a sources file cannot be read, the source list is
    /// empty, a source URL is invalid or a CLI value is out of range.
    pub fn resolve(cli: CliOverrides, file: Option<&FileConfig>) -> Result<Self> {
        let file = file.cloned().unwrap_or_default();

        let sources = if !cli.sources.is_empty() {
            cli.sources
        } else if let Some(path) = cli.sources_file.as_deref().or(file.sources_file.as_deref()) {
            let sources = read_sources_file(path)?;
            if sources.is_empty() {
                bail!("Sources file '{}' lists no sources", path.display());
            }
            sources
        } else {
            DEFAULT_SOURCES.iter().map(ToString::to_string).collect()
        };
        for source in &sources {
            validate_source(source)?;
        }

        let max_retries = cli
            .max_retries
            .or(file.max_retries)
            .unwrap_or(DEFAULT_MAX_RETRIES);
        if !MAX_RETRIES_RANGE.contains(&max_retries) {
            bail!("Invalid max retries: {max_retries}. Expected range: 1..=10");
        }

        let timeout_secs = cli
            .timeout_secs
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            bail!("Invalid timeout: must be at least 1 second");
        }

        let retry_delay = delay_range(
            file.retry_delay_min_ms,
            file.retry_delay_max_ms,
            DEFAULT_RETRY_DELAY_MIN,
            DEFAULT_RETRY_DELAY_MAX,
        );
        let pacing = delay_range(
            file.pacing_min_ms,
            file.pacing_max_ms,
            DEFAULT_PACING_MIN,
            DEFAULT_PACING_MAX,
        );

        let drop_threshold = file
            .drop_threshold_percent
            .map_or(DEFAULT_DROP_THRESHOLD, |percent| {
                f64::from(u32::try_from(percent).unwrap_or(u32::MAX)) / 100.0
            });

        Ok(Self {
            sources,
            db_path: cli
                .db_path
                .or(file.db_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            max_retries,
            request_timeout: Duration::from_secs(timeout_secs),
            retry_delay,
            pacing,
            seed: cli.seed.or(file.seed),
            drop_threshold,
        })
    }
}

fn delay_range(
    min_ms: Option<u64>,
    max_ms: Option<u64>,
    default_min: Duration,
    default_max: Duration,
) -> DelayRange {
    // A lone bound outside the default range collapses the range to it.
    match (min_ms.map(Duration::from_millis), max_ms.map(Duration::from_millis)) {
        (Some(min), Some(max)) => DelayRange::new(min, max),
        (Some(min), None) => DelayRange::new(min, default_max.max(min)),
        (None, Some(max)) => DelayRange::new(default_min.min(max), max),
        (None, None) => DelayRange::new(default_min, default_max),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str(
            r#"
            # pricewatch settings
            db_path = "/var/lib/pricewatch/prices.db"
            max_retries = 5   # be persistent
            seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(cfg.db_path, Some(PathBuf::from("/var/lib/pricewatch/prices.db")));
        assert_eq!(cfg.max_retries, Some(5));
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.sources_file, None);
        assert_eq!(cfg.pacing_min_ms, None);
    }

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
            db_path = "prices.db"
            sources_file = "sources.txt"
            max_retries = 2
            request_timeout_secs = 30
            retry_delay_min_ms = 100
            retry_delay_max_ms = 200
            pacing_min_ms = 0
            pacing_max_ms = 0
            seed = 7
            drop_threshold_percent = 15
            "#,
        )
        .unwrap();

        assert_eq!(cfg.sources_file, Some(PathBuf::from("sources.txt")));
        assert_eq!(cfg.request_timeout_secs, Some(30));
        assert_eq!(cfg.retry_delay_min_ms, Some(100));
        assert_eq!(cfg.retry_delay_max_ms, Some(200));
        assert_eq!(cfg.pacing_max_ms, Some(0));
        assert_eq!(cfg.drop_threshold_percent, Some(15));
    }

    #[test]
    fn test_parse_config_hash_inside_string_is_kept() {
        let cfg = parse_config_str(r#"db_path = "data/#1.db" # trailing"#).unwrap();
        assert_eq!(cfg.db_path, Some(PathBuf::from("data/#1.db")));
    }

    #[test]
    fn test_parse_config_rejects_unknown_key() {
        let err = parse_config_str("concurrency = 4").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_parse_config_rejects_missing_equals() {
        let err = parse_config_str("max_retries 4").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_config_rejects_unquoted_path() {
        assert!(parse_config_str("db_path = prices.db").is_err());
    }

    #[test]
    fn test_parse_config_rejects_negative_integer() {
        assert!(parse_config_str("seed = -1").is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_retries() {
        let err = parse_config_str("max_retries = 0").unwrap_err();
        assert!(err.to_string().contains("max_retries"));
        assert!(parse_config_str("max_retries = 11").is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_delay_pair() {
        let err = parse_config_str("pacing_min_ms = 500\npacing_max_ms = 100").unwrap_err();
        assert!(err.to_string().contains("pacing_min_ms"));
    }

    #[test]
    fn test_validate_rejects_excessive_delay() {
        assert!(parse_config_str("retry_delay_max_ms = 60001").is_err());
    }

    #[test]
    fn test_load_config_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_load_config_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "seed = 9\n").unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config.unwrap().seed, Some(9));
    }

    #[test]
    fn test_parse_sources_skips_blanks_and_comments() {
        let sources = parse_sources(
            "# storefronts\nhttps://a.example/x\n\n   \n  https://b.example/api/y  \n#https://c\n",
        );
        assert_eq!(sources, vec!["https://a.example/x", "https://b.example/api/y"]);
    }

    #[test]
    fn test_validate_source() {
        assert!(validate_source("https://example.com/deals/iphone15").is_ok());
        assert!(validate_source("http://127.0.0.1:8080/api/feed").is_ok());
        assert!(validate_source("example.com/no-scheme").is_err());
        assert!(validate_source("ftp://example.com/file").is_err());
        assert!(validate_source("not a url").is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let config = RunConfig::resolve(CliOverrides::default(), None).unwrap();

        assert_eq!(config.sources.len(), DEFAULT_SOURCES.len());
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.retry_delay, DelayRange::from_millis(1000, 2000));
        assert_eq!(config.pacing, DelayRange::from_millis(1200, 2500));
        assert_eq!(config.seed, None);
        assert!((config.drop_threshold - 0.10).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_cli_overrides_file() {
        let file = FileConfig {
            db_path: Some(PathBuf::from("file.db")),
            max_retries: Some(5),
            request_timeout_secs: Some(20),
            seed: Some(1),
            ..FileConfig::default()
        };
        let cli = CliOverrides {
            sources: vec!["https://example.com/api/feed".to_string()],
            db_path: Some(PathBuf::from("cli.db")),
            max_retries: Some(2),
            ..CliOverrides::default()
        };

        let config = RunConfig::resolve(cli, Some(&file)).unwrap();

        assert_eq!(config.sources, vec!["https://example.com/api/feed"]);
        assert_eq!(config.db_path, PathBuf::from("cli.db"));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_resolve_file_delays_and_threshold() {
        let file = FileConfig {
            retry_delay_min_ms: Some(0),
            retry_delay_max_ms: Some(0),
            pacing_min_ms: Some(10),
            pacing_max_ms: Some(20),
            drop_threshold_percent: Some(25),
            ..FileConfig::default()
        };

        let config = RunConfig::resolve(CliOverrides::default(), Some(&file)).unwrap();

        assert!(config.retry_delay.is_zero());
        assert_eq!(config.pacing, DelayRange::from_millis(10, 20));
        assert!((config.drop_threshold - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_sources_file_from_cli_then_file() {
        let dir = tempfile::tempdir().unwrap();
        let cli_list = dir.path().join("cli.txt");
        let file_list = dir.path().join("file.txt");
        fs::File::create(&cli_list)
            .unwrap()
            .write_all(b"https://cli.example/a\n")
            .unwrap();
        fs::write(&file_list, "https://file.example/b\nhttps://file.example/c\n").unwrap();

        let file = FileConfig {
            sources_file: Some(file_list),
            ..FileConfig::default()
        };

        let from_file = RunConfig::resolve(CliOverrides::default(), Some(&file)).unwrap();
        assert_eq!(from_file.sources.len(), 2);

        let cli = CliOverrides {
            sources_file: Some(cli_list),
            ..CliOverrides::default()
        };
        let from_cli = RunConfig::resolve(cli, Some(&file)).unwrap();
        assert_eq!(from_cli.sources, vec!["https://cli.example/a"]);
    }

    #[test]
    fn test_resolve_rejects_invalid_source() {
        let cli = CliOverrides {
            sources: vec!["https://ok.example/x".to_string(), "nope".to_string()],
            ..CliOverrides::default()
        };
        let err = RunConfig::resolve(cli, None).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_resolve_rejects_empty_sources_file() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("empty.txt");
        fs::write(&list, "# nothing yet\n").unwrap();

        let cli = CliOverrides {
            sources_file: Some(list),
            ..CliOverrides::default()
        };
        assert!(RunConfig::resolve(cli, None).is_err());
    }

    #[test]
    fn test_resolve_rejects_out_of_range_cli_retries() {
        let cli = CliOverrides {
            max_retries: Some(0),
            ..CliOverrides::default()
        };
        assert!(RunConfig::resolve(cli, None).is_err());
    }

    #[test]
    fn test_delay_range_lone_bound_collapses() {
        let range = delay_range(
            Some(5000),
            None,
            Duration::from_millis(1000),
            Duration::from_millis(2000),
        );
        assert_eq!(range, DelayRange::from_millis(5000, 5000));
    }

    #[test]
    fn test_delay_range_lone_max_below_default_min_collapses() {
        let range = delay_range(
            None,
            Some(0),
            Duration::from_millis(1200),
            Duration::from_millis(2500),
        );
        assert!(range.is_zero());

        let range = delay_range(
            None,
            Some(500),
            Duration::from_millis(1000),
            Duration::from_millis(2000),
        );
        assert_eq!(range, DelayRange::from_millis(500, 500));
    }

    #[test]
    fn test_delay_range_lone_max_inside_defaults_keeps_default_min() {
        let range = delay_range(
            None,
            Some(1500),
            Duration::from_millis(1000),
            Duration::from_millis(2000),
        );
        assert_eq!(range, DelayRange::from_millis(1000, 1500));
    }

    #[test]
    fn test_resolve_lone_max_caps_delays() {
        let file = parse_config_str("retry_delay_max_ms = 500\npacing_max_ms = 0\n").unwrap();
        let config = RunConfig::resolve(CliOverrides::default(), Some(&file)).unwrap();

        assert!(config.retry_delay.max() <= Duration::from_millis(500));
        assert!(config.retry_delay.min() <= config.retry_delay.max());
        assert!(config.pacing.is_zero());
    }
}
