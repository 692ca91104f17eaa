use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use chrono_tz::Tz;
use ohno::{IntoAppError, app_err};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

/// Flush periods shorter than this rewrite every dirty file several times a second
const MIN_SENSIBLE_FLUSH_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding one JSON counter file per group
    #[serde(default = "default_ranking_dir")]
    pub ranking_dir: Utf8PathBuf,

    /// IANA time zone in which day and week buckets are evaluated
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Period of the background flush, in milliseconds
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,

    /// Maximum number of entries on a leaderboard
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Messages matching this pattern are not counted
    #[serde(default = "default_system_message_pattern")]
    pub system_message_pattern: String,

    /// Prefix that turns a chat message into a command
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_number: Option<String>,
}

fn default_ranking_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("data/ranking")
}

fn default_time_zone() -> String {
    "Asia/Colombo".to_string()
}

const fn default_flush_interval_ms() -> u64 {
    60_000
}

const fn default_leaderboard_size() -> usize {
    15
}

fn default_system_message_pattern() -> String {
    r"(?i)(?-u:\b)(bot|system)(?-u:\b)".to_string()
}

fn default_command_prefix() -> String {
    ".".to_string()
}

fn default_bot_name() -> String {
    "KLW Ranking".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// When no path is given, `chat-rank.{toml,yml,yaml,json}` is looked up in `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the time zone or filter pattern is invalid
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading chat-rank configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                base_dir.join("chat-rank.toml"),
                base_dir.join("chat-rank.yml"),
                base_dir.join("chat-rank.yaml"),
                base_dir.join("chat-rank.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading chat-rank configuration from {path}")),
                }
            }

            let Some(result) = found else {
                let config = Self::default_config()?;
                let mut warnings = Vec::new();
                config.validate(&mut warnings)?;
                return Ok((config, warnings));
            };
            result
        };

        let config = Self::parse(&final_path, &text)?;

        let mut warnings = Vec::new();
        config.validate(&mut warnings)?;
        Ok((config, warnings))
    }

    fn parse(path: &Utf8Path, text: &str) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(text).into_app_err_with(|| format!("parsing TOML configuration from {path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(text).into_app_err_with(|| format!("parsing YAML configuration from {path}"))?,
            "json" => serde_json::from_str(text).into_app_err_with(|| format!("parsing JSON configuration from {path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };
        Ok(config)
    }

    /// The configuration described by the embedded `default_config.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded YAML does not deserialize, which the build script rules out
    pub fn default_config() -> Result<Self> {
        serde_yaml::from_str(DEFAULT_CONFIG_YAML).into_app_err("parsing the built-in default configuration")
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Save the default configuration to a file, keeping the comments when writing YAML
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default_with_comments(output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();

        if matches!(extension, "yml" | "yaml") {
            fs::write(output_path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        } else {
            Self::default_config()?.save(output_path)?;
        }

        Ok(())
    }

    /// The configured time zone
    ///
    /// # Errors
    ///
    /// Returns an error if `time_zone` is not a known IANA zone name
    pub fn tz(&self) -> Result<Tz> {
        let name = &self.time_zone;
        name.parse::<Tz>().map_err(|e| app_err!("unknown time zone '{name}': {e}"))
    }

    /// The compiled system-message pattern
    ///
    /// # Errors
    ///
    /// Returns an error if `system_message_pattern` is not a valid regular expression
    pub fn system_message_regex(&self) -> Result<Regex> {
        Regex::new(&self.system_message_pattern)
            .into_app_err_with(|| format!("invalid system_message_pattern '{}'", self.system_message_pattern))
    }

    /// Reject unusable values and collect warnings for questionable ones
    fn validate(&self, warnings: &mut Vec<String>) -> Result<()> {
        let _ = self.tz()?;
        let _ = self.system_message_regex()?;

        if self.leaderboard_size == 0 {
            warnings.push("leaderboard_size is 0, leaderboards will always be empty".to_string());
        }

        if self.flush_interval_ms < MIN_SENSIBLE_FLUSH_INTERVAL_MS {
            warnings.push(format!(
                "flush_interval_ms is {}, dirty groups will be rewritten more than once per second",
                self.flush_interval_ms
            ));
        }

        if self.command_prefix.is_empty() {
            warnings.push("command_prefix is empty, every chat message will be parsed as a command".to_string());
        }

        Ok(())
    }
}
