//! Argument handling shared by every subcommand.

use crate::Host;
use crate::Result;
use crate::config::Config;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use std::io::Write;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    #[default]
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Options accepted by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to configuration file [default: one of chat-rank.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Directory holding the per-group counter files [default: from the configuration]
    #[arg(long, value_name = "PATH", global = true)]
    pub ranking_dir: Option<Utf8PathBuf>,

    /// IANA time zone for day and week buckets [default: from the configuration]
    #[arg(long, value_name = "ZONE", global = true)]
    pub time_zone: Option<String>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Load the configuration, report its warnings and apply command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or an override is invalid
    pub fn load_config<H: Host>(&self, host: &mut H) -> Result<Config> {
        self.load_config_from(host, Utf8Path::new("."))
    }

    pub(crate) fn load_config_from<H: Host>(&self, host: &mut H, base_dir: &Utf8Path) -> Result<Config> {
        let (mut config, warnings) = Config::load(base_dir, self.config.as_ref())?;

        if !warnings.is_empty() {
            let mut err = host.error();
            let _ = writeln!(err, "\n⚠️  Configuration validation warnings:");
            for warning in &warnings {
                let _ = writeln!(err, "   {warning}");
            }
            let _ = writeln!(err);
        }

        if let Some(dir) = &self.ranking_dir {
            config.ranking_dir.clone_from(dir);
        }

        if let Some(zone) = &self.time_zone {
            config.time_zone.clone_from(zone);
            let _ = config.tz()?;
        }

        Ok(config)
    }
}

/// Route `log` output to stderr at the requested level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::TestHost;

    fn utf8_dir(tmp: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_overrides_apply() {
        let tmp = tempfile::tempdir().unwrap();
        let args = CommonArgs {
            ranking_dir: Some(Utf8PathBuf::from("elsewhere")),
            time_zone: Some("Europe/Paris".to_string()),
            ..CommonArgs::default()
        };

        let mut host = TestHost::new();
        let config = args.load_config_from(&mut host, &utf8_dir(&tmp)).unwrap();
        assert_eq!(config.ranking_dir, "elsewhere");
        assert_eq!(config.time_zone, "Europe/Paris");
        assert!(host.error_buf.is_empty());
    }

    #[test]
    fn test_bad_time_zone_override() {
        let tmp = tempfile::tempdir().unwrap();
        let args = CommonArgs {
            time_zone: Some("Mars/Olympus".to_string()),
            ..CommonArgs::default()
        };

        let mut host = TestHost::new();
        assert!(args.load_config_from(&mut host, &utf8_dir(&tmp)).is_err());
    }

    #[test]
    fn test_warnings_go_to_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = utf8_dir(&tmp);
        std::fs::write(dir.join("chat-rank.toml"), "leaderboard_size = 0\n").unwrap();

        let mut host = TestHost::new();
        let config = CommonArgs::default().load_config_from(&mut host, &dir).unwrap();
        assert_eq!(config.leaderboard_size, 0);
        assert!(host.error_text().contains("Configuration validation warnings"));
    }
}
