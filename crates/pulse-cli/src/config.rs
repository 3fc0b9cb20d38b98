use std::path::PathBuf;

use chrono::NaiveDate;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use pulse_service::{ActivityWindow, LinearService};
use thiserror::Error;

/// Directory created under the desktop or working directory for reports.
pub const REPORT_DIR_NAME: &str = "pulse-reports";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no Linear API key configured; set LINEAR_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("could not locate the desktop directory")]
    NoDesktop,

    #[error("could not read the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pulse",
    about = "Write a weekly report of active Linear projects and task activity",
    version
)]
pub struct PulseConfig {
    /// Linear personal API key
    #[arg(long, env = "LINEAR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Save reports under the desktop instead of the current directory
    /// (the environment value accepts true/false, 1/0, yes/no, on/off)
    #[arg(long, env = "PULSE_SAVE_TO_DESKTOP", action = ArgAction::SetTrue,
          value_parser = BoolishValueParser::new())]
    pub save_to_desktop: bool,

    /// Base directory for the report folder; overrides --save-to-desktop
    #[arg(long, env = "PULSE_OUTPUT_ROOT")]
    pub output_root: Option<PathBuf>,

    /// Linear GraphQL endpoint
    #[arg(long, env = "LINEAR_API_URL", default_value = LinearService::DEFAULT_URL)]
    pub api_url: String,

    /// How many days back completed tasks are collected
    #[arg(long, env = "PULSE_LOOKBACK_DAYS", default_value = "7",
          value_parser = clap::value_parser!(i64).range(1..=365))]
    pub lookback_days: i64,

    /// Lowest urgency (1 = urgent .. 4 = low) listed as upcoming
    #[arg(long, env = "PULSE_PRIORITY_CEILING", default_value = "2",
          value_parser = clap::value_parser!(u8).range(1..=4))]
    pub priority_ceiling: u8,

    /// Evaluation date (YYYY-MM-DD), defaults to today. Moves both the
    /// deadline arithmetic and the completed-task window.
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

impl PulseConfig {
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    pub fn window(&self) -> ActivityWindow {
        ActivityWindow {
            lookback_days: self.lookback_days,
            priority_ceiling: self.priority_ceiling,
        }
    }

    /// Directory the two report files are written into.
    pub fn report_dir(&self) -> Result<PathBuf, ConfigError> {
        let base = match &self.output_root {
            Some(root) => root.clone(),
            None if self.save_to_desktop => desktop_dir()?,
            None => std::env::current_dir().map_err(ConfigError::CurrentDir)?,
        };
        Ok(base.join(REPORT_DIR_NAME))
    }
}

fn desktop_dir() -> Result<PathBuf, ConfigError> {
    dirs::desktop_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
        .ok_or(ConfigError::NoDesktop)
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> PulseConfig {
        let mut argv = vec!["pulse"];
        argv.extend_from_slice(args);
        PulseConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn api_key_from_flag() {
        let config = parse(&["--api-key", "lin_api_123"]);
        assert_eq!(config.api_key().unwrap(), "lin_api_123");
    }

    #[test]
    fn blank_api_key_is_missing() {
        let mut config = parse(&["--api-key", "   "]);
        assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey)));
        config.api_key = None;
        assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn window_defaults() {
        let config = parse(&["--lookback-days", "7", "--priority-ceiling", "2"]);
        assert_eq!(config.window(), ActivityWindow::default());
    }

    #[test]
    fn priority_ceiling_is_bounded() {
        assert!(PulseConfig::try_parse_from(["pulse", "--priority-ceiling", "0"]).is_err());
        assert!(PulseConfig::try_parse_from(["pulse", "--priority-ceiling", "5"]).is_err());
    }

    #[test]
    fn lookback_days_is_bounded() {
        for bad in ["0", "-1", "366", "100000000"] {
            assert!(
                PulseConfig::try_parse_from(["pulse", "--lookback-days", bad]).is_err(),
                "--lookback-days {bad} should be rejected"
            );
        }
        assert_eq!(parse(&["--lookback-days", "365"]).lookback_days, 365);
        assert_eq!(parse(&["--lookback-days", "1"]).lookback_days, 1);
    }

    // Mutates process-wide env vars, so every scenario runs inside one test
    // under a lock. Only valid values are ever set so concurrent tests that
    // parse an empty command line still succeed.
    #[test]
    fn config_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        let vars = ["LINEAR_API_KEY", "PULSE_SAVE_TO_DESKTOP", "PULSE_LOOKBACK_DAYS"];
        let clear_all = || {
            for var in vars {
                std::env::remove_var(var);
            }
        };

        // Scenario 1: credential and window from the environment
        clear_all();
        std::env::set_var("LINEAR_API_KEY", "lin_api_from_env");
        std::env::set_var("PULSE_LOOKBACK_DAYS", "14");
        let config = parse(&[]);
        assert_eq!(config.api_key().unwrap(), "lin_api_from_env");
        assert_eq!(config.lookback_days, 14);
        assert!(!config.save_to_desktop);

        // Scenario 2: the flag wins over the environment
        let config = parse(&["--api-key", "lin_api_flag"]);
        assert_eq!(config.api_key().unwrap(), "lin_api_flag");

        // Scenario 3: common spellings of the desktop toggle
        clear_all();
        for (raw, expected) in [
            ("true", true),
            ("1", true),
            ("yes", true),
            ("on", true),
            ("false", false),
            ("0", false),
            ("no", false),
            ("off", false),
        ] {
            std::env::set_var("PULSE_SAVE_TO_DESKTOP", raw);
            assert_eq!(
                parse(&[]).save_to_desktop,
                expected,
                "PULSE_SAVE_TO_DESKTOP={raw}"
            );
        }

        // Scenario 4: the command-line flag still turns it on
        std::env::set_var("PULSE_SAVE_TO_DESKTOP", "off");
        assert!(parse(&["--save-to-desktop"]).save_to_desktop);

        clear_all();
    }

    #[test]
    fn output_root_wins_over_desktop() {
        let config = parse(&["--save-to-desktop", "--output-root", "/tmp/reports-base"]);
        assert_eq!(
            config.report_dir().unwrap(),
            PathBuf::from("/tmp/reports-base").join(REPORT_DIR_NAME)
        );
    }

    #[test]
    fn working_directory_when_not_on_desktop() {
        let mut config = parse(&[]);
        config.save_to_desktop = false;
        config.output_root = None;
        let expected = std::env::current_dir().unwrap().join(REPORT_DIR_NAME);
        assert_eq!(config.report_dir().unwrap(), expected);
    }

    #[test]
    fn today_override_parses() {
        let config = parse(&["--today", "2026-10-16"]);
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2026, 10, 16));
        assert!(PulseConfig::try_parse_from(["pulse", "--today", "16/10/2026"]).is_err());
    }
}
