//! Command line and application configuration
//!
//! Resolution order, later entries win:
//! - built-in defaults
//! - JSON file given by `--config` / `WINE_ANALYZER_CONFIG`
//! - dataset path given as argument / `WINE_DATA_PATH` (argument wins)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

pub const CONFIG_ENV: &str = "WINE_ANALYZER_CONFIG";
pub const DATA_PATH_ENV: &str = "WINE_DATA_PATH";

/// Wine Quality Analyzer
///
/// Explore a semicolon-delimited wine quality dataset: preview, summary
/// statistics, correlations and plots.
#[derive(Parser, Debug)]
#[command(name = "wine-analyzer", version, about, long_about = None)]
pub struct Cli {
    /// Dataset to explore (defaults to winequality-red.csv)
    #[arg(env = DATA_PATH_ENV)]
    pub data_path: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Semicolon-delimited dataset, relative to the working directory.
    pub data_path: PathBuf,
    pub window_title: String,
    /// Initial inner size in points.
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("winequality-red.csv"),
            window_title: "Wine Quality Analyzer".to_string(),
            window_size: [1280.0, 860.0],
        }
    }
}

impl AppConfig {
    /// Build the configuration from parsed command-line arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::resolve(cli.config.as_deref(), cli.data_path.clone())
    }

    fn resolve(file: Option<&Path>, data_path: Option<PathBuf>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(path) = data_path {
            config.data_path = path;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::io::Write;

    fn config_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{json}").unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data_path, PathBuf::from("winequality-red.csv"));
        assert_eq!(config.window_title, "Wine Quality Analyzer");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = config_file(r#"{ "data_path": "data/white.csv" }"#);
        let config = AppConfig::resolve(Some(file.path()), None).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/white.csv"));
        assert_eq!(config.window_size, [1280.0, 860.0]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let file = config_file(r#"{ "cache": true }"#);
        assert!(AppConfig::resolve(Some(file.path()), None).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::resolve(Some(dir.path().join("nope.json").as_path()), None).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[test]
    fn test_help_prints_usage_instead_of_loading() {
        let err = Cli::try_parse_from(["wine-analyzer", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["wine-analyzer", "--cache"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    /// Argument beats environment, environment beats the config file.
    /// The only test touching the process environment.
    #[test]
    fn test_precedence_argument_environment_file() {
        let file = config_file(r#"{ "data_path": "file.csv" }"#);
        let file_path = file.path().to_str().unwrap();

        std::env::set_var(DATA_PATH_ENV, "env.csv");
        let with_arg = Cli::try_parse_from(["wine-analyzer", "--config", file_path, "arg.csv"]);
        let env_only = Cli::try_parse_from(["wine-analyzer", "--config", file_path]);
        std::env::remove_var(DATA_PATH_ENV);
        let file_only = Cli::try_parse_from(["wine-analyzer", "--config", file_path]);

        let resolved = |cli: Result<Cli, clap::Error>| {
            AppConfig::from_cli(&cli.unwrap()).unwrap().data_path
        };
        assert_eq!(resolved(with_arg), PathBuf::from("arg.csv"));
        assert_eq!(resolved(env_only), PathBuf::from("env.csv"));
        assert_eq!(resolved(file_only), PathBuf::from("file.csv"));
    }
}
