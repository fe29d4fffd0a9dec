use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Which provenance records are resolved from. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    Sample,
    Csv,
    Postgres,
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "sample" | "demo" => Ok(Self::Sample),
            "csv" => Ok(Self::Csv),
            "postgres" | "pg" | "db" => Ok(Self::Postgres),
            other => Err(ConfigError::InvalidSource(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: SourceKind,
    pub csv_path: Option<PathBuf>,
    pub database_url: Option<String>,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let source = match env::var("AFRILEARN_SOURCE") {
            Ok(value) => value.parse()?,
            Err(_) => SourceKind::Sample,
        };
        let csv_path = env::var("AFRILEARN_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let log_level = env::var("AFRILEARN_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            source,
            csv_path,
            database_url,
            log_level,
        })
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, source: Option<SourceKind>, csv_path: Option<PathBuf>) -> Self {
        if let Some(path) = csv_path {
            self.csv_path = Some(path);
            if source.is_none() {
                self.source = SourceKind::Csv;
            }
        }
        if let Some(source) = source {
            self.source = source;
        }
        self
    }

    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    pub fn require_csv_path(&self) -> Result<&PathBuf, ConfigError> {
        self.csv_path.as_ref().ok_or(ConfigError::MissingCsvPath)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("AFRILEARN_SOURCE must be one of sample, csv or postgres (got '{0}')")]
    InvalidSource(String),
    #[error("DATABASE_URL must be set to reach Postgres")]
    MissingDatabaseUrl,
    #[error("a CSV path is required for the csv source (set AFRILEARN_CSV or pass --csv)")]
    MissingCsvPath,
}
