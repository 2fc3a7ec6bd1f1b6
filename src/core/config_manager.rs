// src/core/config_manager.rs
//! Configuration: `config.yaml` profile selected by environment, then
//! environment variable overrides

use crate::search::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub auth: AuthSettings,
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub database_path: PathBuf,
    /// Public base URL used to build shareable links
    pub site_url: String,
    pub port: u16,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/remote_jobs.db"),
            site_url: "http://localhost:3000".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Shared secret the hosted auth provider signs session tokens with
    pub jwt_secret: String,
    pub audience: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            audience: "authenticated".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub page_size: u32,
    pub recent_jobs: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            recent_jobs: 6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
    /// Optional JSON log file, written alongside console output
    pub json_file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "remote_jobs=info,rocket::server=off".to_string(),
            json_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Profile {
    environment: EnvironmentConfig,
    auth: AuthSettings,
    search: SearchSettings,
    logging: LoggingSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: Profile,
    production: Profile,
}

impl ConfigManager {
    /// Load `config.yaml` from the working directory (defaults if absent)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let environment = Self::environment_name();

        let file = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            serde_yaml::from_str::<ConfigFile>(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            ConfigFile::default()
        };

        let profile = match environment.as_str() {
            "production" => file.production,
            _ => file.local,
        };

        let mut config = Self {
            environment: profile.environment,
            auth: profile.auth,
            search: profile.search,
            logging: profile.logging,
        };
        config.apply_env_overrides()?;
        config.environment.database_path = Self::resolve_path(&config.environment.database_path)?;
        config.validate()?;
        Ok(config)
    }

    fn environment_name() -> String {
        std::env::var("REMOTE_JOBS_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            self.environment.database_path = PathBuf::from(path);
        }
        if let Ok(url) = std::env::var("SITE_URL") {
            self.environment.site_url = url;
        }
        if let Ok(port) = std::env::var("ROCKET_PORT") {
            self.environment.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        Ok(())
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.page_size == 0 {
            anyhow::bail!("search.page_size must be greater than zero");
        }
        if self.environment.site_url.trim().is_empty() {
            anyhow::bail!("environment.site_url must not be empty");
        }
        Ok(())
    }

    /// Site URL without a trailing slash
    pub fn site_url(&self) -> &str {
        self.environment.site_url.trim_end_matches('/')
    }

    pub fn log_summary(&self) {
        info!("Environment: {}", Self::environment_name());
        info!("Database: {}", self.environment.database_path.display());
        info!("Site URL: {}", self.site_url());
        info!("Page size: {}", self.search.page_size);
        if self.auth.jwt_secret.is_empty() {
            info!("JWT secret not configured; protected endpoints will reject every request");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigManager::load_from(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config.search.page_size, 20);
        assert!(config.environment.database_path.is_absolute());
        assert_eq!(config.auth.audience, "authenticated");
    }

    #[test]
    fn test_local_profile_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "local:\n  environment:\n    site_url: https://jobs.example/\n    database_path: /tmp/jobs.db\n  search:\n    page_size: 10\n"
        )
        .unwrap();

        let config = ConfigManager::load_from(&path).unwrap();
        assert_eq!(config.search.page_size, 10);
        assert_eq!(config.search.recent_jobs, 6);
        assert_eq!(config.site_url(), "https://jobs.example");
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "local:\n  search:\n    page_size: 0\n").unwrap();
        assert!(ConfigManager::load_from(&path).is_err());
    }
}
