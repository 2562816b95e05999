use anyhow::{bail, Context};
use std::env;

use crate::infrastructure::github::DEFAULT_GITHUB_API_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub webhook_secret: String,
    pub log_format: LogFormat,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Where the feed lives.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Memory,
    GitHub(GitHubStoreConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GitHubStoreConfig {
    pub api_url: String,
    pub token: String,
    /// `owner/repo`
    pub repository: String,
    pub file_path: String,
    pub branch: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            webhook_secret: env::var("WEBHOOK_SECRET").context("WEBHOOK_SECRET must be set")?,
            log_format: env::var("LOG_FORMAT")
                .map(|s| match s.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })
                .unwrap_or(LogFormat::Pretty),
            store: StoreConfig::from_env()?,
        };

        if config.webhook_secret.is_empty() {
            bail!("WEBHOOK_SECRET must not be empty");
        }

        Ok(config)
    }
}

impl StoreConfig {
    fn from_env() -> anyhow::Result<Self> {
        let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".to_string());

        match backend.to_lowercase().as_str() {
            "memory" => Ok(StoreConfig::Memory),
            "github" => {
                let repository =
                    env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY must be set")?;
                if repository.split('/').filter(|part| !part.is_empty()).count() != 2 {
                    bail!("GITHUB_REPOSITORY must look like owner/repo, got {}", repository);
                }

                Ok(StoreConfig::GitHub(GitHubStoreConfig {
                    api_url: env::var("GITHUB_API_URL")
                        .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string()),
                    token: env::var("GITHUB_TOKEN").context("GITHUB_TOKEN must be set")?,
                    repository,
                    file_path: env::var("GITHUB_FILE_PATH")
                        .unwrap_or_else(|_| "news.json".to_string()),
                    branch: env::var("GITHUB_BRANCH").ok().filter(|b| !b.is_empty()),
                }))
            }
            other => bail!("STORE_BACKEND must be 'memory' or 'github', got '{}'", other),
        }
    }
}
