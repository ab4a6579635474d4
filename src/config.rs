//! Configuration management for the job finder

use crate::error::{JobFinderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub services: ServicesConfig,
    pub processing: ProcessingConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub embedding: ServiceEndpoint,
    pub chat: ServiceEndpoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub url: String,
    pub model: String,
    /// Environment variable holding a bearer token, for hosted endpoints.
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub batch_size: usize,
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_location: String,
    pub accepted_domains: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub detailed: bool,
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServicesConfig {
                timeout_secs: 120,
                max_retries: 3,
                embedding: ServiceEndpoint {
                    url: "http://localhost:11434".to_string(),
                    model: "nomic-embed-text:latest".to_string(),
                    api_key_env: None,
                },
                chat: ServiceEndpoint {
                    url: "https://ollama.com".to_string(),
                    model: "gpt-oss:120b-cloud".to_string(),
                    api_key_env: Some("OLLAMA_API_KEY".to_string()),
                },
            },
            processing: ProcessingConfig {
                chunk_size: 1000,
                chunk_overlap: 100,
                batch_size: 20,
                top_k: 3,
            },
            search: SearchConfig {
                default_location: "Hyderabad".to_string(),
                accepted_domains: vec!["naukri.com".to_string(), "linkedin.com".to_string()],
            },
            output: OutputConfig {
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load from an explicit path, or from the default config path,
    /// creating the default file on first run.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                JobFinderError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else if path.is_some() {
            Err(JobFinderError::Configuration(format!(
                "Config file not found: {}",
                config_path.display()
            )))
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            JobFinderError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-finder")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_processing_values() {
        let config = Config::default();
        assert_eq!(config.processing.chunk_size, 1000);
        assert_eq!(config.processing.chunk_overlap, 100);
        assert_eq!(config.processing.batch_size, 20);
        assert_eq!(config.processing.top_k, 3);
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.search.default_location, config.search.default_location);
        assert_eq!(parsed.services.embedding.model, config.services.embedding.model);
    }
}
