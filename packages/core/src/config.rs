use std::env;

use crate::cli::Cli;
use crate::services::kayaposoft::DEFAULT_BASE_URL;

const DEFAULT_DATABASE_URL: &str = "sqlite://holidays.db";
const DEFAULT_API_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub provider_url: String,
    pub storage: StorageBackend,
    pub api_port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite { database_url: String },
    InMemory,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let provider_url =
            env::var("HOLIDAY_PROVIDER_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let api_port = match env::var("API_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("API_PORT must be a valid port number, got '{}'", raw))?,
            Err(_) => DEFAULT_API_PORT,
        };

        Ok(Self {
            provider_url,
            storage: StorageBackend::Sqlite { database_url },
            api_port,
        })
    }

    /// Command-line flags take precedence over the environment.
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.provider_url {
            self.provider_url = url.clone();
        }
        if let Some(url) = &cli.database_url {
            self.storage = StorageBackend::Sqlite {
                database_url: url.clone(),
            };
        }
        if cli.in_memory {
            self.storage = StorageBackend::InMemory;
        }
        if let Some(port) = cli.port {
            self.api_port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            provider_url: DEFAULT_BASE_URL.to_string(),
            storage: StorageBackend::Sqlite {
                database_url: DEFAULT_DATABASE_URL.to_string(),
            },
            api_port: DEFAULT_API_PORT,
        }
    }

    #[test]
    fn cli_flags_override_environment_values() {
        let cli = Cli {
            provider_url: Some("http://localhost:9000".to_string()),
            database_url: None,
            port: Some(3000),
            in_memory: false,
        };

        let config = base_config().with_cli_overrides(&cli);

        assert_eq!(config.provider_url, "http://localhost:9000");
        assert_eq!(config.api_port, 3000);
        assert_eq!(
            config.storage,
            StorageBackend::Sqlite {
                database_url: DEFAULT_DATABASE_URL.to_string()
            }
        );
    }

    #[test]
    fn in_memory_flag_wins_over_database_url() {
        let cli = Cli {
            provider_url: None,
            database_url: Some("sqlite://other.db".to_string()),
            port: None,
            in_memory: true,
        };

        let config = base_config().with_cli_overrides(&cli);
        assert_eq!(config.storage, StorageBackend::InMemory);
    }
}
