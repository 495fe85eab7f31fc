use dotenv::dotenv;
use log::{info, warn};
use serde::Deserialize;
use shared::AuthToken;
use std::env;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub api: ApiConfig,
    pub export_dir: PathBuf,
    pub log_filter: String,
}

#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_env_files();

        let environment = env::var("RUST_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .parse()
            .unwrap_or(Environment::Development);

        let config = Self::from_vars(environment, |key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn load_env_files() {
        // ENV_FILE_PATH replaces the .env lookup entirely
        if let Ok(env_file_path) = env::var("ENV_FILE_PATH") {
            if !env_file_path.is_empty() {
                dotenv::from_filename(&env_file_path).ok();
                return;
            }
        }

        dotenv().ok();
        let environment_hint = env::var("RUST_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .parse()
            .unwrap_or(Environment::Development);
        let env_file = format!(".env.{:?}", environment_hint).to_lowercase();
        if env_file != ".env.development" {
            let _ = dotenv::from_filename(&env_file);
        }
    }

    /// Builds a config from a variable lookup, falling back to defaults
    pub fn from_vars<F>(environment: Environment, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = ApiConfig {
            base_url: var("QUIZDASH_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: var("QUIZDASH_API_TOKEN").filter(|t| !t.trim().is_empty()),
            timeout_seconds: var("QUIZDASH_API_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        };

        Config {
            environment,
            api,
            export_dir: var("QUIZ_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            log_filter: var("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        let url = url::Url::parse(&self.api.base_url)
            .map_err(|e| format!("Invalid QUIZDASH_API_URL '{}': {}", self.api.base_url, e))?;

        if self.api.timeout_seconds == 0 {
            return Err("QUIZDASH_API_TIMEOUT must be greater than zero".into());
        }

        if self.is_production() {
            if url.scheme() != "https" {
                return Err("QUIZDASH_API_URL must use https in production".into());
            }
            if self.api.token.is_none() {
                return Err("QUIZDASH_API_TOKEN is required in production".into());
            }
        }

        Ok(())
    }

    pub fn log_configuration(&self) {
        info!("Configuration loaded successfully");
        info!("Environment: {:?}", self.environment);
        info!(
            "API: {} (timeout: {}s)",
            self.api.base_url, self.api.timeout_seconds
        );
        info!("Export directory: {}", self.export_dir.display());

        if self.api.token.is_none() {
            warn!("QUIZDASH_API_TOKEN not set - publishing requires --token");
        }
    }

    /// Credential from configuration, overridden by an explicit value
    pub fn api_token(&self, override_token: Option<&str>) -> Option<AuthToken> {
        override_token
            .map(str::to_string)
            .or_else(|| self.api.token.clone())
            .map(AuthToken::new)
    }

    pub fn is_development(&self) -> bool {
        matches!(self.environment, Environment::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}
