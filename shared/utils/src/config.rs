use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub generation: GenerationConfig,
    pub smtp: SmtpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeout_seconds: u64,
}

/// Text-generation service settings (local Ollama endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub ollama_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    /// Pause between prospects in a batch run, to respect the
    /// generation service's assumed rate limit.
    pub batch_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub from_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with MAILGEN prefix
            .add_source(Environment::with_prefix("MAILGEN").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8090,
                timeout_seconds: 30,
            },
            generation: GenerationConfig::default(),
            smtp: SmtpConfig {
                host: "smtp.example.com".to_string(),
                port: 587,
                username: String::new(),
                password: String::new(),
                from_address: "outreach@mailgen.io".to_string(),
                from_name: "MailGen Outreach".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "plain".to_string(),
                file_path: None,
            },
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model: "qwen2.5:0.5b".to_string(),
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 500,
            timeout_seconds: 30,
            batch_delay_ms: 1000,
        }
    }
}
