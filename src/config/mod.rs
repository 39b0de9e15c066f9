use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub translator: TranslatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
}

/// Settings for the external text-to-SQL translation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub timeout_secs: u64,
}

const DEFAULT_TRANSLATOR_API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TRANSLATOR_MODEL: &str = "llama3-8b-8192";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("KARMA_JWT_SECRET") {
            if !v.is_empty() {
                self.security.jwt_secret = v;
            }
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        // Translator overrides
        if let Ok(v) = env::var("GROQ_API_KEY") {
            if !v.trim().is_empty() {
                self.translator.api_key = Some(v.trim().to_string());
            }
        }
        if let Ok(v) = env::var("TRANSLATOR_API_BASE") {
            self.translator.api_base = v;
        }
        if let Ok(v) = env::var("TRANSLATOR_MODEL") {
            self.translator.model = v;
        }
        if let Ok(v) = env::var("TRANSLATOR_TIMEOUT_SECS") {
            self.translator.timeout_secs = v.parse().unwrap_or(self.translator.timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                // Development-only fallback; override with KARMA_JWT_SECRET
                jwt_secret: "dev-secret-change-me".to_string(),
                jwt_expiry_hours: 24,
                enable_cors: true,
            },
            translator: TranslatorConfig {
                api_key: None,
                api_base: DEFAULT_TRANSLATOR_API_BASE.to_string(),
                model: DEFAULT_TRANSLATOR_MODEL.to_string(),
                timeout_secs: 30,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                enable_cors: true,
            },
            translator: TranslatorConfig {
                api_key: None,
                api_base: DEFAULT_TRANSLATOR_API_BASE.to_string(),
                model: DEFAULT_TRANSLATOR_MODEL.to_string(),
                timeout_secs: 30,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                // Empty secret makes token issuance fail fast rather than
                // signing with a known default in production.
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                enable_cors: true,
            },
            translator: TranslatorConfig {
                api_key: None,
                api_base: DEFAULT_TRANSLATOR_API_BASE.to_string(),
                model: DEFAULT_TRANSLATOR_MODEL.to_string(),
                timeout_secs: 20,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
