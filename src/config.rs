use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_db_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_db_timeout_secs")]
    pub acquire_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParsingConfig {
    /// When true, malformed optional fields (timestamps, original price)
    /// are rejected instead of silently degrading to null.
    #[serde(default)]
    pub strict: bool,
}

fn default_db_timeout_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => toml::from_str(&config_str)
                .with_context(|| format!("failed to parse config file {config_path}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No config file: build entirely from environment variables.
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL").context(
                    "DATABASE_URL environment variable is required when config.toml is absent",
                )?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                        connect_timeout_secs: get_env_parse("DB_CONNECT_TIMEOUT_SECS", 5u64),
                        acquire_timeout_secs: get_env_parse("DB_ACQUIRE_TIMEOUT_SECS", 5u64),
                        run_migrations: get_env_parse("RUN_MIGRATIONS", 1u8) == 1,
                    },
                    cors: CorsConfig::default(),
                    parsing: ParsingConfig::default(),
                }
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read config file {config_path}"));
            }
        };

        // Environment variables win over the file when both are present.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("DB_CONNECT_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            config.database.connect_timeout_secs = n;
        }
        if let Ok(v) = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            config.database.acquire_timeout_secs = n;
        }
        if let Ok(v) = env::var("RUN_MIGRATIONS") {
            config.database.run_migrations = v == "1";
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            config.cors.allowed_origins = v.split(',').map(|o| o.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("STRICT_PARSING") {
            config.parsing.strict = v == "1" || v.eq_ignore_ascii_case("true");
        }

        Ok(config)
    }
}
