use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "nutrafuel.toml";
pub const NESTED_CONFIG_FILE: &str = "config/nutrafuel.toml";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub mock: MockConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
    /// Allow any origin, like the storefront API always has.
    pub cors_permissive: bool,
    /// Delay `/query` replies by the mock delay range.
    pub simulate_latency: bool,
}

/// Where clients send agent queries when not answering locally.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
    pub customer_experience_timeout_secs: u64,
    /// Overrides the per-agent retrieval depth when set.
    pub retrieval_k: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub backend_base_url: Option<String>,
    pub simulate_latency: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8000,
                graceful_shutdown_secs: 15,
                cors_permissive: true,
                simulate_latency: false,
            },
            backend: BackendConfig {
                base_url: "http://localhost:8000".to_string(),
                api_key: None,
                timeout_secs: 18,
                customer_experience_timeout_secs: 12,
                retrieval_k: None,
            },
            mock: MockConfig { min_delay_ms: 500, max_delay_ms: 1500 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl BackendConfig {
    pub fn api_key_set(&self) -> bool {
        self.api_key.as_ref().is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}

impl MockConfig {
    pub fn delay_range(&self) -> (Duration, Duration) {
        (Duration::from_millis(self.min_delay_ms), Duration::from_millis(self.max_delay_ms))
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        tracing::debug!(
            event_name = "config.loaded",
            bind_address = %config.server.bind_address,
            port = config.server.port,
            backend_base_url = %config.backend.base_url,
            "configuration loaded"
        );
        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
            if let Some(cors_permissive) = server.cors_permissive {
                self.server.cors_permissive = cors_permissive;
            }
            if let Some(simulate_latency) = server.simulate_latency {
                self.server.simulate_latency = simulate_latency;
            }
        }

        if let Some(backend) = patch.backend {
            if let Some(base_url) = backend.base_url {
                self.backend.base_url = base_url;
            }
            if let Some(api_key) = backend.api_key {
                self.backend.api_key = Some(secret_value(api_key));
            }
            if let Some(timeout_secs) = backend.timeout_secs {
                self.backend.timeout_secs = timeout_secs;
            }
            if let Some(timeout_secs) = backend.customer_experience_timeout_secs {
                self.backend.customer_experience_timeout_secs = timeout_secs;
            }
            if let Some(retrieval_k) = backend.retrieval_k {
                self.backend.retrieval_k = Some(retrieval_k);
            }
        }

        if let Some(mock) = patch.mock {
            if let Some(min_delay_ms) = mock.min_delay_ms {
                self.mock.min_delay_ms = min_delay_ms;
            }
            if let Some(max_delay_ms) = mock.max_delay_ms {
                self.mock.max_delay_ms = max_delay_ms;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("NUTRAFUEL_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some((key, value)) = first_env(&["NUTRAFUEL_SERVER_PORT", "PORT"]) {
            self.server.port = parse_u16(key, &value)?;
        }
        if let Some(value) = read_env("NUTRAFUEL_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("NUTRAFUEL_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }
        if let Some(value) = read_env("NUTRAFUEL_SERVER_CORS_PERMISSIVE") {
            self.server.cors_permissive = parse_bool("NUTRAFUEL_SERVER_CORS_PERMISSIVE", &value)?;
        }
        if let Some(value) = read_env("NUTRAFUEL_SERVER_SIMULATE_LATENCY") {
            self.server.simulate_latency =
                parse_bool("NUTRAFUEL_SERVER_SIMULATE_LATENCY", &value)?;
        }

        if let Some((_, value)) = first_env(&["NUTRAFUEL_BACKEND_BASE_URL", "NEXT_PUBLIC_API_URL"])
        {
            self.backend.base_url = value;
        }
        if let Some((_, value)) = first_env(&["NUTRAFUEL_BACKEND_API_KEY", "OPENAI_API_KEY"]) {
            self.backend.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("NUTRAFUEL_BACKEND_TIMEOUT_SECS") {
            self.backend.timeout_secs = parse_u64("NUTRAFUEL_BACKEND_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("NUTRAFUEL_BACKEND_CUSTOMER_EXPERIENCE_TIMEOUT_SECS") {
            self.backend.customer_experience_timeout_secs =
                parse_u64("NUTRAFUEL_BACKEND_CUSTOMER_EXPERIENCE_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("NUTRAFUEL_BACKEND_RETRIEVAL_K") {
            self.backend.retrieval_k = Some(parse_u32("NUTRAFUEL_BACKEND_RETRIEVAL_K", &value)?);
        }

        if let Some(value) = read_env("NUTRAFUEL_MOCK_MIN_DELAY_MS") {
            self.mock.min_delay_ms = parse_u64("NUTRAFUEL_MOCK_MIN_DELAY_MS", &value)?;
        }
        if let Some(value) = read_env("NUTRAFUEL_MOCK_MAX_DELAY_MS") {
            self.mock.max_delay_ms = parse_u64("NUTRAFUEL_MOCK_MAX_DELAY_MS", &value)?;
        }

        if let Some((_, value)) = first_env(&["NUTRAFUEL_LOGGING_LEVEL", "NUTRAFUEL_LOG_LEVEL"]) {
            self.logging.level = value;
        }
        if let Some((_, value)) = first_env(&["NUTRAFUEL_LOGGING_FORMAT", "NUTRAFUEL_LOG_FORMAT"])
        {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(bind_address) = overrides.bind_address {
            self.server.bind_address = bind_address;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(base_url) = overrides.backend_base_url {
            self.backend.base_url = base_url;
        }
        if let Some(simulate_latency) = overrides.simulate_latency {
            self.server.simulate_latency = simulate_latency;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_backend(&self.backend)?;
        validate_mock(&self.mock)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Config file that `load` would read without an explicit path.
pub fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from(CONFIG_FILE_NAME), PathBuf::from(NESTED_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    detect_config_path()
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_backend(backend: &BackendConfig) -> Result<(), ConfigError> {
    let base_url = backend.base_url.trim();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "backend.base_url must start with http:// or https://".to_string(),
        ));
    }

    for (key, value) in [
        ("backend.timeout_secs", backend.timeout_secs),
        ("backend.customer_experience_timeout_secs", backend.customer_experience_timeout_secs),
    ] {
        if value == 0 || value > 300 {
            return Err(ConfigError::Validation(format!("{key} must be in range 1..=300")));
        }
    }

    if let Some(k) = backend.retrieval_k {
        if k == 0 || k > 20 {
            return Err(ConfigError::Validation(
                "backend.retrieval_k must be in range 1..=20".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_mock(mock: &MockConfig) -> Result<(), ConfigError> {
    if mock.min_delay_ms > mock.max_delay_ms {
        return Err(ConfigError::Validation(
            "mock.min_delay_ms must not exceed mock.max_delay_ms".to_string(),
        ));
    }

    if mock.max_delay_ms > 60_000 {
        return Err(ConfigError::Validation(
            "mock.max_delay_ms must be at most 60000".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn first_env<'a>(keys: &[&'a str]) -> Option<(&'a str, String)> {
    keys.iter().find_map(|key| read_env(key).map(|value| (*key, value)))
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    backend: Option<BackendPatch>,
    mock: Option<MockPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
    cors_permissive: Option<bool>,
    simulate_latency: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct BackendPatch {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
    customer_experience_timeout_secs: Option<u64>,
    retrieval_k: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct MockPatch {
    min_delay_ms: Option<u64>,
    max_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
