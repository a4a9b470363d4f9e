use std::env;
use std::fs;
use std::path::Path;

use nutrafuel_core::config::{detect_config_path, AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let api_key = config
        .backend
        .api_key
        .as_ref()
        .map(|key| redact_token(key.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());
    let retrieval_k = config
        .backend
        .retrieval_k
        .map(|k| k.to_string())
        .unwrap_or_else(|| "<per agent>".to_string());

    let entries: [(&str, String, &[&str]); 14] = [
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            &["NUTRAFUEL_SERVER_BIND_ADDRESS"],
        ),
        ("server.port", config.server.port.to_string(), &["NUTRAFUEL_SERVER_PORT", "PORT"]),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            &["NUTRAFUEL_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        ),
        (
            "server.cors_permissive",
            config.server.cors_permissive.to_string(),
            &["NUTRAFUEL_SERVER_CORS_PERMISSIVE"],
        ),
        (
            "server.simulate_latency",
            config.server.simulate_latency.to_string(),
            &["NUTRAFUEL_SERVER_SIMULATE_LATENCY"],
        ),
        (
            "backend.base_url",
            config.backend.base_url.clone(),
            &["NUTRAFUEL_BACKEND_BASE_URL", "NEXT_PUBLIC_API_URL"],
        ),
        ("backend.api_key", api_key, &["NUTRAFUEL_BACKEND_API_KEY", "OPENAI_API_KEY"]),
        (
            "backend.timeout_secs",
            config.backend.timeout_secs.to_string(),
            &["NUTRAFUEL_BACKEND_TIMEOUT_SECS"],
        ),
        (
            "backend.customer_experience_timeout_secs",
            config.backend.customer_experience_timeout_secs.to_string(),
            &["NUTRAFUEL_BACKEND_CUSTOMER_EXPERIENCE_TIMEOUT_SECS"],
        ),
        ("backend.retrieval_k", retrieval_k, &["NUTRAFUEL_BACKEND_RETRIEVAL_K"]),
        (
            "mock.min_delay_ms",
            config.mock.min_delay_ms.to_string(),
            &["NUTRAFUEL_MOCK_MIN_DELAY_MS"],
        ),
        (
            "mock.max_delay_ms",
            config.mock.max_delay_ms.to_string(),
            &["NUTRAFUEL_MOCK_MAX_DELAY_MS"],
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            &["NUTRAFUEL_LOGGING_LEVEL", "NUTRAFUEL_LOG_LEVEL"],
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            &["NUTRAFUEL_LOGGING_FORMAT", "NUTRAFUEL_LOG_FORMAT"],
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key_path, value, env_keys) in entries {
        lines.push(render_line(key_path, &value, source(key_path, env_keys)));
    }
    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_token(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Some((prefix, _)) = trimmed.split_once('-') {
        return format!("{prefix}-***");
    }

    "<redacted>".to_string()
}
