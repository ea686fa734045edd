use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use crm_api::auth::DEFAULT_HASH_ITERATIONS;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub database_url: String,
    pub session_ttl_hours: i64,
    pub secure_cookies: bool,
    pub max_body_bytes: usize,
    pub password_iterations: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            database_url: "sqlite://./data/crm.db".into(),
            session_ttl_hours: 168,
            secure_cookies: false,
            max_body_bytes: 64 * 1024,
            password_iterations: DEFAULT_HASH_ITERATIONS,
        }
    }
}

impl Settings {
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours.max(1))
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file(&mut settings, &raw);
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        tracing::warn!("server.toml is not a flat key/value table; ignoring it");
        return;
    };
    for (key, value) in file_cfg {
        let value = match value {
            toml::Value::String(text) => text,
            other => other.to_string(),
        };
        apply_value(settings, &key, &value);
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    const KEYS: [(&str, &str); 8] = [
        ("SERVER_BIND", "bind_addr"),
        ("APP__BIND_ADDR", "bind_addr"),
        ("DATABASE_URL", "database_url"),
        ("APP__DATABASE_URL", "database_url"),
        ("APP__SESSION_TTL_HOURS", "session_ttl_hours"),
        ("APP__SECURE_COOKIES", "secure_cookies"),
        ("APP__MAX_BODY_BYTES", "max_body_bytes"),
        ("APP__PASSWORD_ITERATIONS", "password_iterations"),
    ];
    for (var, key) in KEYS {
        if let Some(value) = lookup(var) {
            apply_value(settings, key, &value);
        }
    }
}

fn apply_value(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "bind_addr" => settings.server_bind = value.to_string(),
        "database_url" => settings.database_url = value.to_string(),
        "session_ttl_hours" => {
            if let Ok(parsed) = value.trim().parse::<i64>() {
                settings.session_ttl_hours = parsed;
            }
        }
        "secure_cookies" => {
            if let Some(parsed) = parse_flag(value) {
                settings.secure_cookies = parsed;
            }
        }
        "max_body_bytes" => {
            if let Ok(parsed) = value.trim().parse::<usize>() {
                settings.max_body_bytes = parsed;
            }
        }
        "password_iterations" => {
            if let Some(parsed) = value.trim().parse::<u32>().ok().filter(|count| *count > 0) {
                settings.password_iterations = parsed;
            }
        }
        _ => {}
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn prepare_database_url(raw_database_url: &str) -> anyhow::Result<String> {
    let database_url = normalize_database_url(raw_database_url);
    ensure_parent_dir_exists(&database_url)?;
    Ok(database_url)
}

fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        return format!("sqlite://{}", path.replace('\\', "/"));
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

fn ensure_parent_dir_exists(database_url: &str) -> anyhow::Result<()> {
    let Some(parent) = sqlite_path(database_url)
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
    else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(&parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    (!path.is_empty()).then(|| PathBuf::from(path))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
