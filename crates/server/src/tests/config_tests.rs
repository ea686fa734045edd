use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("crm_server_{label}_{suffix}"))
}

#[test]
fn defaults_match_local_development() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:3000");
    assert_eq!(settings.database_url, "sqlite://./data/crm.db");
    assert_eq!(settings.session_ttl(), chrono::Duration::days(7));
    assert!(!settings.secure_cookies);
    assert_eq!(settings.max_body_bytes, 65536);
    assert_eq!(settings.password_iterations, 200_000);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:8080"
database_url = "sqlite://./var/crm.db"
session_ttl_hours = 12
secure_cookies = true
password_iterations = 310000
"#,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(settings.database_url, "sqlite://./var/crm.db");
    assert_eq!(settings.session_ttl_hours, 12);
    assert!(settings.secure_cookies);
    assert_eq!(settings.password_iterations, 310_000);
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let vars: HashMap<&str, &str> = [
        ("SERVER_BIND", "127.0.0.1:4000"),
        ("APP__BIND_ADDR", "127.0.0.1:5000"),
        ("APP__SECURE_COOKIES", "yes"),
        ("APP__MAX_BODY_BYTES", "1024"),
        ("APP__SESSION_TTL_HOURS", "not-a-number"),
        ("APP__PASSWORD_ITERATIONS", "0"),
    ]
    .into_iter()
    .collect();

    let mut settings = Settings::default();
    apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_bind, "127.0.0.1:5000");
    assert!(settings.secure_cookies);
    assert_eq!(settings.max_body_bytes, 1024);
    assert_eq!(settings.session_ttl_hours, 168);
    assert_eq!(settings.password_iterations, 200_000);
}

#[test]
fn session_ttl_is_at_least_one_hour() {
    let settings = Settings {
        session_ttl_hours: 0,
        ..Settings::default()
    };
    assert_eq!(settings.session_ttl(), chrono::Duration::hours(1));
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(normalize_database_url("  "), "sqlite://./data/crm.db");
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url("sqlite:data\\crm.db"),
        "sqlite://data/crm.db"
    );
}

#[test]
fn memory_url_has_no_file_path() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(sqlite_path("postgres://db/crm"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/crm.db?mode=rwc"),
        Some(PathBuf::from("./data/crm.db"))
    );
}

#[test]
fn creates_parent_dir_for_absolute_sqlite_url() {
    let root = temp_root("prepare");
    let db_path = root.join("data").join("crm.db");

    let url = prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare db url");
    assert!(url.starts_with("sqlite://"));
    assert!(root.join("data").exists());

    fs::remove_dir_all(root).expect("cleanup");
}
