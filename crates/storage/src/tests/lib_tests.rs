use chrono::Duration;

use super::*;

fn admin<'a>(email: &'a str) -> NewUser<'a> {
    NewUser {
        email,
        name: "Admin User",
        password_hash: "sha256$c2FsdA$ZGlnZXN0",
        role: UserRole::Admin,
    }
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("temp dir");
    let db_path = temp_root.path().join("nested").join("crm.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn stores_users_with_normalized_email() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let user_id = storage
        .create_user(admin("  Admin@Example.COM "))
        .await
        .expect("insert")
        .expect("new user");

    let stored = storage
        .user_by_email("admin@example.com")
        .await
        .expect("lookup")
        .expect("user exists");
    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.email, "admin@example.com");
    assert_eq!(stored.role, UserRole::Admin);
    assert_eq!(stored.name, "Admin User");
}

#[tokio::test]
async fn duplicate_email_is_not_inserted_twice() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let first = storage.create_user(admin("dup@example.com")).await.expect("first");
    let second = storage.create_user(admin("DUP@example.com")).await.expect("second");
    assert!(first.is_some());
    assert!(second.is_none());
    let stored = storage
        .user_by_email("dup@example.com")
        .await
        .expect("lookup")
        .expect("user exists");
    assert_eq!(Some(stored.user_id), first);
}

#[tokio::test]
async fn sessions_resolve_until_expiry() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let user_id = storage
        .create_user(admin("session@example.com"))
        .await
        .expect("insert")
        .expect("new user");
    let now = Utc::now();
    storage
        .insert_session("token-1", user_id, now + Duration::hours(1))
        .await
        .expect("session");

    let user = storage
        .session_user("token-1", now)
        .await
        .expect("lookup")
        .expect("live session");
    assert_eq!(user.email, "session@example.com");

    let expired = storage
        .session_user("token-1", now + Duration::hours(2))
        .await
        .expect("lookup");
    assert!(expired.is_none());
}

#[tokio::test]
async fn deleting_a_session_logs_it_out() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let user_id = storage
        .create_user(admin("logout@example.com"))
        .await
        .expect("insert")
        .expect("new user");
    storage
        .insert_session("token-2", user_id, Utc::now() + Duration::days(7))
        .await
        .expect("session");

    assert!(storage.remove_session("token-2").await.expect("delete"));
    assert!(!storage.remove_session("token-2").await.expect("delete again"));
    let user = storage
        .session_user("token-2", Utc::now())
        .await
        .expect("lookup");
    assert!(user.is_none());
}

#[tokio::test]
async fn purges_only_expired_sessions() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let user_id = storage
        .create_user(admin("purge@example.com"))
        .await
        .expect("insert")
        .expect("new user");
    let now = Utc::now();
    storage
        .insert_session("old", user_id, now - Duration::minutes(5))
        .await
        .expect("old session");
    storage
        .insert_session("fresh", user_id, now + Duration::days(1))
        .await
        .expect("fresh session");

    assert_eq!(storage.purge_expired_sessions(now).await.expect("purge"), 1);
    assert!(storage
        .session_user("fresh", now)
        .await
        .expect("lookup")
        .is_some());
}

#[test]
fn memory_url_has_no_file_path() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/crm.db?mode=rwc"),
        Some(PathBuf::from("./data/crm.db"))
    );
}
