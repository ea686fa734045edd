use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{UserId, UserRole, UserSummary};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredUser {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            user_id: self.user_id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub role: UserRole,
}

/// User and session persistence used by the auth flow.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a user. `None` when the email is already registered.
    async fn insert_user(&self, user: NewUser<'_>) -> Result<Option<UserId>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>>;
    async fn create_session(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
    /// Resolves a live session; expired tokens resolve to `None`.
    async fn user_for_session(&self, token: &str, now: DateTime<Utc>)
        -> Result<Option<UserSummary>>;
    async fn delete_session(&self, token: &str) -> Result<bool>;
}

/// Emails are unique case-insensitively and stored trimmed.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn create_user(&self, user: NewUser<'_>) -> Result<Option<UserId>> {
        let now = Utc::now();
        let row = sqlx::query(
            "INSERT INTO users (email, name, password_hash, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(email) DO NOTHING
             RETURNING id",
        )
        .bind(normalize_email(user.email))
        .bind(user.name.trim())
        .bind(user.password_hash)
        .bind(user.role.as_str())
        .bind(now)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .context("failed to insert user")?;
        Ok(row.map(|r| UserId(r.get::<i64, _>(0))))
    }

    pub async fn user_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
        let row = sqlx::query(
            "SELECT id, email, name, password_hash, role, created_at, updated_at
             FROM users WHERE email = ?",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| stored_user(&r)).transpose()
    }

    pub async fn insert_session(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(token)
        .bind(user_id.0)
        .bind(Utc::now().timestamp())
        .bind(expires_at.timestamp())
        .execute(&self.pool)
        .await
        .context("failed to insert session")?;
        Ok(())
    }

    pub async fn session_user(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserSummary>> {
        let row = sqlx::query(
            "SELECT u.id, u.email, u.name, u.role
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token = ? AND s.expires_at > ?",
        )
        .bind(token)
        .bind(now.timestamp())
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| {
            Ok(UserSummary {
                user_id: UserId(r.get::<i64, _>(0)),
                email: r.get::<String, _>(1),
                name: r.get::<String, _>(2),
                role: parse_role(&r.get::<String, _>(3))?,
            })
        })
        .transpose()
    }

    pub async fn remove_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now.timestamp())
            .execute(&self.pool)
            .await
            .context("failed to purge expired sessions")?;
        Ok(result.rows_affected())
    }
}

fn stored_user(row: &sqlx::sqlite::SqliteRow) -> Result<StoredUser> {
    Ok(StoredUser {
        user_id: UserId(row.try_get::<i64, _>("id")?),
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        password_hash: row.try_get("password_hash")?,
        role: parse_role(&row.try_get::<String, _>("role")?)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn parse_role(value: &str) -> Result<UserRole> {
    UserRole::from_str(value).with_context(|| format!("stored user has invalid role '{value}'"))
}

#[async_trait]
impl AccountStore for Storage {
    async fn insert_user(&self, user: NewUser<'_>) -> Result<Option<UserId>> {
        self.create_user(user).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
        self.user_by_email(email).await
    }

    async fn create_session(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        self.insert_session(token, user_id, expires_at).await
    }

    async fn user_for_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserSummary>> {
        self.session_user(token, now).await
    }

    async fn delete_session(&self, token: &str) -> Result<bool> {
        self.remove_session(token).await
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
