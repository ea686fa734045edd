use base64::{
    engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD},
    Engine as _,
};
use chrono::{DateTime, Duration, Utc};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use shared::{
    domain::{UserId, UserRole, UserSummary},
    error::{ApiError, ErrorCode},
    protocol::{LoginRequest, RegisterRequest},
};
use storage::{AccountStore, NewUser};
use tracing::{error, info, warn};

use crate::validation::{self, Checked, ValidationError};

pub const SESSION_COOKIE: &str = "crm_session";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const EMAIL_TAKEN: &str = "Email already registered";
const LOGIN_FAILED: &str = "An error occurred during login";
const REGISTER_FAILED: &str = "An error occurred during registration";

const HASH_SCHEME: &str = "pbkdf2-sha256";
/// Work factor for new hashes. Stored hashes carry their own count.
pub const DEFAULT_HASH_ITERATIONS: u32 = 200_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const TOKEN_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserSummary,
}

/// `pbkdf2-sha256$<iterations>$<salt b64>$<key b64>`
pub fn hash_password(password: &str, iterations: u32) -> String {
    let iterations = iterations.max(1);
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let key = derive_key(password, &salt, iterations);
    format!(
        "{HASH_SCHEME}${iterations}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(key)
    )
}

/// Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(HASH_SCHEME), Some(iterations), Some(salt), Some(key), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    let Some(iterations) = iterations.parse::<u32>().ok().filter(|count| *count > 0) else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (STANDARD_NO_PAD.decode(salt), STANDARD_NO_PAD.decode(key))
    else {
        return false;
    };
    constant_time_eq(&derive_key(password, &salt, iterations), &expected)
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

pub fn new_session_token() -> String {
    let mut bytes = [0u8; TOKEN_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn check_password(password: &str) -> Checked {
    if password.chars().count() < 6 {
        return Err(ValidationError::new(
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

fn check_registration(request: &RegisterRequest) -> Checked {
    validation::min_chars(&request.name, 2, "Name must be at least 2 characters")?;
    validation::single_line(&request.name, "Name must be a single line of text")?;
    if !validation::is_email(request.email.trim()) {
        return Err(ValidationError::new("Invalid email address"));
    }
    check_password(&request.password)
}

fn check_login(request: &LoginRequest) -> Checked {
    if !validation::is_email(request.email.trim()) {
        return Err(ValidationError::new("Invalid Email Address"));
    }
    check_password(&request.password)
}

/// `iterations` sets the hashing work factor; [`DEFAULT_HASH_ITERATIONS`]
/// outside tests.
pub async fn register(
    store: &dyn AccountStore,
    request: &RegisterRequest,
    role: UserRole,
    iterations: u32,
) -> Result<UserId, ApiError> {
    check_registration(request)?;
    let failed = |err: anyhow::Error| {
        error!(%err, "registration failed");
        ApiError::new(ErrorCode::Internal, REGISTER_FAILED)
    };

    if store
        .find_user_by_email(&request.email)
        .await
        .map_err(failed)?
        .is_some()
    {
        return Err(ApiError::new(ErrorCode::Conflict, EMAIL_TAKEN));
    }

    let password_hash = hash_password(&request.password, iterations);
    let user_id = store
        .insert_user(NewUser {
            email: &request.email,
            name: &request.name,
            password_hash: &password_hash,
            role,
        })
        .await
        .map_err(failed)?
        .ok_or_else(|| ApiError::new(ErrorCode::Conflict, EMAIL_TAKEN))?;
    info!(user_id = user_id.0, "user registered");
    Ok(user_id)
}

pub async fn login(
    store: &dyn AccountStore,
    request: &LoginRequest,
    ttl: Duration,
) -> Result<Session, ApiError> {
    check_login(request)?;
    let failed = |err: anyhow::Error| {
        error!(%err, "login failed");
        ApiError::new(ErrorCode::Internal, LOGIN_FAILED)
    };

    let Some(user) = store
        .find_user_by_email(&request.email)
        .await
        .map_err(failed)?
    else {
        warn!("login for unknown email");
        return Err(ApiError::new(ErrorCode::Unauthorized, INVALID_CREDENTIALS));
    };
    if !verify_password(&request.password, &user.password_hash) {
        warn!(user_id = user.user_id.0, "login with wrong password");
        return Err(ApiError::new(ErrorCode::Unauthorized, INVALID_CREDENTIALS));
    }

    let token = new_session_token();
    let expires_at = Utc::now() + ttl;
    store
        .create_session(&token, user.user_id, expires_at)
        .await
        .map_err(failed)?;
    info!(user_id = user.user_id.0, "login succeeded");
    Ok(Session {
        token,
        expires_at,
        user: user.summary(),
    })
}

pub async fn logout(store: &dyn AccountStore, token: &str) -> Result<(), ApiError> {
    let removed = store.delete_session(token).await.map_err(crate::internal)?;
    if removed {
        info!("session ended");
    }
    Ok(())
}

pub async fn current_user(
    store: &dyn AccountStore,
    token: &str,
) -> Result<Option<UserSummary>, ApiError> {
    store
        .user_for_session(token, Utc::now())
        .await
        .map_err(crate::internal)
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
