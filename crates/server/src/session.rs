//! Cookie session handling and route protection.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use crm_api::auth::{self, SESSION_COOKIE};
use shared::domain::UserSummary;
use tracing::warn;

use crate::app_state::AppState;

/// Paths that require a signed-in user. A prefix covers itself and anything
/// below it.
pub(crate) const PROTECTED_PREFIXES: [&str; 8] = [
    "/dashboard",
    "/customers",
    "/agents",
    "/products",
    "/orders",
    "/tasks",
    "/analytics",
    "/account",
];

/// The signed-in user, inserted into request extensions by
/// [`session_middleware`].
#[derive(Debug, Clone)]
pub(crate) struct SessionUser(pub(crate) UserSummary);

pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        max_age_seconds.max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub(crate) fn expired_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

pub(crate) fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Option<UserSummary> {
    let token = session_token(headers)?;
    match auth::current_user(&state.api.storage, &token).await {
        Ok(user) => user,
        Err(err) => {
            warn!(message = %err.message, "session lookup failed");
            None
        }
    }
}

pub(crate) async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let user = resolve_user(&state, req.headers()).await;
    let path = req.uri().path();

    match &user {
        None if is_protected(path) => return Redirect::to("/login").into_response(),
        Some(_) if path == "/login" && req.method() == Method::GET => {
            return Redirect::to("/dashboard").into_response();
        }
        _ => {}
    }

    if let Some(user) = user {
        req.extensions_mut().insert(SessionUser(user));
    }
    next.run(req).await
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
