use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};
use crm_api::auth;
use shared::{
    domain::UserRole,
    protocol::{
        AccountResponse, LoginRequest, MeResponse, MeUser, RegisterRequest, RegisterResponse,
    },
};

use super::{reject, ApiResult};
use crate::{
    app_state::AppState,
    session::{expired_cookie, session_cookie, session_token, SessionUser},
};

/// Signed-in users never get here; the session layer sends them on to the
/// dashboard.
pub(crate) async fn login_page() -> Json<MeResponse> {
    Json(MeResponse { user: None })
}

pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Response> {
    let ttl = state.settings.session_ttl();
    let session = auth::login(&state.api.storage, &req, ttl)
        .await
        .map_err(reject)?;
    let cookie = session_cookie(
        &session.token,
        ttl.num_seconds(),
        state.settings.secure_cookies,
    );
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response())
}

pub(crate) async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let iterations = state.settings.password_iterations;
    auth::register(&state.api.storage, &req, UserRole::default(), iterations)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { success: true })))
}

pub(crate) async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    if let Some(token) = session_token(&headers) {
        auth::logout(&state.api.storage, &token)
            .await
            .map_err(reject)?;
    }
    let cookie = expired_cookie(state.settings.secure_cookies);
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/login")).into_response())
}

pub(crate) async fn account(
    Extension(SessionUser(user)): Extension<SessionUser>,
) -> Json<AccountResponse> {
    Json(AccountResponse {
        name: user.name,
        email: user.email,
        role: user.role,
    })
}

pub(crate) async fn me(user: Option<Extension<SessionUser>>) -> Response {
    match user {
        Some(Extension(SessionUser(user))) => Json(MeResponse {
            user: Some(MeUser {
                name: user.name,
                email: user.email,
            }),
        })
        .into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(MeResponse { user: None })).into_response(),
    }
}
