use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use crm_api::ApiContext;
use shared::domain::{Agent, Customer, Order, Product};
use storage::Storage;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod session;

use api::{
    account, dashboard,
    tables::{comment_routes, table_routes},
    tasks,
};
use app_state::AppState;
use config::{load_settings, prepare_database_url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; check the parent directory and its permissions"
        );
        error
    })?;

    let addr: SocketAddr = settings.server_bind.parse()?;
    let state = AppState {
        api: ApiContext::seeded(storage),
        settings,
    };
    let app = build_router(Arc::new(state));

    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.settings.max_body_bytes;
    Router::new()
        .route("/healthz", get(healthz))
        .route("/login", get(account::login_page).post(account::login))
        .route("/register", post(account::register))
        .route("/logout", post(account::logout))
        .route("/account", get(account::account))
        .route("/api/me", get(account::me))
        .route("/dashboard", get(dashboard::summary))
        .route("/analytics", get(dashboard::summary))
        .nest(
            "/customers",
            table_routes::<Customer>().merge(comment_routes::<Customer>()),
        )
        .nest(
            "/agents",
            table_routes::<Agent>().merge(comment_routes::<Agent>()),
        )
        .nest(
            "/products",
            table_routes::<Product>().merge(comment_routes::<Product>()),
        )
        .nest("/orders", table_routes::<Order>())
        .route(
            "/tasks",
            get(tasks::board).post(tasks::add).put(tasks::replace),
        )
        .route("/tasks/table", get(tasks::table))
        .route("/tasks/commands", post(tasks::apply))
        .route("/tasks/events", get(tasks::events))
        .route("/tasks/:id", put(tasks::update).delete(tasks::delete))
        .route("/tasks/:id/move", post(tasks::move_task))
        .layer(from_fn_with_state(state.clone(), session::session_middleware))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, StatusCode> {
    state.api.storage.health_check().await.map_err(|error| {
        error!(%error, "health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
