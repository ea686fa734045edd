//! Routes shared by the customer, agent, product and order tables.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use crm_api::{FormRecord, Table, Workspace};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{Agent, Comment, Customer, Order, Product},
    protocol::{CommentRequest, TableCommand, TableView},
};
use table_engine::Commented;

use super::{reject, ApiResult};
use crate::{app_state::AppState, session::SessionUser};

/// Column keys travel both ways over the wire.
pub(crate) trait WireColumn: Serialize + DeserializeOwned + Send + Sync {}

impl<C: Serialize + DeserializeOwned + Send + Sync> WireColumn for C {}

/// A record type served under its own path prefix.
pub(crate) trait TableRoute: FormRecord + Serialize {
    fn table(workspace: &Workspace) -> &Table<Self>;
}

impl TableRoute for Customer {
    fn table(workspace: &Workspace) -> &Table<Self> {
        &workspace.customers
    }
}

impl TableRoute for Agent {
    fn table(workspace: &Workspace) -> &Table<Self> {
        &workspace.agents
    }
}

impl TableRoute for Product {
    fn table(workspace: &Workspace) -> &Table<Self> {
        &workspace.products
    }
}

impl TableRoute for Order {
    fn table(workspace: &Workspace) -> &Table<Self> {
        &workspace.orders
    }
}

pub(crate) fn table_routes<R>() -> Router<Arc<AppState>>
where
    R: TableRoute,
    R::Column: WireColumn,
{
    Router::new()
        .route("/", get(view::<R>).post(add::<R>))
        .route("/commands", post(apply::<R>))
        .route("/:id", get(fetch::<R>).put(edit::<R>))
}

pub(crate) fn comment_routes<R>() -> Router<Arc<AppState>>
where
    R: TableRoute + Commented,
    R::Column: WireColumn,
{
    Router::new()
        .route("/:id/comments", post(add_comment::<R>))
        .route("/:id/notes", get(notes::<R>))
}

async fn view<R>(State(state): State<Arc<AppState>>) -> Json<TableView<R, R::Column>>
where
    R: TableRoute,
    R::Column: WireColumn,
{
    Json(R::table(&state.api.workspace).view().await)
}

async fn add<R>(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<R::Draft>,
) -> ApiResult<(StatusCode, Json<R>)>
where
    R: TableRoute,
    R::Column: WireColumn,
{
    let record = R::table(&state.api.workspace)
        .add(draft)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn apply<R>(
    State(state): State<Arc<AppState>>,
    Json(command): Json<TableCommand<R::Column>>,
) -> ApiResult<Json<TableView<R, R::Column>>>
where
    R: TableRoute,
    R::Column: WireColumn,
{
    R::table(&state.api.workspace)
        .apply(command)
        .await
        .map(Json)
        .map_err(reject)
}

async fn fetch<R>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<R>>
where
    R: TableRoute,
    R::Column: WireColumn,
{
    R::table(&state.api.workspace)
        .get(&id)
        .await
        .map(Json)
        .map_err(reject)
}

async fn edit<R>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<R::Draft>,
) -> ApiResult<Json<R>>
where
    R: TableRoute,
    R::Column: WireColumn,
{
    R::table(&state.api.workspace)
        .edit(&id, draft)
        .await
        .map(Json)
        .map_err(reject)
}

async fn add_comment<R>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    user: Option<Extension<SessionUser>>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)>
where
    R: TableRoute + Commented,
    R::Column: WireColumn,
{
    let author = user.as_ref().map(|Extension(SessionUser(user))| user.name.as_str());
    let comment = R::table(&state.api.workspace)
        .add_comment(&id, author, &req.text)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Notes and comments flattened back into the legacy single-text form.
async fn notes<R>(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<String>
where
    R: TableRoute + Commented,
    R::Column: WireColumn,
{
    R::table(&state.api.workspace)
        .notes_export(&id)
        .await
        .map_err(reject)
}
