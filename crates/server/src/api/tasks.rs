use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crm_api::BoardFilter;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use shared::{
    domain::{Task, TaskCategory, TaskPriority},
    error::ApiError,
    protocol::{BoardView, MoveTaskRequest, TableCommand, TableView, TaskColumn, TaskDraft},
};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::{debug, warn};

use super::{reject, ApiResult};
use crate::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BoardQuery {
    category: Option<String>,
    priority: Option<String>,
}

impl BoardQuery {
    fn into_filter(self) -> Result<BoardFilter, ApiError> {
        Ok(BoardFilter {
            category: parse_choice::<TaskCategory>(self.category)?,
            priority: parse_choice::<TaskPriority>(self.priority)?,
        })
    }
}

/// Missing, empty and `all` all mean no narrowing.
fn parse_choice<T>(raw: Option<String>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr,
    ApiError: From<T::Err>,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => Ok(Some(value.parse::<T>()?)),
    }
}

pub(crate) async fn board(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BoardQuery>,
) -> ApiResult<Json<BoardView>> {
    let filter = query.into_filter().map_err(reject)?;
    Ok(Json(state.api.tasks.board(filter).await))
}

pub(crate) async fn add(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<TaskDraft>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.api.tasks.add(draft).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Swaps the whole task list, e.g. to restore a saved board.
pub(crate) async fn replace(
    State(state): State<Arc<AppState>>,
    Json(tasks): Json<Vec<Task>>,
) -> Json<BoardView> {
    state.api.tasks.replace_all(tasks).await;
    Json(state.api.tasks.board(BoardFilter::default()).await)
}

pub(crate) async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<TaskDraft>,
) -> ApiResult<Json<Task>> {
    state.api.tasks.update(&id, draft).await.map(Json).map_err(reject)
}

pub(crate) async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    state.api.tasks.delete(&id).await.map(Json).map_err(reject)
}

pub(crate) async fn move_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MoveTaskRequest>,
) -> ApiResult<Json<Task>> {
    state
        .api
        .tasks
        .move_task(&id, req.column)
        .await
        .map(Json)
        .map_err(reject)
}

pub(crate) async fn table(
    State(state): State<Arc<AppState>>,
) -> Json<TableView<Task, TaskColumn>> {
    Json(state.api.tasks.view().await)
}

pub(crate) async fn apply(
    State(state): State<Arc<AppState>>,
    Json(command): Json<TableCommand<TaskColumn>>,
) -> ApiResult<Json<TableView<Task, TaskColumn>>> {
    state.api.tasks.apply(command).await.map(Json).map_err(reject)
}

pub(crate) async fn events(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| event_stream(state, socket))
}

async fn event_stream(state: Arc<AppState>, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = BroadcastStream::new(state.api.tasks.subscribe());

    let send_task = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            let event = match event {
                Ok(event) => event,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!(skipped, "task event subscriber lagged");
                    continue;
                }
            };
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(_msg)) = receiver.next().await {}

    debug!("task event subscriber closed");
    send_task.abort();
}
