use shared::error::{ApiError, ErrorCode};
use storage::Storage;

pub mod auth;
pub mod dashboard;
pub mod entity;
pub mod seed;
pub mod tasks;
pub mod validation;
pub mod workspace;

pub use entity::FormRecord;
pub use tasks::{BoardFilter, TaskStore};
pub use workspace::{Table, Workspace};

/// Everything a request handler needs: persisted accounts plus the
/// in-memory entity tables.
#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    pub workspace: Workspace,
    pub tasks: TaskStore,
}

impl ApiContext {
    /// Context with every table reset to its seed list.
    pub fn seeded(storage: Storage) -> Self {
        Self {
            storage,
            workspace: Workspace::seeded(),
            tasks: TaskStore::new(seed::tasks()),
        }
    }
}

pub const INTERNAL_ERROR: &str = "Something went wrong. Please try again.";

/// Logs the cause; clients only ever see [`INTERNAL_ERROR`].
pub(crate) fn internal(err: anyhow::Error) -> ApiError {
    tracing::error!(error = %format!("{err:#}"), "internal error");
    ApiError::new(ErrorCode::Internal, INTERNAL_ERROR)
}
