use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("rows per page must be one of 10, 20 or 30, got {0}")]
    InvalidRowsPerPage(usize),
    #[error("page numbers start at 1")]
    InvalidPage,
    #[error("column {0} cannot be filtered")]
    NotFilterable(String),
    #[error("no delete is awaiting confirmation")]
    NothingToConfirm,
    #[error("comment cannot be empty")]
    EmptyComment,
}

impl TableError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<TableError> for ApiError {
    fn from(value: TableError) -> Self {
        let code = match value {
            TableError::NotFound { .. } => ErrorCode::NotFound,
            TableError::NothingToConfirm => ErrorCode::Conflict,
            TableError::InvalidRowsPerPage(_)
            | TableError::InvalidPage
            | TableError::NotFilterable(_)
            | TableError::EmptyComment => ErrorCode::Validation,
        };
        ApiError::new(code, value.to_string())
    }
}
