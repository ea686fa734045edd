//! Client-style table controller shared by every CRM entity.
//!
//! A [`TableState`] owns the working list for one entity plus the UI state
//! around it (search text, column filters, sort, pagination, selection) and
//! derives the visible page from that state on every call to
//! [`TableState::view`]. Mutations go through the same value so the derived
//! view can never observe a half-applied change.

use std::{borrow::Cow, fmt::Debug};

use shared::domain::Comment;

pub mod comments;
mod error;
mod mutator;
pub mod ordering;
mod records;
mod state;

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;

pub use error::TableError;
pub use mutator::{generate_id, IdScheme, ID_RANGE};
pub use ordering::{natural_cmp, SortValue};
pub use state::{TableState, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};

/// A flat record that can live in a [`TableState`].
pub trait TableRecord: Clone {
    /// Sortable / filterable columns of this record.
    type Column: Copy + Ord + Debug + 'static;

    /// Singular noun used in log lines and error messages.
    const ENTITY: &'static str;
    const ID_SCHEME: IdScheme;
    /// Column holding the id; also the default sort key.
    const ID_COLUMN: Self::Column;
    /// Columns a [`TableState`] accepts filters for.
    const FILTERABLE: &'static [Self::Column];

    fn id(&self) -> &str;

    /// Fields the free-text search looks into.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Value compared against an active column filter. `None` for columns
    /// that are not filterable.
    fn filter_value(&self, column: Self::Column) -> Option<Cow<'_, str>>;

    fn sort_value(&self, column: Self::Column) -> SortValue<'_>;
}

/// Records that carry a comment thread and, optionally, free-text notes.
pub trait Commented {
    fn notes(&self) -> Option<&str>;
    fn comments(&self) -> &[Comment];
    fn comments_mut(&mut self) -> &mut Vec<Comment>;
}
