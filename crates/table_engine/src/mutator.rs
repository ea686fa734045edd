use std::{collections::HashSet, ops::RangeInclusive};

use rand::{seq::IteratorRandom, Rng};
use tracing::debug;

use crate::{TableError, TableRecord, TableState};

/// Values a freshly added record may draw its id number from.
pub const ID_RANGE: RangeInclusive<u32> = 31..=99;

/// How a generated id number is rendered for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScheme {
    /// Bare number, e.g. `"42"`.
    Numeric,
    /// Prefix plus zero-padded number, e.g. `"A42"` or `"ORD-042"`.
    Prefixed { prefix: &'static str, width: usize },
}

impl IdScheme {
    pub fn format(self, value: u32) -> String {
        match self {
            IdScheme::Numeric => value.to_string(),
            IdScheme::Prefixed { prefix, width } => format!("{prefix}{value:0width$}"),
        }
    }
}

/// Picks an id for a new record. Unused values in [`ID_RANGE`] are preferred;
/// once the range is exhausted any value in it may be returned, duplicates
/// included.
pub fn generate_id<R: TableRecord>(records: &[R], rng: &mut impl Rng) -> String {
    let taken: HashSet<&str> = records.iter().map(|record| record.id()).collect();
    let free = ID_RANGE
        .map(|value| R::ID_SCHEME.format(value))
        .filter(|candidate| !taken.contains(candidate.as_str()))
        .choose(rng);
    free.unwrap_or_else(|| R::ID_SCHEME.format(rng.gen_range(ID_RANGE)))
}

impl<R: TableRecord> TableState<R> {
    /// Prepends a record and jumps back to the first page.
    pub fn add(&mut self, record: R) {
        debug!(entity = R::ENTITY, id = record.id(), "record added");
        self.records.insert(0, record);
        self.current_page = 1;
    }

    pub fn next_id(&self) -> String {
        generate_id(&self.records, &mut rand::thread_rng())
    }

    /// Applies `edit` to the record with `id` in place.
    pub fn update_with(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut R),
    ) -> Result<&R, TableError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| TableError::not_found(R::ENTITY, id))?;
        edit(record);
        debug!(entity = R::ENTITY, id, "record updated");
        Ok(record)
    }

    /// Swaps the record with `id` for `replacement`, keeping its position.
    pub fn replace(&mut self, id: &str, replacement: R) -> Result<&R, TableError> {
        self.update_with(id, |record| *record = replacement)
    }

    /// Removes every record with `id` and drops it from the selection.
    pub fn remove(&mut self, id: &str) -> Result<R, TableError> {
        let position = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| TableError::not_found(R::ENTITY, id))?;
        let removed = self.records.remove(position);
        self.records.retain(|record| record.id() != id);
        self.selected.remove(id);
        if self.pending_delete.as_deref() == Some(id) {
            self.pending_delete = None;
        }
        debug!(entity = R::ENTITY, id, "record deleted");
        Ok(removed)
    }

    pub fn request_delete(&mut self, id: &str) -> Result<(), TableError> {
        if self.get(id).is_none() {
            return Err(TableError::not_found(R::ENTITY, id));
        }
        self.pending_delete = Some(id.to_string());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Result<R, TableError> {
        let id = self
            .pending_delete
            .take()
            .ok_or(TableError::NothingToConfirm)?;
        self.remove(&id)
    }

    /// Removes every selected record, then clears the selection. Returns the
    /// number of records removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.records.len();
        let selected = std::mem::take(&mut self.selected);
        self.records
            .retain(|record| !selected.contains(record.id()));
        if self
            .pending_delete
            .as_ref()
            .is_some_and(|id| selected.contains(id))
        {
            self.pending_delete = None;
        }
        let removed = before - self.records.len();
        debug!(entity = R::ENTITY, removed, "bulk delete");
        removed
    }
}

#[cfg(test)]
#[path = "tests/mutator_tests.rs"]
mod tests;
