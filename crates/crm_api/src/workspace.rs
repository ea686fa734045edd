use std::sync::Arc;

use chrono::Utc;
use shared::{
    domain::{Agent, Comment, Customer, Order, Product},
    error::ApiError,
    protocol::{TableCommand, TableView},
};
use table_engine::{comments, Commented, TableError, TableState};
use tokio::sync::Mutex;
use tracing::info;

use crate::{entity::FormRecord, seed};

/// One entity's controller behind a single async lock.
pub struct Table<R: FormRecord> {
    state: Arc<Mutex<TableState<R>>>,
}

impl<R: FormRecord> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: FormRecord> Table<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            state: Arc::new(Mutex::new(TableState::new(records))),
        }
    }

    pub async fn view(&self) -> TableView<R, R::Column> {
        self.state.lock().await.view()
    }

    pub async fn records(&self) -> Vec<R> {
        self.state.lock().await.records().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.len()
    }

    pub async fn get(&self, id: &str) -> Result<R, ApiError> {
        self.state
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| TableError::not_found(R::ENTITY, id).into())
    }

    pub async fn apply(
        &self,
        command: TableCommand<R::Column>,
    ) -> Result<TableView<R, R::Column>, ApiError> {
        let mut state = self.state.lock().await;
        state.apply(command)?;
        Ok(state.view())
    }

    pub async fn add(&self, draft: R::Draft) -> Result<R, ApiError> {
        R::validate(&draft)?;
        let mut state = self.state.lock().await;
        let record = R::create(state.next_id(), draft, Utc::now());
        state.add(record.clone());
        info!(entity = R::ENTITY, id = record.id(), "record created");
        Ok(record)
    }

    pub async fn edit(&self, id: &str, draft: R::Draft) -> Result<R, ApiError> {
        R::validate(&draft)?;
        let mut state = self.state.lock().await;
        let record = state.update_with(id, |record| record.apply_draft(draft))?;
        info!(entity = R::ENTITY, id, "record edited");
        Ok(record.clone())
    }
}

impl<R: FormRecord + Commented> Table<R> {
    pub async fn add_comment(
        &self,
        id: &str,
        author: Option<&str>,
        text: &str,
    ) -> Result<Comment, ApiError> {
        let mut state = self.state.lock().await;
        let mut appended = None;
        let mut failure = None;
        state.update_with(id, |record| {
            match comments::append_comment(record, author, text, Utc::now()) {
                Ok(comment) => appended = Some(comment.clone()),
                Err(err) => failure = Some(err),
            }
        })?;
        if let Some(err) = failure {
            return Err(err.into());
        }
        info!(entity = R::ENTITY, id, "comment added");
        appended.ok_or_else(|| TableError::EmptyComment.into())
    }

    pub async fn notes_export(&self, id: &str) -> Result<String, ApiError> {
        let state = self.state.lock().await;
        state
            .get(id)
            .map(comments::export)
            .ok_or_else(|| TableError::not_found(R::ENTITY, id).into())
    }
}

/// Working lists for the four plain entity tables.
#[derive(Clone)]
pub struct Workspace {
    pub customers: Table<Customer>,
    pub agents: Table<Agent>,
    pub products: Table<Product>,
    pub orders: Table<Order>,
}

impl Workspace {
    pub fn new(
        customers: Vec<Customer>,
        agents: Vec<Agent>,
        products: Vec<Product>,
        orders: Vec<Order>,
    ) -> Self {
        Self {
            customers: Table::new(customers),
            agents: Table::new(agents),
            products: Table::new(products),
            orders: Table::new(orders),
        }
    }

    pub fn seeded() -> Self {
        Self::new(
            seed::customers(),
            seed::agents(),
            seed::products(),
            seed::orders(),
        )
    }
}

#[cfg(test)]
#[path = "tests/workspace_tests.rs"]
mod tests;
