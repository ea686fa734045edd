//! Kanban task store.
//!
//! Every mutation is published as a [`TaskEvent`] so any number of boards
//! (websocket clients) can follow along without polling.

use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use shared::{
    domain::{BoardColumn, Task, TaskCategory, TaskPriority},
    error::ApiError,
    protocol::{BoardLane, BoardView, TableCommand, TableView, TaskColumn, TaskDraft, TaskEvent},
};
use table_engine::{TableError, TableRecord, TableState};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

use crate::entity::FormRecord;

pub const EVENT_CAPACITY: usize = 256;

/// Category / priority narrowing for the board. `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFilter {
    pub category: Option<TaskCategory>,
    pub priority: Option<TaskPriority>,
}

impl BoardFilter {
    fn matches(&self, task: &Task) -> bool {
        self.category.map_or(true, |category| task.category == category)
            && self.priority.map_or(true, |priority| task.priority == priority)
    }
}

#[derive(Clone)]
pub struct TaskStore {
    state: Arc<Mutex<TableState<Task>>>,
    events: broadcast::Sender<TaskEvent>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(TableState::new(tasks))),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: TaskEvent) {
        if let Err(err) = self.events.send(event) {
            debug!(?err, "task event dropped");
        }
    }

    pub async fn snapshot(&self) -> Vec<Task> {
        self.state.lock().await.records().to_vec()
    }

    pub async fn get(&self, id: &str) -> Result<Task, ApiError> {
        self.state
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| TableError::not_found(Task::ENTITY, id).into())
    }

    pub async fn add(&self, draft: TaskDraft) -> Result<Task, ApiError> {
        Task::validate(&draft)?;
        let task = {
            let mut state = self.state.lock().await;
            let task = Task::create(state.next_id(), draft, Utc::now());
            state.add(task.clone());
            task
        };
        info!(id = %task.id, column = %task.column, "task added");
        self.publish(TaskEvent::Added { task: task.clone() });
        Ok(task)
    }

    pub async fn update(&self, id: &str, draft: TaskDraft) -> Result<Task, ApiError> {
        Task::validate(&draft)?;
        let task = self
            .state
            .lock()
            .await
            .update_with(id, |task| task.apply_draft(draft))?
            .clone();
        self.publish(TaskEvent::Updated { task: task.clone() });
        Ok(task)
    }

    pub async fn delete(&self, id: &str) -> Result<Task, ApiError> {
        let removed = self.state.lock().await.remove(id)?;
        info!(id, "task deleted");
        self.publish(TaskEvent::Deleted { id: id.to_string() });
        Ok(removed)
    }

    pub async fn move_task(&self, id: &str, column: BoardColumn) -> Result<Task, ApiError> {
        let task = self
            .state
            .lock()
            .await
            .update_with(id, |task| task.column = column)?
            .clone();
        debug!(id, %column, "task moved");
        self.publish(TaskEvent::Moved {
            id: id.to_string(),
            column,
        });
        Ok(task)
    }

    pub async fn replace_all(&self, tasks: Vec<Task>) {
        *self.state.lock().await = TableState::new(tasks.clone());
        self.publish(TaskEvent::Replaced { tasks });
    }

    /// Four lanes in board order, each listing matching tasks in working-list
    /// order.
    pub async fn board(&self, filter: BoardFilter) -> BoardView {
        let state = self.state.lock().await;
        let lanes = BoardColumn::ALL
            .iter()
            .map(|&column| BoardLane {
                column,
                title: column.title().to_string(),
                tasks: state
                    .records()
                    .iter()
                    .filter(|task| task.column == column && filter.matches(task))
                    .cloned()
                    .collect(),
            })
            .collect();
        BoardView { lanes }
    }

    pub async fn view(&self) -> TableView<Task, TaskColumn> {
        self.state.lock().await.view()
    }

    /// Table-style command against the task list. Deletions made by the
    /// command are published like any other delete.
    pub async fn apply(
        &self,
        command: TableCommand<TaskColumn>,
    ) -> Result<TableView<Task, TaskColumn>, ApiError> {
        let (view, deleted) = {
            let mut state = self.state.lock().await;
            let before: Vec<String> = state.records().iter().map(|task| task.id.clone()).collect();
            state.apply(command)?;
            let after: HashSet<&str> = state
                .records()
                .iter()
                .map(|task| task.id.as_str())
                .collect();
            let deleted: Vec<String> = before
                .into_iter()
                .filter(|id| !after.contains(id.as_str()))
                .collect();
            (state.view(), deleted)
        };
        for id in deleted {
            self.publish(TaskEvent::Deleted { id });
        }
        Ok(view)
    }
}

#[cfg(test)]
#[path = "tests/tasks_tests.rs"]
mod tests;
