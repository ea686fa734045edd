use serde::{Deserialize, Serialize};

use crate::domain::{
    AgentRole, AgentStatus, BoardColumn, CustomerStatus, OrderStatus, PaymentStatus,
    ProductStatus, ProductType, Task, TaskCategory, TaskPriority, UserRole,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec<C> {
    pub key: C,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter<C> {
    pub column: C,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerColumn {
    Id,
    Name,
    Email,
    Phone,
    Company,
    Status,
    LastContacted,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentColumn {
    Id,
    Name,
    Email,
    Phone,
    Role,
    Status,
    CreatedAt,
    LastLogin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductColumn {
    Id,
    Name,
    Code,
    Type,
    Date,
    Stock,
    Price,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderColumn {
    Id,
    Date,
    Customer,
    Address,
    Product,
    ProductType,
    Item,
    Quantity,
    Total,
    Payment,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskColumn {
    Id,
    Title,
    Category,
    Priority,
    Column,
}

/// One user interaction against a table controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum TableCommand<C> {
    SetSearch { text: String },
    /// `"all"` clears the filter for that column.
    SetFilter { column: C, value: String },
    ClearFilters,
    ToggleSort { column: C },
    SetRowsPerPage { rows: usize },
    GoToPage { page: usize },
    SelectRow { id: String, checked: bool },
    SelectPage { checked: bool },
    RequestDelete { id: String },
    CancelDelete,
    ConfirmDelete,
    DeleteSelected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView<R, C> {
    pub rows: Vec<R>,
    pub page: usize,
    pub rows_per_page: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    pub sort: SortSpec<C>,
    pub search: String,
    pub filters: Vec<ColumnFilter<C>>,
    pub selected: Vec<String>,
    pub selected_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_delete: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
    pub status: CustomerStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: AgentRole,
    pub status: AgentStatus,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub stock: i64,
    pub price: f64,
    pub status: ProductStatus,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer: String,
    pub address: String,
    pub product: String,
    pub product_type: ProductType,
    pub item: String,
    pub quantity: i64,
    pub total: f64,
    pub payment: PaymentStatus,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub column: BoardColumn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTaskRequest {
    pub column: BoardColumn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLane {
    pub column: BoardColumn,
    pub title: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub lanes: Vec<BoardLane>,
}

impl BoardView {
    pub fn lane(&self, column: BoardColumn) -> Option<&BoardLane> {
        self.lanes.iter().find(|lane| lane.column == column)
    }
}

/// Fan-out notification emitted by the task store after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum TaskEvent {
    Added { task: Task },
    Updated { task: Task },
    Deleted { id: String },
    Moved { id: String, column: BoardColumn },
    Replaced { tasks: Vec<Task> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: Option<MeUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub in_transit: usize,
    pub completed: usize,
    pub canceled: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingProduct {
    pub code: String,
    pub name: String,
    pub total_quantity: u64,
    pub total_revenue: f64,
    pub price: f64,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub todo: usize,
    pub in_progress: usize,
    pub in_review: usize,
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub orders: OrderStats,
    pub top_selling: Vec<TopSellingProduct>,
    pub tasks: TaskStats,
    pub customer_count: usize,
    pub agent_count: usize,
}
