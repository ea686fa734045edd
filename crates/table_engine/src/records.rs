use std::borrow::Cow;

use shared::{
    domain::{Agent, BoardColumn, Comment, Customer, Order, Product, Task, TaskPriority},
    protocol::{AgentColumn, CustomerColumn, OrderColumn, ProductColumn, TaskColumn},
};

use crate::{Commented, IdScheme, SortValue, TableRecord};

fn label(value: impl std::fmt::Display) -> Cow<'static, str> {
    Cow::Owned(value.to_string())
}

impl TableRecord for Customer {
    type Column = CustomerColumn;

    const ENTITY: &'static str = "customer";
    const ID_SCHEME: IdScheme = IdScheme::Numeric;
    const ID_COLUMN: CustomerColumn = CustomerColumn::Id;
    const FILTERABLE: &'static [CustomerColumn] = &[CustomerColumn::Status];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name), Cow::Borrowed(&self.email)]
    }

    fn filter_value(&self, column: CustomerColumn) -> Option<Cow<'_, str>> {
        match column {
            CustomerColumn::Status => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }

    fn sort_value(&self, column: CustomerColumn) -> SortValue<'_> {
        match column {
            CustomerColumn::Id => SortValue::Id(&self.id),
            CustomerColumn::Name => SortValue::text(&self.name),
            CustomerColumn::Email => SortValue::text(&self.email),
            CustomerColumn::Phone => SortValue::text(&self.phone),
            CustomerColumn::Company => SortValue::optional_text(self.company.as_deref()),
            CustomerColumn::Status => SortValue::text(self.status.as_str()),
            CustomerColumn::LastContacted => SortValue::day(self.last_contacted),
            CustomerColumn::CreatedAt => SortValue::day(self.created_at),
        }
    }
}

impl Commented for Customer {
    fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    fn comments(&self) -> &[Comment] {
        &self.comments
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }
}

impl TableRecord for Agent {
    type Column = AgentColumn;

    const ENTITY: &'static str = "agent";
    const ID_SCHEME: IdScheme = IdScheme::Prefixed {
        prefix: "A",
        width: 2,
    };
    const ID_COLUMN: AgentColumn = AgentColumn::Id;
    const FILTERABLE: &'static [AgentColumn] = &[AgentColumn::Role, AgentColumn::Status];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name), Cow::Borrowed(&self.email)]
    }

    fn filter_value(&self, column: AgentColumn) -> Option<Cow<'_, str>> {
        match column {
            AgentColumn::Role => Some(Cow::Borrowed(self.role.as_str())),
            AgentColumn::Status => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }

    fn sort_value(&self, column: AgentColumn) -> SortValue<'_> {
        match column {
            AgentColumn::Id => SortValue::Id(&self.id),
            AgentColumn::Name => SortValue::text(&self.name),
            AgentColumn::Email => SortValue::text(&self.email),
            AgentColumn::Phone => SortValue::text(&self.phone),
            AgentColumn::Role => SortValue::text(self.role.as_str()),
            AgentColumn::Status => SortValue::text(self.status.as_str()),
            AgentColumn::CreatedAt => SortValue::day(self.created_at),
            AgentColumn::LastLogin => SortValue::instant(self.last_login),
        }
    }
}

impl Commented for Agent {
    fn notes(&self) -> Option<&str> {
        Some(self.notes.as_str()).filter(|notes| !notes.is_empty())
    }

    fn comments(&self) -> &[Comment] {
        &self.comments
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }
}

impl TableRecord for Product {
    type Column = ProductColumn;

    const ENTITY: &'static str = "product";
    const ID_SCHEME: IdScheme = IdScheme::Numeric;
    const ID_COLUMN: ProductColumn = ProductColumn::Id;
    const FILTERABLE: &'static [ProductColumn] = &[ProductColumn::Status, ProductColumn::Type];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name), Cow::Borrowed(&self.code)]
    }

    fn filter_value(&self, column: ProductColumn) -> Option<Cow<'_, str>> {
        match column {
            ProductColumn::Status => Some(Cow::Borrowed(self.status.as_str())),
            ProductColumn::Type => Some(Cow::Borrowed(self.product_type.as_str())),
            _ => None,
        }
    }

    fn sort_value(&self, column: ProductColumn) -> SortValue<'_> {
        match column {
            ProductColumn::Id => SortValue::Id(&self.id),
            ProductColumn::Name => SortValue::text(&self.name),
            ProductColumn::Code => SortValue::text(&self.code),
            ProductColumn::Type => SortValue::text(self.product_type.as_str()),
            ProductColumn::Date => SortValue::day(self.date),
            ProductColumn::Stock => SortValue::Number(f64::from(self.stock)),
            ProductColumn::Price => SortValue::Number(self.price),
            ProductColumn::Status => SortValue::text(self.status.as_str()),
        }
    }
}

impl Commented for Product {
    fn notes(&self) -> Option<&str> {
        None
    }

    fn comments(&self) -> &[Comment] {
        &self.comments
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }
}

impl TableRecord for Order {
    type Column = OrderColumn;

    const ENTITY: &'static str = "order";
    const ID_SCHEME: IdScheme = IdScheme::Prefixed {
        prefix: "ORD-",
        width: 3,
    };
    const ID_COLUMN: OrderColumn = OrderColumn::Id;
    const FILTERABLE: &'static [OrderColumn] = &[
        OrderColumn::Status,
        OrderColumn::Payment,
        OrderColumn::ProductType,
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(&self.id),
            Cow::Borrowed(&self.customer),
            Cow::Borrowed(&self.product),
            label(self.quantity),
        ]
    }

    fn filter_value(&self, column: OrderColumn) -> Option<Cow<'_, str>> {
        match column {
            OrderColumn::Status => Some(Cow::Borrowed(self.status.as_str())),
            OrderColumn::Payment => Some(Cow::Borrowed(self.payment.as_str())),
            OrderColumn::ProductType => Some(Cow::Borrowed(self.product_type.as_str())),
            _ => None,
        }
    }

    fn sort_value(&self, column: OrderColumn) -> SortValue<'_> {
        match column {
            OrderColumn::Id => SortValue::Id(&self.id),
            OrderColumn::Date => SortValue::day(self.date),
            OrderColumn::Customer => SortValue::text(&self.customer),
            OrderColumn::Address => SortValue::text(&self.address),
            OrderColumn::Product => SortValue::text(&self.product),
            OrderColumn::ProductType => SortValue::text(self.product_type.as_str()),
            OrderColumn::Item => SortValue::text(&self.item),
            OrderColumn::Quantity => SortValue::Number(f64::from(self.quantity)),
            OrderColumn::Total => SortValue::Number(self.total),
            OrderColumn::Payment => SortValue::text(self.payment.as_str()),
            OrderColumn::Status => SortValue::text(self.status.as_str()),
        }
    }
}

/// Position of a label in its declared order, used so tasks sort LOW < HIGH
/// and todo < done rather than alphabetically.
fn rank<T: PartialEq>(all: &[T], value: &T) -> SortValue<'static> {
    let index = all.iter().position(|candidate| candidate == value).unwrap_or(all.len());
    SortValue::Number(index as f64)
}

impl TableRecord for Task {
    type Column = TaskColumn;

    const ENTITY: &'static str = "task";
    const ID_SCHEME: IdScheme = IdScheme::Numeric;
    const ID_COLUMN: TaskColumn = TaskColumn::Id;
    const FILTERABLE: &'static [TaskColumn] =
        &[TaskColumn::Category, TaskColumn::Priority, TaskColumn::Column];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.title), Cow::Borrowed(&self.description)]
    }

    fn filter_value(&self, column: TaskColumn) -> Option<Cow<'_, str>> {
        match column {
            TaskColumn::Category => Some(Cow::Borrowed(self.category.as_str())),
            TaskColumn::Priority => Some(Cow::Borrowed(self.priority.as_str())),
            TaskColumn::Column => Some(Cow::Borrowed(self.column.as_str())),
            _ => None,
        }
    }

    fn sort_value(&self, column: TaskColumn) -> SortValue<'_> {
        match column {
            TaskColumn::Id => SortValue::Id(&self.id),
            TaskColumn::Title => SortValue::text(&self.title),
            TaskColumn::Category => SortValue::text(self.category.as_str()),
            TaskColumn::Priority => rank(TaskPriority::ALL, &self.priority),
            TaskColumn::Column => rank(BoardColumn::ALL, &self.column),
        }
    }
}

#[cfg(test)]
#[path = "tests/records_tests.rs"]
mod tests;
