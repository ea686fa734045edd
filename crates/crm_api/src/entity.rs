use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Agent, Avatar, Comment, Customer, Order, Product, Task},
    protocol::{AgentDraft, CustomerDraft, OrderDraft, ProductDraft, TaskDraft},
};
use table_engine::{comments::decode_notes, TableRecord};

use crate::validation::{self, Checked};

pub const DEFAULT_PRODUCT_IMAGE: &str = "/products/product-1.webp";
pub const JUST_ADDED: &str = "Just now";

/// A record that is created and edited from a form draft.
pub trait FormRecord: TableRecord + Send + Sync + 'static {
    type Draft: DeserializeOwned + Send + 'static;

    fn validate(draft: &Self::Draft) -> Checked;

    /// Builds a new record, filling audit fields from `now`.
    fn create(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Replaces every form field; id and audit fields are kept.
    fn apply_draft(&mut self, draft: Self::Draft);
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(trimmed).filter(|value| !value.is_empty())
}

/// Splits pasted notes into plain text and any exported comment blocks, so a
/// previous export can be imported back into the thread.
fn import_notes(raw: &str) -> (String, Vec<Comment>) {
    let decoded = decode_notes(raw);
    (decoded.notes.join("\n\n"), decoded.comments)
}

fn count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn check_contact(name: &str, email: &str, phone: &str) -> Checked {
    validation::required(name, "Name is required")?;
    validation::email(email)?;
    validation::phone(phone)
}

impl FormRecord for Customer {
    type Draft = CustomerDraft;

    fn validate(draft: &CustomerDraft) -> Checked {
        check_contact(&draft.name, &draft.email, &draft.phone)
    }

    fn create(id: String, draft: CustomerDraft, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let (notes, comments) = import_notes(draft.notes.as_deref().unwrap_or_default());
        Customer {
            id,
            name: trimmed(draft.name),
            email: trimmed(draft.email),
            phone: trimmed(draft.phone),
            company: optional(draft.company),
            status: draft.status,
            last_contacted: today,
            created_at: today,
            notes: optional(Some(notes)),
            comments,
        }
    }

    fn apply_draft(&mut self, draft: CustomerDraft) {
        self.name = trimmed(draft.name);
        self.email = trimmed(draft.email);
        self.phone = trimmed(draft.phone);
        self.company = optional(draft.company);
        self.status = draft.status;
        let (notes, comments) = import_notes(draft.notes.as_deref().unwrap_or_default());
        self.notes = optional(Some(notes));
        if !comments.is_empty() {
            self.comments = comments;
        }
    }
}

impl FormRecord for Agent {
    type Draft = AgentDraft;

    fn validate(draft: &AgentDraft) -> Checked {
        check_contact(&draft.name, &draft.email, &draft.phone)
    }

    fn create(id: String, draft: AgentDraft, now: DateTime<Utc>) -> Self {
        let (notes, comments) = import_notes(&draft.notes);
        Agent {
            id,
            name: trimmed(draft.name),
            email: trimmed(draft.email),
            phone: trimmed(draft.phone),
            role: draft.role,
            status: draft.status,
            assigned_customers: Vec::new(),
            created_at: now.date_naive(),
            last_login: now,
            notes,
            comments,
        }
    }

    fn apply_draft(&mut self, draft: AgentDraft) {
        self.name = trimmed(draft.name);
        self.email = trimmed(draft.email);
        self.phone = trimmed(draft.phone);
        self.role = draft.role;
        self.status = draft.status;
        let (notes, comments) = import_notes(&draft.notes);
        self.notes = notes;
        if !comments.is_empty() {
            self.comments = comments;
        }
    }
}

impl FormRecord for Product {
    type Draft = ProductDraft;

    fn validate(draft: &ProductDraft) -> Checked {
        validation::required(&draft.name, "Name is required")?;
        validation::required(&draft.code, "Product code is required")?;
        validation::positive(draft.price, "Price must be a positive number")?;
        validation::non_negative(draft.stock, "Stock must be a non-negative number")
    }

    fn create(id: String, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Product {
            id,
            name: trimmed(draft.name),
            code: trimmed(draft.code),
            product_type: draft.product_type,
            date: now.date_naive(),
            stock: count(draft.stock),
            price: draft.price,
            status: draft.status,
            image: optional(draft.image).unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
            comments: Vec::new(),
        }
    }

    fn apply_draft(&mut self, draft: ProductDraft) {
        self.name = trimmed(draft.name);
        self.code = trimmed(draft.code);
        self.product_type = draft.product_type;
        self.stock = count(draft.stock);
        self.price = draft.price;
        self.status = draft.status;
        if let Some(image) = optional(draft.image) {
            self.image = image;
        }
    }
}

impl FormRecord for Order {
    type Draft = OrderDraft;

    fn validate(draft: &OrderDraft) -> Checked {
        validation::required(&draft.customer, "Customer name is required")?;
        validation::required(&draft.address, "Address is required")?;
        validation::required(&draft.product, "Product name is required")?;
        validation::required(&draft.item, "Item code is required")?;
        if draft.quantity <= 0 {
            return Err(validation::ValidationError::new(
                "Quantity must be a positive number",
            ));
        }
        validation::positive(draft.total, "Total must be a positive number")
    }

    fn create(id: String, draft: OrderDraft, now: DateTime<Utc>) -> Self {
        Order {
            id,
            date: now.date_naive(),
            customer: trimmed(draft.customer),
            address: trimmed(draft.address),
            product: trimmed(draft.product),
            product_type: draft.product_type,
            item: trimmed(draft.item),
            quantity: count(draft.quantity),
            total: draft.total,
            payment: draft.payment,
            status: draft.status,
        }
    }

    fn apply_draft(&mut self, draft: OrderDraft) {
        self.customer = trimmed(draft.customer);
        self.address = trimmed(draft.address);
        self.product = trimmed(draft.product);
        self.product_type = draft.product_type;
        self.item = trimmed(draft.item);
        self.quantity = count(draft.quantity);
        self.total = draft.total;
        self.payment = draft.payment;
        self.status = draft.status;
    }
}

impl FormRecord for Task {
    type Draft = TaskDraft;

    fn validate(draft: &TaskDraft) -> Checked {
        validation::required(&draft.title, "Title is required")?;
        validation::required(&draft.description, "Description is required")
    }

    fn create(id: String, draft: TaskDraft, _now: DateTime<Utc>) -> Self {
        Task {
            id,
            title: trimmed(draft.title),
            description: trimmed(draft.description),
            category: draft.category,
            priority: draft.priority,
            column: draft.column,
            last_added: JUST_ADDED.to_string(),
            avatars: vec![Avatar::placeholder()],
        }
    }

    fn apply_draft(&mut self, draft: TaskDraft) {
        self.title = trimmed(draft.title);
        self.description = trimmed(draft.description);
        self.category = draft.category;
        self.priority = draft.priority;
        self.column = draft.column;
    }
}

#[cfg(test)]
#[path = "tests/entity_tests.rs"]
mod tests;
