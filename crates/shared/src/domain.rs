use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UnknownLabel;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);

/// Closed set of display labels. The wire form is the label itself, which is
/// also what column filters compare against.
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == value)
                    .ok_or_else(|| UnknownLabel::new(stringify!($name), value))
            }
        }
    };
}

label_enum!(CustomerStatus {
    Lead => "Lead",
    Active => "Active",
    Inactive => "Inactive",
    Prospect => "Prospect",
});

label_enum!(AgentRole {
    Admin => "Admin",
    Agent => "Agent",
    Manager => "Manager",
});

label_enum!(AgentStatus {
    Active => "Active",
    Inactive => "Inactive",
    OnLeave => "On Leave",
});

label_enum!(ProductType {
    Physical => "Physical",
    Digital => "Digital",
    Service => "Service",
    Subscription => "Subscription",
});

label_enum!(ProductStatus {
    Active => "Active",
    Disabled => "Disabled",
});

label_enum!(PaymentStatus {
    Paid => "Paid",
    Unpaid => "Unpaid",
});

label_enum!(OrderStatus {
    Pending => "Pending",
    InTransit => "In Transit",
    Completed => "Completed",
    Canceled => "Canceled",
});

label_enum!(TaskCategory {
    Design => "DESIGN",
    Development => "DEVELOPMENT",
    Testing => "TESTING",
    Content => "CONTENT",
    Marketing => "MARKETING",
    Meeting => "MEETING",
    FollowUp => "FOLLOW-UP",
});

label_enum!(TaskPriority {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
});

label_enum!(
    /// Kanban lane. `ALL` is the fixed left-to-right board order.
    BoardColumn {
        Todo => "todo",
        InProgress => "inprogress",
        InReview => "inreview",
        Done => "done",
    }
);

label_enum!(UserRole {
    Admin => "admin",
    Manager => "manager",
    Agent => "agent",
});

impl Default for UserRole {
    fn default() -> Self {
        Self::Agent
    }
}

impl ProductType {
    /// Stock is not tracked for anything that isn't shipped.
    pub fn tracks_stock(self) -> bool {
        matches!(self, ProductType::Physical)
    }
}

impl TaskCategory {
    pub fn badge_color(self) -> &'static str {
        match self {
            TaskCategory::Design => "var(--badge-design)",
            TaskCategory::Development => "var(--badge-development)",
            TaskCategory::Testing => "var(--badge-testing)",
            TaskCategory::Content => "var(--badge-content)",
            TaskCategory::Marketing => "var(--badge-marketing)",
            TaskCategory::Meeting => "var(--badge-meeting)",
            TaskCategory::FollowUp => "var(--badge-followup)",
        }
    }
}

impl BoardColumn {
    pub fn title(self) -> &'static str {
        match self {
            BoardColumn::Todo => "To do",
            BoardColumn::InProgress => "In progress",
            BoardColumn::InReview => "In review",
            BoardColumn::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub status: CustomerStatus,
    pub last_contacted: NaiveDate,
    pub created_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: AgentRole,
    pub status: AgentStatus,
    #[serde(default)]
    pub assigned_customers: Vec<String>,
    pub created_at: NaiveDate,
    pub last_login: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub date: NaiveDate,
    pub stock: u32,
    pub price: f64,
    pub status: ProductStatus,
    pub image: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub date: NaiveDate,
    pub customer: String,
    pub address: String,
    pub product: String,
    pub product_type: ProductType,
    /// Product code; matched against `Product::code` by the dashboard only.
    pub item: String,
    pub quantity: u32,
    pub total: f64,
    pub payment: PaymentStatus,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub src: String,
    pub alt: String,
    pub fallback: String,
}

impl Avatar {
    pub fn placeholder() -> Self {
        Self {
            src: "https://cdn.jsdelivr.net/gh/alohe/avatars/png/vibrent_5.png".into(),
            alt: "@user".into(),
            fallback: "U".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub column: BoardColumn,
    pub last_added: String,
    #[serde(default)]
    pub avatars: Vec<Avatar>,
}

impl Task {
    pub fn status_color(&self) -> &'static str {
        self.category.badge_color()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}
