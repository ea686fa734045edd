//! Start-up contents of the in-memory tables. Restarting the server resets
//! every table to these lists.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use shared::domain::{
    Agent, AgentRole, AgentStatus, Avatar, BoardColumn, Customer, CustomerStatus, Order,
    OrderStatus, PaymentStatus, Product, ProductStatus, ProductType, Task, TaskCategory,
    TaskPriority,
};

use crate::entity::DEFAULT_PRODUCT_IMAGE;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

pub fn customers() -> Vec<Customer> {
    let customer = |id: &str,
                    name: &str,
                    email: &str,
                    phone: &str,
                    company: Option<&str>,
                    status: CustomerStatus,
                    last_contacted: NaiveDate,
                    created_at: NaiveDate| Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        company: company.map(str::to_string),
        status,
        last_contacted,
        created_at,
        notes: None,
        comments: Vec::new(),
    };
    vec![
        customer(
            "1",
            "John Doe",
            "john@doe.com",
            "+1 555 010 2030",
            Some("Doe Logistics"),
            CustomerStatus::Active,
            day(2024, 5, 2),
            day(2023, 11, 14),
        ),
        customer(
            "2",
            "Sarah Miller",
            "sarah@miller.io",
            "+1 555 010 4410",
            Some("Miller Studio"),
            CustomerStatus::Lead,
            day(2024, 4, 18),
            day(2024, 2, 3),
        ),
        customer(
            "3",
            "Kevin Li",
            "kevin@tech.io",
            "+44 20 7946 0958",
            None,
            CustomerStatus::Prospect,
            day(2024, 3, 29),
            day(2024, 1, 22),
        ),
        customer(
            "4",
            "Maria Garcia",
            "maria@garcia.com",
            "+34 912 345 678",
            Some("Garcia & Hijos"),
            CustomerStatus::Active,
            day(2024, 5, 9),
            day(2023, 9, 5),
        ),
        customer(
            "5",
            "Tom Brown",
            "tom@outlook.com",
            "+1 555 010 9988",
            None,
            CustomerStatus::Inactive,
            day(2023, 12, 1),
            day(2023, 6, 30),
        ),
    ]
}

pub fn agents() -> Vec<Agent> {
    let agent = |id: &str,
                 name: &str,
                 email: &str,
                 role: AgentRole,
                 status: AgentStatus,
                 assigned: &[&str],
                 created_at: NaiveDate,
                 last_login: DateTime<Utc>| Agent {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: "+1 555 020 1000".to_string(),
        role,
        status,
        assigned_customers: assigned.iter().map(|id| id.to_string()).collect(),
        created_at,
        last_login,
        notes: String::new(),
        comments: Vec::new(),
    };
    vec![
        agent(
            "A01",
            "Alex Morgan",
            "alex.morgan@crm.dev",
            AgentRole::Admin,
            AgentStatus::Active,
            &["1", "4"],
            day(2023, 1, 10),
            at(2024, 5, 12, 9, 15),
        ),
        agent(
            "A02",
            "Priya Patel",
            "priya.patel@crm.dev",
            AgentRole::Manager,
            AgentStatus::Active,
            &["2"],
            day(2023, 3, 4),
            at(2024, 5, 11, 17, 42),
        ),
        agent(
            "A03",
            "Lukas Becker",
            "lukas.becker@crm.dev",
            AgentRole::Agent,
            AgentStatus::OnLeave,
            &["3"],
            day(2023, 7, 19),
            at(2024, 4, 2, 8, 5),
        ),
        agent(
            "A04",
            "Emma Wilson",
            "emma.wilson@crm.dev",
            AgentRole::Agent,
            AgentStatus::Active,
            &["5"],
            day(2023, 10, 2),
            at(2024, 5, 10, 13, 30),
        ),
        agent(
            "A05",
            "Noah Kim",
            "noah.kim@crm.dev",
            AgentRole::Agent,
            AgentStatus::Inactive,
            &[],
            day(2024, 1, 8),
            at(2024, 2, 20, 11, 0),
        ),
    ]
}

pub fn products() -> Vec<Product> {
    let product = |id: &str,
                   name: &str,
                   code: &str,
                   product_type: ProductType,
                   date: NaiveDate,
                   stock: u32,
                   price: f64,
                   status: ProductStatus| Product {
        id: id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        product_type,
        date,
        stock,
        price,
        status,
        image: DEFAULT_PRODUCT_IMAGE.to_string(),
        comments: Vec::new(),
    };
    vec![
        product(
            "1",
            "Professional Laptop",
            "LP-PRO-001",
            ProductType::Physical,
            day(2024, 1, 15),
            25,
            1299.99,
            ProductStatus::Active,
        ),
        product(
            "2",
            "Cloud Storage Pro",
            "CS-PRO-002",
            ProductType::Subscription,
            day(2024, 2, 10),
            0,
            29.99,
            ProductStatus::Active,
        ),
        product(
            "3",
            "Wireless Headphones",
            "WH-BLU-003",
            ProductType::Physical,
            day(2024, 3, 5),
            5,
            199.99,
            ProductStatus::Active,
        ),
        product(
            "4",
            "Design Software License",
            "DS-LIC-004",
            ProductType::Digital,
            day(2024, 1, 20),
            0,
            599.99,
            ProductStatus::Active,
        ),
        product(
            "5",
            "Ergonomic Office Chair",
            "EOC-GRY-005",
            ProductType::Physical,
            day(2024, 4, 12),
            0,
            449.99,
            ProductStatus::Disabled,
        ),
    ]
}

pub fn orders() -> Vec<Order> {
    let order = |id: &str,
                 date: NaiveDate,
                 customer: &str,
                 address: &str,
                 (product, product_type, item): (&str, ProductType, &str),
                 quantity: u32,
                 total: f64,
                 payment: PaymentStatus,
                 status: OrderStatus| Order {
        id: id.to_string(),
        date,
        customer: customer.to_string(),
        address: address.to_string(),
        product: product.to_string(),
        product_type,
        item: item.to_string(),
        quantity,
        total,
        payment,
        status,
    };
    let laptop = ("Professional Laptop", ProductType::Physical, "LP-PRO-001");
    let storage = ("Cloud Storage Pro", ProductType::Subscription, "CS-PRO-002");
    let headphones = ("Wireless Headphones", ProductType::Physical, "WH-BLU-003");
    let license = ("Design Software License", ProductType::Digital, "DS-LIC-004");
    let chair = ("Ergonomic Office Chair", ProductType::Physical, "EOC-GRY-005");
    vec![
        order(
            "ORD-001",
            day(2024, 4, 2),
            "John Doe",
            "12 Harbor Rd, Boston, MA",
            laptop,
            2,
            2599.98,
            PaymentStatus::Paid,
            OrderStatus::Completed,
        ),
        order(
            "ORD-002",
            day(2024, 4, 5),
            "Sarah Miller",
            "48 Elm St, Austin, TX",
            storage,
            12,
            359.88,
            PaymentStatus::Paid,
            OrderStatus::Completed,
        ),
        order(
            "ORD-003",
            day(2024, 4, 11),
            "Kevin Li",
            "7 Camden High St, London",
            headphones,
            3,
            599.97,
            PaymentStatus::Unpaid,
            OrderStatus::Pending,
        ),
        order(
            "ORD-004",
            day(2024, 4, 16),
            "Maria Garcia",
            "Calle Mayor 3, Madrid",
            license,
            5,
            2999.95,
            PaymentStatus::Paid,
            OrderStatus::InTransit,
        ),
        order(
            "ORD-005",
            day(2024, 4, 20),
            "Tom Brown",
            "301 Pine Ave, Denver, CO",
            chair,
            1,
            449.99,
            PaymentStatus::Unpaid,
            OrderStatus::Canceled,
        ),
        order(
            "ORD-006",
            day(2024, 4, 28),
            "John Doe",
            "12 Harbor Rd, Boston, MA",
            headphones,
            4,
            799.96,
            PaymentStatus::Paid,
            OrderStatus::InTransit,
        ),
        order(
            "ORD-007",
            day(2024, 5, 3),
            "Maria Garcia",
            "Calle Mayor 3, Madrid",
            storage,
            6,
            179.94,
            PaymentStatus::Unpaid,
            OrderStatus::Pending,
        ),
    ]
}

fn avatar(image: u32, initials: &str) -> Avatar {
    Avatar {
        src: format!("https://cdn.jsdelivr.net/gh/alohe/avatars/png/vibrent_{image}.png"),
        alt: format!("@{}", initials.to_lowercase()),
        fallback: initials.to_string(),
    }
}

pub fn tasks() -> Vec<Task> {
    let task = |id: &str,
                column: BoardColumn,
                category: TaskCategory,
                priority: TaskPriority,
                title: &str,
                description: &str,
                avatars: Vec<Avatar>,
                last_added: &str| Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        priority,
        column,
        last_added: last_added.to_string(),
        avatars,
    };
    use BoardColumn::{Done, InProgress, InReview, Todo};
    use TaskPriority::{High, Low, Medium};
    vec![
        task(
            "1",
            Todo,
            TaskCategory::Design,
            Low,
            "Hero section",
            "Create a design system for a hero section in 2 different variants. Create a simple presentation with these components.",
            vec![avatar(5, "VH"), avatar(7, "AG")],
            "Last 2 days ago",
        ),
        task(
            "2",
            Todo,
            TaskCategory::FollowUp,
            Medium,
            "Prepare project kickoff",
            "Gather requirements and prepare the agenda for the project kickoff meeting.",
            vec![avatar(8, "PM")],
            "Last 16 minutes ago",
        ),
        task(
            "3",
            InProgress,
            TaskCategory::Development,
            High,
            "Implement design screens",
            "Our designers created 6 screens for a website that needs to be implemented by our dev team.",
            vec![avatar(8, "VH"), avatar(12, "LK")],
            "Last 2 hours ago",
        ),
        task(
            "4",
            InProgress,
            TaskCategory::Testing,
            Medium,
            "Unit test user login",
            "Write and run unit tests for the user login flow to ensure reliability.",
            vec![avatar(15, "EM")],
            "Last week ago",
        ),
        task(
            "5",
            InProgress,
            TaskCategory::Content,
            Low,
            "Update documentation",
            "Revise the onboarding documentation for new developers.",
            vec![avatar(18, "JS")],
            "Last 2 weeks ago",
        ),
        task(
            "6",
            InProgress,
            TaskCategory::FollowUp,
            Medium,
            "Schedule sprint review",
            "Coordinate with the team to schedule the next sprint review meeting.",
            vec![avatar(19, "NL")],
            "Last day ago",
        ),
        task(
            "7",
            InReview,
            TaskCategory::Content,
            High,
            "Review homepage layout",
            "The homepage layout implementation is ready for review by the design team.",
            vec![avatar(24, "JS"), avatar(27, "EM")],
            "Last 2 weeks ago",
        ),
        task(
            "8",
            InReview,
            TaskCategory::Meeting,
            Low,
            "QA sync meeting",
            "Sync with QA team to review the latest bug reports and fixes.",
            vec![avatar(5, "QA")],
            "Last week ago",
        ),
        task(
            "9",
            Done,
            TaskCategory::Marketing,
            Medium,
            "Fix bugs in the CSS code",
            "Fix small bugs that are essential to prepare for the next release that will happen this quarter.",
            vec![avatar(7, "HU"), avatar(8, "NL")],
            "Last day ago",
        ),
        task(
            "10",
            Done,
            TaskCategory::Testing,
            High,
            "End-to-end tests",
            "Completed E2E tests for the checkout flow.",
            vec![avatar(12, "EM"), avatar(15, "LK")],
            "Last 2 hours ago",
        ),
        task(
            "11",
            Done,
            TaskCategory::FollowUp,
            Low,
            "Send release notes",
            "Release notes for v1.2 have been sent to all stakeholders.",
            vec![avatar(18, "NL")],
            "Last 16 minutes ago",
        ),
    ]
}
