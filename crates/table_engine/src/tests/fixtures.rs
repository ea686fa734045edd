use chrono::NaiveDate;
use shared::domain::{Customer, CustomerStatus};

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn customer(id: &str, name: &str, email: &str, status: CustomerStatus) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: "+15550100".to_string(),
        company: None,
        status,
        last_contacted: day(2024, 5, 1),
        created_at: day(2024, 1, 10),
        notes: None,
        comments: Vec::new(),
    }
}

/// Two of these (ids 2 and 4) contain an "a" in their name or email.
pub fn five_customers() -> Vec<Customer> {
    vec![
        customer("1", "John Doe", "john@doe.com", CustomerStatus::Active),
        customer("2", "Sarah Miller", "sarah@miller.io", CustomerStatus::Lead),
        customer("3", "Kevin Li", "kevin@tech.io", CustomerStatus::Active),
        customer("4", "Maria Garcia", "maria@garcia.com", CustomerStatus::Prospect),
        customer("5", "Tom Brown", "tom@outlook.com", CustomerStatus::Inactive),
    ]
}

/// `count` customers with ids "1".."count", all active.
pub fn numbered_customers(count: usize) -> Vec<Customer> {
    (1..=count)
        .map(|index| {
            customer(
                &index.to_string(),
                &format!("Customer {index}"),
                &format!("customer{index}@example.com"),
                CustomerStatus::Active,
            )
        })
        .collect()
}
