use std::collections::HashMap;

use shared::{
    domain::{BoardColumn, Order, OrderStatus, Product, Task},
    protocol::{DashboardSummary, OrderStats, TaskStats, TopSellingProduct},
};

use crate::{entity::DEFAULT_PRODUCT_IMAGE, ApiContext};

pub const TOP_SELLING_LIMIT: usize = 3;

pub fn order_stats(orders: &[Order]) -> OrderStats {
    let count = |status: OrderStatus| orders.iter().filter(|order| order.status == status).count();
    OrderStats {
        total: orders.len(),
        pending: count(OrderStatus::Pending),
        in_transit: count(OrderStatus::InTransit),
        completed: count(OrderStatus::Completed),
        canceled: count(OrderStatus::Canceled),
    }
}

/// Groups non-canceled orders by item code and ranks them by units sold.
/// Groups keep first-seen order, so equal quantities rank by appearance.
pub fn top_selling(orders: &[Order], products: &[Product], limit: usize) -> Vec<TopSellingProduct> {
    let mut ranked: Vec<TopSellingProduct> = Vec::new();
    let mut index_by_code: HashMap<&str, usize> = HashMap::new();

    for order in orders.iter().filter(|order| order.status != OrderStatus::Canceled) {
        let slot = *index_by_code.entry(order.item.as_str()).or_insert_with(|| {
            ranked.push(TopSellingProduct {
                code: order.item.clone(),
                name: order.product.clone(),
                total_quantity: 0,
                total_revenue: 0.0,
                price: 0.0,
                image: DEFAULT_PRODUCT_IMAGE.to_string(),
            });
            ranked.len() - 1
        });
        ranked[slot].total_quantity += u64::from(order.quantity);
        ranked[slot].total_revenue += order.total;
    }

    ranked.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    ranked.truncate(limit);

    for entry in &mut ranked {
        if let Some(product) = products.iter().find(|product| product.code == entry.code) {
            entry.price = product.price;
            entry.image = product.image.clone();
        }
    }
    ranked
}

pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let count = |column: BoardColumn| tasks.iter().filter(|task| task.column == column).count();
    TaskStats {
        todo: count(BoardColumn::Todo),
        in_progress: count(BoardColumn::InProgress),
        in_review: count(BoardColumn::InReview),
        done: count(BoardColumn::Done),
        total: tasks.len(),
    }
}

pub async fn summary(ctx: &ApiContext) -> DashboardSummary {
    let orders = ctx.workspace.orders.records().await;
    let products = ctx.workspace.products.records().await;
    let tasks = ctx.tasks.snapshot().await;
    DashboardSummary {
        orders: order_stats(&orders),
        top_selling: top_selling(&orders, &products, TOP_SELLING_LIMIT),
        tasks: task_stats(&tasks),
        customer_count: ctx.workspace.customers.len().await,
        agent_count: ctx.workspace.agents.len().await,
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
