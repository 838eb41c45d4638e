//! Food and category rankings
//!
//! Both rankings read order items only and value each line at its stored
//! `unit_price × quantity`.

use dineboard_types::{CategoryPerformance, Food, FoodCategory, FoodPerformance, OrderItem};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Default number of foods in the top list
pub const DEFAULT_TOP_FOODS: usize = 10;

/// Name shown when neither the item nor the catalog knows the food
pub const UNKNOWN_FOOD: &str = "Unknown";

#[derive(Default)]
struct SalesAggregate {
    revenue: f64,
    order_count: usize,
    quantity_sold: u64,
}

impl SalesAggregate {
    fn add(&mut self, item: &OrderItem) {
        self.revenue += item.line_total();
        self.order_count += 1;
        self.quantity_sold += item.quantity as u64;
    }
}

fn by_revenue_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Best-selling foods by revenue, at most `limit` entries
///
/// Items without a food id are skipped. Display name comes from the first
/// item carrying a stored name, then the food catalog, then "Unknown".
/// Equal revenue keeps food id order so repeated calls agree.
pub fn top_performing_foods(
    items: &[OrderItem],
    foods: &[Food],
    limit: usize,
) -> Vec<FoodPerformance> {
    let mut by_food: BTreeMap<&str, (SalesAggregate, Option<&str>)> = BTreeMap::new();

    for item in items {
        let Some(food_id) = item.food_id.as_deref() else {
            tracing::debug!(item_id = %item.id, "Order item without food id, skipping");
            continue;
        };

        let (aggregate, name) = by_food.entry(food_id).or_default();
        aggregate.add(item);
        if name.is_none() {
            *name = item.food_name.as_deref().filter(|n| !n.trim().is_empty());
        }
    }

    let catalog: HashMap<&str, &str> = foods
        .iter()
        .map(|food| (food.id.as_str(), food.name.as_str()))
        .collect();

    let mut ranked: Vec<FoodPerformance> = by_food
        .into_iter()
        .map(|(food_id, (aggregate, stored_name))| {
            let food_name = stored_name
                .or_else(|| catalog.get(food_id).copied().filter(|n| !n.is_empty()))
                .unwrap_or(UNKNOWN_FOOD)
                .to_string();

            FoodPerformance {
                food_id: food_id.to_string(),
                food_name,
                revenue: aggregate.revenue,
                order_count: aggregate.order_count,
                quantity_sold: aggregate.quantity_sold,
            }
        })
        .collect();

    // Stable sort keeps the BTreeMap id order among ties
    ranked.sort_by(|a, b| by_revenue_desc(a.revenue, b.revenue));
    ranked.truncate(limit);
    ranked
}

/// Revenue per category
///
/// A sale of a food listed by several categories is added in full to each of
/// them. Categories without sales are left out. `limit` caps the result when
/// given.
pub fn category_performance(
    items: &[OrderItem],
    categories: &[FoodCategory],
    limit: Option<usize>,
) -> Vec<CategoryPerformance> {
    // food id -> indices into `categories`
    let mut food_index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, category) in categories.iter().enumerate() {
        for food_id in &category.food_ids {
            let entry = food_index.entry(food_id.as_str()).or_default();
            if !entry.contains(&idx) {
                entry.push(idx);
            }
        }
    }

    let mut totals: BTreeMap<usize, SalesAggregate> = BTreeMap::new();
    for item in items {
        let Some(category_idxs) = item
            .food_id
            .as_deref()
            .and_then(|food_id| food_index.get(food_id))
        else {
            continue;
        };

        for &idx in category_idxs {
            totals.entry(idx).or_default().add(item);
        }
    }

    let mut ranked: Vec<CategoryPerformance> = totals
        .into_iter()
        .map(|(idx, aggregate)| {
            let category = &categories[idx];
            CategoryPerformance {
                category_id: category.id.clone(),
                category_name: category.name.clone(),
                revenue: aggregate.revenue,
                order_count: aggregate.order_count,
                quantity_sold: aggregate.quantity_sold,
            }
        })
        .collect();

    ranked.sort_by(|a, b| by_revenue_desc(a.revenue, b.revenue));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}
