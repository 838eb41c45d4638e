//! Menu catalog: foods and categories

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Current price (never used for revenue)
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub available: bool,
}

/// A named group of foods
///
/// Membership is many-to-many: a food may be listed by several categories or
/// by none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub food_ids: Vec<String>,
}
