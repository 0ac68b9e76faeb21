use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

/// Full product body for create and update; the admin form always submits
/// the whole record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub name: String,
    pub price: i64,
    pub category_id: Uuid,
    #[serde(default)]
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Option<Vec<String>>,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_new_arrival: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_on_sale: bool,
    pub sale_price: Option<i64>,
}

fn default_active() -> bool {
    true
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
