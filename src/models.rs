use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalogue product as stored. `price` and `sale_price` are whole Naira,
/// no minor units.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub category_id: Uuid,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Option<Vec<String>>,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_new_arrival: bool,
    pub is_best_seller: bool,
    pub is_on_sale: bool,
    pub sale_price: Option<i64>,
    pub created_at: DateTime<Utc>,
}
