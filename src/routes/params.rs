use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

/// Marketing collection a product is tagged into via its collection flags.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    NewArrivals,
    BestSellers,
    Sale,
}

impl Collection {
    pub fn contains(&self, product: &Product) -> bool {
        match self {
            Collection::NewArrivals => product.is_new_arrival,
            Collection::BestSellers => product.is_best_seller,
            Collection::Sale => product.is_on_sale,
        }
    }
}

/// Storefront listing filters, applied in memory over the active catalogue.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub category: Option<Uuid>,
    pub collection: Option<Collection>,
    pub q: Option<String>,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category_id) = self.category {
            if product.category_id != category_id {
                return false;
            }
        }
        if let Some(collection) = self.collection {
            if !collection.contains(product) {
                return false;
            }
        }
        if let Some(q) = self.q.as_ref().filter(|q| !q.trim().is_empty()) {
            let needle = q.trim().to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }
}
