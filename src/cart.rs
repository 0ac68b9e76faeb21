use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

/// One (product, size) row in a cart. Two lines with the same product but
/// different sizes are distinct; same product and size must merge.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartLine {
    pub product: Product,
    pub size: String,
    pub quantity: u32,
}

/// In-memory cart for a single shopping session. Lines keep insertion order;
/// quantity never drops below 1 (a decrement to zero removes the line).
///
/// All mutators are total over valid inputs: operations on a missing
/// (product, size) key are no-ops, never errors.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `(product, size)`, merging into an existing line when
    /// the key matches. The unit price is whatever `product.price` carries at
    /// call time; no separate snapshot is kept.
    pub fn add_item(&mut self, product: Product, size: &str) {
        match self.find_mut(product.id, size) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product,
                size: size.to_string(),
                quantity: 1,
            }),
        }
    }

    /// Sets the matching line's quantity. A target of zero or below removes
    /// the line instead; a missing key is a no-op. Targets beyond `u32::MAX`
    /// saturate so a positive request can never leave a zero-quantity line.
    pub fn update_quantity(&mut self, product_id: Uuid, size: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id, size);
            return;
        }
        if let Some(line) = self.find_mut(product_id, size) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    pub fn remove_item(&mut self, product_id: Uuid, size: &str) {
        self.lines
            .retain(|line| !(line.product.id == product_id && line.size == size));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Grand total in whole Naira. Always the line's live `price` field;
    /// sale pricing is the consumer's call, never substituted here.
    pub fn total_price(&self) -> i64 {
        self.lines
            .iter()
            .map(|line| i64::from(line.quantity) * line.product.price)
            .sum()
    }

    fn find_mut(&mut self, product_id: Uuid, size: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id && line.size == size)
    }
}
