use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::StorefrontError;
use crate::models::CartLineItem;
use crate::storage::KeyValueStore;

const CART_KEY: &str = "cart";

/// Normalized mapping from product id to [`CartLineItem`].
///
/// Holds at most one entry per product id; quantity is always at least 1
/// while an entry exists. All four transitions are synchronous total
/// functions over the state, with no failure mode.
///
/// The store is owned by the application root and passed down explicitly;
/// these methods are its only mutation surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartStore {
    items: HashMap<String, CartLineItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product to the cart.
    ///
    /// If the product is already present the existing entry's quantity is
    /// incremented by 1 and its captured price and variant selection win;
    /// any price or variant fields on the incoming item are ignored.
    /// Otherwise the item is inserted with quantity 1.
    pub fn add_to_cart(&mut self, item: CartLineItem) {
        match self.items.get_mut(&item.id) {
            Some(existing) => {
                existing.quantity += 1;
                debug!(id = %item.id, quantity = existing.quantity, "incremented cart item");
            }
            None => {
                let id = item.id.clone();
                self.items.insert(
                    id.clone(),
                    CartLineItem {
                        quantity: 1,
                        ..item
                    },
                );
                debug!(id = %id, "added cart item");
            }
        }
    }

    /// Removes the entry for `id`. A no-op, not an error, when absent.
    pub fn remove_from_cart(&mut self, id: &str) {
        if self.items.remove(id).is_some() {
            debug!(id, "removed cart item");
        }
    }

    /// Sets the entry's quantity to exactly `quantity` when positive; a
    /// quantity of 0 or less removes the entry instead. Never inserts, and
    /// a no-op on an absent id.
    pub fn update_quantity(&mut self, id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_from_cart(id);
        } else if let Some(item) = self.items.get_mut(id) {
            item.quantity = quantity;
            debug!(id, quantity, "updated cart item quantity");
        }
    }

    /// Empties the cart unconditionally.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        debug!("cleared cart");
    }

    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.get(id)
    }

    /// Line items sorted by product name, the display ordering.
    pub fn items(&self) -> Vec<CartLineItem> {
        let mut items: Vec<CartLineItem> = self.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all line items.
    pub fn total_quantity(&self) -> i32 {
        self.items.values().map(|item| item.quantity).sum()
    }

    /// Σ unit price × quantity over all line items. Advisory only at
    /// checkout; the backend computes the authoritative charge.
    pub fn subtotal(&self) -> Decimal {
        self.items.values().map(CartLineItem::line_total).sum()
    }

    /// Rehydrates the cart from persistent storage. A missing key yields an
    /// empty cart.
    pub fn load(storage: &dyn KeyValueStore) -> Result<Self, StorefrontError> {
        match storage.get(CART_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Self::new()),
        }
    }

    /// Writes the current cart state to persistent storage.
    pub fn persist(&self, storage: &dyn KeyValueStore) -> Result<(), StorefrontError> {
        storage.set(CART_KEY, &serde_json::to_string(self)?)
    }
}
