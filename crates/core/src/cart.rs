//! Session cart state.
//!
//! A [`Cart`] is a plain value: an insertion-ordered list of product ids with
//! quantities. Every mutation goes through [`Cart::apply`] (or the matching
//! `&mut self` helpers), so whoever owns the cart replaces the whole snapshot
//! after each action and readers never see a half-applied change.
//!
//! The cart does not consult the catalog. Unknown ids are stored like any
//! other and are dropped later when an [`OrderSummary`](crate::OrderSummary)
//! is derived.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// One cart entry. `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A single cart operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "product_id", rename_all = "snake_case")]
pub enum CartAction {
    /// Add one unit, creating the entry if needed.
    Add(ProductId),
    /// Add one unit to an existing entry; ignored if absent.
    Increase(ProductId),
    /// Remove one unit; the entry disappears when it reaches zero.
    Decrease(ProductId),
    /// Drop the entry regardless of quantity.
    Remove(ProductId),
    /// Empty the cart.
    Clear,
}

/// The user's current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Apply an action and return the resulting snapshot.
    #[must_use]
    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Add(id) => self.add_item(id),
            CartAction::Increase(id) => self.increase_quantity(&id),
            CartAction::Decrease(id) => self.decrease_quantity(&id),
            CartAction::Remove(id) => self.remove_item(&id),
            CartAction::Clear => self.clear(),
        }
        self
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing entry, or appends a new one with quantity 1.
    pub fn add_item(&mut self, product_id: ProductId) {
        match self.find_mut(&product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product_id,
                quantity: 1,
            }),
        }
    }

    /// Increment an existing entry. Never creates one.
    pub fn increase_quantity(&mut self, product_id: &ProductId) {
        if let Some(item) = self.find_mut(product_id) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    /// Decrement an existing entry, removing it when it reaches zero.
    pub fn decrease_quantity(&mut self, product_id: &ProductId) {
        let Some(position) = self.position(product_id) else {
            return;
        };

        let emptied = self.items.get_mut(position).is_some_and(|item| {
            item.quantity = item.quantity.saturating_sub(1);
            item.quantity == 0
        });

        if emptied {
            self.items.remove(position);
        }
    }

    /// Remove an entry regardless of its quantity.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product_id != product_id);
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities (not the number of entries).
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Quantity held for a product, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }

    fn find_mut(&mut self, product_id: &ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
    }
}
