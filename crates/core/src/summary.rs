//! Order summary derived from a cart and the catalog.
//!
//! Summaries are recomputed on every read and never stored. Cart entries whose
//! product is missing from the catalog are skipped silently, so a catalog
//! change cannot break the cart page.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::types::{CurrencyCode, ProductId, format_amount};

/// One priced line of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummaryLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// `unit_price × quantity`, unrounded.
    pub line_total: Decimal,
}

/// Cart contents joined with catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    lines: Vec<OrderSummaryLine>,
    grand_total: Decimal,
    currency: CurrencyCode,
}

impl OrderSummary {
    /// Join `cart` against `catalog`, keeping cart order.
    #[must_use]
    pub fn build(cart: &Cart, catalog: &Catalog, currency: CurrencyCode) -> Self {
        let lines: Vec<OrderSummaryLine> = cart
            .items()
            .iter()
            .filter_map(|item| {
                let product = catalog.get(&item.product_id)?;
                Some(OrderSummaryLine {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity: item.quantity,
                    line_total: product.price * Decimal::from(item.quantity),
                })
            })
            .collect();

        let grand_total = lines.iter().map(|line| line.line_total).sum();

        Self {
            lines,
            grand_total,
            currency,
        }
    }

    /// Retained lines in cart order.
    #[must_use]
    pub fn lines(&self) -> &[OrderSummaryLine] {
        &self.lines
    }

    /// Exact sum of all line totals.
    #[must_use]
    pub const fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Sum of quantities over retained lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// True when no cart entry matched a catalog product.
    ///
    /// A cart holding only unknown ids is empty by this measure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Grand total rendered with two decimals, e.g. "GHS 108.00".
    #[must_use]
    pub fn display_total(&self) -> String {
        format_amount(self.grand_total, self.currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartAction;
    use crate::catalog::tests::{cookie_catalog, product};

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_two_oreos_and_a_lotus() {
        let cart = Cart::new()
            .apply(CartAction::Add(id("oreo-delight")))
            .apply(CartAction::Add(id("oreo-delight")))
            .apply(CartAction::Add(id("lotus-biscoff")));

        let summary = OrderSummary::build(&cart, &cookie_catalog(), CurrencyCode::GHS);

        assert_eq!(summary.lines().len(), 2);
        assert_eq!(summary.grand_total(), Decimal::new(108, 0));
        assert_eq!(summary.item_count(), 3);
        assert_eq!(summary.display_total(), "GHS 108.00");

        let oreo = summary.lines().first().unwrap();
        assert_eq!(oreo.name, "Oreo Overload");
        assert_eq!(oreo.quantity, 2);
        assert_eq!(oreo.line_total, Decimal::new(70, 0));
    }

    #[test]
    fn test_unknown_products_are_dropped() {
        let cart = Cart::new()
            .apply(CartAction::Add(id("discontinued")))
            .apply(CartAction::Add(id("discontinued")))
            .apply(CartAction::Add(id("lotus-biscoff")));

        let summary = OrderSummary::build(&cart, &cookie_catalog(), CurrencyCode::GHS);

        assert_eq!(summary.lines().len(), 1);
        assert!(summary.lines().iter().all(|l| l.product_id.as_str() != "discontinued"));
        assert_eq!(summary.grand_total(), Decimal::new(38, 0));
        assert_eq!(summary.item_count(), 1);
    }

    #[test]
    fn test_only_unknown_products_is_empty() {
        let cart = Cart::new().apply(CartAction::Add(id("discontinued")));
        assert!(!cart.is_empty());

        let summary = OrderSummary::build(&cart, &cookie_catalog(), CurrencyCode::GHS);
        assert!(summary.is_empty());
        assert_eq!(summary.grand_total(), Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_is_empty_summary() {
        let summary = OrderSummary::build(&Cart::new(), &cookie_catalog(), CurrencyCode::GHS);
        assert!(summary.is_empty());
        assert_eq!(summary.display_total(), "GHS 0.00");
    }

    #[test]
    fn test_grand_total_is_exact_before_display_rounding() {
        let catalog = Catalog::new(vec![
            product("third", "Third", Decimal::new(3333, 3)),
            product("half", "Half", Decimal::new(1005, 3)),
        ])
        .unwrap();

        let cart = Cart::new()
            .apply(CartAction::Add(id("third")))
            .apply(CartAction::Add(id("third")))
            .apply(CartAction::Add(id("third")))
            .apply(CartAction::Add(id("half")));

        let summary = OrderSummary::build(&cart, &catalog, CurrencyCode::GHS);

        // 3 × 3.333 + 1.005 = 11.004, not 3 × 3.33 + 1.01
        assert_eq!(summary.grand_total(), Decimal::new(11004, 3));
        let expected: Decimal = summary
            .lines()
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(summary.grand_total(), expected);
        assert_eq!(summary.display_total(), "GHS 11.00");
    }
}
