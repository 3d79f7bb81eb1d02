//! Cart rendering: the join of cart and catalog.
//!
//! Everything here is derived on demand and never persisted. Rendering is a
//! pure function of the cart and catalog, so building a summary twice from the
//! same inputs yields the same rows and totals.

use rust_decimal::Decimal;

use crate::cart::Cart;
use crate::catalog::{Catalog, CatalogEntry};
use crate::types::{Price, ProductId, Quantity};

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub id: ProductId,
    pub entry: CatalogEntry,
    pub quantity: Quantity,
    /// `entry.price * quantity`
    pub subtotal: Decimal,
}

/// Resolve cart lines against the catalog, in cart order.
///
/// Ids the catalog does not know are skipped, as is any line whose subtotal
/// does not fit a `Decimal` (unreachable for catalogs built through
/// [`Catalog::new`], whose prices are capped).
#[must_use]
pub fn compute_line_items(cart: &Cart, catalog: &Catalog) -> Vec<LineItem> {
    cart.iter()
        .filter_map(|(id, quantity)| {
            let entry = catalog.get(id.as_str())?;
            let subtotal =
                Price::new(entry.price, catalog.currency_code()).checked_times(quantity)?;
            Some(LineItem {
                id: id.clone(),
                entry: entry.clone(),
                quantity,
                subtotal: subtotal.amount,
            })
        })
        .collect()
}

/// Sum of line subtotals; zero for no lines. Saturates at `Decimal::MAX`.
#[must_use]
pub fn compute_grand_total(line_items: &[LineItem]) -> Decimal {
    line_items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.subtotal))
        .unwrap_or(Decimal::MAX)
}

/// Everything a cart or checkout page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub line_items: Vec<LineItem>,
    pub grand_total: Price,
    /// Total units stored in the cart, resolved or not.
    pub badge_count: u64,
}

impl CartSummary {
    /// Build the summary for a cart.
    #[must_use]
    pub fn build(cart: &Cart, catalog: &Catalog) -> Self {
        let line_items = compute_line_items(cart, catalog);
        let grand_total = Price::new(compute_grand_total(&line_items), catalog.currency_code());
        Self {
            line_items,
            grand_total,
            badge_count: cart.badge_count(),
        }
    }

    /// Whether there are no rows to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::CurrencyCode;

    fn catalog() -> Catalog {
        Catalog::from_json_str(
            r#"{
                "sku1": { "name": "Striped Tee", "price": 10, "img": "/t.jpg", "url": "/p/sku1" },
                "sku2": { "name": "Rain Boots", "price": 5, "img": "/b.jpg", "url": "/p/sku2" }
            }"#,
            CurrencyCode::USD,
        )
        .unwrap()
    }

    #[test]
    fn test_line_items_and_totals() {
        let cart = Cart::from_value(&json!({ "sku1": 2, "sku2": 1 })).unwrap();
        let summary = CartSummary::build(&cart, &catalog());

        let subtotals: Vec<Decimal> = summary.line_items.iter().map(|l| l.subtotal).collect();
        assert_eq!(subtotals, [Decimal::from(20), Decimal::from(5)]);
        assert_eq!(summary.grand_total.amount, Decimal::from(25));
        assert_eq!(summary.grand_total.display(), "$25.00");
        assert_eq!(summary.badge_count, 3);
    }

    #[test]
    fn test_unknown_ids_skipped() {
        let cart = Cart::from_value(&json!({ "sku1": 2, "ghost": 1 })).unwrap();
        let items = compute_line_items(&cart, &catalog());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_str(), "sku1");
    }

    #[test]
    fn test_empty_cart() {
        let summary = CartSummary::build(&Cart::new(), &catalog());
        assert!(summary.is_empty());
        assert_eq!(summary.grand_total.amount, Decimal::ZERO);
        assert_eq!(summary.badge_count, 0);
        assert_eq!(compute_grand_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_line_items_follow_cart_order() {
        let cart = Cart::from_value(&json!({ "sku2": 1, "sku1": 1 })).unwrap();
        let ids: Vec<String> = compute_line_items(&cart, &catalog())
            .into_iter()
            .map(|l| l.id.to_string())
            .collect();
        assert_eq!(ids, ["sku2", "sku1"]);
    }

    #[test]
    fn test_largest_price_and_quantity_do_not_overflow() {
        let catalog = Catalog::from_json_str(
            r#"{
                "top": { "name": "Heirloom Pram", "price": "1000000", "img": "", "url": "" },
                "sku1": { "name": "Striped Tee", "price": 10, "img": "", "url": "" }
            }"#,
            CurrencyCode::USD,
        )
        .unwrap();
        let mut cart = Cart::new();
        let most = Quantity::parse_or_default(Some("4294967295"));
        cart.add(ProductId::parse("top").unwrap(), most);
        cart.add(ProductId::parse("sku1").unwrap(), most);

        let summary = CartSummary::build(&cart, &catalog);

        assert_eq!(summary.line_items.len(), 2);
        assert_eq!(
            summary.line_items[0].subtotal,
            Decimal::from(1_000_000_u64 * u64::from(u32::MAX))
        );
        assert_eq!(
            summary.grand_total.amount,
            Decimal::from(1_000_010_u64 * u64::from(u32::MAX))
        );
    }

    #[test]
    fn test_grand_total_saturates() {
        let item = |id: &str| LineItem {
            id: ProductId::parse(id).unwrap(),
            entry: catalog().get("sku1").unwrap().clone(),
            quantity: Quantity::ONE,
            subtotal: Decimal::MAX,
        };
        assert_eq!(compute_grand_total(&[item("a"), item("b")]), Decimal::MAX);
    }

    #[test]
    fn test_build_is_repeatable() {
        let cart = Cart::from_value(&json!({ "sku1": 3 })).unwrap();
        let catalog = catalog();
        assert_eq!(CartSummary::build(&cart, &catalog), CartSummary::build(&cart, &catalog));
    }
}
