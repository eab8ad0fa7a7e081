use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::Product;

/// One product-and-variant entry in the shopping cart.
///
/// `unit_price` is the effective price captured when the item was first
/// added: the discounted price if the product had one, the list price
/// otherwise. Later catalog changes do not affect items already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartLineItem {
    /// Builds a quantity-1 line item from a catalog product, capturing the
    /// effective price at add time.
    pub fn from_product(product: &Product, color: Option<String>, size: Option<String>) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.effective_price(),
            quantity: 1,
            color,
            size,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn from_product_captures_discounted_price() {
        let product = Product {
            id: "p9".to_string(),
            name: "Wool Coat".to_string(),
            image: "https://cdn.example.com/coat.jpg".to_string(),
            price: dec!(120.00),
            discount_price: Some(dec!(99.00)),
            category: None,
            featured: false,
            sizes: vec![],
            colors: vec![],
        };

        let item = CartLineItem::from_product(&product, Some("navy".to_string()), None);
        assert_eq!(item.unit_price, dec!(99.00));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.color.as_deref(), Some("navy"));
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = CartLineItem {
            id: "a".to_string(),
            name: "Tee".to_string(),
            image: String::new(),
            unit_price: dec!(19.99),
            quantity: 3,
            color: None,
            size: None,
        };
        assert_eq!(item.line_total(), dec!(59.97));
    }
}
