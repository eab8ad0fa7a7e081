//! `/payment/*` endpoints: payment-intent creation, order persistence, and
//! coupon application.
//!
//! The three operations are also exposed behind the [`CheckoutApi`] trait so
//! the checkout orchestrator depends on the contract rather than on the
//! concrete HTTP client.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ApiClient;
use crate::errors::StorefrontError;
use crate::models::{CartLineItem, CustomerDetails, Order, OrderItemInput};

/// Line item sent on intent creation: id, quantity, and the effective unit
/// price. Advisory only; the backend recomputes the charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentItem {
    pub id: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl From<&CartLineItem> for PaymentIntentItem {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id.clone(),
            price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    pub items: Vec<PaymentIntentItem>,
    pub currency: String,
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// Backend response to intent creation. `amount_in_cents` is the
/// authoritative charge amount in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub amount_in_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOrderRequest {
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub items: Vec<OrderItemInput>,
    pub total_amount: Decimal,
    pub payment_intent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCouponRequest {
    pub code: String,
    pub subtotal: Decimal,
    pub user_id: Option<String>,
}

/// Validated discount returned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponQuote {
    pub discount: Decimal,
    pub final_total: Decimal,
}

/// Payment-backend contract consumed by the checkout orchestrator.
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: &CreatePaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, StorefrontError>;

    async fn save_order(&self, request: &SaveOrderRequest) -> Result<Order, StorefrontError>;

    async fn apply_coupon(
        &self,
        request: &ApplyCouponRequest,
    ) -> Result<CouponQuote, StorefrontError>;
}

#[async_trait]
impl CheckoutApi for ApiClient {
    #[instrument(skip(self, request), fields(items = request.items.len(), currency = %request.currency))]
    async fn create_payment_intent(
        &self,
        request: &CreatePaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, StorefrontError> {
        self.post_json("/payment/create-payment-intent", request)
            .await
    }

    #[instrument(skip(self, request), fields(payment_intent_id = %request.payment_intent_id))]
    async fn save_order(&self, request: &SaveOrderRequest) -> Result<Order, StorefrontError> {
        self.post_json("/payment/save-order", request).await
    }

    #[instrument(skip(self, request), fields(code = %request.code))]
    async fn apply_coupon(
        &self,
        request: &ApplyCouponRequest,
    ) -> Result<CouponQuote, StorefrontError> {
        self.post_json("/payment/apply-coupon", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn intent_item_snapshots_effective_price_and_quantity() {
        let line = CartLineItem {
            id: "p1".to_string(),
            name: "Tee".to_string(),
            image: String::new(),
            unit_price: dec!(19.99),
            quantity: 2,
            color: None,
            size: None,
        };

        let item = PaymentIntentItem::from(&line);
        assert_eq!(item.id, "p1");
        assert_eq!(item.price, dec!(19.99));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn save_order_request_flattens_customer_fields() {
        let request = SaveOrderRequest {
            customer: CustomerDetails {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                contact_no: "555".to_string(),
                address: "123 Main Street".to_string(),
                apartment_no: None,
                city: "New York".to_string(),
            },
            items: vec![],
            total_amount: dec!(25.00),
            payment_intent_id: "pi_1".to_string(),
            coupon_code: None,
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["paymentIntentId"], "pi_1");
        assert!(value.get("couponCode").is_none());
        assert!(value.get("customer").is_none());
    }

    #[test]
    fn coupon_quote_deserializes_camel_case() {
        let quote: CouponQuote =
            serde_json::from_str(r#"{"discount": "5.00", "finalTotal": "20.00"}"#)
                .expect("quote json");
        assert_eq!(quote.discount, dec!(5.00));
        assert_eq!(quote.final_total, dec!(20.00));
    }
}
