//! `/user/*` endpoints: catalog reads, order history, and cash-on-delivery
//! order creation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ApiClient;
use crate::errors::StorefrontError;
use crate::models::{Coupon, CustomerDetails, Order, OrderItemInput, PaymentMethodTag, Product};

/// Payload for direct order creation (cash on delivery). Carries the
/// statically computed delivery charge and total; no payment-intent step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub items: Vec<OrderItemInput>,
    pub delivery_charge: Decimal,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethodTag,
}

impl ApiClient {
    /// `POST /user/create-order` — places a cash-on-delivery order.
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, StorefrontError> {
        self.post_json("/user/create-order", request).await
    }

    /// `GET /user/products/{id}`.
    #[instrument(skip(self))]
    pub async fn product_details(&self, id: &str) -> Result<Product, StorefrontError> {
        self.get_json(&format!("/user/products/{id}")).await
    }

    /// `GET /user/featured-products`.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<Product>, StorefrontError> {
        self.get_json("/user/featured-products").await
    }

    /// `GET /user/order-history` — orders of the bearer-token holder.
    #[instrument(skip(self))]
    pub async fn order_history(&self) -> Result<Vec<Order>, StorefrontError> {
        self.get_json("/user/order-history").await
    }

    /// `GET /user/active-coupon` — the currently promoted coupon, if any.
    #[instrument(skip(self))]
    pub async fn active_coupon(&self) -> Result<Option<Coupon>, StorefrontError> {
        self.get_json("/user/active-coupon").await
    }
}
