use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fixed order lifecycle states. Only admins move an order forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Tag recorded on the order for how it was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodTag {
    Card,
    Cod,
}

/// Customer contact and delivery fields collected at checkout.
///
/// Required fields are checked locally before any network call is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact_no: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment_no: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
}

/// Per-line snapshot sent when an order is created. `price` is the effective
/// unit price at purchase time, not a live catalog reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// Order snapshot as returned by the backend. The client holds no
/// authoritative copy; it only displays what the server sends back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub delivery_charge: Decimal,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethodTag,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub created_at: DateTime<Utc>,
}
