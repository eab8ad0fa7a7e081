//! Shared fixtures for integration tests: a mocked payment provider, a stub
//! identity provider, and builders for carts and customers.
#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use storefront::auth::IdentityProvider;
use storefront::checkout::{CardPaymentMethod, PaymentConfirmation};
use storefront::errors::{IdentityError, ProviderError};
use storefront::models::{CartLineItem, CustomerDetails};
use storefront::PaymentProvider;

mockall::mock! {
    pub Provider {}

    #[async_trait]
    impl PaymentProvider for Provider {
        fn is_ready(&self) -> bool;

        async fn confirm_card_payment(
            &self,
            client_secret: &str,
            method: &CardPaymentMethod,
        ) -> Result<PaymentConfirmation, ProviderError>;
    }
}

/// Identity provider that accepts every credential. Sufficient for session
/// tests; the interesting behavior is in the token exchange.
pub struct AcceptAllIdentity;

#[async_trait]
impl IdentityProvider for AcceptAllIdentity {
    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _display_name: &str,
    ) -> Result<(), IdentityError> {
        Ok(())
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<(), IdentityError> {
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        Ok(())
    }
}

pub fn line_item(id: &str, name: &str, price: Decimal, quantity: i32) -> CartLineItem {
    CartLineItem {
        id: id.to_string(),
        name: name.to_string(),
        image: format!("https://cdn.example.com/{id}.jpg"),
        unit_price: price,
        quantity,
        color: None,
        size: None,
    }
}

pub fn customer() -> CustomerDetails {
    CustomerDetails {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        contact_no: "(555) 123-4567".to_string(),
        address: "123 Main Street".to_string(),
        apartment_no: None,
        city: "New York".to_string(),
    }
}

/// Order body as the backend returns it from save-order / create-order.
pub fn order_response(id: &str, payment_method: &str, total: &str) -> Value {
    json!({
        "_id": id,
        "firstName": "Jane",
        "lastName": "Doe",
        "contactNo": "(555) 123-4567",
        "address": "123 Main Street",
        "city": "New York",
        "items": [{"productId": "p1", "quantity": 2, "price": "10.00"}],
        "deliveryCharge": "0",
        "totalAmount": total,
        "paymentMethod": payment_method,
        "status": "Pending",
        "createdAt": "2025-06-01T12:00:00Z"
    })
}
