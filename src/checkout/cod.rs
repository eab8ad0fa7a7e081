//! Cash-on-delivery order placement: a single create-order request with a
//! statically computed delivery fee, no payment orchestration.

use rust_decimal::Decimal;
use tracing::{info, instrument};
use validator::Validate;

use crate::api::user::CreateOrderRequest;
use crate::api::ApiClient;
use crate::errors::StorefrontError;
use crate::models::{CartLineItem, CustomerDetails, Order, OrderItemInput, PaymentMethodTag};

use super::delivery::DeliveryRates;

/// Places a cash-on-delivery order.
///
/// Checks the same local preconditions as the card flow (non-empty cart,
/// required customer fields), looks up the delivery fee for `region`, and
/// issues one `POST /user/create-order`. Success or failure is reported
/// directly; on success the caller clears the cart.
#[instrument(skip(api, customer, items), fields(items = items.len(), region))]
pub async fn place_cod_order(
    api: &ApiClient,
    rates: &DeliveryRates,
    customer: &CustomerDetails,
    items: &[CartLineItem],
    region: &str,
) -> Result<Order, StorefrontError> {
    if items.is_empty() {
        return Err(StorefrontError::EmptyCart);
    }
    customer.validate()?;

    let subtotal: Decimal = items.iter().map(CartLineItem::line_total).sum();
    let delivery_charge = rates.rate_for(region);
    let total_amount = subtotal + delivery_charge;

    let request = CreateOrderRequest {
        customer: customer.clone(),
        items: items
            .iter()
            .map(|item| OrderItemInput {
                product_id: item.id.clone(),
                quantity: item.quantity,
                price: item.unit_price,
            })
            .collect(),
        delivery_charge,
        total_amount,
        payment_method: PaymentMethodTag::Cod,
    };

    let order = api.create_order(&request).await?;
    info!(order_id = %order.id, total = %total_amount, "cash-on-delivery order placed");
    Ok(order)
}
