//! Coupon application against the backend.
//!
//! The discount shown here is display state only. The coupon code is
//! forwarded again on payment-intent creation and the backend re-validates
//! it there; a failed application never blocks checkout, it just stops
//! offering a discount.

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::api::payment::{ApplyCouponRequest, CheckoutApi, CouponQuote};
use crate::errors::StorefrontError;

/// Discount state for the checkout summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponState {
    discount: Decimal,
    final_total: Decimal,
}

impl CouponState {
    /// Starts with no discount and the unmodified subtotal.
    pub fn new(subtotal: Decimal) -> Self {
        Self {
            discount: Decimal::ZERO,
            final_total: subtotal,
        }
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn final_total(&self) -> Decimal {
        self.final_total
    }

    /// Validates `code` against `subtotal` server-side.
    ///
    /// An empty or whitespace code fails locally with
    /// [`StorefrontError::EmptyCouponCode`] and no network call; the current
    /// state is untouched. Any backend rejection resets the discount to zero
    /// and the final total to the unmodified subtotal, and surfaces the
    /// server message. Nothing is retried; the shopper may re-attempt.
    #[instrument(skip(self, api), fields(code = %code))]
    pub async fn apply<A: CheckoutApi>(
        &mut self,
        api: &A,
        code: &str,
        subtotal: Decimal,
        user_id: Option<&str>,
    ) -> Result<CouponQuote, StorefrontError> {
        if code.trim().is_empty() {
            return Err(StorefrontError::EmptyCouponCode);
        }

        let request = ApplyCouponRequest {
            code: code.to_string(),
            subtotal,
            user_id: user_id.map(str::to_string),
        };

        match api.apply_coupon(&request).await {
            Ok(quote) => {
                self.discount = quote.discount;
                self.final_total = quote.final_total;
                info!(discount = %quote.discount, "coupon applied");
                Ok(quote)
            }
            Err(err) => {
                self.discount = Decimal::ZERO;
                self.final_total = subtotal;
                warn!(error = %err, "coupon rejected");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::api::payment::{
        CreatePaymentIntentRequest, PaymentIntentResponse, SaveOrderRequest,
    };
    use crate::models::Order;

    struct StubApi {
        result: Result<CouponQuote, String>,
        calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl CheckoutApi for StubApi {
        async fn create_payment_intent(
            &self,
            _request: &CreatePaymentIntentRequest,
        ) -> Result<PaymentIntentResponse, StorefrontError> {
            unreachable!("not used by coupon tests")
        }

        async fn save_order(&self, _request: &SaveOrderRequest) -> Result<Order, StorefrontError> {
            unreachable!("not used by coupon tests")
        }

        async fn apply_coupon(
            &self,
            _request: &ApplyCouponRequest,
        ) -> Result<CouponQuote, StorefrontError> {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.result
                .clone()
                .map_err(StorefrontError::Backend)
        }
    }

    #[tokio::test]
    async fn empty_code_fails_locally_without_a_request() {
        let api = StubApi {
            result: Ok(CouponQuote {
                discount: dec!(5),
                final_total: dec!(20),
            }),
            calls: Default::default(),
        };
        let mut state = CouponState::new(dec!(25));

        let err = state
            .apply(&api, "   ", dec!(25), None)
            .await
            .expect_err("local validation error");

        assert!(matches!(err, StorefrontError::EmptyCouponCode));
        assert_eq!(api.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert_eq!(state.final_total(), dec!(25));
    }

    #[tokio::test]
    async fn successful_application_stores_the_quote() {
        let api = StubApi {
            result: Ok(CouponQuote {
                discount: dec!(5.00),
                final_total: dec!(20.00),
            }),
            calls: Default::default(),
        };
        let mut state = CouponState::new(dec!(25));

        state
            .apply(&api, "SUMMER10", dec!(25), Some("u1"))
            .await
            .expect("coupon accepted");

        assert_eq!(state.discount(), dec!(5.00));
        assert_eq!(state.final_total(), dec!(20.00));
    }

    #[tokio::test]
    async fn rejection_resets_discount_and_total() {
        let api = StubApi {
            result: Err("Coupon has expired".to_string()),
            calls: Default::default(),
        };
        let mut state = CouponState::new(dec!(25));
        // Simulate a previously applied discount.
        state.discount = dec!(5);
        state.final_total = dec!(20);

        let err = state
            .apply(&api, "OLDCODE", dec!(25), None)
            .await
            .expect_err("backend rejection");

        assert_eq!(err.to_string(), "Coupon has expired");
        assert_eq!(state.discount(), Decimal::ZERO);
        assert_eq!(state.final_total(), dec!(25));
    }
}
