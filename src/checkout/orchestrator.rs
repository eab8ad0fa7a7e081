//! Card checkout orchestration: create a payment intent, confirm the card
//! with the provider, persist the order. Linear, no backward transitions,
//! one sequence in flight per orchestrator instance.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::api::payment::{CheckoutApi, CreatePaymentIntentRequest, SaveOrderRequest};
use crate::errors::{CheckoutError, StorefrontError};
use crate::models::{CartLineItem, CustomerDetails, Order, OrderItemInput};

use super::provider::{CardPaymentMethod, PaymentIntentStatus, PaymentProvider};

/// Observable phase of the checkout sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Idle,
    CreatingIntent,
    ConfirmingCard,
    SavingOrder,
    Succeeded,
    Failed,
}

impl CheckoutPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => CheckoutPhase::CreatingIntent,
            2 => CheckoutPhase::ConfirmingCard,
            3 => CheckoutPhase::SavingOrder,
            4 => CheckoutPhase::Succeeded,
            5 => CheckoutPhase::Failed,
            _ => CheckoutPhase::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            CheckoutPhase::Idle => 0,
            CheckoutPhase::CreatingIntent => 1,
            CheckoutPhase::ConfirmingCard => 2,
            CheckoutPhase::SavingOrder => 3,
            CheckoutPhase::Succeeded => 4,
            CheckoutPhase::Failed => 5,
        }
    }
}

/// Everything a card checkout needs: the cart snapshot, the customer fields,
/// and the payment-method handle from the provider's hosted inputs.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer: CustomerDetails,
    pub items: Vec<CartLineItem>,
    pub currency: String,
    pub user_id: Option<String>,
    pub coupon_code: Option<String>,
    pub payment_method: CardPaymentMethod,
}

/// Successful checkout: the persisted order plus the charge actually made.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order: Order,
    pub payment_intent_id: String,
    pub amount_in_cents: i64,
}

/// Outcome of a submit call that did not fail.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The submission was dropped without side effects: the provider was not
    /// ready, or another sequence was already in flight.
    Ignored,
    Completed(OrderConfirmation),
}

/// Drives the three-step card checkout against an abstract backend and an
/// abstract payment provider.
///
/// Re-entrancy is guarded per instance: while a submission is in flight,
/// further submissions return [`SubmitOutcome::Ignored`] without issuing any
/// network call. There is no cancellation once a sequence has begun.
pub struct PaymentOrchestrator<A, P> {
    api: Arc<A>,
    provider: Arc<P>,
    processing: AtomicBool,
    phase: AtomicU8,
}

impl<A, P> PaymentOrchestrator<A, P>
where
    A: CheckoutApi,
    P: PaymentProvider,
{
    pub fn new(api: Arc<A>, provider: Arc<P>) -> Self {
        Self {
            api,
            provider,
            processing: AtomicBool::new(false),
            phase: AtomicU8::new(CheckoutPhase::Idle.as_u8()),
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        CheckoutPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// True while a checkout sequence is in flight; callers use this to
    /// disable the submit control.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    fn set_phase(&self, phase: CheckoutPhase) {
        self.phase.store(phase.as_u8(), Ordering::SeqCst);
    }

    /// Runs the full checkout sequence.
    ///
    /// On success the caller is responsible for clearing the cart and
    /// showing confirmation. On [`CheckoutError::CardDeclined`] and
    /// [`CheckoutError::PaymentNotCompleted`] no order is saved and the cart
    /// is untouched. [`CheckoutError::OrderSaveFailed`] means the payment
    /// was captured but the order record may not exist.
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn submit(
        &self,
        request: CheckoutRequest,
    ) -> Result<SubmitOutcome, CheckoutError> {
        if !self.provider.is_ready() {
            info!("payment provider not ready, submission ignored");
            return Ok(SubmitOutcome::Ignored);
        }

        if self
            .processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("checkout already in flight, submission ignored");
            return Ok(SubmitOutcome::Ignored);
        }

        let result = self.run(request).await;
        match &result {
            Ok(confirmation) => {
                self.set_phase(CheckoutPhase::Succeeded);
                info!(
                    payment_intent_id = %confirmation.payment_intent_id,
                    order_id = %confirmation.order.id,
                    "checkout succeeded"
                );
            }
            Err(err) => {
                self.set_phase(CheckoutPhase::Failed);
                warn!(error = %err, captured = err.payment_captured(), "checkout failed");
            }
        }
        self.processing.store(false, Ordering::SeqCst);

        result.map(SubmitOutcome::Completed)
    }

    async fn run(&self, request: CheckoutRequest) -> Result<OrderConfirmation, CheckoutError> {
        // Local preconditions, checked before any network call.
        if request.items.is_empty() {
            return Err(StorefrontError::EmptyCart.into());
        }
        request
            .customer
            .validate()
            .map_err(StorefrontError::from)?;

        self.set_phase(CheckoutPhase::CreatingIntent);
        let intent = self
            .api
            .create_payment_intent(&CreatePaymentIntentRequest {
                items: request.items.iter().map(Into::into).collect(),
                currency: request.currency.to_lowercase(),
                user_id: request.user_id.clone(),
                coupon_code: request.coupon_code.clone(),
            })
            .await
            .map_err(|source| CheckoutError::IntentCreation { source })?;

        self.set_phase(CheckoutPhase::ConfirmingCard);
        let confirmation = self
            .provider
            .confirm_card_payment(&intent.client_secret, &request.payment_method)
            .await
            .map_err(|err| CheckoutError::CardDeclined {
                message: err.message,
            })?;

        if confirmation.status != PaymentIntentStatus::Succeeded {
            return Err(CheckoutError::PaymentNotCompleted);
        }

        self.set_phase(CheckoutPhase::SavingOrder);
        // The backend's amount is authoritative; the cart subtotal was only
        // advisory.
        let total_amount = Decimal::new(intent.amount_in_cents, 2);
        let items: Vec<OrderItemInput> = request
            .items
            .iter()
            .map(|item| OrderItemInput {
                product_id: item.id.clone(),
                quantity: item.quantity,
                price: item.unit_price,
            })
            .collect();

        let order = self
            .api
            .save_order(&SaveOrderRequest {
                customer: request.customer,
                items,
                total_amount,
                payment_intent_id: intent.payment_intent_id.clone(),
                coupon_code: request.coupon_code,
            })
            .await
            .map_err(|source| CheckoutError::OrderSaveFailed {
                payment_intent_id: intent.payment_intent_id.clone(),
                source,
            })?;

        Ok(OrderConfirmation {
            order,
            payment_intent_id: intent.payment_intent_id,
            amount_in_cents: intent.amount_in_cents,
        })
    }
}
