//! Checkout flows: card payment orchestration, coupon application, delivery
//! fees, and the cash-on-delivery path.

pub mod cod;
pub mod coupon;
pub mod delivery;
pub mod orchestrator;
pub mod provider;

pub use cod::place_cod_order;
pub use coupon::CouponState;
pub use delivery::DeliveryRates;
pub use orchestrator::{
    CheckoutPhase, CheckoutRequest, OrderConfirmation, PaymentOrchestrator, SubmitOutcome,
};
pub use provider::{CardPaymentMethod, PaymentConfirmation, PaymentIntentStatus, PaymentProvider};
