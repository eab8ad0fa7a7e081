//! Storefront client library
//!
//! Client-side core of a small e-commerce clothing storefront: a normalized
//! shopping-cart store, a typed REST client for the backend, coupon
//! application, a card checkout orchestrator driven through injected
//! payment/identity capabilities, and a cash-on-delivery order path.
//!
//! The crate owns no UI. A frontend drives the state containers here and
//! renders what they expose:
//!
//! - [`cart::CartStore`] — the cart's only mutation surface, persisted via
//!   [`storage`].
//! - [`api::ApiClient`] — bearer-token REST client for the `/auth`, `/user`,
//!   `/payment`, and `/admin` endpoint groups.
//! - [`checkout::PaymentOrchestrator`] — intent → confirm → save-order, one
//!   sequence in flight at a time.
//! - [`auth::AuthSession`] — profile and token, rehydrated across restarts.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod storage;

pub use api::ApiClient;
pub use auth::{AuthSession, IdentityProvider};
pub use cart::CartStore;
pub use checkout::{
    CardPaymentMethod, CheckoutPhase, CheckoutRequest, CouponState, DeliveryRates,
    PaymentOrchestrator, PaymentProvider, SubmitOutcome,
};
pub use config::{load_config, AppConfig};
pub use errors::{CheckoutError, StorefrontError};
pub use models::{CartLineItem, CustomerDetails, Order, OrderStatus, Product};
