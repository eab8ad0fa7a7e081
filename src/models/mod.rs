//! Domain models exchanged with the storefront backend.
//!
//! Wire representations follow the backend JSON contract: camelCase field
//! names and Mongo-style `_id` identifiers.

pub mod banner;
pub mod cart;
pub mod coupon;
pub mod order;
pub mod product;
pub mod user;

pub use banner::{Banner, BannerInput};
pub use cart::CartLineItem;
pub use coupon::{Coupon, CouponInput, DiscountType};
pub use order::{CustomerDetails, Order, OrderItemInput, OrderStatus, PaymentMethodTag};
pub use product::{Product, ProductInput};
pub use user::UserProfile;
