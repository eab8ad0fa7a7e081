//! Client-owned shopping cart: a normalized store of line items with
//! deterministic, total state transitions, persisted across restarts.

pub mod store;

pub use store::CartStore;
