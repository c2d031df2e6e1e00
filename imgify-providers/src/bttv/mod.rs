//! BetterTTV provider.
//!
//! Public cached API; channel records hold a channel tier and a shared tier.

mod adapter;
pub mod api;

pub use adapter::BttvAdapter;
pub use api::BttvEndpoints;
