//! FrankerFaceZ provider.
//!
//! Rooms expose an active set, but every set in the response is searched.

mod adapter;
pub mod api;

pub use adapter::FfzAdapter;
pub use api::FfzEndpoints;
