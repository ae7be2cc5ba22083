//! Client for the billing service.
//!
//! The billing service owns subscription records; this crate only asks it
//! which price a user's active subscription is billed under.

pub mod client;
pub mod error;
pub mod lookup;

pub use client::{BillingClient, BillingClientConfig};
pub use error::{BillingError, BillingResult};
pub use lookup::{InMemoryPriceLookup, PriceLookup};
