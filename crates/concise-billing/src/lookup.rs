//! The price lookup seam and an in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use concise_models::PriceId;

use crate::error::BillingResult;

/// Looks up the price id of a user's active subscription.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    /// Price id of the active subscription for `email`, or `None` when the
    /// user has no active paid plan.
    async fn price_id_for_active_user(&self, email: &str) -> BillingResult<Option<PriceId>>;

    /// Whether the backing service is reachable.
    async fn health_check(&self) -> BillingResult<bool> {
        Ok(true)
    }
}

/// Fixed email-to-price map. Used for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceLookup {
    prices: HashMap<String, PriceId>,
}

impl InMemoryPriceLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an active subscription.
    pub fn with_price(mut self, email: impl Into<String>, price_id: impl Into<String>) -> Self {
        let email: String = email.into();
        self.prices
            .insert(normalize_email(&email), PriceId::from_string(price_id));
        self
    }
}

#[async_trait]
impl PriceLookup for InMemoryPriceLookup {
    async fn price_id_for_active_user(&self, email: &str) -> BillingResult<Option<PriceId>> {
        Ok(self.prices.get(&normalize_email(email)).cloned())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
