//! Application state.

use std::sync::Arc;

use tracing::warn;

use concise_billing::{BillingClient, BillingClientConfig, InMemoryPriceLookup, PriceLookup};
use concise_models::PlanCatalog;

use crate::auth::TokenVerifier;
use crate::config::{ApiConfig, RuntimeMode};
use crate::error::{ApiError, ApiResult};
use crate::services::{load_catalog, PlanResolver};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub catalog: Arc<PlanCatalog>,
    pub billing: Arc<dyn PriceLookup>,
    pub tokens: Option<Arc<TokenVerifier>>,
    pub resolver: PlanResolver,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let catalog = load_catalog(&config)?;

        let billing = billing_lookup(BillingClientConfig::from_env(), config.mode)?;

        let tokens = TokenVerifier::from_config(&config.auth)?;
        if tokens.is_none() {
            warn!("No session verification key configured, session tokens will be rejected");
        }

        Ok(Self::from_parts(config, catalog, billing, tokens))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        config: ApiConfig,
        catalog: PlanCatalog,
        billing: Arc<dyn PriceLookup>,
        tokens: Option<TokenVerifier>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let resolver = PlanResolver::new(Arc::clone(&catalog), Arc::clone(&billing));

        Self {
            config: Arc::new(config),
            catalog,
            billing,
            tokens: tokens.map(Arc::new),
            resolver,
        }
    }
}

/// Pick the price lookup for `mode`. Production requires a billing service;
/// development falls back to an empty in-memory lookup.
pub fn billing_lookup(
    billing_config: Option<BillingClientConfig>,
    mode: RuntimeMode,
) -> ApiResult<Arc<dyn PriceLookup>> {
    match billing_config {
        Some(billing_config) => Ok(Arc::new(BillingClient::new(billing_config)?)),
        None if mode == RuntimeMode::Production => {
            Err(ApiError::internal("BILLING_API_URL must be set in production"))
        }
        None => {
            warn!("BILLING_API_URL not set, every user resolves to the free plan");
            Ok(Arc::new(InMemoryPriceLookup::new()))
        }
    }
}
