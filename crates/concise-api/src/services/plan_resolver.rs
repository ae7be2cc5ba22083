//! Plan resolution for signed-in users.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use concise_billing::{BillingResult, PriceLookup};
use concise_models::{Identity, PlanCatalog, PlanResolution, PlanStatus, PriceId};

use crate::metrics;

/// Resolves an identity's current plan against the catalog.
///
/// Every call performs a fresh billing lookup.
#[derive(Clone)]
pub struct PlanResolver {
    catalog: Arc<PlanCatalog>,
    lookup: Arc<dyn PriceLookup>,
}

impl PlanResolver {
    pub fn new(catalog: Arc<PlanCatalog>, lookup: Arc<dyn PriceLookup>) -> Self {
        Self { catalog, lookup }
    }

    /// Resolve the plan of `identity`.
    ///
    /// Returns `Ok(None)` when there is no authenticated identity: nothing
    /// should be rendered. Billing failures are returned to the caller.
    pub async fn resolve(&self, identity: Option<&Identity>) -> BillingResult<Option<PlanResolution>> {
        let Some(identity) = identity.filter(|i| i.is_authenticated()) else {
            return Ok(None);
        };

        let price_id = match identity.billing_email() {
            Some(email) => self.lookup_price_id(email).await?,
            None => None,
        };

        debug!(user_id = %identity.id, price_id = ?price_id, "Resolved active price id");

        let resolution = PlanResolution::classify(&self.catalog, price_id.as_ref());

        let outcome = match &resolution.status {
            PlanStatus::Active { .. } => "active",
            PlanStatus::Free => "free",
            PlanStatus::Unrecognized { price_id } => {
                warn!(
                    user_id = %identity.id,
                    price_id = %price_id,
                    "Active price id is not in the plan catalog"
                );
                "unrecognized"
            }
        };
        metrics::record_plan_resolution(outcome);

        Ok(Some(resolution))
    }

    /// Like [`resolve`](Self::resolve), but a failed billing lookup degrades
    /// to the free classification instead of failing the render.
    pub async fn resolve_or_free(&self, identity: Option<&Identity>) -> Option<PlanResolution> {
        match self.resolve(identity).await {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!(error = %e, "Billing lookup failed, rendering badge as free");
                metrics::record_badge_fallback();
                Some(PlanResolution::free())
            }
        }
    }

    async fn lookup_price_id(&self, email: &str) -> BillingResult<Option<PriceId>> {
        let start = Instant::now();
        let result = self.lookup.price_id_for_active_user(email).await;
        metrics::record_billing_lookup_duration(start.elapsed().as_secs_f64());

        if let Err(e) = &result {
            metrics::record_billing_lookup_failure(e.kind());
        }
        result
    }
}
