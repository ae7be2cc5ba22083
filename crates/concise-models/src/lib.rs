//! Shared data models for the ConciseDocs plan-status service.
//!
//! This crate provides Serde-serializable types for:
//! - The plan catalog and its lookups
//! - Authenticated identities
//! - Plan resolution results and badge display state

pub mod identity;
pub mod plan;
pub mod resolution;

// Re-export common types
pub use identity::Identity;
pub use plan::{
    find_plan_by_price_id, CatalogError, CatalogResult, PlanCatalog, PlanDescriptor, PriceId,
    BASIC_PLAN_ID, PRO_PLAN_ID,
};
pub use resolution::{BadgeTone, PlanResolution, PlanStatus, FREE_PLAN_LABEL, UNRECOGNIZED_PLAN_LABEL};
