//! Business logic services.

pub mod catalog;
pub mod plan_resolver;

pub use catalog::load_catalog;
pub use plan_resolver::PlanResolver;
