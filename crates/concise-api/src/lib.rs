//! Axum HTTP server for plan status and pricing.
//!
//! This crate provides:
//! - Plan resolution for signed-in users via the billing service
//! - Server-rendered plan badge and pricing section partials
//! - JSON endpoints for the current plan, catalog and client config
//! - Session token verification, security headers and Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{MaybeIdentity, SessionClaims, TokenVerifier};
pub use config::{ApiConfig, AuthConfig, RuntimeMode};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::PlanResolver;
pub use state::AppState;
