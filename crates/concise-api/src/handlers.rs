//! Request handlers.

pub mod health;
pub mod partials;
pub mod plans;

pub use health::*;
pub use partials::*;
pub use plans::*;
