//! Authenticated identity as supplied by the identity provider.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimal profile of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Identity {
    /// Provider user id.
    pub id: String,
    /// Primary email address, if the provider has one on file.
    pub email: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            email,
        }
    }

    /// Build from a provider profile listing several addresses. Only the
    /// first one is primary; a blank primary means no billing email.
    pub fn from_email_addresses<I, S>(id: impl Into<String>, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, addresses.into_iter().next().map(Into::into))
    }

    /// Whether the identity carries a usable user id.
    pub fn is_authenticated(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Email to use for billing lookups, ignoring blank values.
    pub fn billing_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}
