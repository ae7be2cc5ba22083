//! Plan catalog: the fixed list of purchasable and free tiers.

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog id of the built-in free tier.
pub const BASIC_PLAN_ID: &str = "basic";

/// Catalog id of the built-in paid tier.
pub const PRO_PLAN_ID: &str = "pro";

/// Opaque billing token identifying a plan tier (e.g. a Stripe price id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PriceId(pub String);

impl PriceId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PriceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanDescriptor {
    /// Stable catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Monthly price in whole rupees.
    pub price: u32,
    /// Short marketing description.
    pub description: String,
    /// Feature bullet points, in display order.
    #[serde(default)]
    pub items: Vec<String>,
    /// Billing price identifier. Free tiers have none.
    #[serde(default)]
    pub price_id: Option<PriceId>,
    /// Hosted checkout URL.
    #[serde(default)]
    pub payment_link: Option<String>,
}

impl PlanDescriptor {
    /// Payment link, ignoring blank values.
    pub fn checkout_url(&self) -> Option<&str> {
        self.payment_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }

    /// Whether the descriptor matches the given price identifier.
    pub fn has_price_id(&self, price_id: &PriceId) -> bool {
        self.price_id.as_ref() == Some(price_id)
    }
}

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate plan id: {0}")]
    DuplicateId(String),

    #[error("Duplicate price id {price_id} on plan {plan_id}")]
    DuplicatePriceId { plan_id: String, price_id: String },

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Immutable, ordered plan catalog.
///
/// Plan ids and price ids are unique across the catalog, so lookups stop at
/// the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct PlanCatalog {
    plans: Vec<PlanDescriptor>,
}

impl PlanCatalog {
    /// Build a catalog, rejecting duplicate plan ids or price ids.
    pub fn new(plans: Vec<PlanDescriptor>) -> CatalogResult<Self> {
        let mut ids = HashSet::new();
        let mut price_ids = HashSet::new();

        for plan in &plans {
            if !ids.insert(plan.id.as_str()) {
                return Err(CatalogError::DuplicateId(plan.id.clone()));
            }
            if let Some(price_id) = &plan.price_id {
                if !price_ids.insert(price_id.as_str()) {
                    return Err(CatalogError::DuplicatePriceId {
                        plan_id: plan.id.clone(),
                        price_id: price_id.to_string(),
                    });
                }
            }
        }

        Ok(Self { plans })
    }

    /// Parse a catalog from a JSON array of descriptors.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let plans: Vec<PlanDescriptor> = serde_json::from_str(json)?;
        Self::new(plans)
    }

    /// The built-in catalog: a free Basic tier and a paid Pro tier.
    ///
    /// Billing identifiers differ per deployment, so the Pro price id and
    /// payment link are supplied by the caller.
    pub fn builtin(pro_price_id: Option<PriceId>, pro_payment_link: Option<String>) -> Self {
        let plans = vec![
            PlanDescriptor {
                id: BASIC_PLAN_ID.to_string(),
                name: "Basic".to_string(),
                price: 0,
                description: "Perfect for occasional use".to_string(),
                items: vec![
                    "5 PDF summaries per month".to_string(),
                    "Standard processing speed".to_string(),
                    "Email support".to_string(),
                ],
                price_id: None,
                payment_link: None,
            },
            PlanDescriptor {
                id: PRO_PLAN_ID.to_string(),
                name: "Pro".to_string(),
                price: 199,
                description: "For professionals and teams".to_string(),
                items: vec![
                    "Unlimited PDF summaries".to_string(),
                    "Priority processing".to_string(),
                    "24/7 priority support".to_string(),
                    "Markdown export".to_string(),
                ],
                price_id: pro_price_id,
                payment_link: pro_payment_link,
            },
        ];

        // Only Pro can carry a price id, so there is nothing to collide with.
        Self { plans }
    }

    /// Find the descriptor billed under `price_id`.
    pub fn find_by_price_id(&self, price_id: &PriceId) -> Option<&PlanDescriptor> {
        self.plans.iter().find(|plan| plan.has_price_id(price_id))
    }

    /// Find a descriptor by catalog id.
    pub fn find_by_id(&self, id: &str) -> Option<&PlanDescriptor> {
        self.plans.iter().find(|plan| plan.id == id)
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PlanDescriptor> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Free-function form of [`PlanCatalog::find_by_price_id`].
pub fn find_plan_by_price_id<'a>(
    catalog: &'a PlanCatalog,
    price_id: &PriceId,
) -> Option<&'a PlanDescriptor> {
    catalog.find_by_price_id(price_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: &str, name: &str, price_id: Option<&str>) -> PlanDescriptor {
        PlanDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            price: 0,
            description: String::new(),
            items: vec![],
            price_id: price_id.map(PriceId::from_string),
            payment_link: None,
        }
    }

    #[test]
    fn test_find_by_price_id() {
        let catalog = PlanCatalog::new(vec![
            plan("pro", "Pro", Some("price_123")),
            plan("free", "Starter", None),
        ])
        .unwrap();

        let found = catalog.find_by_price_id(&PriceId::from_string("price_123"));
        assert_eq!(found.map(|p| p.name.as_str()), Some("Pro"));
        assert!(catalog
            .find_by_price_id(&PriceId::from_string("price_999"))
            .is_none());
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let catalog = PlanCatalog::new(vec![plan("pro", "Pro", Some("price_123"))]).unwrap();
        let price_id = PriceId::from_string("price_123");

        let first = find_plan_by_price_id(&catalog, &price_id).cloned();
        let second = find_plan_by_price_id(&catalog, &price_id).cloned();
        assert_eq!(first, second);
    }

    #[test]
    fn test_free_plan_never_matches_a_price_id() {
        let catalog = PlanCatalog::new(vec![plan("free", "Starter", None)]).unwrap();
        assert!(catalog.find_by_price_id(&PriceId::from_string("")).is_none());
    }

    #[test]
    fn test_duplicate_price_id_rejected() {
        let result = PlanCatalog::new(vec![
            plan("pro", "Pro", Some("price_123")),
            plan("team", "Team", Some("price_123")),
        ]);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicatePriceId { ref plan_id, .. }) if plan_id == "team"
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = PlanCatalog::new(vec![plan("pro", "Pro", None), plan("pro", "Pro 2", None)]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(ref id)) if id == "pro"));
    }

    #[test]
    fn test_from_json_camel_case() {
        let json = r#"[
            {"id": "pro", "name": "Pro", "price": 199, "description": "d",
             "items": ["a", "b"], "priceId": "price_123", "paymentLink": "https://pay/pro"},
            {"id": "free", "name": "Starter", "price": 0, "description": "d",
             "priceId": null, "paymentLink": null}
        ]"#;
        let catalog = PlanCatalog::from_json(json).unwrap();

        assert_eq!(catalog.len(), 2);
        let pro = catalog.find_by_id("pro").unwrap();
        assert_eq!(pro.items, vec!["a", "b"]);
        assert_eq!(pro.checkout_url(), Some("https://pay/pro"));
        assert!(catalog.find_by_id("free").unwrap().items.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            PlanCatalog::from_json("{not json"),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_blank_payment_link_is_absent() {
        let mut descriptor = plan("pro", "Pro", None);
        descriptor.payment_link = Some("   ".to_string());
        assert_eq!(descriptor.checkout_url(), None);
    }

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = PlanCatalog::builtin(Some(PriceId::from_string("price_pro")), None);
        let ids: Vec<_> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![BASIC_PLAN_ID, PRO_PLAN_ID]);
        assert_eq!(
            catalog
                .find_by_price_id(&PriceId::from_string("price_pro"))
                .map(|p| p.id.as_str()),
            Some(PRO_PLAN_ID)
        );
    }
}
