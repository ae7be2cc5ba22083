//! Plan resolution: classifying a billing price id against the catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::plan::{PlanCatalog, PriceId};

/// Label shown when the user has no price id at all.
pub const FREE_PLAN_LABEL: &str = "Free";

/// Label shown when the price id is not in the catalog.
pub const UNRECOGNIZED_PLAN_LABEL: &str = "Buy a plan";

/// How a price id was classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanStatus {
    /// The price id matched a catalog entry.
    Active { plan_id: String },
    /// No price id was obtained.
    Free,
    /// A price id was obtained but no catalog entry carries it.
    Unrecognized { price_id: PriceId },
}

/// Badge color treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    /// Amber: the user has some billing price id.
    Highlight,
    /// Red: no billing price id.
    Muted,
}

impl BadgeTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeTone::Highlight => "highlight",
            BadgeTone::Muted => "muted",
        }
    }
}

/// Display classification of a user's current plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanResolution {
    pub plan_name: String,
    pub has_active_plan: bool,
    pub status: PlanStatus,
}

impl PlanResolution {
    /// Result for a user with no price id.
    pub fn free() -> Self {
        Self {
            plan_name: FREE_PLAN_LABEL.to_string(),
            has_active_plan: false,
            status: PlanStatus::Free,
        }
    }

    /// Classify an optional price id against the catalog.
    pub fn classify(catalog: &PlanCatalog, price_id: Option<&PriceId>) -> Self {
        let Some(price_id) = price_id else {
            return Self::free();
        };

        match catalog.find_by_price_id(price_id) {
            Some(plan) => Self {
                plan_name: plan.name.clone(),
                has_active_plan: true,
                status: PlanStatus::Active {
                    plan_id: plan.id.clone(),
                },
            },
            None => Self {
                plan_name: UNRECOGNIZED_PLAN_LABEL.to_string(),
                has_active_plan: false,
                status: PlanStatus::Unrecognized {
                    price_id: price_id.clone(),
                },
            },
        }
    }

    /// Badge tone: muted only when no price id was obtained.
    pub fn badge_tone(&self) -> BadgeTone {
        match self.status {
            PlanStatus::Free => BadgeTone::Muted,
            PlanStatus::Active { .. } | PlanStatus::Unrecognized { .. } => BadgeTone::Highlight,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self.status, PlanStatus::Unrecognized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanDescriptor;

    fn scenario_catalog() -> PlanCatalog {
        PlanCatalog::new(vec![
            PlanDescriptor {
                id: "pro".to_string(),
                name: "Pro".to_string(),
                price: 199,
                description: String::new(),
                items: vec![],
                price_id: Some(PriceId::from_string("price_123")),
                payment_link: Some("https://pay/pro".to_string()),
            },
            PlanDescriptor {
                id: "free".to_string(),
                name: "Starter".to_string(),
                price: 0,
                description: String::new(),
                items: vec![],
                price_id: None,
                payment_link: None,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_known_price_id_is_active() {
        let price_id = PriceId::from_string("price_123");
        let resolution = PlanResolution::classify(&scenario_catalog(), Some(&price_id));

        assert_eq!(resolution.plan_name, "Pro");
        assert!(resolution.has_active_plan);
        assert_eq!(
            resolution.status,
            PlanStatus::Active {
                plan_id: "pro".to_string()
            }
        );
        assert_eq!(resolution.badge_tone(), BadgeTone::Highlight);
    }

    #[test]
    fn test_unknown_price_id_prompts_purchase() {
        let price_id = PriceId::from_string("price_999");
        let resolution = PlanResolution::classify(&scenario_catalog(), Some(&price_id));

        assert_eq!(resolution.plan_name, UNRECOGNIZED_PLAN_LABEL);
        assert!(!resolution.has_active_plan);
        assert!(resolution.is_unrecognized());
        // Still highlighted: the user does have a billing record.
        assert_eq!(resolution.badge_tone(), BadgeTone::Highlight);
    }

    #[test]
    fn test_missing_price_id_is_free() {
        let resolution = PlanResolution::classify(&scenario_catalog(), None);

        assert_eq!(resolution, PlanResolution::free());
        assert_eq!(resolution.plan_name, FREE_PLAN_LABEL);
        assert!(!resolution.has_active_plan);
        assert_eq!(resolution.badge_tone(), BadgeTone::Muted);
    }

    #[test]
    fn test_free_catalog_entry_not_matched_by_absent_price_id() {
        // The Starter entry has no price id; an absent lookup must still be "Free".
        let resolution = PlanResolution::classify(&scenario_catalog(), None);
        assert_ne!(resolution.plan_name, "Starter");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(PlanResolution::free()).unwrap();
        assert_eq!(json["planName"], "Free");
        assert_eq!(json["hasActivePlan"], false);
        assert_eq!(json["status"]["kind"], "free");
    }
}
