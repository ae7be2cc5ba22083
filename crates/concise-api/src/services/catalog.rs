//! Plan catalog loading.

use tracing::info;

use concise_models::{PlanCatalog, PriceId};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Load the plan catalog once at startup.
///
/// Reads `plan_catalog_path` when configured, otherwise builds the built-in
/// catalog with the configured Pro billing identifiers.
pub fn load_catalog(config: &ApiConfig) -> ApiResult<PlanCatalog> {
    let catalog = match &config.plan_catalog_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                ApiError::internal(format!(
                    "Failed to read plan catalog {}: {}",
                    path.display(),
                    e
                ))
            })?;
            PlanCatalog::from_json(&json)?
        }
        None => PlanCatalog::builtin(
            config.pro_price_id.clone().map(PriceId::from_string),
            config.pro_payment_link.clone(),
        ),
    };

    info!(plans = catalog.len(), "Loaded plan catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_uses_configured_pro_ids() {
        let config = ApiConfig {
            pro_price_id: Some("price_live_pro".to_string()),
            pro_payment_link: Some("https://buy.example.com/pro".to_string()),
            ..ApiConfig::default()
        };
        let catalog = load_catalog(&config).unwrap();
        let pro = catalog
            .find_by_price_id(&PriceId::from_string("price_live_pro"))
            .unwrap();
        assert_eq!(pro.checkout_url(), Some("https://buy.example.com/pro"));
    }

    #[test]
    fn test_loads_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "team", "name": "Team", "price": 999, "description": "d", "priceId": "price_team"}}]"#
        )
        .unwrap();

        let config = ApiConfig {
            plan_catalog_path: Some(file.path().to_path_buf()),
            ..ApiConfig::default()
        };
        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find_by_id("team").map(|p| p.name.as_str()), Some("Team"));
    }

    #[test]
    fn test_missing_file_is_internal_error() {
        let config = ApiConfig {
            plan_catalog_path: Some("/nonexistent/plans.json".into()),
            ..ApiConfig::default()
        };
        assert!(matches!(load_catalog(&config), Err(ApiError::Internal(_))));
    }

    #[test]
    fn test_duplicate_price_ids_in_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a", "name": "A", "price": 1, "description": "", "priceId": "p"}},
                {{"id": "b", "name": "B", "price": 2, "description": "", "priceId": "p"}}]"#
        )
        .unwrap();

        let config = ApiConfig {
            plan_catalog_path: Some(file.path().to_path_buf()),
            ..ApiConfig::default()
        };
        assert!(matches!(load_catalog(&config), Err(ApiError::Catalog(_))));
    }
}
