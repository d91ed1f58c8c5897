use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{default_products, Product, ProductCatalog};
use crate::errors::{LoanError, Result};

/// service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LedgerConfig {
    /// products offered for installment financing
    pub products: Vec<Product>,
    /// boot with the two demo smartphone loans
    pub seed_sample_loans: bool,
    pub logging: LoggingConfig,
}

/// logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfig {
    /// emit json lines instead of compact text
    pub json: bool,
    /// `EnvFilter` directive used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: "installment_loans=info".to_string(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            products: default_products(),
            seed_sample_loans: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// empty ledger over the given products
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            seed_sample_loans: false,
            logging: LoggingConfig::default(),
        }
    }

    /// parse and validate a json document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| LoanError::InvalidConfiguration {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.catalog().map(|_| ())
    }

    /// build the read-only catalog described by this config
    pub fn catalog(&self) -> Result<Arc<ProductCatalog>> {
        Ok(Arc::new(ProductCatalog::new(self.products.iter().cloned())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert!(config.seed_sample_loans);
        assert_eq!(config.catalog().unwrap().len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "products": [
                {"name": "Phone", "gracePeriodMonths": 9, "surchargePercentPerPeriod": 3},
                {"name": "Cable", "allowedPeriods": [3, 6]}
            ],
            "seedSampleLoans": false,
            "logging": {"json": true}
        }"#;

        let config = LedgerConfig::from_json_str(json).unwrap();
        assert!(!config.seed_sample_loans);
        assert!(config.logging.json);
        assert_eq!(config.logging.filter, "installment_loans=info");

        let catalog = config.catalog().unwrap();
        assert!(catalog.lookup("Phone").unwrap().pricing.is_some());
        assert!(catalog.lookup("Cable").unwrap().pricing.is_none());
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = LedgerConfig::from_json_str("{}").unwrap();
        assert_eq!(config.products.len(), 3);
        assert!(config.seed_sample_loans);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            LedgerConfig::from_json_str(r#"{"products": []}"#),
            Err(LoanError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            LedgerConfig::from_json_str(r#"{"products": "phone"}"#),
            Err(LoanError::InvalidConfiguration { .. })
        ));
        assert!(LedgerConfig::with_products(vec![Product::priced("X", 3, 0)]).validate().is_err());
    }

    #[test]
    fn test_broken_pricing_terms_are_not_read_as_flat() {
        for products in [
            r#"[{"name": "Phone", "gracePeriodMonths": 9}]"#,
            r#"[{"name": "Phone", "surchargePercentPerPeriod": 3}]"#,
            r#"[{"name": "Phone", "gracePeriodMonths": 9, "surchargePercent": 3}]"#,
            r#"[{"name": "Phone", "gracePeriodMonths": 9, "surchargePercentPerPeriod": -3}]"#,
            r#"[{"name": "Phone", "gracePeriodMonths": 9, "surchargePercentPerPeriod": 5000}]"#,
        ] {
            let json = format!(r#"{{"products": {}}}"#, products);
            assert!(
                matches!(LedgerConfig::from_json_str(&json), Err(LoanError::InvalidConfiguration { .. })),
                "accepted {}",
                products
            );
        }
    }
}
