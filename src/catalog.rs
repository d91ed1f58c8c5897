use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{LoanError, Result};

/// grace period plus surcharge terms used by the pricing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTerms {
    /// installment months with no surcharge
    pub grace_period_months: u32,
    /// percent charged per month beyond the grace period
    pub surcharge_percent_per_period: u32,
}

/// largest surcharge percent a single period may carry
pub const MAX_SURCHARGE_PERCENT: u32 = 1_000;

/// financeable item category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawProduct")]
pub struct Product {
    pub name: String,
    /// absent terms mean the product is priced flat
    #[serde(flatten)]
    pub pricing: Option<PricingTerms>,
    /// narrower period set; absent means every globally allowed period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_periods: Option<BTreeSet<u32>>,
}

impl Product {
    /// product priced by grace period and surcharge
    pub fn priced(name: impl Into<String>, grace_period_months: u32, surcharge_percent_per_period: u32) -> Self {
        Self {
            name: name.into(),
            pricing: Some(PricingTerms {
                grace_period_months,
                surcharge_percent_per_period,
            }),
            allowed_periods: None,
        }
    }

    /// product with no surcharge at all
    pub fn flat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pricing: None,
            allowed_periods: None,
        }
    }

    /// restrict the product to the given installment periods
    pub fn with_allowed_periods(mut self, periods: impl IntoIterator<Item = u32>) -> Self {
        self.allowed_periods = Some(periods.into_iter().collect());
        self
    }

    /// whether the product's own period set admits `months`
    pub fn permits_period(&self, months: u32) -> bool {
        self.allowed_periods
            .as_ref()
            .map_or(true, |periods| periods.contains(&months))
    }
}

/// product as written in configuration, before pricing keys are paired up
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawProduct {
    name: String,
    grace_period_months: Option<u32>,
    surcharge_percent_per_period: Option<u32>,
    #[serde(default)]
    allowed_periods: Option<BTreeSet<u32>>,
}

impl TryFrom<RawProduct> for Product {
    type Error = LoanError;

    fn try_from(raw: RawProduct) -> Result<Self> {
        let pricing = match (raw.grace_period_months, raw.surcharge_percent_per_period) {
            (Some(grace_period_months), Some(surcharge_percent_per_period)) => Some(PricingTerms {
                grace_period_months,
                surcharge_percent_per_period,
            }),
            (None, None) => None,
            _ => {
                return Err(LoanError::InvalidConfiguration {
                    message: format!(
                        "{}: gracePeriodMonths and surchargePercentPerPeriod must be given together",
                        raw.name
                    ),
                })
            }
        };

        Ok(Product {
            name: raw.name,
            pricing,
            allowed_periods: raw.allowed_periods,
        })
    }
}

/// read-only product catalog keyed by exact product name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    products: BTreeMap<String, Product>,
}

impl ProductCatalog {
    /// build a catalog, rejecting duplicates and unusable terms
    pub fn new(products: impl IntoIterator<Item = Product>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for product in products {
            validate_product(&product)?;
            if map.contains_key(&product.name) {
                return Err(LoanError::InvalidConfiguration {
                    message: format!("duplicate product: {}", product.name),
                });
            }
            map.insert(product.name.clone(), product);
        }

        if map.is_empty() {
            return Err(LoanError::InvalidConfiguration {
                message: "catalog must contain at least one product".to_string(),
            });
        }

        Ok(Self { products: map })
    }

    /// case-sensitive exact lookup
    pub fn lookup(&self, name: &str) -> Result<&Product> {
        self.products
            .get(name)
            .ok_or_else(|| LoanError::ProductNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.products.contains_key(name)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self {
            products: default_products()
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
        }
    }
}

/// smartphone, computer and tv terms the service ships with
pub fn default_products() -> Vec<Product> {
    vec![
        Product::priced("Смартфон", 9, 3),
        Product::priced("Компьютер", 12, 4),
        Product::priced("Телевизор", 18, 5),
    ]
}

fn validate_product(product: &Product) -> Result<()> {
    if product.name.trim().is_empty() {
        return Err(LoanError::InvalidConfiguration {
            message: "product name cannot be empty".to_string(),
        });
    }

    if let Some(terms) = &product.pricing {
        if terms.surcharge_percent_per_period == 0 {
            return Err(LoanError::InvalidConfiguration {
                message: format!("{}: surcharge must be positive, omit terms for flat pricing", product.name),
            });
        }
        if terms.surcharge_percent_per_period > MAX_SURCHARGE_PERCENT {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "{}: surcharge {}% exceeds {}%",
                    product.name, terms.surcharge_percent_per_period, MAX_SURCHARGE_PERCENT
                ),
            });
        }
    }

    if let Some(periods) = &product.allowed_periods {
        if periods.is_empty() || periods.contains(&0) {
            return Err(LoanError::InvalidConfiguration {
                message: format!("{}: allowed periods must be non-empty and non-zero", product.name),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = ProductCatalog::default();
        assert_eq!(catalog.len(), 3);

        let phone = catalog.lookup("Смартфон").unwrap();
        assert_eq!(
            phone.pricing,
            Some(PricingTerms { grace_period_months: 9, surcharge_percent_per_period: 3 })
        );
        assert_eq!(catalog.lookup("Телевизор").unwrap().pricing.unwrap().grace_period_months, 18);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = ProductCatalog::new(vec![Product::priced("Phone", 9, 3)]).unwrap();
        assert!(catalog.lookup("Phone").is_ok());
        assert!(matches!(
            catalog.lookup("phone"),
            Err(LoanError::ProductNotFound { name }) if name == "phone"
        ));
        assert!(!catalog.contains("Phone "));
    }

    #[test]
    fn test_rejects_bad_catalogs() {
        assert!(ProductCatalog::new(Vec::new()).is_err());
        assert!(ProductCatalog::new(vec![Product::priced("A", 3, 1), Product::flat("A")]).is_err());
        assert!(ProductCatalog::new(vec![Product::priced("A", 3, 0)]).is_err());
        assert!(ProductCatalog::new(vec![Product::priced("A", 3, MAX_SURCHARGE_PERCENT)]).is_ok());
        assert!(ProductCatalog::new(vec![Product::priced("A", 3, MAX_SURCHARGE_PERCENT + 1)]).is_err());
        assert!(ProductCatalog::new(vec![Product::flat("A").with_allowed_periods(Vec::new())]).is_err());
        assert!(ProductCatalog::new(vec![Product::flat("  ")]).is_err());
    }

    #[test]
    fn test_permits_period() {
        let tv = Product::priced("TV", 18, 5).with_allowed_periods([12, 18]);
        assert!(tv.permits_period(12));
        assert!(!tv.permits_period(24));
        assert!(Product::flat("Cable").permits_period(24));
    }

    #[test]
    fn test_product_json_shape() {
        let json = r#"{"name":"Laptop","gracePeriodMonths":6,"surchargePercentPerPeriod":2,"allowedPeriods":[6,12]}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.pricing.unwrap().grace_period_months, 6);
        assert!(product.permits_period(12));
        assert!(!product.permits_period(9));

        let flat: Product = serde_json::from_str(r#"{"name":"Cable"}"#).unwrap();
        assert_eq!(flat, Product::flat("Cable"));

        let back: Product = serde_json::from_str(&serde_json::to_string(&product).unwrap()).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_incomplete_pricing_terms_rejected() {
        let half = serde_json::from_str::<Product>(r#"{"name":"Phone","gracePeriodMonths":9}"#);
        assert!(half.unwrap_err().to_string().contains("must be given together"));

        let typo = r#"{"name":"Phone","gracePeriodMonths":9,"surchargePercent":3}"#;
        assert!(serde_json::from_str::<Product>(typo).is_err());

        let negative = r#"{"name":"Phone","gracePeriodMonths":9,"surchargePercentPerPeriod":-3}"#;
        assert!(serde_json::from_str::<Product>(negative).is_err());
    }
}
