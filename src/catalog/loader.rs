use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::domain::VendorOffer;

/// Errors that can occur during catalog loading.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Static, read-only list of vendor offers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    offers: Vec<VendorOffer>,
}

impl Catalog {
    /// Build a catalog from offers, validating them first.
    pub fn new(offers: Vec<VendorOffer>) -> Result<Self, CatalogError> {
        validate_offers(&offers)?;
        Ok(Catalog { offers })
    }

    /// Load a catalog from a YAML (`.yaml`/`.yml`) or JSON file.
    ///
    /// Expected format: a list of `{ vendor, item, unit_price, total_price }`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false);

        let offers: Vec<VendorOffer> = if is_yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        let catalog = Catalog::new(offers)?;
        info!(path = %path.display(), offers = catalog.len(), "Loaded vendor catalog");

        Ok(catalog)
    }

    /// Offers for an item, in catalog order.
    ///
    /// Item names match exactly (case-sensitive). Returns an empty list when
    /// nothing is quoted for the item.
    pub fn load_offers(&self, item_name: &str) -> Vec<VendorOffer> {
        self.offers
            .iter()
            .filter(|o| o.item_name == item_name)
            .cloned()
            .collect()
    }

    /// All offers in catalog order.
    pub fn offers(&self) -> &[VendorOffer] {
        &self.offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

/// Validate catalog entries.
fn validate_offers(offers: &[VendorOffer]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();

    for offer in offers {
        if offer.vendor_name.is_empty() || offer.item_name.is_empty() {
            return Err(CatalogError::Validation(
                "Vendor and item names cannot be empty".to_string(),
            ));
        }

        if offer.unit_price < Decimal::ZERO || offer.total_price < Decimal::ZERO {
            return Err(CatalogError::Validation(format!(
                "Negative price for {} / {}",
                offer.vendor_name, offer.item_name
            )));
        }

        // Check for a vendor quoting the same item twice
        if !seen.insert((offer.vendor_name.as_str(), offer.item_name.as_str())) {
            return Err(CatalogError::Validation(format!(
                "Duplicate offer: {} / {}",
                offer.vendor_name, offer.item_name
            )));
        }
    }

    Ok(())
}
