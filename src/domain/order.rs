use serde::{Deserialize, Serialize};

use super::site::SiteId;

/// Structured order request handed to the core by the intent parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub site: SiteId,
    pub item: String,
    pub quantity: u32,
}

impl OrderRequest {
    pub fn new(site: impl Into<SiteId>, item: impl Into<String>, quantity: u32) -> Self {
        OrderRequest {
            site: site.into(),
            item: item.into(),
            quantity,
        }
    }
}
