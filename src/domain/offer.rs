use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A vendor's quote for one catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOffer {
    /// Vendor name, unique per item within a catalog
    #[serde(rename = "vendor")]
    pub vendor_name: String,

    /// Item the quote is for
    #[serde(rename = "item")]
    pub item_name: String,

    /// Price per unit
    pub unit_price: Decimal,

    /// Quoted price for the order
    pub total_price: Decimal,
}

impl VendorOffer {
    pub fn new(
        vendor_name: impl Into<String>,
        item_name: impl Into<String>,
        unit_price: Decimal,
        total_price: Decimal,
    ) -> Self {
        VendorOffer {
            vendor_name: vendor_name.into(),
            item_name: item_name.into(),
            unit_price,
            total_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_deserialization() {
        let json = r#"{"vendor":"GoodRock Cements","item":"cement","unit_price":420,"total_price":"42000"}"#;

        let offer: VendorOffer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.vendor_name, "GoodRock Cements");
        assert_eq!(offer.item_name, "cement");
        assert_eq!(offer.unit_price, Decimal::new(420, 0));
        assert_eq!(offer.total_price, Decimal::new(42000, 0));
    }
}
