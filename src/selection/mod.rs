pub mod banned;
pub mod traits;

pub use banned::BannedVendorConstraint;
pub use traits::OfferConstraint;

use tracing::debug;

use crate::domain::{PolicyRecord, VendorOffer};

/// Offers narrowed by site policy, with the cheapest one picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    /// Offers that passed every constraint, in catalog order
    pub eligible: Vec<VendorOffer>,

    /// Lowest `total_price` among `eligible`, absent when none are eligible
    pub chosen: Option<VendorOffer>,
}

impl SelectionResult {
    pub fn empty() -> Self {
        SelectionResult {
            eligible: Vec::new(),
            chosen: None,
        }
    }
}

/// Apply a site's policy to the offers for an item and pick a vendor.
pub fn select_vendor(policy: &PolicyRecord, offers: &[VendorOffer]) -> SelectionResult {
    let banned = BannedVendorConstraint::from_policy(policy);
    let constraints: [&dyn OfferConstraint; 1] = [&banned];
    select_with(&constraints, offers)
}

/// Filter offers through the given constraints and pick the cheapest.
///
/// The input is left untouched; eligible offers are collected into a new
/// list. Ties on price go to the offer listed first.
pub fn select_with(constraints: &[&dyn OfferConstraint], offers: &[VendorOffer]) -> SelectionResult {
    let eligible: Vec<VendorOffer> = offers
        .iter()
        .filter(|offer| {
            constraints.iter().all(|c| {
                let permitted = c.permits(offer);
                if !permitted {
                    debug!(constraint = c.id(), vendor = %offer.vendor_name, "Offer excluded");
                }
                permitted
            })
        })
        .cloned()
        .collect();

    // min_by_key keeps the first of equal minimums
    let chosen = eligible.iter().min_by_key(|o| o.total_price).cloned();

    SelectionResult { eligible, chosen }
}
