use std::collections::HashSet;
use tracing::warn;

use crate::domain::{PolicyRecord, VendorOffer};

use super::traits::OfferConstraint;

/// Site vendor ban.
///
/// Matching is exact and case-sensitive. Names that differ from a ban only
/// by case or surrounding whitespace still pass, but are logged so an
/// operator can spot a ban that is not taking effect.
#[derive(Debug)]
pub struct BannedVendorConstraint {
    banned: HashSet<String>,
    /// Trimmed, lowercased bans for near-miss diagnostics
    folded: HashSet<String>,
}

impl BannedVendorConstraint {
    pub fn new<I, S>(banned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let banned: HashSet<String> = banned.into_iter().map(Into::into).collect();
        let folded = banned.iter().map(|b| fold(b)).collect();

        BannedVendorConstraint { banned, folded }
    }

    pub fn from_policy(policy: &PolicyRecord) -> Self {
        Self::new(policy.banned_vendors.iter().cloned())
    }

    /// Returns true if the name is not banned but resembles a ban.
    pub fn is_near_miss(&self, vendor_name: &str) -> bool {
        !self.banned.contains(vendor_name) && self.folded.contains(&fold(vendor_name))
    }
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

impl OfferConstraint for BannedVendorConstraint {
    fn id(&self) -> &str {
        "banned_vendor"
    }

    fn permits(&self, offer: &VendorOffer) -> bool {
        if self.banned.contains(&offer.vendor_name) {
            return false;
        }

        if self.is_near_miss(&offer.vendor_name) {
            warn!(
                vendor = %offer.vendor_name,
                item = %offer.item_name,
                "Vendor resembles a banned name but does not match exactly; not excluded"
            );
        }

        true
    }
}
