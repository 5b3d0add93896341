use crate::domain::VendorOffer;
use std::fmt::Debug;

/// A policy constraint that an offer must satisfy to be eligible.
///
/// Constraints are stateless and evaluated per offer; an offer is eligible
/// only when every constraint permits it.
pub trait OfferConstraint: Send + Sync + Debug {
    /// Identifier used in logs.
    fn id(&self) -> &str;

    /// Returns true if the offer may be selected.
    fn permits(&self, offer: &VendorOffer) -> bool;
}
