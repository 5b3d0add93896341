pub mod money;
pub mod offer;
pub mod order;
pub mod outcome;
pub mod site;

pub use money::format_amount;
pub use offer::VendorOffer;
pub use order::OrderRequest;
pub use outcome::{OutcomeRecord, OutcomeStatus};
pub use site::{BannedVendors, PolicyRecord, SiteId};
