pub mod approval;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod observability;
pub mod procurement;
pub mod selection;
pub mod storage;

pub use catalog::Catalog;
pub use config::Config;
pub use domain::{OutcomeRecord, OutcomeStatus, PolicyRecord, SiteId, VendorOffer};
pub use procurement::Procurement;
pub use selection::{select_vendor, SelectionResult};
pub use storage::{PolicyStore, StorageError};
