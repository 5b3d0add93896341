use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Construction site identifier (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        SiteId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        SiteId::new(id)
    }
}

/// Banned vendor names for a site.
/// SmallVec optimizes for the common case of a handful of bans.
pub type BannedVendors = SmallVec<[String; 4]>;

/// Procurement policy stored for one site.
///
/// A record is replaced wholesale on every rule ingestion; there is no
/// merging of banned vendor lists between writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Site the policy applies to
    pub site_id: SiteId,

    /// Maximum order cost that can be approved without human sign-off
    pub approval_limit: Decimal,

    /// Vendors excluded from selection (exact, case-sensitive names)
    #[serde(default)]
    pub banned_vendors: BannedVendors,
}

impl PolicyRecord {
    /// Build a record, collapsing duplicate banned names.
    ///
    /// First-occurrence order of the banned names is kept.
    pub fn new<I, S>(site_id: impl Into<SiteId>, approval_limit: Decimal, banned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut banned_vendors = BannedVendors::new();
        for name in banned {
            let name = name.into();
            if !banned_vendors.contains(&name) {
                banned_vendors.push(name);
            }
        }

        PolicyRecord {
            site_id: site_id.into(),
            approval_limit,
            banned_vendors,
        }
    }

    /// Check whether a vendor is banned at this site.
    #[inline]
    pub fn is_banned(&self, vendor_name: &str) -> bool {
        self.banned_vendors.iter().any(|b| b == vendor_name)
    }

    /// Check the record against the data model constraints.
    pub fn validate(&self) -> Result<(), String> {
        if self.site_id.as_str().is_empty() {
            return Err("site id cannot be empty".to_string());
        }
        if self.approval_limit < Decimal::ZERO {
            return Err(format!(
                "approval limit for site '{}' cannot be negative: {}",
                self.site_id, self.approval_limit
            ));
        }
        Ok(())
    }
}
