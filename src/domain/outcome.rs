use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::order::OrderRequest;
use super::site::SiteId;

/// Final classification of an order request.
///
/// Every status is terminal for the core. `AwaitingApproval` is a value
/// handed to the caller, not a suspended computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    /// Cost within the site's approval limit
    Approved,
    /// Cost above the limit, human sign-off required
    AwaitingApproval,
    /// No eligible vendor for the item
    Rejected,
    /// No rules stored for the site
    Error,
}

impl OutcomeStatus {
    /// Returns true if a vendor was chosen for this outcome.
    #[inline]
    pub fn has_vendor(&self) -> bool {
        matches!(self, OutcomeStatus::Approved | OutcomeStatus::AwaitingApproval)
    }

    /// Returns true if a human must act before the order proceeds.
    #[inline]
    pub fn requires_action(&self) -> bool {
        *self == OutcomeStatus::AwaitingApproval
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Approved => "APPROVED",
            OutcomeStatus::AwaitingApproval => "AWAITING_APPROVAL",
            OutcomeStatus::Rejected => "REJECTED",
            OutcomeStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome returned to the caller for one order request.
///
/// `vendor` and `cost` are only set when `status.has_vendor()` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub status: OutcomeStatus,

    pub site: SiteId,

    pub item: String,

    pub quantity: u32,

    /// Chosen vendor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Quoted total of the chosen vendor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,

    /// Site approval limit in force, absent when no rules exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_limit: Option<Decimal>,

    /// Bans in force when nothing was eligible
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub banned_vendors: Vec<String>,

    /// Human-readable explanation
    pub reason: String,

    /// Set when an approver declined a paused order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl OutcomeRecord {
    fn base(status: OutcomeStatus, order: &OrderRequest, reason: String) -> Self {
        OutcomeRecord {
            status,
            site: order.site.clone(),
            item: order.item.clone(),
            quantity: order.quantity,
            vendor: None,
            cost: None,
            approval_limit: None,
            banned_vendors: Vec::new(),
            reason,
            rejection_reason: None,
        }
    }

    pub fn error(order: &OrderRequest, reason: impl Into<String>) -> Self {
        Self::base(OutcomeStatus::Error, order, reason.into())
    }

    pub fn rejected(
        order: &OrderRequest,
        approval_limit: Decimal,
        banned_vendors: Vec<String>,
        reason: impl Into<String>,
    ) -> Self {
        OutcomeRecord {
            approval_limit: Some(approval_limit),
            banned_vendors,
            ..Self::base(OutcomeStatus::Rejected, order, reason.into())
        }
    }

    pub fn with_vendor(
        status: OutcomeStatus,
        order: &OrderRequest,
        vendor: impl Into<String>,
        cost: Decimal,
        approval_limit: Decimal,
        reason: impl Into<String>,
    ) -> Self {
        debug_assert!(status.has_vendor());
        OutcomeRecord {
            vendor: Some(vendor.into()),
            cost: Some(cost),
            approval_limit: Some(approval_limit),
            ..Self::base(status, order, reason.into())
        }
    }
}
