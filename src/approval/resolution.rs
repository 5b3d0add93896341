use thiserror::Error;

use crate::domain::{OutcomeRecord, OutcomeStatus};

/// Errors from resolving a paused outcome.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("outcome is {0}, only AWAITING_APPROVAL can be resolved")]
    NotAwaiting(OutcomeStatus),
}

impl OutcomeRecord {
    /// Record an approver's sign-off on a paused order.
    pub fn approve(self) -> Result<OutcomeRecord, ResolutionError> {
        if self.status != OutcomeStatus::AwaitingApproval {
            return Err(ResolutionError::NotAwaiting(self.status));
        }

        Ok(OutcomeRecord {
            status: OutcomeStatus::Approved,
            reason: format!("{}; approved by approver", self.reason),
            ..self
        })
    }

    /// Record an approver declining a paused order.
    ///
    /// The chosen vendor and cost are cleared: a rejected outcome never
    /// carries a vendor.
    pub fn reject(self, reason: impl Into<String>) -> Result<OutcomeRecord, ResolutionError> {
        if self.status != OutcomeStatus::AwaitingApproval {
            return Err(ResolutionError::NotAwaiting(self.status));
        }

        let reason = reason.into();
        Ok(OutcomeRecord {
            status: OutcomeStatus::Rejected,
            vendor: None,
            cost: None,
            reason: format!("rejected by approver: {}", reason),
            rejection_reason: Some(reason),
            ..self
        })
    }
}
