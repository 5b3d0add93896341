//! Approval classification.
//!
//! Turns a site's policy and a vendor selection into a terminal outcome.
//! Rules are checked in order and the first match wins:
//!
//! 1. No policy for the site: `ERROR`.
//! 2. No chosen vendor: `REJECTED`.
//! 3. Chosen cost strictly above the approval limit: `AWAITING_APPROVAL`.
//! 4. Otherwise: `APPROVED`.

pub mod resolution;

pub use resolution::ResolutionError;

use crate::domain::{format_amount, OrderRequest, OutcomeRecord, OutcomeStatus, PolicyRecord};
use crate::selection::SelectionResult;

/// Classify an order.
///
/// `selection` is ignored when `policy` is absent, since selection cannot
/// run without a policy. A missing selection with a policy present is
/// treated as "nothing eligible". Pure: same inputs, same outcome.
pub fn classify(
    order: &OrderRequest,
    policy: Option<&PolicyRecord>,
    selection: Option<&SelectionResult>,
) -> OutcomeRecord {
    let Some(policy) = policy else {
        return OutcomeRecord::error(order, format!("no rules set for site '{}'", order.site));
    };

    let Some(chosen) = selection.and_then(|s| s.chosen.as_ref()) else {
        return OutcomeRecord::rejected(
            order,
            policy.approval_limit,
            policy.banned_vendors.to_vec(),
            format!("no eligible vendor for '{}'", order.item),
        );
    };

    let cost = chosen.total_price;
    let limit = policy.approval_limit;

    if cost > limit {
        OutcomeRecord::with_vendor(
            OutcomeStatus::AwaitingApproval,
            order,
            &chosen.vendor_name,
            cost,
            limit,
            format!(
                "cost {} from {} exceeds site approval limit of {}",
                format_amount(cost),
                chosen.vendor_name,
                format_amount(limit)
            ),
        )
    } else {
        OutcomeRecord::with_vendor(
            OutcomeStatus::Approved,
            order,
            &chosen.vendor_name,
            cost,
            limit,
            format!(
                "cost {} from {} is within approval limit of {}",
                format_amount(cost),
                chosen.vendor_name,
                format_amount(limit)
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VendorOffer;
    use crate::selection::select_vendor;
    use rust_decimal::Decimal;

    fn order() -> OrderRequest {
        OrderRequest::new("Pune", "cement", 100)
    }

    fn policy(limit: i64, banned: &[&str]) -> PolicyRecord {
        PolicyRecord::new("Pune", Decimal::new(limit, 0), banned.iter().copied())
    }

    fn chosen(vendor: &str, total: Decimal) -> SelectionResult {
        let offer = VendorOffer::new(vendor, "cement", Decimal::ONE, total);
        SelectionResult {
            eligible: vec![offer.clone()],
            chosen: Some(offer),
        }
    }

    #[test]
    fn test_no_policy_is_error() {
        let order = OrderRequest::new("Nagpur", "cement", 10);
        let outcome = classify(&order, None, None);

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert!(outcome.reason.contains("no rules set for site"));
        assert!(outcome.vendor.is_none());
        assert!(outcome.cost.is_none());
    }

    #[test]
    fn test_no_policy_wins_over_selection() {
        let selection = chosen("GoodRock Cements", Decimal::new(100, 0));
        let outcome = classify(&order(), None, Some(&selection));

        assert_eq!(outcome.status, OutcomeStatus::Error);
    }

    #[test]
    fn test_nothing_chosen_is_rejected() {
        let policy = policy(40000, &["BadRock Cements"]);
        let outcome = classify(&order(), Some(&policy), Some(&SelectionResult::empty()));

        assert_eq!(outcome.status, OutcomeStatus::Rejected);
        assert!(outcome.reason.contains("no eligible vendor"));
        assert_eq!(outcome.banned_vendors, vec!["BadRock Cements".to_string()]);
        assert!(outcome.vendor.is_none());
        assert!(outcome.cost.is_none());

        let outcome = classify(&order(), Some(&policy), None);
        assert_eq!(outcome.status, OutcomeStatus::Rejected);
    }

    #[test]
    fn test_over_limit_awaits_approval() {
        let policy = policy(40000, &[]);
        let selection = chosen("GoodRock Cements", Decimal::new(42000, 0));
        let outcome = classify(&order(), Some(&policy), Some(&selection));

        assert_eq!(outcome.status, OutcomeStatus::AwaitingApproval);
        assert_eq!(outcome.vendor.as_deref(), Some("GoodRock Cements"));
        assert_eq!(outcome.cost, Some(Decimal::new(42000, 0)));
        assert!(outcome.reason.contains("GoodRock Cements"));
        assert!(outcome.reason.contains("₹42,000"));
        assert!(outcome.reason.contains("₹40,000"));
    }

    #[test]
    fn test_within_limit_approved() {
        let policy = policy(40000, &[]);
        let selection = chosen("GoodRock Cements", Decimal::new(39000, 0));
        let outcome = classify(&order(), Some(&policy), Some(&selection));

        assert_eq!(outcome.status, OutcomeStatus::Approved);
        assert_eq!(outcome.cost, Some(Decimal::new(39000, 0)));
        assert!(outcome.reason.contains("₹39,000"));
    }

    #[test]
    fn test_limit_boundary() {
        let policy = policy(40000, &[]);

        let at_limit = chosen("GoodRock Cements", Decimal::new(40000, 0));
        let outcome = classify(&order(), Some(&policy), Some(&at_limit));
        assert_eq!(outcome.status, OutcomeStatus::Approved);

        let one_over = chosen("GoodRock Cements", Decimal::new(40001, 0));
        let outcome = classify(&order(), Some(&policy), Some(&one_over));
        assert_eq!(outcome.status, OutcomeStatus::AwaitingApproval);

        // Scale differences must not matter: 40000.00 == 40000
        let scaled = chosen("GoodRock Cements", Decimal::new(4000000, 2));
        let outcome = classify(&order(), Some(&policy), Some(&scaled));
        assert_eq!(outcome.status, OutcomeStatus::Approved);

        let one_paisa_over = chosen("GoodRock Cements", Decimal::new(4000001, 2));
        let outcome = classify(&order(), Some(&policy), Some(&one_paisa_over));
        assert_eq!(outcome.status, OutcomeStatus::AwaitingApproval);
    }

    #[test]
    fn test_zero_limit() {
        let policy = policy(0, &[]);

        let free = chosen("Free Sand", Decimal::ZERO);
        assert_eq!(
            classify(&order(), Some(&policy), Some(&free)).status,
            OutcomeStatus::Approved
        );

        let paid = chosen("Paid Sand", Decimal::ONE);
        assert_eq!(
            classify(&order(), Some(&policy), Some(&paid)).status,
            OutcomeStatus::AwaitingApproval
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let policy = policy(40000, &["BadRock Cements"]);
        let offers = vec![
            VendorOffer::new("BadRock Cements", "cement", Decimal::ONE, Decimal::new(35000, 0)),
            VendorOffer::new("GoodRock Cements", "cement", Decimal::ONE, Decimal::new(42000, 0)),
        ];

        let first = classify(&order(), Some(&policy), Some(&select_vendor(&policy, &offers)));
        let second = classify(&order(), Some(&policy), Some(&select_vendor(&policy, &offers)));

        assert_eq!(first, second);
    }
}
