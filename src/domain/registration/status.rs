//! Payment status state machine.
//!
//! Defines the payment lifecycle of a registration and its valid transitions.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Registration stored, awaiting a verified payment.
    Pending,

    /// Payment signature verified. Terminal.
    Paid,

    /// Last reported payment failed verification. A later verified
    /// payment may still move the registration to `Paid`.
    Failed,

    /// The gateway order could not be opened. Terminal; the farmer has to
    /// submit the form again.
    OrderFailed,
}

impl PaymentStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::OrderFailed => "order_failed",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            "order_failed" => Some(PaymentStatus::OrderFailed),
            _ => None,
        }
    }

    /// Returns true if a payment verification may still change this status.
    pub fn accepts_verification(&self) -> bool {
        matches!(self, PaymentStatus::Pending | PaymentStatus::Failed)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Paid)
                | (Pending, Failed)
                | (Pending, OrderFailed)
            // From FAILED
                | (Failed, Failed) // Another rejected attempt
                | (Failed, Paid) // Legitimate retry
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Paid, Failed, OrderFailed],
            Failed => vec![Failed, Paid],
            Paid => vec![],
            OrderFailed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::OrderFailed,
    ];

    #[test]
    fn pending_can_transition_to_paid() {
        let result = PaymentStatus::Pending.transition_to(PaymentStatus::Paid);
        assert_eq!(result, Ok(PaymentStatus::Paid));
    }

    #[test]
    fn pending_can_transition_to_failed() {
        let result = PaymentStatus::Pending.transition_to(PaymentStatus::Failed);
        assert_eq!(result, Ok(PaymentStatus::Failed));
    }

    #[test]
    fn pending_can_transition_to_order_failed() {
        assert!(PaymentStatus::Pending.can_transition_to(&PaymentStatus::OrderFailed));
    }

    #[test]
    fn failed_can_retry_to_paid() {
        assert!(PaymentStatus::Failed.can_transition_to(&PaymentStatus::Paid));
    }

    #[test]
    fn failed_can_fail_again() {
        assert!(PaymentStatus::Failed.can_transition_to(&PaymentStatus::Failed));
    }

    #[test]
    fn nothing_returns_to_pending() {
        for status in ALL {
            assert!(!status.can_transition_to(&PaymentStatus::Pending));
        }
    }

    #[test]
    fn paid_is_terminal() {
        assert!(PaymentStatus::Paid.is_terminal());
        assert!(PaymentStatus::Paid
            .transition_to(PaymentStatus::Failed)
            .is_err());
    }

    #[test]
    fn order_failed_is_terminal() {
        assert!(PaymentStatus::OrderFailed.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn accepts_verification_only_while_open() {
        assert!(PaymentStatus::Pending.accepts_verification());
        assert!(PaymentStatus::Failed.accepts_verification());
        assert!(!PaymentStatus::Paid.accepts_verification());
        assert!(!PaymentStatus::OrderFailed.accepts_verification());
    }

    #[test]
    fn storage_representation_parses_back() {
        for status in ALL {
            assert_eq!(PaymentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PaymentStatus::parse("refunded"), None);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&PaymentStatus::OrderFailed).unwrap();
        assert_eq!(json, "\"order_failed\"");
    }
}
