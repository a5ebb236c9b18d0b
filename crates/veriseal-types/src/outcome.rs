//! verification attempt outcome.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// the result of one verification attempt.
///
/// a verification attempt moves through
/// `Received -> Decoded -> {Consumed | Rejected}`; this type captures
/// the two terminal states. `Consumed` is reachable at most once per
/// token value: the check and the consumption are a single atomic store
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// the token was valid and has now been consumed.
    Consumed {
        /// the product identity the token was bound to.
        product: Product,
    },
    /// the token was not accepted.
    Rejected {
        /// why the attempt was rejected.
        reason: RejectReason,
    },
}

impl VerifyOutcome {
    /// whether this outcome consumed a token.
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed { .. })
    }
}

/// reason a verification attempt was rejected.
///
/// `UnknownOrAlreadyUsedToken` deliberately does not distinguish a
/// never-registered value from an already-consumed one: a counterfeiter
/// probing token values must not learn which ones were once valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// upstream decoding produced no readable symbol.
    NoSymbolDetected,
    /// the value is not an active token. surfaced to users as a single
    /// "invalid code" message.
    #[serde(rename = "invalid_code")]
    UnknownOrAlreadyUsedToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_reason_is_non_distinguishing_on_the_wire() {
        let outcome = VerifyOutcome::Rejected {
            reason: RejectReason::UnknownOrAlreadyUsedToken,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "invalid_code");
    }

    #[test]
    fn test_no_symbol_detected_serializes() {
        let outcome = VerifyOutcome::Rejected {
            reason: RejectReason::NoSymbolDetected,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["reason"], "no_symbol_detected");
    }
}
