//! Outcome of a single handler check or a whole pipeline evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of evaluating a request.
///
/// There is no "defer" state: a handler that approves its own check lets the
/// pipeline move on to the next handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Approved,
    Rejected { reason: String },
}

impl Outcome {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Outcome::Rejected {
            reason: reason.into(),
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Outcome::Approved)
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_approved()
    }

    /// Rejection reason, `None` when approved.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Approved => None,
            Outcome::Rejected { reason } => Some(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Approved => write!(f, "APPROVED"),
            Outcome::Rejected { reason } => write!(f, "REJECTED: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_only_on_rejection() {
        assert_eq!(Outcome::Approved.reason(), None);
        assert_eq!(
            Outcome::rejected("Dangerous cargo").reason(),
            Some("Dangerous cargo")
        );
        assert!(Outcome::rejected("x").is_rejected());
        assert!(Outcome::Approved.is_approved());
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(Outcome::rejected("Weight exceeds limit")).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "Weight exceeds limit");

        let approved: Outcome = serde_json::from_str(r#"{"status":"approved"}"#).unwrap();
        assert_eq!(approved, Outcome::Approved);
    }

    #[test]
    fn display() {
        assert_eq!(Outcome::Approved.to_string(), "APPROVED");
        assert_eq!(Outcome::rejected("nope").to_string(), "REJECTED: nope");
    }
}
