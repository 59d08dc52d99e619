//! Record of a single traced evaluation.

use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};

/// Outcome of one evaluation plus the handlers it visited, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationTrace {
    outcome: Outcome,
    visited: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rejected_by: Option<String>,
}

impl EvaluationTrace {
    pub(crate) fn new(outcome: Outcome, visited: Vec<String>, rejected_by: Option<String>) -> Self {
        Self {
            outcome,
            visited,
            rejected_by,
        }
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }

    /// Names of the handlers that were invoked, in invocation order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Handler whose rejection ended the evaluation.
    pub fn rejected_by(&self) -> Option<&str> {
        self.rejected_by.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_outcome_keeps_rejection() {
        let trace = EvaluationTrace::new(
            Outcome::rejected("Dangerous cargo"),
            vec!["weight-check".into(), "security-check".into()],
            Some("security-check".into()),
        );
        assert_eq!(trace.clone().into_outcome(), Outcome::rejected("Dangerous cargo"));

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["rejected_by"], "security-check");
        let back: EvaluationTrace = serde_json::from_value(json).unwrap();
        assert_eq!(back, trace);
    }

    #[test]
    fn approved_trace_omits_rejected_by() {
        let trace = EvaluationTrace::new(Outcome::Approved, vec!["weight-check".into()], None);
        let json = serde_json::to_value(&trace).unwrap();
        assert!(json.get("rejected_by").is_none());
        assert_eq!(trace.into_outcome(), Outcome::Approved);
    }
}
