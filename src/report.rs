//! Presentation of evaluation results.
//!
//! Rendering is a pure step on top of an [`EvaluationTrace`]; it never feeds
//! back into evaluation.

use crate::outcome::Outcome;
use crate::trace::EvaluationTrace;
use serde_json::{json, Value};

/// Multi-line, human-readable summary.
pub fn render_text(trace: &EvaluationTrace) -> String {
    let mut out = String::new();
    match trace.outcome() {
        Outcome::Approved => out.push_str("APPROVED\n"),
        Outcome::Rejected { reason } => {
            out.push_str(&format!("REJECTED: {}\n", reason));
            if let Some(handler) = trace.rejected_by() {
                out.push_str(&format!("  rejected by: {}\n", handler));
            }
        }
    }

    if trace.visited().is_empty() {
        out.push_str("  checks run: none\n");
    } else {
        out.push_str(&format!("  checks run: {}\n", trace.visited().join(" -> ")));
    }
    out
}

pub fn render_json(trace: &EvaluationTrace) -> Value {
    json!({
        "approved": trace.outcome().is_approved(),
        "outcome": trace.outcome(),
        "visited": trace.visited(),
        "rejected_by": trace.rejected_by(),
    })
}
