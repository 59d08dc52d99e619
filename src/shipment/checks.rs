use super::ShipmentRequest;
use crate::handler::{CheckError, Handler};
use crate::outcome::Outcome;
use std::collections::BTreeSet;

// =============================================================================
// WEIGHT
// =============================================================================

/// Rejects shipments heavier than a fixed limit.
#[derive(Debug, Clone)]
pub struct WeightCheck {
    name: String,
    max_kg: f64,
}

impl WeightCheck {
    pub fn new(max_kg: f64) -> Self {
        Self {
            name: "weight-check".to_string(),
            max_kg,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn max_kg(&self) -> f64 {
        self.max_kg
    }
}

impl Handler<ShipmentRequest> for WeightCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, request: &ShipmentRequest) -> Result<Outcome, CheckError> {
        if request.weight()? > self.max_kg {
            return Ok(Outcome::rejected("Weight exceeds limit"));
        }
        Ok(Outcome::Approved)
    }
}

// =============================================================================
// CARGO
// =============================================================================

/// Rejects shipments whose cargo type is on a banned list.
///
/// Matching ignores case and surrounding whitespace.
#[derive(Debug, Clone)]
pub struct SecurityCheck {
    name: String,
    banned: BTreeSet<String>,
}

impl SecurityCheck {
    pub fn new<I, S>(banned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: "security-check".to_string(),
            banned: banned.into_iter().map(|s| normalize(s.as_ref())).collect(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_banned(&self, cargo: &str) -> bool {
        self.banned.contains(&normalize(cargo))
    }
}

fn normalize(cargo: &str) -> String {
    cargo.trim().to_lowercase()
}

impl Handler<ShipmentRequest> for SecurityCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, request: &ShipmentRequest) -> Result<Outcome, CheckError> {
        if self.is_banned(request.cargo()?) {
            return Ok(Outcome::rejected("Dangerous cargo"));
        }
        Ok(Outcome::Approved)
    }
}

// =============================================================================
// DECLARED VALUE
// =============================================================================

/// Rejects shipments declared above a value ceiling.
#[derive(Debug, Clone)]
pub struct DeclaredValueCheck {
    name: String,
    max_value: f64,
}

impl DeclaredValueCheck {
    pub fn new(max_value: f64) -> Self {
        Self {
            name: "declared-value-check".to_string(),
            max_value,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Handler<ShipmentRequest> for DeclaredValueCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, request: &ShipmentRequest) -> Result<Outcome, CheckError> {
        if request.declared_value()? > self.max_value {
            return Ok(Outcome::rejected("Declared value exceeds limit"));
        }
        Ok(Outcome::Approved)
    }
}

// =============================================================================
// PRESENCE
// =============================================================================

/// Rejects shipments missing an attribute (null counts as missing).
#[derive(Debug, Clone)]
pub struct RequiredAttribute {
    name: String,
    attribute: String,
}

impl RequiredAttribute {
    pub fn new(attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        Self {
            name: format!("require-{}", attribute),
            attribute,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Handler<ShipmentRequest> for RequiredAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, request: &ShipmentRequest) -> Result<Outcome, CheckError> {
        match request.get(&self.attribute) {
            Some(value) if !value.is_null() => Ok(Outcome::Approved),
            _ => Ok(Outcome::rejected(format!(
                "Missing required attribute '{}'",
                self.attribute
            ))),
        }
    }
}
