//! Shipment vetting example domain
//!
//! A [`ShipmentRequest`] is a flat set of named attributes (weight, cargo
//! type, declared value, ...) as they arrive from a parsed shipment record.
//! The checks in [`checks`] read from it and never modify it.
//!
//! ```
//! use approval_chain::shipment::{SecurityCheck, ShipmentRequest, WeightCheck};
//! use approval_chain::Pipeline;
//!
//! let pipeline = Pipeline::builder()
//!     .append(WeightCheck::new(1000.0))
//!     .append(SecurityCheck::new(["Explosives"]))
//!     .build();
//!
//! let request = ShipmentRequest::new()
//!     .with("weight", 50)
//!     .with("cargo", "Apples");
//! assert!(pipeline.evaluate(&request).is_approved());
//! ```

mod checks;

pub use checks::{DeclaredValueCheck, RequiredAttribute, SecurityCheck, WeightCheck};

use crate::handler::CheckError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute holding the gross weight in kilograms.
pub const WEIGHT: &str = "weight";
/// Attribute holding the cargo type.
pub const CARGO: &str = "cargo";
/// Attribute holding the declared customs value.
pub const DECLARED_VALUE: &str = "declared_value";

/// Key-value attributes describing one shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentRequest {
    attributes: BTreeMap<String, Value>,
}

impl ShipmentRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Numeric attribute, failing when absent or not a number.
    pub fn number(&self, key: &str) -> Result<f64, CheckError> {
        let value = self.get(key).ok_or_else(|| CheckError::missing(key))?;
        value
            .as_f64()
            .ok_or_else(|| invalid(key, "a number", value))
    }

    /// Text attribute, failing when absent or not a string.
    pub fn text(&self, key: &str) -> Result<&str, CheckError> {
        let value = self.get(key).ok_or_else(|| CheckError::missing(key))?;
        value.as_str().ok_or_else(|| invalid(key, "a string", value))
    }

    pub fn weight(&self) -> Result<f64, CheckError> {
        self.number(WEIGHT)
    }

    pub fn cargo(&self) -> Result<&str, CheckError> {
        self.text(CARGO)
    }

    pub fn declared_value(&self) -> Result<f64, CheckError> {
        self.number(DECLARED_VALUE)
    }
}

impl FromIterator<(String, Value)> for ShipmentRequest {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

fn invalid(key: &str, expected: &'static str, found: &Value) -> CheckError {
    CheckError::InvalidAttribute {
        attribute: key.to_string(),
        expected,
        found: value_kind(found).to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
