//! Pipeline definitions in YAML
//!
//! ```yaml
//! name: standard-shipment
//! handlers:
//!   - kind: weight_limit
//!     max_kg: 1000
//!   - kind: banned_cargo
//!     banned: [Explosives]
//!   - kind: declared_value_limit
//!     max_value: 25000
//!   - kind: required_attribute
//!     attribute: destination
//!     name: destination-present
//! ```
//!
//! Handlers are built in the listed order, which is the evaluation order.

use crate::error::{ConfigError, Result};
use crate::handler::Handler;
use crate::pipeline::Pipeline;
use crate::shipment::{
    DeclaredValueCheck, RequiredAttribute, SecurityCheck, ShipmentRequest, WeightCheck,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root of a pipeline definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub name: Option<String>,

    /// Handlers in evaluation order. Empty means approve everything.
    #[serde(default)]
    pub handlers: Vec<HandlerSpec>,
}

/// One handler entry. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum HandlerSpec {
    WeightLimit {
        max_kg: f64,
        #[serde(default)]
        name: Option<String>,
    },
    BannedCargo {
        banned: Vec<String>,
        #[serde(default)]
        name: Option<String>,
    },
    DeclaredValueLimit {
        max_value: f64,
        #[serde(default)]
        name: Option<String>,
    },
    RequiredAttribute {
        attribute: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl HandlerSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerSpec::WeightLimit { .. } => "weight_limit",
            HandlerSpec::BannedCargo { .. } => "banned_cargo",
            HandlerSpec::DeclaredValueLimit { .. } => "declared_value_limit",
            HandlerSpec::RequiredAttribute { .. } => "required_attribute",
        }
    }

    /// Diagnostic name override, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            HandlerSpec::WeightLimit { name, .. }
            | HandlerSpec::BannedCargo { name, .. }
            | HandlerSpec::DeclaredValueLimit { name, .. }
            | HandlerSpec::RequiredAttribute { name, .. } => name.as_deref(),
        }
    }

    /// Validate this entry and build its handler. `index` is the entry's
    /// position in the definition, used in error messages.
    pub fn build(&self, index: usize) -> Result<Box<dyn Handler<ShipmentRequest>>> {
        let invalid = |message: String| ConfigError::InvalidHandler {
            index,
            kind: self.kind(),
            message,
        };

        if matches!(self.name(), Some(name) if name.trim().is_empty()) {
            return Err(invalid("name is empty".to_string()));
        }

        let handler: Box<dyn Handler<ShipmentRequest>> = match self {
            HandlerSpec::WeightLimit { max_kg, name } => {
                check_limit("max_kg", *max_kg).map_err(invalid)?;
                let check = WeightCheck::new(*max_kg);
                Box::new(match name {
                    Some(name) => check.with_name(name.as_str()),
                    None => check,
                })
            }
            HandlerSpec::BannedCargo { banned, name } => {
                if banned.is_empty() {
                    return Err(invalid("banned list is empty".to_string()));
                }
                if banned.iter().any(|cargo| cargo.trim().is_empty()) {
                    return Err(invalid("banned list contains a blank entry".to_string()));
                }
                let check = SecurityCheck::new(banned);
                Box::new(match name {
                    Some(name) => check.with_name(name.as_str()),
                    None => check,
                })
            }
            HandlerSpec::DeclaredValueLimit { max_value, name } => {
                check_limit("max_value", *max_value).map_err(invalid)?;
                let check = DeclaredValueCheck::new(*max_value);
                Box::new(match name {
                    Some(name) => check.with_name(name.as_str()),
                    None => check,
                })
            }
            HandlerSpec::RequiredAttribute { attribute, name } => {
                if attribute.trim().is_empty() {
                    return Err(invalid("attribute name is empty".to_string()));
                }
                let check = RequiredAttribute::new(attribute.as_str());
                Box::new(match name {
                    Some(name) => check.with_name(name.as_str()),
                    None => check,
                })
            }
        };
        Ok(handler)
    }
}

fn check_limit(field: &str, value: f64) -> std::result::Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "{} must be a finite, non-negative number (got {})",
            field, value
        ));
    }
    Ok(())
}

impl PipelineConfig {
    /// Load a definition from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Validate every entry and seal the resulting pipeline.
    pub fn build(&self) -> Result<Pipeline<ShipmentRequest>> {
        let mut builder = Pipeline::builder();
        for (index, spec) in self.handlers.iter().enumerate() {
            builder = builder.append_boxed(spec.build(index)?);
        }

        info!(
            pipeline = self.name.as_deref().unwrap_or("unnamed"),
            handlers = builder.len(),
            "Built pipeline from config"
        );
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;
    use std::io::Write;

    const STANDARD: &str = r#"
name: standard-shipment
handlers:
  - kind: weight_limit
    max_kg: 1000
  - kind: banned_cargo
    banned: [Explosives]
  - kind: declared_value_limit
    max_value: 25000
  - kind: required_attribute
    attribute: destination
    name: destination-present
"#;

    #[test]
    fn parses_handler_kinds_in_order() {
        let config = PipelineConfig::from_yaml(STANDARD).unwrap();
        assert_eq!(config.name.as_deref(), Some("standard-shipment"));
        let kinds: Vec<_> = config.handlers.iter().map(|h| h.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "weight_limit",
                "banned_cargo",
                "declared_value_limit",
                "required_attribute"
            ]
        );
    }

    #[test]
    fn builds_named_pipeline() {
        let pipeline = PipelineConfig::from_yaml(STANDARD).unwrap().build().unwrap();
        assert_eq!(
            pipeline.handler_names(),
            vec![
                "weight-check",
                "security-check",
                "declared-value-check",
                "destination-present"
            ]
        );

        let request = ShipmentRequest::new()
            .with("weight", 50)
            .with("cargo", "Apples")
            .with("declared_value", 100)
            .with("destination", "Hamburg");
        assert_eq!(pipeline.evaluate(&request), Outcome::Approved);
    }

    #[test]
    fn empty_definition_builds_vacuous_pipeline() {
        let pipeline = PipelineConfig::from_yaml("handlers: []").unwrap().build().unwrap();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.evaluate(&ShipmentRequest::new()), Outcome::Approved);
    }

    #[test]
    fn rejects_negative_limit() {
        let yaml = "handlers:\n  - kind: weight_limit\n    max_kg: -5\n";
        let err = PipelineConfig::from_yaml(yaml).unwrap().build().unwrap_err();
        match err {
            ConfigError::InvalidHandler { index, kind, .. } => {
                assert_eq!(index, 0);
                assert_eq!(kind, "weight_limit");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_empty_banned_list() {
        let yaml = "handlers:\n  - kind: weight_limit\n    max_kg: 5\n  - kind: banned_cargo\n    banned: []\n";
        let err = PipelineConfig::from_yaml(yaml).unwrap().build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "handler #1 (banned_cargo): banned list is empty"
        );
    }

    #[test]
    fn unknown_kind_is_a_yaml_error() {
        let yaml = "handlers:\n  - kind: teleport\n";
        assert!(matches!(
            PipelineConfig::from_yaml(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    fn build_error(yaml: &str) -> String {
        PipelineConfig::from_yaml(yaml)
            .unwrap()
            .build()
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn rejects_blank_name_override() {
        assert_eq!(
            build_error("handlers:\n  - kind: weight_limit\n    max_kg: 5\n    name: \"\"\n"),
            "handler #0 (weight_limit): name is empty"
        );
        assert_eq!(
            build_error("handlers:\n  - kind: banned_cargo\n    banned: [Explosives]\n    name: \"   \"\n"),
            "handler #0 (banned_cargo): name is empty"
        );
    }

    #[test]
    fn rejects_non_finite_limits() {
        let nan = build_error("handlers:\n  - kind: weight_limit\n    max_kg: .nan\n");
        assert!(nan.starts_with("handler #0 (weight_limit): max_kg must be a finite"), "{nan}");

        let inf = build_error("handlers:\n  - kind: declared_value_limit\n    max_value: .inf\n");
        assert!(
            inf.starts_with("handler #0 (declared_value_limit): max_value must be a finite"),
            "{inf}"
        );
    }

    #[test]
    fn rejects_negative_declared_value_limit() {
        let err = build_error("handlers:\n  - kind: declared_value_limit\n    max_value: -1\n");
        assert_eq!(
            err,
            "handler #0 (declared_value_limit): max_value must be a finite, non-negative number (got -1)"
        );
    }

    #[test]
    fn rejects_blank_banned_entry() {
        assert_eq!(
            build_error("handlers:\n  - kind: banned_cargo\n    banned: [Explosives, \"  \"]\n"),
            "handler #0 (banned_cargo): banned list contains a blank entry"
        );
    }

    #[test]
    fn rejects_blank_required_attribute() {
        assert_eq!(
            build_error("handlers:\n  - kind: required_attribute\n    attribute: \" \"\n"),
            "handler #0 (required_attribute): attribute name is empty"
        );
    }

    #[test]
    fn misspelled_keys_are_yaml_errors() {
        let handler_typo = "handlers:\n  - kind: banned_cargo\n    banned: [Explosives]\n    nmae: customs\n";
        assert!(matches!(
            PipelineConfig::from_yaml(handler_typo),
            Err(ConfigError::Yaml(_))
        ));

        let root_typo = "handler:\n  - kind: weight_limit\n    max_kg: 5\n";
        assert!(matches!(
            PipelineConfig::from_yaml(root_typo),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn single_entry_builds_boxed_handler() {
        let config = PipelineConfig::from_yaml(STANDARD).unwrap();
        assert_eq!(config.handlers[3].name(), Some("destination-present"));
        assert_eq!(config.handlers[0].name(), None);

        let security = config.handlers[1].build(1).unwrap();
        let pipeline = Pipeline::builder()
            .append_boxed(security)
            .append(RequiredAttribute::new("destination"))
            .build();
        assert_eq!(pipeline.handler_names(), vec!["security-check", "require-destination"]);

        let request = ShipmentRequest::new().with("cargo", "explosives");
        assert_eq!(pipeline.evaluate(&request), Outcome::rejected("Dangerous cargo"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STANDARD.as_bytes()).unwrap();
        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.handlers.len(), 4);

        let missing = PipelineConfig::load("/nonexistent/pipeline.yaml");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
