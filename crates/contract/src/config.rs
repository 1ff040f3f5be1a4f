//! Declarative contracts
//!
//! A [`ContractConfig`] describes the rules of a wrapped function as data,
//! typically loaded from JSON:
//!
//! ```json
//! {
//!   "inputs": { "a": { "type": "int" }, "b": "~number" },
//!   "outputs": { "count": 2, "rules": ["even", null] }
//! }
//! ```
//!
//! Rules are written as `null` (absent), a shortcut name (optionally with
//! the `~` prefix) or `{"type": "<name>"}`. Predicates cannot be expressed
//! in configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::decorator::IntoValidated;
use crate::error::{ContractError, Result};
use crate::function::ValidatedFunction;
use crate::output::ExpectedCount;
use crate::rule::Rule;
use crate::value::Value;

/// Output section of a [`ContractConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Expected output count: an integer, `-1`, or absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<Value>,
    /// Output rules by position.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

/// A whole contract in declarative form.
///
/// # Examples
///
/// ```
/// use nebula_contract::{ContractConfig, Function, Signature, Value, args};
///
/// let config = ContractConfig::from_json(r#"{
///     "inputs": {"a": {"type": "int"}},
///     "outputs": {"count": 1, "rules": ["even"]}
/// }"#).unwrap();
///
/// let f = Function::new(Signature::new("double").param("a"), |args| {
///     Ok(Value::Int(args.get(0, "a")?.as_int().unwrap_or_default() * 2))
/// });
/// let f = config.apply(f).unwrap();
///
/// assert_eq!(f.call(&args![21]).unwrap(), Value::Int(42));
/// assert!(f.call(&args![1.5]).is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    /// Input rules keyed by parameter name.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub inputs: IndexMap<String, Rule>,
    /// Output count and rules.
    pub outputs: OutputConfig,
}

impl ContractConfig {
    /// Parses a contract from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ContractError::config(e.to_string()))
    }

    /// Reads a contract from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ContractError::config(e.to_string()))
    }

    /// Renders the contract as JSON.
    ///
    /// Fails for contracts holding rules without a configuration form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ContractError::config(e.to_string()))
    }

    /// The configured expected count.
    pub fn expected_count(&self) -> Result<Option<ExpectedCount>> {
        self.outputs
            .count
            .as_ref()
            .map_or(Ok(None), ExpectedCount::from_value)
    }

    /// Applies the outputs and then the inputs to `target`.
    ///
    /// An absent `count` leaves the target's expected count as it was.
    pub fn apply(self, target: impl IntoValidated) -> Result<ValidatedFunction> {
        let count = self.expected_count()?;
        let mut validated = target.into_validated()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            function = validated.name(),
            inputs = self.inputs.len(),
            outputs = self.outputs.rules.len(),
            "applying contract configuration"
        );

        if count.is_some() {
            validated.set_expected_count(count);
        }
        validated.update_output_validators(self.outputs.rules);
        validated.update_input_validators(self.inputs)?;
        Ok(validated)
    }
}

impl std::str::FromStr for ContractConfig {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::ValueType;
    use serde_json::json;

    #[test]
    fn test_empty_config() {
        let config = ContractConfig::from_json("{}").unwrap();
        assert!(config.inputs.is_empty());
        assert!(config.outputs.rules.is_empty());
        assert_eq!(config.expected_count().unwrap(), None);
    }

    #[test]
    fn test_parses_rules() {
        let config = ContractConfig::from_value(json!({
            "inputs": {"a": {"type": "float"}, "b": "~even", "c": null},
            "outputs": {"count": -1, "rules": ["number"]}
        }))
        .unwrap();

        assert!(matches!(config.inputs["a"], Rule::Type(ValueType::Float)));
        assert!(matches!(&config.inputs["b"], Rule::Negated(name) if name == "even"));
        assert!(config.inputs["c"].is_absent());
        assert_eq!(config.expected_count().unwrap(), Some(ExpectedCount::Opaque));
    }

    #[test]
    fn test_rejects_unknown_type_name() {
        let err = ContractConfig::from_json(r#"{"inputs": {"a": {"type": "double"}}}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(ContractConfig::from_json(r#"{"input": {}}"#).is_err());
        assert!(ContractConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_non_integer_count() {
        let config = ContractConfig::from_json(r#"{"outputs": {"count": 1.5}}"#).unwrap();
        let err = config.expected_count().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected an integer for expected output length"
        );
    }

    #[test]
    fn test_unsupported_rule_survives_parsing() {
        let config = ContractConfig::from_json(r#"{"inputs": {"a": [1, 2]}}"#).unwrap();
        assert!(matches!(&config.inputs["a"], Rule::Unsupported { kind } if kind == "list"));
    }

    #[test]
    fn test_to_json_round_trip() {
        let text = r#"{"inputs": {"a": "~number"}, "outputs": {"count": 2, "rules": [{"type": "int"}]}}"#;
        let config = ContractConfig::from_json(text).unwrap();
        let again = ContractConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(again.expected_count().unwrap(), Some(ExpectedCount::Exact(2)));
        assert_eq!(again.inputs.len(), 1);
        assert_eq!(again.outputs.rules.len(), 1);
    }
}
