//! Rules and the value checker
//!
//! A [`Rule`] is the declarative check attached to one input parameter or
//! one positional output slot. Checking a value against a rule is
//! exhaustive over the rule's variants:
//!
//! - `Absent` never fails
//! - `Shortcut` / `Negated` resolve through the shortcut registry; their
//!   failures carry their own message
//! - `Type` is an is-instance test on the value's runtime type
//! - `Predicate` runs a closure; only an outcome of exactly `false` rejects
//!   the value, and a fault raised inside the closure is re-raised with the
//!   argument name prefixed
//! - `Unsupported` always fails with a configuration error

use std::fmt;
use std::sync::Arc;

use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};

use crate::check::{Check, Negated};
use crate::error::{ContractError, Fault, Result};
use crate::shortcut::{NegatedShortcut, Shortcut};
use crate::value::{Value, ValueType};

// ============================================================================
// PREDICATES
// ============================================================================

/// Result of running a predicate closure.
///
/// Implemented for the return types a predicate closure may have. Only an
/// outcome equal to `Value::Bool(false)` rejects the value; `()`, `None`,
/// `true` and any other value pass.
pub trait PredicateOutcome {
    /// Normalizes the outcome.
    fn into_outcome(self) -> Result<Value, Fault>;
}

impl PredicateOutcome for bool {
    fn into_outcome(self) -> Result<Value, Fault> {
        Ok(Value::Bool(self))
    }
}

impl PredicateOutcome for () {
    fn into_outcome(self) -> Result<Value, Fault> {
        Ok(Value::None)
    }
}

impl PredicateOutcome for Option<bool> {
    fn into_outcome(self) -> Result<Value, Fault> {
        Ok(self.into())
    }
}

impl PredicateOutcome for Value {
    fn into_outcome(self) -> Result<Value, Fault> {
        Ok(self)
    }
}

impl<T: PredicateOutcome> PredicateOutcome for Result<T, Fault> {
    fn into_outcome(self) -> Result<Value, Fault> {
        self.and_then(PredicateOutcome::into_outcome)
    }
}

type PredicateFn = dyn Fn(&Value) -> Result<Value, Fault> + Send + Sync;

/// A shared predicate closure.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Wraps a closure.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: PredicateOutcome,
    {
        Self(Arc::new(move |value| f(value).into_outcome()))
    }

    /// Runs the predicate.
    pub fn call(&self, value: &Value) -> Result<Value, Fault> {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A declarative check for one input parameter or output slot.
///
/// # Examples
///
/// ```
/// use nebula_contract::{Check, Rule, Value, ValueType};
///
/// let rule = Rule::from(ValueType::Int);
/// assert!(rule.check("a", &Value::from(3)).is_ok());
///
/// let err = rule.check("a", &Value::from(3.5)).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Incorrect type for variable 'a': expected int but got float instead"
/// );
///
/// let rule = Rule::shortcut("~number");
/// assert!(rule.check("a", &Value::from("foo")).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub enum Rule {
    /// No constraint.
    #[default]
    Absent,
    /// The value must be an instance of the type.
    Type(ValueType),
    /// The closure must not return `false` or raise.
    Predicate(Predicate),
    /// A named shortcut, resolved when the rule is checked.
    Shortcut(String),
    /// A named shortcut that must fail, resolved when the rule is checked.
    Negated(String),
    /// A rule value of an unrecognized kind.
    Unsupported {
        /// Type name of the offending value.
        kind: String,
    },
}

impl Rule {
    /// Builds a shortcut rule, honouring the `~` negation prefix.
    ///
    /// The name is not resolved here; unknown names fail when checked.
    pub fn shortcut(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix(Shortcut::NEGATION_PREFIX) {
            Some(inner) => Self::Negated(inner.to_owned()),
            None => Self::Shortcut(name),
        }
    }

    /// Builds a predicate rule.
    pub fn predicate<F, R>(f: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: PredicateOutcome,
    {
        Self::Predicate(Predicate::new(f))
    }

    /// Builds a type rule.
    #[must_use]
    pub const fn of_type(ty: ValueType) -> Self {
        Self::Type(ty)
    }

    /// Returns true for [`Rule::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Reads a rule from its configuration form.
    ///
    /// `null` is absent, a string is a shortcut, `{"type": "<name>"}` is a
    /// type rule. Other values become [`Rule::Unsupported`] and fail when
    /// checked.
    pub fn from_config(raw: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;

        match raw {
            Json::Null => Ok(Self::Absent),
            Json::String(name) => Ok(Self::shortcut(name)),
            Json::Object(map) if map.len() == 1 && map.contains_key("type") => {
                match &map["type"] {
                    Json::String(name) => name.parse().map(Self::Type),
                    other => Err(ContractError::config(format!(
                        "type name must be a string, not {}",
                        Value::from(other.clone()).type_name()
                    ))),
                }
            }
            other => Ok(Self::Unsupported {
                kind: Value::from(other).type_name().to_owned(),
            }),
        }
    }
}

impl Check for Rule {
    fn check(&self, argument: &str, value: &Value) -> Result<()> {
        match self {
            Self::Absent => Ok(()),
            Self::Shortcut(name) => Shortcut::lookup(name)?.check(argument, value),
            Self::Negated(name) => Negated::new(Shortcut::lookup(name)?).check(argument, value),
            Self::Type(ty) => {
                if ty.is_instance(value) {
                    Ok(())
                } else {
                    Err(ContractError::type_mismatch(
                        argument,
                        ty.name(),
                        value.type_name(),
                    ))
                }
            }
            Self::Predicate(predicate) => match predicate.call(value) {
                Err(fault) => Err(ContractError::PredicateFailed {
                    argument: argument.to_owned(),
                    fault,
                }),
                Ok(Value::Bool(false)) => Err(ContractError::InvalidValue {
                    argument: argument.to_owned(),
                    value: value.to_string(),
                }),
                Ok(_) => Ok(()),
            },
            Self::Unsupported { kind } => Err(ContractError::UnsupportedRule {
                argument: argument.to_owned(),
                kind: kind.clone(),
            }),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("None"),
            Self::Type(ty) => write!(f, "{ty}"),
            Self::Predicate(_) => f.write_str("<predicate>"),
            Self::Shortcut(name) => f.write_str(name),
            Self::Negated(name) => write!(f, "{}{name}", Shortcut::NEGATION_PREFIX),
            Self::Unsupported { kind } => write!(f, "<{kind}>"),
        }
    }
}

/// Checks `value` against `rule`, labelling failures with `argument`.
pub fn check_value(argument: &str, value: &Value, rule: &Rule) -> Result<()> {
    rule.check(argument, value)
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<ValueType> for Rule {
    fn from(ty: ValueType) -> Self {
        Self::Type(ty)
    }
}

impl From<Shortcut> for Rule {
    fn from(shortcut: Shortcut) -> Self {
        Self::Shortcut(shortcut.name().to_owned())
    }
}

impl From<NegatedShortcut> for Rule {
    fn from(negated: NegatedShortcut) -> Self {
        Self::Negated(negated.inner().name().to_owned())
    }
}

impl From<Predicate> for Rule {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl From<&str> for Rule {
    fn from(name: &str) -> Self {
        Self::shortcut(name)
    }
}

impl From<String> for Rule {
    fn from(name: String) -> Self {
        Self::shortcut(name)
    }
}

impl<R: Into<Rule>> From<Option<R>> for Rule {
    fn from(rule: Option<R>) -> Self {
        rule.map_or(Self::Absent, Into::into)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Self::from_config(raw).map_err(de::Error::custom)
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Shortcut(name) => serializer.serialize_str(name),
            Self::Negated(name) => {
                serializer.serialize_str(&format!("{}{name}", Shortcut::NEGATION_PREFIX))
            }
            Self::Type(ty) => {
                use serde::ser::SerializeMap;

                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", ty)?;
                map.end()
            }
            Self::Predicate(_) => Err(ser::Error::custom(
                "predicate rules have no configuration form",
            )),
            Self::Unsupported { kind } => Err(ser::Error::custom(format!(
                "unsupported rule of kind {kind} has no configuration form"
            ))),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, FaultKind};
    use serde_json::json;

    #[test]
    fn test_absent_is_noop() {
        assert!(Rule::Absent.check("a", &Value::from("anything")).is_ok());
    }

    #[test]
    fn test_shortcut_parses_negation() {
        assert!(matches!(Rule::shortcut("even"), Rule::Shortcut(name) if name == "even"));
        assert!(matches!(Rule::shortcut("~even"), Rule::Negated(name) if name == "even"));
    }

    #[test]
    fn test_unknown_shortcut_fails_at_check_time() {
        let rule = Rule::from("prime");
        let err = rule.check("a", &Value::from(7)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownShortcut);

        let err = Rule::from("~prime").check("a", &Value::from(7)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownShortcut);
    }

    #[test]
    fn test_predicate_false_rejects() {
        let rule = Rule::predicate(|v: &Value| v == &Value::Int(1));
        assert!(rule.check("a", &Value::from(1)).is_ok());

        let err = rule.check("a", &Value::from(1.5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueMismatch);
        assert_eq!(err.to_string(), "Invalid value for variable 'a': 1.5");
    }

    #[test]
    fn test_predicate_only_literal_false_rejects() {
        for outcome in [Value::None, Value::Int(0), Value::from(""), Value::Bool(true)] {
            let rule = Rule::predicate(move |_: &Value| outcome.clone());
            assert!(rule.check("a", &Value::None).is_ok());
        }
        assert!(Rule::predicate(|_: &Value| ()).check("a", &Value::None).is_ok());
        assert!(
            Rule::predicate(|_: &Value| None::<bool>)
                .check("a", &Value::None)
                .is_ok()
        );
    }

    #[test]
    fn test_predicate_fault_is_prefixed_and_keeps_kind() {
        let rule = Rule::predicate(|v: &Value| {
            if v == &Value::Int(1) {
                Ok(())
            } else {
                Err(Fault::value_error("input must be 1"))
            }
        });

        let err = rule.check("a", &Value::from("foo")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed validation for input 'a': input must be 1"
        );
        let ContractError::PredicateFailed { fault, .. } = err else {
            panic!("expected a predicate failure");
        };
        assert_eq!(fault.kind, FaultKind::Value);
    }

    #[test]
    fn test_unsupported_rule() {
        let rule = Rule::Unsupported { kind: "int".into() };
        let err = rule.check("a", &Value::from(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(
            err.to_string(),
            "Validator must either be a shortcut, callable, or type, not int"
        );
    }

    #[test]
    fn test_from_config() {
        assert!(Rule::from_config(json!(null)).unwrap().is_absent());
        assert!(matches!(
            Rule::from_config(json!({"type": "float"})).unwrap(),
            Rule::Type(ValueType::Float)
        ));
        assert!(matches!(
            Rule::from_config(json!("~integer")).unwrap(),
            Rule::Negated(name) if name == "integer"
        ));
        assert!(matches!(
            Rule::from_config(json!(2)).unwrap(),
            Rule::Unsupported { kind } if kind == "int"
        ));
        assert!(Rule::from_config(json!({"type": "double"})).is_err());
        assert!(Rule::from_config(json!({"type": 3})).is_err());
    }

    #[test]
    fn test_serialize_round_trips_through_config() {
        let rules = vec![
            Rule::Absent,
            Rule::shortcut("~odd"),
            Rule::of_type(ValueType::Tuple),
        ];
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(json, json!([null, "~odd", {"type": "tuple"}]));
    }

    #[test]
    fn test_predicate_does_not_serialize() {
        let rule = Rule::predicate(|_: &Value| true);
        assert!(serde_json::to_value(&rule).is_err());
    }
}
