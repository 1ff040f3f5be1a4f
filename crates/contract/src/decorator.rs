//! Decorators that attach rules to a function
//!
//! [`validate_inputs`] and [`validate_outputs`] build small descriptors
//! whose `apply` either wraps a plain [`Function`] or merges into an
//! existing [`ValidatedFunction`]. Applying several decorators to the same
//! function therefore yields one wrapper holding all of their rules:
//!
//! ```
//! use nebula_contract::{Function, Signature, Value, ValueType, args, validate_inputs};
//!
//! let f = Function::new(Signature::new("add").params(["a", "b"]), |args| {
//!     let a = args.get(0, "a")?.as_int().unwrap_or_default();
//!     let b = args.get(1, "b")?.as_int().unwrap_or_default();
//!     Ok(Value::Int(a + b))
//! });
//!
//! let f = validate_inputs([("a", ValueType::Int)]).apply(f).unwrap();
//! let f = validate_inputs([("b", ValueType::Int)]).apply(f).unwrap();
//!
//! assert_eq!(f.call(&args![1, 2]).unwrap(), Value::Int(3));
//! assert!(f.call(&args![1, 2.0]).is_err());
//! ```

use crate::error::Result;
use crate::function::{Function, ValidatedFunction};
use crate::output::ExpectedCount;
use crate::rule::Rule;

/// Something a decorator can be applied to.
pub trait IntoValidated {
    /// Returns the wrapper the decorator merges its rules into.
    fn into_validated(self) -> Result<ValidatedFunction>;
}

impl IntoValidated for ValidatedFunction {
    fn into_validated(self) -> Result<ValidatedFunction> {
        Ok(self)
    }
}

impl IntoValidated for Function {
    fn into_validated(self) -> Result<ValidatedFunction> {
        ValidatedFunction::new(self)
    }
}

// ============================================================================
// INPUTS
// ============================================================================

/// Input rules waiting to be applied.
///
/// Pairs are kept as given, so a name listed twice is reported when the set
/// is applied rather than overwritten here.
#[derive(Debug, Clone, Default)]
pub struct InputValidators {
    rules: Vec<(String, Rule)>,
}

impl InputValidators {
    /// Adds a rule for a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.rules.push((name.into(), rule.into()));
        self
    }

    /// The collected `(name, rule)` pairs in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[(String, Rule)] {
        &self.rules
    }

    /// Merges the rules into `target`.
    ///
    /// Fails with [`ContractError::DuplicateRule`](crate::ContractError::DuplicateRule)
    /// if a parameter appears twice in this set or `target` already has a
    /// rule for it.
    pub fn apply(self, target: impl IntoValidated) -> Result<ValidatedFunction> {
        let mut validated = target.into_validated()?;
        validated.update_input_validators(self.rules)?;
        Ok(validated)
    }
}

/// Declares input rules keyed by parameter name.
///
/// Parameters without a rule are not checked, and rules for names the
/// function does not declare are never consulted.
pub fn validate_inputs<I, K, R>(rules: I) -> InputValidators
where
    I: IntoIterator<Item = (K, R)>,
    K: Into<String>,
    R: Into<Rule>,
{
    InputValidators {
        rules: rules
            .into_iter()
            .map(|(name, rule)| (name.into(), rule.into()))
            .collect(),
    }
}

// ============================================================================
// OUTPUTS
// ============================================================================

/// Output rules and count waiting to be applied.
#[derive(Debug, Clone, Default)]
pub struct OutputValidators {
    count: Option<i64>,
    rules: Vec<Rule>,
}

impl OutputValidators {
    /// Appends a rule for the next output position.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// The expected count in its integer form.
    #[must_use]
    pub const fn count(&self) -> Option<i64> {
        self.count
    }

    /// The collected rules by position.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Sets the expected count on `target` and appends the rules after its
    /// existing output rules.
    ///
    /// The count always overwrites, so `None` clears a count set by an
    /// earlier decorator.
    pub fn apply(self, target: impl IntoValidated) -> Result<ValidatedFunction> {
        let count = self.count.map(ExpectedCount::from_len).transpose()?;
        let mut validated = target.into_validated()?;
        validated.set_expected_count(count);
        validated.update_output_validators(self.rules);
        Ok(validated)
    }
}

/// Declares the expected output count and positional output rules.
///
/// `count` is `None` for no constraint, `-1` to treat a returned tuple as a
/// single output, or the exact number of outputs.
///
/// ```
/// use nebula_contract::{Function, Signature, Value, args, validate_outputs};
///
/// let pair = Function::new(Signature::new("pair"), |_| Ok(Value::tuple([1, 2])));
/// let pair = validate_outputs(Some(2), ["odd", "even"]).apply(pair).unwrap();
/// assert!(pair.call(&args![]).is_ok());
/// ```
pub fn validate_outputs<I, R>(count: Option<i64>, rules: I) -> OutputValidators
where
    I: IntoIterator<Item = R>,
    R: Into<Rule>,
{
    OutputValidators {
        count,
        rules: rules.into_iter().map(Into::into).collect(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::signature::Signature;
    use crate::value::{Value, ValueType};

    fn constant(value: Value) -> Function {
        Function::new(Signature::new("constant"), move |_| Ok(value.clone()))
    }

    #[test]
    fn test_stacked_outputs_append() {
        let f = validate_outputs(None, [ValueType::Int])
            .apply(constant(Value::tuple([1, 2])))
            .unwrap();
        let f = validate_outputs(None, [ValueType::Int]).apply(f).unwrap();
        assert_eq!(f.output_rules().len(), 2);
    }

    #[test]
    fn test_outer_count_overwrites() {
        let f = validate_outputs(Some(3), Vec::<Rule>::new())
            .apply(constant(Value::tuple([1, 2])))
            .unwrap();
        let f = validate_outputs(None, Vec::<Rule>::new()).apply(f).unwrap();
        assert_eq!(f.expected_count(), None);
    }

    #[test]
    fn test_invalid_count_fails_before_wrapping() {
        let err = validate_outputs(Some(-5), Vec::<Rule>::new())
            .apply(constant(Value::None))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_repeated_name_is_kept_until_applied() {
        let inputs = InputValidators::default().rule("a", "even").rule("a", "odd");
        assert_eq!(inputs.rules().len(), 2);

        let err = inputs.apply(constant(Value::None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_builder_methods() {
        let inputs = InputValidators::default().rule("a", "even").rule("b", ValueType::Str);
        assert_eq!(inputs.rules().len(), 2);

        let outputs = OutputValidators::default().rule("odd");
        assert_eq!(outputs.rules().len(), 1);
        assert_eq!(outputs.count(), None);
    }
}
