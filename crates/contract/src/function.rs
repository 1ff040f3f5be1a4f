//! The validated function wrapper
//!
//! A [`Function`] is a plain callable: a [`Signature`] plus a closure over
//! [`Args`]. Wrapping it in a [`ValidatedFunction`] attaches input rules
//! (one per parameter name), positional output rules and an optional
//! [`ExpectedCount`]. Rules are registered while the contract is being
//! built; a call only reads them.
//!
//! # Call sequence
//!
//! 1. Positional arguments are mapped to the declared parameter names by
//!    index. Positionals past the last declared name belong to the
//!    variadic capture, if any, and are not checked. A positional whose name
//!    is also given by keyword is a duplicate argument.
//! 2. Every keyword argument is checked against the rule for its name.
//! 3. The function runs with the original arguments.
//! 4. The result is reconciled (see [`crate::output`]), its length checked
//!    against an exact expected count, and each output checked against the
//!    rule at its index. Rules past the last output are unused.
//! 5. The raw result is returned.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use smallvec::SmallVec;

use crate::args::Args;
use crate::check::Check;
use crate::error::{ContractError, Result};
use crate::output::{self, ExpectedCount};
use crate::rule::Rule;
use crate::signature::Signature;
use crate::value::Value;

type Body = dyn Fn(&Args) -> Result<Value> + Send + Sync;

// ============================================================================
// PLAIN FUNCTION
// ============================================================================

/// A callable with a declared signature and no contract.
///
/// # Examples
///
/// ```
/// use nebula_contract::{Function, Signature, Value, args};
///
/// let double = Function::new(Signature::new("double").param("a"), |args| {
///     let a = args.get(0, "a")?.as_int().unwrap_or_default();
///     Ok(Value::Int(a * 2))
/// });
/// assert_eq!(double.call(&args![4]).unwrap(), Value::Int(8));
/// ```
pub struct Function {
    signature: Signature,
    body: Box<Body>,
}

impl Function {
    /// Creates a function from its signature and body.
    pub fn new<F, R>(signature: Signature, body: F) -> Self
    where
        F: Fn(&Args) -> Result<R> + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self {
            signature,
            body: Box::new(move |args| body(args).map(Into::into)),
        }
    }

    /// Creates a function from a textual signature such as `"f(a, *rest)"`.
    pub fn parse<F, R>(signature: &str, body: F) -> Result<Self>
    where
        F: Fn(&Args) -> Result<R> + Send + Sync + 'static,
        R: Into<Value>,
    {
        Ok(Self::new(signature.parse()?, body))
    }

    /// The declared signature.
    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Calls the body without any validation.
    pub fn call(&self, args: &Args) -> Result<Value> {
        (self.body)(args).map_err(|error| error.in_function(self.signature.name()))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// VALIDATED FUNCTION
// ============================================================================

/// A function wrapped with input and output rules.
///
/// Built by the decorators in [`crate::decorator`] or directly with
/// [`ValidatedFunction::new`] and the `update_*` mutators.
///
/// # Examples
///
/// ```
/// use nebula_contract::{Function, Signature, Value, ValidatedFunction, ValueType, args};
///
/// let f = Function::new(Signature::new("inc").param("a"), |args| {
///     Ok(Value::Int(args.get(0, "a")?.as_int().unwrap_or_default() + 1))
/// });
///
/// let mut wrapped = ValidatedFunction::new(f).unwrap();
/// wrapped.update_input_validators([("a", ValueType::Int)]).unwrap();
///
/// assert_eq!(wrapped.call(&args![3]).unwrap(), Value::Int(4));
/// assert!(wrapped.call(&args![3.5]).is_err());
/// ```
pub struct ValidatedFunction {
    function: Function,
    param_names: SmallVec<[String; 4]>,
    input_rules: IndexMap<String, Rule>,
    output_rules: Vec<Rule>,
    expected_count: Option<ExpectedCount>,
}

impl ValidatedFunction {
    /// Wraps a function, capturing its parameter names.
    ///
    /// Fails with "Invalid function parameter provided" when the signature
    /// is malformed.
    pub fn new(function: Function) -> Result<Self> {
        function.signature().validate()?;

        let param_names = function
            .signature()
            .parameter_names()
            .into_iter()
            .map(str::to_owned)
            .collect::<SmallVec<[String; 4]>>();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            function = function.signature().name(),
            params = ?param_names,
            "wrapped function for contract validation"
        );

        Ok(Self {
            function,
            param_names,
            input_rules: IndexMap::new(),
            output_rules: Vec::new(),
            expected_count: None,
        })
    }

    /// Name of the wrapped function.
    #[must_use]
    pub fn name(&self) -> &str {
        self.function.signature().name()
    }

    /// Signature of the wrapped function.
    #[must_use]
    pub const fn signature(&self) -> &Signature {
        self.function.signature()
    }

    /// Parameter names captured at construction, including the `*args` and
    /// `**kwargs` capture names.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// The rule registered for a parameter.
    #[must_use]
    pub fn input_rule(&self, name: &str) -> Option<&Rule> {
        self.input_rules.get(name)
    }

    /// All input rules in registration order.
    #[must_use]
    pub const fn input_rules(&self) -> &IndexMap<String, Rule> {
        &self.input_rules
    }

    /// Output rules by position.
    #[must_use]
    pub fn output_rules(&self) -> &[Rule] {
        &self.output_rules
    }

    /// The expected output count, if any.
    #[must_use]
    pub const fn expected_count(&self) -> Option<ExpectedCount> {
        self.expected_count
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Merges input rules.
    ///
    /// Once a parameter has a rule it cannot be replaced: registering a
    /// second rule for the same name fails with
    /// [`ContractError::DuplicateRule`] and leaves the existing rules
    /// untouched.
    pub fn update_input_validators<I, K, R>(&mut self, rules: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Into<Rule>,
    {
        let mut staged: IndexMap<String, Rule> = IndexMap::new();
        for (name, rule) in rules {
            let name = name.into();
            if self.input_rules.contains_key(&name) {
                return Err(ContractError::DuplicateRule { argument: name });
            }
            match staged.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(ContractError::DuplicateRule {
                        argument: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(rule.into());
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            function = self.name(),
            rules = ?staged.keys().collect::<Vec<_>>(),
            "registered input rules"
        );

        self.input_rules.extend(staged);
        Ok(())
    }

    /// Appends output rules after the existing ones.
    pub fn update_output_validators<I, R>(&mut self, rules: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        let before = self.output_rules.len();
        self.output_rules.extend(rules.into_iter().map(Into::into));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            function = self.name(),
            added = self.output_rules.len() - before,
            total = self.output_rules.len(),
            "registered output rules"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = before;
    }

    /// Sets the expected output count from its integer form.
    ///
    /// `None` removes the constraint, `-1` makes returned tuples opaque, any
    /// other negative value is rejected. The last call wins.
    pub fn update_expected_output_len(&mut self, len: Option<i64>) -> Result<()> {
        let count = len.map(ExpectedCount::from_len).transpose()?;
        self.set_expected_count(count);
        Ok(())
    }

    /// Sets the expected output count from a dynamic value.
    ///
    /// Anything but an integer or `None` is rejected.
    pub fn update_expected_output_len_from(&mut self, len: &Value) -> Result<()> {
        let count = ExpectedCount::from_value(len)?;
        self.set_expected_count(count);
        Ok(())
    }

    /// Sets the expected output count.
    pub fn set_expected_count(&mut self, count: Option<ExpectedCount>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            function = self.name(),
            expected = ?count,
            "set expected output count"
        );

        self.expected_count = count;
    }

    // ------------------------------------------------------------------------
    // Calling
    // ------------------------------------------------------------------------

    /// Validates the inputs, calls the function, validates the outputs and
    /// returns the raw result.
    pub fn call(&self, args: &Args) -> Result<Value> {
        self.validate_inputs(args)
            .inspect_err(|error| self.report("input", error))?;

        let result = self.function.call(args)?;

        let outputs = output::reconcile(&result, self.expected_count);
        self.validate_outputs(outputs)
            .inspect_err(|error| self.report("output", error))?;

        #[cfg(feature = "tracing")]
        tracing::trace!(function = self.name(), outputs = outputs.len(), "call validated");

        Ok(result)
    }

    fn validate_inputs(&self, args: &Args) -> Result<()> {
        let declared = self.signature().params_declared();

        for (index, value) in args.positional().iter().enumerate() {
            // Capture names never bind positionals.
            let Some(name) = declared.get(index) else {
                break;
            };

            if args.keyword(name).is_some() {
                return Err(ContractError::DuplicateArgument {
                    function: self.name().to_owned(),
                    argument: name.clone(),
                });
            }

            self.check_input(name, value)?;
        }

        for (name, value) in args.keywords() {
            self.check_input(name, value)?;
        }

        Ok(())
    }

    fn check_input(&self, name: &str, value: &Value) -> Result<()> {
        match self.input_rules.get(name) {
            Some(rule) => rule.check(name, value),
            None => Ok(()),
        }
    }

    fn validate_outputs(&self, outputs: &[Value]) -> Result<()> {
        output::check_count(outputs, self.expected_count)?;

        for (index, (rule, value)) in self.output_rules.iter().zip(outputs).enumerate() {
            rule.check(&output::output_label(index), value)?;
        }

        Ok(())
    }

    fn report(&self, phase: &'static str, error: &ContractError) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            function = self.name(),
            phase,
            kind = ?error.kind(),
            argument = error.argument(),
            %error,
            "contract violated"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (phase, error);
    }
}

impl fmt::Debug for ValidatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedFunction")
            .field("signature", self.signature())
            .field("input_rules", &self.input_rules)
            .field("output_rules", &self.output_rules)
            .field("expected_count", &self.expected_count)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
