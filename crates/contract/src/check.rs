//! The [`Check`] trait and the negation combinator
//!
//! Anything that can accept or reject a single labelled value implements
//! [`Check`]: built-in shortcuts, whole rules, and [`Negated`] wrappers.
//!
//! # Examples
//!
//! ```
//! use nebula_contract::{Check, CheckExt, Shortcut, Value};
//!
//! let not_a_number = Shortcut::Number.negate();
//! assert!(not_a_number.check("a", &Value::from("foo")).is_ok());
//! assert!(not_a_number.check("a", &Value::from(1)).is_err());
//! ```

use std::fmt;

use crate::error::{ContractError, Result};
use crate::value::Value;

/// A check applied to one labelled value.
///
/// `argument` is the parameter name for inputs and `Output <index>` for
/// outputs; it only feeds error messages.
pub trait Check {
    /// Accepts or rejects `value`.
    fn check(&self, argument: &str, value: &Value) -> Result<()>;
}

/// Extension methods for every [`Check`].
pub trait CheckExt: Check + Sized {
    /// Inverts the check; see [`Negated`].
    fn negate(self) -> Negated<Self> {
        Negated::new(self)
    }
}

impl<T: Check> CheckExt for T {}

impl<C: Check + ?Sized> Check for &C {
    fn check(&self, argument: &str, value: &Value) -> Result<()> {
        (**self).check(argument, value)
    }
}

// ============================================================================
// NEGATION
// ============================================================================

/// Inverts a check.
///
/// - If the inner check fails with a recoverable type or value mismatch,
///   `Negated` passes
/// - If the inner check passes, `Negated` fails with
///   [`ContractError::NegationPassed`], naming the inner check by its
///   `Display` form
/// - Any other error propagates unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Negated<C> {
    inner: C,
}

impl<C> Negated<C> {
    /// Creates a new `Negated` combinator.
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Returns a reference to the inner check.
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// Extracts the inner check.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> Check for Negated<C>
where
    C: Check + fmt::Display,
{
    fn check(&self, argument: &str, value: &Value) -> Result<()> {
        match self.inner.check(argument, value) {
            Ok(()) => Err(ContractError::NegationPassed {
                argument: argument.to_owned(),
                shortcut: self.inner.to_string(),
            }),
            Err(error) if error.is_recoverable() => Ok(()),
            Err(error) => Err(error),
        }
    }
}

impl<C: fmt::Display> fmt::Display for Negated<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{}", self.inner)
    }
}

/// Creates a [`Negated`] combinator.
pub const fn negate<C>(check: C) -> Negated<C> {
    Negated::new(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Fault};

    struct Fails(ContractError);

    impl fmt::Display for Fails {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("fails")
        }
    }

    impl Check for Fails {
        fn check(&self, _argument: &str, _value: &Value) -> Result<()> {
            Err(self.0.clone())
        }
    }

    struct Passes;

    impl fmt::Display for Passes {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("passes")
        }
    }

    impl Check for Passes {
        fn check(&self, _argument: &str, _value: &Value) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_negate_swallows_type_mismatch() {
        let check = negate(Fails(ContractError::type_mismatch("a", "int", "str")));
        assert!(check.check("a", &Value::None).is_ok());
    }

    #[test]
    fn test_negate_rejects_pass() {
        let err = Passes.negate().check("b", &Value::None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueMismatch);
        assert_eq!(err.argument(), Some("b"));
        assert_eq!(
            err.to_string(),
            "Validation for 'passes' passed when it shouldn't have"
        );
    }

    #[test]
    fn test_negate_propagates_other_errors() {
        let check = negate(Fails(ContractError::Call(Fault::arithmetic("boom"))));
        let err = check.check("a", &Value::None).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_double_negation_does_not_cancel() {
        // The inner negation's failure is not recoverable.
        let check = Passes.negate().negate();
        assert!(check.check("a", &Value::None).is_err());
    }

    #[test]
    fn test_display_prefixes_tilde() {
        assert_eq!(Passes.negate().to_string(), "~passes");
    }
}
