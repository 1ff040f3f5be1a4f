//! Built-in shortcut checks
//!
//! Shortcuts are named, pre-built checks resolved from a fixed registry:
//!
//! | Name      | Passes when                                           |
//! |-----------|-------------------------------------------------------|
//! | `number`  | the value is an `int` or `float` (never a `bool`)     |
//! | `integer` | the value is an `int`; `1.0` fails, `bool` fails      |
//! | `even`    | `integer` passes and the value is divisible by 2      |
//! | `odd`     | `integer` passes and `value mod 2 == 1` (floor modulo)|
//!
//! Any shortcut can be negated with a `~` prefix, see
//! [`Negated`](crate::check::Negated).

use std::fmt;
use std::str::FromStr;

use crate::check::{Check, Negated};
use crate::error::{ContractError, Result};
use crate::value::Value;

/// A named built-in check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    Number,
    Integer,
    Even,
    Odd,
}

/// A shortcut that must fail for the check to pass.
pub type NegatedShortcut = Negated<Shortcut>;

impl Shortcut {
    /// The registry, in lookup order.
    pub const ALL: [Self; 4] = [Self::Number, Self::Integer, Self::Even, Self::Odd];

    /// Prefix marking a negated shortcut name.
    pub const NEGATION_PREFIX: char = '~';

    /// Registered name of the shortcut.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Even => "even",
            Self::Odd => "odd",
        }
    }

    /// Resolves a registered name.
    pub fn lookup(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|shortcut| shortcut.name() == name)
            .ok_or_else(|| ContractError::unknown_shortcut(name))
    }

    fn require_number(argument: &str, value: &Value) -> Result<()> {
        match value {
            Value::Int(_) | Value::Float(_) => Ok(()),
            other => Err(ContractError::ShortcutTypeMismatch {
                argument: argument.to_owned(),
                expected: "a number",
                actual: other.type_name(),
            }),
        }
    }

    fn require_integer(argument: &str, value: &Value) -> Result<i64> {
        match value {
            Value::Int(i) => Ok(*i),
            other => Err(ContractError::ShortcutTypeMismatch {
                argument: argument.to_owned(),
                expected: "an integer",
                actual: other.type_name(),
            }),
        }
    }

    fn require_remainder(
        argument: &str,
        value: &Value,
        remainder: i64,
        expected: &'static str,
    ) -> Result<()> {
        let integer = Self::require_integer(argument, value)?;
        if integer.rem_euclid(2) == remainder {
            Ok(())
        } else {
            Err(ContractError::ShortcutValueMismatch {
                argument: argument.to_owned(),
                expected,
            })
        }
    }
}

impl Check for Shortcut {
    fn check(&self, argument: &str, value: &Value) -> Result<()> {
        match self {
            Self::Number => Self::require_number(argument, value),
            Self::Integer => Self::require_integer(argument, value).map(drop),
            Self::Even => Self::require_remainder(argument, value, 0, "an even integer"),
            Self::Odd => Self::require_remainder(argument, value, 1, "an odd integer"),
        }
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shortcut {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s)
    }
}

/// Resolves a shortcut by its registered name.
///
/// # Examples
///
/// ```
/// use nebula_contract::{Check, Value, get_shortcut};
///
/// let even = get_shortcut("even").unwrap();
/// assert!(even.check("a", &Value::from(4)).is_ok());
/// assert!(get_shortcut("prime").is_err());
/// ```
pub fn get_shortcut(name: &str) -> Result<Shortcut> {
    Shortcut::lookup(name)
}

/// Resolves a shortcut name and wraps it in a negation.
pub fn negated_shortcut(name: &str) -> Result<NegatedShortcut> {
    Shortcut::lookup(name).map(Negated::new)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckExt;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from(2))]
    #[case(Value::from(-1))]
    #[case(Value::from(1.5))]
    #[case(Value::from(-36.4))]
    #[case(Value::from(99))]
    fn test_valid_number(#[case] value: Value) {
        assert!(Shortcut::Number.check("x", &value).is_ok());
    }

    #[rstest]
    #[case(Value::list([1, 2]), "list")]
    #[case(Value::from("foo"), "str")]
    #[case(Value::tuple([1, 2]), "tuple")]
    #[case(Value::None, "NoneType")]
    #[case(Value::from(false), "bool")]
    fn test_invalid_number(#[case] value: Value, #[case] actual: &str) {
        let err = Shortcut::Number.check("x", &value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.to_string(), format!("Expected a number but got: '{actual}'"));
    }

    #[rstest]
    #[case(Value::from(1.0))]
    #[case(Value::from(true))]
    #[case(Value::from("1"))]
    fn test_invalid_integer(#[case] value: Value) {
        let err = Shortcut::Integer.check("x", &value).unwrap_err();
        assert!(err.to_string().starts_with("Expected an integer but got"));
    }

    #[test]
    fn test_even() {
        assert!(Shortcut::Even.check("x", &Value::from(0)).is_ok());
        assert!(Shortcut::Even.check("x", &Value::from(-4)).is_ok());

        let err = Shortcut::Even.check("x", &Value::from(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueMismatch);
        assert_eq!(err.to_string(), "Expected an even integer");

        let err = Shortcut::Even.check("x", &Value::from(2.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_odd_uses_floor_modulo() {
        assert!(Shortcut::Odd.check("x", &Value::from(1)).is_ok());
        assert!(Shortcut::Odd.check("x", &Value::from(-1)).is_ok());
        assert!(Shortcut::Odd.check("x", &Value::from(-7)).is_ok());
        assert!(Shortcut::Odd.check("x", &Value::Int(i64::MIN + 1)).is_ok());

        let err = Shortcut::Odd.check("x", &Value::from(-2)).unwrap_err();
        assert_eq!(err.to_string(), "Expected an odd integer");
    }

    #[test]
    fn test_lookup() {
        for shortcut in Shortcut::ALL {
            assert_eq!(get_shortcut(shortcut.name()).unwrap(), shortcut);
        }

        let err = get_shortcut("prime").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownShortcut);
        assert_eq!(err.to_string(), "Unknown shortcut: 'prime'");
    }

    #[test]
    fn test_negated_number() {
        let check = Shortcut::Number.negate();
        assert!(check.check("a", &Value::from("foo")).is_ok());
        assert!(check.check("a", &Value::tuple([1, 2, 3])).is_ok());

        let err = check.check("a", &Value::from(1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation for 'number' passed when it shouldn't have"
        );
    }

    #[test]
    fn test_negated_even_accepts_odd_and_non_integers() {
        let check = negated_shortcut("even").unwrap();
        assert!(check.check("a", &Value::from(3)).is_ok());
        assert!(check.check("a", &Value::from(2.0)).is_ok());
        assert!(check.check("a", &Value::from(2)).is_err());
    }

    #[test]
    fn test_negated_unknown_shortcut() {
        assert!(negated_shortcut("prime").is_err());
    }
}
