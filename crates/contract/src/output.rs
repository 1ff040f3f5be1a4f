//! Output reconciliation
//!
//! A wrapped function returns one [`Value`]. Before output rules run, that
//! value is reconciled into a sequence:
//!
//! - with [`ExpectedCount::Opaque`] the raw result is the only output, even
//!   when it is a tuple
//! - otherwise a tuple is exploded into its elements, and anything else
//!   (lists included) is a single output
//!
//! Reconciliation only feeds validation; callers always receive the raw
//! result.

use std::fmt;
use std::slice;

use crate::error::{ContractError, Result};
use crate::value::Value;

/// Constraint on the number of reconciled outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedCount {
    /// Exactly this many outputs.
    Exact(usize),
    /// Returned tuples are single opaque outputs; the count is unchecked.
    Opaque,
}

impl ExpectedCount {
    /// Integer spelling of [`ExpectedCount::Opaque`].
    pub const SENTINEL: i64 = -1;

    /// Converts the integer form: `-1` or any non-negative count.
    pub fn from_len(len: i64) -> Result<Self> {
        if len == Self::SENTINEL {
            return Ok(Self::Opaque);
        }
        usize::try_from(len)
            .map(Self::Exact)
            .map_err(|_| ContractError::NegativeOutputCount { value: len })
    }

    /// Converts a dynamic value. `None` means no constraint.
    ///
    /// ```
    /// use nebula_contract::{ExpectedCount, Value};
    ///
    /// assert_eq!(ExpectedCount::from_value(&Value::Int(-1)).unwrap(), Some(ExpectedCount::Opaque));
    /// assert_eq!(ExpectedCount::from_value(&Value::None).unwrap(), None);
    /// assert!(ExpectedCount::from_value(&Value::Float(1.0)).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::None => Ok(None),
            Value::Int(len) => Self::from_len(*len).map(Some),
            Value::Bool(flag) => Self::from_len(i64::from(*flag)).map(Some),
            other => Err(ContractError::NonIntegerOutputCount {
                actual: other.type_name(),
            }),
        }
    }

    /// Integer form of the count.
    #[must_use]
    pub const fn as_len(self) -> i64 {
        match self {
            Self::Exact(n) => n as i64,
            Self::Opaque => Self::SENTINEL,
        }
    }

    /// Returns true for the opaque sentinel.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        matches!(self, Self::Opaque)
    }
}

impl TryFrom<i64> for ExpectedCount {
    type Error = ContractError;

    fn try_from(len: i64) -> Result<Self> {
        Self::from_len(len)
    }
}

impl fmt::Display for ExpectedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_len())
    }
}

/// Turns a raw result into the sequence output rules are matched against.
#[must_use]
pub fn reconcile(result: &Value, expected: Option<ExpectedCount>) -> &[Value] {
    match result {
        Value::Tuple(items) if expected != Some(ExpectedCount::Opaque) => items.as_slice(),
        single => slice::from_ref(single),
    }
}

/// Compares the reconciled output count with an exact expected count.
pub fn check_count(outputs: &[Value], expected: Option<ExpectedCount>) -> Result<()> {
    match expected {
        Some(ExpectedCount::Exact(n)) if n != outputs.len() => Err(ContractError::OutputCount {
            expected: n,
            actual: outputs.len(),
        }),
        _ => Ok(()),
    }
}

/// Label used for the output at `index` in error messages.
#[must_use]
pub fn output_label(index: usize) -> String {
    format!("Output {index}")
}
