//! Error types for contract failures
//!
//! Every failure raised by a wrapped call is a [`ContractError`]. Variants
//! carry structured context (argument name, expected and actual type names)
//! and render through fixed message templates, so callers can either match
//! on the variant or on the rendered text.
//!
//! Errors raised *inside* user code (a predicate rule or the wrapped
//! function body) are described by a [`Fault`], which keeps the kind of the
//! original failure.

use std::borrow::Cow;
use std::fmt;

/// Result alias used across the crate.
pub type Result<T, E = ContractError> = std::result::Result<T, E>;

// ============================================================================
// FAULTS RAISED BY USER CODE
// ============================================================================

/// The kind of failure raised inside a predicate or a wrapped function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The value had the wrong type for the operation.
    Type,
    /// The value had the right type but an unacceptable value.
    Value,
    /// Arithmetic failure such as a division by zero.
    Arithmetic,
    /// Anything else.
    Runtime,
}

impl FaultKind {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Value => "value",
            Self::Arithmetic => "arithmetic",
            Self::Runtime => "runtime",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error raised by user code, carrying its kind and message.
///
/// # Examples
///
/// ```
/// use nebula_contract::{Fault, FaultKind};
///
/// let fault = Fault::value_error("input must be 1");
/// assert_eq!(fault.kind, FaultKind::Value);
/// assert_eq!(fault.to_string(), "input must be 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Fault {
    /// What kind of failure this is.
    pub kind: FaultKind,
    /// Human-readable message.
    pub message: Cow<'static, str>,
}

impl Fault {
    /// Creates a fault of the given kind.
    pub fn new(kind: FaultKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a [`FaultKind::Type`] fault.
    pub fn type_error(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FaultKind::Type, message)
    }

    /// Creates a [`FaultKind::Value`] fault.
    pub fn value_error(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FaultKind::Value, message)
    }

    /// Creates a [`FaultKind::Arithmetic`] fault.
    pub fn arithmetic(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FaultKind::Arithmetic, message)
    }

    /// Creates a [`FaultKind::Runtime`] fault.
    pub fn runtime(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FaultKind::Runtime, message)
    }
}

// ============================================================================
// ERROR TAXONOMY
// ============================================================================

/// Coarse classification of a [`ContractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The function handed to the wrapper is malformed.
    Construction,
    /// A positional argument's parameter was also supplied by keyword.
    DuplicateArgument,
    /// A value's runtime type did not match.
    TypeMismatch,
    /// A value had the right type but failed a check.
    ValueMismatch,
    /// The number of returned values did not match the expected count.
    Arity,
    /// A rule, rule table or expected count was configured incorrectly.
    Configuration,
    /// A shortcut name is not in the registry.
    UnknownShortcut,
    /// A predicate rule itself raised.
    Propagated,
    /// The wrapped function body failed.
    Call,
}

// ============================================================================
// CONTRACT ERROR
// ============================================================================

/// Error raised while building a contract or calling a wrapped function.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ContractError {
    /// The function or its signature cannot be wrapped.
    #[error("Invalid function parameter provided")]
    InvalidFunction {
        /// Why the function was rejected.
        reason: String,
    },

    /// A positional argument collides with a keyword argument.
    #[error("{function}() got multiple values for argument '{argument}'")]
    DuplicateArgument { function: String, argument: String },

    /// A parameter was supplied neither positionally nor by keyword.
    ///
    /// `function` is empty until the error leaves [`Function::call`](crate::Function::call).
    #[error("{}missing required argument: '{argument}'", call_prefix(.function))]
    MissingArgument { function: String, argument: String },

    /// A type rule failed.
    #[error(
        "Incorrect type for variable '{argument}': expected {expected} but got {actual} instead"
    )]
    TypeMismatch {
        argument: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A predicate rule returned `false`.
    #[error("Invalid value for variable '{argument}': {value}")]
    InvalidValue { argument: String, value: String },

    /// A shortcut rejected the value's type.
    #[error("Expected {expected} but got: '{actual}'")]
    ShortcutTypeMismatch {
        argument: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A shortcut accepted the type but rejected the value.
    #[error("Expected {expected}")]
    ShortcutValueMismatch {
        argument: String,
        expected: &'static str,
    },

    /// A negated shortcut accepted the value.
    #[error("Validation for '{shortcut}' passed when it shouldn't have")]
    NegationPassed { argument: String, shortcut: String },

    /// A predicate rule raised a fault.
    #[error("Failed validation for input '{argument}': {fault}")]
    PredicateFailed {
        argument: String,
        #[source]
        fault: Fault,
    },

    /// The number of reconciled outputs differs from the expected count.
    #[error("Expected {expected} items returned but got {actual}")]
    OutputCount { expected: usize, actual: usize },

    /// A rule value is not a shortcut, predicate or type.
    #[error("Validator must either be a shortcut, callable, or type, not {kind}")]
    UnsupportedRule { argument: String, kind: String },

    /// The expected output count is not an integer.
    #[error("Expected an integer for expected output length")]
    NonIntegerOutputCount { actual: &'static str },

    /// The expected output count is negative and not the `-1` sentinel.
    #[error("Expected output length must be positive or -1")]
    NegativeOutputCount { value: i64 },

    /// An input rule was registered twice for the same parameter.
    #[error("Validator(s) for input '{argument}' already set.")]
    DuplicateRule { argument: String },

    /// A shortcut name is not registered.
    #[error("Unknown shortcut: '{name}'")]
    UnknownShortcut { name: String },

    /// A declarative contract could not be read.
    #[error("Invalid contract configuration: {message}")]
    Config { message: String },

    /// The wrapped function body raised a fault.
    #[error(transparent)]
    Call(#[from] Fault),
}

// ============================================================================
// CONSTRUCTOR HELPERS
// ============================================================================

impl ContractError {
    /// Creates an invalid-function error.
    pub fn invalid_function(reason: impl Into<String>) -> Self {
        Self::InvalidFunction {
            reason: reason.into(),
        }
    }

    /// Creates a type-mismatch error.
    pub fn type_mismatch(
        argument: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            argument: argument.into(),
            expected,
            actual,
        }
    }

    /// Creates an unknown-shortcut error.
    pub fn unknown_shortcut(name: impl Into<String>) -> Self {
        Self::UnknownShortcut { name: name.into() }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns the taxonomy bucket of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFunction { .. } => ErrorKind::Construction,
            Self::DuplicateArgument { .. } => ErrorKind::DuplicateArgument,
            Self::TypeMismatch { .. } | Self::ShortcutTypeMismatch { .. } => {
                ErrorKind::TypeMismatch
            }
            Self::InvalidValue { .. }
            | Self::ShortcutValueMismatch { .. }
            | Self::NegationPassed { .. } => ErrorKind::ValueMismatch,
            Self::OutputCount { .. } => ErrorKind::Arity,
            Self::UnsupportedRule { .. }
            | Self::NonIntegerOutputCount { .. }
            | Self::NegativeOutputCount { .. }
            | Self::DuplicateRule { .. }
            | Self::Config { .. } => ErrorKind::Configuration,
            Self::UnknownShortcut { .. } => ErrorKind::UnknownShortcut,
            Self::PredicateFailed { .. } => ErrorKind::Propagated,
            Self::MissingArgument { .. } | Self::Call(_) => ErrorKind::Call,
        }
    }

    /// Returns the argument label the error is about, if any.
    ///
    /// Output failures use labels of the form `Output <index>`.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::DuplicateArgument { argument, .. }
            | Self::MissingArgument { argument, .. }
            | Self::TypeMismatch { argument, .. }
            | Self::InvalidValue { argument, .. }
            | Self::ShortcutTypeMismatch { argument, .. }
            | Self::ShortcutValueMismatch { argument, .. }
            | Self::NegationPassed { argument, .. }
            | Self::PredicateFailed { argument, .. }
            | Self::UnsupportedRule { argument, .. }
            | Self::DuplicateRule { argument } => Some(argument),
            _ => None,
        }
    }

    /// Names the function a missing argument belongs to, if not yet named.
    #[must_use]
    pub fn in_function(self, name: &str) -> Self {
        match self {
            Self::MissingArgument { function, argument } if function.is_empty() => {
                Self::MissingArgument {
                    function: name.to_owned(),
                    argument,
                }
            }
            other => other,
        }
    }

    /// Returns true for plain type or value mismatches.
    ///
    /// These are the failures a negated check swallows. A negation that
    /// itself passed is not recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::TypeMismatch { .. }
            | Self::InvalidValue { .. }
            | Self::ShortcutTypeMismatch { .. }
            | Self::ShortcutValueMismatch { .. } => true,
            Self::PredicateFailed { fault, .. } => {
                matches!(fault.kind, FaultKind::Type | FaultKind::Value)
            }
            _ => false,
        }
    }
}

fn call_prefix(function: &str) -> String {
    if function.is_empty() {
        String::new()
    } else {
        format!("{function}() ")
    }
}

// ============================================================================
// TESTS
// ============================================================================
