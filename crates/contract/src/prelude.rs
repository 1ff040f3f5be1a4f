//! Prelude module for convenient imports.
//!
//! `use nebula_contract::prelude::*;` brings in the types needed to wrap a
//! function, declare its rules and call it.

// ============================================================================
// VALUES AND CALLS
// ============================================================================

pub use crate::args::Args;
pub use crate::signature::Signature;
pub use crate::value::{Value, ValueType};

// ============================================================================
// RULES AND CHECKS
// ============================================================================

pub use crate::check::{Check, CheckExt, Negated, negate};
pub use crate::rule::{Predicate, PredicateOutcome, Rule};
pub use crate::shortcut::{NegatedShortcut, Shortcut, get_shortcut};

// ============================================================================
// WRAPPING
// ============================================================================

pub use crate::config::ContractConfig;
pub use crate::decorator::{
    InputValidators, IntoValidated, OutputValidators, validate_inputs, validate_outputs,
};
pub use crate::function::{Function, ValidatedFunction};
pub use crate::output::ExpectedCount;

// ============================================================================
// ERRORS
// ============================================================================

pub use crate::error::{ContractError, ErrorKind, Fault, FaultKind, Result};

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{args, inputs};
