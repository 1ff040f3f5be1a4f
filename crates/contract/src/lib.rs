//! # nebula-contract
//!
//! Input and output contracts for wrapped functions.
//!
//! A function is wrapped once and given rules: one per parameter name for
//! its inputs, one per position for its outputs, plus an optional expected
//! output count. Every call checks the arguments, runs the function, checks
//! what it returned and hands back the raw result.
//!
//! ## Quick Start
//!
//! ```
//! use nebula_contract::prelude::*;
//!
//! let inc = Function::new(Signature::new("inc").param("a"), |args| {
//!     Ok(Value::Int(args.get(0, "a")?.as_int().unwrap_or_default() + 1))
//! });
//!
//! let inc = validate_inputs([("a", ValueType::Int)]).apply(inc).unwrap();
//! let inc = validate_outputs(None, ["even"]).apply(inc).unwrap();
//!
//! assert_eq!(inc.call(&args![1]).unwrap(), Value::Int(2));
//! assert!(inc.call(&args![2]).is_err());
//! assert!(inc.call(&args![1.0]).is_err());
//! ```
//!
//! ## Rules
//!
//! - **Type**: [`ValueType`] with instance semantics (`Bool` is an `Int`)
//! - **Shortcut**: `"number"`, `"integer"`, `"even"`, `"odd"`, negated with `~`
//! - **Predicate**: a closure; only an outcome of exactly `false` rejects
//! - **Absent**: no constraint
//!
//! Rules can also be loaded from JSON through [`ContractConfig`].

// ContractError carries owned context strings and is returned unboxed.
#![allow(clippy::result_large_err)]

pub mod args;
pub mod check;
pub mod config;
pub mod decorator;
pub mod error;
pub mod function;
mod macros;
pub mod output;
pub mod prelude;
pub mod rule;
pub mod shortcut;
pub mod signature;
pub mod value;

pub use args::Args;
pub use check::{Check, CheckExt, Negated, negate};
pub use config::{ContractConfig, OutputConfig};
pub use decorator::{
    InputValidators, IntoValidated, OutputValidators, validate_inputs, validate_outputs,
};
pub use error::{ContractError, ErrorKind, Fault, FaultKind, Result};
pub use function::{Function, ValidatedFunction};
pub use output::ExpectedCount;
pub use rule::{Predicate, PredicateOutcome, Rule, check_value};
pub use shortcut::{NegatedShortcut, Shortcut, get_shortcut, negated_shortcut};
pub use signature::Signature;
pub use value::{Value, ValueType};
