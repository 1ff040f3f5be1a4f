//! Macros for building call arguments and rule sets.
//!
//! # Available Macros
//!
//! - [`args!`]: Build [`Args`](crate::Args) from positional and keyword values
//! - [`inputs!`]: Build an input decorator from `name => rule` pairs
//!
//! # Examples
//!
//! ```
//! use nebula_contract::{ValueType, args, inputs};
//!
//! let call = args![1, "two"; scale = 3.0];
//! assert_eq!(call.len(), 3);
//!
//! let decorator = inputs! { a => ValueType::Int, b => "~number" };
//! assert_eq!(decorator.rules().len(), 2);
//! ```

// ============================================================================
// ARGS MACRO
// ============================================================================

/// Builds [`Args`](crate::Args).
///
/// Positional values come first, keyword values follow a `;`:
///
/// ```
/// use nebula_contract::{Value, args};
///
/// let none = args![];
/// let positional = args![1, 2];
/// let keyword = args![; a = 1];
/// let both = args![1; b = Value::None];
///
/// assert!(none.is_empty());
/// assert_eq!(positional.positional().len(), 2);
/// assert_eq!(keyword.keyword("a"), Some(&Value::Int(1)));
/// assert_eq!(both.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    (; $($name:ident = $kw:expr),+ $(,)?) => {
        $crate::Args::new()$(.with_keyword(stringify!($name), $kw))+
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new()$(.with($value))+
    };
    ($($value:expr),+ ; $($name:ident = $kw:expr),+ $(,)?) => {
        $crate::Args::new()$(.with($value))+$(.with_keyword(stringify!($name), $kw))+
    };
}

// ============================================================================
// INPUTS MACRO
// ============================================================================

/// Builds an [`InputValidators`](crate::InputValidators) decorator.
///
/// ```
/// use nebula_contract::{Rule, Value, inputs};
///
/// let decorator = inputs! {
///     a => "even",
///     b => Rule::predicate(|v: &Value| v.as_int().is_some_and(|n| n > 0)),
/// };
/// assert!(decorator.rules().iter().any(|(name, _)| name == "b"));
/// ```
#[macro_export]
macro_rules! inputs {
    ($($name:ident => $rule:expr),* $(,)?) => {
        $crate::InputValidators::default()$(.rule(stringify!($name), $rule))*
    };
}

// ============================================================================
// TESTS
// ============================================================================
