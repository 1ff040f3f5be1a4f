//! Dynamic values passed to and returned from wrapped functions
//!
//! A wrapped function receives its arguments as [`Value`]s and returns one.
//! Rules inspect values by their runtime [`ValueType`]. `Tuple` is the
//! multi-value return construct: output reconciliation explodes a returned
//! tuple into its elements, while a `List` is always a single output.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ContractError;

// ============================================================================
// VALUE
// ============================================================================

/// A dynamically typed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// The absence of a value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered, single-valued sequence.
    List(Vec<Value>),
    /// A fixed group of values; the multi-value return construct.
    Tuple(Vec<Value>),
    /// An insertion-ordered map with string keys.
    Dict(IndexMap<String, Value>),
}

impl Value {
    /// Builds a tuple from anything convertible to values.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a list from anything convertible to values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the runtime type of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::None => ValueType::NoneType,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Str(_) => ValueType::Str,
            Self::List(_) => ValueType::List,
            Self::Tuple(_) => ValueType::Tuple,
            Self::Dict(_) => ValueType::Dict,
        }
    }

    /// Display name of the runtime type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Returns true for `Value::None`.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the integer payload, if this is an `Int`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the elements of a tuple.
    #[must_use]
    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Self::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Quoted rendering, used for values nested inside containers.
    ///
    /// ```
    /// use nebula_contract::Value;
    ///
    /// assert_eq!(Value::from("foo").repr().to_string(), "'foo'");
    /// assert_eq!(Value::from("foo").to_string(), "foo");
    /// ```
    #[must_use]
    pub const fn repr(&self) -> Repr<'_> {
        Repr(self)
    }
}

/// Quoted rendering of a [`Value`]; see [`Value::repr`].
#[derive(Debug, Clone, Copy)]
pub struct Repr<'a>(&'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(*x, f),
            Value::Str(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Value::List(items) => {
                f.write_str("[")?;
                write_items(items, f)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_items(items, f)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Dict(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{key}': {}", value.repr())?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_items(items: &[Value], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item.repr())?;
    }
    Ok(())
}

// Floats always show a fraction or exponent: `2.0`, not `2`.
fn write_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        f.write_str("nan")
    } else {
        write!(f, "{x:?}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            other => write!(f, "{}", other.repr()),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::list(value)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Self::Dict(value)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Self::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Self::None,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            Json::String(s) => Self::Str(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => Self::Dict(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::None => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Int(i) => Self::from(i),
            Value::Float(x) => serde_json::Number::from_f64(x).map_or(Self::Null, Self::Number),
            Value::Str(s) => Self::String(s),
            Value::List(items) | Value::Tuple(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            Value::Dict(map) => Self::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

// ============================================================================
// VALUE TYPE
// ============================================================================

/// Runtime type of a [`Value`], used as the payload of a type rule.
///
/// Instance checks follow the numeric tower: a `Bool` value is also an
/// instance of `Int`, and every value is an instance of `Object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    Dict,
    Object,
}

impl ValueType {
    /// Every type, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::NoneType,
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::Str,
        Self::List,
        Self::Tuple,
        Self::Dict,
        Self::Object,
    ];

    /// Display name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoneType => "NoneType",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Dict => "dict",
            Self::Object => "object",
        }
    }

    /// Returns true if `value` is an instance of this type.
    ///
    /// ```
    /// use nebula_contract::{Value, ValueType};
    ///
    /// assert!(ValueType::Int.is_instance(&Value::Int(3)));
    /// assert!(ValueType::Int.is_instance(&Value::Bool(true)));
    /// assert!(!ValueType::Int.is_instance(&Value::Float(3.0)));
    /// assert!(ValueType::Object.is_instance(&Value::None));
    /// ```
    #[must_use]
    pub fn is_instance(self, value: &Value) -> bool {
        match (self, value.value_type()) {
            (Self::Object, _) | (Self::Int, ValueType::Bool) => true,
            (expected, actual) => expected == actual,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| ContractError::config(format!("unknown type name '{s}'")))
    }
}

impl TryFrom<String> for ValueType {
    type Error = ContractError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.name().to_owned()
    }
}

// ============================================================================
// TESTS
// ============================================================================
