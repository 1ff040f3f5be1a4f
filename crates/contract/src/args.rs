//! Call arguments
//!
//! [`Args`] holds the positional values and keyword values of one call.
//! The wrapper validates them against the signature's parameter names and
//! passes them to the wrapped function unmodified.

use indexmap::IndexMap;

use crate::error::{ContractError, Result};
use crate::value::Value;

/// Positional and keyword arguments of a call.
///
/// # Examples
///
/// ```
/// use nebula_contract::{Args, Value, args};
///
/// let args = args![1, 2.5; scale = 3];
/// assert_eq!(args.positional().len(), 2);
/// assert_eq!(args.get(2, "scale").unwrap(), &Value::Int(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    keyword: IndexMap<String, Value>,
}

impl Args {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    /// Sets a keyword argument.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_keyword(name, value);
        self
    }

    /// Appends a positional argument in place.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Sets a keyword argument in place, returning the value it replaced.
    pub fn insert_keyword(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.keyword.insert(name.into(), value.into())
    }

    /// Positional arguments in call order.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword arguments in insertion order.
    #[must_use]
    pub const fn keywords(&self) -> &IndexMap<String, Value> {
        &self.keyword
    }

    /// Looks up a keyword argument.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Total number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    /// Returns true when no argument was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Binds a parameter: positionally at `index` first, then by keyword.
    ///
    /// A missing parameter is reported without a function name;
    /// [`Function::call`](crate::Function::call) fills it in.
    pub fn get(&self, index: usize, name: &str) -> Result<&Value> {
        self.positional
            .get(index)
            .or_else(|| self.keyword.get(name))
            .ok_or_else(|| ContractError::MissingArgument {
                function: String::new(),
                argument: name.to_owned(),
            })
    }

    /// Positional arguments from `index` on, e.g. a var-positional capture.
    #[must_use]
    pub fn rest(&self, index: usize) -> &[Value] {
        self.positional.get(index..).unwrap_or_default()
    }
}

impl<V: Into<Value>> FromIterator<V> for Args {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            positional: iter.into_iter().map(Into::into).collect(),
            keyword: IndexMap::new(),
        }
    }
}
