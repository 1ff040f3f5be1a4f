//! Function signatures
//!
//! Rules are keyed by parameter name, so a wrapped function declares its
//! parameter names up front. Positional call arguments are mapped to names
//! by index into [`Signature::parameter_names`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use smallvec::SmallVec;

use crate::error::{ContractError, Result};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Name and parameter list of a wrapped function.
///
/// # Examples
///
/// ```
/// use nebula_contract::Signature;
///
/// let built = Signature::new("add").param("a").param("b").var_args("rest");
/// let parsed: Signature = "add(a, b, *rest)".parse().unwrap();
/// assert_eq!(built, parsed);
/// assert_eq!(parsed.parameter_names().as_slice(), ["a", "b", "rest"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    name: String,
    params: SmallVec<[String; 4]>,
    var_args: Option<String>,
    var_kwargs: Option<String>,
}

impl Signature {
    /// Creates a signature with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: SmallVec::new(),
            var_args: None,
            var_kwargs: None,
        }
    }

    /// Appends a named parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    /// Appends several named parameters.
    #[must_use = "builder methods must be chained or built"]
    pub fn params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Names the capture for extra positional arguments.
    #[must_use = "builder methods must be chained or built"]
    pub fn var_args(mut self, name: impl Into<String>) -> Self {
        self.var_args = Some(name.into());
        self
    }

    /// Names the capture for extra keyword arguments.
    #[must_use = "builder methods must be chained or built"]
    pub fn var_kwargs(mut self, name: impl Into<String>) -> Self {
        self.var_kwargs = Some(name.into());
        self
    }

    /// The function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared named parameters, without the captures.
    #[must_use]
    pub fn params_declared(&self) -> &[String] {
        &self.params
    }

    /// Every parameter name in declaration order: named parameters, then the
    /// var-positional capture, then the var-keyword capture.
    #[must_use]
    pub fn parameter_names(&self) -> SmallVec<[&str; 4]> {
        self.params
            .iter()
            .chain(&self.var_args)
            .chain(&self.var_kwargs)
            .map(String::as_str)
            .collect()
    }

    /// Checks that the signature can be wrapped.
    pub fn validate(&self) -> Result<()> {
        if !IDENTIFIER.is_match(&self.name) {
            return Err(ContractError::invalid_function(format!(
                "function name '{}' is not an identifier",
                self.name
            )));
        }

        let names = self.parameter_names();
        for (i, name) in names.iter().enumerate() {
            if !IDENTIFIER.is_match(name) {
                return Err(ContractError::invalid_function(format!(
                    "parameter '{name}' is not an identifier"
                )));
            }
            if names[..i].contains(name) {
                return Err(ContractError::invalid_function(format!(
                    "parameter '{name}' is declared twice"
                )));
            }
        }

        Ok(())
    }
}

impl FromStr for Signature {
    type Err = ContractError;

    /// Parses `name(a, b, *args, **kwargs)`.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ContractError::invalid_function(format!("malformed signature '{s}'"));

        let (name, rest) = s.trim().split_once('(').ok_or_else(malformed)?;
        let params = rest.strip_suffix(')').ok_or_else(malformed)?;

        let mut signature = Self::new(name.trim());
        for param in params.split(',').map(str::trim) {
            if param.is_empty() {
                continue;
            }
            if let Some(kwargs) = param.strip_prefix("**") {
                signature.var_kwargs = Some(kwargs.to_owned());
            } else if let Some(args) = param.strip_prefix('*') {
                signature.var_args = Some(args.to_owned());
            } else if signature.var_kwargs.is_some() {
                return Err(malformed());
            } else {
                signature.params.push(param.to_owned());
            }
        }

        signature.validate()?;
        Ok(signature)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        let mut first = true;
        let params = self.params.iter().map(|p| ("", p));
        let captures = self
            .var_args
            .iter()
            .map(|p| ("*", p))
            .chain(self.var_kwargs.iter().map(|p| ("**", p)));
        for (prefix, param) in params.chain(captures) {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{prefix}{param}")?;
        }
        f.write_str(")")
    }
}
