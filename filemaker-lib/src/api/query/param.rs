//! Query parameter values

use serde::Serialize;

/// A single query parameter value.
///
/// The gateway reads every parameter as text; numbers are kept apart so
/// callers can inspect them without reparsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Text value, sent verbatim.
    Text(String),
    /// Integer value, sent in decimal.
    Number(i64),
}

impl std::fmt::Display for QueryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for QueryValue {
    fn from(v: i32) -> Self {
        Self::Number(v.into())
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        Self::Number(v.into())
    }
}

impl From<usize> for QueryValue {
    fn from(v: usize) -> Self {
        Self::Number(i64::try_from(v).unwrap_or(i64::MAX))
    }
}
