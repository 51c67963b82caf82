//! Sort order tokens for `-sortorder.N` parameters.

/// Sort direction for one sort field.
///
/// The protocol accepts `ascend`, `descend`, or the name of a value list
/// to sort by a custom order. Short forms `asc` and `desc` normalize to
/// the long tokens; anything else is sent verbatim.
///
/// # Example
///
/// ```
/// use filemaker_lib::api::query::SortOrder;
///
/// assert_eq!(SortOrder::from("asc"), SortOrder::Ascend);
/// assert_eq!(SortOrder::from("desc").as_str(), "descend");
/// assert_eq!(SortOrder::from("Priority").as_str(), "Priority");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    Ascend,
    /// Descending order (Z-A, 9-0).
    Descend,
    /// Custom order given by a value list name.
    Custom(String),
}

impl SortOrder {
    /// Returns the protocol token for this order.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ascend => "ascend",
            Self::Descend => "descend",
            Self::Custom(token) => token,
        }
    }
}

impl From<&str> for SortOrder {
    fn from(token: &str) -> Self {
        match token {
            "asc" | "ascend" => Self::Ascend,
            "desc" | "descend" => Self::Descend,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for SortOrder {
    fn from(token: String) -> Self {
        match token.as_str() {
            "asc" | "ascend" => Self::Ascend,
            "desc" | "descend" => Self::Descend,
            _ => Self::Custom(token),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
