//! Query parameter errors

/// Maximum number of sort fields or sort orders a single request can carry.
pub const MAX_SORT_KEYS: usize = 9;

/// A query directive the protocol cannot express.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// More sort fields were supplied than the protocol allows.
    #[error("sort_field can have a max of 9 fields, you passed in {count}")]
    TooManySortFields { count: usize },

    /// More sort orders were supplied than the protocol allows.
    #[error("sort_order can have a max of 9 options, you passed in {count}")]
    TooManySortOrders { count: usize },
}
