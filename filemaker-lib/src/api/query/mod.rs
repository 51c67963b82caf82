//! Query building for the XML gateway.
//!
//! A [`QueryBuilder`] collects the `-`-prefixed parameters for one find
//! request against a [`Layout`](crate::model::Layout): raw search options,
//! up to nine sort fields and sort orders, `-max` and `-skip`. The
//! transport layer reads the finished map with
//! [`QueryBuilder::into_query`] or asks for a full request URL with
//! [`QueryBuilder::build_url`].
//!
//! # Example
//!
//! ```
//! use filemaker_lib::api::query::QueryBuilder;
//!
//! let query = QueryBuilder::new("Customers")
//!     .search_options([("City", "Boston")])
//!     .sort_field(["LastName", "FirstName"])?
//!     .sort_order(["asc", "desc"])?
//!     .max(50)
//!     .skip(100)
//!     .into_query();
//!
//! assert_eq!(query["-sortfield.1"].to_string(), "LastName");
//! assert_eq!(query["-sortorder.2"].to_string(), "descend");
//! assert_eq!(query["-max"].to_string(), "50");
//! # Ok::<(), filemaker_lib::error::ParameterError>(())
//! ```

mod builder;
mod order;
mod param;

pub use builder::Command;
pub use builder::QueryBuilder;
pub use order::SortOrder;
pub use param::QueryValue;
