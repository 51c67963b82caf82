//! Response document parsing.
//!
//! The raw `fmresultset` body is read with quick-xml into a small owned
//! element tree ([`Element`]), which the resultset engine then walks with
//! unqualified path lookups.

mod document;
mod resultset;

pub(crate) use document::Element;
pub(crate) use document::parse_document;
pub(crate) use resultset::parse_resultset;
