//! Request-side operations

pub mod query;
