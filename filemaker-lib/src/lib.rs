//! FileMaker XML gateway library
//!
//! Builds find requests for the XML gateway and turns `fmresultset`
//! response bodies into typed, case-insensitive [`model::Resultset`]s.
//! Transport is left to the caller.
//!
//! ```
//! use filemaker_lib::Config;
//!
//! let config = Config::builder().database("Contacts").build()?;
//! let xml = r#"<fmresultset xmlns="http://www.filemaker.com/xml/fmresultset">
//!   <error code="401"/>
//!   <datasource date-format="MM/dd/yyyy" time-format="HH:mm:ss"
//!       timestamp-format="MM/dd/yyyy HH:mm:ss" total-count="0"/>
//!   <metadata/>
//!   <resultset count="0" fetch-size="0"/>
//! </fmresultset>"#;
//!
//! let resultset = config.parse_resultset(xml)?;
//! assert!(resultset.is_empty());
//! # Ok::<(), filemaker_lib::error::Error>(())
//! ```

pub mod api;
pub mod error;
pub mod model;

mod config;
mod parse;

pub use config::*;
