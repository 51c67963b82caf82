//! Resultset collection

use std::ops::Index;
use std::str::FromStr;
use std::sync::Arc;

use super::DateFormats;
use super::FieldMetadata;
use super::FieldTable;
use super::PortalMetadata;
use super::Record;
use crate::ParseOptions;
use crate::error::Error;

/// The records returned by one request, with the response's metadata.
///
/// A resultset is an ordered, read-only collection of [`Record`]s in the
/// order the server sent them. It also carries the field and portal
/// metadata tables, the date/time patterns and the record counts from the
/// same response. All lookups by field or table name ignore case.
///
/// # Example
///
/// ```
/// use filemaker_lib::ParseOptions;
/// use filemaker_lib::model::FieldType;
/// use filemaker_lib::model::Resultset;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <fmresultset xmlns="http://www.filemaker.com/xml/fmresultset" version="1.0">
///   <error code="0"/>
///   <datasource database="Contacts" layout="Web" table="People"
///       date-format="MM/dd/yyyy" time-format="HH:mm:ss"
///       timestamp-format="MM/dd/yyyy HH:mm:ss" total-count="120"/>
///   <metadata>
///     <field-definition name="FirstName" result="text" max-repeat="1"/>
///   </metadata>
///   <resultset count="1" fetch-size="1">
///     <record record-id="1" mod-id="0">
///       <field name="FirstName"><data>Bill</data></field>
///     </record>
///   </resultset>
/// </fmresultset>"#;
///
/// let resultset = Resultset::parse(xml, &ParseOptions::default()).unwrap();
///
/// assert_eq!(resultset.len(), 1);
/// assert_eq!(resultset.total_count(), 120);
/// assert_eq!(resultset.date_format(), "%m/%d/%Y");
/// assert_eq!(
///     resultset.field("firstname").map(|f| f.field_type()),
///     Some(FieldType::Text)
/// );
///
/// for record in &resultset {
///     println!("{:?}", record.get_text("FirstName"));
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Resultset {
    pub(crate) records: Vec<Record>,
    pub(crate) field_meta: Arc<FieldTable>,
    pub(crate) portal_meta: PortalMetadata,
    pub(crate) formats: DateFormats,
    /// Records in the underlying table.
    pub(crate) total_count: u64,
    /// Records reported in this response's found set.
    pub(crate) foundset_count: u64,
    pub(crate) fetch_size: Option<u64>,
    pub(crate) include_portals: bool,
    pub(crate) database: Option<String>,
    pub(crate) layout: Option<String>,
    pub(crate) table: Option<String>,
}

impl Resultset {
    /// Parses a raw `fmresultset` response body.
    ///
    /// Fails with [`Error::Parse`] on malformed or non-conforming XML and
    /// with [`Error::Protocol`] when the response carries a nonzero error
    /// code. Code 401 (no records found) only fails when
    /// [`ParseOptions::raise_on_401`] is set; otherwise it yields an empty
    /// resultset.
    pub fn parse(xml: &str, options: &ParseOptions) -> Result<Self, Error> {
        crate::parse::parse_resultset(xml, options)
    }

    // =========================================================================
    // Collection access
    // =========================================================================

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Returns the first record, if any.
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Returns the last record, if any.
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Iterates over the records in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns the records as a slice.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the resultset and returns the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Returns the field metadata table for the layout.
    pub fn field_meta(&self) -> &FieldTable {
        &self.field_meta
    }

    /// Returns metadata for one field, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.field_meta.get(name)
    }

    /// Returns the portal metadata tables.
    ///
    /// Always empty unless related records were requested.
    pub fn portal_meta(&self) -> &PortalMetadata {
        &self.portal_meta
    }

    /// Returns the field table for one portal, ignoring case.
    pub fn portal(&self, table: &str) -> Option<&FieldTable> {
        self.portal_meta.get(table).map(Arc::as_ref)
    }

    /// Returns all three strftime patterns.
    pub fn formats(&self) -> &DateFormats {
        &self.formats
    }

    /// Returns the strftime pattern for date fields.
    pub fn date_format(&self) -> &str {
        &self.formats.date
    }

    /// Returns the strftime pattern for time fields.
    pub fn time_format(&self) -> &str {
        &self.formats.time
    }

    /// Returns the strftime pattern for timestamp fields.
    pub fn timestamp_format(&self) -> &str {
        &self.formats.timestamp
    }

    /// Returns the number of records in the underlying table.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the found-set count reported by the server.
    pub fn foundset_count(&self) -> u64 {
        self.foundset_count
    }

    /// Returns the number of records the server says it sent, if reported.
    pub fn fetch_size(&self) -> Option<u64> {
        self.fetch_size
    }

    /// Returns `true` if portal metadata and related records were parsed.
    pub fn include_portals(&self) -> bool {
        self.include_portals
    }

    /// Returns the database name, if the response named it.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Returns the layout name, if the response named it.
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    /// Returns the base table name, if the response named it.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }
}

impl FromStr for Resultset {
    type Err = Error;

    /// Parses with default [`ParseOptions`].
    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        Self::parse(xml, &ParseOptions::default())
    }
}

impl Index<usize> for Resultset {
    type Output = Record;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a Resultset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Resultset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
