//! Record and portal model

use std::sync::Arc;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Serialize;
use url::Url;

use super::CaseInsensitiveMap;
use super::DateFormats;
use super::FieldMetadata;
use super::FieldTable;
use super::PortalMetadata;
use super::Value;
use super::types::ContainerRef;
use crate::error::FieldError;
use crate::error::ParseError;
use crate::parse::Element;

/// One row of a [`Resultset`](super::Resultset).
///
/// Field values are keyed case-insensitively and already typed by their
/// field metadata. Related records from portals are grouped by table
/// occurrence name.
///
/// The record shares its resultset's field table for type lookups through
/// [`field_meta`](Record::field_meta); the table itself is owned by the
/// resultset and never changes after parsing.
///
/// # Example
///
/// ```
/// use filemaker_lib::ParseOptions;
/// use filemaker_lib::model::Resultset;
///
/// let xml = r#"<fmresultset>
///   <error code="0"/>
///   <datasource date-format="MM/dd/yyyy" time-format="HH:mm:ss"
///       timestamp-format="MM/dd/yyyy HH:mm:ss" total-count="1"/>
///   <metadata><field-definition name="Name" result="text"/></metadata>
///   <resultset count="1" fetch-size="1">
///     <record record-id="7" mod-id="2"><field name="Name"><data>Bill</data></field></record>
///   </resultset>
/// </fmresultset>"#;
///
/// let resultset = Resultset::parse(xml, &ParseOptions::default()).unwrap();
/// let record = &resultset[0];
///
/// assert_eq!(record.record_id(), Some(7));
/// assert_eq!(record.get_text("name").unwrap(), Some("Bill"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    /// Server-assigned record id.
    pub(crate) record_id: Option<u64>,

    /// Modification counter, used for optimistic locking on edits.
    pub(crate) mod_id: Option<u64>,

    /// The field values.
    pub(crate) fields: CaseInsensitiveMap<Value>,

    /// Related records keyed by table occurrence.
    pub(crate) portals: CaseInsensitiveMap<Vec<Record>>,

    /// Field metadata used to type this record's values.
    #[serde(skip)]
    pub(crate) field_meta: Arc<FieldTable>,
}

/// Shared inputs for turning `<record>` elements into records.
pub(crate) struct RecordContext<'a> {
    pub(crate) formats: &'a DateFormats,
    pub(crate) container_base: Option<&'a Url>,
    /// Present only when related records were requested.
    pub(crate) portal_meta: Option<&'a PortalMetadata>,
}

impl Record {
    /// Builds a record from a `<record>` element.
    ///
    /// `portal` names the table occurrence when the element sits inside a
    /// `<relatedset>`; its `table::` prefix is stripped from field names.
    pub(crate) fn from_element(
        element: &Element,
        context: &RecordContext<'_>,
        field_meta: &Arc<FieldTable>,
        portal: Option<&str>,
    ) -> Result<Self, ParseError> {
        let mut fields = CaseInsensitiveMap::new();

        for field in element.children("field") {
            let raw_name = field.required_attr("name")?;
            let name = match portal {
                Some(table) => strip_table_prefix(raw_name, table),
                None => raw_name,
            };

            let field_type = field_meta
                .get(name)
                .map(FieldMetadata::field_type)
                .unwrap_or_default();

            let mut values: Vec<Value> = field
                .children("data")
                .map(|data| {
                    Value::coerce(data.text(), field_type, context.formats, context.container_base)
                })
                .collect();

            let value = match values.len() {
                0 => Value::Null,
                1 => values.remove(0),
                _ => Value::Repeating(values),
            };
            fields.insert(name, value);
        }

        let mut portals = CaseInsensitiveMap::new();
        if let Some(portal_meta) = context.portal_meta {
            for relatedset in element.children("relatedset") {
                let table = relatedset.required_attr("table")?;
                let table_meta = portal_meta.get(table).cloned().unwrap_or_default();

                let related = relatedset
                    .children("record")
                    .map(|r| Record::from_element(r, context, &table_meta, Some(table)))
                    .collect::<Result<Vec<_>, _>>()?;

                portals.insert(table, related);
            }
        }

        Ok(Self {
            record_id: element.optional_int("record-id")?,
            mod_id: element.optional_int("mod-id")?,
            fields,
            portals,
            field_meta: Arc::clone(field_meta),
        })
    }

    // =========================================================================
    // Metadata accessors
    // =========================================================================

    /// Returns the server record id, if the response carried one.
    pub fn record_id(&self) -> Option<u64> {
        self.record_id
    }

    /// Returns the modification id, if the response carried one.
    pub fn mod_id(&self) -> Option<u64> {
        self.mod_id
    }

    /// Returns the metadata for a field of this record, ignoring case.
    pub fn field_meta(&self, field: &str) -> Option<&FieldMetadata> {
        self.field_meta.get(field)
    }

    /// Returns the field table this record was typed with.
    pub fn field_table(&self) -> &FieldTable {
        &self.field_meta
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &CaseInsensitiveMap<Value> {
        &self.fields
    }

    // =========================================================================
    // Portals
    // =========================================================================

    /// Returns the related records for a table occurrence, ignoring case.
    pub fn portal(&self, table: &str) -> Option<&[Record]> {
        self.portals.get(table).map(Vec::as_slice)
    }

    /// Returns all portals keyed by table occurrence.
    pub fn portals(&self) -> &CaseInsensitiveMap<Vec<Record>> {
        &self.portals
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a text field value.
    pub fn get_text(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Text(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "text", other.type_name())),
        }
    }

    /// Gets a number field value.
    pub fn get_number(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "number", other.type_name())),
        }
    }

    /// Gets a date field value.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }

    /// Gets a time field value.
    pub fn get_time(&self, field: &str) -> Result<Option<NaiveTime>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Time(t)) => Ok(Some(*t)),
            Some(other) => Err(FieldError::type_mismatch(field, "time", other.type_name())),
        }
    }

    /// Gets a timestamp field value.
    pub fn get_timestamp(&self, field: &str) -> Result<Option<NaiveDateTime>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Timestamp(ts)) => Ok(Some(*ts)),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "timestamp",
                other.type_name(),
            )),
        }
    }

    /// Gets a container field reference.
    pub fn get_container(&self, field: &str) -> Result<Option<&ContainerRef>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Container(c)) => Ok(Some(c)),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "container",
                other.type_name(),
            )),
        }
    }

    /// Gets all repetitions of a repeating field.
    pub fn get_repeating(&self, field: &str) -> Result<Option<&[Value]>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Repeating(values)) => Ok(Some(values.as_slice())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "repeating",
                other.type_name(),
            )),
        }
    }
}

/// Removes a leading `table::` qualifier from a related field name.
pub(crate) fn strip_table_prefix<'a>(name: &'a str, table: &str) -> &'a str {
    name.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix("::"))
        .unwrap_or(name)
}
