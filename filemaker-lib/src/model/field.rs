//! Field metadata

use std::sync::Arc;

use serde::Serialize;

use super::CaseInsensitiveMap;
use crate::error::ParseError;
use crate::parse::Element;

/// Field metadata keyed case-insensitively by field name.
pub type FieldTable = CaseInsensitiveMap<FieldMetadata>;

/// Per-portal field tables keyed case-insensitively by table occurrence.
///
/// Field names inside each table have their `table::` prefix stripped.
pub type PortalMetadata = CaseInsensitiveMap<Arc<FieldTable>>;

/// The value type a field produces.
///
/// # Type Mapping
///
/// | Server result | Rust Variant | Record value |
/// |---------------|--------------|--------------|
/// | text | `Text` | `Value::Text` |
/// | number | `Number` | `Value::Number` |
/// | date | `Date` | `Value::Date` |
/// | time | `Time` | `Value::Time` |
/// | timestamp | `Timestamp` | `Value::Timestamp` |
/// | container | `Container` | `Value::Container` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Time,
    Timestamp,
    Container,
}

impl FieldType {
    /// Parses a server result token. Matching ignores case.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "timestamp" => Some(Self::Timestamp),
            "container" => Some(Self::Container),
            _ => None,
        }
    }

    /// Returns the server token for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Container => "container",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field's value is produced on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Stored data entered by users or scripts.
    #[default]
    Normal,
    /// Computed from a calculation formula.
    Calculation,
    /// Aggregated over the found set.
    Summary,
}

impl FieldKind {
    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "calculation" => Some(Self::Calculation),
            "summary" => Some(Self::Summary),
            _ => None,
        }
    }
}

/// Declared type and repetition information for one field.
///
/// Built from a single `<field-definition>` element and never modified
/// afterwards. This describes the field, not a row's value; use
/// [`Record`](super::Record) for data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMetadata {
    name: String,
    field_type: FieldType,
    kind: FieldKind,
    max_repeat: u32,
    global: bool,
}

impl FieldMetadata {
    /// Creates metadata for a non-repeating, non-global normal field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            kind: FieldKind::Normal,
            max_repeat: 1,
            global: false,
        }
    }

    /// Sets the repetition count. Values below 1 are stored as 1.
    pub fn with_max_repeat(mut self, max_repeat: u32) -> Self {
        self.max_repeat = max_repeat.max(1);
        self
    }

    /// Sets the field kind.
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the field as global (one value shared by all records).
    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Builds metadata from a `<field-definition>` element.
    ///
    /// The value type comes from `result`. When `result` is absent a
    /// value-type token in `type` is accepted instead; otherwise the type
    /// is `Text`. Only `name` is required.
    pub(crate) fn from_element(element: &Element) -> Result<Self, ParseError> {
        let name = element.required_attr("name")?;

        let field_type = element
            .attr("result")
            .or_else(|| element.attr("type"))
            .and_then(FieldType::from_token)
            .unwrap_or_default();

        let kind = element
            .attr("type")
            .and_then(FieldKind::from_token)
            .unwrap_or_default();

        let max_repeat = element
            .attr("max-repeat")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(1);

        let global = element
            .attr("global")
            .is_some_and(|v| v.eq_ignore_ascii_case("yes"));

        Ok(Self::new(name, field_type)
            .with_kind(kind)
            .with_max_repeat(max_repeat)
            .with_global(global))
    }

    /// Returns the field name with its original casing.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns how the field is computed.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the number of repetitions (at least 1).
    pub fn max_repeat(&self) -> u32 {
        self.max_repeat
    }

    /// Returns `true` if the field is global.
    pub fn is_global(&self) -> bool {
        self.global
    }

    /// Returns `true` if the field has more than one repetition.
    pub fn is_repeating(&self) -> bool {
        self.max_repeat > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;

    fn definition(xml: &str) -> Result<FieldMetadata, ParseError> {
        let element = parse_document(xml).unwrap();
        FieldMetadata::from_element(&element)
    }

    #[test]
    fn test_full_definition() {
        let field = definition(
            r#"<field-definition auto-enter="no" global="yes" max-repeat="3" name="Price" not-empty="no" result="number" type="calculation"/>"#,
        )
        .unwrap();

        assert_eq!(field.name(), "Price");
        assert_eq!(field.field_type(), FieldType::Number);
        assert_eq!(field.kind(), FieldKind::Calculation);
        assert_eq!(field.max_repeat(), 3);
        assert!(field.is_global());
        assert!(field.is_repeating());
    }

    #[test]
    fn test_defaults() {
        let field = definition(r#"<field-definition name="Notes"/>"#).unwrap();

        assert_eq!(field.field_type(), FieldType::Text);
        assert_eq!(field.kind(), FieldKind::Normal);
        assert_eq!(field.max_repeat(), 1);
        assert!(!field.is_global());
    }

    #[test]
    fn test_type_token_fallback() {
        let field = definition(r#"<field-definition name="Born" type="date"/>"#).unwrap();
        assert_eq!(field.field_type(), FieldType::Date);
        assert_eq!(field.kind(), FieldKind::Normal);
    }

    #[test]
    fn test_missing_name() {
        let err = definition(r#"<field-definition result="text"/>"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));
    }

    #[test]
    fn test_zero_repeat_clamps() {
        let field = FieldMetadata::new("x", FieldType::Text).with_max_repeat(0);
        assert_eq!(field.max_repeat(), 1);
    }
}
