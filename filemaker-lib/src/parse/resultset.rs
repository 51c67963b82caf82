//! The `fmresultset` engine: raw response text to [`Resultset`].

use std::borrow::Cow;
use std::sync::Arc;

use super::parse_document;
use crate::ParseOptions;
use crate::error::Error;
use crate::error::NO_RECORDS_FOUND;
use crate::error::ParseError;
use crate::error::ProtocolError;
use crate::model::DateFormats;
use crate::model::FieldMetadata;
use crate::model::FieldTable;
use crate::model::PortalMetadata;
use crate::model::Record;
use crate::model::RecordContext;
use crate::model::Resultset;
use crate::model::strip_table_prefix;

/// Default namespace declaration on the `fmresultset` root element.
const FMRESULTSET_NAMESPACE: &str = r#"xmlns="http://www.filemaker.com/xml/fmresultset""#;

/// Removes the protocol's default namespace declaration so element
/// lookups can stay unqualified. Purely textual; runs before parsing.
pub(crate) fn strip_namespace(xml: &str) -> Cow<'_, str> {
    if xml.contains(FMRESULTSET_NAMESPACE) {
        Cow::Owned(xml.replace(FMRESULTSET_NAMESPACE, ""))
    } else {
        Cow::Borrowed(xml)
    }
}

/// Parses a complete response body into a [`Resultset`].
///
/// Steps run in a fixed order: namespace removal, XML parse, error code
/// check, date formats, counts, field metadata, portal metadata, records.
/// Any failure aborts the whole parse; no partial resultset is returned.
pub(crate) fn parse_resultset(xml: &str, options: &ParseOptions) -> Result<Resultset, Error> {
    if options.log_responses {
        log::debug!("fmresultset response:\n{}", xml);
    }

    let normalized = strip_namespace(xml);
    let root = parse_document(&normalized)?;
    if root.name() != "fmresultset" {
        return Err(ParseError::MissingElement("fmresultset".to_string()).into());
    }

    let code: i32 = root.required_child("error")?.required_int("code")?;
    if code != 0 && (code != NO_RECORDS_FOUND || options.raise_on_401) {
        return Err(ProtocolError::new(code).into());
    }

    let datasource = root.required_child("datasource")?;
    let formats = DateFormats::from_server(
        datasource.required_attr("date-format")?,
        datasource.required_attr("time-format")?,
        datasource.required_attr("timestamp-format")?,
    );

    let resultset = root.required_child("resultset")?;
    let foundset_count: u64 = resultset.required_int("count")?;
    let fetch_size: Option<u64> = resultset.optional_int("fetch-size")?;
    let total_count: u64 = datasource.required_int("total-count")?;

    let metadata = root.required_child("metadata")?;

    let mut field_meta = FieldTable::new();
    for definition in metadata.children("field-definition") {
        let field = FieldMetadata::from_element(definition)?;
        let name = field.name().to_string();
        field_meta.insert(name, field);
    }
    let field_meta = Arc::new(field_meta);

    let mut portal_meta = PortalMetadata::new();
    if options.include_portals {
        for relatedset in metadata.children("relatedset-definition") {
            let table = relatedset.required_attr("table")?;

            let mut fields = FieldTable::new();
            for definition in relatedset.children("field-definition") {
                let field = FieldMetadata::from_element(definition)?;
                let name = strip_table_prefix(field.name(), table).to_string();
                fields.insert(name, field);
            }

            portal_meta.insert(table, Arc::new(fields));
        }
    }

    let context = RecordContext {
        formats: &formats,
        container_base: options.container_base.as_ref(),
        portal_meta: options.include_portals.then_some(&portal_meta),
    };

    let records = resultset
        .children("record")
        .map(|record| Record::from_element(record, &context, &field_meta, None))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "parsed {} record(s), found {} of {} (layout {:?})",
        records.len(),
        foundset_count,
        total_count,
        datasource.attr("layout").unwrap_or("")
    );

    Ok(Resultset {
        records,
        field_meta,
        portal_meta,
        formats,
        total_count,
        foundset_count,
        fetch_size,
        include_portals: options.include_portals,
        database: datasource.attr("database").map(str::to_string),
        layout: datasource.attr("layout").map(str::to_string),
        table: datasource.attr("table").map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_namespace() {
        let raw = r#"<fmresultset xmlns="http://www.filemaker.com/xml/fmresultset" version="1.0">"#;
        assert_eq!(strip_namespace(raw), r#"<fmresultset  version="1.0">"#);

        let plain = "<fmresultset>";
        assert!(matches!(strip_namespace(plain), Cow::Borrowed(_)));
    }

    #[test]
    fn test_error_checked_before_formats() {
        // A failing response may omit everything after <error>.
        let xml = r#"<fmresultset><error code="105"/></fmresultset>"#;
        let err = parse_resultset(xml, &ParseOptions::default()).unwrap_err();
        assert_eq!(err.protocol_code(), Some(105));
    }

    #[test]
    fn test_wrong_root_element() {
        let xml = r#"<fmpxmlresult><error code="0"/></fmpxmlresult>"#;
        let err = parse_resultset(xml, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingElement(_))));
    }

    #[test]
    fn test_missing_error_element() {
        let xml = r#"<fmresultset><datasource/></fmresultset>"#;
        let err = parse_resultset(xml, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
