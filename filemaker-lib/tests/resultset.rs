//! End-to-end parsing of recorded `fmresultset` responses.

use std::str::FromStr;

use chrono::NaiveDate;
use filemaker_lib::Config;
use filemaker_lib::ParseOptions;
use filemaker_lib::error::Error;
use filemaker_lib::error::ErrorCategory;
use filemaker_lib::error::ErrorKind;
use filemaker_lib::error::FieldError;
use filemaker_lib::error::ParseError;
use filemaker_lib::model::FieldType;
use filemaker_lib::model::Resultset;
use filemaker_lib::model::Value;
use rust_decimal::Decimal;

const CONTACTS: &str = include_str!("fixtures/contacts.xml");
const NO_RECORDS: &str = include_str!("fixtures/no_records.xml");
const LAYOUT_MISSING: &str = include_str!("fixtures/layout_missing.xml");

fn with_portals() -> ParseOptions {
    ParseOptions {
        include_portals: true,
        ..ParseOptions::default()
    }
}

#[test]
fn test_counts_and_formats() {
    let resultset = Resultset::parse(CONTACTS, &ParseOptions::default()).unwrap();

    assert_eq!(resultset.len(), 2);
    assert_eq!(resultset.foundset_count(), resultset.len() as u64);
    assert_eq!(resultset.fetch_size(), Some(2));
    assert_eq!(resultset.total_count(), 57);
    assert_eq!(resultset.date_format(), "%m/%d/%Y");
    assert_eq!(resultset.time_format(), "%H:%M:%S");
    assert_eq!(resultset.timestamp_format(), "%m/%d/%Y %H:%M:%S");
    assert_eq!(resultset.database(), Some("Contacts"));
    assert_eq!(resultset.layout(), Some("Web"));
    assert_eq!(resultset.table(), Some("People"));
}

#[test]
fn test_records_in_document_order() {
    let resultset = Resultset::parse(CONTACTS, &ParseOptions::default()).unwrap();

    let ids: Vec<_> = resultset.iter().map(|r| r.record_id()).collect();
    assert_eq!(ids, [Some(101), Some(102)]);
    assert_eq!(resultset[0].mod_id(), Some(4));
    assert_eq!(resultset.last().unwrap().get_text("FirstName").unwrap(), Some("Ada"));
}

#[test]
fn test_field_metadata_ignores_case() {
    let resultset = Resultset::parse(CONTACTS, &ParseOptions::default()).unwrap();

    assert_eq!(resultset.field_meta().len(), 6);
    for key in ["FirstName", "firstname", "FIRSTNAME"] {
        assert_eq!(resultset.field(key).unwrap().name(), "FirstName");
    }
    assert_eq!(resultset.field("age").unwrap().field_type(), FieldType::Number);
    assert_eq!(resultset.field("phone").unwrap().max_repeat(), 3);
    assert!(resultset.field("Missing").is_none());
}

#[test]
fn test_values_typed_by_metadata() {
    let resultset = Resultset::parse(CONTACTS, &ParseOptions::default()).unwrap();
    let bill = &resultset[0];

    assert_eq!(bill.get_number("age").unwrap(), Some(Decimal::from(42)));
    assert_eq!(
        bill.get_date("birthday").unwrap(),
        NaiveDate::from_ymd_opt(1981, 3, 14)
    );
    assert_eq!(
        bill.get_timestamp("created").unwrap(),
        NaiveDate::from_ymd_opt(2020, 1, 2).and_then(|d| d.and_hms_opt(13, 45, 0))
    );
    assert_eq!(
        bill.get_repeating("phone").unwrap().unwrap(),
        [
            Value::from("555-0100"),
            Value::from("555-0101"),
            Value::Null
        ]
    );

    let ada = &resultset[1];
    assert_eq!(ada.get("age"), Some(&Value::from("unknown")));
    assert_eq!(ada.get_date("birthday").unwrap(), None);
    assert_eq!(ada.get_container("photo").unwrap(), None);
    assert_eq!(ada.get_text("phone").unwrap(), Some("555-0199"));
}

#[test]
fn test_typed_getter_errors() {
    let resultset = Resultset::parse(CONTACTS, &ParseOptions::default()).unwrap();
    let ada = &resultset[1];

    assert!(matches!(
        ada.get_number("age"),
        Err(FieldError::TypeMismatch { .. })
    ));
    assert!(matches!(
        ada.get_text("nickname"),
        Err(FieldError::Missing { .. })
    ));
}

#[test]
fn test_container_resolved_against_config() {
    let config = Config::builder()
        .host("fm.example.com")
        .build()
        .unwrap();
    let resultset = config.parse_resultset(CONTACTS).unwrap();
    let photo = resultset[0].get_container("Photo").unwrap().unwrap();

    assert_eq!(
        photo.path,
        "/fmi/xml/cnt/photo.jpg?-db=Contacts&-lay=Web&-recid=101&-field=Photo"
    );
    assert_eq!(
        photo.url.as_ref().map(|u| u.as_str()),
        Some("https://fm.example.com/fmi/xml/cnt/photo.jpg?-db=Contacts&-lay=Web&-recid=101&-field=Photo")
    );
}

#[test]
fn test_container_without_base_stays_relative() {
    let resultset = Resultset::from_str(CONTACTS).unwrap();
    let photo = resultset[0].get_container("Photo").unwrap().unwrap();
    assert!(photo.url.is_none());
}

#[test]
fn test_portals_excluded_by_default() {
    let resultset = Resultset::parse(CONTACTS, &ParseOptions::default()).unwrap();

    assert!(!resultset.include_portals());
    assert!(resultset.portal_meta().is_empty());
    assert!(resultset[0].portals().is_empty());
    assert!(resultset[0].portal("Orders").is_none());
}

#[test]
fn test_portals_included_on_request() {
    let resultset = Resultset::parse(CONTACTS, &with_portals()).unwrap();

    assert!(resultset.include_portals());
    let orders = resultset.portal("orders").unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders.get("Total").unwrap().name(), "Orders::Total");
    assert!(orders.get("Orders::Total").is_none());

    let related = resultset[0].portal("ORDERS").unwrap();
    assert_eq!(related.len(), 2);
    assert_eq!(related[0].record_id(), Some(9001));
    assert_eq!(
        related[0].get_number("total").unwrap(),
        Some(Decimal::new(1999, 2))
    );
    assert_eq!(
        related[0].get_date("Shipped").unwrap(),
        NaiveDate::from_ymd_opt(2020, 4, 1)
    );
    assert_eq!(related[1].get_date("Shipped").unwrap(), None);

    assert_eq!(resultset[1].portal("Orders").map(|r| r.len()), Some(0));
}

#[test]
fn test_no_records_is_empty_by_default() {
    let resultset = Resultset::parse(NO_RECORDS, &ParseOptions::default()).unwrap();

    assert!(resultset.is_empty());
    assert_eq!(resultset.foundset_count(), 0);
    assert_eq!(resultset.total_count(), 57);
    assert!(resultset.field("FirstName").is_some());
}

#[test]
fn test_no_records_raised_on_request() {
    let options = ParseOptions {
        raise_on_401: true,
        ..ParseOptions::default()
    };
    let err = Resultset::parse(NO_RECORDS, &options).unwrap_err();

    assert!(err.is_no_records());
    assert_eq!(err.protocol_code(), Some(401));
}

#[test]
fn test_other_codes_always_fail() {
    for options in [ParseOptions::default(), with_portals()] {
        let err = Resultset::parse(LAYOUT_MISSING, &options).unwrap_err();
        match err {
            Error::Protocol(e) => {
                assert_eq!(e.code(), 105);
                assert_eq!(e.kind(), ErrorKind::LayoutMissing);
                assert_eq!(e.category(), ErrorCategory::Missing);
                assert!(e.to_string().contains("105"));
            }
            other => panic!("expected protocol error, got {:?}", other),
        }
    }
}

#[test]
fn test_malformed_documents() {
    let truncated = &CONTACTS[..CONTACTS.len() / 2];
    assert!(matches!(
        Resultset::from_str(truncated),
        Err(Error::Parse(_))
    ));

    let no_count = CONTACTS.replace(r#"count="2" fetch-size="2""#, r#"fetch-size="2""#);
    assert!(matches!(
        Resultset::from_str(&no_count),
        Err(Error::Parse(ParseError::MissingAttribute { .. }))
    ));

    let bad_count = CONTACTS.replace(r#"count="2" fetch-size"#, r#"count="two" fetch-size"#);
    assert!(matches!(
        Resultset::from_str(&bad_count),
        Err(Error::Parse(ParseError::InvalidInteger { .. }))
    ));

    let no_metadata = r#"<fmresultset><error code="0"/>
        <datasource date-format="" time-format="" timestamp-format="" total-count="0"/>
        <resultset count="0"/></fmresultset>"#;
    assert!(matches!(
        Resultset::from_str(no_metadata),
        Err(Error::Parse(ParseError::MissingElement(_)))
    ));
}

#[test]
fn test_deeply_nested_document_is_rejected() {
    let depth = 30_000;
    let xml = format!(
        r#"<fmresultset><error code="0"/>{}{}</fmresultset>"#,
        "<a>".repeat(depth),
        "</a>".repeat(depth)
    );
    assert!(matches!(
        Resultset::from_str(&xml),
        Err(Error::Parse(ParseError::TooDeep { .. }))
    ));
}

#[test]
fn test_padded_dates_are_typed() {
    let padded = CONTACTS.replace("<data>03/14/1981</data>", "<data> 03/14/1981 </data>");
    let resultset = Resultset::from_str(&padded).unwrap();
    assert_eq!(
        resultset[0].get_date("Birthday").unwrap(),
        NaiveDate::from_ymd_opt(1981, 3, 14)
    );
}

#[test]
fn test_parse_is_repeatable() {
    let first = Resultset::parse(CONTACTS, &with_portals()).unwrap();
    let second = Resultset::parse(CONTACTS, &with_portals()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parallel_parses() {
    let options = with_portals();
    let expected = Resultset::parse(CONTACTS, &options).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| Resultset::parse(CONTACTS, &options).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_record_serializes_to_json() {
    let resultset = Resultset::parse(CONTACTS, &ParseOptions::default()).unwrap();
    let json = serde_json::to_value(&resultset[1]).unwrap();

    assert_eq!(json["record_id"], 102);
    assert_eq!(json["fields"]["firstname"], "Ada");
    assert_eq!(json["fields"]["birthday"], serde_json::Value::Null);
    assert!(json.get("field_meta").is_none());
}
