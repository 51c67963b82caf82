//! Date and time format conversion

use serde::Serialize;

/// Server format tokens and their strftime replacements.
///
/// `yyyy` comes first so the scan never splits it into shorter tokens.
const TOKENS: [(&str, &str); 6] = [
    ("yyyy", "%Y"),
    ("MM", "%m"),
    ("dd", "%d"),
    ("HH", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
];

/// The three strftime patterns a response declares for its values.
///
/// Derived once per document from the `datasource` element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DateFormats {
    /// Pattern for date fields.
    pub date: String,
    /// Pattern for time fields.
    pub time: String,
    /// Pattern for timestamp fields.
    pub timestamp: String,
}

impl DateFormats {
    /// Builds patterns from the server's format strings.
    pub fn from_server(date: &str, time: &str, timestamp: &str) -> Self {
        Self {
            date: convert_format(date),
            time: convert_format(time),
            timestamp: convert_format(timestamp),
        }
    }
}

/// Converts a server date/time format string into a strftime pattern.
///
/// The input is scanned once, left to right. At each position the first
/// matching token is replaced and the scan continues after it, so output
/// of one replacement is never matched again (`"MMmm"` becomes
/// `"%m%M"`). Everything else, including `%`, is copied as-is.
///
/// # Example
///
/// ```
/// use filemaker_lib::model::convert_format;
///
/// assert_eq!(convert_format("MM/dd/yyyy"), "%m/%d/%Y");
/// assert_eq!(convert_format("HH:mm:ss"), "%H:%M:%S");
/// ```
pub fn convert_format(format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 4);
    let mut rest = format;

    'scan: while !rest.is_empty() {
        for (token, replacement) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'scan;
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}
