//! Response document errors

/// The response is not well-formed XML or does not follow the
/// `fmresultset` grammar.
///
/// These are never retryable: the same bytes will fail the same way.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The XML reader rejected the input.
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The input contained no root element.
    #[error("Document has no root element")]
    EmptyDocument,

    /// The input ended while an element was still open.
    #[error("Unclosed element <{0}>")]
    UnclosedElement(String),

    /// A second top-level element followed the root.
    #[error("Unexpected element <{0}> after the document root")]
    TrailingElement(String),

    /// An entity reference that is neither predefined nor a character reference.
    #[error("Unknown entity reference '&{0};'")]
    UnknownEntity(String),

    /// Elements are nested deeper than any `fmresultset` response allows.
    #[error("Elements nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// A required element is absent.
    #[error("Missing required element <{0}>")]
    MissingElement(String),

    /// A required attribute is absent.
    #[error("Element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: String,
    },

    /// An attribute that must be a decimal integer is not one.
    #[error("Attribute '{attribute}' on <{element}> is not a valid integer: {value:?}")]
    InvalidInteger {
        element: String,
        attribute: String,
        value: String,
    },
}

impl ParseError {
    /// Creates a new missing attribute error.
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates a new invalid integer error.
    pub fn invalid_integer(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidInteger {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}
