//! Error types

mod config;
mod field;
mod parameter;
mod parse;
mod protocol;

pub use config::*;
pub use field::*;
pub use parameter::*;
pub use parse::*;
pub use protocol::*;

/// Top-level error returned by parsing and query building.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The response document is not well-formed or does not follow the
    /// `fmresultset` grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The server reported a nonzero error code.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A query directive exceeded a protocol limit.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The connection configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns the server error code if this is a protocol error.
    pub fn protocol_code(&self) -> Option<i32> {
        match self {
            Self::Protocol(e) => Some(e.code()),
            _ => None,
        }
    }

    /// Returns `true` if the server reported that no records matched.
    pub fn is_no_records(&self) -> bool {
        matches!(self, Self::Protocol(e) if e.is_no_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_code() {
        let err = Error::from(ProtocolError::new(105));
        assert_eq!(err.protocol_code(), Some(105));
        assert!(!err.is_no_records());

        let err = Error::from(ProtocolError::new(401));
        assert!(err.is_no_records());

        let err = Error::from(ParameterError::TooManySortFields { count: 10 });
        assert_eq!(err.protocol_code(), None);
    }
}
