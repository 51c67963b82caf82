//! Server error codes

/// Error code the server reports when a find matches no records.
pub const NO_RECORDS_FOUND: i32 = 401;

/// A nonzero error code reported in the `<error>` element of a response.
///
/// The code is classified through a fixed table into an [`ErrorKind`]
/// and, by numeric range, into an [`ErrorCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolError {
    code: i32,
}

impl ProtocolError {
    /// Creates a protocol error for the given server code.
    pub fn new(code: i32) -> Self {
        Self { code }
    }

    /// Returns the numeric code reported by the server.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Returns the classified kind of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_code(self.code)
    }

    /// Returns the range-based category of this error.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code)
    }

    /// Returns `true` if this is the "no records match the request" code.
    pub fn is_no_records(&self) -> bool {
        self.code == NO_RECORDS_FOUND
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FileMaker error {}: {}", self.code, self.kind().description())
    }
}

impl std::error::Error for ProtocolError {}

/// Broad classification of server error codes by numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 0-99: user, memory and command errors.
    System,
    /// 100-199: missing files, records, fields, layouts.
    Missing,
    /// 200-299: access and account errors.
    Security,
    /// 300-399: locking and record-in-use errors.
    Concurrency,
    /// 400-499: find and sort errors.
    General,
    /// 500-599: field validation failures.
    Validation,
    /// 600-699: printing errors.
    Print,
    /// 700-799: import errors.
    Import,
    /// 800-899: file system errors.
    File,
    /// 900-999: command and spelling engine errors.
    Command,
    /// 1200-1299: calculation errors.
    Calculation,
    /// 1400-1499: ODBC errors.
    Odbc,
    /// Anything outside the documented ranges.
    Unknown,
}

impl ErrorCategory {
    /// Classifies a server code by its numeric range.
    pub fn from_code(code: i32) -> Self {
        match code {
            0..=99 => Self::System,
            100..=199 => Self::Missing,
            200..=299 => Self::Security,
            300..=399 => Self::Concurrency,
            400..=499 => Self::General,
            500..=599 => Self::Validation,
            600..=699 => Self::Print,
            700..=799 => Self::Import,
            800..=899 => Self::File,
            900..=999 => Self::Command,
            1200..=1299 => Self::Calculation,
            1400..=1499 => Self::Odbc,
            _ => Self::Unknown,
        }
    }
}

/// Named server error kinds.
///
/// Codes without an entry map to [`ErrorKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown error (-1).
    Unknown,
    /// User cancelled action (1).
    UserCancelled,
    /// Memory error (2).
    Memory,
    /// Command is unavailable (3).
    CommandNotAvailable,
    /// Command is unknown (4).
    CommandUnknown,
    /// Command is invalid (5).
    CommandInvalid,
    /// File is read-only (6).
    FileReadOnly,
    /// Running out of memory (7).
    OutOfMemory,
    /// Empty result (8).
    EmptyResult,
    /// Insufficient privileges (9).
    InsufficientPrivileges,
    /// Requested data is missing (10).
    RequestedDataMissing,
    /// File is missing (100).
    FileMissing,
    /// Record is missing (101).
    RecordMissing,
    /// Field is missing (102).
    FieldMissing,
    /// Relationship is missing (103).
    RelationshipMissing,
    /// Script is missing (104).
    ScriptMissing,
    /// Layout is missing (105).
    LayoutMissing,
    /// Table is missing (106).
    TableMissing,
    /// Index is missing (107).
    IndexMissing,
    /// Value list is missing (108).
    ValueListMissing,
    /// Privilege set is missing (109).
    PrivilegeSetMissing,
    /// Related tables are missing (110).
    RelatedTablesMissing,
    /// Field repetition is invalid (111).
    FieldRepetitionInvalid,
    /// Record access is denied (200).
    RecordAccessDenied,
    /// Field cannot be modified (201).
    FieldCannotBeModified,
    /// Field access is denied (202).
    FieldAccessDenied,
    /// Invalid account or password (212).
    InvalidAccountOrPassword,
    /// File is locked or in use (300).
    FileLocked,
    /// Record is in use by another user (301).
    RecordInUse,
    /// Table is in use by another user (302).
    TableInUse,
    /// Record modification id does not match (306).
    RecordModIdMismatch,
    /// Find criteria are empty (400).
    NoFindCriteria,
    /// No records match the request (401).
    NoRecordsFound,
    /// Selected field is not a match field for a lookup (402).
    NotAMatchField,
    /// Exceeded maximum record limit (403).
    ExceededFindLimit,
    /// Sort order is invalid (404).
    InvalidSortOrder,
    /// Date value does not meet validation entry options (500).
    DateValidation,
    /// Time value does not meet validation entry options (501).
    TimeValidation,
    /// Number value does not meet validation entry options (502).
    NumberValidation,
    /// Value in field is not within the specified range (503).
    ValueOutOfRange,
    /// Value in field is not unique (504).
    ValueNotUnique,
    /// Value in field does not exist in the database (505).
    ValueNotExisting,
    /// Value in field is not listed in the value list (506).
    ValueList,
    /// Value in field failed calculation test (507).
    CalculationValidation,
    /// Field requires a valid value (509).
    FieldRequiresValue,
    /// Value exceeds the maximum number of characters (511).
    ValueExceedsMaxLength,
    /// Unable to open file (802).
    UnableToOpenFile,
    /// Parameter missing or invalid (958).
    InvalidParameter,
    /// Any code not in the table.
    Other,
}

impl ErrorKind {
    /// Looks up the kind for a server code.
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => Self::Unknown,
            1 => Self::UserCancelled,
            2 => Self::Memory,
            3 => Self::CommandNotAvailable,
            4 => Self::CommandUnknown,
            5 => Self::CommandInvalid,
            6 => Self::FileReadOnly,
            7 => Self::OutOfMemory,
            8 => Self::EmptyResult,
            9 => Self::InsufficientPrivileges,
            10 => Self::RequestedDataMissing,
            100 => Self::FileMissing,
            101 => Self::RecordMissing,
            102 => Self::FieldMissing,
            103 => Self::RelationshipMissing,
            104 => Self::ScriptMissing,
            105 => Self::LayoutMissing,
            106 => Self::TableMissing,
            107 => Self::IndexMissing,
            108 => Self::ValueListMissing,
            109 => Self::PrivilegeSetMissing,
            110 => Self::RelatedTablesMissing,
            111 => Self::FieldRepetitionInvalid,
            200 => Self::RecordAccessDenied,
            201 => Self::FieldCannotBeModified,
            202 => Self::FieldAccessDenied,
            212 => Self::InvalidAccountOrPassword,
            300 => Self::FileLocked,
            301 => Self::RecordInUse,
            302 => Self::TableInUse,
            306 => Self::RecordModIdMismatch,
            400 => Self::NoFindCriteria,
            401 => Self::NoRecordsFound,
            402 => Self::NotAMatchField,
            403 => Self::ExceededFindLimit,
            404 => Self::InvalidSortOrder,
            500 => Self::DateValidation,
            501 => Self::TimeValidation,
            502 => Self::NumberValidation,
            503 => Self::ValueOutOfRange,
            504 => Self::ValueNotUnique,
            505 => Self::ValueNotExisting,
            506 => Self::ValueList,
            507 => Self::CalculationValidation,
            509 => Self::FieldRequiresValue,
            511 => Self::ValueExceedsMaxLength,
            802 => Self::UnableToOpenFile,
            958 => Self::InvalidParameter,
            _ => Self::Other,
        }
    }

    /// Returns a short human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown error",
            Self::UserCancelled => "user cancelled action",
            Self::Memory => "memory error",
            Self::CommandNotAvailable => "command is unavailable",
            Self::CommandUnknown => "command is unknown",
            Self::CommandInvalid => "command is invalid",
            Self::FileReadOnly => "file is read-only",
            Self::OutOfMemory => "running out of memory",
            Self::EmptyResult => "empty result",
            Self::InsufficientPrivileges => "insufficient privileges",
            Self::RequestedDataMissing => "requested data is missing",
            Self::FileMissing => "file is missing",
            Self::RecordMissing => "record is missing",
            Self::FieldMissing => "field is missing",
            Self::RelationshipMissing => "relationship is missing",
            Self::ScriptMissing => "script is missing",
            Self::LayoutMissing => "layout is missing",
            Self::TableMissing => "table is missing",
            Self::IndexMissing => "index is missing",
            Self::ValueListMissing => "value list is missing",
            Self::PrivilegeSetMissing => "privilege set is missing",
            Self::RelatedTablesMissing => "related tables are missing",
            Self::FieldRepetitionInvalid => "field repetition is invalid",
            Self::RecordAccessDenied => "record access is denied",
            Self::FieldCannotBeModified => "field cannot be modified",
            Self::FieldAccessDenied => "field access is denied",
            Self::InvalidAccountOrPassword => "invalid account or password",
            Self::FileLocked => "file is locked or in use",
            Self::RecordInUse => "record is in use by another user",
            Self::TableInUse => "table is in use by another user",
            Self::RecordModIdMismatch => "record modification id does not match",
            Self::NoFindCriteria => "find criteria are empty",
            Self::NoRecordsFound => "no records match the request",
            Self::NotAMatchField => "selected field is not a match field for a lookup",
            Self::ExceededFindLimit => "exceeded maximum record limit",
            Self::InvalidSortOrder => "sort order is invalid",
            Self::DateValidation => "date value does not meet validation entry options",
            Self::TimeValidation => "time value does not meet validation entry options",
            Self::NumberValidation => "number value does not meet validation entry options",
            Self::ValueOutOfRange => "value in field is not within the specified range",
            Self::ValueNotUnique => "value in field is not unique",
            Self::ValueNotExisting => "value in field does not exist in the database",
            Self::ValueList => "value in field is not listed in the value list",
            Self::CalculationValidation => "value in field failed calculation test",
            Self::FieldRequiresValue => "field requires a valid value",
            Self::ValueExceedsMaxLength => "value exceeds the maximum number of characters",
            Self::UnableToOpenFile => "unable to open file",
            Self::InvalidParameter => "parameter missing or invalid",
            Self::Other => "unclassified protocol error",
        }
    }
}
