use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal stamped into the `source` column of every converted record.
pub const SOURCE_TAG: &str = "realintent";

/// Optional source column copied into `note`.
pub const INSIGHT_COLUMN: &str = "insight";

/// RealIntent column -> RealScout column, in output order.
pub const COLUMN_MAPPING: [(&str, &str); 9] = [
    ("first_name", "first_name"),
    ("last_name", "last_name"),
    ("phone_1", "phone_number"),
    ("email_1", "email"),
    ("email_2", "secondary_email"),
    ("address", "street_address"),
    ("city", "city"),
    ("state", "state_abbrev"),
    ("zip_code", "postal_code"),
];

/// Header of the RealScout import file.
pub const OUTPUT_COLUMNS: [&str; 12] = [
    "first_name",
    "last_name",
    "phone_number",
    "email",
    "secondary_email",
    "street_address",
    "city",
    "state_abbrev",
    "postal_code",
    "note",
    "source",
    "tags",
];

pub fn required_columns() -> impl Iterator<Item = &'static str> {
    COLUMN_MAPPING.iter().map(|(source, _)| *source)
}

/// One named input as handed over by a [`Source`](crate::domain::ports::Source).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A parsed CSV: header plus rows of raw cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// A row in RealScout's import schema. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub secondary_email: String,
    pub street_address: String,
    pub city: String,
    pub state_abbrev: String,
    pub postal_code: String,
    pub note: String,
    pub source: String,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FileStatus {
    Success,
    MissingColumns(Vec<String>),
    InvalidCsv(String),
}

impl FileStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, FileStatus::Success)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Success => write!(f, "Success"),
            FileStatus::MissingColumns(columns) => {
                write!(f, "Error: Missing columns [{}]", columns.join(", "))
            }
            FileStatus::InvalidCsv(message) => write!(f, "Error: Invalid CSV ({})", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub filename: String,
    pub rows: usize,
    pub status: FileStatus,
}

/// How rows with an empty `email` take part in deduplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum EmptyEmailPolicy {
    /// Empty emails compare equal, so only the first such row survives.
    #[default]
    Collapse,
    /// Every empty-email row is kept.
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub files: Vec<FileOutcome>,
    pub rows_before_dedup: usize,
    pub duplicates_removed: usize,
    pub final_rows: usize,
    pub output_filename: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<ConvertedRecord>,
    pub report: ConversionReport,
}

#[derive(Debug, Clone)]
pub struct LoadResult {
    pub output_path: String,
    pub report: ConversionReport,
}
