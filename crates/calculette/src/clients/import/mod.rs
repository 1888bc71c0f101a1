mod normalizer;
mod parser;

pub use parser::CommercialRow;

use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use parser::ParsedRow;

#[derive(Debug)]
pub enum CommercialImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for CommercialImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommercialImportError::Io(err) => {
                write!(f, "failed to read commercial parameters file: {}", err)
            }
            CommercialImportError::Csv(err) => {
                write!(f, "invalid commercial parameters CSV: {}", err)
            }
            CommercialImportError::MissingColumn(column) => {
                write!(f, "commercial parameters CSV has no '{}' column", column)
            }
        }
    }
}

impl std::error::Error for CommercialImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommercialImportError::Io(err) => Some(err),
            CommercialImportError::Csv(err) => Some(err),
            CommercialImportError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for CommercialImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CommercialImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// A row that could not be applied, with its 1-based line in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRejection {
    pub line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub reason: String,
}

/// Rows ready to apply plus the rows rejected while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommercialBatch {
    pub rows: Vec<CommercialRow>,
    pub rejected: Vec<RowRejection>,
}

/// Result of applying a batch to the client store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub rejected: Vec<RowRejection>,
}

pub struct CommercialImporter;

impl CommercialImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CommercialBatch, CommercialImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a commercial parameters export. Later rows for an already seen client are
    /// rejected rather than overwriting the first one.
    pub fn from_reader<R: Read>(reader: R) -> Result<CommercialBatch, CommercialImportError> {
        let mut batch = CommercialBatch::default();
        let mut seen: HashMap<String, u64> = HashMap::new();

        for parsed in parser::parse_rows(reader)? {
            match parsed {
                ParsedRow::Valid(row) => {
                    if let Some(first_line) = seen.get(&row.client_id) {
                        batch.rejected.push(RowRejection {
                            line: row.line,
                            client_id: Some(row.client_id.clone()),
                            reason: format!("duplicate client id (first seen on line {first_line})"),
                        });
                        continue;
                    }
                    seen.insert(row.client_id.clone(), row.line);
                    batch.rows.push(row);
                }
                ParsedRow::Rejected(rejection) => batch.rejected.push(rejection),
            }
        }

        Ok(batch)
    }
}
