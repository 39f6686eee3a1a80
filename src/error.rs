use std::path::PathBuf;

use thiserror::Error;

/// Why a single input line was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordErrorKind {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("age '{0}' is not a whole number")]
    InvalidAge(String),

    #[error("age {0} is out of range")]
    AgeOutOfRange(u32),

    #[error("{field} must be 'yes' or 'no', got '{value}'")]
    InvalidFlag { field: &'static str, value: String },

    #[error("zip code '{0}' is malformed")]
    InvalidZip(String),

    #[error("{field} '{value}' is not a valid coordinate")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("duplicate entry for '{0}'")]
    Duplicate(String),
}

/// A rejected line together with its 1-based line number
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {kind}")]
pub struct RecordError {
    pub line: usize,
    pub kind: RecordErrorKind,
}

impl RecordError {
    pub fn new(line: usize, kind: RecordErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Failures while resolving a coordinate or scanning for a site
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    #[error("zip code {0} is not in the reference table")]
    UnknownZip(String),

    #[error("no vaccine sites are loaded")]
    NoSites,
}

/// Failures opening or reading an input file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rows parsed from a file plus the lines that were rejected on the way
#[derive(Debug)]
pub struct LoadReport<T> {
    pub value: T,
    pub rejected: Vec<RecordError>,
}

impl<T> LoadReport<T> {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Log each rejected line and hand back the loaded value
    pub fn into_logged(self, source: &str) -> T {
        if !self.is_clean() {
            tracing::warn!("{}: {} lines rejected", source, self.rejected.len());
        }
        for err in &self.rejected {
            tracing::warn!("{}: skipped {}", source, err);
        }
        self.value
    }
}

pub(crate) fn read_file(path: &std::path::Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_logged_keeps_value() {
        let report = LoadReport {
            value: 3,
            rejected: vec![RecordError::new(2, RecordErrorKind::InvalidZip("1".into()))],
        };
        assert!(!report.is_clean());
        assert_eq!(report.into_logged("test"), 3);
    }

    #[test]
    fn test_record_error_message() {
        let err = RecordError::new(4, RecordErrorKind::AgeOutOfRange(200));
        assert_eq!(err.to_string(), "line 4: age 200 is out of range");
    }
}
