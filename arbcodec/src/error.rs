//! All error types for the arbcodec crate.
//!
//! Every failure of a conversion is classified here. Adapter errors are terminal:
//! a conversion either produces a fully valid [`crate::Catalog`] or one of these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("table is empty: a header row is required")]
    MissingHeader,

    #[error("table must have a `{label}` column for key names")]
    MissingNameColumn { label: String },

    #[error("column `{label}` appears more than once in the header")]
    DuplicateColumn { label: String },

    #[error("no locale columns found in the header")]
    NoLocalesFound,

    #[error("table must have a column for the default locale `{locale}`")]
    MissingDefaultLocaleColumn { locale: String },

    #[error("row at line {line} has {found} fields, but the header has {expected}")]
    RowWidthMismatch {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("row at line {line} has an empty key name")]
    EmptyKey { line: u64 },

    #[error("catalog has an entry with an empty key name")]
    UnnamedEntry,

    #[error("key `{key}` is defined more than once")]
    DuplicateKey { key: String },

    #[error("key `{key}` lists parameter `{parameter}` more than once")]
    DuplicateParameter { key: String, parameter: String },

    #[error("cannot detect locale for `{file}`")]
    CannotDetectLocale { file: String },

    #[error("locale `{locale}` is provided by both `{first}` and `{second}`")]
    DuplicateLocale {
        locale: String,
        first: String,
        second: String,
    },

    #[error("invalid document `{file}`: {source}")]
    InvalidDocument {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("default locale `{locale}` is not among the loaded locales")]
    MissingDefaultLocale { locale: String },

    #[error("key `{key}` has a translation for unknown locale `{locale}`")]
    UnknownLocale { key: String, locale: String },

    #[error("key `{key}` starts with `@`, which is reserved for resource metadata")]
    ReservedKey { key: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot access `{path}`: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot fetch `{locator}`: {message}")]
    Fetch { locator: String, message: String },
}

impl Error {
    /// Creates a new configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration(message.into())
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn file_access(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Error::FileAccess {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Creates a new fetch error for the given locator.
    pub fn fetch(locator: impl Into<String>, message: impl ToString) -> Self {
        Error::Fetch {
            locator: locator.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_row_width_mismatch_message() {
        let error = Error::RowWidthMismatch {
            line: 3,
            found: 2,
            expected: 4,
        };
        assert_eq!(
            error.to_string(),
            "row at line 3 has 2 fields, but the header has 4"
        );
    }

    #[test]
    fn test_duplicate_locale_names_both_files() {
        let error = Error::DuplicateLocale {
            locale: "ru".to_string(),
            first: "app_ru.arb".to_string(),
            second: "other_ru.arb".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("app_ru.arb"));
        assert!(message.contains("other_ru.arb"));
    }

    #[test]
    fn test_invalid_document_keeps_source() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::InvalidDocument {
            file: "app_en.arb".to_string(),
            source: json_error,
        };
        assert!(error.to_string().contains("app_en.arb"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::from(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_file_access_names_path() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = Error::file_access("l10n/app_en.arb", io_error);
        assert_eq!(error.to_string(), "cannot access `l10n/app_en.arb`: denied");
    }

    #[test]
    fn test_helpers() {
        let error = Error::invalid_configuration("empty default locale");
        assert_eq!(
            error.to_string(),
            "invalid configuration: empty default locale"
        );

        let error = Error::fetch("https://example.com/t.csv", "status 404");
        assert_eq!(
            error.to_string(),
            "cannot fetch `https://example.com/t.csv`: status 404"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::DuplicateKey {
            key: "title".to_string(),
        };
        let debug = format!("{:?}", error);
        assert!(debug.contains("DuplicateKey"));
        assert!(debug.contains("title"));
    }
}
