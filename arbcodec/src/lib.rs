#![forbid(unsafe_code)]
//! Converts localization data between a CSV table and a set of per-locale ARB files.
//!
//! Translators edit one spreadsheet (one row per key, one column per locale, plus
//! optional description and parameter columns) while the application ships one
//! `app_<locale>.arb` document per locale. Both shapes load into the same
//! normalized [`Catalog`], and every conversion passes through it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use arbcodec::{ArbOptions, TableOptions, arb_to_csv, csv_to_arb};
//!
//! let table = TableOptions::default().with_default_locale("en");
//! let arb = ArbOptions::default().with_default_locale("en");
//!
//! // Spreadsheet export (file or URL) to ARB files
//! csv_to_arb("translations.csv", "lib/l10n", &table, &arb)?;
//!
//! // And back
//! arb_to_csv("lib/l10n", "translations.csv", &arb, &table)?;
//! # Ok::<(), arbcodec::Error>(())
//! ```
//!
//! # Formats
//!
//! - **CSV**: header row first; `;` separates parameter names.
//! - **ARB**: JSON objects; `@@locale` names the locale, `@key` holds the
//!   description and placeholders of `key` (read from the default locale only).

pub mod codec;
pub mod error;
pub mod file_set;
pub mod formats;
pub mod options;
pub mod source;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{
        arb_to_csv, csv_to_arb, load_catalog_from_arb, load_catalog_from_csv,
        save_catalog_as_arb, save_catalog_as_csv,
    },
    error::Error,
    file_set::{DirFileSet, FileSet, MemoryFileSet},
    options::{ArbOptions, TableOptions},
    source::{AnySource, ByteSource, FileSource, HttpSource},
    types::{Catalog, Entry},
};
