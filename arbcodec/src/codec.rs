//! End-to-end conversions between a CSV table and an ARB resource set.
//!
//! Each conversion loads one [`Catalog`] from its source, hands it to the opposite
//! adapter, and drops it. The load and save halves are exposed separately so callers
//! can supply their own [`ByteSource`] or [`FileSet`].

use std::path::Path;

use tracing::debug;

use crate::{
    error::Error,
    file_set::{DirFileSet, FileSet},
    formats::{arb, csv},
    options::{ArbOptions, TableOptions},
    source::{AnySource, ByteSource},
    traits::Parser,
    types::Catalog,
};

/// Fetches a CSV table through `source` and parses it into a catalog.
pub fn load_catalog_from_csv(
    source: &impl ByteSource,
    locator: &str,
    options: &TableOptions,
) -> Result<Catalog, Error> {
    options.validate()?;
    let bytes = source.fetch(locator)?;
    debug!(locator, bytes = bytes.len(), "table fetched");
    csv::parse_table(&bytes, options)
}

/// Reads every resource document in `dir` and merges them into a catalog.
pub fn load_catalog_from_arb(
    files: &impl FileSet,
    dir: &Path,
    options: &ArbOptions,
) -> Result<Catalog, Error> {
    options.validate()?;
    let documents = arb::read_documents(files, dir, options)?;
    arb::documents_to_catalog(&documents, options)
}

/// Replaces the contents of `dir` with one document per locale of `catalog`.
pub fn save_catalog_as_arb(
    files: &mut impl FileSet,
    dir: &Path,
    catalog: &Catalog,
    options: &ArbOptions,
) -> Result<(), Error> {
    let documents = arb::catalog_to_documents(catalog, options)?;
    arb::write_documents(files, dir, &documents)
}

/// Writes `catalog` as a CSV table to `path`.
pub fn save_catalog_as_csv<P: AsRef<Path>>(
    catalog: &Catalog,
    path: P,
    options: &TableOptions,
) -> Result<(), Error> {
    let table = csv::catalog_to_table(catalog, options)?;
    table.write_to(&path)?;
    debug!(path = %path.as_ref().display(), rows = table.rows.len(), "table written");
    Ok(())
}

/// Converts the CSV table at `src` (a file path or an HTTP(S) URL) into ARB files
/// in `arb_dir`. The directory is cleared first.
///
/// # Example
///
/// ```rust,no_run
/// use arbcodec::{ArbOptions, TableOptions, csv_to_arb};
///
/// csv_to_arb(
///     "translations.csv",
///     "lib/l10n",
///     &TableOptions::default(),
///     &ArbOptions::default(),
/// )?;
/// # Ok::<(), arbcodec::Error>(())
/// ```
pub fn csv_to_arb<P: AsRef<Path>>(
    src: &str,
    arb_dir: P,
    table_options: &TableOptions,
    arb_options: &ArbOptions,
) -> Result<(), Error> {
    arb_options.validate()?;
    arb_options.validate_template()?;
    let catalog = load_catalog_from_csv(&AnySource::new(), src, table_options)?;
    save_catalog_as_arb(&mut DirFileSet, arb_dir.as_ref(), &catalog, arb_options)
}

/// Converts the ARB files in `arb_dir` into one CSV table at `csv_path`.
///
/// # Example
///
/// ```rust,no_run
/// use arbcodec::{ArbOptions, TableOptions, arb_to_csv};
///
/// arb_to_csv("lib/l10n", "translations.csv", &ArbOptions::default(), &TableOptions::default())?;
/// # Ok::<(), arbcodec::Error>(())
/// ```
pub fn arb_to_csv<P: AsRef<Path>, Q: AsRef<Path>>(
    arb_dir: P,
    csv_path: Q,
    arb_options: &ArbOptions,
    table_options: &TableOptions,
) -> Result<(), Error> {
    table_options.validate()?;
    let catalog = load_catalog_from_arb(&DirFileSet, arb_dir.as_ref(), arb_options)?;
    save_catalog_as_csv(&catalog, csv_path, table_options)
}
