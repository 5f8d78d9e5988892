//! Reader/writer plumbing shared by the on-disk formats.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// A format that round-trips through a byte stream.
///
/// Implementors provide [`Parser::from_reader`] and [`Parser::to_writer`]; the
/// path, string and buffer variants are derived from those two. Failures to open
/// or create a file are reported as [`Error::FileAccess`] naming the path.
///
/// ```rust,no_run
/// use arbcodec::{formats::Table, traits::Parser};
///
/// let table = Table::read_from("translations.csv")?;
/// println!("{} rows", table.rows.len());
/// # Ok::<(), arbcodec::Error>(())
/// ```
pub trait Parser: Sized {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>;

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(&path).map_err(|e| Error::file_access(&path, e))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Creates or truncates `path`.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(&path).map_err(|e| Error::file_access(&path, e))?;
        self.to_writer(BufWriter::new(file))
    }

    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buffer = Vec::new();
        self.to_writer(&mut buffer)?;
        Ok(buffer)
    }

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_reader(Cursor::new(s))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_reader(Cursor::new(bytes))
    }
}
