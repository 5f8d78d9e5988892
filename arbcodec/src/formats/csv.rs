//! Support for the tabular (CSV) localization format.
//!
//! The first row is a header naming the key column, the optional description and
//! parameters columns, and one column per locale. Every following row is one key.
//! Rows are strict: each must have exactly as many fields as the header.
use std::{
    collections::{BTreeMap, BTreeSet},
    io::{BufRead, Write},
};

use tracing::{debug, trace};

use crate::{
    error::Error,
    options::TableOptions,
    traits::Parser,
    types::{Catalog, Entry},
};

/// Separator between parameter names in the parameters column.
pub const PARAMETER_SEPARATOR: char = ';';

/// One data row together with the line it started on in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub line: u64,
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new(line: u64, cells: Vec<String>) -> Self {
        Self { line, cells }
    }
}

/// Raw CSV content: a header row and the data rows below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Parser for Table {
    /// Parse from any reader. A byte-order mark is honoured, so UTF-16 exports
    /// from spreadsheet tools are decoded as well as UTF-8.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(reader);
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(decoder);

        let mut records = rdr.records();
        let header = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Err(Error::MissingHeader),
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            rows.push(TableRow::new(
                line,
                record.iter().map(str::to_string).collect(),
            ));
        }

        Ok(Table { header, rows })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(&row.cells)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Column roles inferred from a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub description: Option<usize>,
    pub parameters: Option<usize>,
    /// Lower-cased locale id → column index.
    pub locales: BTreeMap<String, usize>,
    /// Number of fields every data row must have.
    pub width: usize,
}

enum Role {
    Name,
    Description,
    Parameters,
}

/// Maps each header cell to its role.
///
/// Cells matching a configured label take that role; every other non-empty cell is a
/// locale. Empty cells are unused columns.
pub fn infer_layout(header: &[String], options: &TableOptions) -> Result<ColumnLayout, Error> {
    options.validate()?;

    let mut name = None;
    let mut description = None;
    let mut parameters = None;
    let mut locales = BTreeMap::new();

    for (index, label) in header.iter().enumerate() {
        if label.is_empty() {
            continue;
        }

        let role = if *label == options.name_column {
            Some((Role::Name, &mut name))
        } else if options.description_column.as_ref() == Some(label) {
            Some((Role::Description, &mut description))
        } else if options.parameters_column.as_ref() == Some(label) {
            Some((Role::Parameters, &mut parameters))
        } else {
            None
        };

        match role {
            Some((role, slot)) => {
                if slot.is_some() {
                    return Err(Error::DuplicateColumn {
                        label: label.clone(),
                    });
                }
                trace!(column = index, role = role.as_str(), "header column");
                *slot = Some(index);
            }
            None => {
                let locale = label.to_lowercase();
                if locales.contains_key(&locale) {
                    return Err(Error::DuplicateColumn {
                        label: label.clone(),
                    });
                }
                trace!(column = index, %locale, "locale column");
                locales.insert(locale, index);
            }
        }
    }

    let Some(name) = name else {
        return Err(Error::MissingNameColumn {
            label: options.name_column.clone(),
        });
    };
    if locales.is_empty() {
        return Err(Error::NoLocalesFound);
    }
    let default_locale = options.default_locale_key();
    if !locales.contains_key(&default_locale) {
        return Err(Error::MissingDefaultLocaleColumn {
            locale: default_locale,
        });
    }

    Ok(ColumnLayout {
        name,
        description,
        parameters,
        locales,
        width: header.len(),
    })
}

impl Role {
    fn as_str(&self) -> &'static str {
        match self {
            Role::Name => "name",
            Role::Description => "description",
            Role::Parameters => "parameters",
        }
    }
}

/// Splits a parameters cell on `;`, trimming names and dropping empty pieces.
pub fn parse_parameters(key: &str, cell: &str) -> Result<BTreeSet<String>, Error> {
    let mut parameters = BTreeSet::new();
    for piece in cell.split(PARAMETER_SEPARATOR) {
        let parameter = piece.trim();
        if parameter.is_empty() {
            continue;
        }
        if !parameters.insert(parameter.to_string()) {
            return Err(Error::DuplicateParameter {
                key: key.to_string(),
                parameter: parameter.to_string(),
            });
        }
    }
    Ok(parameters)
}

/// Builds a catalog from a parsed table.
pub fn table_to_catalog(table: &Table, options: &TableOptions) -> Result<Catalog, Error> {
    let layout = infer_layout(&table.header, options)?;

    let mut catalog = Catalog::new();
    for locale in layout.locales.keys() {
        catalog.add_locale(locale)?;
    }

    for row in &table.rows {
        if row.cells.len() != layout.width {
            return Err(Error::RowWidthMismatch {
                line: row.line,
                found: row.cells.len(),
                expected: layout.width,
            });
        }

        let key = &row.cells[layout.name];
        if key.is_empty() {
            return Err(Error::EmptyKey { line: row.line });
        }

        let mut entry = Entry::new();
        if let Some(index) = layout.description {
            entry.description = row.cells[index].clone();
        }
        if let Some(index) = layout.parameters {
            entry.parameters = parse_parameters(key, &row.cells[index])?;
        }
        for (locale, index) in &layout.locales {
            entry
                .translations
                .insert(locale.clone(), row.cells[*index].clone());
        }

        catalog.insert_entry(key.clone(), entry)?;
    }

    debug!(
        entries = catalog.entries.len(),
        locales = catalog.locales.len(),
        "table converted to catalog"
    );
    Ok(catalog)
}

/// Parses CSV bytes straight into a catalog.
pub fn parse_table(bytes: &[u8], options: &TableOptions) -> Result<Catalog, Error> {
    let table = Table::from_bytes(bytes)?;
    table_to_catalog(&table, options)
}

/// Lays a catalog out as a table: name, description, parameters, then one column per
/// locale in catalog order. Missing translations become empty cells.
pub fn catalog_to_table(catalog: &Catalog, options: &TableOptions) -> Result<Table, Error> {
    options.validate()?;
    catalog.validate()?;
    catalog.ensure_default_locale(&options.default_locale)?;

    let mut header = vec![options.name_column.clone()];
    header.extend(options.description_column.iter().cloned());
    header.extend(options.parameters_column.iter().cloned());
    // A locale spelled like a configured label would be read back as that column.
    if let Some(locale) = catalog.locales.iter().find(|locale| header.contains(*locale)) {
        return Err(Error::DuplicateColumn {
            label: locale.clone(),
        });
    }
    header.extend(catalog.locales.iter().cloned());

    let separator = PARAMETER_SEPARATOR.to_string();
    let rows = catalog
        .entries
        .iter()
        .enumerate()
        .map(|(i, (key, entry))| {
            let mut cells = vec![key.clone()];
            if options.description_column.is_some() {
                cells.push(entry.description.clone());
            }
            if options.parameters_column.is_some() {
                cells.push(
                    entry
                        .parameters
                        .iter()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(&separator),
                );
            }
            for locale in &catalog.locales {
                cells.push(entry.translation(locale).unwrap_or_default().to_string());
            }
            // Line 1 is the header.
            TableRow::new(i as u64 + 2, cells)
        })
        .collect();

    Ok(Table { header, rows })
}
