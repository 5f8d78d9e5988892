//! The two data shapes arbcodec converts between.
//!
//! - [`csv`]: one table, one row per key, one column per locale.
//! - [`arb`]: one JSON document per locale.

pub mod arb;
pub mod csv;

pub use arb::Document;
pub use csv::{ColumnLayout, Table, TableRow};
