//! CLI library for testing purposes

pub mod cli;
pub mod convert;
pub mod logging;

pub use cli::{Args, Arb2CsvArgs, Commands, CommonArgs, Csv2ArbArgs};
pub use logging::LogLevel;
