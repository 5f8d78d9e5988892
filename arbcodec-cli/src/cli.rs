use std::path::PathBuf;

use arbcodec::{ArbOptions, TableOptions};
use clap::{Parser, Subcommand};

use crate::logging::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "arbc",
    author,
    version,
    about = "Convert CSV localization tables to ARB files and back",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub commands: Commands,

    /// Log verbosity (RUST_LOG overrides this when set)
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Error)]
    pub log_level: LogLevel,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a CSV table (file path or URL) into ARB files.
    Csv2arb(Csv2ArbArgs),

    /// Convert a folder of ARB files into a CSV table.
    Arb2csv(Arb2CsvArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct Csv2ArbArgs {
    /// URL or path of the CSV file
    #[arg(long)]
    pub src: String,

    /// ARB file name template; `{culture}` is replaced by the locale
    #[arg(long, default_value = "app_{culture}.arb")]
    pub arb_template: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct Arb2CsvArgs {
    /// Path of the CSV file to write
    #[arg(long)]
    pub csv_path: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Flags shared by both directions.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// ARB folder path (the folder holds one ARB file per culture)
    #[arg(long)]
    pub arb_path: PathBuf,

    /// Label of the key-name column in the CSV header
    #[arg(long, default_value = "name")]
    pub col_name: String,

    /// Label of the description column; pass an empty string if there is none
    #[arg(long, default_value = "description")]
    pub col_descr: String,

    /// Label of the parameters column; pass an empty string if there is none
    #[arg(long, default_value = "parameters")]
    pub col_params: String,

    /// Default culture, the source of descriptions and placeholders
    #[arg(long, default_value = "en")]
    pub culture: String,
}

impl CommonArgs {
    pub fn table_options(&self) -> TableOptions {
        TableOptions::new()
            .with_name_column(self.col_name.clone())
            .with_description_column(Some(self.col_descr.clone()))
            .with_parameters_column(Some(self.col_params.clone()))
            .with_default_locale(self.culture.clone())
    }

    pub fn arb_options(&self) -> ArbOptions {
        ArbOptions::new().with_default_locale(self.culture.clone())
    }
}
