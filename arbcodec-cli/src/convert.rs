use arbcodec::{Error, arb_to_csv, csv_to_arb};
use tracing::info;

use crate::cli::{Arb2CsvArgs, Csv2ArbArgs};

pub fn run_csv2arb(args: &Csv2ArbArgs) -> Result<(), Error> {
    let table_options = args.common.table_options();
    let arb_options = args
        .common
        .arb_options()
        .with_file_template(args.arb_template.clone());

    info!(src = %args.src, arb_path = %args.common.arb_path.display(), "csv2arb");
    csv_to_arb(&args.src, &args.common.arb_path, &table_options, &arb_options)?;
    println!(
        "✅ Converted {} into {}",
        args.src,
        args.common.arb_path.display()
    );
    Ok(())
}

pub fn run_arb2csv(args: &Arb2CsvArgs) -> Result<(), Error> {
    let table_options = args.common.table_options();
    let arb_options = args.common.arb_options();

    info!(
        arb_path = %args.common.arb_path.display(),
        csv_path = %args.csv_path.display(),
        "arb2csv"
    );
    arb_to_csv(
        &args.common.arb_path,
        &args.csv_path,
        &arb_options,
        &table_options,
    )?;
    println!(
        "✅ Converted {} into {}",
        args.common.arb_path.display(),
        args.csv_path.display()
    );
    Ok(())
}
