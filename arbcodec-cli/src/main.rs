use arbcodec_cli::convert::{run_arb2csv, run_csv2arb};
use arbcodec_cli::{Args, Commands, logging};
use clap::Parser;

fn main() {
    let args = Args::parse();
    logging::init(args.log_level);

    let result = match &args.commands {
        Commands::Csv2arb(csv2arb) => run_csv2arb(csv2arb),
        Commands::Arb2csv(arb2csv) => run_arb2csv(arb2csv),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
