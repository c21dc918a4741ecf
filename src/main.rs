use clap::Parser;
use log::info;

mod args;
mod topsis;

fn main() {
    let args = args::Args::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if args.verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    }
    log_builder.init();
    info!("args: {:?}", args);

    if let Err(e) = topsis::run_ranking(&args) {
        eprintln!("An error occured: {}", e);
        std::process::exit(1);
    }
}
