mod args;
mod rank;

use clap::Parser;
use log::{debug, warn, LevelFilter};
use snafu::ErrorCompat;

fn init_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let args = args::Args::parse();
    init_logger(args.verbose);
    debug!("args: {:?}", args);

    let res = rank::context_from_args(&args)
        .and_then(|ctx| rank::run_ranking(&ctx, args.reference.clone()));

    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&*e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
