mod cli;

use crate::cli::Cli;

fn main() {
    if let Err(err) = Cli::run_from_args() {
        eprintln!("depfetch error: {:#}", err);
        std::process::exit(1);
    }
}
