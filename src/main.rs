use clap::Parser;

use vm_translator::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(err) = cli::run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
