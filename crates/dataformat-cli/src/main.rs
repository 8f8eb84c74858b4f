//! `dataformat`: inspect documents with the built-in data formats

use clap::Parser;
use dataformat_cli::{logger, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}
