use clap::Parser;

use stegbmp::{
    cli::{Cli, Commands},
    handler::{handle_decode, handle_encode},
};

/// Entry point: parse the command line and dispatch to the matching
/// pipeline. Any error bubbles up as a non-zero exit with its context chain.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => handle_encode(args),
        Commands::Decode(args) => handle_decode(args),
    }
}
