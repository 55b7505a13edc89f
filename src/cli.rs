//! Command line surface, defined with `clap`.

use clap::Parser;
use std::path::PathBuf;

/// Hide a secret file inside a 24-bit uncompressed BMP image, or recover
/// one that was hidden earlier.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Hide a secret file inside the least-significant bits of a 24-bit \
uncompressed BMP image, or recover one that was hidden earlier. Only the LSB of \
each pixel byte is touched, so the image still looks unchanged."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug)]
pub enum Commands {
    /// Hide a secret file inside a BMP carrier image.
    Encode(EncodeArgs),

    /// Recover the hidden secret file from a stego image.
    Decode(DecodeArgs),
}

#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// Path of the 24-bit BMP carrier image.
    #[arg(short, long)]
    pub image: PathBuf,

    /// Path of the secret file to hide (.c, .txt or .sh).
    #[arg(short, long)]
    pub secret: PathBuf,

    /// Where to write the stego image. Defaults to 'stego.bmp' next to the
    /// carrier.
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Overwrite the output file if it already exists.
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Path of the stego image produced by 'encode'.
    #[arg(short, long)]
    pub image: PathBuf,

    /// Output name without an extension; the recovered extension is appended
    /// automatically. Defaults to 'secret_file' next to the image.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it already exists.
    #[arg(short, long)]
    pub force: bool,
}
