//! Command orchestration for `encode` and `decode`.
//!
//! Validates arguments before any file is touched, owns every file handle
//! for the duration of one operation, drives the core pipelines and reports
//! the outcome to the user. A failed encode may leave a truncated output
//! file behind; it must be treated as invalid.

use crate::cli::{DecodeArgs, EncodeArgs};
use crate::config::StegConfig;
use crate::constants::{DEFAULT_SECRET_STEM, DEFAULT_STEGO_NAME};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

fn is_bmp(path: &Path) -> bool {
    matches!(
        image::ImageFormat::from_path(path),
        Ok(image::ImageFormat::Bmp)
    )
}

/// The secret file's extension with its leading dot, if the policy allows it.
fn secret_extension(config: &StegConfig, path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    anyhow::ensure!(
        config.allows_extension(&extension),
        "Unsupported secret file extension on {}. \nSupported extensions: {}",
        path.to_string_lossy().red().bold(),
        config.allowed_extensions.join(", ").green()
    );
    Ok(extension)
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nPass --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// Handles the 'encode' command: validates the arguments, then streams the
/// carrier through the embedding pipeline into the stego image.
///
/// # Errors
///
/// Returns an error when:
/// * the carrier or destination is not a `.bmp` path, or the secret file's
///   extension is not in the allowed set;
/// * any of the three files cannot be opened or created;
/// * the carrier is too small for the secret, or a pipeline stage fails.
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let config = StegConfig::default();

    anyhow::ensure!(
        is_bmp(&args.image),
        "Carrier image must be a .bmp file: {}",
        args.image.to_string_lossy().red().bold()
    );
    let extension = secret_extension(&config, &args.secret)?;

    let dest = match args.dest {
        Some(dest) => {
            anyhow::ensure!(
                is_bmp(&dest),
                "Output image must be a .bmp file: {}",
                dest.to_string_lossy().red().bold()
            );
            dest
        }
        None => {
            println!(
                "No output image given, writing to {}",
                DEFAULT_STEGO_NAME.green()
            );
            args.image.with_file_name(DEFAULT_STEGO_NAME)
        }
    };
    ensure_writable(&dest, args.force)?;

    let secret = fs::read(&args.secret).with_context(|| {
        format!(
            "Unable to read secret file: {}",
            args.secret.to_string_lossy().red().bold()
        )
    })?;
    let src = File::open(&args.image).with_context(|| {
        format!(
            "Unable to open carrier image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let dst = File::create(&dest).with_context(|| {
        format!(
            "Unable to create output image: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    Encoder::new(&config, BufReader::new(src), BufWriter::new(dst))
        .run(&extension, &secret)
        .with_context(|| {
            format!(
                "Failed to hide {} inside {}",
                args.secret.to_string_lossy().red().bold(),
                args.image.to_string_lossy().red().bold()
            )
        })?;

    println!(
        "The secret file has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// Handles the 'decode' command: checks the signature, recovers the
/// extension, then streams the secret bytes into the output file.
///
/// # Errors
///
/// Returns an error when:
/// * the stego image is not a `.bmp` path, or the output name carries an
///   extension of its own;
/// * the image holds no embedded data (signature mismatch);
/// * the container is corrupted, or any file operation fails.
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let config = StegConfig::default();

    anyhow::ensure!(
        is_bmp(&args.image),
        "Stego image must be a .bmp file: {}",
        args.image.to_string_lossy().red().bold()
    );
    let stem = match args.output {
        Some(output) => {
            anyhow::ensure!(
                output
                    .file_name()
                    .is_some_and(|name| !name.to_string_lossy().contains('.')),
                "Output name must not carry an extension, the recovered one is appended automatically: {}",
                output.to_string_lossy().red().bold()
            );
            output
        }
        None => {
            println!(
                "No output name given, writing to {}",
                DEFAULT_SECRET_STEM.green()
            );
            args.image.with_file_name(DEFAULT_SECRET_STEM)
        }
    };

    let src = File::open(&args.image).with_context(|| {
        format!(
            "Unable to open stego image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let mut decoder = Decoder::new(&config, BufReader::new(src));

    decoder.verify_signature().with_context(|| {
        format!(
            "Nothing to recover from {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let extension = decoder
        .read_extension()
        .context("Failed to recover the secret file extension")?;

    let mut dest = stem.into_os_string();
    dest.push(&extension);
    let dest = PathBuf::from(dest);
    ensure_writable(&dest, args.force)?;

    let out = File::create(&dest).with_context(|| {
        format!(
            "Unable to create output file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    let mut writer = BufWriter::new(out);
    let recovered = decoder
        .extract_secret(&mut writer)
        .context("Failed to recover the secret file data")?;
    writer
        .flush()
        .context("Failed to flush the recovered secret file")?;

    println!(
        "Recovered {} bytes into {}",
        recovered.to_string().green(),
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}
