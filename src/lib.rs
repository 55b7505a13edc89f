//! # stegbmp
//!
//! Core logic for hiding a secret file inside the least-significant bits
//! of a 24-bit uncompressed BMP image, and recovering it again later.

pub mod bits;
pub mod bmp;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod handler;
pub mod layout;
