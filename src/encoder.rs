//! Embedding pipeline: copies the BMP header, embeds the container fields
//! in layout order, then copies the untouched remainder of the carrier.

use crate::bits;
use crate::bmp;
use crate::config::StegConfig;
use crate::constants::{BMP_HEADER_SIZE, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_INT};
use crate::error::StegError;
use crate::layout::{self, Field};
use std::io::{self, Read, Write};

/// Streams carrier bytes from `src` to `dst`, flipping only the LSBs that
/// hold the container. The caller discards the output on any failure; no
/// rollback of already-written bytes is attempted here.
pub struct Encoder<'a, R, W> {
    config: &'a StegConfig,
    src: R,
    dst: W,
}

impl<'a, R: Read, W: Write> Encoder<'a, R, W> {
    pub fn new(config: &'a StegConfig, src: R, dst: W) -> Self {
        Self { config, src, dst }
    }

    /// Runs the whole embedding sequence. The capacity gate is evaluated
    /// before a single output byte is written.
    pub fn run(&mut self, extension: &str, secret: &[u8]) -> Result<(), StegError> {
        let mut header = [0u8; BMP_HEADER_SIZE];
        self.src
            .read_exact(&mut header)
            .map_err(|e| StegError::io("bitmap header", e))?;

        let available = bmp::payload_len(&header)?;
        let config = self.config;
        let required =
            layout::container_len(config.signature.len(), extension.len(), secret.len());
        if available <= required {
            return Err(StegError::InsufficientCapacity {
                required,
                available,
            });
        }

        self.dst
            .write_all(&header)
            .map_err(|e| StegError::io("bitmap header", e))?;

        for field in layout::FIELDS {
            self.write_field(field, extension, secret)?;
        }

        self.copy_tail()
    }

    fn write_field(&mut self, field: Field, extension: &str, secret: &[u8]) -> Result<(), StegError> {
        let config = self.config;
        match field {
            Field::Signature => self.write_bytes(field, config.signature.as_bytes()),
            Field::ExtensionLen => {
                let len = encodable_len(Field::Extension, extension.len())?;
                self.write_int(field, len)
            }
            Field::Extension => self.write_bytes(field, extension.as_bytes()),
            Field::SecretLen => {
                let len = encodable_len(Field::Secret, secret.len())?;
                self.write_int(field, len)
            }
            Field::Secret => self.write_bytes(field, secret),
        }
    }

    /// Embeds `data` one byte at a time: read 8 carrier bytes, pack, write.
    fn write_bytes(&mut self, field: Field, data: &[u8]) -> Result<(), StegError> {
        let mut chunk = [0u8; CARRIER_BYTES_PER_BYTE];
        for &byte in data {
            self.src
                .read_exact(&mut chunk)
                .map_err(|e| StegError::io(field.name(), e))?;
            bits::pack_byte(byte, &mut chunk);
            self.dst
                .write_all(&chunk)
                .map_err(|e| StegError::io(field.name(), e))?;
        }
        Ok(())
    }

    fn write_int(&mut self, field: Field, value: i32) -> Result<(), StegError> {
        let mut chunk = [0u8; CARRIER_BYTES_PER_INT];
        self.src
            .read_exact(&mut chunk)
            .map_err(|e| StegError::io(field.name(), e))?;
        bits::pack_int(value, &mut chunk);
        self.dst
            .write_all(&chunk)
            .map_err(|e| StegError::io(field.name(), e))?;
        Ok(())
    }

    /// Copies every carrier byte past the container verbatim.
    fn copy_tail(&mut self) -> Result<(), StegError> {
        io::copy(&mut self.src, &mut self.dst)
            .map_err(|e| StegError::io("trailing image data", e))?;
        self.dst
            .flush()
            .map_err(|e| StegError::io("trailing image data", e))
    }
}

fn encodable_len(field: Field, len: usize) -> Result<i32, StegError> {
    i32::try_from(len).map_err(|_| StegError::FieldTooLong {
        field: field.name(),
        len,
    })
}
