//! Recovery pipeline: skips the BMP header, checks the signature, then
//! reads the container fields in layout order.
//!
//! The pipeline is staged because later fields are sized by earlier ones:
//! the caller learns the extension before it can open the output file, and
//! only then streams the secret bytes into it.

use crate::bits;
use crate::bmp;
use crate::config::StegConfig;
use crate::constants::{BMP_HEADER_SIZE, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_INT};
use crate::error::StegError;
use crate::layout::{self, Field};
use std::io::{Read, Write};

pub struct Decoder<'a, R> {
    config: &'a StegConfig,
    src: R,
    /// Pixel payload bytes not yet consumed, per the header's dimensions.
    /// Used to reject size fields that cannot possibly fit.
    remaining: usize,
    /// Index into `layout::FIELDS` of the next field to read.
    cursor: usize,
}

impl<'a, R: Read> Decoder<'a, R> {
    pub fn new(config: &'a StegConfig, src: R) -> Self {
        Self {
            config,
            src,
            remaining: 0,
            cursor: 0,
        }
    }

    /// Skips the header and checks the embedded signature. A mismatch means
    /// the image carries no hidden data; it is reported as its own outcome,
    /// never as an I/O fault.
    pub fn verify_signature(&mut self) -> Result<(), StegError> {
        let mut header = [0u8; BMP_HEADER_SIZE];
        self.src
            .read_exact(&mut header)
            .map_err(|e| StegError::io("bitmap header", e))?;
        self.remaining = bmp::payload_len(&header)?;

        self.expect(Field::Signature);
        let config = self.config;
        for &want in config.signature.as_bytes() {
            if self.read_byte(Field::Signature)? != want {
                return Err(StegError::SignatureNotFound);
            }
        }
        Ok(())
    }

    /// Recovers the secret file's extension, leading dot included.
    pub fn read_extension(&mut self) -> Result<String, StegError> {
        self.expect(Field::ExtensionLen);
        let len = self.read_int(Field::ExtensionLen)?;
        let max = self.config.max_extension_len();
        if len <= 0 || len as usize > max {
            return Err(StegError::CorruptField {
                field: Field::ExtensionLen.name(),
                value: len,
            });
        }

        self.expect(Field::Extension);
        let mut bytes = Vec::with_capacity(len as usize);
        for _ in 0..len {
            bytes.push(self.read_byte(Field::Extension)?);
        }
        String::from_utf8(bytes).map_err(|_| StegError::CorruptField {
            field: Field::Extension.name(),
            value: len,
        })
    }

    /// Recovers the secret bytes, writing each one to `dst` as soon as it is
    /// assembled. Returns the number of bytes recovered.
    pub fn extract_secret<W: Write>(&mut self, dst: &mut W) -> Result<usize, StegError> {
        self.expect(Field::SecretLen);
        let len = self.read_int(Field::SecretLen)?;
        if len < 0 || (len as usize).saturating_mul(CARRIER_BYTES_PER_BYTE) > self.remaining {
            return Err(StegError::CorruptField {
                field: Field::SecretLen.name(),
                value: len,
            });
        }

        self.expect(Field::Secret);
        for _ in 0..len {
            let byte = self.read_byte(Field::Secret)?;
            dst.write_all(&[byte])
                .map_err(|e| StegError::io(Field::Secret.name(), e))?;
        }
        Ok(len as usize)
    }

    fn read_byte(&mut self, field: Field) -> Result<u8, StegError> {
        let mut chunk = [0u8; CARRIER_BYTES_PER_BYTE];
        self.src
            .read_exact(&mut chunk)
            .map_err(|e| StegError::io(field.name(), e))?;
        self.remaining = self.remaining.saturating_sub(CARRIER_BYTES_PER_BYTE);
        Ok(bits::unpack_byte(&chunk))
    }

    fn read_int(&mut self, field: Field) -> Result<i32, StegError> {
        let mut chunk = [0u8; CARRIER_BYTES_PER_INT];
        self.src
            .read_exact(&mut chunk)
            .map_err(|e| StegError::io(field.name(), e))?;
        self.remaining = self.remaining.saturating_sub(CARRIER_BYTES_PER_INT);
        Ok(bits::unpack_int(&chunk))
    }

    /// Fields must be consumed in `layout::FIELDS` order.
    fn expect(&mut self, field: Field) {
        debug_assert_eq!(layout::FIELDS.get(self.cursor), Some(&field));
        self.cursor += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BMP_WIDTH_OFFSET;
    use crate::encoder::Encoder;

    fn carrier(width: i32, height: i32) -> Vec<u8> {
        let mut bytes = vec![0u8; BMP_HEADER_SIZE];
        bytes[0] = b'B';
        bytes[1] = b'M';
        bytes[BMP_WIDTH_OFFSET..BMP_WIDTH_OFFSET + 4].copy_from_slice(&width.to_le_bytes());
        bytes[BMP_WIDTH_OFFSET + 4..BMP_WIDTH_OFFSET + 8].copy_from_slice(&height.to_le_bytes());
        let payload = (width * height * 3) as usize;
        bytes.extend((0..payload).map(|i| (i * 7 % 256) as u8));
        bytes
    }

    /// Hand-built stego stream: header followed by packed bytes/ints, so the
    /// decoder can be fed containers the encoder would refuse to produce.
    struct StreamBuilder(Vec<u8>);

    impl StreamBuilder {
        fn new(width: i32, height: i32) -> Self {
            Self(carrier(width, height)[..BMP_HEADER_SIZE].to_vec())
        }

        fn push_bytes(mut self, data: &[u8]) -> Self {
            let mut chunk = [0u8; CARRIER_BYTES_PER_BYTE];
            for &byte in data {
                bits::pack_byte(byte, &mut chunk);
                self.0.extend_from_slice(&chunk);
            }
            self
        }

        fn push_int(mut self, value: i32) -> Self {
            let mut chunk = [0u8; CARRIER_BYTES_PER_INT];
            bits::pack_int(value, &mut chunk);
            self.0.extend_from_slice(&chunk);
            self
        }
    }

    #[test]
    fn round_trips_what_the_encoder_produced() {
        let config = StegConfig::default();
        let source = carrier(20, 20);
        let secret = b"echo hello\n";
        let mut stego = Vec::new();
        Encoder::new(&config, &source[..], &mut stego)
            .run(".sh", secret)
            .unwrap();

        let mut decoder = Decoder::new(&config, &stego[..]);
        decoder.verify_signature().unwrap();
        assert_eq!(decoder.read_extension().unwrap(), ".sh");

        let mut recovered = Vec::new();
        let count = decoder.extract_secret(&mut recovered).unwrap();
        assert_eq!(count, secret.len());
        assert_eq!(recovered, secret);
    }

    #[test]
    fn round_trips_an_empty_secret() {
        let config = StegConfig::default();
        let source = carrier(10, 10);
        let mut stego = Vec::new();
        Encoder::new(&config, &source[..], &mut stego)
            .run(".txt", b"")
            .unwrap();

        let mut decoder = Decoder::new(&config, &stego[..]);
        decoder.verify_signature().unwrap();
        assert_eq!(decoder.read_extension().unwrap(), ".txt");
        let mut recovered = Vec::new();
        assert_eq!(decoder.extract_secret(&mut recovered).unwrap(), 0);
        assert!(recovered.is_empty());
    }

    #[test]
    fn plain_carrier_reports_no_embedded_data() {
        let config = StegConfig::default();
        // LSBs of a constant payload never spell out the signature.
        let mut source = carrier(16, 16);
        for byte in source[BMP_HEADER_SIZE..].iter_mut() {
            *byte = 0xC8;
        }

        let mut decoder = Decoder::new(&config, &source[..]);
        assert!(matches!(
            decoder.verify_signature(),
            Err(StegError::SignatureNotFound)
        ));
    }

    #[test]
    fn implausible_extension_length_is_corrupt() {
        let config = StegConfig::default();
        let stream = StreamBuilder::new(16, 16)
            .push_bytes(config.signature.as_bytes())
            .push_int(9)
            .0;

        let mut decoder = Decoder::new(&config, &stream[..]);
        decoder.verify_signature().unwrap();
        assert!(matches!(
            decoder.read_extension(),
            Err(StegError::CorruptField { value: 9, .. })
        ));
    }

    #[test]
    fn negative_secret_length_is_corrupt() {
        let config = StegConfig::default();
        let stream = StreamBuilder::new(16, 16)
            .push_bytes(config.signature.as_bytes())
            .push_int(4)
            .push_bytes(b".txt")
            .push_int(-5)
            .0;

        let mut decoder = Decoder::new(&config, &stream[..]);
        decoder.verify_signature().unwrap();
        decoder.read_extension().unwrap();
        let mut sink = Vec::new();
        assert!(matches!(
            decoder.extract_secret(&mut sink),
            Err(StegError::CorruptField { value: -5, .. })
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn oversized_secret_length_is_corrupt() {
        let config = StegConfig::default();
        // 16x16 gives 768 payload bytes; 1000 secret bytes would need 8000.
        let stream = StreamBuilder::new(16, 16)
            .push_bytes(config.signature.as_bytes())
            .push_int(2)
            .push_bytes(b".c")
            .push_int(1000)
            .0;

        let mut decoder = Decoder::new(&config, &stream[..]);
        decoder.verify_signature().unwrap();
        decoder.read_extension().unwrap();
        let mut sink = Vec::new();
        assert!(matches!(
            decoder.extract_secret(&mut sink),
            Err(StegError::CorruptField { value: 1000, .. })
        ));
    }

    #[test]
    fn truncated_container_fails_with_an_io_error() {
        let config = StegConfig::default();
        let source = carrier(16, 16);
        let secret = b"0123456789";
        let mut stego = Vec::new();
        Encoder::new(&config, &source[..], &mut stego)
            .run(".txt", secret)
            .unwrap();

        // Cut the stream in the middle of the secret data field.
        let cut = BMP_HEADER_SIZE
            + layout::container_len(config.signature.len(), 4, secret.len())
            - 12;
        stego.truncate(cut);

        let mut decoder = Decoder::new(&config, &stego[..]);
        decoder.verify_signature().unwrap();
        decoder.read_extension().unwrap();
        let mut sink = Vec::new();
        assert!(matches!(
            decoder.extract_secret(&mut sink),
            Err(StegError::Io { .. })
        ));
    }
}
