//! Declarative layout of the container embedded after the BMP header.
//!
//! Both pipelines iterate the same ordered field list, so the writer and
//! the reader cannot drift apart on field order or sizing.

use crate::constants::{CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_INT};

/// One field of the embedded container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Signature,
    ExtensionLen,
    Extension,
    SecretLen,
    Secret,
}

/// The fixed order in which fields follow the BMP header.
pub const FIELDS: [Field; 5] = [
    Field::Signature,
    Field::ExtensionLen,
    Field::Extension,
    Field::SecretLen,
    Field::Secret,
];

impl Field {
    /// Stage name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Field::Signature => "signature",
            Field::ExtensionLen => "extension length",
            Field::Extension => "extension",
            Field::SecretLen => "secret size",
            Field::Secret => "secret data",
        }
    }

    /// Carrier bytes this field occupies for the given payload shape.
    pub fn carrier_len(self, signature_len: usize, extension_len: usize, secret_len: usize) -> usize {
        match self {
            Field::Signature => signature_len * CARRIER_BYTES_PER_BYTE,
            Field::ExtensionLen | Field::SecretLen => CARRIER_BYTES_PER_INT,
            Field::Extension => extension_len * CARRIER_BYTES_PER_BYTE,
            Field::Secret => secret_len * CARRIER_BYTES_PER_BYTE,
        }
    }
}

/// Total carrier bytes the container occupies after the header.
pub fn container_len(signature_len: usize, extension_len: usize, secret_len: usize) -> usize {
    FIELDS
        .iter()
        .map(|field| field.carrier_len(signature_len, extension_len, secret_len))
        .sum()
}

/// Capacity rule: the pixel payload must be strictly larger than the
/// container. Equality is a rejection.
pub fn has_capacity(
    carrier_payload_len: usize,
    signature_len: usize,
    extension_len: usize,
    secret_len: usize,
) -> bool {
    carrier_payload_len > container_len(signature_len, extension_len, secret_len)
}
