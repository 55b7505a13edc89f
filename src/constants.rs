/// Size of the fixed BMP header (bytes).
/// Embedding starts right after it, at the first pixel byte.
pub const BMP_HEADER_SIZE: usize = 54;

/// Byte offset of the image width inside the BMP header.
/// The height follows immediately; both are 4-byte little-endian signed.
pub const BMP_WIDTH_OFFSET: usize = 18;

/// Bytes per pixel for the supported 24-bit format.
pub const BMP_BYTES_PER_PIXEL: usize = 3;

/// Carrier bytes needed to embed one data byte.
/// Each carrier byte stores a single bit in its LSB, so 8 bits = 8 bytes.
pub const CARRIER_BYTES_PER_BYTE: usize = 8;

/// Carrier bytes needed to embed one 32-bit length field.
pub const CARRIER_BYTES_PER_INT: usize = 32;

/// Marker embedded before everything else so the decoder can tell a stego
/// image apart from a plain one.
pub const DEFAULT_SIGNATURE: &str = "#*";

/// Secret file extensions accepted for embedding, leading dot included.
pub const ALLOWED_SECRET_EXTENSIONS: [&str; 3] = [".c", ".txt", ".sh"];

/// Output image name used when `encode` is not given one.
pub const DEFAULT_STEGO_NAME: &str = "stego.bmp";

/// Output base name used when `decode` is not given one.
/// The decoded extension gets appended to it.
pub const DEFAULT_SECRET_STEM: &str = "secret_file";
