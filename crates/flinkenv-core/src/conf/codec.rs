//! Compressed-text codec for stored configuration blobs.
//!
//! Text is deflated with zlib framing and the bytes are base64 encoded so the
//! blob can live in a TEXT column. `decompress(compress(t)) == t` for every
//! UTF-8 input.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::domain::EnvError;

/// Compress `text` into a base64 string.
pub fn compress(text: &str) -> Result<String, EnvError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(text.as_bytes())
        .map_err(|e| EnvError::Codec(format!("deflate failed: {e}")))?;
    let bytes = encoder
        .finish()
        .map_err(|e| EnvError::Codec(format!("deflate failed: {e}")))?;

    Ok(STANDARD.encode(bytes))
}

/// Inverse of [`compress`].
///
/// Fails if the blob is not base64, not a zlib stream, or does not inflate to
/// valid UTF-8.
pub fn decompress(blob: &str) -> Result<String, EnvError> {
    let bytes = STANDARD
        .decode(blob.trim())
        .map_err(|e| EnvError::Codec(format!("invalid base64: {e}")))?;

    let mut text = String::new();
    ZlibDecoder::new(bytes.as_slice())
        .read_to_string(&mut text)
        .map_err(|e| EnvError::Codec(format!("inflate failed: {e}")))?;

    Ok(text)
}
