//! Error types surfaced by this crate's encoder and decoder.
//!
//! Every failure funnels through [`PngError`]; there are no partial
//! successes.

use std::fmt::{self, Display, Formatter};

/// Everything that can go wrong while encoding or decoding a PNG stream.
#[derive(Debug)]
pub enum PngError {
    /// The first 8 bytes of the stream didn't match the PNG signature.
    BadSignature,
    /// A chunk type contained a byte outside `[A-Za-z]`.
    InvalidChunkType([u8; 4]),
    /// A chunk's stored CRC didn't match the one computed from its contents.
    BadCrc { stored: u32, computed: u32 },
    /// Chunks appeared out of the order PNG requires (duplicate/missing
    /// IHDR, misplaced PLTE/tRNS, non-consecutive IDAT, missing IDAT, ...).
    BadChunkOrder(&'static str),
    /// `IHDR` declared a compression or filter method this codec doesn't
    /// implement (PNG 1.2 only defines method 0 for either).
    UnsupportedEncoding(&'static str),
    /// A color configuration the PNG spec forbids: bad bit depth for the
    /// color type, unknown color type or filter or interlace id, an
    /// oversized or malformed `PLTE`, or a `tRNS` longer than the palette.
    InvalidColorConfig(&'static str),
    /// The stream ended before a complete chunk (or IDAT payload) could be
    /// read.
    TruncatedStream,
    /// An unknown *critical* chunk (uppercase first type byte) was
    /// encountered; ancillary chunks are skipped instead.
    UnknownCriticalChunk([u8; 4]),
    /// The DEFLATE collaborator failed to compress the filtered row data.
    CompressorError(&'static str),
    /// The INFLATE collaborator failed to decompress the concatenated IDAT
    /// payload, or it produced the wrong number of bytes.
    DecompressorError(String),
    /// The underlying sink or source returned a short read/write or I/O
    /// error.
    Io(std::io::Error),
}

impl Display for PngError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadSignature => write!(f, "not a PNG stream: bad signature"),
            Self::InvalidChunkType(ty) => {
                write!(f, "invalid chunk type {:?}: bytes must be ASCII letters", ty)
            }
            Self::BadCrc { stored, computed } => write!(
                f,
                "CRC mismatch: chunk declared {stored:#010x}, computed {computed:#010x}"
            ),
            Self::BadChunkOrder(msg) => write!(f, "bad chunk order: {msg}"),
            Self::UnsupportedEncoding(msg) => write!(f, "unsupported encoding: {msg}"),
            Self::InvalidColorConfig(msg) => write!(f, "invalid color configuration: {msg}"),
            Self::TruncatedStream => write!(f, "unexpected end of stream"),
            Self::UnknownCriticalChunk(ty) => {
                write!(f, "unknown critical chunk {:?}", String::from_utf8_lossy(ty))
            }
            Self::CompressorError(msg) => write!(f, "compressor error: {msg}"),
            Self::DecompressorError(msg) => write!(f, "decompressor error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for PngError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PngError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
