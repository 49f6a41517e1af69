//! Ambient configuration knobs for the encoder and decoder.
//!
//! Plain builder-style structs with `Default` impls rather than a
//! profusion of function arguments.

use crate::constants::DEFAULT_IDAT_CHUNK_SIZE;

/// Policy knobs for [`crate::encode_with_options`].
#[derive(Copy, Clone, Debug)]
pub struct EncoderOptions {
    /// Maximum payload size of each emitted `IDAT` chunk. Purely a
    /// size/overhead trade-off; PNG places no semantic meaning on how the
    /// compressed stream is split across `IDAT` chunks.
    pub idat_chunk_size: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            idat_chunk_size: DEFAULT_IDAT_CHUNK_SIZE,
        }
    }
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idat_chunk_size(mut self, size: usize) -> Self {
        self.idat_chunk_size = size;
        self
    }
}

/// Policy knobs for [`crate::decode_with_options`].
#[derive(Copy, Clone, Debug)]
pub struct DecoderOptions {
    /// Verify each chunk's CRC-32 against its declared length/type/data.
    /// Disabling this trades conformance for speed; see the `crc` feature.
    pub confirm_crc: bool,
    /// Reject dimensions beyond these bounds before allocating any buffers,
    /// guarding against a crafted `IHDR` claiming an enormous image.
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            confirm_crc: cfg!(feature = "crc"),
            max_width: 1 << 14,
            max_height: 1 << 14,
        }
    }
}

impl DecoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_confirm_crc(mut self, confirm: bool) -> Self {
        self.confirm_crc = confirm;
        self
    }

    pub fn with_max_dimensions(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }
}
