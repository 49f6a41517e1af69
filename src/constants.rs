//! Fixed constants defined by the PNG format.

/// The 8-byte file signature every PNG stream must begin with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Default ceiling on how many payload bytes a single `IDAT` chunk carries.
///
/// This is a policy knob, not a correctness requirement;
/// `EncoderOptions::idat_chunk_size` lets callers change it.
pub const DEFAULT_IDAT_CHUNK_SIZE: usize = 8192;

/// Adam7 pass starting x offset, per pass (1-indexed passes 1..=7 stored at 0..=6).
pub const ADAM7_X_START: [u32; 7] = [0, 4, 0, 2, 0, 1, 0];
/// Adam7 pass starting y offset, per pass.
pub const ADAM7_Y_START: [u32; 7] = [0, 0, 4, 0, 2, 0, 1];
/// Adam7 pass x increment, per pass.
pub const ADAM7_X_STEP: [u32; 7] = [8, 8, 4, 4, 2, 2, 1];
/// Adam7 pass y increment, per pass.
pub const ADAM7_Y_STEP: [u32; 7] = [8, 8, 8, 4, 4, 2, 2];
