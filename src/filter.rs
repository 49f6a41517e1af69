//! Per-row PNG filtering: the five predictor types, the Paeth predictor,
//! MAD-heuristic filter selection on encode, and reconstruction on decode.
//!
//! There is no SIMD backend here and no special-cased "first row"/"first
//! pixel" variant of each filter: `a`, `b`, and `c` default to zero when
//! absent, so one generic byte-stride loop covers every row.

use crate::error::PngError;

/// One of the five row filter types PNG defines.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth,
}

impl FilterType {
    pub const ALL: [FilterType; 5] = [
        FilterType::None,
        FilterType::Sub,
        FilterType::Up,
        FilterType::Average,
        FilterType::Paeth,
    ];

    pub const fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Sub => 1,
            Self::Up => 2,
            Self::Average => 3,
            Self::Paeth => 4,
        }
    }

    pub fn from_u8(id: u8) -> Result<Self, PngError> {
        match id {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            _ => Err(PngError::InvalidColorConfig("unknown row filter id")),
        }
    }
}

/// The PNG Paeth predictor: pick whichever of `a`, `b`, `c` lies closest to
/// `a + b - c`, preferring `a`, then `b`, then `c` on ties.
#[inline]
pub fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let a = i16::from(a);
    let b = i16::from(b);
    let c = i16::from(c);
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        a as u8
    } else if pb <= pc {
        b as u8
    } else {
        c as u8
    }
}

fn predictor(filter: FilterType, a: u8, b: u8, c: u8) -> u8 {
    match filter {
        FilterType::None => 0,
        FilterType::Sub => a,
        FilterType::Up => b,
        FilterType::Average => ((u16::from(a) + u16::from(b)) / 2) as u8,
        FilterType::Paeth => paeth_predictor(a, b, c),
    }
}

/// Apply `filter` to `current` (a raw, unfiltered row) against `prev` (the
/// previous row's *raw* bytes, empty if this is the first row of its pass),
/// `bpp` bytes per pixel apart, writing the filtered bytes to `out`.
pub fn apply_filter(filter: FilterType, current: &[u8], prev: &[u8], bpp: usize, out: &mut [u8]) {
    debug_assert_eq!(current.len(), out.len());
    for i in 0..current.len() {
        let a = if i >= bpp { current[i - bpp] } else { 0 };
        let b = prev.get(i).copied().unwrap_or(0);
        let c = if i >= bpp {
            prev.get(i - bpp).copied().unwrap_or(0)
        } else {
            0
        };
        out[i] = current[i].wrapping_sub(predictor(filter, a, b, c));
    }
}

/// Reverse filtering: `raw` is a filtered row, `prev` the previous row's
/// *already reconstructed* bytes, and `out` receives the reconstructed
/// bytes (bytes at `out[..i]` may be read while filling `out[i]`, since
/// `a`/`c` come from earlier in the same row being built).
pub fn reconstruct_row(filter: FilterType, raw: &[u8], prev: &[u8], bpp: usize, out: &mut [u8]) {
    debug_assert_eq!(raw.len(), out.len());
    for i in 0..raw.len() {
        let a = if i >= bpp { out[i - bpp] } else { 0 };
        let b = prev.get(i).copied().unwrap_or(0);
        let c = if i >= bpp {
            prev.get(i - bpp).copied().unwrap_or(0)
        } else {
            0
        };
        out[i] = raw[i].wrapping_add(predictor(filter, a, b, c));
    }
}

/// Sum of absolute values of `bytes`, each byte interpreted as a signed
/// residual in `[-128, 127]`. This is the MAD heuristic used for filter
/// selection.
fn mad_score(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .map(|&b| {
            let v = i32::from(b);
            u64::from(if v > 127 { 256 - v } else { v } as u32)
        })
        .sum()
}

/// Try all five filters on `current` and return whichever produces the
/// lowest MAD score, ties broken toward the earliest filter in enumeration
/// order. `scratch` must be at least as long as `current` and is reused
/// across calls to avoid a per-row allocation.
pub fn choose_and_apply_filter(
    current: &[u8],
    prev: &[u8],
    bpp: usize,
    out: &mut [u8],
    scratch: &mut [u8],
) -> FilterType {
    debug_assert_eq!(current.len(), out.len());
    debug_assert_eq!(current.len(), scratch.len());

    let mut best = FilterType::None;
    let mut best_score = u64::MAX;

    for &candidate in &FilterType::ALL {
        apply_filter(candidate, current, prev, bpp, scratch);
        let score = mad_score(scratch);
        if score < best_score {
            best_score = score;
            best = candidate;
            out.copy_from_slice(scratch);
        }
    }
    best
}
