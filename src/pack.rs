//! Conversion between RGBA pixels and packed per-color-type row bytes, at
//! every bit depth PNG permits.
//!
//! Covers both directions: unpacking sub-byte rows back to RGBA8 on decode,
//! and packing RGBA8 down to the chosen color type and bit depth on encode.

use crate::color::ColorType;
use crate::palette::Palette;

/// Row byte count: `ceil(width * components * bit_depth / 8)`.
pub fn row_byte_count(width: u32, components: u32, bit_depth: u8) -> usize {
    let bits = width as usize * components as usize * bit_depth as usize;
    (bits + 7) / 8
}

/// Bytes-per-pixel used for filter arithmetic: `max(1, bit_depth/8) * components`.
pub fn pixel_byte_count(components: u32, bit_depth: u8) -> usize {
    let per_component = std::cmp::max(1, usize::from(bit_depth) / 8);
    per_component * components as usize
}

/// The PNG-mandated greyscale test: `R == G && B == A`, not the more
/// obvious `R == G && G == B`. For opaque pixels this forces `B == 255`, and
/// reconstruction on decode always produces `B == luma`, so an image that
/// satisfies this test but isn't truly monochrome will not round-trip byte
/// for byte. This is a known, deliberately-unfixed quirk, not an oversight.
pub fn looks_greyscale(pixel: [u8; 4]) -> bool {
    pixel[0] == pixel[1] && pixel[2] == pixel[3]
}

/// Map one RGBA pixel to the flat sample values `color` stores for it
/// (before bit-depth scaling), e.g. `[luma]`, `[r, g, b, a]`, `[index]`.
fn rgba_to_samples(pixel: [u8; 4], color: ColorType, palette: Option<&Palette>) -> [u8; 4] {
    let [r, g, b, a] = pixel;
    let luma = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
    match color {
        ColorType::Greyscale => [luma, 0, 0, 0],
        ColorType::GreyscaleAlpha => [luma, a, 0, 0],
        ColorType::Truecolor => [r, g, b, 0],
        ColorType::TruecolorAlpha => [r, g, b, a],
        ColorType::Indexed => [palette.expect("indexed color needs a palette").get_index(pixel), 0, 0, 0],
    }
}

/// Inverse of [`rgba_to_samples`], expanding stored component values (already
/// scaled up to 8 bits) back into an RGBA pixel.
fn samples_to_rgba(samples: &[u8], color: ColorType, palette: Option<&[[u8; 4]]>) -> [u8; 4] {
    match color {
        ColorType::Greyscale => [samples[0], samples[0], samples[0], 255],
        ColorType::GreyscaleAlpha => [samples[0], samples[0], samples[0], samples[1]],
        ColorType::Truecolor => [samples[0], samples[1], samples[2], 255],
        ColorType::TruecolorAlpha => [samples[0], samples[1], samples[2], samples[3]],
        ColorType::Indexed => {
            let entry = palette.expect("indexed color needs a palette")[usize::from(samples[0])];
            entry
        }
    }
}

/// Pack one pass's worth of pixels (row-major, `width * height` of them)
/// into PNG row bytes at `bit_depth`, one scanline at a time (filter byte
/// not included; the filter module prepends that).
///
/// `palette` must be `Some` when `color` is [`ColorType::Indexed`].
pub fn pack_pass(
    pixels: &[[u8; 4]],
    width: u32,
    height: u32,
    color: ColorType,
    bit_depth: u8,
    palette: Option<&Palette>,
) -> Vec<u8> {
    let components = u32::from(color.components());
    let row_bytes = row_byte_count(width, components, bit_depth);
    let mut out = vec![0u8; row_bytes * height as usize];

    for y in 0..height as usize {
        let row_pixels = &pixels[y * width as usize..(y + 1) * width as usize];
        let row_out = &mut out[y * row_bytes..(y + 1) * row_bytes];
        pack_row(row_pixels, color, bit_depth, palette, row_out);
    }
    out
}

fn pack_row(
    row_pixels: &[[u8; 4]],
    color: ColorType,
    bit_depth: u8,
    palette: Option<&Palette>,
    row_out: &mut [u8],
) {
    let components = usize::from(color.components());
    let shift = if bit_depth < 8 { 8 - bit_depth } else { 0 };

    let mut bit_pos = 0usize;
    for &pixel in row_pixels {
        let samples = rgba_to_samples(pixel, color, palette);
        for c in 0..components {
            let value = if bit_depth == 16 {
                // The encoder never emits 16-bit depth; kept for symmetry
                // with the decoder, which must accept it.
                samples[c]
            } else if color == ColorType::Indexed {
                samples[c]
            } else {
                samples[c] >> shift
            };

            if bit_depth == 16 {
                let byte_pos = bit_pos / 8;
                row_out[byte_pos] = value;
                row_out[byte_pos + 1] = 0;
                bit_pos += 16;
            } else {
                write_bits_msb_first(row_out, bit_pos, bit_depth, value);
                bit_pos += usize::from(bit_depth);
            }
        }
    }
}

/// Write the low `bit_depth` bits of `value`, most-significant-bit first,
/// starting at bit offset `bit_pos` of `buf` (bit 0 is the MSB of `buf[0]`).
fn write_bits_msb_first(buf: &mut [u8], bit_pos: usize, bit_depth: u8, value: u8) {
    for b in 0..bit_depth {
        let bit = (value >> (bit_depth - 1 - b)) & 1;
        let pos = bit_pos + usize::from(b);
        let byte = pos / 8;
        let shift = 7 - (pos % 8);
        buf[byte] |= bit << shift;
    }
}

/// Read `bit_depth` bits, most-significant-bit first, starting at bit
/// offset `bit_pos`.
fn read_bits_msb_first(buf: &[u8], bit_pos: usize, bit_depth: u8) -> u8 {
    let mut value = 0u8;
    for b in 0..bit_depth {
        let pos = bit_pos + usize::from(b);
        let byte = pos / 8;
        let shift = 7 - (pos % 8);
        let bit = (buf[byte] >> shift) & 1;
        value = (value << 1) | bit;
    }
    value
}

/// Unpack one pass's reconstructed row bytes into RGBA pixels.
///
/// `palette` must be `Some` when `color` is [`ColorType::Indexed`].
pub fn unpack_pass(
    row_bytes: &[u8],
    width: u32,
    height: u32,
    color: ColorType,
    bit_depth: u8,
    palette: Option<&[[u8; 4]]>,
) -> Vec<[u8; 4]> {
    let components = u32::from(color.components());
    let row_len = row_byte_count(width, components, bit_depth);
    let mut out = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height as usize {
        let row = &row_bytes[y * row_len..(y + 1) * row_len];
        unpack_row(row, width, color, bit_depth, palette, &mut out);
    }
    out
}

fn unpack_row(
    row: &[u8],
    width: u32,
    color: ColorType,
    bit_depth: u8,
    palette: Option<&[[u8; 4]]>,
    out: &mut Vec<[u8; 4]>,
) {
    let components = usize::from(color.components());
    let scale = if bit_depth < 8 {
        // Replicate the low bit_depth-wide value across 8 bits, e.g. a
        // 4-bit value 0xA becomes 0xAA, so a reduced-range sample still
        // spans the full 0..255 range on output (only meaningful for
        // non-indexed colors; indices are never rescaled).
        255 / ((1u16 << bit_depth) - 1)
    } else {
        1
    };

    let mut bit_pos = 0usize;
    let mut samples = [0u8; 4];
    for _ in 0..width {
        for c in 0..components {
            let raw = if bit_depth == 16 {
                let byte_pos = bit_pos / 8;
                bit_pos += 16;
                row[byte_pos] // big-endian 16-bit value truncated to its high byte
            } else {
                let v = read_bits_msb_first(row, bit_pos, bit_depth);
                bit_pos += usize::from(bit_depth);
                v
            };
            samples[c] = if color == ColorType::Indexed || bit_depth == 8 || bit_depth == 16 {
                raw
            } else {
                (u16::from(raw) * scale) as u8
            };
        }
        out.push(samples_to_rgba(&samples[..components], color, palette));
    }
}
