//! Encode half of the stream driver: scan the image, pick the cheapest
//! color representation that holds it exactly, then emit signature,
//! `IHDR`, optional `PLTE`/`tRNS`, filtered+compressed `IDAT` chunks, and
//! `IEND`.
//!
//! Automatic color-type selection, MAD-heuristic per-row filter selection,
//! and palette construction all happen here rather than leaving the
//! caller to pick a fixed colorspace and filter method up front.

use crate::bytestream::ByteWriter;
use crate::chunk;
use crate::color::ColorType;
use crate::constants::PNG_SIGNATURE;
use crate::error::PngError;
use crate::filter;
use crate::interlace;
use crate::options::EncoderOptions;
use crate::pack;
use crate::palette::PaletteBuilder;

/// Encode an RGBA8, row-major `image` buffer (`width * height * 4` bytes)
/// as a PNG stream written to `sink`, using default [`EncoderOptions`].
pub fn encode<W: std::io::Write>(sink: W, image: &[u8], width: u32, height: u32) -> Result<(), PngError> {
    encode_with_options(sink, image, width, height, EncoderOptions::default())
}

/// As [`encode`], with explicit [`EncoderOptions`].
pub fn encode_with_options<W: std::io::Write>(
    sink: W,
    image: &[u8],
    width: u32,
    height: u32,
    options: EncoderOptions,
) -> Result<(), PngError> {
    let pixel_count = width as usize * height as usize;
    if image.len() != pixel_count * 4 {
        return Err(PngError::InvalidColorConfig(
            "image buffer length must equal width * height * 4",
        ));
    }

    let pixels: Vec<[u8; 4]> = image.chunks_exact(4).map(|c| [c[0], c[1], c[2], c[3]]).collect();

    let mut builder = PaletteBuilder::new();
    let mut has_alpha = false;
    let mut all_greyscale = true;
    for &pixel in &pixels {
        builder.add(pixel);
        has_alpha |= pixel[3] != 255;
        all_greyscale &= pack::looks_greyscale(pixel);
    }

    let (color, bit_depth, palette) = if !builder.overflow() && !builder.is_empty() {
        let palette = builder.sort();
        let depth = ColorType::indexed_depth_for(palette.len());
        (ColorType::Indexed, depth, Some(palette))
    } else if !has_alpha {
        if all_greyscale {
            (ColorType::Greyscale, 8, None)
        } else {
            (ColorType::Truecolor, 8, None)
        }
    } else if all_greyscale {
        (ColorType::GreyscaleAlpha, 8, None)
    } else {
        (ColorType::TruecolorAlpha, 8, None)
    };

    log::debug!(
        "selected color type {:?} at bit depth {} for a {}x{} image",
        color,
        bit_depth,
        width,
        height
    );

    let mut writer = ByteWriter::new(sink);
    writer.write_bytes(&PNG_SIGNATURE)?;
    write_ihdr(&mut writer, width, height, color, bit_depth)?;

    if let Some(ref palette) = palette {
        write_plte_and_trns(&mut writer, palette)?;
    }

    let filtered = filter_pixels(&pixels, width, height, color, bit_depth, palette.as_ref());
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, 10);
    write_idat_chunks(&mut writer, &compressed, options.idat_chunk_size)?;

    chunk::write_chunk(&mut writer, chunk::IEND, &[])?;
    Ok(())
}

fn write_ihdr<W: std::io::Write>(
    writer: &mut ByteWriter<W>,
    width: u32,
    height: u32,
    color: ColorType,
    bit_depth: u8,
) -> Result<(), PngError> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.push(bit_depth);
    data.push(color.id());
    data.push(0); // compression method: always 0
    data.push(0); // filter method: always 0
    data.push(0); // interlace method: this encoder never emits Adam7
    chunk::write_chunk(writer, chunk::IHDR, &data)
}

fn write_plte_and_trns<W: std::io::Write>(
    writer: &mut ByteWriter<W>,
    palette: &crate::palette::Palette,
) -> Result<(), PngError> {
    let mut plte = Vec::with_capacity(palette.len() * 3);
    for entry in palette.entries() {
        plte.extend_from_slice(&entry[..3]);
    }
    chunk::write_chunk(writer, chunk::PLTE, &plte)?;

    if palette.alpha_size() > 0 {
        let trns: Vec<u8> = palette.entries()[..palette.alpha_size()]
            .iter()
            .map(|e| e[3])
            .collect();
        chunk::write_chunk(writer, chunk::TRNS, &trns)?;
    }
    Ok(())
}

/// Pack, filter (MAD-heuristic selection per row), and concatenate every
/// row of every pass into the raw bytes that get handed to DEFLATE.
///
/// This encoder never interlaces, so there is always exactly one pass, but
/// the loop is written pass-by-pass so `encoder.rs` and `decoder.rs` share
/// the same row-buffer-reuse shape over [`interlace::Pass`].
fn filter_pixels(
    pixels: &[[u8; 4]],
    width: u32,
    height: u32,
    color: ColorType,
    bit_depth: u8,
    palette: Option<&crate::palette::Palette>,
) -> Vec<u8> {
    let pass = interlace::single_pass(width, height);
    let components = u32::from(color.components());
    let row_bytes = pack::row_byte_count(pass.width, components, bit_depth);
    let bpp = pack::pixel_byte_count(components, bit_depth);

    let packed = pack::pack_pass(pixels, pass.width, pass.height, color, bit_depth, palette);

    let mut filtered = Vec::with_capacity(packed.len() + pass.height as usize);
    let mut prev_row = vec![0u8; row_bytes];
    let mut scratch = vec![0u8; row_bytes];
    let mut out_row = vec![0u8; row_bytes];

    for y in 0..pass.height as usize {
        let current = &packed[y * row_bytes..(y + 1) * row_bytes];
        let prev: &[u8] = if y == 0 { &[] } else { &prev_row };
        let chosen = filter::choose_and_apply_filter(current, prev, bpp, &mut out_row, &mut scratch);
        filtered.push(chosen.to_u8());
        filtered.extend_from_slice(&out_row);
        prev_row.copy_from_slice(current);
    }
    filtered
}

fn write_idat_chunks<W: std::io::Write>(
    writer: &mut ByteWriter<W>,
    compressed: &[u8],
    idat_chunk_size: usize,
) -> Result<(), PngError> {
    let chunk_size = idat_chunk_size.max(1);
    if compressed.is_empty() {
        chunk::write_chunk(writer, chunk::IDAT, &[])?;
        return Ok(());
    }
    for piece in compressed.chunks(chunk_size) {
        chunk::write_chunk(writer, chunk::IDAT, piece)?;
    }
    Ok(())
}
