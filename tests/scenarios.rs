//! Concrete color-selection and chunk-ordering scenarios: single-pixel
//! Indexed selection, two- and three-color palette/tRNS construction,
//! palette overflow to Truecolor, a quantized image staying Indexed, and
//! rejection of a non-consecutive IDAT stream.
//!
//! These inspect the encoded byte stream directly where the scenario cares
//! about wire-level detail (`PLTE`/`tRNS` length), using the same chunk
//! layout every `compact_png::encode` output has: an 8-byte signature
//! followed immediately by a 25-byte `IHDR` chunk (4 length + 4 type + 13
//! data + 4 CRC), so the color-type byte always sits at offset 25 and the
//! next chunk always starts at offset 33.

const IHDR_END: usize = 8 + 4 + 4 + 13 + 4; // 33

struct ChunkView<'a> {
    chunk_type: [u8; 4],
    data: &'a [u8],
    next_offset: usize,
}

fn read_chunk_at(bytes: &[u8], offset: usize) -> ChunkView<'_> {
    let length = u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap()) as usize;
    let chunk_type: [u8; 4] = bytes[offset + 4..offset + 8].try_into().unwrap();
    let data = &bytes[offset + 8..offset + 8 + length];
    let next_offset = offset + 8 + length + 4;
    ChunkView {
        chunk_type,
        data,
        next_offset,
    }
}

fn find_chunk<'a>(bytes: &'a [u8], wanted: &[u8; 4]) -> Option<ChunkView<'a>> {
    let mut offset = IHDR_END;
    while offset < bytes.len() {
        let chunk = read_chunk_at(bytes, offset);
        if &chunk.chunk_type == wanted {
            return Some(chunk);
        }
        if &chunk.chunk_type == b"IEND" {
            return None;
        }
        offset = chunk.next_offset;
    }
    None
}

/// A single opaque black pixel selects Indexed at depth 1 with a
/// 3-byte (one-entry) `PLTE`.
#[test]
fn single_black_opaque_pixel() {
    let image = [0u8, 0, 0, 255];
    let mut encoded = Vec::new();
    compact_png::encode(&mut encoded, &image, 1, 1).unwrap();

    assert_eq!(encoded[25], compact_png::ColorType::Indexed.id());
    assert_eq!(encoded[24], 1, "bit depth should be 1");

    let plte = find_chunk(&encoded, b"PLTE").expect("PLTE chunk present");
    assert_eq!(plte.data.len(), 3);

    let (decoded, w, h) = compact_png::decode(&encoded[..]).unwrap();
    assert_eq!((w, h), (1, 1));
    assert_eq!(decoded, image);
}

/// Two distinct opaque colors select Indexed depth 1, a 6-byte (two
/// entry) `PLTE`, and no `tRNS` (nothing is translucent).
#[test]
fn two_distinct_opaque_colors() {
    let image = [0u8, 0, 0, 255, 255, 255, 255, 255];
    let mut encoded = Vec::new();
    compact_png::encode(&mut encoded, &image, 2, 1).unwrap();

    assert_eq!(encoded[25], compact_png::ColorType::Indexed.id());
    assert_eq!(encoded[24], 1);

    let plte = find_chunk(&encoded, b"PLTE").unwrap();
    assert_eq!(plte.data.len(), 6);
    assert!(find_chunk(&encoded, b"tRNS").is_none());

    let (decoded, w, h) = compact_png::decode(&encoded[..]).unwrap();
    assert_eq!((w, h), (2, 1));
    assert_eq!(decoded, image);
}

/// Two pixels that differ only in alpha select Indexed depth 1, a
/// 6-byte `PLTE`, and a 1-byte `tRNS` holding the single non-opaque
/// entry's alpha (0).
#[test]
fn two_alpha_differing_black_pixels() {
    let image = [0u8, 0, 0, 255, 0, 0, 0, 0];
    let mut encoded = Vec::new();
    compact_png::encode(&mut encoded, &image, 2, 1).unwrap();

    assert_eq!(encoded[25], compact_png::ColorType::Indexed.id());
    assert_eq!(encoded[24], 1);

    let plte = find_chunk(&encoded, b"PLTE").unwrap();
    assert_eq!(plte.data.len(), 6);

    let trns = find_chunk(&encoded, b"tRNS").expect("tRNS chunk present");
    assert_eq!(trns.data, &[0]);

    let (decoded, w, h) = compact_png::decode(&encoded[..]).unwrap();
    assert_eq!((w, h), (2, 1));
    assert_eq!(decoded, image);
}

fn gradient_256() -> Vec<u8> {
    let mut image = Vec::with_capacity(256 * 256 * 4);
    for y in 0..256u32 {
        for x in 0..256u32 {
            image.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, ((x + y) % 256) as u8]);
        }
    }
    image
}

/// A 256x256 procedural gradient overflows the 256-color palette and
/// must select Truecolor or TruecolorAlpha at depth 8, round-tripping
/// exactly.
#[test]
fn overflowing_gradient_round_trips() {
    let image = gradient_256();
    let mut encoded = Vec::new();
    compact_png::encode(&mut encoded, &image, 256, 256).unwrap();

    let color_type = encoded[25];
    assert!(
        color_type == compact_png::ColorType::Truecolor.id()
            || color_type == compact_png::ColorType::TruecolorAlpha.id()
    );
    assert_eq!(encoded[24], 8);

    let (decoded, w, h) = compact_png::decode(&encoded[..]).unwrap();
    assert_eq!((w, h), (256, 256));
    assert_eq!(decoded, image);
}

/// A 256x256 image quantized to 16 colors fits Indexed at depth <= 8
/// and round-trips exactly.
#[test]
fn quantized_image_selects_indexed_and_round_trips() {
    let mut image = Vec::with_capacity(256 * 256 * 4);
    for y in 0..256u32 {
        for x in 0..256u32 {
            let level = (x / 16 + y / 16) % 16;
            let v = (level * 17) as u8; // 0, 17, 34, ..., 255 across 16 levels
            image.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let mut encoded = Vec::new();
    compact_png::encode(&mut encoded, &image, 256, 256).unwrap();

    assert_eq!(encoded[25], compact_png::ColorType::Indexed.id());
    assert!(encoded[24] <= 8);

    let (decoded, w, h) = compact_png::decode(&encoded[..]).unwrap();
    assert_eq!((w, h), (256, 256));
    assert_eq!(decoded, image);
}

/// A stream with non-consecutive `IDAT` chunks is rejected as a bad
/// chunk order, not silently accepted.
#[test]
fn non_consecutive_idat_is_rejected() {
    let image = [1u8, 2, 3, 255];
    let mut encoded = Vec::new();
    compact_png::encode(&mut encoded, &image, 1, 1).unwrap();

    // IEND is always the last 12 bytes (0-length chunk): splice an
    // ancillary chunk and a spurious extra IDAT in front of it.
    let iend_start = encoded.len() - 12;
    let mut spliced = encoded[..iend_start].to_vec();

    // A minimal, correctly-CRC'd ancillary `tEXt` chunk with empty data.
    spliced.extend_from_slice(&[0, 0, 0, 0]); // length = 0
    spliced.extend_from_slice(b"tEXt");
    spliced.extend_from_slice(&crc32_of(b"tEXt"));

    // A minimal, correctly-CRC'd extra `IDAT` chunk with empty data.
    spliced.extend_from_slice(&[0, 0, 0, 0]);
    spliced.extend_from_slice(b"IDAT");
    spliced.extend_from_slice(&crc32_of(b"IDAT"));

    spliced.extend_from_slice(&encoded[iend_start..]);

    let err = compact_png::decode(&spliced[..]).unwrap_err();
    assert!(matches!(err, compact_png::PngError::BadChunkOrder(_)));
}

/// A standalone CRC-32 (same polynomial PNG/zlib use) so this test file,
/// which only has access to the crate's public surface, can splice a
/// structurally-valid-but-misordered chunk into an already-encoded stream.
fn crc32_of(bytes: &[u8]) -> [u8; 4] {
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in bytes {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                0xEDB8_8320 ^ (crc >> 1)
            } else {
                crc >> 1
            };
        }
    }
    (!crc).to_be_bytes()
}
