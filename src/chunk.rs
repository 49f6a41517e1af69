//! Chunk type classification and the length/type/data/CRC framing shared by
//! the encoder and decoder.

use crate::bytestream::{ByteReader, ByteWriter};
use crate::crc::crc32;
use crate::error::PngError;

pub const IHDR: [u8; 4] = *b"IHDR";
pub const PLTE: [u8; 4] = *b"PLTE";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";
pub const TRNS: [u8; 4] = *b"tRNS";

/// A chunk type's first byte's bit 5 (0x20) is clear for critical chunks and
/// set for ancillary ones — PNG's own mnemonic for this is the case of the
/// letter (`IHDR` vs. `tRNS`).
pub fn is_critical(chunk_type: [u8; 4]) -> bool {
    chunk_type[0] & 0x20 == 0
}

/// Every byte of a chunk type must be an ASCII letter.
pub fn validate_chunk_type(chunk_type: [u8; 4]) -> Result<(), PngError> {
    if chunk_type.iter().all(u8::is_ascii_alphabetic) {
        Ok(())
    } else {
        Err(PngError::InvalidChunkType(chunk_type))
    }
}

/// One chunk read off the stream: its type and a borrowed view of its data.
pub struct Chunk<'a> {
    pub chunk_type: [u8; 4],
    pub data: &'a [u8],
}

/// Read one length-prefixed chunk, validating its type and (optionally) its
/// CRC. Short reads surface as `TruncatedStream`, never as an EOF signal.
pub fn read_chunk<'a>(reader: &mut ByteReader<'a>, confirm_crc: bool) -> Result<Chunk<'a>, PngError> {
    let length = reader.read_u32_be()? as usize;
    let type_bytes: [u8; 4] = reader.read_bytes(4)?.try_into().unwrap();
    validate_chunk_type(type_bytes)?;
    let data = reader.read_bytes(length)?;
    let stored_crc = reader.read_u32_be()?;

    if confirm_crc {
        let mut crc_input = Vec::with_capacity(4 + length);
        crc_input.extend_from_slice(&type_bytes);
        crc_input.extend_from_slice(data);
        let computed = crc32(&crc_input);
        if computed != stored_crc {
            return Err(PngError::BadCrc {
                stored: stored_crc,
                computed,
            });
        }
    }

    Ok(Chunk {
        chunk_type: type_bytes,
        data,
    })
}

/// Write one chunk: 4-byte length, 4-byte type, the payload, then the CRC-32
/// of type+payload.
pub fn write_chunk<W: std::io::Write>(
    writer: &mut ByteWriter<W>,
    chunk_type: [u8; 4],
    data: &[u8],
) -> Result<(), PngError> {
    writer.write_u32_be(data.len() as u32)?;
    writer.write_bytes(&chunk_type)?;
    writer.write_bytes(data)?;

    let mut crc_input = Vec::with_capacity(4 + data.len());
    crc_input.extend_from_slice(&chunk_type);
    crc_input.extend_from_slice(data);
    writer.write_u32_be(crc32(&crc_input))?;
    Ok(())
}
