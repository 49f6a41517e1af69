//! CRC-32 (reflected, polynomial `0xEDB88320`) as used by PNG chunk framing.
//!
//! This is the identical polynomial zlib uses, computed with a 256-entry
//! lookup table built at compile time.

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = build_table();

/// Continue a running CRC-32 computation over `bytes`, given the CRC so far.
///
/// Callers chain calls across a chunk's type and payload: start with
/// `u32::MAX`, update with the type bytes, then update with the payload, then
/// complement the result to get the final stored CRC.
pub fn update_crc(mut crc: u32, bytes: &[u8]) -> u32 {
    for &byte in bytes {
        let idx = ((crc ^ u32::from(byte)) & 0xff) as usize;
        crc = CRC_TABLE[idx] ^ (crc >> 8);
    }
    crc
}

/// Compute the CRC-32 PNG expects to find trailing a chunk's type+payload.
pub fn crc32(bytes: &[u8]) -> u32 {
    !update_crc(u32::MAX, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc_of_empty_matches_zlib_identity() {
        assert_eq!(crc32(&[]), 0);
    }

    #[test]
    fn crc_of_known_string() {
        // "IEND" chunk type with empty payload has a well known CRC.
        assert_eq!(crc32(b"IEND"), 0xAE42_6082);
    }

    #[test]
    fn continuation_matches_one_shot() {
        let whole = crc32(b"IHDRhello");
        let split = !update_crc(update_crc(u32::MAX, b"IHDR"), b"hello");
        assert_eq!(whole, split);
    }
}
