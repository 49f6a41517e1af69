//! A PNG codec that automatically picks the cheapest color representation
//! for the image it's given: indexed-color when the palette fits, otherwise
//! greyscale or truecolor, with or without alpha, never asking the caller to
//! choose.
//!
//! ```no_run
//! # fn main() -> Result<(), compact_png::PngError> {
//! let image: Vec<u8> = vec![0, 0, 0, 255]; // one opaque black pixel
//! let mut encoded = Vec::new();
//! compact_png::encode(&mut encoded, &image, 1, 1)?;
//!
//! let (pixels, width, height) = compact_png::decode(&encoded[..])?;
//! assert_eq!(pixels, image);
//! assert_eq!((width, height), (1, 1));
//! # Ok(())
//! # }
//! ```

mod bytestream;
mod chunk;
mod color;
mod constants;
mod crc;
mod decoder;
mod encoder;
mod error;
mod filter;
mod interlace;
mod options;
mod pack;
mod palette;

pub use color::ColorType;
pub use decoder::{decode, decode_with_options};
pub use encoder::{encode, encode_with_options};
pub use error::PngError;
pub use filter::FilterType;
pub use options::{DecoderOptions, EncoderOptions};
