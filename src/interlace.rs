//! Adam7 interlacing pass geometry, plus the trivial single-pass case for
//! non-interlaced images.
//!
//! The seven passes are exposed as a plain iterator over [`Pass`] rather
//! than threaded through a callback, so the encoder and decoder can share
//! one pass-by-pass loop shape regardless of whether the image is
//! interlaced.

use crate::constants::{ADAM7_X_START, ADAM7_X_STEP, ADAM7_Y_START, ADAM7_Y_STEP};

/// One Adam7 sub-image: its index (0-based, 0..=6), starting offset and
/// stride within the full image, and its own dimensions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Pass {
    pub index: usize,
    pub x_start: u32,
    pub y_start: u32,
    pub x_step: u32,
    pub y_step: u32,
    pub width: u32,
    pub height: u32,
}

fn pass_extent(total: u32, start: u32, step: u32) -> u32 {
    if start >= total {
        0
    } else {
        (total - start + step - 1) / step
    }
}

/// Iterate the seven Adam7 passes for an image of the given dimensions,
/// skipping any pass whose width or height comes out to zero.
pub fn adam7_passes(width: u32, height: u32) -> impl Iterator<Item = Pass> {
    (0..7).filter_map(move |i| {
        let x_start = ADAM7_X_START[i];
        let y_start = ADAM7_Y_START[i];
        let x_step = ADAM7_X_STEP[i];
        let y_step = ADAM7_Y_STEP[i];
        let w = pass_extent(width, x_start, x_step);
        let h = pass_extent(height, y_start, y_step);
        if w == 0 || h == 0 {
            None
        } else {
            Some(Pass {
                index: i,
                x_start,
                y_start,
                x_step,
                y_step,
                width: w,
                height: h,
            })
        }
    })
}

/// The non-interlaced case, expressed as a single pass covering the whole
/// image, so encoder/decoder can share one pass-driven loop either way.
pub fn single_pass(width: u32, height: u32) -> Pass {
    Pass {
        index: 0,
        x_start: 0,
        y_start: 0,
        x_step: 1,
        y_step: 1,
        width,
        height,
    }
}
