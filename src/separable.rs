// Copyright (c) Radzivon Bartoshyk. All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
// 1.  Redistributions of source code must retain the above copyright notice, this
// list of conditions and the following disclaimer.
//
// 2.  Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3.  Neither the name of the copyright holder nor the names of its
// contributors may be used to endorse or promote products derived from
// this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::kernel::{normalize, normalize_f32, GAUSSIAN_1X5, GAUSSIAN_1X5_F32, KERNEL_BORDER};
use crate::util::try_snapshot;
use crate::{BlurError, ImageSize};

/// Accumulator precision of the separable 1x5 filter.
#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum SeparablePrecision {
    #[default]
    Integer,
    /// `f32` sums, each pass truncated on store.
    Float,
}

#[inline(always)]
fn taps_u32(samples: [u8; 5]) -> u8 {
    let w = &GAUSSIAN_1X5.weights;
    let sum = samples[0] as u32 * w[0]
        + samples[1] as u32 * w[1]
        + samples[2] as u32 * w[2]
        + samples[3] as u32 * w[3]
        + samples[4] as u32 * w[4];
    normalize(sum, GAUSSIAN_1X5.divisor)
}

#[inline(always)]
fn taps_f32(samples: [u8; 5]) -> u8 {
    let sum = samples
        .iter()
        .zip(GAUSSIAN_1X5_F32.iter())
        .fold(0f32, |acc, (&v, &w)| acc + v as f32 * w);
    normalize_f32(sum, GAUSSIAN_1X5.divisor)
}

/// Filters columns `2..w-2` of every row, other columns keep `src`.
fn horizontal_pass<const CN: usize>(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    taps: fn([u8; 5]) -> u8,
) {
    let stride = size.width * CN;
    for (src_row, dst_row) in src.chunks_exact(stride).zip(dst.chunks_exact_mut(stride)) {
        for x in KERNEL_BORDER..size.width - KERNEL_BORDER {
            for c in 0..CN {
                let at = |k: usize| src_row[(x + k - KERNEL_BORDER) * CN + c];
                dst_row[x * CN + c] = taps([at(0), at(1), at(2), at(3), at(4)]);
            }
        }
    }
}

/// Filters rows `2..h-2` over every column, other rows keep `src`.
fn vertical_pass<const CN: usize>(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    taps: fn([u8; 5]) -> u8,
) {
    let stride = size.width * CN;
    for y in KERNEL_BORDER..size.height - KERNEL_BORDER {
        let dst_row = &mut dst[y * stride..(y + 1) * stride];
        for (i, dst) in dst_row.iter_mut().enumerate() {
            let at = |k: usize| src[(y + k - KERNEL_BORDER) * stride + i];
            *dst = taps([at(0), at(1), at(2), at(3), at(4)]);
        }
    }
}

/// Horizontal then vertical 1x5 pass, each reading the previous stage whole.
///
/// `frame` is the input on entry and the result on return.
pub(crate) fn separable<const CN: usize>(
    frame: &mut [u8],
    size: ImageSize,
    precision: SeparablePrecision,
) -> Result<(), BlurError> {
    let taps: fn([u8; 5]) -> u8 = match precision {
        SeparablePrecision::Integer => taps_u32,
        SeparablePrecision::Float => taps_f32,
    };
    let frame = &mut frame[..size.area() * CN];
    let stage = try_snapshot(frame)?;
    horizontal_pass::<CN>(&stage, frame, size, taps);
    let stage = try_snapshot(frame)?;
    vertical_pass::<CN>(&stage, frame, size, taps);
    log::trace!(
        "Separable {precision:?} pass over {}x{}x{CN} done",
        size.width,
        size.height
    );
    Ok(())
}
