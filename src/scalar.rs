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

use crate::kernel::{normalize, normalize_f32, GAUSSIAN_5X5, GAUSSIAN_5X5_F32, KERNEL_BORDER};
use crate::ImageSize;

/// Reference 25-tap sum for channel `c` of pixel `(x, y)`.
///
/// `(x, y)` must have a full 5x5 neighborhood inside `size`.
#[inline(always)]
pub(crate) fn convolve_pixel_reference<const CN: usize>(
    src: &[u8],
    width: usize,
    y: usize,
    x: usize,
    c: usize,
) -> u8 {
    let stride = width * CN;
    let mut sum = 0u32;
    let mut index = 0usize;
    for sy in y - KERNEL_BORDER..=y + KERNEL_BORDER {
        let row = &src[sy * stride..(sy + 1) * stride];
        for sx in x - KERNEL_BORDER..=x + KERNEL_BORDER {
            sum += row[sx * CN + c] as u32 * GAUSSIAN_5X5.weights[index];
            index += 1;
        }
    }
    normalize(sum, GAUSSIAN_5X5.divisor)
}

/// Same arithmetic as [convolve_pixel_reference], spelled out tap by tap.
#[inline(always)]
pub(crate) fn convolve_pixel_unrolled<const CN: usize>(
    src: &[u8],
    width: usize,
    y: usize,
    x: usize,
    c: usize,
) -> u8 {
    let stride = width * CN;
    let base = (y - KERNEL_BORDER) * stride + (x - KERNEL_BORDER) * CN + c;
    let r0 = &src[base..base + 4 * CN + 1];
    let r1 = &src[base + stride..base + stride + 4 * CN + 1];
    let r2 = &src[base + 2 * stride..base + 2 * stride + 4 * CN + 1];
    let r3 = &src[base + 3 * stride..base + 3 * stride + 4 * CN + 1];
    let r4 = &src[base + 4 * stride..base + 4 * stride + 4 * CN + 1];
    let w = &GAUSSIAN_5X5.weights;
    let sum = r0[0] as u32 * w[0]
        + r0[CN] as u32 * w[1]
        + r0[2 * CN] as u32 * w[2]
        + r0[3 * CN] as u32 * w[3]
        + r0[4 * CN] as u32 * w[4]
        + r1[0] as u32 * w[5]
        + r1[CN] as u32 * w[6]
        + r1[2 * CN] as u32 * w[7]
        + r1[3 * CN] as u32 * w[8]
        + r1[4 * CN] as u32 * w[9]
        + r2[0] as u32 * w[10]
        + r2[CN] as u32 * w[11]
        + r2[2 * CN] as u32 * w[12]
        + r2[3 * CN] as u32 * w[13]
        + r2[4 * CN] as u32 * w[14]
        + r3[0] as u32 * w[15]
        + r3[CN] as u32 * w[16]
        + r3[2 * CN] as u32 * w[17]
        + r3[3 * CN] as u32 * w[18]
        + r3[4 * CN] as u32 * w[19]
        + r4[0] as u32 * w[20]
        + r4[CN] as u32 * w[21]
        + r4[2 * CN] as u32 * w[22]
        + r4[3 * CN] as u32 * w[23]
        + r4[4 * CN] as u32 * w[24];
    normalize(sum, GAUSSIAN_5X5.divisor)
}

/// Floating accumulation, clamped and truncated only on store.
#[inline(always)]
pub(crate) fn convolve_pixel_f32<const CN: usize>(
    src: &[u8],
    width: usize,
    y: usize,
    x: usize,
    c: usize,
) -> u8 {
    let stride = width * CN;
    let mut sum = 0f32;
    for (ky, sy) in (y - KERNEL_BORDER..=y + KERNEL_BORDER).enumerate() {
        let row = &src[sy * stride + (x - KERNEL_BORDER) * CN + c..];
        let weights = &GAUSSIAN_5X5_F32[ky * 5..ky * 5 + 5];
        for (kx, &weight) in weights.iter().enumerate() {
            sum += row[kx * CN] as f32 * weight;
        }
    }
    normalize_f32(sum, GAUSSIAN_5X5.divisor)
}

macro_rules! scalar_row_executor {
    ($name: ident, $pixel: ident) => {
        /// Fills the interior columns of destination row `y`.
        pub(crate) fn $name<const CN: usize>(
            src: &[u8],
            dst: &mut [u8],
            size: ImageSize,
            y: usize,
        ) {
            for x in KERNEL_BORDER..size.width - KERNEL_BORDER {
                let dst = &mut dst[x * CN..x * CN + CN];
                for (c, dst) in dst.iter_mut().enumerate() {
                    *dst = $pixel::<CN>(src, size.width, y, x, c);
                }
            }
        }
    };
}

scalar_row_executor!(convolve_row_reference, convolve_pixel_reference);
scalar_row_executor!(convolve_row_unrolled, convolve_pixel_unrolled);
scalar_row_executor!(convolve_row_f32, convolve_pixel_f32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::noise;

    #[test]
    fn test_impulse_center() {
        let mut src = vec![0u8; 5 * 5];
        src[2 * 5 + 2] = 255;
        assert_eq!(convolve_pixel_reference::<1>(&src, 5, 2, 2, 0), 38);
        assert_eq!(convolve_pixel_unrolled::<1>(&src, 5, 2, 2, 0), 38);
        assert_eq!(convolve_pixel_f32::<1>(&src, 5, 2, 2, 0), 38);
    }

    #[test]
    fn test_uniform_is_preserved() {
        let src = vec![100u8; 9 * 9 * 3];
        for y in 2..7 {
            for x in 2..7 {
                for c in 0..3 {
                    assert_eq!(convolve_pixel_reference::<3>(&src, 9, y, x, c), 100);
                }
            }
        }
        let saturated = vec![255u8; 5 * 5];
        assert_eq!(convolve_pixel_unrolled::<1>(&saturated, 5, 2, 2, 0), 255);
    }

    #[test]
    fn test_variants_agree_on_noise() {
        let (width, height) = (17usize, 11usize);
        let plane = noise(width * height, 7);
        let rgb = noise(width * height * 3, 11);
        for y in 2..height - 2 {
            for x in 2..width - 2 {
                let r = convolve_pixel_reference::<1>(&plane, width, y, x, 0);
                assert_eq!(r, convolve_pixel_unrolled::<1>(&plane, width, y, x, 0));
                assert_eq!(r, convolve_pixel_f32::<1>(&plane, width, y, x, 0));
                for c in 0..3 {
                    let r = convolve_pixel_reference::<3>(&rgb, width, y, x, c);
                    assert_eq!(r, convolve_pixel_unrolled::<3>(&rgb, width, y, x, c));
                    assert_eq!(r, convolve_pixel_f32::<3>(&rgb, width, y, x, c));
                }
            }
        }
    }

    #[test]
    fn test_row_leaves_border_columns() {
        let size = ImageSize::new(7, 5);
        let src = vec![50u8; size.area()];
        let mut row = vec![9u8; size.width];
        convolve_row_reference::<1>(&src, &mut row, size, 2);
        assert_eq!(row, vec![9, 9, 50, 50, 50, 9, 9]);
    }
}
