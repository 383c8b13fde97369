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

//! Scatter form of the 5x5 filter.
//!
//! Every source pixel with a full neighborhood adds `value * weight` to the 25
//! cells around it in a wide accumulator. One final pass normalizes every cell
//! of the frame, so border pixels receive only the mass scattered onto them and
//! come out darker than the banded forms would leave them.
use crate::kernel::{normalize, GAUSSIAN_5X5, KERNEL_BORDER, KERNEL_TAPS};
use crate::util::try_alloc;
use crate::{BlurError, ImageSize};

/// Accumulates the scatter of all interior source pixels.
pub(crate) fn scatter<const CN: usize>(src: &[u8], size: ImageSize) -> Result<Vec<u32>, BlurError> {
    let stride = size.width * CN;
    let mut acc = try_alloc(size.area() * CN, 0u32)?;

    for y in KERNEL_BORDER..size.height - KERNEL_BORDER {
        let src_row = &src[y * stride..(y + 1) * stride];
        for x in KERNEL_BORDER..size.width - KERNEL_BORDER {
            for c in 0..CN {
                let value = src_row[x * CN + c] as u32;
                for ky in 0..KERNEL_TAPS {
                    let offset = (y + ky - KERNEL_BORDER) * stride + (x - KERNEL_BORDER) * CN + c;
                    let weights = &GAUSSIAN_5X5.weights[ky * KERNEL_TAPS..(ky + 1) * KERNEL_TAPS];
                    for (kx, &weight) in weights.iter().enumerate() {
                        acc[offset + kx * CN] += value * weight;
                    }
                }
            }
        }
    }
    Ok(acc)
}

/// Normalizes and clamps every accumulated cell into `dst`.
pub(crate) fn normalize_into(acc: &[u32], dst: &mut [u8]) {
    for (dst, &sum) in dst.iter_mut().zip(acc.iter()) {
        *dst = normalize(sum, GAUSSIAN_5X5.divisor);
    }
}

pub(crate) fn expand<const CN: usize>(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
) -> Result<(), BlurError> {
    let acc = scatter::<CN>(src, size)?;
    let ImageSize { width, height } = size;
    log::trace!("Scattered {width}x{height}x{CN} into accumulator");
    normalize_into(&acc, dst);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::convolve_pixel_reference;
    use crate::test_utils::noise;

    #[test]
    fn test_uniform_interior() {
        let size = ImageSize::new(9, 9);
        let src = vec![100u8; size.area()];
        let mut dst = vec![0u8; size.area()];
        expand::<1>(&src, &mut dst, size).unwrap();
        // the only cell whose whole neighborhood scatters onto it
        assert_eq!(dst[4 * 9 + 4], 100);
        // corners only get the corner weight of pixel (2, 2)
        assert_eq!(dst[0], 0);
        assert!(dst[2 * 9 + 2] < 100);
    }

    #[test]
    fn test_matches_gather_deep_inside() {
        // cells at least 4 from every edge gather from interior sources only
        let size = ImageSize::new(16, 13);
        let src = noise(size.area() * 3, 21);
        let mut dst = vec![0u8; src.len()];
        expand::<3>(&src, &mut dst, size).unwrap();
        for y in 4..size.height - 4 {
            for x in 4..size.width - 4 {
                for c in 0..3 {
                    assert_eq!(
                        dst[(y * size.width + x) * 3 + c],
                        convolve_pixel_reference::<3>(&src, size.width, y, x, c)
                    );
                }
            }
        }
    }

    #[test]
    fn test_saturated_clamps() {
        let size = ImageSize::new(5, 5);
        let src = vec![255u8; size.area()];
        let acc = scatter::<1>(&src, size).unwrap();
        // only the center pixel scatters
        assert_eq!(acc[12], 255 * 41);
        assert_eq!(acc[0], 255);
        let mut dst = vec![0u8; size.area()];
        normalize_into(&acc, &mut dst);
        assert_eq!(dst[12], 38);
        assert_eq!(dst[0], 0);
    }
}
