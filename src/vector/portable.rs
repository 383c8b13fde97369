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

//! Array model of the vector accumulator, used when no SIMD backend is available.
//!
//! Every `[u16; 8]` stands for one 128-bit register of 16-bit lanes, the
//! arithmetic is the same as the SIMD backends perform lane by lane.
use crate::kernel::{normalize, GAUSSIAN_5X5, KERNEL_BORDER};
use crate::lanes::{
    gather_plane, gather_rgb, PLANE_ROW_LANES_U16, RGB_ROW_LANES_HI_U16, RGB_ROW_LANES_LO_U16,
};
use crate::vector::{finish_row_scalar, load_bytes, vector_columns_end};
use crate::ImageSize;

#[inline(always)]
fn widen_mul_add(acc: &mut [u16; 8], bytes: &[u8], weights: &[u16; 8]) {
    for ((acc, &byte), &weight) in acc.iter_mut().zip(bytes.iter()).zip(weights.iter()) {
        *acc += byte as u16 * weight;
    }
}

#[cfg_attr(all(target_arch = "aarch64", feature = "neon"), allow(dead_code))]
pub(crate) fn convolve_row_lanes<const CN: usize>(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    y: usize,
) {
    let stride = size.width * CN;
    let load = load_bytes::<CN>();
    let end = vector_columns_end::<CN>(size);

    for x in KERNEL_BORDER..end {
        let start = (x - KERNEL_BORDER) * CN;
        if CN == 3 {
            let mut lo = [0u16; 8];
            let mut hi = [0u16; 8];
            for ky in 0..5 {
                let offset = (y + ky - KERNEL_BORDER) * stride + start;
                let window = &src[offset..offset + load];
                widen_mul_add(&mut lo, &window[..8], &RGB_ROW_LANES_LO_U16[ky]);
                widen_mul_add(&mut hi, &window[8..], &RGB_ROW_LANES_HI_U16[ky]);
            }
            let mut lanes = [0u16; 16];
            lanes[..8].copy_from_slice(&lo);
            lanes[8..].copy_from_slice(&hi);
            let sums = gather_rgb(&lanes);
            for (dst, &sum) in dst[x * 3..x * 3 + 3].iter_mut().zip(sums.iter()) {
                *dst = normalize(sum, GAUSSIAN_5X5.divisor);
            }
        } else {
            let mut acc = [0u16; 8];
            for ky in 0..5 {
                let offset = (y + ky - KERNEL_BORDER) * stride + start;
                widen_mul_add(
                    &mut acc,
                    &src[offset..offset + load],
                    &PLANE_ROW_LANES_U16[ky],
                );
            }
            dst[x] = normalize(gather_plane(&acc), GAUSSIAN_5X5.divisor);
        }
    }

    finish_row_scalar::<CN>(src, dst, size, y, end);
}
