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

use crate::kernel::{normalize, GAUSSIAN_5X5, KERNEL_BORDER};
use crate::lanes::{
    gather_plane, gather_rgb, PLANE_ROW_LANES_U16, RGB_ROW_LANES_HI_U16, RGB_ROW_LANES_LO_U16,
};
use crate::vector::{finish_row_scalar, prefetch_rows, vector_columns_end};
use crate::ImageSize;
use std::arch::aarch64::*;
use std::arch::asm;

#[inline(always)]
unsafe fn prefetch_l1(ptr: *const u8) {
    asm!(
    "prfm pldl1keep, [{0}]",
    in(reg) ptr,
    options(readonly, nostack, preserves_flags));
}

#[inline(always)]
unsafe fn load_weights(rows: &[[u16; 8]; 5]) -> [uint16x8_t; 5] {
    [
        vld1q_u16(rows[0].as_ptr()),
        vld1q_u16(rows[1].as_ptr()),
        vld1q_u16(rows[2].as_ptr()),
        vld1q_u16(rows[3].as_ptr()),
        vld1q_u16(rows[4].as_ptr()),
    ]
}

pub(crate) fn convolve_row_neon<const CN: usize, const PREFETCH: bool>(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    y: usize,
) {
    unsafe {
        let stride = size.width * CN;
        let end = vector_columns_end::<CN>(size);

        let plane_weights = load_weights(&PLANE_ROW_LANES_U16);
        let rgb_weights_lo = load_weights(&RGB_ROW_LANES_LO_U16);
        let rgb_weights_hi = load_weights(&RGB_ROW_LANES_HI_U16);

        let window_rows = [
            src.get_unchecked((y - 2) * stride..),
            src.get_unchecked((y - 1) * stride..),
            src.get_unchecked(y * stride..),
            src.get_unchecked((y + 1) * stride..),
            src.get_unchecked((y + 2) * stride..),
        ];

        for x in KERNEL_BORDER..end {
            let start = (x - KERNEL_BORDER) * CN;

            if PREFETCH {
                for row in prefetch_rows(size, y) {
                    prefetch_l1(src.get_unchecked(row * stride + start..).as_ptr());
                }
            }

            if CN == 3 {
                let mut sum_lo = vdupq_n_u16(0);
                let mut sum_hi = vdupq_n_u16(0);
                for ky in 0..5 {
                    let row = window_rows.get_unchecked(ky).get_unchecked(start..);
                    let items = vld1q_u8(row.as_ptr());
                    sum_lo = vmlaq_u16(sum_lo, vmovl_u8(vget_low_u8(items)), rgb_weights_lo[ky]);
                    sum_hi = vmlaq_u16(sum_hi, vmovl_high_u8(items), rgb_weights_hi[ky]);
                }
                let mut lanes = [0u16; 16];
                vst1q_u16(lanes.as_mut_ptr(), sum_lo);
                vst1q_u16(lanes.as_mut_ptr().add(8), sum_hi);
                let sums = gather_rgb(&lanes);
                let dst = dst.get_unchecked_mut(x * 3..x * 3 + 3);
                for (dst, &sum) in dst.iter_mut().zip(sums.iter()) {
                    *dst = normalize(sum, GAUSSIAN_5X5.divisor);
                }
            } else {
                let mut sum = vdupq_n_u16(0);
                for ky in 0..5 {
                    let row = window_rows.get_unchecked(ky).get_unchecked(start..);
                    let items = vld1_u8(row.as_ptr());
                    sum = vmlaq_u16(sum, vmovl_u8(items), plane_weights[ky]);
                }
                let mut lanes = [0u16; 8];
                vst1q_u16(lanes.as_mut_ptr(), sum);
                *dst.get_unchecked_mut(x) = normalize(gather_plane(&lanes), GAUSSIAN_5X5.divisor);
            }
        }

        finish_row_scalar::<CN>(src, dst, size, y, end);
    }
}
