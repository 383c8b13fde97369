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
use crate::lanes::{gather_plane, gather_rgb, PLANE_ROW_LANES, RGB_ROW_LANES_HI, RGB_ROW_LANES_LO};
use crate::vector::{finish_row_scalar, prefetch_rows, vector_columns_end};
use crate::ImageSize;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

pub(crate) fn convolve_row_sse<const CN: usize, const PREFETCH: bool>(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    y: usize,
) {
    unsafe {
        convolve_row_sse_impl::<CN, PREFETCH>(src, dst, size, y);
    }
}

#[inline(always)]
unsafe fn load_weights(rows: &[[u8; 16]; 5]) -> [__m128i; 5] {
    [
        _mm_loadu_si128(rows[0].as_ptr() as *const __m128i),
        _mm_loadu_si128(rows[1].as_ptr() as *const __m128i),
        _mm_loadu_si128(rows[2].as_ptr() as *const __m128i),
        _mm_loadu_si128(rows[3].as_ptr() as *const __m128i),
        _mm_loadu_si128(rows[4].as_ptr() as *const __m128i),
    ]
}

#[target_feature(enable = "sse4.1")]
unsafe fn convolve_row_sse_impl<const CN: usize, const PREFETCH: bool>(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    y: usize,
) {
    let stride = size.width * CN;
    let end = vector_columns_end::<CN>(size);
    let zeros = _mm_setzero_si128();

    let plane_weights = load_weights(&PLANE_ROW_LANES);
    let rgb_weights_lo = load_weights(&RGB_ROW_LANES_LO);
    let rgb_weights_hi = load_weights(&RGB_ROW_LANES_HI);

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
                let ptr = src.get_unchecked(row * stride + start..).as_ptr();
                _mm_prefetch::<_MM_HINT_T0>(ptr as *const i8);
            }
        }

        if CN == 3 {
            let mut sum_lo = zeros;
            let mut sum_hi = zeros;
            for ky in 0..5 {
                let row = window_rows.get_unchecked(ky).get_unchecked(start..);
                let items = _mm_loadu_si128(row.as_ptr() as *const __m128i);
                let lo = _mm_maddubs_epi16(_mm_unpacklo_epi8(items, zeros), rgb_weights_lo[ky]);
                let hi = _mm_maddubs_epi16(_mm_unpackhi_epi8(items, zeros), rgb_weights_hi[ky]);
                sum_lo = _mm_add_epi16(sum_lo, lo);
                sum_hi = _mm_add_epi16(sum_hi, hi);
            }
            let mut lanes = [0u16; 16];
            _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, sum_lo);
            _mm_storeu_si128(lanes.as_mut_ptr().add(8) as *mut __m128i, sum_hi);
            let sums = gather_rgb(&lanes);
            let dst = dst.get_unchecked_mut(x * 3..x * 3 + 3);
            for (dst, &sum) in dst.iter_mut().zip(sums.iter()) {
                *dst = normalize(sum, GAUSSIAN_5X5.divisor);
            }
        } else {
            let mut sum = zeros;
            for ky in 0..5 {
                let row = window_rows.get_unchecked(ky).get_unchecked(start..);
                let items = _mm_loadl_epi64(row.as_ptr() as *const __m128i);
                let product = _mm_maddubs_epi16(_mm_unpacklo_epi8(items, zeros), plane_weights[ky]);
                sum = _mm_add_epi16(sum, product);
            }
            let mut lanes = [0u16; 8];
            _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, sum);
            *dst.get_unchecked_mut(x) = normalize(gather_plane(&lanes), GAUSSIAN_5X5.divisor);
        }
    }

    finish_row_scalar::<CN>(src, dst, size, y, end);
}
