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

mod portable;
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
mod neon;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
mod sse;

use crate::executor::RowExecutor;
use crate::kernel::KERNEL_BORDER;
use crate::lanes::{PLANE_LOAD_BYTES, RGB_LOAD_BYTES};
use crate::scalar::convolve_pixel_reference;
use crate::ImageSize;

/// How many rows ahead the prefetching executors hint.
pub(crate) const PREFETCH_ROWS: usize = 16;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum VectorBackend {
    #[allow(dead_code)]
    Sse41,
    #[allow(dead_code)]
    Neon,
    Portable,
}

/// Bytes one window load reads for a layout of `CN` channels.
#[inline(always)]
pub(crate) const fn load_bytes<const CN: usize>() -> usize {
    if CN == 3 {
        RGB_LOAD_BYTES
    } else {
        PLANE_LOAD_BYTES
    }
}

/// First column whose window load would run past the end of its row.
///
/// Columns from here on are finished by [finish_row_scalar].
#[inline(always)]
pub(crate) fn vector_columns_end<const CN: usize>(size: ImageSize) -> usize {
    let stride = size.width * CN;
    let load = load_bytes::<CN>();
    // the window of column x starts at byte (x - 2) * CN
    let fitting = if stride >= load {
        (stride - load) / CN + KERNEL_BORDER + 1
    } else {
        KERNEL_BORDER
    };
    fitting.min(size.width - KERNEL_BORDER)
}

/// Scalar tail for the columns a vector load cannot cover.
#[inline(always)]
pub(crate) fn finish_row_scalar<const CN: usize>(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    y: usize,
    from: usize,
) {
    for x in from..size.width - KERNEL_BORDER {
        for c in 0..CN {
            dst[x * CN + c] = convolve_pixel_reference::<CN>(src, size.width, y, x, c);
        }
    }
}

/// Rows worth hinting before computing row `y`, clamped to the image.
#[inline(always)]
#[allow(dead_code)]
pub(crate) fn prefetch_rows(size: ImageSize, y: usize) -> std::ops::Range<usize> {
    let first = (y + PREFETCH_ROWS - KERNEL_BORDER).min(size.height);
    let last = (y + PREFETCH_ROWS + KERNEL_BORDER + 1).min(size.height);
    first..last
}

/// Selects the best available vector executor for `CN` channels.
pub(crate) fn vector_row_executor<const CN: usize>(prefetch: bool) -> (RowExecutor, VectorBackend) {
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    {
        if std::arch::is_x86_feature_detected!("sse4.1") {
            use sse::convolve_row_sse;
            let executor: RowExecutor = if prefetch {
                convolve_row_sse::<CN, true>
            } else {
                convolve_row_sse::<CN, false>
            };
            return (executor, VectorBackend::Sse41);
        }
    }
    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    {
        use neon::convolve_row_neon;
        let executor: RowExecutor = if prefetch {
            convolve_row_neon::<CN, true>
        } else {
            convolve_row_neon::<CN, false>
        };
        (executor, VectorBackend::Neon)
    }
    #[cfg(not(all(target_arch = "aarch64", feature = "neon")))]
    {
        let _ = prefetch;
        (portable::convolve_row_lanes::<CN>, VectorBackend::Portable)
    }
}
