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

use crate::img_size::ImageSize;
use crate::kernel::KERNEL_BORDER;
use std::{num::NonZeroUsize, thread::available_parallelism};

/// Pixels per worker below which spawning another worker is not worth it.
const PIXELS_PER_WORKER: usize = 256 * 256;

#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum ThreadingPolicy {
    /// Run on the calling thread only.
    Single,
    /// Derive the worker count from the image area, bounded by available CPUs.
    #[default]
    Adaptive,
    /// Like `Adaptive`, but keeps given amount of CPUs free.
    AdaptiveReserve(NonZeroUsize),
    /// Use exactly this many workers.
    Fixed(NonZeroUsize),
}

impl ThreadingPolicy {
    /// Convenience for an explicit worker count, `0` is reported by the partitioner.
    pub fn workers(count: usize) -> Option<ThreadingPolicy> {
        NonZeroUsize::new(count).map(ThreadingPolicy::Fixed)
    }

    /// Number of workers to use for an image of `size`.
    ///
    /// `Fixed` is returned verbatim so that the partitioner can apply the
    /// remainder policy to it; adaptive variants never exceed the number of
    /// processable rows. Always at least 1.
    pub fn worker_count(&self, size: ImageSize) -> usize {
        let rows = size.height.saturating_sub(2 * KERNEL_BORDER).max(1);
        match self {
            ThreadingPolicy::Single => 1,
            ThreadingPolicy::Adaptive => (size.area() / PIXELS_PER_WORKER)
                .clamp(1, Self::available_parallelism(2))
                .min(rows),
            ThreadingPolicy::AdaptiveReserve(reserve) => {
                let max_threads = Self::available_parallelism(1);
                let usable = max_threads.saturating_sub(reserve.get()).max(1);
                (size.area() / PIXELS_PER_WORKER)
                    .clamp(1, usable)
                    .min(rows)
            }
            ThreadingPolicy::Fixed(fixed) => fixed.get(),
        }
    }

    // Multi-threading requested on a single core still benefits from 2 workers
    fn available_parallelism(min: usize) -> usize {
        available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .max(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_fixed() {
        let size = ImageSize::new(1024, 1024);
        assert_eq!(ThreadingPolicy::Single.worker_count(size), 1);
        assert_eq!(ThreadingPolicy::workers(7).unwrap().worker_count(size), 7);
        assert!(ThreadingPolicy::workers(0).is_none());
    }

    #[test]
    fn test_adaptive_bounded_by_rows() {
        // 3 processable rows, area big enough to ask for many workers
        let wide = ImageSize::new(1 << 20, 7);
        assert!(ThreadingPolicy::Adaptive.worker_count(wide) <= 3);
        let square = ImageSize::new(9, 9);
        assert_eq!(ThreadingPolicy::Adaptive.worker_count(square), 1);
        let reserve = ThreadingPolicy::AdaptiveReserve(NonZeroUsize::new(1024).unwrap());
        assert_eq!(reserve.worker_count(ImageSize::new(8192, 8192)), 1);
    }
}
