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

use crate::executor::RowExecutor;
use crate::kernel::KERNEL_BORDER;
use crate::util::check_slice_size;
use crate::{BlurError, ImageSize, MismatchedSize};
use std::ops::Range;

/// What happens to processable rows left over when the worker count does not
/// divide them.
#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum RemainderPolicy {
    /// The last worker extends its band to the bottom border.
    #[default]
    AssignToLast,
    /// Uneven splits fail with [BlurError::UnevenPartition].
    Reject,
}

/// One worker's share of a frame.
///
/// Only built through [WorkAssignment::new] or [partition_rows], so the band
/// arithmetic never divides by zero or runs below the border.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WorkAssignment {
    worker_index: usize,
    worker_count: usize,
    width: usize,
    height: usize,
}

impl WorkAssignment {
    /// Describes band `worker_index` of `worker_count` over a frame of `size`.
    ///
    /// Every worker must get at least one processable row.
    pub fn new(
        worker_index: usize,
        worker_count: usize,
        size: ImageSize,
    ) -> Result<WorkAssignment, BlurError> {
        if worker_count == 0 {
            return Err(BlurError::ZeroWorkers);
        }
        if size.width < 5 || size.height < 5 {
            return Err(BlurError::ImageTooSmall {
                width: size.width,
                height: size.height,
            });
        }
        if worker_index >= worker_count {
            return Err(BlurError::WorkerOutOfRange {
                index: worker_index,
                workers: worker_count,
            });
        }
        let rows = size.height - 2 * KERNEL_BORDER;
        if rows < worker_count {
            return Err(BlurError::UnevenPartition {
                rows,
                workers: worker_count,
            });
        }
        Ok(WorkAssignment {
            worker_index,
            worker_count,
            width: size.width,
            height: size.height,
        })
    }

    #[inline]
    pub const fn worker_index(&self) -> usize {
        self.worker_index
    }

    #[inline]
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    #[inline]
    pub const fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    /// Rows every worker gets before any remainder is considered.
    #[inline]
    pub const fn workload(&self) -> usize {
        (self.height - 2 * KERNEL_BORDER) / self.worker_count
    }

    #[inline]
    pub const fn is_last(&self) -> bool {
        self.worker_index + 1 == self.worker_count
    }

    /// Destination rows this worker computes.
    ///
    /// The last band always ends at `height - 2`, so it picks up any remainder.
    pub fn band(&self) -> Range<usize> {
        let workload = self.workload();
        let low = KERNEL_BORDER + workload * self.worker_index;
        let high = if self.is_last() {
            self.height - KERNEL_BORDER
        } else {
            KERNEL_BORDER + workload * (self.worker_index + 1)
        };
        low..high
    }
}

/// Splits the processable rows of `size` between `worker_count` workers.
///
/// Bands are contiguous, disjoint, in worker order and together cover rows
/// `2..height - 2`. Under [RemainderPolicy::AssignToLast] more workers than
/// rows are clamped so that no band is empty.
pub fn partition_rows(
    size: ImageSize,
    worker_count: usize,
    policy: RemainderPolicy,
) -> Result<Vec<WorkAssignment>, BlurError> {
    if worker_count == 0 {
        return Err(BlurError::ZeroWorkers);
    }
    if size.width < 5 || size.height < 5 {
        return Err(BlurError::ImageTooSmall {
            width: size.width,
            height: size.height,
        });
    }
    let rows = size.height - 2 * KERNEL_BORDER;
    let workers = match policy {
        RemainderPolicy::AssignToLast => worker_count.min(rows),
        RemainderPolicy::Reject => {
            if rows % worker_count != 0 {
                return Err(BlurError::UnevenPartition {
                    rows,
                    workers: worker_count,
                });
            }
            worker_count
        }
    };
    if workers != worker_count {
        log::debug!("Clamped {worker_count} workers to {rows} processable rows");
    }
    let remainder = rows % workers;
    if remainder != 0 {
        log::warn!("{remainder} remainder rows are folded into the last of {workers} bands");
    }
    Ok((0..workers)
        .map(|worker_index| WorkAssignment {
            worker_index,
            worker_count: workers,
            width: size.width,
            height: size.height,
        })
        .collect())
}

/// Copies the two left and right border pixels of one row.
#[inline]
fn copy_row_border(src_row: &[u8], dst_row: &mut [u8], channels: usize) {
    let border = KERNEL_BORDER * channels;
    let tail = dst_row.len() - border;
    dst_row[..border].copy_from_slice(&src_row[..border]);
    dst_row[tail..].copy_from_slice(&src_row[tail..]);
}

fn run_band(
    src: &[u8],
    dst: &mut [u8],
    channels: usize,
    assignment: WorkAssignment,
    executor: RowExecutor,
) {
    let size = assignment.size();
    let stride = size.width * channels;
    let band = assignment.band();
    let index = assignment.worker_index;
    let count = assignment.worker_count;
    log::trace!("Worker {index} of {count} starts rows {band:?}");
    for (y, dst_row) in band.clone().zip(dst.chunks_exact_mut(stride)) {
        copy_row_border(&src[y * stride..(y + 1) * stride], dst_row, channels);
        executor(src, dst_row, size, y);
    }
    log::trace!("Worker {index} finished rows {band:?}");
}

/// Filters `src` into `dst` with `worker_count` workers, copying the 2 pixel border.
///
/// `src` is never written, so every band reads the same input no matter how
/// many workers run. Each call owns its pool, workers are joined before return.
pub(crate) fn run_parallel(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    channels: usize,
    worker_count: usize,
    policy: RemainderPolicy,
    executor: RowExecutor,
) -> Result<(), BlurError> {
    check_slice_size(src, size.width, size.height, channels)?;
    let frame = size.area() * channels;
    if dst.len() < frame {
        return Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: frame,
            received: dst.len(),
        }));
    }
    let assignments = partition_rows(size, worker_count, policy)?;
    let stride = size.width * channels;
    let dst = &mut dst[..frame];

    let (top, rest) = dst.split_at_mut(KERNEL_BORDER * stride);
    top.copy_from_slice(&src[..KERNEL_BORDER * stride]);
    let (mut interior, bottom) = rest.split_at_mut((size.height - 2 * KERNEL_BORDER) * stride);
    bottom.copy_from_slice(&src[(size.height - KERNEL_BORDER) * stride..frame]);

    let mut jobs = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let (band, tail) = std::mem::take(&mut interior)
            .split_at_mut(assignment.band().len() * stride);
        jobs.push((assignment, band));
        interior = tail;
    }

    log::debug!(
        "Filtering {}x{}x{} in {} bands",
        size.width,
        size.height,
        channels,
        jobs.len()
    );

    if jobs.len() == 1 {
        for (assignment, band) in jobs {
            run_band(src, band, channels, assignment, executor);
        }
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.len())
        .build()
        .map_err(|e| BlurError::ThreadPool(e.to_string()))?;

    pool.scope(|scope| {
        for (assignment, band) in jobs {
            scope.spawn(move |_| {
                run_band(src, band, channels, assignment, executor);
            });
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{row_executor, AccumulatorStrategy};
    use crate::test_utils::noise;

    #[test]
    fn test_bands_cover_interior() {
        let size = ImageSize::new(9, 23);
        let policy = RemainderPolicy::AssignToLast;
        for workers in 1..=19 {
            let assignments = partition_rows(size, workers, policy).unwrap();
            let mut next = KERNEL_BORDER;
            for assignment in assignments.iter() {
                let band = assignment.band();
                assert_eq!(band.start, next);
                assert!(!band.is_empty());
                next = band.end;
            }
            assert_eq!(next, size.height - KERNEL_BORDER);
        }
    }

    #[test]
    fn test_band_formula() {
        let size = ImageSize::new(9, 14);
        let assignment = WorkAssignment::new(1, 3, size).unwrap();
        assert_eq!(assignment.workload(), 3);
        assert_eq!(assignment.band(), 5..8);
        let last = WorkAssignment::new(2, 3, size).unwrap();
        assert!(last.is_last());
        assert_eq!(last.band(), 8..12);
    }

    #[test]
    fn test_assignment_rejects_bad_input() {
        let frame = ImageSize::new(9, 14);
        assert_eq!(
            WorkAssignment::new(0, 0, frame),
            Err(BlurError::ZeroWorkers)
        );
        assert_eq!(
            WorkAssignment::new(0, 1, ImageSize::new(9, 3)),
            Err(BlurError::ImageTooSmall {
                width: 9,
                height: 3
            })
        );
        assert_eq!(
            WorkAssignment::new(3, 3, frame),
            Err(BlurError::WorkerOutOfRange {
                index: 3,
                workers: 3
            })
        );
        assert_eq!(
            WorkAssignment::new(0, 11, frame),
            Err(BlurError::UnevenPartition {
                rows: 10,
                workers: 11
            })
        );
        let assignment = WorkAssignment::new(9, 10, frame).unwrap();
        assert_eq!(assignment.band(), 11..12);
        assert_eq!(assignment.size(), frame);
    }

    #[test]
    fn test_partition_errors() {
        let size = ImageSize::new(9, 14);
        assert_eq!(
            partition_rows(size, 0, RemainderPolicy::AssignToLast),
            Err(BlurError::ZeroWorkers)
        );
        assert_eq!(
            partition_rows(size, 3, RemainderPolicy::Reject),
            Err(BlurError::UnevenPartition {
                rows: 10,
                workers: 3
            })
        );
        let even = partition_rows(size, 5, RemainderPolicy::Reject).unwrap();
        assert_eq!(even.len(), 5);
        assert_eq!(even[4].worker_index(), 4);
        assert_eq!(
            partition_rows(size, 64, RemainderPolicy::AssignToLast)
                .unwrap()
                .len(),
            10
        );
    }

    #[test]
    fn test_worker_count_does_not_change_output() {
        let size = ImageSize::new(31, 27);
        let src = noise(size.area() * 3, 3);
        let executor = row_executor::<3>(AccumulatorStrategy::Reference);
        let mut single = vec![0u8; src.len()];
        let policy = RemainderPolicy::AssignToLast;
        run_parallel(&src, &mut single, size, 3, 1, policy, executor).unwrap();
        for workers in [2, 4, 7, 23] {
            let mut many = vec![0u8; src.len()];
            run_parallel(&src, &mut many, size, 3, workers, policy, executor).unwrap();
            assert_eq!(single, many, "{workers} workers");
        }
    }

    #[test]
    fn test_border_is_copied() {
        let size = ImageSize::new(8, 7);
        let src = noise(size.area(), 9);
        let mut dst = vec![0u8; src.len()];
        let executor = row_executor::<1>(AccumulatorStrategy::Unrolled);
        let policy = RemainderPolicy::AssignToLast;
        run_parallel(&src, &mut dst, size, 1, 2, policy, executor).unwrap();
        for y in 0..size.height {
            for x in 0..size.width {
                let border = y < 2 || y >= size.height - 2 || x < 2 || x >= size.width - 2;
                if border {
                    assert_eq!(dst[y * size.width + x], src[y * size.width + x]);
                }
            }
        }
    }
}
