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

use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BlurError {
    ZeroBaseSize,
    /// Kernel half-width is 2, so both sides must be at least 5.
    ImageTooSmall {
        width: usize,
        height: usize,
    },
    MinimumSliceSizeMismatch(MismatchedSize),
    ImagesMustMatch,
    ZeroWorkers,
    WorkerOutOfRange {
        index: usize,
        workers: usize,
    },
    UnevenPartition {
        rows: usize,
        workers: usize,
    },
    AllocationFailed(usize),
    ThreadPool(String),
}

impl Error for BlurError {}

impl std::fmt::Display for BlurError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BlurError::ZeroBaseSize => f.write_str("Image size must not be zero"),
            BlurError::ImageTooSmall { width, height } => f.write_fmt(format_args!(
                "Image must be at least 5x5 for a 5x5 kernel, but it is {width}x{height}"
            )),
            BlurError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            BlurError::ImagesMustMatch => {
                f.write_str("Source and destination images must match in their dimensions")
            }
            BlurError::ZeroWorkers => f.write_str("Worker count must be positive"),
            BlurError::WorkerOutOfRange { index, workers } => f.write_fmt(format_args!(
                "Worker index {index} is out of range for {workers} workers"
            )),
            BlurError::UnevenPartition { rows, workers } => f.write_fmt(format_args!(
                "{rows} processable rows cannot be split evenly between {workers} workers"
            )),
            BlurError::AllocationFailed(size) => {
                f.write_fmt(format_args!("Failed to allocate buffer of {size} elements"))
            }
            BlurError::ThreadPool(reason) => {
                f.write_fmt(format_args!("Failed to create worker pool: {reason}"))
            }
        }
    }
}

/// Allocates `size` copies of `value`, reporting exhaustion instead of aborting.
pub(crate) fn try_alloc<T: Copy>(size: usize, value: T) -> Result<Vec<T>, BlurError> {
    let mut store = Vec::new();
    store
        .try_reserve_exact(size)
        .map_err(|_| BlurError::AllocationFailed(size))?;
    store.resize(size, value);
    Ok(store)
}

/// Copies `src` into a freshly allocated buffer.
pub(crate) fn try_snapshot<T: Copy>(src: &[T]) -> Result<Vec<T>, BlurError> {
    let mut store = Vec::new();
    store
        .try_reserve_exact(src.len())
        .map_err(|_| BlurError::AllocationFailed(src.len()))?;
    store.extend_from_slice(src);
    Ok(store)
}

pub(crate) fn check_slice_size<T>(
    arr: &[T],
    width: usize,
    height: usize,
    cn: usize,
) -> Result<(), BlurError> {
    if width == 0 || height == 0 {
        return Err(BlurError::ZeroBaseSize);
    }
    if width < 5 || height < 5 {
        return Err(BlurError::ImageTooSmall { width, height });
    }
    if arr.len() < width * height * cn {
        return Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: width * height * cn,
            received: arr.len(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_slice_size() {
        let data = vec![0u8; 25];
        assert!(check_slice_size(&data, 5, 5, 1).is_ok());
        assert_eq!(
            check_slice_size(&data, 0, 5, 1),
            Err(BlurError::ZeroBaseSize)
        );
        assert_eq!(
            check_slice_size(&data, 4, 6, 1),
            Err(BlurError::ImageTooSmall {
                width: 4,
                height: 6
            })
        );
        assert_eq!(
            check_slice_size(&data, 5, 5, 3),
            Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: 75,
                received: 25
            }))
        );
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut src = vec![1u8, 2, 3];
        let snapshot = try_snapshot(&src).unwrap();
        src[0] = 9;
        assert_eq!(snapshot, vec![1, 2, 3]);
        assert_eq!(try_alloc(4, 7u32).unwrap(), vec![7; 4]);
    }
}
