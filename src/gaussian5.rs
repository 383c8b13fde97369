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

use crate::executor::{row_executor, AccumulatorStrategy};
use crate::expand::{expand, normalize_into, scatter};
use crate::partition::{run_parallel, RemainderPolicy};
use crate::separable::{separable, SeparablePrecision};
use crate::util::try_snapshot;
use crate::{
    BlurError, GaussImage, GaussImageMut, ImageSize, PixelLayout, PlanarImage, ThreadingPolicy,
};

/// Parameters of the banded 5x5 filter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Gauss5Params {
    /// How each 25-tap sum is accumulated, does not affect output.
    pub strategy: AccumulatorStrategy,
    /// How many workers split the rows, does not affect output.
    pub threading_policy: ThreadingPolicy,
    /// What to do with rows left over after an even split.
    pub remainder: RemainderPolicy,
}

impl Gauss5Params {
    pub fn new(strategy: AccumulatorStrategy, threading_policy: ThreadingPolicy) -> Gauss5Params {
        Gauss5Params {
            strategy,
            threading_policy,
            remainder: RemainderPolicy::default(),
        }
    }

    pub fn with_strategy(self, strategy: AccumulatorStrategy) -> Gauss5Params {
        Gauss5Params { strategy, ..self }
    }

    pub fn with_threading_policy(self, threading_policy: ThreadingPolicy) -> Gauss5Params {
        Gauss5Params {
            threading_policy,
            ..self
        }
    }

    pub fn with_remainder(self, remainder: RemainderPolicy) -> Gauss5Params {
        Gauss5Params { remainder, ..self }
    }
}

fn blur_frame(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    layout: PixelLayout,
    params: Gauss5Params,
) -> Result<(), BlurError> {
    let executor = match layout {
        PixelLayout::Plane => row_executor::<1>(params.strategy),
        PixelLayout::Rgb => row_executor::<3>(params.strategy),
    };
    let workers = params.threading_policy.worker_count(size);
    log::debug!(
        "5x5 blur of {}x{} {layout:?} with {:?}, {workers} workers",
        size.width,
        size.height,
        params.strategy
    );
    run_parallel(
        src,
        dst,
        size,
        layout.channels(),
        workers,
        params.remainder,
        executor,
    )
}

/// Applies the 273-normalized 5x5 Gaussian to `src` and writes it into `dst`.
///
/// Pixels closer than 2 to any edge are copied from `src` unchanged. Every
/// strategy and worker count produces the same bytes.
///
/// # Arguments
///
/// * `src`: Source image, at least 5x5.
/// * `dst`: Destination image, an owned buffer is reshaped to `src`.
/// * `params`: See [Gauss5Params] for more info.
pub fn gaussian_blur_5x5(
    src: &GaussImage<u8>,
    dst: &mut GaussImageMut<u8>,
    params: Gauss5Params,
) -> Result<(), BlurError> {
    src.check_layout()?;
    dst.check_layout(Some(src))?;
    src.size_matches_mut(dst)?;
    blur_frame(
        src.data.as_ref(),
        dst.data.borrow_mut(),
        src.size(),
        src.layout,
        params,
    )
}

/// In-place variant of [gaussian_blur_5x5].
///
/// The buffer is snapshotted first, so every output pixel reads unfiltered input.
pub fn gaussian_blur_5x5_in_place(
    image: &mut GaussImageMut<u8>,
    params: Gauss5Params,
) -> Result<(), BlurError> {
    image.check_layout(None)?;
    let snapshot = try_snapshot(image.data.borrow())?;
    let size = image.size();
    let layout = image.layout;
    blur_frame(&snapshot, image.data.borrow_mut(), size, layout, params)
}

/// Filters each plane of a three channel planar image in place.
pub fn gaussian_blur_5x5_planar(
    planes: &mut PlanarImage,
    params: Gauss5Params,
) -> Result<(), BlurError> {
    planes.check_layout()?;
    let size = planes.size();
    for plane in planes.planes.iter_mut() {
        let snapshot = try_snapshot(plane)?;
        blur_frame(&snapshot, plane, size, PixelLayout::Plane, params)?;
    }
    Ok(())
}

fn expand_frame(
    src: &[u8],
    dst: &mut [u8],
    size: ImageSize,
    layout: PixelLayout,
) -> Result<(), BlurError> {
    match layout {
        PixelLayout::Plane => expand::<1>(src, dst, size),
        PixelLayout::Rgb => expand::<3>(src, dst, size),
    }
}

/// Scatter form of the 5x5 filter, every output pixel is written.
///
/// Only pixels with a full neighborhood contribute, so the 2 pixel border is
/// filtered from partial kernel mass and darkens towards the edges.
pub fn gaussian_blur_5x5_expand(
    src: &GaussImage<u8>,
    dst: &mut GaussImageMut<u8>,
) -> Result<(), BlurError> {
    src.check_layout()?;
    dst.check_layout(Some(src))?;
    src.size_matches_mut(dst)?;
    expand_frame(
        src.data.as_ref(),
        dst.data.borrow_mut(),
        src.size(),
        src.layout,
    )
}

/// In-place variant of [gaussian_blur_5x5_expand].
pub fn gaussian_blur_5x5_expand_in_place(image: &mut GaussImageMut<u8>) -> Result<(), BlurError> {
    image.check_layout(None)?;
    let size = image.size();
    let acc = match image.layout {
        PixelLayout::Plane => scatter::<1>(image.data.borrow(), size)?,
        PixelLayout::Rgb => scatter::<3>(image.data.borrow(), size)?,
    };
    normalize_into(&acc, image.data.borrow_mut());
    Ok(())
}

fn separable_frame(
    frame: &mut [u8],
    size: ImageSize,
    layout: PixelLayout,
    precision: SeparablePrecision,
) -> Result<(), BlurError> {
    match layout {
        PixelLayout::Plane => separable::<1>(frame, size, precision),
        PixelLayout::Rgb => separable::<3>(frame, size, precision),
    }
}

/// 1x5 kernel `[1, 4, 7, 4, 1] / 17` run horizontally, then vertically.
///
/// This is a separate, cheaper filter rather than a factorization of
/// [gaussian_blur_5x5]. The vertical pass leaves the top and bottom 2 rows
/// with their horizontal result.
pub fn gaussian_blur_1x5_separable(
    src: &GaussImage<u8>,
    dst: &mut GaussImageMut<u8>,
    precision: SeparablePrecision,
) -> Result<(), BlurError> {
    src.check_layout()?;
    dst.check_layout(Some(src))?;
    src.size_matches_mut(dst)?;
    let frame_len = src.row_stride() * src.height as usize;
    let frame = &mut dst.data.borrow_mut()[..frame_len];
    frame.copy_from_slice(&src.data[..frame_len]);
    separable_frame(frame, src.size(), src.layout, precision)
}

/// In-place variant of [gaussian_blur_1x5_separable].
pub fn gaussian_blur_1x5_separable_in_place(
    image: &mut GaussImageMut<u8>,
    precision: SeparablePrecision,
) -> Result<(), BlurError> {
    image.check_layout(None)?;
    let size = image.size();
    let layout = image.layout;
    separable_frame(image.data.borrow_mut(), size, layout, precision)
}
