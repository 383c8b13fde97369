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

#![allow(clippy::too_many_arguments)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod executor;
mod expand;
mod gaussian5;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod gaussian5_image;
mod image;
mod img_size;
mod kernel;
mod lanes;
mod layout;
mod partition;
mod planar;
mod scalar;
mod separable;
#[cfg(test)]
mod test_utils;
mod threading_policy;
mod util;
mod vector;

pub use executor::AccumulatorStrategy;
pub use gaussian5::{
    gaussian_blur_1x5_separable, gaussian_blur_1x5_separable_in_place, gaussian_blur_5x5,
    gaussian_blur_5x5_expand, gaussian_blur_5x5_expand_in_place, gaussian_blur_5x5_in_place,
    gaussian_blur_5x5_planar, Gauss5Params,
};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use gaussian5_image::gaussian_blur_5x5_image;
pub use image::{BufferStore, GaussImage, GaussImageMut};
pub use img_size::ImageSize;
pub use kernel::{
    GaussianKernel, GAUSSIAN_1X5, GAUSSIAN_1X5_F32, GAUSSIAN_5X5, GAUSSIAN_5X5_F32,
    KERNEL_BORDER, KERNEL_TAPS,
};
pub use lanes::{
    widen_lanes, MAX_LANE_SUM, PLANE_LANES, PLANE_LOAD_BYTES, PLANE_ROW_LANES, PLANE_ROW_LANES_U16,
    RGB_CHANNEL_LANES, RGB_LOAD_BYTES, RGB_ROW_LANES_HI, RGB_ROW_LANES_HI_U16, RGB_ROW_LANES_LO,
    RGB_ROW_LANES_LO_U16,
};
pub use layout::PixelLayout;
pub use partition::{partition_rows, RemainderPolicy, WorkAssignment};
pub use planar::PlanarImage;
pub use separable::SeparablePrecision;
pub use threading_policy::ThreadingPolicy;
pub use util::{BlurError, MismatchedSize};
