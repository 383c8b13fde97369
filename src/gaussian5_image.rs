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

use crate::{
    gaussian_blur_5x5, BlurError, Gauss5Params, GaussImage, GaussImageMut, PixelLayout,
};
use image::{DynamicImage, GrayImage, RgbImage};

fn blur_raw(
    data: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    params: Gauss5Params,
) -> Result<Vec<u8>, BlurError> {
    let src = GaussImage::borrow(data, width, height, layout);
    let mut dst = GaussImageMut::alloc(width, height, layout);
    gaussian_blur_5x5(&src, &mut dst, params)?;
    Ok(dst.data.borrow().to_vec())
}

/// Applies the 5x5 Gaussian to an image provided by the image crate.
///
/// Gray images stay gray. Everything else is converted to 8-bit RGB, alpha and
/// higher bit depths are not preserved.
///
/// # Arguments
///
/// * `image`: Dynamic image provided by image crate.
/// * `params`: See [Gauss5Params] for more info.
pub fn gaussian_blur_5x5_image(
    image: &DynamicImage,
    params: Gauss5Params,
) -> Result<DynamicImage, BlurError> {
    let (width, height) = (image.width(), image.height());
    match image {
        DynamicImage::ImageLuma8(gray) => {
            let blurred = blur_raw(gray.as_raw(), width, height, PixelLayout::Plane, params)?;
            let gray = GrayImage::from_raw(width, height, blurred)
                .ok_or(BlurError::ImagesMustMatch)?;
            Ok(DynamicImage::ImageLuma8(gray))
        }
        DynamicImage::ImageRgb8(rgb) => {
            let blurred = blur_raw(rgb.as_raw(), width, height, PixelLayout::Rgb, params)?;
            let rgb = RgbImage::from_raw(width, height, blurred)
                .ok_or(BlurError::ImagesMustMatch)?;
            Ok(DynamicImage::ImageRgb8(rgb))
        }
        _ => {
            let rgb = image.to_rgb8();
            let blurred = blur_raw(rgb.as_raw(), width, height, PixelLayout::Rgb, params)?;
            let rgb = RgbImage::from_raw(width, height, blurred)
                .ok_or(BlurError::ImagesMustMatch)?;
            Ok(DynamicImage::ImageRgb8(rgb))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_stays_gray() {
        let gray = GrayImage::from_pixel(9, 9, image::Luma([100u8]));
        let image = DynamicImage::ImageLuma8(gray);
        let blurred = gaussian_blur_5x5_image(&image, Gauss5Params::default()).unwrap();
        let gray = blurred.as_luma8().unwrap();
        assert!(gray.as_raw().iter().all(|&v| v == 100));
    }

    #[test]
    fn test_rgba_becomes_rgb() {
        let rgba = image::RgbaImage::from_pixel(7, 6, image::Rgba([10u8, 20, 30, 255]));
        let image = DynamicImage::ImageRgba8(rgba);
        let blurred = gaussian_blur_5x5_image(&image, Gauss5Params::default()).unwrap();
        let rgb = blurred.as_rgb8().unwrap();
        assert_eq!(rgb.get_pixel(3, 3).0, [10, 20, 30]);
    }

    #[test]
    fn test_too_small() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(3, 9));
        assert!(matches!(
            gaussian_blur_5x5_image(&image, Gauss5Params::default()),
            Err(BlurError::ImageTooSmall { .. })
        ));
    }
}
