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

use crate::util::{check_slice_size, try_alloc};
use crate::{BlurError, ImageSize};

/// Three separate channel planes of `width * height` bytes each.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PlanarImage {
    pub planes: [Vec<u8>; 3],
    pub width: u32,
    pub height: u32,
}

impl PlanarImage {
    pub fn alloc(width: u32, height: u32) -> Result<PlanarImage, BlurError> {
        let area = width as usize * height as usize;
        Ok(PlanarImage {
            planes: [try_alloc(area, 0)?, try_alloc(area, 0)?, try_alloc(area, 0)?],
            width,
            height,
        })
    }

    /// Splits an interleaved 3-byte-per-pixel buffer into planes.
    pub fn split(rgb: &[u8], width: u32, height: u32) -> Result<PlanarImage, BlurError> {
        let size = ImageSize::new(width as usize, height as usize);
        if rgb.len() < size.area() * 3 {
            return Err(BlurError::MinimumSliceSizeMismatch(crate::MismatchedSize {
                expected: size.area() * 3,
                received: rgb.len(),
            }));
        }
        let mut planar = PlanarImage::alloc(width, height)?;
        let [first, second, third] = &mut planar.planes;
        for (((px, first), second), third) in rgb
            .chunks_exact(3)
            .zip(first.iter_mut())
            .zip(second.iter_mut())
            .zip(third.iter_mut())
        {
            *first = px[0];
            *second = px[1];
            *third = px[2];
        }
        Ok(planar)
    }

    /// Interleaves planes back into `rgb`.
    pub fn merge_into(&self, rgb: &mut [u8]) -> Result<(), BlurError> {
        let area = self.size().area();
        if rgb.len() < area * 3 {
            return Err(BlurError::MinimumSliceSizeMismatch(crate::MismatchedSize {
                expected: area * 3,
                received: rgb.len(),
            }));
        }
        let [first, second, third] = &self.planes;
        for (((dst, &first), &second), &third) in rgb
            .chunks_exact_mut(3)
            .zip(first.iter())
            .zip(second.iter())
            .zip(third.iter())
        {
            dst[0] = first;
            dst[1] = second;
            dst[2] = third;
        }
        Ok(())
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width as usize, self.height as usize)
    }

    pub(crate) fn check_layout(&self) -> Result<(), BlurError> {
        for plane in self.planes.iter() {
            check_slice_size(plane, self.width as usize, self.height as usize, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_merge() {
        let rgb = (0..5 * 5 * 3).map(|x| x as u8).collect::<Vec<u8>>();
        let planar = PlanarImage::split(&rgb, 5, 5).unwrap();
        assert_eq!(planar.planes[0][1], 3);
        assert_eq!(planar.planes[1][1], 4);
        assert_eq!(planar.planes[2][24], 74);
        let mut merged = vec![0u8; rgb.len()];
        planar.merge_into(&mut merged).unwrap();
        assert_eq!(merged, rgb);
    }

    #[test]
    fn test_split_short_buffer() {
        assert!(matches!(
            PlanarImage::split(&[0u8; 10], 5, 5),
            Err(BlurError::MinimumSliceSizeMismatch(_))
        ));
    }
}
