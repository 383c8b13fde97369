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

use crate::util::check_slice_size;
use crate::{BlurError, ImageSize, PixelLayout};
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub(crate) fn resize(&mut self, new_size: usize, value: T) {
        match self {
            Self::Borrowed(_) => {}
            Self::Owned(vec) => vec.resize(new_size, value),
        }
    }
}

/// Immutable tightly packed image, rows are `width * layout.channels()` items long.
pub struct GaussImage<'a, T: Clone + Copy + Default + Debug> {
    pub data: std::borrow::Cow<'a, [T]>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
}

/// Mutable tightly packed image.
/// If it owns its vector it is resized to match the source on out-of-place calls.
pub struct GaussImageMut<'a, T: Clone + Copy + Default + Debug> {
    pub data: BufferStore<'a, T>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
}

impl<T: Clone + Copy + Default + Debug> Default for GaussImageMut<'_, T> {
    fn default() -> Self {
        GaussImageMut {
            data: BufferStore::Owned(Vec::new()),
            width: 0,
            height: 0,
            layout: PixelLayout::Plane,
        }
    }
}

impl<'a, T: Clone + Copy + Default + Debug> GaussImage<'a, T> {
    /// Allocates a zeroed image for given [PixelLayout]
    pub fn alloc(width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            data: std::borrow::Cow::Owned(vec![
                T::default();
                width as usize * height as usize * layout.channels()
            ]),
            width,
            height,
            layout,
        }
    }

    /// Borrows existing data
    pub fn borrow(arr: &'a [T], width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            data: std::borrow::Cow::Borrowed(arr),
            width,
            height,
            layout,
        }
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width as usize, self.height as usize)
    }

    /// Items in one row
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.layout.channels()
    }

    /// Checks the buffer covers `width * height` pixels and the image fits the kernel
    #[inline]
    pub fn check_layout(&self) -> Result<(), BlurError> {
        check_slice_size(
            self.data.as_ref(),
            self.width as usize,
            self.height as usize,
            self.layout.channels(),
        )
    }

    /// Checks if it is matches the size of the other image
    #[inline]
    pub fn size_matches_mut(&self, other: &GaussImageMut<'_, T>) -> Result<(), BlurError> {
        if self.width == other.width && self.height == other.height && self.layout == other.layout
        {
            return Ok(());
        }
        Err(BlurError::ImagesMustMatch)
    }

    /// Deep clone as mutable image
    pub fn clone_as_mut<'f>(&self) -> GaussImageMut<'f, T> {
        GaussImageMut {
            data: BufferStore::Owned(self.data.to_vec()),
            width: self.width,
            height: self.height,
            layout: self.layout,
        }
    }
}

impl<'a, T: Clone + Copy + Default + Debug> GaussImageMut<'a, T> {
    /// Allocates a zeroed image for given [PixelLayout]
    pub fn alloc(width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            data: BufferStore::Owned(vec![
                T::default();
                width as usize * height as usize * layout.channels()
            ]),
            width,
            height,
            layout,
        }
    }

    /// Mutable borrows existing data
    pub fn borrow(arr: &'a mut [T], width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            layout,
        }
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width as usize, self.height as usize)
    }

    /// Checks layout, an owned destination is first reshaped to `other`
    #[inline]
    pub fn check_layout(&mut self, other: Option<&GaussImage<'_, T>>) -> Result<(), BlurError> {
        if let Some(other) = other {
            if matches!(self.data, BufferStore::Owned(_)) {
                self.width = other.width;
                self.height = other.height;
                self.layout = other.layout;
                self.data.resize(
                    other.width as usize * other.height as usize * other.layout.channels(),
                    T::default(),
                );
            }
        }
        check_slice_size(
            self.data.borrow(),
            self.width as usize,
            self.height as usize,
            self.layout.channels(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_destination_is_reshaped() {
        let src = GaussImage::<u8>::alloc(9, 7, PixelLayout::Rgb);
        let mut dst = GaussImageMut::<u8>::default();
        dst.check_layout(Some(&src)).unwrap();
        assert_eq!(dst.data.borrow().len(), 9 * 7 * 3);
        assert!(src.size_matches_mut(&dst).is_ok());
    }

    #[test]
    fn test_borrowed_destination_is_validated() {
        let src = GaussImage::<u8>::alloc(9, 7, PixelLayout::Plane);
        let mut storage = vec![0u8; 10];
        let mut dst = GaussImageMut::borrow(&mut storage, 9, 7, PixelLayout::Plane);
        assert!(matches!(
            dst.check_layout(Some(&src)),
            Err(BlurError::MinimumSliceSizeMismatch(_))
        ));
    }

    #[test]
    fn test_small_image_rejected() {
        let src = GaussImage::<u8>::alloc(4, 40, PixelLayout::Plane);
        assert_eq!(
            src.check_layout(),
            Err(BlurError::ImageTooSmall {
                width: 4,
                height: 40
            })
        );
    }
}
