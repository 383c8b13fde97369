/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */

#![no_main]

use gauss5::{
    gaussian_blur_5x5, gaussian_blur_5x5_expand, AccumulatorStrategy, BlurError, Gauss5Params,
    GaussImage, GaussImageMut, PixelLayout, ThreadingPolicy,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, u8, u8, u8)| {
    fuzz_8bit(
        data.0 as usize,
        data.1 as usize,
        data.2 as usize,
        data.3,
        PixelLayout::Plane,
    );
    fuzz_8bit(
        data.0 as usize,
        data.1 as usize,
        data.2 as usize,
        data.3,
        PixelLayout::Rgb,
    );
});

fn fuzz_8bit(width: usize, height: usize, workers: usize, seed: u8, layout: PixelLayout) {
    let mut state = seed as u32 | 1;
    let src = (0..width * height * layout.channels())
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect::<Vec<u8>>();
    let src_image = GaussImage::borrow(&src, width as u32, height as u32, layout);

    let mut expected = GaussImageMut::default();
    let reference = Gauss5Params::new(AccumulatorStrategy::Reference, ThreadingPolicy::Single);
    match gaussian_blur_5x5(&src_image, &mut expected, reference) {
        Ok(()) => {}
        Err(BlurError::ZeroBaseSize) | Err(BlurError::ImageTooSmall { .. }) => {
            assert!(width < 5 || height < 5);
            return;
        }
        Err(e) => panic!("{e}"),
    }

    let threading_policy = ThreadingPolicy::workers(workers % 8 + 1).unwrap();
    for strategy in AccumulatorStrategy::ALL {
        let mut dst = GaussImageMut::default();
        let params = Gauss5Params::new(strategy, threading_policy);
        gaussian_blur_5x5(&src_image, &mut dst, params).unwrap();
        assert_eq!(dst.data.borrow(), expected.data.borrow(), "{strategy:?}");
    }

    let mut expanded = GaussImageMut::default();
    gaussian_blur_5x5_expand(&src_image, &mut expanded).unwrap();
}
