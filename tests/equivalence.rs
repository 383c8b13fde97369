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

use gauss5::{
    gaussian_blur_1x5_separable, gaussian_blur_5x5, gaussian_blur_5x5_expand,
    gaussian_blur_5x5_in_place, gaussian_blur_5x5_planar, partition_rows, AccumulatorStrategy,
    Gauss5Params, GaussImage, GaussImageMut, PixelLayout, PlanarImage, RemainderPolicy,
    SeparablePrecision, ThreadingPolicy, GAUSSIAN_5X5,
};

fn gradient(width: usize, height: usize, channels: usize) -> Vec<u8> {
    (0..width * height * channels)
        .map(|i| ((i * 37 + (i / channels) * 11) % 256) as u8)
        .collect()
}

#[test]
fn strategies_and_workers_are_interchangeable() {
    for &(width, height) in &[(5u32, 5u32), (8, 6), (64, 17), (101, 33)] {
        for layout in [PixelLayout::Plane, PixelLayout::Rgb] {
            let data = gradient(width as usize, height as usize, layout.channels());
            let src = GaussImage::borrow(&data, width, height, layout);
            let mut expected = GaussImageMut::default();
            gaussian_blur_5x5(
                &src,
                &mut expected,
                Gauss5Params::new(AccumulatorStrategy::Reference, ThreadingPolicy::Single),
            )
            .unwrap();
            for strategy in AccumulatorStrategy::ALL {
                for workers in 1..=6 {
                    let params =
                        Gauss5Params::new(strategy, ThreadingPolicy::workers(workers).unwrap());
                    let mut dst = GaussImageMut::default();
                    gaussian_blur_5x5(&src, &mut dst, params).unwrap();
                    assert_eq!(
                        dst.data.borrow(),
                        expected.data.borrow(),
                        "{width}x{height} {layout:?} {strategy:?} {workers} workers"
                    );
                }
            }
        }
    }
}

#[test]
fn uniform_image_is_fixed_point() {
    let data = vec![100u8; 9 * 9 * 3];
    let src = GaussImage::borrow(&data, 9, 9, PixelLayout::Rgb);
    let mut dst = GaussImageMut::default();
    gaussian_blur_5x5(&src, &mut dst, Gauss5Params::default()).unwrap();
    assert!(dst.data.borrow().iter().all(|&v| v == 100));

    let mut separable = GaussImageMut::default();
    gaussian_blur_1x5_separable(&src, &mut separable, SeparablePrecision::Integer).unwrap();
    assert!(separable.data.borrow().iter().all(|&v| v == 100));
}

#[test]
fn repeated_in_place_matches_chained_copies() {
    let mut data = gradient(40, 30, 1);
    let mut chained = data.clone();
    let policy = ThreadingPolicy::workers(3).unwrap();
    let params = Gauss5Params::default().with_threading_policy(policy);
    let mut image = GaussImageMut::borrow(&mut data, 40, 30, PixelLayout::Plane);
    for _ in 0..4 {
        gaussian_blur_5x5_in_place(&mut image, params).unwrap();
        let src = GaussImage::borrow(&chained, 40, 30, PixelLayout::Plane);
        let mut dst = GaussImageMut::default();
        gaussian_blur_5x5(&src, &mut dst, params).unwrap();
        chained = dst.data.borrow().to_vec();
    }
    assert_eq!(image.data.borrow(), chained.as_slice());
}

#[test]
fn impulse_spreads_kernel_weights() {
    let mut data = vec![0u8; 9 * 9];
    data[4 * 9 + 4] = 255;
    let src = GaussImage::borrow(&data, 9, 9, PixelLayout::Plane);
    let mut dst = GaussImageMut::default();
    gaussian_blur_5x5(&src, &mut dst, Gauss5Params::default()).unwrap();
    let out = dst.data.borrow();
    for ky in 0..5 {
        for kx in 0..5 {
            let expected = (255 * GAUSSIAN_5X5.weight(ky, kx) / GAUSSIAN_5X5.divisor) as u8;
            assert_eq!(out[(ky + 2) * 9 + kx + 2], expected);
        }
    }
    assert_eq!(out[4 * 9 + 4], 38);
}

#[test]
fn expand_writes_every_pixel() {
    let data = vec![200u8; 12 * 10];
    let src = GaussImage::borrow(&data, 12, 10, PixelLayout::Plane);
    let mut dst = GaussImageMut::default();
    gaussian_blur_5x5_expand(&src, &mut dst).unwrap();
    let out = dst.data.borrow();
    // darker towards the corners, full value where every source scatters
    assert_eq!(out[0], 0);
    assert!(out[12 + 1] < out[2 * 12 + 2]);
    assert_eq!(out[5 * 12 + 5], 200);
}

#[test]
fn planar_and_interleaved_agree() {
    let data = gradient(23, 19, 3);
    let src = GaussImage::borrow(&data, 23, 19, PixelLayout::Rgb);
    let mut expected = GaussImageMut::default();
    gaussian_blur_5x5(&src, &mut expected, Gauss5Params::default()).unwrap();

    let mut planar = PlanarImage::split(&data, 23, 19).unwrap();
    gaussian_blur_5x5_planar(&mut planar, Gauss5Params::default()).unwrap();
    let mut merged = vec![0u8; data.len()];
    planar.merge_into(&mut merged).unwrap();
    assert_eq!(merged.as_slice(), expected.data.borrow());
}

#[test]
fn partition_is_even_when_divisible() {
    let bands = partition_rows(gauss5::ImageSize::new(16, 16), 4, RemainderPolicy::Reject)
        .unwrap()
        .iter()
        .map(|assignment| assignment.band())
        .collect::<Vec<_>>();
    assert_eq!(bands, vec![2..5, 5..8, 8..11, 11..14]);
}
