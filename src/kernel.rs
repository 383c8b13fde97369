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

use num_traits::AsPrimitive;

/// Kernel half-width; pixels closer than this to an edge have no full neighborhood.
pub const KERNEL_BORDER: usize = 2;

/// Taps per kernel row.
pub const KERNEL_TAPS: usize = 5;

/// Integer Gaussian kernel with its normalization divisor.
///
/// `divisor` always equals the sum of `weights`, so a flat image is left
/// unchanged up to truncation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GaussianKernel<const N: usize> {
    /// Row-major weights.
    pub weights: [u32; N],
    pub divisor: u32,
    pub rows: usize,
    pub columns: usize,
}

impl<const N: usize> GaussianKernel<N> {
    #[inline(always)]
    pub const fn weight(&self, row: usize, column: usize) -> u32 {
        self.weights[row * self.columns + column]
    }

    pub const fn weight_sum(&self) -> u32 {
        let mut sum = 0u32;
        let mut i = 0usize;
        while i < N {
            sum += self.weights[i];
            i += 1;
        }
        sum
    }
}

/// The classic 273-normalized 5x5 Gaussian, sigma ≈ 1.
pub const GAUSSIAN_5X5: GaussianKernel<25> = GaussianKernel {
    weights: [
        1, 4, 7, 4, 1, //
        4, 16, 26, 16, 4, //
        7, 26, 41, 26, 7, //
        4, 16, 26, 16, 4, //
        1, 4, 7, 4, 1,
    ],
    divisor: 273,
    rows: 5,
    columns: 5,
};

/// 1x5 kernel applied horizontally then vertically by the separable variant.
///
/// Its outer product is not [GAUSSIAN_5X5], the separable variant is a
/// different filter and only approximates the 2D one.
pub const GAUSSIAN_1X5: GaussianKernel<5> = GaussianKernel {
    weights: [1, 4, 7, 4, 1],
    divisor: 17,
    rows: 1,
    columns: 5,
};

const fn widen_f32<const N: usize>(weights: &[u32; N]) -> [f32; N] {
    let mut out = [0f32; N];
    let mut i = 0usize;
    while i < N {
        out[i] = weights[i] as f32;
        i += 1;
    }
    out
}

/// [GAUSSIAN_5X5] weights for the floating accumulators, divisor stays 273.
pub const GAUSSIAN_5X5_F32: [f32; 25] = widen_f32(&GAUSSIAN_5X5.weights);
/// [GAUSSIAN_1X5] weights for the floating accumulators, divisor stays 17.
pub const GAUSSIAN_1X5_F32: [f32; 5] = widen_f32(&GAUSSIAN_1X5.weights);

const _: () = assert!(GAUSSIAN_5X5.weight_sum() == GAUSSIAN_5X5.divisor);
const _: () = assert!(GAUSSIAN_1X5.weight_sum() == GAUSSIAN_1X5.divisor);

/// Normalizes an accumulated sum: truncating division, clamped to 255.
#[inline(always)]
pub(crate) fn normalize(sum: u32, divisor: u32) -> u8 {
    (sum / divisor).min(255) as u8
}

/// Floating counterpart of [normalize], truncation happens only on the store.
#[inline(always)]
pub(crate) fn normalize_f32(sum: f32, divisor: u32) -> u8 {
    (sum / divisor as f32).min(255.).as_()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_sums_match_divisors() {
        assert_eq!(GAUSSIAN_5X5.weights.iter().sum::<u32>(), 273);
        assert_eq!(GAUSSIAN_1X5.weights.iter().sum::<u32>(), 17);
    }

    #[test]
    fn test_kernel_is_symmetric() {
        for row in 0..5 {
            for column in 0..5 {
                let w = GAUSSIAN_5X5.weight(row, column);
                assert_eq!(w, GAUSSIAN_5X5.weight(column, row));
                assert_eq!(w, GAUSSIAN_5X5.weight(4 - row, 4 - column));
            }
        }
        assert_eq!(GAUSSIAN_5X5.weight(2, 2), 41);
    }

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(normalize(273 * 100, 273), 100);
        assert_eq!(normalize(273 * 100 - 1, 273), 99);
        assert_eq!(normalize(273 * 400, 273), 255);
        assert_eq!(normalize(0, 273), 0);
        assert_eq!(normalize_f32(273. * 100., 273), 100);
        assert_eq!(normalize_f32(273. * 100. - 1., 273), 99);
        assert_eq!(normalize_f32(273. * 400., 273), 255);
    }
}
