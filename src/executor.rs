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

use crate::scalar::{convolve_row_f32, convolve_row_reference, convolve_row_unrolled};
use crate::vector::vector_row_executor;
use crate::ImageSize;

/// Computes interior columns of destination row `y` from the whole source frame.
///
/// `dst` is exactly one row of the destination; border columns are not written.
pub(crate) type RowExecutor = fn(src: &[u8], dst: &mut [u8], size: ImageSize, y: usize);

/// How a 25-tap sum is accumulated.
///
/// Every strategy yields bit-identical output, they differ in speed only.
#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum AccumulatorStrategy {
    /// Nested loops over the kernel.
    Reference,
    /// Flat 25 term expression.
    Unrolled,
    /// `f32` accumulation, truncated on store.
    Float,
    /// Lane-parallel accumulation on the best available SIMD backend.
    #[default]
    Vector,
    /// [AccumulatorStrategy::Vector] with cache hints for rows ahead.
    VectorPrefetch,
}

impl AccumulatorStrategy {
    pub const ALL: [AccumulatorStrategy; 5] = [
        AccumulatorStrategy::Reference,
        AccumulatorStrategy::Unrolled,
        AccumulatorStrategy::Float,
        AccumulatorStrategy::Vector,
        AccumulatorStrategy::VectorPrefetch,
    ];
}

impl std::str::FromStr for AccumulatorStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" | "naive" => Ok(AccumulatorStrategy::Reference),
            "unrolled" => Ok(AccumulatorStrategy::Unrolled),
            "float" => Ok(AccumulatorStrategy::Float),
            "vector" | "simd" => Ok(AccumulatorStrategy::Vector),
            "prefetch" | "vector-prefetch" => Ok(AccumulatorStrategy::VectorPrefetch),
            _ => Err(format!("Unknown accumulator strategy: {s}")),
        }
    }
}

pub(crate) fn row_executor<const CN: usize>(strategy: AccumulatorStrategy) -> RowExecutor {
    match strategy {
        AccumulatorStrategy::Reference => convolve_row_reference::<CN>,
        AccumulatorStrategy::Unrolled => convolve_row_unrolled::<CN>,
        AccumulatorStrategy::Float => convolve_row_f32::<CN>,
        AccumulatorStrategy::Vector | AccumulatorStrategy::VectorPrefetch => {
            let prefetch = strategy == AccumulatorStrategy::VectorPrefetch;
            let (executor, backend) = vector_row_executor::<CN>(prefetch);
            log::debug!("Vector accumulation on {backend:?}, {CN} channels, prefetch {prefetch}");
            executor
        }
    }
}
