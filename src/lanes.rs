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

//! Lane-ordered weight tables and the matching lane gather tables.
//!
//! Vector accumulation zero-extends every sample byte into its own 16-bit
//! lane, so each weight table below holds one weight per even byte and a zero
//! in every odd byte. Multiplying the widened samples by such a table with a
//! byte multiply-and-pair-add yields exactly `sample * weight` per lane.
//!
//! Planar rows, one load of 8 bytes starting at `x - 2`:
//!
//! ```text
//! lane:    0   1   2   3   4   5   6   7
//! tap:     0   1   2   3   4   -   -   -
//! ```
//!
//! Interleaved RGB rows, one load of 16 bytes starting at `(x - 2) * 3`; the
//! 15-byte window spans 5 pixels, lane `k` holds channel `k % 3` of tap `k / 3`:
//!
//! ```text
//! lane:    0  1  2  3  4  5  6  7 | 8  9 10 11 12 13 14 15
//! tap:     0  0  0  1  1  1  2  2 | 2  3  3  3  4  4  4  -
//! chan:    0  1  2  0  1  2  0  1 | 2  0  1  2  0  1  2  -
//! ```
//!
//! Lanes 0..8 come from the low half of the load (`*_LO` tables), 8..16 from
//! the high half (`*_HI` tables).
use crate::kernel::{GAUSSIAN_5X5, KERNEL_TAPS};

/// Per kernel row weights for a planar 8-lane window.
pub const PLANE_ROW_LANES: [[u8; 16]; 5] = [
    [1, 0, 4, 0, 7, 0, 4, 0, 1, 0, 0, 0, 0, 0, 0, 0],
    [4, 0, 16, 0, 26, 0, 16, 0, 4, 0, 0, 0, 0, 0, 0, 0],
    [7, 0, 26, 0, 41, 0, 26, 0, 7, 0, 0, 0, 0, 0, 0, 0],
    [4, 0, 16, 0, 26, 0, 16, 0, 4, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 4, 0, 7, 0, 4, 0, 1, 0, 0, 0, 0, 0, 0, 0],
];

/// Per kernel row weights for lanes 0..8 of an interleaved RGB window.
pub const RGB_ROW_LANES_LO: [[u8; 16]; 5] = [
    [1, 0, 1, 0, 1, 0, 4, 0, 4, 0, 4, 0, 7, 0, 7, 0],
    [4, 0, 4, 0, 4, 0, 16, 0, 16, 0, 16, 0, 26, 0, 26, 0],
    [7, 0, 7, 0, 7, 0, 26, 0, 26, 0, 26, 0, 41, 0, 41, 0],
    [4, 0, 4, 0, 4, 0, 16, 0, 16, 0, 16, 0, 26, 0, 26, 0],
    [1, 0, 1, 0, 1, 0, 4, 0, 4, 0, 4, 0, 7, 0, 7, 0],
];

/// Per kernel row weights for lanes 8..16 of an interleaved RGB window.
pub const RGB_ROW_LANES_HI: [[u8; 16]; 5] = [
    [7, 0, 4, 0, 4, 0, 4, 0, 1, 0, 1, 0, 1, 0, 0, 0],
    [26, 0, 16, 0, 16, 0, 16, 0, 4, 0, 4, 0, 4, 0, 0, 0],
    [41, 0, 26, 0, 26, 0, 26, 0, 7, 0, 7, 0, 7, 0, 0, 0],
    [26, 0, 16, 0, 16, 0, 16, 0, 4, 0, 4, 0, 4, 0, 0, 0],
    [7, 0, 4, 0, 4, 0, 4, 0, 1, 0, 1, 0, 1, 0, 0, 0],
];

/// Lanes holding the five taps of a planar window.
pub const PLANE_LANES: [usize; KERNEL_TAPS] = [0, 1, 2, 3, 4];

/// Lanes holding the five taps of each channel of an RGB window.
pub const RGB_CHANNEL_LANES: [[usize; KERNEL_TAPS]; 3] = [
    [0, 3, 6, 9, 12],
    [1, 4, 7, 10, 13],
    [2, 5, 8, 11, 14],
];

/// Bytes a planar window load reads.
pub const PLANE_LOAD_BYTES: usize = 8;

/// Bytes an RGB window load reads, one more than the 15 it needs.
pub const RGB_LOAD_BYTES: usize = 16;

/// Reinterprets a `{w, 0, w, 0, ...}` byte table as eight 16-bit lane weights.
pub const fn widen_lanes(table: &[u8; 16]) -> [u16; 8] {
    let mut lanes = [0u16; 8];
    let mut i = 0usize;
    while i < 8 {
        lanes[i] = table[i * 2] as u16 | ((table[i * 2 + 1] as u16) << 8);
        i += 1;
    }
    lanes
}

const fn widen_rows(rows: &[[u8; 16]; 5]) -> [[u16; 8]; 5] {
    [
        widen_lanes(&rows[0]),
        widen_lanes(&rows[1]),
        widen_lanes(&rows[2]),
        widen_lanes(&rows[3]),
        widen_lanes(&rows[4]),
    ]
}

/// [PLANE_ROW_LANES] as 16-bit lanes, for widening multiplies.
pub const PLANE_ROW_LANES_U16: [[u16; 8]; 5] = widen_rows(&PLANE_ROW_LANES);
/// [RGB_ROW_LANES_LO] as 16-bit lanes.
pub const RGB_ROW_LANES_LO_U16: [[u16; 8]; 5] = widen_rows(&RGB_ROW_LANES_LO);
/// [RGB_ROW_LANES_HI] as 16-bit lanes.
pub const RGB_ROW_LANES_HI_U16: [[u16; 8]; 5] = widen_rows(&RGB_ROW_LANES_HI);

/// Reduces a planar lane-sum vector to the full 25-tap sum.
#[inline(always)]
pub(crate) fn gather_plane(lanes: &[u16; 8]) -> u32 {
    PLANE_LANES.iter().map(|&lane| lanes[lane] as u32).sum()
}

/// Reduces an RGB lane-sum vector (lo lanes then hi lanes) to one sum per channel.
#[inline(always)]
pub(crate) fn gather_rgb(lanes: &[u16; 16]) -> [u32; 3] {
    let mut sums = [0u32; 3];
    for (sum, channel) in sums.iter_mut().zip(RGB_CHANNEL_LANES.iter()) {
        *sum = channel.iter().map(|&lane| lanes[lane] as u32).sum();
    }
    sums
}

/// Largest value a single lane can reach after accumulating 5 rows.
pub const MAX_LANE_SUM: u32 = {
    let mut max_column = 0u32;
    let mut column = 0usize;
    while column < KERNEL_TAPS {
        let mut sum = 0u32;
        let mut row = 0usize;
        while row < KERNEL_TAPS {
            sum += GAUSSIAN_5X5.weight(row, column);
            row += 1;
        }
        if sum > max_column {
            max_column = sum;
        }
        column += 1;
    }
    max_column * 255
};

// Lane sums must fit a signed 16-bit lane, saturating adds never trigger.
const _: () = assert!(MAX_LANE_SUM <= i16::MAX as u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_lanes_follow_kernel() {
        for (row, table) in PLANE_ROW_LANES_U16.iter().enumerate() {
            for (tap, &lane) in PLANE_LANES.iter().enumerate() {
                assert_eq!(table[lane] as u32, GAUSSIAN_5X5.weight(row, tap));
            }
            assert!(table[5..].iter().all(|&w| w == 0));
        }
    }

    #[test]
    fn test_rgb_lanes_follow_kernel() {
        for row in 0..5 {
            let mut lanes = [0u16; 16];
            lanes[..8].copy_from_slice(&RGB_ROW_LANES_LO_U16[row]);
            lanes[8..].copy_from_slice(&RGB_ROW_LANES_HI_U16[row]);
            for channel in RGB_CHANNEL_LANES.iter() {
                for (tap, &lane) in channel.iter().enumerate() {
                    assert_eq!(lanes[lane] as u32, GAUSSIAN_5X5.weight(row, tap));
                }
            }
            assert_eq!(lanes[15], 0);
        }
    }

    #[test]
    fn test_odd_bytes_are_zero() {
        for table in PLANE_ROW_LANES
            .iter()
            .chain(RGB_ROW_LANES_LO.iter())
            .chain(RGB_ROW_LANES_HI.iter())
        {
            assert!(table.iter().skip(1).step_by(2).all(|&b| b == 0));
        }
    }

    #[test]
    fn test_gather_rgb_separates_channels() {
        let mut lanes = [0u16; 16];
        for (k, lane) in lanes.iter_mut().enumerate().take(15) {
            *lane = (k % 3 + 1) as u16;
        }
        lanes[15] = 1000;
        assert_eq!(gather_rgb(&lanes), [5, 10, 15]);
        assert_eq!(gather_plane(&[1, 2, 3, 4, 5, 100, 100, 100]), 15);
    }

    #[test]
    fn test_max_lane_sum() {
        assert_eq!(MAX_LANE_SUM, 107 * 255);
    }
}
