/*
 * // Copyright (c) Radzivon Bartoshyk 3/2025. All rights reserved.
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

use flexi_logger::{Duplicate, Logger};
use gauss5::{
    gaussian_blur_1x5_separable_in_place, gaussian_blur_5x5_expand_in_place,
    gaussian_blur_5x5_in_place, gaussian_blur_5x5_planar, AccumulatorStrategy, BlurError,
    Gauss5Params, GaussImageMut, PixelLayout, PlanarImage, SeparablePrecision, ThreadingPolicy,
};
use image::{ImageReader, RgbImage};
use std::error::Error;
use std::time::Instant;

#[derive(Debug, Copy, Clone)]
enum Mode {
    Interleaved(AccumulatorStrategy),
    Planar(AccumulatorStrategy),
    Expand,
    Separable(SeparablePrecision),
}

impl Mode {
    fn parse(value: &str) -> Result<Mode, String> {
        match value {
            "expand" => Ok(Mode::Expand),
            "separable" => Ok(Mode::Separable(SeparablePrecision::Integer)),
            "separable-float" => Ok(Mode::Separable(SeparablePrecision::Float)),
            _ => match value.strip_prefix("planar-") {
                Some(strategy) => Ok(Mode::Planar(strategy.parse()?)),
                None => Ok(Mode::Interleaved(value.parse()?)),
            },
        }
    }
}

fn run(
    rgb: &mut RgbImage,
    mode: Mode,
    threading_policy: ThreadingPolicy,
) -> Result<(), BlurError> {
    let (width, height) = rgb.dimensions();
    match mode {
        Mode::Planar(strategy) => {
            let params = Gauss5Params::new(strategy, threading_policy);
            let mut planar = PlanarImage::split(rgb.as_raw(), width, height)?;
            gaussian_blur_5x5_planar(&mut planar, params)?;
            planar.merge_into(rgb)
        }
        Mode::Interleaved(strategy) => {
            let params = Gauss5Params::new(strategy, threading_policy);
            let mut image = GaussImageMut::borrow(rgb, width, height, PixelLayout::Rgb);
            gaussian_blur_5x5_in_place(&mut image, params)
        }
        Mode::Expand => {
            let mut image = GaussImageMut::borrow(rgb, width, height, PixelLayout::Rgb);
            gaussian_blur_5x5_expand_in_place(&mut image)
        }
        Mode::Separable(precision) => {
            let mut image = GaussImageMut::borrow(rgb, width, height, PixelLayout::Rgb);
            gaussian_blur_1x5_separable_in_place(&mut image, precision)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let _logger = Logger::try_with_env_or_str("info")?
        .duplicate_to_stderr(Duplicate::Warn)
        .start()?;

    let args = std::env::args().collect::<Vec<String>>();
    if args.len() < 4 {
        let program = &args[0];
        eprintln!("usage: {program} <input> <output> <iterations> [threads] [strategy]");
        eprintln!("strategy: reference, unrolled, float, vector, prefetch,");
        eprintln!("          planar-<strategy>, expand, separable, separable-float");
        std::process::exit(2);
    }
    let iterations = args[3].parse::<usize>()?;
    let threading_policy = match args.get(4) {
        Some(threads) => {
            let workers = threads.parse::<usize>()?;
            ThreadingPolicy::workers(workers)
                .ok_or(BlurError::ZeroWorkers)?
        }
        None => ThreadingPolicy::Adaptive,
    };
    let mode = match args.get(5) {
        Some(mode) => Mode::parse(mode)?,
        None => Mode::Planar(AccumulatorStrategy::Vector),
    };

    let img = ImageReader::open(&args[1])?.decode()?;
    log::info!(
        "Read {} {}x{} {:?}",
        args[1],
        img.width(),
        img.height(),
        img.color()
    );
    let mut rgb = img.to_rgb8();

    let start = Instant::now();
    for _ in 0..iterations {
        run(&mut rgb, mode, threading_policy)?;
    }
    let elapsed = start.elapsed();
    log::info!(
        "Gaussian blur 5x5 [{mode:?}], execution time: {:.3} ms, with {iterations} iterations",
        elapsed.as_secs_f64() * 1000.
    );

    rgb.save(&args[2])?;
    log::info!("Saved {}", args[2]);
    Ok(())
}
