// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sweeps a pixel grid across a window of the complex plane and runs
//! the escape kernel on every point, producing a row-major raster of
//! packed ARGB colors.  The threaded path cuts the frame into
//! horizontal bands and hands each band to its own thread; the bands
//! are disjoint slices of one allocation, so the threads never share
//! a pixel and the output is identical to the single-threaded sweep.

extern crate crossbeam;

use complex::{ComplexArbitrary, ComplexFixed};
use error::ConfigError;
use escape::{escape_count, escape_count_arbitrary, Precision};
use itertools::iproduct;
use num::Complex;
use palette::Palette;
use planes::{Pixel, PlaneBounds, PlaneMapper};

/// Renders frames of one fixed size, iteration budget, and kernel
/// precision over whatever window each frame asks for.
#[derive(Debug)]
pub struct FrameRenderer {
    width: usize,
    height: usize,
    limit: usize,
    precision: Precision,
    palette: Palette,
}

impl FrameRenderer {
    /// Constructor.  Requires the pixel dimensions of every frame,
    /// the iteration budget per point, and the arithmetic the kernel
    /// runs on.
    pub fn new(
        width: usize,
        height: usize,
        limit: usize,
        precision: Precision,
        palette: Palette,
    ) -> Result<FrameRenderer, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyImage { width, height });
        }
        if let Precision::Arbitrary { digits: 0 } = precision {
            return Err(ConfigError::NoDigits);
        }
        Ok(FrameRenderer {
            width,
            height,
            limit,
            precision,
            palette,
        })
    }

    /// The color of a single point of the window.
    fn color_at(&self, point: Complex<f64>) -> u32 {
        let count = match self.precision {
            Precision::Fixed => escape_count(ComplexFixed::from(point), self.limit),
            Precision::Arbitrary { digits } => escape_count_arbitrary(
                &ComplexArbitrary::with_digits(point.re, point.im, digits),
                self.limit,
            ),
        };
        self.palette.color_for(count, self.limit)
    }

    /// Renders one frame over `bounds` into a fresh row-major raster,
    /// single threaded.
    pub fn render(&self, bounds: &PlaneBounds) -> Vec<u32> {
        let plane = PlaneMapper::new(self.width, self.height, *bounds);
        let mut raster = vec![0 as u32; plane.len()];
        for (row, column) in iproduct!(0..self.height, 0..self.width) {
            raster[row * self.width + column] =
                self.color_at(plane.pixel_to_point(&Pixel(column, row)));
        }
        raster
    }

    /// Fills the rows of one horizontal band.  `top` is the index of
    /// the band's first row within the full frame.
    fn render_band(&self, plane: &PlaneMapper, top: usize, band: &mut [u32]) {
        let rows = band.len() / self.width;
        for (row, column) in iproduct!(0..rows, 0..self.width) {
            band[row * self.width + column] =
                self.color_at(plane.pixel_to_point(&Pixel(column, top + row)));
        }
    }

    /// A multi-threaded version of the render function that takes a
    /// thread count as an option.  The raster is split into one band
    /// of rows per thread before the threads start, so no locking is
    /// needed.
    pub fn render_threaded(&self, bounds: &PlaneBounds, threads: usize) -> Vec<u32> {
        let threads = if threads == 0 { 1 } else { threads };
        let plane = PlaneMapper::new(self.width, self.height, *bounds);
        let mut raster = vec![0 as u32; plane.len()];
        let band_rows = self.height / threads + 1;
        {
            let plane = &plane;
            let bands: Vec<&mut [u32]> = raster.chunks_mut(band_rows * self.width).collect();
            crossbeam::scope(|spawner| {
                for (index, band) in bands.into_iter().enumerate() {
                    spawner.spawn(move |_| {
                        self.render_band(plane, index * band_rows, band);
                    });
                }
            })
            .unwrap();
        }
        raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> PlaneBounds {
        PlaneBounds::new(-2.0, 2.0, -2.0, 2.0).unwrap()
    }

    fn renderer(width: usize, height: usize) -> FrameRenderer {
        FrameRenderer::new(width, height, 80, Precision::Fixed, Palette::default()).unwrap()
    }

    #[test]
    fn construction_rejects_empty_frames() {
        let err = FrameRenderer::new(0, 100, 80, Precision::Fixed, Palette::default());
        assert_eq!(
            err.unwrap_err(),
            ConfigError::EmptyImage {
                width: 0,
                height: 100
            }
        );
        let err = FrameRenderer::new(100, 0, 80, Precision::Fixed, Palette::default());
        assert_eq!(
            err.unwrap_err(),
            ConfigError::EmptyImage {
                width: 100,
                height: 0
            }
        );
    }

    #[test]
    fn construction_rejects_digitless_precision() {
        let precision = Precision::Arbitrary { digits: 0 };
        let err = FrameRenderer::new(10, 10, 80, precision, Palette::default());
        assert_eq!(err.unwrap_err(), ConfigError::NoDigits);
    }

    #[test]
    fn known_points_of_a_small_frame() {
        let raster = renderer(100, 100).render(&window());
        let palette = Palette::default();
        assert_eq!(raster.len(), 100 * 100);
        // Column 25, row 50 sits on -1+0i, a member of the set.
        assert_eq!(raster[50 * 100 + 25], palette.interior());
        // Column 99, row 99 sits near (1.96, 1.96), which clears the
        // escape circle on the first pass.
        assert_eq!(raster[99 * 100 + 99], palette.color_for(1, 80));
    }

    #[test]
    fn threaded_rendering_matches_single_threaded() {
        let r = renderer(64, 48);
        let frame = r.render(&window());
        for &threads in &[1usize, 3, 4, 7] {
            assert_eq!(r.render_threaded(&window(), threads), frame);
        }
    }

    #[test]
    fn the_arbitrary_kernel_renders_the_same_regions() {
        // A window buried in the main cardioid is interior at any
        // precision; one far outside escapes on the first pass.
        let inside = PlaneBounds::new(-0.1, 0.1, -0.1, 0.1).unwrap();
        let outside = PlaneBounds::new(2.5, 3.5, 2.5, 3.5).unwrap();
        let palette = Palette::default();
        let precision = Precision::Arbitrary { digits: 10 };
        let r = FrameRenderer::new(8, 8, 25, precision, palette).unwrap();
        for color in r.render(&inside) {
            assert_eq!(color, palette.interior());
        }
        for color in r.render(&outside) {
            assert_eq!(color, palette.color_for(1, 25));
        }
        assert_eq!(r.render_threaded(&inside, 3), r.render(&inside));
    }
}
