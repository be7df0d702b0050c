//! Contains the PlaneBounds and PlaneMapper structs, which describe a
//! rectangular window on the complex plane and the relationship
//! between that window and a rectangle on the integral plane with an
//! origin at 0,0.  Columns of the integral plane sweep the real axis
//! and rows sweep the imaginary axis.
use error::ConfigError;
use num::Complex;

/// Describes the x, y of a point in a region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The window on the complex plane a frame spreads across, held edge
/// by edge.  The corners are leftlower (min_re, min_im) and
/// rightupper (max_re, max_im).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneBounds {
    /// Real coordinate of the left edge.
    pub min_re: f64,
    /// Real coordinate of the right edge.
    pub max_re: f64,
    /// Imaginary coordinate of the bottom edge.
    pub min_im: f64,
    /// Imaginary coordinate of the top edge.
    pub max_im: f64,
}

impl PlaneBounds {
    /// Constructor.  Rejects windows whose edges are swapped or
    /// collapsed on either axis.
    pub fn new(
        min_re: f64,
        max_re: f64,
        min_im: f64,
        max_im: f64,
    ) -> Result<PlaneBounds, ConfigError> {
        if max_re <= min_re {
            return Err(ConfigError::InvertedBounds {
                axis: "real",
                min: min_re,
                max: max_re,
            });
        }
        if max_im <= min_im {
            return Err(ConfigError::InvertedBounds {
                axis: "imaginary",
                min: min_im,
                max: max_im,
            });
        }
        Ok(PlaneBounds {
            min_re,
            max_re,
            min_im,
            max_im,
        })
    }

    /// Builds the window from its two corner points.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneBounds, ConfigError> {
        PlaneBounds::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// Width of the window along the real axis.
    pub fn span_re(&self) -> f64 {
        self.max_re - self.min_re
    }

    /// Height of the window along the imaginary axis.
    pub fn span_im(&self) -> f64 {
        self.max_im - self.min_im
    }

    /// True when `other` sits entirely inside this window, edges
    /// included.
    pub fn contains(&self, other: &PlaneBounds) -> bool {
        self.min_re <= other.min_re
            && self.min_im <= other.min_im
            && self.max_re >= other.max_re
            && self.max_im >= other.max_im
    }

    /// True while one pixel of a `width` by `height` frame still
    /// covers at least one representable step of the arithmetic
    /// rendering this window.  `epsilon` is the relative resolution
    /// of the number format in use; once the per-pixel step falls
    /// under it, neighboring pixels collapse onto the same value and
    /// the frames alias.
    pub fn resolvable(&self, width: usize, height: usize, epsilon: f64) -> bool {
        let scale = self
            .min_re
            .abs()
            .max(self.max_re.abs())
            .max(self.min_im.abs())
            .max(self.max_im.abs());
        let step = epsilon * scale;
        self.span_re() / (width as f64) >= step && self.span_im() / (height as f64) >= step
    }
}

/// Maps `index` on an axis of `axis_size` pixels linearly onto the
/// interval from `min` to `max`.  Index zero lands on `min` and an
/// index of `axis_size` lands on `max`, so the window edges map back
/// to themselves.
pub fn map_to_plane(index: usize, axis_size: usize, min: f64, max: f64) -> f64 {
    (index as f64) * (max - min) / (axis_size as f64) + min
}

/// Contains the definitions of two planes: an integral cartesian
/// plane, and a complex, real cartesian plane.  Maps pixels of the
/// first onto points of the second.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The right-upper corner of the integral plane.  The left-lower
    /// is assumed to be at 0,0.
    pub size: Pixel,
    /// The window of the complex plane the pixels spread across.
    pub bounds: PlaneBounds,
}

impl PlaneMapper where {
    /// Constructor.  The bounds have already survived edge
    /// validation; the width and height must both be nonzero, which
    /// the renderer checks once at construction.
    pub fn new(width: usize, height: usize, bounds: PlaneBounds) -> PlaneMapper {
        PlaneMapper {
            size: Pixel(width, height),
            bounds,
        }
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.size.0 * self.size.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.size.0 == 0 || self.size.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// point at the same proportional position inside the window,
    /// column to real, row to imaginary.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            map_to_plane(pixel.0, self.size.0, self.bounds.min_re, self.bounds.max_re),
            map_to_plane(pixel.1, self.size.1, self.bounds.min_im, self.bounds.max_im),
        )
    }
}
