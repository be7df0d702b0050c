#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot zoom renderer
//!
//! Paints the Mandelbrot set by measuring, for every pixel of a
//! frame, how quickly the iteration z = z^2 + c drives that pixel's
//! point toward infinity.  The number of iterations the orbit takes
//! to leave a circle of radius two picks the pixel's color from a
//! sixteen-entry gradient; points whose orbits never leave belong to
//! the set and are painted black.
//!
//! One image is rarely the goal.  The renderer produces a sequence
//! of frames, each over a slightly smaller window of the complex
//! plane than the one before, so that played back to back they zoom
//! from the classic full view down onto a chosen target.  The steps
//! the window edges take shrink geometrically from frame to frame,
//! which keeps the apparent speed of the zoom steady instead of
//! letting it slow to a crawl as the window closes in.
//!
//! The per-point arithmetic comes in two precisions: hardware f64,
//! and a rug-backed multiprecision form for windows so small that
//! neighboring pixels would otherwise collapse onto the same f64.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate rug;

pub mod complex;
pub mod error;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod render;
pub mod zoom;

pub use complex::{digits_to_bits, ComplexArbitrary, ComplexFixed};
pub use error::ConfigError;
pub use escape::{
    escape_count, escape_count_arbitrary, escape_count_naive, Precision, ESCAPE_RADIUS,
};
pub use palette::{pack_argb, Palette};
pub use planes::{map_to_plane, Pixel, PlaneBounds, PlaneMapper};
pub use render::FrameRenderer;
pub use zoom::ZoomSequence;
