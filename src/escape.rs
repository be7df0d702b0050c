// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.
//!
//! Every pixel of every frame comes down to the same question: how
//! many passes of z = z^2 + c does it take before the orbit of c
//! leaves the circle of radius two?  Orbits that are still inside the
//! circle when the iteration budget runs out belong to the set.  The
//! kernel comes in three forms that all return identical counts: an
//! optimized f64 loop that carries the squared components between
//! passes, a naive f64 loop kept as the oracle for the optimized one,
//! and a multiprecision loop for windows too small for f64.

use complex::{ComplexArbitrary, ComplexFixed};
use rug::Float;
use std::f64::EPSILON;

/// Orbits that wander beyond this distance from the origin never come
/// back.
pub const ESCAPE_RADIUS: f64 = 2.0;

const ESCAPE_RADIUS_SQUARED: f64 = ESCAPE_RADIUS * ESCAPE_RADIUS;

/// Which arithmetic the per-pixel kernel runs on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Precision {
    /// Hardware f64 components.
    Fixed,
    /// Multiprecision components.
    Arbitrary {
        /// Significant decimal digits carried per component.
        digits: u32,
    },
}

impl Precision {
    /// The smallest relative step this arithmetic can tell apart.
    /// Used to warn when a zoom window shrinks past what the number
    /// format can resolve.
    pub fn epsilon(&self) -> f64 {
        match *self {
            Precision::Fixed => EPSILON,
            Precision::Arbitrary { digits } => 10f64.powi(1 - digits as i32),
        }
    }
}

/// Counts the passes of z = z^2 + c before the orbit of `point`
/// leaves the escape circle, up to `limit` passes.  A count equal to
/// `limit` means the orbit never left and the point is a member of
/// the set.  A point already outside the circle comes back with a
/// count of one, since the first pass moves z from the origin onto
/// the point itself; a count of zero cannot happen.
///
/// Carries the squared components between passes, which cuts the five
/// multiplications of the naive step down to three and compares
/// against the squared radius to skip the square root.
pub fn escape_count(point: ComplexFixed, limit: usize) -> usize {
    let mut re = 0.0;
    let mut im = 0.0;
    let mut re2 = 0.0;
    let mut im2 = 0.0;
    let mut count = 0;
    while re2 + im2 <= ESCAPE_RADIUS_SQUARED && count < limit {
        im = (re + re) * im + point.im;
        re = re2 - im2 + point.re;
        re2 = re * re;
        im2 = im * im;
        count += 1;
    }
    count
}

/// The textbook form of the loop: square, add, compare against the
/// escape radius.  Kept as the oracle the optimized kernel is checked
/// against; the two produce identical counts for every input.  The
/// comparison stays in squared form, the same quantity the optimized
/// loop carries, because a square root rounds some near-circle orbits
/// back onto the radius exactly and would split the two counts there.
pub fn escape_count_naive(point: ComplexFixed, limit: usize) -> usize {
    let mut z = ComplexFixed::new(0.0, 0.0);
    let mut count = 0;
    while z.magnitude_squared() <= ESCAPE_RADIUS_SQUARED && count < limit {
        z = z.square().add(point);
        count += 1;
    }
    count
}

/// The naive loop on multiprecision components.  `point` fixes the
/// working precision; z starts at the origin rounded into the same
/// mantissa.
pub fn escape_count_arbitrary(point: &ComplexArbitrary, limit: usize) -> usize {
    let bits = point.re.prec();
    let mut z = ComplexArbitrary {
        re: Float::with_val(bits, 0.0),
        im: Float::with_val(bits, 0.0),
    };
    let mut count = 0;
    while z.magnitude() <= ESCAPE_RADIUS && count < limit {
        z = z.square().add(point);
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_origin_never_escapes() {
        let origin = ComplexFixed::new(0.0, 0.0);
        for &limit in &[1usize, 10, 500] {
            assert_eq!(escape_count(origin, limit), limit);
            assert_eq!(escape_count_naive(origin, limit), limit);
        }
    }

    #[test]
    fn far_points_escape_on_the_first_pass() {
        assert_eq!(escape_count(ComplexFixed::new(3.0, 0.0), 100), 1);
        assert_eq!(escape_count(ComplexFixed::new(2.0, 2.0), 100), 1);
        assert_eq!(escape_count_naive(ComplexFixed::new(3.0, 0.0), 100), 1);
        assert_eq!(escape_count_naive(ComplexFixed::new(2.0, 2.0), 100), 1);
    }

    #[test]
    fn minus_one_cycles_forever() {
        assert_eq!(escape_count(ComplexFixed::new(-1.0, 0.0), 100), 100);
        assert_eq!(escape_count_naive(ComplexFixed::new(-1.0, 0.0), 100), 100);
    }

    #[test]
    fn the_left_tip_of_the_set_stays_bounded() {
        // The orbit of -2 lands exactly on the escape circle and sits
        // there, so the inclusive comparison keeps it in the set.
        assert_eq!(escape_count(ComplexFixed::new(-2.0, 0.0), 200), 200);
        assert_eq!(escape_count_naive(ComplexFixed::new(-2.0, 0.0), 200), 200);
    }

    #[test]
    fn budgets_are_honored_exactly() {
        let origin = ComplexFixed::new(0.0, 0.0);
        assert_eq!(escape_count(origin, 7), 7);
        assert_eq!(escape_count_naive(origin, 7), 7);
        let origin = ComplexArbitrary::with_digits(0.0, 0.0, 10);
        assert_eq!(escape_count_arbitrary(&origin, 7), 7);
    }

    #[test]
    fn optimized_and_naive_kernels_agree_across_the_window() {
        // Every twentieth step across [-2, 2] on both axes, which
        // includes the exact boundary points -2, 0, and 2.
        for i in 0..=80 {
            for j in 0..=80 {
                let point = ComplexFixed::new(i as f64 / 20.0 - 2.0, j as f64 / 20.0 - 2.0);
                assert_eq!(
                    escape_count(point, 100),
                    escape_count_naive(point, 100),
                    "kernels disagree at {:?}",
                    point
                );
            }
        }
    }

    #[test]
    fn arbitrary_kernel_matches_fixed_on_decisive_points() {
        let decisive = [
            (0.0, 0.0),
            (-1.0, 0.0),
            (-2.0, 0.0),
            (3.0, 0.0),
            (2.0, 2.0),
            (0.25, 0.0),
        ];
        for &(re, im) in &decisive {
            let fixed = escape_count(ComplexFixed::new(re, im), 60);
            let arbitrary =
                escape_count_arbitrary(&ComplexArbitrary::with_digits(re, im, 10), 60);
            assert_eq!(fixed, arbitrary, "precisions disagree at ({}, {})", re, im);
        }
    }

    #[test]
    fn epsilon_tracks_the_digit_count() {
        assert_eq!(Precision::Fixed.epsilon(), EPSILON);
        assert_eq!(Precision::Arbitrary { digits: 10 }.epsilon(), 1e-9);
        let coarse = Precision::Arbitrary { digits: 3 }.epsilon();
        let fine = Precision::Arbitrary { digits: 6 }.epsilon();
        assert!(coarse > fine);
    }
}
