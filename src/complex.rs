// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Complex arithmetic for the escape-time loop, in two precisions.
//!
//! Both forms expose the same three operations the loop needs:
//! componentwise addition, squaring through the expansion
//! (a+bi)^2 = (a^2 - b^2) + 2abi, and the distance from the origin.
//! The fixed form is a plain pair of f64s.  The arbitrary form holds
//! rug floats and rounds the result of every operation back to the
//! working precision, so deep zooms can trade speed for mantissa.

use num::Complex;
use rug::Float;
use std::f64::consts::LOG2_10;

/// A complex number held as a pair of f64s.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexFixed {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl ComplexFixed {
    /// Constructor.
    pub fn new(re: f64, im: f64) -> ComplexFixed {
        ComplexFixed { re, im }
    }

    /// Componentwise sum.
    pub fn add(&self, other: ComplexFixed) -> ComplexFixed {
        ComplexFixed {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    /// The square, through the binomial expansion.
    pub fn square(&self) -> ComplexFixed {
        ComplexFixed {
            re: self.re * self.re - self.im * self.im,
            im: 2.0 * self.re * self.im,
        }
    }

    /// Distance from the origin.
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Squared distance from the origin.  The escape loops compare
    /// this against the squared radius; the square root would round a
    /// handful of near-circle values back onto the radius exactly and
    /// flip the comparison.
    pub fn magnitude_squared(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

impl From<Complex<f64>> for ComplexFixed {
    fn from(point: Complex<f64>) -> ComplexFixed {
        ComplexFixed {
            re: point.re,
            im: point.im,
        }
    }
}

/// The number of mantissa bits needed to hold `digits` significant
/// decimal digits, rounded up to the next whole bit.
pub fn digits_to_bits(digits: u32) -> u32 {
    (f64::from(digits) * LOG2_10).ceil() as u32
}

/// A complex number held as a pair of multiprecision floats.  Every
/// operation rounds each component back to the precision the number
/// was built with, the way a decimal arithmetic context would.
#[derive(Clone, Debug)]
pub struct ComplexArbitrary {
    /// Real part.
    pub re: Float,
    /// Imaginary part.
    pub im: Float,
}

impl ComplexArbitrary {
    /// Builds the number from a pair of f64 seeds, rounding both into
    /// a mantissa wide enough for `digits` significant decimal digits.
    pub fn with_digits(re: f64, im: f64, digits: u32) -> ComplexArbitrary {
        let bits = digits_to_bits(digits);
        ComplexArbitrary {
            re: Float::with_val(bits, re),
            im: Float::with_val(bits, im),
        }
    }

    /// Componentwise sum.  The result carries this number's precision.
    pub fn add(&self, other: &ComplexArbitrary) -> ComplexArbitrary {
        let bits = self.re.prec();
        ComplexArbitrary {
            re: Float::with_val(bits, &self.re + &other.re),
            im: Float::with_val(bits, &self.im + &other.im),
        }
    }

    /// The square, through the same expansion as the fixed form.
    pub fn square(&self) -> ComplexArbitrary {
        let bits = self.re.prec();
        let re2 = Float::with_val(bits, &self.re * &self.re);
        let im2 = Float::with_val(bits, &self.im * &self.im);
        let mut im = Float::with_val(bits, &self.re * &self.im);
        im *= 2;
        ComplexArbitrary {
            re: Float::with_val(bits, &re2 - &im2),
            im,
        }
    }

    /// Distance from the origin, rounded at every step.
    pub fn magnitude(&self) -> Float {
        let bits = self.re.prec();
        let re2 = Float::with_val(bits, &self.re * &self.re);
        let im2 = Float::with_val(bits, &self.im * &self.im);
        let norm = Float::with_val(bits, &re2 + &im2);
        norm.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_follows_the_binomial_expansion() {
        let sq = ComplexFixed::new(2.0, 3.0).square();
        assert_eq!(sq, ComplexFixed::new(-5.0, 12.0));
    }

    #[test]
    fn magnitude_is_euclidean() {
        assert_eq!(ComplexFixed::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(ComplexFixed::new(-3.0, -4.0).magnitude(), 5.0);
        assert_eq!(ComplexFixed::new(0.0, 0.0).magnitude(), 0.0);
        assert_eq!(ComplexFixed::new(3.0, 4.0).magnitude_squared(), 25.0);
    }

    #[test]
    fn add_is_componentwise() {
        let sum = ComplexFixed::new(1.5, -2.0).add(ComplexFixed::new(0.25, 0.5));
        assert_eq!(sum, ComplexFixed::new(1.75, -1.5));
    }

    #[test]
    fn points_convert_from_the_plane_mapper_form() {
        let z = ComplexFixed::from(Complex::new(-0.5, 0.25));
        assert_eq!(z, ComplexFixed::new(-0.5, 0.25));
    }

    #[test]
    fn ten_digits_fit_in_thirty_four_bits() {
        assert_eq!(digits_to_bits(10), 34);
        assert_eq!(digits_to_bits(1), 4);
    }

    #[test]
    fn arbitrary_ops_agree_with_fixed_on_representable_values() {
        let sq = ComplexArbitrary::with_digits(2.0, 3.0, 10).square();
        assert_eq!(sq.re.to_f64(), -5.0);
        assert_eq!(sq.im.to_f64(), 12.0);

        let mag = ComplexArbitrary::with_digits(3.0, 4.0, 10).magnitude();
        assert_eq!(mag.to_f64(), 5.0);

        let sum = ComplexArbitrary::with_digits(1.5, -2.0, 10)
            .add(&ComplexArbitrary::with_digits(0.25, 0.5, 10));
        assert_eq!(sum.re.to_f64(), 1.75);
        assert_eq!(sum.im.to_f64(), -1.5);
    }
}
