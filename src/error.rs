//! Configuration failures.  Every one of these is caught before the
//! first frame is rendered; once the zoom is running, the only
//! errors left are I/O errors, and those are reported and skipped.

/// Everything the front door can reject about a render request.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// A window whose corners are swapped or collapsed on one axis.
    #[fail(
        display = "bounds are inverted on the {} axis: {} does not lie below {}",
        axis, min, max
    )]
    InvertedBounds {
        /// Which axis failed, for the message.
        axis: &'static str,
        /// Lower edge as given.
        min: f64,
        /// Upper edge as given.
        max: f64,
    },

    /// The zoom destination pokes out of the starting window.
    #[fail(display = "the target window must lie within the starting window")]
    TargetOutsideStart,

    /// A zoom of zero frames has no step size.
    #[fail(display = "frame count must be at least one")]
    NoFrames,

    /// A decay factor the sequencer cannot shrink by.
    #[fail(
        display = "decay factor must be greater than zero and at most one, not {}",
        decay
    )]
    DecayOutOfRange {
        /// The factor as given.
        decay: f64,
    },

    /// An image with no pixels in it.
    #[fail(display = "image dimensions must be nonzero, not {}x{}", width, height)]
    EmptyImage {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Arbitrary precision with no digits to hold the numbers in.
    #[fail(display = "precision must carry at least one significant digit")]
    NoDigits,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = ConfigError::InvertedBounds {
            axis: "real",
            min: 2.0,
            max: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "bounds are inverted on the real axis: 2 does not lie below -2"
        );

        let err = ConfigError::EmptyImage {
            width: 0,
            height: 600,
        };
        assert_eq!(
            err.to_string(),
            "image dimensions must be nonzero, not 0x600"
        );
    }
}
