// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Produces the sequence of windows a zoom renders, one frame at a
//! time.
//!
//! Each of the four window edges walks from its starting coordinate
//! toward its target coordinate.  The first step on an edge is the
//! full distance divided by the nominal frame count; every later
//! step is the previous one scaled by the decay factor.  With decay
//! below one the steps form a geometric series, so the window closes
//! on the target quickly at first and then eases in, which keeps the
//! apparent speed of the zoom steady when the frames are played
//! back.  The sequence ends once every edge has crossed its target;
//! an edge that arrives early just waits for the others.
//!
//! A decay chosen so that the series converges exactly on the target
//! can leave f64 stuck a few ulps short, with steps too small to
//! move the bounds at all.  The sequencer notices that advancing
//! changed nothing, warns once, and ends the sequence rather than
//! emitting the same frame forever.

use error::ConfigError;
use planes::PlaneBounds;

#[derive(Copy, Clone, Debug)]
struct Increments {
    min_re: f64,
    max_re: f64,
    min_im: f64,
    max_im: f64,
}

/// Walks a starting window toward a target window.  Implements
/// Iterator; every item is the window of one frame, starting with
/// the starting window itself.
#[derive(Debug)]
pub struct ZoomSequence {
    current: PlaneBounds,
    target: PlaneBounds,
    steps: Increments,
    decay: f64,
    emitted: usize,
    stalled: bool,
}

impl ZoomSequence {
    /// Constructor.  `frames` sets the size of the first step on
    /// every edge, target minus start over `frames`; `decay` scales
    /// the steps after each frame.  The target has to sit inside the
    /// starting window, there has to be at least one frame, and the
    /// decay has to be in (0, 1].
    pub fn new(
        start: PlaneBounds,
        target: PlaneBounds,
        frames: usize,
        decay: f64,
    ) -> Result<ZoomSequence, ConfigError> {
        if frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        if !(decay > 0.0 && decay <= 1.0) {
            return Err(ConfigError::DecayOutOfRange { decay });
        }
        if !start.contains(&target) {
            return Err(ConfigError::TargetOutsideStart);
        }
        let count = frames as f64;
        Ok(ZoomSequence {
            current: start,
            target,
            steps: Increments {
                min_re: (target.min_re - start.min_re) / count,
                max_re: (target.max_re - start.max_re) / count,
                min_im: (target.min_im - start.min_im) / count,
                max_im: (target.max_im - start.max_im) / count,
            },
            decay,
            emitted: 0,
            stalled: false,
        })
    }

    /// True once the steps decayed so far that advancing no longer
    /// moves any edge, which ended the sequence short of the target.
    pub fn stalled(&self) -> bool {
        self.stalled
    }

    /// At least one edge still has distance to cover.
    fn zooming(&self) -> bool {
        self.current.min_re < self.target.min_re
            || self.current.min_im < self.target.min_im
            || self.current.max_re > self.target.max_re
            || self.current.max_im > self.target.max_im
    }
}

impl Iterator for ZoomSequence {
    type Item = PlaneBounds;

    fn next(&mut self) -> Option<PlaneBounds> {
        if self.stalled || !self.zooming() {
            return None;
        }
        let frame = self.current;
        self.current.min_re += self.steps.min_re;
        self.current.max_re += self.steps.max_re;
        self.current.min_im += self.steps.min_im;
        self.current.max_im += self.steps.max_im;
        self.steps.min_re *= self.decay;
        self.steps.max_re *= self.decay;
        self.steps.min_im *= self.decay;
        self.steps.max_im *= self.decay;
        self.emitted += 1;
        if self.current == frame {
            warn!(
                "zoom stalled after {} frames: the steps have decayed below what \
                 f64 can apply to the bounds, so the sequence ends here",
                self.emitted
            );
            self.stalled = true;
        }
        Some(frame)
    }
}
