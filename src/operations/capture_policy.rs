use crate::config::{CollectMode, CollectionConfig};
use crate::math::Point3;

/// Outcome of checking a candidate point against the distance gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureDecision {
    /// The candidate should be stored.
    Accept,
    /// The candidate is closer than the minimum distance to the last point.
    Reject {
        /// Distance from the last stored point.
        distance_mm: f64,
    },
}

/// Distance gate applied to automatically collected points.
#[derive(Debug, Clone, Copy)]
pub struct CapturePolicy {
    mode: CollectMode,
    minimum_distance_mm: f64,
}

impl CapturePolicy {
    /// Creates a new `CapturePolicy`.
    #[must_use]
    pub fn new(mode: CollectMode, minimum_distance_mm: f64) -> Self {
        Self {
            mode,
            minimum_distance_mm,
        }
    }

    /// Creates the policy configured by `config`.
    #[must_use]
    pub fn from_config(config: &CollectionConfig) -> Self {
        Self::new(config.mode(), config.minimum_distance_mm())
    }

    /// Checks `candidate` against the last stored point.
    ///
    /// Manual mode, a non-positive minimum distance, or an empty sink always
    /// accept. Otherwise the candidate is accepted iff its distance to
    /// `last` is at least the minimum distance.
    #[must_use]
    pub fn evaluate(&self, candidate: Point3, last: Option<Point3>) -> CaptureDecision {
        if self.mode == CollectMode::Manual || self.minimum_distance_mm <= 0.0 {
            return CaptureDecision::Accept;
        }
        let Some(last) = last else {
            return CaptureDecision::Accept;
        };
        let distance_mm = nalgebra::distance(&candidate, &last);
        if distance_mm < self.minimum_distance_mm {
            CaptureDecision::Reject { distance_mm }
        } else {
            CaptureDecision::Accept
        }
    }

    /// Returns `true` if `candidate` should be stored.
    #[must_use]
    pub fn should_capture(&self, candidate: Point3, last: Option<Point3>) -> bool {
        self.evaluate(candidate, last) == CaptureDecision::Accept
    }
}
