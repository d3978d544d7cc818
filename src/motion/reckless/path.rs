use std::{fmt, sync::Arc};

use super::{correction::Correction, profile::MotionProfile, stop::StopCondition};
use crate::{motion::odom::Pose, units::Length};

/// One straight leg of a [`RecklessPath`].
///
/// The leg runs from wherever the robot is when it becomes active to
/// `target`, and is complete once the robot is within `tolerance` of it. The
/// heading of `target` is not used.
#[derive(Clone)]
pub struct RecklessPathSegment {
    pub motion:     Arc<dyn MotionProfile>,
    pub correction: Arc<dyn Correction>,
    pub stop:       Arc<dyn StopCondition>,
    pub target:     Pose,
    pub tolerance:  Length,
}

impl RecklessPathSegment {
    pub fn new<M, C, S>(motion: M, correction: C, stop: S, target: Pose, tolerance: Length) -> Self
    where
        M: MotionProfile + 'static,
        C: Correction + 'static,
        S: StopCondition + 'static,
    {
        Self {
            motion: Arc::new(motion),
            correction: Arc::new(correction),
            stop: Arc::new(stop),
            target,
            tolerance,
        }
    }
}

impl fmt::Debug for RecklessPathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecklessPathSegment")
            .field("target", &self.target)
            .field("tolerance", &self.tolerance)
            .finish_non_exhaustive()
    }
}

/// An ordered list of segments, driven front to back.
///
/// # Example
///
/// ```
/// use rev::motion::{odom::Pose, reckless::*};
/// use rev::units::UnitExt;
///
/// let leg = |x| {
///     RecklessPathSegment::new(
///         ConstantMotion::new(0.5),
///         PilonsCorrection::new(4.0, 0.3.inches()),
///         SimpleStop::new(0.03.seconds(), 0.15.seconds(), 0.3),
///         Pose::inches(x, 0.0, 0.0),
///         0.5.inches(),
///     )
/// };
/// let path = RecklessPath::new().with_segment(leg(20.0)).with_segment(leg(40.0));
/// assert_eq!(path.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecklessPath {
    segments: Vec<RecklessPathSegment>,
}

impl RecklessPath {
    pub fn new() -> Self { Self::default() }

    /// Appends a segment.
    pub fn with_segment(mut self, segment: RecklessPathSegment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn segments(&self) -> &[RecklessPathSegment] { &self.segments }

    pub fn len(&self) -> usize { self.segments.len() }

    pub fn is_empty(&self) -> bool { self.segments.is_empty() }
}
