use crate::math::Point3;

use super::{PointSink, SinkKind};

/// A single labeled entry of a [`LabeledPointList`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    /// Position in the anchor frame (or world when no anchor is set).
    pub position: Point3,
    /// Display label, e.g. `P3`.
    pub label: String,
}

/// Ordered sequence of labeled points; insertion order is capture order.
#[derive(Debug, Clone, Default)]
pub struct LabeledPointList {
    points: Vec<ControlPoint>,
}

impl LabeledPointList {
    /// Creates a new, empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored entries in capture order.
    #[must_use]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Returns the entry at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    /// Returns the labels in capture order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.label.as_str())
    }
}

impl PointSink for LabeledPointList {
    fn kind(&self) -> SinkKind {
        SinkKind::LabeledPointList
    }

    fn count(&self) -> usize {
        self.points.len()
    }

    fn last_point(&self) -> Option<Point3> {
        self.points.last().map(|p| p.position)
    }

    fn append(&mut self, point: Point3, label: &str) -> usize {
        self.points.push(ControlPoint {
            position: point,
            label: label.to_owned(),
        });
        self.points.len() - 1
    }

    fn remove_last(&mut self) {
        self.points.pop();
    }

    fn remove_all(&mut self) {
        self.points.clear();
    }
}
