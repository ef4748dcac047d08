mod labeled;
mod mesh;

pub use labeled::{ControlPoint, LabeledPointList};
pub use mesh::{MeshTopology, PointCloudMesh};

use std::fmt;

use crate::math::Point3;

/// The concrete kind of a point sink, resolved once when the output is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    /// An ordered list of labeled points.
    LabeledPointList,
    /// A point-cloud mesh with singleton-vertex topology.
    PointCloudMesh,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LabeledPointList => "labeled point list",
            Self::PointCloudMesh => "point cloud mesh",
        })
    }
}

/// Capability shared by every destination of captured points.
///
/// Each mutating call is atomic with respect to the sink's own state:
/// it either completes or leaves the sink untouched.
pub trait PointSink {
    /// Returns the concrete kind of this sink.
    fn kind(&self) -> SinkKind;

    /// Returns the number of stored points.
    fn count(&self) -> usize;

    /// Returns the most recently appended point, if any.
    fn last_point(&self) -> Option<Point3>;

    /// Appends a point and returns its index.
    ///
    /// Sinks without labels ignore `label`.
    fn append(&mut self, point: Point3, label: &str) -> usize;

    /// Removes the most recently appended point. No-op when empty.
    fn remove_last(&mut self);

    /// Removes every point.
    fn remove_all(&mut self);

    /// Returns `true` if the sink holds no points.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
