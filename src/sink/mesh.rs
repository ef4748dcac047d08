use crate::math::Point3;

use super::{PointSink, SinkKind};

/// Cell topology of a [`PointCloudMesh`].
///
/// Each cell lists indices into the mesh's point buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshTopology {
    /// Vertex cells; each holds exactly one point index.
    pub vertices: Vec<usize>,
    /// Polyline cells.
    pub lines: Vec<Vec<usize>>,
    /// Polygon cells.
    pub polygons: Vec<Vec<usize>>,
}

impl MeshTopology {
    /// Builds one vertex cell per point and no other topology.
    #[must_use]
    pub fn singleton_vertices(point_count: usize) -> Self {
        Self {
            vertices: (0..point_count).collect(),
            lines: Vec::new(),
            polygons: Vec::new(),
        }
    }

    /// Returns `true` if the topology holds nothing but vertex cells.
    #[must_use]
    pub fn is_vertex_only(&self) -> bool {
        self.lines.is_empty() && self.polygons.is_empty()
    }
}

/// Point buffer with derived singleton-vertex topology.
///
/// Topology is never edited cell by cell. After every structural change the
/// whole vertex topology is rebuilt and any edges or faces are dropped.
#[derive(Debug, Clone, Default)]
pub struct PointCloudMesh {
    points: Vec<Point3>,
    topology: MeshTopology,
}

impl PointCloudMesh {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing mesh, e.g. one loaded from disk, with arbitrary topology.
    ///
    /// The topology is kept as-is until the first structural change.
    #[must_use]
    pub fn with_topology(points: Vec<Point3>, topology: MeshTopology) -> Self {
        Self { points, topology }
    }

    /// Returns the point buffer.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the current cell topology.
    #[must_use]
    pub fn topology(&self) -> &MeshTopology {
        &self.topology
    }

    fn rebuild_topology(&mut self) {
        self.topology = MeshTopology::singleton_vertices(self.points.len());
    }
}

impl PointSink for PointCloudMesh {
    fn kind(&self) -> SinkKind {
        SinkKind::PointCloudMesh
    }

    fn count(&self) -> usize {
        self.points.len()
    }

    fn last_point(&self) -> Option<Point3> {
        self.points.last().copied()
    }

    fn append(&mut self, point: Point3, _label: &str) -> usize {
        self.points.push(point);
        self.rebuild_topology();
        self.points.len() - 1
    }

    fn remove_last(&mut self) {
        let Some(retain) = self.points.len().checked_sub(1) else {
            return;
        };
        // Replace the buffer rather than shrinking it in place, then rebuild.
        let retained = self.points[..retain].to_vec();
        self.points = retained;
        self.rebuild_topology();
    }

    fn remove_all(&mut self) {
        self.points = Vec::new();
        self.topology = MeshTopology::default();
    }
}
