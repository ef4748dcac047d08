use crate::sink::{LabeledPointList, PointCloudMesh, PointSink, SinkKind};

slotmap::new_key_type! {
    /// Unique identifier for an output node in the scene.
    pub struct SinkId;
}

/// A host node that may serve as the output of a collection.
#[derive(Debug, Clone)]
pub enum SinkNode {
    /// Labeled point list.
    LabeledPointList(LabeledPointList),
    /// Point-cloud mesh.
    PointCloudMesh(PointCloudMesh),
    /// Any other host node; never a valid point sink.
    Other {
        /// Host type name, reported in errors.
        type_name: String,
    },
}

impl SinkNode {
    /// Returns the sink kind, or `None` for unsupported nodes.
    #[must_use]
    pub fn kind(&self) -> Option<SinkKind> {
        self.as_point_sink().map(PointSink::kind)
    }

    /// Returns the point sink view of this node, or `None` for unsupported nodes.
    #[must_use]
    pub fn as_point_sink(&self) -> Option<&dyn PointSink> {
        match self {
            Self::LabeledPointList(list) => Some(list),
            Self::PointCloudMesh(mesh) => Some(mesh),
            Self::Other { .. } => None,
        }
    }

    /// Returns the mutable point sink view of this node, or `None` for unsupported nodes.
    pub fn as_point_sink_mut(&mut self) -> Option<&mut dyn PointSink> {
        match self {
            Self::LabeledPointList(list) => Some(list),
            Self::PointCloudMesh(mesh) => Some(mesh),
            Self::Other { .. } => None,
        }
    }

    /// Returns a short type name for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::LabeledPointList(_) => "LabeledPointList",
            Self::PointCloudMesh(_) => "PointCloudMesh",
            Self::Other { type_name } => type_name,
        }
    }
}

impl From<LabeledPointList> for SinkNode {
    fn from(list: LabeledPointList) -> Self {
        Self::LabeledPointList(list)
    }
}

impl From<PointCloudMesh> for SinkNode {
    fn from(mesh: PointCloudMesh) -> Self {
        Self::PointCloudMesh(mesh)
    }
}

/// An output reference whose sink kind was resolved at bind time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputBinding {
    /// The bound output node.
    pub id: SinkId,
    /// Kind resolved when the binding was made.
    pub kind: SinkKind,
}
