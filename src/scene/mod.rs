mod frame;
mod node;

pub use frame::{FrameData, FrameId};
pub use node::{OutputBinding, SinkId, SinkNode};

use crate::error::{SinkError, TransformError};
use crate::math::Matrix4;
use crate::sink::{LabeledPointList, PointCloudMesh, PointSink, SinkKind};
use slotmap::SlotMap;

/// Arena owning the host-side collaborators: coordinate frames and output nodes.
///
/// Entities reference each other via typed IDs (generational indices), so a
/// removed frame or node is detected on lookup instead of dangling.
#[derive(Debug, Default)]
pub struct Scene {
    frames: SlotMap<FrameId, FrameData>,
    sinks: SlotMap<SinkId, SinkNode>,
}

impl Scene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Frame operations ---

    /// Inserts a frame and returns its ID.
    pub fn add_frame(&mut self, data: FrameData) -> FrameId {
        self.frames.insert(data)
    }

    /// Returns `true` if the frame is in the scene.
    #[must_use]
    pub fn contains_frame(&self, id: FrameId) -> bool {
        self.frames.contains_key(id)
    }

    /// Removes a frame. Children keep their now-dangling parent reference.
    pub fn remove_frame(&mut self, id: FrameId) -> Option<FrameData> {
        self.frames.remove(id)
    }

    /// Returns a reference to the frame data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is not in the scene.
    pub fn frame(&self, id: FrameId) -> Result<&FrameData, TransformError> {
        self.frames
            .get(id)
            .ok_or_else(|| TransformError::Unresolved("frame not found".into()))
    }

    /// Returns a mutable reference to the frame data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is not in the scene.
    pub fn frame_mut(&mut self, id: FrameId) -> Result<&mut FrameData, TransformError> {
        self.frames
            .get_mut(id)
            .ok_or_else(|| TransformError::Unresolved("frame not found".into()))
    }

    /// Replaces the transform from a frame to its parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is not in the scene.
    pub fn set_frame_matrix(&mut self, id: FrameId, matrix: Matrix4) -> Result<(), TransformError> {
        self.frame_mut(id)?.matrix_to_parent = matrix;
        Ok(())
    }

    /// Returns `true` if `ancestor` is `id` itself or any frame on its parent
    /// chain, i.e. if modifying `ancestor` moves `id`.
    ///
    /// The walk stops at a missing frame or a cycle.
    #[must_use]
    pub fn is_on_parent_chain(&self, id: FrameId, ancestor: FrameId) -> bool {
        let mut current = Some(id);
        let mut depth = 0usize;
        while let Some(frame_id) = current {
            if frame_id == ancestor {
                return true;
            }
            if depth > self.frames.len() {
                return false;
            }
            current = self.frames.get(frame_id).and_then(|f| f.parent);
            depth += 1;
        }
        false
    }

    /// Composes the transform from `id` to world along its parent chain.
    ///
    /// # Errors
    ///
    /// Returns an error if any frame on the chain is missing or the chain
    /// contains a cycle.
    pub fn matrix_to_world(&self, id: FrameId) -> Result<Matrix4, TransformError> {
        let mut matrix = Matrix4::identity();
        let mut current = Some(id);
        let mut depth = 0usize;
        while let Some(frame_id) = current {
            if depth > self.frames.len() {
                return Err(TransformError::Unresolved(format!(
                    "cycle in parent chain of {:?}",
                    self.frame(id)?.name
                )));
            }
            let frame = self.frame(frame_id)?;
            matrix = frame.matrix_to_parent * matrix;
            current = frame.parent;
            depth += 1;
        }
        Ok(matrix)
    }

    /// Computes the transform from `id` into the coordinates of `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if either chain is unresolved or the target's world
    /// transform is singular.
    pub fn matrix_to_frame(&self, id: FrameId, target: FrameId) -> Result<Matrix4, TransformError> {
        let source_to_world = self.matrix_to_world(id)?;
        let target_to_world = self.matrix_to_world(target)?;
        let world_to_target = target_to_world.try_inverse().ok_or_else(|| {
            TransformError::Unresolved(format!(
                "transform of {:?} is not invertible",
                self.frames.get(target).map_or("", |f| f.name.as_str())
            ))
        })?;
        Ok(world_to_target * source_to_world)
    }

    // --- Output node operations ---

    /// Inserts an output node and returns its ID.
    pub fn add_sink(&mut self, node: impl Into<SinkNode>) -> SinkId {
        self.sinks.insert(node.into())
    }

    /// Returns `true` if the output node is in the scene.
    #[must_use]
    pub fn contains_sink(&self, id: SinkId) -> bool {
        self.sinks.contains_key(id)
    }

    /// Removes an output node.
    pub fn remove_sink(&mut self, id: SinkId) -> Option<SinkNode> {
        self.sinks.remove(id)
    }

    /// Returns a reference to the output node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the scene.
    pub fn sink_node(&self, id: SinkId) -> Result<&SinkNode, SinkError> {
        self.sinks.get(id).ok_or(SinkError::NotFound)
    }

    /// Determines which point sink variant an output node is.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing or is not a supported sink.
    pub fn resolve_sink_kind(&self, id: SinkId) -> Result<SinkKind, SinkError> {
        let node = self.sink_node(id)?;
        node.kind()
            .ok_or_else(|| SinkError::UnsupportedSinkType(node.type_name().to_owned()))
    }

    /// Returns the point sink behind a binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing or no longer matches the bound kind.
    pub fn point_sink(&self, binding: OutputBinding) -> Result<&dyn PointSink, SinkError> {
        let node = self.sink_node(binding.id)?;
        match node.as_point_sink() {
            Some(sink) if sink.kind() == binding.kind => Ok(sink),
            _ => Err(SinkError::UnsupportedSinkType(node.type_name().to_owned())),
        }
    }

    /// Returns the point sink behind a binding, mutably.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing or no longer matches the bound kind.
    pub fn point_sink_mut(
        &mut self,
        binding: OutputBinding,
    ) -> Result<&mut dyn PointSink, SinkError> {
        let node = self.sinks.get_mut(binding.id).ok_or(SinkError::NotFound)?;
        let type_name = node.type_name().to_owned();
        match node.as_point_sink_mut() {
            Some(sink) if sink.kind() == binding.kind => Ok(sink),
            _ => Err(SinkError::UnsupportedSinkType(type_name)),
        }
    }

    /// Returns the labeled point list stored under `id`, if it is one.
    #[must_use]
    pub fn labeled_list(&self, id: SinkId) -> Option<&LabeledPointList> {
        match self.sinks.get(id)? {
            SinkNode::LabeledPointList(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the point-cloud mesh stored under `id`, if it is one.
    #[must_use]
    pub fn mesh(&self, id: SinkId) -> Option<&PointCloudMesh> {
        match self.sinks.get(id)? {
            SinkNode::PointCloudMesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}
