use crate::math::Matrix4;

slotmap::new_key_type! {
    /// Unique identifier for a coordinate frame in the scene.
    pub struct FrameId;
}

/// A coordinate frame: a rigid (or general affine) transform to its parent.
///
/// A frame with no parent is expressed directly in world coordinates.
#[derive(Debug, Clone)]
pub struct FrameData {
    /// Human-readable name, used in diagnostics only.
    pub name: String,
    /// Parent frame, or `None` for world.
    pub parent: Option<FrameId>,
    /// Transform from this frame to its parent.
    pub matrix_to_parent: Matrix4,
}

impl FrameData {
    /// Creates a root frame with the given transform to world.
    #[must_use]
    pub fn new(name: impl Into<String>, matrix_to_parent: Matrix4) -> Self {
        Self {
            name: name.into(),
            parent: None,
            matrix_to_parent,
        }
    }

    /// Creates a root frame with identity transform.
    #[must_use]
    pub fn identity(name: impl Into<String>) -> Self {
        Self::new(name, Matrix4::identity())
    }

    /// Sets the parent frame.
    #[must_use]
    pub fn with_parent(mut self, parent: FrameId) -> Self {
        self.parent = Some(parent);
        self
    }
}
