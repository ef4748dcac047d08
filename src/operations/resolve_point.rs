use crate::config::CollectionConfig;
use crate::error::{ConfigError, InputRole, Result};
use crate::math::{translation_of, Point3};
use crate::scene::{FrameId, Scene};

/// Computes the position of the sampling frame.
///
/// The result is expressed in the anchor frame when one is set, otherwise in
/// world coordinates. Frames are read from the scene at call time and never
/// cached.
pub struct ResolvePoint {
    sampling: Option<FrameId>,
    anchor: Option<FrameId>,
}

impl ResolvePoint {
    /// Creates a new `ResolvePoint` query.
    #[must_use]
    pub fn new(sampling: Option<FrameId>, anchor: Option<FrameId>) -> Self {
        Self { sampling, anchor }
    }

    /// Creates a query for the frames referenced by `config`.
    #[must_use]
    pub fn from_config(config: &CollectionConfig) -> Self {
        Self::new(config.sampling_frame(), config.anchor_frame())
    }

    /// Executes the query, returning the translation of the sampling frame.
    ///
    /// # Errors
    ///
    /// Returns an error if no sampling frame is set or a transform chain
    /// cannot be resolved.
    pub fn execute(&self, scene: &Scene) -> Result<Point3> {
        let sampling = self
            .sampling
            .ok_or(ConfigError::MissingInput(InputRole::SamplingFrame))?;
        let matrix = match self.anchor {
            None => scene.matrix_to_world(sampling)?,
            Some(anchor) => scene.matrix_to_frame(sampling, anchor)?,
        };
        Ok(translation_of(&matrix))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::math::{translation_matrix, Matrix4, Vector3};
    use crate::scene::FrameData;
    use approx::assert_relative_eq;

    #[test]
    fn missing_sampling_frame() {
        let scene = Scene::new();
        let err = ResolvePoint::new(None, None).execute(&scene).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
    }

    #[test]
    fn world_position_without_anchor() {
        let mut scene = Scene::new();
        let tracker = scene.add_frame(FrameData::new("tracker", translation_matrix(10.0, 0.0, 0.0)));
        let stylus = scene.add_frame(
            FrameData::new("stylus", translation_matrix(0.0, 0.0, 5.0)).with_parent(tracker),
        );
        let p = ResolvePoint::new(Some(stylus), None).execute(&scene).unwrap();
        assert_relative_eq!(p, Point3::new(10.0, 0.0, 5.0));
    }

    #[test]
    fn position_relative_to_rotated_anchor() {
        let mut scene = Scene::new();
        // Anchor rotated 90 degrees about z and shifted; sampling frame at world (1, 1, 0).
        let rotation = nalgebra::Rotation3::from_axis_angle(
            &Vector3::z_axis(),
            std::f64::consts::FRAC_PI_2,
        );
        let anchor_matrix: Matrix4 = translation_matrix(1.0, 0.0, 0.0) * rotation.to_homogeneous();
        let anchor = scene.add_frame(FrameData::new("reference", anchor_matrix));
        let stylus = scene.add_frame(FrameData::new("stylus", translation_matrix(1.0, 1.0, 0.0)));

        let p = ResolvePoint::new(Some(stylus), Some(anchor))
            .execute(&scene)
            .unwrap();
        // World offset (0, 1, 0) from the anchor origin is +x in the anchor frame.
        assert_relative_eq!(p, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn disconnected_sampling_frame_is_unresolved() {
        let mut scene = Scene::new();
        let stylus = scene.add_frame(FrameData::identity("stylus"));
        scene.remove_frame(stylus);
        let err = ResolvePoint::new(Some(stylus), None)
            .execute(&scene)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransformUnresolved);
    }

    #[test]
    fn disconnected_anchor_is_unresolved() {
        let mut scene = Scene::new();
        let stylus = scene.add_frame(FrameData::identity("stylus"));
        let anchor = scene.add_frame(FrameData::identity("reference"));
        scene.remove_frame(anchor);
        let err = ResolvePoint::new(Some(stylus), Some(anchor))
            .execute(&scene)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransformUnresolved);
    }
}
