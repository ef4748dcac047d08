use crate::config::{CollectMode, CollectionConfig};
use crate::error::Result;
use crate::operations::{AddPoint, CaptureOutcome, RemoveAllPoints, RemoveLastPoint};
use crate::scene::{FrameId, Scene};

/// What an input-changed notification led to.
#[derive(Debug, Clone, PartialEq)]
pub enum InputResponse {
    /// Manual mode; nothing to do.
    Ignored,
    /// Automatic mode with an unset or removed sampling frame or output;
    /// switched to manual.
    DemotedToManual,
    /// Automatic mode; a capture was attempted.
    Collected(CaptureOutcome),
}

/// Captures the current sampling position into the bound output.
///
/// Like every host entry point in this module, a failure is logged through
/// `tracing` before it is returned, and leaves the configuration and sinks
/// untouched.
///
/// # Errors
///
/// Returns an error if the configuration is incomplete, the sampling
/// position cannot be resolved, or the output is not a supported sink.
pub fn add_point(config: &mut CollectionConfig, scene: &mut Scene) -> Result<CaptureOutcome> {
    AddPoint::new(config)
        .execute(scene)
        .inspect_err(|err| tracing::error!(%err, "will not add any points"))
}

/// Removes the last captured point. An empty output is left as is.
///
/// # Errors
///
/// Returns an error if no output is bound or it cannot be resolved.
pub fn remove_last_point(config: &CollectionConfig, scene: &mut Scene) -> Result<()> {
    RemoveLastPoint::new(config)
        .execute(scene)
        .inspect_err(|err| tracing::error!(%err, "will not remove any points"))
}

/// Removes every captured point.
///
/// # Errors
///
/// Returns an error if no output is bound or it cannot be resolved.
pub fn remove_all_points(config: &CollectionConfig, scene: &mut Scene) -> Result<()> {
    RemoveAllPoints::new(config)
        .execute(scene)
        .inspect_err(|err| tracing::error!(%err, "will not remove any points"))
}

/// Reacts to a change of the collection inputs.
///
/// In automatic mode this captures a point. If the sampling frame or output
/// is unset, or refers to something no longer in the scene, the configuration
/// is demoted to manual mode instead. The demotion is never reversed
/// automatically.
///
/// Nothing subscribes to host events: the host calls this, or
/// [`on_frame_modified`], from its own notification mechanism.
///
/// # Errors
///
/// Returns an error if the attempted capture fails.
pub fn on_input_changed(
    config: &mut CollectionConfig,
    scene: &mut Scene,
) -> Result<InputResponse> {
    if config.mode() != CollectMode::Automatic {
        return Ok(InputResponse::Ignored);
    }
    let has_output = config
        .output()
        .is_some_and(|binding| scene.contains_sink(binding.id));
    let has_sampling_frame = config
        .sampling_frame()
        .is_some_and(|frame| scene.contains_frame(frame));
    if !has_output || !has_sampling_frame {
        tracing::warn!("collection is not fully set up; switching to manual collection");
        config.set_mode_to_manual();
        return Ok(InputResponse::DemotedToManual);
    }
    add_point(config, scene).map(InputResponse::Collected)
}

/// Routes a frame modification to [`on_input_changed`] if `frame` is the
/// sampling frame or one of its ancestors, since either moves the sampling
/// position. Changes to any other frame, the anchor included, are ignored.
///
/// # Errors
///
/// Returns an error if the triggered capture fails.
pub fn on_frame_modified(
    config: &mut CollectionConfig,
    scene: &mut Scene,
    frame: FrameId,
) -> Result<InputResponse> {
    let moves_sampling_frame = config
        .sampling_frame()
        .is_some_and(|sampling| scene.is_on_parent_chain(sampling, frame));
    if !moves_sampling_frame {
        return Ok(InputResponse::Ignored);
    }
    on_input_changed(config, scene)
}

/// Sets the sampling frame and, if it changed, notifies [`on_input_changed`].
///
/// # Errors
///
/// Returns an error if `frame` is the anchor frame (nothing changes), or if
/// the triggered capture fails.
pub fn set_sampling_frame(
    config: &mut CollectionConfig,
    scene: &mut Scene,
    frame: Option<FrameId>,
) -> Result<InputResponse> {
    let changed = config
        .set_sampling_frame(frame)
        .inspect_err(|err| tracing::error!(%err, "sampling frame not changed"))?;
    if !changed {
        return Ok(InputResponse::Ignored);
    }
    on_input_changed(config, scene)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::math::translation_matrix;
    use crate::scene::{FrameData, SinkId};
    use crate::sink::{LabeledPointList, MeshTopology, PointCloudMesh};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    struct Session {
        scene: Scene,
        config: CollectionConfig,
        stylus: FrameId,
        reference: FrameId,
        list: SinkId,
        mesh: SinkId,
    }

    fn session() -> Session {
        init_tracing();
        let mut scene = Scene::new();
        let reference = scene.add_frame(FrameData::identity("reference"));
        let stylus = scene.add_frame(FrameData::identity("stylus"));
        let list = scene.add_sink(LabeledPointList::new());
        let mesh = scene.add_sink(PointCloudMesh::new());
        let mut config = CollectionConfig::new();
        config.set_sampling_frame(Some(stylus)).unwrap();
        config.set_output(&scene, Some(list)).unwrap();
        Session {
            scene,
            config,
            stylus,
            reference,
            list,
            mesh,
        }
    }

    impl Session {
        fn move_stylus(&mut self, x: f64, y: f64, z: f64) -> Result<InputResponse> {
            self.scene
                .set_frame_matrix(self.stylus, translation_matrix(x, y, z))
                .unwrap();
            on_frame_modified(&mut self.config, &mut self.scene, self.stylus)
        }

        fn count(&self) -> usize {
            self.config.number_of_points_in_output(&self.scene)
        }
    }

    #[test]
    fn manual_mode_ignores_input_changes() {
        let mut s = session();
        assert_eq!(s.move_stylus(1.0, 0.0, 0.0).unwrap(), InputResponse::Ignored);
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn automatic_mode_collects_on_sampling_frame_motion() {
        let mut s = session();
        s.config.set_mode_to_automatic();
        s.config.set_minimum_distance_mm(5.0).unwrap();

        s.move_stylus(0.0, 0.0, 0.0).unwrap();
        s.move_stylus(0.0, 0.0, 3.0).unwrap();
        s.move_stylus(0.0, 0.0, 6.0).unwrap();
        assert_eq!(s.count(), 2);
    }

    #[test]
    fn other_frame_changes_are_ignored() {
        let mut s = session();
        s.config.set_mode_to_automatic();
        let response = on_frame_modified(&mut s.config, &mut s.scene, s.reference).unwrap();
        assert_eq!(response, InputResponse::Ignored);
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn missing_output_demotes_to_manual() {
        let mut s = session();
        s.config.set_mode_to_automatic();
        s.config.set_output(&s.scene, None).unwrap();

        let response = on_input_changed(&mut s.config, &mut s.scene).unwrap();
        assert_eq!(response, InputResponse::DemotedToManual);
        assert_eq!(s.config.mode(), CollectMode::Manual);

        // Demotion is one-way: rebinding the output does not restore automatic mode.
        s.config.set_output(&s.scene, Some(s.list)).unwrap();
        assert_eq!(
            on_input_changed(&mut s.config, &mut s.scene).unwrap(),
            InputResponse::Ignored
        );
    }

    #[test]
    fn clearing_sampling_frame_demotes_to_manual() {
        let mut s = session();
        s.config.set_mode_to_automatic();
        let response = set_sampling_frame(&mut s.config, &mut s.scene, None).unwrap();
        assert_eq!(response, InputResponse::DemotedToManual);
        assert_eq!(s.config.mode(), CollectMode::Manual);
    }

    #[test]
    fn setting_sampling_frame_collects_in_automatic_mode() {
        let mut s = session();
        s.config.set_sampling_frame(None).unwrap();
        s.config.set_mode_to_automatic();
        let response =
            set_sampling_frame(&mut s.config, &mut s.scene, Some(s.stylus)).unwrap();
        assert!(matches!(response, InputResponse::Collected(o) if o.is_captured()));
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn sampling_frame_equal_to_anchor_is_rejected() {
        let mut s = session();
        s.config.set_anchor_frame(Some(s.reference)).unwrap();
        let err =
            set_sampling_frame(&mut s.config, &mut s.scene, Some(s.reference)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert_eq!(s.config.sampling_frame(), Some(s.stylus));
    }

    #[test]
    fn removed_sampling_frame_demotes_to_manual() {
        let mut s = session();
        s.config.set_mode_to_automatic();
        s.scene.remove_frame(s.stylus);
        let response = on_input_changed(&mut s.config, &mut s.scene).unwrap();
        assert_eq!(response, InputResponse::DemotedToManual);
        assert_eq!(s.config.mode(), CollectMode::Manual);
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn removed_output_demotes_to_manual() {
        let mut s = session();
        s.config.set_mode_to_automatic();
        s.scene.remove_sink(s.list);
        let response = on_input_changed(&mut s.config, &mut s.scene).unwrap();
        assert_eq!(response, InputResponse::DemotedToManual);
        assert_eq!(s.config.mode(), CollectMode::Manual);
    }

    #[test]
    fn broken_parent_chain_in_automatic_mode_is_reported() {
        let mut s = session();
        let tracker = s.scene.add_frame(FrameData::identity("tracker"));
        s.scene.frame_mut(s.stylus).unwrap().parent = Some(tracker);
        s.config.set_mode_to_automatic();
        s.scene.remove_frame(tracker);

        let err = on_input_changed(&mut s.config, &mut s.scene).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransformUnresolved);
        assert_eq!(s.config.mode(), CollectMode::Automatic);
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn parent_frame_motion_collects_in_automatic_mode() {
        let mut s = session();
        let tracker = s.scene.add_frame(FrameData::identity("tracker"));
        s.scene.frame_mut(s.stylus).unwrap().parent = Some(tracker);
        s.config.set_mode_to_automatic();
        s.config.set_minimum_distance_mm(0.0).unwrap();

        s.scene
            .set_frame_matrix(tracker, translation_matrix(5.0, 0.0, 0.0))
            .unwrap();
        let response = on_frame_modified(&mut s.config, &mut s.scene, tracker).unwrap();
        assert!(matches!(response, InputResponse::Collected(o) if o.is_captured()));
        assert_eq!(s.count(), 1);

        let list = s.scene.labeled_list(s.list).unwrap();
        approx::assert_relative_eq!(
            list.points()[0].position,
            crate::math::Point3::new(5.0, 0.0, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn remove_all_then_count_is_zero() {
        let mut s = session();
        for _ in 0..3 {
            add_point(&mut s.config, &mut s.scene).unwrap();
        }
        remove_all_points(&s.config, &mut s.scene).unwrap();
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn label_counter_survives_removals() {
        let mut s = session();
        add_point(&mut s.config, &mut s.scene).unwrap();
        add_point(&mut s.config, &mut s.scene).unwrap();
        remove_last_point(&s.config, &mut s.scene).unwrap();
        remove_last_point(&s.config, &mut s.scene).unwrap();
        remove_last_point(&s.config, &mut s.scene).unwrap();
        assert_eq!(s.count(), 0);
        assert_eq!(s.config.label_counter(), 2);

        add_point(&mut s.config, &mut s.scene).unwrap();
        let list = s.scene.labeled_list(s.list).unwrap();
        assert_eq!(list.labels().collect::<Vec<_>>(), ["P2"]);
    }

    #[test]
    fn mesh_topology_tracks_point_count() {
        let mut s = session();
        s.config.set_output(&s.scene, Some(s.mesh)).unwrap();
        for i in 0..4 {
            s.scene
                .set_frame_matrix(s.stylus, translation_matrix(f64::from(i), 0.0, 0.0))
                .unwrap();
            add_point(&mut s.config, &mut s.scene).unwrap();
        }
        remove_last_point(&s.config, &mut s.scene).unwrap();

        let mesh = s.scene.mesh(s.mesh).unwrap();
        assert_eq!(mesh.points().len(), 3);
        assert_eq!(mesh.topology(), &MeshTopology::singleton_vertices(3));
        assert_eq!(s.config.label_counter(), 0);
    }

    #[test]
    fn points_are_expressed_in_anchor_frame() {
        let mut s = session();
        s.scene
            .set_frame_matrix(s.reference, translation_matrix(10.0, 20.0, 30.0))
            .unwrap();
        s.scene
            .set_frame_matrix(s.stylus, translation_matrix(11.0, 22.0, 33.0))
            .unwrap();
        s.config.set_anchor_frame(Some(s.reference)).unwrap();
        add_point(&mut s.config, &mut s.scene).unwrap();

        let list = s.scene.labeled_list(s.list).unwrap();
        let p = list.points()[0].position;
        approx::assert_relative_eq!(
            p,
            crate::math::Point3::new(1.0, 2.0, 3.0),
            epsilon = 1e-9
        );
    }
}
