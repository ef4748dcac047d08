mod mode;
mod persist;

pub use mode::CollectMode;
pub use persist::PersistedSettings;

use std::fmt;

use crate::error::{ConfigError, Result};
use crate::scene::{FrameId, OutputBinding, Scene, SinkId};
use crate::sink::SinkKind;

/// Default prefix of generated labels.
pub const DEFAULT_LABEL_BASE: &str = "P";

/// Default minimum spacing between automatically collected points.
pub const DEFAULT_MINIMUM_DISTANCE_MM: f64 = 10.0;

/// Parameters of one point collection session.
///
/// Frame and output references are host-owned ids; this struct only stores
/// them and enforces the identity rules between them.
#[derive(Debug, Clone)]
pub struct CollectionConfig {
    sampling_frame: Option<FrameId>,
    anchor_frame: Option<FrameId>,
    output: Option<OutputBinding>,
    mode: CollectMode,
    minimum_distance_mm: f64,
    label_base: String,
    label_counter: u64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            sampling_frame: None,
            anchor_frame: None,
            output: None,
            mode: CollectMode::Manual,
            minimum_distance_mm: DEFAULT_MINIMUM_DISTANCE_MM,
            label_base: DEFAULT_LABEL_BASE.to_owned(),
            label_counter: 0,
        }
    }
}

impl CollectionConfig {
    /// Creates a configuration with default values and no references.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- References ---

    /// Returns the frame whose position is sampled.
    #[must_use]
    pub fn sampling_frame(&self) -> Option<FrameId> {
        self.sampling_frame
    }

    /// Sets the sampling frame.
    ///
    /// Returns `true` if the value changed, which counts as an input change.
    ///
    /// # Errors
    ///
    /// Returns an error if `frame` is the current anchor frame; the previous
    /// value is kept.
    pub fn set_sampling_frame(&mut self, frame: Option<FrameId>) -> Result<bool> {
        if frame == self.sampling_frame {
            return Ok(false);
        }
        if frame.is_some() && frame == self.anchor_frame {
            return Err(ConfigError::InvalidConfiguration(
                "anchor and sampling frames cannot be the same".into(),
            )
            .into());
        }
        self.sampling_frame = frame;
        Ok(true)
    }

    /// Returns the frame that defines the output coordinate space.
    #[must_use]
    pub fn anchor_frame(&self) -> Option<FrameId> {
        self.anchor_frame
    }

    /// Sets the anchor frame. `None` means world coordinates.
    ///
    /// Returns `true` if the value changed.
    ///
    /// # Errors
    ///
    /// Returns an error if `frame` is the current sampling frame; the previous
    /// value is kept.
    pub fn set_anchor_frame(&mut self, frame: Option<FrameId>) -> Result<bool> {
        if frame == self.anchor_frame {
            return Ok(false);
        }
        if frame.is_some() && frame == self.sampling_frame {
            return Err(ConfigError::InvalidConfiguration(
                "anchor and sampling frames cannot be the same".into(),
            )
            .into());
        }
        self.anchor_frame = frame;
        Ok(true)
    }

    /// Returns the bound output, with its kind resolved at bind time.
    #[must_use]
    pub fn output(&self) -> Option<OutputBinding> {
        self.output
    }

    /// Binds the output node, resolving its sink kind once.
    ///
    /// Returns `true` if the binding changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing or is not a supported sink;
    /// the previous binding is kept.
    pub fn set_output(&mut self, scene: &Scene, output: Option<SinkId>) -> Result<bool> {
        let binding = match output {
            Some(id) => Some(OutputBinding {
                id,
                kind: scene.resolve_sink_kind(id)?,
            }),
            None => None,
        };
        if binding == self.output {
            return Ok(false);
        }
        self.output = binding;
        Ok(true)
    }

    /// Returns the kind of the bound output, if any.
    #[must_use]
    pub fn output_kind(&self) -> Option<SinkKind> {
        self.output.map(|b| b.kind)
    }

    // --- Scalars ---

    /// Returns the collection mode.
    #[must_use]
    pub fn mode(&self) -> CollectMode {
        self.mode
    }

    /// Sets the collection mode.
    pub fn set_mode(&mut self, mode: CollectMode) {
        self.mode = mode;
    }

    /// Switches to manual collection.
    pub fn set_mode_to_manual(&mut self) {
        self.mode = CollectMode::Manual;
    }

    /// Switches to automatic collection.
    pub fn set_mode_to_automatic(&mut self) {
        self.mode = CollectMode::Automatic;
    }

    /// Returns the configured minimum distance, regardless of mode.
    #[must_use]
    pub fn minimum_distance_mm(&self) -> f64 {
        self.minimum_distance_mm
    }

    /// Sets the minimum distance. Zero disables the gate.
    ///
    /// # Errors
    ///
    /// Returns an error if `distance_mm` is negative or not finite.
    pub fn set_minimum_distance_mm(&mut self, distance_mm: f64) -> Result<()> {
        if !distance_mm.is_finite() || distance_mm < 0.0 {
            return Err(ConfigError::InvalidConfiguration(format!(
                "minimum distance must be a non-negative number, got {distance_mm}"
            ))
            .into());
        }
        self.minimum_distance_mm = distance_mm;
        Ok(())
    }

    /// Returns the distance gate in effect: the configured value in
    /// automatic mode, zero otherwise.
    #[must_use]
    pub fn effective_minimum_distance_mm(&self) -> f64 {
        match self.mode {
            CollectMode::Automatic => self.minimum_distance_mm,
            CollectMode::Manual => 0.0,
        }
    }

    /// Returns the label prefix.
    #[must_use]
    pub fn label_base(&self) -> &str {
        &self.label_base
    }

    /// Sets the label prefix.
    pub fn set_label_base(&mut self, base: impl Into<String>) {
        self.label_base = base.into();
    }

    /// Returns the suffix that the next labeled capture will use.
    #[must_use]
    pub fn label_counter(&self) -> u64 {
        self.label_counter
    }

    /// Sets the label counter explicitly.
    ///
    /// Removal operations never call this; only the host does.
    pub fn set_label_counter(&mut self, counter: u64) {
        self.label_counter = counter;
    }

    /// Returns the label for the next labeled capture, e.g. `P7`.
    #[must_use]
    pub fn next_label(&self) -> String {
        format!("{}{}", self.label_base, self.label_counter)
    }

    pub(crate) fn advance_label_counter(&mut self) {
        self.label_counter = self.label_counter.saturating_add(1);
    }

    // --- Read accessors ---

    /// Returns the number of points in the bound output.
    ///
    /// Zero if no output is bound, the output is empty, or the output can no
    /// longer be resolved.
    #[must_use]
    pub fn number_of_points_in_output(&self, scene: &Scene) -> usize {
        let Some(binding) = self.output else {
            return 0;
        };
        match scene.point_sink(binding) {
            Ok(sink) => sink.count(),
            Err(err) => {
                tracing::error!(%err, "cannot count output points; returning 0");
                0
            }
        }
    }
}

impl fmt::Display for CollectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LabelBase=\"{}\" LabelCounter=\"{}\" MinimumDistanceMm=\"{}\" CollectMode=\"{}\"",
            self.label_base, self.label_counter, self.minimum_distance_mm, self.mode
        )
    }
}
