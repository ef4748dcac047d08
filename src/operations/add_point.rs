use crate::config::CollectionConfig;
use crate::error::{ConfigError, InputRole, Result};
use crate::scene::Scene;
use crate::sink::SinkKind;

use super::{CaptureDecision, CapturePolicy, ResolvePoint};

/// Result of a successful [`AddPoint`] execution.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// The point was appended.
    Captured {
        /// Index of the new point in the sink.
        index: usize,
        /// Label assigned to the point; `None` for sinks without labels.
        label: Option<String>,
    },
    /// The point was too close to the previous one and was not stored.
    Skipped {
        /// Distance from the last stored point.
        distance_mm: f64,
    },
}

impl CaptureOutcome {
    /// Returns `true` if a point was appended.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Captured { .. })
    }
}

/// Samples the current sampling-frame position into the bound output.
///
/// Labeled sinks receive `label_base + label_counter` and advance the
/// counter on every append. Mesh sinks take no label and leave the counter
/// alone.
pub struct AddPoint<'a> {
    config: &'a mut CollectionConfig,
}

impl<'a> AddPoint<'a> {
    /// Creates a new `AddPoint` operation.
    #[must_use]
    pub fn new(config: &'a mut CollectionConfig) -> Self {
        Self { config }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the sampling frame or output is unset, the
    /// sampling position cannot be resolved, or the output is not a
    /// supported sink. The sink and counter are untouched in every error case.
    pub fn execute(self, scene: &mut Scene) -> Result<CaptureOutcome> {
        let config = self.config;
        if config.sampling_frame().is_none() {
            return Err(ConfigError::MissingInput(InputRole::SamplingFrame).into());
        }
        let binding = config
            .output()
            .ok_or(ConfigError::MissingInput(InputRole::Output))?;

        let point = ResolvePoint::from_config(config).execute(scene)?;
        let policy = CapturePolicy::from_config(config);
        let sink = scene.point_sink_mut(binding)?;

        let decision = policy.evaluate(point, sink.last_point());
        if let CaptureDecision::Reject { distance_mm } = decision {
            tracing::debug!(
                distance_mm,
                minimum_distance_mm = config.minimum_distance_mm(),
                "point too close to previous point; skipped"
            );
            return Ok(CaptureOutcome::Skipped { distance_mm });
        }

        let outcome = match binding.kind {
            SinkKind::LabeledPointList => {
                let label = config.next_label();
                let index = sink.append(point, &label);
                config.advance_label_counter();
                CaptureOutcome::Captured {
                    index,
                    label: Some(label),
                }
            }
            SinkKind::PointCloudMesh => CaptureOutcome::Captured {
                index: sink.append(point, ""),
                label: None,
            },
        };
        tracing::debug!(
            x = point.x,
            y = point.y,
            z = point.z,
            kind = %binding.kind,
            "point captured"
        );
        Ok(outcome)
    }
}
