use crate::config::CollectionConfig;
use crate::error::{ConfigError, InputRole, Result};
use crate::scene::{OutputBinding, Scene};

/// Removes the most recently captured point from the bound output.
///
/// The label counter is never decremented.
pub struct RemoveLastPoint {
    output: Option<OutputBinding>,
}

impl RemoveLastPoint {
    /// Creates a new `RemoveLastPoint` operation.
    #[must_use]
    pub fn new(config: &CollectionConfig) -> Self {
        Self {
            output: config.output(),
        }
    }

    /// Executes the operation. An empty sink is left as is.
    ///
    /// # Errors
    ///
    /// Returns an error if no output is bound or it cannot be resolved.
    pub fn execute(&self, scene: &mut Scene) -> Result<()> {
        let binding = self
            .output
            .ok_or(ConfigError::MissingInput(InputRole::Output))?;
        scene.point_sink_mut(binding)?.remove_last();
        Ok(())
    }
}

/// Removes every point from the bound output.
pub struct RemoveAllPoints {
    output: Option<OutputBinding>,
}

impl RemoveAllPoints {
    /// Creates a new `RemoveAllPoints` operation.
    #[must_use]
    pub fn new(config: &CollectionConfig) -> Self {
        Self {
            output: config.output(),
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if no output is bound or it cannot be resolved.
    pub fn execute(&self, scene: &mut Scene) -> Result<()> {
        let binding = self
            .output
            .ok_or(ConfigError::MissingInput(InputRole::Output))?;
        scene.point_sink_mut(binding)?.remove_all();
        Ok(())
    }
}
