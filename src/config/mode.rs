use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How points are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CollectMode {
    /// Points are added only on explicit request.
    #[default]
    Manual,
    /// A point is added whenever the sampling frame moves, subject to the distance gate.
    Automatic,
}

impl CollectMode {
    /// Returns the persisted string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
        }
    }
}

impl fmt::Display for CollectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "automatic" => Ok(Self::Automatic),
            _ => Err(ConfigError::UnrecognizedPersistedValue {
                attribute: "CollectMode",
                value: s.to_owned(),
            }),
        }
    }
}
