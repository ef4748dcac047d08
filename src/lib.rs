pub mod config;
pub mod controller;
pub mod error;
pub mod math;
pub mod operations;
pub mod scene;
pub mod sink;

pub use config::{CollectMode, CollectionConfig};
pub use error::{CollectError, ErrorKind, Result};
