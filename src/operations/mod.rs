mod add_point;
mod capture_policy;
mod remove_point;
mod resolve_point;

pub use add_point::{AddPoint, CaptureOutcome};
pub use capture_policy::{CaptureDecision, CapturePolicy};
pub use remove_point::{RemoveAllPoints, RemoveLastPoint};
pub use resolve_point::ResolvePoint;
