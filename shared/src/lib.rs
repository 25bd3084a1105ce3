pub mod api;
pub mod curve;
pub mod util;

pub use api::{AgentId, AgentView, MarkerView, Snapshot, TargetView};
pub use curve::{CurveKind, InfluenceCurve};
pub use util::Point;
