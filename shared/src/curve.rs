use serde::Deserialize;

/// Shapes a normalized value in `[0, 1]` into another value in `[0, 1]`.
///
/// Implementations must be monotonic non-decreasing over the domain. Agents use
/// it to turn distance into focus, trail markers to turn remaining life into
/// influence radius.
pub trait InfluenceCurve {
    fn apply(&self, x: f32) -> f32;
}

impl<F> InfluenceCurve for F
where
    F: Fn(f32) -> f32,
{
    fn apply(&self, x: f32) -> f32 {
        self(x)
    }
}

/// Built-in curves selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Identity response.
    #[default]
    Linear,
    /// Hermite `3x^2 - 2x^3`.
    SmoothStep,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow finish.
    EaseOut,
}

impl InfluenceCurve for CurveKind {
    fn apply(&self, x: f32) -> f32 {
        match self {
            // Left unclamped so out-of-range inputs pass straight through.
            CurveKind::Linear => x,
            CurveKind::SmoothStep => {
                let t = x.clamp(0.0, 1.0);
                t * t * (3.0 - 2.0 * t)
            }
            CurveKind::EaseIn => {
                let t = x.clamp(0.0, 1.0);
                t * t
            }
            CurveKind::EaseOut => {
                let t = x.clamp(0.0, 1.0);
                1.0 - (1.0 - t) * (1.0 - t)
            }
        }
    }
}
