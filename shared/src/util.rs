use serde::Deserialize;

/// A position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Angle of the vector pointing from `b` to `a`, in radians.
/// Coincident points give 0.
#[inline]
pub fn bearing(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    dy.atan2(dx)
}

/// Maps `v` from `[lo, hi]` onto `[.., 1]`. Only the upper bound is clamped.
///
/// An empty range counts as fully covered and yields 1.
#[inline]
pub fn normalize(v: f32, lo: f32, hi: f32) -> f32 {
    let range = hi - lo;
    if range == 0.0 {
        return 1.0;
    }
    ((v - lo) / range).min(1.0)
}

/// Projects a normalized value back into `[lo, hi]`.
#[inline]
pub fn scale(v: f32, lo: f32, hi: f32) -> f32 {
    v * (hi - lo) + lo
}

/// Point reached by travelling `length` from `p` along `angle` (radians).
#[inline]
pub fn extend(p: Point, angle: f32, length: f32) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(p.x + length * cos, p.y + length * sin)
}

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg.to_radians()
}

#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad.to_degrees()
}

/// Moves from `from` toward `to` by at most `max_step`, landing exactly on `to`
/// when it is closer than that.
pub fn step_towards(from: Point, to: Point, max_step: f32) -> Point {
    if distance(from, to) <= max_step {
        return to;
    }
    extend(from, bearing(to, from), max_step)
}

/// True when `p` lies in `[0, width) x [0, height)`.
#[inline]
pub fn in_bounds(p: Point, width: f32, height: f32) -> bool {
    p.x >= 0.0 && p.x < width && p.y >= 0.0 && p.y < height
}

/// Pulls `p` into `[0, width) x [0, height)`.
pub fn clamp_to_bounds(p: Point, width: f32, height: f32) -> Point {
    Point::new(clamp_axis(p.x, width), clamp_axis(p.y, height))
}

fn clamp_axis(v: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    // Largest float strictly below `extent`.
    let upper = f32::from_bits(extent.to_bits() - 1);
    v.clamp(0.0, upper)
}
