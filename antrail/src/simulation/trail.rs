use serde::Deserialize;
use shared::util::{normalize, scale};
use shared::{AgentId, InfluenceCurve, MarkerView, Point};
use tracing::trace;

/// How expired markers leave the store after decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Drops the expired run at the head only, stopping at the first live
    /// marker or the last marker. Expired markers behind a live one stay until
    /// they reach the head, so `[4, -1, 2]` is kept whole.
    #[default]
    FrontTruncate,
    /// Drops every expired marker.
    Strict,
}

/// A decaying spot dropped by an agent on its way home with food.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailMarker {
    pub position: Point,
    /// Ticks left before the marker expires.
    pub remaining_life: i32,
    pub influence_radius: f32,
    pub agent: AgentId,
}

impl TrailMarker {
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining_life <= 0
    }
}

/// Trail markers of the whole colony, oldest first.
#[derive(Debug, Clone)]
pub struct TrailStore {
    markers: Vec<TrailMarker>,
    max_lifetime: i32,
    max_radius: f32,
    policy: EvictionPolicy,
}

impl TrailStore {
    pub fn new(max_lifetime: i32, max_radius: f32, policy: EvictionPolicy) -> Self {
        Self {
            markers: Vec::new(),
            max_lifetime,
            max_radius,
            policy,
        }
    }

    pub fn append(&mut self, marker: TrailMarker) {
        self.markers.push(marker);
    }

    /// Appends a fresh marker at full life and radius.
    pub fn lay(&mut self, position: Point, agent: AgentId) {
        self.append(TrailMarker {
            position,
            remaining_life: self.max_lifetime,
            influence_radius: self.max_radius,
            agent,
        });
    }

    /// Ages every marker by one tick, then evicts according to the policy.
    pub fn tick(&mut self, curve: &dyn InfluenceCurve) {
        let max_lifetime = self.max_lifetime as f32;
        for marker in &mut self.markers {
            marker.remaining_life -= 1;
            let life = normalize(marker.remaining_life as f32, 0.0, max_lifetime);
            marker.influence_radius = scale(curve.apply(life), 0.0, self.max_radius);
        }

        let before = self.markers.len();
        match self.policy {
            EvictionPolicy::FrontTruncate => {
                let last = before.saturating_sub(1);
                let keep_from = self
                    .markers
                    .iter()
                    .enumerate()
                    .position(|(i, m)| !m.is_expired() || i == last)
                    .unwrap_or(0);
                self.markers.drain(..keep_from);
            }
            EvictionPolicy::Strict => self.markers.retain(|m| !m.is_expired()),
        }

        let evicted = before - self.markers.len();
        if evicted > 0 {
            trace!(evicted, remaining = self.markers.len(), "evicted trail markers");
        }
    }

    /// Markers whose x and y offsets from `point` are both below `window`.
    pub fn query_near(&self, point: Point, window: f32) -> impl Iterator<Item = &TrailMarker> {
        self.markers.iter().filter(move |m| {
            (m.position.x - point.x).abs() < window && (m.position.y - point.y).abs() < window
        })
    }

    /// The nearby marker with the least life left, i.e. the one laid earliest
    /// on the most travelled stretch. Fresh markers at full life never win;
    /// ties go to the older marker.
    pub fn most_mature_near(&self, point: Point, window: f32) -> Option<&TrailMarker> {
        let mut best: Option<&TrailMarker> = None;
        let mut best_life = self.max_lifetime;
        for marker in self.query_near(point, window) {
            if marker.remaining_life < best_life {
                best_life = marker.remaining_life;
                best = Some(marker);
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrailMarker> {
        self.markers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailMarker> {
        self.markers.iter()
    }

    pub fn views(&self) -> Vec<MarkerView> {
        self.markers
            .iter()
            .map(|m| MarkerView {
                position: m.position,
                influence_radius: m.influence_radius,
                remaining_life: m.remaining_life,
            })
            .collect()
    }
}
