//! Concentrated loads on a beam span

use serde::{Deserialize, Serialize};

/// A concentrated transverse load
///
/// Positive magnitudes act downward; reactions are reported positive upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Distance from support A
    pub position: f64,
    /// Load magnitude
    pub magnitude: f64,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PointLoad {
    /// Create a new point load
    pub fn new(position: f64, magnitude: f64) -> Self {
        Self {
            position,
            magnitude,
            label: None,
        }
    }

    /// Attach a display name
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Moment of this load about support A
    pub fn moment_about_origin(&self) -> f64 {
        self.magnitude * self.position
    }

    /// Shear and moment contribution at `x`, zero until the load is passed
    pub(crate) fn effect_at(&self, x: f64) -> (f64, f64) {
        if x > self.position {
            (self.magnitude, self.magnitude * (x - self.position))
        } else {
            (0.0, 0.0)
        }
    }
}
