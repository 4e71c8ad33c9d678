//! Uniform distributed loads on a beam span

use serde::{Deserialize, Serialize};

/// A uniform line load acting over `[start, end]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Start position measured from support A
    pub start: f64,
    /// End position measured from support A
    pub end: f64,
    /// Load per unit length, positive downward
    pub intensity: f64,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DistributedLoad {
    /// Create a new distributed load
    pub fn new(start: f64, end: f64, intensity: f64) -> Self {
        Self {
            start,
            end,
            intensity,
            label: None,
        }
    }

    /// Attach a display name
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Loaded length
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Get the total force from this load
    pub fn equivalent_force(&self) -> f64 {
        self.intensity * self.length()
    }

    /// Point of application of the equivalent force
    pub fn centroid(&self) -> f64 {
        self.start + self.length() / 2.0
    }

    /// Shear and moment contribution at `x`
    ///
    /// Partial while `start < x <= end`, the full resultant once `x > end`.
    pub(crate) fn effect_at(&self, x: f64) -> (f64, f64) {
        if x > self.end {
            let force = self.equivalent_force();
            (force, force * (x - self.centroid()))
        } else if x > self.start {
            let loaded = x - self.start;
            let force = self.intensity * loaded;
            (force, force * loaded / 2.0)
        } else {
            (0.0, 0.0)
        }
    }
}
