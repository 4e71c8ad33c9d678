//! Node loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

/// A load applied directly to a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Force in X direction (N)
    #[serde(default)]
    pub fx: f64,
    /// Force in Y direction (N)
    #[serde(default)]
    pub fy: f64,
    /// Moment about Z axis (N·m), ignored by trusses
    #[serde(default)]
    pub mz: f64,
}

impl NodeLoad {
    /// Create a new node load with all components
    pub fn new(fx: f64, fy: f64, mz: f64) -> Self {
        Self { fx, fy, mz }
    }

    /// Create a force-only node load
    pub fn force(fx: f64, fy: f64) -> Self {
        Self::new(fx, fy, 0.0)
    }

    /// Create a moment-only node load
    pub fn moment(mz: f64) -> Self {
        Self::new(0.0, 0.0, mz)
    }

    /// Get the load as an array [FX, FY, MZ]
    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.mz]
    }

    pub fn is_zero(&self) -> bool {
        self.as_array().iter().all(|v| *v == 0.0)
    }
}
