//! Node element - a joint in the plane

use serde::{Deserialize, Serialize};

use super::Support;
use crate::loads::NodeLoad;

/// Integer key that members use to reference nodes
pub type NodeId = usize;

/// A 2D node shared by the truss and frame models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique key within one model
    pub id: NodeId,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Restrained degrees of freedom
    #[serde(default)]
    pub support: Support,
    /// Applied nodal load
    #[serde(default)]
    pub load: NodeLoad,
}

impl Node {
    /// Create a free, unloaded node
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            support: Support::free(),
            load: NodeLoad::default(),
        }
    }

    /// Set the restraint condition
    pub fn with_support(mut self, support: Support) -> Self {
        self.support = support;
        self
    }

    /// Set the applied load
    pub fn with_load(mut self, load: NodeLoad) -> Self {
        self.load = load;
        self
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}
