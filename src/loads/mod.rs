//! Load types for beams and nodal structures

mod distributed;
mod node_load;
mod point_load;

pub use distributed::DistributedLoad;
pub use node_load::NodeLoad;
pub use point_load::PointLoad;

use serde::{Deserialize, Serialize};

/// A transverse load on a beam span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BeamLoad {
    Point(PointLoad),
    Distributed(DistributedLoad),
}

impl BeamLoad {
    /// Equivalent resultant force
    pub fn resultant(&self) -> f64 {
        match self {
            Self::Point(load) => load.magnitude,
            Self::Distributed(load) => load.equivalent_force(),
        }
    }

    /// Line of action of the resultant, measured from support A
    pub fn resultant_position(&self) -> f64 {
        match self {
            Self::Point(load) => load.position,
            Self::Distributed(load) => load.centroid(),
        }
    }

    /// Moment of the resultant about support A
    pub fn moment_about_origin(&self) -> f64 {
        self.resultant() * self.resultant_position()
    }
}

impl From<PointLoad> for BeamLoad {
    fn from(load: PointLoad) -> Self {
        Self::Point(load)
    }
}

impl From<DistributedLoad> for BeamLoad {
    fn from(load: DistributedLoad) -> Self {
        Self::Distributed(load)
    }
}
