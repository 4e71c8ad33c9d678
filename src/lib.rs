//! Planar Statics - equilibrium and stiffness solvers for 2D structures
//!
//! This library covers three idealizations of plane structures:
//! - Single-span beams (reactions, shear, moment and torque diagrams)
//! - Pin-jointed trusses (method of joints)
//! - Rigid frames (direct stiffness method, 3 DOF per node)
//!
//! Every solver is a pure function of a fully built model: nothing is cached
//! between calls and inputs are never mutated.
//!
//! ## Example
//! ```rust
//! use planar_statics::prelude::*;
//!
//! // Beam: 10 m span with a 20 kN load at midspan
//! let beam = BeamModel::new(10.0).with_load(PointLoad::new(5.0, 20.0));
//! let reactions = beam.reactions().unwrap();
//! assert!((reactions.ra - 10.0).abs() < 1e-12);
//!
//! // Frame: 3 m cantilever with a tip load
//! let mut frame = FrameModel::default();
//! frame.add_node(Node::new(1, 0.0, 0.0).with_support(Support::fixed()));
//! frame.add_node(Node::new(2, 3.0, 0.0).with_load(NodeLoad::force(0.0, -10e3)));
//! frame.add_member(FrameMember::new(1, 2, 200e9, 0.01, 1e-4));
//!
//! let results = frame.solve(&AnalysisOptions::default()).unwrap();
//! let tip = results.displacement(2).unwrap();
//! assert!(tip.dy < 0.0);
//! ```

pub mod analysis;
pub mod beam;
pub mod elements;
pub mod error;
pub mod frame;
pub mod loads;
pub mod math;
pub mod model;
pub mod request;
pub mod results;
pub mod truss;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, AnalysisType};
    pub use crate::beam::{
        center_of_mass_3d, force_from_torque, BeamModel, DiagramSampler, IntermediateSupport,
        PointMass,
    };
    pub use crate::elements::{
        composite_centroid, FrameMember, Material, Node, NodeId, Plate, Section, Shape, Support,
        SupportKind, TrussMember,
    };
    pub use crate::error::{ErrorKind, StaticsError, StaticsResult};
    pub use crate::frame::FrameModel;
    pub use crate::loads::{BeamLoad, DistributedLoad, NodeLoad, PointLoad};
    pub use crate::results::{
        BeamReactions, BeamResults, Determinacy, DiagramSample, FrameMemberForces, FrameResults,
        InternalForces, MemberForce, MemberState, NodeDisplacement, NodeReaction, TrussResults,
    };
    pub use crate::truss::TrussModel;
}
