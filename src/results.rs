//! Result types for beam, truss and frame analysis

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisType;
use crate::elements::{NodeId, SupportKind};

// ---------------------------------------------------------------------------
// Beam
// ---------------------------------------------------------------------------

/// Vertical reactions at the beam supports, positive upward
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BeamReactions {
    pub ra: f64,
    pub rb: f64,
    /// Zero when there is no intermediate support
    pub rc: f64,
}

impl BeamReactions {
    /// Sum of all vertical reactions
    pub fn total(&self) -> f64 {
        self.ra + self.rb + self.rc
    }
}

/// Shear and bending moment at one section
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalForces {
    pub shear: f64,
    pub moment: f64,
}

/// One point of the shear/moment/torque diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramSample {
    pub position: f64,
    pub shear: f64,
    pub moment: f64,
    pub torque: f64,
}

/// One point of the torque diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorqueSample {
    pub position: f64,
    pub torque: f64,
}

/// Reaction at one beam support
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionComponents {
    /// Vertical reaction, positive upward
    pub vertical: f64,
    /// Horizontal component, non-zero only for fixed supports on an inclined span
    pub horizontal: f64,
    pub kind: SupportKind,
    /// Distance from support A
    pub position: f64,
}

/// Reactions at supports A, B and C
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportReactions {
    pub a: ReactionComponents,
    pub b: ReactionComponents,
    /// `kind` is `None` when the beam has no intermediate support
    pub c: ReactionComponents,
}

/// Global equilibrium quantities of the loaded beam
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumCheck {
    /// Total downward load V
    pub sum_vertical_loads: f64,
    /// Moment of the loads about support A
    pub sum_moment_about_a: f64,
    /// Applied torque T
    pub torque: f64,
}

/// Resultant of one distributed load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoadSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub start: f64,
    pub end: f64,
    pub intensity: f64,
    pub equivalent_force: f64,
    pub centroid: f64,
}

/// Complete beam analysis record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamResults {
    pub analysis_type: AnalysisType,
    pub reactions: SupportReactions,
    pub equilibrium: EquilibriumCheck,
    /// Angle of the span from horizontal, in radians
    pub inclination: f64,
    pub diagram: Vec<DiagramSample>,
    pub torque: Vec<TorqueSample>,
    /// Line of action of the total load, `None` when the net load is zero
    pub load_resultant_position: Option<f64>,
    pub distributed_loads: Vec<DistributedLoadSummary>,
}

impl BeamResults {
    /// Sample with the largest absolute shear
    pub fn max_shear(&self) -> Option<&DiagramSample> {
        self.diagram
            .iter()
            .max_by(|a, b| a.shear.abs().total_cmp(&b.shear.abs()))
    }

    /// Sample with the largest absolute moment
    pub fn max_moment(&self) -> Option<&DiagramSample> {
        self.diagram
            .iter()
            .max_by(|a, b| a.moment.abs().total_cmp(&b.moment.abs()))
    }
}

// ---------------------------------------------------------------------------
// Truss
// ---------------------------------------------------------------------------

/// Whether the assembled equilibrium system is square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Determinacy {
    /// As many unknowns as equations
    Determinate,
    /// More unknowns than equations
    Indeterminate,
    /// Fewer unknowns than equations
    Unstable,
}

impl Determinacy {
    /// Classify a system by its shape
    pub fn classify(equations: usize, unknowns: usize) -> Self {
        use std::cmp::Ordering;
        match unknowns.cmp(&equations) {
            Ordering::Equal => Self::Determinate,
            Ordering::Greater => Self::Indeterminate,
            Ordering::Less => Self::Unstable,
        }
    }
}

/// Sign of an axial bar force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberState {
    Tension,
    Compression,
}

impl MemberState {
    /// Non-negative forces count as tension
    pub fn from_force(force: f64) -> Self {
        if force >= 0.0 {
            Self::Tension
        } else {
            Self::Compression
        }
    }
}

/// Axial force in one truss bar, positive in tension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberForce {
    /// Index of the member in the input list
    pub member: usize,
    pub start: NodeId,
    pub end: NodeId,
    pub force: f64,
    pub state: MemberState,
}

/// Reaction at a supported node
///
/// Components that are not restrained are reported as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeReaction {
    pub node: NodeId,
    pub fx: f64,
    pub fy: f64,
    pub mz: f64,
}

impl NodeReaction {
    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        self.fx.hypot(self.fy)
    }
}

/// Method-of-joints analysis record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussResults {
    pub analysis_type: AnalysisType,
    pub member_forces: Vec<MemberForce>,
    pub reactions: Vec<NodeReaction>,
    pub determinacy: Determinacy,
    pub warnings: Vec<String>,
    /// Rows of the equilibrium system (two per node)
    pub equations: usize,
    /// Member forces plus reaction components
    pub unknowns: usize,
}

impl TrussResults {
    /// Force in member `index`, if it exists
    pub fn force(&self, index: usize) -> Option<f64> {
        self.member_forces.get(index).map(|f| f.force)
    }

    /// Reaction at a node id, if it is supported
    pub fn reaction(&self, node: NodeId) -> Option<&NodeReaction> {
        self.reactions.iter().find(|r| r.node == node)
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Displacement results at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    pub node: NodeId,
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, RZ]
    pub fn from_array(node: NodeId, arr: [f64; 3]) -> Self {
        Self {
            node,
            dx: arr[0],
            dy: arr[1],
            rz: arr[2],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

/// Internal forces at one member end, in member axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EndForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force in local y direction
    pub shear: f64,
    /// Bending moment about local z axis
    pub moment: f64,
}

/// End forces of one frame member, recovered as `k · T · d`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameMemberForces {
    /// Index of the member in the input list
    pub member: usize,
    pub start: NodeId,
    pub end: NodeId,
    pub length: f64,
    pub start_forces: EndForces,
    pub end_forces: EndForces,
    /// Raw local end force vector `[N_i, V_i, M_i, N_j, V_j, M_j]`
    pub local: [f64; 6],
}

impl FrameMemberForces {
    /// Build from the local end force vector
    ///
    /// Axial tension is positive; the start-end value is negated so that both
    /// ends report the same sign for a bar in tension.
    pub fn from_local(
        member: usize,
        start: NodeId,
        end: NodeId,
        length: f64,
        local: [f64; 6],
    ) -> Self {
        Self {
            member,
            start,
            end,
            length,
            start_forces: EndForces {
                axial: -local[0],
                shear: local[1],
                moment: local[2],
            },
            end_forces: EndForces {
                axial: local[3],
                shear: local[4],
                moment: local[5],
            },
            local,
        }
    }
}

/// Direct-stiffness analysis record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResults {
    pub analysis_type: AnalysisType,
    pub displacements: Vec<NodeDisplacement>,
    /// Restrained nodes only
    pub reactions: Vec<NodeReaction>,
    pub member_forces: Vec<FrameMemberForces>,
    /// Largest absolute entry of `K_ff d_f - F_f`
    pub free_dof_residual: f64,
    pub free_dofs: usize,
    pub restrained_dofs: usize,
}

impl FrameResults {
    /// Displacement of a node id
    pub fn displacement(&self, node: NodeId) -> Option<&NodeDisplacement> {
        self.displacements.iter().find(|d| d.node == node)
    }

    /// Reaction at a node id, if it is supported
    pub fn reaction(&self, node: NodeId) -> Option<&NodeReaction> {
        self.reactions.iter().find(|r| r.node == node)
    }

    /// Largest translation in the structure
    pub fn max_translation(&self) -> f64 {
        self.displacements
            .iter()
            .map(NodeDisplacement::translation_magnitude)
            .fold(0.0, f64::max)
    }
}
