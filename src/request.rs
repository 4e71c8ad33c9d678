//! Untyped request payloads and their normalization into typed models
//!
//! Loads may arrive as positional arrays (`[position, magnitude]`,
//! `[start, end, intensity]`) or as objects, and support kinds as loose
//! strings. Everything is converted here so the solvers only ever see
//! [`BeamModel`], [`TrussModel`] and [`FrameModel`].

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::analysis::{AnalysisOptions, DEFAULT_NUM_POINTS};
use crate::beam::{BeamModel, IntermediateSupport, PointMass};
use crate::elements::{
    FrameMember, Node, NodeId, Plate, Section, Shape, Support, SupportKind, TrussMember,
};
use crate::error::{StaticsError, StaticsResult};
use crate::frame::FrameModel;
use crate::loads::{DistributedLoad, NodeLoad, PointLoad};
use crate::truss::TrussModel;

/// Accepted range for diagram sample counts at the request boundary
pub const NUM_POINTS_RANGE: RangeInclusive<usize> = 100..=5000;

/// A point load as an array or an object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PointLoadInput {
    Positional(Vec<f64>),
    Record {
        position: f64,
        magnitude: f64,
        #[serde(default)]
        label: Option<String>,
    },
}

impl PointLoadInput {
    fn normalize(self, index: usize) -> StaticsResult<PointLoad> {
        match self {
            Self::Positional(values) => match values.as_slice() {
                [position, magnitude, ..] => Ok(PointLoad::new(*position, *magnitude)),
                _ => Err(StaticsError::invalid(format!(
                    "point load {index} needs [position, magnitude]"
                ))),
            },
            Self::Record {
                position,
                magnitude,
                label,
            } => Ok(PointLoad {
                position,
                magnitude,
                label: label.filter(|l| !l.is_empty()),
            }),
        }
    }
}

/// A distributed load as an array or an object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DistributedLoadInput {
    Positional(Vec<f64>),
    Record {
        start: f64,
        end: f64,
        intensity: f64,
        #[serde(default)]
        label: Option<String>,
    },
}

impl DistributedLoadInput {
    fn normalize(self, index: usize) -> StaticsResult<DistributedLoad> {
        match self {
            Self::Positional(values) => match values.as_slice() {
                [start, end, intensity, ..] => Ok(DistributedLoad::new(*start, *end, *intensity)),
                _ => Err(StaticsError::invalid(format!(
                    "distributed load {index} needs [start, end, intensity]"
                ))),
            },
            Self::Record {
                start,
                end,
                intensity,
                label,
            } => Ok(DistributedLoad {
                start,
                end,
                intensity,
                label: label.filter(|l| !l.is_empty()),
            }),
        }
    }
}

/// Diagram options carried with a beam request
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramOptions {
    #[serde(default = "default_num_points")]
    pub num_points: usize,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
        }
    }
}

fn default_num_points() -> usize {
    DEFAULT_NUM_POINTS
}

fn default_support_a() -> String {
    "Fixed".into()
}

fn default_support_b() -> String {
    "Movable".into()
}

/// Beam analysis payload
#[derive(Debug, Clone, Deserialize)]
pub struct BeamRequest {
    pub length: f64,
    #[serde(default)]
    pub height_start: f64,
    #[serde(default)]
    pub height_end: f64,
    #[serde(default = "default_support_a", alias = "support_a_type")]
    pub support_a: String,
    #[serde(default = "default_support_b", alias = "support_b_type")]
    pub support_b: String,
    #[serde(default, alias = "support_c_type")]
    pub support_c: Option<String>,
    #[serde(default)]
    pub support_c_position: Option<f64>,
    #[serde(default)]
    pub point_loads: Vec<PointLoadInput>,
    #[serde(default)]
    pub distributed_loads: Vec<DistributedLoadInput>,
    #[serde(default, alias = "torsor")]
    pub torque: f64,
    #[serde(default)]
    pub analysis: DiagramOptions,
}

impl BeamRequest {
    /// Analysis options, rejecting sample counts outside the accepted range
    pub fn options(&self) -> StaticsResult<AnalysisOptions> {
        let n = self.analysis.num_points;
        if !NUM_POINTS_RANGE.contains(&n) {
            return Err(StaticsError::invalid(format!(
                "num_points must lie in {}..={} (received {n})",
                NUM_POINTS_RANGE.start(),
                NUM_POINTS_RANGE.end()
            )));
        }
        Ok(AnalysisOptions::default().with_num_points(n))
    }

    /// Normalize into a validated [`BeamModel`]
    pub fn into_model(self) -> StaticsResult<BeamModel> {
        let support_c = match self.support_c.as_deref() {
            None => None,
            Some(kind) => Some(IntermediateSupport {
                kind: kind.parse::<SupportKind>()?,
                position: self.support_c_position,
            }),
        };

        let point_loads = self
            .point_loads
            .into_iter()
            .enumerate()
            .map(|(i, load)| load.normalize(i))
            .collect::<StaticsResult<Vec<_>>>()?;
        let distributed_loads = self
            .distributed_loads
            .into_iter()
            .enumerate()
            .map(|(i, load)| load.normalize(i))
            .collect::<StaticsResult<Vec<_>>>()?;

        let model = BeamModel {
            length: self.length,
            height_start: self.height_start,
            height_end: self.height_end,
            support_a: self.support_a.parse()?,
            support_b: self.support_b.parse()?,
            support_c,
            point_loads,
            distributed_loads,
            torque: self.torque,
        };
        model.validate()?;
        Ok(model)
    }
}

/// A node restraint as a preset name or explicit flags
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SupportInput {
    Named(String),
    Flags(Support),
}

impl SupportInput {
    fn normalize(self) -> StaticsResult<Support> {
        match self {
            Self::Flags(support) => Ok(support),
            Self::Named(name) => match name.trim().to_lowercase().as_str() {
                "" | "free" | "none" | "ninguno" => Ok(Support::free()),
                "fixed" | "empotrado" => Ok(Support::fixed()),
                "pinned" | "pin" | "fijo" => Ok(Support::pinned()),
                "roller" | "roller_y" | "movil" | "móvil" => Ok(Support::roller_y()),
                "roller_x" => Ok(Support::roller_x()),
                other => Err(StaticsError::invalid(format!(
                    "unknown node support '{other}'"
                ))),
            },
        }
    }
}

impl Default for SupportInput {
    fn default() -> Self {
        Self::Flags(Support::free())
    }
}

/// A node record shared by truss and frame payloads
#[derive(Debug, Clone, Deserialize)]
pub struct NodeInput {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub support: SupportInput,
    #[serde(default)]
    pub fx: f64,
    #[serde(default)]
    pub fy: f64,
    #[serde(default)]
    pub mz: f64,
}

impl NodeInput {
    fn normalize(self) -> StaticsResult<Node> {
        Ok(Node::new(self.id, self.x, self.y)
            .with_support(self.support.normalize()?)
            .with_load(NodeLoad::new(self.fx, self.fy, self.mz)))
    }
}

fn normalize_nodes(nodes: Vec<NodeInput>) -> StaticsResult<Vec<Node>> {
    nodes.into_iter().map(NodeInput::normalize).collect()
}

/// A truss bar as `[start, end]` or an object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TrussMemberInput {
    Pair(NodeId, NodeId),
    Record { start: NodeId, end: NodeId },
}

impl From<TrussMemberInput> for TrussMember {
    fn from(input: TrussMemberInput) -> Self {
        match input {
            TrussMemberInput::Pair(start, end) | TrussMemberInput::Record { start, end } => {
                TrussMember::new(start, end)
            }
        }
    }
}

/// Truss analysis payload
#[derive(Debug, Clone, Deserialize)]
pub struct TrussRequest {
    pub nodes: Vec<NodeInput>,
    pub members: Vec<TrussMemberInput>,
}

impl TrussRequest {
    pub fn into_model(self) -> StaticsResult<TrussModel> {
        Ok(TrussModel::new(
            normalize_nodes(self.nodes)?,
            self.members.into_iter().map(TrussMember::from).collect(),
        ))
    }
}

/// Frame analysis payload
#[derive(Debug, Clone, Deserialize)]
pub struct FrameRequest {
    pub nodes: Vec<NodeInput>,
    pub members: Vec<FrameMember>,
}

impl FrameRequest {
    pub fn into_model(self) -> StaticsResult<FrameModel> {
        Ok(FrameModel::new(normalize_nodes(self.nodes)?, self.members))
    }
}

/// Centroid of point masses
#[derive(Debug, Clone, Deserialize)]
pub struct CenterOfMassRequest {
    pub points: Vec<PointMass>,
}

/// Torque to force at a lever arm
#[derive(Debug, Clone, Deserialize)]
pub struct ForceFromTorqueRequest {
    #[serde(alias = "torsor")]
    pub torque: f64,
    #[serde(alias = "distancia")]
    pub distance: f64,
}

/// Internal torque of a beam at a chosen section
#[derive(Debug, Clone, Deserialize)]
pub struct TorqueAtRequest {
    pub x: f64,
    pub beam: BeamRequest,
}

impl TorqueAtRequest {
    /// Solve the beam and evaluate `T + M(x)`
    pub fn evaluate(self) -> StaticsResult<f64> {
        let x = self.x;
        let model = self.beam.into_model()?;
        if !(0.0..=model.length).contains(&x) {
            return Err(StaticsError::invalid(format!(
                "section {x} lies outside the span [0, {}]",
                model.length
            )));
        }
        let reactions = model.reactions()?;
        Ok(model.torque_at(&reactions, x))
    }
}

/// Built-up section from three stacked plates
#[derive(Debug, Clone, Deserialize)]
pub struct SectionRequest {
    pub top: Plate,
    pub web: Plate,
    pub bottom: Plate,
}

impl SectionRequest {
    pub fn into_section(self) -> StaticsResult<Section> {
        Section::built_up(self.top, self.web, self.bottom)
    }
}

/// Composite centroid of plane shapes
#[derive(Debug, Clone, Deserialize)]
pub struct CentroidRequest {
    pub shapes: Vec<Shape>,
}
