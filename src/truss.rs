//! Method of joints for pin-jointed plane trusses
//!
//! Every node contributes two equilibrium rows (X then Y). Columns hold the
//! member forces in input order followed by one reaction per restrained
//! translation, X before Y, in node order. Square systems are solved exactly;
//! any other shape falls back to a least-squares solution and is classified
//! as indeterminate or unstable.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOptions, AnalysisType};
use crate::elements::{Node, NodeId, TrussMember};
use crate::error::{StaticsError, StaticsResult};
use crate::math::{self, Mat, Vec as StaticsVec};
use crate::model::NodeTable;
use crate::results::{Determinacy, MemberForce, MemberState, NodeReaction, TrussResults};

/// A plane truss
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrussModel {
    pub nodes: Vec<Node>,
    pub members: Vec<TrussMember>,
}

/// Column of one reaction unknown
#[derive(Debug, Clone, Copy)]
struct ReactionUnknown {
    node: usize,
    /// 0 for X, 1 for Y
    direction: usize,
}

/// Assembled equilibrium system `A x = b`
#[derive(Debug, Clone)]
pub struct JointSystem {
    pub matrix: Mat,
    pub rhs: StaticsVec,
    reactions: Vec<ReactionUnknown>,
}

impl JointSystem {
    /// Number of equilibrium rows
    pub fn equations(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of unknowns
    pub fn unknowns(&self) -> usize {
        self.matrix.ncols()
    }
}

impl TrussModel {
    pub fn new(nodes: Vec<Node>, members: Vec<TrussMember>) -> Self {
        Self { nodes, members }
    }

    /// Add a node
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Add a bar between two node ids
    pub fn add_member(&mut self, start: NodeId, end: NodeId) {
        self.members.push(TrussMember::new(start, end));
    }

    /// Build the joint equilibrium matrix and load vector
    pub fn assemble(&self) -> StaticsResult<JointSystem> {
        let table = NodeTable::build(&self.nodes)?;
        if self.members.is_empty() {
            return Err(StaticsError::invalid("truss has no members"));
        }

        let geometry = self
            .members
            .iter()
            .enumerate()
            .map(|(i, m)| table.member_geometry(i, m.start, m.end))
            .collect::<StaticsResult<Vec<_>>>()?;

        let reactions: Vec<ReactionUnknown> = self
            .nodes
            .iter()
            .enumerate()
            .flat_map(|(node, n)| {
                [(n.support.dx, 0), (n.support.dy, 1)]
                    .into_iter()
                    .filter(|(restrained, _)| *restrained)
                    .map(move |(_, direction)| ReactionUnknown { node, direction })
            })
            .collect();

        let rows = 2 * table.len();
        let cols = self.members.len() + reactions.len();
        let mut matrix = Mat::zeros(rows, cols);
        let mut rhs = StaticsVec::zeros(rows);

        for (col, g) in geometry.iter().enumerate() {
            matrix[(2 * g.start, col)] += g.cos;
            matrix[(2 * g.start + 1, col)] += g.sin;
            matrix[(2 * g.end, col)] -= g.cos;
            matrix[(2 * g.end + 1, col)] -= g.sin;
        }

        let offset = self.members.len();
        for (k, r) in reactions.iter().enumerate() {
            matrix[(2 * r.node + r.direction, offset + k)] = 1.0;
        }

        for (i, node) in self.nodes.iter().enumerate() {
            rhs[2 * i] = -node.load.fx;
            rhs[2 * i + 1] = -node.load.fy;
        }

        Ok(JointSystem {
            matrix,
            rhs,
            reactions,
        })
    }

    /// Solve for member forces and support reactions
    pub fn solve(&self, options: &AnalysisOptions) -> StaticsResult<TrussResults> {
        let system = self.assemble()?;
        let equations = system.equations();
        let unknowns = system.unknowns();
        let determinacy = Determinacy::classify(equations, unknowns);

        if options.log {
            debug!(
                "truss: {} nodes, {} members, {equations}x{unknowns} system",
                self.nodes.len(),
                self.members.len()
            );
        }

        let mut warnings = Vec::new();
        let solution = match determinacy {
            Determinacy::Determinate => {
                math::solve_linear_system(&system.matrix, &system.rhs, options.singular_tolerance)?
            }
            Determinacy::Indeterminate | Determinacy::Unstable => {
                let message = match determinacy {
                    Determinacy::Indeterminate => format!(
                        "statically indeterminate: {unknowns} unknowns for {equations} equations, \
                         least-squares solution reported"
                    ),
                    _ => format!(
                        "unstable or mechanism: {unknowns} unknowns for {equations} equations, \
                         least-squares solution reported"
                    ),
                };
                warn!("truss: {message}");
                warnings.push(message);
                math::solve_least_squares(&system.matrix, &system.rhs, options.least_squares_eps)?
            }
        };

        let member_forces = self
            .members
            .iter()
            .enumerate()
            .map(|(i, m)| MemberForce {
                member: i,
                start: m.start,
                end: m.end,
                force: solution[i],
                state: MemberState::from_force(solution[i]),
            })
            .collect();

        let mut reactions: Vec<NodeReaction> = Vec::new();
        let offset = self.members.len();
        for (k, r) in system.reactions.iter().enumerate() {
            let node = self.nodes[r.node].id;
            let index = match reactions.iter().position(|existing| existing.node == node) {
                Some(index) => index,
                None => {
                    reactions.push(NodeReaction {
                        node,
                        ..NodeReaction::default()
                    });
                    reactions.len() - 1
                }
            };
            let value = solution[offset + k];
            if r.direction == 0 {
                reactions[index].fx = value;
            } else {
                reactions[index].fy = value;
            }
        }

        Ok(TrussResults {
            analysis_type: AnalysisType::MethodOfJoints,
            member_forces,
            reactions,
            determinacy,
            warnings,
            equations,
            unknowns,
        })
    }
}
