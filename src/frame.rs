//! Direct stiffness method for plane rigid frames
//!
//! Each node carries three DOFs `[dx, dy, rz]` at `3 * index`. The structure
//! matrix is partitioned into free and restrained DOFs; restrained DOFs are
//! held at zero displacement.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOptions, AnalysisType};
use crate::elements::{FrameMember, Node};
use crate::error::StaticsResult;
use crate::math::{self, Mat, Vec as StaticsVec, Vec6};
use crate::model::{MemberGeometry, NodeTable};
use crate::results::{FrameMemberForces, FrameResults, NodeDisplacement, NodeReaction};

/// A plane frame with rigid joints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameModel {
    pub nodes: Vec<Node>,
    pub members: Vec<FrameMember>,
}

impl FrameModel {
    pub fn new(nodes: Vec<Node>, members: Vec<FrameMember>) -> Self {
        Self { nodes, members }
    }

    /// Add a node
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Add a member
    pub fn add_member(&mut self, member: FrameMember) {
        self.members.push(member);
    }

    /// Resolve and validate every member
    fn member_geometry(&self, table: &NodeTable<'_>) -> StaticsResult<Vec<MemberGeometry>> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, member)| {
                member.validate(i)?;
                table.member_geometry(i, member.start, member.end)
            })
            .collect()
    }

    /// Build the global stiffness matrix
    pub fn build_global_stiffness(&self) -> StaticsResult<Mat> {
        let table = NodeTable::build(&self.nodes)?;
        let geometry = self.member_geometry(&table)?;
        Ok(self.assemble_stiffness(table.len(), &geometry))
    }

    fn assemble_stiffness(&self, num_nodes: usize, geometry: &[MemberGeometry]) -> Mat {
        let n_dofs = 3 * num_nodes;
        let mut k_global = Mat::zeros(n_dofs, n_dofs);

        for (member, g) in self.members.iter().zip(geometry) {
            let k_local = math::frame_local_stiffness(member.e, member.a, member.i, g.length);
            let t = math::frame_transformation_matrix(g.cos, g.sin);
            let k_member = math::frame_global_stiffness(&k_local, &t);
            math::scatter_member(&mut k_global, &k_member, g.start, g.end);
        }

        k_global
    }

    /// Build the global load vector from nodal loads
    pub fn build_load_vector(&self) -> StaticsVec {
        let mut p = StaticsVec::zeros(3 * self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            for (k, value) in node.load.as_array().into_iter().enumerate() {
                p[3 * i + k] = value;
            }
        }
        p
    }

    /// Solve for displacements, reactions and member end forces
    pub fn solve(&self, options: &AnalysisOptions) -> StaticsResult<FrameResults> {
        let table = NodeTable::build(&self.nodes)?;
        let geometry = self.member_geometry(&table)?;
        let k_global = self.assemble_stiffness(table.len(), &geometry);
        let p_global = self.build_load_vector();
        let n_dofs = k_global.nrows();

        // Identify free and restrained DOFs
        let mut free_dofs: Vec<usize> = Vec::new();
        let mut restrained_dofs: Vec<usize> = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            for (k, restrained) in node.support.as_array().into_iter().enumerate() {
                if restrained {
                    restrained_dofs.push(3 * i + k);
                } else {
                    free_dofs.push(3 * i + k);
                }
            }
        }

        if options.log {
            debug!(
                "frame: {} nodes, {} members, {} free / {} restrained DOFs",
                self.nodes.len(),
                self.members.len(),
                free_dofs.len(),
                restrained_dofs.len()
            );
        }

        let mut d_full = StaticsVec::zeros(n_dofs);
        let mut free_dof_residual = 0.0;

        if !free_dofs.is_empty() {
            // Partition stiffness matrix and load vector
            let n_free = free_dofs.len();
            let k11 = Mat::from_fn(n_free, n_free, |r, c| k_global[(free_dofs[r], free_dofs[c])]);
            let p1 = StaticsVec::from_fn(n_free, |r, _| p_global[free_dofs[r]]);

            let d1 = math::solve_linear_system(&k11, &p1, options.singular_tolerance)?;
            free_dof_residual = (&k11 * &d1 - &p1).amax();

            for (r, &dof) in free_dofs.iter().enumerate() {
                d_full[dof] = d1[r];
            }
        }

        let reaction_vector = &k_global * &d_full - &p_global;

        let displacements = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                NodeDisplacement::from_array(
                    node.id,
                    [d_full[3 * i], d_full[3 * i + 1], d_full[3 * i + 2]],
                )
            })
            .collect();

        let reactions = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.support.is_supported())
            .map(|(i, node)| {
                let pick = |k: usize, restrained: bool| {
                    if restrained {
                        reaction_vector[3 * i + k]
                    } else {
                        0.0
                    }
                };
                NodeReaction {
                    node: node.id,
                    fx: pick(0, node.support.dx),
                    fy: pick(1, node.support.dy),
                    mz: pick(2, node.support.rz),
                }
            })
            .collect();

        let member_forces = self
            .members
            .iter()
            .zip(&geometry)
            .enumerate()
            .map(|(index, (member, g))| member_end_forces(index, member, g, &d_full))
            .collect();

        Ok(FrameResults {
            analysis_type: AnalysisType::DirectStiffness,
            displacements,
            reactions,
            member_forces,
            free_dof_residual,
            free_dofs: free_dofs.len(),
            restrained_dofs: restrained_dofs.len(),
        })
    }
}

/// Local end forces `k · T · d` of one member
fn member_end_forces(
    index: usize,
    member: &FrameMember,
    g: &MemberGeometry,
    d_full: &StaticsVec,
) -> FrameMemberForces {
    let d_global = Vec6::from_fn(|r, _| {
        let node = if r < 3 { g.start } else { g.end };
        d_full[3 * node + r % 3]
    });

    let t = math::frame_transformation_matrix(g.cos, g.sin);
    let k_local = math::frame_local_stiffness(member.e, member.a, member.i, g.length);
    let f_local = k_local * (t * d_global);

    let mut local = [0.0; 6];
    local.copy_from_slice(f_local.as_slice());
    FrameMemberForces::from_local(index, member.start, member.end, g.length, local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Support;
    use crate::error::StaticsError;
    use crate::loads::NodeLoad;
    use approx::assert_relative_eq;

    const E: f64 = 200e9;
    const A: f64 = 0.01;
    const I: f64 = 1e-4;

    fn cantilever(load: NodeLoad) -> FrameModel {
        let mut frame = FrameModel::default();
        frame.add_node(Node::new(1, 0.0, 0.0).with_support(Support::fixed()));
        frame.add_node(Node::new(2, 3.0, 0.0).with_load(load));
        frame.add_member(FrameMember::new(1, 2, E, A, I));
        frame
    }

    #[test]
    fn test_simple_cantilever() {
        let p = -10_000.0;
        let l: f64 = 3.0;
        let results = cantilever(NodeLoad::force(0.0, p))
            .solve(&AnalysisOptions::default())
            .unwrap();

        let tip = results.displacement(2).unwrap();
        assert_relative_eq!(tip.dy, p * l.powi(3) / (3.0 * E * I), max_relative = 1e-9);
        assert_relative_eq!(tip.rz, p * l.powi(2) / (2.0 * E * I), max_relative = 1e-9);

        let base = results.reaction(1).unwrap();
        assert_relative_eq!(base.fy, -p, max_relative = 1e-9);
        assert_relative_eq!(base.mz, -p * l, max_relative = 1e-9);
        assert!(results.free_dof_residual < 1e-6);
    }

    #[test]
    fn test_axial_member_force_is_tension() {
        let results = cantilever(NodeLoad::force(5_000.0, 0.0))
            .solve(&AnalysisOptions::default())
            .unwrap();
        let forces = &results.member_forces[0];
        assert_relative_eq!(forces.start_forces.axial, 5_000.0, max_relative = 1e-9);
        assert_relative_eq!(forces.end_forces.axial, 5_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_fully_restrained_is_zero() {
        let mut frame = cantilever(NodeLoad::force(0.0, -1.0));
        frame.nodes[1].support = Support::fixed();
        let results = frame.solve(&AnalysisOptions::default()).unwrap();
        assert_eq!(results.free_dofs, 0);
        assert!(results.displacements.iter().all(|d| d.dx == 0.0 && d.dy == 0.0 && d.rz == 0.0));
        // The load goes straight into the support at the loaded node
        assert_relative_eq!(results.reaction(2).unwrap().fy, 1.0);
    }

    #[test]
    fn test_unsupported_frame_is_singular() {
        let mut frame = cantilever(NodeLoad::force(0.0, -1.0));
        frame.nodes[0].support = Support::free();
        let err = frame.solve(&AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, StaticsError::SingularSystem(_)));
    }

    #[test]
    fn test_invalid_member_properties() {
        let mut frame = cantilever(NodeLoad::default());
        frame.members[0].i = -1.0;
        assert!(matches!(
            frame.solve(&AnalysisOptions::default()),
            Err(StaticsError::InvalidMemberProperties { member: 0, .. })
        ));
    }

    #[test]
    fn test_global_stiffness_symmetric() {
        let mut frame = cantilever(NodeLoad::default());
        frame.add_node(Node::new(3, 3.0, 4.0));
        frame.add_member(FrameMember::new(2, 3, E, A, I));
        let k = frame.build_global_stiffness().unwrap();
        assert_eq!(k.nrows(), 9);
        assert_relative_eq!(k.clone(), k.transpose(), epsilon = 1e-6, max_relative = 1e-12);
    }
}
