//! Node lookup and member geometry shared by the nodal solvers

use std::collections::HashMap;

use crate::elements::{Node, NodeId};
use crate::error::{StaticsError, StaticsResult};

/// Length below which two nodes are treated as coincident
pub const MIN_MEMBER_LENGTH: f64 = 1e-12;

/// Dense index assigned to every node id, in input order
#[derive(Debug, Clone)]
pub struct NodeTable<'a> {
    nodes: &'a [Node],
    index: HashMap<NodeId, usize>,
}

impl<'a> NodeTable<'a> {
    /// Build the id map, rejecting empty input and duplicate ids
    pub fn build(nodes: &'a [Node]) -> StaticsResult<Self> {
        if nodes.is_empty() {
            return Err(StaticsError::invalid("model has no nodes"));
        }

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if !(node.x.is_finite() && node.y.is_finite()) {
                return Err(StaticsError::invalid(format!(
                    "node {} has non-finite coordinates",
                    node.id
                )));
            }
            if index.insert(node.id, i).is_some() {
                return Err(StaticsError::DuplicateNode(node.id));
            }
        }

        Ok(Self { nodes, index })
    }

    /// Position of a node id in the input slice
    pub fn index_of(&self, id: NodeId) -> StaticsResult<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(StaticsError::NodeNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    /// Resolve both ends of member `member` and compute its geometry
    pub fn member_geometry(
        &self,
        member: usize,
        start: NodeId,
        end: NodeId,
    ) -> StaticsResult<MemberGeometry> {
        let i = self.index_of(start)?;
        let j = self.index_of(end)?;
        let (a, b) = (&self.nodes[i], &self.nodes[j]);

        let length = a.distance_to(b);
        if length < MIN_MEMBER_LENGTH {
            return Err(StaticsError::ZeroLengthMember { member, start, end });
        }

        Ok(MemberGeometry {
            start: i,
            end: j,
            length,
            cos: (b.x - a.x) / length,
            sin: (b.y - a.y) / length,
        })
    }
}

/// Resolved indices and direction cosines of one member
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberGeometry {
    /// Index of the start node
    pub start: usize,
    /// Index of the end node
    pub end: usize,
    pub length: f64,
    /// Direction cosine along X, start to end
    pub cos: f64,
    /// Direction cosine along Y, start to end
    pub sin: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn nodes() -> Vec<Node> {
        vec![
            Node::new(10, 0.0, 0.0),
            Node::new(20, 3.0, 4.0),
            Node::new(30, 3.0, 4.0),
        ]
    }

    #[test]
    fn test_index_follows_input_order() {
        let nodes = nodes();
        let table = NodeTable::build(&nodes).unwrap();
        assert_eq!(table.index_of(20).unwrap(), 1);
        assert!(matches!(table.index_of(5), Err(StaticsError::NodeNotFound(5))));
    }

    #[test]
    fn test_member_geometry() {
        let nodes = nodes();
        let table = NodeTable::build(&nodes).unwrap();
        let geom = table.member_geometry(0, 10, 20).unwrap();
        assert_relative_eq!(geom.length, 5.0);
        assert_relative_eq!(geom.cos, 0.6);
        assert_relative_eq!(geom.sin, 0.8);
    }

    #[test]
    fn test_coincident_nodes_rejected() {
        let nodes = nodes();
        let table = NodeTable::build(&nodes).unwrap();
        let err = table.member_geometry(4, 20, 30).unwrap_err();
        assert!(matches!(
            err,
            StaticsError::ZeroLengthMember { member: 4, start: 20, end: 30 }
        ));
    }

    #[test]
    fn test_duplicate_and_empty() {
        let nodes = vec![Node::new(1, 0.0, 0.0), Node::new(1, 1.0, 0.0)];
        assert!(matches!(
            NodeTable::build(&nodes),
            Err(StaticsError::DuplicateNode(1))
        ));
        assert!(NodeTable::build(&[]).is_err());
    }
}
