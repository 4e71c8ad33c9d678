//! Member elements - truss bars and frame members

use serde::{Deserialize, Serialize};

use super::{Material, NodeId, Section};
use crate::error::{StaticsError, StaticsResult};

/// A two-force truss bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrussMember {
    /// Start node id
    pub start: NodeId,
    /// End node id
    pub end: NodeId,
}

impl TrussMember {
    /// Create a new bar between two nodes
    pub fn new(start: NodeId, end: NodeId) -> Self {
        Self { start, end }
    }
}

/// A 2D frame member (Euler-Bernoulli beam-column)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameMember {
    /// Start node id
    pub start: NodeId,
    /// End node id
    pub end: NodeId,
    /// Modulus of elasticity
    pub e: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Moment of inertia about the bending axis
    pub i: f64,
}

impl FrameMember {
    /// Create a new member
    pub fn new(start: NodeId, end: NodeId, e: f64, a: f64, i: f64) -> Self {
        Self { start, end, e, a, i }
    }

    /// Create a member from a material and section
    pub fn from_properties(
        start: NodeId,
        end: NodeId,
        material: &Material,
        section: &Section,
    ) -> Self {
        Self::new(start, end, material.e, section.a, section.i)
    }

    /// Axial rigidity EA
    pub fn axial_rigidity(&self) -> f64 {
        self.e * self.a
    }

    /// Flexural rigidity EI
    pub fn flexural_rigidity(&self) -> f64 {
        self.e * self.i
    }

    /// Reject non-positive or non-finite properties
    pub fn validate(&self, member: usize) -> StaticsResult<()> {
        for (name, value) in [("E", self.e), ("A", self.a), ("I", self.i)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(StaticsError::InvalidMemberProperties {
                    member,
                    reason: format!("{name} must be positive (received {value})"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_creation() {
        let member = FrameMember::new(1, 2, 200e9, 0.01, 1e-4);
        assert_eq!(member.start, 1);
        assert_eq!(member.end, 2);
        assert!((member.flexural_rigidity() - 2e7).abs() < 1e-3);
    }

    #[test]
    fn test_member_from_section() {
        let section = Section::rectangular(0.3, 0.5);
        let member = FrameMember::from_properties(1, 2, &Material::steel(), &section);
        assert_eq!(member.a, section.a);
        assert_eq!(member.i, section.i);
    }

    #[test]
    fn test_invalid_properties() {
        let member = FrameMember::new(1, 2, 200e9, 0.0, 1e-4);
        let err = member.validate(3).unwrap_err();
        assert!(matches!(
            err,
            StaticsError::InvalidMemberProperties { member: 3, .. }
        ));
    }
}
