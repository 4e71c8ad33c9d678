//! Support conditions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StaticsError;

/// Per-DOF restraint at a truss or frame node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    #[serde(default)]
    pub dx: bool,
    /// Restrained in Y translation
    #[serde(default)]
    pub dy: bool,
    /// Restrained in rotation (frames only)
    #[serde(default)]
    pub rz: bool,
}

impl Support {
    /// No restraint
    pub fn free() -> Self {
        Self::default()
    }

    /// All three DOFs restrained
    pub fn fixed() -> Self {
        Self::with_restraints(true, true, true)
    }

    /// Translations restrained, rotation free
    pub fn pinned() -> Self {
        Self::with_restraints(true, true, false)
    }

    /// Y translation restrained only
    pub fn roller_y() -> Self {
        Self::with_restraints(false, true, false)
    }

    /// X translation restrained only
    pub fn roller_x() -> Self {
        Self::with_restraints(true, false, false)
    }

    /// Create a support with specific restraints
    pub fn with_restraints(dx: bool, dy: bool, rz: bool) -> Self {
        Self { dx, dy, rz }
    }

    /// Restraint flags as [DX, DY, RZ]
    pub fn as_array(&self) -> [bool; 3] {
        [self.dx, self.dy, self.rz]
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.dx || self.dy || self.rz
    }

    /// Number of restrained translations (what a truss joint can react with)
    pub fn num_translational(&self) -> usize {
        usize::from(self.dx) + usize::from(self.dy)
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.num_translational() + usize::from(self.rz)
    }
}

/// Support type at a beam support
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportKind {
    /// No support at this location
    #[default]
    None,
    /// Pinned: resists vertical and horizontal load
    Fixed,
    /// Roller: resists vertical load only
    Movable,
}

impl SupportKind {
    /// Whether this kind provides any reaction
    pub fn exists(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether a horizontal reaction component is developed
    pub fn resists_horizontal(&self) -> bool {
        matches!(self, Self::Fixed)
    }
}

impl FromStr for SupportKind {
    type Err = StaticsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "none" | "ninguno" => Ok(Self::None),
            "fixed" | "fijo" => Ok(Self::Fixed),
            "movable" | "movil" | "móvil" | "roller" | "hinge" => Ok(Self::Movable),
            other => Err(StaticsError::invalid(format!(
                "unknown support type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SupportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Fixed => "Fixed",
            Self::Movable => "Movable",
        };
        f.write_str(name)
    }
}
