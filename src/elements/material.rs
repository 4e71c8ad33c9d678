//! Material properties

use serde::{Deserialize, Serialize};

/// Elastic material for frame members
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Density in kg/m³
    pub rho: f64,
}

impl Material {
    /// Create a new material
    pub fn new(e: f64, rho: f64) -> Self {
        Self { e, rho }
    }

    /// Structural steel
    pub fn steel() -> Self {
        Self::new(200e9, 7850.0)
    }

    /// Normal-weight concrete from its compressive strength in Pa
    pub fn concrete(fc: f64) -> Self {
        // E = 4700 * sqrt(f'c in MPa) MPa
        let fc_mpa = fc / 1e6;
        Self::new(4700.0 * fc_mpa.sqrt() * 1e6, 2400.0)
    }

    /// Aluminum 6061-T6
    pub fn aluminum() -> Self {
        Self::new(68.9e9, 2700.0)
    }

    /// Structural timber (softwood, parallel to grain)
    pub fn timber() -> Self {
        Self::new(11e9, 500.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
