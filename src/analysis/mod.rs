//! Analysis types and options

use serde::{Deserialize, Serialize};

/// Default number of diagram sample points along a beam
pub const DEFAULT_NUM_POINTS: usize = 800;

/// Which solver produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisType {
    /// Equilibrium of a single-span beam
    BeamStatics,
    /// Method of joints for a pin-jointed truss
    MethodOfJoints,
    /// Direct stiffness method for a rigid frame
    DirectStiffness,
}

/// Options for structural analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Sample points for beam diagrams
    pub num_points: usize,
    /// Smallest accepted ratio of smallest to largest singular value
    pub singular_tolerance: f64,
    /// Singular value cutoff for least-squares solves
    pub least_squares_eps: f64,
    /// Emit debug records for assembly sizes and classifications
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
            singular_tolerance: 1e-12,
            least_squares_eps: 1e-12,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Set the number of beam diagram samples
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// Set the singularity tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.singular_tolerance = tol;
        self
    }

    /// Set the least-squares cutoff
    pub fn with_least_squares_eps(mut self, eps: f64) -> Self {
        self.least_squares_eps = eps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let options = AnalysisOptions::default();
        assert_eq!(options.num_points, 800);
        assert!(!options.log);

        let options = options.with_num_points(200).with_tolerance(1e-9).with_logging();
        assert_eq!(options.num_points, 200);
        assert_eq!(options.singular_tolerance, 1e-9);
        assert!(options.log);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: AnalysisOptions = serde_json::from_str(r#"{"num_points": 150}"#).unwrap();
        assert_eq!(options.num_points, 150);
        assert_eq!(options.least_squares_eps, 1e-12);
    }
}
