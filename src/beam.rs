//! Statics of a single-span beam
//!
//! Support A sits at `x = 0`, support B at `x = L`, and an optional support C
//! at `0 < c < L`. Loads are positive downward and reactions positive upward.
//! With three supports the reactions come from a closed-form heuristic
//! (`RA = RC`), which satisfies vertical equilibrium but not, in general,
//! moment equilibrium.

use log::debug;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOptions, AnalysisType};
use crate::elements::SupportKind;
use crate::error::{StaticsError, StaticsResult};
use crate::loads::{BeamLoad, DistributedLoad, PointLoad};
use crate::results::{
    BeamReactions, BeamResults, DiagramSample, DistributedLoadSummary, EquilibriumCheck,
    InternalForces, ReactionComponents, SupportReactions, TorqueSample,
};

/// Optional third support between A and B
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntermediateSupport {
    pub kind: SupportKind,
    /// Distance from support A; required whenever `kind` is not `None`
    #[serde(default)]
    pub position: Option<f64>,
}

impl IntermediateSupport {
    pub fn new(kind: SupportKind, position: f64) -> Self {
        Self {
            kind,
            position: Some(position),
        }
    }
}

fn default_support_a() -> SupportKind {
    SupportKind::Fixed
}

fn default_support_b() -> SupportKind {
    SupportKind::Movable
}

/// A straight beam between two end supports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamModel {
    /// Horizontal span L
    pub length: f64,
    /// Elevation of support A
    #[serde(default)]
    pub height_start: f64,
    /// Elevation of support B
    #[serde(default)]
    pub height_end: f64,
    #[serde(default = "default_support_a")]
    pub support_a: SupportKind,
    #[serde(default = "default_support_b")]
    pub support_b: SupportKind,
    #[serde(default)]
    pub support_c: Option<IntermediateSupport>,
    #[serde(default)]
    pub point_loads: Vec<PointLoad>,
    #[serde(default)]
    pub distributed_loads: Vec<DistributedLoad>,
    /// Applied torque T
    #[serde(default)]
    pub torque: f64,
}

impl BeamModel {
    /// Create an unloaded, level beam with a fixed support at A and a roller at B
    pub fn new(length: f64) -> Self {
        Self {
            length,
            height_start: 0.0,
            height_end: 0.0,
            support_a: default_support_a(),
            support_b: default_support_b(),
            support_c: None,
            point_loads: Vec::new(),
            distributed_loads: Vec::new(),
            torque: 0.0,
        }
    }

    /// Set the support elevations
    pub fn with_heights(mut self, start: f64, end: f64) -> Self {
        self.height_start = start;
        self.height_end = end;
        self
    }

    /// Set the end support kinds
    pub fn with_supports(mut self, a: SupportKind, b: SupportKind) -> Self {
        self.support_a = a;
        self.support_b = b;
        self
    }

    /// Add an intermediate support at `position`
    pub fn with_intermediate_support(mut self, kind: SupportKind, position: f64) -> Self {
        self.support_c = Some(IntermediateSupport::new(kind, position));
        self
    }

    /// Add a load of either kind
    pub fn with_load(mut self, load: impl Into<BeamLoad>) -> Self {
        self.add_load(load.into());
        self
    }

    /// Set the applied torque
    pub fn with_torque(mut self, torque: f64) -> Self {
        self.torque = torque;
        self
    }

    /// Route a load to the matching list
    pub fn add_load(&mut self, load: BeamLoad) {
        match load {
            BeamLoad::Point(load) => self.point_loads.push(load),
            BeamLoad::Distributed(load) => self.distributed_loads.push(load),
        }
    }

    /// All loads as the tagged variant, point loads first
    pub fn loads(&self) -> impl Iterator<Item = BeamLoad> + '_ {
        self.point_loads
            .iter()
            .cloned()
            .map(BeamLoad::Point)
            .chain(self.distributed_loads.iter().cloned().map(BeamLoad::Distributed))
    }

    /// Position of support C when it is present
    fn intermediate_position(&self) -> Option<f64> {
        self.support_c
            .filter(|support| support.kind.exists())
            .and_then(|support| support.position)
    }

    /// Reject inputs that cannot describe a loaded span
    pub fn validate(&self) -> StaticsResult<()> {
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(StaticsError::invalid(format!(
                "beam length must be positive (received {})",
                self.length
            )));
        }

        if let Some(support) = self.support_c.filter(|s| s.kind.exists()) {
            let position = support.position.ok_or_else(|| {
                StaticsError::invalid("support C position is required when support C exists")
            })?;
            if !(position > 0.0 && position < self.length) {
                return Err(StaticsError::invalid(format!(
                    "support C position {position} must lie strictly inside (0, {})",
                    self.length
                )));
            }
        }

        for (i, load) in self.distributed_loads.iter().enumerate() {
            if !(load.end > load.start) {
                return Err(StaticsError::invalid(format!(
                    "distributed load {i} must end after it starts ({} .. {})",
                    load.start, load.end
                )));
            }
            if load.start < 0.0 || load.end > self.length {
                return Err(StaticsError::invalid(format!(
                    "distributed load {i} ({} .. {}) lies outside the span [0, {}]",
                    load.start, load.end, self.length
                )));
            }
        }

        for (i, load) in self.point_loads.iter().enumerate() {
            if !(0.0..=self.length).contains(&load.position) {
                return Err(StaticsError::invalid(format!(
                    "point load {i} at {} lies outside the span [0, {}]",
                    load.position, self.length
                )));
            }
        }

        Ok(())
    }

    /// Total load V and its moment about support A, `(V, M_A)`
    pub fn load_totals(&self) -> (f64, f64) {
        self.loads().fold((0.0, 0.0), |(force, moment), load| {
            (force + load.resultant(), moment + load.moment_about_origin())
        })
    }

    /// Vertical reactions at A, B and C
    pub fn reactions(&self) -> StaticsResult<BeamReactions> {
        self.validate()?;
        let (total, moment_a) = self.load_totals();
        let l = self.length;
        let t = self.torque;

        let reactions = match self.intermediate_position() {
            None => {
                let rb = (moment_a + t) / l;
                BeamReactions {
                    ra: total - rb,
                    rb,
                    rc: 0.0,
                }
            }
            Some(c) => {
                let rb = ((moment_a + t) - c * total / 2.0) / (l - c);
                let ra = (total - rb) / 2.0;
                BeamReactions { ra, rb, rc: ra }
            }
        };
        Ok(reactions)
    }

    /// Shear and moment at `x` given previously computed reactions
    pub fn internal_forces(&self, reactions: &BeamReactions, x: f64) -> InternalForces {
        let mut shear = reactions.ra;
        let mut moment = reactions.ra * x;

        if let Some(c) = self.intermediate_position() {
            if x >= c {
                shear += reactions.rc;
                moment += reactions.rc * (x - c);
            }
        }
        if x >= self.length {
            shear += reactions.rb;
            moment += reactions.rb * (x - self.length);
        }

        let effects = self
            .point_loads
            .iter()
            .map(|load| load.effect_at(x))
            .chain(self.distributed_loads.iter().map(|load| load.effect_at(x)));
        for (v, m) in effects {
            shear -= v;
            moment -= m;
        }

        InternalForces { shear, moment }
    }

    /// Internal torque at `x`: the applied torque plus the bending moment
    pub fn torque_at(&self, reactions: &BeamReactions, x: f64) -> f64 {
        self.torque + self.internal_forces(reactions, x).moment
    }

    /// Evenly spaced samples over `[0, L]`
    pub fn diagram(&self, reactions: &BeamReactions, num_points: usize) -> DiagramSampler<'_> {
        DiagramSampler {
            model: self,
            reactions: *reactions,
            num_points: num_points.max(2),
            next: 0,
        }
    }

    /// Line of action of the total load, measured from A
    pub fn load_resultant_position(&self) -> StaticsResult<f64> {
        let (total, moment_a) = self.load_totals();
        if total.abs() <= f64::EPSILON {
            return Err(StaticsError::Domain(
                "net load is zero, resultant position undefined".into(),
            ));
        }
        Ok(moment_a / total)
    }

    /// Angle of the span from horizontal
    pub fn inclination(&self) -> f64 {
        ((self.height_end - self.height_start) / self.length).atan()
    }

    /// Full analysis: reactions with horizontal components, diagrams and summaries
    pub fn analyze(&self, options: &AnalysisOptions) -> StaticsResult<BeamResults> {
        let reactions = self.reactions()?;
        let (total, moment_a) = self.load_totals();
        let angle = self.inclination();

        if options.log {
            debug!(
                "beam L={} V={total:.4} M_A={moment_a:.4} RA={:.4} RB={:.4} RC={:.4}",
                self.length, reactions.ra, reactions.rb, reactions.rc
            );
        }

        let component = |vertical: f64, kind: SupportKind, position: f64| ReactionComponents {
            vertical,
            horizontal: if kind.resists_horizontal() {
                vertical * angle.tan()
            } else {
                0.0
            },
            kind,
            position,
        };

        let c_kind = self.support_c.map_or(SupportKind::None, |s| s.kind);
        let support_reactions = SupportReactions {
            a: component(reactions.ra, self.support_a, 0.0),
            b: component(reactions.rb, self.support_b, self.length),
            c: component(
                reactions.rc,
                c_kind,
                self.intermediate_position().unwrap_or(0.0),
            ),
        };

        let diagram: Vec<DiagramSample> =
            self.diagram(&reactions, options.num_points).collect();
        let torque = diagram
            .iter()
            .map(|s| TorqueSample {
                position: s.position,
                torque: s.torque,
            })
            .collect();

        let distributed_loads = self
            .distributed_loads
            .iter()
            .map(|load| DistributedLoadSummary {
                label: load.label.clone(),
                start: load.start,
                end: load.end,
                intensity: load.intensity,
                equivalent_force: load.equivalent_force(),
                centroid: load.centroid(),
            })
            .collect();

        Ok(BeamResults {
            analysis_type: AnalysisType::BeamStatics,
            reactions: support_reactions,
            equilibrium: EquilibriumCheck {
                sum_vertical_loads: total,
                sum_moment_about_a: moment_a,
                torque: self.torque,
            },
            inclination: angle,
            diagram,
            torque,
            load_resultant_position: self.load_resultant_position().ok(),
            distributed_loads,
        })
    }
}

/// Restartable sampler over the beam diagrams
///
/// Each sample is evaluated independently; cloning restarts from the current
/// position.
#[derive(Debug, Clone)]
pub struct DiagramSampler<'a> {
    model: &'a BeamModel,
    reactions: BeamReactions,
    num_points: usize,
    next: usize,
}

impl DiagramSampler<'_> {
    fn sample_position(&self, index: usize) -> f64 {
        if index + 1 == self.num_points {
            self.model.length
        } else {
            self.model.length * index as f64 / (self.num_points - 1) as f64
        }
    }
}

impl Iterator for DiagramSampler<'_> {
    type Item = DiagramSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.num_points {
            return None;
        }
        let position = self.sample_position(self.next);
        self.next += 1;

        let forces = self.model.internal_forces(&self.reactions, position);
        Some(DiagramSample {
            position,
            shear: forces.shear,
            moment: forces.moment,
            torque: self.model.torque + forces.moment,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_points - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DiagramSampler<'_> {}

/// Force that produces `torque` at lever arm `distance`
pub fn force_from_torque(torque: f64, distance: f64) -> StaticsResult<f64> {
    if distance == 0.0 {
        return Err(StaticsError::Domain("distance must be non-zero".into()));
    }
    Ok(torque / distance)
}

/// A lumped mass in space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMass {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub mass: f64,
}

impl PointMass {
    pub fn new(x: f64, y: f64, z: f64, mass: f64) -> Self {
        Self { x, y, z, mass }
    }
}

/// Mass-weighted centroid of a set of point masses
pub fn center_of_mass_3d(points: &[PointMass]) -> StaticsResult<Point3<f64>> {
    if points.is_empty() {
        return Err(StaticsError::Domain("no points given".into()));
    }
    let total: f64 = points.iter().map(|p| p.mass).sum();
    if total.abs() <= f64::EPSILON {
        return Err(StaticsError::Domain("total mass is zero".into()));
    }

    let weighted = points.iter().fold([0.0; 3], |acc, p| {
        [acc[0] + p.x * p.mass, acc[1] + p.y * p.mass, acc[2] + p.z * p.mass]
    });
    Ok(Point3::new(
        weighted[0] / total,
        weighted[1] / total,
        weighted[2] / total,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn simply_supported() -> BeamModel {
        BeamModel::new(10.0).with_load(PointLoad::new(5.0, 20.0))
    }

    #[test]
    fn test_midspan_point_load() {
        let r = simply_supported().reactions().unwrap();
        assert_relative_eq!(r.ra, 10.0, epsilon = 1e-12);
        assert_relative_eq!(r.rb, 10.0, epsilon = 1e-12);
        assert_eq!(r.rc, 0.0);
    }

    #[test]
    fn test_internal_forces_at_midspan() {
        let beam = simply_supported();
        let r = beam.reactions().unwrap();
        // The load at 5.0 only applies once x is past it
        let at_load = beam.internal_forces(&r, 5.0);
        assert_relative_eq!(at_load.shear, 10.0);
        assert_relative_eq!(at_load.moment, 50.0);

        let past = beam.internal_forces(&r, 7.5);
        assert_relative_eq!(past.shear, -10.0);
        assert_relative_eq!(past.moment, 25.0);
    }

    #[test]
    fn test_distributed_load_resultant() {
        let beam = BeamModel::new(10.0).with_load(DistributedLoad::new(4.0, 10.0, 5.0));
        let (total, _) = beam.load_totals();
        assert_relative_eq!(total, 30.0);
        assert_relative_eq!(beam.load_resultant_position().unwrap(), 7.0);
    }

    #[test]
    fn test_missing_support_c_position() {
        let mut beam = simply_supported();
        beam.support_c = Some(IntermediateSupport {
            kind: SupportKind::Movable,
            position: None,
        });
        assert!(matches!(
            beam.validate(),
            Err(StaticsError::InvalidConfiguration(_))
        ));

        // A support of kind None needs no position
        beam.support_c = Some(IntermediateSupport {
            kind: SupportKind::None,
            position: None,
        });
        assert!(beam.validate().is_ok());
    }

    #[test]
    fn test_support_c_outside_span() {
        let beam = simply_supported().with_intermediate_support(SupportKind::Movable, 10.0);
        assert!(beam.reactions().is_err());
    }

    #[test]
    fn test_nonpositive_length() {
        assert!(BeamModel::new(0.0).validate().is_err());
        assert!(BeamModel::new(-2.0).reactions().is_err());
    }

    #[test]
    fn test_reversed_distributed_load() {
        let beam = BeamModel::new(10.0).with_load(DistributedLoad::new(6.0, 4.0, 1.0));
        assert!(beam.validate().is_err());
    }

    #[test]
    fn test_distributed_load_outside_span() {
        let past_end = BeamModel::new(10.0).with_load(DistributedLoad::new(8.0, 15.0, 2.0));
        assert!(matches!(
            past_end.validate(),
            Err(StaticsError::InvalidConfiguration(_))
        ));

        let before_start = BeamModel::new(10.0).with_load(DistributedLoad::new(-5.0, 2.0, 1.0));
        assert!(matches!(
            before_start.reactions(),
            Err(StaticsError::InvalidConfiguration(_))
        ));

        let full_span = BeamModel::new(10.0).with_load(DistributedLoad::new(0.0, 10.0, 1.0));
        assert!(full_span.validate().is_ok());
    }

    #[test]
    fn test_diagram_samples_are_evenly_spaced() {
        let beam = simply_supported();
        let r = beam.reactions().unwrap();
        let positions: Vec<f64> = beam.diagram(&r, 5).map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_diagram_endpoints_and_length() {
        let beam = simply_supported();
        let r = beam.reactions().unwrap();
        let sampler = beam.diagram(&r, 11);
        assert_eq!(sampler.len(), 11);

        let samples: Vec<_> = sampler.clone().collect();
        assert_eq!(samples.first().unwrap().position, 0.0);
        assert_eq!(samples.last().unwrap().position, 10.0);
        // Closing the span with RB returns the shear to zero
        assert_relative_eq!(samples.last().unwrap().shear, 0.0, epsilon = 1e-9);
        assert_relative_eq!(samples.last().unwrap().moment, 0.0, epsilon = 1e-9);

        // Restartable: a second pass yields the same values
        let again: Vec<_> = beam.diagram(&r, 11).collect();
        assert_eq!(samples, again);
    }

    #[test]
    fn test_diagram_minimum_two_points() {
        let beam = simply_supported();
        let r = beam.reactions().unwrap();
        assert_eq!(beam.diagram(&r, 0).count(), 2);
    }

    #[test]
    fn test_torque_offsets_moment() {
        let beam = simply_supported().with_torque(3.0);
        let r = beam.reactions().unwrap();
        let m = beam.internal_forces(&r, 2.0).moment;
        assert_relative_eq!(beam.torque_at(&r, 2.0), 3.0 + m);
    }

    #[test]
    fn test_horizontal_component_only_on_fixed() {
        let beam = simply_supported().with_heights(0.0, 10.0);
        let results = beam.analyze(&AnalysisOptions::default()).unwrap();
        // 45 degree incline
        assert_relative_eq!(results.reactions.a.horizontal, 10.0, epsilon = 1e-9);
        assert_eq!(results.reactions.b.horizontal, 0.0);
        assert_eq!(results.diagram.len(), 800);
    }

    #[test]
    fn test_zero_load_has_no_resultant() {
        let results = BeamModel::new(4.0)
            .analyze(&AnalysisOptions::default())
            .unwrap();
        assert!(results.load_resultant_position.is_none());
        assert!(matches!(
            BeamModel::new(4.0).load_resultant_position(),
            Err(StaticsError::Domain(_))
        ));
    }

    #[test]
    fn test_force_from_torque() {
        assert_relative_eq!(force_from_torque(50.0, 2.5).unwrap(), 20.0);
        assert!(matches!(
            force_from_torque(50.0, 0.0),
            Err(StaticsError::Domain(_))
        ));
    }

    #[test]
    fn test_center_of_mass() {
        let points = [
            PointMass::new(0.0, 0.0, 0.0, 1.0),
            PointMass::new(4.0, 2.0, -2.0, 3.0),
        ];
        let cm = center_of_mass_3d(&points).unwrap();
        assert_relative_eq!(cm.x, 3.0);
        assert_relative_eq!(cm.y, 1.5);
        assert_relative_eq!(cm.z, -1.5);
        assert!(center_of_mass_3d(&[]).is_err());
    }
}
