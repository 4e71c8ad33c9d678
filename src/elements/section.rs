//! Section properties for frame members

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{StaticsError, StaticsResult};

/// In-plane cross-section properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area
    pub a: f64,
    /// Moment of inertia about the bending axis
    pub i: f64,
    /// Centroid height measured from the bottom fibre
    pub centroid_y: f64,
    /// Overall depth
    pub depth: f64,
}

/// One rectangle of a built-up section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    /// Width (parallel to the bending axis)
    pub width: f64,
    /// Height (perpendicular to the bending axis)
    pub height: f64,
}

impl Plate {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn own_inertia(&self) -> f64 {
        self.width * self.height.powi(3) / 12.0
    }
}

impl Section {
    /// Create a section from known properties
    pub fn new(a: f64, i: f64) -> Self {
        Self {
            a,
            i,
            centroid_y: 0.0,
            depth: 0.0,
        }
    }

    /// Create a rectangular section
    pub fn rectangular(width: f64, depth: f64) -> Self {
        Self {
            a: width * depth,
            i: width * depth.powi(3) / 12.0,
            centroid_y: depth / 2.0,
            depth,
        }
    }

    /// Create a solid circular section
    pub fn circular(diameter: f64) -> Self {
        let r = diameter / 2.0;
        Self {
            a: std::f64::consts::PI * r.powi(2),
            i: std::f64::consts::PI * r.powi(4) / 4.0,
            centroid_y: r,
            depth: diameter,
        }
    }

    /// Built-up section of three stacked rectangles (top flange, web, bottom flange)
    ///
    /// The centroid is located from the base and the inertia is combined with
    /// the parallel axis theorem. Any plate may be zero-height, which covers
    /// T and inverted-T shapes.
    pub fn built_up(top: Plate, web: Plate, bottom: Plate) -> StaticsResult<Self> {
        let plates = [top, web, bottom];
        if plates
            .iter()
            .any(|p| !(p.width.is_finite() && p.height.is_finite()) || p.width < 0.0 || p.height < 0.0)
        {
            return Err(StaticsError::invalid(
                "section plate dimensions must be non-negative",
            ));
        }

        // Centroid of each plate measured from the base
        let y_bottom = bottom.height / 2.0;
        let y_web = bottom.height + web.height / 2.0;
        let y_top = bottom.height + web.height + top.height / 2.0;
        let parts = [(top, y_top), (web, y_web), (bottom, y_bottom)];

        let area: f64 = plates.iter().map(Plate::area).sum();
        if area <= 0.0 {
            return Err(StaticsError::Domain(
                "built-up section has zero area".into(),
            ));
        }

        let centroid_y = parts.iter().map(|(p, y)| p.area() * y).sum::<f64>() / area;
        let i = parts
            .iter()
            .map(|(p, y)| p.own_inertia() + p.area() * (y - centroid_y).powi(2))
            .sum();

        Ok(Self {
            a: area,
            i,
            centroid_y,
            depth: top.height + web.height + bottom.height,
        })
    }

    /// Radius of gyration
    pub fn radius_of_gyration(&self) -> f64 {
        (self.i / self.a).sqrt()
    }
}

/// A plane figure for composite centroid calculations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Rectangle with its lower-left corner at `(x, y)`
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    /// Right triangle with the right angle at `(x, y)` and legs along +x and +y
    Triangle { x: f64, y: f64, width: f64, height: f64 },
    /// Circle centred at `(x, y)`
    Circle { x: f64, y: f64, diameter: f64 },
}

impl Shape {
    pub fn area(&self) -> f64 {
        match *self {
            Shape::Rectangle { width, height, .. } => width * height,
            Shape::Triangle { width, height, .. } => width * height / 2.0,
            Shape::Circle { diameter, .. } => std::f64::consts::PI * (diameter / 2.0).powi(2),
        }
    }

    pub fn centroid(&self) -> Point2<f64> {
        match *self {
            Shape::Rectangle { x, y, width, height } => {
                Point2::new(x + width / 2.0, y + height / 2.0)
            }
            Shape::Triangle { x, y, width, height } => {
                Point2::new(x + width / 3.0, y + height / 3.0)
            }
            Shape::Circle { x, y, .. } => Point2::new(x, y),
        }
    }
}

/// Area-weighted centroid of a set of shapes
pub fn composite_centroid(shapes: &[Shape]) -> StaticsResult<Point2<f64>> {
    if shapes.is_empty() {
        return Err(StaticsError::Domain("no shapes given".into()));
    }
    let area: f64 = shapes.iter().map(Shape::area).sum();
    if area.abs() <= f64::EPSILON {
        return Err(StaticsError::Domain("total area is zero".into()));
    }

    let moment = shapes
        .iter()
        .fold(Vector2::zeros(), |acc, s| acc + s.centroid().coords * s.area());
    Ok(Point2::from(moment / area))
}

impl Default for Section {
    fn default() -> Self {
        // 200mm x 200mm
        Self::rectangular(0.2, 0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangular_section() {
        let section = Section::rectangular(0.3, 0.5);
        assert_relative_eq!(section.a, 0.15, epsilon = 1e-12);
        assert_relative_eq!(section.i, 0.3 * 0.125 / 12.0, epsilon = 1e-12);
        assert_relative_eq!(section.centroid_y, 0.25);
    }

    #[test]
    fn test_built_up_matches_single_rectangle() {
        // Three identical plates stacked equal one tall rectangle
        let plate = Plate::new(10.0, 2.0);
        let section = Section::built_up(plate, plate, plate).unwrap();
        let solid = Section::rectangular(10.0, 6.0);
        assert_relative_eq!(section.a, solid.a, epsilon = 1e-9);
        assert_relative_eq!(section.centroid_y, 3.0, epsilon = 1e-9);
        assert_relative_eq!(section.i, solid.i, epsilon = 1e-9);
    }

    #[test]
    fn test_built_up_i_section() {
        let flange = Plate::new(20.0, 2.0);
        let web = Plate::new(1.0, 16.0);
        let section = Section::built_up(flange, web, flange).unwrap();
        assert_relative_eq!(section.a, 96.0, epsilon = 1e-9);
        assert_relative_eq!(section.centroid_y, 10.0, epsilon = 1e-9);
        // 2 * (20*8/12 + 40*81) + 16^3/12
        let expected = 2.0 * (20.0 * 8.0 / 12.0 + 40.0 * 81.0) + 4096.0 / 12.0;
        assert_relative_eq!(section.i, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_built_up_zero_area() {
        let empty = Plate::new(0.0, 0.0);
        assert!(Section::built_up(empty, empty, empty).is_err());
    }

    #[test]
    fn test_composite_centroid_of_mixed_shapes() {
        let shapes = [
            Shape::Rectangle { x: 0.0, y: 0.0, width: 4.0, height: 2.0 },
            Shape::Triangle { x: 4.0, y: 0.0, width: 3.0, height: 6.0 },
        ];
        // Areas 8 and 9, centroids (2, 1) and (5, 2)
        let c = composite_centroid(&shapes).unwrap();
        assert_relative_eq!(c.x, (8.0 * 2.0 + 9.0 * 5.0) / 17.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, (8.0 * 1.0 + 9.0 * 2.0) / 17.0, epsilon = 1e-12);
    }

    #[test]
    fn test_circle_centroid_is_its_centre() {
        let circle = Shape::Circle { x: 1.5, y: -2.0, diameter: 2.0 };
        assert_relative_eq!(circle.area(), std::f64::consts::PI, epsilon = 1e-12);
        let c = composite_centroid(&[circle]).unwrap();
        assert_relative_eq!(c, Point2::new(1.5, -2.0));
    }

    #[test]
    fn test_composite_centroid_zero_area() {
        let flat = Shape::Rectangle { x: 0.0, y: 0.0, width: 5.0, height: 0.0 };
        assert!(matches!(composite_centroid(&[flat]), Err(StaticsError::Domain(_))));
        assert!(matches!(composite_centroid(&[]), Err(StaticsError::Domain(_))));
    }
}
