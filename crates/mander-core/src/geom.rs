//! Plain polygon data and the geometry-collaborator contract.
//!
//! The engine does not implement planar geometry itself. Everything it needs
//! (dissolve, overlay, area, centroid, enclosing circles) is consumed through
//! the [`GeometryKernel`] trait, which takes and returns plain vertex-list
//! data. Implementations live outside this crate; tests use a naive kernel
//! from `mander-test`.

use serde::{Deserialize, Serialize};

use crate::error::{ManderError, Result};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A closed ring of vertices. The closing edge from the last vertex back to
/// the first is implicit; a ring with fewer than 3 vertices is degenerate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ring {
    pub points: Vec<Point>,
}

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Ring { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns a geometry error if this ring cannot bound any area.
    pub fn check_closed(&self) -> Result<()> {
        if self.points.len() < 3 {
            return Err(ManderError::Geometry(format!(
                "ring with {} vertices cannot be closed",
                self.points.len()
            )));
        }
        Ok(())
    }
}

/// A polygon: one exterior ring plus optional interior holes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring) -> Self {
        Polygon {
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(exterior: Ring, holes: Vec<Ring>) -> Self {
        Polygon { exterior, holes }
    }

    /// All vertices of the exterior and every hole.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.exterior
            .points
            .iter()
            .chain(self.holes.iter().flat_map(|h| h.points.iter()))
            .copied()
    }
}

/// A circle, as produced by enclosing-circle queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

/// Planar operations the engine consumes from a geometry collaborator.
///
/// All inputs are plain polygon data. Malformed input (unclosed ring,
/// degenerate polygon, empty polygon set where one is required) is fatal for
/// the operation and surfaced as [`ManderError::Geometry`]; it is never
/// retried here.
pub trait GeometryKernel {
    /// Dissolves a set of polygons into their union.
    fn union(&self, polygons: &[Polygon]) -> Result<Vec<Polygon>>;

    /// Intersection of two polygon sets.
    fn intersection(&self, a: &[Polygon], b: &[Polygon]) -> Result<Vec<Polygon>>;

    /// Portions of `a` not covered by `b`.
    fn difference(&self, a: &[Polygon], b: &[Polygon]) -> Result<Vec<Polygon>>;

    /// Area of a single polygon, holes subtracted.
    fn area(&self, polygon: &Polygon) -> Result<f64>;

    /// Area centroid of a single polygon.
    fn centroid(&self, polygon: &Polygon) -> Result<Point>;

    /// Point-in-polygon test, holes respected.
    fn contains(&self, polygon: &Polygon, point: Point) -> bool;

    /// Smallest circle enclosing every point of the input set.
    fn min_enclosing_circle(&self, points: &[Point]) -> Result<Circle>;
}

/// Total area of a polygon set.
pub fn total_area<K: GeometryKernel + ?Sized>(kernel: &K, polygons: &[Polygon]) -> Result<f64> {
    let mut area = 0.0;
    for polygon in polygons {
        area += kernel.area(polygon)?;
    }
    Ok(area)
}

/// Area-weighted centroid of a polygon set.
pub fn set_centroid<K: GeometryKernel + ?Sized>(kernel: &K, polygons: &[Polygon]) -> Result<Point> {
    if polygons.is_empty() {
        return Err(ManderError::Geometry(
            "centroid of an empty polygon set".into(),
        ));
    }
    let mut weighted = Point::default();
    let mut total = 0.0;
    for polygon in polygons {
        let area = kernel.area(polygon)?;
        let centroid = kernel.centroid(polygon)?;
        weighted.x += centroid.x * area;
        weighted.y += centroid.y * area;
        total += area;
    }
    if total <= 0.0 {
        return Err(ManderError::Geometry(
            "polygon set has no positive area".into(),
        ));
    }
    Ok(Point::new(weighted.x / total, weighted.y / total))
}
