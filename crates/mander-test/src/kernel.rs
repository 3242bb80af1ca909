//! A deliberately simple planar kernel for tests.
//!
//! Good enough for fixtures built from small convex shapes; not a
//! production geometry collaborator. Known simplifications:
//! - `union` returns the bag of input polygons without dissolving shared
//!   borders (areas and vertex sets still come out right for disjoint or
//!   edge-adjacent inputs, which is all the fixtures use)
//! - `intersection` clips exteriors only and requires a convex right-hand
//!   operand; holes are ignored
//! - `difference` is unsupported and reports a geometry error

use mander_core::{Circle, GeometryKernel, ManderError, Point, Polygon, Result, Ring};

#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveKernel;

impl NaiveKernel {
    pub fn new() -> Self {
        NaiveKernel
    }
}

impl GeometryKernel for NaiveKernel {
    fn union(&self, polygons: &[Polygon]) -> Result<Vec<Polygon>> {
        if polygons.is_empty() {
            return Err(ManderError::Geometry("empty polygon set fed to union".into()));
        }
        for polygon in polygons {
            polygon.exterior.check_closed()?;
        }
        Ok(polygons.to_vec())
    }

    fn intersection(&self, a: &[Polygon], b: &[Polygon]) -> Result<Vec<Polygon>> {
        let mut out = Vec::new();
        for subject in a {
            subject.exterior.check_closed()?;
            for clip in b {
                clip.exterior.check_closed()?;
                let clipped = clip_convex(&subject.exterior, &clip.exterior);
                if clipped.len() >= 3 {
                    out.push(Polygon::new(Ring::new(clipped)));
                }
            }
        }
        Ok(out)
    }

    fn difference(&self, _a: &[Polygon], _b: &[Polygon]) -> Result<Vec<Polygon>> {
        Err(ManderError::Geometry(
            "difference is not supported by NaiveKernel".into(),
        ))
    }

    fn area(&self, polygon: &Polygon) -> Result<f64> {
        polygon.exterior.check_closed()?;
        let mut area = ring_area(&polygon.exterior).abs();
        for hole in &polygon.holes {
            hole.check_closed()?;
            area -= ring_area(hole).abs();
        }
        if area <= 0.0 {
            return Err(ManderError::Geometry(
                "polygon has no positive area".into(),
            ));
        }
        Ok(area)
    }

    fn centroid(&self, polygon: &Polygon) -> Result<Point> {
        polygon.exterior.check_closed()?;
        let exterior_area = ring_area(&polygon.exterior).abs();
        let exterior_centroid = ring_centroid(&polygon.exterior)?;
        let mut weighted_x = exterior_centroid.x * exterior_area;
        let mut weighted_y = exterior_centroid.y * exterior_area;
        let mut total = exterior_area;
        for hole in &polygon.holes {
            hole.check_closed()?;
            let area = ring_area(hole).abs();
            let centroid = ring_centroid(hole)?;
            weighted_x -= centroid.x * area;
            weighted_y -= centroid.y * area;
            total -= area;
        }
        if total <= 0.0 {
            return Err(ManderError::Geometry(
                "polygon has no positive area".into(),
            ));
        }
        Ok(Point::new(weighted_x / total, weighted_y / total))
    }

    fn contains(&self, polygon: &Polygon, point: Point) -> bool {
        if !ring_contains(&polygon.exterior, point) {
            return false;
        }
        !polygon.holes.iter().any(|hole| ring_contains(hole, point))
    }

    fn min_enclosing_circle(&self, points: &[Point]) -> Result<Circle> {
        if points.is_empty() {
            return Err(ManderError::Geometry(
                "enclosing circle of an empty point set".into(),
            ));
        }
        Ok(welzl(points))
    }
}

fn ring_area(ring: &Ring) -> f64 {
    let pts = &ring.points;
    let mut sum = 0.0;
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

fn ring_centroid(ring: &Ring) -> Result<Point> {
    let signed = ring_area(ring);
    if signed == 0.0 {
        return Err(ManderError::Geometry("degenerate ring".into()));
    }
    let pts = &ring.points;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    Ok(Point::new(cx / (6.0 * signed), cy / (6.0 * signed)))
}

/// Even-odd ray casting.
fn ring_contains(ring: &Ring, point: Point) -> bool {
    let pts = &ring.points;
    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Sutherland-Hodgman: clips `subject` by each edge of the convex `clip`.
fn clip_convex(subject: &Ring, clip: &Ring) -> Vec<Point> {
    // orient the clip ring counterclockwise so "inside" is to the left
    let mut clip_pts = clip.points.clone();
    if ring_area(clip) < 0.0 {
        clip_pts.reverse();
    }

    let mut output = subject.points.clone();
    for i in 0..clip_pts.len() {
        if output.is_empty() {
            break;
        }
        let a = clip_pts[i];
        let b = clip_pts[(i + 1) % clip_pts.len()];
        let input = std::mem::take(&mut output);
        for j in 0..input.len() {
            let current = input[j];
            let previous = input[(j + input.len() - 1) % input.len()];
            let current_in = is_left(a, b, current) >= 0.0;
            let previous_in = is_left(a, b, previous) >= 0.0;
            if current_in {
                if !previous_in {
                    output.push(segment_intersection(previous, current, a, b));
                }
                output.push(current);
            } else if previous_in {
                output.push(segment_intersection(previous, current, a, b));
            }
        }
    }
    output
}

fn is_left(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn segment_intersection(p1: Point, p2: Point, a: Point, b: Point) -> Point {
    let dx1 = p2.x - p1.x;
    let dy1 = p2.y - p1.y;
    let dx2 = b.x - a.x;
    let dy2 = b.y - a.y;
    let denom = dx1 * dy2 - dy1 * dx2;
    if denom == 0.0 {
        return p2;
    }
    let t = ((a.x - p1.x) * dy2 - (a.y - p1.y) * dx2) / denom;
    Point::new(p1.x + t * dx1, p1.y + t * dy1)
}

/// Incremental Welzl-style minimum enclosing circle.
fn welzl(points: &[Point]) -> Circle {
    let mut circle = Circle {
        center: points[0],
        radius: 0.0,
    };
    for i in 1..points.len() {
        if in_circle(circle, points[i]) {
            continue;
        }
        circle = circle_two(points[0], points[i]);
        for j in 1..i {
            if in_circle(circle, points[j]) {
                continue;
            }
            circle = circle_two(points[j], points[i]);
            for k in 0..j {
                if !in_circle(circle, points[k]) {
                    circle = circle_three(points[k], points[j], points[i]);
                }
            }
        }
    }
    circle
}

fn in_circle(circle: Circle, point: Point) -> bool {
    circle.center.distance(point) <= circle.radius + 1e-9
}

fn circle_two(a: Point, b: Point) -> Circle {
    let center = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    Circle {
        center,
        radius: center.distance(a),
    }
}

fn circle_three(a: Point, b: Point, c: Point) -> Circle {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        // collinear: widest pair wins
        let candidates = [circle_two(a, b), circle_two(b, c), circle_two(a, c)];
        return candidates
            .into_iter()
            .max_by(|x, y| x.radius.total_cmp(&y.radius))
            .unwrap();
    }
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let center = Point::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    );
    Circle {
        center,
        radius: center.distance(a),
    }
}
