//! Flat 2D shapes and their extrusion into 3D solids.
//!
//! A [`FlatShape`] is an outer contour plus any number of holes. Shapes
//! are triangulated by ear clipping after bridging each hole into the
//! outline, and extruded by sweeping along the z axis: front cap, back
//! cap and side walls with flat normals.

use glam::Vec2;

use crate::types::Vertex;

const EPS: f32 = 1e-6;

fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// A closed 2D contour. The closing edge from the last point back to the
/// first is implicit; points are not repeated.
#[derive(Debug, Clone, Default)]
pub struct Contour {
    pub points: Vec<Vec2>,
}

impl Contour {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Shoelace area. Positive for counter-clockwise contours in a
    /// y-up frame.
    pub fn signed_area(&self) -> f32 {
        let pts = &self.points;
        let n = pts.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            sum += cross(a, b);
        }
        sum * 0.5
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Even-odd ray cast.
    pub fn contains(&self, p: Vec2) -> bool {
        let pts = &self.points;
        let n = pts.len();
        let mut inside = false;
        for i in 0..n {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if x > p.x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Inclusive test; points on an edge count as inside.
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = cross(b - a, p - a);
    let d2 = cross(c - b, p - b);
    let d3 = cross(a - c, p - c);
    let has_neg = d1 < -EPS || d2 < -EPS || d3 < -EPS;
    let has_pos = d1 > EPS || d2 > EPS || d3 > EPS;
    !(has_neg && has_pos)
}

/// A flat shape: one outer contour plus holes.
///
/// Construction normalizes winding so the outline is counter-clockwise
/// and every hole clockwise; the rest of the module relies on it.
#[derive(Debug, Clone)]
pub struct FlatShape {
    pub outline: Contour,
    pub holes: Vec<Contour>,
}

impl FlatShape {
    pub fn new(outline: Contour) -> Self {
        Self::with_holes(outline, Vec::new())
    }

    pub fn with_holes(mut outline: Contour, mut holes: Vec<Contour>) -> Self {
        if !outline.is_ccw() {
            outline.reverse();
        }
        for hole in &mut holes {
            if hole.is_ccw() {
                hole.reverse();
            }
        }
        Self { outline, holes }
    }

    /// Bridges every hole into the outline, producing one simple
    /// counter-clockwise polygon with zero-width cuts.
    fn merged_polygon(&self) -> Vec<Vec2> {
        let mut polygon = self.outline.points.clone();

        // Rightmost holes first so earlier bridges cannot occlude later ones.
        let mut holes: Vec<&Contour> = self.holes.iter().filter(|h| h.points.len() >= 3).collect();
        holes.sort_by(|a, b| {
            let ax = a.points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
            let bx = b.points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
            bx.partial_cmp(&ax).unwrap_or(std::cmp::Ordering::Equal)
        });

        for hole in holes {
            bridge_hole(&mut polygon, &hole.points);
        }
        polygon
    }

    /// Ear-clips the (hole-bridged) shape. Returns the polygon points and
    /// triangle indices into them.
    pub fn triangulate(&self) -> (Vec<Vec2>, Vec<u32>) {
        let polygon = self.merged_polygon();
        let indices = ear_clip(&polygon);
        (polygon, indices)
    }
}

/// Connects a clockwise hole to the polygon with a zero-width bridge at a
/// mutually visible vertex pair (rightmost hole vertex, ray cast to +x).
fn bridge_hole(polygon: &mut Vec<Vec2>, hole: &[Vec2]) {
    let m = match hole
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    {
        Some((i, _)) => i,
        None => return,
    };
    let hm = hole[m];

    // Closest intersection of the ray hm + t*(1,0) with a polygon edge.
    let n = polygon.len();
    let mut best_x = f32::INFINITY;
    let mut best_edge = None;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if (a.y > hm.y) == (b.y > hm.y) {
            continue;
        }
        let x = a.x + (hm.y - a.y) * (b.x - a.x) / (b.y - a.y);
        if x >= hm.x - EPS && x < best_x {
            best_x = x;
            best_edge = Some(i);
        }
    }
    let Some(edge) = best_edge else {
        // Hole lies outside the outline; drop it.
        return;
    };

    let intersection = Vec2::new(best_x, hm.y);
    let a = polygon[edge];
    let b = polygon[(edge + 1) % n];
    let mut bridge = if a.x > b.x { edge } else { (edge + 1) % n };

    // A reflex vertex inside the (hm, intersection, candidate) triangle
    // would make the bridge cross the polygon; redirect to the one
    // closest in angle to the ray.
    let candidate = polygon[bridge];
    let mut best_metric = f32::INFINITY;
    for j in 0..n {
        if j == bridge {
            continue;
        }
        let p = polygon[j];
        if p.x < hm.x - EPS {
            continue;
        }
        if !point_in_triangle(p, hm, intersection, candidate) {
            continue;
        }
        if !is_reflex(polygon, j) {
            continue;
        }
        let dx = p.x - hm.x;
        let metric = if dx > EPS {
            (p.y - hm.y).abs() / dx
        } else {
            f32::INFINITY
        };
        if metric < best_metric || (metric == best_metric && p.x < polygon[bridge].x) {
            best_metric = metric;
            bridge = j;
        }
    }

    // Splice the hole in, walking it from its rightmost vertex and
    // doubling both bridge endpoints to keep the polygon closed.
    let h = hole.len();
    let mut insertion = Vec::with_capacity(h + 2);
    for k in 0..=h {
        insertion.push(hole[(m + k) % h]);
    }
    insertion.push(polygon[bridge]);
    polygon.splice(bridge + 1..bridge + 1, insertion);
}

fn is_reflex(polygon: &[Vec2], i: usize) -> bool {
    let n = polygon.len();
    let prev = polygon[(i + n - 1) % n];
    let cur = polygon[i];
    let next = polygon[(i + 1) % n];
    cross(cur - prev, next - cur) < -EPS
}

/// Classic O(n^2) ear clipping over a counter-clockwise simple polygon
/// (zero-width bridge cuts allowed). Returns triangle index triples.
fn ear_clip(points: &[Vec2]) -> Vec<u32> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<u32> = (0..n as u32).collect();
    let mut triangles = Vec::with_capacity((n - 2) * 3);
    let mut i = 0usize;
    let mut since_last_ear = 0usize;

    while remaining.len() > 3 {
        let len = remaining.len();
        let i0 = remaining[(i + len - 1) % len];
        let i1 = remaining[i % len];
        let i2 = remaining[(i + 1) % len];
        let (a, b, c) = (points[i0 as usize], points[i1 as usize], points[i2 as usize]);

        if is_ear(points, &remaining, a, b, c) {
            triangles.extend([i0, i1, i2]);
            remaining.remove(i % len);
            since_last_ear = 0;
            i %= remaining.len();
        } else {
            i = (i + 1) % len;
            since_last_ear += 1;
            if since_last_ear > len {
                // Degenerate remainder; fan it out so the caller still
                // gets a watertight mesh.
                for w in 1..remaining.len() - 1 {
                    triangles.extend([remaining[0], remaining[w], remaining[w + 1]]);
                }
                return triangles;
            }
        }
    }

    triangles.extend([remaining[0], remaining[1], remaining[2]]);
    triangles
}

fn is_ear(points: &[Vec2], remaining: &[u32], a: Vec2, b: Vec2, c: Vec2) -> bool {
    // Convex corner for a counter-clockwise polygon.
    if cross(b - a, c - b) <= EPS {
        return false;
    }
    for &idx in remaining {
        let p = points[idx as usize];
        // Bridge duplicates coincide with a corner; they never block.
        if p.distance_squared(a) < EPS || p.distance_squared(b) < EPS || p.distance_squared(c) < EPS
        {
            continue;
        }
        if point_in_triangle(p, a, b, c) {
            return false;
        }
    }
    true
}

/// Extrudes a flat shape along z, centered on the xy plane: front cap at
/// `+depth/2`, back cap at `-depth/2`, quad walls along every contour.
pub fn extrude(shape: &FlatShape, depth: f32) -> (Vec<Vertex>, Vec<u32>) {
    let (points, tri_indices) = shape.triangulate();
    let half = depth * 0.5;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Front cap, normal +z.
    for p in &points {
        vertices.push(Vertex::new([p.x, p.y, half], [0.0, 0.0, 1.0]));
    }
    indices.extend_from_slice(&tri_indices);

    // Back cap, normal -z, winding reversed.
    let back_base = vertices.len() as u32;
    for p in &points {
        vertices.push(Vertex::new([p.x, p.y, -half], [0.0, 0.0, -1.0]));
    }
    for t in tri_indices.chunks(3) {
        indices.extend([back_base + t[0], back_base + t[2], back_base + t[1]]);
    }

    // Side walls. With a CCW outline and CW holes the outward normal of
    // edge direction e is (e.y, -e.x) for both.
    for contour in std::iter::once(&shape.outline).chain(shape.holes.iter()) {
        let pts = &contour.points;
        let n = pts.len();
        for i in 0..n {
            let p0 = pts[i];
            let p1 = pts[(i + 1) % n];
            let edge = p1 - p0;
            if edge.length_squared() < EPS {
                continue;
            }
            let normal = Vec2::new(edge.y, -edge.x).normalize();
            let normal = [normal.x, normal.y, 0.0];

            let base = vertices.len() as u32;
            vertices.push(Vertex::new([p0.x, p0.y, half], normal));
            vertices.push(Vertex::new([p1.x, p1.y, half], normal));
            vertices.push(Vertex::new([p1.x, p1.y, -half], normal));
            vertices.push(Vertex::new([p0.x, p0.y, -half], normal));
            indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    (vertices, indices)
}

/// Combined xy bounds of a set of shapes (outline points only).
pub fn shape_bounds(shapes: &[FlatShape]) -> Option<(Vec2, Vec2)> {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut any = false;
    for shape in shapes {
        for p in &shape.outline.points {
            min = min.min(*p);
            max = max.max(*p);
            any = true;
        }
    }
    any.then_some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32, offset: Vec2) -> Contour {
        Contour::new(vec![
            offset + Vec2::new(0.0, 0.0),
            offset + Vec2::new(size, 0.0),
            offset + Vec2::new(size, size),
            offset + Vec2::new(0.0, size),
        ])
    }

    #[test]
    fn signed_area_of_unit_square() {
        let c = square(1.0, Vec2::ZERO);
        assert!((c.signed_area() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn winding_normalized_on_construction() {
        let mut reversed = square(1.0, Vec2::ZERO);
        reversed.reverse();
        let shape = FlatShape::new(reversed);
        assert!(shape.outline.is_ccw());
    }

    #[test]
    fn square_triangulates_to_two_triangles() {
        let shape = FlatShape::new(square(1.0, Vec2::ZERO));
        let (_, indices) = shape.triangulate();
        assert_eq!(indices.len(), 6);
    }

    #[test]
    fn square_with_hole_triangulates_to_eight_triangles() {
        let outer = square(4.0, Vec2::ZERO);
        let hole = square(2.0, Vec2::splat(1.0));
        let shape = FlatShape::with_holes(outer, vec![hole]);
        let (points, indices) = shape.triangulate();
        // 4 + 4 contour points plus 2 bridge duplicates.
        assert_eq!(points.len(), 10);
        // A simple polygon with n vertices yields n - 2 triangles.
        assert_eq!(indices.len() / 3, 8);
    }

    #[test]
    fn hole_area_is_not_covered() {
        let outer = square(4.0, Vec2::ZERO);
        let hole = square(2.0, Vec2::splat(1.0));
        let shape = FlatShape::with_holes(outer, vec![hole]);
        let (points, indices) = shape.triangulate();

        let covered: f32 = indices
            .chunks(3)
            .map(|t| {
                let (a, b, c) = (
                    points[t[0] as usize],
                    points[t[1] as usize],
                    points[t[2] as usize],
                );
                cross(b - a, c - a).abs() * 0.5
            })
            .sum();
        assert!((covered - 12.0).abs() < 1e-3, "covered {covered}");
    }

    #[test]
    fn extrude_square_counts() {
        let shape = FlatShape::new(square(1.0, Vec2::ZERO));
        let (vertices, indices) = extrude(&shape, 0.5);
        // 2 caps x 4 points + 4 walls x 4 points.
        assert_eq!(vertices.len(), 24);
        // 2 caps x 2 triangles + 4 walls x 2 triangles.
        assert_eq!(indices.len() / 3, 12);
    }

    #[test]
    fn extrude_is_z_centered() {
        let shape = FlatShape::new(square(1.0, Vec2::ZERO));
        let (vertices, _) = extrude(&shape, 0.5);
        let max_z = vertices.iter().map(|v| v.position[2]).fold(f32::MIN, f32::max);
        let min_z = vertices.iter().map(|v| v.position[2]).fold(f32::MAX, f32::min);
        assert!((max_z - 0.25).abs() < 1e-6);
        assert!((min_z + 0.25).abs() < 1e-6);
    }

    #[test]
    fn wall_normals_point_outward() {
        let shape = FlatShape::new(square(2.0, Vec2::new(-1.0, -1.0)));
        let (vertices, _) = extrude(&shape, 1.0);
        for v in vertices.iter().filter(|v| v.normal[2] == 0.0) {
            let outward = Vec2::new(v.normal[0], v.normal[1]);
            let at = Vec2::new(v.position[0], v.position[1]);
            // For a square centered on the origin the outward normal
            // agrees in direction with the vertex position.
            assert!(outward.dot(at) > 0.0);
        }
    }
}
