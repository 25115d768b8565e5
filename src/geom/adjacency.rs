//! Edge and face adjacency for polygon meshes.
//!
//! [`AdjacencyGraph::build`] walks every face loop once, keying each
//! consecutive vertex pair (wrapping) as an undirected [`EdgeKey`] and
//! recording the incident face. Per-face area, normal and shape ratio are
//! computed in the same pass so the detectors never touch raw loops twice.
//!
//! Faces with fewer than three distinct vertices, or with a vertex repeated
//! inside the loop, are marked degenerate. They contribute no edges and no
//! geometry; the sliver pass reports each of them once.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use super::mesh::MeshSnapshot;
use super::{BBox, Point3, Vec3};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// `longest_edge / (EQUILATERAL_SCALE * inradius)` is exactly 1.0 for an
/// equilateral triangle.
const EQUILATERAL_SCALE: f64 = 2.0 * SQRT_3;

/// Undirected edge between two vertices, stored with `a <= b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeKey {
    pub a: u32,
    pub b: u32,
}

impl EdgeKey {
    #[must_use]
    pub const fn new(v0: u32, v1: u32) -> Self {
        if v0 <= v1 {
            Self { a: v0, b: v1 }
        } else {
            Self { a: v1, b: v0 }
        }
    }
}

/// Geometry derived for a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGeometry {
    /// Number of entries in the face loop.
    pub loop_len: usize,
    /// Fewer than three distinct vertices, or a vertex repeated in the loop.
    pub degenerate: bool,
    /// Polygon area (fan-triangulated vector area). Zero for degenerate faces.
    pub area: f64,
    /// Unit normal, `None` when the area vanishes.
    pub normal: Option<Vec3>,
    /// Triangle/quad shape ratio; `None` for n-gons, degenerate and zero-area faces.
    pub shape_ratio: Option<f64>,
    /// Bounds over the face's vertex positions.
    pub bounds: BBox,
}

/// Edge → faces and face → faces relationships for one mesh snapshot.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    edge_faces: HashMap<EdgeKey, Vec<usize>>,
    face_neighbors: Vec<Vec<usize>>,
    faces: Vec<FaceGeometry>,
    vertex_valence: Vec<u32>,
}

impl AdjacencyGraph {
    /// Builds adjacency for a snapshot whose indices are already validated.
    ///
    /// Runs in time linear in the total face-loop length (plus the per-edge
    /// neighbour fan-out, which is constant for manifold meshes).
    #[must_use]
    pub fn build(mesh: &MeshSnapshot) -> Self {
        let face_count = mesh.face_count();
        let mut edge_faces: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
        edge_faces.reserve(mesh.total_loop_length());

        let mut faces = Vec::with_capacity(face_count);
        // Face stamp per vertex, so repeated-vertex checks stay linear.
        let mut last_seen = vec![usize::MAX; mesh.vertex_count()];

        for (face_idx, indices) in mesh.faces().iter().enumerate() {
            let degenerate = indices.len() < 3
                || indices.iter().any(|&v| {
                    let slot = &mut last_seen[v as usize];
                    let repeated = *slot == face_idx;
                    *slot = face_idx;
                    repeated
                });

            let positions: Vec<Point3> = indices.iter().map(|&v| mesh.position(v)).collect();
            let bounds = BBox::from_points(positions.iter().copied())
                .unwrap_or(BBox::from_point(Point3::ORIGIN));

            if degenerate {
                faces.push(FaceGeometry {
                    loop_len: indices.len(),
                    degenerate: true,
                    area: 0.0,
                    normal: None,
                    shape_ratio: None,
                    bounds,
                });
                continue;
            }

            for i in 0..indices.len() {
                let key = EdgeKey::new(indices[i], indices[(i + 1) % indices.len()]);
                edge_faces.entry(key).or_default().push(face_idx);
            }

            faces.push(face_geometry(&positions, bounds));
        }

        let mut face_neighbors = vec![Vec::new(); face_count];
        let mut vertex_valence = vec![0u32; mesh.vertex_count()];
        for (edge, incident) in &edge_faces {
            vertex_valence[edge.a as usize] += 1;
            vertex_valence[edge.b as usize] += 1;
            for &f in incident {
                face_neighbors[f].extend(incident.iter().copied().filter(|&g| g != f));
            }
        }
        for neighbors in &mut face_neighbors {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        Self {
            edge_faces,
            face_neighbors,
            faces,
            vertex_valence,
        }
    }

    /// All edges with their incident faces, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &[usize])> + '_ {
        self.edge_faces
            .iter()
            .map(|(&edge, faces)| (edge, faces.as_slice()))
    }

    #[must_use]
    pub fn faces_for_edge(&self, edge: EdgeKey) -> Option<&[usize]> {
        self.edge_faces.get(&edge).map(Vec::as_slice)
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    /// Edges with exactly one incident face.
    pub fn boundary_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges()
            .filter(|(_, faces)| faces.len() == 1)
            .map(|(edge, _)| edge)
    }

    /// Edges with three or more incident faces.
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges()
            .filter(|(_, faces)| faces.len() > 2)
            .map(|(edge, _)| edge)
    }

    /// Faces sharing at least one edge with `face`, ascending.
    #[must_use]
    pub fn neighbors(&self, face: usize) -> &[usize] {
        self.face_neighbors.get(face).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn face(&self, face: usize) -> Option<&FaceGeometry> {
        self.faces.get(face)
    }

    #[must_use]
    pub fn face_geometry(&self) -> &[FaceGeometry] {
        &self.faces
    }

    /// Number of distinct edges touching `vertex`.
    #[must_use]
    pub fn valence(&self, vertex: u32) -> u32 {
        self.vertex_valence.get(vertex as usize).copied().unwrap_or(0)
    }

    /// Vertices whose valence is strictly greater than `threshold`.
    #[must_use]
    pub fn pole_count(&self, threshold: u32) -> usize {
        self.vertex_valence.iter().filter(|&&v| v > threshold).count()
    }

    /// Median area over non-degenerate faces.
    #[must_use]
    pub fn median_area(&self) -> Option<f64> {
        let mut areas: Vec<f64> = self
            .faces
            .iter()
            .filter(|f| !f.degenerate)
            .map(|f| f.area)
            .collect();
        if areas.is_empty() {
            return None;
        }
        areas.sort_by(f64::total_cmp);
        let mid = areas.len() / 2;
        if areas.len() % 2 == 0 {
            Some((areas[mid - 1] + areas[mid]) * 0.5)
        } else {
            Some(areas[mid])
        }
    }

    /// Number of edge-connected components among non-degenerate faces.
    #[must_use]
    pub fn shell_count(&self) -> usize {
        let mut visited = vec![false; self.faces.len()];
        let mut shells = 0usize;
        let mut queue = VecDeque::new();

        for seed in 0..self.faces.len() {
            if visited[seed] || self.faces[seed].degenerate {
                continue;
            }
            shells += 1;
            visited[seed] = true;
            queue.push_back(seed);
            while let Some(face) = queue.pop_front() {
                for &next in self.neighbors(face) {
                    if !visited[next] {
                        visited[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        shells
    }
}

fn face_geometry(positions: &[Point3], bounds: BBox) -> FaceGeometry {
    let vector_area = fan_vector_area(positions);
    let area = vector_area.length() * 0.5;
    let normal = vector_area.normalized();

    let shape_ratio = if area > 0.0 && area.is_finite() {
        match positions {
            [a, b, c] => Some(triangle_shape_ratio(*a, *b, *c)),
            [a, b, c, d] => Some(quad_shape_ratio(*a, *b, *c, *d)),
            _ => None,
        }
    } else {
        None
    };

    FaceGeometry {
        loop_len: positions.len(),
        degenerate: false,
        area,
        normal,
        shape_ratio,
        bounds,
    }
}

/// Twice the vector area of a (possibly non-planar) polygon.
fn fan_vector_area(positions: &[Point3]) -> Vec3 {
    let Some(&origin) = positions.first() else {
        return Vec3::ZERO;
    };
    let mut sum = Vec3::ZERO;
    for i in 1..positions.len().saturating_sub(1) {
        let e0 = positions[i].sub_point(origin);
        let e1 = positions[i + 1].sub_point(origin);
        sum = sum + e0.cross(e1);
    }
    sum
}

/// Longest edge over scaled inradius; 1.0 for equilateral, unbounded for slivers.
#[must_use]
pub fn triangle_shape_ratio(a: Point3, b: Point3, c: Point3) -> f64 {
    let la = a.distance_to(b);
    let lb = b.distance_to(c);
    let lc = c.distance_to(a);
    let longest = la.max(lb).max(lc);
    let perimeter = la + lb + lc;

    let area = b.sub_point(a).cross(c.sub_point(a)).length() * 0.5;
    if !(area > 0.0) || !(perimeter > 0.0) {
        return f64::INFINITY;
    }

    let inradius = 2.0 * area / perimeter;
    longest / (EQUILATERAL_SCALE * inradius)
}

/// Worst triangle ratio over both diagonal splits of the quad.
#[must_use]
pub fn quad_shape_ratio(a: Point3, b: Point3, c: Point3, d: Point3) -> f64 {
    let split_ac = triangle_shape_ratio(a, b, c).max(triangle_shape_ratio(a, c, d));
    let split_bd = triangle_shape_ratio(a, b, d).max(triangle_shape_ratio(b, c, d));
    split_ac.max(split_bd)
}
