//! Procedural sample meshes.
//!
//! Used by the CLI demos and the test suites; each sample exercises one
//! kind of defect (or none).

use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::geom::{EdgeKey, MeshSnapshot};

/// Names accepted by [`by_name`], in demo order.
pub const NAMES: &[&str] = &[
    "tetrahedron",
    "quad_box",
    "open_box",
    "prism",
    "fan",
    "sliver_strip",
    "degenerate",
    "ngon_torus",
];

/// Looks a sample up by its CLI name, with the default parameters.
#[must_use]
pub fn by_name(name: &str) -> Option<MeshSnapshot> {
    let mesh = match name {
        "tetrahedron" => tetrahedron(),
        "quad_box" => quad_box(3),
        "open_box" => open_box(3),
        "prism" => prism(8),
        "fan" => triangle_fan(8),
        "sliver_strip" => sliver_strip(40.0),
        "degenerate" => degenerate_face(),
        "ngon_torus" => ngon_torus(10, 10, 6),
        _ => return None,
    };
    Some(mesh)
}

/// Regular tetrahedron: closed, four equilateral triangles.
#[must_use]
pub fn tetrahedron() -> MeshSnapshot {
    MeshSnapshot::new(
        vec![
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ],
        vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]],
    )
}

/// Unit cube with every side split into `n` x `n` quads, vertices welded.
///
/// `6 n²` faces and `6 n² + 2` vertices; closed and all-quad.
#[must_use]
pub fn quad_box(n: u32) -> MeshSnapshot {
    let n = n.max(1);
    let mut lattice = Lattice::new(n);
    let mut faces = Vec::with_capacity(6 * (n * n) as usize);

    for axis in 0..3 {
        for side in [0, n] {
            for u in 0..n {
                for v in 0..n {
                    let mut face: Vec<u32> = [(u, v), (u + 1, v), (u + 1, v + 1), (u, v + 1)]
                        .iter()
                        .map(|&(fu, fv)| lattice.vertex(on_side(axis, side, fu, fv)))
                        .collect();
                    if side == 0 {
                        face.reverse();
                    }
                    faces.push(face);
                }
            }
        }
    }

    MeshSnapshot::new(lattice.vertices, faces)
}

/// [`quad_box`] with its last quad removed, leaving a four-edge hole.
#[must_use]
pub fn open_box(n: u32) -> MeshSnapshot {
    let closed = quad_box(n);
    let mut faces = closed.faces().to_vec();
    faces.pop();
    let vertices = (0..closed.vertex_count())
        .map(|v| closed.position(v as u32).to_array())
        .collect();
    MeshSnapshot::new(vertices, faces)
}

/// Closed prism over a regular polygon: `sides` quads plus two n-gon caps.
#[must_use]
pub fn prism(sides: u32) -> MeshSnapshot {
    let sides = sides.max(3);
    let mut vertices = Vec::with_capacity(2 * sides as usize);
    for z in [0.0, 1.0] {
        for i in 0..sides {
            let angle = TAU * f64::from(i) / f64::from(sides);
            vertices.push([angle.cos(), angle.sin(), z]);
        }
    }

    let mut faces: Vec<Vec<u32>> = (0..sides)
        .map(|i| {
            let next = (i + 1) % sides;
            vec![i, next, next + sides, i + sides]
        })
        .collect();
    faces.push((0..sides).rev().collect());
    faces.push((sides..2 * sides).collect());

    MeshSnapshot::new(vertices, faces)
}

/// Open disc of `n` triangles around one centre vertex of valence `n`.
#[must_use]
pub fn triangle_fan(n: u32) -> MeshSnapshot {
    let n = n.max(3);
    let mut vertices = vec![[0.0, 0.0, 0.0]];
    for i in 0..n {
        let angle = TAU * f64::from(i) / f64::from(n);
        vertices.push([angle.cos(), angle.sin(), 0.0]);
    }
    let faces = (0..n).map(|i| vec![0, i + 1, (i + 1) % n + 1]).collect();
    MeshSnapshot::new(vertices, faces)
}

/// A `length` x 1 quad next to a `length` x 1 pentagon sharing its long edge.
///
/// The pentagon carries a collinear midpoint on its top edge; only the quad is
/// eligible for shape checks.
#[must_use]
pub fn sliver_strip(length: f64) -> MeshSnapshot {
    MeshSnapshot::new(
        vec![
            [0.0, 0.0, 0.0],
            [length, 0.0, 0.0],
            [length, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [length, 2.0, 0.0],
            [length * 0.5, 2.0, 0.0],
            [0.0, 2.0, 0.0],
        ],
        vec![vec![0, 1, 2, 3], vec![3, 2, 4, 5, 6]],
    )
}

/// [`tetrahedron`] plus one face that repeats a vertex.
#[must_use]
pub fn degenerate_face() -> MeshSnapshot {
    let base = tetrahedron();
    let mut faces = base.faces().to_vec();
    faces.push(vec![0, 1, 1, 2]);
    let vertices = (0..base.vertex_count())
        .map(|v| base.position(v as u32).to_array())
        .collect();
    MeshSnapshot::new(vertices, faces)
}

/// Closed quad torus, `rings` around the tube and `segments` around the axis.
#[must_use]
pub fn torus(segments: u32, rings: u32) -> MeshSnapshot {
    let (vertices, faces) = torus_parts(segments.max(3), rings.max(3));
    MeshSnapshot::new(vertices, faces)
}

/// [`torus`] where the first `ngon_rings` rings are turned into pentagons.
///
/// Neighbouring faces in each ring are paired and their shared edge gets a
/// midpoint, so every face in those rings gains exactly one vertex. The mesh
/// stays closed. `segments` is rounded up to an even number.
#[must_use]
pub fn ngon_torus(segments: u32, rings: u32, ngon_rings: u32) -> MeshSnapshot {
    let segments = (segments.max(4) + 1) & !1;
    let rings = rings.max(3);
    let (mut vertices, mut faces) = torus_parts(segments, rings);

    for ring in 0..ngon_rings.min(rings) {
        for pair in 0..segments / 2 {
            // Edge between face (ring, 2p) and face (ring, 2p + 1).
            let column = 2 * pair + 1;
            let a = ring * segments + column;
            let b = ((ring + 1) % rings) * segments + column;
            split_edge(&mut vertices, &mut faces, a, b);
        }
    }

    MeshSnapshot::new(vertices, faces)
}

fn torus_parts(segments: u32, rings: u32) -> (Vec<[f64; 3]>, Vec<Vec<u32>>) {
    const MAJOR: f64 = 3.0;
    const MINOR: f64 = 1.0;

    let mut vertices = Vec::with_capacity((segments * rings) as usize);
    for ring in 0..rings {
        let phi = TAU * f64::from(ring) / f64::from(rings);
        let radius = MAJOR + MINOR * phi.cos();
        for segment in 0..segments {
            let theta = TAU * f64::from(segment) / f64::from(segments);
            vertices.push([radius * theta.cos(), radius * theta.sin(), MINOR * phi.sin()]);
        }
    }

    let index = |ring: u32, segment: u32| (ring % rings) * segments + segment % segments;
    let mut faces = Vec::with_capacity((segments * rings) as usize);
    for ring in 0..rings {
        for segment in 0..segments {
            faces.push(vec![
                index(ring, segment),
                index(ring, segment + 1),
                index(ring + 1, segment + 1),
                index(ring + 1, segment),
            ]);
        }
    }

    (vertices, faces)
}

/// Inserts the midpoint of `a`-`b` into every face loop that walks that edge.
fn split_edge(vertices: &mut Vec<[f64; 3]>, faces: &mut [Vec<u32>], a: u32, b: u32) {
    let (pa, pb) = (vertices[a as usize], vertices[b as usize]);
    let mid = vertices.len() as u32;
    vertices.push([
        (pa[0] + pb[0]) * 0.5,
        (pa[1] + pb[1]) * 0.5,
        (pa[2] + pb[2]) * 0.5,
    ]);

    let target = EdgeKey::new(a, b);
    for face in faces.iter_mut() {
        let len = face.len();
        if let Some(at) = (0..len).find(|&k| EdgeKey::new(face[k], face[(k + 1) % len]) == target) {
            face.insert(at + 1, mid);
        }
    }
}

/// Welded vertex lattice on the surface of a subdivided unit cube.
struct Lattice {
    n: u32,
    lookup: HashMap<[u32; 3], u32>,
    vertices: Vec<[f64; 3]>,
}

impl Lattice {
    fn new(n: u32) -> Self {
        Self {
            n,
            lookup: HashMap::new(),
            vertices: Vec::new(),
        }
    }

    fn vertex(&mut self, cell: [u32; 3]) -> u32 {
        if let Some(&index) = self.lookup.get(&cell) {
            return index;
        }
        let index = self.vertices.len() as u32;
        let scale = f64::from(self.n);
        self.vertices.push(cell.map(|c| f64::from(c) / scale));
        self.lookup.insert(cell, index);
        index
    }
}

/// Lattice cell for in-plane coordinates `(u, v)` on the side `axis = side`.
/// `(u, v)` is right-handed around the outward `+axis` normal.
fn on_side(axis: usize, side: u32, u: u32, v: u32) -> [u32; 3] {
    match axis {
        0 => [side, u, v],
        1 => [v, side, u],
        _ => [u, v, side],
    }
}
