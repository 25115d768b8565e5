//! Whole-mesh topology statistics.
//!
//! Collected alongside the defect registry for display. Statistics are
//! informational only: they never add defects and never change the score.
//! High-valence poles in particular are counted here rather than reported,
//! because a pole is a placement hint, not a production defect.

use std::fmt;

use serde::Serialize;

use crate::geom::{AdjacencyGraph, MeshSnapshot};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TopologyStats {
    /// Vertices in the snapshot, referenced or not.
    pub vertex_count: usize,

    /// Faces in the snapshot, degenerate ones included.
    pub face_count: usize,

    /// Non-degenerate faces with three vertices.
    pub triangle_count: usize,

    /// Non-degenerate faces with four vertices.
    pub quad_count: usize,

    /// Non-degenerate faces with five or more vertices.
    pub ngon_count: usize,

    /// Faces with repeated or missing vertices.
    pub degenerate_face_count: usize,

    /// Distinct undirected edges.
    pub edge_count: usize,

    /// Edges with exactly one incident face.
    ///
    /// A watertight mesh has zero boundary edges.
    pub boundary_edge_count: usize,

    /// Edges with three or more incident faces.
    pub non_manifold_edge_count: usize,

    /// Vertices with more incident edges than the configured pole valence.
    pub pole_count: usize,

    /// Edge-connected face islands.
    pub shell_count: usize,
}

impl TopologyStats {
    #[must_use]
    pub fn collect(mesh: &MeshSnapshot, adjacency: &AdjacencyGraph, pole_valence: u32) -> Self {
        let mut stats = Self {
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            edge_count: adjacency.edge_count(),
            boundary_edge_count: adjacency.boundary_edges().count(),
            non_manifold_edge_count: adjacency.non_manifold_edges().count(),
            pole_count: adjacency.pole_count(pole_valence),
            shell_count: adjacency.shell_count(),
            ..Self::default()
        };

        for face in adjacency.face_geometry() {
            match (face.degenerate, face.loop_len) {
                (true, _) => stats.degenerate_face_count += 1,
                (false, 3) => stats.triangle_count += 1,
                (false, 4) => stats.quad_count += 1,
                (false, _) => stats.ngon_count += 1,
            }
        }

        stats
    }

    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.boundary_edge_count == 0
    }

    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    /// Short one-line form for logs: `"V:8 F:6 [issues...]"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("V:{} F:{}", self.vertex_count, self.face_count)];

        if self.ngon_count > 0 {
            parts.push(format!("ngons:{}", self.ngon_count));
        }
        if self.degenerate_face_count > 0 {
            parts.push(format!("degenerate:{}", self.degenerate_face_count));
        }
        if self.boundary_edge_count > 0 {
            parts.push(format!("open:{}", self.boundary_edge_count));
        }
        if self.non_manifold_edge_count > 0 {
            parts.push(format!("non-manifold:{}", self.non_manifold_edge_count));
        }
        if self.pole_count > 0 {
            parts.push(format!("poles:{}", self.pole_count));
        }
        if self.shell_count > 1 {
            parts.push(format!("shells:{}", self.shell_count));
        }

        parts.join(" ")
    }
}

impl fmt::Display for TopologyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Topology:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(
            f,
            "  Faces: {} (tris {}, quads {}, n-gons {})",
            self.face_count, self.triangle_count, self.quad_count, self.ngon_count
        )?;
        writeln!(f, "  Edges: {}", self.edge_count)?;

        if self.degenerate_face_count > 0 {
            writeln!(f, "  Degenerate faces: {}", self.degenerate_face_count)?;
        }
        if self.boundary_edge_count > 0 {
            writeln!(f, "  Open edges: {}", self.boundary_edge_count)?;
        }
        if self.non_manifold_edge_count > 0 {
            writeln!(f, "  Non-manifold edges: {}", self.non_manifold_edge_count)?;
        }
        if self.pole_count > 0 {
            writeln!(f, "  High-valence poles: {}", self.pole_count)?;
        }
        writeln!(f, "  Shells: {}", self.shell_count)?;

        let status = match (self.is_watertight(), self.is_manifold()) {
            (true, true) => "CLOSED MANIFOLD",
            (false, true) => "OPEN",
            _ => "NON-MANIFOLD",
        };
        writeln!(f, "  Status: {status}")
    }
}
