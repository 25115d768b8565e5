use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{BBox, EdgeKey};

/// User-facing defect bucket. Declaration order is the registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Hole,
    NGon,
    Sliver,
}

impl Category {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hole => "Holes (Non-Manifold)",
            Self::NGon => "N-Gons",
            Self::Sliver => "Slivers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// What the viewport should frame first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeometryRef {
    Face { index: usize },
    Edge { edge: EdgeKey },
}

impl fmt::Display for GeometryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Face { index } => write!(f, "face #{index}"),
            Self::Edge { edge } => write!(f, "edge {}-{}", edge.a, edge.b),
        }
    }
}

/// Precise reason a defect was raised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefectKind {
    /// Loop longer than the n-gon threshold.
    NGon { sides: usize },
    /// Edge with a single incident face.
    BoundaryEdge,
    /// Edge shared by three or more faces.
    NonManifoldEdge { valence: usize },
    /// Repeated vertex, or fewer than three distinct vertices.
    DegenerateFace,
    /// Computed area is exactly zero.
    ZeroArea,
    /// Area far below the mesh median.
    NearZeroArea { area: f64, median: f64 },
    /// Shape ratio above the sliver threshold.
    Elongated { ratio: f64 },
}

impl DefectKind {
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::NGon { .. } => Category::NGon,
            Self::BoundaryEdge | Self::NonManifoldEdge { .. } => Category::Hole,
            Self::DegenerateFace
            | Self::ZeroArea
            | Self::NearZeroArea { .. }
            | Self::Elongated { .. } => Category::Sliver,
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::NGon { .. } | Self::Elongated { .. } => Severity::Warning,
            Self::BoundaryEdge
            | Self::NonManifoldEdge { .. }
            | Self::DegenerateFace
            | Self::ZeroArea
            | Self::NearZeroArea { .. } => Severity::Error,
        }
    }

    #[must_use]
    pub fn describe(self, primary: GeometryRef) -> String {
        match self {
            Self::NGon { sides } => format!("N-gon: {primary} has {sides} sides"),
            Self::BoundaryEdge => format!("Hole boundary: {primary} has only one face"),
            Self::NonManifoldEdge { valence } => {
                format!("Non-manifold junction: {primary} is shared by {valence} faces")
            }
            Self::DegenerateFace => {
                format!("Degenerate face: {primary} has repeated or missing vertices")
            }
            Self::ZeroArea => format!("Zero-area sliver: {primary} has no area"),
            Self::NearZeroArea { area, median } => format!(
                "Near-zero-area sliver: {primary} area {area:.3e} vs median {median:.3e}"
            ),
            Self::Elongated { ratio } => {
                format!("Thin sliver: {primary} has shape ratio {ratio:.1}")
            }
        }
    }
}

/// Registry-scoped identity of a defect.
///
/// `generation` changes with every analysis run, so ids kept by a UI from an
/// earlier run never resolve against a rebuilt registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DefectId {
    pub generation: u32,
    pub ordinal: u32,
}

impl fmt::Display for DefectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.generation, self.ordinal)
    }
}

/// Detector output before the registry assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub kind: DefectKind,
    pub primary: GeometryRef,
    pub region: BBox,
    /// Faces touching the defect (incident faces for edges).
    pub faces: Vec<usize>,
}

impl Finding {
    #[must_use]
    pub fn face(index: usize, kind: DefectKind, region: BBox) -> Self {
        Self {
            kind,
            primary: GeometryRef::Face { index },
            region,
            faces: vec![index],
        }
    }

    #[must_use]
    pub fn edge(edge: EdgeKey, kind: DefectKind, region: BBox, faces: &[usize]) -> Self {
        Self {
            kind,
            primary: GeometryRef::Edge { edge },
            region,
            faces: faces.to_vec(),
        }
    }

    /// Registry order: category rank, then primary geometry.
    #[must_use]
    pub fn sort_key(&self) -> (Category, GeometryRef) {
        (self.kind.category(), self.primary)
    }
}

/// An immutable, identified defect.
#[derive(Debug, Clone, PartialEq)]
pub struct Defect {
    pub id: DefectId,
    pub category: Category,
    pub severity: Severity,
    pub kind: DefectKind,
    pub primary: GeometryRef,
    pub region: BBox,
    pub faces: Vec<usize>,
    pub description: String,
}

impl Defect {
    #[must_use]
    pub fn from_finding(id: DefectId, finding: Finding) -> Self {
        let Finding {
            kind,
            primary,
            region,
            faces,
        } = finding;
        Self {
            id,
            category: kind.category(),
            severity: kind.severity(),
            kind,
            primary,
            region,
            faces,
            description: kind.describe(primary),
        }
    }

    /// Everything except the id; equal across re-analysis of an unchanged mesh.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.primary == other.primary
            && self.region == other.region
            && self.faces == other.faces
            && self.description == other.description
    }
}
