mod adjacency;
mod core;
mod mesh;
mod metrics;

pub use adjacency::{
    AdjacencyGraph, EdgeKey, FaceGeometry, quad_shape_ratio, triangle_shape_ratio,
};
pub use core::{BBox, Point3, Vec3};
pub use mesh::{MalformedMesh, MeshSnapshot};
pub use metrics::{AnalysisMetrics, AnalysisTimingReport, TimingBucket};
