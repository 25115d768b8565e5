use super::Point3;

/// Reasons a mesh snapshot is rejected before any detector runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedMesh {
    #[error("mesh has no faces")]
    NoFaces,
    #[error("face {face} references vertex {vertex}, but the mesh only has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        vertex: u32,
        vertex_count: usize,
    },
    #[error("vertex {vertex} has non-finite coordinates (NaN/Inf)")]
    NonFiniteVertex { vertex: usize },
    #[error("position buffer length {len} is not a multiple of 3")]
    PositionBufferLength { len: usize },
    #[error("face sizes add up to {expected} indices, but {actual} were supplied")]
    FaceBufferMismatch { expected: usize, actual: usize },
}

/// Read-only view of a polygon mesh, taken once per analysis.
///
/// Faces are ordered vertex loops into `vertices`. The snapshot is owned by a
/// single analysis pass and never mutated, so detectors can share it freely.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshSnapshot {
    vertices: Vec<[f64; 3]>,
    faces: Vec<Vec<u32>>,
}

impl MeshSnapshot {
    #[must_use]
    pub fn new(vertices: Vec<[f64; 3]>, faces: Vec<Vec<u32>>) -> Self {
        Self { vertices, faces }
    }

    /// Builds a snapshot from packed buffers: `[x0, y0, z0, x1, ...]` positions,
    /// one loop length per face, and the concatenated face loops.
    ///
    /// This is the layout JS hosts hand over, so the buffers are checked for
    /// consistency here; index ranges are still checked by [`validate`](Self::validate).
    pub fn from_flat(
        positions: &[f64],
        face_sizes: &[u32],
        indices: &[u32],
    ) -> Result<Self, MalformedMesh> {
        if positions.len() % 3 != 0 {
            return Err(MalformedMesh::PositionBufferLength {
                len: positions.len(),
            });
        }

        let mismatch = |expected| MalformedMesh::FaceBufferMismatch {
            expected,
            actual: indices.len(),
        };

        // A sum past `usize::MAX` (32-bit hosts) is reported as `usize::MAX`.
        let expected = face_sizes
            .iter()
            .try_fold(0usize, |acc, &n| acc.checked_add(n as usize))
            .unwrap_or(usize::MAX);
        if expected != indices.len() {
            return Err(mismatch(expected));
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();

        let mut faces = Vec::with_capacity(face_sizes.len());
        let mut offset = 0usize;
        for &size in face_sizes {
            let face = offset
                .checked_add(size as usize)
                .and_then(|end| indices.get(offset..end))
                .ok_or_else(|| mismatch(expected))?;
            faces.push(face.to_vec());
            offset += face.len();
        }

        Ok(Self { vertices, faces })
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    #[must_use]
    pub fn face(&self, index: usize) -> Option<&[u32]> {
        self.faces.get(index).map(Vec::as_slice)
    }

    /// Position of a vertex. Callers index only after [`validate`](Self::validate).
    #[must_use]
    pub fn position(&self, vertex: u32) -> Point3 {
        Point3::from_array(self.vertices[vertex as usize])
    }

    /// Sum of all face loop lengths; adjacency construction is linear in this.
    #[must_use]
    pub fn total_loop_length(&self) -> usize {
        self.faces.iter().map(Vec::len).sum()
    }

    pub fn validate(&self) -> Result<(), MalformedMesh> {
        if self.faces.is_empty() {
            return Err(MalformedMesh::NoFaces);
        }

        if let Some(vertex) = self
            .vertices
            .iter()
            .position(|p| !Point3::from_array(*p).is_finite())
        {
            return Err(MalformedMesh::NonFiniteVertex { vertex });
        }

        let vertex_count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&vertex) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MalformedMesh::IndexOutOfRange {
                    face,
                    vertex,
                    vertex_count,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> MeshSnapshot {
        MeshSnapshot::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn validate_accepts_simple_quad() {
        let mesh = unit_quad();
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.total_loop_length(), 4);
        assert_eq!(mesh.position(2), Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn validate_rejects_empty_and_out_of_range() {
        let empty = MeshSnapshot::new(vec![[0.0, 0.0, 0.0]], Vec::new());
        assert_eq!(empty.validate(), Err(MalformedMesh::NoFaces));

        let bad = MeshSnapshot::new(vec![[0.0, 0.0, 0.0]; 3], vec![vec![0, 1, 7]]);
        assert_eq!(
            bad.validate(),
            Err(MalformedMesh::IndexOutOfRange {
                face: 0,
                vertex: 7,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn validate_rejects_nan_positions() {
        let mesh = MeshSnapshot::new(
            vec![[0.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![vec![0, 1, 2]],
        );
        assert_eq!(
            mesh.validate(),
            Err(MalformedMesh::NonFiniteVertex { vertex: 1 })
        );
    }

    #[test]
    fn from_flat_splits_face_loops() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0];
        let mesh = MeshSnapshot::from_flat(&positions, &[3, 3], &[0, 1, 2, 0, 2, 3]).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.face(1), Some(&[0u32, 2, 3][..]));
    }

    #[test]
    fn from_flat_rejects_inconsistent_buffers() {
        assert_eq!(
            MeshSnapshot::from_flat(&[0.0, 1.0], &[], &[]),
            Err(MalformedMesh::PositionBufferLength { len: 2 })
        );
        assert_eq!(
            MeshSnapshot::from_flat(&[0.0; 9], &[4], &[0, 1, 2]),
            Err(MalformedMesh::FaceBufferMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn from_flat_rejects_oversized_face_sizes_without_panicking() {
        let result = MeshSnapshot::from_flat(&[0.0; 9], &[u32::MAX, u32::MAX, 3], &[0, 1, 2]);
        assert!(matches!(
            result,
            Err(MalformedMesh::FaceBufferMismatch { actual: 3, .. })
        ));
    }
}
