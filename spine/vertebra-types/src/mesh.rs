//! Immutable vertebra surface mesh.

use nalgebra::{Point3, Vector3};

use crate::adjacency::VertexAdjacency;
use crate::error::{MeshError, MeshResult};
use crate::traits::SurfaceMesh;

/// Below this length an accumulated normal is treated as undefined.
const NORMAL_EPSILON: f64 = 1e-12;

/// A triangulated vertebra surface.
///
/// Vertex positions and faces are fixed at construction. Adjacency, boundary
/// flags and area-weighted vertex normals are derived once and shared by
/// every query.
///
/// # Winding Order
///
/// Faces are expected to use counter-clockwise winding viewed from outside,
/// so vertex normals point out of the bone.
///
/// # Example
///
/// ```
/// use vertebra_types::{Point3, SurfaceMesh, VertebraMesh};
///
/// let mesh = VertebraMesh::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// )
/// .unwrap();
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.adjacent_vertices(0), &[1, 2]);
/// assert!((mesh.vertex_normal(0).unwrap().z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct VertebraMesh {
    positions: Vec<Point3<f64>>,
    faces: Vec<[u32; 3]>,
    normals: Vec<Vector3<f64>>,
    adjacency: VertexAdjacency,
}

impl VertebraMesh {
    /// Build a mesh from vertex positions and triangle faces.
    ///
    /// # Errors
    ///
    /// - [`MeshError::EmptyMesh`] if there are no vertices or no faces
    /// - [`MeshError::TooManyVertices`] if ids would not fit in `u32`
    /// - [`MeshError::InvalidFaceIndex`] if a face references a missing vertex
    pub fn new(positions: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> MeshResult<Self> {
        if positions.is_empty() || faces.is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        let vertex_count = positions.len();
        if u32::try_from(vertex_count).is_err() {
            return Err(MeshError::TooManyVertices {
                count: vertex_count,
            });
        }

        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::InvalidFaceIndex {
                    face: face_index,
                    index,
                    vertex_count,
                });
            }
        }

        let adjacency = VertexAdjacency::build(vertex_count, &faces);
        let normals = compute_vertex_normals(&positions, &faces);

        Ok(Self {
            positions,
            faces,
            normals,
            adjacency,
        })
    }

    /// Build a mesh from flat coordinate and index buffers.
    ///
    /// `positions` is `[x0, y0, z0, x1, ...]`, `indices` is
    /// `[a0, b0, c0, a1, ...]`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MalformedBuffer`] if either buffer length is not a
    /// multiple of three, otherwise the same errors as [`VertebraMesh::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use vertebra_types::{SurfaceMesh, VertebraMesh};
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mesh = VertebraMesh::from_raw(&positions, &[0, 1, 2]).unwrap();
    /// assert_eq!(mesh.vertex_count(), 3);
    /// ```
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> MeshResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::MalformedBuffer {
                buffer: "position",
                len: positions.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::MalformedBuffer {
                buffer: "index",
                len: indices.len(),
            });
        }

        let points = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Self::new(points, faces)
    }

    /// Vertex positions indexed by vertex id.
    #[must_use]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Triangle faces as vertex id triples.
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Unit vertex normals indexed by vertex id.
    #[must_use]
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The vertex adjacency derived at construction.
    #[must_use]
    pub const fn adjacency(&self) -> &VertexAdjacency {
        &self.adjacency
    }

    /// Whether vertex `id` lies on an open boundary of the surface.
    #[must_use]
    pub fn is_boundary_vertex(&self, id: u32) -> bool {
        self.adjacency.is_boundary(id)
    }

    /// Mean of all vertex positions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .positions
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / self.positions.len() as f64)
    }

    /// A copy of this mesh moved by `offset`.
    ///
    /// Topology and normals are unaffected by translation and are reused.
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            positions: self.positions.iter().map(|p| p + offset).collect(),
            faces: self.faces.clone(),
            normals: self.normals.clone(),
            adjacency: self.adjacency.clone(),
        }
    }
}

impl SurfaceMesh for VertebraMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn position(&self, id: u32) -> Option<Point3<f64>> {
        self.positions.get(id as usize).copied()
    }

    #[inline]
    fn vertex_normal(&self, id: u32) -> Option<Vector3<f64>> {
        self.normals.get(id as usize).copied()
    }

    #[inline]
    fn adjacent_vertices(&self, id: u32) -> &[u32] {
        self.adjacency.neighbors(id)
    }

    #[inline]
    fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    #[inline]
    fn is_boundary_vertex(&self, id: u32) -> bool {
        self.adjacency.is_boundary(id)
    }
}

/// Area-weighted vertex normals.
///
/// Each face adds its unnormalized cross product, whose length is twice the
/// face area, to its three corners.
fn compute_vertex_normals(positions: &[Point3<f64>], faces: &[[u32; 3]]) -> Vec<Vector3<f64>> {
    let mut accumulated = vec![Vector3::zeros(); positions.len()];

    for &[i0, i1, i2] in faces {
        let p0 = positions[i0 as usize];
        let p1 = positions[i1 as usize];
        let p2 = positions[i2 as usize];
        let weighted = (p1 - p0).cross(&(p2 - p0));

        accumulated[i0 as usize] += weighted;
        accumulated[i1 as usize] += weighted;
        accumulated[i2 as usize] += weighted;
    }

    accumulated
        .into_iter()
        .map(|n| {
            let len = n.norm();
            if len > NORMAL_EPSILON {
                n / len
            } else {
                Vector3::zeros()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Closed unit cube, outward-facing.
    fn cube() -> VertebraMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        VertebraMesh::new(positions, faces).unwrap()
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            VertebraMesh::new(Vec::new(), Vec::new()),
            Err(MeshError::EmptyMesh)
        ));
        assert!(matches!(
            VertebraMesh::new(vec![Point3::origin()], Vec::new()),
            Err(MeshError::EmptyMesh)
        ));
    }

    #[test]
    fn rejects_out_of_range_face() {
        let result = VertebraMesh::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2], [0, 1, 7]],
        );
        match result {
            Err(MeshError::InvalidFaceIndex {
                face,
                index,
                vertex_count,
            }) => {
                assert_eq!(face, 1);
                assert_eq!(index, 7);
                assert_eq!(vertex_count, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_raw_buffers() {
        assert!(matches!(
            VertebraMesh::from_raw(&[0.0, 1.0], &[0, 1, 2]),
            Err(MeshError::MalformedBuffer { buffer: "position", .. })
        ));
        assert!(matches!(
            VertebraMesh::from_raw(&[0.0; 9], &[0, 1]),
            Err(MeshError::MalformedBuffer { buffer: "index", .. })
        ));
    }

    #[test]
    fn cube_corner_normals_point_outward() {
        let mesh = cube();
        let expected = Vector3::new(1.0, 1.0, 1.0).normalize();
        let corner = mesh.vertex_normal(6).unwrap();

        // corner 6 sits at (1,1,1): its normal leans into the positive octant
        assert!(corner.dot(&expected) > 0.9);
        assert_relative_eq!(corner.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cube_is_closed() {
        let mesh = cube();
        assert!((0..8).all(|v| !mesh.is_boundary_vertex(v)));
        assert_eq!(mesh.adjacency().edge_count(), 18);
    }

    #[test]
    fn out_of_range_queries() {
        let mesh = cube();
        assert!(mesh.position(8).is_none());
        assert!(mesh.vertex_normal(8).is_none());
        assert!(mesh.adjacent_vertices(8).is_empty());
        assert!(!mesh.contains_vertex(8));
        assert!(mesh.contains_vertex(7));
    }

    #[test]
    fn translation_moves_positions_only() {
        let mesh = cube();
        let offset = Vector3::new(10.0, -4.0, 2.5);
        let moved = mesh.translated(offset);

        assert_relative_eq!(
            moved.centroid().coords,
            mesh.centroid().coords + offset,
            epsilon = 1e-12
        );
        assert_eq!(moved.normals(), mesh.normals());
        assert_eq!(moved.adjacent_vertices(0), mesh.adjacent_vertices(0));
    }

    #[test]
    fn isolated_vertex_has_zero_normal() {
        let mesh = VertebraMesh::new(
            vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(5.0, 5.0, 5.0),
            ],
            vec![[0, 1, 2]],
        )
        .unwrap();

        assert_eq!(mesh.vertex_normal(3), Some(Vector3::zeros()));
        assert!(mesh.adjacent_vertices(3).is_empty());
    }
}
