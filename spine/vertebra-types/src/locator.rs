//! Nearest-vertex queries.
//!
//! Picking front ends report a 3-D position; the measurement works on vertex
//! ids. [`VertexLocator`] bridges the two with a KD-tree over either every
//! vertex of a mesh or a chosen subset of ids.
//!
//! The tree is bulk-built once and never mutated, so any number of vertices
//! may share a coordinate on one axis (flat endplates are fully coplanar).

use std::fmt;

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use nalgebra::Point3;

use crate::traits::SurfaceMesh;

/// Result of a nearest-vertex query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestVertex {
    /// Id of the closest vertex.
    pub id: u32,
    /// Euclidean distance from the query position.
    pub distance: f64,
}

/// KD-tree over a set of mesh vertices.
///
/// # Example
///
/// ```
/// use vertebra_types::{Point3, VertebraMesh, VertexLocator};
///
/// let mesh = VertebraMesh::from_raw(
///     &[0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 10.0, 0.0],
///     &[0, 1, 2],
/// )
/// .unwrap();
///
/// let locator = VertexLocator::build(&mesh);
/// let hit = locator.nearest(&Point3::new(9.0, 1.0, 0.0)).unwrap();
/// assert_eq!(hit.id, 1);
/// ```
pub struct VertexLocator {
    /// `None` when no vertex is indexed.
    tree: Option<ImmutableKdTree<f64, 3>>,
    /// Vertex id of each tree item, by item index.
    ids: Vec<u32>,
}

impl VertexLocator {
    /// Index every vertex of `mesh`.
    #[must_use]
    pub fn build<M: SurfaceMesh + ?Sized>(mesh: &M) -> Self {
        let count = u32::try_from(mesh.vertex_count()).unwrap_or(u32::MAX);
        Self::from_ids(mesh, 0..count)
    }

    /// Index only the vertices in `ids`. Ids the mesh does not contain are
    /// skipped.
    #[must_use]
    pub fn from_ids<M: SurfaceMesh + ?Sized>(mesh: &M, ids: impl IntoIterator<Item = u32>) -> Self {
        let mut points: Vec<[f64; 3]> = Vec::new();
        let mut kept = Vec::new();

        for id in ids {
            if let Some(p) = mesh.position(id) {
                points.push([p.x, p.y, p.z]);
                kept.push(id);
            }
        }

        let tree = (!points.is_empty()).then(|| ImmutableKdTree::new_from_slice(&points));

        Self { tree, ids: kept }
    }

    /// Number of indexed vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no vertex is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The indexed vertex closest to `position`, or `None` if the locator is
    /// empty.
    #[must_use]
    pub fn nearest(&self, position: &Point3<f64>) -> Option<NearestVertex> {
        let tree = self.tree.as_ref()?;
        let hit = tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y, position.z]);
        let index = usize::try_from(hit.item).ok()?;

        Some(NearestVertex {
            id: *self.ids.get(index)?,
            distance: hit.distance.sqrt(),
        })
    }
}

impl fmt::Debug for VertexLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexLocator").field("len", &self.len()).finish()
    }
}
