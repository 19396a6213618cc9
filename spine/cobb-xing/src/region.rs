//! Normal-similarity region growing.
//!
//! Starting from a seed vertex, the region spreads over the vertex adjacency
//! graph to every neighbour whose unit normal lies within a distance
//! threshold of the seed's normal. The comparison is always against the
//! seed, not the vertex the neighbour was reached from, so the region cannot
//! drift around a curved surface.

use std::collections::VecDeque;

use hashbrown::HashSet;
use nalgebra::Vector3;
use tracing::debug;
use vertebra_types::SurfaceMesh;

use crate::error::{CobbError, CobbResult};
use crate::params::GrowParams;

/// Connected set of vertices grown from a seed.
///
/// Always contains its seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    seed: u32,
    vertices: HashSet<u32>,
}

impl Region {
    /// The vertex growth started from.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Number of vertices, at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Never true for a grown region.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether `id` belongs to the region.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.vertices.contains(&id)
    }

    /// Region vertices in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertices.iter().copied()
    }

    /// Region vertices in ascending order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.vertices.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Grow a region from `seed` over vertices with normals similar to the
/// seed's.
///
/// A neighbour is admitted iff `‖n_neighbour − n_seed‖ < normal_threshold`.
/// Processing order does not affect the result.
///
/// # Errors
///
/// - [`CobbError::InvalidParameter`] if the threshold is not finite and
///   positive, or `seed` is not a vertex of `mesh`
///
/// # Example
///
/// ```
/// use cobb_xing::{grow_region, GrowParams};
/// use vertebra_types::VertebraMesh;
///
/// // Two coplanar triangles sharing an edge
/// let mesh = VertebraMesh::from_raw(
///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
///     &[0, 1, 2, 0, 2, 3],
/// )
/// .unwrap();
///
/// let region = grow_region(&mesh, 0, &GrowParams::default()).unwrap();
/// assert_eq!(region.sorted_ids(), vec![0, 1, 2, 3]);
/// ```
pub fn grow_region<M: SurfaceMesh + ?Sized>(
    mesh: &M,
    seed: u32,
    params: &GrowParams,
) -> CobbResult<Region> {
    params.validate()?;

    let seed_normal = mesh.vertex_normal(seed).ok_or_else(|| {
        CobbError::invalid_parameter(format!(
            "seed vertex {seed} is out of range (mesh has {} vertices)",
            mesh.vertex_count()
        ))
    })?;

    let mut vertices: HashSet<u32> = HashSet::new();
    let mut visited: HashSet<u32> = HashSet::new();
    let mut queue: VecDeque<u32> = VecDeque::new();

    vertices.insert(seed);
    visited.insert(seed);
    queue.push_back(seed);

    while let Some(current) = queue.pop_front() {
        for &neighbor in mesh.adjacent_vertices(current) {
            if !visited.insert(neighbor) {
                continue;
            }
            if admits(mesh.vertex_normal(neighbor), &seed_normal, params.normal_threshold) {
                vertices.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    debug!(seed, vertices = vertices.len(), "Grew normal region");

    Ok(Region { seed, vertices })
}

#[inline]
fn admits(normal: Option<Vector3<f64>>, seed_normal: &Vector3<f64>, threshold: f64) -> bool {
    normal.is_some_and(|n| (n - seed_normal).norm() < threshold)
}
