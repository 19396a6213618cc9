//! Vertex-to-vertex adjacency and open-boundary detection.

use hashbrown::HashMap;

/// Vertex neighbourhoods of a triangle mesh.
///
/// Two vertices are neighbours when they share a face. Each neighbour list
/// is sorted and free of duplicates and self references.
#[derive(Debug, Clone, Default)]
pub struct VertexAdjacency {
    neighbors: Vec<Vec<u32>>,
    boundary: Vec<bool>,
    edge_count: usize,
}

impl VertexAdjacency {
    /// Build adjacency for `vertex_count` vertices from triangle faces.
    ///
    /// Face indices must already be validated against `vertex_count`.
    /// Collapsed edges (both endpoints equal) are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use vertebra_types::VertexAdjacency;
    ///
    /// let adjacency = VertexAdjacency::build(4, &[[0, 1, 2], [1, 3, 2]]);
    /// assert_eq!(adjacency.neighbors(1), &[0, 2, 3]);
    /// assert_eq!(adjacency.edge_count(), 5);
    /// ```
    #[must_use]
    pub fn build(vertex_count: usize, faces: &[[u32; 3]]) -> Self {
        let mut edge_faces: HashMap<(u32, u32), u32> = HashMap::new();

        for face in faces {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                if a == b {
                    continue;
                }
                *edge_faces.entry(normalize_edge(a, b)).or_insert(0) += 1;
            }
        }

        let mut neighbors: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        let mut boundary = vec![false; vertex_count];

        for (&(a, b), &face_count) in &edge_faces {
            if a as usize >= vertex_count || b as usize >= vertex_count {
                continue;
            }
            neighbors[a as usize].push(b);
            neighbors[b as usize].push(a);
            if face_count == 1 {
                boundary[a as usize] = true;
                boundary[b as usize] = true;
            }
        }

        for list in &mut neighbors {
            list.sort_unstable();
        }

        Self {
            neighbors,
            boundary,
            edge_count: edge_faces.len(),
        }
    }

    /// Neighbours of vertex `v`; empty for unknown vertices.
    #[must_use]
    pub fn neighbors(&self, v: u32) -> &[u32] {
        self.neighbors.get(v as usize).map_or(&[], Vec::as_slice)
    }

    /// Whether `v` lies on an edge used by exactly one face.
    #[must_use]
    pub fn is_boundary(&self, v: u32) -> bool {
        self.boundary.get(v as usize).copied().unwrap_or(false)
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of vertices covered by this adjacency.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }
}

#[inline]
fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_edge_is_interior() {
        let adjacency = VertexAdjacency::build(4, &[[0, 1, 2], [1, 3, 2]]);

        assert_eq!(adjacency.neighbors(0), &[1, 2]);
        assert_eq!(adjacency.neighbors(2), &[0, 1, 3]);
        // every vertex of an open quad touches a boundary edge
        assert!((0..4).all(|v| adjacency.is_boundary(v)));
    }

    #[test]
    fn closed_tetrahedron_has_no_boundary() {
        let faces = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        let adjacency = VertexAdjacency::build(4, &faces);

        assert_eq!(adjacency.edge_count(), 6);
        assert!((0..4).all(|v| !adjacency.is_boundary(v)));
        assert!((0..4).all(|v| adjacency.neighbors(v).len() == 3));
    }

    #[test]
    fn collapsed_edges_are_ignored() {
        let adjacency = VertexAdjacency::build(3, &[[0, 0, 1]]);
        assert_eq!(adjacency.neighbors(0), &[1]);
        assert!(adjacency.neighbors(2).is_empty());
    }

    #[test]
    fn isolated_and_unknown_vertices() {
        let adjacency = VertexAdjacency::build(5, &[[0, 1, 2]]);
        assert!(adjacency.neighbors(4).is_empty());
        assert!(adjacency.neighbors(99).is_empty());
        assert!(!adjacency.is_boundary(99));
        assert_eq!(adjacency.vertex_count(), 5);
    }
}
