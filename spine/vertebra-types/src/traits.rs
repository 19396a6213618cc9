//! Query interface the measurement algorithms need from a surface mesh.

use nalgebra::{Point3, Vector3};

/// Read-only surface queries consumed by curvature classification,
/// region growing and plane fitting.
///
/// Vertex ids are dense in `0..vertex_count()`. Implementations must be
/// immutable for the duration of a measurement; none of the methods take
/// `&mut self`.
pub trait SurfaceMesh {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Position of vertex `id`, or `None` if out of range.
    fn position(&self, id: u32) -> Option<Point3<f64>>;

    /// Unit vertex normal of `id`, or `None` if out of range.
    ///
    /// Vertices without incident area report a zero vector.
    fn vertex_normal(&self, id: u32) -> Option<Vector3<f64>>;

    /// Vertices sharing a face with `id`, excluding `id` itself.
    ///
    /// Out-of-range ids yield an empty slice.
    fn adjacent_vertices(&self, id: u32) -> &[u32];

    /// Triangle faces as vertex id triples.
    fn faces(&self) -> &[[u32; 3]];

    /// Whether `id` lies on an open boundary of the surface.
    ///
    /// Out-of-range ids are not boundary vertices.
    fn is_boundary_vertex(&self, id: u32) -> bool;

    /// Whether `id` addresses a vertex of this mesh.
    fn contains_vertex(&self, id: u32) -> bool {
        (id as usize) < self.vertex_count()
    }
}
