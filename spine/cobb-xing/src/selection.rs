//! One endplate pick.

use vertebra_curvature::CandidateSet;
use vertebra_types::SurfaceMesh;

use crate::error::{CobbError, CobbResult};

/// A mesh, a seed vertex on it, and the candidate vertices a plane may be
/// fitted to.
///
/// The seed and candidate set are checked against the mesh at construction;
/// a `Selection` cannot be changed afterwards.
///
/// # Example
///
/// ```
/// use cobb_xing::Selection;
/// use vertebra_curvature::CandidateSet;
/// use vertebra_types::VertebraMesh;
///
/// let mesh = VertebraMesh::from_raw(
///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     &[0, 1, 2],
/// )
/// .unwrap();
/// let candidates = CandidateSet::from_ids(3, [0, 1, 2]).unwrap();
///
/// let selection = Selection::new(&mesh, 1, &candidates).unwrap();
/// assert_eq!(selection.seed(), 1);
/// assert!(Selection::new(&mesh, 3, &candidates).is_err());
/// ```
#[derive(Debug)]
pub struct Selection<'a, M: ?Sized> {
    mesh: &'a M,
    seed: u32,
    candidates: &'a CandidateSet,
}

impl<M: ?Sized> Clone for Selection<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for Selection<'_, M> {}

impl<'a, M: SurfaceMesh + ?Sized> Selection<'a, M> {
    /// Bundle a pick.
    ///
    /// # Errors
    ///
    /// Returns [`CobbError::InvalidParameter`] if `seed` is not a vertex of
    /// `mesh` or the candidate set was built for a mesh with a different
    /// vertex count.
    pub fn new(mesh: &'a M, seed: u32, candidates: &'a CandidateSet) -> CobbResult<Self> {
        if !mesh.contains_vertex(seed) {
            return Err(CobbError::invalid_parameter(format!(
                "seed vertex {seed} is out of range (mesh has {} vertices)",
                mesh.vertex_count()
            )));
        }
        if candidates.vertex_count() != mesh.vertex_count() {
            return Err(CobbError::invalid_parameter(format!(
                "candidate set covers {} vertices but mesh has {}",
                candidates.vertex_count(),
                mesh.vertex_count()
            )));
        }

        Ok(Self {
            mesh,
            seed,
            candidates,
        })
    }

    /// The picked mesh.
    #[must_use]
    pub const fn mesh(&self) -> &'a M {
        self.mesh
    }

    /// The seed vertex.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Vertices eligible for the plane fit.
    #[must_use]
    pub const fn candidates(&self) -> &'a CandidateSet {
        self.candidates
    }
}
