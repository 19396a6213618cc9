//! Candidate vertex selection.
//!
//! A [`CandidateSet`] holds the ids of every vertex whose surface class
//! matches a target class. It is unordered; downstream code only intersects
//! with it. An empty set is a valid result meaning no vertex qualified.

use hashbrown::HashSet;
use tracing::debug;

use crate::classify::{classify_field, SurfaceClass};
use crate::error::{CurvatureError, CurvatureResult};
use crate::field::CurvatureField;
use crate::params::CandidateParams;

/// Set of vertex ids, each below the vertex count of the mesh it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    ids: HashSet<u32>,
    vertex_count: usize,
}

impl CandidateSet {
    /// An empty set for a mesh with `vertex_count` vertices.
    #[must_use]
    pub fn empty(vertex_count: usize) -> Self {
        Self {
            ids: HashSet::new(),
            vertex_count,
        }
    }

    /// Build a set from externally chosen ids.
    ///
    /// Duplicates are merged.
    ///
    /// # Errors
    ///
    /// Returns [`CurvatureError::VertexOutOfRange`] for the first id that is
    /// not below `vertex_count`.
    ///
    /// # Example
    ///
    /// ```
    /// use vertebra_curvature::CandidateSet;
    ///
    /// let set = CandidateSet::from_ids(10, [1, 4, 4, 9]).unwrap();
    /// assert_eq!(set.len(), 3);
    /// assert!(CandidateSet::from_ids(10, [10]).is_err());
    /// ```
    pub fn from_ids(
        vertex_count: usize,
        ids: impl IntoIterator<Item = u32>,
    ) -> CurvatureResult<Self> {
        let mut set = HashSet::new();
        for id in ids {
            if id as usize >= vertex_count {
                return Err(CurvatureError::VertexOutOfRange { id, vertex_count });
            }
            set.insert(id);
        }
        Ok(Self {
            ids: set,
            vertex_count,
        })
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no vertex qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `id` is a candidate.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Candidate ids in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }

    /// Candidate ids in ascending order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Keep only the ids for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(u32) -> bool) {
        self.ids.retain(|&id| keep(id));
    }

    /// Vertex count of the mesh the ids refer to.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

/// Ids of every vertex whose class equals `target`.
///
/// `classes` is indexed by vertex id, as produced by
/// [`classify_field`](crate::classify_field).
#[must_use]
pub fn select_candidates(classes: &[SurfaceClass], target: SurfaceClass) -> CandidateSet {
    let ids = classes
        .iter()
        .enumerate()
        .filter(|(_, &class)| class == target)
        .filter_map(|(v, _)| u32::try_from(v).ok())
        .collect();

    CandidateSet {
        ids,
        vertex_count: classes.len(),
    }
}

/// Classify a curvature field and select the vertices matching the target.
///
/// Vertices the field marks unestimated are dropped unless
/// [`CandidateParams::include_unestimated`] is set.
///
/// # Errors
///
/// Returns [`CurvatureError::InvalidEpsilon`] if the parameters fail
/// validation.
///
/// # Example
///
/// ```
/// use vertebra_curvature::{find_candidates, CandidateParams, CurvatureField};
///
/// let field = CurvatureField::from_parts(
///     vec![0.0, 0.5, 0.001],
///     vec![0.0, 0.2, -0.002],
/// )
/// .unwrap();
///
/// let flat = find_candidates(&field, &CandidateParams::default()).unwrap();
/// assert_eq!(flat.sorted_ids(), vec![0, 2]);
/// ```
pub fn find_candidates(
    field: &CurvatureField,
    params: &CandidateParams,
) -> CurvatureResult<CandidateSet> {
    params.validate()?;

    let classes = classify_field(field, params.epsilon)?;
    let mut candidates = select_candidates(&classes, params.target);

    let matched = candidates.len();
    if !params.include_unestimated {
        candidates.retain(|id| field.is_estimated(id));
    }

    debug!(
        vertices = field.len(),
        candidates = candidates.len(),
        unestimated_dropped = matched - candidates.len(),
        target = %params.target,
        epsilon = params.epsilon,
        "Selected candidate vertices"
    );

    Ok(candidates)
}
