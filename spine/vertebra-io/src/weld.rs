//! Vertex welding.
//!
//! STL stores every facet with its own three corners. Region growing and
//! curvature both need shared vertices, so corners closer than a tolerance
//! are merged through a spatial hash before the mesh is built.

use hashbrown::HashMap;
use nalgebra::Point3;

/// Welded positions and faces.
#[derive(Debug, Clone, Default)]
pub(crate) struct Welded {
    pub positions: Vec<Point3<f64>>,
    pub faces: Vec<[u32; 3]>,
    /// Faces dropped because two corners merged.
    pub collapsed: usize,
}

type Cell = (i64, i64, i64);

#[allow(clippy::cast_possible_truncation)]
fn cell_of(p: &Point3<f64>, cell_size: f64) -> Cell {
    (
        (p.x / cell_size).floor() as i64,
        (p.y / cell_size).floor() as i64,
        (p.z / cell_size).floor() as i64,
    )
}

/// Merge corners within `epsilon` of an earlier corner and re-index faces.
///
/// With `epsilon == 0` only bit-identical positions merge. Faces whose
/// corners collapse onto fewer than three distinct vertices are dropped.
pub(crate) fn weld(triangles: &[[Point3<f64>; 3]], epsilon: f64) -> Welded {
    let mut out = Welded::default();
    let mut exact: HashMap<[u64; 3], u32> = HashMap::new();
    let mut grid: HashMap<Cell, Vec<u32>> = HashMap::new();
    let cell_size = epsilon * 2.0;

    let mut index_of = |p: Point3<f64>, positions: &mut Vec<Point3<f64>>| -> u32 {
        let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
        if let Some(&id) = exact.get(&key) {
            return id;
        }

        let cell = (epsilon > 0.0).then(|| cell_of(&p, cell_size));
        if let Some(cell) = cell {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(bucket) = grid.get(&(cell.0 + dx, cell.1 + dy, cell.2 + dz))
                        else {
                            continue;
                        };
                        if let Some(&id) = bucket
                            .iter()
                            .find(|&&id| (positions[id as usize] - p).norm() < epsilon)
                        {
                            exact.insert(key, id);
                            return id;
                        }
                    }
                }
            }
        }

        let id = u32::try_from(positions.len()).unwrap_or(u32::MAX);
        positions.push(p);
        exact.insert(key, id);
        if let Some(cell) = cell {
            grid.entry(cell).or_default().push(id);
        }
        id
    };

    for tri in triangles {
        let face = tri.map(|p| index_of(p, &mut out.positions));
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            out.collapsed += 1;
        } else {
            out.faces.push(face);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn shared_corners_merge() {
        let soup = [
            [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)],
            [p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
        ];
        let welded = weld(&soup, 1e-6);
        assert_eq!(welded.positions.len(), 4);
        assert_eq!(welded.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(welded.collapsed, 0);
    }

    #[test]
    fn near_corners_merge_within_tolerance() {
        let soup = [
            [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)],
            [p(1e-7, 0.0, 0.0), p(1.0, 1.0, 1e-7), p(0.0, 1.0, 0.0)],
        ];
        assert_eq!(weld(&soup, 1e-6).positions.len(), 4);
        assert_eq!(weld(&soup, 0.0).positions.len(), 6);
    }

    #[test]
    fn collapsed_faces_are_dropped() {
        let soup = [
            [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
            [p(0.0, 0.0, 0.0), p(0.0, 0.0, 1e-9), p(0.0, 1.0, 0.0)],
        ];
        let welded = weld(&soup, 1e-6);
        assert_eq!(welded.faces.len(), 1);
        assert_eq!(welded.collapsed, 1);
    }

    #[test]
    fn cell_boundaries_do_not_block_merging() {
        // straddle a grid cell boundary at x = 2e-6
        let soup = [
            [p(1.9e-6, 5.0, 5.0), p(9.0, 0.0, 0.0), p(0.0, 9.0, 0.0)],
            [p(2.1e-6, 5.0, 5.0), p(9.0, 9.0, 0.0), p(0.0, 0.0, 9.0)],
        ];
        assert_eq!(weld(&soup, 1e-6).positions.len(), 5);
    }
}
