//! Connectivity between cells, faces and vertices, derived from the
//! grid parameters by linear-ID arithmetic.
//!
//! Every query recomputes its result from scratch; there is no stored
//! adjacency state. Where a neighbor can be absent (at the domain
//! boundary) the slot is an explicit `Option`, never a sentinel ID.

use fixedbitset as fb;
use nalgebra_sparse as nas;

use itertools::izip;

use super::{FaceBand, UniformGrid3d};

/// The one or two cells adjacent to a face.
///
/// The slots are assigned by the face's linear-index arithmetic, not by
/// physical direction: for an interior face, `first` is the lower-index
/// cell and `second` the higher-index cell along the face's normal axis.
/// On the boundary the sole existing neighbor occupies `first` and
/// `second` is `None`, whichever side of the domain the face is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceCells {
    /// The neighbor slot that is valid for every face.
    pub first: usize,
    /// The second neighbor slot; `None` exactly on exterior faces.
    pub second: Option<usize>,
}

impl UniformGrid3d {
    /// The neighboring cells of every face, indexed by face ID.
    pub fn face_cells(&self) -> Vec<FaceCells> {
        let [nx, ny, _] = self.counts();
        let mut cells = Vec::with_capacity(self.face_count());
        for band in FaceBand::ALL {
            let lattice = self.band_lattice(band);
            let axis = band.normal_axis();
            let stride = self.cell_stride(axis);
            let high = lattice.n[axis] - 1;
            for id in 0..lattice.len() {
                let c = lattice.decode(id);
                // the band lattice reinterpreted against the cell lattice
                // gives the neighbor on the face's positive side;
                // the negative side is one cell stride below
                let positive = c[0] + nx * (c[1] + ny * c[2]);
                cells.push(if c[axis] == 0 {
                    FaceCells {
                        first: positive,
                        second: None,
                    }
                } else if c[axis] == high {
                    FaceCells {
                        first: positive - stride,
                        second: None,
                    }
                } else {
                    FaceCells {
                        first: positive - stride,
                        second: Some(positive),
                    }
                });
            }
        }
        cells
    }

    /// The two neighboring cells of every face with absent slots filled in
    /// from the opposite slot, for callers that need dense arrays without
    /// branching on missingness.
    pub fn adjacent_cells(&self) -> (Vec<usize>, Vec<usize>) {
        let face_cells = self.face_cells();
        let first = face_cells.iter().map(|fc| fc.first).collect();
        let second = face_cells
            .iter()
            .map(|fc| fc.second.unwrap_or(fc.first))
            .collect();
        (first, second)
    }

    /// The up-to-six neighbors of every cell, in direction order
    /// `[-X, +X, -Y, +Y, -Z, +Z]`; a slot is `None` where the cell lies
    /// on the corresponding domain boundary.
    pub fn cell_neighbors(&self) -> Vec<[Option<usize>; 6]> {
        let [nx, ny, nz] = self.counts();
        let (sx, sy, sz) = (self.cell_stride(0), self.cell_stride(1), self.cell_stride(2));
        (0..self.cell_count())
            .map(|base| {
                let [i, j, k] = self.cell_coords(base);
                [
                    (i > 0).then(|| base - sx),
                    (i + 1 < nx).then(|| base + sx),
                    (j > 0).then(|| base - sy),
                    (j + 1 < ny).then(|| base + sy),
                    (k > 0).then(|| base - sz),
                    (k + 1 < nz).then(|| base + sz),
                ]
            })
            .collect()
    }

    /// Like [`cell_neighbors`][Self::cell_neighbors], but with every absent
    /// slot replaced by the cell's own ID.
    pub fn cell_neighbors_filled(&self) -> Vec<[usize; 6]> {
        self.cell_neighbors()
            .into_iter()
            .enumerate()
            .map(|(base, neighbors)| neighbors.map(|n| n.unwrap_or(base)))
            .collect()
    }

    /// The eight corner vertices of every cell.
    ///
    /// The corner order is fixed: for the cell at `(i, j, k)` the corners
    /// are listed from `(i+1, j+1, k+1)` down to `(i, j, k)`, X index
    /// flipping quickest, then Y, then Z. Downstream consumers rely on
    /// this exact traversal for their hexahedral winding.
    pub fn cell_vertices(&self) -> Vec<[usize; 8]> {
        let vertices = self.vertex_lattice();
        (0..self.cell_count())
            .map(|c| {
                let [i, j, k] = self.cell_coords(c);
                [
                    vertices.encode([i + 1, j + 1, k + 1]),
                    vertices.encode([i, j + 1, k + 1]),
                    vertices.encode([i + 1, j, k + 1]),
                    vertices.encode([i, j, k + 1]),
                    vertices.encode([i + 1, j + 1, k]),
                    vertices.encode([i, j + 1, k]),
                    vertices.encode([i + 1, j, k]),
                    vertices.encode([i, j, k]),
                ]
            })
            .collect()
    }

    /// The six faces of every cell, in direction order
    /// `[-X, +X, -Y, +Y, -Z, +Z]`, as global face IDs.
    pub fn cell_faces(&self) -> Vec<[usize; 6]> {
        let xy = self.band_lattice(FaceBand::Xy);
        let xz = self.band_lattice(FaceBand::Xz);
        let yz = self.band_lattice(FaceBand::Yz);
        let xy_off = self.band_offset(FaceBand::Xy);
        let xz_off = self.band_offset(FaceBand::Xz);
        let yz_off = self.band_offset(FaceBand::Yz);
        (0..self.cell_count())
            .map(|c| {
                let [i, j, k] = self.cell_coords(c);
                [
                    yz_off + yz.encode([i, j, k]),
                    yz_off + yz.encode([i + 1, j, k]),
                    xz_off + xz.encode([i, j, k]),
                    xz_off + xz.encode([i, j + 1, k]),
                    xy_off + xy.encode([i, j, k]),
                    xy_off + xy.encode([i, j, k + 1]),
                ]
            })
            .collect()
    }

    /// For each cell, the orientation sign of each of its six faces:
    /// `+1` where the face's normal points out of the cell, `-1` where it
    /// points in. A face's sign is `+1` exactly when its recorded `first`
    /// neighbor is the querying cell.
    pub fn cell_face_orientations(&self) -> Vec<[i8; 6]> {
        let face_cells = self.face_cells();
        self.cell_faces()
            .into_iter()
            .enumerate()
            .map(|(c, faces)| faces.map(|f| if face_cells[f].first == c { 1 } else { -1 }))
            .collect()
    }

    /// The set of faces with exactly one neighboring cell, as a bitset
    /// over face IDs.
    pub fn exterior_faces(&self) -> fb::FixedBitSet {
        let mut set = fb::FixedBitSet::with_capacity(self.face_count());
        self.for_band_layers(|on_boundary, f| {
            if on_boundary {
                set.insert(f);
            }
        });
        set
    }

    /// The set of faces with two neighboring cells, as a bitset over face
    /// IDs. Together with [`exterior_faces`][Self::exterior_faces] this
    /// partitions all faces.
    pub fn interior_faces(&self) -> fb::FixedBitSet {
        let mut set = fb::FixedBitSet::with_capacity(self.face_count());
        self.for_band_layers(|on_boundary, f| {
            if !on_boundary {
                set.insert(f);
            }
        });
        set
    }

    /// Walk all faces band by band, telling the callback whether each face
    /// lies on one of its band's two extreme layers.
    fn for_band_layers(&self, mut visit: impl FnMut(bool, usize)) {
        for band in FaceBand::ALL {
            let lattice = self.band_lattice(band);
            let offset = self.band_offset(band);
            let axis = band.normal_axis();
            let high = lattice.n[axis] - 1;
            for id in 0..lattice.len() {
                let c = lattice.decode(id);
                visit(c[axis] == 0 || c[axis] == high, offset + id);
            }
        }
    }

    /// The signed cell-face incidence as a sparse matrix: rows are cells,
    /// columns are faces, and each of the six entries per row is the
    /// cell's orientation sign for that face.
    ///
    /// This is the operator form of
    /// [`cell_face_orientations`][Self::cell_face_orientations], in the
    /// shape discretization code expects for assembling flux operators.
    pub fn face_cell_incidence(&self) -> nas::CsrMatrix<i8> {
        let mut coo = nas::CooMatrix::new(self.cell_count(), self.face_count());
        for (c, (faces, orientations)) in
            izip!(self.cell_faces(), self.cell_face_orientations()).enumerate()
        {
            for (f, o) in izip!(faces, orientations) {
                coo.push(c, f, o);
            }
        }
        nas::CsrMatrix::from(&coo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tiny_grid;
    use crate::{UniformGrid3d, Vec3};

    fn fc(first: usize, second: Option<usize>) -> FaceCells {
        FaceCells { first, second }
    }

    /// Face neighbors of the 3x2x1 grid, checked against values worked out
    /// by hand for every one of the 29 faces.
    #[test]
    fn tiny_grid_face_cells() {
        let grid = tiny_grid();

        #[rustfmt::skip]
        let expected = vec![
            // XY band, k = 0 layer then k = 1 layer
            fc(0, None), fc(1, None), fc(2, None), fc(3, None), fc(4, None), fc(5, None),
            fc(0, None), fc(1, None), fc(2, None), fc(3, None), fc(4, None), fc(5, None),
            // XZ band, layers j = 0, 1, 2
            fc(0, None), fc(1, None), fc(2, None),
            fc(0, Some(3)), fc(1, Some(4)), fc(2, Some(5)),
            fc(3, None), fc(4, None), fc(5, None),
            // YZ band, rows j = 0 and j = 1, i = 0..=3 within each
            fc(0, None), fc(0, Some(1)), fc(1, Some(2)), fc(2, None),
            fc(3, None), fc(3, Some(4)), fc(4, Some(5)), fc(5, None),
        ];
        assert_eq!(grid.face_cells(), expected);
    }

    #[test]
    fn tiny_grid_adjacent_cells() {
        let grid = tiny_grid();
        let (first, second) = grid.adjacent_cells();
        #[rustfmt::skip]
        assert_eq!(first, vec![
            0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5,
            0, 1, 2, 0, 1, 2, 3, 4, 5,
            0, 0, 1, 2, 3, 3, 4, 5,
        ]);
        #[rustfmt::skip]
        assert_eq!(second, vec![
            0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5,
            0, 1, 2, 3, 4, 5, 3, 4, 5,
            0, 1, 2, 2, 3, 4, 5, 5,
        ]);
    }

    #[test]
    fn tiny_grid_cell_neighbors() {
        let grid = tiny_grid();
        let neighbors = grid.cell_neighbors();

        #[rustfmt::skip]
        let expected: Vec<[Option<usize>; 6]> = vec![
            [None,    Some(1), None,    Some(3), None, None],
            [Some(0), Some(2), None,    Some(4), None, None],
            [Some(1), None,    None,    Some(5), None, None],
            [None,    Some(4), Some(0), None,    None, None],
            [Some(3), Some(5), Some(1), None,    None, None],
            [Some(4), None,    Some(2), None,    None, None],
        ];
        assert_eq!(neighbors, expected);

        #[rustfmt::skip]
        let expected_filled: Vec<[usize; 6]> = vec![
            [0, 1, 0, 3, 0, 0],
            [0, 2, 1, 4, 1, 1],
            [1, 2, 2, 5, 2, 2],
            [3, 4, 0, 3, 3, 3],
            [3, 5, 1, 4, 4, 4],
            [4, 5, 2, 5, 5, 5],
        ];
        assert_eq!(grid.cell_neighbors_filled(), expected_filled);
    }

    /// The corner traversal order must stay fixed; these expectations cover
    /// three grid shapes because index bugs along a single axis can cancel
    /// out when two of the counts coincide.
    #[test]
    fn cell_vertex_corner_order() {
        let cases: [([usize; 3], [usize; 8], Vec<usize>); 3] = [
            (
                [3, 2, 1],
                [17, 16, 13, 12, 5, 4, 1, 0],
                vec![0, 1, 2, 4, 5, 6],
            ),
            (
                [1, 2, 3],
                [9, 8, 7, 6, 3, 2, 1, 0],
                vec![0, 2, 6, 8, 12, 14],
            ),
            (
                [3, 1, 2],
                [13, 12, 9, 8, 5, 4, 1, 0],
                vec![0, 1, 2, 8, 9, 10],
            ),
        ];
        for (counts, cell0, offsets) in cases {
            let grid = UniformGrid3d::new(counts, [0.5, 2.0, 4.0], Vec3::zeros()).unwrap();
            let ids = grid.cell_vertices();
            for (c, offset) in offsets.into_iter().enumerate() {
                assert_eq!(
                    ids[c],
                    cell0.map(|v| v + offset),
                    "corner mismatch for cell {c} of grid {counts:?}"
                );
            }
        }
    }

    #[test]
    fn tiny_grid_cell_faces() {
        let grid = tiny_grid();
        #[rustfmt::skip]
        let expected: Vec<[usize; 6]> = vec![
            [21, 22, 12, 15, 0, 6],
            [22, 23, 13, 16, 1, 7],
            [23, 24, 14, 17, 2, 8],
            [25, 26, 15, 18, 3, 9],
            [26, 27, 16, 19, 4, 10],
            [27, 28, 17, 20, 5, 11],
        ];
        assert_eq!(grid.cell_faces(), expected);
    }

    #[test]
    fn tiny_grid_cell_face_orientations() {
        let grid = tiny_grid();
        #[rustfmt::skip]
        let expected: Vec<[i8; 6]> = vec![
            [ 1, 1,  1, 1, 1, 1],
            [-1, 1,  1, 1, 1, 1],
            [-1, 1,  1, 1, 1, 1],
            [ 1, 1, -1, 1, 1, 1],
            [-1, 1, -1, 1, 1, 1],
            [-1, 1, -1, 1, 1, 1],
        ];
        assert_eq!(grid.cell_face_orientations(), expected);
    }

    #[test]
    fn tiny_grid_face_classification() {
        let grid = tiny_grid();
        let exterior: Vec<usize> = grid.exterior_faces().ones().collect();
        let interior: Vec<usize> = grid.interior_faces().ones().collect();
        assert_eq!(
            exterior,
            vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 18, 19, 20, 21, 24, 25, 28]
        );
        assert_eq!(interior, vec![15, 16, 17, 22, 23, 26, 27]);
    }

    /// Exterior and interior classifications agree with slot presence and
    /// exactly partition the faces for a range of grid shapes.
    #[test]
    fn face_classification_partitions_all_faces() {
        for counts in [[1, 1, 1], [3, 2, 1], [2, 3, 4], [5, 1, 2]] {
            let grid = UniformGrid3d::new(counts, [1.0, 1.0, 1.0], Vec3::zeros()).unwrap();
            let exterior = grid.exterior_faces();
            let interior = grid.interior_faces();
            let face_cells = grid.face_cells();

            for f in 0..grid.face_count() {
                assert_ne!(
                    exterior.contains(f),
                    interior.contains(f),
                    "face {f} of grid {counts:?} must be in exactly one set"
                );
                match face_cells[f].second {
                    None => assert!(exterior.contains(f)),
                    Some(second) => {
                        assert!(interior.contains(f));
                        assert_ne!(face_cells[f].first, second);
                    }
                }
            }
        }
    }

    #[test]
    fn incidence_matrix_matches_orientations() {
        let grid = tiny_grid();
        let incidence = grid.face_cell_incidence();
        assert_eq!(incidence.nrows(), grid.cell_count());
        assert_eq!(incidence.ncols(), grid.face_count());
        assert_eq!(incidence.nnz(), 6 * grid.cell_count());

        let faces = grid.cell_faces();
        let orientations = grid.cell_face_orientations();
        for (c, row) in incidence.row_iter().enumerate() {
            for (f, o) in izip!(&faces[c], &orientations[c]) {
                let pos = row
                    .col_indices()
                    .iter()
                    .position(|col| col == f)
                    .expect("every cell face must appear in its incidence row");
                assert_eq!(row.values()[pos], *o);
            }
        }
    }
}
