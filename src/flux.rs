//! Face-to-cell summation of a per-face quantity, the canonical consumer
//! of the mesh's adjacency surface.

use nalgebra as na;

use itertools::izip;

use crate::field::{Cells, Faces, Field};
use crate::UniformGrid3d;

/// Sum a per-face quantity into each cell with the cell's outward
/// orientation signs, normalized by cell volume.
///
/// When the face values are outward fluxes through each face (in the
/// face's own normal direction), the result is the discrete divergence of
/// that flux over each control volume. One dense pass over the cell-face
/// table; no special casing of boundary cells is needed because every
/// boundary face appears in exactly one cell's row.
pub fn face_sum(mesh: &UniformGrid3d, face_values: &Field<Faces>) -> Field<Cells> {
    let cell_faces = mesh.cell_faces();
    let orientations = mesh.cell_face_orientations();
    let volume = mesh.cell_volume();

    let values = na::DVector::from_iterator(
        mesh.cell_count(),
        izip!(&cell_faces, &orientations).map(|(faces, signs)| {
            izip!(faces, signs)
                .map(|(&f, &sign)| sign as f64 * face_values[f])
                .sum::<f64>()
                / volume
        }),
    );
    Field::from_values(values)
}
