//! Materialization of the grid into explicit unstructured-mesh tables.
//!
//! Concatenation and other logic written against a general mesh
//! representation cannot exploit the closed-form structure of a uniform
//! grid; this module deliberately pays the cost of writing everything out.

use super::{FaceBand, UniformGrid3d};
use crate::Vec3;

/// The fully materialized tables of a mesh: explicit vertex positions,
/// quadrilateral faces as vertex quadruples and cells as face sextuples.
///
/// Structurally compatible with non-uniform mesh code; everything in here
/// could be recomputed from the grid at any time, so the struct is a plain
/// data carrier with public fields.
#[derive(Clone, Debug, PartialEq)]
pub struct GenericMesh {
    /// Position of every vertex, indexed by vertex ID.
    pub vertex_positions: Vec<Vec3>,
    /// The four corner vertices of every face, indexed by face ID.
    pub face_vertices: Vec<[usize; 4]>,
    /// The six faces of every cell in direction order
    /// `[-X, +X, -Y, +Y, -Z, +Z]`, indexed by cell ID.
    pub cell_faces: Vec<[usize; 6]>,
}

impl UniformGrid3d {
    /// The four corner vertices of every face.
    ///
    /// Corners are wound counter-clockwise when viewed against the band's
    /// positive normal axis, starting from the face's lowest-index corner.
    pub fn face_vertices(&self) -> Vec<[usize; 4]> {
        let vertices = self.vertex_lattice();
        let mut faces = Vec::with_capacity(self.face_count());
        for band in FaceBand::ALL {
            let lattice = self.band_lattice(band);
            for id in 0..lattice.len() {
                let [i, j, k] = lattice.decode(id);
                faces.push(match band {
                    FaceBand::Xy => [
                        vertices.encode([i, j, k]),
                        vertices.encode([i + 1, j, k]),
                        vertices.encode([i + 1, j + 1, k]),
                        vertices.encode([i, j + 1, k]),
                    ],
                    FaceBand::Xz => [
                        vertices.encode([i, j, k]),
                        vertices.encode([i + 1, j, k]),
                        vertices.encode([i + 1, j, k + 1]),
                        vertices.encode([i, j, k + 1]),
                    ],
                    FaceBand::Yz => [
                        vertices.encode([i, j, k]),
                        vertices.encode([i, j + 1, k]),
                        vertices.encode([i, j + 1, k + 1]),
                        vertices.encode([i, j, k + 1]),
                    ],
                });
            }
        }
        faces
    }

    /// Materialize the grid into explicit unstructured-mesh tables, the
    /// slow fallback for interoperating with code that only understands
    /// the generic representation.
    pub fn to_generic(&self) -> GenericMesh {
        GenericMesh {
            vertex_positions: self.vertex_positions(),
            face_vertices: self.face_vertices(),
            cell_faces: self.cell_faces(),
        }
    }
}
