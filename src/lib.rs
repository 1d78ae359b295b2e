//! Geometric and topological core of a structured-grid finite-volume mesh,
//! intended as the mesh layer under a PDE solver.
//!
//! The central type is [`UniformGrid3d`], an axis-aligned 3D grid with
//! uniform spacing along each axis. Every quantity a finite-volume
//! discretization needs — vertex positions, face areas/normals/centers,
//! cell volumes/centers, face-to-cell and cell-to-cell adjacency and
//! distances, exterior/interior face classification — is derived on demand
//! from the grid parameters in closed form.
//!
//! ```
//! use orthogrid::{UniformGrid3d, Vec3};
//!
//! let grid = UniformGrid3d::new([3, 2, 1], [0.5, 2.0, 4.0], Vec3::zeros())?;
//! assert_eq!(grid.cell_count(), 6);
//! assert_eq!(grid.face_count(), 29);
//!
//! // every boundary face has exactly one neighboring cell
//! let face_cells = grid.face_cells();
//! for f in grid.exterior_faces().ones() {
//!     assert!(face_cells[f].second.is_none());
//! }
//! # Ok::<(), orthogrid::GridError>(())
//! ```
//!
//! Values attached to mesh entities live in [`Field`]s, dense containers
//! indexed by the mesh's linear IDs. Where an adjacency slot can be absent
//! (a boundary face's second cell, a boundary cell's missing neighbor),
//! the result carries an explicit `Option` rather than a sentinel ID.

#![warn(missing_docs)]

pub mod mesh;
#[doc(inline)]
pub use mesh::{FaceBand, FaceCells, GenericMesh, GridError, UniformGrid3d};

pub mod field;
#[doc(inline)]
pub use field::{Cells, Faces, Field, MeshLocation, Vertices};

pub mod flux;
#[doc(inline)]
pub use flux::face_sum;

// nalgebra re-exports of common types for convenience

pub use nalgebra as na;
/// Type alias for a 3D `nalgebra` vector.
pub type Vec3 = na::Vector3<f64>;
/// Type alias for a 3D `nalgebra` unit vector.
pub type UnitVec3 = na::Unit<Vec3>;
