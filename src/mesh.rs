//! The uniform axis-aligned grid mesh and its query surface.

/// Linear-ID arithmetic shared by all of the mesh's ID spaces.
mod indexing;
pub use indexing::FaceBand;
pub(crate) use indexing::Lattice;

/// Face-to-cell, cell-to-cell and cell-to-vertex connectivity.
mod topology;
pub use topology::FaceCells;

/// Closed-form vertex/face/cell geometry.
mod geometry;

/// Point-to-cell lookup.
mod locator;

/// Materialized generic-mesh tables for interoperability.
mod generic;
pub use generic::GenericMesh;

use crate::Vec3;

/// Error in constructing a uniform grid.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum GridError {
    /// A cell count of zero along some axis.
    #[error("cell count along the {axis} axis must be at least 1")]
    ZeroCellCount {
        /// The axis with the offending count (`'x'`, `'y'` or `'z'`).
        axis: char,
    },
    /// A spacing that is not a positive finite number.
    #[error("spacing along the {axis} axis must be positive and finite, got {value}")]
    NonPositiveSpacing {
        /// The axis with the offending spacing (`'x'`, `'y'` or `'z'`).
        axis: char,
        /// The offending value.
        value: f64,
    },
}

/// A 3D rectangular-prism mesh with uniform grid spacing along each axis.
///
/// # Numbering
///
/// Vertices and cells are numbered with the X lattice index varying
/// quickest, then Y, then Z. Faces are numbered in three contiguous bands:
/// XY faces (normal along Z) first, then XZ faces (normal along Y), then
/// YZ faces (normal along X); within each band the same X-quickest rule
/// applies on the band's own lattice. See [`FaceBand`].
///
/// The grid parameters are immutable; every query derives its result from
/// them on the fly and returns a fresh container, so repeated calls with
/// the same grid are bit-identical.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformGrid3d {
    nx: usize,
    ny: usize,
    nz: usize,
    dx: f64,
    dy: f64,
    dz: f64,
    origin: Vec3,
}

impl UniformGrid3d {
    /// Construct a grid from cell counts, spacings and an origin
    /// (the position of vertex 0).
    ///
    /// Fails if any count is zero or any spacing is not a positive finite
    /// number; counts and spacings are never silently clamped.
    pub fn new(
        counts: [usize; 3],
        spacings: [f64; 3],
        origin: Vec3,
    ) -> Result<Self, GridError> {
        for (&n, axis) in counts.iter().zip(['x', 'y', 'z']) {
            if n == 0 {
                return Err(GridError::ZeroCellCount { axis });
            }
        }
        for (&d, axis) in spacings.iter().zip(['x', 'y', 'z']) {
            if !(d > 0.0 && d.is_finite()) {
                return Err(GridError::NonPositiveSpacing { axis, value: d });
            }
        }
        let [nx, ny, nz] = counts;
        let [dx, dy, dz] = spacings;
        Ok(Self {
            nx,
            ny,
            nz,
            dx,
            dy,
            dz,
            origin,
        })
    }

    //
    // parameters and counts
    //

    /// Cell counts along the three axes.
    #[inline]
    pub fn counts(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Grid spacings along the three axes.
    #[inline]
    pub fn spacings(&self) -> [f64; 3] {
        [self.dx, self.dy, self.dz]
    }

    /// The position of vertex 0.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Total number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_lattice().len()
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_lattice().len()
    }

    /// Number of faces in one band.
    #[inline]
    pub fn face_count_in(&self, band: FaceBand) -> usize {
        self.band_lattice(band).len()
    }

    /// Total number of faces across all three bands.
    #[inline]
    pub fn face_count(&self) -> usize {
        FaceBand::ALL
            .into_iter()
            .map(|band| self.face_count_in(band))
            .sum()
    }

    //
    // internal lattices
    //

    pub(crate) fn vertex_lattice(&self) -> Lattice {
        Lattice::new([self.nx + 1, self.ny + 1, self.nz + 1])
    }

    pub(crate) fn cell_lattice(&self) -> Lattice {
        Lattice::new([self.nx, self.ny, self.nz])
    }

    pub(crate) fn band_lattice(&self, band: FaceBand) -> Lattice {
        match band {
            FaceBand::Xy => Lattice::new([self.nx, self.ny, self.nz + 1]),
            FaceBand::Xz => Lattice::new([self.nx, self.ny + 1, self.nz]),
            FaceBand::Yz => Lattice::new([self.nx + 1, self.ny, self.nz]),
        }
    }

    /// First face ID of the given band.
    pub(crate) fn band_offset(&self, band: FaceBand) -> usize {
        match band {
            FaceBand::Xy => 0,
            FaceBand::Xz => self.face_count_in(FaceBand::Xy),
            FaceBand::Yz => {
                self.face_count_in(FaceBand::Xy) + self.face_count_in(FaceBand::Xz)
            }
        }
    }

    /// Linear-ID distance between two cells adjacent along the given axis.
    pub(crate) fn cell_stride(&self, axis: usize) -> usize {
        [1, self.nx, self.nx * self.ny][axis]
    }

    //
    // ID space mappings
    //

    /// Linear ID of the vertex at lattice coordinates `(i, j, k)`,
    /// `i ∈ [0, nx]`, `j ∈ [0, ny]`, `k ∈ [0, nz]`.
    #[inline]
    pub fn vertex_index(&self, coords: [usize; 3]) -> usize {
        self.vertex_lattice().encode(coords)
    }

    /// Lattice coordinates of the given vertex ID.
    #[inline]
    pub fn vertex_coords(&self, v: usize) -> [usize; 3] {
        self.vertex_lattice().decode(v)
    }

    /// Linear ID of the cell at lattice coordinates `(i, j, k)`,
    /// each coordinate in `[0, count − 1]`.
    #[inline]
    pub fn cell_index(&self, coords: [usize; 3]) -> usize {
        self.cell_lattice().encode(coords)
    }

    /// Lattice coordinates of the given cell ID.
    #[inline]
    pub fn cell_coords(&self, c: usize) -> [usize; 3] {
        self.cell_lattice().decode(c)
    }

    /// Global linear ID of the face at the given in-band lattice coordinates.
    #[inline]
    pub fn face_index(&self, band: FaceBand, coords: [usize; 3]) -> usize {
        self.band_offset(band) + self.band_lattice(band).encode(coords)
    }

    /// Band and in-band lattice coordinates of the given global face ID.
    pub fn face_coords(&self, f: usize) -> (FaceBand, [usize; 3]) {
        let nxy = self.face_count_in(FaceBand::Xy);
        let nxz = self.face_count_in(FaceBand::Xz);
        assert!(
            f < self.face_count(),
            "face ID {f} out of range for a grid with {} faces",
            self.face_count()
        );
        if f < nxy {
            (FaceBand::Xy, self.band_lattice(FaceBand::Xy).decode(f))
        } else if f < nxy + nxz {
            (FaceBand::Xz, self.band_lattice(FaceBand::Xz).decode(f - nxy))
        } else {
            (
                FaceBand::Yz,
                self.band_lattice(FaceBand::Yz).decode(f - nxy - nxz),
            )
        }
    }

    //
    // derived meshes
    //

    /// A new grid moved by the given offset. Counts, spacings and all IDs
    /// are unchanged; every position is shifted by exactly `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            origin: self.origin + offset,
            ..self.clone()
        }
    }

    /// A new grid scaled uniformly about the coordinate origin:
    /// spacings and origin are multiplied by `factor`, counts and IDs
    /// are unchanged.
    ///
    /// A non-positive or non-finite factor is a construction error.
    pub fn scaled(&self, factor: f64) -> Result<Self, GridError> {
        Self::new(
            self.counts(),
            [self.dx * factor, self.dy * factor, self.dz * factor],
            self.origin * factor,
        )
    }
}

/// A small test grid matching a well-studied 3x2x1 configuration.
/// Used by tests in several modules; hidden from docs.
#[doc(hidden)]
pub fn tiny_grid() -> UniformGrid3d {
    UniformGrid3d::new([3, 2, 1], [0.5, 2.0, 4.0], Vec3::zeros())
        .expect("tiny grid parameters are valid")
}
