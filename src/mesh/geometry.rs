//! Closed-form geometry of the grid: positions, areas, volumes, normals
//! and the distance quantities a finite-volume discretization consumes.
//!
//! Every formula is a direct function of the lattice coordinates, the
//! spacings and the origin; bulk queries are a single pass over the
//! elements with no cross-element dependency.

use nalgebra as na;

use super::{FaceBand, UniformGrid3d};
use crate::field::{Cells, Faces, Field};
use crate::Vec3;

fn axis_unit(axis: usize, sign: f64) -> Vec3 {
    let mut v = Vec3::zeros();
    v[axis] = sign;
    v
}

impl UniformGrid3d {
    //
    // vertices
    //

    /// Position of the given vertex.
    pub fn vertex_position(&self, v: usize) -> Vec3 {
        let [i, j, k] = self.vertex_coords(v);
        let [dx, dy, dz] = self.spacings();
        self.origin() + Vec3::new(i as f64 * dx, j as f64 * dy, k as f64 * dz)
    }

    /// Positions of all vertices, indexed by vertex ID.
    pub fn vertex_positions(&self) -> Vec<Vec3> {
        (0..self.vertex_count())
            .map(|v| self.vertex_position(v))
            .collect()
    }

    //
    // cells
    //

    /// Volume of a cell; uniform across the grid.
    #[inline]
    pub fn cell_volume(&self) -> f64 {
        let [dx, dy, dz] = self.spacings();
        dx * dy * dz
    }

    /// The volume of every cell as a field.
    pub fn cell_volumes(&self) -> Field<Cells> {
        Field::from_values(na::DVector::from_element(
            self.cell_count(),
            self.cell_volume(),
        ))
    }

    /// Center of the given cell.
    pub fn cell_center(&self, c: usize) -> Vec3 {
        let [i, j, k] = self.cell_coords(c);
        let [dx, dy, dz] = self.spacings();
        self.origin()
            + Vec3::new(
                (i as f64 + 0.5) * dx,
                (j as f64 + 0.5) * dy,
                (k as f64 + 0.5) * dz,
            )
    }

    /// Centers of all cells, indexed by cell ID.
    pub fn cell_centers(&self) -> Vec<Vec3> {
        (0..self.cell_count()).map(|c| self.cell_center(c)).collect()
    }

    /// For each of a cell's six faces (direction order
    /// `[-X, +X, -Y, +Y, -Z, +Z]`), the distance from the cell's center to
    /// the neighboring cell's center, or to the face itself where the
    /// neighbor is absent. Uniform across cells except at the boundary,
    /// where the value halves.
    pub fn cell_to_cell_distances(&self) -> Vec<[f64; 6]> {
        let [nx, ny, nz] = self.counts();
        let [dx, dy, dz] = self.spacings();
        (0..self.cell_count())
            .map(|c| {
                let [i, j, k] = self.cell_coords(c);
                [
                    if i == 0 { dx / 2.0 } else { dx },
                    if i == nx - 1 { dx / 2.0 } else { dx },
                    if j == 0 { dy / 2.0 } else { dy },
                    if j == ny - 1 { dy / 2.0 } else { dy },
                    if k == 0 { dz / 2.0 } else { dz },
                    if k == nz - 1 { dz / 2.0 } else { dz },
                ]
            })
            .collect()
    }

    /// The outward unit normal of each of a cell's six faces, in direction
    /// order `[-X, +X, -Y, +Y, -Z, +Z]`. The same for every cell.
    pub fn cell_face_normals(&self) -> [Vec3; 6] {
        [
            axis_unit(0, -1.0),
            axis_unit(0, 1.0),
            axis_unit(1, -1.0),
            axis_unit(1, 1.0),
            axis_unit(2, -1.0),
            axis_unit(2, 1.0),
        ]
    }

    /// The outward area-weighted normal of each of a cell's six faces,
    /// in direction order. The same for every cell; the six vectors of a
    /// closed cell surface sum to zero.
    pub fn cell_area_projections(&self) -> [Vec3; 6] {
        let [dx, dy, dz] = self.spacings();
        let areas = [
            dy * dz,
            dy * dz,
            dx * dz,
            dx * dz,
            dx * dy,
            dx * dy,
        ];
        let mut projections = self.cell_face_normals();
        for (p, a) in projections.iter_mut().zip(areas) {
            *p *= a;
        }
        projections
    }

    //
    // faces
    //

    fn band_area(&self, band: FaceBand) -> f64 {
        let [dx, dy, dz] = self.spacings();
        match band {
            FaceBand::Xy => dx * dy,
            FaceBand::Xz => dx * dz,
            FaceBand::Yz => dy * dz,
        }
    }

    fn band_tangents(&self, band: FaceBand) -> (Vec3, Vec3) {
        match band {
            FaceBand::Xy => (axis_unit(0, 1.0), axis_unit(1, 1.0)),
            FaceBand::Xz => (axis_unit(0, 1.0), axis_unit(2, 1.0)),
            FaceBand::Yz => (axis_unit(1, 1.0), axis_unit(2, 1.0)),
        }
    }

    /// Area of the given face; uniform within each band.
    pub fn face_area(&self, f: usize) -> f64 {
        let (band, _) = self.face_coords(f);
        self.band_area(band)
    }

    /// The area of every face as a field.
    pub fn face_areas(&self) -> Field<Faces> {
        let values = na::DVector::from_iterator(
            self.face_count(),
            FaceBand::ALL.into_iter().flat_map(|band| {
                std::iter::repeat(self.band_area(band)).take(self.face_count_in(band))
            }),
        );
        Field::from_values(values)
    }

    /// Unit normal of the given face, pointing along the band's positive
    /// normal axis except on the band's low-boundary layer, where it flips
    /// to point out of the domain.
    pub fn face_normal(&self, f: usize) -> Vec3 {
        let (band, c) = self.face_coords(f);
        let axis = band.normal_axis();
        axis_unit(axis, if c[axis] == 0 { -1.0 } else { 1.0 })
    }

    /// Unit normals of all faces, indexed by face ID.
    pub fn face_normals(&self) -> Vec<Vec3> {
        let mut normals = Vec::with_capacity(self.face_count());
        for band in FaceBand::ALL {
            let lattice = self.band_lattice(band);
            let axis = band.normal_axis();
            for id in 0..lattice.len() {
                let c = lattice.decode(id);
                normals.push(axis_unit(axis, if c[axis] == 0 { -1.0 } else { 1.0 }));
            }
        }
        normals
    }

    /// Center of the given face. In-plane coordinates sit at cell-center
    /// offsets; the normal-axis coordinate lies exactly on its lattice
    /// plane.
    pub fn face_center(&self, f: usize) -> Vec3 {
        let (band, c) = self.face_coords(f);
        let axis = band.normal_axis();
        let spacings = self.spacings();
        let mut p = self.origin();
        for a in 0..3 {
            let offset = if a == axis { 0.0 } else { 0.5 };
            p[a] += (c[a] as f64 + offset) * spacings[a];
        }
        p
    }

    /// Centers of all faces, indexed by face ID.
    pub fn face_centers(&self) -> Vec<Vec3> {
        (0..self.face_count()).map(|f| self.face_center(f)).collect()
    }

    /// First in-plane unit tangent of every face; constant within each
    /// band (`+X` for XY and XZ faces, `+Y` for YZ faces).
    pub fn face_tangents1(&self) -> Vec<Vec3> {
        self.tangents_by_band(|pair| pair.0)
    }

    /// Second in-plane unit tangent of every face; constant within each
    /// band (`+Y` for XY faces, `+Z` for XZ and YZ faces) and orthogonal
    /// to the first tangent and the normal.
    pub fn face_tangents2(&self) -> Vec<Vec3> {
        self.tangents_by_band(|pair| pair.1)
    }

    fn tangents_by_band(&self, pick: impl Fn((Vec3, Vec3)) -> Vec3) -> Vec<Vec3> {
        let mut tangents = Vec::with_capacity(self.face_count());
        for band in FaceBand::ALL {
            let t = pick(self.band_tangents(band));
            tangents.extend(std::iter::repeat(t).take(self.face_count_in(band)));
        }
        tangents
    }

    /// For every face, the distance between the centers of its two
    /// neighboring cells, or half the normal spacing where one neighbor is
    /// absent (the distance from the sole cell's center to the face).
    pub fn cell_distances(&self) -> Field<Faces> {
        let spacings = self.spacings();
        let mut values = Vec::with_capacity(self.face_count());
        for band in FaceBand::ALL {
            let lattice = self.band_lattice(band);
            let axis = band.normal_axis();
            let d = spacings[axis];
            let high = lattice.n[axis] - 1;
            for id in 0..lattice.len() {
                let c = lattice.decode(id);
                values.push(if c[axis] == 0 || c[axis] == high {
                    d / 2.0
                } else {
                    d
                });
            }
        }
        Field::from_values(na::DVector::from_vec(values))
    }

    /// Fractional position of every face between its two neighboring cell
    /// centers, measured from the first: `0.5` for interior faces (the
    /// face is the midpoint) and `1.0` for boundary faces, where the ratio
    /// is defined relative to the sole existing neighbor.
    pub fn face_to_cell_distance_ratios(&self) -> Field<Faces> {
        let mut values = Vec::with_capacity(self.face_count());
        for band in FaceBand::ALL {
            let lattice = self.band_lattice(band);
            let axis = band.normal_axis();
            let high = lattice.n[axis] - 1;
            for id in 0..lattice.len() {
                let c = lattice.decode(id);
                values.push(if c[axis] == 0 || c[axis] == high { 1.0 } else { 0.5 });
            }
        }
        Field::from_values(na::DVector::from_vec(values))
    }

    /// Face area divided by the distance between the neighboring cell
    /// centers, per face. A common factor in diffusion-term coefficients.
    pub fn face_aspect_ratios(&self) -> Field<Faces> {
        Field::from_values(
            self.face_areas()
                .values
                .component_div(&self.cell_distances().values),
        )
    }

    /// The area-weighted normal of every face: unit normal times face
    /// area, indexed by face ID.
    pub fn face_area_projections(&self) -> Vec<Vec3> {
        let mut projections = self.face_normals();
        for band in FaceBand::ALL {
            let offset = self.band_offset(band);
            let area = self.band_area(band);
            for p in &mut projections[offset..offset + self.face_count_in(band)] {
                *p *= area;
            }
        }
        projections
    }
}
