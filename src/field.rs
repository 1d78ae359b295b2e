//! Dense per-entity value containers, i.e. values assigned to the cells,
//! faces or vertices of a mesh, indexed by the mesh's linear IDs.

use nalgebra as na;

use crate::UniformGrid3d;

/// Marker type indicating a [`Field`] stores one value per cell.
#[derive(Clone, Copy, Debug)]
pub struct Cells;

/// Marker type indicating a [`Field`] stores one value per face.
#[derive(Clone, Copy, Debug)]
pub struct Faces;

/// Marker type indicating a [`Field`] stores one value per vertex.
#[derive(Clone, Copy, Debug)]
pub struct Vertices;

/// Trait allowing fields and mesh methods to be generic over which entity
/// class values live on ([`Cells`], [`Faces`] or [`Vertices`]).
///
/// Not intended to be implemented by users,
/// so contents are hidden from docs.
pub trait MeshLocation {
    /// Number of entities of this class in the given mesh.
    #[doc(hidden)]
    fn count(mesh: &UniformGrid3d) -> usize;
}

impl MeshLocation for Cells {
    fn count(mesh: &UniformGrid3d) -> usize {
        mesh.cell_count()
    }
}

impl MeshLocation for Faces {
    fn count(mesh: &UniformGrid3d) -> usize {
        mesh.face_count()
    }
}

impl MeshLocation for Vertices {
    fn count(mesh: &UniformGrid3d) -> usize {
        mesh.vertex_count()
    }
}

/// A vector of real values corresponding to one entity class of a mesh,
/// indexed by the entities' linear IDs.
///
/// Fields are constructed through methods on [`UniformGrid3d`]:
/// [`new_zero_field`][UniformGrid3d::new_zero_field] and
/// [`field_from_fn`][UniformGrid3d::field_from_fn], as well as the bulk
/// geometry queries that return per-entity scalars
/// (e.g. [`face_areas`][UniformGrid3d::face_areas]).
#[derive(Clone)]
pub struct Field<Location> {
    /// The underlying vector of real values, exposed for convenience.
    ///
    /// Note that changing its length at runtime will cause a length
    /// mismatch with other fields of the same mesh. Use with caution.
    pub values: na::DVector<f64>,
    _marker: std::marker::PhantomData<Location>,
}

impl<L> Field<L> {
    #[inline]
    pub(crate) fn from_values(values: na::DVector<f64>) -> Self {
        Self {
            values,
            _marker: std::marker::PhantomData,
        }
    }

    #[inline]
    pub(crate) fn zeros(len: usize) -> Self {
        Self::from_values(na::DVector::zeros(len))
    }

    /// Number of values in the field.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field has no values.
    /// Never true for a field built from a valid mesh.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Linearly interpolate along the line from `self` to `end`.
    pub fn lerp(&self, end: &Self, t: f64) -> Self {
        self + &(t * (end - self))
    }
}

impl UniformGrid3d {
    /// Create a field with a value of zero for every entity of class `L`.
    pub fn new_zero_field<L: MeshLocation>(&self) -> Field<L> {
        Field::zeros(L::count(self))
    }

    /// Create a field by evaluating a function at every linear ID of
    /// entity class `L`.
    pub fn field_from_fn<L: MeshLocation>(&self, f: impl FnMut(usize) -> f64) -> Field<L> {
        let count = L::count(self);
        Field::from_values(na::DVector::from_iterator(count, (0..count).map(f)))
    }
}

// std trait impls for math ops and such
// (several permutations needed to also work with references)

impl<L> std::fmt::Debug for Field<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field of {} values: {:?}", self.values.len(), self.values)
    }
}

impl<L> PartialEq for Field<L> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

// Index by linear ID

impl<L> std::ops::Index<usize> for Field<L> {
    type Output = f64;

    fn index(&self, id: usize) -> &Self::Output {
        &self.values[id]
    }
}

impl<L> std::ops::IndexMut<usize> for Field<L> {
    fn index_mut(&mut self, id: usize) -> &mut Self::Output {
        &mut self.values[id]
    }
}

// Add

impl<L> std::ops::Add for Field<L> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Field::from_values(self.values + rhs.values)
    }
}

impl<L> std::ops::Add<&Field<L>> for Field<L> {
    type Output = Self;

    fn add(self, rhs: &Field<L>) -> Self::Output {
        Field::from_values(self.values + &rhs.values)
    }
}

impl<L> std::ops::Add<Field<L>> for &Field<L> {
    type Output = Field<L>;

    fn add(self, rhs: Field<L>) -> Self::Output {
        Field::from_values(&self.values + rhs.values)
    }
}

impl<L> std::ops::Add for &Field<L> {
    type Output = Field<L>;

    fn add(self, rhs: Self) -> Self::Output {
        Field::from_values(&self.values + &rhs.values)
    }
}

// AddAssign

impl<L> std::ops::AddAssign for Field<L> {
    fn add_assign(&mut self, rhs: Self) {
        self.values += rhs.values;
    }
}

impl<L> std::ops::AddAssign<&Field<L>> for Field<L> {
    fn add_assign(&mut self, rhs: &Field<L>) {
        self.values += &rhs.values;
    }
}

// Neg

impl<L> std::ops::Neg for Field<L> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_values(-self.values)
    }
}

impl<L> std::ops::Neg for &Field<L> {
    type Output = Field<L>;

    fn neg(self) -> Self::Output {
        Field::from_values(-&self.values)
    }
}

// Sub

impl<L> std::ops::Sub for Field<L> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_values(self.values - rhs.values)
    }
}

impl<L> std::ops::Sub<&Field<L>> for Field<L> {
    type Output = Self;

    fn sub(self, rhs: &Field<L>) -> Self::Output {
        Field::from_values(&self.values - &rhs.values)
    }
}

impl<L> std::ops::Sub<Field<L>> for &Field<L> {
    type Output = Field<L>;

    fn sub(self, rhs: Field<L>) -> Self::Output {
        Field::from_values(&self.values - &rhs.values)
    }
}

impl<L> std::ops::Sub for &Field<L> {
    type Output = Field<L>;

    fn sub(self, rhs: Self) -> Self::Output {
        Field::from_values(&self.values - &rhs.values)
    }
}

// SubAssign

impl<L> std::ops::SubAssign for Field<L> {
    fn sub_assign(&mut self, rhs: Self) {
        self.values -= rhs.values;
    }
}

impl<L> std::ops::SubAssign<&Field<L>> for Field<L> {
    fn sub_assign(&mut self, rhs: &Field<L>) {
        self.values -= &rhs.values;
    }
}

// Mul (scalar)

impl<L> std::ops::Mul<Field<L>> for f64 {
    type Output = Field<L>;

    fn mul(self, rhs: Field<L>) -> Self::Output {
        Field::from_values(self * rhs.values)
    }
}

impl<L> std::ops::Mul<&Field<L>> for f64 {
    type Output = Field<L>;

    fn mul(self, rhs: &Field<L>) -> Self::Output {
        Field::from_values(self * &rhs.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tiny_grid;
    use approx::relative_eq;

    #[test]
    fn constructors_size_fields_by_location() {
        let grid = tiny_grid();
        assert_eq!(grid.new_zero_field::<Cells>().len(), 6);
        assert_eq!(grid.new_zero_field::<Faces>().len(), 29);
        assert_eq!(grid.new_zero_field::<Vertices>().len(), 24);

        let ids = grid.field_from_fn::<Cells>(|c| c as f64);
        for c in 0..grid.cell_count() {
            assert_eq!(ids[c], c as f64);
        }
    }

    #[test]
    fn arithmetic_is_elementwise() {
        let grid = tiny_grid();
        let a = grid.field_from_fn::<Cells>(|c| c as f64);
        let b = grid.field_from_fn::<Cells>(|_| 10.0);

        let sum = &a + &b;
        let diff = &b - &a;
        let scaled = 2.0 * &a;
        for c in 0..grid.cell_count() {
            assert_eq!(sum[c], c as f64 + 10.0);
            assert_eq!(diff[c], 10.0 - c as f64);
            assert_eq!(scaled[c], 2.0 * c as f64);
        }

        let mut acc = grid.new_zero_field::<Cells>();
        acc += &a;
        acc -= &b;
        assert_eq!(acc, &a - &b);
        assert_eq!(-&a, grid.field_from_fn::<Cells>(|c| -(c as f64)));
    }

    #[test]
    fn lerp_interpolates_between_endpoints() {
        let grid = tiny_grid();
        let start = grid.field_from_fn::<Faces>(|_| 0.0);
        let end = grid.field_from_fn::<Faces>(|f| f as f64);
        let mid = start.lerp(&end, 0.5);
        for f in 0..grid.face_count() {
            assert!(relative_eq!(mid[f], f as f64 / 2.0));
        }
        assert_eq!(start.lerp(&end, 1.0), end);
    }
}
