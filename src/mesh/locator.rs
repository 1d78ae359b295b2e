//! Point-to-cell lookup by direct rounding arithmetic.

use super::UniformGrid3d;
use crate::Vec3;

impl UniformGrid3d {
    /// The cell enclosing the given point, or the nearest cell where the
    /// point lies outside the domain.
    ///
    /// Works by offsetting against the first cell center, dividing by the
    /// spacing and rounding per axis, then clamping each lattice index
    /// into range; out-of-domain points snap to the nearest boundary cell
    /// rather than erroring. Constant time per point.
    pub fn nearest_cell(&self, point: Vec3) -> usize {
        let first = self.cell_center(0);
        let counts = self.counts();
        let spacings = self.spacings();
        let mut coords = [0; 3];
        for a in 0..3 {
            let i = ((point[a] - first[a]) / spacings[a]).round() as i64;
            coords[a] = i.clamp(0, counts[a] as i64 - 1) as usize;
        }
        self.cell_index(coords)
    }

    /// [`nearest_cell`][Self::nearest_cell] over a batch of points.
    pub fn nearest_cells(&self, points: &[Vec3]) -> Vec<usize> {
        points.iter().map(|&p| self.nearest_cell(p)).collect()
    }
}
