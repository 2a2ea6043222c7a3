use crate::math::projection::to_sphere;
use crate::math::Point3;

use super::SphereTarget;

/// Wraps flat map vertices onto the unit sphere.
///
/// Each flat vertex `(lon, lat, 0)` is projected with `to_sphere(lat, lon)`.
/// The output is index-aligned with the input.
pub struct DeriveSphereVertices<'a> {
    flat_vertices: &'a [Point3],
}

impl<'a> DeriveSphereVertices<'a> {
    /// Creates a new `DeriveSphereVertices` operation.
    #[must_use]
    pub fn new(flat_vertices: &'a [Point3]) -> Self {
        Self { flat_vertices }
    }

    /// Executes the projection, returning sphere positions and normals.
    #[must_use]
    pub fn execute(&self) -> SphereTarget {
        let (vertices, normals) = self
            .flat_vertices
            .iter()
            .map(|flat| {
                let p = to_sphere(flat.y, flat.x);
                (p, p.coords.normalize())
            })
            .unzip();
        SphereTarget { vertices, normals }
    }
}
