use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::math::{rescale, Point2, Point3, Vector3};

use super::{FlatMesh, MeshResolution};

/// Builds the grid topology and its flat (equirectangular) projection.
///
/// Rows step from `-pi/2` to `pi/2`, columns from `-pi` to `pi`. Every cell
/// emits four vertices of its own, because texture coordinates and flat
/// normals are discontinuous across the `lon = pi` seam.
pub struct BuildTopology {
    resolution: MeshResolution,
}

impl BuildTopology {
    /// Creates a new `BuildTopology` operation.
    #[must_use]
    pub fn new(resolution: MeshResolution) -> Self {
        Self { resolution }
    }

    /// Executes the operation, returning the flat mesh.
    ///
    /// Cell corners are emitted as top-left `(lon0, lat0)`, bottom-left
    /// `(lon0, lat1)`, top-right `(lon1, lat0)`, bottom-right `(lon1, lat1)`
    /// and wound as `(v0, v3, v1)`, `(v0, v2, v3)`, counter-clockwise when
    /// seen from outside the sphere.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn execute(&self) -> FlatMesh {
        let rows = self.resolution.rows();
        let cols = self.resolution.cols();
        let row_step = PI / rows as f64;
        let col_step = TAU / cols as f64;

        let n = self.resolution.vertex_count();
        let mut mesh = FlatMesh::default();
        mesh.vertices.reserve(n);
        mesh.normals.reserve(n);
        mesh.uvs.reserve(n);
        mesh.indices.reserve(self.resolution.triangle_count());

        for row in 0..rows {
            // Computed from the index rather than accumulated, so the last
            // row lands on the pole exactly.
            let lat0 = -FRAC_PI_2 + row_step * row as f64;
            let lat1 = -FRAC_PI_2 + row_step * (row + 1) as f64;
            for col in 0..cols {
                let lon0 = -PI + col_step * col as f64;
                let lon1 = -PI + col_step * (col + 1) as f64;

                let base = mesh.vertices.len() as u32;
                for (lon, lat) in [(lon0, lat0), (lon0, lat1), (lon1, lat0), (lon1, lat1)] {
                    mesh.vertices.push(Point3::new(lon, lat, 0.0));
                    mesh.normals.push(Vector3::z());
                    mesh.uvs.push(tex_coord(lat, lon));
                }

                mesh.indices.push([base, base + 3, base + 1]);
                mesh.indices.push([base, base + 2, base + 3]);
            }
        }

        tracing::debug!(
            rows,
            cols,
            vertices = mesh.vertices.len(),
            triangles = mesh.indices.len(),
            "built globe topology"
        );
        mesh
    }
}

/// Texture coordinate of a grid point; V is inverted so the north pole is at
/// the top of the image.
fn tex_coord(lat: f64, lon: f64) -> Point2 {
    let u = rescale(lon, -PI, PI, 0.0, 1.0);
    let v = 1.0 - rescale(lat, -FRAC_PI_2, FRAC_PI_2, 0.0, 1.0);
    Point2::new(u, v)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn build(rows: usize, cols: usize) -> FlatMesh {
        BuildTopology::new(MeshResolution::new(rows, cols).unwrap()).execute()
    }

    /// Signed area of a triangle projected onto the XY plane.
    fn signed_area_xy(a: &Point3, b: &Point3, c: &Point3) -> f64 {
        0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
    }

    #[test]
    fn two_by_four_grid_counts() {
        let mesh = build(2, 4);
        assert_eq!(mesh.vertices.len(), 32);
        assert_eq!(mesh.normals.len(), 32);
        assert_eq!(mesh.uvs.len(), 32);
        assert_eq!(mesh.indices.len(), 16);
    }

    #[test]
    fn vertices_cover_full_range() {
        let mesh = build(3, 5);
        let min_x = mesh.vertices.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = mesh.vertices.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = mesh.vertices.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = mesh.vertices.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(min_x, -PI, epsilon = 1e-12);
        assert_relative_eq!(max_x, PI, epsilon = 1e-12);
        assert_relative_eq!(min_y, -FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(max_y, FRAC_PI_2, epsilon = 1e-12);
        assert!(mesh.vertices.iter().all(|p| p.z.abs() < f64::EPSILON));
    }

    #[test]
    fn flat_normals_point_up() {
        let mesh = build(2, 4);
        assert!(mesh.normals.iter().all(|n| *n == Vector3::z()));
    }

    #[test]
    fn triangles_are_counter_clockwise_on_the_plane() {
        let mesh = build(4, 8);
        for tri in &mesh.indices {
            let [a, b, c] = tri.map(|i| mesh.vertices[i as usize]);
            assert!(signed_area_xy(&a, &b, &c) > 0.0);
        }
    }

    #[test]
    fn quads_do_not_share_vertices() {
        let mesh = build(2, 4);
        for (quad, tris) in mesh.indices.chunks(2).enumerate() {
            let base = (quad * 4) as u32;
            for tri in tris {
                assert!(tri.iter().all(|&i| (base..base + 4).contains(&i)));
            }
        }
    }

    #[test]
    fn first_quad_layout() {
        let mesh = build(2, 4);
        assert_eq!(mesh.indices[0], [0, 3, 1]);
        assert_eq!(mesh.indices[1], [0, 2, 3]);
        assert_relative_eq!(mesh.vertices[0].x, -PI);
        assert_relative_eq!(mesh.vertices[0].y, -FRAC_PI_2);
        assert_relative_eq!(mesh.vertices[1].y, 0.0, epsilon = 1e-15);
        assert_relative_eq!(mesh.vertices[2].x, -FRAC_PI_2);
    }

    #[test]
    fn uvs_are_rescaled_and_inverted() {
        let mesh = build(2, 4);
        // Texture origin is top-left, so the south pole sits at v = 1.
        assert_relative_eq!(mesh.uvs[0].x, 0.0);
        assert_relative_eq!(mesh.uvs[0].y, 1.0);
        for uv in &mesh.uvs {
            assert!((-1e-12..=1.0 + 1e-12).contains(&uv.x));
            assert!((-1e-12..=1.0 + 1e-12).contains(&uv.y));
        }
    }

    #[test]
    fn seam_column_reaches_u_one() {
        let mesh = build(1, 3);
        let last_quad = (3 - 1) * 4;
        assert_relative_eq!(mesh.uvs[last_quad + 2].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.uvs[last_quad + 3].x, 1.0, epsilon = 1e-12);
    }
}
