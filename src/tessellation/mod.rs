//! Dual-topology globe mesh generation.
//!
//! One grid topology (indices, UVs) is built once and carries two parallel
//! vertex sets: the flat equirectangular map and the unit sphere. A renderer
//! blends the two with a scalar morph factor.

mod build_topology;
mod derive_sphere;
mod globe_mesh;

pub use build_topology::BuildTopology;
pub use derive_sphere::DeriveSphereVertices;
pub use globe_mesh::{GlobeMesh, MeshBuffers};

use crate::error::{ConfigurationError, Result};
use crate::math::{Point2, Point3, Vector3};

/// Number of latitude rows and longitude columns of the globe grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshResolution {
    rows: usize,
    cols: usize,
}

impl MeshResolution {
    /// Creates a grid resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if `rows` or `cols` is zero, or if the resulting
    /// vertex count does not fit a `u32` index buffer.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let fits = rows
            .checked_mul(cols)
            .and_then(|cells| cells.checked_mul(VERTICES_PER_QUAD))
            .is_some_and(|n| u32::try_from(n).is_ok());
        if rows == 0 || cols == 0 || !fits {
            return Err(ConfigurationError::InvalidResolution { rows, cols }.into());
        }
        Ok(Self { rows, cols })
    }

    /// Returns the number of latitude rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of longitude columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of grid cells (quads).
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of raw vertices; quads never share vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.quad_count() * VERTICES_PER_QUAD
    }

    /// Number of triangles, two per quad.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.quad_count() * 2
    }
}

impl Default for MeshResolution {
    fn default() -> Self {
        Self { rows: 50, cols: 50 }
    }
}

/// Vertices emitted per grid cell.
pub const VERTICES_PER_QUAD: usize = 4;

/// The flat projection plus the shared topology.
#[derive(Debug, Clone, Default)]
pub struct FlatMesh {
    /// Vertex positions on the map plane, `(lon, lat, 0)` in radians.
    pub vertices: Vec<Point3>,
    /// Map-plane normals, all `+Z`.
    pub normals: Vec<Vector3>,
    /// Texture coordinates, shared by both projections.
    pub uvs: Vec<Point2>,
    /// Triangle indices, shared by both projections.
    pub indices: Vec<[u32; 3]>,
}

/// The spherical morph target, index-aligned with a [`FlatMesh`].
#[derive(Debug, Clone, Default)]
pub struct SphereTarget {
    /// Unit-sphere positions.
    pub vertices: Vec<Point3>,
    /// Outward normals (the normalized positions).
    pub normals: Vec<Vector3>,
}
