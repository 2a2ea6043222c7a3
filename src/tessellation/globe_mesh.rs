use crate::error::{Result, StateError};
use crate::math::{lerp_point, Point2, Point3, Vector3};

use super::{BuildTopology, DeriveSphereVertices, FlatMesh, MeshResolution, SphereTarget};

/// The globe mesh: one topology, two vertex sets.
///
/// The flat set is the base mesh and the sphere set is its morph target.
/// Both always have exactly [`MeshResolution::vertex_count`] entries.
#[derive(Debug, Clone)]
pub struct GlobeMesh {
    resolution: MeshResolution,
    flat: FlatMesh,
    sphere: SphereTarget,
}

impl GlobeMesh {
    /// Builds the topology and both projections.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the generated buffers violate the
    /// dual-vertex-set invariants.
    pub fn build(resolution: MeshResolution) -> Result<Self> {
        let flat = BuildTopology::new(resolution).execute();
        let sphere = DeriveSphereVertices::new(&flat.vertices).execute();
        let mesh = Self {
            resolution,
            flat,
            sphere,
        };
        mesh.verify()?;
        Ok(mesh)
    }

    /// Checks that every buffer has one entry per vertex and that every
    /// triangle index is in bounds.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn verify(&self) -> std::result::Result<(), StateError> {
        let n = self.flat.vertices.len();
        let lengths = [
            self.sphere.vertices.len(),
            self.flat.normals.len(),
            self.sphere.normals.len(),
            self.flat.uvs.len(),
        ];
        if n != self.resolution.vertex_count() || lengths.iter().any(|&len| len != n) {
            return Err(StateError::VertexCountMismatch {
                flat: n,
                sphere: self.sphere.vertices.len(),
                normals: self.sphere.normals.len(),
                uvs: self.flat.uvs.len(),
            });
        }
        if let Some(&index) = self
            .flat
            .indices
            .iter()
            .flatten()
            .find(|&&i| i as usize >= n)
        {
            return Err(StateError::IndexOutOfBounds {
                index,
                vertex_count: n,
            });
        }
        Ok(())
    }

    /// Returns the grid resolution.
    #[must_use]
    pub fn resolution(&self) -> MeshResolution {
        self.resolution
    }

    /// Returns the number of vertices in each vertex set.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.flat.vertices.len()
    }

    /// Returns the shared triangle indices.
    #[must_use]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.flat.indices
    }

    /// Returns the shared texture coordinates.
    #[must_use]
    pub fn uvs(&self) -> &[Point2] {
        &self.flat.uvs
    }

    /// Returns the flat map positions.
    #[must_use]
    pub fn flat_positions(&self) -> &[Point3] {
        &self.flat.vertices
    }

    /// Returns the flat map normals.
    #[must_use]
    pub fn flat_normals(&self) -> &[Vector3] {
        &self.flat.normals
    }

    /// Returns the unit-sphere positions.
    #[must_use]
    pub fn sphere_positions(&self) -> &[Point3] {
        &self.sphere.vertices
    }

    /// Returns the unit-sphere normals.
    #[must_use]
    pub fn sphere_normals(&self) -> &[Vector3] {
        &self.sphere.normals
    }

    /// Evaluates vertex `index` at the given blend factor, as a morph
    /// material would.
    ///
    /// Returns `None` if `index` is out of range.
    #[must_use]
    pub fn blended_position(&self, index: usize, blend: f64) -> Option<Point3> {
        let flat = self.flat.vertices.get(index)?;
        let sphere = self.sphere.vertices.get(index)?;
        Some(lerp_point(flat, sphere, blend))
    }

    /// Flattens the mesh into raw GPU-ready arrays.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn buffers(&self) -> MeshBuffers {
        fn points(src: &[Point3]) -> Vec<f32> {
            src.iter()
                .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
                .collect()
        }
        fn vectors(src: &[Vector3]) -> Vec<f32> {
            src.iter()
                .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect()
        }

        MeshBuffers {
            positions: points(&self.flat.vertices),
            normals: vectors(&self.flat.normals),
            uvs: self
                .flat
                .uvs
                .iter()
                .flat_map(|uv| [uv.x as f32, uv.y as f32])
                .collect(),
            indices: self.flat.indices.iter().flatten().copied().collect(),
            morph_positions: points(&self.sphere.vertices),
            morph_normals: vectors(&self.sphere.normals),
        }
    }
}

/// Raw interleave-free arrays consumed by a morph-capable mesh primitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Base (flat) positions, 3 floats per vertex.
    pub positions: Vec<f32>,
    /// Base (flat) normals, 3 floats per vertex.
    pub normals: Vec<f32>,
    /// Texture coordinates, 2 floats per vertex.
    pub uvs: Vec<f32>,
    /// Triangle list indices, 3 per triangle.
    pub indices: Vec<u32>,
    /// Morph target (sphere) positions, 3 floats per vertex.
    pub morph_positions: Vec<f32>,
    /// Morph target (sphere) normals, 3 floats per vertex.
    pub morph_normals: Vec<f32>,
}
