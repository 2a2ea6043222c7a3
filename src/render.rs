//! Seam to the rendering collaborator.
//!
//! The core never draws. It hands a renderer raw mesh arrays once, then
//! pushes a blend factor, an orientation and marker transforms each frame.

use crate::markers::{Color, EarthquakeMarker, MarkerId};
use crate::math::{Point3, UnitQuaternion, Vector3};
use crate::tessellation::MeshBuffers;

/// Per-frame transform of one marker scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerTransform {
    pub position: Point3,
    pub scale: Vector3,
    pub color: Color,
}

impl From<&EarthquakeMarker> for MarkerTransform {
    fn from(marker: &EarthquakeMarker) -> Self {
        Self {
            position: *marker.display_position(),
            scale: *marker.display_scale(),
            color: marker.color(),
        }
    }
}

/// A scene able to display a morphing globe and its markers.
pub trait GlobeRenderer {
    /// Uploads the mesh and its morph target. `texture_path` is passed
    /// through untouched.
    fn upload_mesh(&mut self, buffers: &MeshBuffers, texture_path: &str);

    /// Sets the morph material's blend factor.
    fn set_morph_alpha(&mut self, alpha: f64);

    /// Enables or disables wireframe rendering of the globe.
    fn set_wireframe(&mut self, enabled: bool);

    /// Sets the rotation of the globe node.
    fn set_orientation(&mut self, orientation: &UnitQuaternion);

    /// Creates or updates the scene node for a marker.
    fn place_marker(&mut self, id: MarkerId, transform: &MarkerTransform);

    /// Removes the scene node for a marker.
    fn remove_marker(&mut self, id: MarkerId);
}
