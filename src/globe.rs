use crate::config::GlobeConfig;
use crate::error::Result;
use crate::markers::{MarkerId, MarkerSet};
use crate::math::{UnitQuaternion, Vector3, TOLERANCE};
use crate::morph::{MorphController, MorphState, MorphTarget};
use crate::playback::PlaybackClock;
use crate::record::EarthquakeRecord;
use crate::render::{GlobeRenderer, MarkerTransform};
use crate::tessellation::GlobeMesh;

/// Outcome of one [`Globe::update`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    /// Blend factor after the morph advanced.
    pub blend: f64,
    /// Playback time the markers were animated at.
    pub playback_time: f64,
    /// Markers removed this frame.
    pub expired: Vec<MarkerId>,
}

/// The morphing earth: mesh, morph controller, markers and playback clock.
///
/// All mutation happens through [`update`](Self::update) and the ingestion
/// and toggle calls; the blend factor is the only mode state dependents read.
#[derive(Debug)]
pub struct Globe {
    mesh: GlobeMesh,
    morph: MorphController,
    markers: MarkerSet,
    clock: PlaybackClock,
    natural_rotation: UnitQuaternion,
    mouse_rotation: UnitQuaternion,
    wireframe: bool,
    texture_path: String,
}

impl Globe {
    /// Validates `config` and builds the globe.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for any invalid parameter, or a state
    /// error if mesh generation breaks its own invariants.
    pub fn new(config: &GlobeConfig) -> Result<Self> {
        config.validate()?;
        let mesh = GlobeMesh::build(config.resolution()?)?;
        let morph = MorphController::new(config.morph_speed)?;
        let markers = MarkerSet::new(config.marker_lifespan, config.magnitude_range()?)?;
        let clock = PlaybackClock::new(config.playback_start, config.playback_speed)?;
        let tilt = -config.axial_tilt_degrees.to_radians();
        let natural_rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), tilt);

        tracing::info!(
            rows = config.rows,
            cols = config.cols,
            vertices = mesh.vertex_count(),
            "globe created"
        );

        Ok(Self {
            mesh,
            morph,
            markers,
            clock,
            natural_rotation,
            mouse_rotation: UnitQuaternion::identity(),
            wireframe: config.wireframe,
            texture_path: config.texture_path.clone(),
        })
    }

    /// Starts a morph toward `target`, reversing any morph in flight.
    pub fn toggle_mode(&mut self, target: MorphTarget) {
        self.morph.toggle(target);
    }

    /// Enables or disables wireframe rendering.
    pub fn toggle_wireframe(&mut self, enabled: bool) {
        self.wireframe = enabled;
    }

    /// Advances one frame of `delta_time` real seconds.
    ///
    /// The morph advances first, then the playback clock, then every marker
    /// is animated at the new blend factor and expired ones are removed.
    pub fn update(&mut self, delta_time: f64) -> FrameUpdate {
        self.morph.advance(delta_time);
        self.clock.advance(delta_time);
        let blend = self.morph.current_blend();
        let playback_time = self.clock.now();
        let expired = self.markers.tick(playback_time, blend);
        FrameUpdate {
            blend,
            playback_time,
            expired,
        }
    }

    /// Creates a marker for `record`, normalizing its magnitude against the
    /// configured range.
    ///
    /// # Errors
    ///
    /// Returns a data-range error if the record is rejected, including when
    /// its lifespan has already run out at the current playback time. The
    /// globe is left unchanged.
    pub fn create_marker_from_record(&mut self, record: &EarthquakeRecord) -> Result<MarkerId> {
        let normalized = self.markers.magnitude_range().normalize(record.magnitude);
        self.markers.spawn(record, normalized, self.clock.now(), self.morph.current_blend())
    }

    /// Creates markers for every valid record, skipping and logging rejects.
    pub fn ingest<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a EarthquakeRecord>,
    ) -> Vec<MarkerId> {
        records
            .into_iter()
            .filter_map(|record| match self.create_marker_from_record(record) {
                Ok(id) => Some(id),
                Err(err) => {
                    tracing::warn!(%err, ?record, "rejected earthquake record");
                    None
                }
            })
            .collect()
    }

    /// Jumps playback to `time`, e.g. to restart the data loop.
    pub fn seek(&mut self, time: f64) {
        self.clock.seek(time);
    }

    /// Removes all markers, returning their ids.
    ///
    /// [`present`](Self::present) only drops nodes of expired markers; the
    /// caller must pass the returned ids to
    /// [`GlobeRenderer::remove_marker`] on any attached renderer, or use
    /// [`clear_markers_from`](Self::clear_markers_from).
    pub fn clear_markers(&mut self) -> Vec<MarkerId> {
        self.markers.clear()
    }

    /// Removes all markers and their nodes on `renderer`.
    pub fn clear_markers_from<R: GlobeRenderer>(&mut self, renderer: &mut R) {
        for id in self.markers.clear() {
            renderer.remove_marker(id);
        }
    }

    /// Applies an incremental user rotation.
    pub fn rotate(&mut self, delta: &UnitQuaternion) {
        self.mouse_rotation = delta * self.mouse_rotation;
    }

    /// Discards accumulated user rotation.
    pub fn reset_rotation(&mut self) {
        self.mouse_rotation = UnitQuaternion::identity();
    }

    /// Globe node rotation for the current blend.
    ///
    /// The flat map stays upright; the user rotation and axial tilt fade in
    /// as the mesh becomes a sphere.
    #[must_use]
    pub fn orientation(&self) -> UnitQuaternion {
        let target = self.mouse_rotation * self.natural_rotation;
        let blend = self.morph.current_blend();
        UnitQuaternion::identity()
            .try_slerp(&target, blend, TOLERANCE)
            .unwrap_or_else(|| {
                if blend < 0.5 {
                    UnitQuaternion::identity()
                } else {
                    target
                }
            })
    }

    /// Uploads the mesh and current state to a freshly attached renderer.
    pub fn attach<R: GlobeRenderer>(&self, renderer: &mut R) {
        renderer.upload_mesh(&self.mesh.buffers(), &self.texture_path);
        self.sync(renderer);
    }

    /// Pushes the result of an [`update`](Self::update) to a renderer.
    pub fn present<R: GlobeRenderer>(&self, renderer: &mut R, frame: &FrameUpdate) {
        for &id in &frame.expired {
            renderer.remove_marker(id);
        }
        self.sync(renderer);
    }

    fn sync<R: GlobeRenderer>(&self, renderer: &mut R) {
        renderer.set_wireframe(self.wireframe);
        renderer.set_morph_alpha(self.morph.current_blend());
        renderer.set_orientation(&self.orientation());
        for (id, marker) in self.markers.iter() {
            renderer.place_marker(id, &MarkerTransform::from(marker));
        }
    }

    /// Returns the globe mesh.
    #[must_use]
    pub fn mesh(&self) -> &GlobeMesh {
        &self.mesh
    }

    /// Returns the live markers.
    #[must_use]
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Returns the current blend factor.
    #[must_use]
    pub fn blend(&self) -> f64 {
        self.morph.current_blend()
    }

    /// Returns whether a morph is in flight.
    #[must_use]
    pub fn morph_state(&self) -> MorphState {
        self.morph.state()
    }

    /// Returns the representation the morph is heading toward.
    #[must_use]
    pub fn target(&self) -> MorphTarget {
        self.morph.target()
    }

    /// Returns the current playback time.
    #[must_use]
    pub fn playback_time(&self) -> f64 {
        self.clock.now()
    }

    /// Returns whether wireframe rendering is enabled.
    #[must_use]
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Returns the texture path handed to the renderer.
    #[must_use]
    pub fn texture_path(&self) -> &str {
        &self.texture_path
    }
}
