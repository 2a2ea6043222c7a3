//! Headless playback of a few synthetic earthquakes.
//!
//! Builds a globe, ingests records, morphs to the sphere half-way through
//! and logs what a renderer would receive each second.
//!
//! ```text
//! cargo run --example playback
//! RUST_LOG=quakeglobe=trace cargo run --example playback
//! ```

use quakeglobe::markers::MarkerId;
use quakeglobe::math::UnitQuaternion;
use quakeglobe::render::{GlobeRenderer, MarkerTransform};
use quakeglobe::tessellation::MeshBuffers;
use quakeglobe::{EarthquakeRecord, Globe, GlobeConfig, MorphTarget, QuakeGlobeError};

const FRAME: f64 = 1.0 / 60.0;

/// Renderer that only counts scene nodes and logs state changes.
#[derive(Default)]
struct LogRenderer {
    live_nodes: usize,
    alpha: f64,
}

impl GlobeRenderer for LogRenderer {
    fn upload_mesh(&mut self, buffers: &MeshBuffers, texture_path: &str) {
        tracing::info!(
            vertices = buffers.positions.len() / 3,
            triangles = buffers.indices.len() / 3,
            texture_path,
            "mesh uploaded"
        );
    }

    fn set_morph_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn set_wireframe(&mut self, _enabled: bool) {}

    fn set_orientation(&mut self, _orientation: &UnitQuaternion) {}

    fn place_marker(&mut self, _id: MarkerId, _transform: &MarkerTransform) {
        self.live_nodes += 1;
    }

    fn remove_marker(&mut self, id: MarkerId) {
        tracing::debug!(?id, "marker removed");
    }
}

fn main() -> Result<(), QuakeGlobeError> {
    // Default: WARN for everything, INFO for this crate and the demo.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("playback=info".parse().unwrap_or_default())
        .add_directive("quakeglobe=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let month = 28.0 * 24.0 * 60.0 * 60.0;
    let config = GlobeConfig::new().with_resolution(20, 20);
    let mut globe = Globe::new(&config)?;

    let records = [
        EarthquakeRecord::new(38.3, 142.4, 9.1, 0.0),
        EarthquakeRecord::new(-35.8, -72.7, 8.8, 2.0 * month),
        EarthquakeRecord::new(28.2, 84.7, 7.8, 4.0 * month),
        EarthquakeRecord::new(37.2, 37.0, 7.8, 6.0 * month),
        // Rejected: latitude out of range.
        EarthquakeRecord::new(123.0, 0.0, 6.5, 0.0),
    ];
    let ids = globe.ingest(&records);
    tracing::info!(accepted = ids.len(), total = records.len(), "records ingested");

    let mut renderer = LogRenderer::default();
    globe.attach(&mut renderer);

    for frame_index in 0..(20 * 60) {
        if frame_index == 5 * 60 {
            globe.toggle_mode(MorphTarget::Sphere);
        }
        let frame = globe.update(FRAME);
        renderer.live_nodes = 0;
        globe.present(&mut renderer, &frame);

        if frame_index % 60 == 0 {
            tracing::info!(
                second = frame_index / 60,
                blend = frame.blend,
                alpha = renderer.alpha,
                markers = renderer.live_nodes,
                "frame"
            );
        }
    }

    Ok(())
}
