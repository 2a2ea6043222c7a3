//! Geometry and animation core for an earthquake globe that morphs between
//! a flat equirectangular map and a 3D sphere.
//!
//! - [`tessellation`] builds one grid topology with a flat vertex set and a
//!   spherical morph target.
//! - [`morph`] drives the blend factor between the two.
//! - [`markers`] places, animates and expires per-event markers.
//! - [`Globe`] ties them together behind a frame-driven `update` call and
//!   talks to a renderer through [`render::GlobeRenderer`].

pub mod config;
pub mod error;
pub mod globe;
pub mod markers;
pub mod math;
pub mod morph;
pub mod playback;
pub mod record;
pub mod render;
pub mod tessellation;

pub use config::GlobeConfig;
pub use error::{QuakeGlobeError, Result};
pub use globe::{FrameUpdate, Globe};
pub use markers::{EarthquakeMarker, MarkerId};
pub use morph::{MorphState, MorphTarget};
pub use record::EarthquakeRecord;
