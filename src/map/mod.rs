//! Map data, surface and interaction.
//!
//! - `dataset`: GeoJSON boundary datasets and the provider that fetches them
//! - `camera`: camera animation and terminal projection
//! - `surface`: the `MapSurface` seam and the terminal implementation
//! - `controller`: the World/Regions interaction state machine

pub mod camera;
pub mod controller;
pub mod dataset;
pub mod surface;

pub use camera::{CameraAnimation, Viewport};
pub use controller::{
    ControllerSettings, HoverInfo, HoverKind, MapController, MapEvent, PointerEvent,
    COUNTRIES_FILL, COUNTRIES_OUTLINE, COUNTRIES_SOURCE, REGIONS_FILL, REGIONS_OUTLINE,
    REGIONS_SOURCE,
};
pub use dataset::{Dataset, FeatureId, GeometryProvider, HttpGeometryProvider, MapFeature};
pub use surface::{FeatureState, LayerKind, LayerSpec, MapSurface, TerminalMap};
