//! The map surface: sources, layers, per-feature state and the camera.
//!
//! `MapSurface` is the seam between the interaction controller and whatever
//! draws the map. `TerminalMap` is the in-process implementation rendered by
//! the TUI canvas.

use super::camera::CameraAnimation;
use super::dataset::{Dataset, FeatureId};
use crate::error::SurfaceError;
use crate::models::{Camera, LngLat};
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// How a layer draws its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Shaded interior; the hit-testing layer
    Fill,
    /// Boundary lines
    Outline,
}

/// A layer drawing one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    /// Unique layer id
    pub id: String,
    /// Source the layer draws
    pub source: String,
    /// Drawing style
    pub kind: LayerKind,
}

impl LayerSpec {
    /// Creates a fill layer.
    pub fn fill(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            kind: LayerKind::Fill,
        }
    }

    /// Creates an outline layer.
    pub fn outline(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            kind: LayerKind::Outline,
        }
    }
}

/// Per-feature render state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureState {
    /// Pointer is over the feature
    pub hover: bool,
}

/// Operations the interaction controller needs from a map.
///
/// Removal operations are idempotent and report whether anything was removed.
pub trait MapSurface {
    /// Registers a dataset under `id`.
    fn add_source(&mut self, id: &str, dataset: Dataset) -> Result<(), SurfaceError>;

    /// Removes a source and all feature state recorded for it.
    fn remove_source(&mut self, id: &str) -> bool;

    /// Looks up a source.
    fn source(&self, id: &str) -> Option<&Dataset>;

    /// Adds a layer on top of the existing ones.
    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), SurfaceError>;

    /// Removes a layer.
    fn remove_layer(&mut self, id: &str) -> bool;

    /// Returns true if a layer with this id exists.
    fn has_layer(&self, id: &str) -> bool;

    /// Sets the state of one feature. Ignored if the source does not exist.
    fn set_feature_state(&mut self, source: &str, id: FeatureId, state: FeatureState);

    /// Current state of one feature.
    fn feature_state(&self, source: &str, id: FeatureId) -> FeatureState;

    /// Starts a timed camera move.
    fn fly_to(&mut self, target: Camera, duration: Duration, now: Instant);

    /// Moves the camera immediately, cancelling any animation.
    fn jump_to(&mut self, camera: Camera);

    /// Camera at `now`.
    fn camera(&self, now: Instant) -> Camera;

    /// Returns true while a timed camera move is running.
    fn is_moving(&self, now: Instant) -> bool;

    /// The id of the topmost feature of `layer`'s source at `point`.
    fn query_feature(&self, layer: &str, point: LngLat) -> Option<FeatureId>;
}

/// In-process map drawn on the terminal canvas.
#[derive(Debug, Clone)]
pub struct TerminalMap {
    sources: HashMap<String, Dataset>,
    layers: Vec<LayerSpec>,
    feature_states: HashMap<String, BTreeMap<FeatureId, FeatureState>>,
    camera: Camera,
    animation: Option<CameraAnimation>,
}

impl TerminalMap {
    /// Creates an empty map at the world camera.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            layers: Vec::new(),
            feature_states: HashMap::new(),
            camera: Camera::world(),
            animation: None,
        }
    }

    /// Layers in draw order, bottom first.
    #[must_use]
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Features of `source` with a hover flag set.
    pub fn hovered_features(&self, source: &str) -> impl Iterator<Item = FeatureId> + '_ {
        self.feature_states
            .get(source)
            .into_iter()
            .flat_map(|states| states.iter())
            .filter(|(_, state)| state.hover)
            .map(|(id, _)| *id)
    }
}

impl Default for TerminalMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for TerminalMap {
    fn add_source(&mut self, id: &str, dataset: Dataset) -> Result<(), SurfaceError> {
        if self.sources.contains_key(id) {
            return Err(SurfaceError::DuplicateSource(id.to_string()));
        }
        self.sources.insert(id.to_string(), dataset);
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> bool {
        self.feature_states.remove(id);
        self.sources.remove(id).is_some()
    }

    fn source(&self, id: &str) -> Option<&Dataset> {
        self.sources.get(id)
    }

    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), SurfaceError> {
        if self.has_layer(&layer.id) {
            return Err(SurfaceError::DuplicateLayer(layer.id));
        }
        if !self.sources.contains_key(&layer.source) {
            return Err(SurfaceError::MissingSource(layer.source));
        }
        self.layers.push(layer);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        self.layers.len() != before
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|layer| layer.id == id)
    }

    fn set_feature_state(&mut self, source: &str, id: FeatureId, state: FeatureState) {
        if !self.sources.contains_key(source) {
            tracing::debug!("Ignoring feature state for missing source '{}'", source);
            return;
        }
        let states = self.feature_states.entry(source.to_string()).or_default();
        if state == FeatureState::default() {
            states.remove(&id);
        } else {
            states.insert(id, state);
        }
    }

    fn feature_state(&self, source: &str, id: FeatureId) -> FeatureState {
        self.feature_states
            .get(source)
            .and_then(|states| states.get(&id))
            .copied()
            .unwrap_or_default()
    }

    fn fly_to(&mut self, target: Camera, duration: Duration, now: Instant) {
        let from = self.camera(now);
        self.camera = target;
        self.animation = Some(CameraAnimation::new(from, target, now, duration));
    }

    fn jump_to(&mut self, camera: Camera) {
        self.camera = camera;
        self.animation = None;
    }

    fn is_moving(&self, now: Instant) -> bool {
        self.animation.is_some_and(|a| !a.is_finished(now))
    }

    fn camera(&self, now: Instant) -> Camera {
        self.animation
            .map_or(self.camera, |animation| animation.camera_at(now))
    }

    fn query_feature(&self, layer: &str, point: LngLat) -> Option<FeatureId> {
        let layer = self.layers.iter().find(|l| l.id == layer)?;
        self.sources
            .get(&layer.source)?
            .feature_at(point)
            .map(|feature| feature.id)
    }
}
