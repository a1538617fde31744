//! Map interaction state machine.
//!
//! The controller owns the map surface and moves between two states:
//!
//! - **World**: the countries layer is interactive. Clicking a country with a
//!   registered region dataset flies the camera there and, after a settle
//!   delay, loads the region dataset in the background.
//! - **Regions(country)**: the region layer of one country is interactive and
//!   the countries layer ignores the pointer. `go_back` returns to World.
//!
//! Side effects for the rest of the application are queued as [`MapEvent`]s
//! and drained with [`MapController::take_events`]. Time is passed in by the
//! caller so transitions are deterministic under test.

use super::camera::lon_span;
use super::dataset::{Dataset, FeatureId, GeometryProvider};
use super::surface::{FeatureState, LayerSpec, MapSurface};
use crate::config::MapConfig;
use crate::constants::WORLD_ZOOM;
use crate::error::{LayerLoadError, SurfaceError};
use crate::models::{Camera, LngLat, Location, ViewMode};
use crate::registry::LocationRegistry;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Source id of the world countries dataset.
pub const COUNTRIES_SOURCE: &str = "countries";
/// Hit-testing layer for countries.
pub const COUNTRIES_FILL: &str = "countries-fill";
/// Boundary layer for countries.
pub const COUNTRIES_OUTLINE: &str = "countries-outline";
/// Source id of the active country's region dataset.
pub const REGIONS_SOURCE: &str = "regions";
/// Hit-testing layer for regions.
pub const REGIONS_FILL: &str = "regions-fill";
/// Boundary layer for regions.
pub const REGIONS_OUTLINE: &str = "regions-outline";

/// Timing of view transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Camera fly-to duration
    pub fly_duration: Duration,
    /// Delay between a country click and the region load
    pub settle_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

impl From<&MapConfig> for ControllerSettings {
    fn from(config: &MapConfig) -> Self {
        Self {
            fly_duration: config.fly_duration(),
            settle_delay: config.settle_delay(),
        }
    }
}

/// Notifications for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    /// The user picked a location to read news about
    LocationSelected(Location),
    /// The interactive layer changed
    ViewChanged {
        /// New view
        mode: ViewMode,
        /// Country whose regions are shown, `None` in World
        country: Option<String>,
    },
    /// Any open news popup should close
    ClosePopup,
}

/// Pointer input in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved over the map
    Move(LngLat),
    /// Pointer left the map
    Leave,
    /// Primary click
    Click(LngLat),
}

/// Which layer the hovered feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverKind {
    /// A world country
    Country,
    /// A region of the current country
    Region,
}

/// Description of the hovered feature for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    /// Layer of the feature
    pub kind: HoverKind,
    /// Display name
    pub name: String,
    /// For countries: whether clicking drills into regions
    pub has_regions: bool,
}

enum LoadMessage {
    World(Result<Dataset, LayerLoadError>),
    Regions {
        token: u64,
        country: String,
        result: Result<Dataset, LayerLoadError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrillPhase {
    Settling { ready_at: Instant },
    Loading,
}

#[derive(Debug, Clone)]
struct PendingDrill {
    token: u64,
    country: String,
    url: String,
    phase: DrillPhase,
}

/// Owns the map surface and its interaction state.
pub struct MapController<S: MapSurface> {
    surface: S,
    registry: Arc<LocationRegistry>,
    provider: Arc<dyn GeometryProvider>,
    settings: ControllerSettings,
    view: ViewMode,
    current_country: Option<String>,
    world_loaded: bool,
    regions_loaded: bool,
    hovered_country: Option<FeatureId>,
    hovered_region: Option<FeatureId>,
    pending: Option<PendingDrill>,
    next_token: u64,
    world_error: Option<String>,
    sender: Sender<LoadMessage>,
    receiver: Receiver<LoadMessage>,
    events: Vec<MapEvent>,
}

impl<S: MapSurface> MapController<S> {
    /// Creates a controller in the World state with the camera at the global default.
    pub fn new(
        mut surface: S,
        registry: Arc<LocationRegistry>,
        provider: Arc<dyn GeometryProvider>,
        settings: ControllerSettings,
    ) -> Self {
        surface.jump_to(Camera::world());
        let (sender, receiver) = channel();

        Self {
            surface,
            registry,
            provider,
            settings,
            view: ViewMode::World,
            current_country: None,
            world_loaded: false,
            regions_loaded: false,
            hovered_country: None,
            hovered_region: None,
            pending: None,
            next_token: 0,
            world_error: None,
            sender,
            receiver,
            events: Vec::new(),
        }
    }

    /// The map surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The location registry.
    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    /// Current view mode.
    pub const fn view_mode(&self) -> ViewMode {
        self.view
    }

    /// Country whose regions are shown.
    pub fn current_country(&self) -> Option<&str> {
        self.current_country.as_deref()
    }

    /// Country a drill is in progress for.
    pub fn pending_country(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.country.as_str())
    }

    /// Returns true once the world countries dataset is installed.
    pub const fn world_loaded(&self) -> bool {
        self.world_loaded
    }

    /// Returns true while a region layer is interactive.
    pub const fn regions_loaded(&self) -> bool {
        self.regions_loaded
    }

    /// Error text from the last failed world dataset load.
    pub fn world_load_error(&self) -> Option<&str> {
        self.world_error.as_deref()
    }

    /// Camera at `now`.
    pub fn camera(&self, now: Instant) -> Camera {
        self.surface.camera(now)
    }

    /// Drains queued events in the order they were produced.
    pub fn take_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    /// Starts loading the world countries dataset in the background.
    pub fn load_world(&mut self, url: &str) {
        tracing::info!("Loading world boundaries from {}", url);
        self.world_error = None;

        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();
        let url = url.to_string();
        thread::spawn(move || {
            let result = provider.fetch(&url);
            let _ = sender.send(LoadMessage::World(result));
        });
    }

    /// Installs the world countries dataset, replacing any previous one.
    pub fn install_world(&mut self, dataset: Dataset) -> Result<(), SurfaceError> {
        self.set_hover(COUNTRIES_SOURCE, None);
        self.surface.remove_layer(COUNTRIES_OUTLINE);
        self.surface.remove_layer(COUNTRIES_FILL);
        self.surface.remove_source(COUNTRIES_SOURCE);

        let count = dataset.len();
        self.surface.add_source(COUNTRIES_SOURCE, dataset)?;
        self.surface
            .add_layer(LayerSpec::fill(COUNTRIES_FILL, COUNTRIES_SOURCE))?;
        self.surface
            .add_layer(LayerSpec::outline(COUNTRIES_OUTLINE, COUNTRIES_SOURCE))?;

        // Region layers stay above the countries
        if self.regions_loaded {
            self.surface.remove_layer(REGIONS_FILL);
            self.surface.remove_layer(REGIONS_OUTLINE);
            self.surface
                .add_layer(LayerSpec::fill(REGIONS_FILL, REGIONS_SOURCE))?;
            self.surface
                .add_layer(LayerSpec::outline(REGIONS_OUTLINE, REGIONS_SOURCE))?;
        }

        self.world_loaded = true;
        self.world_error = None;
        tracing::info!("World map ready with {} countries", count);
        Ok(())
    }

    /// Advances timers and applies finished background loads.
    pub fn tick(&mut self, now: Instant) {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => self.handle_load_message(message),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        let ready = matches!(
            self.pending,
            Some(PendingDrill {
                phase: DrillPhase::Settling { ready_at },
                ..
            }) if now >= ready_at
        );
        if ready {
            self.start_region_load();
        }
    }

    fn handle_load_message(&mut self, message: LoadMessage) {
        match message {
            LoadMessage::World(Ok(dataset)) => {
                if let Err(e) = self.install_world(dataset) {
                    tracing::error!("Failed to install world map: {}", e);
                    self.world_error = Some(e.to_string());
                }
            }
            LoadMessage::World(Err(e)) => {
                tracing::error!("Failed to load world map: {}", e);
                self.world_error = Some(e.to_string());
            }
            LoadMessage::Regions {
                token,
                country,
                result,
            } => {
                let current = self
                    .pending
                    .as_ref()
                    .is_some_and(|p| p.token == token && p.phase == DrillPhase::Loading);
                if !current {
                    tracing::debug!("Discarding stale region load for {}", country);
                    return;
                }
                self.pending = None;

                match result {
                    Ok(dataset) => self.install_regions(&country, dataset),
                    Err(e) => {
                        tracing::warn!("Region load failed for {}: {}", country, e);
                        self.emit(MapEvent::LocationSelected(Location::country(country)));
                    }
                }
            }
        }
    }

    fn start_region_load(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.phase = DrillPhase::Loading;
        let token = pending.token;
        let country = pending.country.clone();
        let url = pending.url.clone();

        // The previous region layer goes before the new source is requested
        self.remove_regions();

        tracing::info!("Loading regions for {} from {}", country, url);
        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = provider.fetch(&url);
            let _ = sender.send(LoadMessage::Regions {
                token,
                country,
                result,
            });
        });
    }

    fn install_regions(&mut self, country: &str, dataset: Dataset) {
        self.remove_regions();
        self.set_hover(COUNTRIES_SOURCE, None);

        let count = dataset.len();
        let installed = self
            .surface
            .add_source(REGIONS_SOURCE, dataset)
            .and_then(|()| {
                self.surface
                    .add_layer(LayerSpec::fill(REGIONS_FILL, REGIONS_SOURCE))
            })
            .and_then(|()| {
                self.surface
                    .add_layer(LayerSpec::outline(REGIONS_OUTLINE, REGIONS_SOURCE))
            });

        if let Err(e) = installed {
            tracing::error!("Failed to install regions for {}: {}", country, e);
            self.remove_regions();
            self.emit(MapEvent::LocationSelected(Location::country(country)));
            return;
        }

        tracing::info!("Showing {} regions of {}", count, country);
        self.regions_loaded = true;
        self.view = ViewMode::Regions;
        self.current_country = Some(country.to_string());
        self.emit(MapEvent::ViewChanged {
            mode: ViewMode::Regions,
            country: Some(country.to_string()),
        });
    }

    fn remove_regions(&mut self) {
        self.surface.remove_layer(REGIONS_FILL);
        self.surface.remove_layer(REGIONS_OUTLINE);
        self.surface.remove_source(REGIONS_SOURCE);
        self.hovered_region = None;
        self.regions_loaded = false;
    }

    /// Returns to the World view.
    ///
    /// Cancels any pending drill, removes the region layer and flies back to
    /// the global camera. Returns false if there was nothing to leave.
    pub fn go_back(&mut self, now: Instant) -> bool {
        if self.view == ViewMode::World && self.pending.is_none() {
            return false;
        }

        if let Some(pending) = self.pending.take() {
            tracing::debug!("Cancelled drill into {}", pending.country);
        }
        self.remove_regions();
        self.view = ViewMode::World;
        self.current_country = None;
        self.surface
            .fly_to(Camera::world(), self.settings.fly_duration, now);

        self.emit(MapEvent::ViewChanged {
            mode: ViewMode::World,
            country: None,
        });
        self.emit(MapEvent::ClosePopup);
        true
    }

    /// Routes pointer input to the interactive layer.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        match event {
            PointerEvent::Move(point) => {
                let (source, layer) = self.active_layer();
                let id = self.surface.query_feature(layer, point);
                self.set_hover(source, id);
            }
            PointerEvent::Leave => {
                let (source, _) = self.active_layer();
                self.set_hover(source, None);
            }
            PointerEvent::Click(point) => {
                let (_, layer) = self.active_layer();
                if let Some(id) = self.surface.query_feature(layer, point) {
                    self.click_feature(id, now);
                }
            }
        }
    }

    /// Moves the hover to the next (or previous) feature of the active layer.
    pub fn hover_step(&mut self, forward: bool, now: Instant) {
        let (source, _) = self.active_layer();
        let Some(dataset) = self.surface.source(source) else {
            return;
        };
        if dataset.is_empty() {
            return;
        }

        let current = self
            .hovered(source)
            .and_then(|id| dataset.features.iter().position(|f| f.id == id));
        let len = dataset.len();
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        let id = dataset.features[index].id;
        let center = dataset.features[index].bbox_center();

        self.set_hover(source, Some(id));

        // Keep the hovered feature on screen once zoomed in, unless a fly-to is running
        if self.surface.is_moving(now) {
            return;
        }
        let camera = self.surface.camera(now);
        if let Some(center) = center.filter(|_| camera.zoom > WORLD_ZOOM) {
            self.surface.jump_to(Camera::new(center, camera.zoom));
        }
    }

    /// Clicks the hovered feature of the active layer.
    pub fn click_hovered(&mut self, now: Instant) {
        let (source, _) = self.active_layer();
        if let Some(id) = self.hovered(source) {
            self.click_feature(id, now);
        }
    }

    /// Describes the hovered feature.
    pub fn hover_info(&self) -> Option<HoverInfo> {
        let (source, _) = self.active_layer();
        let id = self.hovered(source)?;
        let feature = self.surface.source(source)?.feature(id)?;

        if self.regions_loaded {
            let country = self.current_country.as_deref()?;
            Some(HoverInfo {
                kind: HoverKind::Region,
                name: self.registry.region_name(&feature.properties, country),
                has_regions: false,
            })
        } else {
            let name = self.registry.country_name(&feature.properties)?;
            Some(HoverInfo {
                kind: HoverKind::Country,
                has_regions: self.registry.has_regions(&name),
                name,
            })
        }
    }

    /// Pans by a fraction of the visible longitude span.
    pub fn pan(&mut self, dx: f64, dy: f64, now: Instant) {
        let camera = self.surface.camera(now);
        let span = lon_span(camera.zoom);
        let lon = wrap_lon(span.mul_add(dx, camera.center.lon));
        let lat = span.mul_add(dy, camera.center.lat).clamp(-85.0, 85.0);
        self.surface
            .jump_to(Camera::new(LngLat::new(lon, lat), camera.zoom));
    }

    /// Changes the zoom level by `delta`.
    pub fn zoom_by(&mut self, delta: f64, now: Instant) {
        let camera = self.surface.camera(now);
        self.surface
            .jump_to(Camera::new(camera.center, camera.zoom + delta));
    }

    /// Source and hit-testing layer that currently receive pointer input.
    ///
    /// This is the single gate that keeps country handlers inert while a
    /// region layer is active.
    const fn active_layer(&self) -> (&'static str, &'static str) {
        if self.regions_loaded {
            (REGIONS_SOURCE, REGIONS_FILL)
        } else {
            (COUNTRIES_SOURCE, COUNTRIES_FILL)
        }
    }

    fn hovered(&self, source: &str) -> Option<FeatureId> {
        if source == REGIONS_SOURCE {
            self.hovered_region
        } else {
            self.hovered_country
        }
    }

    fn set_hover(&mut self, source: &str, id: Option<FeatureId>) {
        let slot = if source == REGIONS_SOURCE {
            &mut self.hovered_region
        } else {
            &mut self.hovered_country
        };
        if *slot == id {
            return;
        }
        swap_hover(&mut self.surface, source, slot, id);
    }

    fn click_feature(&mut self, id: FeatureId, now: Instant) {
        let (source, _) = self.active_layer();
        let Some(feature) = self.surface.source(source).and_then(|d| d.feature(id)) else {
            return;
        };

        if self.regions_loaded {
            let Some(country) = self.current_country.clone() else {
                return;
            };
            let name = self.registry.region_name(&feature.properties, &country);
            tracing::info!("Region selected: {}, {}", name, country);
            self.emit(MapEvent::LocationSelected(Location::region(name, country)));
            return;
        }

        match self.registry.country_name(&feature.properties) {
            Some(name) => self.select_country(name, now),
            None => tracing::debug!("Clicked country feature {} has no name", id),
        }
    }

    fn select_country(&mut self, country: String, now: Instant) {
        let (Some(url), Some(camera)) = (
            self.registry.region_source(&country).map(str::to_string),
            self.registry.camera_for(&country),
        ) else {
            if let Some(previous) = self.pending.take() {
                tracing::debug!("Drill into {} cancelled by {}", previous.country, country);
            }
            tracing::info!("Country selected: {}", country);
            self.emit(MapEvent::LocationSelected(Location::country(country)));
            return;
        };

        self.next_token += 1;
        if let Some(previous) = self.pending.replace(PendingDrill {
            token: self.next_token,
            country: country.clone(),
            url,
            phase: DrillPhase::Settling {
                ready_at: now + self.settings.settle_delay,
            },
        }) {
            tracing::debug!("Drill into {} superseded by {}", previous.country, country);
        }

        tracing::info!("Drilling into {}", country);
        self.set_hover(COUNTRIES_SOURCE, None);
        self.surface.fly_to(camera, self.settings.fly_duration, now);
    }

    fn emit(&mut self, event: MapEvent) {
        tracing::debug!("Map event: {:?}", event);
        self.events.push(event);
    }
}

/// Clears the previous hover flag, then sets the new one.
fn swap_hover<S: MapSurface>(
    surface: &mut S,
    source: &str,
    slot: &mut Option<FeatureId>,
    next: Option<FeatureId>,
) {
    if let Some(previous) = slot.take() {
        surface.set_feature_state(source, previous, FeatureState { hover: false });
    }
    if let Some(id) = next {
        surface.set_feature_state(source, id, FeatureState { hover: true });
    }
    *slot = next;
}

fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}
