//! Integration tests for the World/Regions map interaction.
//!
//! Drives a controller over the terminal map with in-memory boundary
//! datasets:
//! - drilling into a registered country loads its region dataset
//! - unregistered countries select country news directly
//! - only the active layer reacts to the pointer
//! - going back and superseding clicks discard pending work

use std::sync::Arc;
use std::time::{Duration, Instant};

use newsglobe::map::{
    MapController, MapEvent, MapSurface, PointerEvent, TerminalMap, COUNTRIES_FILL,
    COUNTRIES_SOURCE, REGIONS_FILL, REGIONS_OUTLINE, REGIONS_SOURCE,
};
use newsglobe::models::{LngLat, Location, ViewMode};
use newsglobe::registry::LocationRegistry;

mod fixtures;
use fixtures::*;

const IN_GERMANY: LngLat = LngLat { lon: 7.0, lat: 55.0 };
const IN_FRANCE: LngLat = LngLat { lon: 0.0, lat: 45.0 };
const IN_CHILE: LngLat = LngLat {
    lon: -70.0,
    lat: -40.0,
};
const IN_BAVARIA: LngLat = LngLat { lon: 12.0, lat: 49.0 };
const IN_SAXONY: LngLat = LngLat { lon: 12.0, lat: 53.0 };

/// Time after the settle delay has passed for a click at `t0`.
fn settled(t0: Instant) -> Instant {
    t0 + test_settings().settle_delay + Duration::from_millis(10)
}

#[test]
fn test_drill_into_registered_country_loads_regions() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(Arc::clone(&provider));
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);

    // Nothing is selected yet; the camera flies while the drill settles
    assert!(controller.take_events().is_empty());
    assert_eq!(controller.pending_country(), Some("Germany"));
    assert_eq!(controller.view_mode(), ViewMode::World);
    assert_ne!(
        controller.camera(t0 + test_settings().fly_duration),
        controller.camera(t0)
    );

    // The region dataset is not requested before the settle delay
    controller.tick(t0);
    assert_eq!(provider.fetch_count(&region_url("Germany")), 0);

    assert!(tick_until(&mut controller, settled(t0), |c| c.regions_loaded()));

    let regions = controller
        .surface()
        .source(REGIONS_SOURCE)
        .expect("region source installed");
    assert_eq!(regions.url, region_url("Germany"));
    assert!(controller.surface().has_layer(REGIONS_FILL));
    assert!(controller.surface().has_layer(REGIONS_OUTLINE));
    assert_eq!(controller.view_mode(), ViewMode::Regions);
    assert_eq!(controller.current_country(), Some("Germany"));
    assert_eq!(controller.pending_country(), None);
    assert_eq!(
        controller.take_events(),
        vec![MapEvent::ViewChanged {
            mode: ViewMode::Regions,
            country: Some("Germany".to_string()),
        }]
    );
}

#[test]
fn test_unregistered_country_selects_country_news() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(Arc::clone(&provider));
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_CHILE), t0);

    assert_eq!(
        controller.take_events(),
        vec![MapEvent::LocationSelected(Location::country("Chile"))]
    );
    assert_eq!(controller.pending_country(), None);

    controller.tick(settled(t0));
    assert!(controller.surface().source(REGIONS_SOURCE).is_none());
    assert!(!controller.surface().has_layer(REGIONS_FILL));
    assert_eq!(controller.view_mode(), ViewMode::World);
    assert!(controller.take_events().is_empty());
}

#[test]
fn test_region_click_carries_country() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(provider);
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);
    assert!(tick_until(&mut controller, settled(t0), |c| c.regions_loaded()));
    controller.take_events();

    controller.handle_pointer(PointerEvent::Click(IN_BAVARIA), settled(t0));
    assert_eq!(
        controller.take_events(),
        vec![MapEvent::LocationSelected(Location::region(
            "Bavaria", "Germany"
        ))]
    );
}

#[test]
fn test_country_layer_inert_while_regions_active() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(provider);
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);
    assert!(tick_until(&mut controller, settled(t0), |c| c.regions_loaded()));
    controller.take_events();
    let now = settled(t0);

    // Over France: a country, but not a German region
    controller.handle_pointer(PointerEvent::Move(IN_FRANCE), now);
    assert_eq!(
        controller
            .surface()
            .hovered_features(COUNTRIES_SOURCE)
            .count(),
        0
    );
    assert_eq!(controller.hover_info(), None);

    controller.handle_pointer(PointerEvent::Click(IN_FRANCE), now);
    assert!(controller.take_events().is_empty());
    assert_eq!(controller.pending_country(), None);

    // Regions hover one at a time
    controller.handle_pointer(PointerEvent::Move(IN_BAVARIA), now);
    controller.handle_pointer(PointerEvent::Move(IN_SAXONY), now);
    let hovered: Vec<_> = controller
        .surface()
        .hovered_features(REGIONS_SOURCE)
        .collect();
    assert_eq!(hovered.len(), 1);
    assert_eq!(controller.hover_info().map(|h| h.name), Some("Saxony".to_string()));
}

#[test]
fn test_world_hover_is_exclusive() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(provider);
    let now = Instant::now();

    for point in [IN_GERMANY, IN_FRANCE, IN_CHILE, IN_GERMANY] {
        controller.handle_pointer(PointerEvent::Move(point), now);
        assert_eq!(
            controller
                .surface()
                .hovered_features(COUNTRIES_SOURCE)
                .count(),
            1
        );
    }

    let info = controller.hover_info().expect("hovering Germany");
    assert_eq!(info.name, "Germany");
    assert!(info.has_regions);
}

#[test]
fn test_go_back_returns_to_world() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(provider);
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);
    assert!(tick_until(&mut controller, settled(t0), |c| c.regions_loaded()));
    controller.take_events();
    let now = settled(t0);

    assert!(controller.go_back(now));

    assert!(controller.surface().source(REGIONS_SOURCE).is_none());
    assert!(!controller.surface().has_layer(REGIONS_FILL));
    assert!(controller.surface().has_layer(COUNTRIES_FILL));
    assert!(!controller.regions_loaded());
    assert_eq!(controller.view_mode(), ViewMode::World);
    assert_eq!(controller.current_country(), None);
    assert_eq!(
        controller.take_events(),
        vec![
            MapEvent::ViewChanged {
                mode: ViewMode::World,
                country: None,
            },
            MapEvent::ClosePopup,
        ]
    );

    // Countries are interactive again
    controller.handle_pointer(PointerEvent::Click(IN_CHILE), now);
    assert_eq!(
        controller.take_events(),
        vec![MapEvent::LocationSelected(Location::country("Chile"))]
    );
}

#[test]
fn test_go_back_while_settling_cancels_load() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(Arc::clone(&provider));
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);
    assert!(controller.go_back(t0));
    controller.take_events();

    controller.tick(settled(t0));
    assert_eq!(provider.fetch_count(&region_url("Germany")), 0);
    assert_eq!(controller.pending_country(), None);
    assert_eq!(controller.view_mode(), ViewMode::World);
}

#[test]
fn test_load_finishing_after_go_back_is_discarded() {
    let provider = Arc::new(MemoryProvider::standard().with_delay(Duration::from_millis(50)));
    let mut controller = controller_with(Arc::clone(&provider));
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);
    controller.tick(settled(t0));
    assert_eq!(provider.fetch_count(&region_url("Germany")), 1);

    assert!(controller.go_back(settled(t0)));
    controller.take_events();

    // Give the load time to arrive, then make sure it was ignored
    std::thread::sleep(Duration::from_millis(150));
    controller.tick(settled(t0));

    assert!(!controller.regions_loaded());
    assert!(controller.surface().source(REGIONS_SOURCE).is_none());
    assert_eq!(controller.view_mode(), ViewMode::World);
    assert!(controller.take_events().is_empty());
}

#[test]
fn test_later_country_click_supersedes_pending_drill() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(Arc::clone(&provider));
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);
    controller.handle_pointer(PointerEvent::Click(IN_FRANCE), t0);
    assert_eq!(controller.pending_country(), Some("France"));

    assert!(tick_until(&mut controller, settled(t0), |c| c.regions_loaded()));

    assert_eq!(provider.fetch_count(&region_url("Germany")), 0);
    assert_eq!(provider.fetch_count(&region_url("France")), 1);
    assert_eq!(controller.current_country(), Some("France"));

    // France's dataset names regions under `nom`
    controller.handle_pointer(
        PointerEvent::Click(LngLat::new(-2.5, 48.5)),
        settled(t0),
    );
    let events = controller.take_events();
    assert_eq!(
        events.last(),
        Some(&MapEvent::LocationSelected(Location::region(
            "Bretagne", "France"
        )))
    );
}

#[test]
fn test_region_load_failure_falls_back_to_country_news() {
    let provider = Arc::new(MemoryProvider::standard().without(&region_url("Germany")));
    let mut controller = controller_with(Arc::clone(&provider));
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);

    assert!(tick_until(&mut controller, settled(t0), |c| c
        .pending_country()
        .is_none()));
    let events = controller.take_events();

    assert_eq!(
        events,
        vec![MapEvent::LocationSelected(Location::country("Germany"))]
    );
    assert!(!controller.regions_loaded());
    assert_eq!(controller.view_mode(), ViewMode::World);
    assert!(controller.surface().source(REGIONS_SOURCE).is_none());
}

#[test]
fn test_load_world_in_background() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = MapController::new(
        TerminalMap::new(),
        Arc::new(LocationRegistry::builtin()),
        provider,
        test_settings(),
    );
    assert!(!controller.world_loaded());

    controller.load_world(WORLD_URL);
    assert!(tick_until(&mut controller, Instant::now(), |c| c.world_loaded()));
    assert!(controller.surface().has_layer(COUNTRIES_FILL));
    assert_eq!(controller.world_load_error(), None);
}

#[test]
fn test_load_world_failure_is_reported() {
    let provider = Arc::new(MemoryProvider::default());
    let mut controller = MapController::new(
        TerminalMap::new(),
        Arc::new(LocationRegistry::builtin()),
        provider,
        test_settings(),
    );

    controller.load_world("mem://missing");
    assert!(tick_until(&mut controller, Instant::now(), |c| c
        .world_load_error()
        .is_some()));
    assert!(!controller.world_loaded());
    assert!(!controller.surface().has_layer(COUNTRIES_FILL));
}

#[test]
fn test_unregistered_click_cancels_pending_drill() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(Arc::clone(&provider));
    let t0 = Instant::now();

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);
    controller.handle_pointer(PointerEvent::Click(IN_CHILE), t0);

    assert_eq!(
        controller.take_events(),
        vec![MapEvent::LocationSelected(Location::country("Chile"))]
    );
    assert_eq!(controller.pending_country(), None);

    // Past the settle delay the Germany drill must not resume
    controller.tick(settled(t0));
    std::thread::sleep(Duration::from_millis(50));
    controller.tick(settled(t0));

    assert_eq!(provider.fetch_count(&region_url("Germany")), 0);
    assert!(!controller.regions_loaded());
    assert!(controller.surface().source(REGIONS_SOURCE).is_none());
    assert_eq!(controller.view_mode(), ViewMode::World);
    assert_eq!(controller.current_country(), None);
    assert!(controller.take_events().is_empty());
}

#[test]
fn test_hover_step_does_not_interrupt_fly_to() {
    let provider = Arc::new(MemoryProvider::standard());
    let mut controller = controller_with(provider);
    let registry = LocationRegistry::builtin();
    let target = registry.camera_for("Germany").expect("Germany camera");
    let t0 = Instant::now();
    let fly = test_settings().fly_duration;

    controller.handle_pointer(PointerEvent::Click(IN_GERMANY), t0);
    let midway = t0 + fly / 2;
    assert!(controller.surface().is_moving(midway));

    controller.hover_step(true, midway);
    assert!(controller.surface().is_moving(midway));
    assert_eq!(controller.camera(t0 + fly), target);

    // Once the camera has settled the hovered feature is brought into view
    let after = t0 + fly + Duration::from_millis(1);
    controller.hover_step(true, after);
    let camera = controller.camera(after);
    assert_eq!(camera.zoom, target.zoom);
    assert_ne!(camera.center, target.center);
}
