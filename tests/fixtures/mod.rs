//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test file uses every fixture

use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use newsglobe::api::NewsSource;
use newsglobe::error::{LayerLoadError, NewsError};
use newsglobe::map::{
    ControllerSettings, Dataset, GeometryProvider, MapController, MapSurface, TerminalMap,
};
use newsglobe::models::{Article, NewsResult};
use newsglobe::registry::LocationRegistry;

// ============================================================================
// Boundary datasets
// ============================================================================

/// A square polygon feature with one name property.
pub fn square(name_key: &str, name: &str, lon: f64, lat: f64, size: f64) -> Value {
    json!({
        "type": "Feature",
        "properties": { name_key: name },
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [lon, lat],
                [lon + size, lat],
                [lon + size, lat + size],
                [lon, lat + size],
                [lon, lat]
            ]]
        }
    })
}

/// A FeatureCollection document.
pub fn collection(features: Vec<Value>) -> String {
    json!({ "type": "FeatureCollection", "features": features }).to_string()
}

/// URL of the test world dataset.
pub const WORLD_URL: &str = "mem://world";

/// World dataset: Germany and France (registered) plus Chile (not registered).
///
/// Germany spans lon 6..16, lat 47..57; France spans -4..6, 42..52; Chile
/// spans -75..-65, -45..-35.
pub fn world_geojson() -> String {
    collection(vec![
        square("ADMIN", "Germany", 6.0, 47.0, 10.0),
        square("ADMIN", "France", -4.0, 42.0, 10.0),
        square("ADMIN", "Chile", -75.0, -45.0, 10.0),
    ])
}

/// German regions keyed by the dataset's `NAME_1` property.
///
/// Bavaria spans lon 10..14, lat 47..51; Saxony spans 10..14, 51..55.
pub fn germany_regions_geojson() -> String {
    collection(vec![
        square("NAME_1", "Bavaria", 10.0, 47.0, 4.0),
        square("NAME_1", "Saxony", 10.0, 51.0, 4.0),
    ])
}

/// French regions keyed by `nom`, with a fallback `name` key.
pub fn france_regions_geojson() -> String {
    collection(vec![square("nom", "Bretagne", -4.0, 47.0, 3.0)])
}

/// Region dataset URL the built-in registry holds for `country`.
pub fn region_url(country: &str) -> String {
    LocationRegistry::builtin()
        .region_source(country)
        .map(str::to_string)
        .unwrap_or_else(|| panic!("{country} has no region dataset"))
}

/// Geometry provider serving GeoJSON documents from memory.
///
/// Unknown URLs fail with a fetch error. Every fetch is counted per URL.
#[derive(Default)]
pub struct MemoryProvider {
    documents: HashMap<String, String>,
    fetches: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
}

impl MemoryProvider {
    /// Provider with the test world and the German and French region datasets.
    pub fn standard() -> Self {
        Self::default()
            .with(WORLD_URL, world_geojson())
            .with(&region_url("Germany"), germany_regions_geojson())
            .with(&region_url("France"), france_regions_geojson())
    }

    /// Serves `text` for `url`.
    pub fn with(mut self, url: &str, text: String) -> Self {
        self.documents.insert(url.to_string(), text);
        self
    }

    /// Removes the document for `url` so fetching it fails.
    pub fn without(mut self, url: &str) -> Self {
        self.documents.remove(url);
        self
    }

    /// Sleeps before answering each fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches issued for `url`.
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or_default()
    }
}

impl GeometryProvider for MemoryProvider {
    fn fetch(&self, url: &str) -> Result<Dataset, LayerLoadError> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default() += 1;

        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        match self.documents.get(url) {
            Some(text) => Dataset::parse(url, text),
            None => Err(LayerLoadError::Fetch {
                url: url.to_string(),
                message: "not found".to_string(),
            }),
        }
    }
}

/// Fast transition timings for tests.
pub fn test_settings() -> ControllerSettings {
    ControllerSettings {
        fly_duration: Duration::from_millis(100),
        settle_delay: Duration::from_millis(50),
    }
}

/// Controller over a terminal map with the test world installed.
pub fn controller_with(provider: Arc<MemoryProvider>) -> MapController<TerminalMap> {
    let mut controller = MapController::new(
        TerminalMap::new(),
        Arc::new(LocationRegistry::builtin()),
        provider,
        test_settings(),
    );
    let world = Dataset::parse(WORLD_URL, &world_geojson()).expect("world dataset parses");
    controller
        .install_world(world)
        .expect("world dataset installs");
    controller
}

/// Ticks `controller` until `done` holds or two seconds pass.
///
/// Returns whether the condition was met. `now` is the logical time passed to
/// `tick`, so settle timers are expired by the caller, not by this loop.
pub fn tick_until<S: MapSurface>(
    controller: &mut MapController<S>,
    now: Instant,
    mut done: impl FnMut(&MapController<S>) -> bool,
) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        controller.tick(now);
        if done(controller) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

// ============================================================================
// News
// ============================================================================

/// A canned response from [`FakeNews`].
#[derive(Debug, Clone)]
pub enum Reply {
    /// Articles to return
    Articles(Vec<Article>),
    /// Empty result with an optional server message
    Empty(Option<String>),
    /// HTTP error with a server detail
    Fail(String),
}

/// Scripted news source that records every request.
#[derive(Default)]
pub struct FakeNews {
    replies: HashMap<String, (Reply, Duration)>,
    requests: Mutex<Vec<(String, u8)>>,
    completed: AtomicUsize,
}

impl FakeNews {
    /// Answers `location` with `reply` immediately.
    pub fn reply(self, location: &str, reply: Reply) -> Self {
        self.reply_after(location, reply, Duration::ZERO)
    }

    /// Answers `location` with `reply` after `delay`.
    pub fn reply_after(mut self, location: &str, reply: Reply, delay: Duration) -> Self {
        self.replies.insert(location.to_string(), (reply, delay));
        self
    }

    /// Requests received so far: location string and article count.
    pub fn requests(&self) -> Vec<(String, u8)> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests that have returned.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl NewsSource for FakeNews {
    fn fetch_news(&self, location: &str, count: u8) -> Result<NewsResult, NewsError> {
        self.requests
            .lock()
            .unwrap()
            .push((location.to_string(), count));

        let (reply, delay) = self
            .replies
            .get(location)
            .cloned()
            .unwrap_or((Reply::Empty(None), Duration::ZERO));
        thread::sleep(delay);

        let result = match reply {
            Reply::Articles(articles) => Ok(NewsResult::with_articles(articles)),
            Reply::Empty(message) => Ok(NewsResult::empty(message)),
            Reply::Fail(detail) => Err(NewsError::Http {
                status: 500,
                detail,
            }),
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

/// A plain article with a source and publication date.
pub fn article(title: &str) -> Article {
    Article::new(title, "Test Wire").with_published_at("2024-03-05T10:00:00Z")
}

/// Polls `check` every few milliseconds until it holds or two seconds pass.
pub fn wait_for(mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

// ============================================================================
// Mock news backend
// ============================================================================

/// A news backend served by axum on a background thread.
///
/// - `/api/news/France` returns up to `count` of five articles
/// - `/api/news/Atlantis` returns an empty list with a message
/// - `/api/news/Errorland` returns 500 with `{"detail": "boom"}`
/// - `/api/news/Nowhere` returns 422 with a structured `detail`
/// - any other location echoes its decoded name as the article title
/// - `/api/countries` lists Germany and Chile
/// - `/api/countries/Germany/regions` lists Bavaria and Saxony, other
///   countries return 404
pub struct MockBackend {
    addr: SocketAddr,
}

impl MockBackend {
    /// Starts the server on an ephemeral port.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock backend");
        listener
            .set_nonblocking(true)
            .expect("set mock backend non-blocking");
        let addr = listener.local_addr().expect("mock backend address");

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("build tokio runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, router())
                    .await
                    .expect("serve mock backend");
            });
        });

        Self { addr }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

fn router() -> Router {
    Router::new()
        .route("/api/news/{location}", get(news))
        .route("/api/countries", get(countries))
        .route("/api/countries/{name}/regions", get(regions))
}

async fn news(
    Path(location): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let count = query
        .get("count")
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(3);

    match location.as_str() {
        "France" => {
            let articles: Vec<Value> = (1..=5)
                .take(count)
                .map(|i| {
                    json!({
                        "title": format!("French story {i}"),
                        "description": "",
                        "source": "Le Test",
                        "url": format!("https://example.com/fr/{i}"),
                        "publishedAt": "2024-03-05T10:00:00Z",
                        "imageUrl": ""
                    })
                })
                .collect();
            Json(json!({ "articles": articles, "location": "France" })).into_response()
        }
        "Atlantis" => Json(json!({
            "articles": [],
            "message": "No recent news for Atlantis"
        }))
        .into_response(),
        "Errorland" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "boom" })),
        )
            .into_response(),
        "Nowhere" => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["path", "location"], "msg": "invalid" }] })),
        )
            .into_response(),
        other => Json(json!({
            "articles": [{ "title": other, "source": "Echo" }]
        }))
        .into_response(),
    }
}

async fn countries() -> Json<Value> {
    Json(json!({
        "countries": [
            { "name": "Germany", "code": "DEU", "iso2": "DE", "capital": "Berlin", "hasRegions": true },
            { "name": "Chile", "code": "CHL", "iso2": "CL", "capital": "Santiago", "hasRegions": false }
        ],
        "total": 2
    }))
}

async fn regions(Path(name): Path<String>) -> Response {
    if name == "Germany" {
        Json(json!({
            "country": "Germany",
            "regions": [
                { "name": "Bavaria", "code": "BY", "capital": "Munich" },
                { "name": "Saxony", "code": "SN", "capital": "Dresden" }
            ],
            "total": 2
        }))
        .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": format!("Country '{name}' not found") })),
        )
            .into_response()
    }
}
