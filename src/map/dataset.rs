//! Boundary datasets and the provider that loads them.
//!
//! A dataset is a parsed GeoJSON FeatureCollection. Every feature gets a
//! numeric id equal to its position in the collection, so ids are stable for
//! the lifetime of a loaded source and usable as feature-state keys.

use crate::error::LayerLoadError;
use crate::models::LngLat;
use geo::{BoundingRect, Contains, Geometry, MultiPolygon, Point, Rect};
use geojson::GeoJson;
use serde_json::{Map, Value};
use std::time::Duration;

/// Dataset-local feature id.
pub type FeatureId = u64;

/// One polygonal feature of a dataset.
#[derive(Debug, Clone)]
pub struct MapFeature {
    /// Position of the feature in its collection
    pub id: FeatureId,
    /// GeoJSON properties
    pub properties: Map<String, Value>,
    /// Polygon outline(s)
    pub shape: MultiPolygon<f64>,
    /// Bounding box, `None` for empty shapes
    pub bbox: Option<Rect<f64>>,
}

impl MapFeature {
    /// Returns true if `point` lies inside the feature.
    #[must_use]
    pub fn contains(&self, point: LngLat) -> bool {
        let Some(bbox) = self.bbox else {
            return false;
        };
        let (min, max) = (bbox.min(), bbox.max());
        if point.lon < min.x || point.lon > max.x || point.lat < min.y || point.lat > max.y {
            return false;
        }
        self.shape.contains(&Point::new(point.lon, point.lat))
    }

    /// Center of the bounding box.
    #[must_use]
    pub fn bbox_center(&self) -> Option<LngLat> {
        self.bbox.map(|rect| {
            let center = rect.center();
            LngLat::new(center.x, center.y)
        })
    }
}

/// A parsed boundary dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Where the dataset was loaded from
    pub url: String,
    /// Polygonal features in collection order
    pub features: Vec<MapFeature>,
}

impl Dataset {
    /// Parses GeoJSON text.
    pub fn parse(url: &str, text: &str) -> Result<Self, LayerLoadError> {
        let geojson: GeoJson = text.parse().map_err(|e: geojson::Error| LayerLoadError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Self::from_geojson(url, geojson)
    }

    /// Builds a dataset from an already parsed document.
    ///
    /// Features without polygonal geometry are skipped but still consume an id.
    pub fn from_geojson(url: &str, geojson: GeoJson) -> Result<Self, LayerLoadError> {
        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(LayerLoadError::NotFeatureCollection {
                url: url.to_string(),
            });
        };

        let mut features = Vec::with_capacity(collection.features.len());
        let mut skipped = 0usize;

        for (index, feature) in collection.features.into_iter().enumerate() {
            let properties = feature.properties.unwrap_or_default();
            let shape = feature
                .geometry
                .and_then(|g| Geometry::<f64>::try_from(g.value).ok())
                .and_then(into_multi_polygon);

            let Some(shape) = shape else {
                skipped += 1;
                continue;
            };

            let bbox = shape.bounding_rect();
            features.push(MapFeature {
                id: index as FeatureId,
                properties,
                shape,
                bbox,
            });
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} non-polygon features in {}", skipped, url);
        }

        Ok(Self {
            url: url.to_string(),
            features,
        })
    }

    /// Number of polygonal features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the dataset has no polygonal features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Looks up a feature by id.
    #[must_use]
    pub fn feature(&self, id: FeatureId) -> Option<&MapFeature> {
        self.features
            .binary_search_by_key(&id, |f| f.id)
            .ok()
            .map(|index| &self.features[index])
    }

    /// Topmost feature containing `point`.
    ///
    /// Later features are drawn above earlier ones, so the search runs in
    /// reverse collection order.
    #[must_use]
    pub fn feature_at(&self, point: LngLat) -> Option<&MapFeature> {
        self.features.iter().rev().find(|f| f.contains(point))
    }
}

fn into_multi_polygon(geometry: Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon])),
        Geometry::MultiPolygon(multi) => Some(multi),
        Geometry::GeometryCollection(collection) => {
            let polygons: Vec<_> = collection
                .into_iter()
                .filter_map(into_multi_polygon)
                .flat_map(|m| m.0)
                .collect();
            (!polygons.is_empty()).then(|| MultiPolygon(polygons))
        }
        _ => None,
    }
}

/// Loads boundary datasets by URL.
///
/// Implementations run on background threads, so they must be shareable.
pub trait GeometryProvider: Send + Sync {
    /// Fetches and parses the dataset at `url`.
    fn fetch(&self, url: &str) -> Result<Dataset, LayerLoadError>;
}

/// Geometry provider backed by blocking HTTP.
pub struct HttpGeometryProvider {
    client: reqwest::blocking::Client,
}

impl HttpGeometryProvider {
    /// Creates a provider with the given request timeout.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("newsglobe/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl GeometryProvider for HttpGeometryProvider {
    fn fetch(&self, url: &str) -> Result<Dataset, LayerLoadError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| LayerLoadError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LayerLoadError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| LayerLoadError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let dataset = Dataset::parse(url, &body)?;
        tracing::info!("Loaded {} features from {}", dataset.len(), url);
        Ok(dataset)
    }
}
