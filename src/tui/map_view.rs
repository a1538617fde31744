//! Map canvas widget.
//!
//! Draws the outline layers of the terminal map with braille lines, the
//! hovered feature on top in the hover colour, and its name at the centre of
//! its bounding box. Until the world dataset arrives a static world outline
//! stands in for the country layer.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line, Map, MapResolution},
        Block, Borders,
    },
    Frame,
};

use super::AppState;
use crate::map::{LayerKind, MapFeature, MapSurface, Viewport, REGIONS_SOURCE};
use crate::models::LngLat;

/// Map view widget
pub struct MapView;

impl MapView {
    /// Render the map into `area`.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, now: Instant) {
        let theme = &state.theme;
        let controller = &state.controller;
        let surface = controller.surface();

        let title = match (controller.current_country(), controller.pending_country()) {
            (_, Some(pending)) => format!(" Loading {pending}... "),
            (Some(country), None) => format!(" {country} "),
            (None, None) => " World ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));

        let inner = block.inner(area);
        let viewport = Viewport::from_camera(controller.camera(now), inner.width, inner.height);
        let hover_name = controller.hover_info().map(|info| info.name);

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .background_color(theme.background)
            .x_bounds(viewport.x_bounds())
            .y_bounds(viewport.y_bounds())
            .paint(|ctx| {
                if !controller.world_loaded() {
                    ctx.draw(&Map {
                        color: theme.map_base,
                        resolution: MapResolution::High,
                    });
                    ctx.layer();
                }

                let mut hovered: Vec<&MapFeature> = Vec::new();
                for layer in surface.layers() {
                    if layer.kind != LayerKind::Outline {
                        continue;
                    }
                    let Some(dataset) = surface.source(&layer.source) else {
                        continue;
                    };
                    let color = if layer.source == REGIONS_SOURCE {
                        theme.map_region
                    } else {
                        theme.map_country
                    };

                    for feature in &dataset.features {
                        if !is_visible(feature, &viewport) {
                            continue;
                        }
                        if surface.feature_state(&layer.source, feature.id).hover {
                            hovered.push(feature);
                        } else {
                            draw_feature(ctx, feature, color);
                        }
                    }
                    ctx.layer();
                }

                for feature in &hovered {
                    draw_feature(ctx, feature, theme.map_hover);
                }

                if let (Some(name), Some(center)) = (
                    hover_name.as_ref(),
                    hovered.first().and_then(|f| f.bbox_center()),
                ) {
                    ctx.print(
                        center.lon,
                        center.lat,
                        Span::styled(
                            name.clone(),
                            Style::default()
                                .fg(theme.map_hover)
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            });

        f.render_widget(canvas, area);
    }
}

fn is_visible(feature: &MapFeature, viewport: &Viewport) -> bool {
    feature.bbox.is_some_and(|rect| {
        viewport.intersects(
            LngLat::new(rect.min().x, rect.min().y),
            LngLat::new(rect.max().x, rect.max().y),
        )
    })
}

fn draw_feature(ctx: &mut Context, feature: &MapFeature, color: Color) {
    for polygon in &feature.shape.0 {
        let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
        for ring in rings {
            for segment in ring.0.windows(2) {
                let (a, b) = (segment[0], segment[1]);
                ctx.draw(&Line {
                    x1: a.x,
                    y1: a.y,
                    x2: b.x,
                    y2: b.y,
                    color,
                });
            }
        }
    }
}
