//! Diagram composer: view -> layout -> scene.
//!
//! Draw order, back to front: zebra bands, left-margin id labels, title and
//! column headings, cards (shadow, body, stripe, marker, id tag, text), then
//! ribbons. Every toggle in [`DiagramConfig`] only adds or removes shapes; it
//! never moves anything, so a diagram with links hidden has exactly the same
//! geometry as one with links shown.

use std::collections::BTreeSet;

use super::expand::View;
use super::layout::{Card, LayoutParams, display_text, layout};
use super::ribbon::ribbons_between;
use super::table::{Block, Column, TableModel};
use crate::config::DiagramConfig;
use crate::consts::{
    BOTTOM_MARGIN, CARD_RADIUS, CARD_SHADOW_OFFSET, CARD_TEXT_INSET, COLUMN_WIDTH, HEADER_HEIGHT, LEFT_MARGIN,
    STRIPE_WIDTH, TOP_MARGIN, canvas_width, column_left,
};
use crate::error::SynopticError;
use crate::scene::{Scene, Shape, TextAnchor};
use crate::text::wrap_text_lines;

const ZEBRA_FILL: &str = "#F5F3EE";
const CARD_FILL: &str = "#FFFFFF";
const CARD_BORDER: &str = "#C9C4B8";
const SHADOW_FILL: &str = "#000000";
const SHADOW_OPACITY: f64 = 0.12;
const BODY_COLOR: &str = "#1F1A17";
const MUTED_COLOR: &str = "#7A746A";

/// Which identifiers a diagram shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    One(String),
    Many(BTreeSet<String>),
}

impl Selection {
    /// Resolve against a table. An empty result is an error, not an empty
    /// picture.
    ///
    /// # Errors
    ///
    /// Returns [`SynopticError::NoMatchingRows`] when nothing is visible.
    pub fn resolve(&self, model: &TableModel) -> Result<View, SynopticError> {
        let view = match self {
            Self::All => View::full(model),
            Self::One(id) => View::filter(model, id),
            Self::Many(ids) => View::select(model, ids),
        };
        if view.is_empty() {
            return Err(SynopticError::NoMatchingRows(self.describe()));
        }
        Ok(view)
    }

    fn describe(&self) -> String {
        match self {
            Self::All => "all".to_owned(),
            Self::One(id) => id.clone(),
            Self::Many(ids) => ids.iter().cloned().collect::<Vec<_>>().join(","),
        }
    }
}

/// Compose one diagram.
#[must_use]
pub fn compose(model: &TableModel, view: &View, config: &DiagramConfig, title: &str) -> Scene {
    let header_height = if config.show_header { HEADER_HEIGHT } else { TOP_MARGIN };
    let params = LayoutParams::from_config(config, header_height);
    let layout = layout(model, view, &params);

    let width = canvas_width();
    let mut scene = Scene::new(width, header_height + layout.total_height + BOTTOM_MARGIN);

    // ===== ROW BANDS =====

    for (i, id) in view.visible_ids.iter().enumerate() {
        let Some(slot) = layout.slot(id) else { continue };
        if config.show_zebra && i % 2 == 0 {
            scene.push(Shape::Rect {
                x: 0.0,
                y: slot.top,
                width,
                height: slot.height(),
                fill: ZEBRA_FILL.into(),
                opacity: 1.0,
                stroke: None,
                hatched: false,
            });
        }
        if config.show_row_ids_left {
            scene.push(Shape::label(
                LEFT_MARGIN - CARD_TEXT_INSET,
                slot.center() + config.font_size / 3.0,
                id,
                config.font_size,
                MUTED_COLOR,
                TextAnchor::End,
            ));
        }
    }

    // ===== HEADER =====

    if config.show_header {
        push_heading(&mut scene, width / 2.0, 30.0, title, config.font_size * 1.6);
        for column in Column::ALL {
            let center = column_left(column.index()) + COLUMN_WIDTH / 2.0;
            let heading = &config.column_titles[column.index()];
            push_heading(&mut scene, center, HEADER_HEIGHT - 18.0, heading, config.font_size * 1.2);
        }
    }

    // ===== CARDS =====

    for card in &layout.cards {
        let Some(block) = model.column(card.column).get(card.block_index) else {
            continue;
        };
        push_card(&mut scene, model, card, block, config, &params);
    }

    // ===== RIBBONS =====

    if config.show_links {
        for column in [Column::A, Column::B] {
            let color = &config.column_colors[column.index()];
            scene.shapes.extend(ribbons_between(
                &layout,
                &view.visible_ids,
                column,
                color,
                config.link_opacity,
                config.ribbon_width_scale,
            ));
        }
    }

    tracing::debug!(title, ids = view.visible_ids.len(), shapes = scene.shapes.len(), "composed diagram");
    scene
}

fn push_heading(scene: &mut Scene, x: f64, y: f64, text: &str, font_size: f64) {
    scene.push(Shape::label(x, y, text, font_size, BODY_COLOR, TextAnchor::Middle).bold());
}

fn push_card(
    scene: &mut Scene,
    model: &TableModel,
    card: &Card,
    block: &Block,
    config: &DiagramConfig,
    params: &LayoutParams,
) {
    let column = card.column.index();
    let left = column_left(column);
    let top = card.rect.top;
    let height = card.rect.height();
    let font_size = config.font_size;

    scene.push(Shape::RoundedRect {
        x: left + CARD_SHADOW_OFFSET,
        y: top + CARD_SHADOW_OFFSET,
        width: COLUMN_WIDTH,
        height,
        radius: CARD_RADIUS,
        fill: SHADOW_FILL.into(),
        opacity: SHADOW_OPACITY,
        stroke: None,
        stroke_width: 0.0,
    });
    scene.push(Shape::RoundedRect {
        x: left,
        y: top,
        width: COLUMN_WIDTH,
        height,
        radius: CARD_RADIUS,
        fill: CARD_FILL.into(),
        opacity: 1.0,
        stroke: Some(CARD_BORDER.into()),
        stroke_width: 1.0,
    });

    let has_marker = config.show_markers && !block.marker.is_empty();
    let mut text_left = left + CARD_TEXT_INSET;

    if config.show_stripe {
        scene.push(Shape::rect(left, top, STRIPE_WIDTH, height, &config.column_colors[column]));
        if has_marker {
            let marker = Shape::label(
                left + STRIPE_WIDTH / 2.0,
                top + CARD_TEXT_INSET + font_size * 0.8,
                &block.marker,
                font_size * 0.9,
                &config.marker_text_colors[column],
                TextAnchor::Middle,
            );
            scene.push(marker.bold());
        }
        text_left += STRIPE_WIDTH;
    }

    if config.show_ids {
        let tag = format!("[{}]", model.ordered_ids(block).join(","));
        scene.push(Shape::label(
            left + COLUMN_WIDTH - CARD_TEXT_INSET,
            top + CARD_TEXT_INSET + font_size * 0.7,
            &tag,
            font_size * 0.8,
            MUTED_COLOR,
            TextAnchor::End,
        ));
    }

    scene.push(Shape::Text {
        x: text_left,
        y: top + CARD_TEXT_INSET + font_size,
        lines: wrap_text_lines(&display_text(block, params), params.wrap_chars),
        font_size,
        line_height: params.line_height(),
        color: BODY_COLOR.into(),
        anchor: TextAnchor::Start,
        bold: false,
        rotation: 0.0,
    });
}

// =============================================================================
// BATCH
// =============================================================================

/// One diagram of a batch.
#[derive(Debug, Clone)]
pub struct DiagramRequest {
    pub name: String,
    pub view: View,
    /// Overrides `config.show_header` for this diagram only.
    pub show_header: bool,
}

/// Compose several diagrams of one table, each with its own header toggle.
#[must_use]
pub fn compose_batch(
    model: &TableModel,
    requests: &[DiagramRequest],
    config: &DiagramConfig,
    title: &str,
) -> Vec<(String, Scene)> {
    requests
        .iter()
        .map(|request| {
            let config = config.with_header(request.show_header);
            (request.name.clone(), compose(model, &request.view, &config, title))
        })
        .collect()
}

#[cfg(test)]
#[path = "compose_test.rs"]
mod tests;
