//! # Model Builder
//!
//! Runs the pipeline stages over one deck.

use std::collections::HashMap;

use config::constants::GlobalConfig;
use mcnp_cad::{translate_surfaces, CadTranslator, SurfaceInput};
use mcnp_deck::{Deck, SegmentOptions};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::model::{CellEntry, GeometryModel, SurfaceEntry};

// =============================================================================
// OPTIONS
// =============================================================================

/// Build options.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    /// Block layout of the input text.
    pub segment: SegmentOptions,
    /// Stop after this many cell cards.
    pub cell_limit: Option<usize>,
    /// Stop after this many surface cards.
    pub surface_limit: Option<usize>,
    /// Parse geometry and translate surfaces on the `rayon` pool.
    pub parallel: bool,
    pub config: GlobalConfig,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            segment: SegmentOptions::default(),
            cell_limit: None,
            surface_limit: None,
            parallel: true,
            config: GlobalConfig::default(),
        }
    }
}

impl ModelOptions {
    /// Limit both cell and surface cards, e.g. for a preview.
    pub fn preview(limit: usize) -> Self {
        Self {
            cell_limit: Some(limit),
            surface_limit: Some(limit),
            ..Self::default()
        }
    }
}

// =============================================================================
// BUILD
// =============================================================================

/// Build the geometry model of `text`.
///
/// Cells and surfaces keep document order. The first failing card in
/// document order is reported; no card is skipped.
///
/// ## Example
///
/// ```rust
/// use mcnp_model::{build_model, ModelOptions};
///
/// let text = "box\n1 0 -1 imp:n=1\n2 0 1 imp:n=0\n\n1 so 10\n\nmode n\n";
/// let model = build_model(text, &ModelOptions::default()).unwrap();
/// assert_eq!(model.cells.len(), 2);
/// assert_eq!(model.world_radius, 11.0);
/// ```
pub fn build_model(text: &str, options: &ModelOptions) -> Result<GeometryModel> {
    let deck = Deck::with_options(text, &options.segment)?;

    let cells = build_cells(&deck, options)?;
    let (surfaces, world_radius) = build_surfaces(&deck, options)?;

    debug!(
        cells = cells.len(),
        surfaces = surfaces.len(),
        world_radius,
        "built geometry model"
    );

    Ok(GeometryModel {
        title: deck.title().map(|t| t.trim().to_string()),
        cells,
        surfaces,
        world_radius,
    })
}

fn build_cells(deck: &Deck<'_>, options: &ModelOptions) -> Result<Vec<CellEntry>> {
    let mut seen: HashMap<u32, usize> = HashMap::new();
    let mut split = Vec::new();
    for result in deck.cell_cards().take(options.cell_limit.unwrap_or(usize::MAX)) {
        let (card, fields) = result?;
        if let Some(&first_line) = seen.get(&fields.name) {
            return Err(ModelError::DuplicateCell {
                cell: fields.name,
                line: card.line,
                first_line,
            });
        }
        seen.insert(fields.name, card.line);
        split.push((card.line, fields));
    }

    let build = |(line, fields): (usize, mcnp_deck::CellCardFields)| {
        let cell = fields.name;
        CellEntry::from_fields(fields, line).map_err(|source| ModelError::Grammar { cell, line, source })
    };
    let results: Vec<Result<CellEntry>> = if options.parallel {
        split.into_par_iter().map(build).collect()
    } else {
        split.into_iter().map(build).collect()
    };
    results.into_iter().collect()
}

fn build_surfaces(deck: &Deck<'_>, options: &ModelOptions) -> Result<(Vec<SurfaceEntry>, f64)> {
    let mut seen: HashMap<u32, usize> = HashMap::new();
    let mut cards = Vec::new();
    for result in deck.surface_cards().take(options.surface_limit.unwrap_or(usize::MAX)) {
        let (card, fields) = result?;
        if let Some(&first_line) = seen.get(&fields.name.id) {
            return Err(ModelError::DuplicateSurface {
                surface: fields.name.id,
                line: card.line,
                first_line,
            });
        }
        seen.insert(fields.name.id, card.line);
        cards.push((card.line, fields));
    }

    let inputs: Vec<SurfaceInput<'_, usize>> = cards
        .iter()
        .enumerate()
        .map(|(index, (_, fields))| SurfaceInput {
            key: index,
            kind: fields.kind,
            params: &fields.params,
        })
        .collect();
    let translator = CadTranslator::new(&options.config);
    let set = translate_surfaces(&translator, &inputs, options.parallel).map_err(|e| {
        let (line, fields) = &cards[e.key];
        ModelError::Cad {
            surface: fields.name,
            line: *line,
            source: e.error,
        }
    })?;

    let world_radius = set.world_radius;
    let surfaces = set
        .surfaces
        .into_iter()
        .zip(cards.iter())
        .map(|((_, descriptor), (line, fields))| SurfaceEntry {
            name: fields.name,
            transform: fields.transform,
            kind: fields.kind,
            params: fields.params.clone(),
            descriptor,
            line: *line,
        })
        .collect();
    Ok((surfaces, world_radius))
}
