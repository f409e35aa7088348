//! # Geometry Model
//!
//! Output of one build: cells and surfaces in document order plus the
//! radius of the world sphere.

use mcnp_cad::CadSurfaceDescriptor;
use mcnp_deck::{CellCardFields, Material};
use mcnp_geom::{parse_cell_geometry, CellGeometry, GrammarError};
use pipeline_types::{SurfaceKind, SurfaceName};
use serde::Serialize;

// =============================================================================
// CELLS
// =============================================================================

/// One cell of the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellEntry {
    pub name: u32,
    /// `None` for a `like n but` cell.
    pub material: Option<Material>,
    /// Tree built from `geometry_text`.
    pub geometry: CellGeometry,
    pub geometry_text: String,
    pub options: String,
    /// Unresolved `like n but` reference.
    pub like: Option<u32>,
    /// 1-based line of the card.
    pub line: usize,
}

impl CellEntry {
    /// Build an entry from split card fields, parsing the geometry.
    pub fn from_fields(fields: CellCardFields, line: usize) -> Result<Self, GrammarError> {
        let geometry = match fields.like {
            Some(reference) => CellGeometry::Like(reference),
            None => parse_cell_geometry(&fields.geometry)?,
        };
        Ok(Self {
            name: fields.name,
            material: fields.material,
            geometry,
            geometry_text: fields.geometry,
            options: fields.options,
            like: fields.like,
            line,
        })
    }

    /// Replace the geometry text and rebuild the tree.
    ///
    /// On error the entry is left unchanged.
    pub fn set_geometry_text(&mut self, text: impl Into<String>) -> Result<(), GrammarError> {
        let text = text.into();
        let geometry = parse_cell_geometry(&text)?;
        self.like = match geometry {
            CellGeometry::Like(reference) => Some(reference),
            CellGeometry::Expression(_) => None,
        };
        self.geometry = geometry;
        self.geometry_text = text;
        Ok(())
    }
}

// =============================================================================
// SURFACES
// =============================================================================

/// One surface of the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceEntry {
    pub name: SurfaceName,
    /// Transform number, passed through untranslated.
    pub transform: Option<i32>,
    pub kind: SurfaceKind,
    pub params: Vec<f64>,
    pub descriptor: CadSurfaceDescriptor,
    pub line: usize,
}

// =============================================================================
// MODEL
// =============================================================================

/// Cells, surfaces and world radius of one deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryModel {
    pub title: Option<String>,
    pub cells: Vec<CellEntry>,
    pub surfaces: Vec<SurfaceEntry>,
    /// Radius of an origin-centred sphere enclosing every surface's inside
    /// point and extent.
    pub world_radius: f64,
}

impl GeometryModel {
    pub fn cell(&self, name: u32) -> Option<&CellEntry> {
        self.cells.iter().find(|c| c.name == name)
    }

    pub fn cell_mut(&mut self, name: u32) -> Option<&mut CellEntry> {
        self.cells.iter_mut().find(|c| c.name == name)
    }

    /// Surface by number, ignoring its boundary marker.
    pub fn surface(&self, id: u32) -> Option<&SurfaceEntry> {
        self.surfaces.iter().find(|s| s.name.id == id)
    }

    /// Surface numbers referenced by cell geometry but not defined.
    ///
    /// Sorted and deduplicated. Only meaningful when no surface limit was
    /// applied.
    pub fn undefined_surfaces(&self) -> Vec<u32> {
        let mut missing: Vec<u32> = self
            .cells
            .iter()
            .flat_map(|c| c.geometry.surface_refs())
            .map(i32::unsigned_abs)
            .filter(|&id| self.surface(id).is_none())
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}

// =============================================================================
// TESTS
// =============================================================================
