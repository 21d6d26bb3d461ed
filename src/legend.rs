//! Legend/type registry: distinct store types, their display colors, and the
//! per-type counts shown in the sidebar and the on-map legend.
//!
//! All results are pure derivations from one snapshot. Colors are assigned
//! deterministically by first-seen order from a fixed palette, cycling when
//! the palette is exhausted, so a type keeps its color for the lifetime of a
//! snapshot and repeated calls yield identical mappings.

use crate::models::{DirectorySnapshot, UNSPECIFIED_TYPE};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Fallback color for the unspecified bucket (the deployed modal's `#2563eb`).
pub const UNSPECIFIED_COLOR: Rgba = Rgba {
    r: 0x25,
    g: 0x63,
    b: 0xeb,
    a: 255,
};

/// Default marker palette. The first two slots are the historically deployed
/// colors (general bookstore green, mall orange) so the common types keep
/// their familiar look; further types cycle through fixed hues.
pub const DEFAULT_PALETTE: [Rgba; 8] = [
    Rgba { r: 0x4c, g: 0xaf, b: 0x50, a: 255 }, // green
    Rgba { r: 0xff, g: 0x98, b: 0x00, a: 255 }, // orange
    Rgba { r: 0x3f, g: 0x51, b: 0xb5, a: 255 }, // indigo
    Rgba { r: 0xe9, g: 0x1e, b: 0x63, a: 255 }, // pink
    Rgba { r: 0x00, g: 0x96, b: 0x88, a: 255 }, // teal
    Rgba { r: 0x79, g: 0x55, b: 0x48, a: 255 }, // brown
    Rgba { r: 0x9c, g: 0x27, b: 0xb0, a: 255 }, // purple
    Rgba { r: 0x60, g: 0x7d, b: 0x8b, a: 255 }, // blue gray
];

/// One row of the on-map legend and the sidebar filter panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
    pub count: usize,
}

/// Distinct non-empty type labels in first-seen order. The absent/empty type
/// is excluded here; it is counted separately as the unspecified bucket.
pub fn derive_types(snapshot: &DirectorySnapshot) -> Vec<String> {
    let mut seen = AHashMap::new();
    let mut out = Vec::new();
    for record in snapshot.iter() {
        let label = record.type_label();
        if label == UNSPECIFIED_TYPE {
            continue;
        }
        if seen.insert(label.to_string(), ()).is_none() {
            out.push(label.to_string());
        }
    }
    out
}

/// Deterministic color assignment: index = first-seen position modulo palette
/// length. Idempotent for a given type sequence. The unspecified bucket is
/// always present with its fixed fallback color.
pub fn assign_colors(types: &[String], palette: &[Rgba]) -> AHashMap<String, Rgba> {
    let mut out = AHashMap::new();
    for (i, label) in types.iter().enumerate() {
        let color = if palette.is_empty() {
            UNSPECIFIED_COLOR
        } else {
            palette[i % palette.len()]
        };
        out.entry(label.clone()).or_insert(color);
    }
    out.insert(UNSPECIFIED_TYPE.to_string(), UNSPECIFIED_COLOR);
    out
}

/// Color for a label under an assignment, falling back for unknown labels.
pub fn color_for(colors: &AHashMap<String, Rgba>, label: &str) -> Rgba {
    colors.get(label).copied().unwrap_or(UNSPECIFIED_COLOR)
}

/// One entry per derived type in first-seen order with its record count,
/// plus a trailing unspecified entry when any record lacks a type.
pub fn build_legend_entries(
    snapshot: &DirectorySnapshot,
    colors: &AHashMap<String, Rgba>,
) -> Vec<LegendEntry> {
    let types = derive_types(snapshot);
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for record in snapshot.iter() {
        *counts.entry(record.type_label()).or_default() += 1;
    }

    let mut out: Vec<LegendEntry> = types
        .iter()
        .map(|label| LegendEntry {
            label: label.clone(),
            color: color_for(colors, label),
            count: counts.get(label.as_str()).copied().unwrap_or(0),
        })
        .collect();

    if let Some(&n) = counts.get(UNSPECIFIED_TYPE) {
        out.push(LegendEntry {
            label: UNSPECIFIED_TYPE.to_string(),
            color: UNSPECIFIED_COLOR,
            count: n,
        });
    }
    out
}
