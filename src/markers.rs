//! Marker filtering and co-location grouping.
//!
//! Pure derivations over one [`DirectorySnapshot`]: which records the map
//! should render given the sidebar's per-type flags, and which records share
//! a clicked marker's exact coordinate. Records whose latitude/longitude do
//! not parse to finite floats are excluded from both results; they are never
//! rendered, so they can never be filtered in or grouped.

use crate::models::{DirectorySnapshot, StoreRecord};
use ahash::AHashMap;

/// Per-type "visible" flags, keyed by the type labels observed in the current
/// snapshot. Every newly observed type starts visible; flags change only via
/// explicit toggles from the sidebar. Types absent from the map (a stale map
/// against a fresh snapshot) default to visible.
#[derive(Debug, Clone, Default)]
pub struct TypeVisibility {
    flags: AHashMap<String, bool>,
}

impl TypeVisibility {
    /// Initialize with every type present in the snapshot visible, including
    /// the unspecified bucket when any record lacks a type.
    pub fn from_snapshot(snapshot: &DirectorySnapshot) -> Self {
        let mut flags = AHashMap::new();
        for record in snapshot.iter() {
            flags.entry(record.type_label().to_string()).or_insert(true);
        }
        Self { flags }
    }

    pub fn is_visible(&self, label: &str) -> bool {
        self.flags.get(label).copied().unwrap_or(true)
    }

    pub fn set(&mut self, label: &str, visible: bool) {
        self.flags.insert(label.to_string(), visible);
    }

    pub fn toggle(&mut self, label: &str) {
        let v = self.is_visible(label);
        self.flags.insert(label.to_string(), !v);
    }
}

/// Records to render: type visible and coordinate parseable, in snapshot order.
pub fn filter_visible<'a>(
    snapshot: &'a DirectorySnapshot,
    visibility: &TypeVisibility,
) -> Vec<&'a StoreRecord> {
    snapshot
        .iter()
        .filter(|r| r.coordinate().is_some())
        .filter(|r| visibility.is_visible(r.type_label()))
        .collect()
}

/// All records sharing the target's exact parsed coordinate, in snapshot
/// order, target included. Equality, not proximity: two records group only
/// when both coordinate fields parse to the same decimal values. A target
/// without a parseable coordinate yields an empty group.
pub fn group_by_location<'a>(
    snapshot: &'a DirectorySnapshot,
    target: &StoreRecord,
) -> Vec<&'a StoreRecord> {
    let Some(here) = target.coordinate() else {
        return Vec::new();
    };
    snapshot
        .iter()
        .filter(|r| r.coordinate() == Some(here))
        .collect()
}
