//! Province layers and the viewport bounds coordinator.
//!
//! Each selectable base layer is a [`RegionLayer`]: a named province with a
//! fixed bounding box, a zoom range, and a raster overlay. Switching layers
//! has an ordering constraint imposed by the map widget: a `set_view` call
//! that targets coordinates outside the currently active bounding constraint
//! is rejected, so the old constraint must be cleared before the animated
//! pan/zoom starts and the new one applied only after the animation settles.
//! [`BoundsCoordinator`] owns that sequence, including the single cancelable
//! deferred-application slot.

use crate::models::Coordinate;
use std::time::{Duration, Instant};

/// A geographic box given by its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl LatLngBounds {
    pub const fn new(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        c.lat >= self.south_west.lat
            && c.lat <= self.north_east.lat
            && c.lon >= self.south_west.lon
            && c.lon <= self.north_east.lon
    }
}

/// A named province selectable as an alternate base layer. Static
/// configuration, not derived from data.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionLayer {
    /// Display name as shown in the layer control.
    pub name: &'static str,
    /// Short key used for panes and asset paths.
    pub key: &'static str,
    /// Viewport constraint applied after a switch settles.
    pub bounds: LatLngBounds,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub default_zoom: u8,
    pub center: Coordinate,
    /// Raster overlay for the province and the extent it covers.
    pub overlay_image: &'static str,
    pub overlay_bounds: LatLngBounds,
}

const fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate { lat, lon }
}

/// The three shipped provinces. The first entry is the default region.
pub static REGIONS: [RegionLayer; 3] = [
    RegionLayer {
        name: "จังหวัดเชียงใหม่",
        key: "CNX",
        bounds: LatLngBounds::new(coord(16.51, 95.806), coord(20.953, 100.708)),
        min_zoom: 9,
        max_zoom: 18,
        default_zoom: 9,
        center: coord(18.802500, 100.967500),
        overlay_image: "/images/cnx.png",
        overlay_bounds: LatLngBounds::new(coord(16.51, 95.806), coord(20.953, 101.708)),
    },
    RegionLayer {
        name: "จังหวัดพิษณุโลก",
        key: "PHK",
        bounds: LatLngBounds::new(coord(14.936, 97.73), coord(19.247, 102.45)),
        min_zoom: 9,
        max_zoom: 18,
        default_zoom: 8,
        center: coord(17.09, 100.59),
        overlay_image: "/images/phk.png",
        overlay_bounds: LatLngBounds::new(coord(14.936, 97.73), coord(19.247, 103.45)),
    },
    RegionLayer {
        name: "จังหวัดกรุงเทพมหานคร",
        key: "BKK",
        bounds: LatLngBounds::new(coord(13.221, 99.866), coord(14.326, 101.2)),
        min_zoom: 11,
        max_zoom: 18,
        default_zoom: 9,
        center: coord(13.763300, 100.520000),
        overlay_image: "/images/bkk.png",
        overlay_bounds: LatLngBounds::new(coord(13.221, 99.866), coord(14.326, 101.335)),
    },
];

pub fn default_region() -> &'static RegionLayer {
    &REGIONS[0]
}

pub fn find_region(name: &str) -> Option<&'static RegionLayer> {
    REGIONS.iter().find(|r| r.name == name || r.key == name)
}

/// Nominal duration of the pan/zoom animation; the new bounding constraint is
/// applied once this has elapsed after `switch_to`.
pub const VIEW_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// The viewport surface of the map widget. The widget is an opaque
/// collaborator; the coordinator only constrains the order of these calls.
pub trait MapViewport {
    fn clear_max_bounds(&mut self);
    fn set_zoom_limits(&mut self, min: u8, max: u8);
    /// Animated pan/zoom to the given center.
    fn set_view(&mut self, center: Coordinate, zoom: u8);
    fn set_max_bounds(&mut self, bounds: LatLngBounds);
}

#[derive(Debug, Clone)]
struct PendingBounds {
    bounds: LatLngBounds,
    due: Instant,
}

/// One active region at a time, plus at most one pending deferred bounds
/// application. A new `switch_to` replaces the pending slot, so a stale
/// switch can never apply the wrong region's constraint after a rapid
/// sequence of layer changes.
#[derive(Debug)]
pub struct BoundsCoordinator {
    active: &'static RegionLayer,
    pending: Option<PendingBounds>,
}

impl BoundsCoordinator {
    /// Start on a region with its constraint already in force (the initial
    /// map is constructed in place, so there is no animation to wait out).
    pub fn new(region: &'static RegionLayer, viewport: &mut impl MapViewport) -> Self {
        viewport.set_zoom_limits(region.min_zoom, region.max_zoom);
        viewport.set_view(region.center, region.default_zoom);
        viewport.set_max_bounds(region.bounds);
        Self {
            active: region,
            pending: None,
        }
    }

    pub fn active(&self) -> &'static RegionLayer {
        self.active
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending bounds application, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Switch the active layer: clear the old constraint, apply the new zoom
    /// limits, start the animated pan, and schedule the new constraint for
    /// after the animation settles. Cancels any previously scheduled
    /// application.
    pub fn switch_to(
        &mut self,
        region: &'static RegionLayer,
        viewport: &mut impl MapViewport,
        now: Instant,
    ) {
        if let Some(stale) = self.pending.take() {
            log::debug!(
                "cancelling pending bounds for {:?} (superseded)",
                stale.bounds
            );
        }
        viewport.clear_max_bounds();
        viewport.set_zoom_limits(region.min_zoom, region.max_zoom);
        viewport.set_view(region.center, region.default_zoom);
        self.pending = Some(PendingBounds {
            bounds: region.bounds,
            due: now + VIEW_SETTLE_DELAY,
        });
        self.active = region;
        log::info!("layer switch: {}", region.name);
    }

    /// Apply the pending constraint once its deadline has passed. Returns
    /// true when a constraint was applied on this call.
    pub fn poll(&mut self, viewport: &mut impl MapViewport, now: Instant) -> bool {
        match &self.pending {
            Some(p) if now >= p.due => {
                let bounds = p.bounds;
                viewport.set_max_bounds(bounds);
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
