// Layer switching: call ordering against the viewport and cancellation of
// stale deferred bounds applications.

use bookmap::models::Coordinate;
use bookmap::region::{
    BoundsCoordinator, LatLngBounds, MapViewport, REGIONS, VIEW_SETTLE_DELAY,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    ClearMaxBounds,
    SetZoomLimits(u8, u8),
    SetView(Coordinate, u8),
    SetMaxBounds(LatLngBounds),
}

#[derive(Default)]
struct RecordingViewport {
    calls: Vec<Call>,
}

impl MapViewport for RecordingViewport {
    fn clear_max_bounds(&mut self) {
        self.calls.push(Call::ClearMaxBounds);
    }

    fn set_zoom_limits(&mut self, min: u8, max: u8) {
        self.calls.push(Call::SetZoomLimits(min, max));
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.calls.push(Call::SetView(center, zoom));
    }

    fn set_max_bounds(&mut self, bounds: LatLngBounds) {
        self.calls.push(Call::SetMaxBounds(bounds));
    }
}

impl RecordingViewport {
    fn applied_bounds(&self) -> Vec<LatLngBounds> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetMaxBounds(b) => Some(*b),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn initial_region_is_constrained_immediately() {
    let mut vp = RecordingViewport::default();
    let region = &REGIONS[0];
    let coordinator = BoundsCoordinator::new(region, &mut vp);
    assert_eq!(coordinator.active().key, region.key);
    assert!(!coordinator.has_pending());
    assert_eq!(vp.applied_bounds(), vec![region.bounds]);
}

#[test]
fn switch_clears_then_zooms_then_pans_then_defers_bounds() {
    let mut vp = RecordingViewport::default();
    let mut coordinator = BoundsCoordinator::new(&REGIONS[0], &mut vp);

    let t0 = Instant::now();
    let target = &REGIONS[2];
    vp.calls.clear();
    coordinator.switch_to(target, &mut vp, t0);

    assert_eq!(
        vp.calls,
        vec![
            Call::ClearMaxBounds,
            Call::SetZoomLimits(target.min_zoom, target.max_zoom),
            Call::SetView(target.center, target.default_zoom),
        ]
    );
    assert!(coordinator.has_pending());
    assert_eq!(coordinator.active().key, target.key);

    // Not yet due: nothing applied.
    assert!(!coordinator.poll(&mut vp, t0 + Duration::from_millis(10)));
    assert!(vp.applied_bounds().is_empty());

    // Due: exactly the new region's bounds, once.
    assert!(coordinator.poll(&mut vp, t0 + VIEW_SETTLE_DELAY));
    assert_eq!(vp.applied_bounds(), vec![target.bounds]);
    assert!(!coordinator.has_pending());
    assert!(!coordinator.poll(&mut vp, t0 + VIEW_SETTLE_DELAY * 2));
}

#[test]
fn rapid_switch_cancels_the_stale_deferred_application() {
    let mut vp = RecordingViewport::default();
    let mut coordinator = BoundsCoordinator::new(&REGIONS[0], &mut vp);
    vp.calls.clear();

    let t0 = Instant::now();
    let a = &REGIONS[1];
    let b = &REGIONS[2];
    coordinator.switch_to(a, &mut vp, t0);
    coordinator.switch_to(b, &mut vp, t0 + Duration::from_millis(50));

    // Even polling well past both deadlines, only B's bounds are applied.
    coordinator.poll(&mut vp, t0 + VIEW_SETTLE_DELAY * 3);
    coordinator.poll(&mut vp, t0 + VIEW_SETTLE_DELAY * 4);
    assert_eq!(vp.applied_bounds(), vec![b.bounds]);
    assert_eq!(coordinator.active().key, b.key);
}

#[test]
fn deadline_tracks_the_latest_switch() {
    let mut vp = RecordingViewport::default();
    let mut coordinator = BoundsCoordinator::new(&REGIONS[0], &mut vp);

    let t0 = Instant::now();
    coordinator.switch_to(&REGIONS[1], &mut vp, t0);
    let first = coordinator.next_deadline().unwrap();
    coordinator.switch_to(&REGIONS[2], &mut vp, t0 + Duration::from_millis(200));
    let second = coordinator.next_deadline().unwrap();
    assert!(second > first);
}
