//! One-way visibility tracking for `waypoint` elements.

use glissade_types::backend::{CLASS_ANIMATED, ElementId, StyleCommand, Target};

use crate::geometry;
use crate::page::{Page, WAYPOINT_CLASS};

#[derive(Debug, Clone)]
struct Waypoint {
    element: ElementId,
    visible: bool,
}

/// Tracks which waypoints have scrolled into view.
///
/// A waypoint goes from hidden to visible once and stays visible.
#[derive(Debug, Clone, Default)]
pub struct WaypointTracker {
    waypoints: Vec<Waypoint>,
    fraction: f64,
}

impl WaypointTracker {
    /// Collect every waypoint on the page. `fraction` is the share of the
    /// element's height that must be in view before it activates.
    pub fn from_page(page: &Page, fraction: f64) -> Self {
        let waypoints = page
            .query(WAYPOINT_CLASS)
            .into_iter()
            .map(|element| Waypoint {
                element,
                visible: false,
            })
            .collect();
        Self {
            waypoints,
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Activate every waypoint that is now in view.
    ///
    /// Only newly visible waypoints produce an `animated` class command.
    pub fn check(&mut self, page: &Page, offset: f64, container: f64) -> Vec<StyleCommand> {
        let fraction = self.fraction;
        let mut cmds = Vec::new();
        for wp in self.waypoints.iter_mut().filter(|wp| !wp.visible) {
            if !reaches(page, wp.element, offset, container, fraction) {
                continue;
            }
            wp.visible = true;
            log::debug!("waypoint {} visible at offset {offset}", wp.element);
            cmds.push(StyleCommand::add_class(Target::Element(wp.element), CLASS_ANIMATED));
        }
        cmds
    }

    pub fn is_visible(&self, element: ElementId) -> bool {
        self.waypoints
            .iter()
            .any(|wp| wp.element == element && wp.visible)
    }
}

fn reaches(page: &Page, element: ElementId, offset: f64, container: f64, fraction: f64) -> bool {
    let top = geometry::offset_top(page, element);
    let height = geometry::height(page, element);
    offset + container >= top + height * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{CONTENT_CLASS, Element};

    fn page() -> (Page, ElementId, ElementId) {
        let mut page = Page::new();
        page.push(Element::new("div").with_class(CONTENT_CLASS));
        let near = page.push(Element::new("div").with_class(WAYPOINT_CLASS).at(300.0, 100.0));
        let far = page.push(Element::new("div").with_class(WAYPOINT_CLASS).at(1000.0, 200.0));
        (page, near, far)
    }

    #[test]
    fn visible_on_load() {
        let (page, near, far) = page();
        let mut tracker = WaypointTracker::from_page(&page, 0.3);
        let cmds = tracker.check(&page, 0.0, 500.0);
        assert_eq!(cmds, vec![StyleCommand::add_class(Target::Element(near), CLASS_ANIMATED)]);
        assert!(tracker.is_visible(near));
        assert!(!tracker.is_visible(far));
    }

    #[test]
    fn threshold_uses_height_fraction() {
        let (page, _, far) = page();
        let mut tracker = WaypointTracker::from_page(&page, 0.3);
        tracker.check(&page, 0.0, 500.0);
        // Needs offset + 500 >= 1000 + 60.
        assert!(tracker.check(&page, 559.0, 500.0).is_empty());
        assert_eq!(tracker.check(&page, 560.0, 500.0).len(), 1);
        assert!(tracker.is_visible(far));
    }

    #[test]
    fn transition_fires_once() {
        let (page, near, far) = page();
        let mut tracker = WaypointTracker::from_page(&page, 0.3);
        assert_eq!(tracker.check(&page, 2000.0, 500.0).len(), 2);
        assert!(tracker.check(&page, 2000.0, 500.0).is_empty());
        assert!(tracker.check(&page, 0.0, 500.0).is_empty());
        assert!(tracker.is_visible(near) && tracker.is_visible(far));
    }

    #[test]
    fn no_waypoints() {
        let page = Page::new();
        let mut tracker = WaypointTracker::from_page(&page, 0.3);
        assert!(tracker.is_empty());
        assert!(tracker.check(&page, 0.0, 500.0).is_empty());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn visibility_never_reverts(
                offsets in proptest::collection::vec(0.0f64..3000.0, 1..40),
                fraction in 0.0f64..=1.0,
            ) {
                let (page, near, far) = page();
                let mut tracker = WaypointTracker::from_page(&page, fraction);
                let mut seen = [false, false];
                for offset in offsets {
                    tracker.check(&page, offset, 500.0);
                    for (i, id) in [near, far].into_iter().enumerate() {
                        let now = tracker.is_visible(id);
                        prop_assert!(now || !seen[i]);
                        seen[i] = now;
                    }
                }
            }
        }
    }
}
