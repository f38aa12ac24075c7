//! Timed anchor navigation.
//!
//! A navigation moves the authoritative offset straight to its target and
//! lets the host animate the content layer with a CSS transition of the
//! same duration. Input stays suspended until 80% of the duration has
//! elapsed; the remainder is settling slack.

use glissade_types::backend::ElementId;

use crate::animation::{Tween, easing};
use crate::page::Page;

/// Attribute carrying a link's navigation duration in milliseconds.
pub const ATTR_TIME_LINK: &str = "data-smooth-time-link";

/// An in-flight timed navigation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSession {
    pub target_offset: f64,
    /// Offset the content layer is transitioning from.
    pub start_offset: f64,
    pub duration_ms: u64,
    pub started_at: u64,
}

impl NavigationSession {
    pub fn new(start_offset: f64, target_offset: f64, duration_ms: u64, now: u64) -> Self {
        Self {
            target_offset,
            start_offset,
            duration_ms,
            started_at: now,
        }
    }

    /// Delay from the start until input is handed back.
    pub fn restore_delay(&self) -> u64 {
        self.duration_ms - self.duration_ms / 5
    }

    /// Host time at which input is handed back.
    pub fn restore_at(&self) -> u64 {
        self.started_at.saturating_add(self.restore_delay())
    }

    /// Where the content layer visually is at `now`, for hosts that
    /// animate it themselves.
    pub fn visual_offset(&self, now: u64) -> f64 {
        let tween = Tween::new(
            self.start_offset,
            self.target_offset,
            self.duration_ms,
            easing::ease_in_out_cubic,
        );
        tween.sample(now.saturating_sub(self.started_at))
    }
}

/// Navigation duration for `link`.
///
/// A missing or empty `data-smooth-time-link` uses `default_ms`; an
/// unparsable one does too, with a warning.
pub fn link_duration(page: &Page, link: ElementId, default_ms: u64) -> u64 {
    match page.get_attribute(link, ATTR_TIME_LINK).map(str::trim) {
        None | Some("") => default_ms,
        Some(raw) => match raw.parse::<u64>() {
            Ok(ms) => ms,
            Err(_) => {
                log::warn!("invalid {ATTR_TIME_LINK} value {raw:?}, using {default_ms}ms");
                default_ms
            },
        },
    }
}

/// CSS time value for a duration, e.g. `2s` or `1.1s`.
pub fn format_seconds(ms: u64) -> String {
    format!("{}s", ms as f64 / 1000.0)
}
