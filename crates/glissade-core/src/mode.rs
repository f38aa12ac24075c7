//! Pointer precision, selected once at initialisation.

use serde::{Deserialize, Serialize};

/// How the host scrolls.
///
/// `PointerPrecise` hosts (mouse, trackpad) hand wheel and key deltas to the
/// engine, which moves the content layer and draws a synthetic scrollbar.
/// `PointerCoarse` hosts (touch) keep native scrolling and only report the
/// native offset; the engine then derives parallax, waypoints and the header
/// from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    PointerPrecise,
    PointerCoarse,
}

impl InputMode {
    /// Map the result of a `(pointer: coarse)` media query.
    pub fn from_coarse_query(matches: bool) -> Self {
        if matches {
            Self::PointerCoarse
        } else {
            Self::PointerPrecise
        }
    }

    pub fn is_coarse(self) -> bool {
        self == Self::PointerCoarse
    }

    /// Whether the engine owns the scroll offset and draws its own thumb.
    pub fn has_synthetic_scroll(self) -> bool {
        self == Self::PointerPrecise
    }
}
