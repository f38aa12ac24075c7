//! Host-agnostic input event types.
//!
//! Every host binding maps its native wheel, keyboard, pointer and scroll
//! events to these enums. The engine never sees raw platform input.

use serde::{Deserialize, Serialize};

use crate::backend::ElementId;

/// A host-agnostic input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse wheel / trackpad movement. Positive scrolls towards the end.
    Wheel { delta_y: f64 },
    /// A key went down.
    KeyDown { key: Key },
    /// The native scroller moved (coarse-pointer hosts only).
    NativeScroll { scroll_y: f64 },
    /// Pointer pressed on the synthetic scrollbar thumb.
    ThumbPointerDown { client_y: f64 },
    /// Pointer moved anywhere in the document.
    PointerMove { client_y: f64 },
    /// Pointer released anywhere in the document.
    PointerUp,
    /// The window was resized.
    Resize { screen_width: u32 },
    /// A smooth-navigation link was clicked.
    LinkClick { link: ElementId },
}

/// Keys the engine reacts to. Everything else maps to [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    #[serde(other)]
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            _ => Self::Other,
        }
    }

    /// Signed scroll step for this key, or `None` if the key is not a
    /// scrolling key.
    pub fn scroll_step(self, step: f64) -> Option<f64> {
        match self {
            Self::ArrowUp => Some(-step),
            Self::ArrowDown => Some(step),
            Self::Other => None,
        }
    }
}
