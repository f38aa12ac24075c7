//! glissade scroll engine.
//!
//! A single authoritative scroll offset drives every visual effect on the
//! page: the content transform, a synthetic scrollbar, three parallax axes,
//! one-way waypoint reveals, the header's compact and hide classes, and
//! timed anchor navigation. The engine never touches a rendering tree; it
//! emits style commands that a host applies through a
//! [`StyleBackend`](glissade_types::backend::StyleBackend).

// Re-exports from glissade-types.
pub use glissade_types::backend;
pub use glissade_types::config;
pub use glissade_types::error;
pub use glissade_types::input;

pub mod animation;
pub mod engine;
pub mod geometry;
pub mod header;
pub mod mode;
pub mod navigation;
pub mod page;
pub mod parallax;
pub mod position;
pub mod scrollbar;
pub mod session;
pub mod timer;
pub mod waypoint;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{SmoothScroll, TimerKind};
pub use mode::InputMode;
pub use page::{Element, Page};
pub use position::ScrollState;
