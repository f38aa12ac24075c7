//! Synthetic scrollbar thumb: metrics and drag sessions.

use glissade_types::backend::{StyleCommand, Target, Transform};

/// Thumb size and position for a given scroll state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbMetrics {
    /// Thumb height.
    pub size: f64,
    /// Distance the thumb can travel inside the track.
    pub travel: f64,
    /// Current distance from the top of the track.
    pub position: f64,
}

impl ThumbMetrics {
    /// Compute the thumb for `offset` in a container of `container` pixels
    /// showing `content` pixels of content.
    ///
    /// With nothing to scroll the thumb spans the full track.
    pub fn compute(container: f64, content: f64, offset: f64) -> Self {
        if content <= container || content <= 0.0 {
            return Self {
                size: container.max(0.0),
                travel: 0.0,
                position: 0.0,
            };
        }

        let size = (container / content) * container;
        let travel = container - size;
        let position = (offset / (content - container)) * travel;
        Self {
            size,
            travel,
            position: position.clamp(0.0, travel),
        }
    }

    /// Style commands that place the thumb.
    pub fn commands(&self) -> [StyleCommand; 2] {
        [
            StyleCommand::SetHeight {
                target: Target::Scrollbar,
                px: self.size,
            },
            StyleCommand::transform(Target::Scrollbar, Transform::TranslateY(self.position)),
        ]
    }
}

/// An active drag of the scrollbar thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position at pointer-down.
    pub anchor_pointer_y: f64,
    /// Thumb position at pointer-down.
    pub anchor_thumb_offset: f64,
}

impl DragSession {
    pub fn begin(pointer_y: f64, thumb: &ThumbMetrics) -> Self {
        Self {
            anchor_pointer_y: pointer_y,
            anchor_thumb_offset: thumb.position,
        }
    }

    /// Scroll offset for the pointer at `pointer_y`.
    ///
    /// The thumb follows the pointer within its track; the resulting thumb
    /// ratio is mapped onto the full scroll range.
    pub fn offset_for(&self, pointer_y: f64, thumb: &ThumbMetrics, max_scroll: f64) -> f64 {
        if thumb.travel <= 0.0 {
            return 0.0;
        }
        let dy = pointer_y - self.anchor_pointer_y;
        let position = (self.anchor_thumb_offset + dy).clamp(0.0, thumb.travel);
        (position / thumb.travel) * max_scroll
    }
}
