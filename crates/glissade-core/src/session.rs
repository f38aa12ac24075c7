//! Who owns the scroll offset right now.

use crate::navigation::NavigationSession;
use crate::scrollbar::DragSession;

/// Drag and navigation sessions are mutually exclusive.
///
/// A drag cannot start while a navigation is in flight; a navigation that
/// starts during a drag ends the drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragSession),
    Navigating(NavigationSession),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn is_navigating(&self) -> bool {
        matches!(self, Self::Navigating(_))
    }

    pub fn drag(&self) -> Option<&DragSession> {
        match self {
            Self::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn navigation(&self) -> Option<&NavigationSession> {
        match self {
            Self::Navigating(nav) => Some(nav),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let idle = Interaction::default();
        assert!(idle.is_idle());
        assert!(idle.drag().is_none());

        let drag = Interaction::Dragging(DragSession {
            anchor_pointer_y: 10.0,
            anchor_thumb_offset: 0.0,
        });
        assert!(drag.is_dragging());
        assert!(!drag.is_navigating());
        assert_eq!(drag.drag().map(|d| d.anchor_pointer_y), Some(10.0));

        let nav = Interaction::Navigating(NavigationSession::new(0.0, 800.0, 2000, 0));
        assert!(nav.is_navigating());
        assert_eq!(nav.navigation().map(|n| n.target_offset), Some(800.0));
    }
}
