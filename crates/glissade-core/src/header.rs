//! Header auto-hide: compact and hide flags.

use glissade_types::backend::{CLASS_COMPACT, CLASS_HIDE, StyleCommand, Target};
use glissade_types::config::ScrollConfig;

/// Current header classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderState {
    pub compact: bool,
    pub hidden: bool,
}

impl HeaderState {
    /// Class commands that make the header match this state.
    pub fn commands(&self) -> [StyleCommand; 2] {
        [
            toggle(CLASS_COMPACT, self.compact),
            toggle(CLASS_HIDE, self.hidden),
        ]
    }
}

fn toggle(class: &str, on: bool) -> StyleCommand {
    if on {
        StyleCommand::add_class(Target::Header, class)
    } else {
        StyleCommand::remove_class(Target::Header, class)
    }
}

/// Derives the header classes from the offset and the direction of travel.
///
/// The header turns compact past the compact threshold. With `fixed` set,
/// crossing that threshold also hides it; a forward step past the hide
/// threshold keeps it hidden and any other step reveals it. With `fixed`
/// cleared, scrolling never adds or removes the hide class.
#[derive(Debug, Clone)]
pub struct HeaderController {
    fixed: bool,
    compact_threshold: f64,
    hide_threshold: f64,
    menu_open: bool,
    state: HeaderState,
}

impl HeaderController {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            fixed: config.active_toggle_menu_fixed,
            compact_threshold: config.compact_threshold,
            hide_threshold: config.hide_threshold,
            menu_open: false,
            state: HeaderState::default(),
        }
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    /// Keep the header on screen while a menu is open.
    pub fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Update from the new offset and progress. `previous` is the progress
    /// seen by the previous call.
    pub fn update(&mut self, offset: f64, progress: f64, previous: Option<f64>) -> [StyleCommand; 2] {
        let compact = offset > self.compact_threshold;

        let hidden = if self.fixed {
            match previous {
                Some(prev) if progress > prev => {
                    !self.menu_open && (compact || offset > self.hide_threshold)
                },
                _ => false,
            }
        } else {
            self.state.hidden
        };

        self.state = HeaderState { compact, hidden };
        self.state.commands()
    }

    /// Hide the header for a timed navigation.
    pub fn force_hidden(&mut self) -> StyleCommand {
        self.state.hidden = true;
        StyleCommand::add_class(Target::Header, CLASS_HIDE)
    }
}
