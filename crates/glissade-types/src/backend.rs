//! Style backend trait and the commands it applies.
//!
//! The engine never touches a rendering tree. Every visible effect is
//! recorded as a [`StyleCommand`] and dispatched through the
//! [`StyleBackend`] trait, which a host implements over its DOM (or a test
//! recorder, or a printer).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Class added to waypoints once they become visible.
pub const CLASS_ANIMATED: &str = "animated";
/// Class added to the header once it is scrolled past the compact threshold.
pub const CLASS_COMPACT: &str = "is-compact";
/// Class added to the header while it is hidden.
pub const CLASS_HIDE: &str = "is-hide";
/// Class added to the scrollbar thumb while it is dragged.
pub const CLASS_DRAGGING: &str = "is-dragging";
/// Class added to the content layer and thumb during a timed navigation.
pub const CLASS_LINK: &str = "is-link";
/// Custom property carrying the navigation transition duration.
pub const PROP_TIME_SCROLL_PAGE: &str = "--time-scroll-page";

/// Opaque handle to an element in the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a style command is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The scrollable content layer.
    Content,
    /// The synthetic scrollbar thumb created by the engine.
    Scrollbar,
    /// The page header.
    Header,
    /// A tracked element in the page.
    Element(ElementId),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => f.write_str("content"),
            Self::Scrollbar => f.write_str("scrollbar"),
            Self::Header => f.write_str("header"),
            Self::Element(id) => write!(f, "element{id}"),
        }
    }
}

/// An inline transform value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    TranslateY(f64),
    TranslateX(f64),
    Scale(f64),
}

impl fmt::Display for Transform {
    /// CSS text for the transform, e.g. `translateY(-120px)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `+ 0.0` folds negative zero so an unscrolled page prints `0px`.
        match *self {
            Self::TranslateY(px) => write!(f, "translateY({}px)", px + 0.0),
            Self::TranslateX(px) => write!(f, "translateX({}px)", px + 0.0),
            Self::Scale(s) => write!(f, "scale({s})"),
        }
    }
}

/// A recorded style mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StyleCommand {
    /// Append the synthetic scrollbar thumb to the container.
    CreateScrollbar,
    SetTransform {
        target: Target,
        transform: Transform,
    },
    SetHeight {
        target: Target,
        px: f64,
    },
    AddClass {
        target: Target,
        class: String,
    },
    RemoveClass {
        target: Target,
        class: String,
    },
    SetProperty {
        target: Target,
        name: String,
        value: String,
    },
    RemoveProperty {
        target: Target,
        name: String,
    },
    SetAttribute {
        target: Target,
        name: String,
        value: String,
    },
}

impl StyleCommand {
    pub fn transform(target: Target, transform: Transform) -> Self {
        Self::SetTransform { target, transform }
    }

    pub fn add_class(target: Target, class: &str) -> Self {
        Self::AddClass {
            target,
            class: class.to_string(),
        }
    }

    pub fn remove_class(target: Target, class: &str) -> Self {
        Self::RemoveClass {
            target,
            class: class.to_string(),
        }
    }

    /// The target this command mutates, if any.
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::CreateScrollbar => None,
            Self::SetTransform { target, .. }
            | Self::SetHeight { target, .. }
            | Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetProperty { target, .. }
            | Self::RemoveProperty { target, .. }
            | Self::SetAttribute { target, .. } => Some(*target),
        }
    }
}

impl fmt::Display for StyleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateScrollbar => f.write_str("create scrollbar"),
            Self::SetTransform { target, transform } => {
                write!(f, "{target}.style.transform = {transform}")
            },
            Self::SetHeight { target, px } => write!(f, "{target}.style.height = {px}px"),
            Self::AddClass { target, class } => write!(f, "{target}.classList.add({class})"),
            Self::RemoveClass { target, class } => {
                write!(f, "{target}.classList.remove({class})")
            },
            Self::SetProperty {
                target,
                name,
                value,
            } => write!(f, "{target}.style.setProperty({name}, {value})"),
            Self::RemoveProperty { target, name } => {
                write!(f, "{target}.style.removeProperty({name})")
            },
            Self::SetAttribute {
                target,
                name,
                value,
            } => write!(f, "{target}.setAttribute({name}, {value})"),
        }
    }
}

/// Host seam for applying style commands.
///
/// Hosts implement [`StyleBackend::apply`]; batching has a default
/// implementation that stops at the first failure.
pub trait StyleBackend {
    /// Apply a single command.
    fn apply(&mut self, cmd: &StyleCommand) -> Result<()>;

    /// Apply commands in order.
    fn apply_batch(&mut self, cmds: &[StyleCommand]) -> Result<()> {
        for cmd in cmds {
            self.apply(cmd)?;
        }
        Ok(())
    }
}
