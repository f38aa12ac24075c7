//! Shared test utilities for glissade-core.
//!
//! Provides a [`RecordingBackend`] that records every applied command and a
//! small landing page fixture.

use glissade_types::backend::{ElementId, StyleBackend, StyleCommand, Target, Transform};
use glissade_types::error::{GlissadeError, Result};

use crate::page::{
    CONTAINER_CLASS, CONTENT_CLASS, Element, LINK_CLASS, PARALLAX_HORIZONTAL_CLASS,
    PARALLAX_VERTICAL_CLASS, PARALLAX_ZOOM_CLASS, Page, WAYPOINT_CLASS,
};

/// A backend that records all applied commands for test assertions.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub applied: Vec<StyleCommand>,
    /// Fail on the n-th apply (0-based).
    pub fail_at: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last transform written to `target`.
    pub fn last_transform(&self, target: Target) -> Option<Transform> {
        self.applied.iter().rev().find_map(|c| match c {
            StyleCommand::SetTransform { target: t, transform } if *t == target => Some(*transform),
            _ => None,
        })
    }

    /// Whether `class` is currently on `target`, replaying adds and removes.
    pub fn has_class(&self, target: Target, class: &str) -> bool {
        let mut on = false;
        for c in &self.applied {
            match c {
                StyleCommand::AddClass { target: t, class: k } if *t == target && k == class => {
                    on = true;
                },
                StyleCommand::RemoveClass { target: t, class: k } if *t == target && k == class => {
                    on = false;
                },
                _ => {},
            }
        }
        on
    }
}

impl StyleBackend for RecordingBackend {
    fn apply(&mut self, cmd: &StyleCommand) -> Result<()> {
        if self.fail_at == Some(self.applied.len()) {
            return Err(GlissadeError::Backend(format!("refused: {cmd}")));
        }
        self.applied.push(cmd.clone());
        Ok(())
    }
}

/// Last transform in a command list for `target`.
pub fn last_transform(cmds: &[StyleCommand], target: Target) -> Option<Transform> {
    cmds.iter().rev().find_map(|c| match c {
        StyleCommand::SetTransform { target: t, transform } if *t == target => Some(*transform),
        _ => None,
    })
}

/// Element ids of the landing fixture, in push order.
pub struct Landing {
    pub page: Page,
    pub hero: ElementId,
    pub pricing: ElementId,
    pub vertical: ElementId,
    pub horizontal: ElementId,
    pub zoom: ElementId,
    pub link: ElementId,
}

/// Container 500, content 1500, header, two waypoints, one element per
/// parallax axis and a link to `#pricing` (at 800) with a 2000ms duration.
pub fn landing() -> Landing {
    let mut page = Page::new();
    page.container_height = 500.0;
    page.viewport_height = 600.0;
    page.content_height = 1500.0;

    page.push(Element::new("div").with_class(CONTAINER_CLASS));
    let content = page.push(Element::new("div").with_class(CONTENT_CLASS));
    page.push(Element::new("header"));
    let hero = page.push(
        Element::new("section")
            .with_class(WAYPOINT_CLASS)
            .at(100.0, 200.0)
            .inside(content),
    );
    let pricing = page.push(
        Element::new("section")
            .with_id("pricing")
            .with_class(WAYPOINT_CLASS)
            .at(800.0, 300.0)
            .inside(content),
    );
    let vertical = page.push(
        Element::new("img")
            .with_class(PARALLAX_VERTICAL_CLASS)
            .with_attr("data-start", "-50")
            .with_attr("data-end", "50")
            .at(600.0, 200.0)
            .inside(content),
    );
    let horizontal = page.push(
        Element::new("div")
            .with_class(PARALLAX_HORIZONTAL_CLASS)
            .with_attr("data-start", "200")
            .with_attr("data-end", "400")
            .with_attr("data-offset", "100")
            .with_attr("data-direction", "left")
            .at(1000.0, 100.0)
            .inside(content),
    );
    let zoom = page.push(
        Element::new("div")
            .with_class(PARALLAX_ZOOM_CLASS)
            .with_attr("data-start", "0")
            .with_attr("data-end", "100")
            .with_attr("data-zoom", "20")
            .at(400.0, 100.0)
            .inside(content),
    );
    let link = page.push(
        Element::new("a")
            .with_class(LINK_CLASS)
            .with_attr("href", "#pricing")
            .with_attr("data-smooth-time-link", "2000"),
    );

    Landing {
        page,
        hero,
        pricing,
        vertical,
        horizontal,
        zoom,
        link,
    }
}
