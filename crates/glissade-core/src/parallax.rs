//! Parallax engine: vertical, horizontal and zoom transforms.
//!
//! Every tracked element maps the global scroll offset into its own
//! activation window:
//!
//! - **Vertical** (`js-parallax`): the window is the span during which the
//!   element overlaps the viewport, read from live geometry on every pass.
//!   Progress is rounded to two decimals and the output is a translation
//!   between `data-start` and `data-end`. Outside the window the output pins
//!   to the nearer end.
//! - **Horizontal** (`js-parallax-h`) and **zoom** (`js-parallax-z`): the
//!   window `[data-start, data-end]` is precomputed from geometry at
//!   re-measure time. The element is only touched while the offset lies in
//!   the window widened by the last scroll delta; outside that band the
//!   previous transform is left as it was.

use glissade_types::backend::{ElementId, StyleCommand, Target, Transform};

use crate::geometry;
use crate::mode::InputMode;
use crate::page::{PARALLAX_HORIZONTAL_CLASS, PARALLAX_VERTICAL_CLASS, PARALLAX_ZOOM_CLASS, Page};

pub const DEFAULT_VERTICAL_START: f64 = -50.0;
pub const DEFAULT_VERTICAL_END: f64 = 50.0;
pub const DEFAULT_OFFSET: f64 = 100.0;
pub const DEFAULT_ZOOM: f64 = 20.0;

pub const ATTR_START: &str = "data-start";
pub const ATTR_END: &str = "data-end";
pub const ATTR_OFFSET: &str = "data-offset";
pub const ATTR_ZOOM: &str = "data-zoom";
pub const ATTR_DIRECTION: &str = "data-direction";

/// Which transform an element receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallaxAxis {
    Vertical,
    Horizontal,
    Zoom,
}

/// Horizontal travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Left,
    Right,
}

impl Direction {
    /// Parse a `data-direction` value. Anything but `right` is `left`.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("right") => Self::Right,
            _ => Self::Left,
        }
    }
}

/// A parallax element and its precomputed parameters.
///
/// For vertical elements `activation_start`/`activation_end` hold the
/// translation range (`data-start`/`data-end`); the window itself comes
/// from live geometry. For horizontal and zoom elements they hold the
/// offset window.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedElement {
    pub element: ElementId,
    pub axis: ParallaxAxis,
    pub activation_start: f64,
    pub activation_end: f64,
    pub direction: Option<Direction>,
    /// Horizontal displacement in pixels, or zoom percentage.
    pub magnitude: f64,
}

/// Where the viewport is relative to a vertical element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalPhase {
    /// The element is still below the viewport.
    Before,
    /// The element overlaps the viewport, with progress in `[0, 1]`.
    Inside(f64),
    /// The element has scrolled past the top of the viewport.
    After,
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Phase of a vertical element whose top is `item_top` in content
/// coordinates.
pub fn vertical_phase(offset: f64, container: f64, item_top: f64, item_height: f64) -> VerticalPhase {
    let viewport_start = offset;
    let viewport_end = offset + container;

    if viewport_end > item_top && viewport_start < item_top + item_height {
        let span = container + item_height;
        let progress = if span > 0.0 {
            round2((viewport_end - item_top) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        VerticalPhase::Inside(progress)
    } else if viewport_end <= item_top {
        VerticalPhase::Before
    } else {
        VerticalPhase::After
    }
}

/// Vertical translation for a phase.
pub fn vertical_translate(phase: VerticalPhase, start: f64, end: f64) -> f64 {
    match phase {
        VerticalPhase::Before => start,
        VerticalPhase::Inside(progress) => (start + progress * (end - start)).round(),
        VerticalPhase::After => end,
    }
}

/// Progress through `[start, end]`, or `None` when `offset` lies outside
/// the window widened by `band` on both sides. Offsets inside the band but
/// past an edge pin to 0 or 1.
pub fn window_progress(offset: f64, start: f64, end: f64, band: f64) -> Option<f64> {
    if offset < start - band || offset > end + band {
        return None;
    }
    let span = end - start;
    if span <= 0.0 {
        return Some(0.0);
    }
    Some(((offset - start) / span).clamp(0.0, 1.0))
}

/// Horizontal translation for a progress value, in whole pixels.
pub fn horizontal_translate(progress: f64, magnitude: f64, direction: Direction) -> f64 {
    let px = (progress * magnitude).round();
    match direction {
        Direction::Left => -px,
        Direction::Right => px,
    }
}

/// Uniform scale for a progress value. `zoom` is a percentage.
pub fn zoom_scale(progress: f64, zoom: f64) -> f64 {
    1.0 + progress * (zoom / 100.0)
}

/// Activation window of a horizontal or zoom element: from the moment its
/// top enters below the viewport (one element height early) until it has
/// travelled a full viewport plus its own height. `start` truncates toward
/// zero; `end` rounds to the nearest pixel with halves going up.
pub fn activation_window(item_top: f64, outer_height: f64, container: f64) -> (f64, f64) {
    let start = (item_top - container - outer_height).trunc();
    let end = (start + container + outer_height + 0.5).floor();
    (start, end)
}

/// All parallax elements of a page.
#[derive(Debug, Clone, Default)]
pub struct ParallaxEngine {
    vertical: Vec<TrackedElement>,
    horizontal: Vec<TrackedElement>,
    zoom: Vec<TrackedElement>,
}

impl ParallaxEngine {
    /// Collect parallax elements and parse their attributes.
    ///
    /// Missing attributes fall back to defaults with a warning; a missing
    /// horizontal or zoom window is derived from geometry.
    pub fn from_page(page: &Page, mode: InputMode, container: f64) -> Self {
        let vertical = page
            .query(PARALLAX_VERTICAL_CLASS)
            .into_iter()
            .map(|id| TrackedElement {
                element: id,
                axis: ParallaxAxis::Vertical,
                activation_start: number_attr(page, id, ATTR_START, DEFAULT_VERTICAL_START),
                activation_end: number_attr(page, id, ATTR_END, DEFAULT_VERTICAL_END),
                direction: None,
                magnitude: 0.0,
            })
            .collect();

        let horizontal = page
            .query(PARALLAX_HORIZONTAL_CLASS)
            .into_iter()
            .map(|id| {
                let mut offset = number_attr(page, id, ATTR_OFFSET, DEFAULT_OFFSET);
                if mode.is_coarse() {
                    offset /= 2.0;
                }
                let (start, end) = window_attrs(page, id, container);
                TrackedElement {
                    element: id,
                    axis: ParallaxAxis::Horizontal,
                    activation_start: start,
                    activation_end: end,
                    direction: Some(Direction::from_attr(page.get_attribute(id, ATTR_DIRECTION))),
                    magnitude: offset,
                }
            })
            .collect();

        let zoom = page
            .query(PARALLAX_ZOOM_CLASS)
            .into_iter()
            .map(|id| {
                let (start, end) = window_attrs(page, id, container);
                TrackedElement {
                    element: id,
                    axis: ParallaxAxis::Zoom,
                    activation_start: start,
                    activation_end: end,
                    direction: None,
                    magnitude: number_attr(page, id, ATTR_ZOOM, DEFAULT_ZOOM),
                }
            })
            .collect();

        Self {
            vertical,
            horizontal,
            zoom,
        }
    }

    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len() + self.zoom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recompute horizontal and zoom windows from current geometry and
    /// write them back as `data-start`/`data-end`.
    pub fn recompute_windows(&mut self, page: &Page, container: f64) -> Vec<StyleCommand> {
        let mut cmds = Vec::new();
        for item in self.horizontal.iter_mut().chain(self.zoom.iter_mut()) {
            let (start, end) = geometry_window(page, item.element, container);
            item.activation_start = start;
            item.activation_end = end;

            let target = Target::Element(item.element);
            cmds.push(StyleCommand::SetAttribute {
                target,
                name: ATTR_START.to_string(),
                value: format!("{start}"),
            });
            cmds.push(StyleCommand::SetAttribute {
                target,
                name: ATTR_END.to_string(),
                value: format!("{end}"),
            });
        }
        cmds
    }

    /// Transforms for the current offset.
    ///
    /// `band` is the hysteresis margin for horizontal and zoom windows.
    pub fn pass(&self, page: &Page, offset: f64, container: f64, band: f64, debug: bool) -> Vec<StyleCommand> {
        let mut cmds = Vec::new();

        for item in &self.vertical {
            let top = geometry::offset_top(page, item.element);
            let height = geometry::height(page, item.element);
            let phase = vertical_phase(offset, container, top, height);
            let y = vertical_translate(phase, item.activation_start, item.activation_end);
            if debug {
                if let VerticalPhase::Inside(progress) = phase {
                    log::info!("parallax y [{}]: {y} (progress {progress})", label(page, item.element));
                }
            }
            cmds.push(StyleCommand::transform(
                Target::Element(item.element),
                Transform::TranslateY(y),
            ));
        }

        for item in &self.horizontal {
            let Some(progress) =
                window_progress(offset, item.activation_start, item.activation_end, band)
            else {
                continue;
            };
            let direction = item.direction.unwrap_or_default();
            let x = horizontal_translate(progress, item.magnitude, direction);
            if debug {
                log::info!("parallax x [{}]: {x}", label(page, item.element));
            }
            cmds.push(StyleCommand::transform(
                Target::Element(item.element),
                Transform::TranslateX(x),
            ));
        }

        for item in &self.zoom {
            let Some(progress) =
                window_progress(offset, item.activation_start, item.activation_end, band)
            else {
                continue;
            };
            let scale = zoom_scale(progress, item.magnitude);
            if debug {
                log::info!("parallax scale [{}]: {scale}", label(page, item.element));
            }
            cmds.push(StyleCommand::transform(
                Target::Element(item.element),
                Transform::Scale(scale),
            ));
        }

        cmds
    }
}

fn label(page: &Page, id: ElementId) -> String {
    page.get(id).map(|el| el.label()).unwrap_or_else(|| id.to_string())
}

/// Parse an integer attribute, substituting `default` with a warning.
fn number_attr(page: &Page, id: ElementId, name: &str, default: f64) -> f64 {
    match page.get_attribute(id, name).map(str::trim) {
        Some(raw) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v.trunc(),
            _ => {
                log::warn!(
                    "element '{}' has an invalid '{name}' attribute ({raw:?}), using {default}",
                    label(page, id)
                );
                default
            },
        },
        None => {
            log::warn!(
                "element '{}' is missing the '{name}' attribute, using {default}",
                label(page, id)
            );
            default
        },
    }
}

fn geometry_window(page: &Page, id: ElementId, container: f64) -> (f64, f64) {
    activation_window(
        geometry::offset_top(page, id),
        geometry::outer_height(page, id),
        container,
    )
}

/// Window from `data-start`/`data-end`, each falling back to geometry.
fn window_attrs(page: &Page, id: ElementId, container: f64) -> (f64, f64) {
    let (geo_start, geo_end) = geometry_window(page, id, container);
    (
        number_attr(page, id, ATTR_START, geo_start),
        number_attr(page, id, ATTR_END, geo_end),
    )
}
