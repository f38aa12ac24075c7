//! Replay scenarios: a page, a configuration and timed input.
//!
//! ```toml
//! name = "landing"
//! mode = "pointer_precise"
//!
//! [config]
//! scrollAmountMove = 1.2
//!
//! [page]
//! container_height = 500
//! content_height = 1500
//!
//! [[page.elements]]
//! classes = ["smooth-scroll-container"]
//!
//! [[events]]
//! at_ms = 100
//! type = "wheel"
//! delta_y = 100
//! ```

use std::fs;
use std::path::Path;

use glissade_core::{InputMode, Page};
use glissade_types::config::ScrollConfig;
use glissade_types::error::{GlissadeError, Result};
use glissade_types::input::InputEvent;
use serde::{Deserialize, Serialize};

/// An input event at a point on the host clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: InputEvent,
}

/// A complete replay scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub mode: InputMode,
    pub config: ScrollConfig,
    pub page: Page,
    /// Events in non-decreasing `at_ms` order.
    pub events: Vec<TimedEvent>,
    /// Stop firing timers after this time. Without it every pending timer
    /// runs to completion.
    pub end_ms: Option<u64>,
}

impl Scenario {
    /// Parse and validate a TOML scenario.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(src)?;
        scenario.config.validate()?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path)?;
        let mut scenario = Self::from_toml_str(&src)?;
        if scenario.name.is_empty() {
            scenario.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        for pair in self.events.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(GlissadeError::Scenario(format!(
                    "events out of order: {}ms after {}ms",
                    pair[1].at_ms, pair[0].at_ms
                )));
            }
        }
        let elements = self.page.elements.len();
        for ev in &self.events {
            if let InputEvent::LinkClick { link } = ev.event
                && link.0 >= elements
            {
                return Err(GlissadeError::Scenario(format!(
                    "link {link} at {}ms is not a page element",
                    ev.at_ms
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glissade_types::backend::ElementId;
    use glissade_types::input::Key;

    use super::*;

    const SAMPLE: &str = r##"
name = "sample"
mode = "pointer_coarse"

[config]
scrollAmountMove = 2.0
URLhashListener = false

[page]
container_height = 500
viewport_height = 600
content_height = 1500
hash = "#pricing"

[[page.elements]]
classes = ["smooth-scroll-container"]

[[page.elements]]
classes = ["smooth-scroll-content"]

[[page.elements]]
tag = "section"
id = "pricing"
classes = ["waypoint"]
offset_top = 800
height = 300
offset_parent = 1

[[page.elements]]
tag = "a"
classes = ["smooth-scroll-link"]
attributes = [{ name = "href", value = "#pricing" }]

[[events]]
at_ms = 0
type = "wheel"
delta_y = 100

[[events]]
at_ms = 50
type = "key_down"
key = "ArrowDown"

[[events]]
at_ms = 60
type = "key_down"
key = "PageDown"

[[events]]
at_ms = 100
type = "link_click"
link = 3
"##;

    #[test]
    fn parses_full_scenario() {
        let s = Scenario::from_toml_str(SAMPLE).unwrap();
        assert_eq!(s.name, "sample");
        assert_eq!(s.mode, InputMode::PointerCoarse);
        assert!((s.config.scroll_amount_move - 2.0).abs() < f64::EPSILON);
        assert!(!s.config.url_hash_listener);
        assert_eq!(s.config.scroll_move_time, 1100);
        assert_eq!(s.page.elements.len(), 4);
        assert_eq!(s.page.elements[2].offset_parent, Some(ElementId(1)));
        assert_eq!(s.page.hash.as_deref(), Some("#pricing"));
        assert_eq!(
            s.events,
            vec![
                TimedEvent {
                    at_ms: 0,
                    event: InputEvent::Wheel { delta_y: 100.0 },
                },
                TimedEvent {
                    at_ms: 50,
                    event: InputEvent::KeyDown { key: Key::ArrowDown },
                },
                TimedEvent {
                    at_ms: 60,
                    event: InputEvent::KeyDown { key: Key::Other },
                },
                TimedEvent {
                    at_ms: 100,
                    event: InputEvent::LinkClick {
                        link: ElementId(3)
                    },
                },
            ]
        );
    }

    #[test]
    fn empty_scenario_uses_defaults() {
        let s = Scenario::from_toml_str("").unwrap();
        assert_eq!(s.mode, InputMode::PointerPrecise);
        assert_eq!(s.config, ScrollConfig::default());
        assert!(s.events.is_empty());
        assert_eq!(s.end_ms, None);
    }

    #[test]
    fn rejects_out_of_order_events() {
        let src = r#"
[[events]]
at_ms = 200
type = "pointer_up"

[[events]]
at_ms = 100
type = "pointer_up"
"#;
        let err = Scenario::from_toml_str(src).unwrap_err();
        assert!(matches!(err, GlissadeError::Scenario(_)));
    }

    #[test]
    fn rejects_unknown_link() {
        let src = r#"
[[events]]
at_ms = 0
type = "link_click"
link = 7
"#;
        let err = Scenario::from_toml_str(src).unwrap_err();
        assert!(matches!(err, GlissadeError::Scenario(_)));
    }

    #[test]
    fn rejects_invalid_config() {
        let src = r#"
[config]
waypointPercShow = 1.5
"#;
        let err = Scenario::from_toml_str(src).unwrap_err();
        assert!(matches!(err, GlissadeError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Scenario::from_toml_str("events = [").unwrap_err();
        assert!(matches!(err, GlissadeError::TomlParse(_)));
    }
}
