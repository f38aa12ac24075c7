//! Drive the engine through a scenario on a simulated clock.

use glissade_core::SmoothScroll;
use glissade_types::backend::{ElementId, StyleBackend, StyleCommand};
use glissade_types::error::Result;
use serde::Serialize;

use crate::scenario::Scenario;

/// Frame interval used to flush drag transforms.
const FRAME_MS: u64 = 16;

/// A style command stamped with the host time it was applied at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub command: StyleCommand,
}

/// Result of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub name: String,
    pub entries: Vec<Entry>,
    pub final_offset: f64,
    pub progress: f64,
    pub navigating: bool,
    pub visible_waypoints: Vec<ElementId>,
    pub ended_at_ms: u64,
}

/// Backend that stamps every command with the current clock.
#[derive(Default)]
struct Timeline {
    now: u64,
    entries: Vec<Entry>,
}

impl StyleBackend for Timeline {
    fn apply(&mut self, cmd: &StyleCommand) -> Result<()> {
        self.entries.push(Entry {
            at_ms: self.now,
            command: cmd.clone(),
        });
        Ok(())
    }
}

/// Replay `scenario` and collect everything the engine emitted.
pub fn run(scenario: &Scenario) -> Result<Outcome> {
    let mut engine =
        SmoothScroll::init(scenario.page.clone(), scenario.config.clone(), scenario.mode)?;
    let mut timeline = Timeline::default();

    engine.start(0);
    engine.flush(&mut timeline)?;

    for ev in &scenario.events {
        advance(&mut engine, &mut timeline, ev.at_ms)?;
        timeline.now = ev.at_ms;
        log::debug!("{}ms: {:?}", ev.at_ms, ev.event);
        engine.handle_event(&ev.event, ev.at_ms);
        engine.flush(&mut timeline)?;

        if engine.wants_frame() {
            timeline.now = ev.at_ms + FRAME_MS;
            engine.frame(timeline.now);
            engine.flush(&mut timeline)?;
        }
    }

    let end = scenario.end_ms.unwrap_or(u64::MAX);
    advance(&mut engine, &mut timeline, end)?;
    let ended_at_ms = if scenario.end_ms.is_some() { end } else { timeline.now };

    let visible_waypoints = engine
        .page()
        .query(glissade_core::page::WAYPOINT_CLASS)
        .into_iter()
        .filter(|id| engine.waypoint_visible(*id))
        .collect();

    Ok(Outcome {
        name: scenario.name.clone(),
        entries: timeline.entries,
        final_offset: engine.offset(),
        progress: engine.progress(),
        navigating: engine.is_navigating(),
        visible_waypoints,
        ended_at_ms,
    })
}

/// Fire every timer due up to `until`, one deadline at a time.
fn advance(engine: &mut SmoothScroll, timeline: &mut Timeline, until: u64) -> Result<()> {
    while let Some(deadline) = engine.next_deadline() {
        if deadline > until {
            break;
        }
        timeline.now = deadline.max(timeline.now);
        engine.tick(deadline);
        engine.flush(timeline)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use glissade_types::backend::{CLASS_ANIMATED, CLASS_LINK, Target, Transform};

    use super::*;

    const LANDING: &str = r##"
[page]
container_height = 500
content_height = 1500

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
at_ms = 1000
type = "link_click"
link = 3

[[events]]
at_ms = 1200
type = "wheel"
delta_y = 100

[[events]]
at_ms = 3000
type = "wheel"
delta_y = 100
"##;

    #[test]
    fn navigation_replay() {
        let scenario = Scenario::from_toml_str(LANDING).unwrap();
        let outcome = run(&scenario).unwrap();

        assert_eq!(outcome.final_offset, 920.0);
        assert!(!outcome.navigating);
        assert_eq!(outcome.visible_waypoints, vec![ElementId(2)]);

        let link_added = outcome
            .entries
            .iter()
            .find(|e| e.command == StyleCommand::add_class(Target::Content, CLASS_LINK))
            .unwrap();
        assert_eq!(link_added.at_ms, 1000);

        let link_removed = outcome
            .entries
            .iter()
            .find(|e| e.command == StyleCommand::remove_class(Target::Content, CLASS_LINK))
            .unwrap();
        assert_eq!(link_removed.at_ms, 2600);

        let animated = outcome
            .entries
            .iter()
            .find(|e| {
                e.command == StyleCommand::add_class(Target::Element(ElementId(2)), CLASS_ANIMATED)
            })
            .unwrap();
        assert_eq!(animated.at_ms, 2600);

        // The wheel at 1200 was swallowed by the navigation.
        assert!(
            !outcome
                .entries
                .iter()
                .any(|e| e.at_ms == 1200 && matches!(e.command, StyleCommand::SetTransform { .. }))
        );
        let last = outcome
            .entries
            .iter()
            .rev()
            .find_map(|e| match e.command {
                StyleCommand::SetTransform {
                    target: Target::Content,
                    transform,
                } => Some(transform),
                _ => None,
            });
        assert_eq!(last, Some(Transform::TranslateY(-920.0)));
    }

    #[test]
    fn drag_flushes_on_next_frame() {
        let src = format!(
            "{}\n{}",
            LANDING.split("[[events]]").next().unwrap(),
            r#"
[[events]]
at_ms = 700
type = "thumb_pointer_down"
client_y = 0

[[events]]
at_ms = 710
type = "pointer_move"
client_y = 1000

[[events]]
at_ms = 720
type = "pointer_up"
"#
        );
        let scenario = Scenario::from_toml_str(&src).unwrap();
        let outcome = run(&scenario).unwrap();
        assert_eq!(outcome.final_offset, 1000.0);

        let content = outcome
            .entries
            .iter()
            .find(|e| {
                e.command == StyleCommand::transform(Target::Content, Transform::TranslateY(-1000.0))
            })
            .unwrap();
        assert_eq!(content.at_ms, 710 + FRAME_MS);
    }

    #[test]
    fn end_ms_stops_pending_timers() {
        let mut scenario = Scenario::from_toml_str(LANDING).unwrap();
        scenario.events.truncate(1);
        scenario.end_ms = Some(2000);
        let outcome = run(&scenario).unwrap();
        assert_eq!(outcome.ended_at_ms, 2000);
        assert!(outcome.navigating);
        assert_eq!(outcome.final_offset, 800.0);
    }

    #[test]
    fn missing_container_fails() {
        let scenario = Scenario::default();
        assert!(run(&scenario).is_err());
    }
}
