//! The scroll controller: one authoritative offset and the render
//! pipeline derived from it.
//!
//! [`SmoothScroll`] owns the page mirror, the scroll state and every
//! derived subsystem. Hosts feed it [`InputEvent`]s and clock ticks, and
//! apply the [`StyleCommand`]s it accumulates through a [`StyleBackend`].
//!
//! ```text
//! input ──▶ ScrollState ──▶ content transform
//!                      ├──▶ scrollbar thumb      (precise pointers only)
//!                      ├──▶ parallax pass
//!                      ├──▶ waypoint debounce ─▶ tick() ─▶ waypoint check
//!                      └──▶ header classes
//! ```

use glissade_types::backend::{
    CLASS_DRAGGING, CLASS_LINK, ElementId, PROP_TIME_SCROLL_PAGE, StyleBackend, StyleCommand,
    Target, Transform,
};
use glissade_types::config::ScrollConfig;
use glissade_types::error::{GlissadeError, Result};
use glissade_types::input::InputEvent;

use crate::geometry;
use crate::header::{HeaderController, HeaderState};
use crate::mode::InputMode;
use crate::navigation::{self, NavigationSession};
use crate::page::{CONTAINER_CLASS, CONTENT_CLASS, LINK_CLASS, Page};
use crate::parallax::ParallaxEngine;
use crate::position::ScrollState;
use crate::scrollbar::{DragSession, ThumbMetrics};
use crate::session::Interaction;
use crate::timer::TimerSet;
use crate::waypoint::WaypointTracker;


/// Deferred work driven by [`SmoothScroll::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Quiet interval after the last offset change elapsed.
    WaypointCheck,
    /// First re-measure after load.
    InitialSettle,
    /// Re-measure after a resize.
    ResizeSettle,
    /// A timed navigation reached its restore mark.
    NavigationRestore,
}

/// The smooth-scroll controller.
#[derive(Debug)]
pub struct SmoothScroll {
    page: Page,
    config: ScrollConfig,
    mode: InputMode,
    scroll: ScrollState,
    parallax: ParallaxEngine,
    waypoints: WaypointTracker,
    header: Option<HeaderController>,
    links: Vec<ElementId>,
    interaction: Interaction,
    timers: TimerSet<TimerKind>,
    /// A content transform is waiting for the next animation frame.
    frame_pending: bool,
    active_scroll_page: bool,
    debug: bool,
    outbox: Vec<StyleCommand>,
}

impl SmoothScroll {
    /// Build a controller over `page`.
    ///
    /// Fails without partial setup if the page has no scroll container or
    /// no content layer.
    pub fn init(page: Page, config: ScrollConfig, mode: InputMode) -> Result<Self> {
        config.validate()?;

        if page.container().is_none() {
            log::warn!("no .{CONTAINER_CLASS} element, smooth scroll disabled");
            return Err(GlissadeError::MissingElement(CONTAINER_CLASS.into()));
        }
        if page.content().is_none() {
            log::warn!("no .{CONTENT_CLASS} element, smooth scroll disabled");
            return Err(GlissadeError::MissingElement(CONTENT_CLASS.into()));
        }

        let container = container_size(&page, mode);
        let scroll = ScrollState::new(container, page.content_height);
        let parallax = ParallaxEngine::from_page(&page, mode, container);
        let waypoints = WaypointTracker::from_page(&page, config.waypoint_perc_show);
        let header = page.header().map(|_| HeaderController::new(&config));
        let links = page.query(LINK_CLASS);

        log::debug!(
            "smooth scroll ready ({mode:?}): {} waypoints, {} parallax elements, {} links",
            waypoints.len(),
            parallax.len(),
            links.len()
        );

        Ok(Self {
            active_scroll_page: config.active_scroll_page,
            debug: config.debug,
            page,
            config,
            mode,
            scroll,
            parallax,
            waypoints,
            header,
            links,
            interaction: Interaction::Idle,
            timers: TimerSet::new(),
            frame_pending: false,
            outbox: Vec::new(),
        })
    }

    /// Emit the initial state and arm the settle timer.
    pub fn start(&mut self, now: u64) {
        if self.mode.has_synthetic_scroll() {
            self.outbox.push(StyleCommand::CreateScrollbar);
            self.update_scrollbar();
        }
        self.parallax_pass();
        self.check_waypoints();
        self.timers
            .schedule(TimerKind::InitialSettle, now, self.config.initial_settle_ms);
    }

    /// Feed one input event.
    pub fn handle_event(&mut self, event: &InputEvent, now: u64) {
        match *event {
            InputEvent::Wheel { delta_y } => self.scroll_by(delta_y, now),
            InputEvent::KeyDown { key } => {
                let Some(step) = key.scroll_step(self.config.key_step) else {
                    return;
                };
                if !self.interaction.is_navigating() {
                    self.active_scroll_page = true;
                }
                self.scroll_by(step, now);
            },
            InputEvent::NativeScroll { scroll_y } => self.native_scroll(scroll_y),
            InputEvent::ThumbPointerDown { client_y } => self.begin_drag(client_y),
            InputEvent::PointerMove { client_y } => self.drag_to(client_y),
            InputEvent::PointerUp => self.end_drag(),
            InputEvent::Resize { screen_width } => {
                self.timers
                    .schedule(TimerKind::ResizeSettle, now, self.config.resize_settle_ms);
                if screen_width > self.config.small_screen_width {
                    self.check_waypoints();
                }
            },
            InputEvent::LinkClick { link } => {
                self.follow_link(link, now);
            },
        }
    }

    /// Move to `offset` and run the full render pipeline.
    pub fn render(&mut self, offset: f64, now: u64) {
        self.scroll.set_absolute(offset);
        self.run_pipeline(now);
    }

    /// Fire every timer due at `now`. Returns how many fired.
    pub fn tick(&mut self, now: u64) -> usize {
        let mut fired = 0;
        while let Some(kind) = self.timers.pop_due(now) {
            fired += 1;
            match kind {
                TimerKind::WaypointCheck => self.check_waypoints(),
                TimerKind::InitialSettle => {
                    self.remeasure();
                    if self.config.url_hash_listener {
                        self.follow_hash(now);
                    }
                    log::debug!("smooth scroll initialised");
                },
                TimerKind::ResizeSettle => self.remeasure(),
                TimerKind::NavigationRestore => self.restore_navigation(),
            }
        }
        fired
    }

    /// Animation-frame callback: flush the content transform coalesced
    /// during a drag. Returns whether anything was written.
    pub fn frame(&mut self, _now: u64) -> bool {
        if !self.frame_pending {
            return false;
        }
        self.frame_pending = false;
        self.apply_content_transform();
        true
    }

    /// Whether the host should schedule an animation frame.
    pub fn wants_frame(&self) -> bool {
        self.frame_pending
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Start a timed navigation to the element `href` points at.
    ///
    /// Returns `false` (and changes nothing) when the anchor does not
    /// resolve. A navigation already in flight is replaced.
    pub fn navigate_to(&mut self, href: &str, duration_ms: u64, now: u64) -> bool {
        let Some(target) = geometry::resolve_anchor(&self.page, href) else {
            log::debug!("navigation target {href:?} not found");
            return false;
        };

        if self.interaction.is_dragging() {
            self.end_drag();
        }

        let seconds = navigation::format_seconds(duration_ms);
        if self.mode.has_synthetic_scroll() {
            self.outbox.push(StyleCommand::SetProperty {
                target: Target::Scrollbar,
                name: PROP_TIME_SCROLL_PAGE.into(),
                value: seconds.clone(),
            });
            self.outbox
                .push(StyleCommand::add_class(Target::Scrollbar, CLASS_LINK));
        }
        self.outbox.push(StyleCommand::SetProperty {
            target: Target::Content,
            name: PROP_TIME_SCROLL_PAGE.into(),
            value: seconds,
        });
        self.outbox
            .push(StyleCommand::add_class(Target::Content, CLASS_LINK));
        if let Some(header) = &mut self.header {
            self.outbox.push(header.force_hidden());
        }

        self.scroll.set_content_size(self.page.content_height);
        let start = self.scroll.offset();
        let offset = self.scroll.set_absolute(geometry::offset_top(&self.page, target));
        self.apply_content_transform();
        self.active_scroll_page = false;
        self.update_scrollbar();

        let session = NavigationSession::new(start, offset, duration_ms, now);
        self.timers
            .schedule(TimerKind::NavigationRestore, now, session.restore_delay());
        self.interaction = Interaction::Navigating(session);

        if self.debug {
            log::info!("Navigate to {href}: {offset} over {duration_ms}ms");
        }
        true
    }

    /// Re-read container and content sizes, re-clamp the offset and
    /// recompute horizontal and zoom windows.
    pub fn remeasure(&mut self) {
        let before = self.scroll.offset();
        let container = container_size(&self.page, self.mode);
        self.scroll.remeasure(container, self.page.content_height);

        let cmds = self.parallax.recompute_windows(&self.page, container);
        for cmd in &cmds {
            if let StyleCommand::SetAttribute {
                target: Target::Element(id),
                name,
                value,
            } = cmd
            {
                if let Some(el) = self.page.get_mut(*id) {
                    el.set_attribute(name, value);
                }
            }
        }
        self.outbox.extend(cmds);

        if self.scroll.offset() != before {
            self.apply_content_transform();
        }
        self.update_scrollbar();
    }

    /// Take the accumulated commands.
    pub fn drain_commands(&mut self) -> Vec<StyleCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Apply the accumulated commands through `backend`.
    pub fn flush(&mut self, backend: &mut dyn StyleBackend) -> Result<()> {
        let cmds = self.drain_commands();
        backend.apply_batch(&cmds)
    }

    pub fn offset(&self) -> f64 {
        self.scroll.offset()
    }

    pub fn progress(&self) -> f64 {
        self.scroll.progress()
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    pub fn is_navigating(&self) -> bool {
        self.interaction.is_navigating()
    }

    pub fn navigation(&self) -> Option<&NavigationSession> {
        self.interaction.navigation()
    }

    /// Whether wheel and keyboard input currently move the page.
    pub fn is_scroll_active(&self) -> bool {
        self.active_scroll_page
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Keep the header visible while a host menu is open.
    pub fn set_menu_open(&mut self, open: bool) {
        if let Some(header) = &mut self.header {
            header.set_menu_open(open);
        }
    }

    pub fn header_state(&self) -> Option<HeaderState> {
        self.header.as_ref().map(HeaderController::state)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Mutable page mirror, for hosts reporting layout changes. Call
    /// [`SmoothScroll::remeasure`] afterwards.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    pub fn waypoint_visible(&self, element: ElementId) -> bool {
        self.waypoints.is_visible(element)
    }

    pub fn thumb_metrics(&self) -> ThumbMetrics {
        ThumbMetrics::compute(
            self.scroll.container_size(),
            self.scroll.content_size(),
            self.scroll.offset(),
        )
    }

    // -- input ---------------------------------------------------------

    fn accepts_delta(&self) -> bool {
        self.active_scroll_page && self.interaction.is_idle()
    }

    fn scroll_by(&mut self, delta: f64, now: u64) {
        if !self.mode.has_synthetic_scroll() {
            return;
        }
        self.scroll.set_content_size(self.page.content_height);
        if !self.accepts_delta() {
            self.scroll.note_delta(delta, self.config.scroll_amount_move);
            return;
        }
        self.scroll.apply_delta(delta, self.config.scroll_amount_move);
        self.run_pipeline(now);
    }

    fn native_scroll(&mut self, scroll_y: f64) {
        if self.mode.has_synthetic_scroll() {
            return;
        }
        self.scroll.set_content_size(self.page.content_height);
        let before = self.scroll.offset();
        let offset = self.scroll.set_absolute(scroll_y);
        self.scroll.note_delta(offset - before, 1.0);

        self.parallax_pass();
        self.check_waypoints();
        self.update_header();
        if self.debug {
            log::info!("Scroll Page: {offset}");
        }
    }

    fn begin_drag(&mut self, client_y: f64) {
        if !self.mode.has_synthetic_scroll() {
            return;
        }
        if self.interaction.is_navigating() {
            log::debug!("drag ignored while a navigation is in flight");
            return;
        }
        let drag = DragSession::begin(client_y, &self.thumb_metrics());
        self.interaction = Interaction::Dragging(drag);
        self.active_scroll_page = true;
        self.frame_pending = false;
        self.outbox
            .push(StyleCommand::add_class(Target::Scrollbar, CLASS_DRAGGING));
    }

    fn drag_to(&mut self, client_y: f64) {
        let Some(drag) = self.interaction.drag().copied() else {
            return;
        };
        let metrics = self.thumb_metrics();
        let offset = drag.offset_for(client_y, &metrics, self.scroll.max_scroll());
        self.scroll.set_absolute(offset);

        self.update_scrollbar();
        self.check_waypoints();
        self.update_header();
        self.parallax_pass();
        self.frame_pending = true;
    }

    fn end_drag(&mut self) {
        if !self.interaction.is_dragging() {
            return;
        }
        self.interaction = Interaction::Idle;
        self.outbox
            .push(StyleCommand::remove_class(Target::Scrollbar, CLASS_DRAGGING));
    }

    fn follow_link(&mut self, link: ElementId, now: u64) -> bool {
        let Some(href) = self.page.get_attribute(link, "href").map(str::to_owned) else {
            log::warn!("navigation link {link} has no href");
            return false;
        };
        let duration = navigation::link_duration(&self.page, link, self.config.default_link_time_ms);
        self.navigate_to(&href, duration, now)
    }

    fn follow_hash(&mut self, now: u64) -> bool {
        let Some(hash) = self.page.hash.clone() else {
            return false;
        };
        self.navigate_to(&hash, self.config.scroll_move_time, now)
    }

    fn restore_navigation(&mut self) {
        if !self.interaction.is_navigating() {
            return;
        }
        self.check_waypoints();
        self.parallax_pass();

        self.outbox
            .push(StyleCommand::remove_class(Target::Content, CLASS_LINK));
        self.outbox.push(StyleCommand::RemoveProperty {
            target: Target::Content,
            name: PROP_TIME_SCROLL_PAGE.into(),
        });
        if self.mode.has_synthetic_scroll() {
            self.outbox.push(StyleCommand::RemoveProperty {
                target: Target::Scrollbar,
                name: PROP_TIME_SCROLL_PAGE.into(),
            });
            self.outbox
                .push(StyleCommand::remove_class(Target::Scrollbar, CLASS_LINK));
        }

        self.active_scroll_page = true;
        self.interaction = Interaction::Idle;
    }

    // -- pipeline ------------------------------------------------------

    fn run_pipeline(&mut self, now: u64) {
        self.apply_content_transform();
        self.update_scrollbar();
        self.parallax_pass();
        self.timers
            .schedule(TimerKind::WaypointCheck, now, self.config.time_check_way_point);
        self.update_header();

        if self.debug {
            log::info!("Scroll Page: {}", self.scroll.offset());
        }
    }

    fn apply_content_transform(&mut self) {
        if !self.mode.has_synthetic_scroll() {
            return;
        }
        self.outbox.push(StyleCommand::transform(
            Target::Content,
            Transform::TranslateY(-self.scroll.offset()),
        ));
    }

    fn update_scrollbar(&mut self) {
        if !self.mode.has_synthetic_scroll() {
            return;
        }
        self.outbox.extend(self.thumb_metrics().commands());
    }

    fn parallax_pass(&mut self) {
        let cmds = self.parallax.pass(
            &self.page,
            self.scroll.offset(),
            self.scroll.container_size(),
            self.scroll.last_delta(),
            self.debug,
        );
        self.outbox.extend(cmds);
    }

    fn check_waypoints(&mut self) {
        if !self.config.active_waypoint_anim {
            return;
        }
        let cmds = self.waypoints.check(
            &self.page,
            self.scroll.offset(),
            self.scroll.container_size(),
        );
        self.outbox.extend(cmds);
    }

    fn update_header(&mut self) {
        let offset = self.scroll.offset();
        let progress = self.scroll.progress();
        let previous = self.scroll.record_progress();
        if let Some(header) = &mut self.header {
            self.outbox.extend(header.update(offset, progress, previous));
        }
    }
}

/// Visible height the engine scrolls against. Coarse-pointer hosts scroll
/// the document itself, so the viewport stands in for the container.
fn container_size(page: &Page, mode: InputMode) -> f64 {
    match mode {
        InputMode::PointerPrecise => page.container_height,
        InputMode::PointerCoarse => page.viewport_height,
    }
}
