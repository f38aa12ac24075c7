//! Engine configuration.
//!
//! A flat set of named options read once at initialisation. Keys use the
//! camelCase names of the page-level options (`scrollAmountMove`,
//! `waypointPercShow`, ...) so a config file can be shared with markup
//! authors.

use serde::{Deserialize, Serialize};

use crate::error::{GlissadeError, Result};

/// Engine options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    /// Speed multiplier applied to every wheel / key delta.
    pub scroll_amount_move: f64,
    /// Duration of the URL-hash navigation, in milliseconds.
    pub scroll_move_time: u64,
    /// Fraction of a waypoint's height that must be in view before it animates.
    pub waypoint_perc_show: f64,
    /// Quiet interval after the last offset change before waypoints are checked.
    pub time_check_way_point: u64,
    /// Whether wheel / keyboard input moves the page.
    pub active_scroll_page: bool,
    /// Whether the header hides on forward scroll and reappears on backward scroll.
    pub active_toggle_menu_fixed: bool,
    /// Whether a `#id` hash on load navigates to its element.
    #[serde(rename = "URLhashListener", alias = "urlHashListener")]
    pub url_hash_listener: bool,
    /// Whether waypoints receive the `animated` class.
    pub active_waypoint_anim: bool,
    /// Per-update diagnostics.
    pub debug: bool,

    /// Delay before the first re-measure (images may still be loading).
    pub initial_settle_ms: u64,
    /// Delay between a resize and the re-measure it triggers.
    pub resize_settle_ms: u64,
    /// Screens at most this wide skip the immediate waypoint check on resize.
    pub small_screen_width: u32,
    /// Offset past which the header turns compact.
    pub compact_threshold: f64,
    /// Offset past which forward scrolling hides the header.
    pub hide_threshold: f64,
    /// Pixels moved by one arrow key press, before the speed multiplier.
    pub key_step: f64,
    /// Navigation duration for links without `data-smooth-time-link`.
    pub default_link_time_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_amount_move: 1.2,
            scroll_move_time: 1100,
            waypoint_perc_show: 0.3,
            time_check_way_point: 700,
            active_scroll_page: true,
            active_toggle_menu_fixed: true,
            url_hash_listener: true,
            active_waypoint_anim: true,
            debug: false,
            initial_settle_ms: 500,
            resize_settle_ms: 1000,
            small_screen_width: 768,
            compact_threshold: 50.0,
            hide_threshold: 80.0,
            key_step: 100.0,
            default_link_time_ms: 2000,
        }
    }
}

impl ScrollConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        log::debug!("loaded scroll config: {config:?}");
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.scroll_amount_move.is_finite() || self.scroll_amount_move <= 0.0 {
            return Err(GlissadeError::Config(format!(
                "scrollAmountMove must be a positive number, got {}",
                self.scroll_amount_move
            )));
        }
        if !(0.0..=1.0).contains(&self.waypoint_perc_show) {
            return Err(GlissadeError::Config(format!(
                "waypointPercShow must be between 0 and 1, got {}",
                self.waypoint_perc_show
            )));
        }
        if self.scroll_move_time == 0 {
            return Err(GlissadeError::Config("scrollMoveTime must be non-zero".into()));
        }
        Ok(())
    }
}
