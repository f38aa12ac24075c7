//! Scroll offset, container and content sizes.
//!
//! [`ScrollState`] is the single authoritative scroll position. Every other
//! subsystem reads it; only the methods here mutate it.

/// Scroll state for the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    /// Current offset in pixels, always within `[0, max_scroll()]`.
    offset: f64,
    /// Visible height of the scroll container.
    container_size: f64,
    /// Total height of the content layer.
    content_size: f64,
    /// Progress recorded by the previous header update.
    last_progress: Option<f64>,
    /// Magnitude of the most recent speed-adjusted delta.
    last_delta: f64,
}

impl ScrollState {
    pub fn new(container_size: f64, content_size: f64) -> Self {
        Self {
            offset: 0.0,
            container_size: sanitize(container_size),
            content_size: sanitize(content_size),
            last_progress: None,
            last_delta: 0.0,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn container_size(&self) -> f64 {
        self.container_size
    }

    pub fn content_size(&self) -> f64 {
        self.content_size
    }

    /// Magnitude of the most recent scroll delta, used as the parallax
    /// hysteresis band.
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    pub fn last_progress(&self) -> Option<f64> {
        self.last_progress
    }

    /// Get the maximum scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.content_size - self.container_size).max(0.0)
    }

    /// Record the magnitude of a delta without moving.
    ///
    /// Used when scrolling is suspended: the hysteresis band still tracks
    /// how hard the user is pushing.
    pub fn note_delta(&mut self, delta: f64, speed: f64) {
        let scaled = delta * speed;
        if scaled.is_finite() {
            self.last_delta = scaled.abs();
        }
    }

    /// Move by `delta * speed`, clamp, and round to a whole pixel.
    pub fn apply_delta(&mut self, delta: f64, speed: f64) -> f64 {
        self.note_delta(delta, speed);
        let raw = self.offset + delta * speed;
        if raw.is_finite() {
            self.offset = self.clamped(raw);
        }
        self.offset
    }

    /// Jump to an absolute offset (drag, navigation, native scroll).
    pub fn set_absolute(&mut self, offset: f64) -> f64 {
        if offset.is_finite() {
            self.offset = self.clamped(offset);
        }
        self.offset
    }

    /// Normalised position in the full scroll range.
    ///
    /// Returns `0.0` when there is nothing to scroll.
    pub fn progress(&self) -> f64 {
        let max = self.max_scroll();
        if max <= 0.0 { 0.0 } else { self.offset / max }
    }

    /// Store the current progress and return the previous one.
    pub fn record_progress(&mut self) -> Option<f64> {
        self.last_progress.replace(self.progress())
    }

    /// Update both sizes (after a resize or a content mutation) and
    /// re-clamp the offset.
    pub fn remeasure(&mut self, container_size: f64, content_size: f64) {
        self.container_size = sanitize(container_size);
        self.content_size = sanitize(content_size);
        self.offset = self.clamped(self.offset);
    }

    /// Update the content size only (content grew or shrank).
    pub fn set_content_size(&mut self, content_size: f64) {
        self.content_size = sanitize(content_size);
        self.offset = self.clamped(self.offset);
    }

    /// Round to the nearest pixel, then clamp to `[0, max_scroll]`.
    fn clamped(&self, raw: f64) -> f64 {
        raw.round().clamp(0.0, self.max_scroll())
    }
}

fn sanitize(size: f64) -> f64 {
    if size.is_finite() { size.max(0.0) } else { 0.0 }
}
