//! Sampled interpolation for timed navigations.

pub mod easing {
    /// Cubic in-out curve over `t` in `[0, 1]`, close to the CSS `ease`
    /// timing the content layer transitions with. Out-of-range `t` clamps.
    pub fn ease_in_out_cubic(t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            let u = 2.0 * t - 2.0;
            0.5 * u * u * u + 1.0
        }
    }
}

/// Interpolates `from` to `to` over `duration_ms`. Stateless: callers
/// pass the elapsed time to [`Tween::sample`].
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: u64,
    pub easing: fn(f64) -> f64,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: u64, easing: fn(f64) -> f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
        }
    }

    /// Value `elapsed_ms` in; past the end it holds at `to`.
    pub fn sample(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.to;
        }
        let t = elapsed_ms as f64 / self.duration_ms as f64;
        self.from + (self.to - self.from) * (self.easing)(t)
    }
}
