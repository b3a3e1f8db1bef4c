//! Rate-limited chase of the live state toward the target.

use shared::domain::Rgb;
use shared::state::{LiveState, TargetState};

/// Chase rate for scalar animation fields, units per second.
pub const ANIM_STEP: f32 = 40.0;
/// Chase rate for color channels, per second. Slower so repaints stay smooth.
pub const COLOR_STEP: f32 = 2.0;
/// Upper bound on per-tick elapsed time, bounding the catch-up jump after a
/// stall.
pub const MAX_TICK_SECONDS: f32 = 0.1;

/// Advances the live state once per render tick.
pub struct Integrator {
    live: LiveState,
}

impl Integrator {
    pub fn new(live: LiveState) -> Self {
        Self { live }
    }

    pub fn live(&self) -> &LiveState {
        &self.live
    }

    /// One tick of interpolation toward `target` over `dt` seconds.
    ///
    /// Interpolated fields move by at most their rate times `dt` in either
    /// direction and settle exactly on the target once within reach; discrete
    /// fields copy instantly.
    pub fn advance(&mut self, target: &TargetState, dt: f32) {
        let live = &mut self.live;
        let scalar_step = ANIM_STEP * dt;
        let color_step = COLOR_STEP * dt;

        live.colour_level = chase(live.colour_level, target.colour_level, scalar_step);
        live.element_width = chase(live.element_width, target.element_width, scalar_step);
        live.percent = chase(live.percent, target.percent, scalar_step);
        for (current, goal) in live.segments.iter_mut().zip(target.segments.iter()) {
            *current = chase(*current, *goal, scalar_step);
        }

        live.element_color = chase_rgb(live.element_color, target.element_color, color_step);
        live.background_color =
            chase_rgb(live.background_color, target.background_color, color_step);

        live.geometry = target.geometry;
        live.mode = target.mode;
    }
}

fn chase(current: f32, target: f32, max_step: f32) -> f32 {
    current + (target - current).clamp(-max_step, max_step)
}

fn chase_rgb(current: Rgb, target: Rgb, max_step: f32) -> Rgb {
    Rgb {
        r: chase(current.r, target.r, max_step),
        g: chase(current.g, target.g, max_step),
        b: chase(current.b, target.b, max_step),
    }
}
