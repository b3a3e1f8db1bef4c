use std::time::Instant;

use crate::domain::{Geometry, Mode, Rgb, SEGMENT_COUNT};

/// Last externally requested appearance, as reconciled from client commands.
///
/// Only the reconciler mutates this, and only through the state store's
/// exclusivity boundary. In heat mode the geometry is always [`Geometry::Ring`]
/// and the element color pure white; both are enforced when a command is
/// applied, never at read time.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetState {
    pub mode: Mode,
    pub geometry: Geometry,
    /// Legacy heat level, `[0, 100]`.
    pub colour_level: f32,
    /// Element thickness, `[0, 100]`.
    pub element_width: f32,
    /// Arc coverage, `[0, 1]`.
    pub percent: f32,
    pub element_color: Rgb,
    pub background_color: Rgb,
    /// Segment values are accepted unnormalized from input.
    pub segments: [f32; SEGMENT_COUNT],
    pub have_element_color: bool,
    pub have_background_color: bool,
    /// Stamp of the last accepted command.
    pub updated_at: Instant,
}

impl TargetState {
    pub fn new(now: Instant) -> Self {
        Self {
            mode: Mode::Heat,
            geometry: Geometry::Ring,
            colour_level: 30.0,
            element_width: 20.0,
            percent: 1.0,
            element_color: Rgb::WHITE,
            background_color: Rgb::BLUE,
            segments: [0.0; SEGMENT_COUNT],
            have_element_color: false,
            have_background_color: false,
            updated_at: now,
        }
    }
}

/// Per-tick interpolated state actually handed to the renderer.
///
/// Exclusively owned and mutated by the render-tick worker.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveState {
    pub mode: Mode,
    pub geometry: Geometry,
    pub colour_level: f32,
    pub element_width: f32,
    pub percent: f32,
    pub element_color: Rgb,
    pub background_color: Rgb,
    pub segments: [f32; SEGMENT_COUNT],
}

impl LiveState {
    /// Starts the live state on the target's current values so the first
    /// ticks do not animate in from zero.
    pub fn seeded_from(target: &TargetState) -> Self {
        Self {
            mode: target.mode,
            geometry: target.geometry,
            colour_level: target.colour_level,
            element_width: target.element_width,
            percent: target.percent,
            element_color: target.element_color,
            background_color: target.background_color,
            segments: target.segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_matches_process_start_appearance() {
        let target = TargetState::new(Instant::now());
        assert_eq!(target.mode, Mode::Heat);
        assert_eq!(target.geometry, Geometry::Ring);
        assert_eq!(target.colour_level, 30.0);
        assert_eq!(target.element_width, 20.0);
        assert_eq!(target.percent, 1.0);
        assert_eq!(target.element_color, Rgb::WHITE);
        assert_eq!(target.background_color, Rgb::BLUE);
        assert!(!target.have_element_color);
        assert!(!target.have_background_color);
    }

    #[test]
    fn live_state_seeds_from_target() {
        let mut target = TargetState::new(Instant::now());
        target.colour_level = 72.0;
        target.segments[3] = 55.0;
        let live = LiveState::seeded_from(&target);
        assert_eq!(live.colour_level, 72.0);
        assert_eq!(live.segments[3], 55.0);
        assert_eq!(live.geometry, target.geometry);
    }
}
