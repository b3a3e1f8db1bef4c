//! Folds a partial command into the previous target state.
//!
//! Runs in two ordered phases: raw field overwrite first, then the
//! mode-invariant normalization pass. The split keeps "heat implies ring and
//! a white element" on one testable path instead of scattered through the
//! field handling.

use std::time::Instant;

use shared::domain::{Geometry, Mode, Rgb};
use shared::state::TargetState;

use crate::color;
use crate::command::PartialCommand;

/// Produces the next target state. Pure apart from stamping `now`.
pub fn reconcile(prev: &TargetState, cmd: &PartialCommand, now: Instant) -> TargetState {
    let mut next = apply_fields(prev, cmd);
    normalize(&mut next, cmd);
    next.updated_at = now;
    next
}

/// Phase one: every present field overwrites, absent fields pass through.
fn apply_fields(prev: &TargetState, cmd: &PartialCommand) -> TargetState {
    let mut next = prev.clone();
    if let Some(mode) = cmd.mode {
        next.mode = mode;
    }
    if let Some(colour) = cmd.colour {
        next.colour_level = colour;
    }
    if let Some(geometry) = cmd.geometry {
        next.geometry = geometry;
    }
    if let Some(segments) = &cmd.segments {
        // Partial replacement: a short list leaves the tail slots untouched.
        for (slot, value) in next.segments.iter_mut().zip(segments) {
            *slot = *value;
        }
    }
    if let Some(width) = cmd.width {
        next.element_width = width;
    }
    if let Some(percent) = cmd.percent {
        next.percent = percent;
    }
    if let Some(element_color) = cmd.element_color {
        next.element_color = element_color;
        next.have_element_color = true;
    }
    if let Some(background_color) = cmd.background_color {
        next.background_color = background_color;
        next.have_background_color = true;
    }
    next
}

/// Phase two: mode invariants, evaluated against the resulting mode.
fn normalize(state: &mut TargetState, cmd: &PartialCommand) {
    match state.mode {
        Mode::Heat => {
            state.geometry = Geometry::Ring;
            state.element_color = Rgb::WHITE;
            state.have_element_color = true;
            // The background follows the heat translation unless THIS command
            // explicitly provided one. The colour level may well have come
            // from an earlier command.
            if cmd.background_color.is_none() {
                state.background_color = color::heat_gradient(state.colour_level);
                state.have_background_color = true;
            }
        }
        Mode::Custom => {
            // One-shot legacy translation: only a command that itself carries
            // colour (and no explicit background) re-derives the background.
            if cmd.background_color.is_none() && cmd.colour.is_some() {
                state.background_color = color::heat_gradient(state.colour_level);
                state.have_background_color = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command;

    fn base() -> TargetState {
        TargetState::new(Instant::now())
    }

    fn cmd(json: &str) -> PartialCommand {
        command::parse(json.as_bytes()).expect("test command")
    }

    #[test]
    fn absent_fields_pass_through_unchanged() {
        let mut prev = base();
        prev.mode = Mode::Custom;
        prev.element_width = 47.0;
        prev.percent = 0.74;

        let next = reconcile(&prev, &cmd(r#"{"geometry": "triangle"}"#), Instant::now());
        assert_eq!(next.geometry, Geometry::Triangle);
        assert_eq!(next.element_width, 47.0);
        assert_eq!(next.percent, 0.74);
        assert_eq!(next.mode, Mode::Custom);
    }

    #[test]
    fn mode_persists_across_commands_that_omit_it() {
        let prev = base();
        let next = reconcile(&prev, &cmd(r#"{"mode": "custom", "width": 10}"#), Instant::now());
        assert_eq!(next.mode, Mode::Custom);

        let later = reconcile(&next, &cmd(r#"{"width": 20}"#), Instant::now());
        assert_eq!(later.mode, Mode::Custom);
    }

    #[test]
    fn heat_forces_ring_and_white_element() {
        let prev = base();
        let next = reconcile(
            &prev,
            &cmd(r##"{"mode": "heat", "geometry": "square", "elementColor": "#FF0000"}"##),
            Instant::now(),
        );
        assert_eq!(next.geometry, Geometry::Ring);
        assert_eq!(next.element_color, Rgb::WHITE);
        assert!(next.have_element_color);
    }

    #[test]
    fn heat_translates_colour_to_background() {
        let prev = base();
        let next = reconcile(&prev, &cmd(r#"{"mode": "heat", "colour": 15}"#), Instant::now());
        assert_eq!(next.background_color, color::heat_gradient(15.0));
        assert!(next.have_background_color);
    }

    #[test]
    fn heat_recomputes_background_from_earlier_colour() {
        let prev = base();
        let first = reconcile(&prev, &cmd(r#"{"mode": "heat", "colour": 80}"#), Instant::now());
        // Width-only command: background still follows the stored colour.
        let second = reconcile(&first, &cmd(r#"{"width": 30}"#), Instant::now());
        assert_eq!(second.background_color, color::heat_gradient(80.0));
    }

    #[test]
    fn explicit_background_bypasses_heat_gradient() {
        let prev = base();
        let next = reconcile(
            &prev,
            &cmd(r##"{"mode": "heat", "colour": 15, "backgroundColor": "#110022"}"##),
            Instant::now(),
        );
        assert_eq!(next.background_color, color::parse_hex("#110022").unwrap());
    }

    #[test]
    fn custom_translates_colour_once() {
        let prev = base();
        let custom = reconcile(
            &prev,
            &cmd(r#"{"mode": "custom", "colour": 80}"#),
            Instant::now(),
        );
        assert_eq!(custom.background_color, color::heat_gradient(80.0));

        // A later command with neither colour nor backgroundColor leaves the
        // background exactly where it was, even though mode is still custom.
        let later = reconcile(&custom, &cmd(r#"{"width": 55}"#), Instant::now());
        assert_eq!(later.background_color, color::heat_gradient(80.0));
        assert_eq!(later.element_width, 55.0);
    }

    #[test]
    fn custom_keeps_explicit_background_over_translation() {
        let prev = base();
        let next = reconcile(
            &prev,
            &cmd(r##"{"mode": "custom", "colour": 80, "backgroundColor": "#00FF00"}"##),
            Instant::now(),
        );
        assert_eq!(next.background_color, color::parse_hex("#00FF00").unwrap());
    }

    #[test]
    fn custom_re_derives_on_every_colour_command() {
        // No change-detection: resending the same colour re-runs the
        // translation even when the stored background drifted elsewhere.
        let prev = base();
        let first = reconcile(
            &prev,
            &cmd(r#"{"mode": "custom", "colour": 40}"#),
            Instant::now(),
        );
        let repainted = reconcile(
            &first,
            &cmd(r##"{"backgroundColor": "#123456"}"##),
            Instant::now(),
        );
        let again = reconcile(&repainted, &cmd(r#"{"colour": 40}"#), Instant::now());
        assert_eq!(again.background_color, color::heat_gradient(40.0));
    }

    #[test]
    fn segments_replace_only_their_prefix() {
        let mut prev = base();
        prev.segments = [9.0; shared::domain::SEGMENT_COUNT];
        let next = reconcile(&prev, &cmd(r#"{"segments": [1, 2, 3]}"#), Instant::now());
        assert_eq!(next.segments[..3], [1.0, 2.0, 3.0]);
        assert_eq!(next.segments[3..], [9.0; 7]);
    }

    #[test]
    fn stamps_the_supplied_timestamp() {
        let prev = base();
        let now = Instant::now();
        let next = reconcile(&prev, &cmd(r#"{"colour": 1}"#), now);
        assert_eq!(next.updated_at, now);
    }

    #[test]
    fn switching_back_to_heat_restores_forced_look() {
        let prev = base();
        let custom = reconcile(
            &prev,
            &cmd(r##"{"mode": "custom", "geometry": "x", "elementColor": "#00FF00"}"##),
            Instant::now(),
        );
        assert_eq!(custom.geometry, Geometry::X);

        let heat = reconcile(&custom, &cmd(r#"{"mode": "heat"}"#), Instant::now());
        assert_eq!(heat.geometry, Geometry::Ring);
        assert_eq!(heat.element_color, Rgb::WHITE);
        assert_eq!(heat.background_color, color::heat_gradient(heat.colour_level));
    }
}
