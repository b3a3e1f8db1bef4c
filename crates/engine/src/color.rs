//! Hex-string and heat-level color conversions.

use shared::domain::Rgb;

/// Parses `#RRGGBB` or `RRGGBB`, case-insensitive. Any other shape is `None`.
pub fn parse_hex(input: &str) -> Option<Rgb> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f32 / 255.0)
            .ok()
    };
    Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Maps a heat level to the legacy background gradient.
///
/// Three pieces: deep blue to teal on `[0, 33]`, teal to yellow on
/// `(33, 66]`, yellow to red on `(66, 100]`. The green and blue channels
/// step where the cold piece hands over to the medium one; the hot boundary
/// at 66 is seamless.
pub fn heat_gradient(level: f32) -> Rgb {
    let c = level.clamp(0.0, 100.0);
    if c <= 33.0 {
        let t = c / 33.0;
        Rgb::new(0.0, 0.5 * t, 0.4 + 0.4 * t)
    } else if c <= 66.0 {
        let t = (c - 33.0) / 33.0;
        Rgb::new(t, 0.6 + 0.4 * t, 1.0 - t)
    } else {
        let t = (c - 66.0) / 34.0;
        Rgb::new(1.0, 1.0 - t, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-3;

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < TOLERANCE
            && (a.g - b.g).abs() < TOLERANCE
            && (a.b - b.b).abs() < TOLERANCE
    }

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex("#00FF00"), Some(Rgb::new(0.0, 1.0, 0.0)));
        assert_eq!(parse_hex("00ff00"), Some(Rgb::new(0.0, 1.0, 0.0)));
        assert_eq!(parse_hex("#110022"), parse_hex("110022"));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(parse_hex("bad"), None);
        assert_eq!(parse_hex("#00FF0"), None);
        assert_eq!(parse_hex("#00FF001"), None);
        assert_eq!(parse_hex("00GG00"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn gradient_endpoints() {
        assert!(close(heat_gradient(0.0), Rgb::new(0.0, 0.0, 0.4)));
        assert!(close(heat_gradient(100.0), Rgb::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn gradient_clamps_out_of_range_levels() {
        assert_eq!(heat_gradient(-20.0), heat_gradient(0.0));
        assert_eq!(heat_gradient(250.0), heat_gradient(100.0));
    }

    #[test]
    fn gradient_is_continuous_at_hot_boundary() {
        let below = heat_gradient(66.0 - 1e-4);
        let at = heat_gradient(66.0);
        let above = heat_gradient(66.0 + 1e-4);
        assert!(close(below, at));
        assert!(close(at, above));
    }

    #[test]
    fn cold_boundary_values_from_each_side() {
        // Level 33 still belongs to the cold piece; the medium piece picks up
        // just above it with the documented green/blue step.
        assert!(close(heat_gradient(33.0), Rgb::new(0.0, 0.5, 0.8)));
        assert!(close(heat_gradient(33.0 + 1e-3), Rgb::new(0.0, 0.6, 1.0)));
    }
}
