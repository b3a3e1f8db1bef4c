//! Lenient decoding of raw update bodies into partial commands.
//!
//! A field only ever means "the client asked for this value"; absence is "no
//! opinion", never "reset". A value of the wrong shape drops that one field
//! rather than failing the request, unless nothing recognizable is left.

use serde_json::{Map, Value};
use shared::domain::{Geometry, Mode, Rgb, SEGMENT_COUNT};
use thiserror::Error;

use crate::color;

/// Typed record of the fields a single update carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialCommand {
    pub mode: Option<Mode>,
    pub colour: Option<f32>,
    pub geometry: Option<Geometry>,
    /// At most [`SEGMENT_COUNT`] leading entries; shorter lists replace only
    /// the slots they cover.
    pub segments: Option<Vec<f32>>,
    pub width: Option<f32>,
    pub percent: Option<f32>,
    pub element_color: Option<Rgb>,
    pub background_color: Option<Rgb>,
}

impl PartialCommand {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.colour.is_none()
            && self.geometry.is_none()
            && self.segments.is_none()
            && self.width.is_none()
            && self.percent.is_none()
            && self.element_color.is_none()
            && self.background_color.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid body")]
    InvalidBody,
    #[error("no valid fields")]
    NoValidFields,
}

/// Decodes an update body. Unrecognized keys are ignored.
pub fn parse(body: &[u8]) -> Result<PartialCommand, ParseError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ParseError::InvalidBody)?;
    let fields = value.as_object().ok_or(ParseError::InvalidBody)?;

    let cmd = PartialCommand {
        mode: string_field(fields, "mode").and_then(Mode::from_name),
        colour: number_field(fields, "colour").map(|v| v.clamp(0.0, 100.0)),
        geometry: string_field(fields, "geometry").and_then(Geometry::from_name),
        segments: segments_field(fields),
        width: number_field(fields, "width").map(|v| v.clamp(0.0, 100.0)),
        percent: number_field(fields, "percent").map(|v| v.clamp(0.0, 1.0)),
        element_color: string_field(fields, "elementColor").and_then(color::parse_hex),
        background_color: string_field(fields, "backgroundColor").and_then(color::parse_hex),
    };

    if cmd.is_empty() {
        return Err(ParseError::NoValidFields);
    }
    Ok(cmd)
}

fn string_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f32> {
    fields.get(key).and_then(Value::as_f64).map(|v| v as f32)
}

fn segments_field(fields: &Map<String, Value>) -> Option<Vec<f32>> {
    let items = fields.get("segments")?.as_array()?;
    let mut parsed = Vec::with_capacity(items.len().min(SEGMENT_COUNT));
    for item in items.iter().take(SEGMENT_COUNT) {
        parsed.push(item.as_f64()? as f32);
    }
    Some(parsed)
}
