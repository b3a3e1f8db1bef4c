use serde::{Deserialize, Serialize};

/// Number of interactive segment slots carried by the display state.
pub const SEGMENT_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Heat,
    Custom,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Heat => "heat",
            Mode::Custom => "custom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "heat" => Some(Mode::Heat),
            "custom" => Some(Mode::Custom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    Ring,
    Circle,
    Square,
    Triangle,
    X,
}

impl Geometry {
    pub fn name(self) -> &'static str {
        match self {
            Geometry::Ring => "ring",
            Geometry::Circle => "circle",
            Geometry::Square => "square",
            Geometry::Triangle => "triangle",
            Geometry::X => "x",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ring" => Some(Geometry::Ring),
            "circle" => Some(Geometry::Circle),
            "square" => Some(Geometry::Square),
            "triangle" => Some(Geometry::Triangle),
            "x" => Some(Geometry::X),
            _ => None,
        }
    }
}

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const BLUE: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };

    /// Builds a color, clamping each channel into `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    pub fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        ]
    }
}
