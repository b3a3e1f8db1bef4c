use serde::{Deserialize, Serialize};

use crate::domain::{Geometry, Mode, SEGMENT_COUNT};

/// Live-state projection returned by the status query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub colour: f32,
    pub geometry: Geometry,
    pub segments: [f32; SEGMENT_COUNT],
    /// Seconds since the last accepted command.
    pub age: f32,
    /// True once the signal is stale enough that the panel is blanked.
    pub quiet: bool,
    pub mode: Mode,
    pub width: f32,
    pub percent: f32,
}

/// Static, process-lifetime-immutable facts about the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub width: u32,
    pub height: u32,
    pub segments: u32,
    pub blank_interval: f32,
    pub anim_step: f32,
    pub target_fps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub uptime: u64,
}
