use std::fs;

use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub api_token: String,
    pub panel_width: u32,
    pub panel_height: u32,
    pub target_fps: u32,
    /// Seconds of inactivity before the panel blanks; 0 disables blanking.
    pub blank_after_seconds: f32,
    /// Seconds of inactivity before the animation clock freezes.
    pub freeze_after_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            api_token: "1234567890".into(),
            panel_width: 192,
            panel_height: 64,
            target_fps: 40,
            blank_after_seconds: 0.0,
            freeze_after_seconds: 60.0,
        }
    }
}

/// Keys recognized in `controller.toml`; all optional.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    api_token: Option<String>,
    panel_width: Option<u32>,
    panel_height: Option<u32>,
    target_fps: Option<u32>,
    blank_after_seconds: Option<f32>,
    freeze_after_seconds: Option<f32>,
}

/// Defaults, then `controller.toml`, then `APP__*` environment overrides.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("controller.toml") {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            merge_file(&mut settings, file_cfg);
        }
    }

    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("APP__API_TOKEN") {
        settings.api_token = v;
    }
    if let Ok(v) = std::env::var("APP__PANEL_WIDTH") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.panel_width = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__PANEL_HEIGHT") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.panel_height = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__TARGET_FPS") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.target_fps = parsed.max(1);
        }
    }
    if let Ok(v) = std::env::var("APP__BLANK_AFTER_SECONDS") {
        if let Ok(parsed) = v.parse::<f32>() {
            settings.blank_after_seconds = parsed.max(0.0);
        }
    }
    if let Ok(v) = std::env::var("APP__FREEZE_AFTER_SECONDS") {
        if let Ok(parsed) = v.parse::<f32>() {
            settings.freeze_after_seconds = parsed.max(0.0);
        }
    }

    settings
}

fn merge_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.bind_addr {
        settings.bind_addr = v;
    }
    if let Some(v) = file_cfg.api_token {
        settings.api_token = v;
    }
    if let Some(v) = file_cfg.panel_width {
        settings.panel_width = v;
    }
    if let Some(v) = file_cfg.panel_height {
        settings.panel_height = v;
    }
    if let Some(v) = file_cfg.target_fps {
        settings.target_fps = v.max(1);
    }
    if let Some(v) = file_cfg.blank_after_seconds {
        settings.blank_after_seconds = v.max(0.0);
    }
    if let Some(v) = file_cfg.freeze_after_seconds {
        settings.freeze_after_seconds = v.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_panel_build() {
        let settings = Settings::default();
        assert_eq!(settings.panel_width, 192);
        assert_eq!(settings.panel_height, 64);
        assert_eq!(settings.target_fps, 40);
        assert_eq!(settings.blank_after_seconds, 0.0);
        assert_eq!(settings.freeze_after_seconds, 60.0);
    }

    #[test]
    fn file_settings_merge_over_defaults() {
        let mut settings = Settings::default();
        let file_cfg: FileSettings =
            toml::from_str("bind_addr = \"127.0.0.1:9000\"\ntarget_fps = 25\n").expect("toml");
        merge_file(&mut settings, file_cfg);
        assert_eq!(settings.bind_addr, "127.0.0.1:9000");
        assert_eq!(settings.target_fps, 25);
        assert_eq!(settings.panel_width, 192);
    }

    #[test]
    fn zero_fps_is_raised_to_one() {
        let mut settings = Settings::default();
        let file_cfg: FileSettings = toml::from_str("target_fps = 0\n").expect("toml");
        merge_file(&mut settings, file_cfg);
        assert_eq!(settings.target_fps, 1);
    }

    #[test]
    fn unknown_file_keys_are_tolerated() {
        let parsed = toml::from_str::<FileSettings>("panel_depth = 3\n");
        assert!(parsed.is_ok());
    }
}
