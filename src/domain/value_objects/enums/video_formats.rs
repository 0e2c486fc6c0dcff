use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MediaElementType {
    Video,
    Image,
    Audio,
    Text,
    #[serde(rename = "3d-model")]
    Model3d,
    AiGenerated,
    Effect,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SceneBackgroundType {
    #[default]
    Color,
    Image,
    Video,
    AiGenerated,
    #[serde(rename = "3d-scene")]
    Scene3d,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SceneTransitionType {
    #[default]
    None,
    Fade,
    Wipe,
    Slide,
    Zoom,
    AiTransition,
    Custom,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VideoExportFormat {
    #[default]
    Mp4,
    Mov,
    Webm,
    Avi,
    Gif,
}

impl Display for VideoExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let format = match self {
            VideoExportFormat::Mp4 => "mp4",
            VideoExportFormat::Mov => "mov",
            VideoExportFormat::Webm => "webm",
            VideoExportFormat::Avi => "avi",
            VideoExportFormat::Gif => "gif",
        };
        write!(f, "{}", format)
    }
}

/// Output resolution tier, also used as the user's playback preference.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VideoQuality {
    #[serde(rename = "480p")]
    Sd480,
    #[serde(rename = "720p")]
    Hd720,
    #[default]
    #[serde(rename = "1080p")]
    FullHd1080,
    #[serde(rename = "4k")]
    Uhd4k,
}

impl VideoQuality {
    /// (width, height) in pixels.
    pub fn resolution(&self) -> (u32, u32) {
        match self {
            VideoQuality::Sd480 => (854, 480),
            VideoQuality::Hd720 => (1280, 720),
            VideoQuality::FullHd1080 => (1920, 1080),
            VideoQuality::Uhd4k => (3840, 2160),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_maps_to_resolution() {
        assert_eq!(VideoQuality::Sd480.resolution(), (854, 480));
        assert_eq!(VideoQuality::Uhd4k.resolution(), (3840, 2160));
        let parsed: VideoQuality = serde_json::from_str("\"720p\"").unwrap();
        assert_eq!(parsed.resolution(), (1280, 720));
    }
}
