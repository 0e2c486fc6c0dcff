use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TrackType {
    Vocal,
    Instrument,
    Beat,
    Effect,
    AiGenerated,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AudioEffectType {
    Reverb,
    Delay,
    Compression,
    Eq,
    Distortion,
    Limiter,
    AiEnhancement,
    AiMastering,
    Other,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudioExportFormat {
    #[default]
    Mp3,
    Wav,
    Ogg,
    Flac,
    Aac,
}

impl Display for AudioExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let format = match self {
            AudioExportFormat::Mp3 => "mp3",
            AudioExportFormat::Wav => "wav",
            AudioExportFormat::Ogg => "ogg",
            AudioExportFormat::Flac => "flac",
            AudioExportFormat::Aac => "aac",
        };
        write!(f, "{}", format)
    }
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudioExportQuality {
    Low,
    Medium,
    #[default]
    High,
    Ultra,
}
