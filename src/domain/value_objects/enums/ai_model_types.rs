use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AiModelType {
    TextGeneration,
    ImageGeneration,
    AudioGeneration,
    VideoGeneration,
    TextToSpeech,
    SpeechToText,
    Translation,
    Summarization,
    AudioEnhancement,
    VideoEnhancement,
    ImageEnhancement,
    AudioSeparation,
    ObjectDetection,
    FaceRecognition,
    #[serde(rename = "3d-model-generation")]
    ModelGeneration3d,
    AnimationGeneration,
    Custom,
}

impl AiModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiModelType::TextGeneration => "text-generation",
            AiModelType::ImageGeneration => "image-generation",
            AiModelType::AudioGeneration => "audio-generation",
            AiModelType::VideoGeneration => "video-generation",
            AiModelType::TextToSpeech => "text-to-speech",
            AiModelType::SpeechToText => "speech-to-text",
            AiModelType::Translation => "translation",
            AiModelType::Summarization => "summarization",
            AiModelType::AudioEnhancement => "audio-enhancement",
            AiModelType::VideoEnhancement => "video-enhancement",
            AiModelType::ImageEnhancement => "image-enhancement",
            AiModelType::AudioSeparation => "audio-separation",
            AiModelType::ObjectDetection => "object-detection",
            AiModelType::FaceRecognition => "face-recognition",
            AiModelType::ModelGeneration3d => "3d-model-generation",
            AiModelType::AnimationGeneration => "animation-generation",
            AiModelType::Custom => "custom",
        }
    }
}

impl Display for AiModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AiModelCategory {
    Audio,
    Video,
    Image,
    Text,
    #[serde(rename = "3d")]
    ThreeD,
    Multimodal,
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAi,
    Google,
    Anthropic,
    Stability,
    Meta,
    HuggingFace,
    #[default]
    Internal,
    Custom,
}

/// The metered generation entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Text,
    Image,
    Audio,
}

impl GenerationKind {
    pub fn accepts(&self, model_type: AiModelType) -> bool {
        match self {
            GenerationKind::Text => model_type == AiModelType::TextGeneration,
            GenerationKind::Image => model_type == AiModelType::ImageGeneration,
            GenerationKind::Audio => matches!(
                model_type,
                AiModelType::AudioGeneration | AiModelType::TextToSpeech
            ),
        }
    }
}

impl Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            GenerationKind::Text => "text",
            GenerationKind::Image => "image",
            GenerationKind::Audio => "audio",
        };
        write!(f, "{}", kind)
    }
}
