use serde::{Deserialize, Serialize};

use crate::geometry::DEFAULT_BASE_ROTATION_DEG;

pub const DEFAULT_WORDS: [&str; 5] = ["Will", "you", "be", "my", "valentine?"];
pub const DEFAULT_STEPS_PER_WORD: u32 = 3;
pub const DEFAULT_INITIAL_WORDS: u32 = 1;
pub const DEFAULT_HEART_INTERVAL_MS: u32 = 150;
pub const DEFAULT_HEART_DURATION_MS: u32 = 4000;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("message has no words")]
    EmptyMessage,
    #[error("steps_per_word must be at least 1")]
    ZeroStepsPerWord,
    #[error("heart interval must be at least 1ms")]
    ZeroHeartInterval,
    #[error("{name} range is inverted ({min} > {max})")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("knob needs at least one slide")]
    NoSlides,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Maps a sample in [0, 1] onto the range.
    pub fn lerp(&self, unit: f64) -> f64 {
        self.min + unit.clamp(0.0, 1.0) * (self.max - self.min)
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartRainConfig {
    pub interval_ms: u32,
    pub duration_ms: u32,
    pub left_percent: Range,
    pub size_px: Range,
    pub fall_secs: Range,
    pub glyph: String,
}

impl Default for HeartRainConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_HEART_INTERVAL_MS,
            duration_ms: DEFAULT_HEART_DURATION_MS,
            left_percent: Range::new(0.0, 100.0),
            size_px: Range::new(16.0, 34.0),
            fall_secs: Range::new(3.0, 5.0),
            glyph: "\u{2764}".to_string(),
        }
    }
}

/// Element ids and class names the widget binds to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomNames {
    pub knob_id: String,
    pub slide_selector: String,
    pub text_id: String,
    pub song_id: String,
    pub heart_rain_id: String,
    pub active_class: String,
    pub heart_class: String,
    pub flowers_class: String,
}

impl Default for DomNames {
    fn default() -> Self {
        Self {
            knob_id: "knob".to_string(),
            slide_selector: ".slide".to_string(),
            text_id: "valentine-text".to_string(),
            song_id: "valentine-song".to_string(),
            heart_rain_id: "heart-rain".to_string(),
            active_class: "active".to_string(),
            heart_class: "heart".to_string(),
            flowers_class: "flowers-visible".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnobConfig {
    pub words: Vec<String>,
    /// Distinct slide changes needed per extra word.
    pub steps_per_word: u32,
    /// Words shown as soon as the reveal starts.
    pub initial_words: u32,
    pub base_rotation_deg: f64,
    pub hearts: HeartRainConfig,
    pub dom: DomNames,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|word| word.to_string()).collect(),
            steps_per_word: DEFAULT_STEPS_PER_WORD,
            initial_words: DEFAULT_INITIAL_WORDS,
            base_rotation_deg: DEFAULT_BASE_ROTATION_DEG,
            hearts: HeartRainConfig::default(),
            dom: DomNames::default(),
        }
    }
}

impl KnobConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words.iter().all(|word| word.trim().is_empty()) {
            return Err(ConfigError::EmptyMessage);
        }
        if self.steps_per_word == 0 {
            return Err(ConfigError::ZeroStepsPerWord);
        }
        if self.hearts.interval_ms == 0 {
            return Err(ConfigError::ZeroHeartInterval);
        }
        self.hearts.left_percent.check("left_percent")?;
        self.hearts.size_px.check("size_px")?;
        self.hearts.fall_secs.check("fall_secs")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = KnobConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.words.len(), 5);
        assert_eq!(config.dom.knob_id, "knob");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: KnobConfig =
            serde_json::from_str(r#"{"steps_per_word": 2, "hearts": {"interval_ms": 100}}"#)
                .expect("parse config");
        assert_eq!(config.steps_per_word, 2);
        assert_eq!(config.hearts.interval_ms, 100);
        assert_eq!(config.hearts.duration_ms, DEFAULT_HEART_DURATION_MS);
        assert_eq!(config.words, KnobConfig::default().words);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = KnobConfig::default();
        config.steps_per_word = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroStepsPerWord));

        let mut config = KnobConfig::default();
        config.words = vec![" ".to_string()];
        assert_eq!(config.validate(), Err(ConfigError::EmptyMessage));

        let mut config = KnobConfig::default();
        config.hearts.size_px = Range::new(40.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { name: "size_px", .. })
        ));
    }

    #[test]
    fn range_lerp_clamps() {
        let range = Range::new(16.0, 34.0);
        assert_eq!(range.lerp(0.0), 16.0);
        assert_eq!(range.lerp(1.0), 34.0);
        assert_eq!(range.lerp(2.0), 34.0);
        assert_eq!(range.lerp(0.5), 25.0);
    }
}
