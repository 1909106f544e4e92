use serde::{Deserialize, Serialize};

use crate::ports::MediaError;

/// Playback volume between 0.0 and 1.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Volume(f32);

impl Volume {
    pub const MUTED: Volume = Volume(0.0);
    pub const FULL: Volume = Volume(1.0);

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::MUTED;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn as_percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(0.3)
    }
}

/// URL or file path handed to the audio player as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLocator(String);

impl MediaLocator {
    pub fn parse(raw: &str) -> Result<Self, MediaError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MediaError::EmptyLocator);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_clamped() {
        assert_eq!(Volume::new(1.7), Volume::FULL);
        assert_eq!(Volume::new(-0.2), Volume::MUTED);
        assert_eq!(Volume::new(f32::NAN), Volume::MUTED);
        assert_eq!(Volume::new(0.45).as_percent(), 45);
    }

    #[test]
    fn default_volume_matches_player_slider() {
        assert_eq!(Volume::default().as_percent(), 30);
    }

    #[test]
    fn locator_is_trimmed() {
        let locator = MediaLocator::parse("  https://example.com/lofi.mp3 ").unwrap();
        assert_eq!(locator.as_str(), "https://example.com/lofi.mp3");
    }

    #[test]
    fn blank_locator_is_rejected() {
        assert!(matches!(
            MediaLocator::parse("   "),
            Err(MediaError::EmptyLocator)
        ));
    }
}
