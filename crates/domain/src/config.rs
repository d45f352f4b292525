use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::pattern::Pattern;

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 200;

/// Stimulus modality. Norm tables distinguish the two.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Modality {
    Audio,
    Visual,
}

impl Modality {
    pub fn label(self) -> &'static str {
        match self {
            Modality::Audio => "auditory",
            Modality::Visual => "visual",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingRange {
    Left,
    Right,
    Both,
}

/// Validated session configuration. The beat timeline is derived from it at
/// session start and never re-read afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrainingConfig {
    pub modality: Modality,
    pub bpm: u32,
    pub duration_seconds: u32,
    pub pattern: Pattern,
}

impl TrainingConfig {
    pub fn new(
        modality: Modality,
        bpm: u32,
        duration_seconds: u32,
        pattern: Pattern,
    ) -> Result<Self, DomainError> {
        let config = Self {
            modality,
            bpm,
            duration_seconds,
            pattern,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_BPM..=MAX_BPM).contains(&self.bpm) {
            return Err(DomainError::validation(format!(
                "bpm must be between {MIN_BPM} and {MAX_BPM}"
            )));
        }
        if self.duration_seconds == 0 {
            return Err(DomainError::validation(
                "session duration must be at least one second",
            ));
        }
        if self.total_beats() == 0 {
            return Err(DomainError::validation(
                "session too short to schedule a beat at this tempo",
            ));
        }
        Ok(())
    }

    pub fn interval_ms(&self) -> f64 {
        60_000.0 / self.bpm as f64
    }

    /// Beats that fit in the session. Expected times are exact multiples of
    /// the interval; cumulative drift against wall-clock seconds is accepted.
    pub fn total_beats(&self) -> usize {
        (self.duration_seconds as f64 * 1000.0 / self.interval_ms()).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;

    fn config(bpm: u32, duration_seconds: u32) -> Result<TrainingConfig, DomainError> {
        TrainingConfig::new(
            Modality::Audio,
            bpm,
            duration_seconds,
            Pattern::Single(Channel::LeftHand),
        )
    }

    #[test]
    fn bpm_range_is_enforced() {
        assert!(config(39, 60).is_err());
        assert!(config(201, 60).is_err());
        assert!(config(40, 60).is_ok());
        assert!(config(200, 60).is_ok());
    }

    #[test]
    fn rejects_zero_duration() {
        assert!(config(60, 0).is_err());
    }

    #[test]
    fn rejects_sessions_shorter_than_one_beat() {
        // 40 bpm -> 1500ms interval; one second holds no full beat
        assert!(config(40, 1).is_err());
    }

    #[test]
    fn beat_count_from_bpm_and_duration() {
        let config = config(60, 5).unwrap();
        assert_eq!(config.interval_ms(), 1000.0);
        assert_eq!(config.total_beats(), 5);

        let config = TrainingConfig::new(
            Modality::Visual,
            90,
            60,
            Pattern::Single(Channel::RightHand),
        )
        .unwrap();
        // 90 bpm -> 666.67ms; 60_000 / 666.67 = 90 beats
        assert_eq!(config.total_beats(), 90);
    }
}
