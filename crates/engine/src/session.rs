use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tactus_domain::{
    Channel, DomainError, ExpectedInput, InputEvent, InputSource, TrainingConfig,
};

use crate::analytics::{self, SessionSummary};
use crate::matcher;
use crate::scoring::{self, Feedback};

/// One scheduled instant at which an input is expected.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Beat {
    pub beat_number: usize,
    /// Milliseconds from session start; always an exact interval multiple.
    pub expected_time: f64,
    pub expected: ExpectedInput,
    /// Set once the caller declares the beat's window closed, or at
    /// finalization. An expired beat can no longer be matched.
    pub expired: bool,
    pub response: Option<BeatResponse>,
}

impl Beat {
    pub(crate) fn new(beat_number: usize, expected_time: f64, expected: ExpectedInput) -> Self {
        Self {
            beat_number,
            expected_time,
            expected,
            expired: false,
            response: None,
        }
    }

    /// Still eligible for matching.
    pub fn is_open(&self) -> bool {
        self.response.is_none() && !self.expired
    }

    pub fn responded(&self) -> bool {
        self.response.is_some()
    }

    pub fn correct(&self) -> bool {
        self.response
            .as_ref()
            .map_or(false, |response| response.correct_channel)
    }
}

/// The input bound to a beat. Populated at most once.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BeatResponse {
    pub channel: Channel,
    pub source: InputSource,
    /// Milliseconds from session start.
    pub time: f64,
    /// Arrival order across the whole session, for split-half analysis.
    pub sequence: usize,
    /// Signed; negative means early.
    pub deviation: f64,
    pub correct_channel: bool,
    pub feedback: Feedback,
}

impl BeatResponse {
    #[cfg(test)]
    pub(crate) fn test_stub(time: f64) -> Self {
        let (feedback, correct_channel) = scoring::evaluate(
            time,
            time,
            Channel::LeftHand,
            &ExpectedInput {
                channels: vec![Channel::LeftHand],
            },
        );
        Self {
            channel: Channel::LeftHand,
            source: InputSource::Keyboard,
            time,
            sequence: 0,
            deviation: 0.0,
            correct_channel,
            feedback,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputOutcome {
    Matched {
        beat_number: usize,
        correct_channel: bool,
        feedback: Feedback,
    },
    /// No open beat within the acceptance radius; not an error.
    Discarded,
}

/// A live training session: the beat timeline plus the matching state.
/// All mutation happens through `handle_input`, `expire_beat` and
/// `finalize`; after finalization the timeline is read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    config: TrainingConfig,
    beats: Vec<Beat>,
    accepted_inputs: usize,
    finished: bool,
}

impl Session {
    pub fn new(config: TrainingConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let interval_ms = config.interval_ms();
        let beats = (0..config.total_beats())
            .map(|i| Beat::new(i, i as f64 * interval_ms, config.pattern.expected(i)))
            .collect();
        Ok(Self {
            config,
            beats,
            accepted_inputs: 0,
            finished: false,
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Binds the event to the nearest open beat and scores it, or discards
    /// the event. Each event must be delivered exactly once; a beat never
    /// rebinds.
    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        if self.finished {
            debug!(timestamp = event.timestamp, "input after session end discarded");
            return InputOutcome::Discarded;
        }

        let index = match matcher::find_nearest_open_beat(
            &self.beats,
            self.config.interval_ms(),
            event.timestamp,
        ) {
            Some(index) => index,
            None => {
                debug!(
                    timestamp = event.timestamp,
                    channel = ?event.channel,
                    "no open beat within acceptance radius"
                );
                return InputOutcome::Discarded;
            }
        };

        let beat = &mut self.beats[index];
        let (feedback, correct_channel) = scoring::evaluate(
            beat.expected_time,
            event.timestamp,
            event.channel,
            &beat.expected,
        );
        debug!(
            beat = index,
            deviation = feedback.deviation_ms,
            category = ?feedback.category,
            "input bound to beat"
        );
        beat.response = Some(BeatResponse {
            channel: event.channel,
            source: event.source,
            time: event.timestamp,
            sequence: self.accepted_inputs,
            deviation: feedback.deviation_ms,
            correct_channel,
            feedback: feedback.clone(),
        });
        self.accepted_inputs += 1;

        InputOutcome::Matched {
            beat_number: index,
            correct_channel,
            feedback,
        }
    }

    /// Caller signal that a beat's presentation window has closed without
    /// input. The beat becomes a definitive miss even if a late input would
    /// still fall inside the matcher's radius.
    pub fn expire_beat(&mut self, beat_number: usize) {
        if let Some(beat) = self.beats.get_mut(beat_number) {
            if beat.is_open() {
                beat.expired = true;
                debug!(beat = beat_number, "beat expired without input");
            }
        }
    }

    /// Ends the session, possibly early; every open beat becomes a miss.
    pub fn finalize(&mut self) {
        for beat in &mut self.beats {
            if beat.response.is_none() {
                beat.expired = true;
            }
        }
        self.finished = true;
        let responded = self.beats.iter().filter(|beat| beat.responded()).count();
        info!(
            total = self.beats.len(),
            responded,
            missed = self.beats.len() - responded,
            "session finalized"
        );
    }

    /// Aggregates the timeline. Grades against the age norm table when an
    /// age is known, otherwise against the general table.
    pub fn summarize(&self, age: Option<i32>) -> SessionSummary {
        analytics::summarize(&self.beats, self.config.modality, age)
    }
}
