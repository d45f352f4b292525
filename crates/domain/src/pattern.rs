use serde::{Deserialize, Serialize};

use crate::channel::{Channel, Limb};
use crate::config::TrainingRange;
use crate::error::DomainError;

/// The channels that count as correct for a single beat. Usually one channel;
/// simultaneous patterns expect two.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpectedInput {
    pub channels: Vec<Channel>,
}

impl ExpectedInput {
    pub fn accepts(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}

/// Per-beat expected-input grammar. Built-in body-part configurations reduce
/// to sequences of length one or two; simultaneous and round-robin are the
/// irreducible special cases.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "channels")]
pub enum Pattern {
    Single(Channel),
    Alternating([Channel; 2]),
    Simultaneous([Channel; 2]),
    RoundRobin([Channel; 4]),
    Custom(Vec<Channel>),
}

impl Pattern {
    /// The four-channel cycle in canonical order.
    pub fn round_robin() -> Self {
        Pattern::RoundRobin(Channel::ALL)
    }

    /// An explicit ordered sequence of 1-4 distinct channels; beat `i`
    /// expects `sequence[i % sequence.len()]`.
    pub fn custom(sequence: Vec<Channel>) -> Result<Self, DomainError> {
        if sequence.is_empty() || sequence.len() > 4 {
            return Err(DomainError::validation(
                "custom sequences must contain between 1 and 4 channels",
            ));
        }
        for (index, channel) in sequence.iter().enumerate() {
            if sequence[..index].contains(channel) {
                return Err(DomainError::validation(
                    "custom sequences may not repeat a channel",
                ));
            }
        }
        Ok(Pattern::Custom(sequence))
    }

    /// Maps the legacy (body part, range) configuration to a pattern.
    /// `Both` always means alternating, never simultaneous.
    pub fn from_settings(limb: Limb, range: TrainingRange) -> Self {
        match (limb, range) {
            (Limb::Hand, TrainingRange::Left) => Pattern::Single(Channel::LeftHand),
            (Limb::Hand, TrainingRange::Right) => Pattern::Single(Channel::RightHand),
            (Limb::Hand, TrainingRange::Both) => {
                Pattern::Alternating([Channel::LeftHand, Channel::RightHand])
            }
            (Limb::Foot, TrainingRange::Left) => Pattern::Single(Channel::LeftFoot),
            (Limb::Foot, TrainingRange::Right) => Pattern::Single(Channel::RightFoot),
            (Limb::Foot, TrainingRange::Both) => {
                Pattern::Alternating([Channel::LeftFoot, Channel::RightFoot])
            }
        }
    }

    /// The expected input for one beat. Pure function of the pattern and the
    /// beat number.
    pub fn expected(&self, beat_number: usize) -> ExpectedInput {
        let channels = match self {
            Pattern::Single(channel) => vec![*channel],
            Pattern::Alternating(pair) => vec![pair[beat_number % 2]],
            Pattern::Simultaneous(pair) => pair.to_vec(),
            Pattern::RoundRobin(cycle) => vec![cycle[beat_number % 4]],
            Pattern::Custom(sequence) => vec![sequence[beat_number % sequence.len()]],
        };
        ExpectedInput { channels }
    }
}
