use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tactus_domain::{norms, Channel, Modality};

use crate::scoring::{FeedbackCategory, ON_TIME_BAND_MS};
use crate::session::Beat;

/// Task Average when a session has no correctly-channeled responses.
/// Deliberately worse than every norm bracket; graders treat it as class 1.
pub const TASK_AVERAGE_SENTINEL: f64 = 999.0;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCounts {
    pub perfect: usize,
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
    pub miss: usize,
}

impl CategoryCounts {
    fn record(&mut self, category: FeedbackCategory) {
        match category {
            FeedbackCategory::Perfect => self.perfect += 1,
            FeedbackCategory::Excellent => self.excellent += 1,
            FeedbackCategory::Good => self.good += 1,
            FeedbackCategory::Fair => self.fair += 1,
            FeedbackCategory::Poor => self.poor += 1,
            FeedbackCategory::Miss => self.miss += 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChannelStats {
    pub count: usize,
    pub average_deviation: f64,
    pub average_points: f64,
}

/// Aggregate over one completed beat timeline. Immutable once produced.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    /// Mean absolute deviation (ms) over correctly-channeled responses.
    pub task_average: f64,
    /// 1-7, 7 best.
    pub class_level: u8,
    pub early_percent: f64,
    pub late_percent: f64,
    pub on_target_percent: f64,
    pub total_beats: usize,
    pub responded_beats: usize,
    pub missed_beats: usize,
    pub wrong_channel_beats: usize,
    pub response_rate: f64,
    pub accuracy_rate: f64,
    pub categories: CategoryCounts,
    pub average_points: f64,
    pub consistency: f64,
    /// Only channels that received at least one response appear.
    pub channel_stats: BTreeMap<Channel, ChannelStats>,
}

/// Reduces a finished (or aborted) timeline into its summary. Beats without
/// a response count as missed; partial timelines need no special casing.
pub fn summarize(beats: &[Beat], modality: Modality, age: Option<i32>) -> SessionSummary {
    let responses: Vec<_> = beats.iter().filter_map(|beat| beat.response.as_ref()).collect();
    let correct: Vec<_> = responses
        .iter()
        .copied()
        .filter(|response| response.correct_channel)
        .collect();

    let abs_deviations: Vec<f64> = correct
        .iter()
        .map(|response| response.deviation.abs())
        .collect();
    let task_average = if abs_deviations.is_empty() {
        TASK_AVERAGE_SENTINEL
    } else {
        mean(&abs_deviations)
    };

    let class_level = match age {
        Some(age) => norms::class_for(task_average, age, modality),
        None => norms::class_for_general(task_average),
    };

    let early = correct
        .iter()
        .filter(|response| response.deviation < -ON_TIME_BAND_MS)
        .count();
    let late = correct
        .iter()
        .filter(|response| response.deviation > ON_TIME_BAND_MS)
        .count();
    let on_target = correct.len() - early - late;

    let mut categories = CategoryCounts::default();
    for beat in beats {
        match &beat.response {
            Some(response) => categories.record(response.feedback.category),
            None => categories.record(FeedbackCategory::Miss),
        }
    }

    let average_points = if responses.is_empty() {
        0.0
    } else {
        responses
            .iter()
            .map(|response| response.feedback.points)
            .sum::<f64>()
            / responses.len() as f64
    };

    let mut channel_stats = BTreeMap::new();
    for channel in Channel::ALL {
        let taken: Vec<_> = responses
            .iter()
            .filter(|response| response.channel == channel)
            .collect();
        if taken.is_empty() {
            continue;
        }
        let deviations: Vec<f64> = taken
            .iter()
            .map(|response| response.deviation.abs())
            .collect();
        let points: Vec<f64> = taken
            .iter()
            .map(|response| response.feedback.points)
            .collect();
        channel_stats.insert(
            channel,
            ChannelStats {
                count: taken.len(),
                average_deviation: mean(&deviations),
                average_points: mean(&points),
            },
        );
    }

    SessionSummary {
        task_average,
        class_level,
        early_percent: percent(early, correct.len()),
        late_percent: percent(late, correct.len()),
        on_target_percent: percent(on_target, correct.len()),
        total_beats: beats.len(),
        responded_beats: responses.len(),
        missed_beats: beats.len() - responses.len(),
        wrong_channel_beats: responses.len() - correct.len(),
        response_rate: percent(responses.len(), beats.len()),
        accuracy_rate: percent(correct.len(), responses.len()),
        categories,
        average_points,
        consistency: consistency(&abs_deviations),
        channel_stats,
    }
}

/// Improvement of one session over a previous one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Improvement {
    /// Positive when the Task Average went down.
    pub task_average_percent: f64,
    /// Positive when the class level went up.
    pub class_delta: i32,
}

pub fn improvement(current: &SessionSummary, previous: &SessionSummary) -> Improvement {
    let task_average_percent = if previous.task_average > 0.0 {
        (previous.task_average - current.task_average) / previous.task_average * 100.0
    } else {
        0.0
    };
    Improvement {
        task_average_percent,
        class_delta: current.class_level as i32 - previous.class_level as i32,
    }
}

/// 100 minus the population standard deviation of the absolute deviations,
/// clamped to [0, 100]. Fewer than two samples count as perfectly consistent.
fn consistency(abs_deviations: &[f64]) -> f64 {
    if abs_deviations.len() < 2 {
        return 100.0;
    }
    (100.0 - population_std_dev(abs_deviations)).clamp(0.0, 100.0)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64]) -> f64 {
    let mean = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{InputOutcome, Session};
    use approx::assert_relative_eq;
    use tactus_domain::{InputEvent, InputSource, Pattern, TrainingConfig};

    fn run_session(bpm: u32, duration: u32, inputs: &[(Channel, f64)]) -> Session {
        let config = TrainingConfig::new(
            Modality::Audio,
            bpm,
            duration,
            Pattern::Single(Channel::LeftHand),
        )
        .unwrap();
        let mut session = Session::new(config).unwrap();
        for (channel, timestamp) in inputs {
            let outcome = session.handle_input(InputEvent::new(
                *channel,
                *timestamp,
                InputSource::Keyboard,
            ));
            assert_ne!(outcome, InputOutcome::Discarded, "input at {timestamp}");
        }
        session.finalize();
        session
    }

    #[test]
    fn steady_session_scores_clean() {
        // 10 beats at 60 bpm; 7 hits each 10ms late, 3 beats missed
        let inputs: Vec<(Channel, f64)> = (0..7)
            .map(|i| (Channel::LeftHand, i as f64 * 1000.0 + 10.0))
            .collect();
        let session = run_session(60, 10, &inputs);
        let summary = session.summarize(Some(25));

        assert_relative_eq!(summary.task_average, 10.0);
        assert_relative_eq!(summary.consistency, 100.0);
        assert_eq!(summary.categories.perfect, 7);
        assert_eq!(summary.categories.miss, 3);
        assert_eq!(summary.responded_beats, 7);
        assert_eq!(summary.missed_beats, 3);
        assert_relative_eq!(summary.response_rate, 70.0);
        assert_relative_eq!(summary.accuracy_rate, 100.0);
        assert_relative_eq!(summary.late_percent, 100.0);
        assert_relative_eq!(summary.on_target_percent, 0.0);
    }

    #[test]
    fn task_average_uses_the_age_norm_table() {
        // deviations 26/28/30 -> task average 28ms; age 14 auditory => class 5
        let inputs = [
            (Channel::LeftHand, 26.0),
            (Channel::LeftHand, 1028.0),
            (Channel::LeftHand, 2030.0),
        ];
        let session = run_session(60, 3, &inputs);
        let summary = session.summarize(Some(14));
        assert_relative_eq!(summary.task_average, 28.0);
        assert_eq!(summary.class_level, 5);
        // the ageless general table grades the same performance a class looser
        assert_eq!(session.summarize(None).class_level, 6);
    }

    #[test]
    fn empty_session_yields_the_sentinel() {
        let session = run_session(60, 5, &[]);
        let summary = session.summarize(Some(30));
        assert_eq!(summary.task_average, TASK_AVERAGE_SENTINEL);
        assert_eq!(summary.class_level, 1);
        assert_eq!(summary.accuracy_rate, 0.0);
        assert_eq!(summary.response_rate, 0.0);
        assert_eq!(summary.consistency, 100.0);
        assert_eq!(summary.categories.miss, 5);
    }

    #[test]
    fn wrong_channel_responses_are_excluded_from_task_average() {
        let inputs = [
            (Channel::LeftHand, 10.0),
            (Channel::RightHand, 1100.0),
            (Channel::LeftHand, 2010.0),
        ];
        let session = run_session(60, 3, &inputs);
        let summary = session.summarize(Some(25));
        // only the two correct 10ms hits count
        assert_relative_eq!(summary.task_average, 10.0);
        assert_eq!(summary.wrong_channel_beats, 1);
        assert_relative_eq!(summary.accuracy_rate, 2.0 / 3.0 * 100.0);
    }

    #[test]
    fn consistency_stays_within_bounds() {
        // wildly scattered correct hits: huge std deviation clamps to 0
        let inputs = [
            (Channel::LeftHand, 450.0),
            (Channel::LeftHand, 1000.0),
            (Channel::LeftHand, 2460.0),
        ];
        let session = run_session(60, 4, &inputs);
        let summary = session.summarize(Some(25));
        assert!(summary.consistency >= 0.0);
        assert!(summary.consistency <= 100.0);
    }

    #[test]
    fn per_channel_breakdown_only_covers_responding_channels() {
        let config = TrainingConfig::new(
            Modality::Audio,
            60,
            4,
            Pattern::Alternating([Channel::LeftHand, Channel::RightHand]),
        )
        .unwrap();
        let mut session = Session::new(config).unwrap();
        session.handle_input(InputEvent::new(Channel::LeftHand, 10.0, InputSource::Midi));
        session.handle_input(InputEvent::new(
            Channel::RightHand,
            1020.0,
            InputSource::Midi,
        ));
        session.handle_input(InputEvent::new(Channel::LeftHand, 2030.0, InputSource::Midi));
        session.finalize();
        let summary = session.summarize(Some(25));

        let left = &summary.channel_stats[&Channel::LeftHand];
        assert_eq!(left.count, 2);
        assert_relative_eq!(left.average_deviation, 20.0);
        let right = &summary.channel_stats[&Channel::RightHand];
        assert_eq!(right.count, 1);
        assert!(!summary.channel_stats.contains_key(&Channel::LeftFoot));
    }

    #[test]
    fn improvement_against_a_previous_session() {
        let older = run_session(60, 3, &[(Channel::LeftHand, 40.0)]).summarize(Some(25));
        let newer = run_session(60, 3, &[(Channel::LeftHand, 20.0)]).summarize(Some(25));
        let delta = improvement(&newer, &older);
        assert_relative_eq!(delta.task_average_percent, 50.0);
        assert_eq!(delta.class_delta, newer.class_level as i32 - older.class_level as i32);
    }
}
