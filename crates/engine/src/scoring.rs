use serde::{Deserialize, Serialize};
use tactus_domain::{Channel, ExpectedInput};

/// Inputs within this band of the beat count as on-time. Narrower than the
/// perfect band: category and direction are separate axes.
pub const ON_TIME_BAND_MS: f64 = 5.0;

/// Ordered worst to best so that `Ord` follows quality.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Miss,
    Poor,
    Fair,
    Good,
    Excellent,
    Perfect,
}

impl FeedbackCategory {
    pub fn label(self) -> &'static str {
        match self {
            FeedbackCategory::Perfect => "PERFECT!",
            FeedbackCategory::Excellent => "EXCELLENT",
            FeedbackCategory::Good => "GOOD",
            FeedbackCategory::Fair => "FAIR",
            FeedbackCategory::Poor => "POOR",
            FeedbackCategory::Miss => "MISS",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Early,
    OnTime,
    Late,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryBand {
    pub category: FeedbackCategory,
    pub limit_ms: f64,
    pub points: f64,
}

const fn category_band(category: FeedbackCategory, limit_ms: f64, points: f64) -> CategoryBand {
    CategoryBand {
        category,
        limit_ms,
        points,
    }
}

/// Fixed graduated deviation scale; not configurable per session.
pub const CATEGORY_BANDS: [CategoryBand; 6] = [
    category_band(FeedbackCategory::Perfect, 15.0, 100.0),
    category_band(FeedbackCategory::Excellent, 30.0, 90.0),
    category_band(FeedbackCategory::Good, 50.0, 75.0),
    category_band(FeedbackCategory::Fair, 80.0, 60.0),
    category_band(FeedbackCategory::Poor, 120.0, 40.0),
    category_band(FeedbackCategory::Miss, f64::INFINITY, 0.0),
];

/// Score for one matched beat, sent straight to the presentation layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub category: FeedbackCategory,
    pub deviation_ms: f64,
    pub direction: Direction,
    pub points: f64,
    pub display_text: String,
}

/// Scores a matched (expected time, actual time, channel) triple against the
/// beat's expected input. A wrong channel halves the points; category and
/// direction are unaffected.
pub fn evaluate(
    expected_time: f64,
    actual_time: f64,
    channel: Channel,
    expected: &ExpectedInput,
) -> (Feedback, bool) {
    let deviation = actual_time - expected_time;
    let abs_deviation = deviation.abs();
    let correct_channel = expected.accepts(channel);

    let band = CATEGORY_BANDS
        .iter()
        .find(|band| abs_deviation <= band.limit_ms)
        .expect("category bands cover every deviation");

    let direction = if abs_deviation <= ON_TIME_BAND_MS {
        Direction::OnTime
    } else if deviation < 0.0 {
        Direction::Early
    } else {
        Direction::Late
    };

    let points = if correct_channel {
        band.points
    } else {
        band.points * 0.5
    };

    let feedback = Feedback {
        category: band.category,
        deviation_ms: deviation,
        direction,
        points,
        display_text: format_deviation(deviation),
    };
    (feedback, correct_channel)
}

fn format_deviation(deviation: f64) -> String {
    if deviation > 0.0 {
        format!("+{deviation:.0}ms")
    } else {
        format!("{deviation:.0}ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(channel: Channel) -> ExpectedInput {
        ExpectedInput {
            channels: vec![channel],
        }
    }

    #[test]
    fn category_boundaries_are_inclusive() {
        let cases = [
            (15.0, FeedbackCategory::Perfect, 100.0),
            (16.0, FeedbackCategory::Excellent, 90.0),
            (30.0, FeedbackCategory::Excellent, 90.0),
            (50.0, FeedbackCategory::Good, 75.0),
            (80.0, FeedbackCategory::Fair, 60.0),
            (120.0, FeedbackCategory::Poor, 40.0),
            (121.0, FeedbackCategory::Miss, 0.0),
        ];
        for (deviation, category, points) in cases {
            let (feedback, _) =
                evaluate(0.0, deviation, Channel::LeftHand, &expected(Channel::LeftHand));
            assert_eq!(feedback.category, category, "deviation {deviation}");
            assert_eq!(feedback.points, points, "deviation {deviation}");
        }
    }

    #[test]
    fn points_never_increase_as_deviation_grows() {
        let mut last = f64::INFINITY;
        for deviation in 0..200 {
            let (feedback, _) = evaluate(
                0.0,
                deviation as f64,
                Channel::LeftHand,
                &expected(Channel::LeftHand),
            );
            assert!(feedback.points <= last);
            last = feedback.points;
        }
    }

    #[test]
    fn wrong_channel_halves_points_only() {
        let (right, correct) =
            evaluate(1000.0, 1010.0, Channel::LeftHand, &expected(Channel::LeftHand));
        let (wrong, incorrect) =
            evaluate(1000.0, 1010.0, Channel::RightHand, &expected(Channel::LeftHand));
        assert!(correct);
        assert!(!incorrect);
        assert_eq!(wrong.points, right.points * 0.5);
        assert_eq!(wrong.category, right.category);
        assert_eq!(wrong.direction, right.direction);
    }

    #[test]
    fn direction_band_is_narrower_than_perfect() {
        let (feedback, _) =
            evaluate(1000.0, 1010.0, Channel::LeftHand, &expected(Channel::LeftHand));
        assert_eq!(feedback.category, FeedbackCategory::Perfect);
        assert_eq!(feedback.direction, Direction::Late);

        let (feedback, _) =
            evaluate(1000.0, 996.0, Channel::LeftHand, &expected(Channel::LeftHand));
        assert_eq!(feedback.direction, Direction::OnTime);

        let (feedback, _) =
            evaluate(1000.0, 990.0, Channel::LeftHand, &expected(Channel::LeftHand));
        assert_eq!(feedback.direction, Direction::Early);
    }

    #[test]
    fn display_text_is_signed_milliseconds() {
        let (feedback, _) =
            evaluate(1000.0, 1023.0, Channel::LeftHand, &expected(Channel::LeftHand));
        assert_eq!(feedback.display_text, "+23ms");
        let (feedback, _) =
            evaluate(1000.0, 996.0, Channel::LeftHand, &expected(Channel::LeftHand));
        assert_eq!(feedback.display_text, "-4ms");
        let (feedback, _) =
            evaluate(1000.0, 1000.0, Channel::LeftHand, &expected(Channel::LeftHand));
        assert_eq!(feedback.display_text, "0ms");
    }

    #[test]
    fn simultaneous_pattern_accepts_either_channel() {
        let both = ExpectedInput {
            channels: vec![Channel::LeftHand, Channel::RightHand],
        };
        let (_, correct) = evaluate(0.0, 4.0, Channel::RightHand, &both);
        assert!(correct);
        let (_, correct) = evaluate(0.0, 4.0, Channel::LeftFoot, &both);
        assert!(!correct);
    }
}
