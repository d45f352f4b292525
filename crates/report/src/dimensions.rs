//! Derived assessment dimensions. The breakpoints and step mappings are
//! clinical reference values; they are fixed tables, not tunable statistics.

use serde::{Deserialize, Serialize};

use tactus_domain::{norms, Modality, PerformanceLevel};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Deficient,
    Average,
    Excellent,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProcessingCapability {
    /// Mean Task Average of the modality's four sessions, rounded to ms.
    pub task_average: f64,
    pub percentile: u8,
    pub class_level: u8,
    pub level: PerformanceLevel,
}

pub fn processing_capability(
    task_average: f64,
    age: i32,
    modality: Modality,
) -> ProcessingCapability {
    let class_level = norms::class_for(task_average, age, modality);
    ProcessingCapability {
        task_average: task_average.round(),
        percentile: norms::percentile_for_class(class_level),
        class_level,
        level: PerformanceLevel::from_class(class_level),
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DominantStyle {
    Balanced,
    Visual,
    Auditory,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LearningStyle {
    pub dominant: DominantStyle,
    pub difference: u8,
}

/// Balanced under a 5-point percentile difference, otherwise the stronger
/// modality dominates.
pub fn learning_style(visual_percentile: u8, auditory_percentile: u8) -> LearningStyle {
    let difference = visual_percentile.abs_diff(auditory_percentile);
    let dominant = if difference < 5 {
        DominantStyle::Balanced
    } else if visual_percentile > auditory_percentile {
        DominantStyle::Visual
    } else {
        DominantStyle::Auditory
    };
    LearningStyle {
        dominant,
        difference,
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttentionMetrics {
    pub percentile: u8,
    pub tier: Tier,
    /// Population standard deviation of the pooled |deviation|s, rounded.
    pub standard_deviation: f64,
}

/// Lower spread means steadier attention. Tiers break at 20ms and 40ms with
/// linear interpolation inside the average band.
pub fn attention(abs_deviations: &[f64]) -> AttentionMetrics {
    let sd = population_std_dev(abs_deviations);
    let (percentile, tier) = if sd < 20.0 {
        (85.0, Tier::Excellent)
    } else if sd < 40.0 {
        (70.0 - (sd - 20.0) / 20.0 * 40.0, Tier::Average)
    } else {
        ((30.0 - (sd - 40.0) / 60.0 * 25.0).max(5.0), Tier::Deficient)
    };
    AttentionMetrics {
        percentile: percentile.round() as u8,
        tier,
        standard_deviation: sd.round(),
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BrainSpeed {
    /// Mean of the visual and auditory Task Averages, rounded to ms.
    pub task_average: f64,
    pub tier: Tier,
    pub percentile: u8,
}

pub fn brain_speed(visual_task_average: f64, auditory_task_average: f64) -> BrainSpeed {
    let task_average = ((visual_task_average + auditory_task_average) / 2.0).round();
    let (tier, percentile) = if task_average < 50.0 {
        (Tier::Excellent, 85)
    } else if task_average < 100.0 {
        (Tier::Average, 50)
    } else {
        (Tier::Deficient, 15)
    };
    BrainSpeed {
        task_average,
        tier,
        percentile,
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SustainabilityMetrics {
    /// Percent degradation from the first half to the second, capped at 100.
    pub error_rate: f64,
    /// Percent improvement from the first half to the second, capped at 100.
    pub improvement_rate: f64,
    pub first_half_average: f64,
    pub second_half_average: f64,
}

impl SustainabilityMetrics {
    fn flat() -> Self {
        Self {
            error_rate: 0.0,
            improvement_rate: 0.0,
            first_half_average: 0.0,
            second_half_average: 0.0,
        }
    }
}

/// Splits the pooled |deviation|s at the midpoint, in input order, and
/// compares the two halves. At most one of the two rates is nonzero.
pub fn sustainability(abs_deviations: &[f64]) -> SustainabilityMetrics {
    let midpoint = abs_deviations.len() / 2;
    let (first, second) = abs_deviations.split_at(midpoint);
    if first.is_empty() || second.is_empty() {
        return SustainabilityMetrics::flat();
    }
    let first_average = mean(first);
    let second_average = mean(second);
    let error_rate = if second_average > first_average && first_average > 0.0 {
        ((second_average - first_average) / first_average * 100.0).min(100.0)
    } else {
        0.0
    };
    let improvement_rate = if first_average > second_average && first_average > 0.0 {
        ((first_average - second_average) / first_average * 100.0).min(100.0)
    } else {
        0.0
    };
    SustainabilityMetrics {
        error_rate: error_rate.round(),
        improvement_rate: improvement_rate.round(),
        first_half_average: first_average.round(),
        second_half_average: second_average.round(),
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceCorrelation {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HemisphereBalance {
    pub left_brain_percent: u8,
    pub right_brain_percent: u8,
    pub difference: u8,
    pub correlation: BalanceCorrelation,
}

/// Each hemisphere is credited with the opposite body side's share of the
/// pooled Task Average, so the better side raises its contralateral
/// hemisphere. Percentages always sum to 100.
pub fn hemisphere_balance(left_side_average: f64, right_side_average: f64) -> HemisphereBalance {
    let total = left_side_average + right_side_average;
    let right_brain_percent = if total > 0.0 {
        (right_side_average / total * 100.0).round() as u8
    } else {
        50
    };
    let left_brain_percent = 100 - right_brain_percent;
    let difference = left_brain_percent.abs_diff(right_brain_percent);
    let correlation = if difference < 10 {
        BalanceCorrelation::High
    } else if difference < 20 {
        BalanceCorrelation::Medium
    } else {
        BalanceCorrelation::Low
    };
    HemisphereBalance {
        left_brain_percent,
        right_brain_percent,
        difference,
        correlation,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}
