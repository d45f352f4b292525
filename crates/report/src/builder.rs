use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;
use tracing::info;

use tactus_domain::{Gender, Limb, Modality, Side, UserProfile};
use tactus_engine::{Session, SessionSummary};

use crate::dimensions::{
    self, AttentionMetrics, BrainSpeed, HemisphereBalance, LearningStyle,
    ProcessingCapability, SustainabilityMetrics,
};

/// Which of the eight battery slots a session fills.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionTag {
    pub limb: Limb,
    pub side: Side,
    pub modality: Modality,
}

impl SessionTag {
    pub fn new(limb: Limb, side: Side, modality: Modality) -> Self {
        Self {
            limb,
            side,
            modality,
        }
    }

    /// All eight battery slots, in report order.
    pub fn battery() -> [SessionTag; 8] {
        let mut slots = [SessionTag::new(Limb::Hand, Side::Left, Modality::Audio); 8];
        let mut index = 0;
        for limb in [Limb::Hand, Limb::Foot] {
            for side in [Side::Left, Side::Right] {
                for modality in [Modality::Audio, Modality::Visual] {
                    slots[index] = SessionTag::new(limb, side, modality);
                    index += 1;
                }
            }
        }
        slots
    }

    pub fn label(&self) -> String {
        format!(
            "{} {} / {}",
            self.side.label(),
            self.limb.label(),
            self.modality.label()
        )
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("comprehensive report requires exactly 8 sessions, got {0}")]
    SessionCount(usize),
    #[error("battery is missing the \"{0}\" session")]
    MissingSession(String),
    #[error("battery holds more than one \"{0}\" session")]
    DuplicateSession(String),
}

/// One completed battery session as the report builder consumes it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub tag: SessionTag,
    pub summary: SessionSummary,
    /// Correct-beat |deviation|s in input-arrival order.
    pub deviations: Vec<f64>,
}

impl SessionRecord {
    /// Captures a finalized session's summary and its deviation stream.
    pub fn from_session(tag: SessionTag, session: &Session, age: Option<i32>) -> Self {
        let mut responses: Vec<_> = session
            .beats()
            .iter()
            .filter_map(|beat| beat.response.as_ref())
            .filter(|response| response.correct_channel)
            .collect();
        responses.sort_by_key(|response| response.sequence);
        Self {
            tag,
            summary: session.summarize(age),
            deviations: responses
                .iter()
                .map(|response| response.deviation.abs())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PatientInfo {
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    pub test_date: Date,
}

/// A per-modality pair of a derived dimension.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModalityPair<T> {
    pub visual: T,
    pub auditory: T,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct IndividualResult {
    pub label: String,
    pub summary: SessionSummary,
}

/// The six derived dimensions over a complete 8-session battery, plus the
/// individual summaries they were computed from. Never mutates its inputs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ComprehensiveReport {
    pub patient: PatientInfo,
    pub processing_capability: ModalityPair<ProcessingCapability>,
    pub learning_style: LearningStyle,
    pub attention: ModalityPair<AttentionMetrics>,
    pub brain_speed: BrainSpeed,
    pub sustainability: ModalityPair<SustainabilityMetrics>,
    pub hemisphere_balance: HemisphereBalance,
    pub individual_results: Vec<IndividualResult>,
}

/// Builds the comprehensive report. The battery must contain each of the
/// eight (limb, side, modality) sessions exactly once; anything else is a
/// precondition violation, not a degraded report.
pub fn build_report(
    profile: &UserProfile,
    test_date: Date,
    records: &[SessionRecord],
) -> Result<ComprehensiveReport, ReportError> {
    if records.len() != 8 {
        return Err(ReportError::SessionCount(records.len()));
    }
    for slot in SessionTag::battery() {
        match records.iter().filter(|record| record.tag == slot).count() {
            0 => return Err(ReportError::MissingSession(slot.label())),
            1 => {}
            _ => return Err(ReportError::DuplicateSession(slot.label())),
        }
    }

    let age = profile.age_on(test_date);

    let visual_task_average = mean_task_average(records, |tag| tag.modality == Modality::Visual);
    let auditory_task_average = mean_task_average(records, |tag| tag.modality == Modality::Audio);
    let left_task_average = mean_task_average(records, |tag| tag.side == Side::Left);
    let right_task_average = mean_task_average(records, |tag| tag.side == Side::Right);

    let visual_deviations = pooled_deviations(records, Modality::Visual);
    let auditory_deviations = pooled_deviations(records, Modality::Audio);

    let visual_capability =
        dimensions::processing_capability(visual_task_average, age, Modality::Visual);
    let auditory_capability =
        dimensions::processing_capability(auditory_task_average, age, Modality::Audio);

    let report = ComprehensiveReport {
        patient: PatientInfo {
            name: profile.name.clone(),
            gender: profile.gender,
            age,
            test_date,
        },
        learning_style: dimensions::learning_style(
            visual_capability.percentile,
            auditory_capability.percentile,
        ),
        processing_capability: ModalityPair {
            visual: visual_capability,
            auditory: auditory_capability,
        },
        attention: ModalityPair {
            visual: dimensions::attention(&visual_deviations),
            auditory: dimensions::attention(&auditory_deviations),
        },
        brain_speed: dimensions::brain_speed(visual_task_average, auditory_task_average),
        sustainability: ModalityPair {
            visual: dimensions::sustainability(&visual_deviations),
            auditory: dimensions::sustainability(&auditory_deviations),
        },
        hemisphere_balance: dimensions::hemisphere_balance(
            left_task_average,
            right_task_average,
        ),
        individual_results: records
            .iter()
            .map(|record| IndividualResult {
                label: record.tag.label(),
                summary: record.summary.clone(),
            })
            .collect(),
    };
    info!(age, "comprehensive report assembled");
    Ok(report)
}

fn mean_task_average(records: &[SessionRecord], keep: impl Fn(&SessionTag) -> bool) -> f64 {
    let selected: Vec<f64> = records
        .iter()
        .filter(|record| keep(&record.tag))
        .map(|record| record.summary.task_average)
        .collect();
    if selected.is_empty() {
        0.0
    } else {
        selected.iter().sum::<f64>() / selected.len() as f64
    }
}

fn pooled_deviations(records: &[SessionRecord], modality: Modality) -> Vec<f64> {
    records
        .iter()
        .filter(|record| record.tag.modality == modality)
        .flat_map(|record| record.deviations.iter().copied())
        .collect()
}
