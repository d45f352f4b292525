//! Age- and modality-normed classification tables.
//!
//! The bracket values are clinical reference data; they must not be adjusted
//! or smoothed. Task Average falls into the `[min_ms, max_ms)` bracket whose
//! class (1-7, 7 best) becomes the session's class level.

use serde::{Deserialize, Serialize};

use crate::config::Modality;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    Under7,
    EightToNine,
    TenToEleven,
    TwelveToThirteen,
    FourteenToSixteen,
    SeventeenPlus,
}

impl AgeGroup {
    pub fn from_age(age: i32) -> Self {
        if age <= 7 {
            AgeGroup::Under7
        } else if age <= 9 {
            AgeGroup::EightToNine
        } else if age <= 11 {
            AgeGroup::TenToEleven
        } else if age <= 13 {
            AgeGroup::TwelveToThirteen
        } else if age <= 16 {
            AgeGroup::FourteenToSixteen
        } else {
            AgeGroup::SeventeenPlus
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Under7 => "under 7",
            AgeGroup::EightToNine => "8-9",
            AgeGroup::TenToEleven => "10-11",
            AgeGroup::TwelveToThirteen => "12-13",
            AgeGroup::FourteenToSixteen => "14-16",
            AgeGroup::SeventeenPlus => "17 and over",
        }
    }

    fn index(self) -> usize {
        match self {
            AgeGroup::Under7 => 0,
            AgeGroup::EightToNine => 1,
            AgeGroup::TenToEleven => 2,
            AgeGroup::TwelveToThirteen => 3,
            AgeGroup::FourteenToSixteen => 4,
            AgeGroup::SeventeenPlus => 5,
        }
    }
}

/// One `[min_ms, max_ms)` Task-Average bracket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassBand {
    pub class: u8,
    pub min_ms: f64,
    pub max_ms: f64,
}

const fn band(class: u8, min_ms: f64, max_ms: f64) -> ClassBand {
    ClassBand {
        class,
        min_ms,
        max_ms,
    }
}

const INF: f64 = f64::INFINITY;

/// Auditory-modality brackets, one row per age group in `AgeGroup` order.
pub const AUDITORY_STANDARDS: [[ClassBand; 7]; 6] = [
    [
        band(7, 0.0, 40.0),
        band(6, 40.0, 60.0),
        band(5, 60.0, 80.0),
        band(4, 80.0, 100.0),
        band(3, 100.0, 150.0),
        band(2, 150.0, 230.0),
        band(1, 230.0, INF),
    ],
    [
        band(7, 0.0, 30.0),
        band(6, 30.0, 35.0),
        band(5, 35.0, 45.0),
        band(4, 45.0, 70.0),
        band(3, 70.0, 155.0),
        band(2, 155.0, 200.0),
        band(1, 200.0, INF),
    ],
    [
        band(7, 0.0, 27.0),
        band(6, 27.0, 34.0),
        band(5, 34.0, 40.0),
        band(4, 40.0, 60.0),
        band(3, 60.0, 130.0),
        band(2, 130.0, 160.0),
        band(1, 160.0, INF),
    ],
    [
        band(7, 0.0, 25.0),
        band(6, 25.0, 30.0),
        band(5, 30.0, 35.0),
        band(4, 35.0, 45.0),
        band(3, 45.0, 105.0),
        band(2, 105.0, 150.0),
        band(1, 150.0, INF),
    ],
    [
        band(7, 0.0, 20.0),
        band(6, 20.0, 25.0),
        band(5, 25.0, 30.0),
        band(4, 30.0, 45.0),
        band(3, 45.0, 90.0),
        band(2, 90.0, 120.0),
        band(1, 120.0, INF),
    ],
    [
        band(7, 0.0, 17.0),
        band(6, 17.0, 25.0),
        band(5, 25.0, 30.0),
        band(4, 30.0, 40.0),
        band(3, 40.0, 75.0),
        band(2, 75.0, 90.0),
        band(1, 90.0, INF),
    ],
];

/// Visual-modality brackets; looser than the auditory table throughout.
pub const VISUAL_STANDARDS: [[ClassBand; 7]; 6] = [
    [
        band(7, 0.0, 50.0),
        band(6, 50.0, 80.0),
        band(5, 80.0, 100.0),
        band(4, 100.0, 120.0),
        band(3, 120.0, 170.0),
        band(2, 170.0, 250.0),
        band(1, 250.0, INF),
    ],
    [
        band(7, 0.0, 40.0),
        band(6, 40.0, 55.0),
        band(5, 55.0, 65.0),
        band(4, 65.0, 90.0),
        band(3, 90.0, 130.0),
        band(2, 130.0, 220.0),
        band(1, 220.0, INF),
    ],
    [
        band(7, 0.0, 35.0),
        band(6, 35.0, 45.0),
        band(5, 45.0, 60.0),
        band(4, 60.0, 75.0),
        band(3, 75.0, 110.0),
        band(2, 110.0, 200.0),
        band(1, 200.0, INF),
    ],
    [
        band(7, 0.0, 30.0),
        band(6, 30.0, 40.0),
        band(5, 40.0, 50.0),
        band(4, 50.0, 65.0),
        band(3, 65.0, 95.0),
        band(2, 95.0, 160.0),
        band(1, 160.0, INF),
    ],
    [
        band(7, 0.0, 27.0),
        band(6, 27.0, 30.0),
        band(5, 30.0, 40.0),
        band(4, 40.0, 55.0),
        band(3, 55.0, 75.0),
        band(2, 75.0, 130.0),
        band(1, 130.0, INF),
    ],
    [
        band(7, 0.0, 25.0),
        band(6, 25.0, 30.0),
        band(5, 30.0, 40.0),
        band(4, 40.0, 50.0),
        band(3, 50.0, 70.0),
        band(2, 70.0, 100.0),
        band(1, 100.0, INF),
    ],
];

/// Age-independent brackets, used when no birth date is available.
pub const GENERAL_STANDARDS: [ClassBand; 7] = [
    band(7, 0.0, 20.0),
    band(6, 20.0, 40.0),
    band(5, 40.0, 80.0),
    band(4, 80.0, 120.0),
    band(3, 120.0, 180.0),
    band(2, 180.0, 250.0),
    band(1, 250.0, INF),
];

pub fn bands_for(modality: Modality, group: AgeGroup) -> &'static [ClassBand; 7] {
    match modality {
        Modality::Audio => &AUDITORY_STANDARDS[group.index()],
        Modality::Visual => &VISUAL_STANDARDS[group.index()],
    }
}

/// Class for a Task Average under the age/modality table. Falls back to
/// class 1 when no bracket matches (negative or otherwise out-of-range TA).
pub fn class_for(task_average: f64, age: i32, modality: Modality) -> u8 {
    lookup(bands_for(modality, AgeGroup::from_age(age)), task_average)
}

pub fn class_for_general(task_average: f64) -> u8 {
    lookup(&GENERAL_STANDARDS, task_average)
}

fn lookup(bands: &[ClassBand; 7], task_average: f64) -> u8 {
    for band in bands {
        if task_average >= band.min_ms && task_average < band.max_ms {
            return band.class;
        }
    }
    1
}

/// Discrete class-to-percentile mapping. Deliberately coarse; class 4 is
/// anchored at the median.
pub fn percentile_for_class(class: u8) -> u8 {
    match class {
        7 => 98,
        6 => 90,
        5 => 75,
        4 => 50,
        3 => 25,
        2 => 10,
        _ => 2,
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceLevel {
    VeryPoor,
    Poor,
    BelowTypical,
    Typical,
    AboveTypical,
    Good,
    VeryGood,
}

impl PerformanceLevel {
    pub fn from_class(class: u8) -> Self {
        match class {
            7 => PerformanceLevel::VeryGood,
            6 => PerformanceLevel::Good,
            5 => PerformanceLevel::AboveTypical,
            4 => PerformanceLevel::Typical,
            3 => PerformanceLevel::BelowTypical,
            2 => PerformanceLevel::Poor,
            _ => PerformanceLevel::VeryPoor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceLevel::VeryGood => "very good",
            PerformanceLevel::Good => "good",
            PerformanceLevel::AboveTypical => "above typical",
            PerformanceLevel::Typical => "typical",
            PerformanceLevel::BelowTypical => "below typical",
            PerformanceLevel::Poor => "poor",
            PerformanceLevel::VeryPoor => "very poor",
        }
    }
}
