pub mod builder;
pub mod dimensions;

pub use builder::{
    build_report, ComprehensiveReport, IndividualResult, ModalityPair, PatientInfo,
    ReportError, SessionRecord, SessionTag,
};
pub use dimensions::{
    AttentionMetrics, BalanceCorrelation, BrainSpeed, DominantStyle, HemisphereBalance,
    LearningStyle, ProcessingCapability, SustainabilityMetrics, Tier,
};
