pub mod analytics;
pub mod bindings;
pub mod matcher;
pub mod scoring;
pub mod session;

pub use analytics::{
    improvement, summarize, CategoryCounts, ChannelStats, Improvement, SessionSummary,
    TASK_AVERAGE_SENTINEL,
};
pub use bindings::DeviceBindings;
pub use scoring::{evaluate, Direction, Feedback, FeedbackCategory};
pub use session::{Beat, BeatResponse, InputOutcome, Session};
