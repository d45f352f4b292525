pub mod channel;
pub mod config;
pub mod error;
pub mod events;
pub mod norms;
pub mod pattern;
pub mod profile;

pub use crate::channel::{Channel, Limb, Side};
pub use crate::config::{Modality, TrainingConfig, TrainingRange};
pub use crate::error::DomainError;
pub use crate::events::{InputEvent, InputSource};
pub use crate::norms::{AgeGroup, ClassBand, PerformanceLevel};
pub use crate::pattern::{ExpectedInput, Pattern};
pub use crate::profile::{age_between, Gender, UserProfile};
