pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::LocalStorage;
pub use config::UsfConfig;
pub use crate::core::{LoadOptions, SaveOptions};
pub use domain::model::{Period, ScheduleEntry, ScheduleEntryView, SubjectDetails, Usf, WeekType};
pub use domain::ports::Storage;
pub use utils::error::{ErrorCategory, Result, UsfError, ValidationError, ValidationErrorKind};
