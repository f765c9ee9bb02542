pub mod codec;
pub mod document;
pub mod validator;

pub use crate::domain::model::{ScheduleEntryView, Usf, WeekType};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
pub use document::{LoadOptions, SaveOptions};
