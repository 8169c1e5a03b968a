pub mod catalog;
pub mod engine;

pub use crate::domain::model::{
    BlockReason, Course, CourseId, CourseRow, DerivedView, RawCourseRow, SelectionSummary,
};
pub use crate::domain::ports::{CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
