use crate::domain::model::RawCourseRow;
use crate::utils::error::Result;

/// Anything that can produce the raw rows of a course catalog.
pub trait CatalogSource: Send + Sync {
    fn describe(&self) -> String;
    fn read_rows(&self) -> Result<Vec<RawCourseRow>>;
}

pub trait ConfigProvider: Send + Sync {
    fn max_selectable(&self) -> usize;
    /// `None` selects the embedded catalog.
    fn catalog_path(&self) -> Option<&str>;
}
