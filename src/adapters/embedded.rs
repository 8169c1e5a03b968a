use crate::domain::model::RawCourseRow;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;

const COURSES: &[(&str, &str, &str)] = &[
    ("101", "Introduction to Programming", ""),
    ("102", "Data Structures", "101"),
    ("103", "Algorithms", "101,102"),
    ("104", "Database Management", ""),
    ("105", "Web Development", "103"),
    ("106", "Operating Systems", "102"),
    ("107", "Computer Networks", "101,104"),
    ("108", "Artificial Intelligence", "102,103"),
    ("109", "Machine Learning", "108"),
    ("110", "Cybersecurity Fundamentals", "105"),
    ("111", "Cloud Computing", "107"),
    ("112", "Mobile App Development", "104,105"),
    ("113", "Game Design", "101,102"),
    ("114", "Software Engineering", "106"),
    ("115", "Human-Computer Interaction", ""),
];

/// The built-in course table used when no catalog file is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn describe(&self) -> String {
        format!("embedded catalog ({} courses)", COURSES.len())
    }

    fn read_rows(&self) -> Result<Vec<RawCourseRow>> {
        Ok(COURSES
            .iter()
            .map(|(code, name, incompatibilities)| RawCourseRow::new(*code, *name, *incompatibilities))
            .collect())
    }
}
