use crate::domain::model::{Course, CourseId, RawCourseRow};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{PickerError, Result};
use std::collections::{BTreeSet, HashMap};

/// Immutable, ordered course table with a symmetrized incompatibility lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<CourseId, usize>,
    incompatible: HashMap<CourseId, BTreeSet<CourseId>>,
}

/// Splits a comma separated list of codes, dropping anything that is not a code.
pub fn parse_incompatibilities(raw: &str) -> BTreeSet<CourseId> {
    raw.split(',').filter_map(CourseId::parse_code).collect()
}

impl Catalog {
    /// Builds a catalog from raw rows. Row numbers in errors are 1-based.
    pub fn load<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawCourseRow>,
    {
        let mut courses = Vec::new();
        let mut index = HashMap::new();

        for (position, raw) in rows.into_iter().enumerate() {
            let row = position + 1;

            let code = raw.code.as_deref().unwrap_or("").trim();
            if code.is_empty() {
                return Err(PickerError::InvalidRow {
                    row,
                    reason: "missing course code".to_string(),
                });
            }
            let id = CourseId::parse_row_code(code).ok_or_else(|| PickerError::InvalidRow {
                row,
                reason: format!("course code '{}' is not a number", code),
            })?;

            let name = raw.course.as_deref().unwrap_or("").trim();
            if name.is_empty() {
                return Err(PickerError::InvalidRow {
                    row,
                    reason: format!("course {} has no name", id),
                });
            }

            if let Some(&first) = index.get(&id) {
                return Err(PickerError::DuplicateId {
                    id,
                    first_row: first + 1,
                    row,
                });
            }

            let declared_incompatible = raw
                .incompatibilities
                .as_deref()
                .map(parse_incompatibilities)
                .unwrap_or_default();

            index.insert(id, courses.len());
            courses.push(Course {
                id,
                name: name.to_string(),
                declared_incompatible,
            });
        }

        let incompatible = symmetrize(&courses, &index);

        tracing::debug!(
            "Loaded catalog with {} courses and {} incompatible pairs",
            courses.len(),
            incompatible.values().map(BTreeSet::len).sum::<usize>() / 2
        );

        Ok(Self {
            courses,
            index,
            incompatible,
        })
    }

    pub fn from_source(source: &dyn CatalogSource) -> Result<Self> {
        tracing::info!("Loading catalog from {}", source.describe());
        let rows = source.read_rows()?;
        Self::load(rows)
    }

    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.index.get(&id).map(|&i| &self.courses[i])
    }

    pub fn contains(&self, id: CourseId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn name_of(&self, id: CourseId) -> Option<&str> {
        self.get(id).map(|course| course.name.as_str())
    }

    /// Courses in load order. Call again to restart.
    pub fn all(&self) -> impl Iterator<Item = &Course> + '_ {
        self.courses.iter()
    }

    /// Existing courses that cannot be taken together with `id`, in either direction.
    pub fn incompatible_with(&self, id: CourseId) -> impl Iterator<Item = CourseId> + '_ {
        self.incompatible
            .get(&id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn are_incompatible(&self, a: CourseId, b: CourseId) -> bool {
        self.incompatible
            .get(&a)
            .is_some_and(|set| set.contains(&b))
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}

fn symmetrize(
    courses: &[Course],
    index: &HashMap<CourseId, usize>,
) -> HashMap<CourseId, BTreeSet<CourseId>> {
    let mut lookup: HashMap<CourseId, BTreeSet<CourseId>> = HashMap::new();

    for course in courses {
        for &other in &course.declared_incompatible {
            if other == course.id {
                tracing::debug!("Course {} lists itself as incompatible; ignored", course.id);
                continue;
            }
            if !index.contains_key(&other) {
                tracing::debug!(
                    "Course {} references unknown course {}; ignored",
                    course.id,
                    other
                );
                continue;
            }
            lookup.entry(course.id).or_default().insert(other);
            lookup.entry(other).or_default().insert(course.id);
        }
    }

    lookup
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str, &str)]) -> Vec<RawCourseRow> {
        data.iter()
            .map(|(code, name, inc)| RawCourseRow::new(*code, *name, *inc))
            .collect()
    }

    #[test]
    fn test_parse_incompatibilities_drops_malformed_tokens() {
        let parsed = parse_incompatibilities("101, abc ,102");
        assert_eq!(parsed, BTreeSet::from([CourseId(101), CourseId(102)]));
        assert!(parse_incompatibilities("").is_empty());
        assert!(parse_incompatibilities(" , ,").is_empty());
    }

    #[test]
    fn test_load_preserves_order_and_lookup() {
        let catalog = Catalog::load(rows(&[
            ("103", "Algorithms", ""),
            ("101", "Intro", ""),
            ("102", "Data Structures", "101"),
        ]))
        .unwrap();

        let order: Vec<u32> = catalog.all().map(|c| c.id.0).collect();
        assert_eq!(order, vec![103, 101, 102]);
        assert_eq!(catalog.name_of(CourseId(102)), Some("Data Structures"));
        assert!(catalog.get(CourseId(999)).is_none());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_symmetrizes_declared_relation() {
        let catalog = Catalog::load(rows(&[("101", "Intro", ""), ("102", "DS", "101")])).unwrap();

        assert!(catalog.are_incompatible(CourseId(101), CourseId(102)));
        assert!(catalog.are_incompatible(CourseId(102), CourseId(101)));
        assert!(catalog
            .get(CourseId(101))
            .unwrap()
            .declared_incompatible
            .is_empty());
        let from_intro: Vec<CourseId> = catalog.incompatible_with(CourseId(101)).collect();
        assert_eq!(from_intro, vec![CourseId(102)]);
    }

    #[test]
    fn test_dangling_and_self_references_are_kept_raw_only() {
        let catalog = Catalog::load(rows(&[("101", "Intro", "101,555")])).unwrap();

        let course = catalog.get(CourseId(101)).unwrap();
        assert_eq!(
            course.declared_incompatible,
            BTreeSet::from([CourseId(101), CourseId(555)])
        );
        assert_eq!(catalog.incompatible_with(CourseId(101)).count(), 0);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let err = Catalog::load(rows(&[
            ("101", "Intro", ""),
            ("102", "DS", ""),
            ("101", "Intro again", ""),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            PickerError::DuplicateId { id: CourseId(101), first_row: 1, row: 3 }
        ));
    }

    #[test]
    fn test_invalid_rows_are_rejected() {
        let missing_code = Catalog::load(vec![RawCourseRow {
            code: None,
            course: Some("Intro".to_string()),
            incompatibilities: None,
        }]);
        assert!(matches!(missing_code, Err(PickerError::InvalidRow { row: 1, .. })));

        let bad_code = Catalog::load(rows(&[("101", "Intro", ""), ("x1", "Bad", "")]));
        assert!(matches!(bad_code, Err(PickerError::InvalidRow { row: 2, .. })));

        let blank_name = Catalog::load(rows(&[("101", "   ", "")]));
        assert!(matches!(blank_name, Err(PickerError::InvalidRow { row: 1, .. })));
    }

    #[test]
    fn test_spreadsheet_float_codes_load() {
        let catalog = Catalog::load(rows(&[
            ("101.0", "Intro", ""),
            ("102.0", "Data Structures", "101"),
        ]))
        .unwrap();

        assert_eq!(catalog.name_of(CourseId(101)), Some("Intro"));
        assert!(catalog.are_incompatible(CourseId(101), CourseId(102)));

        let fractional = Catalog::load(rows(&[("101.5", "Intro", "")]));
        assert!(matches!(fractional, Err(PickerError::InvalidRow { row: 1, .. })));
    }

    #[test]
    fn test_missing_incompatibilities_column_is_empty() {
        let catalog = Catalog::load(vec![RawCourseRow {
            code: Some("7".to_string()),
            course: Some("Seminar".to_string()),
            incompatibilities: None,
        }])
        .unwrap();
        assert!(catalog.get(CourseId(7)).unwrap().declared_incompatible.is_empty());
    }
}
