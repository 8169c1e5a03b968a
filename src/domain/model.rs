use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Numeric course code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u32);

impl CourseId {
    /// Parses a code made only of ASCII digits, ignoring surrounding whitespace.
    pub fn parse_code(raw: &str) -> Option<Self> {
        let token = raw.trim();
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        token.parse().ok().map(CourseId)
    }

    /// Like [`CourseId::parse_code`], but also accepts spreadsheet floats such as `101.0`.
    pub fn parse_row_code(raw: &str) -> Option<Self> {
        let token = raw.trim();
        match token.split_once('.') {
            Some((whole, fraction))
                if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') =>
            {
                Self::parse_code(whole)
            }
            Some(_) => None,
            None => Self::parse_code(token),
        }
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CourseId {
    fn from(value: u32) -> Self {
        CourseId(value)
    }
}

/// One row of a catalog table before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCourseRow {
    #[serde(rename = "Code", default)]
    pub code: Option<String>,
    #[serde(rename = "Course", default)]
    pub course: Option<String>,
    #[serde(rename = "Incompatibilities", default)]
    pub incompatibilities: Option<String>,
}

impl RawCourseRow {
    pub fn new(code: impl Into<String>, course: impl Into<String>, incompatibilities: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            course: Some(course.into()),
            incompatibilities: Some(incompatibilities.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    /// Incompatibilities exactly as declared, dangling and self references included.
    pub declared_incompatible: BTreeSet<CourseId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockReason {
    #[default]
    None,
    Incompatible,
    LimitReached,
}

impl BlockReason {
    pub fn is_blocked(self) -> bool {
        !matches!(self, BlockReason::None)
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BlockReason::None => "available",
            BlockReason::Incompatible => "incompatible with selected courses",
            BlockReason::LimitReached => "limit reached",
        };
        f.write_str(text)
    }
}

/// Everything derived from the catalog and the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedView {
    pub chosen_ids: Vec<CourseId>,
    pub max_selectable: usize,
    pub limit_reached: bool,
    pub over_limit: bool,
    pub blocked_ids: BTreeSet<CourseId>,
    /// Ids blocked because a chosen course rules them out, limit aside.
    pub incompatible_ids: BTreeSet<CourseId>,
    pub conflicts: BTreeSet<CourseId>,
}

impl DerivedView {
    pub fn is_chosen(&self, id: CourseId) -> bool {
        self.chosen_ids.contains(&id)
    }

    /// The limit reason takes precedence when both apply.
    pub fn block_reason(&self, id: CourseId) -> BlockReason {
        if !self.blocked_ids.contains(&id) {
            BlockReason::None
        } else if self.limit_reached {
            BlockReason::LimitReached
        } else {
            BlockReason::Incompatible
        }
    }
}

/// Row view-model handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRow {
    pub id: CourseId,
    pub name: String,
    pub chosen: bool,
    pub is_blocked: bool,
    pub block_reason: BlockReason,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ConflictPair {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub selected_names: Vec<String>,
    pub conflict_report: BTreeSet<String>,
    pub conflict_pairs: Vec<ConflictPair>,
    /// Unchosen courses ruled out by an incompatibility with the selection.
    pub excluded_names: BTreeSet<String>,
    pub limit_reached: bool,
    pub max_selectable: usize,
}
