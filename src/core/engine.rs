use crate::core::catalog::Catalog;
use crate::domain::model::{
    BlockReason, ConflictPair, CourseId, CourseRow, DerivedView, SelectionSummary,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PickerError, Result};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

pub const DEFAULT_MAX_SELECTABLE: usize = 5;

/// Per-session chosen flags. Ids never set read as not chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    chosen: HashMap<CourseId, bool>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_chosen(&self, id: CourseId) -> bool {
        self.chosen.get(&id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: CourseId, value: bool) {
        self.chosen.insert(id, value);
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }
}

/// Owns one session's selection and derives what is selectable from it.
///
/// Every query recomputes from scratch; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    catalog: Arc<Catalog>,
    state: SelectionState,
    max_selectable: usize,
}

impl SelectionEngine {
    pub fn new(catalog: Arc<Catalog>, max_selectable: usize) -> Self {
        Self {
            catalog,
            state: SelectionState::new(),
            max_selectable,
        }
    }

    pub fn with_default_limit(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, DEFAULT_MAX_SELECTABLE)
    }

    pub fn from_config(catalog: Arc<Catalog>, config: &dyn ConfigProvider) -> Self {
        Self::new(catalog, config.max_selectable())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn max_selectable(&self) -> usize {
        self.max_selectable
    }

    /// Changes the limit without touching the current selection.
    pub fn set_max_selectable(&mut self, max_selectable: usize) {
        tracing::debug!(
            "Selection limit changed from {} to {}",
            self.max_selectable,
            max_selectable
        );
        self.max_selectable = max_selectable;
    }

    /// Unknown ids are ignored. Choosing a blocked course is rejected and
    /// leaves the selection unchanged.
    pub fn set_chosen(&mut self, id: CourseId, value: bool) -> Result<()> {
        if !self.catalog.contains(id) {
            tracing::debug!("Ignoring selection change for unknown course {}", id);
            return Ok(());
        }

        if !value {
            self.state.set(id, false);
            return Ok(());
        }

        if self.state.is_chosen(id) {
            return Ok(());
        }

        let reason = self.compute_view().block_reason(id);
        if reason.is_blocked() {
            return Err(PickerError::BlockedSelection { id, reason });
        }

        self.state.set(id, true);
        Ok(())
    }

    /// Marks a course chosen without any checks, as a stale client might.
    pub fn force_chosen(&mut self, id: CourseId) {
        if self.catalog.contains(id) {
            self.state.set(id, true);
        }
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn compute_view(&self) -> DerivedView {
        let chosen_ids: Vec<CourseId> = self
            .catalog
            .all()
            .map(|course| course.id)
            .filter(|&id| self.state.is_chosen(id))
            .collect();
        let chosen_set: BTreeSet<CourseId> = chosen_ids.iter().copied().collect();

        let limit_reached = chosen_ids.len() >= self.max_selectable;

        let incompatible_from_chosen: BTreeSet<CourseId> = chosen_ids
            .iter()
            .flat_map(|&id| self.catalog.incompatible_with(id))
            .collect();

        let incompatible_ids: BTreeSet<CourseId> = incompatible_from_chosen
            .difference(&chosen_set)
            .copied()
            .collect();

        let mut blocked_ids = incompatible_ids.clone();
        if limit_reached {
            blocked_ids.extend(
                self.catalog
                    .all()
                    .map(|course| course.id)
                    .filter(|id| !chosen_set.contains(id)),
            );
        }

        let conflicts: BTreeSet<CourseId> = chosen_ids
            .iter()
            .copied()
            .filter(|&id| {
                self.catalog
                    .incompatible_with(id)
                    .any(|other| chosen_set.contains(&other))
            })
            .collect();

        DerivedView {
            over_limit: chosen_ids.len() > self.max_selectable,
            chosen_ids,
            max_selectable: self.max_selectable,
            limit_reached,
            blocked_ids,
            incompatible_ids,
            conflicts,
        }
    }

    pub fn rows(&self) -> Vec<CourseRow> {
        let view = self.compute_view();
        self.catalog
            .all()
            .map(|course| {
                let block_reason = view.block_reason(course.id);
                CourseRow {
                    id: course.id,
                    name: course.name.clone(),
                    chosen: view.is_chosen(course.id),
                    is_blocked: block_reason.is_blocked(),
                    block_reason,
                }
            })
            .collect()
    }

    pub fn summary(&self) -> SelectionSummary {
        let view = self.compute_view();
        let name = |id: &CourseId| self.catalog.name_of(*id).map(str::to_string);

        let selected_names: Vec<String> = view.chosen_ids.iter().filter_map(name).collect();
        let conflict_report: BTreeSet<String> = view.conflicts.iter().filter_map(name).collect();
        let excluded_names: BTreeSet<String> = view.incompatible_ids.iter().filter_map(name).collect();

        let mut conflict_pairs = Vec::new();
        for (i, &a) in view.chosen_ids.iter().enumerate() {
            for &b in &view.chosen_ids[i + 1..] {
                if self.catalog.are_incompatible(a, b) {
                    if let (Some(first), Some(second)) = (name(&a), name(&b)) {
                        conflict_pairs.push(ConflictPair { first, second });
                    }
                }
            }
        }

        SelectionSummary {
            selected_names,
            conflict_report,
            conflict_pairs,
            excluded_names,
            limit_reached: view.limit_reached,
            max_selectable: view.max_selectable,
        }
    }

    pub fn block_reason(&self, id: CourseId) -> BlockReason {
        self.compute_view().block_reason(id)
    }
}
