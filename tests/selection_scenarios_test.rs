use course_picker::domain::model::RawCourseRow;
use course_picker::{BlockReason, Catalog, CourseId, PickerError, SelectionEngine, Session};
use std::collections::BTreeSet;
use std::sync::Arc;

fn catalog(data: &[(&str, &str, &str)]) -> Arc<Catalog> {
    let rows = data
        .iter()
        .map(|(code, name, inc)| RawCourseRow::new(*code, *name, *inc));
    Arc::new(Catalog::load(rows).expect("catalog should load"))
}

fn intro_and_ds() -> Arc<Catalog> {
    catalog(&[("101", "Intro", ""), ("102", "DataStructures", "101")])
}

fn ids(values: &[u32]) -> BTreeSet<CourseId> {
    values.iter().copied().map(CourseId).collect()
}

#[test]
fn test_choosing_intro_blocks_data_structures() {
    let mut engine = SelectionEngine::with_default_limit(intro_and_ds());
    engine.set_chosen(CourseId(101), true).unwrap();

    let view = engine.compute_view();
    assert_eq!(view.chosen_ids, vec![CourseId(101)]);
    assert_eq!(view.blocked_ids, ids(&[102]));
    assert_eq!(view.block_reason(CourseId(102)), BlockReason::Incompatible);
}

#[test]
fn test_blocking_is_symmetric_for_one_way_declarations() {
    let mut engine = SelectionEngine::with_default_limit(intro_and_ds());
    engine.set_chosen(CourseId(102), true).unwrap();

    let view = engine.compute_view();
    assert_eq!(view.blocked_ids, ids(&[101]));
    assert!(engine.set_chosen(CourseId(101), true).is_err());
}

#[test]
fn test_third_pick_rejected_when_limit_is_two() {
    let mut engine = SelectionEngine::new(
        catalog(&[("1", "Art", ""), ("2", "Biology", ""), ("3", "Chemistry", "")]),
        2,
    );

    engine.set_chosen(CourseId(1), true).unwrap();
    engine.set_chosen(CourseId(2), true).unwrap();
    let err = engine.set_chosen(CourseId(3), true).unwrap_err();

    assert!(matches!(
        err,
        PickerError::BlockedSelection {
            id: CourseId(3),
            reason: BlockReason::LimitReached
        }
    ));
    let view = engine.compute_view();
    assert_eq!(view.chosen_ids.len(), 2);
    assert!(view.limit_reached);
    assert!(!view.over_limit);
}

#[test]
fn test_forced_incompatible_pair_is_reported_as_conflict() {
    let mut engine = SelectionEngine::with_default_limit(intro_and_ds());
    engine.set_chosen(CourseId(101), true).unwrap();
    engine.force_chosen(CourseId(102));

    let view = engine.compute_view();
    assert_eq!(view.conflicts, ids(&[101, 102]));
    assert!(view.blocked_ids.is_empty());

    let summary = engine.summary();
    assert_eq!(
        summary.conflict_report,
        BTreeSet::from(["Intro".to_string(), "DataStructures".to_string()])
    );
    assert_eq!(summary.conflict_pairs.len(), 1);
    assert_eq!(summary.conflict_pairs[0].first, "Intro");
    assert_eq!(summary.conflict_pairs[0].second, "DataStructures");
}

#[test]
fn test_malformed_incompatibility_tokens_are_dropped() {
    let catalog = catalog(&[
        ("101", "Intro", ""),
        ("102", "DataStructures", ""),
        ("103", "Algorithms", "101, abc ,102"),
    ]);

    let course = catalog.get(CourseId(103)).unwrap();
    assert_eq!(course.declared_incompatible, ids(&[101, 102]));
}

#[test]
fn test_choosing_twice_is_idempotent() {
    let mut engine = SelectionEngine::with_default_limit(intro_and_ds());
    engine.set_chosen(CourseId(101), true).unwrap();
    let once = engine.compute_view();
    engine.set_chosen(CourseId(101), true).unwrap();

    assert_eq!(engine.compute_view(), once);
}

#[test]
fn test_deselect_unblocks_again() {
    let mut engine = SelectionEngine::with_default_limit(intro_and_ds());
    engine.set_chosen(CourseId(101), true).unwrap();
    engine.set_chosen(CourseId(101), false).unwrap();

    let view = engine.compute_view();
    assert!(view.chosen_ids.is_empty());
    assert!(view.blocked_ids.is_empty());
    engine.set_chosen(CourseId(102), true).unwrap();
}

#[test]
fn test_dangling_reference_is_harmless() {
    let mut engine = SelectionEngine::with_default_limit(catalog(&[
        ("101", "Intro", "404"),
        ("102", "DataStructures", ""),
    ]));
    engine.set_chosen(CourseId(101), true).unwrap();

    let view = engine.compute_view();
    assert!(view.blocked_ids.is_empty());
    assert!(view.conflicts.is_empty());
    assert!(engine.summary().excluded_names.is_empty());
}

#[test]
fn test_rows_expose_presentation_fields() {
    let mut engine = SelectionEngine::new(
        catalog(&[("101", "Intro", ""), ("102", "DataStructures", "101"), ("103", "Algorithms", "")]),
        5,
    );
    engine.set_chosen(CourseId(101), true).unwrap();
    let rows = engine.rows();

    assert_eq!(rows.len(), 3);
    assert!(rows[0].chosen && !rows[0].is_blocked);
    assert!(rows[1].is_blocked);
    assert_eq!(rows[1].block_reason, BlockReason::Incompatible);
    assert!(!rows[2].is_blocked);
    assert_eq!(rows[2].block_reason, BlockReason::None);
}

#[test]
fn test_sessions_do_not_share_selection() {
    let shared = intro_and_ds();
    let mut first = Session::new(SelectionEngine::with_default_limit(shared.clone()));
    let second = Session::new(SelectionEngine::with_default_limit(shared));

    first.apply(course_picker::Command::Add(CourseId(101)));

    assert_eq!(first.engine().compute_view().chosen_ids, vec![CourseId(101)]);
    assert!(second.engine().compute_view().chosen_ids.is_empty());
}
