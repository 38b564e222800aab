use chrono::NaiveDate;
use proptest::prelude::*;
use todoai::libs::error::TaskError;
use todoai::libs::overlap::{check_overlap, Overlap};
use todoai::libs::task::{Task, TaskDraft};
use todoai::libs::time::format_minutes;

fn task(id: &str, date: &str, start_time: &str, duration: u32) -> Task {
    Task {
        id: id.to_string(),
        text: format!("task {}", id),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        start_time: start_time.to_string(),
        duration,
        completed: false,
    }
}

fn existing_day() -> Vec<Task> {
    vec![task("1", "2025-03-22", "09:00", 60)]
}

#[test]
fn candidate_inside_existing_task_conflicts() {
    let existing = existing_day();
    let candidate = task("new", "2025-03-22", "09:30", 30);

    assert_eq!(check_overlap(&existing, &candidate, None).unwrap(), Overlap::Conflict(&existing[0]));
}

#[test]
fn candidate_starting_when_existing_ends_does_not_conflict() {
    let existing = existing_day();
    let candidate = task("new", "2025-03-22", "10:00", 30);

    assert_eq!(check_overlap(&existing, &candidate, None).unwrap(), Overlap::None);
}

#[test]
fn candidate_ending_when_existing_starts_does_not_conflict() {
    let existing = existing_day();
    let candidate = task("new", "2025-03-22", "08:00", 60);

    assert_eq!(check_overlap(&existing, &candidate, None).unwrap(), Overlap::None);
}

#[test]
fn updated_task_is_not_compared_with_itself() {
    let existing = existing_day();
    let candidate = task("1", "2025-03-22", "09:15", 60);

    assert_eq!(check_overlap(&existing, &candidate, Some("1")).unwrap(), Overlap::None);
    // without the exclusion the stored copy would be reported
    assert!(check_overlap(&existing, &candidate, None).unwrap().is_conflict());
}

#[test]
fn tasks_on_different_dates_never_conflict() {
    let existing = vec![task("a", "2025-01-01", "09:00", 120)];
    let candidate = task("b", "2025-01-02", "09:30", 60);

    assert_eq!(check_overlap(&existing, &candidate, None).unwrap(), Overlap::None);
}

#[test]
fn malformed_candidate_time_is_an_error() {
    let existing = existing_day();
    let candidate = task("new", "2025-03-22", "9:xx", 30);

    assert_eq!(
        check_overlap(&existing, &candidate, None),
        Err(TaskError::InvalidTimeFormat("9:xx".to_string()))
    );
}

#[test]
fn oversized_duration_is_an_error() {
    let existing = existing_day();
    let candidate = task("new", "2025-03-22", "23:00", u32::MAX);

    assert_eq!(
        check_overlap(&existing, &candidate, None),
        Err(TaskError::InvalidDuration(u32::MAX as i64))
    );
    assert_eq!(candidate.interval(), Err(TaskError::InvalidDuration(u32::MAX as i64)));

    let draft = TaskDraft::new("x", "2025-03-22", "23:00", u32::MAX as i64);
    let day = NaiveDate::from_ymd_opt(2025, 3, 22).unwrap();
    assert_eq!(draft.into_task(day), Err(TaskError::InvalidDuration(u32::MAX as i64)));
}

#[test]
fn day_long_task_conflicts_with_everything_that_day() {
    let existing = existing_day();
    let candidate = task("new", "2025-03-22", "00:00", 24 * 60);

    assert!(check_overlap(&existing, &candidate, None).unwrap().is_conflict());
}

#[test]
fn first_conflict_in_input_order_is_reported() {
    let existing = vec![task("late", "2025-03-22", "10:30", 60), task("early", "2025-03-22", "09:00", 90)];
    let candidate = task("new", "2025-03-22", "10:00", 60);

    match check_overlap(&existing, &candidate, None).unwrap() {
        Overlap::Conflict(t) => assert_eq!(t.id, "late"),
        Overlap::None => panic!("expected a conflict"),
    }
}

proptest! {
    #[test]
    fn disjoint_intervals_never_conflict(a_start in 0u32..600, a_len in 1u32..300, gap in 0u32..300, b_len in 1u32..300) {
        let b_start = a_start + a_len + gap;
        let a = task("a", "2025-03-22", &format_minutes(a_start), a_len);
        let b = task("b", "2025-03-22", &format_minutes(b_start), b_len);

        prop_assert_eq!(check_overlap(std::slice::from_ref(&a), &b, None).unwrap(), Overlap::None);
        prop_assert_eq!(check_overlap(std::slice::from_ref(&b), &a, None).unwrap(), Overlap::None);
    }

    #[test]
    fn intersecting_intervals_always_conflict(a_start in 0u32..1000, a_len in 2u32..300, raw_offset in 0u32..300, b_len in 1u32..300) {
        // b starts inside a, so the intervals share more than a boundary point
        let b_start = a_start + raw_offset % a_len;
        let a = task("a", "2025-03-22", &format_minutes(a_start), a_len);
        let b = task("b", "2025-03-22", &format_minutes(b_start), b_len);

        prop_assert!(check_overlap(std::slice::from_ref(&a), &b, None).unwrap().is_conflict());
        prop_assert!(check_overlap(std::slice::from_ref(&b), &a, None).unwrap().is_conflict());
    }

    #[test]
    fn excluded_task_never_conflicts_with_its_own_update(start in 0u32..1400, len in 1u32..300, new_start in 0u32..1400, new_len in 1u32..300) {
        let stored = task("t", "2025-03-22", &format_minutes(start), len);
        let updated = task("t", "2025-03-22", &format_minutes(new_start), new_len);

        prop_assert_eq!(check_overlap(std::slice::from_ref(&stored), &updated, Some("t")).unwrap(), Overlap::None);
    }

    #[test]
    fn different_days_never_conflict(start in 0u32..1400, len in 1u32..600, other_start in 0u32..1400, other_len in 1u32..600) {
        let a = task("a", "2025-03-22", &format_minutes(start), len);
        let b = task("b", "2025-03-23", &format_minutes(other_start), other_len);

        prop_assert_eq!(check_overlap(std::slice::from_ref(&a), &b, None).unwrap(), Overlap::None);
    }
}
