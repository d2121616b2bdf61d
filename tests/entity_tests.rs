use chrono::NaiveDate;
use timeline_tool::{Activity, EntityError, Milestone};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn spanning_rejects_end_before_start() {
    let err = Activity::spanning("Backwards", d(2021, 2, 1), d(2021, 1, 1)).unwrap_err();
    assert!(matches!(err, EntityError::InvalidArgument(_)));
}

#[test]
fn spanning_equal_dates_gives_zero_duration() {
    let activity = Activity::spanning("Instant", d(2021, 1, 1), d(2021, 1, 1)).unwrap();
    assert_eq!(activity.duration_days, 0);
}

#[test]
fn spanning_duration_is_end_minus_start() {
    let activity = Activity::spanning("Span", d(2021, 1, 1), d(2021, 1, 31)).unwrap();
    assert_eq!(activity.duration_days, 30);
    assert_eq!(activity.end(), d(2021, 1, 31));
}

#[test]
fn activity_entirely_before_window_is_not_visible() {
    let activity = Activity::days("Early", d(2020, 1, 1), 10);
    assert_eq!(activity.visible_span(d(2021, 1, 1), d(2021, 12, 31)), None);
}

#[test]
fn activity_entirely_after_window_is_not_visible() {
    let activity = Activity::days("Late", d(2022, 1, 1), 10);
    assert_eq!(activity.visible_span(d(2021, 1, 1), d(2021, 12, 31)), None);
}

#[test]
fn activity_straddling_window_start_is_clipped() {
    let activity = Activity::days("Straddle", d(2020, 12, 25), 20);
    assert_eq!(
        activity.visible_span(d(2021, 1, 1), d(2021, 12, 31)),
        Some((d(2021, 1, 1), d(2021, 1, 14)))
    );
}

#[test]
fn activity_straddling_window_end_is_clipped() {
    let activity = Activity::days("Straddle", d(2021, 12, 20), 30);
    assert_eq!(
        activity.visible_span(d(2021, 1, 1), d(2021, 12, 31)),
        Some((d(2021, 12, 20), d(2021, 12, 31)))
    );
}

#[test]
fn activity_inside_window_is_untouched() {
    let activity = Activity::days("Inside", d(2021, 6, 1), 10);
    assert_eq!(
        activity.visible_span(d(2021, 1, 1), d(2021, 12, 31)),
        Some((d(2021, 6, 1), d(2021, 6, 11)))
    );
}

#[test]
fn activity_ending_on_window_start_is_visible() {
    let activity = Activity::days("Boundary", d(2020, 12, 22), 10);
    assert_eq!(
        activity.visible_span(d(2021, 1, 1), d(2021, 12, 31)),
        Some((d(2021, 1, 1), d(2021, 1, 1)))
    );
}

#[test]
fn milestone_on_window_boundaries_is_visible() {
    let on_start = Milestone::new("Start", d(2021, 1, 1));
    let on_end = Milestone::new("End", d(2021, 12, 31));
    assert!(on_start
        .visible_span(d(2021, 1, 1), d(2021, 12, 31))
        .is_some());
    assert!(on_end
        .visible_span(d(2021, 1, 1), d(2021, 12, 31))
        .is_some());
}

#[test]
fn milestone_outside_window_is_not_visible() {
    let before = Milestone::new("Before", d(2020, 12, 31));
    let after = Milestone::new("After", d(2022, 1, 1));
    assert_eq!(before.visible_span(d(2021, 1, 1), d(2021, 12, 31)), None);
    assert_eq!(after.visible_span(d(2021, 1, 1), d(2021, 12, 31)), None);
}
