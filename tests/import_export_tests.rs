use chrono::NaiveDate;
use std::io::Write as _;
use tempfile::NamedTempFile;
use timeline_tool::persistence::{parse_timeline, write_timeline};
use timeline_tool::{
    load_timeline_from_csv, load_timeline_from_json, save_timeline_to_csv, save_timeline_to_json,
    Activity, Entity, Functionality, HorizontalAlign, Milestone, PersistenceError, Timeline,
    VerticalAlign,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn build_sample_timeline() -> Timeline {
    let mut timeline = Timeline::new();
    timeline.push_group(vec![
        Entity::SetDefaultColor {
            color: Some("red".into()),
            border: Some("black".into()),
        },
        Entity::SetMarkerWidth(3.0),
        Entity::SetArrowLength(5.0),
        Activity::days("Crane installation", d(2021, 3, 10), 35)
            .with_color("yellow")
            .with_border("gray")
            .with_row_offset(1)
            .into(),
        Milestone::new("Contract complete", d(2022, 2, 7))
            .with_color("green")
            .with_border("black")
            .with_halign(HorizontalAlign::Left)
            .with_valign(VerticalAlign::Bottom)
            .with_marker_width(1.5)
            .with_row_offset(-1)
            .into(),
    ]);
    timeline.push_group(vec![
        Entity::AdvanceRow(2),
        Functionality::new("Script queue", d(2021, 3, 1))
            .with_arrow_dy(0.1)
            .with_arrow_length(7.0)
            .with_color("blue")
            .into(),
    ]);
    timeline
}

#[test]
fn csv_round_trip_preserves_timeline() {
    let timeline = build_sample_timeline();
    let file = NamedTempFile::new().unwrap();

    save_timeline_to_csv(&timeline, file.path()).unwrap();
    let loaded = load_timeline_from_csv(file.path()).unwrap();

    assert_eq!(loaded, timeline);
}

#[test]
fn json_round_trip_preserves_timeline() {
    let timeline = build_sample_timeline();
    let file = NamedTempFile::new().unwrap();

    save_timeline_to_json(&timeline, file.path()).unwrap();
    let loaded = load_timeline_from_json(file.path()).unwrap();

    assert_eq!(loaded, timeline);
}

#[test]
fn writer_emits_canonical_records_with_group_separators() {
    let mut timeline = Timeline::new();
    timeline.push_group(vec![
        Activity::days("Install", d(2021, 1, 1), 10)
            .with_color("red")
            .into(),
        Milestone::new("Review", d(2021, 2, 1)).into(),
    ]);
    timeline.push_group(vec![Entity::AdvanceRow(2)]);

    let mut out = Vec::new();
    write_timeline(&timeline, &mut out).unwrap();

    let expected = "Activity,Install,2021-01-01,2021-01-11,red,,,0\n\
                    Milestone,Review,2021-02-01,,,right,top,,0\n\
                    \n\
                    AdvanceRow,2\n\
                    \n";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn descriptions_with_commas_survive_the_round_trip() {
    let mut timeline = Timeline::new();
    timeline.push_group(vec![Activity::days(
        "Utilities (power, data, cooling)",
        d(2021, 7, 15),
        26,
    )
    .into()]);

    let mut out = Vec::new();
    write_timeline(&timeline, &mut out).unwrap();
    let loaded = parse_timeline(&String::from_utf8(out).unwrap()).unwrap();

    assert_eq!(loaded, timeline);
}

#[test]
fn empty_optional_fields_read_back_as_none() {
    let timeline = parse_timeline("Activity,Bare,2021-01-01,2021-01-11,,,,0\n").unwrap();
    let Entity::Activity(activity) = &timeline.groups()[0][0] else {
        panic!("expected an activity");
    };
    assert_eq!(activity.color, None);
    assert_eq!(activity.border, None);
    assert_eq!(activity.marker_width, None);
}

#[test]
fn unrecognized_type_tag_is_a_format_error() {
    let err = parse_timeline("Foo,bar\n").unwrap_err();
    assert!(matches!(err, PersistenceError::Format(_)));
}

#[test]
fn wrong_field_count_is_a_format_error() {
    let err = parse_timeline("AdvanceRow,1,extra\n").unwrap_err();
    assert!(matches!(err, PersistenceError::Format(_)));
}

#[test]
fn backwards_activity_dates_are_rejected() {
    let err = parse_timeline("Activity,Bad,2021-02-01,2021-01-01,,,,0\n").unwrap_err();
    assert!(matches!(err, PersistenceError::Entity(_)));
}

#[test]
fn invalid_alignment_is_a_format_error() {
    let err = parse_timeline("Milestone,M,2021-01-01,,,center,top,,0\n").unwrap_err();
    assert!(matches!(err, PersistenceError::Format(_)));
}

#[test]
fn missing_file_is_not_found() {
    let err = load_timeline_from_csv("/no/such/timeline.csv").unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[test]
fn blank_line_separates_groups_on_read() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "Activity,A,2021-01-01,2021-01-11,,,,0\n\nActivity,B,2021-02-01,2021-02-11,,,,0\n"
    )
    .unwrap();

    let loaded = load_timeline_from_csv(file.path()).unwrap();
    assert_eq!(loaded.groups().len(), 2);
    assert_eq!(loaded.groups()[0].len(), 1);
    assert_eq!(loaded.groups()[1].len(), 1);
}

#[test]
fn empty_file_is_an_empty_timeline() {
    let file = NamedTempFile::new().unwrap();
    let loaded = load_timeline_from_csv(file.path()).unwrap();
    assert!(loaded.is_empty());
}
