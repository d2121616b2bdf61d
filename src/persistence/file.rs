use super::{PersistenceError, PersistenceResult};
use crate::entity::{
    Activity, Entity, Functionality, HorizontalAlign, Milestone, VerticalAlign,
};
use crate::timeline::Timeline;
use chrono::NaiveDate;
use csv::StringRecord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write a timeline in the record format: one comma-delimited record per
/// entity, one blank row after each group (the final group included).
pub fn save_timeline_to_csv<P: AsRef<Path>>(
    timeline: &Timeline,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path.as_ref())?;
    write_timeline(timeline, file)?;
    debug!(
        "saved {} entities to {}",
        timeline.len(),
        path.as_ref().display()
    );
    Ok(())
}

pub fn write_timeline<W: Write>(timeline: &Timeline, mut out: W) -> PersistenceResult<()> {
    for group in timeline.groups() {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(Vec::new());
        for entity in group {
            writer.write_record(entity.fields())?;
        }
        let buf = writer
            .into_inner()
            .map_err(|err| PersistenceError::Io(io::Error::other(err.to_string())))?;
        out.write_all(&buf)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

pub fn load_timeline_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Timeline> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            PersistenceError::NotFound(path.to_path_buf())
        } else {
            PersistenceError::Io(err)
        }
    })?;
    parse_timeline(&contents)
}

pub fn parse_timeline(contents: &str) -> PersistenceResult<Timeline> {
    if contents.trim().is_empty() {
        return Ok(Timeline::new());
    }

    // Blank rows separate groups; the csv layer only ever sees one group's
    // worth of records at a time.
    let mut blocks: Vec<String> = vec![String::new()];
    for line in contents.lines() {
        if line.trim().is_empty() {
            blocks.push(String::new());
        } else {
            let block = blocks.last_mut().expect("blocks is never empty");
            block.push_str(line);
            block.push('\n');
        }
    }
    // The trailing separator after the final group would otherwise read
    // back as a spurious empty group.
    while blocks.len() > 1 && blocks.last().is_some_and(|block| block.is_empty()) {
        blocks.pop();
    }

    let mut timeline = Timeline::new();
    for block in &blocks {
        timeline.push_group(parse_group(block)?);
    }
    Ok(timeline)
}

fn parse_group(block: &str) -> PersistenceResult<Vec<Entity>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(block.as_bytes());
    let mut entities = Vec::new();
    for record in reader.records() {
        entities.push(parse_record(&record?)?);
    }
    Ok(entities)
}

fn parse_record(record: &StringRecord) -> PersistenceResult<Entity> {
    let tag = record
        .get(0)
        .ok_or_else(|| PersistenceError::Format("empty record".into()))?;

    match tag {
        "Activity" => {
            expect_fields(record, 8)?;
            let start = parse_date(&record[2])?;
            let end = parse_date(&record[3])?;
            let mut activity = Activity::spanning(&record[1], start, end)?;
            activity.color = parse_opt_string(&record[4]);
            activity.border = parse_opt_string(&record[5]);
            activity.marker_width = parse_opt_f64(&record[6])?;
            activity.row_offset = parse_i32(&record[7])?;
            Ok(Entity::Activity(activity))
        }
        "Milestone" => {
            expect_fields(record, 9)?;
            let mut milestone = Milestone::new(&record[1], parse_date(&record[2])?);
            milestone.color = parse_opt_string(&record[3]);
            milestone.border = parse_opt_string(&record[4]);
            milestone.halign = parse_halign(&record[5])?;
            milestone.valign = parse_valign(&record[6])?;
            milestone.marker_width = parse_opt_f64(&record[7])?;
            milestone.row_offset = parse_i32(&record[8])?;
            Ok(Entity::Milestone(milestone))
        }
        "Functionality" => {
            expect_fields(record, 8)?;
            let mut functionality = Functionality::new(&record[1], parse_date(&record[2])?);
            functionality.arrow_dy = parse_f64(&record[3])?;
            functionality.arrow_length = parse_opt_f64(&record[4])?;
            functionality.color = parse_opt_string(&record[5]);
            functionality.border = parse_opt_string(&record[6]);
            functionality.row_offset = parse_i32(&record[7])?;
            Ok(Entity::Functionality(functionality))
        }
        "AdvanceRow" => {
            expect_fields(record, 2)?;
            Ok(Entity::AdvanceRow(parse_i32(&record[1])?))
        }
        "SetDefaultColor" => {
            expect_fields(record, 3)?;
            Ok(Entity::SetDefaultColor {
                color: parse_opt_string(&record[1]),
                border: parse_opt_string(&record[2]),
            })
        }
        "SetMarkerWidth" => {
            expect_fields(record, 2)?;
            Ok(Entity::SetMarkerWidth(parse_f64(&record[1])?))
        }
        "SetArrowLength" => {
            expect_fields(record, 2)?;
            Ok(Entity::SetArrowLength(parse_f64(&record[1])?))
        }
        other => Err(PersistenceError::Format(format!(
            "unrecognized type tag '{other}'"
        ))),
    }
}

#[derive(Serialize, Deserialize)]
struct TimelineSnapshot {
    groups: Vec<Vec<Entity>>,
}

pub fn save_timeline_to_json<P: AsRef<Path>>(
    timeline: &Timeline,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = TimelineSnapshot {
        groups: timeline.groups().to_vec(),
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_timeline_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Timeline> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            PersistenceError::NotFound(path.to_path_buf())
        } else {
            PersistenceError::Io(err)
        }
    })?;
    let snapshot: TimelineSnapshot = serde_json::from_reader(file)?;
    Ok(Timeline::from(snapshot.groups))
}

fn expect_fields(record: &StringRecord, expected: usize) -> PersistenceResult<()> {
    if record.len() != expected {
        return Err(PersistenceError::Format(format!(
            "{} record has {} fields, expected {}",
            &record[0],
            record.len(),
            expected
        )));
    }
    Ok(())
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|err| PersistenceError::Format(format!("invalid date '{input}': {err}")))
}

fn parse_i32(input: &str) -> PersistenceResult<i32> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|err| PersistenceError::Format(format!("invalid integer '{input}': {err}")))
}

fn parse_f64(input: &str) -> PersistenceResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|err| PersistenceError::Format(format!("invalid number '{input}': {err}")))
}

fn parse_opt_f64(input: &str) -> PersistenceResult<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_f64(input).map(Some)
}

// An empty field reads back as None, which style resolution treats as
// "use the shared default".
fn parse_opt_string(input: &str) -> Option<String> {
    if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

fn parse_halign(input: &str) -> PersistenceResult<HorizontalAlign> {
    HorizontalAlign::from_str(input.trim()).ok_or_else(|| {
        PersistenceError::Format(format!("invalid horizontal alignment '{input}'"))
    })
}

fn parse_valign(input: &str) -> PersistenceResult<VerticalAlign> {
    VerticalAlign::from_str(input.trim())
        .ok_or_else(|| PersistenceError::Format(format!("invalid vertical alignment '{input}'")))
}
