use std::env;
use std::error::Error;
use std::fs;

use chrono::NaiveDate;
use timeline_tool::{
    load_timeline_from_csv, planning, render, save_timeline_to_csv, RenderOptions, SvgSurface,
};

const USAGE: &str = "\
Usage: cli [OPTIONS] [OUTPUT.svg]

Render a timeline chart as SVG (default output: timeline.svg).

Options:
  --milestones          include the milestone/functionality groups
  --window START END    visible date window, ISO dates (default 2021-01-01 2023-06-30)
  --load FILE.csv       render a saved timeline instead of the built-in plan
  --export FILE.csv     also write the rendered timeline in the record format
  --no-today            omit the dashed current-date marker
  -h, --help            show this message
";

fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn Error>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{s}': {err}").into())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut output = String::from("timeline.svg");
    let mut include_milestones = false;
    let mut window_start = parse_date("2021-01-01")?;
    let mut window_end = parse_date("2023-06-30")?;
    let mut show_today = true;
    let mut load: Option<String> = None;
    let mut export: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--milestones" => include_milestones = true,
            "--no-today" => show_today = false,
            "--window" => {
                let start = args.next().ok_or("--window requires START and END")?;
                let end = args.next().ok_or("--window requires START and END")?;
                window_start = parse_date(&start)?;
                window_end = parse_date(&end)?;
            }
            "--load" => load = Some(args.next().ok_or("--load requires a file")?),
            "--export" => export = Some(args.next().ok_or("--export requires a file")?),
            "-h" | "--help" => {
                print!("{USAGE}");
                return Ok(());
            }
            other if !other.starts_with('-') => output = other.to_string(),
            other => return Err(format!("unknown option '{other}'\n\n{USAGE}").into()),
        }
    }

    let timeline = match &load {
        Some(path) => load_timeline_from_csv(path)?,
        None => planning::commissioning_plan(include_milestones),
    };

    let mut options = RenderOptions::new(window_start, window_end);
    options.show_today = show_today;

    let mut surface = SvgSurface::new();
    render(&timeline, &options, &mut surface);
    fs::write(&output, surface.finish())?;
    println!("wrote {output}");

    if let Some(path) = export {
        save_timeline_to_csv(&timeline, &path)?;
        println!("exported {path}");
    }

    Ok(())
}
