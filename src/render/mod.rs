pub mod surface;
pub mod svg;

pub use surface::{day_number, DrawOp, RecordingSurface, Surface, TextAnchor};
pub use svg::SvgSurface;

use chrono::{Local, NaiveDate};
use log::debug;

use crate::entity::Entity;
use crate::timeline::Timeline;

/// Fill color used when neither the entity nor the shared default names one.
pub const FALLBACK_COLOR: &str = "steelblue";

const DEFAULT_MARKER_WIDTH: f64 = 2.0;
const DEFAULT_ARROW_LENGTH: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub row_height: f64,
    pub fontsize: f64,
    pub show_today: bool,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    /// Horizontal render width in points, for the label wrap heuristic.
    pub width_points: f64,
}

impl RenderOptions {
    pub fn new(window_start: NaiveDate, window_end: NaiveDate) -> Self {
        Self {
            row_height: 0.1,
            fontsize: 7.0,
            show_today: true,
            window_start,
            window_end,
            width_points: 576.0,
        }
    }
}

/// Shared state of one rendering pass: the current style defaults and the
/// row counter. Built fresh per `render` call so nothing leaks between
/// invocations; within a pass, manipulations accumulate across groups in
/// input order.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub color: Option<String>,
    pub border: Option<String>,
    pub marker_width: f64,
    pub arrow_length: f64,
    pub row: i32,
    pub row_height: f64,
    pub fontsize: f64,
    pub total_duration_days: f64,
    pub width_points: f64,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

impl RenderContext {
    fn new(options: &RenderOptions, total_duration_days: f64) -> Self {
        Self {
            color: None,
            border: None,
            marker_width: DEFAULT_MARKER_WIDTH,
            arrow_length: DEFAULT_ARROW_LENGTH,
            row: 0,
            row_height: options.row_height,
            fontsize: options.fontsize,
            total_duration_days,
            width_points: options.width_points,
            window_start: options.window_start,
            window_end: options.window_end,
        }
    }
}

/// Lay out and draw a timeline onto a surface.
///
/// Groups stack downward, one row per group that produced visible output;
/// a group whose entities are all clipped out does not consume a row.
pub fn render(timeline: &Timeline, options: &RenderOptions, surface: &mut dyn Surface) {
    let total_duration_days =
        total_visible_days(timeline, options.window_start, options.window_end);
    debug!(
        "rendering {} groups over {total_duration_days} visible days",
        timeline.groups().len()
    );

    let mut ctx = RenderContext::new(options, total_duration_days);

    for group in timeline.groups() {
        let mut drawn = 0;
        for entity in group {
            match entity {
                Entity::Activity(a) => drawn += a.draw(surface, &ctx),
                Entity::Milestone(m) => drawn += m.draw(surface, &ctx),
                Entity::Functionality(f) => drawn += f.draw(surface, &ctx),
                Entity::AdvanceRow(delta) => ctx.row -= delta,
                Entity::SetDefaultColor { color, border } => {
                    ctx.color = color.clone();
                    ctx.border = border.clone();
                }
                Entity::SetMarkerWidth(width) => ctx.marker_width = *width,
                Entity::SetArrowLength(length) => ctx.arrow_length = *length,
            }
        }
        if drawn > 0 {
            ctx.row -= 1;
        }
    }

    if options.show_today {
        let today = Local::now().date_naive();
        if today >= options.window_start {
            surface.vline(day_number(today), "black", 0.5);
        }
    }

    surface.decorate(options.window_start, options.window_end);
}

/// Union-bounding span, in days, of every drawable entity's clipped
/// interval. Zero when nothing is visible.
fn total_visible_days(timeline: &Timeline, window_start: NaiveDate, window_end: NaiveDate) -> f64 {
    let mut date_min: Option<NaiveDate> = None;
    let mut date_max: Option<NaiveDate> = None;

    for group in timeline.groups() {
        for entity in group {
            let span = match entity {
                Entity::Activity(a) => a.visible_span(window_start, window_end),
                Entity::Milestone(m) => m.visible_span(window_start, window_end),
                Entity::Functionality(f) => f.visible_span(window_start, window_end),
                _ => None,
            };
            if let Some((t0, t1)) = span {
                date_min = Some(date_min.map_or(t0, |d| d.min(t0)));
                date_max = Some(date_max.map_or(t1, |d| d.max(t1)));
            }
        }
    }

    match (date_min, date_max) {
        (Some(min), Some(max)) => (max - min).num_days() as f64,
        _ => 0.0,
    }
}
