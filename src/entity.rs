use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::render::surface::{day_number, Surface, TextAnchor};
use crate::render::RenderContext;

#[derive(Debug, PartialEq)]
pub enum EntityError {
    InvalidArgument(String),
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for EntityError {}

pub type EntityResult<T> = Result<T, EntityError>;

/// Text anchoring side for a milestone label, relative to the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlign {
    Left,
    Right,
}

impl HorizontalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Right => "right",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(HorizontalAlign::Left),
            "right" => Some(HorizontalAlign::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Bottom => "bottom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "top" => Some(VerticalAlign::Top),
            "bottom" => Some(VerticalAlign::Bottom),
            _ => None,
        }
    }
}

/// A time-spanning, drawable bar with a wrapped label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub start: NaiveDate,
    pub duration_days: i64,
    pub color: Option<String>,
    pub border: Option<String>,
    /// Unused when drawing an activity bar; carried for record symmetry
    /// with the milestone kinds.
    pub marker_width: Option<f64>,
    pub row_offset: i32,
}

impl Activity {
    /// An activity lasting a fixed number of days.
    pub fn days(description: impl Into<String>, start: NaiveDate, duration_days: u32) -> Self {
        Self {
            description: description.into(),
            start,
            duration_days: i64::from(duration_days),
            color: None,
            border: None,
            marker_width: None,
            row_offset: 0,
        }
    }

    /// An activity spanning `start..=end`. Fails when `end` precedes `start`.
    pub fn spanning(
        description: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EntityResult<Self> {
        if end < start {
            return Err(EntityError::InvalidArgument(format!(
                "end date {end} precedes start date {start}"
            )));
        }
        let mut activity = Self::days(description, start, 0);
        activity.duration_days = (end - start).num_days();
        Ok(activity)
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(self.duration_days)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_border(mut self, border: impl Into<String>) -> Self {
        self.border = Some(border.into());
        self
    }

    pub fn with_row_offset(mut self, row_offset: i32) -> Self {
        self.row_offset = row_offset;
        self
    }

    /// Intersection of `[start, start + duration]` with the visible window,
    /// or `None` when the activity lies entirely outside it.
    pub fn visible_span(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Option<(NaiveDate, NaiveDate)> {
        let mut t0 = self.start;
        let mut t1 = self.end();

        if t1 < window_start {
            return None;
        }
        if t0 < window_start {
            t0 = window_start;
        }

        if t0 > window_end {
            return None;
        }
        if t1 > window_end {
            t1 = window_end;
        }

        Some((t0, t1))
    }

    pub fn draw(&self, surface: &mut dyn Surface, ctx: &RenderContext) -> usize {
        let Some((t0, t1)) = self.visible_span(ctx.window_start, ctx.window_end) else {
            return 0;
        };

        let fill = self
            .color
            .as_deref()
            .or(ctx.color.as_deref())
            .unwrap_or(crate::render::FALLBACK_COLOR);

        let h = ctx.row_height;
        let y0 = h * 1.1 * f64::from(ctx.row - self.row_offset);
        let x0 = day_number(t0);
        let x1 = day_number(t1);

        let xs = [x0, x1, x1, x0, x0];
        let ys = [y0, y0, y0 + h, y0 + h, y0];
        surface.fill_polygon(&xs, &ys, fill, 0.5);

        // The outline is drawn in the fill color unless a border color is
        // set, either on this activity or as the shared default.
        let outline = self.border.as_deref().or(ctx.border.as_deref()).unwrap_or(fill);
        surface.polyline(&xs, &ys, outline);

        let width = label_wrap_width(self.duration_days as f64, ctx);
        surface.text(
            0.5 * (x0 + x1),
            y0 + 0.5 * h,
            &wrap_label(&self.description, width),
            TextAnchor::Middle,
            ctx.fontsize,
        );

        1
    }
}

/// A zero-duration diamond marker at a single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub description: String,
    pub date: NaiveDate,
    pub color: Option<String>,
    pub border: Option<String>,
    pub halign: HorizontalAlign,
    pub valign: VerticalAlign,
    /// Half-width of the diamond in days; `None` uses the shared default.
    pub marker_width: Option<f64>,
    pub row_offset: i32,
}

impl Milestone {
    pub fn new(description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            date,
            color: None,
            border: None,
            halign: HorizontalAlign::Right,
            valign: VerticalAlign::Top,
            marker_width: None,
            row_offset: 0,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_border(mut self, border: impl Into<String>) -> Self {
        self.border = Some(border.into());
        self
    }

    pub fn with_halign(mut self, halign: HorizontalAlign) -> Self {
        self.halign = halign;
        self
    }

    pub fn with_valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn with_marker_width(mut self, marker_width: f64) -> Self {
        self.marker_width = Some(marker_width);
        self
    }

    pub fn with_row_offset(mut self, row_offset: i32) -> Self {
        self.row_offset = row_offset;
        self
    }

    /// A milestone is visible exactly when its date falls inside the window;
    /// both window boundaries count as inside.
    pub fn visible_span(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Option<(NaiveDate, NaiveDate)> {
        if self.date < window_start || self.date > window_end {
            return None;
        }
        Some((self.date, self.date))
    }

    pub fn draw(&self, surface: &mut dyn Surface, ctx: &RenderContext) -> usize {
        if self.visible_span(ctx.window_start, ctx.window_end).is_none() {
            return 0;
        }
        let marker_width = self.marker_width.unwrap_or(ctx.marker_width);
        draw_marker(
            surface,
            ctx,
            &self.description,
            self.date,
            marker_width,
            self.color.as_deref(),
            self.halign,
            self.valign,
            self.row_offset,
        );
        1
    }
}

/// A delivered piece of functionality: a milestone with a degenerate marker
/// and a horizontal delivery arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Functionality {
    pub description: String,
    pub date: NaiveDate,
    /// Fractional row offset applied to the arrow's vertical placement.
    pub arrow_dy: f64,
    /// Arrow length in days; `None` uses the shared default.
    pub arrow_length: Option<f64>,
    pub color: Option<String>,
    pub border: Option<String>,
    pub halign: HorizontalAlign,
    pub valign: VerticalAlign,
    pub row_offset: i32,
}

impl Functionality {
    pub fn new(description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            date,
            arrow_dy: 0.0,
            arrow_length: None,
            color: None,
            border: None,
            halign: HorizontalAlign::Right,
            valign: VerticalAlign::Top,
            row_offset: 0,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_arrow_dy(mut self, arrow_dy: f64) -> Self {
        self.arrow_dy = arrow_dy;
        self
    }

    pub fn with_arrow_length(mut self, arrow_length: f64) -> Self {
        self.arrow_length = Some(arrow_length);
        self
    }

    pub fn with_valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn with_row_offset(mut self, row_offset: i32) -> Self {
        self.row_offset = row_offset;
        self
    }

    pub fn visible_span(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Option<(NaiveDate, NaiveDate)> {
        if self.date < window_start || self.date > window_end {
            return None;
        }
        Some((self.date, self.date))
    }

    pub fn draw(&self, surface: &mut dyn Surface, ctx: &RenderContext) -> usize {
        if self.visible_span(ctx.window_start, ctx.window_end).is_none() {
            return 0;
        }

        // Zero marker width: the diamond collapses to a point and only the
        // label remains of the milestone rendering.
        draw_marker(
            surface,
            ctx,
            &self.description,
            self.date,
            0.0,
            self.color.as_deref(),
            self.halign,
            self.valign,
            self.row_offset,
        );

        let color = self
            .color
            .as_deref()
            .or(ctx.color.as_deref())
            .unwrap_or(crate::render::FALLBACK_COLOR);
        let h = ctx.row_height;
        let y0 = h * 1.1 * f64::from(ctx.row - self.row_offset);
        let dx = self.arrow_length.unwrap_or(ctx.arrow_length);

        surface.arrow(
            day_number(self.date),
            y0 + (0.5 + self.arrow_dy) * h,
            dx,
            0.15 * dx,
            0.2 * h,
            color,
        );

        1
    }
}

fn draw_marker(
    surface: &mut dyn Surface,
    ctx: &RenderContext,
    description: &str,
    date: NaiveDate,
    marker_width: f64,
    color: Option<&str>,
    halign: HorizontalAlign,
    valign: VerticalAlign,
    row_offset: i32,
) {
    let fill = color
        .or(ctx.color.as_deref())
        .unwrap_or(crate::render::FALLBACK_COLOR);

    let h = ctx.row_height;
    let y0 = h * 1.1 * f64::from(ctx.row - row_offset);
    let x0 = day_number(date);

    let xs = [x0, x0 + marker_width, x0, x0 - marker_width, x0];
    let ys = [y0, y0 + 0.5 * h, y0 + h, y0 + 0.5 * h, y0];
    surface.fill_polygon(&xs, &ys, fill, 1.0);

    // The label sits on the far side of the marker from its anchor, so a
    // right-aligned label is anchored at its start.
    let (dx, anchor) = match halign {
        HorizontalAlign::Right => (0.5 * marker_width, TextAnchor::Start),
        HorizontalAlign::Left => (-0.5 * marker_width, TextAnchor::End),
    };
    let ty = match valign {
        VerticalAlign::Top => y0 + 0.9 * h,
        VerticalAlign::Bottom => y0 + 0.1 * h,
    };
    surface.text(x0 + dx, ty, description, anchor, ctx.fontsize);
}

/// Wrap width (characters per line) for an activity label, from the font
/// size and the share of the visible span the activity occupies.
fn label_wrap_width(duration_days: f64, ctx: &RenderContext) -> usize {
    if ctx.fontsize <= 0.0 {
        return 10;
    }
    let fiddle_factor = if ctx.total_duration_days == 0.0 {
        3.0
    } else {
        ctx.width_points / ctx.total_duration_days
    };
    let width = (fiddle_factor * duration_days / ctx.fontsize) as i64 + 1;
    if width <= 0 { 10 } else { width as usize }
}

/// Greedy word fill; words longer than `width` are kept whole.
fn wrap_label(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.len() + 1 + word.len() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

/// One record of a timeline: a drawable shape, or a manipulation that
/// adjusts the shared rendering defaults for everything that follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Activity(Activity),
    Milestone(Milestone),
    Functionality(Functionality),
    /// Shift the row counter for subsequent entities; the delta is
    /// subtracted, so a positive value moves later rows up.
    AdvanceRow(i32),
    /// Set the default fill and border colors. An absent border resets the
    /// default border to none.
    SetDefaultColor {
        color: Option<String>,
        border: Option<String>,
    },
    /// Set the default milestone marker half-width, in days.
    SetMarkerWidth(f64),
    /// Set the default functionality arrow length, in days.
    SetArrowLength(f64),
}

impl Entity {
    /// Canonical field order for the record format, including the leading
    /// type tag.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Entity::Activity(a) => vec![
                "Activity".into(),
                a.description.clone(),
                format_date(a.start),
                format_date(a.end()),
                opt_string(&a.color),
                opt_string(&a.border),
                opt_f64(a.marker_width),
                a.row_offset.to_string(),
            ],
            Entity::Milestone(m) => vec![
                "Milestone".into(),
                m.description.clone(),
                format_date(m.date),
                opt_string(&m.color),
                opt_string(&m.border),
                m.halign.as_str().into(),
                m.valign.as_str().into(),
                opt_f64(m.marker_width),
                m.row_offset.to_string(),
            ],
            Entity::Functionality(f) => vec![
                "Functionality".into(),
                f.description.clone(),
                format_date(f.date),
                f.arrow_dy.to_string(),
                opt_f64(f.arrow_length),
                opt_string(&f.color),
                opt_string(&f.border),
                f.row_offset.to_string(),
            ],
            Entity::AdvanceRow(delta) => vec!["AdvanceRow".into(), delta.to_string()],
            Entity::SetDefaultColor { color, border } => vec![
                "SetDefaultColor".into(),
                opt_string(color),
                opt_string(border),
            ],
            Entity::SetMarkerWidth(width) => {
                vec!["SetMarkerWidth".into(), width.to_string()]
            }
            Entity::SetArrowLength(length) => {
                vec!["SetArrowLength".into(), length.to_string()]
            }
        }
    }
}

impl From<Activity> for Entity {
    fn from(value: Activity) -> Self {
        Entity::Activity(value)
    }
}

impl From<Milestone> for Entity {
    fn from(value: Milestone) -> Self {
        Entity::Milestone(value)
    }
}

impl From<Functionality> for Entity {
    fn from(value: Functionality) -> Self {
        Entity::Functionality(value)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn opt_string(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(total_duration_days: f64, fontsize: f64) -> RenderContext {
        let d = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        RenderContext {
            color: None,
            border: None,
            marker_width: 2.0,
            arrow_length: 10.0,
            row: 0,
            row_height: 0.1,
            fontsize,
            total_duration_days,
            width_points: 576.0,
            window_start: d,
            window_end: d,
        }
    }

    #[test]
    fn wrap_width_uses_fallback_factor_when_no_total_duration() {
        // fiddle = 3, so 3 * 21 / 7 + 1 = 10
        assert_eq!(label_wrap_width(21.0, &ctx(0.0, 7.0)), 10);
    }

    #[test]
    fn wrap_width_scales_with_visible_share() {
        // fiddle = 576 / 96 = 6; 6 * 32 / 8 + 1 = 25
        assert_eq!(label_wrap_width(32.0, &ctx(96.0, 8.0)), 25);
    }

    #[test]
    fn wrap_width_floors_at_ten() {
        assert_eq!(label_wrap_width(0.0, &ctx(0.0, 0.0)), 10);
        // zero duration gives width 1, which is positive and kept
        assert_eq!(label_wrap_width(0.0, &ctx(100.0, 8.0)), 1);
    }

    #[test]
    fn wrap_label_fills_greedily() {
        assert_eq!(wrap_label("aa bb cc dd", 5), "aa bb\ncc dd");
        assert_eq!(wrap_label("one two", 40), "one two");
    }

    #[test]
    fn wrap_label_keeps_long_words_whole() {
        assert_eq!(wrap_label("verylongword ok", 5), "verylongword\nok");
    }
}
