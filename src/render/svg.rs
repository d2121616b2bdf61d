//! SVG drawing backend for the timeline renderer.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate};

use super::surface::{day_number, DrawOp, RecordingSurface, Surface, TextAnchor};

const MARGIN: f64 = 12.0;
const AXIS_BAND: f64 = 28.0;
const GRID_COLOR: &str = "#cccccc";
const AXIS_FONT_SIZE: f64 = 8.0;

/// Buffers the engine's drawing calls and lays them out as an SVG document
/// when finished. X is scaled from days, y from row-height units, with the
/// y axis flipped so higher rows sit higher on the page.
pub struct SvgSurface {
    recorder: RecordingSurface,
    px_per_day: f64,
    px_per_unit: f64,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::with_scale(3.0, 180.0)
    }

    pub fn with_scale(px_per_day: f64, px_per_unit: f64) -> Self {
        Self {
            recorder: RecordingSurface::new(),
            px_per_day,
            px_per_unit,
        }
    }

    pub fn finish(self) -> String {
        let Self {
            recorder,
            px_per_day,
            px_per_unit,
        } = self;
        let ops = recorder.ops;
        let bounds = Bounds::of(&ops);

        let plot_width = (bounds.max_x - bounds.min_x) * px_per_day;
        let plot_height = (bounds.max_y - bounds.min_y) * px_per_unit;
        let width = plot_width + 2.0 * MARGIN;
        let height = plot_height + 2.0 * MARGIN + AXIS_BAND;

        let tx = |x: f64| (x - bounds.min_x) * px_per_day + MARGIN;
        let ty = |y: f64| (bounds.max_y - y) * px_per_unit + MARGIN;

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.2} {height:.2}">"#
        )
        .unwrap();
        writeln!(
            svg,
            r#"  <rect x="0" y="0" width="{width:.2}" height="{height:.2}" fill="white"/>"#
        )
        .unwrap();

        // Grid and reference lines go underneath the shapes.
        for op in &ops {
            if let DrawOp::Decorate {
                window_start,
                window_end,
            } = op
            {
                emit_grid(&mut svg, *window_start, *window_end, &tx, height);
            }
        }
        for op in &ops {
            if let DrawOp::VLine { x, color, alpha } = op {
                writeln!(
                    svg,
                    r#"  <line x1="{0:.2}" y1="{1:.2}" x2="{0:.2}" y2="{2:.2}" stroke="{3}" stroke-opacity="{4}" stroke-dasharray="4,3"/>"#,
                    tx(*x),
                    MARGIN,
                    height - MARGIN - AXIS_BAND,
                    escape_xml(color),
                    alpha
                )
                .unwrap();
            }
        }

        for op in &ops {
            match op {
                DrawOp::FillPolygon {
                    xs,
                    ys,
                    color,
                    alpha,
                } => {
                    writeln!(
                        svg,
                        r#"  <polygon points="{}" fill="{}" fill-opacity="{}" stroke="none"/>"#,
                        points(xs, ys, &tx, &ty),
                        escape_xml(color),
                        alpha
                    )
                    .unwrap();
                }
                DrawOp::Polyline { xs, ys, color } => {
                    writeln!(
                        svg,
                        r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
                        points(xs, ys, &tx, &ty),
                        escape_xml(color)
                    )
                    .unwrap();
                }
                DrawOp::Text {
                    x,
                    y,
                    text,
                    anchor,
                    fontsize,
                } => {
                    emit_text(&mut svg, tx(*x), ty(*y), text, *anchor, *fontsize);
                }
                DrawOp::Arrow {
                    x,
                    y,
                    dx,
                    head_length,
                    head_width,
                    color,
                } => {
                    // The head counts toward the total length.
                    let tip_x = x + dx;
                    let base_x = tip_x - head_length;
                    writeln!(
                        svg,
                        r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
                        tx(*x),
                        ty(*y),
                        tx(base_x),
                        ty(*y),
                        escape_xml(color)
                    )
                    .unwrap();
                    let head_xs = [tip_x, base_x, base_x, tip_x];
                    let head_ys = [*y, y + 0.5 * head_width, y - 0.5 * head_width, *y];
                    writeln!(
                        svg,
                        r#"  <polygon points="{}" fill="{}" stroke="none"/>"#,
                        points(&head_xs, &head_ys, &tx, &ty),
                        escape_xml(color)
                    )
                    .unwrap();
                }
                DrawOp::VLine { .. } | DrawOp::Decorate { .. } => {}
            }
        }

        writeln!(svg, "</svg>").unwrap();
        svg
    }

}

fn emit_grid(
    svg: &mut String,
    window_start: NaiveDate,
    window_end: NaiveDate,
    tx: &dyn Fn(f64) -> f64,
    height: f64,
) {
    let y1 = MARGIN;
    let y2 = height - MARGIN - AXIS_BAND;
    for month in month_starts(window_start, window_end) {
        let x = tx(day_number(month));
        writeln!(
            svg,
            r#"  <line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="{GRID_COLOR}" stroke-width="1"/>"#
        )
        .unwrap();
        writeln!(
            svg,
            r#"  <text x="{x:.2}" y="{:.2}" text-anchor="middle" font-size="{AXIS_FONT_SIZE}">{}</text>"#,
            y2 + 14.0,
            month.format("%Y-%m")
        )
        .unwrap();
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for SvgSurface {
    fn fill_polygon(&mut self, xs: &[f64], ys: &[f64], color: &str, alpha: f64) {
        self.recorder.fill_polygon(xs, ys, color, alpha);
    }

    fn polyline(&mut self, xs: &[f64], ys: &[f64], color: &str) {
        self.recorder.polyline(xs, ys, color);
    }

    fn text(&mut self, x: f64, y: f64, text: &str, anchor: TextAnchor, fontsize: f64) {
        self.recorder.text(x, y, text, anchor, fontsize);
    }

    fn arrow(&mut self, x: f64, y: f64, dx: f64, head_length: f64, head_width: f64, color: &str) {
        self.recorder.arrow(x, y, dx, head_length, head_width, color);
    }

    fn vline(&mut self, x: f64, color: &str, alpha: f64) {
        self.recorder.vline(x, color, alpha);
    }

    fn decorate(&mut self, window_start: NaiveDate, window_end: NaiveDate) {
        self.recorder.decorate(window_start, window_end);
    }
}

struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn of(ops: &[DrawOp]) -> Self {
        let mut bounds = Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
        };
        for op in ops {
            match op {
                DrawOp::FillPolygon { xs, ys, .. } | DrawOp::Polyline { xs, ys, .. } => {
                    for &x in xs {
                        bounds.expand_x(x);
                    }
                    for &y in ys {
                        bounds.expand_y(y);
                    }
                }
                DrawOp::Text { x, y, .. } => {
                    bounds.expand_x(*x);
                    bounds.expand_y(*y);
                }
                DrawOp::Arrow {
                    x, y, dx, head_width, ..
                } => {
                    bounds.expand_x(*x);
                    bounds.expand_x(x + dx);
                    bounds.expand_y(y - 0.5 * head_width);
                    bounds.expand_y(y + 0.5 * head_width);
                }
                DrawOp::VLine { x, .. } => bounds.expand_x(*x),
                DrawOp::Decorate {
                    window_start,
                    window_end,
                } => {
                    bounds.expand_x(day_number(*window_start));
                    bounds.expand_x(day_number(*window_end));
                }
            }
        }
        if bounds.min_x > bounds.max_x {
            bounds.min_x = 0.0;
            bounds.max_x = 1.0;
        }
        if bounds.min_y > bounds.max_y {
            bounds.min_y = 0.0;
            bounds.max_y = 0.2;
        }
        bounds
    }

    fn expand_x(&mut self, x: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
    }

    fn expand_y(&mut self, y: f64) {
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }
}

fn points(xs: &[f64], ys: &[f64], tx: &dyn Fn(f64) -> f64, ty: &dyn Fn(f64) -> f64) -> String {
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| format!("{:.2},{:.2}", tx(x), ty(y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn emit_text(svg: &mut String, x: f64, y: f64, text: &str, anchor: TextAnchor, fontsize: f64) {
    let anchor = match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let lines: Vec<&str> = text.lines().collect();
    let line_height = fontsize * 1.2;
    let first_y = y - 0.5 * line_height * (lines.len().saturating_sub(1) as f64);

    writeln!(
        svg,
        r#"  <text text-anchor="{anchor}" dominant-baseline="middle" font-size="{fontsize:.1}">"#
    )
    .unwrap();
    for (i, line) in lines.iter().enumerate() {
        writeln!(
            svg,
            r#"    <tspan x="{x:.2}" y="{:.2}">{}</tspan>"#,
            first_y + line_height * i as f64,
            escape_xml(line)
        )
        .unwrap();
    }
    writeln!(svg, "  </text>").unwrap();
}

fn month_starts(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    if start.day() > 1 {
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    while let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
        if date > end {
            break;
        }
        dates.push(date);
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    dates
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_starts_from_mid_month() {
        let months = month_starts(d(2021, 11, 15), d(2022, 2, 10));
        assert_eq!(months, vec![d(2021, 12, 1), d(2022, 1, 1), d(2022, 2, 1)]);
    }

    #[test]
    fn month_starts_includes_first_of_month_window_start() {
        let months = month_starts(d(2021, 3, 1), d(2021, 4, 30));
        assert_eq!(months, vec![d(2021, 3, 1), d(2021, 4, 1)]);
    }

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
