use chrono::NaiveDate;

/// Horizontal anchoring of a text run at its placement point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// The drawing primitives the layout engine emits. X coordinates are
/// fractional days since the Unix epoch, y coordinates are in row-height
/// units with larger values further up.
pub trait Surface {
    fn fill_polygon(&mut self, xs: &[f64], ys: &[f64], color: &str, alpha: f64);
    fn polyline(&mut self, xs: &[f64], ys: &[f64], color: &str);
    fn text(&mut self, x: f64, y: f64, text: &str, anchor: TextAnchor, fontsize: f64);
    fn arrow(&mut self, x: f64, y: f64, dx: f64, head_length: f64, head_width: f64, color: &str);
    /// Dashed full-height reference line (the "today" marker).
    fn vline(&mut self, x: f64, color: &str, alpha: f64);
    /// Axis cosmetics: time grid and date labels over the visible window.
    fn decorate(&mut self, window_start: NaiveDate, window_end: NaiveDate);
}

/// Day number of a date on the surface's x axis.
pub fn day_number(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (date - epoch).num_days() as f64
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillPolygon {
        xs: Vec<f64>,
        ys: Vec<f64>,
        color: String,
        alpha: f64,
    },
    Polyline {
        xs: Vec<f64>,
        ys: Vec<f64>,
        color: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: TextAnchor,
        fontsize: f64,
    },
    Arrow {
        x: f64,
        y: f64,
        dx: f64,
        head_length: f64,
        head_width: f64,
        color: String,
    },
    VLine {
        x: f64,
        color: String,
        alpha: f64,
    },
    Decorate {
        window_start: NaiveDate,
        window_end: NaiveDate,
    },
}

/// A surface that records every call, for asserting on the exact drawing
/// sequence in tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shape-producing calls, cosmetics excluded.
    pub fn shape_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !matches!(op, DrawOp::VLine { .. } | DrawOp::Decorate { .. }))
            .count()
    }

    pub fn fills(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillPolygon { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_polygon(&mut self, xs: &[f64], ys: &[f64], color: &str, alpha: f64) {
        self.ops.push(DrawOp::FillPolygon {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            color: color.to_string(),
            alpha,
        });
    }

    fn polyline(&mut self, xs: &[f64], ys: &[f64], color: &str) {
        self.ops.push(DrawOp::Polyline {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            color: color.to_string(),
        });
    }

    fn text(&mut self, x: f64, y: f64, text: &str, anchor: TextAnchor, fontsize: f64) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            anchor,
            fontsize,
        });
    }

    fn arrow(&mut self, x: f64, y: f64, dx: f64, head_length: f64, head_width: f64, color: &str) {
        self.ops.push(DrawOp::Arrow {
            x,
            y,
            dx,
            head_length,
            head_width,
            color: color.to_string(),
        });
    }

    fn vline(&mut self, x: f64, color: &str, alpha: f64) {
        self.ops.push(DrawOp::VLine {
            x,
            color: color.to_string(),
            alpha,
        });
    }

    fn decorate(&mut self, window_start: NaiveDate, window_end: NaiveDate) {
        self.ops.push(DrawOp::Decorate {
            window_start,
            window_end,
        });
    }
}
