//! Minimal SVG line charts

use crate::error::{Error, Result};
use chrono::DateTime;
use std::path::Path;
use svg::Document;
use svg::node::Text as TextNode;
use svg::node::element::{Group, Line, Polyline, Rectangle, Text};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TICKS: usize = 5;
const COLORS: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"];

/// How tick values along an axis are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisFormat {
    #[default]
    Number,
    /// Values are seconds since the epoch
    Date,
}

impl AxisFormat {
    #[allow(clippy::cast_possible_truncation)]
    fn label(self, value: f64) -> String {
        match self {
            Self::Number => format!("{}", value.round()),
            Self::Date => DateTime::from_timestamp(value.round() as i64, 0)
                .map_or_else(String::new, |dt| dt.format("%Y-%m-%d").to_string()),
        }
    }
}

/// One named line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChart {
    pub x_label: String,
    pub y_label: String,
    pub x_format: AxisFormat,
    pub series: Vec<Series>,
    pub legend: bool,
}

/// Data bounds, widened so that neither axis has zero length
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    fn of(series: &[Series]) -> Self {
        let mut points = series.iter().flat_map(|s| s.points.iter().copied());
        let Some((x, y)) = points.next() else {
            return Self {
                x_min: 0.0,
                x_max: 1.0,
                y_min: 0.0,
                y_max: 1.0,
            };
        };

        let mut bounds = Self {
            x_min: x,
            x_max: x,
            y_min: y.min(0.0),
            y_max: y,
        };
        for (x, y) in points {
            bounds.x_min = bounds.x_min.min(x);
            bounds.x_max = bounds.x_max.max(x);
            bounds.y_min = bounds.y_min.min(y);
            bounds.y_max = bounds.y_max.max(y);
        }
        if bounds.x_max <= bounds.x_min {
            bounds.x_max = bounds.x_min + 1.0;
        }
        if bounds.y_max <= bounds.y_min {
            bounds.y_max = bounds.y_min + 1.0;
        }
        bounds
    }

    fn to_screen(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        (
            MARGIN_LEFT + (x - self.x_min) / (self.x_max - self.x_min) * plot_width,
            HEIGHT - MARGIN_BOTTOM - (y - self.y_min) / (self.y_max - self.y_min) * plot_height,
        )
    }
}

impl LineChart {
    #[must_use]
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_x_format(mut self, format: AxisFormat) -> Self {
        self.x_format = format;
        self
    }

    #[must_use]
    pub const fn with_legend(mut self) -> Self {
        self.legend = true;
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Render the chart; an empty chart still gets its axes
    #[must_use]
    pub fn to_document(&self) -> Document {
        let bounds = Bounds::of(&self.series);

        let mut document = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("version", "1.1")
            .set("width", WIDTH)
            .set("height", HEIGHT)
            .set("viewBox", format!("0 0 {WIDTH} {HEIGHT}"))
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", "white"),
            )
            .add(self.axes(&bounds));

        for (idx, series) in self.series.iter().enumerate() {
            let points = series
                .points
                .iter()
                .map(|&p| {
                    let (x, y) = bounds.to_screen(p);
                    format!("{x:.2},{y:.2}")
                })
                .collect::<Vec<_>>()
                .join(" ");
            document = document.add(
                Polyline::new()
                    .set("points", points)
                    .set("fill", "none")
                    .set("stroke", COLORS[idx % COLORS.len()])
                    .set("stroke-width", 1.5),
            );
        }

        if self.legend {
            document = document.add(self.legend_group());
        }
        document
    }

    /// Write the chart to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        svg::save(path, &self.to_document()).map_err(|e| Error::io(path, e))
    }

    #[allow(clippy::cast_precision_loss)]
    fn axes(&self, bounds: &Bounds) -> Group {
        let (left, bottom) = (MARGIN_LEFT, HEIGHT - MARGIN_BOTTOM);
        let (right, top) = (WIDTH - MARGIN_RIGHT, MARGIN_TOP);

        let mut group = Group::new()
            .set("stroke", "black")
            .set("font-family", "sans-serif")
            .set("font-size", 11)
            .add(line(left, bottom, right, bottom))
            .add(line(left, bottom, left, top));

        for tick in 0..=TICKS {
            let fraction = tick as f64 / TICKS as f64;

            let x_value = (bounds.x_max - bounds.x_min).mul_add(fraction, bounds.x_min);
            let (x, _) = bounds.to_screen((x_value, bounds.y_min));
            group = group
                .add(line(x, bottom, x, bottom + 5.0))
                .add(label(x, bottom + 18.0, "middle", self.x_format.label(x_value)));

            let y_value = (bounds.y_max - bounds.y_min).mul_add(fraction, bounds.y_min);
            let (_, y) = bounds.to_screen((bounds.x_min, y_value));
            group = group
                .add(line(left - 5.0, y, left, y))
                .add(label(left - 8.0, y + 4.0, "end", AxisFormat::Number.label(y_value)));
        }

        group
            .add(label(
                (left + right) / 2.0,
                HEIGHT - 20.0,
                "middle",
                self.x_label.clone(),
            ))
            .add(
                label(0.0, 0.0, "middle", self.y_label.clone()).set(
                    "transform",
                    format!("translate(16 {}) rotate(-90)", (top + bottom) / 2.0),
                ),
            )
    }

    #[allow(clippy::cast_precision_loss)]
    fn legend_group(&self) -> Group {
        let mut group = Group::new()
            .set("font-family", "sans-serif")
            .set("font-size", 12);

        for (idx, series) in self.series.iter().enumerate() {
            let y = MARGIN_TOP + 15.0 + 18.0 * idx as f64;
            let x = MARGIN_LEFT + 15.0;
            group = group
                .add(
                    line(x, y - 4.0, x + 25.0, y - 4.0)
                        .set("stroke", COLORS[idx % COLORS.len()])
                        .set("stroke-width", 2),
                )
                .add(label(x + 32.0, y, "start", series.label.clone()));
        }
        group
    }
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
}

fn label(x: f64, y: f64, anchor: &str, content: String) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("stroke", "none")
        .set("text-anchor", anchor)
        .add(TextNode::new(content))
}
