//! Typed Matplotlib calls.  A [`Plot`][crate::Plot] never talks to
//! Python directly: it translates its settings into [`Command`]s and
//! hands them to a [`Backend`][crate::Backend].

use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use crate::style::{LineStyle, Marker, MarkerSize, Norm, Paint};

/// One of the axes of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis { X, Y, Z }

impl Axis {
    /// Matplotlib's name for the axis ("x", "y" or "z").
    pub fn name(self) -> &'static str {
        match self { Axis::X => "x", Axis::Y => "y", Axis::Z => "z" }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Font sizes (in points) of the text elements of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSize {
    /// Legend entries and legend title.
    pub legend: f64,
    /// Axes titles.
    pub title: f64,
    /// Axis labels and tick labels.
    pub label: f64,
}

impl Default for TextSize {
    fn default() -> Self {
        TextSize { legend: 10., title: 10., label: 10. }
    }
}

/// Legend entry and overlay order shared by all drawn series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub order: i32,
}

/// Error bar appearance, forwarded to `errorbar`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBars {
    /// Line width of the error bars (`elinewidth`); Matplotlib's
    /// default when `None`.
    pub width: Option<f64>,
    /// Draw an error bar every `interval` points (`errorevery`).
    pub interval: usize,
    /// Length of the error bar caps (`capsize`).
    pub cap: f64,
}

impl Default for ErrorBars {
    fn default() -> Self {
        ErrorBars { width: None, interval: 1, cap: 1. }
    }
}

/// A single call on the Matplotlib figure or axes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create the figure and its (2D or 3D) axes.
    Figure { size: (f64, f64), text: TextSize, dimensions: u8 },
    /// `ax.scatter(x, y[, z], ...)`
    Scatter {
        x: Vec<f64>, y: Vec<f64>, z: Option<Vec<f64>>,
        series: Series,
        marker: Option<Marker>,
        size: MarkerSize,
        paint: Paint,
    },
    /// `ax.plot(x, y[, z], ...)`
    Line {
        x: Vec<f64>, y: Vec<f64>, z: Option<Vec<f64>>,
        series: Series,
        marker: Option<Marker>,
        marker_size: f64,
        style: LineStyle,
        width: f64,
        paint: Paint,
    },
    /// `ax.errorbar(x, y, xerr=, yerr=, ...)`
    ErrorBar {
        x: Vec<f64>, y: Vec<f64>,
        xerr: Option<Vec<f64>>, yerr: Option<Vec<f64>>,
        series: Series,
        marker: Option<Marker>,
        marker_size: f64,
        style: LineStyle,
        width: f64,
        bars: ErrorBars,
        paint: Paint,
    },
    /// `ax.fill_between(x, y1=lower, y2=upper, ...)`
    ErrorShade {
        x: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>,
        series: Series,
        paint: Paint,
    },
    /// `ax.bar(x, height, width=, ...)`
    Bar {
        x: Vec<f64>, height: Vec<f64>,
        width: f64,
        xerr: Option<Vec<f64>>, yerr: Option<Vec<f64>>,
        series: Series,
        /// Overlay order of the error bars.
        error_order: i32,
        paint: Paint,
    },
    /// `ax.imshow(z, origin="lower", aspect="auto", extent=, ...)`
    Heat {
        z: Array2<f64>,
        extent: [f64; 4],
        map: String,
        norm: Norm,
        interpolation: Option<String>,
    },
    /// `ax.contour(x, y, z, levels=, ...)`
    Contour {
        x: Array2<f64>, y: Array2<f64>, z: Array2<f64>,
        levels: Vec<f64>,
        map: String,
        norm: Norm,
        width: f64,
        style: LineStyle,
    },
    Label { axis: Axis, label: String },
    Limits { axis: Axis, lower: f64, upper: f64 },
    /// Major and minor tick spacing (`MultipleLocator`).
    Ticks { axis: Axis, major: f64, minor: f64 },
    LogScale { axis: Axis },
    Legend {
        title: Option<String>,
        columns: usize,
        anchor: Option<(f64, f64)>,
        reverse: bool,
    },
    /// Show the figure, then release it.
    Show,
    /// `fig.savefig(path, dpi=, bbox_inches="tight")`
    Save { path: PathBuf, dpi: f64 },
}

impl Command {
    /// Short name of the Matplotlib call, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Figure { .. } => "figure",
            Command::Scatter { .. } => "scatter",
            Command::Line { .. } => "plot",
            Command::ErrorBar { .. } => "errorbar",
            Command::ErrorShade { .. } => "fill_between",
            Command::Bar { .. } => "bar",
            Command::Heat { .. } => "imshow",
            Command::Contour { .. } => "contour",
            Command::Label { .. } => "set_label",
            Command::Limits { .. } => "set_lim",
            Command::Ticks { .. } => "set_locator",
            Command::LogScale { .. } => "set_scale",
            Command::Legend { .. } => "legend",
            Command::Show => "show",
            Command::Save { .. } => "savefig",
        }
    }

    /// The drawn series, for commands that draw one.
    pub fn series(&self) -> Option<&Series> {
        match self {
            Command::Scatter { series, .. }
            | Command::Line { series, .. }
            | Command::ErrorBar { series, .. }
            | Command::ErrorShade { series, .. }
            | Command::Bar { series, .. } => Some(series),
            _ => None,
        }
    }
}
