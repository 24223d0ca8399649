//! Data sets: the points to draw and how to draw them.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use ndarray::{Array1, Array2, ArrayView1, ErrorKind, ShapeError, stack};
use serde::{Deserialize, Serialize};
use tracing::warn;
#[cfg(feature = "curve-sampling")]
use curve_sampling::Sampling;
use crate::{
    command::ErrorBars,
    style::{
        ColourInput, LineStyle, Marker, MarkerSize, Norm, Paint,
        AUTO_COLOUR_MAP, DEFAULT_COLOUR_MAP,
    },
    Error,
};

/// How a data set is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    #[default]
    Line,
    Scatter,
    Bar,
    /// Line with symmetric error bars.
    ErrorBar,
    /// Line with a shaded region covering the y errors.
    ErrorShade,
    /// Heat map of a grid.
    Heat,
    /// Contour lines of a grid.
    Contour,
}

impl PlotKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlotKind::Line => "line",
            PlotKind::Scatter => "scatter",
            PlotKind::Bar => "bar",
            PlotKind::ErrorBar => "error_bar",
            PlotKind::ErrorShade => "error_shade",
            PlotKind::Heat => "heat",
            PlotKind::Contour => "contour",
        }
    }

    /// Whether this kind draws grid data rather than points.
    pub fn is_grid(self) -> bool {
        matches!(self, PlotKind::Heat | PlotKind::Contour)
    }

    /// Whether this kind can be drawn on 3D axes.
    pub fn supports_3d(self) -> bool {
        matches!(self, PlotKind::Line | PlotKind::Scatter)
    }

    fn default_marker_size(self) -> f64 {
        if self == PlotKind::Scatter { 10. } else { 0. }
    }
}

impl Display for PlotKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown plot kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plot kind {0:?}")]
pub struct UnknownPlotKind(pub String);

impl FromStr for PlotKind {
    type Err = UnknownPlotKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(PlotKind::Line),
            "scatter" => Ok(PlotKind::Scatter),
            "bar" => Ok(PlotKind::Bar),
            "error_bar" => Ok(PlotKind::ErrorBar),
            "error_shade" => Ok(PlotKind::ErrorShade),
            "heat" => Ok(PlotKind::Heat),
            "contour" => Ok(PlotKind::Contour),
            _ => Err(UnknownPlotKind(s.to_string())),
        }
    }
}

/// Values held by a data set.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// One row per point; columns are x, y and, for 3D plots, z.
    Points(Array2<f64>),
    /// Equally shaped coordinate grids (as built by a meshgrid) and
    /// the values on them.
    Grid { x: Array2<f64>, y: Array2<f64>, z: Array2<f64> },
}

/// Contour levels: explicit, or `number` levels evenly spaced between
/// `limits` (the range of the data when `None`).
#[derive(Debug, Clone, PartialEq)]
pub struct Contours {
    pub levels: Option<Vec<f64>>,
    pub number: usize,
    pub limits: Option<(f64, f64)>,
}

impl Default for Contours {
    fn default() -> Self {
        Contours { levels: None, number: 10, limits: None }
    }
}

/// Colour choices of a data set, as given by the user.  What they
/// become depends on the plot kind and is settled when drawing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColourChoice {
    pub colour: Option<ColourInput>,
    pub map: Option<String>,
    pub norm: Option<Norm>,
}

/// Data with its plotting properties.
///
/// Properties that are not set explicitly get defaults depending on
/// the plot kind and on the position of the data set in its
/// [`Plot`][crate::Plot]: label `data_<i>`, overlay order `i`, the
/// `i`-th automatic marker and colour.
///
/// # Example
///
/// ```
/// use mpl_scipub::{DataSet, LineStyle, PlotKind};
/// let x: Vec<f64> = (0 .. 100).map(|i| i as f64 / 10.).collect();
/// let y: Vec<f64> = x.iter().map(|x| x.cos()).collect();
/// let mut ds = DataSet::from_xy(&x, &y)?
///     .with_label("cosine")
///     .with_colour("black");
/// ds.set_line(LineStyle::Dotted, 1.);
/// assert_eq!(ds.kind(), PlotKind::Line);
/// assert_eq!(ds.line_width(), 1.);
/// # Ok::<(), mpl_scipub::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    data: Data,
    kind: PlotKind,
    label: Option<String>,
    order: Option<i32>,
    error_x: Option<Vec<f64>>,
    error_y: Option<Vec<f64>>,
    error_bars: ErrorBars,
    marker: Option<Marker>,
    marker_size: Option<MarkerSize>,
    line_style: LineStyle,
    line_width: f64,
    bar_width: f64,
    colour: ColourChoice,
    interpolation: Option<String>,
    contours: Contours,
}

impl DataSet {
    fn with_data(data: Data, kind: PlotKind) -> DataSet {
        DataSet {
            data,
            kind,
            label: None,
            order: None,
            error_x: None,
            error_y: None,
            error_bars: ErrorBars::default(),
            marker: None,
            marker_size: None,
            line_style: LineStyle::Solid,
            line_width: 2.,
            bar_width: 1.,
            colour: ColourChoice::default(),
            interpolation: None,
            contours: Contours::default(),
        }
    }

    /// Data set of points, one per row of `points` (x, y[, z]),
    /// drawn as a line by default.
    pub fn new(points: Array2<f64>) -> DataSet {
        Self::with_data(Data::Points(points), PlotKind::Line)
    }

    /// Data set of the points (`x[i]`, `y[i]`).  Return an error if the
    /// slices have different lengths.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<DataSet, Error> {
        let points = stack(ndarray::Axis(1),
                           &[ArrayView1::from(x), ArrayView1::from(y)])?;
        Ok(Self::new(points))
    }

    /// Data set of the points (`x[i]`, `y[i]`, `z[i]`).
    pub fn from_xyz(x: &[f64], y: &[f64], z: &[f64]) -> Result<DataSet, Error> {
        let points = stack(ndarray::Axis(1), &[ArrayView1::from(x),
                                               ArrayView1::from(y),
                                               ArrayView1::from(z)])?;
        Ok(Self::new(points))
    }

    /// Data set of values `z` on the grid `x`, `y`, drawn as a heat map
    /// by default.  The three arrays must have the same shape.
    pub fn grid(x: Array2<f64>, y: Array2<f64>, z: Array2<f64>
    ) -> Result<DataSet, Error> {
        if x.dim() != z.dim() || y.dim() != z.dim() {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into())
        }
        Ok(Self::with_data(Data::Grid { x, y, z }, PlotKind::Heat))
    }

    #[cfg(feature = "curve-sampling")]
    /// Data set sampling the graph of `f` on the interval \[`a`, `b`\]
    /// (require the library [curve-sampling][]).
    ///
    /// [curve-sampling]: https://crates.io/crates/curve-sampling
    pub fn from_fun<F>(mut f: F, a: f64, b: f64) -> DataSet
    where F: FnMut(f64) -> f64 {
        let s = Sampling::fun(&mut f, a, b).n(100).build();
        let x = s.x();
        let y = s.y();
        let points = Array2::from_shape_fn((x.len(), 2), |(i, j)| {
            if j == 0 { x[i] } else { y[i] } });
        Self::new(points)
    }

    // Builder-style options, consuming `self`.

    #[must_use]
    pub fn with_kind(mut self, kind: PlotKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_errors(mut self, x: Option<Vec<f64>>, y: Option<Vec<f64>>
    ) -> Self {
        self.set_errors(x, y);
        self
    }

    #[must_use]
    pub fn with_colour(mut self, colour: impl Into<ColourInput>) -> Self {
        self.colour.colour = Some(colour.into());
        self
    }

    #[must_use]
    pub fn with_colour_map(mut self, map: &str) -> Self {
        self.colour.map = Some(map.to_string());
        self
    }

    #[must_use]
    pub fn with_colour_norm(mut self, vmin: f64, vmax: f64) -> Self {
        self.colour.norm = Some(Norm::new(vmin, vmax));
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<Marker>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    #[must_use]
    pub fn with_marker_size(mut self, size: impl Into<MarkerSize>) -> Self {
        self.marker_size = Some(size.into());
        self
    }

    #[must_use]
    pub fn with_line(mut self, style: LineStyle, width: f64) -> Self {
        self.set_line(style, width);
        self
    }

    #[must_use]
    pub fn with_bar_width(mut self, width: f64) -> Self {
        self.bar_width = width;
        self
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: &str) -> Self {
        self.interpolation = Some(interpolation.to_string());
        self
    }

    // Setters.

    pub fn set_kind(&mut self, kind: PlotKind) -> &mut Self {
        self.kind = kind;
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    /// Set the overlay order: higher orders are drawn on top.
    pub fn set_order(&mut self, order: i32) -> &mut Self {
        self.order = Some(order);
        self
    }

    /// Set the line style and width.
    pub fn set_line(&mut self, style: LineStyle, width: f64) -> &mut Self {
        self.line_style = style;
        self.line_width = width;
        self
    }

    /// Set the total width of the bars at each x position.
    pub fn set_bar(&mut self, width: f64) -> &mut Self {
        self.bar_width = width;
        self
    }

    /// Set the marker style and size.  With no style, an automatic
    /// filled marker is used whenever the size is positive.
    pub fn set_marker(&mut self, style: Option<Marker>,
                      size: impl Into<MarkerSize>) -> &mut Self {
        self.marker = style;
        self.marker_size = Some(size.into());
        self
    }

    /// Set symmetric errors in x and/or y, one value per point.
    pub fn set_errors(&mut self, x: Option<Vec<f64>>, y: Option<Vec<f64>>
    ) -> &mut Self {
        self.error_x = x;
        self.error_y = y;
        self
    }

    /// Set the error bar line width, the interval between points
    /// carrying an error bar and the cap size.
    pub fn set_error(&mut self, width: Option<f64>, interval: usize, cap: f64
    ) -> &mut Self {
        if interval == 0 {
            warn!("error bar interval 0 replaced by 1");
        }
        self.error_bars = ErrorBars { width, interval: interval.max(1), cap };
        self
    }

    /// Set the colour, as a single colour or one value per point drawn
    /// through `map` normalised to `norm`.  With no colour, the colour
    /// is taken from `map` (by default "Set1") by position.  Heat maps
    /// and contour plots only use `map` and `norm`.
    pub fn set_colour(&mut self, colour: Option<ColourInput>,
                      map: Option<&str>, norm: Option<(f64, f64)>
    ) -> &mut Self {
        self.colour = ColourChoice {
            colour,
            map: map.map(str::to_string),
            norm: norm.map(Norm::from),
        };
        self
    }

    /// Set the contour levels.  Explicit `levels` take precedence;
    /// otherwise `number` levels are spread over `limits` (over the
    /// range of the data if `None`).
    pub fn set_contours(&mut self, levels: Option<Vec<f64>>, number: usize,
                        limits: Option<(f64, f64)>) -> &mut Self {
        self.contours = Contours { levels, number, limits };
        self
    }

    /// Set the interpolation used by heat maps ("bilinear",
    /// "nearest",...).
    pub fn set_interpolation(&mut self, interpolation: Option<&str>
    ) -> &mut Self {
        self.interpolation = interpolation.map(str::to_string);
        self
    }

    // Getters.

    pub fn data(&self) -> &Data { &self.data }
    pub fn kind(&self) -> PlotKind { self.kind }
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }
    pub fn order(&self) -> Option<i32> { self.order }
    pub fn error_x(&self) -> Option<&[f64]> { self.error_x.as_deref() }
    pub fn error_y(&self) -> Option<&[f64]> { self.error_y.as_deref() }
    pub fn error_bars(&self) -> ErrorBars { self.error_bars }
    pub fn marker(&self) -> Option<&Marker> { self.marker.as_ref() }
    pub fn marker_size(&self) -> Option<&MarkerSize> { self.marker_size.as_ref() }
    pub fn line_style(&self) -> LineStyle { self.line_style }
    pub fn line_width(&self) -> f64 { self.line_width }
    pub fn bar_width(&self) -> f64 { self.bar_width }
    pub fn colour(&self) -> &ColourChoice { &self.colour }
    pub fn interpolation(&self) -> Option<&str> { self.interpolation.as_deref() }
    pub fn contours(&self) -> &Contours { &self.contours }

    /// Number of points (rows of point data, values of grid data).
    pub fn len(&self) -> usize {
        match &self.data {
            Data::Points(p) => p.nrows(),
            Data::Grid { z, .. } => z.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    // Resolution of the defaults, once the data set sits at `index`
    // in a plot.

    fn invalid(index: usize, reason: impl Into<String>) -> Error {
        Error::InvalidData { index, reason: reason.into() }
    }

    /// Check that the data set can be drawn at position `index` of a
    /// plot with `dimensions` axes, whose default marker size is
    /// `marker_size`.
    pub(crate) fn validate(&self, index: usize, dimensions: u8,
                           marker_size: Option<&MarkerSize>
    ) -> Result<(), Error> {
        if dimensions == 3 && !self.kind.supports_3d() {
            return Err(Error::Unsupported { kind: self.kind, dimensions })
        }
        match &self.data {
            Data::Points(p) => {
                if self.kind.is_grid() {
                    return Err(Self::invalid(index, format!(
                        "{} plots need grid data", self.kind)))
                }
                if p.nrows() == 0 {
                    return Err(Self::invalid(index, "no data points"))
                }
                if p.ncols() < dimensions as usize {
                    return Err(Self::invalid(index, format!(
                        "{}D plots need {} columns, found {}",
                        dimensions, dimensions, p.ncols())))
                }
                let n = p.nrows();
                let size = self.marker_size.as_ref().or(marker_size);
                if matches!(size, Some(MarkerSize::PerPoint(_)))
                    && self.kind != PlotKind::Scatter {
                    return Err(Self::invalid(index, format!(
                        "per-point marker sizes cannot be used for {} plots",
                        self.kind)))
                }
                let per_point = [
                    ("x errors", self.error_x.as_ref().map(Vec::len)),
                    ("y errors", self.error_y.as_ref().map(Vec::len)),
                    ("marker sizes", match size {
                        Some(MarkerSize::PerPoint(s)) => Some(s.len()),
                        _ => None }),
                    ("colour values", match &self.colour.colour {
                        Some(ColourInput::Values(v)) => Some(v.len()),
                        _ => None }),
                ];
                for (what, len) in per_point {
                    if let Some(len) = len {
                        if len != n {
                            return Err(Self::invalid(index, format!(
                                "{} {} for {} points", len, what, n)))
                        }
                    }
                }
                if self.kind == PlotKind::ErrorShade && self.error_y.is_none() {
                    return Err(Self::invalid(
                        index, "error_shade plots need y errors"))
                }
                if let Some(ColourInput::Values(v)) = &self.colour.colour {
                    if self.kind != PlotKind::Scatter {
                        return Err(Self::invalid(
                            index, "per-point colours need a scatter plot"))
                    }
                    if self.colour.norm.is_none()
                        && Norm::spanning(v).is_none() {
                        return Err(Self::invalid(
                            index, "colour values hold no finite number"))
                    }
                }
            }
            Data::Grid { x, y, z } => {
                if !self.kind.is_grid() {
                    return Err(Self::invalid(index, format!(
                        "grid data cannot be drawn as a {} plot", self.kind)))
                }
                if Norm::spanning(x.iter()).is_none()
                    || Norm::spanning(y.iter()).is_none()
                    || Norm::spanning(z.iter()).is_none() {
                    return Err(Self::invalid(
                        index, "grid holds no finite values"))
                }
                if self.kind == PlotKind::Contour
                    && self.contours.levels.is_none()
                    && self.contours.number == 0 {
                    return Err(Self::invalid(index, "no contour levels"))
                }
            }
        }
        Ok(())
    }

    /// Column `j` of point data.
    pub(crate) fn column(&self, j: usize) -> Vec<f64> {
        match &self.data {
            Data::Points(p) if j < p.ncols() => p.column(j).to_vec(),
            _ => vec![],
        }
    }

    pub(crate) fn resolved_label(&self, index: usize) -> String {
        self.label.clone().unwrap_or_else(|| format!("data_{}", index))
    }

    pub(crate) fn resolved_order(&self, index: usize) -> i32 {
        self.order.unwrap_or(index as i32)
    }

    /// Marker style and size, falling back on the plot-wide `style`
    /// and `size`, then on the defaults of the plot kind.
    pub(crate) fn resolved_marker(
        &self, index: usize, style: Option<&Marker>, size: Option<&MarkerSize>
    ) -> (Option<Marker>, MarkerSize) {
        let size = self.marker_size.as_ref().or(size).cloned()
            .unwrap_or(MarkerSize::Fixed(self.kind.default_marker_size()));
        let marker = match self.marker.as_ref().or(style) {
            Some(m) => Some(m.clone()),
            None if size.is_visible() => Some(Marker::auto(index)),
            None => None,
        };
        (marker, size)
    }

    /// Colour of a data set of points.
    pub(crate) fn resolved_paint(&self, index: usize) -> Result<Paint, Error> {
        let c = &self.colour;
        match &c.colour {
            None => Ok(Paint::FromMap {
                map: c.map.clone().unwrap_or_else(|| AUTO_COLOUR_MAP.into()),
                index }),
            Some(ColourInput::Named(name)) => Ok(Paint::Named(name.clone())),
            Some(ColourInput::Values(values)) => {
                let norm = c.norm.or_else(|| Norm::spanning(values))
                    .ok_or_else(|| Self::invalid(
                        index, "colour values hold no finite number"))?;
                Ok(Paint::Mapped {
                    values: values.clone(),
                    map: c.map.clone()
                        .unwrap_or_else(|| DEFAULT_COLOUR_MAP.into()),
                    norm })
            }
        }
    }

    /// Colour map and normalisation of grid data.
    pub(crate) fn surface(&self, index: usize) -> Result<(String, Norm), Error> {
        let map = self.colour.map.clone()
            .unwrap_or_else(|| DEFAULT_COLOUR_MAP.into());
        let norm = match (&self.colour.norm, &self.data) {
            (Some(n), _) => Some(*n),
            (None, Data::Grid { z, .. }) => Norm::spanning(z.iter()),
            (None, Data::Points(_)) => None,
        };
        let norm = norm.ok_or_else(|| Self::invalid(
            index, "grid holds no finite values"))?;
        Ok((map, norm))
    }

    /// Contour levels of grid data.
    pub(crate) fn contour_levels(&self, index: usize) -> Result<Vec<f64>, Error> {
        let c = &self.contours;
        if let Some(levels) = &c.levels {
            return Ok(levels.clone())
        }
        let (lo, hi) = match (c.limits, &self.data) {
            (Some(l), _) => l,
            (None, Data::Grid { z, .. }) => {
                let n = Norm::spanning(z.iter()).ok_or_else(|| Self::invalid(
                    index, "grid holds no finite values"))?;
                (n.vmin, n.vmax)
            }
            (None, Data::Points(_)) => {
                return Err(Self::invalid(index, "contours need grid data"))
            }
        };
        Ok(Array1::linspace(lo, hi, c.number).to_vec())
    }
}
