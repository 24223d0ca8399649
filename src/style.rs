//! Presentation attributes shared by data sets and plots: markers,
//! line styles and colours, named the way Matplotlib names them.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// Marker drawn at each data point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Point,
    Circle,
    TriangleDown,
    TriangleUp,
    TriangleLeft,
    TriangleRight,
    Octagon,
    Square,
    Pentagon,
    Star,
    Hexagon1,
    Hexagon2,
    Diamond,
    ThinDiamond,
    PlusFilled,
    XFilled,
    Plus,
    Cross,
    /// Any other Matplotlib marker specification, e.g. `"$\\alpha$"`.
    Custom(String),
}

/// Filled markers, in the order Matplotlib lists them.  Data sets
/// without an explicit marker cycle through these by position.
const FILLED: [Marker; 15] = [
    Marker::Circle, Marker::TriangleDown, Marker::TriangleUp,
    Marker::TriangleLeft, Marker::TriangleRight, Marker::Octagon,
    Marker::Square, Marker::Pentagon, Marker::Star, Marker::Hexagon1,
    Marker::Hexagon2, Marker::Diamond, Marker::ThinDiamond,
    Marker::PlusFilled, Marker::XFilled,
];

impl Marker {
    /// The automatic filled marker for the data set at `index`.
    pub fn auto(index: usize) -> Marker {
        FILLED[index % FILLED.len()].clone()
    }

    /// Matplotlib's code for this marker.
    pub fn as_str(&self) -> &str {
        match self {
            Marker::Point => ".",
            Marker::Circle => "o",
            Marker::TriangleDown => "v",
            Marker::TriangleUp => "^",
            Marker::TriangleLeft => "<",
            Marker::TriangleRight => ">",
            Marker::Octagon => "8",
            Marker::Square => "s",
            Marker::Pentagon => "p",
            Marker::Star => "*",
            Marker::Hexagon1 => "h",
            Marker::Hexagon2 => "H",
            Marker::Diamond => "D",
            Marker::ThinDiamond => "d",
            Marker::PlusFilled => "P",
            Marker::XFilled => "X",
            Marker::Plus => "+",
            Marker::Cross => "x",
            Marker::Custom(s) => s,
        }
    }
}

impl FromStr for Marker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let m = match s {
            "." => Marker::Point,
            "o" => Marker::Circle,
            "v" => Marker::TriangleDown,
            "^" => Marker::TriangleUp,
            "<" => Marker::TriangleLeft,
            ">" => Marker::TriangleRight,
            "8" => Marker::Octagon,
            "s" => Marker::Square,
            "p" => Marker::Pentagon,
            "*" => Marker::Star,
            "h" => Marker::Hexagon1,
            "H" => Marker::Hexagon2,
            "D" => Marker::Diamond,
            "d" => Marker::ThinDiamond,
            "P" => Marker::PlusFilled,
            "X" => Marker::XFilled,
            "+" => Marker::Plus,
            "x" => Marker::Cross,
            other => Marker::Custom(other.to_string()),
        };
        Ok(m)
    }
}

impl From<&str> for Marker {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(m) => m,
            Err(e) => match e {},
        }
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker size: one size for every point, or one size per point
/// (scatter plots only).
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerSize {
    Fixed(f64),
    PerPoint(Vec<f64>),
}

impl MarkerSize {
    /// Whether a marker of this size should be drawn at all.
    pub fn is_visible(&self) -> bool {
        match self {
            MarkerSize::Fixed(s) => *s > 0.,
            MarkerSize::PerPoint(_) => true,
        }
    }
}

impl From<f64> for MarkerSize {
    fn from(s: f64) -> Self { MarkerSize::Fixed(s) }
}

impl From<Vec<f64>> for MarkerSize {
    fn from(s: Vec<f64>) -> Self { MarkerSize::PerPoint(s) }
}

impl From<&[f64]> for MarkerSize {
    fn from(s: &[f64]) -> Self { MarkerSize::PerPoint(s.to_vec()) }
}

/// Dash pattern of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    DashDot,
    Dotted,
    /// No line at all.
    None,
}

impl LineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::DashDot => "-.",
            LineStyle::Dotted => ":",
            LineStyle::None => "None",
        }
    }

    /// Long name, as expected by `contour`.
    pub fn name(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::DashDot => "dashdot",
            LineStyle::Dotted => "dotted",
            LineStyle::None => "None",
        }
    }
}

/// Error returned when a string is not a Matplotlib line style.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown line style {0:?}")]
pub struct UnknownLineStyle(pub String);

impl FromStr for LineStyle {
    type Err = UnknownLineStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "" | " " | "None" | "none" => Ok(LineStyle::None),
            _ => Err(UnknownLineStyle(s.to_string())),
        }
    }
}

impl Display for LineStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour map used when a data set picks no colour.
pub const AUTO_COLOUR_MAP: &str = "Set1";
/// Colour map used for per-point colours and surfaces.
pub const DEFAULT_COLOUR_MAP: &str = "coolwarm";

/// Colour requested for a data set.
#[derive(Debug, Clone, PartialEq)]
pub enum ColourInput {
    /// Any Matplotlib colour: `"k"`, `"firebrick"`, `"#1f77b4"`,...
    Named(String),
    /// One value per point, mapped through a colour map.
    Values(Vec<f64>),
}

impl From<&str> for ColourInput {
    fn from(s: &str) -> Self { ColourInput::Named(s.to_string()) }
}

impl From<String> for ColourInput {
    fn from(s: String) -> Self { ColourInput::Named(s) }
}

impl From<Vec<f64>> for ColourInput {
    fn from(v: Vec<f64>) -> Self { ColourInput::Values(v) }
}

impl From<&[f64]> for ColourInput {
    fn from(v: &[f64]) -> Self { ColourInput::Values(v.to_vec()) }
}

/// Linear normalisation of values onto a colour map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Norm {
    pub vmin: f64,
    pub vmax: f64,
}

impl Norm {
    pub fn new(vmin: f64, vmax: f64) -> Self { Norm { vmin, vmax } }

    /// Normalisation spanning the finite values of `values`, or `None`
    /// if there are none.
    pub fn spanning<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<Norm> {
        values.into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some(Norm::new(v, v)),
                Some(n) => Some(Norm::new(n.vmin.min(v), n.vmax.max(v))),
            })
    }
}

impl From<(f64, f64)> for Norm {
    fn from((vmin, vmax): (f64, f64)) -> Self { Norm::new(vmin, vmax) }
}

/// Colour forwarded to Matplotlib once a data set has been placed in
/// a plot.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// `matplotlib.pyplot.get_cmap(map)(index)`.
    FromMap { map: String, index: usize },
    Named(String),
    /// Per-point values drawn through `map` with normalisation `norm`.
    Mapped { values: Vec<f64>, map: String, norm: Norm },
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_parse_back() {
        for i in 0 .. FILLED.len() {
            let m = Marker::auto(i);
            assert_eq!(Marker::from(m.as_str()), m);
        }
        assert_eq!(Marker::from("+"), Marker::Plus);
        assert_eq!(Marker::from("$a$"), Marker::Custom("$a$".into()));
    }

    #[test]
    fn auto_markers_cycle() {
        assert_eq!(Marker::auto(0), Marker::Circle);
        assert_eq!(Marker::auto(1), Marker::TriangleDown);
        assert_eq!(Marker::auto(15), Marker::Circle);
    }

    #[test]
    fn line_styles() {
        assert_eq!("--".parse::<LineStyle>(), Ok(LineStyle::Dashed));
        assert_eq!("dotted".parse::<LineStyle>(), Ok(LineStyle::Dotted));
        assert!("~".parse::<LineStyle>().is_err());
        assert_eq!(LineStyle::default().as_str(), "-");
    }

    #[test]
    fn norm_ignores_non_finite() {
        let v = [3., f64::NAN, -1., 2., f64::INFINITY];
        assert_eq!(Norm::spanning(&v), Some(Norm::new(-1., 3.)));
        assert_eq!(Norm::spanning(&[f64::NAN]), None);
        assert_eq!(Norm::spanning(&[]), None);
    }

    #[test]
    fn marker_size_visibility() {
        assert!(!MarkerSize::Fixed(0.).is_visible());
        assert!(MarkerSize::Fixed(5.).is_visible());
        assert!(MarkerSize::PerPoint(vec![]).is_visible());
    }
}
