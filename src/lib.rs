//! Painless scientific plotting with [Matplotlib][].
//!
//! Usage
//! -----
//!
//! Put the data and its presentation in [`DataSet`]s, add them to a
//! [`Plot`], adjust the axes and legend, then draw and save or display
//! the figure.  Every setting is forwarded to Matplotlib through
//! [Rust][] bindings to Python.
//!
//! ```no_run
//! use mpl_scipub::{AxesOptions, DataSet, Plot, PlotKind};
//! let x: Vec<f64> = (0 .. 100).map(|i| i as f64 / 10.).collect();
//! let y: Vec<f64> = x.iter().map(|x| x.cos()).collect();
//! let mut plot = Plot::new();
//! plot.add_dataset(DataSet::from_xy(&x, &y)?.with_label("cosine"));
//! plot.set_axes(AxesOptions::default().xlim(0., 10.).xlabel(r"$x$"));
//! plot.plot()?;
//! plot.save().format("png").to_file("target/cosine")?;
//! # Ok::<(), mpl_scipub::Error>(())
//! ```
//!
//! Plots are drawn by a [`Backend`].  [`Matplotlib`] is the default
//! one; [`Recorder`] only records the Matplotlib calls, which is
//! handy to inspect what a plot will do without Python.
//!
//! [Rust]: https://www.rust-lang.org/
//! [Matplotlib]: https://matplotlib.org/

use pyo3::PyErr;

pub mod backend;
pub mod command;
pub mod config;
pub mod dataset;
pub mod matplotlib;
pub mod plot;
pub mod style;

pub use backend::{Backend, Recorder};
pub use command::{Axis, Command, TextSize};
pub use config::Style;
pub use dataset::{DataSet, PlotKind};
pub use matplotlib::Matplotlib;
pub use plot::{AxesOptions, AxisOptions, LegendOptions, Plot, Savefig};
pub use style::{ColourInput, LineStyle, Marker, MarkerSize, Norm};

/// Possible errors of plotting functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    #[error("The matplotlib library has not been found.\n\
             Please install it.  See https://matplotlib.org/\n\
             If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554")]
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    #[error("A path contains an element that is not a directory or does \
             not exist")]
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    #[error("Permission denied to access or create the filesystem path")]
    PermissionError,
    /// Other Python errors.
    #[error("Python error: {0}")]
    Python(#[from] PyErr),
    /// A drawing command was sent before the figure was created.
    #[error("No figure has been created")]
    NoFigure,
    /// Plots are either 2D or 3D.
    #[error("Plots must be 2D or 3D, not {0}D")]
    InvalidDimensions(u8),
    /// The data set at position `index` of the plot cannot be drawn.
    #[error("Data set {index}: {reason}")]
    InvalidData { index: usize, reason: String },
    /// The plot kind cannot be drawn on axes of this dimension.
    #[error("{kind} plots cannot be drawn in {dimensions}D")]
    Unsupported { kind: PlotKind, dimensions: u8 },
    /// Arrays of incompatible shapes.
    #[error("Incompatible data: {0}")]
    Shape(#[from] ndarray::ShapeError),
    /// A style sheet is not valid YAML or has unknown entries.
    #[error("Invalid style sheet: {0}")]
    Style(#[from] serde_yaml::Error),
    /// A style sheet could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
