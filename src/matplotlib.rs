//! [`Backend`] forwarding the commands to the Python [Matplotlib][]
//! library.
//!
//! [Matplotlib]: https://matplotlib.org/

use std::path::Path;
use lazy_static::lazy_static;
use ndarray::Array2;
use numpy::{PyArray1, PyArray2};
use pyo3::{
    prelude::*,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::{PyDict, PyList, PyTuple},
};
use tracing::debug;
use crate::{
    backend::Backend,
    command::{Command, Series, TextSize},
    style::{Marker, MarkerSize, Norm, Paint},
    Error,
};

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(|m| m.unbind()))
}}

lazy_static! {
    // Import matplotlib modules.
    static ref PYPLOT: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.pyplot")
    };
    static ref TICKER: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.ticker")
    };
    static ref COLORS: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.colors")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}

/// Build a dictionary of keyword arguments.
macro_rules! kwargs {
    ($py: ident; $($k: literal => $v: expr),* $(,)?) => {{
        let kw = PyDict::new_bound($py);
        $( kw.set_item($k, $v)?; )*
        kw
    }};
}

/// Conversion to a numpy.ndarray.
trait ToNumpy {
    fn to_numpy(&self, py: Python<'_>) -> PyObject;
}

impl ToNumpy for [f64] {
    fn to_numpy(&self, py: Python<'_>) -> PyObject {
        PyArray1::from_slice_bound(py, self).into_any().unbind()
    }
}

impl ToNumpy for Array2<f64> {
    fn to_numpy(&self, py: Python<'_>) -> PyObject {
        PyArray2::from_array_bound(py, self).into_any().unbind()
    }
}

/// The top level container for all the plot elements.
#[derive(Debug)]
struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

#[derive(Debug)]
struct Axes {
    ax: PyObject, // instance of matplotlib.axes.Axes (or Axes3D)
}

/// Matplotlib modules used to carry out the commands.
struct Modules<'py> {
    pyplot: Bound<'py, PyModule>,
    ticker: Bound<'py, PyModule>,
    colors: Bound<'py, PyModule>,
}

impl<'py> Modules<'py> {
    fn normalize(&self, norm: &Norm) -> PyResult<PyObject> {
        let py = self.colors.py();
        let kw = PyDict::new_bound(py);
        kw.set_item("vmin", norm.vmin)?;
        kw.set_item("vmax", norm.vmax)?;
        Ok(self.colors.getattr("Normalize")?.call((), Some(&kw))?.unbind())
    }

    /// Add the keyword arguments drawing with `paint`.
    fn paint(&self, kw: &Bound<'_, PyDict>, paint: &Paint) -> PyResult<()> {
        let py = kw.py();
        match paint {
            Paint::FromMap { map, index } => {
                let cmap = self.pyplot.getattr("get_cmap")?
                    .call1((map.as_str(),))?;
                kw.set_item("color", cmap.call1((*index,))?.unbind())
            }
            Paint::Named(c) => kw.set_item("color", c),
            Paint::Mapped { values, map, norm } => {
                kw.set_item("c", values.to_numpy(py))?;
                kw.set_item("cmap", map)?;
                kw.set_item("norm", self.normalize(norm)?)
            }
        }
    }
}

fn series<'py>(py: Python<'py>, s: &Series) -> PyResult<Bound<'py, PyDict>> {
    let kw = PyDict::new_bound(py);
    kw.set_item("label", &s.label)?;
    kw.set_item("zorder", s.order)?;
    Ok(kw)
}

/// Positional arguments `x`, `y` and, for 3D axes, `z`.
fn coords<'py>(py: Python<'py>, x: &[f64], y: &[f64], z: Option<&Vec<f64>>
) -> Bound<'py, PyTuple> {
    let mut args = vec![x.to_numpy(py), y.to_numpy(py)];
    if let Some(z) = z {
        args.push(z.to_numpy(py));
    }
    PyTuple::new_bound(py, args)
}

fn optional_array(py: Python<'_>, v: &Option<Vec<f64>>) -> Option<PyObject> {
    v.as_ref().map(|v| v.to_numpy(py))
}

fn marker_str(m: &Option<Marker>) -> Option<&str> {
    m.as_ref().map(Marker::as_str)
}

fn savefig_error(py: Python<'_>, e: PyErr) -> Error {
    if e.is_instance_of::<PyFileNotFoundError>(py) {
        Error::FileNotFoundError
    } else if e.is_instance_of::<PyPermissionError>(py) {
        Error::PermissionError
    } else {
        Error::Python(e)
    }
}

/// Backend drawing with Matplotlib through `pyplot`.
///
/// Python and Matplotlib are only needed once the first command is
/// executed; [`Error::NoMatplotlib`] is returned if they are missing.
#[derive(Debug, Default)]
pub struct Matplotlib {
    figure: Option<(Figure, Axes)>,
}

impl Matplotlib {
    pub fn new() -> Self {
        Matplotlib { figure: None }
    }

    /// Whether the Python library Matplotlib can be imported.
    pub fn is_available() -> bool {
        PYPLOT.is_ok()
    }

    fn new_figure(m: &Modules<'_>, size: (f64, f64), text: &TextSize,
                  dimensions: u8) -> PyResult<(Figure, Axes)> {
        let py = m.pyplot.py();
        let rc = kwargs!(py;
            "legend.title_fontsize" => text.legend,
            "legend.fontsize" => text.legend,
            "axes.labelsize" => text.label,
            "axes.titlesize" => text.title,
            "xtick.labelsize" => text.label,
            "ytick.labelsize" => text.label,
        );
        m.pyplot.getattr("rcParams")?.call_method1("update", (rc,))?;
        let fig = m.pyplot.getattr("figure")?
            .call((), Some(&kwargs!(py; "figsize" => size)))?;
        let ax = if dimensions == 3 {
            fig.call_method("add_subplot", (111,),
                            Some(&kwargs!(py; "projection" => "3d")))?
        } else {
            fig.call_method0("subplots")?
        };
        Ok((Figure { fig: fig.unbind() }, Axes { ax: ax.unbind() }))
    }

    fn draw<'py>(m: &Modules<'py>, fig: &Bound<'py, PyAny>,
                 ax: &Bound<'py, PyAny>, command: &Command
    ) -> Result<(), Error> {
        let py = ax.py();
        match command {
            Command::Figure { .. } | Command::Show => {}
            Command::Scatter { x, y, z, series: s, marker, size, paint } => {
                let kw = series(py, s)?;
                kw.set_item("marker", marker_str(marker))?;
                match size {
                    MarkerSize::Fixed(sz) => kw.set_item("s", *sz)?,
                    MarkerSize::PerPoint(sz) => kw.set_item("s", sz.to_numpy(py))?,
                }
                m.paint(&kw, paint)?;
                ax.call_method("scatter", coords(py, x, y, z.as_ref()),
                               Some(&kw))?;
            }
            Command::Line { x, y, z, series: s, marker, marker_size, style,
                            width, paint } => {
                let kw = series(py, s)?;
                kw.set_item("marker", marker_str(marker))?;
                kw.set_item("ms", *marker_size)?;
                kw.set_item("lw", *width)?;
                kw.set_item("ls", style.as_str())?;
                m.paint(&kw, paint)?;
                ax.call_method("plot", coords(py, x, y, z.as_ref()), Some(&kw))?;
            }
            Command::ErrorBar { x, y, xerr, yerr, series: s, marker,
                                marker_size, style, width, bars, paint } => {
                let kw = series(py, s)?;
                kw.set_item("xerr", optional_array(py, xerr))?;
                kw.set_item("yerr", optional_array(py, yerr))?;
                kw.set_item("marker", marker_str(marker))?;
                kw.set_item("ms", *marker_size)?;
                kw.set_item("lw", *width)?;
                kw.set_item("ls", style.as_str())?;
                kw.set_item("errorevery", bars.interval)?;
                kw.set_item("capsize", bars.cap)?;
                if let Some(w) = bars.width {
                    kw.set_item("elinewidth", w)?;
                }
                m.paint(&kw, paint)?;
                ax.call_method("errorbar", coords(py, x, y, None), Some(&kw))?;
            }
            Command::ErrorShade { x, lower, upper, series: s, paint } => {
                let kw = series(py, s)?;
                kw.set_item("y1", lower.to_numpy(py))?;
                kw.set_item("y2", upper.to_numpy(py))?;
                m.paint(&kw, paint)?;
                ax.call_method("fill_between", (x.to_numpy(py),), Some(&kw))?;
            }
            Command::Bar { x, height, width, xerr, yerr, series: s,
                           error_order, paint } => {
                let kw = series(py, s)?;
                kw.set_item("width", *width)?;
                kw.set_item("xerr", optional_array(py, xerr))?;
                kw.set_item("yerr", optional_array(py, yerr))?;
                kw.set_item("error_kw",
                            kwargs!(py; "zorder" => *error_order).unbind())?;
                m.paint(&kw, paint)?;
                ax.call_method("bar", coords(py, x, height, None), Some(&kw))?;
            }
            Command::Heat { z, extent, map, norm, interpolation } => {
                let kw = kwargs!(py;
                    "origin" => "lower",
                    "cmap" => map,
                    "norm" => m.normalize(norm)?,
                    "aspect" => "auto",
                    "extent" => (extent[0], extent[1], extent[2], extent[3]),
                    "interpolation" => interpolation.as_deref(),
                );
                ax.call_method("imshow", (z.to_numpy(py),), Some(&kw))?;
            }
            Command::Contour { x, y, z, levels, map, norm, width, style } => {
                let kw = kwargs!(py;
                    "levels" => levels.to_numpy(py),
                    "cmap" => map,
                    "norm" => m.normalize(norm)?,
                    "linewidths" => *width,
                    "linestyles" => style.name(),
                );
                ax.call_method("contour",
                               (x.to_numpy(py), y.to_numpy(py), z.to_numpy(py)),
                               Some(&kw))?;
            }
            Command::Label { axis, label } => {
                ax.call_method1(format!("set_{}label", axis).as_str(),
                                (label.as_str(),))?;
            }
            Command::Limits { axis, lower, upper } => {
                ax.call_method1(format!("set_{}lim", axis).as_str(),
                                ((*lower, *upper),))?;
            }
            Command::Ticks { axis, major, minor } => {
                let locator = m.ticker.getattr("MultipleLocator")?;
                let a = ax.getattr(format!("{}axis", axis).as_str())?;
                a.call_method1("set_major_locator", (locator.call1((*major,))?,))?;
                a.call_method1("set_minor_locator", (locator.call1((*minor,))?,))?;
            }
            Command::LogScale { axis } => {
                ax.call_method1(format!("set_{}scale", axis).as_str(), ("log",))?;
            }
            Command::Legend { title, columns, anchor, reverse } => {
                let (handles, labels): (Bound<'_, PyList>, Bound<'_, PyList>) =
                    ax.call_method0("get_legend_handles_labels")?.extract()?;
                if *reverse {
                    handles.reverse()?;
                    labels.reverse()?;
                }
                let kw = kwargs!(py;
                    "title" => title.as_deref(),
                    "ncol" => *columns,
                );
                if let Some(anchor) = anchor {
                    kw.set_item("bbox_to_anchor", *anchor)?;
                }
                let legend = ax.call_method("legend", (handles, labels),
                                            Some(&kw))?;
                legend.call_method0("get_frame")?
                    .call_method1("set_edgecolor", ("grey",))?;
            }
            Command::Save { path, dpi } => {
                let kw = kwargs!(py; "dpi" => *dpi, "bbox_inches" => "tight");
                fig.call_method("savefig", (Path::new(path),), Some(&kw))
                    .map_err(|e| savefig_error(py, e))?;
            }
        }
        Ok(())
    }
}

impl Backend for Matplotlib {
    fn execute(&mut self, command: &Command) -> Result<(), Error> {
        let pyplot = pymod!(PYPLOT)?;
        let ticker = pymod!(TICKER)?;
        let colors = pymod!(COLORS)?;
        Python::with_gil(|py| -> Result<(), Error> {
            let m = Modules { pyplot: pyplot.bind(py).clone(),
                              ticker: ticker.bind(py).clone(),
                              colors: colors.bind(py).clone() };
            match command {
                Command::Figure { size, text, dimensions } => {
                    // Close the previous figure to keep pyplot from
                    // accumulating them.
                    if let Some((fig, _)) = self.figure.take() {
                        m.pyplot.getattr("close")?.call1((fig.fig,))?;
                    }
                    self.figure = Some(Self::new_figure(&m, *size, text,
                                                        *dimensions)?);
                    debug!(dimensions, "new matplotlib figure");
                    Ok(())
                }
                Command::Show => {
                    m.pyplot.getattr("show")?.call0()?;
                    if let Some((fig, _)) = self.figure.take() {
                        m.pyplot.getattr("close")?.call1((fig.fig,))?;
                    }
                    Ok(())
                }
                _ => {
                    let (fig, ax) = self.figure.as_ref()
                        .ok_or(Error::NoFigure)?;
                    Self::draw(&m, fig.fig.bind(py), ax.ax.bind(py), command)
                }
            }
        })
    }
}

impl Drop for Matplotlib {
    fn drop(&mut self) {
        if let Some((fig, _)) = self.figure.take() {
            if let Ok(pyplot) = pymod!(PYPLOT) {
                Python::with_gil(|py| {
                    let _ = pyplot.bind(py).getattr("close")
                        .and_then(|close| close.call1((fig.fig,)));
                })
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AxesOptions, DataSet, LegendOptions, Plot, PlotKind};

    /// Run `f` only when Matplotlib can be imported.
    fn with_matplotlib(f: impl FnOnce() -> Result<(), Error>) {
        if Matplotlib::is_available() {
            f().unwrap()
        } else {
            eprintln!("matplotlib not available, skipping");
        }
    }

    #[test]
    fn a_basic_pdf() {
        with_matplotlib(|| {
            let dir = tempfile::tempdir()?;
            let mut plot = Plot::new();
            plot.add_dataset(DataSet::from_xy(&[1., 2., 3., 4.],
                                              &[1., 4., 2., 3.])?);
            plot.plot()?;
            let path = plot.save().to_file(dir.path().join("a_basic"))?;
            assert!(path.exists());
            Ok(())
        })
    }

    #[test]
    fn every_2d_kind() {
        with_matplotlib(|| {
            let dir = tempfile::tempdir()?;
            let x = [0., 1., 2., 3.];
            let y = [1., 4., 2., 3.];
            let e = vec![0.1, 0.2, 0.1, 0.3];
            let mut plot = Plot::new();
            plot.add_dataset(DataSet::from_xy(&x, &y)?.with_label("line"));
            plot.add_dataset(DataSet::from_xy(&x, &y)?
                             .with_kind(PlotKind::Scatter)
                             .with_colour(vec![0., 1., 2., 3.])
                             .with_marker_size(vec![5., 10., 15., 20.]));
            plot.add_dataset(DataSet::from_xy(&x, &y)?
                             .with_kind(PlotKind::ErrorBar)
                             .with_errors(None, Some(e.clone())));
            plot.add_dataset(DataSet::from_xy(&x, &y)?
                             .with_kind(PlotKind::ErrorShade)
                             .with_errors(None, Some(e.clone())));
            plot.add_dataset(DataSet::from_xy(&x, &y)?
                             .with_kind(PlotKind::Bar).with_bar_width(0.8)
                             .with_errors(None, Some(e)));
            plot.set_axes(AxesOptions::default().xlim(0., 3.).xticks(1., 0.5)
                          .ylog());
            plot.set_legend(LegendOptions::shown().title("kinds").reverse());
            plot.plot()?;
            plot.save().format("png").dpi(50.)
                .to_file(dir.path().join("kinds"))?;
            assert!(dir.path().join("kinds.png").exists());
            Ok(())
        })
    }

    #[test]
    fn grids() {
        with_matplotlib(|| {
            let dir = tempfile::tempdir()?;
            let x = Array2::from_shape_fn((10, 20), |(_, j)| j as f64 / 10.);
            let y = Array2::from_shape_fn((10, 20), |(i, _)| i as f64 / 5.);
            let z = &x * &x + &y * &y;
            let mut plot = Plot::new();
            plot.add_dataset(DataSet::grid(x.clone(), y.clone(), z.clone())?);
            plot.plot()?;
            plot.save().to_file(dir.path().join("heat"))?;
            let mut plot = Plot::new();
            plot.add_dataset(DataSet::grid(x, y, z)?
                             .with_kind(PlotKind::Contour));
            plot.plot()?;
            plot.save().to_file(dir.path().join("contour"))?;
            Ok(())
        })
    }

    #[test]
    fn three_d() {
        with_matplotlib(|| {
            let dir = tempfile::tempdir()?;
            let t: Vec<f64> = (0 .. 50).map(|i| i as f64 / 5.).collect();
            let x: Vec<f64> = t.iter().map(|t| t.cos()).collect();
            let y: Vec<f64> = t.iter().map(|t| t.sin()).collect();
            let mut plot = Plot::new();
            plot.set_dimensions(3)?;
            plot.add_dataset(DataSet::from_xyz(&x, &y, &t)?);
            plot.add_dataset(DataSet::from_xyz(&y, &x, &t)?
                             .with_kind(PlotKind::Scatter));
            plot.plot()?;
            plot.save().to_file(dir.path().join("helix"))?;
            Ok(())
        })
    }

    #[test]
    fn save_to_missing_directory() {
        with_matplotlib(|| {
            let mut plot = Plot::new();
            plot.add_dataset(DataSet::from_xy(&[0., 1.], &[0., 1.])?);
            let r = plot.save().to_file("/nonexistent-dir/plot");
            assert!(matches!(r, Err(Error::FileNotFoundError)));
            Ok(())
        })
    }
}
