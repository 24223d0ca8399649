//! Figures made of [`DataSet`]s.

use std::path::PathBuf;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::{
    backend::Backend,
    command::{Axis, Command, Series, TextSize},
    dataset::{Data, DataSet, PlotKind},
    matplotlib::Matplotlib,
    style::{Marker, MarkerSize, Norm},
    Error,
};

/// Options of a single axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    /// Axis label, the upper-case axis name when `None`.
    pub label: Option<String>,
    pub limits: Option<(f64, f64)>,
    /// Spacing of the major and minor ticks.
    pub ticks: Option<(f64, f64)>,
    /// Use a logarithmic scale.
    pub log: bool,
}

/// Options of the x, y and z axes.
///
/// # Example
///
/// ```
/// use mpl_scipub::AxesOptions;
/// let axes = AxesOptions::default()
///     .xlim(0., 8.).ylim(-1.1, 1.1)
///     .xlabel(r"$x$").ylabel(r"$f\left(x\right)$")
///     .xticks(1., 0.1).yticks(0.2, 0.05);
/// assert_eq!(axes.x.ticks, Some((1., 0.1)));
/// assert_eq!(axes.z.label, None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesOptions {
    pub x: AxisOptions,
    pub y: AxisOptions,
    pub z: AxisOptions,
}

/// Declare the option setters of the axis `$a`.
macro_rules! axis_setters {
    ($a: ident, $label: ident, $lim: ident, $ticks: ident, $log: ident) => {
        #[must_use]
        pub fn $label(mut self, label: &str) -> Self {
            self.$a.label = Some(label.to_string());
            self
        }

        #[must_use]
        pub fn $lim(mut self, lower: f64, upper: f64) -> Self {
            self.$a.limits = Some((lower, upper));
            self
        }

        /// Place major ticks every `major` and minor ticks every `minor`.
        #[must_use]
        pub fn $ticks(mut self, major: f64, minor: f64) -> Self {
            self.$a.ticks = Some((major, minor));
            self
        }

        #[must_use]
        pub fn $log(mut self) -> Self {
            self.$a.log = true;
            self
        }
    }
}

impl AxesOptions {
    axis_setters!(x, xlabel, xlim, xticks, xlog);
    axis_setters!(y, ylabel, ylim, yticks, ylog);
    axis_setters!(z, zlabel, zlim, zticks, zlog);

    fn axes(&self) -> [(Axis, &AxisOptions); 3] {
        [(Axis::X, &self.x), (Axis::Y, &self.y), (Axis::Z, &self.z)]
    }
}

/// Legend options.  No legend is drawn unless `show` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    pub show: bool,
    pub title: Option<String>,
    pub columns: usize,
    /// Position of the legend box (`bbox_to_anchor`).
    pub anchor: Option<(f64, f64)>,
    /// List the entries in reverse order.
    pub reverse: bool,
}

impl Default for LegendOptions {
    fn default() -> Self {
        LegendOptions { show: false, title: None, columns: 1, anchor: None,
                        reverse: false }
    }
}

impl LegendOptions {
    /// Options showing the legend.
    pub fn shown() -> Self {
        LegendOptions { show: true, ..Self::default() }
    }

    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    #[must_use]
    pub fn anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Some((x, y));
        self
    }

    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// A figure drawing a list of [`DataSet`]s through a [`Backend`],
/// by default [`Matplotlib`].
///
/// Settings are collected first; [`Plot::plot`] draws the data sets
/// and [`Plot::save`] or [`Plot::display`] add the axes decorations
/// and legend and output the figure.
///
/// # Example
///
/// ```no_run
/// use mpl_scipub::{DataSet, Plot, PlotKind};
/// let x: Vec<f64> = (0 .. 100).map(|i| i as f64 / 10.).collect();
/// let sin: Vec<f64> = x.iter().map(|x| x.sin()).collect();
/// let cos: Vec<f64> = x.iter().map(|x| x.cos()).collect();
/// let mut plot = Plot::new();
/// plot.add_dataset(DataSet::from_xy(&x, &sin)?);
/// plot.add_dataset(DataSet::from_xy(&x, &cos)?.with_kind(PlotKind::Scatter));
/// plot.plot()?;
/// plot.save().format("png").to_file("target/trig")?;
/// # Ok::<(), mpl_scipub::Error>(())
/// ```
#[derive(Debug)]
pub struct Plot<B = Matplotlib> {
    backend: B,
    datasets: Vec<DataSet>,
    size: (f64, f64),
    text: TextSize,
    dimensions: u8,
    axes: AxesOptions,
    legend: LegendOptions,
    marker: Option<Marker>,
    marker_size: Option<MarkerSize>,
    // Figure created and data sets drawn.
    initialised: bool,
    // Decorations and legend added.
    finalised: bool,
}

impl Plot<Matplotlib> {
    /// Return a new plot drawn by Matplotlib.
    pub fn new() -> Self {
        Self::with_backend(Matplotlib::new())
    }
}

impl Default for Plot<Matplotlib> {
    fn default() -> Self { Self::new() }
}

impl<B> Plot<B> where B: Backend {
    /// Return a new plot drawn by `backend`.
    pub fn with_backend(backend: B) -> Self {
        Plot {
            backend,
            datasets: vec![],
            size: (4., 4.),
            text: TextSize::default(),
            dimensions: 2,
            axes: AxesOptions::default(),
            legend: LegendOptions::default(),
            marker: None,
            marker_size: None,
            initialised: false,
            finalised: false,
        }
    }

    pub fn backend(&self) -> &B { &self.backend }
    pub fn backend_mut(&mut self) -> &mut B { &mut self.backend }
    pub fn into_backend(self) -> B { self.backend }

    pub fn datasets(&self) -> &[DataSet] { &self.datasets }
    pub fn plot_size(&self) -> (f64, f64) { self.size }
    pub fn text_size(&self) -> TextSize { self.text }
    pub fn dimensions(&self) -> u8 { self.dimensions }
    pub fn axes(&self) -> &AxesOptions { &self.axes }
    pub fn legend(&self) -> &LegendOptions { &self.legend }

    /// Add a data set, drawn on top of the previous ones unless its
    /// order says otherwise.
    pub fn add_dataset(&mut self, dataset: DataSet) -> &mut Self {
        self.datasets.push(dataset);
        self
    }

    /// Set the figure size in inches (default 4 × 4).
    pub fn set_plot_size(&mut self, width: f64, height: f64) -> &mut Self {
        self.size = (width, height);
        self
    }

    /// Set the font sizes of the legend, titles and labels.
    pub fn set_text_size(&mut self, legend: f64, title: f64, label: f64
    ) -> &mut Self {
        self.text = TextSize { legend, title, label };
        self
    }

    /// Draw on 2D or 3D axes.  Any other dimension is rejected and
    /// leaves the plot unchanged.
    pub fn set_dimensions(&mut self, dim: u8) -> Result<&mut Self, Error> {
        if !(2 ..= 3).contains(&dim) {
            return Err(Error::InvalidDimensions(dim))
        }
        self.dimensions = dim;
        Ok(self)
    }

    /// Replace the options of all axes.
    pub fn set_axes(&mut self, axes: AxesOptions) -> &mut Self {
        self.axes = axes;
        self
    }

    pub fn set_legend(&mut self, legend: LegendOptions) -> &mut Self {
        self.legend = legend;
        self
    }

    /// Set the marker style and size of the data sets that do not
    /// choose their own.
    pub fn set_marker(&mut self, style: Option<Marker>,
                      size: Option<MarkerSize>) -> &mut Self {
        self.marker = style;
        self.marker_size = size;
        self
    }

    fn run(&mut self, command: Command) -> Result<(), Error> {
        debug!(call = command.name(), "forwarding");
        self.backend.execute(&command)
    }

    /// Create the figure if not done yet.
    fn initialise(&mut self) -> Result<(), Error> {
        if !self.initialised {
            self.run(Command::Figure { size: self.size, text: self.text,
                                       dimensions: self.dimensions })?;
            self.initialised = true;
            self.finalised = false;
        }
        Ok(())
    }

    /// Draw all data sets.  Every data set is checked and translated
    /// before anything is drawn: on error, nothing is forwarded.
    pub fn plot(&mut self) -> Result<(), Error> {
        for (i, ds) in self.datasets.iter().enumerate() {
            ds.validate(i, self.dimensions, self.marker_size.as_ref())?;
        }
        let commands = (0 .. self.datasets.len())
            .map(|i| self.draw(i))
            .collect::<Result<Vec<_>, _>>()?;
        self.initialise()?;
        for command in commands {
            self.run(command)?;
        }
        Ok(())
    }

    /// Command drawing the data set at `index`.
    fn draw(&self, index: usize) -> Result<Command, Error> {
        let ds = &self.datasets[index];
        let series = Series { label: ds.resolved_label(index),
                              order: ds.resolved_order(index) };
        let z = if self.dimensions == 3 { Some(ds.column(2)) } else { None };
        let (marker, size) = ds.resolved_marker(
            index, self.marker.as_ref(), self.marker_size.as_ref());
        // Per-point sizes only reach scatter plots, see `DataSet::validate`.
        let marker_size = match &size {
            MarkerSize::Fixed(s) => *s,
            MarkerSize::PerPoint(_) => 0.,
        };
        let command = match ds.kind() {
            PlotKind::Scatter => Command::Scatter {
                x: ds.column(0), y: ds.column(1), z,
                series,
                marker,
                size,
                paint: ds.resolved_paint(index)?,
            },
            PlotKind::Line => Command::Line {
                x: ds.column(0), y: ds.column(1), z,
                series,
                marker,
                marker_size,
                style: ds.line_style(),
                width: ds.line_width(),
                paint: ds.resolved_paint(index)?,
            },
            PlotKind::ErrorBar => Command::ErrorBar {
                x: ds.column(0), y: ds.column(1),
                xerr: ds.error_x().map(<[f64]>::to_vec),
                yerr: ds.error_y().map(<[f64]>::to_vec),
                series,
                marker,
                marker_size,
                style: ds.line_style(),
                width: ds.line_width(),
                bars: ds.error_bars(),
                paint: ds.resolved_paint(index)?,
            },
            PlotKind::ErrorShade => {
                let y = ds.column(1);
                let err = ds.error_y().unwrap_or_default();
                Command::ErrorShade {
                    x: ds.column(0),
                    lower: y.iter().zip(err).map(|(y, e)| y - e).collect(),
                    upper: y.iter().zip(err).map(|(y, e)| y + e).collect(),
                    series,
                    paint: ds.resolved_paint(index)?,
                }
            }
            PlotKind::Bar => {
                // Bars of the different data sets sit side by side
                // within the total width.
                let n = self.datasets.len();
                let total = ds.bar_width();
                let width = total / n as f64;
                let shift = - total / 2. + width / 2. + index as f64 * width;
                Command::Bar {
                    x: ds.column(0).into_iter().map(|x| x + shift).collect(),
                    height: ds.column(1),
                    width,
                    xerr: ds.error_x().map(<[f64]>::to_vec),
                    yerr: ds.error_y().map(<[f64]>::to_vec),
                    error_order: series.order + n as i32,
                    series,
                    paint: ds.resolved_paint(index)?,
                }
            }
            PlotKind::Heat | PlotKind::Contour => {
                let Data::Grid { x, y, z } = ds.data() else {
                    return Err(Error::InvalidData {
                        index, reason: "expected grid data".into() })
                };
                let (map, norm) = ds.surface(index)?;
                if ds.kind() == PlotKind::Heat {
                    let span = |a: &Array2<f64>| {
                        Norm::spanning(a.iter())
                            .map(|n| (n.vmin, n.vmax))
                            .unwrap_or((0., 1.)) };
                    let (x0, x1) = span(x);
                    let (y0, y1) = span(y);
                    Command::Heat {
                        z: z.clone(),
                        extent: [x0, x1, y0, y1],
                        map,
                        norm,
                        interpolation: ds.interpolation().map(str::to_string),
                    }
                } else {
                    Command::Contour {
                        x: x.clone(), y: y.clone(), z: z.clone(),
                        levels: ds.contour_levels(index)?,
                        map,
                        norm,
                        width: ds.line_width(),
                        style: ds.line_style(),
                    }
                }
            }
        };
        Ok(command)
    }

    /// Add axes decorations and the legend, once per figure.
    fn finalise(&mut self) -> Result<(), Error> {
        if !self.initialised {
            self.plot()?;
        }
        if self.finalised {
            return Ok(())
        }
        let dims = self.dimensions as usize;
        let mut commands = vec![];
        for (axis, opt) in self.axes.axes().into_iter().take(dims) {
            let label = opt.label.clone()
                .unwrap_or_else(|| axis.name().to_uppercase());
            commands.push(Command::Label { axis, label });
            if let Some((lower, upper)) = opt.limits {
                commands.push(Command::Limits { axis, lower, upper });
            }
            if let Some((major, minor)) = opt.ticks {
                commands.push(Command::Ticks { axis, major, minor });
            }
            if opt.log {
                commands.push(Command::LogScale { axis });
            }
        }
        if self.legend.show {
            commands.push(Command::Legend {
                title: self.legend.title.clone(),
                // Style sheets may bypass `LegendOptions::columns`.
                columns: self.legend.columns.max(1),
                anchor: self.legend.anchor,
                reverse: self.legend.reverse,
            });
        }
        for c in commands {
            self.run(c)?;
        }
        self.finalised = true;
        Ok(())
    }

    /// Display the figure.  The figure is released afterwards: the next
    /// call to [`Plot::plot`] starts a new one.
    pub fn display(&mut self) -> Result<(), Error> {
        self.finalise()?;
        info!(datasets = self.datasets.len(), "displaying figure");
        self.run(Command::Show)?;
        self.initialised = false;
        self.finalised = false;
        Ok(())
    }

    /// Save the figure, see [`Savefig`].
    pub fn save(&mut self) -> Savefig<'_, B> {
        Savefig { plot: self, format: "pdf".to_string(), dpi: 400. }
    }
}

/// Options to save a [`Plot`] to a file.
pub struct Savefig<'a, B> {
    plot: &'a mut Plot<B>,
    format: String,
    dpi: f64,
}

impl<'a, B> Savefig<'a, B> where B: Backend {
    /// File format, given as the file extension (default "pdf").
    #[must_use]
    pub fn format(mut self, format: &str) -> Self {
        self.format = format.trim_start_matches('.').to_string();
        self
    }

    /// Resolution in dots per inch (default 400).  Non-positive values
    /// are ignored.
    #[must_use]
    pub fn dpi(mut self, dpi: f64) -> Self {
        if dpi > 0. {
            self.dpi = dpi;
        } else {
            warn!(dpi, "ignoring non-positive resolution");
        }
        self
    }

    /// Save the figure to `name` followed by the format extension.
    pub fn to_file(self, name: impl Into<PathBuf>) -> Result<PathBuf, Error> {
        let mut path = name.into().into_os_string();
        path.push(".");
        path.push(&self.format);
        let path = PathBuf::from(path);
        self.plot.finalise()?;
        info!(path = %path.display(), dpi = self.dpi, "saving figure");
        self.plot.run(Command::Save { path: path.clone(), dpi: self.dpi })?;
        Ok(path)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use crate::{
        backend::Recorder,
        command::ErrorBars,
        style::{LineStyle, Paint},
    };

    fn recorder() -> Plot<Recorder> {
        Plot::with_backend(Recorder::default())
    }

    fn xy(y: &[f64]) -> DataSet {
        let x: Vec<f64> = (0 .. y.len()).map(|i| i as f64).collect();
        DataSet::from_xy(&x, y).unwrap()
    }

    #[test]
    fn defaults() {
        let plot = recorder();
        assert_eq!(plot.plot_size(), (4., 4.));
        assert_eq!(plot.text_size(), TextSize { legend: 10., title: 10.,
                                                label: 10. });
        assert_eq!(plot.dimensions(), 2);
        assert_eq!(plot.axes().x.label, None);
        assert!(!plot.legend().show);
        assert!(plot.datasets().is_empty());
    }

    #[test]
    fn dimensions_are_2_or_3() {
        let mut plot = recorder();
        assert!(matches!(plot.set_dimensions(4),
                         Err(Error::InvalidDimensions(4))));
        assert!(matches!(plot.set_dimensions(1),
                         Err(Error::InvalidDimensions(1))));
        assert_eq!(plot.dimensions(), 2);
        plot.set_dimensions(3).unwrap();
        assert_eq!(plot.dimensions(), 3);
    }

    #[test]
    fn line_and_scatter() {
        let mut plot = recorder();
        plot.set_plot_size(6., 3.).set_text_size(8., 12., 9.);
        plot.add_dataset(xy(&[1., 2.]))
            .add_dataset(xy(&[3., 4.]).with_kind(PlotKind::Scatter)
                         .with_label("pts").with_colour("red"));
        plot.plot().unwrap();
        let c = plot.backend().commands();
        assert_eq!(c[0], Command::Figure {
            size: (6., 3.),
            text: TextSize { legend: 8., title: 12., label: 9. },
            dimensions: 2 });
        assert_eq!(c[1], Command::Line {
            x: vec![0., 1.], y: vec![1., 2.], z: None,
            series: Series { label: "data_0".into(), order: 0 },
            marker: None,
            marker_size: 0.,
            style: LineStyle::Solid,
            width: 2.,
            paint: Paint::FromMap { map: "Set1".into(), index: 0 } });
        assert_eq!(c[2], Command::Scatter {
            x: vec![0., 1.], y: vec![3., 4.], z: None,
            series: Series { label: "pts".into(), order: 1 },
            marker: Some(Marker::TriangleDown),
            size: MarkerSize::Fixed(10.),
            paint: Paint::Named("red".into()) });
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn plot_wide_marker() {
        let mut plot = recorder();
        plot.set_marker(Some(Marker::Cross), Some(MarkerSize::Fixed(4.)));
        plot.add_dataset(xy(&[1.]));
        plot.add_dataset(xy(&[1.]).with_marker("o"));
        plot.plot().unwrap();
        let markers: Vec<_> = plot.backend().commands().iter()
            .filter_map(|c| match c {
                Command::Line { marker, marker_size, .. } =>
                    Some((marker.clone(), *marker_size)),
                _ => None })
            .collect();
        assert_eq!(markers, [(Some(Marker::Cross), 4.),
                             (Some(Marker::Circle), 4.)]);
    }

    #[test]
    fn bars_side_by_side() {
        let mut plot = recorder();
        for _ in 0 .. 2 {
            plot.add_dataset(xy(&[5., 6.]).with_kind(PlotKind::Bar)
                             .with_bar_width(0.8));
        }
        // Drawing twice must not shift the bars twice.
        plot.plot().unwrap();
        plot.plot().unwrap();
        let bars: Vec<_> = plot.backend().commands().iter()
            .filter_map(|c| match c {
                Command::Bar { x, width, error_order, .. } =>
                    Some((x.clone(), *width, *error_order)),
                _ => None })
            .collect();
        let first = (vec![-0.2, 0.8], 0.4, 2);
        let second = (vec![0.2, 1.2], 0.4, 3);
        assert_eq!(bars.len(), 4);
        for (b, expected) in bars.iter().zip([&first, &second, &first, &second]) {
            assert_eq!(b.1, expected.1);
            assert_eq!(b.2, expected.2);
            for (u, v) in b.0.iter().zip(&expected.0) {
                assert!((u - v).abs() < 1e-12);
            }
        }
        // A single figure is created.
        assert_eq!(plot.backend().names().iter()
                   .filter(|&&n| n == "figure").count(), 1);
    }

    #[test]
    fn errors() {
        let mut plot = recorder();
        let mut bars = xy(&[1., 2.]).with_kind(PlotKind::ErrorBar)
            .with_errors(Some(vec![0.1, 0.2]), Some(vec![0.3, 0.4]));
        bars.set_error(Some(0.5), 2, 3.);
        plot.add_dataset(bars);
        plot.add_dataset(xy(&[1., 2.]).with_kind(PlotKind::ErrorShade)
                         .with_errors(None, Some(vec![0.5, 1.])));
        plot.plot().unwrap();
        let c = plot.backend().commands();
        match &c[1] {
            Command::ErrorBar { xerr, yerr, bars, .. } => {
                assert_eq!(xerr.as_deref(), Some(&[0.1, 0.2][..]));
                assert_eq!(yerr.as_deref(), Some(&[0.3, 0.4][..]));
                assert_eq!(*bars, ErrorBars { width: Some(0.5), interval: 2,
                                              cap: 3. });
            }
            other => panic!("unexpected {:?}", other),
        }
        match &c[2] {
            Command::ErrorShade { lower, upper, .. } => {
                assert_eq!(lower, &[0.5, 1.]);
                assert_eq!(upper, &[1.5, 3.]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn heat_and_contour() {
        let x = array![[-1., 1.], [-1., 1.]];
        let y = array![[-2., -2.], [2., 2.]];
        let z = array![[0., 1.], [1., 2.]];
        let heat = DataSet::grid(x.clone(), y.clone(), z.clone()).unwrap()
            .with_interpolation("bilinear");
        let mut contour = DataSet::grid(x, y, z).unwrap()
            .with_kind(PlotKind::Contour)
            .with_colour_map("Greys")
            .with_line(LineStyle::Dashed, 1.);
        contour.set_contours(None, 3, None);
        let mut plot = recorder();
        plot.add_dataset(heat).add_dataset(contour);
        plot.plot().unwrap();
        let c = plot.backend().commands();
        match &c[1] {
            Command::Heat { extent, map, norm, interpolation, .. } => {
                assert_eq!(extent, &[-1., 1., -2., 2.]);
                assert_eq!(map, "coolwarm");
                assert_eq!(*norm, Norm::new(0., 2.));
                assert_eq!(interpolation.as_deref(), Some("bilinear"));
            }
            other => panic!("unexpected {:?}", other),
        }
        match &c[2] {
            Command::Contour { levels, map, width, style, .. } => {
                assert_eq!(levels, &[0., 1., 2.]);
                assert_eq!(map, "Greys");
                assert_eq!(*width, 1.);
                assert_eq!(*style, LineStyle::Dashed);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn three_dimensions() {
        let mut plot = recorder();
        plot.set_dimensions(3).unwrap();
        plot.add_dataset(DataSet::from_xyz(&[0.], &[1.], &[2.]).unwrap());
        plot.save().to_file("target/unused").unwrap();
        let c = plot.backend().commands();
        assert!(matches!(&c[1], Command::Line { z: Some(z), .. } if z == &[2.]));
        assert_eq!(plot.backend().names(),
                   ["figure", "plot", "set_label", "set_label", "set_label",
                    "savefig"]);

        let mut plot = recorder();
        plot.set_dimensions(3).unwrap();
        plot.add_dataset(xy(&[1.]).with_kind(PlotKind::Bar));
        assert!(matches!(plot.plot(), Err(Error::Unsupported { .. })));
        assert!(plot.backend().commands().is_empty());
    }

    #[test]
    fn invalid_dataset_stops_everything() {
        let mut plot = recorder();
        plot.add_dataset(xy(&[1.]));
        plot.add_dataset(xy(&[1.]).with_kind(PlotKind::Heat));
        match plot.plot() {
            Err(Error::InvalidData { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {:?}", other),
        }
        assert!(plot.backend().commands().is_empty());
    }

    #[test]
    fn per_point_sizes_checked_before_drawing() {
        let mut plot = recorder();
        plot.add_dataset(xy(&[1., 2.]));
        plot.add_dataset(xy(&[1., 2.]).with_marker_size(vec![1., 2.]));
        match plot.plot() {
            Err(Error::InvalidData { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {:?}", other),
        }
        assert!(plot.backend().commands().is_empty());
    }

    #[test]
    fn colour_values_checked_before_drawing() {
        let mut plot = recorder();
        plot.add_dataset(xy(&[1., 2.]));
        plot.add_dataset(xy(&[1., 2.]).with_kind(PlotKind::Scatter)
                         .with_colour(vec![f64::NAN, f64::NAN]));
        assert!(matches!(plot.plot(),
                         Err(Error::InvalidData { index: 1, .. })));
        assert!(plot.backend().commands().is_empty());
        // With a norm, the colour values need not be finite.
        let mut plot = recorder();
        plot.add_dataset(xy(&[1., 2.]).with_kind(PlotKind::Scatter)
                         .with_colour(vec![f64::NAN, f64::NAN])
                         .with_colour_norm(0., 1.));
        plot.plot().unwrap();
        assert_eq!(plot.backend().names(), ["figure", "scatter"]);
    }

    #[test]
    fn plot_wide_sizes_match_every_data_set() {
        let mut plot = recorder();
        plot.set_marker(None, Some(MarkerSize::PerPoint(vec![1., 2.])));
        plot.add_dataset(xy(&[1., 2., 3.]).with_kind(PlotKind::Scatter));
        assert!(matches!(plot.plot(),
                         Err(Error::InvalidData { index: 0, .. })));
        assert!(plot.backend().commands().is_empty());

        let mut plot = recorder();
        plot.set_marker(None, Some(MarkerSize::PerPoint(vec![1., 2.])));
        plot.add_dataset(xy(&[1., 2.]).with_kind(PlotKind::Scatter));
        plot.add_dataset(xy(&[1., 2.]).with_marker_size(0.));
        plot.plot().unwrap();
        assert_eq!(plot.backend().names(), ["figure", "scatter", "plot"]);
    }

    #[test]
    fn finalise_once() {
        let mut plot = recorder();
        plot.set_axes(AxesOptions::default().xlabel("t").xlim(0., 8.)
                      .ylim(-1., 1.).yticks(0.2, 0.05).ylog());
        plot.set_legend(LegendOptions::shown().title("T").columns(2)
                        .anchor(1., 0.5).reverse());
        plot.add_dataset(xy(&[1., 2.]));
        plot.plot().unwrap();
        plot.save().to_file("a").unwrap();
        plot.save().format("png").dpi(100.).to_file("b").unwrap();
        let c = plot.backend().commands();
        assert_eq!(&c[2 ..], &[
            Command::Label { axis: Axis::X, label: "t".into() },
            Command::Limits { axis: Axis::X, lower: 0., upper: 8. },
            Command::Label { axis: Axis::Y, label: "Y".into() },
            Command::Limits { axis: Axis::Y, lower: -1., upper: 1. },
            Command::Ticks { axis: Axis::Y, major: 0.2, minor: 0.05 },
            Command::LogScale { axis: Axis::Y },
            Command::Legend { title: Some("T".into()), columns: 2,
                              anchor: Some((1., 0.5)), reverse: true },
            Command::Save { path: "a.pdf".into(), dpi: 400. },
            Command::Save { path: "b.png".into(), dpi: 100. },
        ]);
    }

    #[test]
    fn display_releases_figure() {
        let mut plot = recorder();
        plot.add_dataset(xy(&[1.]));
        plot.display().unwrap();
        plot.plot().unwrap();
        plot.display().unwrap();
        assert_eq!(plot.backend().names(),
                   ["figure", "plot", "set_label", "set_label", "show",
                    "figure", "plot", "set_label", "set_label", "show"]);
    }
}
