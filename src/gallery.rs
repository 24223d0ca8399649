//! Example plots.

use std::f64::consts::PI;
use clap::ValueEnum;
use ndarray::Array2;
use mpl_scipub::{
    AxesOptions, Backend, DataSet, Error, LegendOptions, LineStyle, Marker,
    Plot, PlotKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Example {
    /// Two overlaid line graphs.
    SimpleLine,
    /// Two overlaid scatter plots.
    SimpleScatter,
    /// Line graphs with custom styles, limits and ticks.
    AdvancedLine,
    /// Scatter plot coloured by value, with a fitted line on top.
    ScatterAndLine,
    /// Three bar data sets side by side.
    Bar,
    /// Line with error bars.
    ErrorBar,
    /// Line with a shaded error region.
    ErrorShade,
    /// Heat map of a radial function.
    Heat,
    /// Contour lines of a radial function.
    Contour,
    /// Curve in 3D.
    Line3d,
    /// Scatter plots in 3D, coloured and sized by value.
    Scatter3d,
}

/// `n` values evenly spaced over [`a`, `b`].
fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    ndarray::Array1::linspace(a, b, n).to_vec()
}

/// Quasi-random numbers in [0, 1) (van der Corput sequence in `base`).
fn quasi_random(n: usize, base: usize) -> Vec<f64> {
    (1 ..= n).map(|mut i| {
        let (mut r, mut f) = (0., 1.);
        while i > 0 {
            f /= base as f64;
            r += f * (i % base) as f64;
            i /= base;
        }
        r
    }).collect()
}

fn map(x: &[f64], f: impl Fn(f64) -> f64) -> Vec<f64> {
    x.iter().map(|&x| f(x)).collect()
}

/// Grids `x` ∈ [-1, 1), `y` ∈ [-2, 2) and z = r² exp(-r²).
fn radial() -> (Array2<f64>, Array2<f64>, Array2<f64>) {
    let x = Array2::from_shape_fn((40, 20), |(_, j)| -1. + j as f64 * 0.1);
    let y = Array2::from_shape_fn((40, 20), |(i, _)| -2. + i as f64 * 0.1);
    let r2 = &x * &x + &y * &y;
    let z = r2.mapv(|r2| r2 * (-r2).exp());
    (x, y, z)
}

/// Add the data and settings of `example` to `plot`.
pub fn build<B>(plot: &mut Plot<B>, example: Example) -> Result<(), Error>
where B: Backend {
    let x = linspace(0., 10., 100);
    match example {
        Example::SimpleLine => {
            plot.add_dataset(DataSet::from_xy(&x, &map(&x, f64::sin))?);
            plot.add_dataset(DataSet::from_xy(&x, &map(&x, f64::cos))?);
            plot.set_axes(AxesOptions::default().xticks(PI / 2., PI / 8.));
        }
        Example::SimpleScatter => {
            for base in [2, 3] {
                plot.add_dataset(DataSet::from_xy(&quasi_random(100, base),
                                                  &quasi_random(100, base + 3))?
                                 .with_kind(PlotKind::Scatter));
            }
        }
        Example::AdvancedLine => {
            plot.add_dataset(DataSet::from_xy(&x, &map(&x, f64::sin))?
                             .with_line(LineStyle::Dashed, 2.)
                             .with_marker(Marker::Cross)
                             .with_marker_size(5.)
                             .with_colour("firebrick"));
            let mut cosine = DataSet::from_xy(&x, &map(&x, f64::cos))?;
            cosine.set_line(LineStyle::Dotted, 1.)
                .set_marker(Some(Marker::Plus), 5.)
                .set_colour(Some("skyblue".into()), None, None);
            plot.add_dataset(cosine);
            plot.set_axes(AxesOptions::default()
                          .xlim(0., 8.).ylim(-1.1, 1.1)
                          .xlabel(r"$x$").ylabel(r"$f\left(x\right)$")
                          .xticks(1., 0.1).yticks(0.2, 0.05));
        }
        Example::ScatterAndLine => {
            let n = 500;
            let xs = map(&quasi_random(n, 2), |u| 10. * u);
            // Centred noise in [-2, 2).
            let noise = map(&quasi_random(n, 3), |u| 4. * u - 2.);
            let ys: Vec<f64> = xs.iter().zip(&noise)
                .map(|(x, e)| 2. * x + 1. + e).collect();
            plot.add_dataset(DataSet::from_xy(&xs, &ys)?
                             .with_kind(PlotKind::Scatter)
                             .with_order(0)
                             .with_label("Random")
                             .with_colour(noise)
                             .with_colour_map("coolwarm"));
            plot.add_dataset(DataSet::from_xy(&x, &map(&x, |x| 2. * x + 1.))?
                             .with_colour("black")
                             .with_order(1)
                             .with_label("Linear"));
            plot.set_legend(LegendOptions::shown());
        }
        Example::Bar => {
            let xs = linspace(0., 7., 8);
            for (colour, base) in [("black", 2), ("steelblue", 3),
                                   ("forestgreen", 5)] {
                let heights = map(&quasi_random(8, base), |u| 10. * u);
                plot.add_dataset(DataSet::from_xy(&xs, &heights)?
                                 .with_kind(PlotKind::Bar)
                                 .with_colour(colour)
                                 .with_bar_width(0.8));
            }
            plot.set_axes(AxesOptions::default().xticks(1., 1.).ylim(0., 15.));
            plot.set_legend(LegendOptions::shown());
            plot.set_text_size(8., 10., 10.);
        }
        Example::ErrorBar => {
            let xs = linspace(-5., 5., 30);
            let err = map(&xs, |x| 0.05 + 0.02 * x.abs());
            let mut ds = DataSet::from_xy(&xs, &map(&xs, |x| (-0.5 * x * x).exp()))?
                .with_kind(PlotKind::ErrorBar)
                .with_errors(None, Some(err))
                .with_marker(Marker::Circle)
                .with_marker_size(3.);
            ds.set_error(Some(1.), 2, 2.);
            plot.add_dataset(ds);
        }
        Example::ErrorShade => {
            let err = map(&x, |x| 0.1 + 0.02 * x);
            plot.add_dataset(DataSet::from_xy(&x, &map(&x, f64::sin))?
                             .with_kind(PlotKind::ErrorShade)
                             .with_errors(None, Some(err))
                             .with_colour("lightsteelblue")
                             .with_order(0));
            plot.add_dataset(DataSet::from_xy(&x, &map(&x, f64::sin))?
                             .with_colour("navy")
                             .with_order(1));
        }
        Example::Heat => {
            let (x, y, z) = radial();
            plot.add_dataset(DataSet::grid(x, y, z)?
                             .with_colour_map("Blues")
                             .with_colour_norm(0., 0.2)
                             .with_interpolation("bilinear"));
        }
        Example::Contour => {
            let (x, y, z) = radial();
            let mut ds = DataSet::grid(x, y, z.mapv(|z| z - 0.2))?
                .with_kind(PlotKind::Contour)
                .with_colour_map("coolwarm")
                .with_colour_norm(-0.2, 0.2)
                .with_line(LineStyle::Dashed, 1.);
            ds.set_contours(None, 30, Some((-0.5, 0.5)));
            plot.add_dataset(ds);
        }
        Example::Line3d => {
            // Heart curve climbing along z.
            let t = linspace(0., 50., 1000);
            let hx = map(&t, |t| 16. * t.sin().powi(3));
            let hy = map(&t, |t| 13. * t.cos() - 5. * (2. * t).cos()
                         - 2. * (3. * t).cos() - (4. * t).cos());
            plot.set_dimensions(3)?;
            plot.add_dataset(DataSet::from_xyz(&hx, &hy, &t)?);
        }
        Example::Scatter3d => {
            plot.set_dimensions(3)?;
            let u = quasi_random(100, 2);
            let v = quasi_random(100, 3);
            let w = quasi_random(100, 5);
            plot.add_dataset(DataSet::from_xyz(&u, &v, &w)?
                             .with_kind(PlotKind::Scatter)
                             .with_colour(w.clone())
                             .with_colour_map("Reds"));
            plot.add_dataset(DataSet::from_xyz(&v, &w, &u)?
                             .with_kind(PlotKind::Scatter)
                             .with_colour("blue")
                             .with_marker_size(map(&u, |u| 10. * u)));
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use mpl_scipub::{Command, Recorder};

    #[test]
    fn quasi_random_in_unit_interval() {
        let u = quasi_random(50, 3);
        assert_eq!(u.len(), 50);
        assert!(u.iter().all(|&u| (0. .. 1.).contains(&u)));
        assert_eq!(&quasi_random(3, 2), &[0.5, 0.25, 0.75]);
    }

    #[test]
    fn every_example_draws() {
        for &example in Example::value_variants() {
            let mut plot = Plot::with_backend(Recorder::default());
            build(&mut plot, example).unwrap();
            plot.plot().unwrap_or_else(|e| panic!("{:?}: {}", example, e));
            let n = plot.datasets().len();
            let names = plot.backend().names();
            assert_eq!(names[0], "figure");
            assert_eq!(names.len(), n + 1, "{:?}", example);
        }
    }

    #[test]
    fn bars_are_grouped() {
        let mut plot = Plot::with_backend(Recorder::default());
        build(&mut plot, Example::Bar).unwrap();
        plot.plot().unwrap();
        let lefts: Vec<f64> = plot.backend().commands().iter()
            .filter_map(|c| match c {
                Command::Bar { x, .. } => Some(x[0]),
                _ => None })
            .collect();
        assert_eq!(lefts.len(), 3);
        assert!(lefts[0] < lefts[1] && lefts[1] < lefts[2]);
    }
}
