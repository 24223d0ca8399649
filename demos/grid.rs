/// Heat map with contour lines on top.

use std::error::Error;
use ndarray::Array2;
use mpl_scipub::{DataSet, LineStyle, Plot, PlotKind};

fn main() -> Result<(), Box<dyn Error>> {
    let (nx, ny) = (60, 40);
    let x = Array2::from_shape_fn((ny, nx), |(_, j)| -3. + 6. * j as f64 / nx as f64);
    let y = Array2::from_shape_fn((ny, nx), |(i, _)| -2. + 4. * i as f64 / ny as f64);
    let z = ndarray::Zip::from(&x).and(&y)
        .map_collect(|&x, &y| (x * x + y * y) * (-(x * x + y * y)).exp());
    let mut plot = Plot::new();
    plot.set_plot_size(6., 4.);
    plot.add_dataset(DataSet::grid(x.clone(), y.clone(), z.clone())?
                     .with_colour_map("viridis"));
    plot.add_dataset(DataSet::grid(x, y, z)?
                     .with_kind(PlotKind::Contour)
                     .with_colour_map("Greys")
                     .with_line(LineStyle::Dotted, 0.8));
    plot.save().format("png").dpi(200.).to_file("target/grid")?;
    Ok(())
}
