// Example for the README

use mpl_scipub::{AxesOptions, DataSet, LegendOptions, Plot};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let x: Vec<_> = (0 .. 200).map(|i| i as f64 / 20.).collect();
    let sin: Vec<_> = x.iter().map(|x| x.sin()).collect();
    let cos: Vec<_> = x.iter().map(|x| x.cos()).collect();
    let mut plot = Plot::new();
    plot.add_dataset(DataSet::from_xy(&x, &sin)?.with_label(r"$\sin x$"));
    plot.add_dataset(DataSet::from_xy(&x, &cos)?.with_label(r"$\cos x$")
                     .with_marker("o").with_marker_size(3.));
    plot.set_axes(AxesOptions::default().xlim(0., 10.).xlabel(r"$x$"))
        .set_legend(LegendOptions::shown().columns(2));
    plot.plot()?;
    let path = plot.save().format("svg").to_file("target/simple_line")?;
    println!("Saved {}", path.display());
    Ok(())
}
