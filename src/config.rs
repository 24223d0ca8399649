//! Style sheets: plot settings kept in YAML files and applied to any
//! number of plots.
//!
//! ```yaml
//! plot_size: [6, 4]
//! text_size: { legend: 8, title: 12, label: 10 }
//! axes:
//!   x: { label: "$t$ (s)", limits: [0, 10], ticks: [1, 0.2] }
//!   y: { label: "signal", log: true }
//! legend: { show: true, columns: 2 }
//! ```

use std::{fs, path::Path};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{
    backend::Backend,
    command::TextSize,
    plot::{AxesOptions, LegendOptions, Plot},
    Error,
};

/// Plot settings.  Missing entries leave the plot untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    /// Figure size in inches.
    pub plot_size: Option<(f64, f64)>,
    pub text_size: Option<TextSize>,
    pub dimensions: Option<u8>,
    pub axes: Option<AxesOptions>,
    pub legend: Option<LegendOptions>,
}

impl Style {
    pub fn from_yaml(s: &str) -> Result<Style, Error> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Read the style sheet at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Style, Error> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading style sheet");
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Apply the settings present in the style to `plot`.
    pub fn apply<B>(&self, plot: &mut Plot<B>) -> Result<(), Error>
    where B: Backend {
        if let Some(dim) = self.dimensions {
            plot.set_dimensions(dim)?;
        }
        if let Some((w, h)) = self.plot_size {
            plot.set_plot_size(w, h);
        }
        if let Some(t) = self.text_size {
            plot.set_text_size(t.legend, t.title, t.label);
        }
        if let Some(axes) = &self.axes {
            plot.set_axes(axes.clone());
        }
        if let Some(legend) = &self.legend {
            plot.set_legend(legend.clone());
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{backend::Recorder, command::Command};

    const SHEET: &str = r#"
plot_size: [6, 4]
text_size: { legend: 8, title: 12 }
axes:
  x: { label: "$t$", limits: [0, 10], ticks: [1, 0.2] }
  y: { log: true }
legend: { show: true, columns: 2 }
"#;

    #[test]
    fn apply_sheet() {
        let style = Style::from_yaml(SHEET).unwrap();
        let mut plot = Plot::with_backend(Recorder::default());
        style.apply(&mut plot).unwrap();
        assert_eq!(plot.plot_size(), (6., 4.));
        assert_eq!(plot.text_size(), TextSize { legend: 8., title: 12.,
                                                label: 10. });
        assert_eq!(plot.dimensions(), 2);
        let axes = plot.axes();
        assert_eq!(axes.x.label.as_deref(), Some("$t$"));
        assert_eq!(axes.x.limits, Some((0., 10.)));
        assert_eq!(axes.x.ticks, Some((1., 0.2)));
        // Unspecified entries keep their defaults.
        assert_eq!(axes.y.label, None);
        assert!(axes.y.log);
        assert!(plot.legend().show);
        assert_eq!(plot.legend().columns, 2);
        assert_eq!(plot.legend().title, None);
    }

    #[test]
    fn empty_sheet_changes_nothing() {
        let style = Style::from_yaml("{}").unwrap();
        assert_eq!(style, Style::default());
        let mut plot = Plot::with_backend(Recorder::default());
        style.apply(&mut plot).unwrap();
        assert_eq!(plot.plot_size(), (4., 4.));
        assert_eq!(plot.axes(), &AxesOptions::default());
    }

    #[test]
    fn bad_sheets() {
        assert!(matches!(Style::from_yaml("colour: red"),
                         Err(Error::Style(_))));
        let style = Style::from_yaml("dimensions: 4").unwrap();
        let mut plot = Plot::with_backend(Recorder::default());
        assert!(matches!(style.apply(&mut plot),
                         Err(Error::InvalidDimensions(4))));
        assert!(matches!(Style::load("/nonexistent/style.yaml"),
                         Err(Error::Io(_))));
    }

    #[test]
    fn legend_columns_at_least_one() {
        let style = Style::from_yaml("legend: { show: true, columns: 0 }")
            .unwrap();
        let mut plot = Plot::with_backend(Recorder::default());
        style.apply(&mut plot).unwrap();
        plot.save().to_file("legend").unwrap();
        let columns = plot.backend().commands().iter().find_map(|c| match c {
            Command::Legend { columns, .. } => Some(*columns),
            _ => None });
        assert_eq!(columns, Some(1));
    }

    #[test]
    fn yaml_round_trip() {
        let style = Style::from_yaml(SHEET).unwrap();
        let again = Style::from_yaml(&style.to_yaml().unwrap()).unwrap();
        assert_eq!(style, again);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.yaml");
        fs::write(&path, "dimensions: 3\nplot_size: [2, 2]\n").unwrap();
        let style = Style::load(&path).unwrap();
        assert_eq!(style.dimensions, Some(3));
        assert_eq!(style.plot_size, Some((2., 2.)));
    }
}
