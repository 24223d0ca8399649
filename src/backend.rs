//! Receivers of the [`Command`]s produced by a plot.

use crate::{command::Command, Error};

/// Something that carries out Matplotlib calls.
///
/// [`Matplotlib`][crate::Matplotlib] performs them through Python;
/// [`Recorder`] only remembers them.
pub trait Backend {
    fn execute(&mut self, command: &Command) -> Result<(), Error>;
}

impl<B> Backend for &mut B where B: Backend + ?Sized {
    fn execute(&mut self, command: &Command) -> Result<(), Error> {
        (**self).execute(command)
    }
}

/// Backend keeping the commands in memory instead of drawing them.
///
/// # Example
///
/// ```
/// use mpl_scipub::{DataSet, Plot, Recorder};
/// let mut plot = Plot::with_backend(Recorder::default());
/// plot.add_dataset(DataSet::from_xy(&[0., 1.], &[1., 0.])?);
/// plot.plot()?;
/// assert_eq!(plot.backend().names(), ["figure", "plot"]);
/// # Ok::<(), mpl_scipub::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<Command>,
}

impl Recorder {
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Names of the recorded calls, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(Command::name).collect()
    }

    /// Remove and return the recorded commands.
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

impl Backend for Recorder {
    fn execute(&mut self, command: &Command) -> Result<(), Error> {
        self.commands.push(command.clone());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataSet, Plot, PlotKind};

    #[test]
    fn series_of_recorded_commands() {
        let mut plot = Plot::with_backend(Recorder::default());
        plot.add_dataset(DataSet::from_xy(&[0., 1.], &[1., 0.]).unwrap());
        plot.add_dataset(DataSet::from_xy(&[0., 1.], &[0., 1.]).unwrap()
                         .with_kind(PlotKind::Bar)
                         .with_label("bars").with_order(-1));
        plot.plot().unwrap();
        let commands = plot.backend_mut().take();
        assert!(plot.backend().commands().is_empty());
        let series: Vec<_> = commands.iter().filter_map(Command::series)
            .map(|s| (s.label.as_str(), s.order))
            .collect();
        assert_eq!(series, [("data_0", 0), ("bars", -1)]);
        assert_eq!(commands[0].series(), None);
    }

    #[test]
    fn borrowed_backend() {
        let mut recorder = Recorder::default();
        {
            let mut plot = Plot::with_backend(&mut recorder);
            plot.add_dataset(DataSet::from_xy(&[0.], &[0.]).unwrap());
            plot.plot().unwrap();
        }
        assert_eq!(recorder.names(), ["figure", "plot"]);
    }
}
