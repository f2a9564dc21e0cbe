//! Line chart artist

use crate::artist::{impl_plotter_via_canvas, Artist, Canvas};
use crate::container::AxesWrapper;
use dataplot_core::{Error, PlotSettings, Plotter, Result};
use tracing::debug;

/// Options for plotting a line chart
#[derive(Debug, Default)]
pub struct LineOptions<'a> {
    /// x-coordinates; defaults to `0..n`
    pub ticks: Option<Vec<f64>>,
    /// Mark every point as well as joining them
    pub scatter: bool,
    pub on: Option<&'a mut AxesWrapper>,
}

impl<'a> LineOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(mut self, ticks: Vec<f64>) -> Self {
        self.ticks = Some(ticks);
        self
    }

    pub fn scatter(mut self, scatter: bool) -> Self {
        self.scatter = scatter;
        self
    }

    pub fn on(mut self, ax: &'a mut AxesWrapper) -> Self {
        self.on = Some(ax);
        self
    }
}

/// Creates a line chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChart {
    canvas: Canvas,
    pub ticks: Option<Vec<f64>>,
    pub scatter: bool,
}

impl LineChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &LineOptions<'_>) -> Self {
        Self {
            canvas: Canvas::default(),
            ticks: options.ticks.clone(),
            scatter: options.scatter,
        }
    }
}

impl_plotter_via_canvas!(LineChart);

impl Artist for LineChart {
    type Reflex = ();

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn paint(&self, on: Option<&mut AxesWrapper>, _reflex: Option<()>) -> Result<()> {
        let (data, label, ax) = self.prepare(on)?;
        ax.set_default(
            &PlotSettings::new()
                .title("Line Chart")
                .xlabel("ticks")
                .ylabel("value"),
        )
        .loading(self.settings());

        let xs: Vec<f64> = match &self.ticks {
            Some(ticks) if ticks.len() != data.len() => {
                return Err(Error::InvalidInput(format!(
                    "{} ticks given for {} values",
                    ticks.len(),
                    data.len()
                )))
            }
            Some(ticks) => ticks.clone(),
            None => (0..data.len()).map(|i| i as f64).collect(),
        };
        let points: Vec<(f64, f64)> = xs.into_iter().zip(data.iter().copied()).collect();
        debug!(label, points = points.len(), "painting line chart");

        let alpha = ax.settings().alpha.unwrap_or(1.0);
        if self.scatter {
            ax.scatter(None, points.clone(), alpha);
        }
        ax.line(Some(label.to_string()), points, alpha);
        Ok(())
    }
}
