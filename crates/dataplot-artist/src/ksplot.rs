//! Kolmogorov-Smirnov plot artist

use crate::artist::{impl_plotter_via_canvas, Artist, Canvas};
use crate::container::AxesWrapper;
use dataplot_core::{math, Error, PlotSettings, Plotter, Reference, Result};
use tracing::debug;

/// Options for plotting a K-S plot
#[derive(Debug)]
pub struct KSOptions<'a> {
    pub dist: Reference,
    /// Number of probability levels between the edges
    pub dots: usize,
    /// Distance of the first and last probability level from 0 and 1
    pub edge_precision: f64,
    pub on: Option<&'a mut AxesWrapper>,
}

impl Default for KSOptions<'_> {
    fn default() -> Self {
        Self {
            dist: Reference::default(),
            dots: 100,
            edge_precision: 1e-6,
            on: None,
        }
    }
}

impl<'a> KSOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dist(mut self, dist: impl Into<Reference>) -> Self {
        self.dist = dist.into();
        self
    }

    pub fn dots(mut self, dots: usize) -> Self {
        self.dots = dots;
        self
    }

    pub fn edge_precision(mut self, edge_precision: f64) -> Self {
        self.edge_precision = edge_precision;
        self
    }

    pub fn on(mut self, ax: &'a mut AxesWrapper) -> Self {
        self.on = Some(ax);
        self
    }
}

/// Creates a K-S plot: the empirical CDF of the data against the reference
#[derive(Debug, Clone, PartialEq)]
pub struct KSPlot {
    canvas: Canvas,
    pub dist: Reference,
    pub dots: usize,
    pub edge_precision: f64,
}

impl Default for KSPlot {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            dist: Reference::default(),
            dots: 100,
            edge_precision: 1e-6,
        }
    }
}

impl KSPlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &KSOptions<'_>) -> Self {
        Self {
            canvas: Canvas::default(),
            dist: options.dist.clone(),
            dots: options.dots,
            edge_precision: options.edge_precision,
        }
    }
}

impl_plotter_via_canvas!(KSPlot);

impl Artist for KSPlot {
    type Reflex = ();

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn paint(&self, on: Option<&mut AxesWrapper>, _reflex: Option<()>) -> Result<()> {
        let (data, label, ax) = self.prepare(on)?;
        if !(0.0..0.5).contains(&self.edge_precision) {
            return Err(Error::InvalidParameter(format!(
                "edge precision {} must be in [0, 0.5)",
                self.edge_precision
            )));
        }
        ax.set_default(
            &PlotSettings::new()
                .title("Kolmogorov-Smirnov Plot")
                .xlabel("value")
                .ylabel("cumulative probability"),
        )
        .loading(self.settings());

        let e = self.edge_precision;
        let p = math::linspace(e, 1.0 - e, self.dots);
        let observed = math::nanquantiles(data, &p)?;
        let reference = self.dist.quantiles(&p)?;
        debug!(label, dist = self.dist.name(), dots = p.len(), "painting k-s plot");

        let zip = |q: Vec<f64>| {
            q.into_iter()
                .zip(p.iter().copied())
                .collect::<Vec<_>>()
        };
        ax.line(Some(label.to_string()), zip(observed), 1.0);
        ax.line(Some(self.dist.name().to_string()), zip(reference), 1.0);
        Ok(())
    }
}
