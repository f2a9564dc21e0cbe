//! Histogram artist

use crate::artist::{impl_plotter_via_canvas, Artist, Canvas};
use crate::container::AxesWrapper;
use dataplot_core::{math, normal_pdf, PlotSettings, Plotter, Result};
use tracing::debug;

/// How a histogram divides its data
#[derive(Debug, Clone, PartialEq)]
pub enum Bins {
    /// Number of equal-width bins over the finite values
    Count(usize),
    /// Explicit, increasing bin edges
    Edges(Vec<f64>),
}

impl Default for Bins {
    fn default() -> Self {
        Bins::Count(100)
    }
}

impl From<usize> for Bins {
    fn from(n: usize) -> Self {
        Bins::Count(n)
    }
}

impl From<Vec<f64>> for Bins {
    fn from(edges: Vec<f64>) -> Self {
        Bins::Edges(edges)
    }
}

/// Options for plotting a histogram
#[derive(Debug)]
pub struct HistOptions<'a> {
    pub bins: Bins,
    /// Overlay a normal density fitted to the data
    pub fit: bool,
    /// Normalise the bars to a probability density instead of counts
    pub density: bool,
    /// Reuse the first member's bins for every member of a group
    pub same_bin: bool,
    /// Append summary statistics to the x-axis label
    pub stats: bool,
    /// Axes to draw on; `None` creates a new figure
    pub on: Option<&'a mut AxesWrapper>,
}

impl Default for HistOptions<'_> {
    fn default() -> Self {
        Self {
            bins: Bins::default(),
            fit: true,
            density: true,
            same_bin: true,
            stats: true,
            on: None,
        }
    }
}

impl<'a> HistOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bins(mut self, bins: impl Into<Bins>) -> Self {
        self.bins = bins.into();
        self
    }

    pub fn fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    pub fn density(mut self, density: bool) -> Self {
        self.density = density;
        self
    }

    pub fn same_bin(mut self, same_bin: bool) -> Self {
        self.same_bin = same_bin;
        self
    }

    pub fn stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    pub fn on(mut self, ax: &'a mut AxesWrapper) -> Self {
        self.on = Some(ax);
        self
    }
}

/// Creates a histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    canvas: Canvas,
    pub bins: Bins,
    pub fit: bool,
    pub density: bool,
    pub same_bin: bool,
    pub stats: bool,
    /// Whether this is the only dataset on its axes
    pub only: bool,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            bins: Bins::default(),
            fit: true,
            density: true,
            same_bin: true,
            stats: true,
            only: true,
        }
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &HistOptions<'_>, only: bool) -> Self {
        Self {
            canvas: Canvas::default(),
            bins: options.bins.clone(),
            fit: options.fit,
            density: options.density,
            same_bin: options.same_bin,
            stats: options.stats,
            only,
        }
    }

    fn summary(label: &str, data: &[f64]) -> String {
        format!(
            "{label}: mean={:.3}, std={:.3}, skew={:.3}, kurt={:.3}",
            math::nanmean(data),
            math::nanstd(data, 0),
            math::skewness(data),
            math::kurtosis(data),
        )
    }
}

impl_plotter_via_canvas!(Histogram);

impl Artist for Histogram {
    /// Bin edges of the painted histogram
    type Reflex = Vec<f64>;

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn paint(&self, on: Option<&mut AxesWrapper>, reflex: Option<Vec<f64>>) -> Result<Vec<f64>> {
        let (data, label, ax) = self.prepare(on)?;
        ax.set_default(
            &PlotSettings::new()
                .title("Histogram")
                .alpha(if self.only { 1.0 } else { 0.5 })
                .xlabel("value")
                .ylabel(if self.density { "density" } else { "count" }),
        )
        .loading(self.settings());

        let edges = match reflex {
            Some(edges) if self.same_bin => edges,
            _ => match &self.bins {
                Bins::Count(n) => math::histogram_edges(data, *n)?,
                Bins::Edges(edges) => edges.clone(),
            },
        };
        let counts = math::histogram_counts(data, &edges)?;
        let heights = if self.density {
            math::density(&counts, &edges)
        } else {
            counts
        };
        debug!(label, bins = edges.len() - 1, "painting histogram");

        let alpha = ax.settings().alpha.unwrap_or(1.0);
        ax.bars(Some(label.to_string()), edges.clone(), heights, alpha);

        let (mean, std) = (math::nanmean(data), math::nanstd(data, 0));
        if self.fit && std.is_finite() && std > 0.0 {
            let curve = edges
                .iter()
                .map(|&x| Ok((x, normal_pdf(x, mean, std)?)))
                .collect::<Result<Vec<_>>>()?;
            ax.line(Some(format!("{label} · fit")), curve, alpha);
        }
        if self.stats {
            let xlabel = ax.settings().xlabel.clone().unwrap_or_default();
            let summary = Self::summary(label, data);
            ax.set_axes(&PlotSettings::new().xlabel(format!("{xlabel}\n{summary}")));
        }
        Ok(edges)
    }
}
