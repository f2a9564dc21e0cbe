//! Quantile-quantile plot artist

use crate::artist::{impl_plotter_via_canvas, Artist, Canvas};
use crate::container::AxesWrapper;
use dataplot_core::{math, PlotSettings, Plotter, Reference, Result};
use tracing::debug;

/// Options for plotting a Q-Q plot
#[derive(Debug)]
pub struct QQOptions<'a> {
    pub dist: Reference,
    /// Number of quantiles to compare
    pub quantiles: usize,
    pub on: Option<&'a mut AxesWrapper>,
}

impl Default for QQOptions<'_> {
    fn default() -> Self {
        Self {
            dist: Reference::default(),
            quantiles: 30,
            on: None,
        }
    }
}

impl<'a> QQOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dist(mut self, dist: impl Into<Reference>) -> Self {
        self.dist = dist.into();
        self
    }

    pub fn quantiles(mut self, quantiles: usize) -> Self {
        self.quantiles = quantiles;
        self
    }

    pub fn on(mut self, ax: &'a mut AxesWrapper) -> Self {
        self.on = Some(ax);
        self
    }
}

/// Creates a Q-Q plot
#[derive(Debug, Clone, PartialEq)]
pub struct QQPlot {
    canvas: Canvas,
    pub dist: Reference,
    pub quantiles: usize,
}

impl Default for QQPlot {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            dist: Reference::default(),
            quantiles: 30,
        }
    }
}

impl QQPlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &QQOptions<'_>) -> Self {
        Self {
            canvas: Canvas::default(),
            dist: options.dist.clone(),
            quantiles: options.quantiles,
        }
    }
}

impl_plotter_via_canvas!(QQPlot);

impl Artist for QQPlot {
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
                .title("Quantile-Quantile Plot")
                .xlabel(format!("{} theoretical quantiles", self.dist.name()))
                .ylabel(format!("{label} quantiles")),
        )
        .loading(self.settings());

        let grid = self.dist.qq_grid(self.quantiles);
        let theoretical = self.dist.quantiles(&grid)?;
        let observed = math::nanquantiles(data, &grid)?;
        debug!(label, dist = self.dist.name(), quantiles = grid.len(), "painting q-q plot");

        let points: Vec<(f64, f64)> = theoretical
            .iter()
            .copied()
            .zip(observed.iter().copied())
            .collect();
        ax.scatter(None, points, 1.0);

        match math::linear_regression(&theoretical, &observed) {
            Ok((slope, intercept)) => {
                let finite = math::finite(&theoretical);
                let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                ax.line(
                    None,
                    vec![(lo, intercept + slope * lo), (hi, intercept + slope * hi)],
                    1.0,
                );
            }
            Err(err) => debug!(%err, "skipping q-q reference line"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Artwork;
    use approx::assert_relative_eq;
    use dataplot_core::Distribution;

    #[test]
    fn test_normal_qq_of_linear_transform_is_straight() {
        // A dense sample of 2 * N(0, 1) + 1
        let data: Vec<f64> = math::linspace(0.0, 1.0, 1001)[1..1000]
            .iter()
            .map(|&p| 2.0 * Distribution::Normal.ppf(p).unwrap() + 1.0)
            .collect();
        let qq = QQPlot { quantiles: 10, ..QQPlot::new() }.with_data(data, "x1");
        let mut ax = AxesWrapper::new();
        qq.paint(Some(&mut ax), None).unwrap();

        let s = ax.settings();
        assert_eq!(s.title.as_deref(), Some("Quantile-Quantile Plot"));
        assert_eq!(s.xlabel.as_deref(), Some("normal theoretical quantiles"));
        assert_eq!(s.ylabel.as_deref(), Some("x1 quantiles"));

        match &ax.artworks()[1] {
            Artwork::Line { points, .. } => {
                let (x0, y0) = points[0];
                let (x1, y1) = points[1];
                assert_relative_eq!((y1 - y0) / (x1 - x0), 2.0, epsilon = 0.05);
                assert_relative_eq!(y0 - 2.0 * x0, 1.0, epsilon = 0.05);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_exponential_grid_starts_at_zero() {
        let qq = QQPlot {
            dist: Reference::Dist(Distribution::Exponential),
            quantiles: 4,
            ..QQPlot::new()
        }
        .with_data(vec![0.0, 1.0, 2.0, 3.0, f64::INFINITY], "x1");
        let mut ax = AxesWrapper::new();
        qq.paint(Some(&mut ax), None).unwrap();
        match &ax.artworks()[0] {
            Artwork::Scatter { points, .. } => {
                assert_eq!(points.len(), 4);
                assert_eq!(points[0], (0.0, 0.0));
            }
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_reference_label() {
        let qq = QQPlot {
            dist: Reference::sample("y", vec![1.0, 2.0, 3.0]),
            ..QQPlot::new()
        }
        .with_data(vec![1.0, 2.0, 3.0], "x");
        let mut ax = AxesWrapper::new();
        qq.paint(Some(&mut ax), None).unwrap();
        assert_eq!(ax.settings().xlabel.as_deref(), Some("y theoretical quantiles"));
    }
}
