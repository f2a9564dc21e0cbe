//! Figure and axes wrappers
//!
//! A [`FigWrapper`] owns a grid of [`AxesWrapper`]s. Artists record
//! drawing primitives on the axes; when the figure scope ends, every axes is
//! finalised into an [`AxesScene`] and the figure into a [`Scene`], which is
//! then handed to the figure's [`Output`].

use crate::render;
use dataplot_core::{
    LegendLoc, PlotSettings, Plotter, Result, SettingKey, SettingValue, Style, SubplotParams,
};
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

/// One drawing primitive recorded on an axes
#[derive(Debug, Clone, PartialEq)]
pub enum Artwork {
    /// Histogram bars between consecutive `edges`
    Bars {
        label: Option<String>,
        edges: Vec<f64>,
        heights: Vec<f64>,
        alpha: f64,
        color: usize,
    },
    Line {
        label: Option<String>,
        points: Vec<(f64, f64)>,
        alpha: f64,
        color: usize,
    },
    Scatter {
        label: Option<String>,
        points: Vec<(f64, f64)>,
        alpha: f64,
        color: usize,
    },
}

impl Artwork {
    pub fn label(&self) -> Option<&str> {
        match self {
            Artwork::Bars { label, .. }
            | Artwork::Line { label, .. }
            | Artwork::Scatter { label, .. } => label.as_deref(),
        }
    }

    /// Index into the style palette
    pub fn color(&self) -> usize {
        match self {
            Artwork::Bars { color, .. }
            | Artwork::Line { color, .. }
            | Artwork::Scatter { color, .. } => *color,
        }
    }

    /// Finite points covered by this artwork, bar baselines included
    pub fn extent(&self) -> Vec<(f64, f64)> {
        let points: Vec<(f64, f64)> = match self {
            Artwork::Bars { edges, heights, .. } => edges
                .windows(2)
                .zip(heights)
                .flat_map(|(w, &h)| [(w[0], 0.0), (w[1], h)])
                .collect(),
            Artwork::Line { points, .. } | Artwork::Scatter { points, .. } => points.clone(),
        };
        points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }
}

/// Wrapper of one axes
///
/// Should be obtained from a [`FigWrapper`], never built standalone except
/// in tests.
#[derive(Debug, Clone, Default)]
pub struct AxesWrapper {
    settings: PlotSettings,
    artworks: Vec<Artwork>,
}

impl AxesWrapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title, axis labels, alpha and legend location of the axes
    pub fn set_axes(&mut self, settings: &PlotSettings) -> &mut Self {
        let axes_only = PlotSettings {
            title: settings.title.clone(),
            xlabel: settings.xlabel.clone(),
            ylabel: settings.ylabel.clone(),
            alpha: settings.alpha,
            legend_loc: settings.legend_loc,
            ..PlotSettings::default()
        };
        self.set(&axes_only)
    }

    fn next_color(&self) -> usize {
        self.artworks.len()
    }

    pub fn bars(
        &mut self,
        label: Option<String>,
        edges: Vec<f64>,
        heights: Vec<f64>,
        alpha: f64,
    ) -> &mut Self {
        let color = self.next_color();
        self.artworks.push(Artwork::Bars {
            label,
            edges,
            heights,
            alpha,
            color,
        });
        self
    }

    pub fn line(
        &mut self,
        label: Option<String>,
        points: Vec<(f64, f64)>,
        alpha: f64,
    ) -> &mut Self {
        let color = self.next_color();
        self.artworks.push(Artwork::Line {
            label,
            points,
            alpha,
            color,
        });
        self
    }

    pub fn scatter(
        &mut self,
        label: Option<String>,
        points: Vec<(f64, f64)>,
        alpha: f64,
    ) -> &mut Self {
        let color = self.next_color();
        self.artworks.push(Artwork::Scatter {
            label,
            points,
            alpha,
            color,
        });
        self
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    /// Freeze the axes into its final appearance
    fn finish(&self, title: Option<String>) -> AxesScene {
        let has_labels = self.artworks.iter().any(|a| a.label().is_some());
        AxesScene {
            title,
            xlabel: self.settings.xlabel.clone(),
            ylabel: self.settings.ylabel.clone(),
            legend: has_labels.then(|| self.settings.legend_loc.unwrap_or(LegendLoc::Best)),
            grid_alpha: self.settings.alpha.unwrap_or(1.0) / 2.0,
            artworks: self.artworks.clone(),
        }
    }
}

impl Plotter for AxesWrapper {
    fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut PlotSettings {
        &mut self.settings
    }
}

/// The final appearance of one axes
#[derive(Debug, Clone, PartialEq)]
pub struct AxesScene {
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    /// Legend location, present only when some artwork is labelled
    pub legend: Option<LegendLoc>,
    pub grid_alpha: f64,
    pub artworks: Vec<Artwork>,
}

impl AxesScene {
    /// Data ranges of all artworks, padded by 5% on every side
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let points: Vec<(f64, f64)> = self.artworks.iter().flat_map(Artwork::extent).collect();
        let span = |values: &mut dyn Iterator<Item = f64>| {
            let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
            if !lo.is_finite() || !hi.is_finite() {
                return (0.0, 1.0);
            }
            if lo == hi {
                return (lo - 0.5, hi + 0.5);
            }
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        };
        let x = span(&mut points.iter().map(|p| p.0));
        let y = span(&mut points.iter().map(|p| p.1));
        (x, y)
    }
}

/// A finished figure, ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub style: Style,
    /// Size in inches
    pub figsize: (u32, u32),
    pub dpi: f64,
    pub nrows: usize,
    pub ncols: usize,
    /// Figure-level title, used only for multi-axes figures
    pub suptitle: Option<String>,
    pub subplots: SubplotParams,
    pub axes: Vec<AxesScene>,
}

impl Scene {
    /// Pixel size of the rendered figure
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figsize;
        ((w as f64 * self.dpi).round() as u32, (h as f64 * self.dpi).round() as u32)
    }
}

/// Where a finished figure goes
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Output {
    /// Keep the scene in memory only
    #[default]
    Headless,
    Svg(PathBuf),
    Png(PathBuf),
}

impl Output {
    /// Render a scene to this target
    pub fn emit(&self, scene: &Scene) -> Result<()> {
        match self {
            Output::Headless => Ok(()),
            Output::Svg(path) => render::to_svg(scene, path),
            Output::Png(path) => render::to_png(scene, path),
        }
    }
}

/// Options for creating a figure
#[derive(Debug, Clone)]
pub struct FigureOptions {
    pub nrows: usize,
    pub ncols: usize,
    pub output: Output,
    pub settings: PlotSettings,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            nrows: 1,
            ncols: 1,
            output: Output::Headless,
            settings: PlotSettings::default(),
        }
    }
}

impl FigureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(mut self, nrows: usize, ncols: usize) -> Self {
        self.nrows = nrows;
        self.ncols = ncols;
        self
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn settings(mut self, settings: PlotSettings) -> Self {
        self.settings = settings;
        self
    }
}

const DEFAULT_DPI: f64 = 100.0;

/// Wrapper of a figure with `nrows * ncols` axes
#[derive(Debug)]
pub struct FigWrapper {
    nrows: usize,
    ncols: usize,
    entered: bool,
    /// Style fixed when the figure is entered
    style: Style,
    settings: PlotSettings,
    axes: Vec<AxesWrapper>,
    output: Output,
}

impl FigWrapper {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self::from_options(FigureOptions::new().grid(nrows, ncols))
    }

    pub fn from_options(options: FigureOptions) -> Self {
        Self {
            nrows: options.nrows.max(1),
            ncols: options.ncols.max(1),
            entered: false,
            style: Style::SeabornDarkgrid,
            settings: options.settings,
            axes: Vec::new(),
            output: options.output,
        }
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Set the title, size and style of the figure
    pub fn set_figure(&mut self, settings: &PlotSettings) -> &mut Self {
        let figure_only = PlotSettings {
            title: settings.title.clone(),
            figsize: settings.figsize,
            style: settings.style,
            dpi: settings.dpi,
            subplots_adjust: settings.subplots_adjust,
            ..PlotSettings::default()
        };
        self.set(&figure_only)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// The axes of the figure, row by row; empty until the figure is entered
    pub fn axes(&mut self) -> &mut [AxesWrapper] {
        &mut self.axes
    }

    pub fn ax(&mut self, index: usize) -> Option<&mut AxesWrapper> {
        self.axes.get_mut(index)
    }

    /// Apply defaults and create the axes grid
    fn enter(&mut self) {
        self.set_default(
            &PlotSettings::new()
                .style(Style::SeabornDarkgrid)
                .figsize(10, 5),
        );
        self.style = self.settings.style.unwrap_or(Style::SeabornDarkgrid);
        self.axes = (0..self.nrows * self.ncols)
            .map(|_| AxesWrapper::new())
            .collect();
        self.entered = true;
        debug!(nrows = self.nrows, ncols = self.ncols, "figure entered");
    }

    /// Finalise every axes and the figure itself
    fn finish(&self) -> Scene {
        let single = self.axes.len() == 1;
        let axes = self
            .axes
            .iter()
            .map(|ax| {
                let title = if single {
                    self.settings
                        .title
                        .clone()
                        .or_else(|| ax.settings().title.clone())
                } else {
                    ax.settings().title.clone()
                };
                ax.finish(title)
            })
            .collect();
        Scene {
            style: self.style,
            figsize: self.settings.figsize.unwrap_or((10, 5)),
            dpi: self.settings.dpi.unwrap_or(DEFAULT_DPI),
            nrows: self.nrows,
            ncols: self.ncols,
            suptitle: if single { None } else { self.settings.title.clone() },
            subplots: self.settings.subplots_adjust.unwrap_or_default(),
            axes,
        }
    }

    /// Run `draw` inside the figure scope
    ///
    /// The figure is finalised and emitted whether or not `draw` fails; an
    /// error from `draw` takes precedence over one from emitting.
    #[instrument(skip(self, draw), fields(nrows = self.nrows, ncols = self.ncols))]
    pub fn show<F>(mut self, draw: F) -> Result<Scene>
    where
        F: FnOnce(&mut FigWrapper) -> Result<()>,
    {
        self.enter();
        let drawn = draw(&mut self);
        let scene = self.finish();
        let emitted = self.output.emit(&scene);
        drawn?;
        emitted?;
        debug!(axes = scene.axes.len(), "figure released");
        Ok(scene)
    }
}

impl Plotter for FigWrapper {
    fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut PlotSettings {
        &mut self.settings
    }

    fn setting_check(&self, key: SettingKey, _value: &SettingValue) {
        if self.entered && key == SettingKey::Style {
            warn!(setting = %key, "figure setting has no effect once the figure is shown");
        }
    }
}
