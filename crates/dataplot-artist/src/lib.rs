//! Drawing surfaces and artists for dataplot
//!
//! [`FigWrapper`] scopes a figure: it creates the axes grid, lets artists
//! record drawing primitives on the [`AxesWrapper`]s, and finalises
//! everything into a [`Scene`] which is rendered with `plotters` when the
//! figure's [`Output`] is a file.
//!
//! # Example
//!
//! ```rust
//! use dataplot_artist::{Artist, FigWrapper, Histogram};
//!
//! let hist = Histogram::new().with_data(vec![1.0, 2.0, 2.5, 4.0], "x1");
//! let scene = FigWrapper::new(1, 1)
//!     .show(|fig| {
//!         hist.paint(fig.ax(0), None)?;
//!         Ok(())
//!     })
//!     .unwrap();
//! assert_eq!(scene.axes[0].title.as_deref(), Some("Histogram"));
//! ```

pub mod artist;
pub mod container;
pub mod histogram;
pub mod ksplot;
pub mod linechart;
pub mod qqplot;
mod render;
pub mod theme;

pub use artist::{Artist, Canvas};
pub use container::{
    Artwork, AxesScene, AxesWrapper, FigWrapper, FigureOptions, Output, Scene,
};
pub use histogram::{Bins, HistOptions, Histogram};
pub use ksplot::{KSOptions, KSPlot};
pub use linechart::{LineChart, LineOptions};
pub use qqplot::{QQOptions, QQPlot};
pub use theme::Theme;

/// Create a figure with `nrows * ncols` axes
pub fn figure(nrows: usize, ncols: usize) -> FigWrapper {
    FigWrapper::new(nrows, ncols)
}
