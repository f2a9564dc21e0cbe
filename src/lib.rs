//! dataplot: formula-tracking datasets and statistical plots
//!
//! Wrap numeric arrays with [`data`], chain transforms and arithmetic on
//! them while a formula of the applied operations is kept, and draw
//! histograms, line charts, Q-Q and K-S plots. Groups of datasets answer the
//! same calls by broadcasting them over their members.
//!
//! # Example
//!
//! ```rust
//! use dataplot::prelude::*;
//!
//! let x = data(vec![vec![1.0, 2.0, 4.0], vec![2.0, 3.0, 5.0]], Labels::Auto)?;
//! let y = x.log().zscore();
//! assert_eq!(y.current_formula()[1], "(log(x2)-mean(log(x2)))/std(log(x2))");
//!
//! let scene = figure(1, 2).show(|fig| {
//!     let (left, right) = fig.axes().split_at_mut(1);
//!     y.hist(HistOptions::new().bins(5usize).on(&mut left[0]))?;
//!     y.qqplot(QQOptions::new().on(&mut right[0]))?;
//!     Ok(())
//! })?;
//! assert_eq!(scene.axes.len(), 2);
//! # Ok::<(), dataplot::Error>(())
//! ```

pub use dataplot_core::{
    math, normal_pdf, Distribution, Error, LegendLoc, PlotSettings, Plotter, Reference, Result,
    SettingKey, SettingValue, Style, SubplotParams,
};

pub use dataplot_multi::{
    single, Arg, Cleaner, Collect, FnReducer, Multi, OneOrMany, Reduce, Reducer,
};

pub use dataplot_artist::{
    figure, Artist, Artwork, AxesScene, AxesWrapper, Bins, Canvas, FigWrapper, FigureOptions,
    HistOptions, Histogram, KSOptions, KSPlot, LineChart, LineOptions, Output, QQOptions, QQPlot,
    Scene, Theme,
};

pub use dataplot_dataset::{
    data, BinaryOp, DataOperand, DataSet, Formula, Input, Labels, Operand, PlotDataSet,
    PlotDataSets, Priority,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        data, figure, BinaryOp, DataSet, Distribution, Error, HistOptions, KSOptions, Labels,
        LineOptions, PlotDataSet, PlotDataSets, PlotSettings, Plotter, QQOptions, Reference,
        Result, Style,
    };
}
