//! Core types for dataplot
//!
//! This crate holds what every other dataplot crate shares: the error type,
//! the plot settings record and the [`Plotter`] trait that manages it, the
//! reference distributions, and NaN-aware numeric helpers.
//!
//! # Example
//!
//! ```rust
//! use dataplot_core::{PlotSettings, Plotter, Style};
//!
//! let mut settings = PlotSettings::new().title("Returns");
//! settings.set_default(&PlotSettings::new().title("Histogram").style(Style::Ggplot));
//!
//! assert_eq!(settings.title.as_deref(), Some("Returns"));
//! assert_eq!(settings.style, Some(Style::Ggplot));
//! ```

pub mod distribution;
pub mod error;
pub mod math;
pub mod settings;

pub use distribution::{normal_pdf, Distribution, Reference};
pub use error::{Error, Result};
pub use settings::{
    LegendLoc, PlotSettings, Plotter, SettingKey, SettingValue, Style, SubplotParams,
};
