//! Formula-tracking datasets for dataplot
//!
//! A [`PlotDataSet`] wraps a numeric array and records every operation
//! applied to it as a [`Formula`]. Formulas render with the fewest
//! parentheses that keep their meaning, and substitute the dataset's label
//! only when rendered.
//!
//! Several datasets form a [`PlotDataSets`] group; [`DataSet`] is either
//! one of them and answers every transform, arithmetic and plotting call.
//!
//! # Example
//!
//! ```rust
//! use dataplot_dataset::{data, HistOptions, Labels};
//!
//! let x = data(vec![1.0, 2.0, 3.0], Labels::Auto)?;
//! let y = (&x.log() + 1.0) * 2.0;
//! assert_eq!(y.current_formula(), vec!["(log(x1)+1)*2"]);
//!
//! let scene = y.hist(HistOptions::new().bins(10usize))?;
//! assert!(scene.is_some());
//! # Ok::<(), dataplot_core::Error>(())
//! ```

pub mod dataset;
pub mod factory;
pub mod format;
pub mod group;
mod ops;
mod plotting;

pub use dataset::{Operand, PlotDataSet};
pub use factory::{data, Input, Labels};
pub use format::{BinaryOp, Formula, Priority};
pub use group::{DataOperand, DataSet, PlotDataSets};

pub use dataplot_artist::{HistOptions, KSOptions, LineOptions, QQOptions, Scene};
