//! Broadcast proxy for dataplot
//!
//! A [`Multi`] holds an ordered group of items and fans one operation out
//! over all of them. The per-item results are combined by a reducer policy:
//! [`Collect`] wraps them in a new proxy, [`Cleaner`] collapses all-`None`
//! results, and [`FnReducer`] applies any closure. A reflex key threads each
//! item's result into the next item's call.
//!
//! # Example
//!
//! ```rust
//! use dataplot_multi::{FnReducer, Multi};
//!
//! let totals = Multi::new(vec![1, 2, 3]).with_reflex("running");
//! let running = totals.call(|_, x, prev: Option<&i32>| prev.copied().unwrap_or(0) + x);
//! assert_eq!(running.items(), &[1, 3, 6]);
//!
//! let sum = FnReducer::new(|v: Vec<i32>| v.into_iter().sum::<i32>());
//! let summed = Multi::new(vec![1, 2, 3]).with_reducer(sum);
//! assert_eq!(summed.call(|_, x, _| *x), 6);
//! ```

pub mod multi;

pub use multi::{single, Arg, Cleaner, Collect, FnReducer, Multi, OneOrMany, Reduce, Reducer};
