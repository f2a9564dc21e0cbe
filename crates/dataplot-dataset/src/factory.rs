//! Building datasets from raw arrays

use crate::dataset::PlotDataSet;
use crate::group::{DataSet, PlotDataSets};
use dataplot_core::{Error, Result};
use tracing::debug;

/// One array, or a list of arrays
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    One(Vec<f64>),
    Many(Vec<Vec<f64>>),
}

impl From<Vec<f64>> for Input {
    fn from(values: Vec<f64>) -> Self {
        Input::One(values)
    }
}

impl From<&[f64]> for Input {
    fn from(values: &[f64]) -> Self {
        Input::One(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Input {
    fn from(values: [f64; N]) -> Self {
        Input::One(values.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for Input {
    fn from(values: Vec<Vec<f64>>) -> Self {
        Input::Many(values)
    }
}

/// Labels for the arrays handed to [`data`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Labels {
    /// Positional names `x1, x2, ...`
    #[default]
    Auto,
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Labels {
    fn from(label: &str) -> Self {
        Labels::One(label.to_string())
    }
}

impl From<String> for Labels {
    fn from(label: String) -> Self {
        Labels::One(label)
    }
}

impl From<Vec<&str>> for Labels {
    fn from(labels: Vec<&str>) -> Self {
        Labels::Many(labels.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Labels {
    fn from(labels: Vec<String>) -> Self {
        Labels::Many(labels)
    }
}

impl<T: Into<Labels>> From<Option<T>> for Labels {
    fn from(labels: Option<T>) -> Self {
        labels.map_or(Labels::Auto, Into::into)
    }
}

/// Wrap raw arrays into a dataset
///
/// A single array gives [`DataSet::Single`], labelled `x1` unless a label
/// is given. A list of arrays gives [`DataSet::Group`], with one label per
/// array.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for a list of labels with a single array, or
///   a label count that differs from the array count
/// - [`Error::EmptyGroup`] for an empty list of arrays
pub fn data(values: impl Into<Input>, labels: impl Into<Labels>) -> Result<DataSet> {
    match (values.into(), labels.into()) {
        (Input::One(values), Labels::Auto) => Ok(PlotDataSet::new(values, "x1").into()),
        (Input::One(values), Labels::One(label)) => Ok(PlotDataSet::new(values, label).into()),
        (Input::One(_), Labels::Many(labels)) => Err(Error::InvalidInput(format!(
            "got {} labels for a single array; a list of labels is only for a list of arrays",
            labels.len()
        ))),
        (Input::Many(arrays), labels) => {
            let labels = match labels {
                Labels::Auto => (1..=arrays.len()).map(|i| format!("x{i}")).collect(),
                Labels::Many(labels) if labels.len() == arrays.len() => labels,
                Labels::Many(labels) => {
                    return Err(Error::InvalidInput(format!(
                        "got {} labels for {} arrays",
                        labels.len(),
                        arrays.len()
                    )))
                }
                Labels::One(label) => {
                    return Err(Error::InvalidInput(format!(
                        "a list of arrays needs a list of labels, got '{label}'"
                    )))
                }
            };
            debug!(arrays = arrays.len(), "grouping arrays");
            let children = arrays
                .into_iter()
                .zip(labels)
                .map(|(values, label)| PlotDataSet::new(values, label))
                .collect();
            Ok(PlotDataSets::new(children)?.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_array() {
        let ds = data(vec![1.0, 2.0], Labels::Auto).unwrap();
        assert!(!ds.is_group());
        assert_eq!(ds[0].label(), "x1");

        let ds = data([3.0, 4.0], "price").unwrap();
        assert_eq!(ds[0].label(), "price");
        assert_eq!(ds[0].data(), &[3.0, 4.0]);
    }

    #[test]
    fn test_list_of_arrays() {
        let ds = data(vec![vec![1.0], vec![2.0], vec![3.0]], None::<&str>).unwrap();
        assert!(ds.is_group());
        let labels: Vec<&str> = ds.iter().map(PlotDataSet::label).collect();
        assert_eq!(labels, vec!["x1", "x2", "x3"]);

        let ds = data(vec![vec![1.0], vec![2.0]], vec!["a", "b"]).unwrap();
        assert_eq!(ds[1].label(), "b");
    }

    #[test]
    fn test_label_mismatches_are_rejected() {
        assert!(matches!(
            data(vec![1.0], vec!["a", "b"]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            data(vec![vec![1.0], vec![2.0]], vec!["a"]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            data(vec![vec![1.0]], "a"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let empty: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(data(empty, Labels::Auto), Err(Error::EmptyGroup)));
    }
}
