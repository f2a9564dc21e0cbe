//! Reference distributions for Q-Q and K-S plots

use crate::{math, Error, Result};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use std::fmt;
use std::str::FromStr;

/// Named theoretical distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Distribution {
    /// Standard normal
    #[default]
    Normal,
    /// Exponential with unit rate
    Exponential,
}

impl Distribution {
    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Normal => "normal",
            Distribution::Exponential => "exponential",
        }
    }

    /// Percent point function (inverse CDF) at probability `p`
    pub fn ppf(&self, p: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid_probability(p));
        }
        match self {
            Distribution::Normal => Ok(standard_normal()?.inverse_cdf(p)),
            Distribution::Exponential => Ok(-(1.0 - p).ln()),
        }
    }

    /// Probability grid used by Q-Q plots with `quantiles` points
    ///
    /// The normal grid drops both ends of `linspace(0, 1, q + 2)`; the
    /// exponential grid drops only the right end of `linspace(0, 1, q + 1)`.
    pub fn qq_grid(&self, quantiles: usize) -> Vec<f64> {
        match self {
            Distribution::Normal => {
                let grid = math::linspace(0.0, 1.0, quantiles + 2);
                grid[1..grid.len() - 1].to_vec()
            }
            Distribution::Exponential => {
                let grid = math::linspace(0.0, 1.0, quantiles + 1);
                grid[..grid.len() - 1].to_vec()
            }
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(Distribution::Normal),
            "expon" | "exponential" => Ok(Distribution::Exponential),
            other => Err(Error::UnknownDistribution(other.to_string())),
        }
    }
}

/// What the data is compared against in Q-Q and K-S plots
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    Dist(Distribution),
    /// Another sample, compared quantile against quantile
    Sample { label: String, values: Vec<f64> },
}

impl Reference {
    pub fn sample(label: impl Into<String>, values: Vec<f64>) -> Self {
        Reference::Sample {
            label: label.into(),
            values,
        }
    }

    /// Name shown in axis labels
    pub fn name(&self) -> &str {
        match self {
            Reference::Dist(dist) => dist.name(),
            Reference::Sample { label, .. } => label,
        }
    }

    /// Quantiles of the reference at each probability
    pub fn quantiles(&self, ps: &[f64]) -> Result<Vec<f64>> {
        match self {
            Reference::Dist(dist) => ps.iter().map(|&p| dist.ppf(p)).collect(),
            Reference::Sample { values, .. } => math::nanquantiles(values, ps),
        }
    }

    /// Probability grid used by Q-Q plots; samples share the normal grid
    pub fn qq_grid(&self, quantiles: usize) -> Vec<f64> {
        match self {
            Reference::Dist(dist) => dist.qq_grid(quantiles),
            Reference::Sample { .. } => Distribution::Normal.qq_grid(quantiles),
        }
    }
}

impl Default for Reference {
    fn default() -> Self {
        Reference::Dist(Distribution::Normal)
    }
}

impl From<Distribution> for Reference {
    fn from(dist: Distribution) -> Self {
        Reference::Dist(dist)
    }
}

impl FromStr for Reference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Reference::Dist(s.parse()?))
    }
}

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| Error::InvalidParameter(e.to_string()))
}

/// Normal probability density with the given mean and standard deviation
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> Result<f64> {
    let normal = Normal::new(mean, std_dev).map_err(|e| Error::InvalidParameter(e.to_string()))?;
    Ok(normal.pdf(x))
}
