//! The formula-tracking dataset

use crate::format::{scalar_text, BinaryOp, Formula, Priority};
use crate::group::PlotDataSets;
use crate::plotting;
use dataplot_artist::{HistOptions, KSOptions, LineOptions, QQOptions, Scene};
use dataplot_core::{math, Error, PlotSettings, Plotter, Reference, Result};
use num_traits::ToPrimitive;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Right-hand side of a binary operation on a [`PlotDataSet`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    Scalar(f64),
    Data(&'a PlotDataSet),
}

impl Operand<'_> {
    /// A scalar operand from any primitive number
    pub fn scalar<T: ToPrimitive + fmt::Debug>(value: T) -> Result<Self> {
        Ok(Operand::Scalar(math::scalar(value)?))
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a PlotDataSet> for Operand<'a> {
    fn from(data: &'a PlotDataSet) -> Self {
        Operand::Data(data)
    }
}

/// Element-wise `lhs op rhs`, broadcasting a length-one side
pub(crate) fn elementwise(op: BinaryOp, lhs: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    let values = match (lhs.len(), rhs.len()) {
        (l, r) if l == r => lhs.iter().zip(rhs).map(|(&a, &b)| op.apply(a, b)).collect(),
        (_, 1) => lhs.iter().map(|&a| op.apply(a, rhs[0])).collect(),
        (1, _) => rhs.iter().map(|&b| op.apply(lhs[0], b)).collect(),
        (l, r) => return Err(Error::length_mismatch(l, r)),
    };
    Ok(values)
}

/// A numeric array that remembers the operations applied to it
///
/// Every transform returns a new dataset carrying the original data, the
/// label and the plot settings forward, together with the new data and an
/// extended [`Formula`]. Only [`opclear`](Self::opclear) and
/// [`opclear_records_only`](Self::opclear_records_only) modify in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotDataSet {
    data: Vec<f64>,
    original_data: Vec<f64>,
    label: String,
    formula: Formula,
    settings: PlotSettings,
}

impl PlotDataSet {
    pub fn new(data: Vec<f64>, label: impl Into<String>) -> Self {
        Self {
            original_data: data.clone(),
            data,
            label: label.into(),
            formula: Formula::new(),
            settings: PlotSettings::default(),
        }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// The data as first supplied, before any operation
    pub fn original_data(&self) -> &[f64] {
        &self.original_data
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The rendered formula without its outermost parentheses
    pub fn current_formula(&self) -> String {
        self.formula.fmt(&self.label)
    }

    /// The rendered formula as the right operand of an operation of priority `p`
    ///
    /// `Priority::LABEL` always drops the outermost parentheses.
    pub fn formatted_label(&self, p: Priority) -> String {
        self.formula.formatted(&self.label, p)
    }

    /// Formatted label followed by the plot settings that are set
    pub fn data_info(&self) -> String {
        let not_none = self.settings.repr_not_none();
        if not_none.is_empty() {
            self.formatted_label(Priority::LABEL)
        } else {
            format!("{}: {}", self.formatted_label(Priority::LABEL), not_none)
        }
    }

    fn derive(&self, formula: Formula, data: Vec<f64>) -> PlotDataSet {
        PlotDataSet {
            data,
            original_data: self.original_data.clone(),
            label: self.label.clone(),
            formula,
            settings: self.settings.clone(),
        }
    }

    pub fn log(&self) -> PlotDataSet {
        let data = self.data.iter().map(|x| x.ln()).collect();
        self.derive(self.formula.call("log", None), data)
    }

    pub fn exp(&self) -> PlotDataSet {
        let data = self.data.iter().map(|x| x.exp()).collect();
        self.derive(self.formula.call("exp", None), data)
    }

    /// Rolling mean over windows of `n`; the first `n - 1` values are NaN
    pub fn rolling(&self, n: usize) -> Result<PlotDataSet> {
        let data = math::rolling_mean(&self.data, n)?;
        Ok(self.derive(self.formula.call("rolling", Some(&n.to_string())), data))
    }

    /// Subtract the NaN-ignoring mean
    pub fn demean(&self) -> PlotDataSet {
        let mean = math::nanmean(&self.data);
        let data = self.data.iter().map(|x| x - mean).collect();
        self.derive(self.formula.demean(), data)
    }

    /// Subtract the mean and divide by the population standard deviation
    pub fn zscore(&self) -> PlotDataSet {
        let mean = math::nanmean(&self.data);
        let std = math::nanstd(&self.data, 0);
        let data = self.data.iter().map(|x| (x - mean) / std).collect();
        self.derive(self.formula.zscore(), data)
    }

    pub fn cumsum(&self) -> PlotDataSet {
        self.derive(self.formula.call("csum", None), math::cumsum(&self.data))
    }

    pub fn neg(&self) -> PlotDataSet {
        let data = self.data.iter().map(|x| -x).collect();
        self.derive(self.formula.negate(), data)
    }

    /// `self op rhs`
    ///
    /// Fails with [`Error::UnsupportedOperand`] when the lengths cannot be
    /// broadcast together.
    pub fn apply<'a>(&self, op: BinaryOp, rhs: impl Into<Operand<'a>>) -> Result<PlotDataSet> {
        match rhs.into() {
            Operand::Scalar(x) => Ok(self.scalar_op(op, x)),
            Operand::Data(other) => {
                let data = elementwise(op, &self.data, &other.data)?;
                let rhs_text = other.formatted_label(op.priority());
                debug!(
                    op = op.symbol(),
                    lhs = %self.label,
                    rhs = %other.label,
                    "combined datasets"
                );
                Ok(self.derive(self.formula.binary(op, &rhs_text), data))
            }
        }
    }

    pub(crate) fn scalar_op(&self, op: BinaryOp, x: f64) -> PlotDataSet {
        let data = self.data.iter().map(|&a| op.apply(a, x)).collect();
        self.derive(self.formula.binary(op, &scalar_text(x)), data)
    }

    /// `lhs op self`
    pub fn rapply(&self, op: BinaryOp, lhs: f64) -> PlotDataSet {
        let data = self.data.iter().map(|&b| op.apply(lhs, b)).collect();
        self.derive(self.formula.reversed(op, &scalar_text(lhs)), data)
    }

    /// `self ** exponent`
    pub fn pow<'a>(&self, exponent: impl Into<Operand<'a>>) -> Result<PlotDataSet> {
        self.apply(BinaryOp::Pow, exponent)
    }

    /// `base ** self`
    pub fn rpow(&self, base: f64) -> PlotDataSet {
        self.rapply(BinaryOp::Pow, base)
    }

    /// Undo every operation and clear the formula
    pub fn opclear(&mut self) -> &mut Self {
        debug!(label = %self.label, formula = %self.current_formula(), "undoing operations");
        self.formula = Formula::new();
        self.data = self.original_data.clone();
        self
    }

    /// Clear the formula but keep the current data, which becomes the original
    pub fn opclear_records_only(&mut self) -> &mut Self {
        self.formula = Formula::new();
        self.original_data = self.data.clone();
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    /// Rename when the current label is a key of `mapping`
    pub fn relabel(&mut self, mapping: &HashMap<String, String>) -> &mut Self {
        if let Some(label) = mapping.get(&self.label) {
            self.label = label.clone();
        }
        self
    }

    /// Explicitly set plot settings
    pub fn set_plot(&mut self, settings: &PlotSettings) -> &mut Self {
        self.set(settings)
    }

    /// Set plot settings that are not set yet
    pub fn set_plot_default(&mut self, settings: &PlotSettings) -> &mut Self {
        self.set_default(settings)
    }

    /// Group this dataset with others
    pub fn join<'a>(&self, others: impl IntoIterator<Item = &'a PlotDataSet>) -> PlotDataSets {
        PlotDataSets::with_first(self.clone(), others.into_iter().cloned())
    }

    pub fn hist(&self, options: HistOptions<'_>) -> Result<Option<Scene>> {
        plotting::hist(std::slice::from_ref(self), true, options)
    }

    pub fn plot(&self, options: LineOptions<'_>) -> Result<Option<Scene>> {
        plotting::plot(std::slice::from_ref(self), options)
    }

    pub fn qqplot(&self, options: QQOptions<'_>) -> Result<Option<Scene>> {
        plotting::qqplot(std::slice::from_ref(self), options)
    }

    pub fn ksplot(&self, options: KSOptions<'_>) -> Result<Option<Scene>> {
        plotting::ksplot(std::slice::from_ref(self), options)
    }
}

impl Plotter for PlotDataSet {
    fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut PlotSettings {
        &mut self.settings
    }
}

/// A dataset used as the reference sample of a Q-Q or K-S plot
impl From<&PlotDataSet> for Reference {
    fn from(data: &PlotDataSet) -> Self {
        Reference::sample(data.formatted_label(Priority::LABEL), data.data.clone())
    }
}

impl fmt::Display for PlotDataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlotDataSet\n- {}", self.data_info())
    }
}
