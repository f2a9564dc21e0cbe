//! Groups of datasets and the `DataSet` sum type
//!
//! A [`PlotDataSets`] group answers the same calls as a single
//! [`PlotDataSet`] by fanning each call out over its members through a
//! [`Multi`] proxy and joining the results back into a group.

use crate::dataset::{Operand, PlotDataSet};
use crate::format::{BinaryOp, Priority};
use crate::plotting;
use dataplot_artist::{HistOptions, KSOptions, LineOptions, QQOptions, Scene};
use dataplot_core::{Error, PlotSettings, Result};
use dataplot_multi::{Arg, Cleaner, FnReducer, Multi};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Ordered, non-empty group of datasets
#[derive(Debug, Clone, PartialEq)]
pub struct PlotDataSets {
    children: Vec<PlotDataSet>,
}

impl PlotDataSets {
    /// Fails with [`Error::EmptyGroup`] when `children` is empty
    pub fn new(children: Vec<PlotDataSet>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::EmptyGroup);
        }
        Ok(Self { children })
    }

    /// Group datasets and groups, flattening the groups
    pub fn from_sets(sets: impl IntoIterator<Item = DataSet>) -> Result<Self> {
        let children = sets
            .into_iter()
            .flat_map(|set| match set {
                DataSet::Single(d) => vec![d],
                DataSet::Group(g) => g.children,
            })
            .collect();
        Self::new(children)
    }

    pub(crate) fn with_first(
        first: PlotDataSet,
        rest: impl IntoIterator<Item = PlotDataSet>,
    ) -> Self {
        let mut children = vec![first];
        children.extend(rest);
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always false; groups are never empty
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlotDataSet> {
        self.children.get(index)
    }

    pub fn members(&self) -> &[PlotDataSet] {
        &self.children
    }

    pub fn into_members(self) -> Vec<PlotDataSet> {
        self.children
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlotDataSet> {
        self.children.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PlotDataSet> {
        self.children.iter_mut()
    }

    /// A proxy over the members whose calls join dataset results into a group
    fn proxy(&self) -> Multi<&PlotDataSet, FnReducer<fn(Vec<PlotDataSet>) -> PlotDataSets>> {
        let join: fn(Vec<PlotDataSet>) -> PlotDataSets = |children| PlotDataSets { children };
        Multi::new(self.children.iter().collect())
            .with_reducer(FnReducer::new(join).named("join"))
    }

    fn map<F>(&self, mut f: F) -> PlotDataSets
    where
        F: FnMut(&PlotDataSet) -> PlotDataSet,
    {
        self.proxy().call(|_, member, _| f(*member))
    }

    fn try_map<F>(&self, mut f: F) -> Result<PlotDataSets>
    where
        F: FnMut(&PlotDataSet) -> Result<PlotDataSet>,
    {
        self.proxy().try_call(|_, member, _| f(*member))
    }

    pub fn log(&self) -> PlotDataSets {
        self.map(PlotDataSet::log)
    }

    pub fn exp(&self) -> PlotDataSets {
        self.map(PlotDataSet::exp)
    }

    pub fn rolling(&self, n: usize) -> Result<PlotDataSets> {
        self.try_map(|member| member.rolling(n))
    }

    pub fn demean(&self) -> PlotDataSets {
        self.map(PlotDataSet::demean)
    }

    pub fn zscore(&self) -> PlotDataSets {
        self.map(PlotDataSet::zscore)
    }

    pub fn cumsum(&self) -> PlotDataSets {
        self.map(PlotDataSet::cumsum)
    }

    pub fn neg(&self) -> PlotDataSets {
        self.map(PlotDataSet::neg)
    }

    /// `member op rhs` for every member
    ///
    /// With [`Arg::Each`] the i-th member is combined with the i-th operand,
    /// and the operand count must match the group size.
    pub fn apply(&self, op: BinaryOp, rhs: Arg<Operand<'_>>) -> Result<PlotDataSets> {
        if let Arg::Each(operands) = &rhs {
            if operands.len() != self.len() {
                return Err(Error::UnsupportedOperand(format!(
                    "cannot combine a group of {} with a group of {}",
                    self.len(),
                    operands.len()
                )));
            }
        }
        self.proxy().try_call(|i, member, _| {
            let operand = rhs
                .at(i)
                .copied()
                .ok_or_else(|| Error::length_mismatch(self.len(), i))?;
            member.apply(op, operand)
        })
    }

    /// `lhs op member` for every member
    pub fn rapply(&self, op: BinaryOp, lhs: f64) -> PlotDataSets {
        self.map(|member| member.rapply(op, lhs))
    }

    pub fn pow<'a>(&self, exponent: impl Into<Operand<'a>>) -> Result<PlotDataSets> {
        self.apply(BinaryOp::Pow, Arg::Same(exponent.into()))
    }

    pub fn rpow(&self, base: f64) -> PlotDataSets {
        self.rapply(BinaryOp::Pow, base)
    }

    pub fn opclear(&mut self) -> &mut Self {
        self.children.iter_mut().for_each(|member| {
            member.opclear();
        });
        self
    }

    pub fn opclear_records_only(&mut self) -> &mut Self {
        self.children.iter_mut().for_each(|member| {
            member.opclear_records_only();
        });
        self
    }

    /// Give every member the same label
    pub fn set_label(&mut self, label: &str) -> &mut Self {
        self.children.iter_mut().for_each(|member| {
            member.set_label(label);
        });
        self
    }

    /// Rename every member whose label is a key of `mapping`
    pub fn relabel(&mut self, mapping: &HashMap<String, String>) -> &mut Self {
        self.children.iter_mut().for_each(|member| {
            member.relabel(mapping);
        });
        self
    }

    pub fn set_plot(&mut self, settings: &PlotSettings) -> &mut Self {
        self.children.iter_mut().for_each(|member| {
            member.set_plot(settings);
        });
        self
    }

    pub fn set_plot_default(&mut self, settings: &PlotSettings) -> &mut Self {
        self.children.iter_mut().for_each(|member| {
            member.set_plot_default(settings);
        });
        self
    }

    /// Formatted labels of the members, in order
    pub fn formatted_labels(&self, p: Priority) -> Vec<String> {
        self.children
            .iter()
            .map(|member| member.formatted_label(p))
            .collect()
    }

    /// Split into consecutive groups of at most `n` members
    pub fn batched(&self, n: usize) -> Result<Multi<PlotDataSets, Cleaner>> {
        if n == 0 {
            return Err(Error::InvalidBatchSize(n));
        }
        let batches: Vec<PlotDataSets> = self
            .children
            .chunks(n)
            .map(|chunk| PlotDataSets { children: chunk.to_vec() })
            .collect();
        debug!(members = self.len(), batch_size = n, batches = batches.len(), "batched group");
        Ok(Multi::new(batches).with_reducer(Cleaner))
    }

    pub fn join<'a>(&self, others: impl IntoIterator<Item = &'a DataSet>) -> PlotDataSets {
        let mut children = self.children.clone();
        children.extend(
            others
                .into_iter()
                .flat_map(|other| other.members().iter().cloned()),
        );
        PlotDataSets { children }
    }

    pub fn hist(&self, options: HistOptions<'_>) -> Result<Option<Scene>> {
        plotting::hist(&self.children, false, options)
    }

    pub fn plot(&self, options: LineOptions<'_>) -> Result<Option<Scene>> {
        plotting::plot(&self.children, options)
    }

    pub fn qqplot(&self, options: QQOptions<'_>) -> Result<Option<Scene>> {
        plotting::qqplot(&self.children, options)
    }

    pub fn ksplot(&self, options: KSOptions<'_>) -> Result<Option<Scene>> {
        plotting::ksplot(&self.children, options)
    }
}

impl std::ops::Index<usize> for PlotDataSets {
    type Output = PlotDataSet;

    fn index(&self, index: usize) -> &PlotDataSet {
        &self.children[index]
    }
}

impl<'a> IntoIterator for &'a PlotDataSets {
    type Item = &'a PlotDataSet;
    type IntoIter = std::slice::Iter<'a, PlotDataSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl fmt::Display for PlotDataSets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlotDataSets")?;
        for member in &self.children {
            write!(f, "\n- {}", member.data_info())?;
        }
        Ok(())
    }
}

/// Right-hand side of a binary operation on a [`DataSet`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataOperand<'a> {
    Scalar(f64),
    Data(&'a DataSet),
}

impl From<f64> for DataOperand<'_> {
    fn from(value: f64) -> Self {
        DataOperand::Scalar(value)
    }
}

impl<'a> From<&'a DataSet> for DataOperand<'a> {
    fn from(data: &'a DataSet) -> Self {
        DataOperand::Data(data)
    }
}

/// A single dataset or a group of them
#[derive(Debug, Clone, PartialEq)]
pub enum DataSet {
    Single(PlotDataSet),
    Group(PlotDataSets),
}

impl DataSet {
    pub fn members(&self) -> &[PlotDataSet] {
        match self {
            DataSet::Single(d) => std::slice::from_ref(d),
            DataSet::Group(g) => g.members(),
        }
    }

    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlotDataSet> {
        self.members().get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlotDataSet> {
        self.members().iter()
    }

    pub fn is_group(&self) -> bool {
        matches!(self, DataSet::Group(_))
    }

    /// The dataset, if this is not a group
    pub fn as_single(&self) -> Option<&PlotDataSet> {
        match self {
            DataSet::Single(d) => Some(d),
            DataSet::Group(_) => None,
        }
    }

    fn map(&self, f: impl Fn(&PlotDataSet) -> PlotDataSet) -> DataSet {
        match self {
            DataSet::Single(d) => DataSet::Single(f(d)),
            DataSet::Group(g) => DataSet::Group(g.map(f)),
        }
    }

    pub fn log(&self) -> DataSet {
        self.map(PlotDataSet::log)
    }

    pub fn exp(&self) -> DataSet {
        self.map(PlotDataSet::exp)
    }

    pub fn rolling(&self, n: usize) -> Result<DataSet> {
        Ok(match self {
            DataSet::Single(d) => DataSet::Single(d.rolling(n)?),
            DataSet::Group(g) => DataSet::Group(g.rolling(n)?),
        })
    }

    pub fn demean(&self) -> DataSet {
        self.map(PlotDataSet::demean)
    }

    pub fn zscore(&self) -> DataSet {
        self.map(PlotDataSet::zscore)
    }

    pub fn cumsum(&self) -> DataSet {
        self.map(PlotDataSet::cumsum)
    }

    pub fn neg(&self) -> DataSet {
        self.map(PlotDataSet::neg)
    }

    /// `self op rhs`
    ///
    /// A single dataset combined with a group yields a group. Two groups are
    /// combined member by member and must have the same size.
    pub fn apply<'a>(&self, op: BinaryOp, rhs: impl Into<DataOperand<'a>>) -> Result<DataSet> {
        let result = match (self, rhs.into()) {
            (_, DataOperand::Scalar(x)) => self.scalar_op(op, x),
            (DataSet::Single(d), DataOperand::Data(DataSet::Single(other))) => {
                DataSet::Single(d.apply(op, other)?)
            }
            (DataSet::Single(d), DataOperand::Data(DataSet::Group(others))) => {
                DataSet::Group(others.try_map(|other| d.apply(op, other))?)
            }
            (DataSet::Group(g), DataOperand::Data(DataSet::Single(other))) => {
                DataSet::Group(g.apply(op, Arg::Same(Operand::Data(other)))?)
            }
            (DataSet::Group(g), DataOperand::Data(DataSet::Group(others))) => {
                let operands = others.iter().map(Operand::Data).collect();
                DataSet::Group(g.apply(op, Arg::Each(operands))?)
            }
        };
        Ok(result)
    }

    pub(crate) fn scalar_op(&self, op: BinaryOp, x: f64) -> DataSet {
        self.map(|member| member.scalar_op(op, x))
    }

    /// `lhs op self`
    pub fn rapply(&self, op: BinaryOp, lhs: f64) -> DataSet {
        self.map(|member| member.rapply(op, lhs))
    }

    pub fn pow<'a>(&self, exponent: impl Into<DataOperand<'a>>) -> Result<DataSet> {
        self.apply(BinaryOp::Pow, exponent)
    }

    pub fn rpow(&self, base: f64) -> DataSet {
        self.rapply(BinaryOp::Pow, base)
    }

    fn for_each_member(&mut self, mut f: impl FnMut(&mut PlotDataSet)) -> &mut Self {
        match self {
            DataSet::Single(d) => f(d),
            DataSet::Group(g) => g.iter_mut().for_each(f),
        }
        self
    }

    pub fn opclear(&mut self) -> &mut Self {
        self.for_each_member(|member| {
            member.opclear();
        })
    }

    pub fn opclear_records_only(&mut self) -> &mut Self {
        self.for_each_member(|member| {
            member.opclear_records_only();
        })
    }

    pub fn set_label(&mut self, label: &str) -> &mut Self {
        self.for_each_member(|member| {
            member.set_label(label);
        })
    }

    pub fn relabel(&mut self, mapping: &HashMap<String, String>) -> &mut Self {
        self.for_each_member(|member| {
            member.relabel(mapping);
        })
    }

    pub fn set_plot(&mut self, settings: &PlotSettings) -> &mut Self {
        self.for_each_member(|member| {
            member.set_plot(settings);
        })
    }

    pub fn set_plot_default(&mut self, settings: &PlotSettings) -> &mut Self {
        self.for_each_member(|member| {
            member.set_plot_default(settings);
        })
    }

    /// Formula of a single dataset, or one formula per member of a group
    pub fn current_formula(&self) -> Vec<String> {
        self.iter().map(PlotDataSet::current_formula).collect()
    }

    /// Merge with other datasets and groups into one flattened group
    pub fn join<'a>(&self, others: impl IntoIterator<Item = &'a DataSet>) -> DataSet {
        let group = match self {
            DataSet::Single(d) => PlotDataSets::with_first(d.clone(), Vec::new()).join(others),
            DataSet::Group(g) => g.join(others),
        };
        DataSet::Group(group)
    }

    /// Batch a group into consecutive groups of at most `n` members
    ///
    /// A single dataset yields one batch containing itself.
    pub fn batched(&self, n: usize) -> Result<Multi<DataSet, Cleaner>> {
        if n == 0 {
            return Err(Error::InvalidBatchSize(n));
        }
        match self {
            DataSet::Single(d) => {
                Ok(Multi::new(vec![DataSet::Single(d.clone())]).with_reducer(Cleaner))
            }
            DataSet::Group(g) => {
                let batches = g
                    .batched(n)?
                    .into_items()
                    .into_iter()
                    .map(DataSet::Group)
                    .collect();
                Ok(Multi::new(batches).with_reducer(Cleaner))
            }
        }
    }

    pub fn hist(&self, options: HistOptions<'_>) -> Result<Option<Scene>> {
        match self {
            DataSet::Single(single) => single.hist(options),
            DataSet::Group(group) => group.hist(options),
        }
    }

    pub fn plot(&self, options: LineOptions<'_>) -> Result<Option<Scene>> {
        plotting::plot(self.members(), options)
    }

    pub fn qqplot(&self, options: QQOptions<'_>) -> Result<Option<Scene>> {
        plotting::qqplot(self.members(), options)
    }

    pub fn ksplot(&self, options: KSOptions<'_>) -> Result<Option<Scene>> {
        plotting::ksplot(self.members(), options)
    }
}

impl From<PlotDataSet> for DataSet {
    fn from(d: PlotDataSet) -> Self {
        DataSet::Single(d)
    }
}

impl From<PlotDataSets> for DataSet {
    fn from(g: PlotDataSets) -> Self {
        DataSet::Group(g)
    }
}

impl std::ops::Index<usize> for DataSet {
    type Output = PlotDataSet;

    fn index(&self, index: usize) -> &PlotDataSet {
        &self.members()[index]
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSet::Single(d) => fmt::Display::fmt(d, f),
            DataSet::Group(g) => fmt::Display::fmt(g, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataplot_artist::Artwork;
    use dataplot_core::Plotter;
    use dataplot_multi::Reducer;

    fn group() -> PlotDataSets {
        PlotDataSets::new(vec![
            PlotDataSet::new(vec![1.0, 2.0], "x1"),
            PlotDataSet::new(vec![3.0, 4.0], "x2"),
            PlotDataSet::new(vec![5.0, 6.0], "x3"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_group_is_rejected() {
        assert!(matches!(PlotDataSets::new(Vec::new()), Err(Error::EmptyGroup)));
        assert!(matches!(PlotDataSets::from_sets(Vec::new()), Err(Error::EmptyGroup)));
    }

    #[test]
    fn test_from_sets_flattens() {
        let single = DataSet::Single(PlotDataSet::new(vec![0.0], "x0"));
        let flat = PlotDataSets::from_sets(vec![single, DataSet::Group(group())]).unwrap();
        assert_eq!(flat.len(), 4);
        assert_eq!(flat[3].label(), "x3");
    }

    #[test]
    fn test_transforms_fan_out_in_order() {
        let logged = group()
            .log()
            .apply(BinaryOp::Add, Arg::Same(Operand::Scalar(1.0)))
            .unwrap();
        assert_eq!(
            logged.formatted_labels(Priority::LABEL),
            vec!["log(x1)+1", "log(x2)+1", "log(x3)+1"]
        );
        assert_eq!(group().cumsum()[2].data(), &[5.0, 11.0]);
    }

    #[test]
    fn test_pairwise_operands_must_match_size() {
        let g = group();
        let scale = PlotDataSet::new(vec![10.0], "k");
        let operands = vec![Operand::Data(&scale), Operand::Scalar(2.0), Operand::Scalar(3.0)];
        let scaled = g.apply(BinaryOp::Mul, Arg::Each(operands)).unwrap();
        assert_eq!(scaled[0].data(), &[10.0, 20.0]);
        assert_eq!(scaled[0].current_formula(), "x1*k");
        assert_eq!(scaled[2].data(), &[15.0, 18.0]);

        let err = g
            .apply(BinaryOp::Mul, Arg::Each(vec![Operand::Scalar(1.0)]))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperand(_)));
    }

    #[test]
    fn test_batched() {
        let batches = group().batched(2).unwrap();
        let sizes: Vec<usize> = batches.iter().map(PlotDataSets::len).collect();
        assert_eq!(sizes, vec![2, 1]);
        assert_eq!(batches.reducer().name(), "cleaner");
        assert!(matches!(group().batched(0), Err(Error::InvalidBatchSize(0))));

        let single = DataSet::Single(PlotDataSet::new(vec![1.0], "x1"));
        assert_eq!(single.batched(3).unwrap().len(), 1);
        assert!(single.batched(0).is_err());
    }

    #[test]
    fn test_join_flattens() {
        let a = DataSet::Single(PlotDataSet::new(vec![1.0], "a"));
        let b = DataSet::Single(PlotDataSet::new(vec![2.0], "b"));
        let joined = a.join([&b, &DataSet::Group(group())]);
        assert_eq!(joined.len(), 5);
        let nested = joined.join([&joined]);
        assert_eq!(nested.len(), 10);
        let labels: Vec<&str> = nested.iter().map(PlotDataSet::label).collect();
        assert_eq!(&labels[..6], &["a", "b", "x1", "x2", "x3", "a"]);
    }

    #[test]
    fn test_single_with_group_yields_group() {
        let base = DataSet::Single(PlotDataSet::new(vec![100.0, 200.0], "b"));
        let result = base.apply(BinaryOp::Sub, &DataSet::Group(group())).unwrap();
        assert!(result.is_group());
        assert_eq!(result.current_formula(), vec!["b-x1", "b-x2", "b-x3"]);
        assert_eq!(result[1].data(), &[97.0, 196.0]);
    }

    #[test]
    fn test_in_place_updates_reach_every_member() {
        let mut g = DataSet::Group(group());
        let mut shifted = g.apply(BinaryOp::Add, 1.0).unwrap();
        shifted.opclear();
        assert_eq!(shifted, g);

        g.set_plot(&PlotSettings::new().title("t"));
        g.relabel(&HashMap::from([("x2".to_string(), "y".to_string())]));
        assert!(g.iter().all(|m| m.settings().title.as_deref() == Some("t")));
        assert_eq!(g[1].label(), "y");
        assert_eq!(
            g.to_string(),
            "PlotDataSets\n- x1: title=\"t\"\n- y: title=\"t\"\n- x3: title=\"t\""
        );
    }

    #[test]
    fn test_histogram_alpha_follows_receiver_kind() {
        let bar_alpha = |ds: &DataSet| match ds.hist(HistOptions::new().fit(false)) {
            Ok(Some(scene)) => match &scene.axes[0].artworks[0] {
                Artwork::Bars { alpha, .. } => *alpha,
                other => panic!("expected bars, got {other:?}"),
            },
            other => panic!("expected a scene, got {other:?}"),
        };
        let one = PlotDataSet::new(vec![1.0, 2.0, 3.0], "x1");
        assert_eq!(bar_alpha(&DataSet::Single(one.clone())), 1.0);
        let group = PlotDataSets::new(vec![one]).unwrap();
        assert_eq!(bar_alpha(&DataSet::Group(group)), 0.5);
    }
}
