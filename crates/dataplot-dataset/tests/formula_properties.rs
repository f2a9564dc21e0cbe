//! Property tests for formula tracking

use dataplot_dataset::{BinaryOp, PlotDataSet};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Log,
    Exp,
    Demean,
    Zscore,
    Cumsum,
    Neg,
    Scalar(BinaryOp, f64),
    Reversed(BinaryOp, f64),
    Rolling(usize),
}

fn op() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(BinaryOp::ALL.to_vec())
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Log),
        Just(Step::Exp),
        Just(Step::Demean),
        Just(Step::Zscore),
        Just(Step::Cumsum),
        Just(Step::Neg),
        (op(), -5.0..5.0f64).prop_map(|(op, x)| Step::Scalar(op, x)),
        (op(), -5.0..5.0f64).prop_map(|(op, x)| Step::Reversed(op, x)),
        (1usize..4).prop_map(Step::Rolling),
    ]
}

fn run(ds: &PlotDataSet, steps: &[Step]) -> PlotDataSet {
    steps.iter().fold(ds.clone(), |acc, step| match step {
        Step::Log => acc.log(),
        Step::Exp => acc.exp(),
        Step::Demean => acc.demean(),
        Step::Zscore => acc.zscore(),
        Step::Cumsum => acc.cumsum(),
        Step::Neg => acc.neg(),
        Step::Scalar(op, x) => acc.apply(*op, *x).unwrap(),
        Step::Reversed(op, x) => acc.rapply(*op, *x),
        Step::Rolling(n) => acc.rolling(*n).unwrap(),
    })
}

fn balanced(s: &str) -> bool {
    let mut depth: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

proptest! {
    #[test]
    fn opclear_restores_original(
        values in prop::collection::vec(-100.0..100.0f64, 1..20),
        steps in prop::collection::vec(step(), 0..6),
    ) {
        let ds = PlotDataSet::new(values.clone(), "x1");
        let mut chained = run(&ds, &steps);
        prop_assert_eq!(chained.len(), values.len());
        chained.opclear();
        prop_assert_eq!(chained.data(), values.as_slice());
        prop_assert_eq!(chained.current_formula(), "x1");
    }

    #[test]
    fn relabel_renames_every_occurrence(
        steps in prop::collection::vec(step(), 0..6),
    ) {
        let ds = PlotDataSet::new(vec![1.0, 2.0, 3.0], "x1");
        let mut chained = run(&ds, &steps);
        let before = chained.current_formula();
        chained.set_label("price");
        prop_assert_eq!(chained.current_formula(), before.replace("x1", "price"));
    }

    #[test]
    fn rendered_formulas_are_balanced(
        steps in prop::collection::vec(step(), 0..8),
    ) {
        let chained = run(&PlotDataSet::new(vec![1.0, 2.0], "x1"), &steps);
        let formula = chained.current_formula();
        prop_assert!(balanced(&formula), "unbalanced: {}", formula);
        prop_assert!(formula.contains("x1"));
    }

    #[test]
    fn double_negation_restores_values(
        values in prop::collection::vec(-1e6..1e6f64, 0..20),
    ) {
        let ds = PlotDataSet::new(values.clone(), "x1");
        let twice = ds.neg().neg();
        prop_assert_eq!(twice.data(), values.as_slice());
        prop_assert_eq!(twice.current_formula(), "-(-x1)");
    }
}
