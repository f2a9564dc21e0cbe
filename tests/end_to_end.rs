//! End-to-end scenarios through the public API

mod common;

use common::{assert_relative_eq, init_tracing, normal_sample, special_values};
use dataplot::prelude::*;
use dataplot::{Artwork, FigWrapper, FigureOptions, Priority};
use proptest::prelude::*;
use std::collections::HashMap;

#[test]
fn log_plus_one_times_two() -> anyhow::Result<()> {
    init_tracing();
    let x = data(vec![1.0, 2.0, 3.0, 4.0], Labels::Auto)?;
    let y = (&x.log() + 1.0) * 2.0;

    assert_eq!(y.current_formula(), vec!["(log(x1)+1)*2"]);
    assert_eq!(y[0].label(), "x1");
    let expected = [1.0f64, 2.0, 3.0, 4.0].map(|v| 2.0 * (v.ln() + 1.0));
    assert_eq!(y[0].len(), expected.len());
    for (got, want) in y[0].data().iter().zip(expected) {
        assert_relative_eq!(*got, want, epsilon = common::EPSILON);
    }
    tracing::info!(formula = %y[0].current_formula(), "formula checked");
    Ok(())
}

#[test]
fn parenthesisation_goldens() -> anyhow::Result<()> {
    let sets = data(vec![vec![8.0], vec![4.0], vec![2.0]], vec!["a", "b", "c"])?;
    let (a, b, c) = (&sets[0], &sets[1], &sets[2]);

    let cases = [
        ((&(a + b)? + c)?, "a+b+c"),
        ((&(a - b)? - c)?, "a-b-c"),
        ((a - &(b - c)?)?, "a-(b-c)"),
        ((&(a / b)? / c)?, "a/b/c"),
        ((a / &(b / c)?)?, "a/(b/c)"),
        ((&(a + b)? * c)?, "(a+b)*c"),
        ((a * &(b + c)?)?, "a*(b+c)"),
        ((a + &(b * c)?)?, "a+b*c"),
        (2.0 - &(a - b)?, "2-(a-b)"),
        (-a, "-a"),
        (-(-a), "-(-a)"),
    ];
    for (ds, formula) in cases {
        assert_eq!(ds.current_formula(), formula);
    }
    assert_eq!((&(a - b)? - c)?.data(), &[2.0]);
    assert_eq!((a - &(b - c)?)?.data(), &[6.0]);
    Ok(())
}

#[test]
fn relabelling_after_a_chain() -> anyhow::Result<()> {
    let mut y = data(vec![1.0, 2.0], Labels::Auto)?.cumsum().demean();
    y.set_label("returns");
    assert_eq!(y.current_formula(), vec!["csum(returns)-mean(csum(returns))"]);

    let mut group = data(vec![vec![1.0], vec![2.0]], Labels::Auto)?.exp();
    group.relabel(&HashMap::from([("x2".to_string(), "b".to_string())]));
    assert_eq!(group.current_formula(), vec!["exp(x1)", "exp(b)"]);
    Ok(())
}

#[test]
fn reset_round_trip() -> anyhow::Result<()> {
    let x = data(vec![1.0, 4.0, 9.0], Labels::Auto)?;
    let mut y = x.log().rolling(2)?.pow(2.0)?;
    y.opclear();
    assert_eq!(y, x);
    Ok(())
}

#[test]
fn batching_three_by_two() -> anyhow::Result<()> {
    let x = data(vec![vec![1.0], vec![2.0], vec![3.0]], Labels::Auto)?;
    let batches = x.batched(2)?;
    let sizes: Vec<usize> = batches.iter().map(DataSet::len).collect();
    assert_eq!(sizes, vec![2, 1]);

    // Calls on the batches reduce through the cleaner
    let none = batches.call(|_, _, _| None::<usize>);
    assert!(none.is_none());
    let counts = batches.call(|_, batch, _| (batch.len() > 1).then_some(batch.len()));
    assert_eq!(counts.map(|m| m.into_items()), Some(vec![Some(2), None]));

    assert!(matches!(x.batched(0), Err(Error::InvalidBatchSize(0))));
    Ok(())
}

#[test]
fn join_flattens_and_empty_groups_fail() -> anyhow::Result<()> {
    let a = data(vec![1.0], "a")?;
    let bc = data(vec![vec![2.0], vec![3.0]], vec!["b", "c"])?;
    let joined = a.join([&bc]).join([&a]);
    let labels: Vec<&str> = joined.iter().map(PlotDataSet::label).collect();
    assert_eq!(labels, vec!["a", "b", "c", "a"]);

    assert!(matches!(PlotDataSets::new(Vec::new()), Err(Error::EmptyGroup)));
    let empty: Vec<Vec<f64>> = Vec::new();
    assert!(matches!(data(empty, Labels::Auto), Err(Error::EmptyGroup)));
    Ok(())
}

#[test]
fn histogram_without_axes_creates_a_figure() -> anyhow::Result<()> {
    init_tracing();
    let mut x = data(normal_sample(200, 1.0, 2.0), "ret")?;
    x.set_plot(&PlotSettings::new().title("Returns").style(Style::Ggplot));

    let scene = x
        .hist(HistOptions::new().bins(20usize))?
        .expect("figure created");
    assert_eq!(scene.style, Style::Ggplot);
    let axes = &scene.axes[0];
    assert_eq!(axes.title.as_deref(), Some("Returns"));
    let xlabel = axes.xlabel.as_deref().unwrap_or_default();
    assert!(xlabel.contains("ret: mean=1.000"));
    let bars = axes
        .artworks
        .iter()
        .filter(|a| matches!(a, Artwork::Bars { .. }))
        .count();
    assert_eq!(bars, 1);
    assert_eq!(axes.artworks.len(), 2);
    Ok(())
}

#[test]
fn grouped_plots_on_a_shared_figure() -> anyhow::Result<()> {
    let x = data(
        vec![normal_sample(50, 0.0, 1.0), normal_sample(50, 3.0, 0.5)],
        Labels::Auto,
    )?;
    let options = FigureOptions::new()
        .grid(2, 2)
        .settings(PlotSettings::new().title("Overview"));
    let scene = FigWrapper::from_options(options).show(|fig| {
        let axes = fig.axes();
        let (top, bottom) = axes.split_at_mut(2);
        let (hist_ax, line_ax) = top.split_at_mut(1);
        let (qq_ax, ks_ax) = bottom.split_at_mut(1);
        x.hist(HistOptions::new().fit(false).on(&mut hist_ax[0]))?;
        x.plot(LineOptions::new().scatter(true).on(&mut line_ax[0]))?;
        x.qqplot(QQOptions::new().dist(Distribution::Normal).on(&mut qq_ax[0]))?;
        x[0].ksplot(KSOptions::new().dist(&x[1]).on(&mut ks_ax[0]))?;
        Ok(())
    })?;

    assert_eq!(scene.suptitle.as_deref(), Some("Overview"));
    assert_eq!(scene.axes.len(), 4);
    assert_eq!(scene.axes[0].grid_alpha, 0.25);
    let ks_labels: Vec<_> = scene.axes[3]
        .artworks
        .iter()
        .filter_map(|a| a.label())
        .collect();
    assert_eq!(ks_labels, vec!["x1", "x2"]);
    Ok(())
}

#[test]
fn special_values_flow_through_transforms() -> anyhow::Result<()> {
    let x = data(special_values(), Labels::Auto)?;
    let y = x.neg().neg();
    assert_eq!(y[0].len(), special_values().len());
    assert!(y[0].data()[6].is_nan());
    assert_eq!(y[0].data()[4], f64::INFINITY);
    assert_eq!(y[0].formatted_label(Priority::MUL), "(-(-x1))");
    Ok(())
}

proptest! {
    #[test]
    fn batches_cover_the_group_in_order(members in 1usize..12, n in 1usize..6) {
        let arrays: Vec<Vec<f64>> = (0..members).map(|i| vec![i as f64]).collect();
        let x = data(arrays, Labels::Auto).unwrap();
        let batches = x.batched(n).unwrap();
        prop_assert_eq!(batches.len(), (members + n - 1) / n);
        let flat: Vec<f64> = batches
            .iter()
            .flat_map(|b| b.iter().map(|d| d.data()[0]).collect::<Vec<_>>())
            .collect();
        let expected: Vec<f64> = (0..members).map(|i| i as f64).collect();
        prop_assert_eq!(flat, expected);
    }
}
