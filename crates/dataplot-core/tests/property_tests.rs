//! Property-based tests for the numeric helpers and named settings

use dataplot_core::math::{histogram_counts, histogram_edges, nanmean, nanstd};
use dataplot_core::{Distribution, LegendLoc, Reference, Style};
use proptest::prelude::*;

fn with_nans() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![4 => -1e6..1e6f64, 1 => Just(f64::NAN)],
        0..40,
    )
}

proptest! {
    // Property: edges are strictly increasing, one more than the bin count
    #[test]
    fn prop_histogram_edges_are_monotone(
        data in prop::collection::vec(-1e6..1e6f64, 0..50),
        bins in 1usize..40,
    ) {
        let edges = histogram_edges(&data, bins).unwrap();
        prop_assert_eq!(edges.len(), bins + 1);
        prop_assert!(edges.windows(2).all(|w| w[0] < w[1]));
        if let Some(min) = data.iter().copied().reduce(f64::min) {
            prop_assert!(edges[0] <= min);
            prop_assert!(edges[bins] >= data.iter().copied().fold(f64::MIN, f64::max));
        }
    }

    // Property: every finite value lands in exactly one bin
    #[test]
    fn prop_histogram_counts_every_value(
        data in prop::collection::vec(-1e3..1e3f64, 1..50),
        bins in 1usize..20,
    ) {
        let edges = histogram_edges(&data, bins).unwrap();
        let counts = histogram_counts(&data, &edges).unwrap();
        prop_assert_eq!(counts.iter().sum::<f64>(), data.len() as f64);
    }

    // Property: NaN entries do not change the mean or the spread
    #[test]
    fn prop_nan_statistics_ignore_nan(data in with_nans()) {
        let clean: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
        let (mean, clean_mean) = (nanmean(&data), nanmean(&clean));
        prop_assert!(mean == clean_mean || (mean.is_nan() && clean_mean.is_nan()));
        for ddof in 0..2 {
            let (std, clean_std) = (nanstd(&data, ddof), nanstd(&clean, ddof));
            prop_assert!(std == clean_std || (std.is_nan() && clean_std.is_nan()));
        }
    }

    #[test]
    fn prop_distribution_names_round_trip(
        dist in prop::sample::select(vec![Distribution::Normal, Distribution::Exponential]),
    ) {
        let parsed: Reference = dist.to_string().parse().unwrap();
        prop_assert_eq!(parsed.name(), dist.name());
        prop_assert_eq!(parsed, Reference::Dist(dist));
    }

    #[test]
    fn prop_style_and_legend_names_round_trip(
        style in prop::sample::select(Style::ALL.to_vec()),
        loc in prop::sample::select(LegendLoc::ALL.to_vec()),
    ) {
        prop_assert_eq!(style.to_string().parse::<Style>().unwrap(), style);
        prop_assert_eq!(loc.to_string().parse::<LegendLoc>().unwrap(), loc);
    }

    #[test]
    fn prop_unknown_distribution_names_fail(name in "[a-z]{1,12}") {
        prop_assume!(!["normal", "expon", "exponential"].contains(&name.as_str()));
        prop_assert!(name.parse::<Reference>().is_err());
    }
}
