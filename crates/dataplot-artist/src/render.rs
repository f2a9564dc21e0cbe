//! Drawing finished scenes with plotters

use crate::container::{Artwork, AxesScene, Scene};
use crate::theme::Theme;
use dataplot_core::{Error, LegendLoc, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

pub(crate) fn to_svg(scene: &Scene, path: &Path) -> Result<()> {
    debug!(path = %path.display(), "rendering svg");
    let root = SVGBackend::new(path, scene.pixel_size()).into_drawing_area();
    draw_scene(&root, scene)?;
    root.present().map_err(Error::render)
}

pub(crate) fn to_png(scene: &Scene, path: &Path) -> Result<()> {
    debug!(path = %path.display(), "rendering png");
    let root = BitMapBackend::new(path, scene.pixel_size()).into_drawing_area();
    draw_scene(&root, scene)?;
    root.present().map_err(Error::render)
}

fn legend_position(loc: LegendLoc) -> SeriesLabelPosition {
    match loc {
        LegendLoc::Best | LegendLoc::UpperRight => SeriesLabelPosition::UpperRight,
        LegendLoc::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendLoc::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendLoc::LowerRight => SeriesLabelPosition::LowerRight,
        LegendLoc::Right | LegendLoc::CenterRight => SeriesLabelPosition::MiddleRight,
        LegendLoc::CenterLeft => SeriesLabelPosition::MiddleLeft,
        LegendLoc::LowerCenter => SeriesLabelPosition::LowerMiddle,
        LegendLoc::UpperCenter => SeriesLabelPosition::UpperMiddle,
        LegendLoc::Center => SeriesLabelPosition::MiddleMiddle,
    }
}

fn draw_scene<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<()> {
    let theme = Theme::of(scene.style);
    root.fill(&theme.background).map_err(Error::render)?;

    let (width, height) = scene.pixel_size();
    let params = scene.subplots;
    let frac = |v: Option<f64>, total: u32| (v.unwrap_or(0.0) * total as f64).round() as i32;
    // Subplot params are positions; convert right/top to distances from the edge
    let area = root.margin(
        frac(params.top.map(|t| 1.0 - t), height),
        frac(params.bottom, height),
        frac(params.left, width),
        frac(params.right.map(|r| 1.0 - r), width),
    );

    let area = match &scene.suptitle {
        Some(title) => area
            .titled(title, ("sans-serif", 24).into_font().color(&theme.foreground))
            .map_err(Error::render)?,
        None => area,
    };

    let cells = area.split_evenly((scene.nrows, scene.ncols));
    let cell_w = width as f64 / scene.ncols as f64;
    let cell_h = height as f64 / scene.nrows as f64;
    let wpad = (params.wspace.unwrap_or(0.0) * cell_w / 2.0).round() as i32;
    let hpad = (params.hspace.unwrap_or(0.0) * cell_h / 2.0).round() as i32;
    for (cell, axes) in cells.iter().zip(&scene.axes) {
        draw_axes(&cell.margin(hpad, hpad, wpad, wpad), axes, &theme)?;
    }
    Ok(())
}

fn draw_axes<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    axes: &AxesScene,
    theme: &Theme,
) -> Result<()> {
    let ((x0, x1), (y0, y1)) = axes.bounds();
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50);
    if let Some(title) = &axes.title {
        builder.caption(title, ("sans-serif", 18).into_font().color(&theme.foreground));
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(Error::render)?;

    // Multi-line labels are flattened onto one line
    let xlabel = axes.xlabel.as_deref().unwrap_or("").replace('\n', "   ");
    let ylabel = axes.ylabel.as_deref().unwrap_or("").replace('\n', "   ");
    chart
        .configure_mesh()
        .x_desc(xlabel)
        .y_desc(ylabel)
        .bold_line_style(theme.grid.mix(axes.grid_alpha))
        .light_line_style(theme.grid.mix(axes.grid_alpha / 2.0))
        .axis_desc_style(("sans-serif", 14).into_font().color(&theme.foreground))
        .label_style(("sans-serif", 12).into_font().color(&theme.foreground))
        .draw()
        .map_err(Error::render)?;

    for artwork in &axes.artworks {
        let color = theme.color(artwork.color());
        let label = artwork.label().map(str::to_owned);
        match artwork {
            Artwork::Bars {
                edges,
                heights,
                alpha,
                ..
            } => {
                let style = color.mix(*alpha).filled();
                let anno = chart
                    .draw_series(
                        edges
                            .windows(2)
                            .zip(heights)
                            .filter(|(_, h)| h.is_finite())
                            .map(move |(w, &h)| Rectangle::new([(w[0], 0.0), (w[1], h)], style)),
                    )
                    .map_err(Error::render)?;
                if let Some(label) = label {
                    anno.label(label).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 20, y + 5)], style)
                    });
                }
            }
            Artwork::Line { points, alpha, .. } => {
                let stroke = color.mix(*alpha);
                let finite: Vec<(f64, f64)> = points
                    .iter()
                    .copied()
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .collect();
                let anno = chart
                    .draw_series(LineSeries::new(finite, stroke.stroke_width(2)))
                    .map_err(Error::render)?;
                if let Some(label) = label {
                    anno.label(label).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], stroke.stroke_width(2))
                    });
                }
            }
            Artwork::Scatter { points, alpha, .. } => {
                let style = color.mix(*alpha).filled();
                let anno = chart
                    .draw_series(
                        points
                            .iter()
                            .filter(|(x, y)| x.is_finite() && y.is_finite())
                            .map(move |&(x, y)| Circle::new((x, y), 3, style)),
                    )
                    .map_err(Error::render)?;
                if let Some(label) = label {
                    anno.label(label)
                        .legend(move |(x, y)| Circle::new((x + 10, y), 3, style));
                }
            }
        }
    }

    if let Some(loc) = axes.legend {
        chart
            .configure_series_labels()
            .position(legend_position(loc))
            .background_style(theme.background.mix(0.8))
            .border_style(theme.grid)
            .label_font(("sans-serif", 12).into_font().color(&theme.foreground))
            .draw()
            .map_err(Error::render)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_legend_positions() {
        assert!(matches!(
            legend_position(LegendLoc::Best),
            SeriesLabelPosition::UpperRight
        ));
        assert!(matches!(
            legend_position(LegendLoc::LowerCenter),
            SeriesLabelPosition::LowerMiddle
        ));
    }

    proptest! {
        // Property: every named location maps to a fixed position
        #[test]
        fn prop_legend_position_is_total(loc in prop::sample::select(LegendLoc::ALL.to_vec())) {
            let position = legend_position(loc);
            prop_assert!(!matches!(position, SeriesLabelPosition::Coordinate(..)));
        }
    }
}
