//! Plotting entry points shared by single datasets and groups
//!
//! Every member of a group gets its own artist; the artists are painted in
//! order on one axes, handing their reflex along. Without a target axes a
//! one-axes figure is created from the last member's settings, drawn, and
//! returned as a finished [`Scene`].

use crate::dataset::PlotDataSet;
use crate::format::Priority;
use dataplot_artist::{
    Artist, AxesWrapper, FigWrapper, HistOptions, Histogram, KSOptions, KSPlot, LineChart,
    LineOptions, QQOptions, QQPlot, Scene,
};
use dataplot_core::{Error, Plotter, Result};
use dataplot_multi::Multi;
use tracing::instrument;

/// One artist per member, carrying the member's data, formatted label and settings
fn artists<A, F>(members: &[PlotDataSet], make: F) -> Multi<A>
where
    A: Artist,
    F: Fn() -> A,
{
    members
        .iter()
        .map(|member| {
            make()
                .with_data(member.data().to_vec(), member.formatted_label(Priority::LABEL))
                .customize(member)
        })
        .collect()
}

fn draw<F>(
    members: &[PlotDataSet],
    on: Option<&mut AxesWrapper>,
    paint: F,
) -> Result<Option<Scene>>
where
    F: FnOnce(&mut AxesWrapper) -> Result<()>,
{
    if let Some(ax) = on {
        paint(ax)?;
        return Ok(None);
    }
    let mut fig = FigWrapper::new(1, 1);
    if let Some(last) = members.last() {
        fig.loading(last.settings());
    }
    let scene = fig.show(|fig| {
        let ax = fig.ax(0).ok_or(Error::UnsetPrerequisite("on"))?;
        paint(ax)
    })?;
    Ok(Some(scene))
}

/// `only` is set for a single dataset and unset for any group, whatever its size
#[instrument(skip_all, fields(members = members.len(), only = only))]
pub(crate) fn hist(
    members: &[PlotDataSet],
    only: bool,
    mut options: HistOptions<'_>,
) -> Result<Option<Scene>> {
    let on = options.on.take();
    let artists =
        artists(members, || Histogram::from_options(&options, only)).with_reflex("edges");
    draw(members, on, |ax| {
        artists.try_call(|_, artist, edges: Option<&Vec<f64>>| {
            artist.paint(Some(&mut *ax), edges.cloned())
        })?;
        Ok(())
    })
}

#[instrument(skip_all, fields(members = members.len()))]
pub(crate) fn plot(
    members: &[PlotDataSet],
    mut options: LineOptions<'_>,
) -> Result<Option<Scene>> {
    let on = options.on.take();
    let artists = artists(members, || LineChart::from_options(&options));
    draw(members, on, |ax| {
        artists.try_call(|_, artist, _| artist.paint(Some(&mut *ax), None))?;
        Ok(())
    })
}

#[instrument(skip_all, fields(members = members.len()))]
pub(crate) fn qqplot(
    members: &[PlotDataSet],
    mut options: QQOptions<'_>,
) -> Result<Option<Scene>> {
    let on = options.on.take();
    let artists = artists(members, || QQPlot::from_options(&options));
    draw(members, on, |ax| {
        artists.try_call(|_, artist, _| artist.paint(Some(&mut *ax), None))?;
        Ok(())
    })
}

#[instrument(skip_all, fields(members = members.len()))]
pub(crate) fn ksplot(
    members: &[PlotDataSet],
    mut options: KSOptions<'_>,
) -> Result<Option<Scene>> {
    let on = options.on.take();
    let artists = artists(members, || KSPlot::from_options(&options));
    draw(members, on, |ax| {
        artists.try_call(|_, artist, _| artist.paint(Some(&mut *ax), None))?;
        Ok(())
    })
}
