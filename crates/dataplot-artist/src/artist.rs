//! The artist abstraction
//!
//! An artist knows how to paint one dataset on one axes. Painting returns a
//! reflex value that a group of datasets hands from one member's artist to
//! the next (the histogram uses it to share bin edges).

use crate::container::AxesWrapper;
use dataplot_core::{Error, PlotSettings, Plotter, Result};

/// Data, label and settings shared by every artist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    pub data: Option<Vec<f64>>,
    pub label: Option<String>,
    pub settings: PlotSettings,
}

impl Canvas {
    pub fn new(data: Vec<f64>, label: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            label: Some(label.into()),
            settings: PlotSettings::default(),
        }
    }
}

/// Painter of one dataset on one axes
pub trait Artist: Plotter {
    /// Value handed from one artist to the next in a group
    type Reflex;

    fn canvas(&self) -> &Canvas;

    fn canvas_mut(&mut self) -> &mut Canvas;

    /// Check that data, label and target axes are all established
    fn prepare<'s, 'a>(
        &'s self,
        on: Option<&'a mut AxesWrapper>,
    ) -> Result<(&'s [f64], &'s str, &'a mut AxesWrapper)> {
        let canvas = self.canvas();
        let data = canvas
            .data
            .as_deref()
            .ok_or(Error::UnsetPrerequisite("data"))?;
        let label = canvas
            .label
            .as_deref()
            .ok_or(Error::UnsetPrerequisite("label"))?;
        let ax = on.ok_or(Error::UnsetPrerequisite("on"))?;
        Ok((data, label, ax))
    }

    /// Paint on the axes, receiving the previous artist's reflex
    fn paint(
        &self,
        on: Option<&mut AxesWrapper>,
        reflex: Option<Self::Reflex>,
    ) -> Result<Self::Reflex>;

    /// Take over a copy of another plotter's settings
    fn customize(mut self, source: &impl Plotter) -> Self
    where
        Self: Sized,
    {
        self.canvas_mut().settings = source.settings().clone();
        self
    }

    /// Set the data to paint
    fn with_data(mut self, data: Vec<f64>, label: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        let canvas = self.canvas_mut();
        canvas.data = Some(data);
        canvas.label = Some(label.into());
        self
    }
}

/// Implements [`Plotter`] for an artist through its canvas settings
macro_rules! impl_plotter_via_canvas {
    ($ty:ty) => {
        impl dataplot_core::Plotter for $ty {
            fn settings(&self) -> &dataplot_core::PlotSettings {
                &self.canvas.settings
            }

            fn settings_mut(&mut self) -> &mut dataplot_core::PlotSettings {
                &mut self.canvas.settings
            }
        }
    };
}

pub(crate) use impl_plotter_via_canvas;
