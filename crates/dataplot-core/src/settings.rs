//! Plot settings shared by datasets, figures, axes and artists
//!
//! Settings are a fixed record of optional fields. A closed [`SettingKey`]
//! enumeration addresses each field, so generic get/set code stays
//! exhaustive at compile time.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Names of the plot styles understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "classic")]
    Classic,
    #[serde(rename = "bmh")]
    Bmh,
    #[serde(rename = "dark_background")]
    DarkBackground,
    #[serde(rename = "fast")]
    Fast,
    #[serde(rename = "fivethirtyeight")]
    FiveThirtyEight,
    #[serde(rename = "ggplot")]
    Ggplot,
    #[serde(rename = "grayscale")]
    Grayscale,
    #[serde(rename = "seaborn-v0_8")]
    Seaborn,
    #[serde(rename = "seaborn-v0_8-dark")]
    SeabornDark,
    #[serde(rename = "seaborn-v0_8-darkgrid")]
    SeabornDarkgrid,
    #[serde(rename = "seaborn-v0_8-white")]
    SeabornWhite,
    #[serde(rename = "seaborn-v0_8-whitegrid")]
    SeabornWhitegrid,
    #[serde(rename = "Solarize_Light2")]
    SolarizeLight2,
    #[serde(rename = "tableau-colorblind10")]
    TableauColorblind10,
}

impl Style {
    /// Every supported style, in declaration order
    pub const ALL: [Style; 15] = [
        Style::Default,
        Style::Classic,
        Style::Bmh,
        Style::DarkBackground,
        Style::Fast,
        Style::FiveThirtyEight,
        Style::Ggplot,
        Style::Grayscale,
        Style::Seaborn,
        Style::SeabornDark,
        Style::SeabornDarkgrid,
        Style::SeabornWhite,
        Style::SeabornWhitegrid,
        Style::SolarizeLight2,
        Style::TableauColorblind10,
    ];

    /// The conventional name of this style
    pub fn name(&self) -> &'static str {
        match self {
            Style::Default => "default",
            Style::Classic => "classic",
            Style::Bmh => "bmh",
            Style::DarkBackground => "dark_background",
            Style::Fast => "fast",
            Style::FiveThirtyEight => "fivethirtyeight",
            Style::Ggplot => "ggplot",
            Style::Grayscale => "grayscale",
            Style::Seaborn => "seaborn-v0_8",
            Style::SeabornDark => "seaborn-v0_8-dark",
            Style::SeabornDarkgrid => "seaborn-v0_8-darkgrid",
            Style::SeabornWhite => "seaborn-v0_8-white",
            Style::SeabornWhitegrid => "seaborn-v0_8-whitegrid",
            Style::SolarizeLight2 => "Solarize_Light2",
            Style::TableauColorblind10 => "tableau-colorblind10",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Style::ALL
            .iter()
            .copied()
            .find(|style| style.name() == s)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown style '{s}'")))
    }
}

/// Location of the legend inside an axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendLoc {
    Best,
    #[serde(rename = "upper right")]
    UpperRight,
    #[serde(rename = "upper left")]
    UpperLeft,
    #[serde(rename = "lower left")]
    LowerLeft,
    #[serde(rename = "lower right")]
    LowerRight,
    Right,
    #[serde(rename = "center left")]
    CenterLeft,
    #[serde(rename = "center right")]
    CenterRight,
    #[serde(rename = "lower center")]
    LowerCenter,
    #[serde(rename = "upper center")]
    UpperCenter,
    Center,
}

impl LegendLoc {
    pub const ALL: [LegendLoc; 11] = [
        LegendLoc::Best,
        LegendLoc::UpperRight,
        LegendLoc::UpperLeft,
        LegendLoc::LowerLeft,
        LegendLoc::LowerRight,
        LegendLoc::Right,
        LegendLoc::CenterLeft,
        LegendLoc::CenterRight,
        LegendLoc::LowerCenter,
        LegendLoc::UpperCenter,
        LegendLoc::Center,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LegendLoc::Best => "best",
            LegendLoc::UpperRight => "upper right",
            LegendLoc::UpperLeft => "upper left",
            LegendLoc::LowerLeft => "lower left",
            LegendLoc::LowerRight => "lower right",
            LegendLoc::Right => "right",
            LegendLoc::CenterLeft => "center left",
            LegendLoc::CenterRight => "center right",
            LegendLoc::LowerCenter => "lower center",
            LegendLoc::UpperCenter => "upper center",
            LegendLoc::Center => "center",
        }
    }
}

impl fmt::Display for LegendLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LegendLoc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LegendLoc::ALL
            .iter()
            .copied()
            .find(|loc| loc.name() == s)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown legend location '{s}'")))
    }
}

/// Subplot layout parameters, as fractions of the figure size
///
/// Unset parameters are left unmodified when merged into existing ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubplotParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    /// Padding between subplots, as a fraction of the average axes width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wspace: Option<f64>,
    /// Padding between subplots, as a fraction of the average axes height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hspace: Option<f64>,
}

impl SubplotParams {
    /// Overlay the set fields of `other` onto `self`
    pub fn merge(&mut self, other: &SubplotParams) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(left, bottom, right, top, wspace, hspace);
    }
}

/// Names of every field of [`PlotSettings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Title,
    XLabel,
    YLabel,
    Alpha,
    Dpi,
    FigSize,
    Style,
    LegendLoc,
    SubplotsAdjust,
}

impl SettingKey {
    pub const ALL: [SettingKey; 9] = [
        SettingKey::Title,
        SettingKey::XLabel,
        SettingKey::YLabel,
        SettingKey::Alpha,
        SettingKey::Dpi,
        SettingKey::FigSize,
        SettingKey::Style,
        SettingKey::LegendLoc,
        SettingKey::SubplotsAdjust,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::Title => "title",
            SettingKey::XLabel => "xlabel",
            SettingKey::YLabel => "ylabel",
            SettingKey::Alpha => "alpha",
            SettingKey::Dpi => "dpi",
            SettingKey::FigSize => "figsize",
            SettingKey::Style => "style",
            SettingKey::LegendLoc => "legend_loc",
            SettingKey::SubplotsAdjust => "subplots_adjust",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed value of one setting field
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Number(f64),
    Size(u32, u32),
    Style(Style),
    LegendLoc(LegendLoc),
    Subplots(SubplotParams),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(s) => write!(f, "{s:?}"),
            SettingValue::Number(x) => write!(f, "{x}"),
            SettingValue::Size(w, h) => write!(f, "({w}, {h})"),
            SettingValue::Style(s) => write!(f, "{:?}", s.name()),
            SettingValue::LegendLoc(l) => write!(f, "{:?}", l.name()),
            SettingValue::Subplots(p) => write!(f, "{p:?}"),
        }
    }
}

/// Stores the settings for plotting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    /// Transparency of plotted elements, 0 (transparent) to 1 (opaque)
    pub alpha: Option<f64>,
    pub dpi: Option<f64>,
    /// Figure size in inches (width, height)
    pub figsize: Option<(u32, u32)>,
    pub style: Option<Style>,
    pub legend_loc: Option<LegendLoc>,
    pub subplots_adjust: Option<SubplotParams>,
}

impl PlotSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn xlabel(mut self, xlabel: impl Into<String>) -> Self {
        self.xlabel = Some(xlabel.into());
        self
    }

    pub fn ylabel(mut self, ylabel: impl Into<String>) -> Self {
        self.ylabel = Some(ylabel.into());
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn dpi(mut self, dpi: f64) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn figsize(mut self, width: u32, height: u32) -> Self {
        self.figsize = Some((width, height));
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn legend_loc(mut self, loc: LegendLoc) -> Self {
        self.legend_loc = Some(loc);
        self
    }

    pub fn subplots_adjust(mut self, params: SubplotParams) -> Self {
        self.subplots_adjust = Some(params);
        self
    }

    /// Read one field
    pub fn get(&self, key: SettingKey) -> Option<SettingValue> {
        match key {
            SettingKey::Title => self.title.clone().map(SettingValue::Text),
            SettingKey::XLabel => self.xlabel.clone().map(SettingValue::Text),
            SettingKey::YLabel => self.ylabel.clone().map(SettingValue::Text),
            SettingKey::Alpha => self.alpha.map(SettingValue::Number),
            SettingKey::Dpi => self.dpi.map(SettingValue::Number),
            SettingKey::FigSize => self.figsize.map(|(w, h)| SettingValue::Size(w, h)),
            SettingKey::Style => self.style.map(SettingValue::Style),
            SettingKey::LegendLoc => self.legend_loc.map(SettingValue::LegendLoc),
            SettingKey::SubplotsAdjust => self.subplots_adjust.map(SettingValue::Subplots),
        }
    }

    /// Overwrite one field
    ///
    /// Fails when the value's kind does not match the field.
    pub fn set_value(&mut self, key: SettingKey, value: SettingValue) -> Result<()> {
        match (key, value) {
            (SettingKey::Title, SettingValue::Text(s)) => self.title = Some(s),
            (SettingKey::XLabel, SettingValue::Text(s)) => self.xlabel = Some(s),
            (SettingKey::YLabel, SettingValue::Text(s)) => self.ylabel = Some(s),
            (SettingKey::Alpha, SettingValue::Number(x)) => self.alpha = Some(x),
            (SettingKey::Dpi, SettingValue::Number(x)) => self.dpi = Some(x),
            (SettingKey::FigSize, SettingValue::Size(w, h)) => self.figsize = Some((w, h)),
            (SettingKey::Style, SettingValue::Style(s)) => self.style = Some(s),
            (SettingKey::LegendLoc, SettingValue::LegendLoc(l)) => self.legend_loc = Some(l),
            (SettingKey::SubplotsAdjust, SettingValue::Subplots(p)) => {
                self.subplots_adjust = Some(p)
            }
            (key, value) => {
                return Err(Error::InvalidParameter(format!(
                    "setting '{key}' cannot hold value {value}"
                )))
            }
        }
        Ok(())
    }

    /// Copy one field from `source`, unset or not
    pub(crate) fn copy_field(&mut self, source: &PlotSettings, key: SettingKey) {
        match key {
            SettingKey::Title => self.title = source.title.clone(),
            SettingKey::XLabel => self.xlabel = source.xlabel.clone(),
            SettingKey::YLabel => self.ylabel = source.ylabel.clone(),
            SettingKey::Alpha => self.alpha = source.alpha,
            SettingKey::Dpi => self.dpi = source.dpi,
            SettingKey::FigSize => self.figsize = source.figsize,
            SettingKey::Style => self.style = source.style,
            SettingKey::LegendLoc => self.legend_loc = source.legend_loc,
            SettingKey::SubplotsAdjust => self.subplots_adjust = source.subplots_adjust,
        }
    }

    /// Clear one field
    pub fn unset(&mut self, key: SettingKey) {
        match key {
            SettingKey::Title => self.title = None,
            SettingKey::XLabel => self.xlabel = None,
            SettingKey::YLabel => self.ylabel = None,
            SettingKey::Alpha => self.alpha = None,
            SettingKey::Dpi => self.dpi = None,
            SettingKey::FigSize => self.figsize = None,
            SettingKey::Style => self.style = None,
            SettingKey::LegendLoc => self.legend_loc = None,
            SettingKey::SubplotsAdjust => self.subplots_adjust = None,
        }
    }

    /// Set fields as `(key, value)` pairs, in key order
    pub fn entries(&self) -> Vec<(SettingKey, SettingValue)> {
        SettingKey::ALL
            .iter()
            .filter_map(|&key| self.get(key).map(|value| (key, value)))
            .collect()
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        SettingKey::ALL.iter().all(|&key| self.get(key).is_none())
    }

    /// String representation of the fields that are set
    pub fn repr_not_none(&self) -> String {
        self.entries()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parse settings from a JSON document
    ///
    /// Missing fields stay unset.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        debug!("loaded plot settings: {}", settings.repr_not_none());
        Ok(settings)
    }

    /// Serialize the settings as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for PlotSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlotSettings({})", self.repr_not_none())
    }
}

/// Anything that owns a [`PlotSettings`] record and handles settings updates
pub trait Plotter {
    fn settings(&self) -> &PlotSettings;

    fn settings_mut(&mut self) -> &mut PlotSettings;

    /// Hook called before a field is explicitly overwritten
    fn setting_check(&self, _key: SettingKey, _value: &SettingValue) {}

    /// Overwrite every field that is set in `update`
    ///
    /// Subplot parameters are merged rather than replaced.
    fn set(&mut self, update: &PlotSettings) -> &mut Self
    where
        Self: Sized,
    {
        for (key, value) in update.entries() {
            self.setting_check(key, &value);
            let settings = self.settings_mut();
            match value {
                SettingValue::Subplots(params) => {
                    settings
                        .subplots_adjust
                        .get_or_insert_with(SubplotParams::default)
                        .merge(&params);
                }
                _ => settings.copy_field(update, key),
            }
        }
        self
    }

    /// Fill the fields that are currently unset from `defaults`
    fn set_default(&mut self, defaults: &PlotSettings) -> &mut Self
    where
        Self: Sized,
    {
        for (key, _) in defaults.entries() {
            let settings = self.settings_mut();
            if settings.get(key).is_none() {
                settings.copy_field(defaults, key);
            }
        }
        self
    }

    /// Load in another settings record, overwriting with its set fields
    fn loading(&mut self, settings: &PlotSettings) -> &mut Self
    where
        Self: Sized,
    {
        self.set(settings)
    }

    /// Value of a setting, if set
    fn get_setting(&self, key: SettingKey) -> Option<SettingValue> {
        self.settings().get(key)
    }
}

impl Plotter for PlotSettings {
    fn settings(&self) -> &PlotSettings {
        self
    }

    fn settings_mut(&mut self) -> &mut PlotSettings {
        self
    }
}
