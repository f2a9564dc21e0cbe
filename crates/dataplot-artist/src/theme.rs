//! Colors for each named plot style

use dataplot_core::Style;
use plotters::style::RGBColor;

const TAB10: &[RGBColor] = &[
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

const CLASSIC: &[RGBColor] = &[
    RGBColor(0, 0, 255),
    RGBColor(0, 128, 0),
    RGBColor(255, 0, 0),
    RGBColor(0, 191, 191),
    RGBColor(191, 0, 191),
    RGBColor(191, 191, 0),
    RGBColor(0, 0, 0),
];

const SEABORN_DEEP: &[RGBColor] = &[
    RGBColor(0x4c, 0x72, 0xb0),
    RGBColor(0x55, 0xa8, 0x68),
    RGBColor(0xc4, 0x4e, 0x52),
    RGBColor(0x81, 0x72, 0xb2),
    RGBColor(0xcc, 0xb9, 0x74),
    RGBColor(0x64, 0xb5, 0xcd),
];

const GGPLOT: &[RGBColor] = &[
    RGBColor(0xe2, 0x4a, 0x33),
    RGBColor(0x34, 0x8a, 0xbd),
    RGBColor(0x98, 0x8e, 0xd5),
    RGBColor(0x77, 0x77, 0x77),
    RGBColor(0xfb, 0xc1, 0x5e),
    RGBColor(0x8e, 0xba, 0x42),
    RGBColor(0xff, 0xb5, 0xb8),
];

const BMH: &[RGBColor] = &[
    RGBColor(0x34, 0x8a, 0xbd),
    RGBColor(0xa6, 0x06, 0x28),
    RGBColor(0x7a, 0x68, 0xa6),
    RGBColor(0x46, 0x78, 0x21),
    RGBColor(0xd5, 0x5e, 0x00),
    RGBColor(0xcc, 0x79, 0xa7),
    RGBColor(0x56, 0xb4, 0xe9),
    RGBColor(0x00, 0x9e, 0x73),
    RGBColor(0xf0, 0xe4, 0x42),
    RGBColor(0x00, 0x72, 0xb2),
];

const FIVETHIRTYEIGHT: &[RGBColor] = &[
    RGBColor(0x00, 0x8f, 0xd5),
    RGBColor(0xfc, 0x4f, 0x30),
    RGBColor(0xe5, 0xae, 0x38),
    RGBColor(0x6d, 0x90, 0x4f),
    RGBColor(0x8b, 0x8b, 0x8b),
    RGBColor(0x81, 0x0f, 0x7c),
];

const GRAYSCALE: &[RGBColor] = &[
    RGBColor(0, 0, 0),
    RGBColor(102, 102, 102),
    RGBColor(153, 153, 153),
    RGBColor(178, 178, 178),
];

const DARK: &[RGBColor] = &[
    RGBColor(0x8d, 0xd3, 0xc7),
    RGBColor(0xfe, 0xff, 0xb3),
    RGBColor(0xbf, 0xbb, 0xd9),
    RGBColor(0xfa, 0x81, 0x74),
    RGBColor(0x81, 0xb1, 0xd2),
    RGBColor(0xfd, 0xb4, 0x62),
    RGBColor(0xb3, 0xde, 0x69),
    RGBColor(0xbc, 0x82, 0xbd),
    RGBColor(0xcc, 0xeb, 0xc4),
    RGBColor(0xff, 0xed, 0x6f),
];

const SOLARIZED: &[RGBColor] = &[
    RGBColor(0x26, 0x8b, 0xd2),
    RGBColor(0x2a, 0xa1, 0x98),
    RGBColor(0x85, 0x99, 0x00),
    RGBColor(0xb5, 0x89, 0x00),
    RGBColor(0xcb, 0x4b, 0x16),
    RGBColor(0xdc, 0x32, 0x2f),
    RGBColor(0xd3, 0x36, 0x82),
    RGBColor(0x6c, 0x71, 0xc4),
];

const TABLEAU_COLORBLIND: &[RGBColor] = &[
    RGBColor(0x00, 0x6b, 0xa4),
    RGBColor(0xff, 0x80, 0x0e),
    RGBColor(0xab, 0xab, 0xab),
    RGBColor(0x59, 0x59, 0x59),
    RGBColor(0x5f, 0x9e, 0xd1),
    RGBColor(0xc8, 0x52, 0x00),
    RGBColor(0x89, 0x89, 0x89),
    RGBColor(0xa2, 0xc8, 0xec),
    RGBColor(0xff, 0xbc, 0x79),
    RGBColor(0xcf, 0xcf, 0xcf),
];

const WHITE: RGBColor = RGBColor(255, 255, 255);
const BLACK: RGBColor = RGBColor(0, 0, 0);
const SEABORN_GREY: RGBColor = RGBColor(0xea, 0xea, 0xf2);
const LIGHT_GREY: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);

/// Background, text, grid and series colors of a style
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub grid: RGBColor,
    pub palette: &'static [RGBColor],
}

impl Theme {
    pub fn of(style: Style) -> Self {
        let light = |background, grid, palette| Theme {
            background,
            foreground: BLACK,
            grid,
            palette,
        };
        match style {
            Style::Default | Style::Fast => light(WHITE, LIGHT_GREY, TAB10),
            Style::Classic => light(WHITE, BLACK, CLASSIC),
            Style::Bmh => light(RGBColor(0xee, 0xee, 0xee), LIGHT_GREY, BMH),
            Style::DarkBackground => Theme {
                background: BLACK,
                foreground: WHITE,
                grid: WHITE,
                palette: DARK,
            },
            Style::FiveThirtyEight => {
                light(RGBColor(0xf0, 0xf0, 0xf0), RGBColor(0xcb, 0xcb, 0xcb), FIVETHIRTYEIGHT)
            }
            Style::Ggplot => light(RGBColor(0xe5, 0xe5, 0xe5), WHITE, GGPLOT),
            Style::Grayscale => light(WHITE, LIGHT_GREY, GRAYSCALE),
            Style::Seaborn | Style::SeabornDark | Style::SeabornDarkgrid => {
                light(SEABORN_GREY, WHITE, SEABORN_DEEP)
            }
            Style::SeabornWhite | Style::SeabornWhitegrid => {
                light(WHITE, SEABORN_GREY, SEABORN_DEEP)
            }
            Style::SolarizeLight2 => Theme {
                background: RGBColor(0xee, 0xe8, 0xd5),
                foreground: RGBColor(0x65, 0x7b, 0x83),
                grid: RGBColor(0xfd, 0xf6, 0xe3),
                palette: SOLARIZED,
            },
            Style::TableauColorblind10 => light(WHITE, LIGHT_GREY, TABLEAU_COLORBLIND),
        }
    }

    /// Series color for the `index`-th artwork, cycling through the palette
    pub fn color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }
}
