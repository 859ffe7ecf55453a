use crate::core::visualizer::ElementMark;

/// A color representation for the terminal - using RGB for precise color control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Rgb { r: u8, g: u8, b: u8 },
}

/// Helper macro to create RGB colors from hex values
#[macro_export]
macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        $crate::terminal::theme::Color::Rgb {
            r: $r,
            g: $g,
            b: $b,
        }
    };
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Rgb { r, g, b } => crossterm::style::Color::Rgb { r, g, b },
        }
    }
}

/// A semantic color palette for themes
#[derive(Clone, Debug)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,
    pub red: Color,
    pub orange: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub blue: Color,
    pub purple: Color,
    pub pink: Color,
    pub gray_dark: Color,
    pub gray: Color,
}

/// Colors for the visualizer and search panes.
///
/// Colors are defined once in the palette and mapped to roles by the
/// accessors below.
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
}

impl Theme {
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            palette,
        }
    }

    pub fn fg(&self) -> Color {
        self.palette.fg
    }

    pub fn bg(&self) -> Color {
        self.palette.bg
    }

    /// Status line background (primary accent)
    pub fn status_bg(&self) -> Color {
        self.palette.primary
    }

    /// Status line foreground (contrast with primary)
    pub fn status_fg(&self) -> Color {
        self.palette.bg
    }

    /// Dimmed text: indices, line numbers
    pub fn dim(&self) -> Color {
        self.palette.gray
    }

    /// Background of the highlighted span of a search hit
    pub fn match_bg(&self) -> Color {
        self.palette.yellow
    }

    /// Background of the current search hit
    pub fn current_match_bg(&self) -> Color {
        self.palette.orange
    }

    /// Bar color for an element; unmarked bars are blue
    pub fn mark(&self, mark: Option<ElementMark>) -> Color {
        let p = &self.palette;
        match mark {
            None => p.blue,
            Some(ElementMark::Comparing) => p.yellow,
            Some(ElementMark::Swapping) => p.red,
            Some(ElementMark::Selected) | Some(ElementMark::Merging) => p.cyan,
            Some(ElementMark::Minimum) => p.pink,
            Some(ElementMark::Found) | Some(ElementMark::Sorted) | Some(ElementMark::Merged) => {
                p.green
            }
            Some(ElementMark::Eliminated) => p.gray_dark,
            Some(ElementMark::Pivot) | Some(ElementMark::PivotPlaced) => p.purple,
            Some(ElementMark::PartitionLess) | Some(ElementMark::LeftHalf) => p.cyan,
            Some(ElementMark::PartitionGreater) | Some(ElementMark::RightHalf) => p.orange,
        }
    }

    /// Dracula-like dark theme
    pub fn dark() -> Self {
        Self::new(
            "dark",
            Palette {
                bg: rgb!(40, 42, 54),
                fg: rgb!(248, 248, 242),
                primary: rgb!(189, 147, 249),
                red: rgb!(255, 85, 85),
                orange: rgb!(255, 184, 108),
                yellow: rgb!(241, 250, 140),
                green: rgb!(80, 250, 123),
                cyan: rgb!(139, 233, 253),
                blue: rgb!(98, 114, 164),
                purple: rgb!(189, 147, 249),
                pink: rgb!(255, 121, 198),
                gray_dark: rgb!(68, 71, 90),
                gray: rgb!(120, 124, 150),
            },
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
