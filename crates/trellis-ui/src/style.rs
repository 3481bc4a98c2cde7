use trellis_ui_graphics::{Color, Font, Margins, Size};

/// Defaults used by widgets and layouts that carry no override of their own.
///
/// Extents are in device pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    margins: Margins,
    layout_margins: Margins,
    layout_spacing: Size,
    foreground_colour: Color,
    background_colour: Color,
    colour: Color,
    font: Font,
}

impl Style {
    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn layout_margins(&self) -> Margins {
        self.layout_margins
    }

    pub fn layout_spacing(&self) -> Size {
        self.layout_spacing
    }

    pub fn foreground_colour(&self) -> Color {
        self.foreground_colour
    }

    pub fn background_colour(&self) -> Color {
        self.background_colour
    }

    /// Colour behind widgets that paint no background of their own.
    pub fn colour(&self) -> Color {
        self.colour
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_layout_margins(mut self, margins: Margins) -> Self {
        self.layout_margins = margins;
        self
    }

    pub fn with_layout_spacing(mut self, spacing: Size) -> Self {
        self.layout_spacing = spacing;
        self
    }

    pub fn with_foreground_colour(mut self, colour: Color) -> Self {
        self.foreground_colour = colour;
        self
    }

    pub fn with_background_colour(mut self, colour: Color) -> Self {
        self.background_colour = colour;
        self
    }

    pub fn with_colour(mut self, colour: Color) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            margins: Margins::uniform(2.0),
            layout_margins: Margins::uniform(2.0),
            layout_spacing: Size::uniform(4.0),
            foreground_colour: Color::BLACK,
            background_colour: Color::WHITE,
            colour: Color::rgb(0xEF, 0xEB, 0xE7),
            font: Font::default(),
        }
    }
}
