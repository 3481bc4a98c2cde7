/// Describes a font by family and point size.
///
/// Glyph metrics and shaping belong to the font service; layout only needs
/// the point size to derive the em used by [`crate::Units::Ems`].
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Em size in device pixels at the given resolution.
    pub fn em_size(&self, dpi: f32) -> f32 {
        self.size / 72.0 * dpi
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Sans", 10.0)
    }
}
