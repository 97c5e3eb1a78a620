use crate::error::{DrawError, DrawResult};

/// The stamp glyphs offered to the user, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct StampPalette {
    glyphs: Vec<String>,
}

impl StampPalette {
    /// Build a palette from configured glyphs. Blank entries are skipped and
    /// repeats are kept once.
    pub fn new<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut palette = Self::default();
        for glyph in glyphs {
            let glyph = glyph.as_ref().trim();
            if !glyph.is_empty() && !palette.contains(glyph) {
                palette.glyphs.push(glyph.to_owned());
            }
        }
        palette
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.glyphs.iter().any(|g| g == glyph)
    }

    /// Validate user text and add it as a new stamp option.
    ///
    /// Returns the registered glyph. Registering a glyph that is already
    /// present leaves the palette unchanged.
    pub fn register(&mut self, input: &str) -> DrawResult<String> {
        let glyph = input.trim();
        if glyph.is_empty() {
            return Err(DrawError::InvalidToolParameter(
                "custom stamp must contain at least one visible character".to_owned(),
            ));
        }
        if !self.contains(glyph) {
            self.glyphs.push(glyph.to_owned());
        }
        Ok(glyph.to_owned())
    }
}
