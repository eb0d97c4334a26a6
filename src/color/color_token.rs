use std::fmt;

/// Color assigned to a participant's tile.
///
/// The palette is 15 dark hues spaced 24 degrees apart; `Fallback` is the
/// black sentinel handed out when the pool cannot find a free hue. It is
/// visually obvious on purpose and never counts as pooled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    /// Palette entry; degrees, always a multiple of 24 below 360.
    Hue(u16),
    /// Exhaustion sentinel (black).
    Fallback,
}

impl ColorToken {
    #[must_use]
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback)
    }

    /// CSS color the renderer applies verbatim.
    #[must_use]
    pub fn css(self) -> String {
        match self {
            Self::Hue(hue) => format!("hsl({hue}, 100%, 25%)"),
            Self::Fallback => "hsl(0, 0%, 0%)".to_string(),
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}
