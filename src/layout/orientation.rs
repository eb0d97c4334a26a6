/// Container shape; decides whether bands of tiles stack vertically
/// (landscape rows) or horizontally (portrait columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Classifies a container by aspect ratio: anything narrower than
    /// square is portrait. Degenerate sizes (zero height) classify as
    /// landscape, which keeps the layout defined instead of panicking.
    #[must_use]
    pub fn from_container(width: f64, height: f64) -> Self {
        if width / height < 1.0 {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }
}
