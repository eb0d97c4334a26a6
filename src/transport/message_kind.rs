/// Application message kinds the engine produces and consumes.
///
/// Anything else arriving over the transport is logged and dropped; the
/// send side can only name these, so unknown kinds never leave the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// `{type: "camera"|"mic", enabled: bool}` — a peer's device state.
    MediaPresence,
    /// `{enabled: bool}` — request that the target mute itself.
    MicControl,
    /// `{rms: number}` — audio activity level in `[0, 1]`.
    AudioMeter,
}

impl MessageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MediaPresence => "media-presence",
            Self::MicControl => "mic-control",
            Self::AudioMeter => "audio-meter",
        }
    }

    /// Maps a wire kind back to the enum; `None` for kinds this engine does
    /// not handle (e.g. `chat`).
    #[must_use]
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "media-presence" => Some(Self::MediaPresence),
            "mic-control" => Some(Self::MicControl),
            "audio-meter" => Some(Self::AudioMeter),
            _ => None,
        }
    }
}
