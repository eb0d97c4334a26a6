use crate::layout::ViewMode;

/// Session parameters the embedder collects before joining.
///
/// `has_camera` / `has_mic` reflect device presence as probed by the page;
/// `camera_enabled` / `mic_enabled` are the initial toggle states for the
/// devices that are present. An absent device joins disabled and cannot be
/// enabled afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomConfig {
    pub user_name: String,
    pub room_name: String,
    pub has_camera: bool,
    pub has_mic: bool,
    pub camera_enabled: bool,
    pub mic_enabled: bool,
    /// Presentation mode the dashboard starts in.
    pub start_mode: ViewMode,
}

impl RoomConfig {
    /// Both devices present and enabled, focus-mode start. Adjust the
    /// public fields for anything else.
    #[must_use]
    pub fn new(user_name: impl Into<String>, room_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            room_name: room_name.into(),
            has_camera: true,
            has_mic: true,
            camera_enabled: true,
            mic_enabled: true,
            start_mode: ViewMode::Focus,
        }
    }
}
