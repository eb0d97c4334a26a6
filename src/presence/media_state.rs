use crate::transport::DeviceKind;

/// Camera and microphone state for one participant.
///
/// Everyone is assumed fully enabled until a message says otherwise, so
/// peers only announce departures from the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaState {
    pub camera_enabled: bool,
    pub mic_enabled: bool,
}

impl Default for MediaState {
    fn default() -> Self {
        Self {
            camera_enabled: true,
            mic_enabled: true,
        }
    }
}

impl MediaState {
    #[must_use]
    pub fn get(&self, device: DeviceKind) -> bool {
        match device {
            DeviceKind::Camera => self.camera_enabled,
            DeviceKind::Mic => self.mic_enabled,
        }
    }

    pub fn set(&mut self, device: DeviceKind, enabled: bool) {
        match device {
            DeviceKind::Camera => self.camera_enabled = enabled,
            DeviceKind::Mic => self.mic_enabled = enabled,
        }
    }
}

/// One `media-presence` payload: which device changed and its new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceUpdate {
    pub device: DeviceKind,
    pub enabled: bool,
}
