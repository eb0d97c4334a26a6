use crate::color::ColorToken;
use crate::presence::media_state::MediaState;
use crate::transport::PeerId;

/// One active call member.
///
/// Created when the transport reports a stream (or at join for the local
/// user), mutated by presence messages, destroyed on stream close. The
/// tile it renders into is found through the dashboard's peer index, not
/// stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub peer_id: PeerId,
    /// Untrusted; escape before embedding in markup.
    pub display_name: String,
    pub is_self: bool,
    pub media: MediaState,
    /// Label color from the pool; `None` until assigned.
    pub color: Option<ColorToken>,
}

impl Participant {
    #[must_use]
    pub fn new(peer_id: PeerId, display_name: String, is_self: bool) -> Self {
        Self {
            peer_id,
            display_name,
            is_self,
            media: MediaState::default(),
            color: None,
        }
    }
}
