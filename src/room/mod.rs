mod controller;
mod escape;
mod messages;
mod notices;
mod room_config;
mod room_error;
mod room_event;

/// Hard ceiling on simultaneous callers in a room, self included. Matches
/// the largest tile count the grid table covers
/// ([`MAX_GRID_TILES`](crate::layout::MAX_GRID_TILES)) and is enforced on
/// every admission path: the initial occupant list and late stream
/// accepts alike.
pub const MAX_CALLERS_PER_ROOM: usize = 15;

pub use controller::RoomController;
pub use escape::escape_html;
pub use messages::{
    audio_meter_payload, media_presence_payload, mic_control_payload, parse_audio_meter,
    parse_media_presence, parse_mic_control,
};
pub use room_config::RoomConfig;
pub use room_error::RoomError;
pub use room_event::{ErrorNotice, RoomEvent};
