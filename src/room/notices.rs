//! Builders for every notice the controller can raise. Titles are fixed
//! strings the embedding page keys its dialogs on; content is HTML with
//! all interpolated values escaped.

use crate::room::MAX_CALLERS_PER_ROOM;
use crate::room::escape::escape_html;
use crate::room::room_event::ErrorNotice;
use crate::transport::{ConnectError, ConnectStage, MediaAcquireError, SendError};

fn detail(code: &str, text: &str) -> String {
    format!(
        "<b>Error Code</b>: {}<br><b>Error Text</b>: {}",
        escape_html(code),
        escape_html(text)
    )
}

pub(crate) fn media_init_failed(err: &MediaAcquireError) -> ErrorNotice {
    ErrorNotice {
        title: "Unable to Initialize Media Sources".to_string(),
        content: format!(
            "We are unable to gain access to your media sources. \
             Did you forget to grant us permission to use the camera/microphone?<br><br>{}",
            detail(&err.code, &err.text)
        ),
        force_refresh: false,
    }
}

pub(crate) fn session_establishment_failed(err: &ConnectError) -> ErrorNotice {
    let (title, lead) = match err.stage {
        ConnectStage::Service => (
            "An Error Has Occurred",
            "We are unable to join the video teleconferencing session.",
        ),
        ConnectStage::Room => (
            "Failed to join room",
            "We are unable to join the video teleconference room.",
        ),
    };
    ErrorNotice {
        title: title.to_string(),
        content: format!("{lead}<br><br>{}", detail(&err.code, &err.text)),
        force_refresh: false,
    }
}

/// The one notice that demands a page reload: the client is connected but
/// refuses to participate, and picking another room is the only way on.
pub(crate) fn room_full(room_name: &str) -> ErrorNotice {
    let room = escape_html(room_name);
    ErrorNotice {
        title: format!("Room \"{room_name}\" is full."),
        content: format!(
            "The videoconferencing room <b>{room}</b> has reached capacity.<br><br>\
             The maximum amount of people in a room is {MAX_CALLERS_PER_ROOM}, \
             please select another room by reloading the page."
        ),
        force_refresh: true,
    }
}

pub(crate) fn send_failed(err: &SendError) -> ErrorNotice {
    ErrorNotice {
        title: "Failed to Send Message".to_string(),
        content: format!(
            "An error occurred while sending an internal message.<br><br>{}",
            detail(&err.code, &err.text)
        ),
        force_refresh: false,
    }
}

pub(crate) fn transport_fault(code: &str, text: &str) -> ErrorNotice {
    ErrorNotice {
        title: "An Error Has Occurred".to_string(),
        content: format!(
            "There has been a problem with the session, please reload the page.<br><br>\
             <b>Error Code</b>: {}<br><b>Summary</b>: {}",
            escape_html(code),
            escape_html(text)
        ),
        force_refresh: false,
    }
}
