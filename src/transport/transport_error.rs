use std::fmt;

/// Local media capture failed during the media-init phase.
///
/// `code`/`text` come straight from the transport and feed the fatal
/// "could not access camera/microphone" notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAcquireError {
    pub code: String,
    pub text: String,
}

impl fmt::Display for MediaAcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "media acquisition failed ({}): {}", self.code, self.text)
    }
}

impl std::error::Error for MediaAcquireError {}

/// Which step of session establishment failed: reaching the signaling
/// service at all, or entering the named room once connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStage {
    Service,
    Room,
}

/// Connecting to the signaling service or entering the room failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectError {
    pub stage: ConnectStage,
    pub code: String,
    pub text: String,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            ConnectStage::Service => {
                write!(f, "connect failed ({}): {}", self.code, self.text)
            }
            ConnectStage::Room => {
                write!(f, "joining room failed ({}): {}", self.code, self.text)
            }
        }
    }
}

impl std::error::Error for ConnectError {}

/// Sending an application message failed. Non-fatal: the session keeps
/// running and the failure is surfaced as a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendError {
    pub code: String,
    pub text: String,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "send failed ({}): {}", self.code, self.text)
    }
}

impl std::error::Error for SendError {}

/// Placing a media call to one occupant failed. Logged per peer; the
/// remaining occupants are still dialed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialError {
    pub code: String,
    pub text: String,
}

impl fmt::Display for DialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dial failed ({}): {}", self.code, self.text)
    }
}

impl std::error::Error for DialError {}
