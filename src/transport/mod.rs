mod message_kind;
mod peer_id;
mod signaling_transport;
mod transport_error;
mod transport_event;
mod types;

pub use message_kind::MessageKind;
pub use peer_id::PeerId;
pub use signaling_transport::SignalingTransport;
pub use transport_error::{ConnectError, ConnectStage, DialError, MediaAcquireError, SendError};
pub use transport_event::TransportEvent;
pub use types::{ConnectStatus, Destination, DeviceKind, MediaConstraints, SessionHandle};
