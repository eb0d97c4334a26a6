//! roomstage is the session presence and presentation engine of a
//! multi-party video conferencing client.
//!
//! It tracks which participants are in a call and their transient state
//! (camera/mic, assigned color, activity level), reconciles lifecycle
//! events that can race against each other, and computes tile geometry
//! for a dynamically changing participant count in two presentation
//! modes. The media transport itself (signaling, ICE, stream plumbing) is
//! an external collaborator behind the [`transport::SignalingTransport`]
//! trait; rendering is the embedder's job, driven by the events drained
//! from [`room::RoomController::poll`].

/// Per-participant label colors: discrete hue pool with bounded retries.
pub mod color;
/// Diagnostic sink trait and leveled, feature-gated logging macros.
pub mod diag;
/// Tile geometry for grid and focus modes, plus the dashboard state.
pub mod layout;
/// Audio activity metering: local intensity, broadcast gate, indicators.
pub mod meter;
/// Participant registry, deferred presence queue and the reconciler.
pub mod presence;
/// The session controller composing everything above.
pub mod room;
/// Abstract contract to the signaling/media transport collaborator.
pub mod transport;
