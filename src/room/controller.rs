//! The session controller: one instance per call session.
//!
//! Owns the participant registry, the deferred presence queue, the color
//! pool, the dashboard and the meters; everything else in the crate is a
//! pure transformer it invokes with explicit borrows. Transport lifecycle
//! events are drained through [`RoomController::poll`], which feeds them
//! through the presence machinery and hands the embedder a list of
//! [`RoomEvent`]s to repaint from.
//!
//! Every entry point is a hard error boundary: remote input that is
//! malformed, late or duplicated is logged and dropped, never propagated.

use std::sync::Arc;

use serde_json::Value;

use crate::color::{ColorPool, ColorToken};
use crate::diag::{DiagSink, NoopDiagSink};
use crate::layout::{Dashboard, TileId, TilePlacement, ViewMode};
use crate::meter::{LocalMeter, PeerMeters, SignalOutcome};
use crate::presence::{
    DeferredPresenceQueue, MicControlOutcome, Participant, ParticipantRegistry, PresenceOutcome,
    PresenceUpdate, on_mic_control, on_presence_message, on_self_toggle, on_stream_accepted,
    on_stream_closed,
};
use crate::room::messages::{
    audio_meter_payload, media_presence_payload, mic_control_payload, parse_audio_meter,
    parse_media_presence, parse_mic_control,
};
use crate::room::room_config::RoomConfig;
use crate::room::room_error::RoomError;
use crate::room::room_event::RoomEvent;
use crate::room::{MAX_CALLERS_PER_ROOM, notices};
use crate::transport::{
    ConnectStatus, Destination, DeviceKind, MediaConstraints, MessageKind, PeerId,
    SignalingTransport, TransportEvent,
};
use crate::{diag_debug, diag_error, diag_info, diag_trace, diag_warn};

pub struct RoomController {
    config: RoomConfig,
    transport: Box<dyn SignalingTransport>,
    log: Arc<dyn DiagSink>,

    registry: ParticipantRegistry,
    deferred: DeferredPresenceQueue,
    colors: ColorPool,
    dashboard: Dashboard,
    local_meter: LocalMeter,
    peer_meters: PeerMeters,

    /// Events accumulated since the last `poll`, in the order they happened.
    pending: Vec<RoomEvent>,
    joined: bool,
    // Device presence as granted at media init; an absent device cannot be
    // enabled afterwards.
    has_camera: bool,
    has_mic: bool,
}

impl RoomController {
    #[must_use]
    pub fn new(config: RoomConfig, transport: Box<dyn SignalingTransport>) -> Self {
        Self::with_log(config, transport, Arc::new(NoopDiagSink))
    }

    /// Controller with a custom diagnostic sink.
    #[must_use]
    pub fn with_log(
        config: RoomConfig,
        transport: Box<dyn SignalingTransport>,
        log: Arc<dyn DiagSink>,
    ) -> Self {
        let dashboard = Dashboard::new(config.start_mode);
        Self {
            config,
            transport,
            log,
            registry: ParticipantRegistry::new(),
            deferred: DeferredPresenceQueue::new(),
            colors: ColorPool::new(),
            dashboard,
            local_meter: LocalMeter::new(),
            peer_meters: PeerMeters::new(),
            pending: Vec::new(),
            joined: false,
            has_camera: false,
            has_mic: false,
        }
    }

    /// Establishes the session: media-init, then connect, then the local
    /// participant and its mirrored tile.
    ///
    /// Each phase is its own error boundary; a failure raises the matching
    /// fatal notice and leaves the controller as it was. Occupant dialing
    /// happens when the transport delivers the occupant list through
    /// [`poll`](Self::poll), where the room ceiling is checked.
    pub fn join(&mut self) -> Result<(), RoomError> {
        if self.joined {
            return Err(RoomError::AlreadyJoined);
        }

        let wanted = MediaConstraints {
            video: self.config.has_camera,
            audio: self.config.has_mic,
        };
        let granted = match self.transport.acquire_local_media(wanted) {
            Ok(granted) => granted,
            Err(err) => {
                diag_error!(self.log, "media init failed: {err}");
                self.pending
                    .push(RoomEvent::Notice(notices::media_init_failed(&err)));
                return Err(RoomError::MediaInit(err));
            }
        };
        self.has_camera = granted.video;
        self.has_mic = granted.audio;

        let handle = match self
            .transport
            .connect(&self.config.user_name, &self.config.room_name)
        {
            Ok(handle) => handle,
            Err(err) => {
                diag_error!(self.log, "session establishment failed: {err}");
                self.pending
                    .push(RoomEvent::Notice(notices::session_establishment_failed(&err)));
                return Err(RoomError::Connect(err));
            }
        };

        let me = handle.self_id;
        let color = self.allocate_color(&me);
        let mut participant = Participant::new(me.clone(), self.config.user_name.clone(), true);
        participant.color = Some(color);
        self.registry.insert_self(participant);
        let tile = self
            .dashboard
            .add_tile(me.clone(), self.config.user_name.clone(), true);
        self.joined = true;
        diag_info!(self.log, "joined room {} as {me}", self.config.room_name);
        self.pending.push(RoomEvent::Joined {
            peer: me,
            tile,
            color,
        });
        self.push_layout();

        // Peers assume fully enabled media; announce any departure from
        // that before the first call lands.
        if !(self.has_camera && self.config.camera_enabled) {
            self.apply_self_change(DeviceKind::Camera, false);
        }
        if !(self.has_mic && self.config.mic_enabled) {
            self.apply_self_change(DeviceKind::Mic, false);
        }
        Ok(())
    }

    /// Tears the session down: hang up every call, leave the room, drop the
    /// signaling connection, forget all per-session state. A controller
    /// that never joined has nothing to do.
    pub fn leave(&mut self) {
        if !self.joined {
            diag_debug!(self.log, "leave without a joined session; nothing to do");
            return;
        }
        self.transport.hang_up_all();
        self.transport.leave_room();
        self.transport.disconnect();

        self.registry = ParticipantRegistry::new();
        self.deferred = DeferredPresenceQueue::new();
        self.colors = ColorPool::new();
        self.dashboard = Dashboard::new(self.config.start_mode);
        self.local_meter = LocalMeter::new();
        self.peer_meters = PeerMeters::new();
        self.joined = false;
        diag_info!(self.log, "left room {}", self.config.room_name);
        self.pending.push(RoomEvent::Left);
    }

    /// Drains buffered transport events through the presence machinery and
    /// returns everything the embedder needs to repaint, in the order it
    /// happened.
    pub fn poll(&mut self) -> Vec<RoomEvent> {
        while let Some(event) = self.transport.poll_event() {
            match event {
                TransportEvent::Occupants { peers } => self.handle_occupants(&peers),
                TransportEvent::StreamAccepted { peer } => self.handle_stream_accepted(peer),
                TransportEvent::StreamClosed { peer } => self.handle_stream_closed(&peer),
                TransportEvent::PeerMessage {
                    peer,
                    kind,
                    payload,
                } => self.handle_peer_message(peer, &kind, &payload),
                TransportEvent::Fault { code, text } => {
                    diag_error!(self.log, "transport fault {code}: {text}");
                    self.pending
                        .push(RoomEvent::Notice(notices::transport_fault(&code, &text)));
                }
            }
        }
        std::mem::take(&mut self.pending)
    }

    /// Local camera toggle: device, broadcast, self participant.
    pub fn set_camera_enabled(&mut self, enabled: bool) {
        if enabled && !self.has_camera {
            diag_warn!(self.log, "cannot enable the camera: none was granted");
            return;
        }
        self.apply_self_change(DeviceKind::Camera, enabled);
    }

    /// Local mic toggle. Muting also broadcasts an explicit zero activity
    /// level so remote indicators reset instead of freezing.
    pub fn set_mic_enabled(&mut self, enabled: bool) {
        if enabled && !self.has_mic {
            diag_warn!(self.log, "cannot enable the mic: none was granted");
            return;
        }
        self.apply_self_change(DeviceKind::Mic, enabled);
    }

    /// Asks one remote participant to mute itself. Only the mute direction
    /// exists; the receiving side rejects unmute requests anyway.
    pub fn request_remote_mute(&mut self, peer: &PeerId) {
        if self.registry.is_self(peer) || !self.registry.contains(peer) {
            diag_warn!(
                self.log,
                "mute request for {peer} skipped: not a remote participant"
            );
            return;
        }
        self.send(
            Destination::Peer(peer.clone()),
            MessageKind::MicControl,
            mic_control_payload(false),
        );
    }

    /// Grid ⇄ focus switch; reflows when the mode actually changes.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.dashboard.set_mode(mode) {
            diag_info!(self.log, "view mode switched to {mode:?}");
            self.push_layout();
        }
    }

    /// Focus-mode promotion: a clicked strip tile becomes the primary.
    /// Clicks on the primary tile or in grid mode change nothing.
    pub fn click_tile(&mut self, tile: TileId) {
        if self.dashboard.click_tile(tile) {
            self.push_layout();
        }
    }

    /// Local-only mute of one tile's audio. Returns whether it applied
    /// (the self tile and unknown tiles refuse).
    pub fn set_locally_muted(&mut self, tile: TileId, muted: bool) -> bool {
        self.dashboard.set_locally_muted(tile, muted)
    }

    /// Container resize; reflows when the orientation flips.
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.dashboard.resize(width, height) {
            self.push_layout();
        }
    }

    /// Feeds one block of local capture samples through the meter. The
    /// intensity is broadcast only when the mic is live and the level
    /// clears the threshold; the self indicator always follows the block.
    pub fn push_local_audio(&mut self, block: &[f32]) {
        let mic_enabled = self
            .registry
            .self_participant()
            .is_some_and(|p| p.media.mic_enabled);
        if let Some(intensity) = self.local_meter.process_block(block, mic_enabled) {
            self.send(
                Destination::Room,
                MessageKind::AudioMeter,
                audio_meter_payload(intensity),
            );
        }
    }

    /// Advances every indicator's decay clock; the embedder calls this
    /// once per render frame.
    pub fn tick(&mut self, dt_ms: f64) {
        self.local_meter.tick(dt_ms);
        self.peer_meters.tick(dt_ms);
    }

    #[must_use]
    pub fn connect_status(&self, peer: &PeerId) -> ConnectStatus {
        self.transport.connect_status(peer)
    }

    #[must_use]
    pub fn is_joined(&self) -> bool {
        self.joined
    }

    #[must_use]
    pub fn participant(&self, peer: &PeerId) -> Option<&Participant> {
        self.registry.get(peer)
    }

    /// Active participants, self included.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.dashboard.mode()
    }

    #[must_use]
    pub fn tile_for_peer(&self, peer: &PeerId) -> Option<TileId> {
        self.dashboard.tile_for_peer(peer)
    }

    /// Current geometry, recomputable on demand; identical state yields
    /// identical placements.
    #[must_use]
    pub fn placements(&self) -> Vec<TilePlacement> {
        self.dashboard.placements()
    }

    /// Display level of the local activity indicator.
    #[must_use]
    pub fn self_level(&self) -> f64 {
        self.local_meter.level()
    }

    /// Display level of a remote participant's activity indicator.
    #[must_use]
    pub fn peer_level(&self, peer: &PeerId) -> Option<f64> {
        self.peer_meters.level(peer)
    }

    fn handle_occupants(&mut self, peers: &[PeerId]) {
        if peers.len() >= MAX_CALLERS_PER_ROOM {
            diag_warn!(
                self.log,
                "room {} already has {} callers; refusing to dial",
                self.config.room_name,
                peers.len()
            );
            self.pending
                .push(RoomEvent::Notice(notices::room_full(&self.config.room_name)));
            return;
        }
        for peer in peers {
            if let Err(err) = self.transport.dial(peer) {
                // One bad occupant must not block the rest of the room.
                diag_error!(self.log, "dialing {peer} failed: {err}");
            }
        }
    }

    fn handle_stream_accepted(&mut self, peer: PeerId) {
        if self.registry.contains(&peer) {
            diag_warn!(self.log, "duplicate stream-accepted for {peer}; dropped");
            return;
        }
        if self.registry.len() >= MAX_CALLERS_PER_ROOM {
            let dropped = self.deferred.discard(&peer);
            diag_warn!(
                self.log,
                "room at capacity; refusing late joiner {peer} ({dropped} deferred dropped)"
            );
            return;
        }

        let display_name = self
            .transport
            .peer_display_name(&peer)
            .unwrap_or_else(|| peer.to_string());
        let color = self.allocate_color(&peer);
        let mut participant = Participant::new(peer.clone(), display_name.clone(), false);
        participant.color = Some(color);
        let tile = self
            .dashboard
            .add_tile(peer.clone(), display_name.clone(), false);
        self.peer_meters.create(peer.clone());

        let replayed = on_stream_accepted(&mut self.registry, &mut self.deferred, participant);
        diag_info!(
            self.log,
            "{peer} joined ({} deferred updates replayed)",
            replayed.len()
        );
        self.pending.push(RoomEvent::PeerAdded {
            peer: peer.clone(),
            tile,
            display_name,
            color,
        });
        for update in replayed {
            self.pending.push(RoomEvent::MediaChanged {
                peer: peer.clone(),
                device: update.device,
                enabled: update.enabled,
            });
        }
        self.push_layout();

        // The newcomer assumes everyone fully enabled; repeat any disabled
        // local device state so it learns otherwise.
        if let Some(media) = self.registry.self_participant().map(|p| p.media) {
            for device in [DeviceKind::Camera, DeviceKind::Mic] {
                if !media.get(device) {
                    self.send(
                        Destination::Room,
                        MessageKind::MediaPresence,
                        media_presence_payload(PresenceUpdate {
                            device,
                            enabled: false,
                        }),
                    );
                }
            }
        }
    }

    fn handle_stream_closed(&mut self, peer: &PeerId) {
        let Some(closed) = on_stream_closed(&mut self.registry, &mut self.deferred, peer) else {
            // Close for a peer that never went active; whatever queued up
            // for it goes with it.
            let dropped = self.deferred.discard(peer);
            diag_warn!(
                self.log,
                "stream-closed for inactive {peer} ({dropped} deferred dropped)"
            );
            return;
        };

        if closed.discarded_deferred > 0 {
            diag_warn!(
                self.log,
                "{peer} closed with {} deferred updates still queued",
                closed.discarded_deferred
            );
        }
        if let Some(color) = closed.participant.color
            && !self.colors.release(color)
        {
            diag_warn!(self.log, "color released for {peer} was not pooled");
        }
        self.peer_meters.destroy(peer);
        match self.dashboard.remove_peer_tile(peer) {
            Some(tile) => {
                diag_info!(self.log, "{peer} left");
                self.pending.push(RoomEvent::PeerRemoved {
                    peer: peer.clone(),
                    tile: tile.id,
                });
                self.push_layout();
            }
            None => diag_warn!(self.log, "{peer} had no tile at close"),
        }
    }

    fn handle_peer_message(&mut self, peer: PeerId, kind: &str, payload: &Value) {
        let Some(kind) = MessageKind::parse(kind) else {
            diag_warn!(self.log, "unknown message kind {kind:?} from {peer}; dropped");
            return;
        };
        match kind {
            MessageKind::MediaPresence => self.handle_media_presence(peer, payload),
            MessageKind::MicControl => self.handle_mic_control(&peer, payload),
            MessageKind::AudioMeter => self.handle_audio_meter(&peer, payload),
        }
    }

    fn handle_media_presence(&mut self, peer: PeerId, payload: &Value) {
        let Some(update) = parse_media_presence(payload) else {
            diag_warn!(self.log, "malformed media-presence from {peer}; dropped");
            return;
        };
        match on_presence_message(&mut self.registry, &mut self.deferred, &peer, update) {
            PresenceOutcome::Applied(update) => {
                self.pending.push(RoomEvent::MediaChanged {
                    peer,
                    device: update.device,
                    enabled: update.enabled,
                });
            }
            PresenceOutcome::Deferred => {
                diag_debug!(
                    self.log,
                    "presence for {peer} deferred until its stream arrives"
                );
            }
            PresenceOutcome::SelfEcho => {
                diag_trace!(self.log, "own presence broadcast echoed back; dropped");
            }
        }
    }

    fn handle_mic_control(&mut self, peer: &PeerId, payload: &Value) {
        let Some(enabled) = parse_mic_control(payload) else {
            diag_warn!(self.log, "malformed mic-control from {peer}; dropped");
            return;
        };
        match on_mic_control(&self.registry, peer, enabled) {
            MicControlOutcome::ForceMute => {
                diag_info!(self.log, "{peer} requested a mute; honoring");
                self.apply_self_change(DeviceKind::Mic, false);
            }
            MicControlOutcome::RejectedUnmute => {
                diag_warn!(self.log, "{peer} requested a remote unmute; rejected");
            }
            MicControlOutcome::NoChange => {
                diag_debug!(self.log, "{peer} requested a mute but the mic is already off");
            }
            MicControlOutcome::SelfEcho => {
                diag_trace!(self.log, "own mic-control echoed back; dropped");
            }
        }
    }

    fn handle_audio_meter(&mut self, peer: &PeerId, payload: &Value) {
        if self.registry.is_self(peer) {
            diag_trace!(self.log, "own audio-meter echoed back; dropped");
            return;
        }
        let Some(rms) = parse_audio_meter(payload) else {
            diag_warn!(self.log, "malformed audio-meter from {peer}; dropped");
            return;
        };
        match self.peer_meters.apply_signal(peer, rms) {
            SignalOutcome::Applied => {
                self.pending.push(RoomEvent::MeterBounced {
                    peer: peer.clone(),
                    level: rms,
                });
            }
            SignalOutcome::OutOfRange => {
                diag_warn!(self.log, "audio-meter {rms} from {peer} out of range; dropped");
            }
            SignalOutcome::UnknownPeer => {
                diag_warn!(self.log, "audio-meter from unknown {peer}; dropped");
            }
        }
    }

    /// Shared path for self toggles and honored remote mute requests:
    /// media layer, room broadcast, local state, meter reset on mute.
    fn apply_self_change(&mut self, device: DeviceKind, enabled: bool) {
        let Some(update) = on_self_toggle(&mut self.registry, device, enabled) else {
            return;
        };
        self.transport.set_device_enabled(device, enabled);
        self.send(
            Destination::Room,
            MessageKind::MediaPresence,
            media_presence_payload(update),
        );
        if device == DeviceKind::Mic && !enabled {
            // Remote indicators reset instead of freezing at the last
            // nonzero level.
            self.send(
                Destination::Room,
                MessageKind::AudioMeter,
                audio_meter_payload(0.0),
            );
        }
        self.pending
            .push(RoomEvent::SelfMediaChanged { device, enabled });
    }

    fn allocate_color(&mut self, peer: &PeerId) -> ColorToken {
        let token = self.colors.allocate(&mut rand::thread_rng());
        if token.is_fallback() {
            diag_warn!(self.log, "color pool exhausted; {peer} gets the fallback");
        }
        token
    }

    /// A failed send is surfaced but never tears the session down.
    fn send(&mut self, dest: Destination, kind: MessageKind, payload: Value) {
        if let Err(err) = self.transport.send_message(dest, kind, payload) {
            diag_error!(self.log, "send {} failed: {err}", kind.as_str());
            self.pending
                .push(RoomEvent::Notice(notices::send_failed(&err)));
        }
    }

    fn push_layout(&mut self) {
        self.pending.push(RoomEvent::LayoutChanged {
            placements: self.dashboard.placements(),
        });
    }
}
