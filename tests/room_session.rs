//! Full-session scenarios against a scripted fake transport: join flow,
//! capacity enforcement, deferred presence replay, the remote mute
//! handshake, meter broadcast gating and focus promotion.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use serde_json::{Value, json};

use roomstage::diag::{DiagLevel, MemoryDiagSink};
use roomstage::layout::ViewMode;
use roomstage::meter::BLOCK_SAMPLES;
use roomstage::room::{MAX_CALLERS_PER_ROOM, RoomConfig, RoomController, RoomEvent};
use roomstage::transport::{
    ConnectError, ConnectStatus, Destination, DeviceKind, DialError, MediaAcquireError,
    MediaConstraints, MessageKind, PeerId, SendError, SessionHandle, SignalingTransport,
    TransportEvent,
};

#[derive(Debug, Clone, PartialEq)]
struct SentMessage {
    dest: Destination,
    kind: MessageKind,
    payload: Value,
}

#[derive(Default)]
struct FakeState {
    events: VecDeque<TransportEvent>,
    sent: Vec<SentMessage>,
    dialed: Vec<PeerId>,
    device_calls: Vec<(DeviceKind, bool)>,
    names: HashMap<PeerId, String>,
    fail_next_send: Option<SendError>,
    hung_up: bool,
    left_room: bool,
    disconnected: bool,
}

impl FakeState {
    fn push_event(&mut self, event: TransportEvent) {
        self.events.push_back(event);
    }

    fn sent_of_kind(&self, kind: MessageKind) -> Vec<&SentMessage> {
        self.sent.iter().filter(|m| m.kind == kind).collect()
    }
}

/// Scripted transport: the test queues events on the shared state and
/// records everything the controller asks of it.
struct FakeTransport {
    state: Rc<RefCell<FakeState>>,
}

impl SignalingTransport for FakeTransport {
    fn acquire_local_media(
        &mut self,
        constraints: MediaConstraints,
    ) -> Result<MediaConstraints, MediaAcquireError> {
        Ok(constraints)
    }

    fn connect(&mut self, _user_name: &str, _room_name: &str) -> Result<SessionHandle, ConnectError> {
        Ok(SessionHandle {
            self_id: PeerId::from("me"),
        })
    }

    fn send_message(
        &mut self,
        dest: Destination,
        kind: MessageKind,
        payload: Value,
    ) -> Result<(), SendError> {
        let mut state = self.state.borrow_mut();
        if let Some(err) = state.fail_next_send.take() {
            return Err(err);
        }
        state.sent.push(SentMessage {
            dest,
            kind,
            payload,
        });
        Ok(())
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        self.state.borrow_mut().events.pop_front()
    }

    fn dial(&mut self, peer: &PeerId) -> Result<(), DialError> {
        self.state.borrow_mut().dialed.push(peer.clone());
        Ok(())
    }

    fn set_device_enabled(&mut self, device: DeviceKind, enabled: bool) {
        self.state.borrow_mut().device_calls.push((device, enabled));
    }

    fn peer_display_name(&self, peer: &PeerId) -> Option<String> {
        self.state.borrow().names.get(peer).cloned()
    }

    fn connect_status(&self, _peer: &PeerId) -> ConnectStatus {
        ConnectStatus::IsConnected
    }

    fn hang_up_all(&mut self) {
        self.state.borrow_mut().hung_up = true;
    }

    fn leave_room(&mut self) {
        self.state.borrow_mut().left_room = true;
    }

    fn disconnect(&mut self) {
        self.state.borrow_mut().disconnected = true;
    }
}

fn new_session(config: RoomConfig) -> (RoomController, Rc<RefCell<FakeState>>) {
    let state = Rc::new(RefCell::new(FakeState::default()));
    let transport = FakeTransport {
        state: Rc::clone(&state),
    };
    (RoomController::new(config, Box::new(transport)), state)
}

/// Joined controller with the join events already drained.
fn joined_session() -> (RoomController, Rc<RefCell<FakeState>>) {
    let (mut room, state) = new_session(RoomConfig::new("Ana", "standup"));
    room.join().expect("join succeeds");
    room.poll();
    (room, state)
}

/// Delivers a stream-accept for `peer` and drains the resulting events.
fn accept_peer(room: &mut RoomController, state: &Rc<RefCell<FakeState>>, peer: &str) -> Vec<RoomEvent> {
    state.borrow_mut().push_event(TransportEvent::StreamAccepted {
        peer: PeerId::from(peer),
    });
    room.poll()
}

fn loud_block() -> Vec<f32> {
    vec![0.25; BLOCK_SAMPLES]
}

#[test]
fn join_creates_the_mirrored_self_tile() {
    let (mut room, _state) = new_session(RoomConfig::new("Ana", "standup"));
    room.join().expect("join succeeds");

    let events = room.poll();
    match &events[0] {
        RoomEvent::Joined { peer, .. } => assert_eq!(peer, &PeerId::from("me")),
        other => panic!("expected Joined first, got {other:?}"),
    }
    match &events[1] {
        RoomEvent::LayoutChanged { placements } => assert_eq!(placements.len(), 1),
        other => panic!("expected LayoutChanged, got {other:?}"),
    }
    assert!(room.is_joined());
    assert_eq!(room.participant_count(), 1);
    assert!(room.participant(&PeerId::from("me")).unwrap().is_self);
}

#[test]
fn muted_config_announces_itself_at_join() {
    let mut config = RoomConfig::new("Ana", "standup");
    config.mic_enabled = false;
    let (mut room, state) = new_session(config);
    room.join().expect("join succeeds");

    let state = state.borrow();
    let presence = state.sent_of_kind(MessageKind::MediaPresence);
    assert_eq!(presence.len(), 1);
    assert_eq!(presence[0].dest, Destination::Room);
    assert_eq!(presence[0].payload, json!({"type": "mic", "enabled": false}));
    // Muting also zeroes remote indicators.
    let meters = state.sent_of_kind(MessageKind::AudioMeter);
    assert_eq!(meters.len(), 1);
    assert_eq!(meters[0].payload, json!({"rms": 0.0}));
    assert_eq!(state.device_calls, vec![(DeviceKind::Mic, false)]);
}

#[test]
fn accepted_stream_becomes_a_participant_with_a_tile() {
    let (mut room, state) = joined_session();
    state
        .borrow_mut()
        .names
        .insert(PeerId::from("p1"), "Bo".into());

    let events = accept_peer(&mut room, &state, "p1");
    match &events[0] {
        RoomEvent::PeerAdded {
            peer,
            display_name,
            color,
            ..
        } => {
            assert_eq!(peer, &PeerId::from("p1"));
            assert_eq!(display_name, "Bo");
            assert!(!color.is_fallback());
        }
        other => panic!("expected PeerAdded, got {other:?}"),
    }
    assert!(matches!(&events[1], RoomEvent::LayoutChanged { placements } if placements.len() == 2));
    assert_eq!(room.participant_count(), 2);
    assert!(room.tile_for_peer(&PeerId::from("p1")).is_some());
}

#[test]
fn presence_before_stream_is_replayed_after_acceptance() {
    // Scenario: p1 toggles its camera off before its stream lands.
    let (mut room, state) = joined_session();
    let p1 = PeerId::from("p1");

    state.borrow_mut().push_event(TransportEvent::PeerMessage {
        peer: p1.clone(),
        kind: "media-presence".into(),
        payload: json!({"type": "camera", "enabled": false}),
    });
    let events = room.poll();
    assert!(events.is_empty(), "deferred update emits nothing yet");
    assert!(room.participant(&p1).is_none());

    let events = accept_peer(&mut room, &state, "p1");
    assert!(matches!(&events[0], RoomEvent::PeerAdded { .. }));
    match &events[1] {
        RoomEvent::MediaChanged {
            peer,
            device,
            enabled,
        } => {
            assert_eq!(peer, &p1);
            assert_eq!(*device, DeviceKind::Camera);
            assert!(!enabled);
        }
        other => panic!("expected the replayed MediaChanged, got {other:?}"),
    }
    assert!(!room.participant(&p1).unwrap().media.camera_enabled);
}

#[test]
fn disabled_devices_are_reannounced_when_a_stream_arrives() {
    // Fully enabled local media announces nothing on a stream accept.
    let (mut room, state) = joined_session();
    accept_peer(&mut room, &state, "p1");
    assert!(state.borrow().sent_of_kind(MessageKind::MediaPresence).is_empty());

    // A camera muted before the newcomer arrived must be repeated, or the
    // newcomer assumes the default enabled state forever.
    let mut config = RoomConfig::new("Ana", "standup");
    config.camera_enabled = false;
    let (mut room, state) = new_session(config);
    room.join().expect("join succeeds");
    room.poll();
    assert_eq!(state.borrow().sent_of_kind(MessageKind::MediaPresence).len(), 1);

    accept_peer(&mut room, &state, "p1");
    let state = state.borrow();
    let presence = state.sent_of_kind(MessageKind::MediaPresence);
    assert_eq!(presence.len(), 2, "join announcement plus the repeat");
    assert_eq!(presence[1].dest, Destination::Room);
    assert_eq!(presence[1].payload, json!({"type": "camera", "enabled": false}));
}

#[test]
fn live_presence_applies_immediately() {
    let (mut room, state) = joined_session();
    let p1 = PeerId::from("p1");
    accept_peer(&mut room, &state, "p1");

    state.borrow_mut().push_event(TransportEvent::PeerMessage {
        peer: p1.clone(),
        kind: "media-presence".into(),
        payload: json!({"type": "mic", "enabled": false}),
    });
    let events = room.poll();
    assert!(matches!(
        &events[0],
        RoomEvent::MediaChanged { device: DeviceKind::Mic, enabled: false, .. }
    ));
    assert!(!room.participant(&p1).unwrap().media.mic_enabled);
}

#[test]
fn full_room_refuses_to_dial_and_forces_a_refresh() {
    // Scenario: the room already holds a ceiling's worth of callers.
    let (mut room, state) = new_session(RoomConfig::new("Ana", "standup"));
    room.join().expect("join succeeds");
    room.poll();

    let peers: Vec<PeerId> = (0..MAX_CALLERS_PER_ROOM)
        .map(|i| PeerId::from(format!("p{i}")))
        .collect();
    state
        .borrow_mut()
        .push_event(TransportEvent::Occupants { peers });

    let events = room.poll();
    match events.as_slice() {
        [RoomEvent::Notice(notice)] => {
            assert_eq!(notice.title, "Room \"standup\" is full.");
            assert!(notice.force_refresh);
        }
        other => panic!("expected only the room-full notice, got {other:?}"),
    }
    assert!(state.borrow().dialed.is_empty(), "no outbound call attempts");
}

#[test]
fn late_joiners_past_the_ceiling_are_refused() {
    let (mut room, state) = joined_session();
    for i in 1..MAX_CALLERS_PER_ROOM {
        accept_peer(&mut room, &state, &format!("p{i}"));
    }
    assert_eq!(room.participant_count(), MAX_CALLERS_PER_ROOM);

    let events = accept_peer(&mut room, &state, "straggler");
    assert!(events.is_empty(), "no participant, no layout change");
    assert_eq!(room.participant_count(), MAX_CALLERS_PER_ROOM);
    assert!(room.participant(&PeerId::from("straggler")).is_none());
}

#[test]
fn remote_mute_request_is_honored_mute_only() {
    let (mut room, state) = joined_session();
    let p1 = PeerId::from("p1");
    accept_peer(&mut room, &state, "p1");

    state.borrow_mut().push_event(TransportEvent::PeerMessage {
        peer: p1.clone(),
        kind: "mic-control".into(),
        payload: json!({"enabled": false}),
    });
    let events = room.poll();
    assert!(matches!(
        &events[0],
        RoomEvent::SelfMediaChanged { device: DeviceKind::Mic, enabled: false }
    ));
    let me = PeerId::from("me");
    assert!(!room.participant(&me).unwrap().media.mic_enabled);
    // The forced mute is broadcast like any self toggle, plus the zero.
    {
        let state = state.borrow();
        assert_eq!(state.sent_of_kind(MessageKind::MediaPresence).len(), 1);
        assert_eq!(state.sent_of_kind(MessageKind::AudioMeter).len(), 1);
    }

    // A remote unmute request never changes local mic state.
    state.borrow_mut().push_event(TransportEvent::PeerMessage {
        peer: p1,
        kind: "mic-control".into(),
        payload: json!({"enabled": true}),
    });
    let events = room.poll();
    assert!(events.is_empty());
    assert!(!room.participant(&me).unwrap().media.mic_enabled);
}

#[test]
fn own_broadcast_echo_produces_no_change_and_no_resend() {
    let (mut room, state) = joined_session();
    room.set_camera_enabled(false);
    room.poll();
    let sends_before = state.borrow().sent.len();

    // The room broadcast comes back at us.
    state.borrow_mut().push_event(TransportEvent::PeerMessage {
        peer: PeerId::from("me"),
        kind: "media-presence".into(),
        payload: json!({"type": "camera", "enabled": false}),
    });
    let events = room.poll();
    assert!(events.is_empty());
    assert_eq!(state.borrow().sent.len(), sends_before, "no re-broadcast");
}

#[test]
fn meter_broadcast_is_gated_by_mute() {
    // Scenario: the block loop keeps running while the user mutes.
    let (mut room, state) = joined_session();

    room.push_local_audio(&loud_block());
    assert_eq!(state.borrow().sent_of_kind(MessageKind::AudioMeter).len(), 1);

    room.set_mic_enabled(false);
    {
        let state = state.borrow();
        let meters = state.sent_of_kind(MessageKind::AudioMeter);
        assert_eq!(meters.len(), 2);
        assert_eq!(meters[1].payload, json!({"rms": 0.0}));
    }

    // Muted: further blocks send nothing, but the self indicator lives on.
    room.push_local_audio(&loud_block());
    room.push_local_audio(&loud_block());
    assert_eq!(state.borrow().sent_of_kind(MessageKind::AudioMeter).len(), 2);
    assert!(room.self_level() > 0.0);
}

#[test]
fn received_meter_signals_bounce_and_decay() {
    let (mut room, state) = joined_session();
    let p1 = PeerId::from("p1");
    accept_peer(&mut room, &state, "p1");

    state.borrow_mut().push_event(TransportEvent::PeerMessage {
        peer: p1.clone(),
        kind: "audio-meter".into(),
        payload: json!({"rms": 0.6}),
    });
    let events = room.poll();
    assert!(matches!(&events[0], RoomEvent::MeterBounced { level, .. } if *level == 0.6));
    assert_eq!(room.peer_level(&p1), Some(0.6));

    room.tick(125.0);
    assert_eq!(room.peer_level(&p1), Some(0.3));
    room.tick(200.0);
    assert_eq!(room.peer_level(&p1), Some(0.0));
}

#[test]
fn out_of_range_and_unknown_meter_signals_are_dropped() {
    let sink = Arc::new(MemoryDiagSink::new());
    let state = Rc::new(RefCell::new(FakeState::default()));
    let transport = FakeTransport {
        state: Rc::clone(&state),
    };
    let mut room = RoomController::with_log(
        RoomConfig::new("Ana", "standup"),
        Box::new(transport),
        Arc::clone(&sink) as Arc<dyn roomstage::diag::DiagSink>,
    );
    room.join().expect("join succeeds");
    room.poll();
    accept_peer(&mut room, &state, "p1");

    state.borrow_mut().push_event(TransportEvent::PeerMessage {
        peer: PeerId::from("p1"),
        kind: "audio-meter".into(),
        payload: json!({"rms": 1.5}),
    });
    state.borrow_mut().push_event(TransportEvent::PeerMessage {
        peer: PeerId::from("ghost"),
        kind: "audio-meter".into(),
        payload: json!({"rms": 0.5}),
    });
    let events = room.poll();
    assert!(events.is_empty());
    assert_eq!(room.peer_level(&PeerId::from("p1")), Some(0.0));
    assert!(sink.contains(DiagLevel::Warn, "out of range"));
    assert!(sink.contains(DiagLevel::Warn, "unknown"));
}

#[test]
fn unknown_message_kinds_are_logged_and_dropped() {
    let sink = Arc::new(MemoryDiagSink::new());
    let state = Rc::new(RefCell::new(FakeState::default()));
    let transport = FakeTransport {
        state: Rc::clone(&state),
    };
    let mut room = RoomController::with_log(
        RoomConfig::new("Ana", "standup"),
        Box::new(transport),
        Arc::clone(&sink) as Arc<dyn roomstage::diag::DiagSink>,
    );
    room.join().expect("join succeeds");
    room.poll();

    state.borrow_mut().push_event(TransportEvent::PeerMessage {
        peer: PeerId::from("p1"),
        kind: "chat".into(),
        payload: json!({"text": "hi"}),
    });
    assert!(room.poll().is_empty());
    assert!(sink.contains(DiagLevel::Warn, "unknown message kind"));
}

#[test]
fn peer_departure_tears_everything_down() {
    let (mut room, state) = joined_session();
    let p1 = PeerId::from("p1");
    accept_peer(&mut room, &state, "p1");
    let tile = room.tile_for_peer(&p1).expect("p1 has a tile");

    state
        .borrow_mut()
        .push_event(TransportEvent::StreamClosed { peer: p1.clone() });
    let events = room.poll();
    match &events[0] {
        RoomEvent::PeerRemoved { peer, tile: gone } => {
            assert_eq!(peer, &p1);
            assert_eq!(*gone, tile);
        }
        other => panic!("expected PeerRemoved, got {other:?}"),
    }
    assert!(matches!(&events[1], RoomEvent::LayoutChanged { placements } if placements.len() == 1));
    assert!(room.participant(&p1).is_none());
    assert_eq!(room.tile_for_peer(&p1), None);
    assert_eq!(room.peer_level(&p1), None);
}

#[test]
fn focus_promotion_reflows_with_the_clicked_tile_primary() {
    let (mut room, state) = joined_session();
    accept_peer(&mut room, &state, "p1");
    accept_peer(&mut room, &state, "p2");
    let p2_tile = room.tile_for_peer(&PeerId::from("p2")).unwrap();

    room.click_tile(p2_tile);
    let events = room.poll();
    match &events[0] {
        RoomEvent::LayoutChanged { placements } => {
            assert_eq!(placements[0].tile, p2_tile);
            assert_eq!(placements[0].frame.height_pct, 85.0);
        }
        other => panic!("expected LayoutChanged, got {other:?}"),
    }

    // Clicking the primary again changes nothing.
    room.click_tile(p2_tile);
    assert!(room.poll().is_empty());
}

#[test]
fn mode_switch_and_resize_reflow_once_each() {
    let (mut room, state) = joined_session();
    accept_peer(&mut room, &state, "p1");
    accept_peer(&mut room, &state, "p2");

    room.set_view_mode(ViewMode::Grid);
    let events = room.poll();
    match events.as_slice() {
        [RoomEvent::LayoutChanged { placements }] => {
            // Three callers in grid mode: one full row.
            assert!(placements.iter().all(|p| p.frame.height_pct == 100.0));
        }
        other => panic!("expected one LayoutChanged, got {other:?}"),
    }
    // Same mode again: nothing.
    room.set_view_mode(ViewMode::Grid);
    assert!(room.poll().is_empty());

    room.resize(720.0, 1280.0);
    assert_eq!(room.poll().len(), 1);
    // Same orientation: nothing.
    room.resize(600.0, 900.0);
    assert!(room.poll().is_empty());
}

#[test]
fn reflow_is_idempotent() {
    let (mut room, state) = joined_session();
    accept_peer(&mut room, &state, "p1");
    accept_peer(&mut room, &state, "p2");
    room.set_view_mode(ViewMode::Grid);

    assert_eq!(room.placements(), room.placements());
}

#[test]
fn send_failure_surfaces_a_notice_without_teardown() {
    let (mut room, state) = joined_session();
    state.borrow_mut().fail_next_send = Some(SendError {
        code: "MSG_REJECT".into(),
        text: "gateway unhappy".into(),
    });

    room.set_camera_enabled(false);
    let events = room.poll();
    match events.as_slice() {
        [RoomEvent::Notice(notice), RoomEvent::SelfMediaChanged { .. }] => {
            assert_eq!(notice.title, "Failed to Send Message");
            assert!(!notice.force_refresh);
        }
        other => panic!("expected notice then self change, got {other:?}"),
    }
    assert!(room.is_joined(), "session survives a failed send");
}

#[test]
fn remote_mute_request_goes_to_one_peer_only() {
    let (mut room, state) = joined_session();
    let p1 = PeerId::from("p1");
    accept_peer(&mut room, &state, "p1");

    room.request_remote_mute(&p1);
    {
        let state = state.borrow();
        let sent = state.sent_of_kind(MessageKind::MicControl);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].dest, Destination::Peer(p1.clone()));
        assert_eq!(sent[0].payload, json!({"enabled": false}));
    }

    // Unknown peers and self are refused without sending.
    room.request_remote_mute(&PeerId::from("ghost"));
    room.request_remote_mute(&PeerId::from("me"));
    assert_eq!(state.borrow().sent_of_kind(MessageKind::MicControl).len(), 1);
}

#[test]
fn leave_finalizes_the_transport_and_clears_state() {
    let (mut room, state) = joined_session();
    accept_peer(&mut room, &state, "p1");

    room.leave();
    let events = room.poll();
    assert!(matches!(events.last(), Some(RoomEvent::Left)));
    assert!(!room.is_joined());
    assert_eq!(room.participant_count(), 0);
    let state = state.borrow();
    assert!(state.hung_up);
    assert!(state.left_room);
    assert!(state.disconnected);
}

#[test]
fn transport_fault_surfaces_a_notice() {
    let (mut room, state) = joined_session();
    state.borrow_mut().push_event(TransportEvent::Fault {
        code: "GATEWAY_LOST".into(),
        text: "signaling connection dropped".into(),
    });

    let events = room.poll();
    match events.as_slice() {
        [RoomEvent::Notice(notice)] => {
            assert_eq!(notice.title, "An Error Has Occurred");
            assert!(notice.content.contains("GATEWAY_LOST"));
        }
        other => panic!("expected one notice, got {other:?}"),
    }
}
