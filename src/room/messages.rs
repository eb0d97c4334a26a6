//! JSON payloads for the three application message kinds.
//!
//! Parsers are shape-checked and total: anything missing or mistyped
//! comes back as `None` and the caller logs and drops it. Extra fields
//! are tolerated.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::presence::PresenceUpdate;
use crate::transport::DeviceKind;

#[derive(Debug, Deserialize)]
struct MediaPresenceMsg {
    #[serde(rename = "type")]
    device: DeviceKind,
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct MicControlMsg {
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct AudioMeterMsg {
    rms: f64,
}

#[must_use]
pub fn media_presence_payload(update: PresenceUpdate) -> Value {
    json!({ "type": update.device, "enabled": update.enabled })
}

#[must_use]
pub fn parse_media_presence(payload: &Value) -> Option<PresenceUpdate> {
    let msg: MediaPresenceMsg = serde_json::from_value(payload.clone()).ok()?;
    Some(PresenceUpdate {
        device: msg.device,
        enabled: msg.enabled,
    })
}

#[must_use]
pub fn mic_control_payload(enabled: bool) -> Value {
    json!({ "enabled": enabled })
}

#[must_use]
pub fn parse_mic_control(payload: &Value) -> Option<bool> {
    let msg: MicControlMsg = serde_json::from_value(payload.clone()).ok()?;
    Some(msg.enabled)
}

#[must_use]
pub fn audio_meter_payload(rms: f64) -> Value {
    json!({ "rms": rms })
}

#[must_use]
pub fn parse_audio_meter(payload: &Value) -> Option<f64> {
    let msg: AudioMeterMsg = serde_json::from_value(payload.clone()).ok()?;
    Some(msg.rms)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn media_presence_uses_the_wire_spelling() {
        let payload = media_presence_payload(PresenceUpdate {
            device: DeviceKind::Camera,
            enabled: false,
        });
        assert_eq!(payload, json!({"type": "camera", "enabled": false}));

        let update = parse_media_presence(&json!({"type": "mic", "enabled": true})).unwrap();
        assert_eq!(update.device, DeviceKind::Mic);
        assert!(update.enabled);
    }

    #[test]
    fn malformed_media_presence_is_rejected() {
        assert!(parse_media_presence(&json!({"type": "screen", "enabled": true})).is_none());
        assert!(parse_media_presence(&json!({"type": "camera", "enabled": "yes"})).is_none());
        assert!(parse_media_presence(&json!({"enabled": true})).is_none());
        assert!(parse_media_presence(&json!(42)).is_none());
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let update =
            parse_media_presence(&json!({"type": "camera", "enabled": false, "seq": 7})).unwrap();
        assert_eq!(update.device, DeviceKind::Camera);
        assert!(!update.enabled);
    }

    #[test]
    fn mic_control_round_trips_a_bare_flag() {
        assert_eq!(mic_control_payload(false), json!({"enabled": false}));
        assert_eq!(parse_mic_control(&json!({"enabled": true})), Some(true));
        assert_eq!(parse_mic_control(&json!({"enabled": 1})), None);
    }

    #[test]
    fn audio_meter_accepts_any_json_number() {
        assert_eq!(audio_meter_payload(0.5), json!({"rms": 0.5}));
        assert_eq!(parse_audio_meter(&json!({"rms": 1})), Some(1.0));
        // Range policy lives with the indicators, not the codec.
        assert_eq!(parse_audio_meter(&json!({"rms": 7.25})), Some(7.25));
        assert_eq!(parse_audio_meter(&json!({"rms": "loud"})), None);
        assert_eq!(parse_audio_meter(&json!({})), None);
    }
}
