use std::collections::HashMap;

use crate::meter::meter_indicator::MeterIndicator;
use crate::transport::PeerId;

/// What happened to a received activity signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    Applied,
    /// Not a finite value in `[0, 1]`; dropped, never clamped.
    OutOfRange,
    /// No indicator for that peer; the caller logs and drops.
    UnknownPeer,
}

/// Activity indicators for remote participants, keyed by peer.
///
/// An indicator exists exactly while the participant does; signals for
/// anyone else are reported as [`SignalOutcome::UnknownPeer`] instead of
/// creating state.
#[derive(Debug, Default)]
pub struct PeerMeters {
    meters: HashMap<PeerId, MeterIndicator>,
}

impl PeerMeters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, peer: PeerId) {
        self.meters.insert(peer, MeterIndicator::new());
    }

    /// Drops the peer's indicator. `false` if there was none.
    pub fn destroy(&mut self, peer: &PeerId) -> bool {
        self.meters.remove(peer).is_some()
    }

    /// Applies one received `rms` value to the peer's indicator.
    pub fn apply_signal(&mut self, peer: &PeerId, rms: f64) -> SignalOutcome {
        if !rms.is_finite() || !(0.0..=1.0).contains(&rms) {
            return SignalOutcome::OutOfRange;
        }
        match self.meters.get_mut(peer) {
            Some(meter) => {
                meter.bounce(rms);
                SignalOutcome::Applied
            }
            None => SignalOutcome::UnknownPeer,
        }
    }

    /// Advances every indicator's decay clock.
    pub fn tick(&mut self, dt_ms: f64) {
        for meter in self.meters.values_mut() {
            meter.tick(dt_ms);
        }
    }

    #[must_use]
    pub fn level(&self, peer: &PeerId) -> Option<f64> {
        self.meters.get(peer).map(MeterIndicator::level)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn signal_for_known_peer_bounces_its_indicator() {
        let mut meters = PeerMeters::new();
        let ana = PeerId::from("ana");
        meters.create(ana.clone());

        assert_eq!(meters.apply_signal(&ana, 0.6), SignalOutcome::Applied);
        assert_eq!(meters.level(&ana), Some(0.6));

        meters.tick(125.0);
        assert_eq!(meters.level(&ana), Some(0.3));
    }

    #[test]
    fn unknown_peer_is_reported_not_created() {
        let mut meters = PeerMeters::new();
        let ghost = PeerId::from("ghost");

        assert_eq!(meters.apply_signal(&ghost, 0.5), SignalOutcome::UnknownPeer);
        assert_eq!(meters.level(&ghost), None);
    }

    #[test]
    fn out_of_range_values_are_dropped_not_clamped() {
        let mut meters = PeerMeters::new();
        let ana = PeerId::from("ana");
        meters.create(ana.clone());
        meters.apply_signal(&ana, 0.9);

        for bad in [1.5, -0.2, f64::NAN, f64::INFINITY] {
            assert_eq!(meters.apply_signal(&ana, bad), SignalOutcome::OutOfRange);
        }
        // Indicator untouched by the rejects.
        assert_eq!(meters.level(&ana), Some(0.9));
    }

    #[test]
    fn destroy_removes_the_indicator() {
        let mut meters = PeerMeters::new();
        let ana = PeerId::from("ana");
        meters.create(ana.clone());

        assert!(meters.destroy(&ana));
        assert!(!meters.destroy(&ana));
        assert_eq!(meters.apply_signal(&ana, 0.4), SignalOutcome::UnknownPeer);
    }

    #[test]
    fn boundary_values_are_in_range() {
        let mut meters = PeerMeters::new();
        let ana = PeerId::from("ana");
        meters.create(ana.clone());

        assert_eq!(meters.apply_signal(&ana, 0.0), SignalOutcome::Applied);
        assert_eq!(meters.apply_signal(&ana, 1.0), SignalOutcome::Applied);
    }
}
