mod local_meter;
mod meter_indicator;
mod peer_meters;

pub use local_meter::{BLOCK_SAMPLES, BROADCAST_THRESHOLD, LocalMeter, SAMPLE_STRIDE, block_intensity};
pub use meter_indicator::{DECAY_MS, MeterIndicator};
pub use peer_meters::{PeerMeters, SignalOutcome};
