use crate::meter::meter_indicator::MeterIndicator;

/// Reference capture block size, in samples. Callers may feed shorter
/// blocks; the math works on whatever length arrives.
pub const BLOCK_SAMPLES: usize = 16384;

/// Only every Nth sample is inspected, to bound CPU cost per block.
pub const SAMPLE_STRIDE: usize = 16;

/// Intensities at or below this never leave the machine; near-silence
/// would otherwise flood the room with updates.
pub const BROADCAST_THRESHOLD: f64 = 0.08;

/// Sparse intensity of one sample block.
///
/// Sums `|sample|` at [`SAMPLE_STRIDE`] intervals and takes
/// `sqrt(stride * sum / len)`. Not true RMS; the broadcast threshold and
/// indicator scale are tuned to this exact shape, so it stays as is.
/// An empty block is silent, not NaN.
#[must_use]
pub fn block_intensity(block: &[f32]) -> f64 {
    if block.is_empty() {
        return 0.0;
    }
    let mut total = 0.0f64;
    let mut i = 0;
    while i < block.len() {
        total += f64::from(block[i]).abs();
        i += SAMPLE_STRIDE;
    }
    (SAMPLE_STRIDE as f64 * total / block.len() as f64).sqrt()
}

/// Metering for the local capture stream.
///
/// Every block drives the self indicator, muted or not; mute only gates
/// what gets broadcast. The zero that remote peers need on mute is the
/// session controller's job, since mute is a session event, not a block.
#[derive(Debug, Default)]
pub struct LocalMeter {
    indicator: MeterIndicator,
}

impl LocalMeter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one block. Returns the intensity to broadcast, or `None`
    /// when muted, too quiet, or the block is empty.
    pub fn process_block(&mut self, block: &[f32], mic_enabled: bool) -> Option<f64> {
        if block.is_empty() {
            return None;
        }
        let intensity = block_intensity(block);
        self.indicator.bounce(intensity);
        (mic_enabled && intensity > BROADCAST_THRESHOLD).then_some(intensity)
    }

    pub fn tick(&mut self, dt_ms: f64) {
        self.indicator.tick(dt_ms);
    }

    /// Level for the self indicator.
    #[must_use]
    pub fn level(&self) -> f64 {
        self.indicator.level()
    }
}
