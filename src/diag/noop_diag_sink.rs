use crate::diag::{diag_level::DiagLevel, diag_sink::DiagSink};

/// Sink that discards everything. Default when the embedder supplies none.
#[derive(Debug, Clone, Default)]
pub struct NoopDiagSink;

impl DiagSink for NoopDiagSink {
    #[inline]
    fn log(&self, _level: DiagLevel, _msg: &str, _target: &'static str) {}
}
